//! Simulated component bench for host tests and the desktop simulator.
//!
//! One [`Part`] sits in the clips at a time. Time is virtual and advances in
//! [`STEP_NS`] increments, through [`DelayNs`] and through every ADC
//! conversion ([`ADC_SAMPLE_NS`]), so busy-polling loops see the capacitor
//! charge exactly as they would on hardware.
//!
//! - Resistor: unknown R between the supply and the sense point, reference R
//!   to ground.
//! - Capacitor: first-order RC, charged through the reference resistor and
//!   dumped through [`DISCHARGE_OHMS`].
//! - Diode: fixed anode voltages per bias direction.
//! - Seven-segment: a common-anode module pulls driven decoder pads LOW.
//! - Readings are truncated to 10 bits like the converter does.

use bench_common::probe::ADC_FULL_SCALE;
use bench_common::{AnalogInput, Clock, ProbePins};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState::{self, High, Low};

use crate::bench::{BenchPin, Probe};
use crate::config::{DIVIDER_REF_OHMS, RC_REF_OHMS, SUPPLY_VOLTS};
use crate::seven_segment::{DECODER_PINS, Polarity};

/// Integration step of the analog model.
pub const STEP_NS: u64 = 100_000;

/// Virtual time taken by one ADC conversion.
pub const ADC_SAMPLE_NS: u64 = 100_000;

/// Series resistance of the discharge path.
pub const DISCHARGE_OHMS: f64 = 100.0;

/// Anode voltages of a diode under each bias direction.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct DiodeModel {
    pub forward_v: f32,
    pub reverse_v: f32,
}

impl DiodeModel {
    pub const GOOD: Self = Self {
        forward_v: 0.62,
        reverse_v: 4.6,
    };
    pub const SHORTED: Self = Self {
        forward_v: 0.03,
        reverse_v: 0.05,
    };
    pub const OPEN: Self = Self {
        forward_v: 4.9,
        reverse_v: 4.9,
    };
    /// Conducts both ways.
    pub const LEAKY: Self = Self {
        forward_v: 0.6,
        reverse_v: 2.5,
    };
}

/// What is in the clips.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Part {
    Empty,
    Resistor { ohms: f32 },
    Capacitor { microfarads: f32 },
    /// Fault holding the capacitor sense point at a fixed voltage.
    StuckNode { volts: f32 },
    Diode(DiodeModel),
    SevenSegment(Polarity),
    Led,
}

/// Bench with one part and a virtual clock.
#[derive(Clone, Debug)]
pub struct SimulatedBench {
    part: Part,
    driven: [Option<PinState>; BenchPin::COUNT],
    elapsed_ns: u64,
    /// Time not yet integrated (less than one step).
    carry_ns: u64,
    cap_volts: f64,
    led_lit_ns: u64,
    digits_seen: u16,
}

impl SimulatedBench {
    pub const fn new(part: Part) -> Self {
        Self {
            part,
            driven: [None; BenchPin::COUNT],
            elapsed_ns: 0,
            carry_ns: 0,
            cap_volts: 0.0,
            led_lit_ns: 0,
            digits_seen: 0,
        }
    }

    /// Swap the part in the clips. A new capacitor starts empty.
    pub fn insert(
        &mut self,
        part: Part,
    ) {
        self.part = part;
        self.cap_volts = 0.0;
    }

    /// Level `pin` is driven to, `None` while it is an input.
    #[inline]
    pub const fn driven(
        &self,
        pin: BenchPin,
    ) -> Option<PinState> {
        self.driven[pin.index()]
    }

    #[inline]
    pub const fn is_driven(
        &self,
        pin: BenchPin,
    ) -> bool {
        self.driven(pin).is_some()
    }

    /// Virtual time since creation.
    #[inline]
    pub const fn elapsed_ns(&self) -> u64 { self.elapsed_ns }

    /// Total time the LED under test has been lit.
    #[inline]
    pub const fn led_lit_ms(&self) -> u64 { self.led_lit_ns / 1_000_000 }

    /// Bit `n` set: digit `n` was on the display for at least one step.
    #[inline]
    pub const fn digits_seen(&self) -> u16 { self.digits_seen }

    /// Digit on the decoder inputs, if all four are driven.
    pub fn displayed_digit(&self) -> Option<u8> {
        DECODER_PINS.iter().enumerate().try_fold(0u8, |digit, (bit, &pin)| {
            self.driven(pin).map(|level| if level == High { digit | (1 << bit) } else { digit })
        })
    }

    fn advance(
        &mut self,
        ns: u64,
    ) {
        self.elapsed_ns += ns;
        self.carry_ns += ns;
        while self.carry_ns >= STEP_NS {
            self.carry_ns -= STEP_NS;
            self.step();
        }
    }

    fn step(&mut self) {
        if let Part::Capacitor { microfarads } = self.part {
            let farads = f64::from(microfarads) * 1e-6;
            let path = if self.driven(BenchPin::Discharge) == Some(Low) {
                Some((0.0, DISCHARGE_OHMS))
            } else {
                match self.driven(BenchPin::Charge) {
                    Some(High) => Some((f64::from(SUPPLY_VOLTS), f64::from(RC_REF_OHMS))),
                    Some(Low) => Some((0.0, f64::from(RC_REF_OHMS))),
                    None => None,
                }
            };
            if let Some((target, ohms)) = path {
                let k = (STEP_NS as f64 * 1e-9 / (ohms * farads)).min(1.0);
                self.cap_volts += (target - self.cap_volts) * k;
            }
        }

        if self.part == Part::Led && self.driven(BenchPin::Led) == Some(High) {
            self.led_lit_ns += STEP_NS;
        }

        if let Some(digit) = self.displayed_digit() {
            self.digits_seen |= 1 << digit;
        }
    }

    fn volts(
        &self,
        channel: Probe,
    ) -> f64 {
        let supply = f64::from(SUPPLY_VOLTS);
        match (channel, self.part) {
            (Probe::Resistor, Part::Resistor { ohms }) => {
                let r1 = f64::from(DIVIDER_REF_OHMS);
                supply * r1 / (r1 + f64::from(ohms))
            },
            (Probe::Capacitor, Part::Capacitor { .. }) => self.cap_volts,
            (Probe::Capacitor, Part::StuckNode { volts }) => f64::from(volts),
            (Probe::DiodeAnode, part) => {
                let bias = (self.driven(BenchPin::DiodeSupply), self.driven(BenchPin::DiodeCathode));
                match (part, bias) {
                    (Part::Diode(model), (Some(High), Some(Low))) => f64::from(model.forward_v),
                    (Part::Diode(model), (Some(Low), Some(High))) => f64::from(model.reverse_v),
                    // Nothing between anode and cathode: the anode follows the supply pin
                    (Part::Diode(_), _) | (_, (Some(Low) | None, _)) => 0.0,
                    (_, (Some(High), _)) => supply,
                }
            },
            _ => 0.0,
        }
    }
}

impl ProbePins for SimulatedBench {
    type Pin = BenchPin;

    fn drive(
        &mut self,
        pin: BenchPin,
        level: PinState,
    ) {
        self.driven[pin.index()] = Some(level);
    }

    fn sample(
        &mut self,
        pin: BenchPin,
    ) -> PinState {
        self.release(pin);
        self.sense(pin)
    }

    fn sense(
        &mut self,
        pin: BenchPin,
    ) -> PinState {
        let loaded = self.part == Part::SevenSegment(Polarity::CommonAnode) && DECODER_PINS.contains(&pin);
        match self.driven(pin) {
            Some(_) if loaded => Low,
            Some(level) => level,
            None => Low,
        }
    }

    fn release(
        &mut self,
        pin: BenchPin,
    ) {
        self.driven[pin.index()] = None;
    }
}

impl AnalogInput for SimulatedBench {
    type Channel = Probe;

    fn read_raw(
        &mut self,
        channel: Probe,
    ) -> u16 {
        self.advance(ADC_SAMPLE_NS);
        let full_scale = f64::from(ADC_FULL_SCALE);
        let raw = (self.volts(channel) / f64::from(SUPPLY_VOLTS) * full_scale).clamp(0.0, full_scale);
        raw as u16
    }
}

impl Clock for SimulatedBench {
    fn now_ms(&self) -> u64 { self.elapsed_ns / 1_000_000 }
}

impl DelayNs for SimulatedBench {
    fn delay_ns(
        &mut self,
        ns: u32,
    ) {
        self.advance(u64::from(ns));
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
