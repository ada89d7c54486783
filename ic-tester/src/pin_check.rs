//! Per-gate integrity check of an already classified chip.
//!
//! Once the family is known, every gate instance is driven with a single
//! vector whose expected output is known for that family, and each output is
//! checked individually. This catches dead gates and bent pins quickly; it
//! does not re-verify the full logic function.

use bench_common::ProbePins;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState::{self, High, Low};

use crate::classify::{apply_vector, release_socket};
use crate::config::INVERTER_SETTLE_MS;
use crate::family::IcFamily;
use crate::layout::{HEX_INVERTERS, gates};

/// Stimulus and expected response used to check one gate instance.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CheckVector {
    /// Level applied to every input of the gate.
    pub input: PinState,
    /// Output a working gate produces.
    pub expected: PinState,
}

/// Check vector for `family`.
pub const fn check_vector(family: IcFamily) -> CheckVector {
    let (input, expected) = match family {
        IcFamily::Nand => (High, Low),
        IcFamily::And => (High, High),
        IcFamily::Or => (Low, Low),
        IcFamily::Xor => (Low, Low),
        IcFamily::Nor => (Low, High),
        IcFamily::Inverter => (High, Low),
    };
    CheckVector { input, expected }
}

/// Pin check verdict.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum PinCheck {
    /// Every gate produced the expected output.
    AllGood,
    /// At least one gate failed; `gate` is the first failing one (1-based).
    Faulty { gate: u8 },
}

impl PinCheck {
    /// Display verdict.
    pub const fn label(self) -> &'static str {
        match self {
            Self::AllGood => "All Good",
            Self::Faulty { .. } => "Faulty",
        }
    }
}

/// Check every gate instance of `family`.
pub fn check_pins<S>(
    socket: &mut S,
    family: IcFamily,
) -> PinCheck
where
    S: ProbePins<Pin = u8> + DelayNs,
{
    release_socket(socket);
    let vector = check_vector(family);
    let mut first_fault = None;

    if family == IcFamily::Inverter {
        for (idx, channel) in HEX_INVERTERS.iter().enumerate() {
            socket.drive(channel.input, vector.input);
            socket.delay_ms(INVERTER_SETTLE_MS);
            if socket.sample(channel.output) != vector.expected && first_fault.is_none() {
                first_fault = Some(idx);
            }
        }
    } else {
        for (idx, gate) in gates(family).iter().enumerate() {
            let output = apply_vector(socket, *gate, [vector.input, vector.input]);
            if output != vector.expected && first_fault.is_none() {
                first_fault = Some(idx);
            }
        }
    }

    release_socket(socket);

    match first_fault {
        None => PinCheck::AllGood,
        Some(idx) => PinCheck::Faulty { gate: idx as u8 + 1 },
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{ChipModel, SimulatedSocket};

    fn check(
        chip: ChipModel,
        family: IcFamily,
    ) -> PinCheck {
        let mut socket = SimulatedSocket::new(Some(chip));
        check_pins(&mut socket, family)
    }

    #[test]
    fn test_vectors_agree_with_truth_tables() {
        for family in IcFamily::ALL {
            let v = check_vector(family);
            match family.truth_table() {
                Some(table) => assert_eq!(table.output_for([v.input, v.input]), v.expected, "{family:?}"),
                None => assert_eq!(!v.input, v.expected),
            }
        }
    }

    #[test]
    fn test_healthy_chips_are_all_good() {
        for family in IcFamily::ALL {
            assert_eq!(check(ChipModel::healthy(family), family), PinCheck::AllGood, "{family:?}");
        }
    }

    #[test]
    fn test_nand_all_good() {
        let verdict = check(ChipModel::healthy(IcFamily::Nand), IcFamily::Nand);
        assert_eq!(verdict, PinCheck::AllGood);
        assert_eq!(verdict.label(), "All Good");
    }

    #[test]
    fn test_any_single_bad_gate_is_faulty() {
        for family in IcFamily::ALL {
            for gate in 0..family.gate_count() as u8 {
                let chip = ChipModel::healthy(family).with_inverted_gate(gate);
                let verdict = check(chip, family);
                assert_eq!(verdict, PinCheck::Faulty { gate: gate + 1 }, "{family:?} gate {gate}");
                assert_eq!(verdict.label(), "Faulty");
            }
        }
    }

    #[test]
    fn test_reports_first_failing_gate() {
        let chip = ChipModel::healthy(IcFamily::Nor).with_inverted_gate(3).with_inverted_gate(1);
        assert_eq!(check(chip, IcFamily::Nor), PinCheck::Faulty { gate: 2 });
    }

    #[test]
    fn test_wrong_family_is_faulty() {
        // An AND chip checked as NAND fails on the very first gate
        assert_eq!(check(ChipModel::healthy(IcFamily::And), IcFamily::Nand), PinCheck::Faulty { gate: 1 });
    }

    #[test]
    fn test_socket_released_afterwards() {
        let mut socket = SimulatedSocket::new(Some(ChipModel::healthy(IcFamily::Xor)));
        check_pins(&mut socket, IcFamily::Xor);
        assert!(crate::layout::SIGNAL_PINS.iter().all(|&pin| !socket.is_driven(pin)));
        assert_eq!(socket.unsettled_samples(), 0);
    }
}
