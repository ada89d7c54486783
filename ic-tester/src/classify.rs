//! Stimulus/response classification of the chip in the socket.
//!
//! # Procedure
//!
//! 1. Quad layout: apply the four [`INPUT_VECTORS`] to the probe gate
//!    (pins 1,2 → 3) and record the output after each.
//! 2. NOR layout: same on the 74LS02 probe gate (pins 2,3 → 1).
//! 3. Resolve in [`PRIORITY`] order; the first exact 4/4 table match wins.
//! 4. Only if nothing matched, exercise all six inverter channels.
//!
//! All socket pins are released at the start of each phase, and every
//! sample follows a settling delay after the last stimulus change.

use bench_common::ProbePins;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState::{self, High, Low};

use crate::config::{GATE_SETTLE_MS, INVERTER_SETTLE_MS};
use crate::family::{Detection, INPUT_VECTORS, IcFamily, PRIORITY};
use crate::layout::{Gate, HEX_INVERTERS, InverterChannel, NOR_GATES, QUAD_GATES, SIGNAL_PINS};

/// Probe gate of the quad 2-input layout.
pub const QUAD_PROBE: Gate = QUAD_GATES[0];

/// Probe gate of the NOR layout.
pub const NOR_PROBE: Gate = NOR_GATES[0];

/// Responses collected during classification.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ClassifyReport {
    /// Probe gate outputs on the quad layout, one per input vector.
    pub quad_response: [PinState; 4],
    /// Probe gate outputs on the NOR layout, one per input vector.
    pub nor_response: [PinState; 4],
    /// Whether the inverter test ran and passed (`None` if it did not run).
    pub inverter_ok: Option<bool>,
    /// Final verdict.
    pub detection: Detection,
}

/// Release every signal pin of the socket.
pub fn release_socket<S: ProbePins<Pin = u8>>(socket: &mut S) {
    for pin in SIGNAL_PINS {
        socket.release(pin);
    }
}

/// Drive `inputs` on `gate`, wait for the output to settle and sample it.
pub fn apply_vector<S>(
    socket: &mut S,
    gate: Gate,
    inputs: [PinState; 2],
) -> PinState
where
    S: ProbePins<Pin = u8> + DelayNs,
{
    socket.drive(gate.inputs[0], inputs[0]);
    socket.drive(gate.inputs[1], inputs[1]);
    socket.delay_ms(GATE_SETTLE_MS);
    socket.sample(gate.output)
}

/// Apply all four input vectors to `gate`, in order.
pub fn probe_gate<S>(
    socket: &mut S,
    gate: Gate,
) -> [PinState; 4]
where
    S: ProbePins<Pin = u8> + DelayNs,
{
    release_socket(socket);
    let mut response = [Low; 4];
    for (slot, inputs) in response.iter_mut().zip(INPUT_VECTORS) {
        *slot = apply_vector(socket, gate, inputs);
    }
    response
}

/// Resolve the two combinational responses to a family.
///
/// NAND/AND/OR/XOR are matched against the quad response, NOR against the
/// NOR-layout response. Returns the first match in [`PRIORITY`] order.
pub fn resolve(
    quad_response: &[PinState; 4],
    nor_response: &[PinState; 4],
) -> Option<IcFamily> {
    PRIORITY.into_iter().find(|family| {
        let response = if *family == IcFamily::Nor { nor_response } else { quad_response };
        family.truth_table().is_some_and(|table| table.matches(response))
    })
}

/// Toggle one inverter channel LOW then HIGH; the output must be the
/// complement both times.
pub fn inverter_channel_ok<S>(
    socket: &mut S,
    channel: InverterChannel,
) -> bool
where
    S: ProbePins<Pin = u8> + DelayNs,
{
    socket.drive(channel.input, Low);
    socket.delay_ms(INVERTER_SETTLE_MS);
    let low_ok = socket.sample(channel.output) == High;

    socket.drive(channel.input, High);
    socket.delay_ms(INVERTER_SETTLE_MS);
    let high_ok = socket.sample(channel.output) == Low;

    low_ok && high_ok
}

/// Exercise all six inverter channels. Every channel is tested even after a
/// failure so the socket ends in the same state either way.
pub fn exercise_hex_inverter<S>(socket: &mut S) -> bool
where
    S: ProbePins<Pin = u8> + DelayNs,
{
    release_socket(socket);
    HEX_INVERTERS
        .iter()
        .fold(true, |ok, channel| inverter_channel_ok(socket, *channel) && ok)
}

/// Identify the chip in the socket.
pub fn classify<S>(socket: &mut S) -> ClassifyReport
where
    S: ProbePins<Pin = u8> + DelayNs,
{
    let quad_response = probe_gate(socket, QUAD_PROBE);
    let nor_response = probe_gate(socket, NOR_PROBE);

    let (detection, inverter_ok) = match resolve(&quad_response, &nor_response) {
        Some(family) => (Detection::Known(family), None),
        None => {
            let ok = exercise_hex_inverter(socket);
            let detection = if ok { Detection::Known(IcFamily::Inverter) } else { Detection::Unknown };
            (detection, Some(ok))
        },
    };

    release_socket(socket);

    ClassifyReport {
        quad_response,
        nor_response,
        inverter_ok,
        detection,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::family::{AND_TABLE, NAND_TABLE, NOR_TABLE, OR_TABLE, XOR_TABLE};
    use crate::sim::{ChipModel, SimulatedSocket};

    fn classify_chip(chip: Option<ChipModel>) -> ClassifyReport {
        let mut socket = SimulatedSocket::new(chip);
        classify(&mut socket)
    }

    #[test]
    fn test_identifies_every_family() {
        for family in IcFamily::ALL {
            let report = classify_chip(Some(ChipModel::healthy(family)));
            assert_eq!(report.detection, Detection::Known(family), "{family:?}");
        }
    }

    #[test]
    fn test_empty_socket_is_unknown() {
        let report = classify_chip(None);
        assert_eq!(report.detection, Detection::Unknown);
        assert_eq!(report.inverter_ok, Some(false));
    }

    #[test]
    fn test_inverter_test_skipped_when_gate_matches() {
        let report = classify_chip(Some(ChipModel::healthy(IcFamily::Xor)));
        assert_eq!(report.inverter_ok, None);
        assert_eq!(report.quad_response, XOR_TABLE.0);
    }

    #[test]
    fn test_resolve_exact_match_only() {
        let floating = [Low; 4];
        assert_eq!(resolve(&NAND_TABLE.0, &floating), Some(IcFamily::Nand));
        assert_eq!(resolve(&AND_TABLE.0, &floating), Some(IcFamily::And));
        assert_eq!(resolve(&OR_TABLE.0, &floating), Some(IcFamily::Or));
        assert_eq!(resolve(&XOR_TABLE.0, &floating), Some(IcFamily::Xor));
        assert_eq!(resolve(&floating, &NOR_TABLE.0), Some(IcFamily::Nor));

        // Three of four entries agree with OR, still no match
        assert_eq!(resolve(&[Low, High, Low, High], &floating), None);
    }

    #[test]
    fn test_every_single_flip_rejects_family() {
        for family in [IcFamily::Nand, IcFamily::And, IcFamily::Or, IcFamily::Xor] {
            let table = family.truth_table().unwrap();
            for i in 0..4 {
                let mut response = table.0;
                response[i] = !response[i];
                assert_ne!(resolve(&response, &[Low; 4]), Some(family), "{family:?} flip {i}");
            }
        }
    }

    #[test]
    fn test_priority_resolves_to_earliest_family() {
        // Quad response matches NAND while the NOR layout also matches NOR
        assert_eq!(resolve(&NAND_TABLE.0, &NOR_TABLE.0), Some(IcFamily::Nand));
        assert_eq!(resolve(&XOR_TABLE.0, &NOR_TABLE.0), Some(IcFamily::Xor));
    }

    #[test]
    fn test_nor_table_not_matched_on_quad_layout() {
        // NOR's truth table applied to the quad probe gate is not a NOR match
        assert_eq!(resolve(&NOR_TABLE.0, &[Low; 4]), None);
    }

    #[test]
    fn test_broken_probe_gate_misidentifies_nand_as_and() {
        // Known ambiguity: an inverted probe gate output turns NAND into AND
        let report = classify_chip(Some(ChipModel::healthy(IcFamily::Nand).with_inverted_gate(0)));
        assert_eq!(report.detection, Detection::Known(IcFamily::And));
    }

    #[test]
    fn test_fault_outside_probe_gate_still_classifies() {
        let report = classify_chip(Some(ChipModel::healthy(IcFamily::Or).with_inverted_gate(2)));
        assert_eq!(report.detection, Detection::Known(IcFamily::Or));
    }

    #[test]
    fn test_one_dead_inverter_channel_is_unknown() {
        let report = classify_chip(Some(ChipModel::healthy(IcFamily::Inverter).with_inverted_gate(4)));
        assert_eq!(report.detection, Detection::Unknown);
        assert_eq!(report.inverter_ok, Some(false));
    }

    #[test]
    fn test_inverter_output_stuck_high_is_unknown() {
        // Channel 3 (5 -> 6) passes the LOW stimulus and fails only the HIGH one
        let report = classify_chip(Some(ChipModel::healthy(IcFamily::Inverter).with_stuck_output(2, High)));
        assert_eq!(report.detection, Detection::Unknown);
        assert_eq!(report.inverter_ok, Some(false));
    }

    #[test]
    fn test_inverter_output_stuck_low_is_unknown() {
        // Channel 6 (13 -> 12) passes the HIGH stimulus and fails only the LOW one
        let report = classify_chip(Some(ChipModel::healthy(IcFamily::Inverter).with_stuck_output(5, Low)));
        assert_eq!(report.detection, Detection::Unknown);
        assert_eq!(report.inverter_ok, Some(false));
    }

    #[test]
    fn test_inverter_channel_needs_both_stimuli() {
        let channel = HEX_INVERTERS[0];
        for level in [High, Low] {
            let chip = ChipModel::healthy(IcFamily::Inverter).with_stuck_output(0, level);
            let mut socket = SimulatedSocket::new(Some(chip));
            assert!(!inverter_channel_ok(&mut socket, channel), "stuck {level:?}");
        }
        let mut socket = SimulatedSocket::new(Some(ChipModel::healthy(IcFamily::Inverter)));
        assert!(inverter_channel_ok(&mut socket, channel));
    }

    #[test]
    fn test_samples_follow_settling_delay() {
        let mut socket = SimulatedSocket::new(Some(ChipModel::healthy(IcFamily::Nand)));
        classify(&mut socket);
        assert_eq!(socket.unsettled_samples(), 0);
        // 8 gate vectors with a 5ms settle each
        assert_eq!(socket.now_ms(), 8 * u64::from(GATE_SETTLE_MS));
    }

    #[test]
    fn test_socket_released_after_classification() {
        let mut socket = SimulatedSocket::new(Some(ChipModel::healthy(IcFamily::Inverter)));
        classify(&mut socket);
        assert!(SIGNAL_PINS.iter().all(|&pin| !socket.is_driven(pin)));
    }
}
