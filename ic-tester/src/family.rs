//! Logic families the tester recognises and their truth tables.
//!
//! # Families
//!
//! | Family | Part | Package layout |
//! |--------|------|----------------|
//! | [`IcFamily::Nand`] | 74LS00 | quad 2-input |
//! | [`IcFamily::And`] | 74LS08 | quad 2-input |
//! | [`IcFamily::Or`] | 74LS32 | quad 2-input |
//! | [`IcFamily::Xor`] | 74LS86 | quad 2-input |
//! | [`IcFamily::Nor`] | 74LS02 | quad 2-input, NOR pinout |
//! | [`IcFamily::Inverter`] | 74LS04 | hex inverter |

use embedded_hal::digital::PinState::{self, High, Low};

/// The four 2-bit input vectors, in the order they are applied.
pub const INPUT_VECTORS: [[PinState; 2]; 4] = [[Low, Low], [Low, High], [High, Low], [High, High]];

/// Expected output for each entry of [`INPUT_VECTORS`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TruthTable(pub [PinState; 4]);

impl TruthTable {
    /// Exact match: all four observed outputs equal the table.
    #[inline]
    pub fn matches(
        &self,
        observed: &[PinState; 4],
    ) -> bool {
        self.0 == *observed
    }

    /// Expected output for `inputs`.
    pub fn output_for(
        &self,
        inputs: [PinState; 2],
    ) -> PinState {
        let idx = INPUT_VECTORS.iter().position(|v| *v == inputs).unwrap_or(0);
        self.0[idx]
    }
}

pub const NAND_TABLE: TruthTable = TruthTable([High, High, High, Low]);
pub const AND_TABLE: TruthTable = TruthTable([Low, Low, Low, High]);
pub const OR_TABLE: TruthTable = TruthTable([Low, High, High, High]);
pub const XOR_TABLE: TruthTable = TruthTable([Low, High, High, Low]);
pub const NOR_TABLE: TruthTable = TruthTable([High, Low, Low, Low]);

/// A recognised 74-series family.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum IcFamily {
    Nand,
    And,
    Or,
    Xor,
    Nor,
    Inverter,
}

/// Combinational families in resolution priority order.
///
/// When a response matches more than one table, the earliest family wins.
pub const PRIORITY: [IcFamily; 5] = [IcFamily::Nand, IcFamily::And, IcFamily::Or, IcFamily::Xor, IcFamily::Nor];

impl IcFamily {
    /// All families, in the order the classifier considers them.
    pub const ALL: [IcFamily; 6] = [Self::Nand, Self::And, Self::Or, Self::Xor, Self::Nor, Self::Inverter];

    /// Display label, e.g. `74LS00 NAND`.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Nand => "74LS00 NAND",
            Self::And => "74LS08 AND",
            Self::Or => "74LS32 OR",
            Self::Xor => "74LS86 XOR",
            Self::Nor => "74LS02 NOR",
            Self::Inverter => "74LS04 INV",
        }
    }

    /// Truth table of a 2-input family; `None` for the inverter.
    pub const fn truth_table(self) -> Option<TruthTable> {
        match self {
            Self::Nand => Some(NAND_TABLE),
            Self::And => Some(AND_TABLE),
            Self::Or => Some(OR_TABLE),
            Self::Xor => Some(XOR_TABLE),
            Self::Nor => Some(NOR_TABLE),
            Self::Inverter => None,
        }
    }

    /// Number of gate instances in one package.
    pub const fn gate_count(self) -> usize {
        match self {
            Self::Inverter => 6,
            _ => 4,
        }
    }
}

/// Outcome of a classification run.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum Detection {
    /// All tested responses matched this family exactly.
    Known(IcFamily),
    /// No family matched.
    Unknown,
}

impl Detection {
    /// Display label (`74LS86 XOR`, `Unknown`).
    pub const fn label(self) -> &'static str {
        match self {
            Self::Known(family) => family.label(),
            Self::Unknown => "Unknown",
        }
    }

    /// The family, if known.
    pub const fn family(self) -> Option<IcFamily> {
        match self {
            Self::Known(family) => Some(family),
            Self::Unknown => None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_distinct() {
        let tables = [NAND_TABLE, AND_TABLE, OR_TABLE, XOR_TABLE, NOR_TABLE];
        for (i, a) in tables.iter().enumerate() {
            for b in &tables[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_or_xor_differ_only_at_high_high() {
        let diff: Vec<usize> = (0..4).filter(|&i| OR_TABLE.0[i] != XOR_TABLE.0[i]).collect();
        assert_eq!(diff, [3]);
    }

    #[test]
    fn test_nand_is_inverse_of_and() {
        for i in 0..4 {
            assert_eq!(NAND_TABLE.0[i], !AND_TABLE.0[i]);
        }
    }

    #[test]
    fn test_output_for() {
        assert_eq!(XOR_TABLE.output_for([High, Low]), High);
        assert_eq!(XOR_TABLE.output_for([High, High]), Low);
        assert_eq!(NOR_TABLE.output_for([Low, Low]), High);
    }

    #[test]
    fn test_single_mismatch_rejects() {
        let mut observed = NAND_TABLE.0;
        assert!(NAND_TABLE.matches(&observed));
        observed[2] = !observed[2];
        assert!(!NAND_TABLE.matches(&observed));
    }

    #[test]
    fn test_labels() {
        assert_eq!(Detection::Known(IcFamily::Nand).label(), "74LS00 NAND");
        assert_eq!(Detection::Known(IcFamily::Inverter).label(), "74LS04 INV");
        assert_eq!(Detection::Unknown.label(), "Unknown");
        for family in IcFamily::ALL {
            assert!(family.label().starts_with("74LS"), "{family:?}");
            assert!(family.label().len() <= 16, "{family:?}");
        }
    }

    #[test]
    fn test_only_inverter_lacks_table() {
        for family in IcFamily::ALL {
            assert_eq!(family.truth_table().is_none(), family == IcFamily::Inverter);
        }
    }
}
