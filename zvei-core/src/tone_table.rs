//! The fixed ZVEI/CCIR tone-frequency table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One element of the 16-symbol ZVEI alphabet.
///
/// `Zero` is returned for both the digit `0` and the `REPEAT` signaling
/// tone; the two share a nominal frequency and are not distinguishable
/// from the spectrum alone (spec §9, Open Question 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZveiSymbol {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    A,
    B,
    C,
    D,
    E,
    F,
    Zero,
}

impl ZveiSymbol {
    /// All sixteen symbols, in the table order of spec.md §3.
    pub const ALL: [ZveiSymbol; 16] = [
        ZveiSymbol::One,
        ZveiSymbol::Two,
        ZveiSymbol::Three,
        ZveiSymbol::Four,
        ZveiSymbol::Five,
        ZveiSymbol::Six,
        ZveiSymbol::Seven,
        ZveiSymbol::Eight,
        ZveiSymbol::Nine,
        ZveiSymbol::A,
        ZveiSymbol::B,
        ZveiSymbol::C,
        ZveiSymbol::D,
        ZveiSymbol::E,
        ZveiSymbol::F,
        ZveiSymbol::Zero,
    ];

    /// Nominal tone frequency in Hz, per the authoritative table in spec.md §3.
    pub fn frequency_hz(self) -> f64 {
        match self {
            ZveiSymbol::One => 1060.0,
            ZveiSymbol::Two => 1160.0,
            ZveiSymbol::Three => 1270.0,
            ZveiSymbol::Four => 1400.0,
            ZveiSymbol::Five => 1530.0,
            ZveiSymbol::Six => 1670.0,
            ZveiSymbol::Seven => 1830.0,
            ZveiSymbol::Eight => 2000.0,
            ZveiSymbol::Nine => 2200.0,
            ZveiSymbol::A => 2800.0,
            ZveiSymbol::B => 810.0,
            ZveiSymbol::C => 970.0,
            ZveiSymbol::D => 885.0,
            ZveiSymbol::E => 2600.0,
            ZveiSymbol::F => 680.0,
            ZveiSymbol::Zero => 2400.0,
        }
    }

    /// The single-character representation used in decoded code strings.
    pub fn as_char(self) -> char {
        match self {
            ZveiSymbol::One => '1',
            ZveiSymbol::Two => '2',
            ZveiSymbol::Three => '3',
            ZveiSymbol::Four => '4',
            ZveiSymbol::Five => '5',
            ZveiSymbol::Six => '6',
            ZveiSymbol::Seven => '7',
            ZveiSymbol::Eight => '8',
            ZveiSymbol::Nine => '9',
            ZveiSymbol::A => 'A',
            ZveiSymbol::B => 'B',
            ZveiSymbol::C => 'C',
            ZveiSymbol::D => 'D',
            ZveiSymbol::E => 'E',
            ZveiSymbol::F => 'F',
            ZveiSymbol::Zero => '0',
        }
    }

    /// Find the unique symbol whose nominal frequency is within `tolerance_hz`
    /// of `freq_hz`, breaking ties by smallest absolute error and then table
    /// order (spec.md §4.3 step 6).
    pub fn nearest_within(freq_hz: f64, tolerance_hz: f64) -> Option<ZveiSymbol> {
        Self::ALL
            .iter()
            .copied()
            .map(|s| (s, (s.frequency_hz() - freq_hz).abs()))
            .filter(|(_, err)| *err <= tolerance_hz)
            .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
            .map(|(s, _)| s)
    }
}

impl fmt::Display for ZveiSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
