use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Coin, Grid, InvalidArgument, Region, Slot};

/// The number of heads in a region, modulo 2.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Parity {
    Even = 0,
    Odd = 1,
}

impl Parity {
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Parity::Even => Parity::Odd,
            Parity::Odd => Parity::Even,
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }

    fn of_count(count: usize) -> Self {
        if count % 2 == 0 {
            Parity::Even
        } else {
            Parity::Odd
        }
    }
}

impl TryFrom<i64> for Parity {
    type Error = InvalidArgument;

    fn try_from(parity: i64) -> Result<Self, Self::Error> {
        match parity {
            0 => Ok(Parity::Even),
            1 => Ok(Parity::Odd),
            _ => Err(InvalidArgument::ParityOutOfRange { parity }),
        }
    }
}

impl TryFrom<u8> for Parity {
    type Error = InvalidArgument;

    fn try_from(parity: u8) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(parity))
    }
}

impl From<Parity> for u8 {
    fn from(parity: Parity) -> u8 {
        parity.value()
    }
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl Grid {
    /// The parity of the heads in `region`. Empty slots are skipped.
    pub fn parity(&self, region: &Region) -> Parity {
        let num_heads = region
            .cells()
            .filter(|&id| self.cell(id).coin() == Coin::Heads)
            .count();
        Parity::of_count(num_heads)
    }
}

/// The intersection of several regions of the same board.
///
/// A position keeps its cell only if every region has that same cell there,
/// all other positions are [`Slot::Empty`]. The regions must all have the same
/// length; no regions give an empty result.
pub fn overlap(regions: &[&Region]) -> Region {
    let Some((first, rest)) = regions.split_first() else {
        return Region::default();
    };
    debug_assert!(rest.iter().all(|region| region.len() == first.len()));
    let slots = first
        .iter()
        .enumerate()
        .map(|(position, &slot)| {
            if rest.iter().all(|region| region[position] == slot) {
                slot
            } else {
                Slot::Empty
            }
        })
        .collect();
    Region::from_slots(slots)
}
