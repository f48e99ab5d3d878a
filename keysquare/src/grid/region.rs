use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{CellId, InvalidArgument, NUM_REGIONS};

/// One of the six ways of splitting the board in half.
///
/// Region `r` puts every position on the side given by bit `r` of the
/// position, so the six regions of a cell spell out where it is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RegionId(u8);

impl RegionId {
    pub const ALL: [RegionId; NUM_REGIONS] = [
        RegionId(0),
        RegionId(1),
        RegionId(2),
        RegionId(3),
        RegionId(4),
        RegionId(5),
    ];

    pub fn new(region_id: u8) -> Result<Self, InvalidArgument> {
        Self::try_from(i64::from(region_id))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// The side of this region that `position` lies on.
    pub fn side_of(self, position: usize) -> Side {
        if (position >> self.0) & 1 == 0 {
            Side::Zero
        } else {
            Side::One
        }
    }
}

impl TryFrom<i64> for RegionId {
    type Error = InvalidArgument;

    fn try_from(region_id: i64) -> Result<Self, Self::Error> {
        match u8::try_from(region_id) {
            Ok(id) if usize::from(id) < NUM_REGIONS => Ok(RegionId(id)),
            _ => Err(InvalidArgument::RegionIdOutOfRange { region_id }),
        }
    }
}

impl TryFrom<u8> for RegionId {
    type Error = InvalidArgument;

    fn try_from(region_id: u8) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(region_id))
    }
}

impl From<RegionId> for u8 {
    fn from(region_id: RegionId) -> u8 {
        region_id.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which half of a region.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Side {
    Zero = 0,
    One = 1,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Zero, Side::One];

    /// The complementary side of the same region.
    #[must_use]
    pub fn dual(self) -> Self {
        match self {
            Side::Zero => Side::One,
            Side::One => Side::Zero,
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }
}

impl TryFrom<i64> for Side {
    type Error = InvalidArgument;

    fn try_from(side: i64) -> Result<Self, Self::Error> {
        match side {
            0 => Ok(Side::Zero),
            1 => Ok(Side::One),
            _ => Err(InvalidArgument::SideOutOfRange { side }),
        }
    }
}

impl TryFrom<u8> for Side {
    type Error = InvalidArgument;

    fn try_from(side: u8) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(side))
    }
}

impl From<Side> for u8 {
    fn from(side: Side) -> u8 {
        side.value()
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// A single board position within a [`Region`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    Occupied(CellId),
    /// The position is not part of the region.
    Empty,
}

impl Slot {
    pub fn cell(self) -> Option<CellId> {
        match self {
            Slot::Occupied(id) => Some(id),
            Slot::Empty => None,
        }
    }
}

/// A subset of the board, stored as a full-length sequence of [`Slot`]s.
///
/// Positions outside the subset are [`Slot::Empty`]. Because every region of a
/// board has the same length, intersecting regions is a positional comparison
/// (see [`overlap()`](crate::overlap)).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Region {
    slots: Vec<Slot>,
}

impl Region {
    pub(crate) fn from_slots(slots: Vec<Slot>) -> Self {
        Self { slots }
    }

    /// The part of the board ordered by `order` that lies on `side` of `region_id`.
    pub(crate) fn masked(order: &[CellId], region_id: RegionId, side: Side) -> Self {
        let slots = order
            .iter()
            .enumerate()
            .map(|(position, &id)| {
                if region_id.side_of(position) == side {
                    Slot::Occupied(id)
                } else {
                    Slot::Empty
                }
            })
            .collect();
        Self { slots }
    }

    /// The cells in this region, in board order.
    pub fn cells(&self) -> impl Iterator<Item = CellId> + '_ {
        self.slots.iter().filter_map(|slot| slot.cell())
    }

    pub fn num_cells(&self) -> usize {
        self.cells().count()
    }

    pub fn contains(&self, id: CellId) -> bool {
        self.slots.contains(&Slot::Occupied(id))
    }
}

impl Deref for Region {
    type Target = [Slot];

    fn deref(&self) -> &Self::Target {
        &self.slots
    }
}

/// Both sides of every region, for one board order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegionIndex {
    regions: [[Region; 2]; NUM_REGIONS],
}

impl RegionIndex {
    /// Builds all regions for the board order. Depends on nothing but `order`.
    pub fn compute(order: &[CellId]) -> Self {
        let regions = RegionId::ALL.map(|region_id| {
            Side::BOTH.map(|side| Region::masked(order, region_id, side))
        });
        trace!(num_positions = order.len(), "Computed region index");
        Self { regions }
    }

    pub fn get(&self, region_id: RegionId, side: Side) -> &Region {
        &self.regions[usize::from(region_id.value())][usize::from(side.value())]
    }
}
