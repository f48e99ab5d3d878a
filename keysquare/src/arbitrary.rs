use std::collections::BTreeMap;

use quickcheck::{Arbitrary, Gen};

use crate::{Parity, RegionId, RegionStrategy, Side, Strategy, GRID_WIDTH};

/// A swap index that is valid for [`Grid::swap()`](crate::Grid::swap).
///
/// Anything above the grid width behaves like a no-op, so it is kept small.
#[derive(Clone, Copy, Debug)]
pub struct SwapIndex(pub usize);

impl Arbitrary for SwapIndex {
    fn arbitrary(g: &mut Gen) -> Self {
        SwapIndex(usize::arbitrary(g) % usize::from(GRID_WIDTH + 2) + 1)
    }
}

/// A nonempty list of region sides, for overlaps and parities.
#[derive(Clone, Debug)]
pub struct RegionSides(pub Vec<(RegionId, Side)>);

impl Arbitrary for RegionSides {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 8 + 1;
        RegionSides(
            (0..len)
                .map(|_| (RegionId::arbitrary(g), Side::arbitrary(g)))
                .collect(),
        )
    }
}

impl Arbitrary for RegionId {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&RegionId::ALL).unwrap()
    }
}

impl Arbitrary for Side {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&Side::BOTH).unwrap()
    }
}

impl Arbitrary for Parity {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&[Parity::Even, Parity::Odd]).unwrap()
    }
}

/// Always covers all six regions.
impl Arbitrary for Strategy {
    fn arbitrary(g: &mut Gen) -> Self {
        let regions: BTreeMap<RegionId, RegionStrategy> = RegionId::ALL
            .into_iter()
            .map(|region_id| {
                let region_strategy = RegionStrategy {
                    side: Side::arbitrary(g),
                    parity: Parity::arbitrary(g),
                };
                (region_id, region_strategy)
            })
            .collect();
        Strategy { regions }
    }
}
