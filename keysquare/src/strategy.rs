use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    overlap, CellId, Grid, Parity, Region, RegionId, Side, StrategyError, NUM_REGIONS,
};

/// What the solo bot checks for a single region.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionStrategy {
    /// The side whose parity carries the key's bit.
    pub side: Side,
    /// The parity that `side` should have when the key lies on it.
    pub parity: Parity,
}

/// A strategy for hiding the key's location in the region parities.
///
/// In JSON, this looks like
///
/// ```json
/// { "regions": { "0": { "side": 1, "parity": 0 }, "1": { "side": 0, "parity": 1 }, ... } }
/// ```
///
/// All six regions must be present for the strategy to be usable, see
/// [`Self::validate()`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strategy {
    pub regions: BTreeMap<RegionId, RegionStrategy>,
}

impl Strategy {
    /// Checks that every region has an entry.
    pub fn validate(&self) -> Result<(), StrategyError> {
        for region_id in RegionId::ALL {
            self.get(region_id)?;
        }
        Ok(())
    }

    pub fn get(&self, region_id: RegionId) -> Result<RegionStrategy, StrategyError> {
        self.regions
            .get(&region_id)
            .copied()
            .ok_or(StrategyError::MissingRegion { region_id })
    }

    /// Decides which cell the solo bot flips.
    ///
    /// The bot knows the key. For every region it picks either the configured
    /// side or its dual, such that flipping one cell in all picked sides makes
    /// each configured side have the target parity exactly when the key lies on
    /// it. The six picks intersect in exactly one cell.
    ///
    /// The grid is not modified; see [`Self::play_solo_turn()`].
    pub fn choose_flip(&self, grid: &Grid) -> Result<CellId, StrategyError> {
        let key = grid.key_id();
        let mut chosen: Vec<&Region> = Vec::with_capacity(NUM_REGIONS);
        for region_id in RegionId::ALL {
            let RegionStrategy { side, parity: target } = self.get(region_id)?;
            let region = grid.region(region_id, side);
            let parity = grid.parity(region);
            let pick_configured_side = if region.contains(key) {
                parity != target
            } else {
                parity != target.flipped()
            };
            let picked_side = if pick_configured_side {
                side
            } else {
                side.dual()
            };
            debug!(
                region = region_id.value(),
                side = side.value(),
                parity = parity.value(),
                target = target.value(),
                picked_side = picked_side.value(),
                "Picked region side"
            );
            chosen.push(grid.region(region_id, picked_side));
        }

        let intersection = overlap(&chosen);
        let mut matches = intersection.cells();
        match (matches.next(), matches.next()) {
            (Some(id), None) => Ok(id),
            (None, _) => Err(StrategyError::NoMatchingCell),
            (Some(_), Some(_)) => Err(StrategyError::AmbiguousMatch {
                num_matches: intersection.num_cells(),
            }),
        }
    }

    /// Chooses a cell with [`Self::choose_flip()`] and flips it.
    ///
    /// On error, the grid is left unchanged.
    pub fn play_solo_turn(&self, grid: &mut Grid) -> Result<CellId, StrategyError> {
        let id = self.choose_flip(grid)?;
        grid.flip_cell(id);
        debug!(cell = %grid.cell(id), "Solo bot flipped a coin");
        Ok(id)
    }

    /// Reads the key position back out of the region parities.
    ///
    /// For each region, the key's side is the configured one if that side has
    /// the target parity, and the dual otherwise. After
    /// [`Self::play_solo_turn()`], this is the key's board position.
    pub fn decode_key_position(&self, grid: &Grid) -> Result<usize, StrategyError> {
        let mut position = 0;
        for region_id in RegionId::ALL {
            let RegionStrategy { side, parity: target } = self.get(region_id)?;
            let key_side = if grid.parity(grid.region(region_id, side)) == target {
                side
            } else {
                side.dual()
            };
            position |= usize::from(key_side.value()) << region_id.value();
        }
        Ok(position)
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::arbitrary::SwapIndex;
    use crate::{Coin, NUM_CELLS};

    quickcheck! {
        fn solo_turn_reveals_key(seed: u64, strategy: Strategy) -> bool {
            let mut grid = Grid::new(&mut StdRng::seed_from_u64(seed));
            strategy.play_solo_turn(&mut grid).unwrap();
            strategy.decode_key_position(&grid).unwrap() == grid.position_of(grid.key_id())
        }

        fn solo_turn_reveals_key_after_swap(
            seed: u64,
            swap_index: SwapIndex,
            strategy: Strategy
        ) -> bool {
            let mut grid = Grid::new(&mut StdRng::seed_from_u64(seed));
            grid.swap(swap_index.0).unwrap();
            strategy.play_solo_turn(&mut grid).unwrap();
            strategy.decode_key_position(&grid).unwrap() == grid.position_of(grid.key_id())
        }

        fn choose_flip_is_deterministic(seed: u64, strategy: Strategy) -> bool {
            let grid = Grid::new(&mut StdRng::seed_from_u64(seed));
            let first = strategy.choose_flip(&grid).unwrap();
            (0..5).all(|_| strategy.choose_flip(&grid) == Ok(first))
        }

        fn solo_turn_flips_exactly_one_coin(seed: u64, strategy: Strategy) -> bool {
            let mut grid = Grid::new(&mut StdRng::seed_from_u64(seed));
            let before: Vec<Coin> = grid.cells_in_order().map(|cell| cell.coin()).collect();
            let id = strategy.play_solo_turn(&mut grid).unwrap();
            let after: Vec<Coin> = grid.cells_in_order().map(|cell| cell.coin()).collect();
            let changed: Vec<usize> = (0..NUM_CELLS).filter(|&i| before[i] != after[i]).collect();
            changed == vec![grid.position_of(id)]
        }
    }

    #[test]
    fn corrects_instead_of_selecting_the_key() {
        // The key at (3, 2) is at position 19 = 0b010011.
        let mut rng = StdRng::seed_from_u64(19);
        let coins: [Coin; NUM_CELLS] = std::array::from_fn(|_| rand::Rng::gen(&mut rng));
        let grid = Grid::from_coins(coins, 3, 2).unwrap();
        let key_sides = [Side::One, Side::One, Side::Zero, Side::Zero, Side::One, Side::Zero];

        // Every configured side holds the key and already has the target parity,
        // so each region picks the dual side.
        let regions = RegionId::ALL
            .into_iter()
            .zip(key_sides)
            .map(|(region_id, side)| {
                let parity = grid.parity(grid.region(region_id, side));
                (region_id, RegionStrategy { side, parity })
            })
            .collect();
        let strategy = Strategy { regions };

        let id = strategy.choose_flip(&grid).unwrap();
        assert_ne!(id, grid.key_id());
        assert_eq!(grid.position_of(id), 63 - 19);
        assert_eq!(strategy.decode_key_position(&grid).unwrap(), 19);
    }

    #[test]
    fn missing_region_is_an_error() {
        let mut grid = Grid::new(&mut StdRng::seed_from_u64(8));
        let mut strategy = Strategy::default();
        for region_id in RegionId::ALL.into_iter().take(5) {
            strategy.regions.insert(
                region_id,
                RegionStrategy {
                    side: Side::Zero,
                    parity: Parity::Even,
                },
            );
        }
        let missing = StrategyError::MissingRegion {
            region_id: RegionId::ALL[5],
        };
        assert_eq!(strategy.validate(), Err(missing));
        assert_eq!(strategy.choose_flip(&grid), Err(missing));

        let coins_before: Vec<Coin> = grid.cells_in_order().map(|cell| cell.coin()).collect();
        assert_eq!(strategy.play_solo_turn(&mut grid), Err(missing));
        let coins_after: Vec<Coin> = grid.cells_in_order().map(|cell| cell.coin()).collect();
        assert_eq!(coins_before, coins_after);
    }

    #[test]
    fn deserialize_json() {
        let json = r#"{
            "regions": {
                "0": {"side": 1, "parity": 0},
                "1": {"side": 0, "parity": 1},
                "2": {"side": 0, "parity": 0},
                "3": {"side": 1, "parity": 1},
                "4": {"side": 0, "parity": 0},
                "5": {"side": 1, "parity": 0}
            }
        }"#;
        let strategy: Strategy = serde_json::from_str(json).unwrap();
        assert_eq!(strategy.validate(), Ok(()));
        assert_eq!(
            strategy.get(RegionId::ALL[3]),
            Ok(RegionStrategy {
                side: Side::One,
                parity: Parity::Odd
            })
        );
    }

    #[test]
    fn deserialize_rejects_out_of_range_values() {
        for json in [
            r#"{"regions": {"6": {"side": 1, "parity": 0}}}"#,
            r#"{"regions": {"0": {"side": 2, "parity": 0}}}"#,
            r#"{"regions": {"0": {"side": 0, "parity": 3}}}"#,
            r#"{"regions": {"x": {"side": 0, "parity": 0}}}"#,
        ] {
            assert!(serde_json::from_str::<Strategy>(json).is_err(), "{}", json);
        }
    }
}
