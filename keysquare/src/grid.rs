mod parity;
mod region;

use std::ops::Deref;

use itertools::iproduct;
use rand::Rng;

pub use parity::*;
pub use region::*;

use crate::{Cell, CellId, Coin, InvalidArgument};

/// The grid is `GRID_WIDTH` x `GRID_WIDTH` cells.
pub const GRID_WIDTH: u8 = 8;
pub const NUM_CELLS: usize = 64;
/// One region per bit of a position, since `2^NUM_REGIONS == NUM_CELLS`.
pub const NUM_REGIONS: usize = 6;

/// The 8x8 board of coins, one of which covers the key cell.
///
/// Cells are owned by an arena that is never reordered, and the board layout
/// is a separate list of [`CellId`]s. A cell's position in that list is what
/// decides its region membership; [`Grid::swap()`] permutes the list and
/// rebuilds the [`RegionIndex`], while the cells keep their coordinates.
#[derive(Clone, Debug)]
pub struct Grid {
    /// Indexed by [`CellId`].
    cells: Vec<Cell>,
    /// `order[position]` is the cell currently at that position.
    order: Vec<CellId>,
    key: CellId,
    /// Derived from `order`.
    regions: RegionIndex,
}

impl Grid {
    /// Creates a grid with uniformly random coins and a uniformly random key cell.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let coins: [Coin; NUM_CELLS] = std::array::from_fn(|_| rng.gen());
        let key = CellId(rng.gen_range(0..NUM_CELLS as u8));
        Self::build(coins, key)
    }

    /// Creates a grid with the given coins, in row-major order, and key cell.
    pub fn from_coins(
        coins: [Coin; NUM_CELLS],
        key_x: u8,
        key_y: u8,
    ) -> Result<Self, InvalidArgument> {
        let key = Self::id_for_coords(i64::from(key_x), i64::from(key_y)).ok_or(
            InvalidArgument::CoordinatesOutOfRange {
                x: i64::from(key_x),
                y: i64::from(key_y),
            },
        )?;
        Ok(Self::build(coins, key))
    }

    fn build(coins: [Coin; NUM_CELLS], key: CellId) -> Self {
        let cells: Vec<Cell> = iproduct!(0..GRID_WIDTH, 0..GRID_WIDTH)
            .zip(coins)
            .map(|((y, x), coin)| Cell {
                x,
                y,
                coin,
                is_key: false,
            })
            .collect();
        let mut grid = Self {
            cells,
            order: (0..NUM_CELLS as u8).map(CellId).collect(),
            key,
            regions: RegionIndex::default(),
        };
        grid.cells[key.index()].is_key = true;
        grid.regions = RegionIndex::compute(&grid.order);
        grid
    }

    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.index()]
    }

    /// The cells in their current board order.
    pub fn cells_in_order(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.order.iter().map(|&id| self.cell(id))
    }

    pub fn position_of(&self, id: CellId) -> usize {
        self.order
            .iter()
            .position(|&other| other == id)
            .expect("every cell has a position on the board")
    }

    /// Looks up the cell whose coordinates are `(x, y)`.
    pub fn cell_id_at(&self, x: i64, y: i64) -> Option<CellId> {
        Self::id_for_coords(x, y)
    }

    fn id_for_coords(x: i64, y: i64) -> Option<CellId> {
        let x = u8::try_from(x).ok().filter(|&x| x < GRID_WIDTH)?;
        let y = u8::try_from(y).ok().filter(|&y| y < GRID_WIDTH)?;
        Some(CellId(GRID_WIDTH * y + x))
    }

    /// Flips the coin at `(x, y)`.
    ///
    /// Coordinates that are not on the board are ignored, and `false` is returned.
    pub fn flip_coin(&mut self, x: i64, y: i64) -> bool {
        match self.cell_id_at(x, y) {
            Some(id) => {
                self.flip_cell(id);
                true
            }
            None => false,
        }
    }

    /// Flips the coin of a cell. Region membership does not depend on coins,
    /// so the region index stays as it is.
    pub fn flip_cell(&mut self, id: CellId) {
        self.cells[id.index()].flip_coin();
    }

    /// Is `(x, y)` the key cell? Coordinates that are not on the board never are.
    pub fn guess(&self, x: i64, y: i64) -> bool {
        self.cell_id_at(x, y).is_some_and(|id| self.cell(id).is_key())
    }

    pub fn key_id(&self) -> CellId {
        self.key
    }

    pub fn key_cell(&self) -> &Cell {
        let cell = self.cell(self.key);
        assert!(cell.is_key(), "the grid lost track of its key cell");
        cell
    }

    pub fn regions(&self) -> &RegionIndex {
        &self.regions
    }

    pub fn region(&self, region_id: RegionId, side: Side) -> &Region {
        self.regions.get(region_id, side)
    }

    /// Is the cell on the given side of the region?
    pub fn contains(&self, id: CellId, region_id: RegionId, side: Side) -> bool {
        self.region(region_id, side).contains(id)
    }

    /// Like [`Self::contains()`], but `false` when there is no cell at `(x, y)`.
    pub fn contains_coords(&self, x: i64, y: i64, region_id: RegionId, side: Side) -> bool {
        self.cell_id_at(x, y)
            .is_some_and(|id| self.contains(id, region_id, side))
    }

    /// Permutes the board order and recomputes the regions.
    ///
    /// See [`swap_positions()`] for the permutation. Cell coordinates are left
    /// untouched, so afterwards a cell generally sits in different regions.
    pub fn swap(&mut self, swap_index: usize) -> Result<(), InvalidArgument> {
        swap_positions(&mut self.order, swap_index)?;
        self.regions = RegionIndex::compute(&self.order);
        Ok(())
    }

    /// The home numbers of the cells in board order, as they would be after
    /// [`Self::swap()`]. Does not modify the grid.
    pub fn swapped_numbers(&self, swap_index: usize) -> Result<Vec<u8>, InvalidArgument> {
        let mut numbers: Vec<u8> = self.cells_in_order().map(Cell::home_num).collect();
        swap_positions(&mut numbers, swap_index)?;
        Ok(numbers)
    }
}

impl Deref for Grid {
    type Target = [CellId];

    fn deref(&self) -> &Self::Target {
        &self.order
    }
}

/// A position-dependent row shuffle.
///
/// Walks the positions in order. The item at position `i` is exchanged with the
/// one a row further down when both `i + 1` and the row of `i` are multiples of
/// `swap_index`; in the last row it is exchanged with the one a row up instead.
/// Later steps see the effect of earlier ones.
pub fn swap_positions<T>(items: &mut [T], swap_index: usize) -> Result<(), InvalidArgument> {
    if swap_index == 0 {
        return Err(InvalidArgument::ZeroSwapIndex);
    }
    let width = usize::from(GRID_WIDTH);
    for i in 0..items.len() {
        if (i + 1) % swap_index == 0 && (i / width) % swap_index == 0 {
            if i + width < items.len() {
                items.swap(i, i + width);
            } else if i >= width {
                items.swap(i, i - width);
            }
        }
    }
    Ok(())
}
