use std::fmt;

use rand::distributions::{Distribution, Standard};
use rand::Rng;

/// The state of the coin lying on a [`Cell`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Coin {
    Heads = 0,
    Tails = 1,
}

impl Coin {
    /// The opposite side.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Coin::Heads => Coin::Tails,
            Coin::Tails => Coin::Heads,
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }
}

impl Distribution<Coin> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Coin {
        if rng.gen::<bool>() {
            Coin::Tails
        } else {
            Coin::Heads
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Identifies a [`Cell`] independently of where it currently sits in the grid.
///
/// Cells live in an arena in construction order, so the cell created at
/// `(x, y)` has the id `8 * y + x`. Swapping moves ids between positions
/// but never changes them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellId(pub(crate) u8);

impl CellId {
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

/// A single square of the grid with one coin on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub(crate) x: u8,
    pub(crate) y: u8,
    pub(crate) coin: Coin,
    pub(crate) is_key: bool,
}

impl Cell {
    pub fn x(&self) -> u8 {
        self.x
    }

    pub fn y(&self) -> u8 {
        self.y
    }

    pub fn coin(&self) -> Coin {
        self.coin
    }

    pub fn is_key(&self) -> bool {
        self.is_key
    }

    /// The number of this cell in the unswapped layout, `8 * y + x`.
    pub fn home_num(&self) -> u8 {
        8 * self.y + self.x
    }

    pub(crate) fn flip_coin(&mut self) {
        self.coin = self.coin.flipped();
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cell(x={}, y={}, coin={}, num={}, is_key={})",
            self.x,
            self.y,
            self.coin,
            self.home_num(),
            self.is_key
        )
    }
}
