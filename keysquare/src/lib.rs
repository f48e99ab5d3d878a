pub use cell::*;
pub use errors::*;
pub use grid::*;
pub use strategy::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod cell;
mod errors;
mod grid;
mod strategy;
mod visualization;
