use crate::RegionId;

/// A caller-supplied parameter is outside its valid range.
///
/// These are rejected before any grid state is touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidArgument {
    RegionIdOutOfRange { region_id: i64 },
    SideOutOfRange { side: i64 },
    ParityOutOfRange { parity: i64 },
    CoordinatesOutOfRange { x: i64, y: i64 },
    ZeroSwapIndex,
}

impl std::error::Error for InvalidArgument {}

impl std::fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidArgument::RegionIdOutOfRange { region_id } => {
                write!(f, "Region id must be an integer in [0, 5], got {}", region_id)
            }
            InvalidArgument::SideOutOfRange { side } => {
                write!(f, "Side must be 0 or 1, got {}", side)
            }
            InvalidArgument::ParityOutOfRange { parity } => {
                write!(f, "Parity must be 0 or 1, got {}", parity)
            }
            InvalidArgument::CoordinatesOutOfRange { x, y } => {
                write!(f, "Coordinates ({}, {}) are not on the 8x8 grid", x, y)
            }
            InvalidArgument::ZeroSwapIndex => write!(f, "Swap index must be at least 1"),
        }
    }
}

/// The error type for the solo bot's decision, caused by an unusable strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrategyError {
    MissingRegion { region_id: RegionId },
    NoMatchingCell,
    AmbiguousMatch { num_matches: usize },
}

impl std::error::Error for StrategyError {}

impl std::fmt::Display for StrategyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyError::MissingRegion { region_id } => {
                write!(f, "The strategy has no entry for region {}", region_id)
            }
            StrategyError::NoMatchingCell => write!(
                f,
                "No cell lies in all of the region sides chosen by the strategy"
            ),
            StrategyError::AmbiguousMatch { num_matches } => write!(
                f,
                "{} cells lie in all of the region sides chosen by the strategy, expected exactly one",
                num_matches
            ),
        }
    }
}
