use keysquare::{RegionId, Side};

use crate::error::CommandError;

pub const HELP: &str = "\
Commands:
  q                               reveal the key square and quit
  (g)uess x y                     guess that the key square is at (x, y)
  (b)oard                         show the coins
  (n)umbers                       show the square numbers
  (p)arity region_id side         show a region's parity
  (r)egion region_id side         show a region
  (f)lip x y                      flip the coin at (x, y)
  (t)ell                          show the key square
  (v)ector                        show the parities of all regions
  (o)verlap r0 s0 r1 s1 ...       show where regions overlap
  (s)how x y                      show only the square at (x, y)
  s(w)ap k                        swap squares between rows
  (x) k                           show the square numbers as 'swap k' would leave them
  (h)elp                          show this message";

const GUESS_USAGE: &str = "'(g)uess x y' to make a guess at position (x, y), x and y must be integers";
const PARITY_USAGE: &str =
    "'get region (p)arity region_id side' to get a region's parity, both must be integers";
const REGION_USAGE: &str = "'show (r)egion region_id side' to show a region, both must be integers";
const FLIP_USAGE: &str =
    "'(f)lip a coin x y' to flip the coin at position (x, y), x and y must be integers";
const OVERLAP_USAGE: &str =
    "'show (o)verlap r0id r0s r1id r1s ...' to show region overlap, must use integers";
const SHOW_USAGE: &str = "'(s)how only xy x y', x and y must be integers";
const SWAP_USAGE: &str = "'s(w)ap k' to swap squares, k must be a positive integer";
const PREVIEW_USAGE: &str = "'(x) k' to preview a swap, k must be a positive integer";

/// One line of user input, parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    Guess { x: i64, y: i64 },
    Board,
    Numbers,
    Parity { region_id: RegionId, side: Side },
    Region { region_id: RegionId, side: Side },
    Flip { x: i64, y: i64 },
    Tell,
    Vector,
    Overlap { region_sides: Vec<(RegionId, Side)> },
    ShowOnly { x: i64, y: i64 },
    Swap { swap_index: usize },
    PreviewSwap { swap_index: usize },
    Help,
}

/// Parses a line of input. Blank lines give `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.to_lowercase();
    let mut tokens = line.split_whitespace();
    let Some(cmd) = tokens.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = tokens.collect();

    let command = match cmd {
        "q" | "quit" => Command::Quit,
        "g" | "guess" => {
            let [x, y] = int_args::<2>(&args, GUESS_USAGE)?;
            Command::Guess { x, y }
        }
        "b" | "board" => Command::Board,
        "n" | "numbers" => Command::Numbers,
        "p" | "parity" => {
            let [region_id, side] = int_args::<2>(&args, PARITY_USAGE)?;
            Command::Parity {
                region_id: RegionId::try_from(region_id)?,
                side: Side::try_from(side)?,
            }
        }
        "r" | "region" => {
            let [region_id, side] = int_args::<2>(&args, REGION_USAGE)?;
            Command::Region {
                region_id: RegionId::try_from(region_id)?,
                side: Side::try_from(side)?,
            }
        }
        "f" | "flip" => {
            let [x, y] = int_args::<2>(&args, FLIP_USAGE)?;
            Command::Flip { x, y }
        }
        "t" | "tell" => Command::Tell,
        "v" | "vector" => Command::Vector,
        "o" | "overlap" => {
            let ints = parse_ints(&args, OVERLAP_USAGE)?;
            if ints.is_empty() || ints.len() % 2 != 0 {
                return Err(CommandError::Usage {
                    usage: OVERLAP_USAGE,
                });
            }
            let region_sides = ints
                .chunks(2)
                .map(|pair| -> Result<(RegionId, Side), CommandError> {
                    Ok((RegionId::try_from(pair[0])?, Side::try_from(pair[1])?))
                })
                .collect::<Result<Vec<_>, CommandError>>()?;
            Command::Overlap { region_sides }
        }
        "s" | "show" => {
            let [x, y] = int_args::<2>(&args, SHOW_USAGE)?;
            Command::ShowOnly { x, y }
        }
        "w" | "swap" => Command::Swap {
            swap_index: swap_index_arg(&args, SWAP_USAGE)?,
        },
        "x" | "preview" => Command::PreviewSwap {
            swap_index: swap_index_arg(&args, PREVIEW_USAGE)?,
        },
        "h" | "help" => Command::Help,
        _ => {
            return Err(CommandError::UnknownCommand {
                command: String::from(cmd),
            })
        }
    };
    Ok(Some(command))
}

fn parse_ints(args: &[&str], usage: &'static str) -> Result<Vec<i64>, CommandError> {
    args.iter()
        .map(|arg| arg.parse::<i64>())
        .collect::<Result<Vec<i64>, _>>()
        .map_err(|_| CommandError::Usage { usage })
}

/// Exactly `N` integer arguments.
fn int_args<const N: usize>(
    args: &[&str],
    usage: &'static str,
) -> Result<[i64; N], CommandError> {
    parse_ints(args, usage)?
        .try_into()
        .map_err(|_| CommandError::Usage { usage })
}

fn swap_index_arg(args: &[&str], usage: &'static str) -> Result<usize, CommandError> {
    let [swap_index] = int_args::<1>(args, usage)?;
    // Zero is left to the grid to reject
    usize::try_from(swap_index).map_err(|_| CommandError::Usage { usage })
}
