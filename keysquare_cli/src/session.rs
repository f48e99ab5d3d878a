use std::io::{BufRead, Write};

use keysquare::{
    render_board, render_board_numbers, render_key_only, render_only_xy, render_overlap,
    render_parity, render_parity_vectors, render_region, render_swapped_numbers, Grid,
};
use tracing::{debug, info};

use crate::command::{parse_command, Command, HELP};
use crate::error::CommandError;

const PROMPT: &str = "What would you like to do?\n> ";

/// What to print after a command, and whether the game is over.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue(String),
    Finished(String),
}

/// A single game, driven by commands.
pub struct Session {
    grid: Grid,
    /// In single-player mode the bot has already flipped, so the player may
    /// neither flip nor peek at the key.
    single_player: bool,
}

impl Session {
    pub fn new(grid: Grid, single_player: bool) -> Self {
        Self {
            grid,
            single_player,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Parses and executes one line. Errors become the reply.
    pub fn handle_line(&mut self, line: &str) -> Outcome {
        let result = match parse_command(line) {
            Ok(Some(command)) => self.execute(command),
            Ok(None) => Ok(Outcome::Continue(String::new())),
            Err(err) => Err(err),
        };
        result.unwrap_or_else(|err| {
            debug!(input = line, %err, "Rejected command");
            Outcome::Continue(err.to_string())
        })
    }

    pub fn execute(&mut self, command: Command) -> Result<Outcome, CommandError> {
        let reply = match command {
            Command::Quit => return Ok(Outcome::Finished(self.reveal_key())),
            Command::Guess { x, y } => {
                if self.grid.guess(x, y) {
                    info!(x, y, "Correct guess");
                    return Ok(Outcome::Finished(format!("Correct!\n{}", self.reveal_key())));
                }
                debug!(x, y, "Wrong guess");
                String::from("Wrong. Guess again?")
            }
            Command::Board => render_board(&self.grid),
            Command::Numbers => render_board_numbers(&self.grid),
            Command::Parity { region_id, side } => render_parity(&self.grid, region_id, side),
            Command::Region { region_id, side } => render_region(&self.grid, region_id, side),
            Command::Flip { x, y } => {
                self.ensure_not_single_player("flip")?;
                if self.grid.flip_coin(x, y) {
                    format!("Flipped the coin at ({}, {}).", x, y)
                } else {
                    format!("There is no square at ({}, {}).", x, y)
                }
            }
            Command::Tell => {
                self.ensure_not_single_player("tell")?;
                format!("{} is the key square.", self.grid.key_cell())
            }
            Command::Vector => render_parity_vectors(&self.grid),
            Command::Overlap { region_sides } => render_overlap(&self.grid, &region_sides),
            Command::ShowOnly { x, y } => render_only_xy(&self.grid, x, y),
            Command::Swap { swap_index } => {
                self.grid.swap(swap_index)?;
                debug!(swap_index, "Swapped squares");
                render_board_numbers(&self.grid)
            }
            Command::PreviewSwap { swap_index } => render_swapped_numbers(&self.grid, swap_index)?,
            Command::Help => String::from(HELP),
        };
        Ok(Outcome::Continue(reply))
    }

    fn ensure_not_single_player(&self, command: &'static str) -> Result<(), CommandError> {
        if self.single_player {
            Err(CommandError::NotInSinglePlayer { command })
        } else {
            Ok(())
        }
    }

    fn reveal_key(&self) -> String {
        format!(
            "{} was the key square.\n{}",
            self.grid.key_cell(),
            render_key_only(&self.grid)
        )
    }
}

/// Reads commands until the game is finished or the input ends.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    mut input: R,
    mut output: W,
) -> anyhow::Result<()> {
    let mut buf = String::new();
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        buf.clear(); // because read_line() appends to the buffer
        let num_bytes_read = input.read_line(&mut buf)?;
        let outcome = if num_bytes_read == 0 {
            // EOF ends the game just like quitting
            writeln!(output)?;
            session.execute(Command::Quit)?
        } else {
            session.handle_line(buf.trim_end())
        };

        match outcome {
            Outcome::Continue(reply) => write_reply(&mut output, &reply)?,
            Outcome::Finished(reply) => {
                write_reply(&mut output, &reply)?;
                output.flush()?;
                break Ok(());
            }
        }
    }
}

fn write_reply<W: Write>(output: &mut W, reply: &str) -> std::io::Result<()> {
    if reply.is_empty() {
        Ok(())
    } else if reply.ends_with('\n') {
        write!(output, "{}", reply)
    } else {
        writeln!(output, "{}", reply)
    }
}

#[cfg(test)]
mod tests {
    use keysquare::{Coin, NUM_CELLS};

    use super::*;

    fn session(single_player: bool) -> Session {
        let grid = Grid::from_coins([Coin::Heads; NUM_CELLS], 3, 2).unwrap();
        Session::new(grid, single_player)
    }

    fn run_script(session: &mut Session, script: &str) -> String {
        let mut output = Vec::new();
        run(session, script.as_bytes(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn guessing_ends_the_game() {
        let mut session = session(false);
        let output = run_script(&mut session, "g 0 0\ng 3 2\nb\n");
        assert!(output.contains("Wrong. Guess again?"));
        assert!(output.contains(
            "Correct!\nCell(x=3, y=2, coin=0, num=19, is_key=true) was the key square."
        ));
        // The board command after the correct guess is never read
        assert_eq!(output.matches(PROMPT).count(), 2);
    }

    #[test]
    fn end_of_input_reveals_key() {
        let mut session = session(false);
        let output = run_script(&mut session, "v\n");
        assert!(output.contains("side0: 000000\nside1: 000000\n"));
        assert!(output.ends_with("-  -  -  -  -  -  -  -  \n"));
        assert!(output.contains("was the key square."));
    }

    #[test]
    fn flip_changes_parity() {
        let mut session = session(false);
        assert_eq!(
            session.handle_line("f 0 0"),
            Outcome::Continue(String::from("Flipped the coin at (0, 0)."))
        );
        assert_eq!(
            session.handle_line("p 0 0"),
            Outcome::Continue(String::from("region0 parity=1"))
        );
        assert_eq!(
            session.handle_line("f 9 0"),
            Outcome::Continue(String::from("There is no square at (9, 0)."))
        );
        assert_eq!(
            session.grid().cell_id_at(0, 0).map(|id| session.grid().cell(id).coin()),
            Some(Coin::Tails)
        );
    }

    #[test]
    fn single_player_forbids_flip_and_tell() {
        let mut session = session(true);
        for (line, command) in [("f 1 1", "flip"), ("t", "tell")] {
            assert_eq!(
                session.handle_line(line),
                Outcome::Continue(CommandError::NotInSinglePlayer { command }.to_string())
            );
        }
        assert_eq!(
            session.grid().cell_id_at(1, 1).map(|id| session.grid().cell(id).coin()),
            Some(Coin::Heads)
        );
    }

    #[test]
    fn invalid_region_leaves_grid_alone() {
        let mut session = session(false);
        let before = render_board_numbers(session.grid());
        assert_eq!(
            session.handle_line("w 0"),
            Outcome::Continue(String::from("Swap index must be at least 1"))
        );
        assert_eq!(
            session.handle_line("r 7 0"),
            Outcome::Continue(String::from("Region id must be an integer in [0, 5], got 7"))
        );
        assert_eq!(render_board_numbers(session.grid()), before);
    }

    #[test]
    fn swap_and_preview() {
        let mut session = session(false);
        let Outcome::Continue(preview) = session.handle_line("x 2") else {
            panic!("preview should not end the game");
        };
        let Outcome::Continue(swapped) = session.handle_line("w 2") else {
            panic!("swap should not end the game");
        };
        assert_eq!(preview, swapped);
        assert_eq!(session.handle_line("n"), Outcome::Continue(swapped));
    }
}
