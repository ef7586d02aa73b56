mod config;
mod food;
mod game;
mod snake;
mod state;
mod term;

/// Signed grid coordinate; the head may briefly sit one cell outside the
/// grid between a move and the wall check.
pub type GridInt = i16;
pub type Cell = (GridInt, GridInt);

use anyhow::Result;

fn main() -> Result<()> {
    let mut game = game::Game::new(config::Config::default())?;
    game.run()
}
