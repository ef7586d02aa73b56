use std::{thread::sleep, time::Duration, time::Instant};

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::Config;
use crate::snake::Direction::*;
use crate::state::{GameState, TickResult};
use crate::term::TermManager;

const POLL_INTERVAL_MS: u64 = 5;

pub struct Game {
    term: TermManager,
    state: GameState,
    paused: bool,
}

impl Game {
    pub fn new(config: Config) -> Result<Self> {
        Ok(Game {
            term: TermManager::new(config)?,
            state: GameState::new(config),
            paused: false,
        })
    }

    /// Sets up the terminal, runs the game until the player quits, and
    /// restores the terminal even when the loop errors out.
    pub fn run(&mut self) -> Result<()> {
        self.term.setup()?;
        let result = self.play();
        self.term.restore()?;
        result
    }

    fn play(&mut self) -> Result<()> {
        self.term.show_message(&[
            "Arrow keys or WASD to move",
            "Esc to pause",
            "Q or CTRL+C to quit",
            "",
            "Press any key to begin",
        ])?;

        if is_quit(&self.term.read_key_blocking()?) {
            return Ok(());
        }

        self.redraw()?;
        let mut last_move = Instant::now();

        loop {
            sleep(Duration::from_millis(POLL_INTERVAL_MS));

            for key_ev in self.term.read_key_events()? {
                match &key_ev {
                    ev if is_quit(ev) => return Ok(()),
                    KeyEvent { code, modifiers: _ } => match code {
                        KeyCode::Char('w') | KeyCode::Up => { self.state.steer(Up); }
                        KeyCode::Char('a') | KeyCode::Left => { self.state.steer(Left); }
                        KeyCode::Char('s') | KeyCode::Down => { self.state.steer(Down); }
                        KeyCode::Char('d') | KeyCode::Right => { self.state.steer(Right); }
                        KeyCode::Esc => self.toggle_pause()?,
                        _ => {}
                    },
                }
            }

            if self.paused {
                last_move = Instant::now();
                continue;
            }

            // Fixed-timestep gate; it also fires while the board is frozen,
            // where the update is a no-op, so that resuming play waits for
            // the next gated tick rather than moving on the keypress itself.
            if last_move.elapsed() >= self.state.move_interval() {
                last_move = Instant::now();
                self.step()?;
            }
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn step(&mut self) -> Result<()> {
        match self.state.update() {
            TickResult::Idle => Ok(()),
            TickResult::Moved | TickResult::Ate | TickResult::Died => {
                self.term.draw_board(&self.state)
            }
            TickResult::Won => {
                self.term.draw_board(&self.state)?;
                self.term.show_message(&["You won!", "", "Press a direction key to play again"])
            }
        }
    }

    fn toggle_pause(&mut self) -> Result<()> {
        self.paused = !self.paused;

        if self.paused {
            self.term.show_message(&["Paused", "Press Esc to resume"])
        } else {
            self.redraw()
        }
    }

    fn redraw(&mut self) -> Result<()> {
        self.term.draw_frame()?;
        self.term.draw_board(&self.state)
    }
}

fn is_quit(ev: &KeyEvent) -> bool {
    matches!(
        ev,
        KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL }
            | KeyEvent { code: KeyCode::Char('q'), modifiers: _ }
    )
}
