use std::{io::{stdout, Stdout, Write}, time::Duration};

use anyhow::{bail, Context, Result};
use crossterm::event::{poll, read, Event, KeyEvent};
use crossterm::style::{Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};

use crate::config::Config;
use crate::state::GameState;

const FILLED_CELL: &str = "██"; // cells are two columns wide to look square
const EMPTY_CELL: &str = "  ";

/// Owns stdout and the raw-mode terminal, and knows how to draw the board
/// centered on screen.
pub struct TermManager {
    stdout: Stdout,
    config: Config,
    origin: (u16, u16), // top-left corner of the board border
}

impl TermManager {
    pub fn new(config: Config) -> Result<Self> {
        let (w, h) = terminal::size().context("failed to query the terminal size")?;
        let cols = config.grid_size as u16 * 2 + 2;
        let rows = config.grid_size as u16 + 2;

        // One row above for the title, two below for score and hint
        if w < cols || h < rows + 3 {
            bail!(
                "terminal too small: the board needs {}x{} characters, got {}x{}",
                cols,
                rows + 3,
                w,
                h
            );
        }

        let ox = (w - cols) / 2;
        let oy = ((h - rows) / 2).max(1).min(h - rows - 2);

        Ok(TermManager { stdout: stdout(), config, origin: (ox, oy) })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("failed to enter the alternate screen")?;
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking)?;
        terminal::disable_raw_mode().context("failed to disable raw mode")?;
        execute!(self.stdout, LeaveAlternateScreen).context("failed to leave the alternate screen")?;
        Ok(())
    }

    pub fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }

    pub fn read_key_events(&self) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(1))? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    /// Clears the screen and draws the static parts: title and border.
    pub fn draw_frame(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))?;

        let (ox, oy) = self.origin;
        let cols = self.board_cols();
        let rows = self.board_rows();
        let border_color = self.config.snake_color;

        queue!(self.stdout, SetForegroundColor(border_color))?;

        let title = "S N A K E";
        let title_col = ox + (cols - title.len() as u16) / 2;
        queue!(self.stdout, cursor::MoveTo(title_col, oy - 1), Print(title))?;

        for x in 0..cols {
            let ch = if x == 0 || x == cols - 1 { '+' } else { '-' };
            self.print_at((ox + x, oy), ch)?;
            self.print_at((ox + x, oy + rows - 1), ch)?;
        }

        for y in 1..rows - 1 {
            self.print_at((ox, oy + y), '|')?;
            self.print_at((ox + cols - 1, oy + y), '|')?;
        }

        queue!(self.stdout, ResetColor)?;
        self.stdout.flush()?;
        Ok(())
    }

    /// Redraws every grid cell plus the score line. Full redraws are cheap
    /// at this board size and also wipe any dismissed overlay.
    pub fn draw_board(&mut self, state: &GameState) -> Result<()> {
        let (ox, oy) = self.origin;
        let food = state.food();
        let snake_color = self.config.snake_color;
        let food_color = self.config.food_color;

        for y in 0..self.config.grid_size {
            queue!(self.stdout, cursor::MoveTo(ox + 1, oy + 1 + y as u16))?;

            for x in 0..self.config.grid_size {
                let cell = (x, y);
                if cell == food {
                    queue!(self.stdout, SetForegroundColor(food_color), Print(FILLED_CELL))?;
                } else if state.snake().occupies(cell) {
                    queue!(self.stdout, SetForegroundColor(snake_color), Print(FILLED_CELL))?;
                } else {
                    queue!(self.stdout, Print(EMPTY_CELL))?;
                }
            }
        }

        queue!(self.stdout, ResetColor)?;
        self.draw_status(state)?;
        self.stdout.flush()?;
        Ok(())
    }

    /// Draws a centered overlay; the next `draw_frame`/`draw_board` wipes it.
    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        let longest = lines.iter().map(|l| l.len()).max().unwrap_or(0);
        let box_w = (longest + 4) as u16;
        let box_h = (lines.len() + 2) as u16;

        let (ox, oy) = self.origin;
        let left = ox + self.board_cols().saturating_sub(box_w) / 2;
        let top = oy + self.board_rows().saturating_sub(box_h) / 2;

        let blank = " ".repeat(box_w as usize);
        queue!(self.stdout, cursor::MoveTo(left, top), Print(&blank))?;

        for (i, line) in lines.iter().enumerate() {
            let padded = format!("{:^w$}", line, w = box_w as usize);
            queue!(self.stdout, cursor::MoveTo(left, top + 1 + i as u16), Print(padded))?;
        }

        queue!(self.stdout, cursor::MoveTo(left, top + box_h - 1), Print(&blank))?;
        self.stdout.flush()?;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw_status(&mut self, state: &GameState) -> Result<()> {
        let (ox, oy) = self.origin;
        let width = self.board_cols() as usize;
        let score_row = oy + self.board_rows();

        let score_line = format!("Score: {}   Best: {}", state.score(), state.high_score());
        let hint = if state.running() { "" } else { "Press a direction key to play again" };

        queue!(
            self.stdout,
            cursor::MoveTo(ox, score_row),
            Print(format!("{:<w$}", score_line, w = width)),
            cursor::MoveTo(ox, score_row + 1),
            Print(format!("{:^w$}", hint, w = width))
        )?;
        Ok(())
    }

    fn print_at(&mut self, pos: (u16, u16), ch: char) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), Print(ch))?;
        Ok(())
    }

    fn board_cols(&self) -> u16 {
        self.config.grid_size as u16 * 2 + 2
    }

    fn board_rows(&self) -> u16 {
        self.config.grid_size as u16 + 2
    }
}
