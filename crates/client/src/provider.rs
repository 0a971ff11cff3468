//! Interactive action provider backed by the terminal.
//!
//! The menu is drawn in raw mode and redrawn in place on every key press.
//! Raw mode only lasts for one selection so the narration printed between
//! selections uses ordinary line handling.

use std::io::{self, IsTerminal, Stdout, Write};

use combat_core::{ActionProvider, ActionRequest, AutoPilot, MenuOption, Selection};
use crossterm::cursor::{MoveToColumn, MoveUp};
use crossterm::event::{self, Event};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{QueueableCommand, queue};
use thiserror::Error;
use tracing::{info, warn};

use crate::input::{InputHandler, MenuCommand, MenuCursor};

#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("standard input is not an interactive terminal")]
    NotATerminal,

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Action source the session can ask whether the player wants out.
pub trait PlayerInput: ActionProvider {
    /// True once the player asked to end the run after the current fight.
    fn wants_to_quit(&self) -> bool {
        false
    }
}

impl PlayerInput for AutoPilot {}

/// Disables raw mode when dropped.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(err) = terminal::disable_raw_mode() {
            warn!(%err, "failed to restore terminal mode");
        }
    }
}

/// Reads the player's choice from arrow, enter, escape and digit keys.
///
/// Quitting or a terminal failure hands every later selection to the
/// auto-pilot.
pub struct TerminalActionProvider {
    out: Stdout,
    input: InputHandler,
    fallback: AutoPilot,
    quit: bool,
    broken: bool,
}

impl TerminalActionProvider {
    /// Fails when stdin or stdout is not a terminal or raw mode is refused.
    pub fn new() -> Result<Self, TerminalError> {
        if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
            return Err(TerminalError::NotATerminal);
        }
        // try raw mode once so a refusal surfaces before the first fight
        drop(RawModeGuard::enable()?);

        Ok(Self {
            out: io::stdout(),
            input: InputHandler::new(),
            fallback: AutoPilot::new(),
            quit: false,
            broken: false,
        })
    }

    fn read_selection(&mut self, request: &ActionRequest) -> Result<Selection, TerminalError> {
        let _raw = RawModeGuard::enable()?;
        let mut cursor = MenuCursor::new(request.options.len());
        let mut drawn = self.draw(request, cursor.selected(), 0)?;

        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            let command = cursor.apply(self.input.handle_key(key));
            let selection = match command {
                MenuCommand::Pending => {
                    drawn = self.draw(request, cursor.selected(), drawn)?;
                    continue;
                }
                MenuCommand::Choose(index) => Selection::Index(index),
                MenuCommand::Cancel => Selection::Cancel,
                MenuCommand::Quit => {
                    info!("player quit, auto-pilot finishes the encounter");
                    self.quit = true;
                    self.fallback.choose(request)
                }
            };
            self.out.queue(Print("\r\n"))?;
            self.out.flush()?;
            return Ok(selection);
        }
    }

    /// Draws the menu, erasing the previous `lines` first. Returns the number
    /// of lines drawn.
    fn draw(&mut self, request: &ActionRequest, selected: usize, lines: u16) -> io::Result<u16> {
        if lines > 0 {
            queue!(
                self.out,
                MoveUp(lines),
                MoveToColumn(0),
                Clear(ClearType::FromCursorDown)
            )?;
        } else {
            queue!(self.out, MoveToColumn(0))?;
        }

        let header = format!(
            "You {}/{} HP | {} {}/{} HP{}",
            request.player.hp,
            request.player.max_hp,
            request.monster_name,
            request.monster.hp,
            request.monster.max_hp,
            if request.attempt > 0 { " | choose again" } else { "" }
        );
        queue!(self.out, Print(header), Print("\r\n"))?;

        for (index, option) in request.options.iter().enumerate() {
            let marker = if index == selected { '>' } else { ' ' };
            queue!(
                self.out,
                Print(format!("{marker} {} {}", hotkey(index), entry_label(option))),
                Print("\r\n")
            )?;
        }
        queue!(
            self.out,
            Print("[arrows] move  [enter] choose  [esc] back  [q] quit")
        )?;
        self.out.flush()?;

        let total = request.options.len().saturating_add(1);
        Ok(u16::try_from(total).unwrap_or(u16::MAX))
    }
}

impl ActionProvider for TerminalActionProvider {
    fn choose(&mut self, request: &ActionRequest) -> Selection {
        if self.quit || self.broken {
            return self.fallback.choose(request);
        }
        match self.read_selection(request) {
            Ok(selection) => selection,
            Err(err) => {
                warn!(%err, "terminal input failed, switching to auto-pilot");
                self.broken = true;
                self.fallback.choose(request)
            }
        }
    }
}

impl PlayerInput for TerminalActionProvider {
    fn wants_to_quit(&self) -> bool {
        self.quit
    }
}

fn hotkey(index: usize) -> String {
    match index {
        0..=8 => format!("{}.", index + 1),
        9 => "0.".to_string(),
        _ => "  ".to_string(),
    }
}

fn entry_label(option: &MenuOption) -> String {
    match option {
        MenuOption::Flee { allowed: false } => "Flee (no escape)".to_string(),
        MenuOption::Item { count: 0, .. } => format!("{} (none left)", option.label()),
        _ => option.label(),
    }
}
