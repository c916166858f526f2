//! Single-key input.
//!
//! Raw mode is held only for the duration of one read so normal
//! `println!` output keeps its line discipline everywhere else.

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::terminal;

/// Block until one key press and return it.
pub fn read_key() -> Result<KeyEvent, String> {
    terminal::enable_raw_mode().map_err(|e| e.to_string())?;
    let result = wait_for_press();
    terminal::disable_raw_mode().map_err(|e| e.to_string())?;
    result
}

fn wait_for_press() -> Result<KeyEvent, String> {
    loop {
        match event::read().map_err(|e| e.to_string())? {
            Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(key),
            _ => {}
        }
    }
}
