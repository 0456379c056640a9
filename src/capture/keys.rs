use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use log::warn;

use crate::errors::CaptureError;

// @module: Keystroke input for the capture loop

/// A key as seen by the capture loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Enter,
    Char(char),
    /// Ctrl-C while the terminal is in raw mode
    Interrupt,
    Other,
}

/// Blocking source of single keystrokes
pub trait KeyReader {
    fn next_key(&mut self) -> Result<Key, CaptureError>;
}

/// Reads keys from the controlling terminal in raw mode.
///
/// Raw mode is enabled on construction and restored on drop.
pub struct TerminalKeyReader {
    restored: bool,
}

impl TerminalKeyReader {
    pub fn new() -> Result<Self, CaptureError> {
        enable_raw_mode()?;
        Ok(TerminalKeyReader { restored: false })
    }

    /// Leave raw mode before printing regular output again
    pub fn restore(&mut self) -> Result<(), CaptureError> {
        if !self.restored {
            disable_raw_mode()?;
            self.restored = true;
        }
        Ok(())
    }

    fn translate(code: KeyCode, modifiers: KeyModifiers) -> Key {
        match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Key::Interrupt,
            KeyCode::Char(' ') => Key::Space,
            KeyCode::Char('\n') | KeyCode::Char('\r') | KeyCode::Enter => Key::Enter,
            KeyCode::Char(c) => Key::Char(c),
            _ => Key::Other,
        }
    }
}

impl KeyReader for TerminalKeyReader {
    fn next_key(&mut self) -> Result<Key, CaptureError> {
        loop {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind == KeyEventKind::Press {
                    return Ok(Self::translate(key_event.code, key_event.modifiers));
                }
            }
        }
    }
}

impl Drop for TerminalKeyReader {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("Failed to restore terminal: {}", e);
        }
    }
}
