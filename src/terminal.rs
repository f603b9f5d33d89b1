//! Terminal executor
//!
//! Ties together the tokenizer, the escape decoder and the screen model,
//! and applies decoded commands to update terminal state. This is the
//! integration point a host feeds raw bytes into and drains changed rows
//! from.
//!
//! Everything here is synchronous and single-threaded: a feed returns
//! only after every complete token in the buffer has been applied, with
//! partial trailing sequences held for the next call.

use tracing::{debug, trace};

use crate::core::screen::{RowUpdate, Screen, DEFAULT_COLS, DEFAULT_ROWS};
use crate::parser::ascii::{self, BEL, BS, CR, NL};
use crate::parser::{decode, Command, Token, Tokenizer};

/// Terminal emulator: parser plus screen state
#[derive(Debug, Default)]
pub struct Terminal {
    screen: Screen,
    tokenizer: Tokenizer,
}

impl Terminal {
    /// Create a terminal with the default 24x80 grid
    pub fn new() -> Self {
        Self::with_dimensions(DEFAULT_ROWS, DEFAULT_COLS)
    }

    /// Create a terminal with the given grid bounds
    pub fn with_dimensions(rows: usize, cols: usize) -> Self {
        Self {
            screen: Screen::new(rows, cols),
            tokenizer: Tokenizer::new(),
        }
    }

    /// The screen state
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Push raw bytes and apply every complete token
    pub fn feed(&mut self, bytes: &[u8]) {
        self.tokenizer.feed_bytes(bytes);
        self.drain_tokens();
    }

    /// Push text and apply every complete token
    pub fn feed_str(&mut self, text: &str) {
        self.tokenizer.feed_str(text);
        self.drain_tokens();
    }

    /// Push raw bytes and return the rows that changed as a result
    pub fn update(&mut self, bytes: &[u8]) -> Vec<RowUpdate<'_>> {
        self.feed(bytes);
        self.screen.drain_changes()
    }

    /// Push text and return the rows that changed as a result
    pub fn update_str(&mut self, text: &str) -> Vec<RowUpdate<'_>> {
        self.feed_str(text);
        self.screen.drain_changes()
    }

    /// Return to the initial state, discarding buffered partial
    /// sequences. Always safe to call.
    pub fn reset(&mut self) {
        self.tokenizer.clear();
        self.screen.reset();
    }

    /// Change the grid bounds
    pub fn set_dimensions(&mut self, rows: usize, cols: usize) {
        self.screen.set_dimensions(rows, cols);
    }

    fn drain_tokens(&mut self) {
        while let Some(token) = self.tokenizer.next() {
            self.apply_token(token);
        }
    }

    fn apply_token(&mut self, token: Token) {
        match token {
            Token::Text(text) => {
                trace!(text = %ascii::readable(&text), "text run");
                self.screen.append_text(&text);
            }
            Token::Control(ch) => self.apply_control(ch),
            Token::Escape(seq) => {
                let command = decode(&seq);
                trace!(seq = %ascii::readable(&seq), ?command, "escape sequence");
                self.apply_command(command);
            }
        }
    }

    fn apply_control(&mut self, ch: char) {
        match ch {
            NL => self.screen.linefeed(),
            CR => self.screen.carriage_return(),
            BS => self.screen.backspace(),
            BEL => {
                // Consumed with no visible effect
                debug!("bell");
            }
            other => {
                debug!(name = ?ascii::control_name(other), "unexpected control token");
            }
        }
    }

    fn apply_command(&mut self, command: Command) {
        match command {
            Command::CursorUp(n) => self.screen.cursor_up(n),
            Command::CursorDown(n) => self.screen.cursor_down(n),
            Command::CursorForward(n) => self.screen.cursor_forward(n),
            Command::CursorBack(n) => self.screen.cursor_back(n),
            Command::CursorNextLine(n) => self.screen.cursor_next_line(n),
            Command::CursorPrevLine(n) => self.screen.cursor_prev_line(n),
            Command::CursorPosition { row, col } => self.screen.cursor_position(row, col),
            Command::EraseInDisplay(mode) => self.screen.erase_in_display(mode),
            Command::EraseInLine(mode) => self.screen.erase_in_line(mode),
            Command::InsertLines(n) => self.screen.insert_lines(n),
            Command::DeleteLines(n) => self.screen.delete_lines(n),
            Command::DeleteChars(n) => self.screen.delete_chars(n),
            Command::SaveCursor { with_attributes } => self.screen.save_cursor(with_attributes),
            Command::RestoreCursor { with_attributes } => {
                self.screen.restore_cursor(with_attributes)
            }
            Command::SelectGraphics(ops) => self.screen.apply_sgr(&ops),
            Command::SetScrollRegion => {
                debug!("scroll region is not implemented");
            }
            Command::CursorColumn(_) | Command::ScrollUp(_) | Command::ScrollDown(_) => {
                debug!(?command, "recognized command is not implemented");
            }
            Command::Unsupported => {
                // Already logged at decode time; no state change
            }
        }
    }
}
