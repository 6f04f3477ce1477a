//! Terminal facts the listing depends on: width, interactivity, output buffer.

use crossterm::terminal;
use crossterm::tty::IsTty;
use std::io::{self, Stdout};

/// Column count used when the terminal size cannot be determined.
pub const FALLBACK_WIDTH: u16 = 80;

/// Get the current terminal width, falling back to 80 columns if unavailable.
pub fn terminal_width() -> usize {
    let (cols, _) = terminal::size().unwrap_or((FALLBACK_WIDTH, 24));
    if cols == 0 {
        FALLBACK_WIDTH as usize
    } else {
        cols as usize
    }
}

/// Whether stdout is attached to a terminal.
pub fn stdout_is_interactive() -> bool {
    io::stdout().is_tty()
}

/// Create a BufWriter wrapping stdout with a generous buffer.
pub fn buffered_stdout() -> io::BufWriter<Stdout> {
    io::BufWriter::with_capacity(64 * 1024, io::stdout())
}
