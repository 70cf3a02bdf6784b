//! Terminal sink for divergence reports.

use std::io::{self, Write};

use colored::Colorize;
use lockstep_diff::{Color, DiffSink};

/// Writes report lines to a stream, colored with ANSI escapes.
///
/// `DiffSink` methods cannot fail, so the first write error is kept and
/// later writes are dropped; [`ConsoleSink::finish`] reports it.
pub struct ConsoleSink<W: Write> {
    out: W,
    color: Option<Color>,
    use_color: bool,
    error: Option<io::Error>,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W, use_color: bool) -> Self {
        Self {
            out,
            color: None,
            use_color,
            error: None,
        }
    }

    /// Flush the stream and surface any write error.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> DiffSink for ConsoleSink<W> {
    fn write_line(&mut self, line: &str) {
        if self.error.is_some() {
            return;
        }
        let result = match self.color.filter(|_| self.use_color) {
            Some(color) => writeln!(self.out, "{}", line.color(terminal_color(color))),
            None => writeln!(self.out, "{line}"),
        };
        if let Err(err) = result {
            self.error = Some(err);
        }
    }

    fn set_foreground_color(&mut self, color: Color) {
        self.color = Some(color);
    }

    fn reset_colors(&mut self) {
        self.color = None;
    }
}

fn terminal_color(color: Color) -> colored::Color {
    match color {
        Color::Black => colored::Color::Black,
        Color::Red => colored::Color::Red,
        Color::Green => colored::Color::Green,
        Color::Yellow => colored::Color::Yellow,
        Color::Blue => colored::Color::Blue,
        Color::Magenta => colored::Color::Magenta,
        Color::Cyan => colored::Color::Cyan,
        Color::White => colored::Color::White,
        Color::Gray => colored::Color::BrightBlack,
    }
}
