//! Output sinks for rendered divergence reports.
//!
//! Comparators never touch storage directly: every rendered line goes through
//! a [`DiffSink`]. A sink shared between concurrent comparisons is
//! responsible for serializing interleaved writes itself.

use std::fmt;

use lockstep_types::{Color, ColorDirective};

/// Destination for rendered lines and color changes.
pub trait DiffSink {
    /// Write one line of output.
    fn write_line(&mut self, line: &str);

    /// Switch the foreground color used for subsequent lines.
    fn set_foreground_color(&mut self, color: Color);

    /// Restore the sink's default colors.
    fn reset_colors(&mut self);

    /// Apply a color directive, then write one line.
    fn write_colored(&mut self, line: &str, color: ColorDirective) {
        match color {
            ColorDirective::Keep => {}
            ColorDirective::Set(color) => self.set_foreground_color(color),
            ColorDirective::Reset => self.reset_colors(),
        }
        self.write_line(line);
    }
}

impl<S: DiffSink + ?Sized> DiffSink for &mut S {
    fn write_line(&mut self, line: &str) {
        (**self).write_line(line);
    }

    fn set_foreground_color(&mut self, color: Color) {
        (**self).set_foreground_color(color);
    }

    fn reset_colors(&mut self) {
        (**self).reset_colors();
    }
}

/// A single call recorded by [`MemorySink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SinkEvent {
    Line(String),
    Color(Color),
    Reset,
}

/// A sink that records every call in memory.
///
/// Useful for capturing a report to attach to a test failure, and for
/// asserting on the exact sequence of writes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemorySink {
    events: Vec<SinkEvent>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded call, in order.
    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    /// The written lines, without color changes.
    pub fn lines(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Line(line) => Some(line.as_str()),
                _ => None,
            })
            .collect()
    }

    /// The written lines paired with the color active when each was written.
    pub fn colored_lines(&self) -> Vec<(Option<Color>, &str)> {
        let mut active = None;
        let mut lines = Vec::new();
        for event in &self.events {
            match event {
                SinkEvent::Line(line) => lines.push((active, line.as_str())),
                SinkEvent::Color(color) => active = Some(*color),
                SinkEvent::Reset => active = None,
            }
        }
        lines
    }

    /// Returns `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl DiffSink for MemorySink {
    fn write_line(&mut self, line: &str) {
        self.events.push(SinkEvent::Line(line.to_owned()));
    }

    fn set_foreground_color(&mut self, color: Color) {
        self.events.push(SinkEvent::Color(color));
    }

    fn reset_colors(&mut self) {
        self.events.push(SinkEvent::Reset);
    }
}

impl fmt::Display for MemorySink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_calls_in_order() {
        let mut sink = MemorySink::new();
        sink.write_line("a");
        sink.write_colored("b", ColorDirective::Set(Color::Red));
        sink.write_colored("c", ColorDirective::Keep);
        sink.write_colored("d", ColorDirective::Reset);
        assert_eq!(
            sink.events(),
            &[
                SinkEvent::Line("a".into()),
                SinkEvent::Color(Color::Red),
                SinkEvent::Line("b".into()),
                SinkEvent::Line("c".into()),
                SinkEvent::Reset,
                SinkEvent::Line("d".into()),
            ]
        );
        assert_eq!(sink.lines(), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn colored_lines_track_active_color() {
        let mut sink = MemorySink::new();
        sink.write_line("plain");
        sink.write_colored("red", Color::Red.into());
        sink.write_line("still red");
        sink.reset_colors();
        sink.write_line("plain again");
        assert_eq!(
            sink.colored_lines(),
            vec![
                (None, "plain"),
                (Some(Color::Red), "red"),
                (Some(Color::Red), "still red"),
                (None, "plain again"),
            ]
        );
    }

    #[test]
    fn display_joins_lines() {
        let mut sink = MemorySink::new();
        sink.write_line("one");
        sink.set_foreground_color(Color::Blue);
        sink.write_line("two");
        assert_eq!(sink.to_string(), "one\ntwo\n");
        assert!(!sink.is_empty());
    }

    #[test]
    fn mutable_reference_forwards() {
        fn write_through(mut sink: impl DiffSink) {
            sink.write_colored("x", Color::Green.into());
        }

        let mut sink = MemorySink::new();
        write_through(&mut sink);
        assert_eq!(sink.colored_lines(), vec![(Some(Color::Green), "x")]);
    }
}
