use std::fmt;

use serde::{Deserialize, Serialize};

/// Foreground color applied to a category of rendered lines.
///
/// Sinks translate these into whatever their medium supports; a sink with no
/// notion of color is free to ignore them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Gray,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
            Self::Gray => "gray",
        };
        f.write_str(name)
    }
}

/// Color instruction attached to a single sink write.
///
/// `Keep` leaves whatever color the sink currently has, `Set` switches the
/// foreground color before writing, and `Reset` restores the sink default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColorDirective {
    #[default]
    Keep,
    Set(Color),
    Reset,
}

impl From<Color> for ColorDirective {
    fn from(color: Color) -> Self {
        Self::Set(color)
    }
}

/// The role a rendered block plays in a divergence report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffCategory {
    /// Content taken from the received (actual) input.
    Received,
    /// Content taken from the expected (reference) input.
    Expected,
    /// Expected content that has no counterpart in the received input.
    Missing,
    /// Received content beyond what the expected input holds.
    Exceeded,
}

impl fmt::Display for DiffCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Received => write!(f, "received"),
            Self::Expected => write!(f, "expected"),
            Self::Missing => write!(f, "missing"),
            Self::Exceeded => write!(f, "exceeded"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_display_matches_serde_name() {
        for color in [Color::Red, Color::Green, Color::Gray] {
            let json = serde_json::to_string(&color).unwrap();
            assert_eq!(json, format!("\"{color}\""));
        }
    }

    #[test]
    fn directive_from_color() {
        assert_eq!(ColorDirective::from(Color::Cyan), ColorDirective::Set(Color::Cyan));
        assert_eq!(ColorDirective::default(), ColorDirective::Keep);
    }

    #[test]
    fn category_display() {
        assert_eq!(DiffCategory::Missing.to_string(), "missing");
        assert_eq!(DiffCategory::Exceeded.to_string(), "exceeded");
    }
}
