use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::{Color, DiffCategory};
use crate::error::ConfigError;

/// Behavior switches, limits and rendering strings for one comparison.
///
/// The record is read-only for the duration of a comparison call. Missing
/// keys in a TOML file fall back to [`CompareOptions::default`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareOptions {
    /// Lines made only of whitespace are skipped on either side.
    pub ignore_empty_lines: bool,
    /// Leading and trailing whitespace is removed before lines are compared.
    pub trim_lines: bool,
    /// Runs of consecutive spaces compare equal to a single space.
    pub compress_spaces: bool,
    /// Lines, names and attributes compare case-insensitively.
    pub ignore_case: bool,
    /// Attributes are sorted by qualified name before pairwise comparison.
    pub ignore_attributes_order: bool,
    /// The markup-compatibility `Ignorable` attribute is left out of
    /// attribute comparison.
    pub ignore_ignorable_attribute: bool,
    /// Lines that compare equal are echoed to the sink as well.
    pub write_content_if_equals: bool,
    /// Divergences tolerated before the comparison stops early. Zero stops
    /// at the first divergence.
    pub diff_limit: usize,
    /// Maximum lookahead, in lines, when searching for a resynchronization
    /// point. Zero disables the search.
    pub sync_limit: usize,
    /// Maximum number of lines rendered for one node or sibling window.
    /// Zero falls back to `sync_limit`.
    pub max_rendered_lines: usize,
    pub equality_message: String,
    pub inequality_message: String,
    pub start_of_diff_received: String,
    pub start_of_diff_expected: String,
    pub start_of_missing: String,
    pub start_of_exceeded: String,
    pub end_of_diffs: String,
    pub received_color: Color,
    pub expected_color: Color,
    pub missing_color: Color,
    pub exceeded_color: Color,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            ignore_empty_lines: false,
            trim_lines: false,
            compress_spaces: false,
            ignore_case: false,
            ignore_attributes_order: false,
            ignore_ignorable_attribute: false,
            write_content_if_equals: false,
            diff_limit: 10,
            sync_limit: 10,
            max_rendered_lines: 0,
            equality_message: String::new(),
            inequality_message: String::new(),
            start_of_diff_received: "--- received".into(),
            start_of_diff_expected: "+++ expected".into(),
            start_of_missing: "+++ missing".into(),
            start_of_exceeded: "--- exceeded".into(),
            end_of_diffs: "===".into(),
            received_color: Color::Red,
            expected_color: Color::Green,
            missing_color: Color::Yellow,
            exceeded_color: Color::Magenta,
        }
    }
}

impl CompareOptions {
    /// Parse options from a TOML document and validate them.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let options: Self = toml::from_str(source)?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Check that every string written as one sink line is a single line.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let single_line = [
            ("equality_message", &self.equality_message),
            ("inequality_message", &self.inequality_message),
            ("start_of_diff_received", &self.start_of_diff_received),
            ("start_of_diff_expected", &self.start_of_diff_expected),
            ("start_of_missing", &self.start_of_missing),
            ("start_of_exceeded", &self.start_of_exceeded),
            ("end_of_diffs", &self.end_of_diffs),
        ];
        for (field, value) in single_line {
            if value.contains(['\n', '\r']) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must not contain a line break".into(),
                });
            }
        }
        Ok(())
    }

    /// The color configured for a rendered category.
    pub fn color_for(&self, category: DiffCategory) -> Color {
        match category {
            DiffCategory::Received => self.received_color,
            DiffCategory::Expected => self.expected_color,
            DiffCategory::Missing => self.missing_color,
            DiffCategory::Exceeded => self.exceeded_color,
        }
    }

    /// The header line that opens a block of the given category.
    pub fn header_for(&self, category: DiffCategory) -> &str {
        match category {
            DiffCategory::Received => &self.start_of_diff_received,
            DiffCategory::Expected => &self.start_of_diff_expected,
            DiffCategory::Missing => &self.start_of_missing,
            DiffCategory::Exceeded => &self.start_of_exceeded,
        }
    }

    /// Maximum lines rendered per node or window, `None` when unbounded.
    pub fn render_line_limit(&self) -> Option<usize> {
        [self.max_rendered_lines, self.sync_limit]
            .into_iter()
            .find(|&limit| limit > 0)
    }

    /// Returns `true` once `divergences` is past the tolerated limit.
    pub fn exceeds_diff_limit(&self, divergences: usize) -> bool {
        divergences > self.diff_limit
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn default_options() {
        let o = CompareOptions::default();
        assert!(!o.ignore_empty_lines);
        assert!(!o.ignore_case);
        assert_eq!(o.diff_limit, 10);
        assert_eq!(o.sync_limit, 10);
        assert_eq!(o.received_color, Color::Red);
        assert!(o.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let o = CompareOptions::from_toml_str(
            r#"
            trim_lines = true
            sync_limit = 3
            expected_color = "cyan"
            "#,
        )
        .unwrap();
        assert!(o.trim_lines);
        assert_eq!(o.sync_limit, 3);
        assert_eq!(o.expected_color, Color::Cyan);
        assert_eq!(o.diff_limit, 10);
        assert_eq!(o.end_of_diffs, "===");
    }

    #[test]
    fn unknown_color_rejected() {
        let err = CompareOptions::from_toml_str("received_color = \"mauve\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn multiline_header_rejected() {
        let err = CompareOptions::from_toml_str("end_of_diffs = \"a\\nb\"").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "end_of_diffs",
                ..
            }
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ignore_case = true").unwrap();
        writeln!(file, "diff_limit = 2").unwrap();
        let o = CompareOptions::load(file.path()).unwrap();
        assert!(o.ignore_case);
        assert_eq!(o.diff_limit, 2);
    }

    #[test]
    fn load_missing_file() {
        let err = CompareOptions::load("/nonexistent/lockstep.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn render_limit_fallbacks() {
        let mut o = CompareOptions {
            max_rendered_lines: 4,
            sync_limit: 7,
            ..Default::default()
        };
        assert_eq!(o.render_line_limit(), Some(4));
        o.max_rendered_lines = 0;
        assert_eq!(o.render_line_limit(), Some(7));
        o.sync_limit = 0;
        assert_eq!(o.render_line_limit(), None);
    }

    #[test]
    fn category_lookup() {
        let o = CompareOptions::default();
        assert_eq!(o.color_for(DiffCategory::Missing), Color::Yellow);
        assert_eq!(o.header_for(DiffCategory::Exceeded), "--- exceeded");
        assert!(!o.exceeds_diff_limit(10));
        assert!(o.exceeds_diff_limit(11));
        let strict = CompareOptions {
            diff_limit: 0,
            ..Default::default()
        };
        assert!(!strict.exceeds_diff_limit(0));
        assert!(strict.exceeds_diff_limit(1));
    }

    #[test]
    fn serde_roundtrip() {
        let o = CompareOptions {
            compress_spaces: true,
            inequality_message: "files differ".into(),
            ..Default::default()
        };
        let text = toml::to_string(&o).unwrap();
        assert_eq!(CompareOptions::from_toml_str(&text).unwrap(), o);
    }
}
