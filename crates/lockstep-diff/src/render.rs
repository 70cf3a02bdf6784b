//! Divergence block rendering shared by both comparators.

use lockstep_types::{ColorDirective, CompareOptions, DiffCategory};

use crate::sink::DiffSink;

/// Marker appended to a block whose content was truncated.
pub const ELLIPSIS: &str = "...";

/// Write one bracketed block: header, colored content lines, footer.
///
/// At most `limit` content lines are written; when more are available the
/// block ends with [`ELLIPSIS`] instead.
pub(crate) fn write_block<L: AsRef<str>>(
    sink: &mut dyn DiffSink,
    options: &CompareOptions,
    category: DiffCategory,
    lines: &[L],
    limit: Option<usize>,
) {
    sink.write_line(options.header_for(category));
    let color = ColorDirective::from(options.color_for(category));
    let shown = limit.map_or(lines.len(), |limit| limit.min(lines.len()));
    for line in &lines[..shown] {
        sink.write_colored(line.as_ref(), color);
    }
    if shown < lines.len() {
        sink.write_colored(ELLIPSIS, color);
    }
    sink.reset_colors();
    sink.write_line(&options.end_of_diffs);
}

/// Write the closing equality or inequality message, if one is configured.
pub(crate) fn write_summary(sink: &mut dyn DiffSink, options: &CompareOptions, equal: bool) {
    let message = if equal {
        &options.equality_message
    } else {
        &options.inequality_message
    };
    if !message.is_empty() {
        sink.write_line(message);
    }
}
