//! Line-oriented rendering of element subtrees.
//!
//! Divergence reports show nodes as indented markup, one tag per line, so
//! that a rendered node can be truncated at any line boundary.

use quick_xml::escape::escape;

use crate::node::Element;

const INDENT: &str = "  ";

/// Render an element and its descendants as indented markup lines.
///
/// Leaf elements render on one line (`<a>text</a>`, or `<a/>` when empty);
/// elements with children put their start and end tags on separate lines.
/// Leaf text spanning several lines is rendered one line per text line.
pub fn render_lines(element: &Element) -> Vec<String> {
    let mut lines = Vec::new();
    render_into(element, 0, &mut lines);
    lines
}

fn render_into(element: &Element, depth: usize, lines: &mut Vec<String>) {
    let indent = INDENT.repeat(depth);
    let open = start_tag(element);
    let name = element.name.to_string();

    if !element.is_leaf() {
        lines.push(format!("{indent}<{open}>"));
        for child in &element.children {
            render_into(child, depth + 1, lines);
        }
        lines.push(format!("{indent}</{name}>"));
    } else if element.text.is_empty() {
        lines.push(format!("{indent}<{open}/>"));
    } else if element.text.contains('\n') {
        lines.push(format!("{indent}<{open}>"));
        let inner = INDENT.repeat(depth + 1);
        for text_line in element.text.lines() {
            lines.push(format!("{inner}{}", escape(text_line)));
        }
        lines.push(format!("{indent}</{name}>"));
    } else {
        lines.push(format!("{indent}<{open}>{}</{name}>", escape(element.text.as_str())));
    }
}

/// Tag name followed by its attributes, without angle brackets.
fn start_tag(element: &Element) -> String {
    let mut tag = element.name.to_string();
    for attr in &element.attributes {
        tag.push(' ');
        tag.push_str(&attr.name.to_string());
        tag.push_str("=\"");
        tag.push_str(&escape(attr.value.as_str()));
        tag.push('"');
    }
    tag
}
