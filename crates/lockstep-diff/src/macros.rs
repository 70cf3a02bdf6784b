//! Assertion macros for tests that compare generated output to a reference.

/// Assert that two texts match under the given (or default) options.
///
/// On mismatch, panics with the rendered divergence report.
///
/// ```
/// use lockstep_diff::{assert_texts_match, CompareOptions};
///
/// assert_texts_match!("a\nb", "a\nb");
///
/// let relaxed = CompareOptions { trim_lines: true, ..Default::default() };
/// assert_texts_match!("  a\nb ", "a\nb", &relaxed);
/// ```
#[macro_export]
macro_rules! assert_texts_match {
    ($received:expr, $expected:expr $(,)?) => {
        $crate::assert_texts_match!($received, $expected, &$crate::CompareOptions::default())
    };
    ($received:expr, $expected:expr, $options:expr $(,)?) => {{
        let mut sink = $crate::MemorySink::new();
        if !$crate::compare_texts(&$received, &$expected, $options, &mut sink) {
            panic!("assertion `assert_texts_match!(received, expected)` failed\n\n{sink}");
        }
    }};
}

/// Assert that two element trees match under the given (or default) options.
///
/// On mismatch, panics with the rendered divergence report.
///
/// ```
/// use lockstep_diff::{assert_trees_match, Element};
///
/// let tree = Element::new("root").with_child(Element::new("leaf").with_text("x"));
/// assert_trees_match!(tree, tree.clone());
/// ```
#[macro_export]
macro_rules! assert_trees_match {
    ($received:expr, $expected:expr $(,)?) => {
        $crate::assert_trees_match!($received, $expected, &$crate::CompareOptions::default())
    };
    ($received:expr, $expected:expr, $options:expr $(,)?) => {{
        let mut sink = $crate::MemorySink::new();
        match $crate::compare_trees(Some(&$received), Some(&$expected), $options, &mut sink) {
            Ok(true) => {}
            Ok(false) => {
                panic!("assertion `assert_trees_match!(received, expected)` failed\n\n{sink}")
            }
            Err(err) => panic!("assertion `assert_trees_match!(received, expected)` failed: {err}"),
        }
    }};
}
