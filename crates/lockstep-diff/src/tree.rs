//! Structural comparison of element trees.
//!
//! Nodes are compared depth-first: qualified name, then attributes, then
//! children pairwise, then the leaf text. The first kind of difference found
//! at a node classifies it as a [`CompResult`], which decides how the
//! divergence is rendered.
//!
//! When two parents hold a different number of children, their children are
//! not reported one by one. Instead a window of siblings starting just before
//! the first point of difference is rendered for each side, so an inserted
//! or removed element is shown in context.

use std::cmp::Ordering;
use std::fmt;

use lockstep_types::{CompareOptions, DiffCategory};
use lockstep_xml::{render_lines, Attribute, Element, QName};
use serde::Serialize;
use tracing::debug;

use crate::error::{DiffError, DiffResult};
use crate::normalize::{are_equal, normalize};
use crate::render::{write_block, write_summary};
use crate::sink::DiffSink;

/// Namespace of the markup-compatibility vocabulary.
pub const MARKUP_COMPATIBILITY_NS: &str =
    "http://schemas.openxmlformats.org/markup-compatibility/2006";

/// Siblings shown before the first differing child in a child-count window.
const WINDOW_LEAD: usize = 1;

/// Classification of one node-versus-node comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompResult {
    Equal,
    NameDiffers,
    AttributesDiffer,
    /// Child counts match but at least one child differs.
    ChildDiffers,
    ChildCountDiffers,
    /// Leaf text differs.
    ValueDiffers,
}

impl CompResult {
    pub fn is_equal(self) -> bool {
        self == Self::Equal
    }
}

impl fmt::Display for CompResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal => write!(f, "equal"),
            Self::NameDiffers => write!(f, "name differs"),
            Self::AttributesDiffer => write!(f, "attributes differ"),
            Self::ChildDiffers => write!(f, "child differs"),
            Self::ChildCountDiffers => write!(f, "child count differs"),
            Self::ValueDiffers => write!(f, "value differs"),
        }
    }
}

/// How a tree comparison ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeVerdict {
    Equal,
    /// The roots were compared to completion; carries the root's result.
    Different(CompResult),
    /// The divergence limit was exceeded.
    Stopped,
    /// Exactly one of the two roots is absent.
    RootMissing,
}

impl fmt::Display for TreeVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal => write!(f, "equal"),
            Self::Different(result) => write!(f, "different ({result})"),
            Self::Stopped => write!(f, "stopped"),
            Self::RootMissing => write!(f, "with a missing root"),
        }
    }
}

/// The result of comparing two trees.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TreeReport {
    pub verdict: TreeVerdict,
    /// Rendered divergences, plus the one that stopped the comparison.
    pub divergences: usize,
}

impl TreeReport {
    pub fn is_equal(&self) -> bool {
        self.verdict == TreeVerdict::Equal
    }
}

/// Mutable state of one comparison, threaded through the recursion.
#[derive(Debug, Default)]
struct Walk {
    divergences: usize,
    /// Set once anything has been rendered.
    shown: bool,
}

/// The divergence limit was exceeded; unwinds the recursion.
#[derive(Debug)]
struct LimitExceeded;

/// Compare two trees, rendering divergences to `sink`.
///
/// Two absent roots are equal; a single absent root is unequal and nothing
/// is rendered for it.
pub fn compare_trees(
    received: Option<&Element>,
    expected: Option<&Element>,
    options: &CompareOptions,
    sink: &mut dyn DiffSink,
) -> DiffResult<bool> {
    TreeComparer::new(options)
        .compare(received, expected, sink)
        .map(|report| report.is_equal())
}

/// Recursive element tree comparer.
#[derive(Clone, Copy, Debug)]
pub struct TreeComparer<'a> {
    options: &'a CompareOptions,
}

impl<'a> TreeComparer<'a> {
    pub fn new(options: &'a CompareOptions) -> Self {
        Self { options }
    }

    /// Compare two optional roots and write the closing summary message.
    ///
    /// Returns [`DiffError::NothingRendered`] if the trees were compared to
    /// the end and found unequal without any divergence having been rendered.
    /// A stop at the divergence limit may legitimately render nothing when
    /// the limit is zero.
    pub fn compare(
        &self,
        received: Option<&Element>,
        expected: Option<&Element>,
        sink: &mut dyn DiffSink,
    ) -> DiffResult<TreeReport> {
        let mut walk = Walk::default();
        let verdict = match (received, expected) {
            (None, None) => TreeVerdict::Equal,
            (Some(_), None) | (None, Some(_)) => TreeVerdict::RootMissing,
            (Some(received), Some(expected)) => {
                match self.compare_nodes(received, expected, true, &mut walk, sink) {
                    Ok(CompResult::Equal) => TreeVerdict::Equal,
                    Ok(result) => TreeVerdict::Different(result),
                    Err(LimitExceeded) => TreeVerdict::Stopped,
                }
            }
        };

        if matches!(verdict, TreeVerdict::Different(_)) && !walk.shown {
            return Err(DiffError::NothingRendered { verdict });
        }

        let report = TreeReport {
            verdict,
            divergences: walk.divergences,
        };
        write_summary(sink, self.options, report.is_equal());
        Ok(report)
    }

    /// Compare two nodes and everything below them.
    ///
    /// With `show` unset the comparison only classifies: nothing is rendered
    /// and nothing is counted against the divergence limit.
    fn compare_nodes(
        &self,
        received: &Element,
        expected: &Element,
        show: bool,
        walk: &mut Walk,
        sink: &mut dyn DiffSink,
    ) -> Result<CompResult, LimitExceeded> {
        if !self.names_equal(&received.name, &expected.name) {
            return self.diverged(CompResult::NameDiffers, received, expected, show, walk, sink);
        }
        if !self.attributes_equal(received, expected) {
            return self.diverged(CompResult::AttributesDiffer, received, expected, show, walk, sink);
        }

        let same_count = received.children.len() == expected.children.len();
        let mut first_difference = received.children.len().min(expected.children.len());
        let mut child_differs = false;
        for (index, (r, e)) in received.children.iter().zip(&expected.children).enumerate() {
            let result = self.compare_nodes(r, e, show && same_count, walk, sink)?;
            if result.is_equal() {
                continue;
            }
            if !same_count {
                first_difference = index;
                break;
            }
            if !show {
                return Ok(CompResult::ChildDiffers);
            }
            child_differs = true;
        }

        if !same_count {
            if show {
                self.show_window(received, expected, first_difference, walk, sink)?;
            }
            return Ok(CompResult::ChildCountDiffers);
        }
        if child_differs {
            return Ok(CompResult::ChildDiffers);
        }
        if received.is_leaf() && received.text != expected.text {
            return self.diverged(CompResult::ValueDiffers, received, expected, show, walk, sink);
        }
        Ok(CompResult::Equal)
    }

    /// Count and render a divergence at a single node pair.
    fn diverged(
        &self,
        result: CompResult,
        received: &Element,
        expected: &Element,
        show: bool,
        walk: &mut Walk,
        sink: &mut dyn DiffSink,
    ) -> Result<CompResult, LimitExceeded> {
        if show {
            self.count(walk)?;
            debug!(outcome = %result, received = %received.name, expected = %expected.name, "tree divergence");
            let limit = self.options.render_line_limit();
            write_block(sink, self.options, DiffCategory::Received, &render_lines(received), limit);
            write_block(sink, self.options, DiffCategory::Expected, &render_lines(expected), limit);
            walk.shown = true;
        }
        Ok(result)
    }

    /// Render a window of siblings around the first point where two child
    /// lists of different length stop agreeing.
    ///
    /// The side holding more children is labeled as exceeded (received) or
    /// missing (expected). Each side's window is bounded on its own.
    fn show_window(
        &self,
        received: &Element,
        expected: &Element,
        first_difference: usize,
        walk: &mut Walk,
        sink: &mut dyn DiffSink,
    ) -> Result<(), LimitExceeded> {
        self.count(walk)?;
        let (received_category, expected_category) =
            match received.children.len().cmp(&expected.children.len()) {
                Ordering::Greater => (DiffCategory::Exceeded, DiffCategory::Expected),
                _ => (DiffCategory::Received, DiffCategory::Missing),
            };
        let start = first_difference.saturating_sub(WINDOW_LEAD);
        debug!(
            parent = %received.name,
            received_children = received.children.len(),
            expected_children = expected.children.len(),
            first_difference,
            "child count divergence"
        );

        let limit = self.options.render_line_limit();
        let lines = window_lines(&received.children[start..], limit);
        write_block(sink, self.options, received_category, &lines, limit);
        let lines = window_lines(&expected.children[start..], limit);
        write_block(sink, self.options, expected_category, &lines, limit);
        walk.shown = true;
        Ok(())
    }

    fn count(&self, walk: &mut Walk) -> Result<(), LimitExceeded> {
        walk.divergences += 1;
        if self.options.exceeds_diff_limit(walk.divergences) {
            debug!(limit = self.options.diff_limit, "divergence limit exceeded; stopping");
            return Err(LimitExceeded);
        }
        Ok(())
    }

    fn names_equal(&self, a: &QName, b: &QName) -> bool {
        are_equal(&a.namespace, &b.namespace, self.options)
            && are_equal(&a.local, &b.local, self.options)
    }

    fn attributes_equal(&self, received: &Element, expected: &Element) -> bool {
        let mut received = self.comparable_attributes(received);
        let mut expected = self.comparable_attributes(expected);
        if received.len() != expected.len() {
            return false;
        }
        if self.options.ignore_attributes_order {
            let key = |a: &&Attribute| {
                (
                    normalize(&a.name.namespace, self.options).into_owned(),
                    normalize(&a.name.local, self.options).into_owned(),
                )
            };
            received.sort_by_cached_key(key);
            expected.sort_by_cached_key(key);
        }
        received.iter().zip(&expected).all(|(r, e)| {
            self.names_equal(&r.name, &e.name) && are_equal(&r.value, &e.value, self.options)
        })
    }

    fn comparable_attributes<'e>(&self, element: &'e Element) -> Vec<&'e Attribute> {
        element
            .attributes
            .iter()
            .filter(|a| !(self.options.ignore_ignorable_attribute && is_ignorable(a)))
            .collect()
    }
}

fn is_ignorable(attribute: &Attribute) -> bool {
    attribute.name.local == "Ignorable" && attribute.name.namespace == MARKUP_COMPATIBILITY_NS
}

/// Render consecutive siblings until more than `limit` lines are collected.
fn window_lines(siblings: &[Element], limit: Option<usize>) -> Vec<String> {
    let mut lines = Vec::new();
    for sibling in siblings {
        if limit.is_some_and(|limit| lines.len() > limit) {
            break;
        }
        lines.extend(render_lines(sibling));
    }
    lines
}
