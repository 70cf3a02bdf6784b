//! Line-oriented comparison with bounded resynchronization.
//!
//! Both texts are split into lines and walked in lockstep. When the lines
//! under the two cursors differ, the comparer searches a bounded window
//! downstream on both sides for the nearest point where they agree again,
//! renders the lines skipped on each side, and carries on from there.

use lockstep_types::{CompareOptions, DiffCategory};
use serde::Serialize;
use tracing::debug;

use crate::normalize::{are_equal, is_empty};
use crate::render::{write_block, write_summary};
use crate::sink::DiffSink;

/// How a text comparison ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextVerdict {
    /// Every line matched under the active policy.
    Equal,
    /// The texts were walked to the end and differ.
    Different,
    /// The comparison gave up early: the divergence limit was exceeded or
    /// the two sides could not be resynchronized.
    Stopped,
}

/// The result of comparing two texts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TextReport {
    pub verdict: TextVerdict,
    /// Divergences detected, including the one that stopped the comparison.
    pub divergences: usize,
}

impl TextReport {
    /// Returns `true` if the texts were judged equal.
    pub fn is_equal(&self) -> bool {
        self.verdict == TextVerdict::Equal
    }
}

/// Running indices into the received and expected line sequences.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Cursor {
    received: usize,
    expected: usize,
}

/// Lines to advance on each side to reach the next matching pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct SyncPoint {
    received: usize,
    expected: usize,
}

impl SyncPoint {
    fn total_advance(&self) -> usize {
        self.received + self.expected
    }
}

/// Split a text into lines.
///
/// `\r\n`, `\r` and `\n` are all line breaks. A break at the very end of the
/// text does not start another, empty, line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        match rest.find(['\r', '\n']) {
            Some(at) => {
                lines.push(&rest[..at]);
                let width = if rest[at..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[at + width..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }
    lines
}

/// Compare two texts, rendering divergences to `sink`.
///
/// Returns `true` if the texts are equal under the options' policy.
pub fn compare_texts(
    received: &str,
    expected: &str,
    options: &CompareOptions,
    sink: &mut dyn DiffSink,
) -> bool {
    TextComparer::new(options)
        .compare(received, expected, sink)
        .is_equal()
}

/// Synchronizing line comparer.
///
/// Holds only the options; all cursor state lives in one `compare` call.
#[derive(Clone, Copy, Debug)]
pub struct TextComparer<'a> {
    options: &'a CompareOptions,
}

impl<'a> TextComparer<'a> {
    pub fn new(options: &'a CompareOptions) -> Self {
        Self { options }
    }

    /// Compare two whole texts and write the closing summary message.
    pub fn compare(&self, received: &str, expected: &str, sink: &mut dyn DiffSink) -> TextReport {
        let received = split_lines(received);
        let expected = split_lines(expected);
        let report = self.compare_lines(&received, &expected, sink);
        write_summary(sink, self.options, report.is_equal());
        report
    }

    /// Compare two line sequences.
    ///
    /// Lines left over on the longer side once the shorter one is exhausted
    /// make the texts unequal but are not rendered.
    pub fn compare_lines(
        &self,
        received: &[&str],
        expected: &[&str],
        sink: &mut dyn DiffSink,
    ) -> TextReport {
        let options = self.options;
        let mut cursor = Cursor::default();
        let mut divergences = 0;

        while cursor.received < received.len() && cursor.expected < expected.len() {
            let r = received[cursor.received];
            let e = expected[cursor.expected];

            if options.ignore_empty_lines {
                let (skip_received, skip_expected) = (is_empty(r), is_empty(e));
                if skip_received || skip_expected {
                    cursor.received += usize::from(skip_received);
                    cursor.expected += usize::from(skip_expected);
                    continue;
                }
            }

            if are_equal(r, e, options) {
                if options.write_content_if_equals {
                    sink.write_line(r);
                }
                cursor.received += 1;
                cursor.expected += 1;
                continue;
            }

            divergences += 1;
            debug!(
                received_line = cursor.received + 1,
                expected_line = cursor.expected + 1,
                divergences,
                "text divergence"
            );
            if options.exceeds_diff_limit(divergences) {
                debug!(limit = options.diff_limit, "divergence limit exceeded; stopping");
                return TextReport {
                    verdict: TextVerdict::Stopped,
                    divergences,
                };
            }

            if options.sync_limit == 0 {
                write_block(sink, options, DiffCategory::Received, &[r], None);
                write_block(sink, options, DiffCategory::Expected, &[e], None);
                cursor.received += 1;
                cursor.expected += 1;
                continue;
            }

            match self.try_synchronize(received, expected, cursor) {
                Some(sync) => {
                    debug!(
                        received_skip = sync.received,
                        expected_skip = sync.expected,
                        "resynchronized"
                    );
                    let next = Cursor {
                        received: cursor.received + sync.received,
                        expected: cursor.expected + sync.expected,
                    };
                    let skipped = &received[cursor.received..next.received];
                    if !skipped.is_empty() {
                        write_block(sink, options, DiffCategory::Received, skipped, None);
                    }
                    let skipped = &expected[cursor.expected..next.expected];
                    if !skipped.is_empty() {
                        write_block(sink, options, DiffCategory::Expected, skipped, None);
                    }
                    cursor = next;
                }
                None => {
                    debug!(
                        sync_limit = options.sync_limit,
                        "no resynchronization point within limit; stopping"
                    );
                    write_block(sink, options, DiffCategory::Received, &[r], None);
                    write_block(sink, options, DiffCategory::Expected, &[e], None);
                    return TextReport {
                        verdict: TextVerdict::Stopped,
                        divergences,
                    };
                }
            }
        }

        let leftover = self.has_content(&received[cursor.received..])
            || self.has_content(&expected[cursor.expected..]);
        if leftover {
            debug!(
                received_left = received.len() - cursor.received,
                expected_left = expected.len() - cursor.expected,
                "unmatched trailing lines"
            );
        }
        let verdict = if divergences == 0 && !leftover {
            TextVerdict::Equal
        } else {
            TextVerdict::Different
        };
        TextReport {
            verdict,
            divergences,
        }
    }

    /// Search for the nearest pair of lines at which both sides agree again.
    ///
    /// Two searches run: one anchored on each expected line in turn, one
    /// anchored on each received line in turn. The one that advances the
    /// cursors less in total wins. On a tie the first search wins: it looks
    /// ahead on the received side, so the received side gives up lines.
    fn try_synchronize(&self, received: &[&str], expected: &[&str], at: Cursor) -> Option<SyncPoint> {
        let by_expected = self
            .search(expected, at.expected, received, at.received)
            .map(|(e, r)| SyncPoint {
                received: r,
                expected: e,
            });
        let by_received = self
            .search(received, at.received, expected, at.expected)
            .map(|(r, e)| SyncPoint {
                received: r,
                expected: e,
            });

        match (by_expected, by_received) {
            (Some(a), Some(b)) if b.total_advance() < a.total_advance() => Some(b),
            (Some(a), _) => Some(a),
            (None, b) => b,
        }
    }

    /// For each anchor line within `sync_limit` of `anchor_at`, look for a
    /// matching line within `sync_limit` of `candidate_at`.
    ///
    /// Returns the `(anchor, candidate)` offsets of the first match.
    fn search(
        &self,
        anchors: &[&str],
        anchor_at: usize,
        candidates: &[&str],
        candidate_at: usize,
    ) -> Option<(usize, usize)> {
        let limit = self.options.sync_limit;
        for anchor_offset in 0..=limit {
            let Some(anchor) = anchors.get(anchor_at + anchor_offset) else {
                break;
            };
            if self.skips(anchor) {
                continue;
            }
            for candidate_offset in 0..=limit {
                let Some(candidate) = candidates.get(candidate_at + candidate_offset) else {
                    break;
                };
                if !self.skips(candidate) && are_equal(anchor, candidate, self.options) {
                    return Some((anchor_offset, candidate_offset));
                }
            }
        }
        None
    }

    /// Empty lines are invisible when `ignore_empty_lines` is set.
    fn skips(&self, line: &str) -> bool {
        self.options.ignore_empty_lines && is_empty(line)
    }

    fn has_content(&self, lines: &[&str]) -> bool {
        lines.iter().any(|line| !self.skips(line))
    }
}
