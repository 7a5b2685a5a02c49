//! Word-level comparison of an original clause and its rewrite.
//!
//! The diff is a queryable structure, not only rendered output: callers can
//! ask for the added, removed and unchanged words, alignment statistics and a
//! similarity ratio, or render `[-deleted-]` / `{+inserted+}` markup.
//!
//! # Complexity
//!
//! The common prefix and suffix are matched first in linear time. The
//! longest-common-subsequence table only covers the differing middle: for
//! middles of `m` and `n` words it takes O(m·n) time and holds (m+1)·(n+1)
//! cells in one flat allocation. The full table is kept because the
//! backtrack needs it; a rewrite changes few words, so the middle is small.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpanKind {
    /// Present in both texts
    Equal,
    /// Only in the original
    Delete,
    /// Only in the rewrite
    Insert,
}

/// A maximal run of words with the same [`SpanKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSpan {
    pub kind: SpanKind,
    pub words: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    /// Words in the original.
    pub total_left: usize,
    /// Words in the rewrite.
    pub total_right: usize,
    pub identical: usize,
    pub added: usize,
    pub removed: usize,
}

/// Alignment of two word sequences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordDiff {
    pub spans: Vec<DiffSpan>,
    pub stats: DiffStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DiffOp {
    Equal(usize),
    Delete(usize),
    Insert(usize),
}

/// Diff two texts word by word.
///
/// Words are whitespace-separated. For whitespace-normalized inputs the
/// original-side and rewritten-side spans reproduce the inputs exactly
/// (see [`WordDiff::original_text`] and [`WordDiff::rewritten_text`]).
pub fn diff(original: &str, rewritten: &str) -> WordDiff {
    let left: Vec<&str> = original.split_whitespace().collect();
    let right: Vec<&str> = rewritten.split_whitespace().collect();

    let prefix = left
        .iter()
        .zip(right.iter())
        .take_while(|(l, r)| l == r)
        .count();
    let max_suffix = left.len().min(right.len()) - prefix;
    let suffix = left
        .iter()
        .rev()
        .zip(right.iter().rev())
        .take(max_suffix)
        .take_while(|(l, r)| l == r)
        .count();

    let mut ops: Vec<DiffOp> = (0..prefix).map(DiffOp::Equal).collect();
    let middle = lcs_ops(
        &left[prefix..left.len() - suffix],
        &right[prefix..right.len() - suffix],
    );
    ops.extend(middle.into_iter().map(|op| match op {
        DiffOp::Equal(i) => DiffOp::Equal(prefix + i),
        DiffOp::Delete(i) => DiffOp::Delete(prefix + i),
        DiffOp::Insert(j) => DiffOp::Insert(prefix + j),
    }));
    ops.extend((left.len() - suffix..left.len()).map(DiffOp::Equal));

    let mut stats = DiffStats {
        total_left: left.len(),
        total_right: right.len(),
        ..Default::default()
    };
    let mut spans: Vec<DiffSpan> = Vec::new();
    for op in ops {
        let (kind, word) = match op {
            DiffOp::Equal(i) => {
                stats.identical += 1;
                (SpanKind::Equal, left[i])
            }
            DiffOp::Delete(i) => {
                stats.removed += 1;
                (SpanKind::Delete, left[i])
            }
            DiffOp::Insert(j) => {
                stats.added += 1;
                (SpanKind::Insert, right[j])
            }
        };
        match spans.last_mut() {
            Some(span) if span.kind == kind => span.words.push(word.to_string()),
            _ => spans.push(DiffSpan {
                kind,
                words: vec![word.to_string()],
            }),
        }
    }

    WordDiff { spans, stats }
}

/// Longest-common-subsequence alignment. `Equal` carries the left index.
fn lcs_ops(left: &[&str], right: &[&str]) -> Vec<DiffOp> {
    let n = left.len();
    let m = right.len();

    if n == 0 {
        return (0..m).map(DiffOp::Insert).collect();
    }
    if m == 0 {
        return (0..n).map(DiffOp::Delete).collect();
    }

    // table[i * width + j] = LCS length of left[..i] and right[..j]
    let width = m + 1;
    let mut table = vec![0usize; (n + 1) * width];
    for i in 1..=n {
        for j in 1..=m {
            table[i * width + j] = if left[i - 1] == right[j - 1] {
                table[(i - 1) * width + j - 1] + 1
            } else {
                table[(i - 1) * width + j].max(table[i * width + j - 1])
            };
        }
    }

    let mut ops = Vec::with_capacity(n + m);
    let (mut i, mut j) = (n, m);
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && left[i - 1] == right[j - 1] {
            ops.push(DiffOp::Equal(i - 1));
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || table[i * width + j - 1] >= table[(i - 1) * width + j]) {
            ops.push(DiffOp::Insert(j - 1));
            j -= 1;
        } else {
            ops.push(DiffOp::Delete(i - 1));
            i -= 1;
        }
    }

    ops.reverse();
    ops
}

impl WordDiff {
    fn words_of(&self, kind: SpanKind) -> impl Iterator<Item = &str> {
        self.spans
            .iter()
            .filter(move |s| s.kind == kind)
            .flat_map(|s| s.words.iter().map(String::as_str))
    }

    /// Words only in the rewrite.
    pub fn added(&self) -> impl Iterator<Item = &str> {
        self.words_of(SpanKind::Insert)
    }

    /// Words only in the original.
    pub fn removed(&self) -> impl Iterator<Item = &str> {
        self.words_of(SpanKind::Delete)
    }

    pub fn unchanged(&self) -> impl Iterator<Item = &str> {
        self.words_of(SpanKind::Equal)
    }

    pub fn is_identity(&self) -> bool {
        self.stats.added == 0 && self.stats.removed == 0
    }

    /// Proportion of identical words (1.0 when both sides are empty).
    pub fn similarity(&self) -> f64 {
        let total = self.stats.total_left.max(self.stats.total_right);
        if total == 0 {
            return 1.0;
        }
        self.stats.identical as f64 / total as f64
    }

    /// The original text, from the equal and deleted spans.
    pub fn original_text(&self) -> String {
        self.side_text(SpanKind::Delete)
    }

    /// The rewritten text, from the equal and inserted spans.
    pub fn rewritten_text(&self) -> String {
        self.side_text(SpanKind::Insert)
    }

    fn side_text(&self, own: SpanKind) -> String {
        self.spans
            .iter()
            .filter(|s| s.kind == SpanKind::Equal || s.kind == own)
            .flat_map(|s| s.words.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// `[-deleted-]` and `{+inserted+}` markup over the unchanged words.
    pub fn markup(&self) -> String {
        self.spans
            .iter()
            .map(|span| {
                let words = span.words.join(" ");
                match span.kind {
                    SpanKind::Equal => words,
                    SpanKind::Delete => format!("[-{}-]", words),
                    SpanKind::Insert => format!("{{+{}+}}", words),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
