use std::fmt::Write;

use unicode_width::UnicodeWidthStr;

use crate::{ClassifiedClause, Tag};

/// An inclusive range of token indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpanRef {
    /// Inclusive start token index
    pub start_idx: usize,
    /// Inclusive end token index
    pub end_idx: usize,
}

impl SpanRef {
    pub fn new(start_idx: usize, end_idx: usize) -> Self {
        Self { start_idx, end_idx }
    }
}

/// A labelled row drawn under the clause.
struct IncludedSpan {
    range: SpanRef,
    label: String,
}

/// Renders a classified clause with labelled spans underneath.
///
/// ```text
/// The  Client  shall  not  pay
///              ╰───╯Modal
///                     ╰─╯Neg
/// ```
pub struct ClauseDisplay<'a> {
    clause: &'a ClassifiedClause,
    include_spans: Vec<IncludedSpan>,
}

impl<'a> std::fmt::Display for ClauseDisplay<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const SPACE_PADDING: usize = 2;
        let mut token_idx_to_start_display_char_idx = Vec::new();
        let mut token_idx_to_end_display_char_idx = Vec::new();

        let mut opening_line = String::new();
        for (idx, token) in self.clause.tokens.iter().enumerate() {
            if idx > 0 {
                opening_line.extend(std::iter::repeat(' ').take(SPACE_PADDING));
            }
            token_idx_to_start_display_char_idx.push(UnicodeWidthStr::width(&*opening_line));
            opening_line.push_str(&token.raw);
            token_idx_to_end_display_char_idx.push(UnicodeWidthStr::width(&*opening_line));
        }

        f.write_str(&opening_line)?;

        for span in self.include_spans.iter() {
            let (Some(&start_char_idx), Some(&end_char_idx)) = (
                token_idx_to_start_display_char_idx.get(span.range.start_idx),
                token_idx_to_end_display_char_idx.get(span.range.end_idx),
            ) else {
                continue;
            };

            f.write_char('\n')?;
            for _ in 0..start_char_idx {
                f.write_char(' ')?;
            }

            f.write_char('╰')?;

            let char_len = end_char_idx.saturating_sub(start_char_idx);
            for _ in (start_char_idx + 1)..end_char_idx.saturating_sub(1) {
                f.write_char('─')?;
            }

            if char_len > 1 {
                f.write_char('╯')?;
            }

            f.write_str(&span.label)?;
        }

        Ok(())
    }
}

impl<'a> ClauseDisplay<'a> {
    pub fn new(clause: &'a ClassifiedClause) -> Self {
        ClauseDisplay {
            clause,
            include_spans: Vec::new(),
        }
    }

    /// Include one row per token whose tag is not [`Tag::Other`], in token order.
    pub fn include_tags(&mut self) {
        for (idx, token) in self.clause.tokens.iter().enumerate() {
            if token.tag != Tag::Other {
                self.include_spans.push(IncludedSpan {
                    range: SpanRef::new(idx, idx),
                    label: format!("{:?}", token.tag),
                });
            }
        }
    }

    /// Include an arbitrary labelled span. Out-of-range spans are not drawn.
    pub fn include_span(&mut self, range: SpanRef, label: impl Into<String>) {
        self.include_spans.push(IncludedSpan {
            range,
            label: label.into(),
        });
    }

    /// Takes self
    pub fn with_tags(mut self) -> Self {
        self.include_tags();
        self
    }

    /// Takes self
    pub fn with_span(mut self, range: SpanRef, label: impl Into<String>) -> Self {
        self.include_span(range, label);
        self
    }
}
