//! Caller-owned record of recent analyses.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::{AnalysisResult, HistoryConfig};

/// Characters of clause text kept in a [`HistoryEntry`].
const PREVIEW_CHARS: usize = 80;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Leading characters of the clause, with `…` when truncated
    pub preview: String,
    pub overall_quality: f64,
    pub state_index: u8,
    pub state_label: String,
}

impl HistoryEntry {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let mut preview: String = result.text.chars().take(PREVIEW_CHARS).collect();
        if result.text.chars().count() > PREVIEW_CHARS {
            preview.push('…');
        }
        Self {
            preview,
            overall_quality: result.overall_quality,
            state_index: result.state.index,
            state_label: result.state.label.clone(),
        }
    }
}

/// Fixed-size ring buffer; recording into a full history drops the oldest entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisHistory {
    entries: VecDeque<HistoryEntry>,
    max_entries: usize,
}

impl AnalysisHistory {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_entries),
            max_entries,
        }
    }

    pub fn from_config(config: &HistoryConfig) -> Self {
        Self::new(config.max_entries)
    }

    pub fn record(&mut self, result: &AnalysisResult) {
        if self.max_entries == 0 {
            return;
        }
        while self.entries.len() >= self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(HistoryEntry::from_result(result));
    }

    /// Oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
