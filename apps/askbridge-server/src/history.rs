//! The recent-history ring: a bounded, newest-first list of Q/A pairs with
//! dedup-and-promote insertion. Pure in-memory, no failure modes; callers
//! hold it behind the `AppState` mutex.

use std::collections::VecDeque;

pub(crate) const HISTORY_CAPACITY: usize = 5;

#[derive(Clone, Debug)]
pub(crate) struct QaEntry {
    pub question: String,
    pub answer: String,
}

pub(crate) struct HistoryRing {
    entries: VecDeque<QaEntry>,
    capacity: usize,
}

impl HistoryRing {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Insert a pair at the front. A case-insensitively equal question is
    /// removed from wherever it sits first, so the newest occurrence wins;
    /// anything past capacity falls off the tail. Comparison is Unicode
    /// case folding via `to_lowercase`, not ASCII-only.
    pub fn insert(&mut self, question: &str, answer: &str) {
        let needle = question.to_lowercase();
        if let Some(pos) = self
            .entries
            .iter()
            .position(|entry| entry.question.to_lowercase() == needle)
        {
            self.entries.remove(pos);
        }
        self.entries.push_front(QaEntry {
            question: question.to_string(),
            answer: answer.to_string(),
        });
        self.entries.truncate(self.capacity);
    }

    /// Newest-first clone of the current entries.
    pub fn snapshot(&self) -> Vec<QaEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
