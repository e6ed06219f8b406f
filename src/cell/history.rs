use std::collections::VecDeque;
use std::time::SystemTime;

use super::update::UpdateKind;

/// Log entry for an applied update.
#[derive(Debug, Clone)]
pub struct CommitRecord {
    /// Revision produced by this commit.
    pub revision: u64,
    pub kind: UpdateKind,
    pub committed_at: SystemTime,
}

/// Bounded commit log. Oldest entries are dropped first.
#[derive(Debug)]
pub(crate) struct CommitLog {
    limit: usize,
    entries: VecDeque<CommitRecord>,
}

impl CommitLog {
    pub(crate) fn new(limit: usize) -> Self {
        Self {
            limit,
            entries: VecDeque::with_capacity(limit.min(64)),
        }
    }

    pub(crate) fn record(&mut self, revision: u64, kind: UpdateKind) {
        if self.limit == 0 {
            return;
        }
        while self.entries.len() >= self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(CommitRecord {
            revision,
            kind,
            committed_at: SystemTime::now(),
        });
    }

    pub(crate) fn snapshot(&self) -> Vec<CommitRecord> {
        self.entries.iter().cloned().collect()
    }
}
