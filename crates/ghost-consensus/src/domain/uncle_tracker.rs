//! Recent-header window for uncle eligibility
//!
//! Every accepted header is recorded with its height and miner. Headers more
//! than `tracking_range` below the highest recorded height are evicted on
//! insert. The window answers two questions: which recent headers a new
//! block could cite as uncles, and whether a cited uncle set is eligible.

use super::BlockRecord;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Hash};
use std::collections::{BTreeMap, HashSet};

/// A block credited as an uncle of some descendant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UncleCandidate {
    pub hash: Hash,
    pub height: u64,
    pub miner: Address,
}

/// Why a cited uncle cannot be credited.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IneligibleReason {
    /// Uncle height is too far from the citing block
    HeightDelta { delta: u64, max: u64 },
    /// Record is not backed by a mined header (e.g. genesis)
    NotMinedHeader,
}

/// Result of checking a cited uncle set. One ineligible uncle fails the set.
#[derive(Clone, Debug, PartialEq)]
pub enum CandidateCheck {
    /// Every uncle is eligible, in first-seen order
    Eligible(Vec<UncleCandidate>),
    /// The first offending uncle
    Ineligible {
        hash: Hash,
        reason: IneligibleReason,
    },
}

/// Bounded window of recently accepted headers.
#[derive(Debug)]
pub struct UncleTracker {
    by_height: BTreeMap<u64, Vec<UncleCandidate>>,
    max_height: u64,
    tracking_range: u64,
    max_height_delta: u64,
}

impl UncleTracker {
    pub fn new(tracking_range: u64, max_height_delta: u64) -> Self {
        Self {
            by_height: BTreeMap::new(),
            max_height: 0,
            tracking_range,
            max_height_delta,
        }
    }

    /// Record an accepted header. Re-recording a hash is a no-op.
    pub fn record_header(&mut self, height: u64, hash: Hash, miner: Address) {
        if height < self.horizon() {
            return;
        }

        let entries = self.by_height.entry(height).or_default();
        if entries.iter().any(|entry| entry.hash == hash) {
            return;
        }
        entries.push(UncleCandidate {
            hash,
            height,
            miner,
        });

        if height > self.max_height {
            self.max_height = height;
            let horizon = self.horizon();
            self.by_height = self.by_height.split_off(&horizon);
        }
    }

    /// Check the records of a cited uncle set against a block at `current_height`.
    ///
    /// Duplicate hashes are checked once.
    pub fn validate_candidates(
        &self,
        uncles: &[(Hash, BlockRecord)],
        current_height: u64,
    ) -> CandidateCheck {
        let mut seen = HashSet::new();
        let mut eligible = Vec::with_capacity(uncles.len());

        for (hash, record) in uncles {
            if !seen.insert(*hash) {
                continue;
            }

            let delta = current_height.abs_diff(record.height);
            if delta > self.max_height_delta {
                return CandidateCheck::Ineligible {
                    hash: *hash,
                    reason: IneligibleReason::HeightDelta {
                        delta,
                        max: self.max_height_delta,
                    },
                };
            }

            let Some(header) = record.header.as_block_header() else {
                return CandidateCheck::Ineligible {
                    hash: *hash,
                    reason: IneligibleReason::NotMinedHeader,
                };
            };

            eligible.push(UncleCandidate {
                hash: *hash,
                height: record.height,
                miner: header.miner,
            });
        }

        CandidateCheck::Eligible(eligible)
    }

    /// Recent headers a block at `height` could cite as uncles, newest first.
    ///
    /// `exclude` should hold the new block's own ancestors.
    pub fn candidates_for(
        &self,
        height: u64,
        exclude: &HashSet<Hash>,
        limit: usize,
    ) -> Vec<UncleCandidate> {
        let lowest = height.saturating_sub(self.max_height_delta);
        self.by_height
            .range(lowest..height)
            .rev()
            .flat_map(|(_, entries)| entries.iter())
            .filter(|entry| !exclude.contains(&entry.hash))
            .take(limit)
            .cloned()
            .collect()
    }

    /// Look up a tracked header.
    pub fn get(&self, hash: &Hash) -> Option<&UncleCandidate> {
        self.by_height
            .values()
            .flat_map(|entries| entries.iter())
            .find(|entry| entry.hash == *hash)
    }

    /// Number of tracked headers.
    pub fn len(&self) -> usize {
        self.by_height.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_height.is_empty()
    }

    /// Highest recorded height.
    pub fn max_height(&self) -> u64 {
        self.max_height
    }

    /// Lowest height still retained.
    fn horizon(&self) -> u64 {
        self.max_height.saturating_sub(self.tracking_range)
    }
}
