//! Accumulated, conflict-checked edits for one file.
//!
//! Edits are proposed in discovery order and the first edit to claim a span
//! wins. With [`ConflictPolicy::ExactSpan`] only identical spans collide, so
//! partially overlapping edits may both be accepted; the apply step reports
//! those. [`ConflictPolicy::Overlap`] rejects any edit sharing text with an
//! accepted one.

use hipify_api::{ConflictPolicy, Edit, Span};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Why a proposed edit was turned away
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConflictReason {
    /// An accepted edit has exactly this span
    SpanAlreadyClaimed,
    /// An accepted edit shares part of this span
    OverlapsClaimedSpan,
}

impl fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictReason::SpanAlreadyClaimed => f.write_str("span already claimed"),
            ConflictReason::OverlapsClaimedSpan => f.write_str("overlaps a claimed span"),
        }
    }
}

/// A rejected edit and the accepted edit it collided with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub existing: Edit,
    pub rejected: Edit,
    pub reason: ConflictReason,
}

impl Conflict {
    /// Same span and same text: the construct was simply seen twice
    pub fn is_duplicate(&self) -> bool {
        self.existing.span == self.rejected.span && self.existing.new_text == self.rejected.new_text
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rejected ({}), kept {}",
            self.rejected, self.reason, self.existing
        )
    }
}

/// Outcome of [`ReplacementSet::propose`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Proposal {
    Accepted,
    Rejected(Conflict),
}

impl Proposal {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Proposal::Accepted)
    }
}

/// Edits for one file keyed by span
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementSet {
    policy: ConflictPolicy,
    edits: BTreeMap<Span, Edit>,
    conflicts: Vec<Conflict>,
}

impl ReplacementSet {
    pub fn new(policy: ConflictPolicy) -> Self {
        Self {
            policy,
            edits: BTreeMap::new(),
            conflicts: Vec::new(),
        }
    }

    pub fn policy(&self) -> ConflictPolicy {
        self.policy
    }

    /// Offer an edit; the first claim on a span wins
    pub fn propose(&mut self, edit: Edit) -> Proposal {
        if let Some(existing) = self.edits.get(&edit.span) {
            return self.reject(existing.clone(), edit, ConflictReason::SpanAlreadyClaimed);
        }

        if self.policy == ConflictPolicy::Overlap {
            let clash = self
                .edits
                .values()
                .find(|accepted| accepted.span.overlaps(&edit.span))
                .cloned();
            if let Some(existing) = clash {
                return self.reject(existing, edit, ConflictReason::OverlapsClaimedSpan);
            }
        }

        self.edits.insert(edit.span, edit);
        Proposal::Accepted
    }

    fn reject(&mut self, existing: Edit, rejected: Edit, reason: ConflictReason) -> Proposal {
        let conflict = Conflict {
            existing,
            rejected,
            reason,
        };
        self.conflicts.push(conflict.clone());
        Proposal::Rejected(conflict)
    }

    /// Accepted edits ordered by span
    pub fn iter(&self) -> impl Iterator<Item = &Edit> {
        self.edits.values()
    }

    pub fn get(&self, span: &Span) -> Option<&Edit> {
        self.edits.get(span)
    }

    /// Every rejection, in the order it happened
    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Pairs of accepted edits whose spans overlap
    ///
    /// Always empty under [`ConflictPolicy::Overlap`].
    pub fn overlapping_pairs(&self) -> Vec<(&Edit, &Edit)> {
        let edits: Vec<&Edit> = self.edits.values().collect();
        let mut pairs = Vec::new();
        for (i, a) in edits.iter().enumerate() {
            for b in &edits[i + 1..] {
                if b.span.start > a.span.end {
                    break;
                }
                if a.span.overlaps(&b.span) {
                    pairs.push((*a, *b));
                }
            }
        }
        pairs
    }
}

impl<'a> IntoIterator for &'a ReplacementSet {
    type Item = &'a Edit;
    type IntoIter = std::collections::btree_map::Values<'a, Span, Edit>;

    fn into_iter(self) -> Self::IntoIter {
        self.edits.values()
    }
}
