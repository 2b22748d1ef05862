//! Lookup tables over a loaded knowledge base
//!
//! The index is built once per knowledge-base version and never mutated. When
//! an identifier is declared more than once the first declaration wins.

use rustc_hash::FxHashMap;

use crate::kb::reference_range::ReferenceRange;
use crate::kb::rule::{CriticalAlert, Rule};
use crate::kb::types::{Action, Biomarker, EvidenceEntry, KnowledgeBase};

/// Positions of biomarkers, ranges, actions and evidence by identifier
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBaseIndex {
    biomarkers: FxHashMap<String, usize>,
    reference_ranges: FxHashMap<String, usize>,
    actions: FxHashMap<String, usize>,
    evidence: FxHashMap<String, Vec<usize>>,
}

impl KnowledgeBaseIndex {
    /// Build the index for a knowledge base
    #[must_use]
    pub fn build(kb: &KnowledgeBase) -> Self {
        let mut index = Self::default();

        for (i, biomarker) in kb.biomarkers.iter().enumerate() {
            index.biomarkers.entry(biomarker.id.clone()).or_insert(i);
        }
        for (i, range) in kb.reference_ranges.iter().enumerate() {
            index
                .reference_ranges
                .entry(range.biomarker.clone())
                .or_insert(i);
        }
        for (i, action) in kb.actions.iter().enumerate() {
            index.actions.entry(action.id.clone()).or_insert(i);
        }
        for (i, entry) in kb.evidence.iter().enumerate() {
            index
                .evidence
                .entry(entry.rule_id.clone())
                .or_default()
                .push(i);
        }

        index
    }
}

/// A knowledge base together with its lookup index
#[derive(Debug, Clone)]
pub struct IndexedKnowledgeBase {
    kb: KnowledgeBase,
    index: KnowledgeBaseIndex,
}

impl IndexedKnowledgeBase {
    #[must_use]
    pub fn new(kb: KnowledgeBase) -> Self {
        let index = KnowledgeBaseIndex::build(&kb);
        Self { kb, index }
    }

    /// The underlying knowledge base
    #[must_use]
    pub const fn kb(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// Manifest version
    #[must_use]
    pub fn version(&self) -> &str {
        self.kb.version()
    }

    #[must_use]
    pub fn biomarker(&self, id: &str) -> Option<&Biomarker> {
        self.index
            .biomarkers
            .get(id)
            .and_then(|&i| self.kb.biomarkers.get(i))
    }

    #[must_use]
    pub fn reference_range(&self, biomarker: &str) -> Option<&ReferenceRange> {
        self.index
            .reference_ranges
            .get(biomarker)
            .and_then(|&i| self.kb.reference_ranges.get(i))
    }

    #[must_use]
    pub fn action(&self, id: &str) -> Option<&Action> {
        self.index
            .actions
            .get(id)
            .and_then(|&i| self.kb.actions.get(i))
    }

    /// Evidence entries attached to a rule or alert, in declaration order
    pub fn evidence_for<'a>(
        &'a self,
        id: &str,
    ) -> impl Iterator<Item = &'a EvidenceEntry> + use<'a> {
        self.index
            .evidence
            .get(id)
            .into_iter()
            .flatten()
            .filter_map(|&i| self.kb.evidence.get(i))
    }

    /// Rules in declared order
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.kb.rules
    }

    /// Critical alerts in declared order
    #[must_use]
    pub fn red_flags(&self) -> &[CriticalAlert] {
        &self.kb.red_flags
    }
}

impl From<KnowledgeBase> for IndexedKnowledgeBase {
    fn from(kb: KnowledgeBase) -> Self {
        Self::new(kb)
    }
}
