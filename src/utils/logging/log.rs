//! Log lines for knowledge-base loads and case batches

use std::path::Path;
use std::time::Duration;

use crate::kb::types::KnowledgeBase;

/// One-line inventory of a knowledge base
#[must_use]
pub fn kb_summary(kb: &KnowledgeBase) -> String {
    format!(
        "{} biomarkers, {} reference ranges, {} rules, {} critical alerts, {} actions",
        kb.biomarkers.len(),
        kb.reference_ranges.len(),
        kb.rules.len(),
        kb.red_flags.len(),
        kb.actions.len()
    )
}

/// Log that a knowledge base passed (or skipped) validation and is ready
pub fn log_kb_ready(kb: &KnowledgeBase, validated: bool) {
    if validated {
        log::info!("Knowledge base {} ready: {}", kb.version(), kb_summary(kb));
    } else {
        log::warn!(
            "Knowledge base {} loaded without validation: {}",
            kb.version(),
            kb_summary(kb)
        );
    }
}

pub fn log_kb_load_start(path: &Path) {
    log::info!("Loading knowledge base from {}", path.display());
}

pub fn log_kb_load_complete(path: &Path, version: &str, elapsed: Duration) {
    log::info!(
        "Loaded knowledge base {version} from {} in {elapsed:?}",
        path.display()
    );
}

pub fn log_batch_start(cases: usize, threads: usize, kb_version: &str) {
    log::info!(
        "Evaluating {cases} cases with {threads} threads against knowledge base {kb_version}"
    );
}

/// Log the end of a batch run with totals over every case
pub fn log_batch_complete(
    cases: usize,
    alerts_fired: usize,
    rules_fired: usize,
    elapsed: Duration,
) {
    log::info!(
        "Evaluated {cases} cases in {elapsed:?}: {alerts_fired} critical alert(s), {rules_fired} rule(s) fired"
    );
}
