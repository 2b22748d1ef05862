//! Case evaluation against a loaded knowledge base
//!
//! A [`TriageEngine`] owns one validated, indexed knowledge base and never
//! mutates it, so any number of cases can be evaluated concurrently.

use std::path::Path;
use std::time::Instant;

use chrono::Utc;
use indicatif::ParallelProgressIterator;
use log::{debug, warn};
use rayon::prelude::*;

use crate::case::CaseInput;
use crate::config::EngineConfig;
use crate::error::{Result, TriageError};
use crate::kb::index::IndexedKnowledgeBase;
use crate::kb::loader::{load_knowledge_base, load_knowledge_base_str};
use crate::ranges::applier::apply_reference_ranges;
use crate::ranges::matcher::normalize_sex_or;
use crate::report::{CaseReport, CaseTrace, PatientSummary, Priority, Report, build_report};
use crate::rules::condition::{BiomarkerValues, ValueSource};
use crate::rules::evaluator::{FiredAlert, FiredRule, evaluate_alerts, evaluate_rules};
use crate::utils::logging::{
    create_main_progress_bar, finish_progress_bar, log_batch_complete, log_batch_start,
};

/// Evaluates cases against one knowledge-base version
#[derive(Debug, Clone)]
pub struct TriageEngine {
    kb: IndexedKnowledgeBase,
    config: EngineConfig,
}

impl TriageEngine {
    /// Create an engine over an already loaded knowledge base
    pub fn new(kb: IndexedKnowledgeBase, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { kb, config })
    }

    /// Load a knowledge base from a JSON string
    pub fn from_json_str(json: &str, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let kb = load_knowledge_base_str(json, &config)?;
        Ok(Self { kb, config })
    }

    /// Load a knowledge base from a JSON file
    pub fn from_path(path: &Path, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let kb = load_knowledge_base(path, &config)?;
        Ok(Self { kb, config })
    }

    #[must_use]
    pub const fn knowledge_base(&self) -> &IndexedKnowledgeBase {
        &self.kb
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn evaluate_statements<V: ValueSource + ?Sized>(
        &self,
        values: &V,
    ) -> (Vec<FiredAlert>, Vec<FiredRule>) {
        let alerts = evaluate_alerts(self.kb.red_flags(), values);
        let rules = evaluate_rules(self.kb.rules(), values);

        if self.config.log_evaluations {
            for alert in &alerts {
                debug!(
                    "Critical alert {} fired: {}",
                    alert.alert_id,
                    alert.trace.fired_because.join("; ")
                );
            }
            for rule in &rules {
                debug!(
                    "Rule {} fired: {}",
                    rule.rule.id,
                    rule.fired_because.join("; ")
                );
            }
        }

        (alerts, rules)
    }

    /// Evaluate one case: apply ranges, evaluate alerts then rules, prioritize
    #[must_use]
    pub fn evaluate_case(&self, case: &CaseInput) -> CaseReport {
        let sex = normalize_sex_or(case.patient.sex.as_deref(), self.config.default_sex);
        let ranges = apply_reference_ranges(&self.kb, case, sex);
        let values = BiomarkerValues::from_enriched(&ranges.observations_enriched);

        let (red_flags, rules) = self.evaluate_statements(&values);

        let trace = CaseTrace {
            ranges_applied: ranges.ranges_applied(),
            observations_processed: case.observations.len(),
            alerts_evaluated: self.kb.red_flags().len(),
            alerts_fired: red_flags.len(),
            rules_evaluated: self.kb.rules().len(),
            rules_fired: rules.len(),
            timestamp: Utc::now(),
        };

        let priorities = red_flags
            .iter()
            .cloned()
            .map(Priority::from)
            .chain(rules.into_iter().map(Priority::from))
            .collect();
        let report = build_report(&self.kb, priorities);

        debug!(
            "Case {}: {} alert(s) and {} rule(s) fired",
            case.case_id, trace.alerts_fired, trace.rules_fired
        );

        CaseReport {
            kb_version: self.kb.version().to_string(),
            case_id: case.case_id.clone(),
            patient: PatientSummary {
                age: case.patient.age,
                sex,
            },
            observations_enriched: ranges.observations_enriched,
            qa_flags: ranges.qa_flags,
            red_flags,
            report,
            trace,
        }
    }

    /// Evaluate raw biomarker values without reference ranges
    #[must_use]
    pub fn evaluate_values<V: ValueSource + ?Sized>(&self, values: &V) -> Report {
        let (alerts, rules) = self.evaluate_statements(values);
        let priorities = alerts
            .into_iter()
            .map(Priority::from)
            .chain(rules.into_iter().map(Priority::from))
            .collect();
        build_report(&self.kb, priorities)
    }

    /// Evaluate many cases in parallel; reports come back in input order
    pub fn evaluate_cases(&self, cases: &[CaseInput]) -> Result<Vec<CaseReport>> {
        if cases.is_empty() {
            warn!("No cases to evaluate");
            return Ok(Vec::new());
        }

        let start = Instant::now();
        log_batch_start(cases.len(), self.config.num_threads, self.kb.version());

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.num_threads)
            .build()
            .map_err(|e| TriageError::Config(format!("Failed to build thread pool: {e}")))?;

        let reports: Vec<CaseReport> = if self.config.show_progress {
            let pb = create_main_progress_bar(cases.len() as u64, Some("Evaluating cases"));
            let reports: Vec<CaseReport> = pool.install(|| {
                cases
                    .par_iter()
                    .progress_with(pb.clone())
                    .map(|case| self.evaluate_case(case))
                    .collect()
            });
            finish_progress_bar(&pb, Some("Done"));
            reports
        } else {
            pool.install(|| cases.par_iter().map(|case| self.evaluate_case(case)).collect())
        };

        let alerts_fired = reports.iter().map(|r| r.trace.alerts_fired).sum();
        let rules_fired = reports.iter().map(|r| r.trace.rules_fired).sum();
        log_batch_complete(reports.len(), alerts_fired, rules_fired, start.elapsed());
        Ok(reports)
    }
}
