//! Loading knowledge bases and cases from JSON
//!
//! A knowledge base is parsed, optionally gated through the consistency
//! validator and then indexed. Structural problems (a comparison without a
//! threshold, an alert that is not red) surface as parse errors here.

use std::path::Path;
use std::time::Instant;

use crate::case::CaseInput;
use crate::config::EngineConfig;
use crate::error::util::read_json;
use crate::error::{Result, TriageError};
use crate::kb::index::IndexedKnowledgeBase;
use crate::kb::types::KnowledgeBase;
use crate::kb::validator::validate_knowledge_base;
use crate::utils::logging::{log_kb_load_complete, log_kb_load_start, log_kb_ready};

/// Parse a knowledge-base document without validating it
pub fn parse_knowledge_base(json: &str) -> Result<KnowledgeBase> {
    serde_json::from_str(json).map_err(|e| TriageError::json("knowledge base", e))
}

/// Validate (when configured) and index a parsed knowledge base
pub fn prepare_knowledge_base(
    kb: KnowledgeBase,
    config: &EngineConfig,
) -> Result<IndexedKnowledgeBase> {
    if config.validate_on_load {
        validate_knowledge_base(&kb)?;
    }

    log_kb_ready(&kb, config.validate_on_load);

    Ok(IndexedKnowledgeBase::new(kb))
}

/// Parse, validate and index a knowledge-base document held in memory
pub fn load_knowledge_base_str(json: &str, config: &EngineConfig) -> Result<IndexedKnowledgeBase> {
    let kb = parse_knowledge_base(json)?;
    prepare_knowledge_base(kb, config)
}

/// Read, validate and index a knowledge-base document from disk
pub fn load_knowledge_base(path: &Path, config: &EngineConfig) -> Result<IndexedKnowledgeBase> {
    let start = Instant::now();
    log_kb_load_start(path);

    let kb: KnowledgeBase = read_json(path, "knowledge base")?;
    let prepared = prepare_knowledge_base(kb, config)?;

    log_kb_load_complete(path, prepared.version(), start.elapsed());
    Ok(prepared)
}

/// Parse a case document held in memory
pub fn parse_case(json: &str) -> Result<CaseInput> {
    serde_json::from_str(json).map_err(|e| TriageError::json("case", e))
}

/// Read a case document from disk
pub fn load_case(path: &Path) -> Result<CaseInput> {
    read_json(path, "case")
}
