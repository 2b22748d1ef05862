use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, bail};
use biomarker_triage::kb::load_case;
use biomarker_triage::{EngineConfig, TriageEngine};
use log::info;

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let Some(kb_path) = args.next().map(PathBuf::from) else {
        bail!("usage: biomarker-triage <kb.json> [case.json ...]");
    };
    let case_paths: Vec<PathBuf> = args.map(PathBuf::from).collect();

    let config = EngineConfig::builder()
        .show_progress(case_paths.len() > 1)
        .build()?;
    let engine = TriageEngine::from_path(&kb_path, config)
        .with_context(|| format!("Failed to load knowledge base {}", kb_path.display()))?;

    if case_paths.is_empty() {
        info!(
            "Knowledge base {} passed validation",
            engine.knowledge_base().version()
        );
        return Ok(());
    }

    let start = Instant::now();
    let cases = case_paths
        .iter()
        .map(|path| {
            load_case(path).with_context(|| format!("Failed to load case {}", path.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let reports = engine.evaluate_cases(&cases)?;
    for report in &reports {
        println!("{}", serde_json::to_string_pretty(report)?);
    }

    info!(
        "Evaluated {} case(s) in {:?}",
        reports.len(),
        start.elapsed()
    );
    Ok(())
}
