//! `hashrep lookup`: batch reputation lookup.

use anyhow::{Context, Result};
use hashrep_core::checksum;
use hashrep_core::config::HashrepConfig;
use hashrep_core::http;
use hashrep_core::indicator::Indicator;
use hashrep_core::lookup::{LookupOutcome, LookupResult, LookupService};
use hashrep_core::validate::validate_options;
use std::fmt::Write;
use std::path::PathBuf;

#[derive(Debug, Default)]
pub struct LookupArgs {
    pub hashes: Vec<String>,
    pub files: Vec<PathBuf>,
    pub json: bool,
}

fn collect_indicators(args: &LookupArgs) -> Result<Vec<Indicator>> {
    let mut out = Vec::with_capacity(args.hashes.len() + args.files.len());
    for raw in &args.hashes {
        out.push(Indicator::parse(raw)?);
    }
    for path in &args.files {
        out.push(checksum::indicator_for_path(path)?);
    }
    Ok(out)
}

fn result_label(result: &LookupResult) -> String {
    match &result.outcome {
        LookupOutcome::Hit(data) => {
            let mut label = if data.summary.is_empty() {
                "hit".to_string()
            } else {
                data.summary.join(", ")
            };
            if data.details.data.is_malicious {
                label.push_str(" (malicious)");
            }
            label
        }
        LookupOutcome::Miss => "no match".to_string(),
        LookupOutcome::RateLimited => "rate limited, retry later".to_string(),
    }
}

fn render_table(results: &[LookupResult]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  {:<6}  {:<64}  {}", "Type", "Hash", "Result");
    let _ = writeln!(out, "  {}  {}  {}", "------", "-".repeat(64), "------");
    for r in results {
        let _ = writeln!(
            out,
            "  {:<6}  {:<64}  {}",
            r.entity.kind.to_string(),
            r.entity.value,
            result_label(r)
        );
    }
    out
}

/// Validate options, run the batch and print results. Returns the exit code.
pub async fn run_lookup(cfg: &HashrepConfig, args: &LookupArgs) -> Result<i32> {
    let indicators = collect_indicators(args)?;
    if indicators.is_empty() {
        anyhow::bail!("nothing to look up: pass hashes or --file paths");
    }

    let options = cfg.lookup_options();
    let errors = validate_options(&options);
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{}", e);
        }
        return Ok(2);
    }

    let client = http::initialize(&cfg.request).context("initialize HTTP client")?;
    let service = LookupService::new(client).with_max_concurrent(cfg.max_concurrent());
    let results = service.lookup(&indicators, &options).await?;

    let limited = results.iter().filter(|r| r.is_rate_limited()).count();
    if limited > 0 {
        tracing::warn!("{} lookups were rate limited", limited);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print!("{}", render_table(&results));
    }
    Ok(0)
}
