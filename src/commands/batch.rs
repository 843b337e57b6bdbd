//! `jconverge batch` - plan many hosts in parallel.
//!
//! Each host is an independent planning run; the only shared data is the
//! read-only policy table, so runs parallelize without locking.

use crate::cli::BatchArgs;
use crate::ui;
use anyhow::{Context, Result, bail};
use colored::Colorize;
use convergence::{Host, ObservedState, PolicyTable};
use rayon::prelude::*;
use std::fs;

/// Parse a hosts file: one "family version" pair per line, blank lines and
/// '#' comments ignored.
fn parse_hosts(content: &str) -> Result<Vec<Host>> {
    let mut hosts = Vec::new();
    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(family), Some(version), None) => hosts.push(Host::new(family, version)),
            _ => bail!("line {}: expected 'family version', got '{line}'", lineno + 1),
        }
    }
    Ok(hosts)
}

pub fn run(table: &PolicyTable, args: &BatchArgs) -> Result<()> {
    let content = fs::read_to_string(&args.hosts_file)
        .with_context(|| format!("Could not read hosts file: {}", args.hosts_file.display()))?;
    let hosts = parse_hosts(&content)?;
    if hosts.is_empty() {
        ui::warn("hosts file contains no hosts");
        return Ok(());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(args.jobs)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to create thread pool: {e}"))?;

    let results: Vec<(Host, Result<usize, convergence::Error>)> = pool.install(|| {
        hosts
            .into_par_iter()
            .map(|host| {
                let result = convergence::resolve_desired(&host, table)
                    .map(|desired| convergence::plan(&desired, &ObservedState::default()).len());
                (host, result)
            })
            .collect()
    });

    ui::header("Batch plan");
    let mut failures = 0;
    for (host, result) in &results {
        match result {
            Ok(actions) => println!("  {} {:<20} {} actions", "✓".green(), host.to_string(), actions),
            Err(e) => {
                failures += 1;
                println!("  {} {:<20} {}", "✗".red(), host.to_string(), e.to_string().dimmed());
            }
        }
    }

    println!();
    if failures > 0 {
        ui::warn(&format!("{failures} of {} hosts failed to resolve", results.len()));
    } else {
        ui::success(&format!("planned {} hosts", results.len()));
    }
    Ok(())
}
