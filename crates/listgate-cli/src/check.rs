//! # `listgate check` — Full Validation Run
//!
//! Loads the governance policy, the candidate document, and (optionally)
//! the previously accepted version, then runs the pipeline in order:
//! schema conformance, deterministic governance checks, logo reachability.
//!
//! Fail-fast is the default: the first stage that produces violations ends
//! the run, so the first error is what CI reports. `--keep-going` switches
//! to full accumulation. Logo probes are only issued once every
//! deterministic stage has passed, so an invalid submission never pays
//! network cost.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Args;

use listgate_core::{
    ListPolicy, ListValidator, Timestamp, TokenListDocument, ValidationReport, Violation,
};
use listgate_probe::{probe_tokens, HttpProbe, ReachabilityProbe, DEFAULT_CONCURRENCY};
use listgate_schema::TokenListSchema;

/// Arguments for `listgate check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the candidate token-list JSON file under review.
    #[arg(long)]
    pub candidate: PathBuf,

    /// Path to the governance policy YAML file.
    #[arg(long)]
    pub policy: PathBuf,

    /// Path to the previously accepted token-list JSON file. Omit for a
    /// first-ever submission; an unreadable file is treated as absent.
    #[arg(long)]
    pub previous: Option<PathBuf>,

    /// Directory of `*.schema.json` files overriding the embedded schema.
    #[arg(long)]
    pub schema_dir: Option<PathBuf>,

    /// Skip the logo reachability stage entirely.
    #[arg(long)]
    pub offline: bool,

    /// Accumulate every violation instead of stopping at the first stage
    /// that fails.
    #[arg(long)]
    pub keep_going: bool,

    /// Maximum number of concurrently outstanding logo probes.
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Per-probe timeout in seconds.
    #[arg(long, default_value_t = 5)]
    pub probe_timeout_secs: u64,
}

/// Run the full check. Returns the accumulated report; `Err` only for
/// system faults (unreadable candidate/policy, uncompilable schema), never
/// for governance violations.
pub async fn run(args: &CheckArgs) -> anyhow::Result<ValidationReport> {
    let policy = load_policy(&args.policy)?;

    let candidate_raw = std::fs::read_to_string(&args.candidate)
        .with_context(|| format!("cannot read candidate {}", args.candidate.display()))?;
    let candidate_value: serde_json::Value = serde_json::from_str(&candidate_raw)
        .with_context(|| format!("candidate {} is not valid JSON", args.candidate.display()))?;

    let previous = args.previous.as_deref().and_then(load_previous);
    if args.previous.is_some() && previous.is_none() {
        tracing::warn!(
            path = %args.previous.as_ref().map(|p| p.display().to_string()).unwrap_or_default(),
            "previous version unavailable, validating as a first submission"
        );
    }

    let mut report = ValidationReport::new();

    // Stage 1: schema conformance.
    let schema = match &args.schema_dir {
        Some(dir) => TokenListSchema::from_dir(dir)
            .with_context(|| format!("cannot load schemas from {}", dir.display()))?,
        None => TokenListSchema::builtin().context("embedded schema failed to compile")?,
    };
    let schema_violations = schema.check(&candidate_value);
    tracing::debug!(violations = schema_violations.len(), "schema stage complete");
    for violation in schema_violations {
        report.push(violation);
    }
    if !report.is_clean() && !args.keep_going {
        return Ok(report);
    }

    // The typed model should deserialize once the schema passed; if it
    // still refuses, surface that as a schema-kind violation rather than
    // a process fault.
    let candidate = match TokenListDocument::from_value(candidate_value) {
        Ok(doc) => doc,
        Err(e) => {
            report.push(Violation::Schema {
                instance_path: String::new(),
                detail: e.to_string(),
            });
            return Ok(report);
        }
    };

    // Stages 2-7: deterministic governance checks.
    let validator = ListValidator::new(policy);
    let core_report = validator.validate(&candidate, previous.as_ref(), Timestamp::now());
    report.extend(core_report);
    if !report.is_clean() {
        // Even under --keep-going, probes are not issued for a submission
        // the deterministic stages already rejected.
        return Ok(report);
    }

    // Stage 8: logo reachability, only on an otherwise clean candidate.
    if args.offline {
        tracing::info!("offline mode, skipping logo reachability");
        return Ok(report);
    }

    let probe: Arc<dyn ReachabilityProbe> = Arc::new(
        HttpProbe::new(Duration::from_secs(args.probe_timeout_secs))
            .context("cannot build logo probe")?,
    );
    let violations = probe_tokens(
        probe,
        &candidate.tokens,
        args.concurrency,
        !args.keep_going,
    )
    .await;
    for violation in violations {
        report.push(violation);
    }

    Ok(report)
}

/// Load the governance policy from YAML.
fn load_policy(path: &Path) -> anyhow::Result<ListPolicy> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read policy {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("policy {} is not a valid policy file", path.display()))
}

/// Best-effort load of the previous version. Any failure means "no previous
/// version": a first submission and a failed history lookup look the same
/// to the validator.
fn load_previous(path: &Path) -> Option<TokenListDocument> {
    match TokenListDocument::from_path(path) {
        Ok(doc) => Some(doc),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot load previous version");
            None
        }
    }
}
