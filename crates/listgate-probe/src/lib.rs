//! # listgate-probe — Logo Reachability Checks
//!
//! The one externally-effectful stage of the pipeline: confirm every token
//! record's `logoURI` points at a resource that exists. Runs last, after
//! every deterministic check has passed, so CI never pays network latency
//! for a submission that is already invalid.
//!
//! The probe capability is a trait so the rest of the system can be tested
//! without network access, and so timeout/concurrency policy can be tuned
//! independently of the validation logic. Probes are independent of each
//! other and run with bounded fan-out: total wall-clock time tracks the
//! slowest single probe, not the sum, and a per-probe timeout keeps one
//! dead host from stalling the run.
//!
//! A passing probe run is not repeatable: a resource reachable today may be
//! gone tomorrow. Callers needing determinism stub the trait or skip the
//! stage.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use listgate_core::{TokenRecord, Violation};
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// Default per-probe timeout.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Default cap on concurrently outstanding probes.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Error constructing a probe. Deployment fault, not a validation verdict.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// What a single reachability probe observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The resource responded affirmatively (2xx).
    Reachable,
    /// The host answered, but with a non-affirmative status.
    BadStatus(u16),
    /// The request never completed: transport error, bad URI, or timeout.
    Failed(String),
}

impl ProbeOutcome {
    /// Human-readable reason for an unreachable outcome, `None` if reachable.
    fn failure_reason(&self) -> Option<String> {
        match self {
            Self::Reachable => None,
            Self::BadStatus(status) => Some(format!("status {status}")),
            Self::Failed(detail) => Some(format!("request failed: {detail}")),
        }
    }
}

/// Injectable capability: confirm a resource exists at a URI.
#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    /// Probe `uri` for existence. Never panics and never returns a raw
    /// transport fault; every failure mode collapses into [`ProbeOutcome`].
    async fn probe(&self, uri: &str) -> ProbeOutcome;
}

/// HEAD-request probe backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: reqwest::Client,
}

impl HttpProbe {
    /// Build a probe with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Build a probe with [`DEFAULT_PROBE_TIMEOUT`].
    pub fn with_default_timeout() -> Result<Self, ProbeError> {
        Self::new(DEFAULT_PROBE_TIMEOUT)
    }
}

#[async_trait]
impl ReachabilityProbe for HttpProbe {
    async fn probe(&self, uri: &str) -> ProbeOutcome {
        // Reject non-absolute URIs before handing them to the client.
        if let Err(e) = Url::parse(uri) {
            return ProbeOutcome::Failed(format!("invalid URI: {e}"));
        }

        match self.client.head(uri).send().await {
            Ok(response) if response.status().is_success() => ProbeOutcome::Reachable,
            Ok(response) => ProbeOutcome::BadStatus(response.status().as_u16()),
            Err(e) if e.is_timeout() => ProbeOutcome::Failed("timed out".to_string()),
            Err(e) => ProbeOutcome::Failed(e.to_string()),
        }
    }
}

/// Probe every record's logo with bounded fan-out.
///
/// Violations come back ordered by record position, so reports are stable
/// regardless of probe completion order. With `fail_fast` set, the first
/// observed failure aborts all outstanding probes and is returned alone.
pub async fn probe_tokens(
    probe: Arc<dyn ReachabilityProbe>,
    tokens: &[TokenRecord],
    concurrency: usize,
    fail_fast: bool,
) -> Vec<Violation> {
    let limit = concurrency.max(1);
    let semaphore = Arc::new(Semaphore::new(limit));
    let mut set: JoinSet<Option<(usize, Violation)>> = JoinSet::new();

    for (index, token) in tokens.iter().enumerate() {
        let probe = Arc::clone(&probe);
        let semaphore = Arc::clone(&semaphore);
        let symbol = token.symbol.clone();
        let uri = token.logo_uri.clone();

        set.spawn(async move {
            // Closed semaphore only happens after abort; treat as no result.
            let _permit = semaphore.acquire_owned().await.ok()?;
            let outcome = probe.probe(&uri).await;
            tracing::debug!(%symbol, %uri, ?outcome, "logo probe complete");
            outcome.failure_reason().map(|reason| {
                (
                    index,
                    Violation::UnreachableLogo {
                        symbol,
                        uri,
                        reason,
                    },
                )
            })
        });
    }

    let mut failures: Vec<(usize, Violation)> = Vec::new();
    while let Some(joined) = set.join_next().await {
        // A cancelled task yields a JoinError; those carry no verdict.
        let Ok(result) = joined else {
            continue;
        };
        if let Some(failure) = result {
            if fail_fast {
                set.abort_all();
                return vec![failure.1];
            }
            failures.push(failure);
        }
    }

    failures.sort_by_key(|(index, _)| *index);
    failures.into_iter().map(|(_, violation)| violation).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Probe stub with scripted outcomes per URI suffix.
    struct ScriptedProbe;

    #[async_trait]
    impl ReachabilityProbe for ScriptedProbe {
        async fn probe(&self, uri: &str) -> ProbeOutcome {
            if uri.ends_with("missing.png") {
                ProbeOutcome::BadStatus(404)
            } else if uri.ends_with("dead.png") {
                ProbeOutcome::Failed("connection refused".into())
            } else {
                ProbeOutcome::Reachable
            }
        }
    }

    fn token(symbol: &str, logo: &str) -> TokenRecord {
        TokenRecord {
            chain_id: 89898,
            address: format!("0x{:040x}", symbol.len()),
            name: symbol.to_string(),
            symbol: symbol.to_string(),
            decimals: 18,
            logo_uri: logo.to_string(),
        }
    }

    #[tokio::test]
    async fn test_all_reachable_yields_no_violations() {
        let tokens = vec![
            token("FOO", "https://img.example/foo.png"),
            token("BAR", "https://img.example/bar.png"),
        ];
        let violations =
            probe_tokens(Arc::new(ScriptedProbe), &tokens, DEFAULT_CONCURRENCY, false).await;
        assert!(violations.is_empty());
    }

    #[tokio::test]
    async fn test_failures_ordered_by_record_position() {
        let tokens = vec![
            token("FOO", "https://img.example/foo.png"),
            token("GONE", "https://img.example/missing.png"),
            token("DEAD", "https://img.example/dead.png"),
        ];
        let violations = probe_tokens(Arc::new(ScriptedProbe), &tokens, 2, false).await;
        assert_eq!(violations.len(), 2);
        match &violations[0] {
            Violation::UnreachableLogo { symbol, reason, .. } => {
                assert_eq!(symbol, "GONE");
                assert_eq!(reason, "status 404");
            }
            other => panic!("expected UnreachableLogo, got {other:?}"),
        }
        match &violations[1] {
            Violation::UnreachableLogo { symbol, reason, .. } => {
                assert_eq!(symbol, "DEAD");
                assert!(reason.contains("connection refused"));
            }
            other => panic!("expected UnreachableLogo, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fail_fast_returns_single_violation() {
        let tokens = vec![
            token("GONE", "https://img.example/missing.png"),
            token("DEAD", "https://img.example/dead.png"),
        ];
        let violations = probe_tokens(Arc::new(ScriptedProbe), &tokens, 1, true).await;
        assert_eq!(violations.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_token_list() {
        let violations =
            probe_tokens(Arc::new(ScriptedProbe), &[], DEFAULT_CONCURRENCY, true).await;
        assert!(violations.is_empty());
    }

    #[tokio::test]
    async fn test_http_probe_rejects_invalid_uri() {
        let probe = HttpProbe::with_default_timeout().unwrap();
        let outcome = probe.probe("not a uri").await;
        assert!(matches!(outcome, ProbeOutcome::Failed(_)));
    }
}
