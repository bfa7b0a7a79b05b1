//! Concurrent GET fan-out: spawn every call, then wait for all of them.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::{issuer::Issuer, CoreError};

#[derive(Debug)]
pub struct FanOutResult {
    pub url: String,
    pub outcome: Result<String, CoreError>,
}

/// Issue `rounds` GETs against every url concurrently.
///
/// Results come back in completion order. A failed call is recorded in its
/// own result and never cancels the others.
pub async fn fan_out(issuer: Arc<Issuer>, urls: &[String], rounds: usize) -> Vec<FanOutResult> {
    let mut set = JoinSet::new();
    for _ in 0..rounds {
        for url in urls {
            let issuer = Arc::clone(&issuer);
            let url = url.clone();
            set.spawn(async move {
                let outcome = issuer.get(&url, &[]).await.map(|resp| resp.text());
                FanOutResult { url, outcome }
            });
        }
    }

    let mut results = Vec::with_capacity(rounds * urls.len());
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(res) => results.push(res),
            Err(e) => warn!(error = %e, "fan-out task did not complete"),
        }
    }
    info!(calls = results.len(), "fan-out finished");
    results
}

/// True when `text` reads `ping http://localhost:<port> count:<n>` with `n > 0`.
pub fn is_ping_line(text: &str) -> bool {
    let Some(rest) = text.strip_prefix("ping http://localhost:") else {
        return false;
    };
    let Some((port, count)) = rest.split_once(" count:") else {
        return false;
    };
    let port_ok = !port.is_empty() && port.parse::<u16>().is_ok();
    let count_ok = count.chars().all(|c| c.is_ascii_digit()) && count.parse::<u64>().map(|n| n > 0).unwrap_or(false);
    port_ok && count_ok
}
