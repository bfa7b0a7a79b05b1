//! Concurrent GET smoke run against the ping endpoints of both local servers.

use std::sync::Arc;

use common::{fanout::fan_out, issuer::Issuer, utils::service::init_service};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let ctx = init_service("fanout", env!("CARGO_PKG_VERSION"));
    let cfg = configs::AppConfig::load_or_env()?.client;

    let issuer = Arc::new(Issuer::new(None)?);
    let results = fan_out(issuer, &cfg.ping_targets, cfg.fanout_rounds).await;

    let mut failed = 0usize;
    for res in &results {
        match &res.outcome {
            Ok(text) => println!("{text}"),
            Err(e) => {
                failed += 1;
                warn!(url = %res.url, error = %e, "call failed");
            }
        }
    }
    info!(service = ctx.service, event = "stop", calls = results.len(), failed, "fan-out complete");

    if failed > 0 {
        anyhow::bail!("{failed} of {} calls failed", results.len());
    }
    Ok(())
}
