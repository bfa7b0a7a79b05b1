use axum::extract::State;
use tracing::debug;

use crate::state::ServerState;

pub async fn ping(State(state): State<ServerState>) -> String {
    let count = state.counter.increment().await;
    debug!(count, "ping");
    format!("ping {} count:{}", state.origin, count)
}
