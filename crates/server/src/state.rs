use std::sync::Arc;

use axum::extract::FromRef;

use crate::{counter::HitCounter, records::RecordSource};

/// State every server carries: its own hit counter and the origin it reports.
#[derive(Clone)]
pub struct ServerState {
    pub counter: Arc<HitCounter>,
    pub origin: Arc<str>,
}

impl ServerState {
    pub fn new(origin: impl Into<Arc<str>>) -> Self {
        Self {
            counter: Arc::new(HitCounter::new()),
            origin: origin.into(),
        }
    }
}

/// JSON server state: the shared part plus the record source.
#[derive(Clone)]
pub struct JsonState {
    pub server: ServerState,
    pub records: RecordSource,
}

impl FromRef<JsonState> for ServerState {
    fn from_ref(state: &JsonState) -> Self {
        state.server.clone()
    }
}

impl FromRef<JsonState> for RecordSource {
    fn from_ref(state: &JsonState) -> Self {
        state.records.clone()
    }
}
