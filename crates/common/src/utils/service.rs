//! Binary bootstrap shared by every entry point.

use tracing::{error, info};
use uuid::Uuid;

/// Non-sensitive identity of a running process, attached to lifecycle events.
#[derive(Debug, Clone, Copy)]
pub struct ServiceContext {
    pub service: &'static str,
    pub service_id: Uuid,
    pub pid: u32,
}

/// Load `.env`, initialise logging and install a panic hook that logs
/// through tracing. `LOG_FORMAT=json` switches to structured JSON output.
pub fn init_service(service: &'static str, version: &'static str) -> ServiceContext {
    // .env first so RUST_LOG and LOG_FORMAT take effect
    dotenvy::dotenv().ok();
    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => super::logging::init_logging_json(),
        _ => super::logging::init_logging_default(),
    }
    info!(service, event = "logger_init", "tracing subscriber initialized");

    let ctx = ServiceContext { service, service_id: Uuid::new_v4(), pid: std::process::id() };
    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = ctx.service,
            event = "panic",
            service_id = %ctx.service_id,
            pid = ctx.pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    info!(service, event = "start", service_id = %ctx.service_id, pid = ctx.pid, version, "service starting");
    ctx
}

/// Multi-threaded runtime, optionally with a fixed worker count.
pub fn build_runtime(worker_threads: Option<usize>) -> std::io::Result<tokio::runtime::Runtime> {
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads {
        builder.worker_threads(w);
    }
    builder.build()
}
