use std::process::ExitCode;

use common::utils::service::{build_runtime, init_service};
use tracing::{error, info};

fn main() -> ExitCode {
    let ctx = init_service("json_server", env!("CARGO_PKG_VERSION"));

    let cfg = match configs::AppConfig::load_or_env() {
        Ok(cfg) => cfg.json_server,
        Err(e) => {
            error!(service = ctx.service, event = "config_failed", error = %e, "cannot load configuration");
            return ExitCode::FAILURE;
        }
    };

    let rt = match build_runtime(cfg.worker_threads) {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = ctx.service, event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    match rt.block_on(server::run_json(cfg)) {
        Ok(()) => {
            info!(service = ctx.service, event = "stop", service_id = %ctx.service_id, pid = ctx.pid, "server stopped normally");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = ctx.service, event = "run_failed", error = %e, "json server exited with error");
            ExitCode::FAILURE
        }
    }
}
