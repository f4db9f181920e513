use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn init_logging(cfg: Option<&configs::AppConfig>) {
    match cfg.map(|c| c.logging.format) {
        Some(configs::LogFormat::Json) => common::utils::logging::init_logging_json(),
        _ => common::utils::logging::init_logging_default(),
    }
    info!(service = "lawdesk", event = "logger_init", "tracing subscriber initialized");
}

fn main() -> std::process::ExitCode {
    // 提前加载 .env，使得 RUST_LOG、DATABASE_URL 等环境变量生效
    dotenv().ok();
    let cfg = configs::AppConfig::load();
    init_logging(cfg.as_ref().ok());
    let cfg = match cfg {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "lawdesk", event = "config_invalid", error = %e, "no usable configuration");
            return std::process::ExitCode::FAILURE;
        }
    };

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new({
        let service_id = service_id;
        move |info| {
            error!(
                service = "lawdesk",
                event = "panic",
                %service_id,
                pid,
                message = %info,
                "unhandled panic occurred"
            );
        }
    }));

    // 线程数：config.toml，其次环境变量 TOKIO_WORKER_THREADS
    let worker_threads = cfg.server.worker_threads;

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "lawdesk", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "lawdesk",
        event = "start",
        %service_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        "lawdesk server starting"
    );

    // server::run 内部处理 Ctrl+C 优雅停机
    rt.block_on(async move {
        match server::run(cfg).await {
            Ok(()) => {
                info!(service = "lawdesk", event = "stop", %service_id, pid, "server stopped normally");
                std::process::ExitCode::SUCCESS
            }
            Err(e) => {
                error!(service = "lawdesk", event = "run_failed", error = %e, "server::run returned error");
                std::process::ExitCode::FAILURE
            }
        }
    })
}
