use std::sync::Arc;

use sitebrowse::config::{self, AppState};
use sitebrowse::{logger, server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Optional config file path as the only argument
    let cfg = match std::env::args().nth(1) {
        Some(path) => config::Config::load_from(&path)?,
        None => config::Config::load()?,
    };
    logger::init(&cfg)?;

    // Create Tokio runtime, sized by the workers setting
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let state = match AppState::new(cfg).await {
        Ok(state) => Arc::new(state),
        Err(e) => {
            logger::log_error(&e.to_string());
            return Err(e.into());
        }
    };

    server::run(state).await
}
