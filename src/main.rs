use std::sync::Arc;

mod config;
mod handler;
mod http;
mod logger;
mod server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = match config::ServerConfig::resolve() {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            logger::log_error(&format!(
                "Document root '{}' not found: {e}",
                config::DOCUMENT_ROOT
            ));
            return Err(e.into());
        }
    };

    let addr = config::ServerConfig::socket_addr();
    let listener = match server::bind_listener(addr) {
        Ok(listener) => listener,
        Err(e) => {
            logger::log_bind_failed(&addr, &e);
            return Err(e.into());
        }
    };

    logger::log_server_start(config::PORT, cfg.document_root());

    server::run(listener, cfg).await?;
    Ok(())
}
