use std::net::SocketAddr;

use waypointer::config::Config;
use waypointer::engine::Engine;
use waypointer::server::{init_tracing, serve};

#[tokio::main]
async fn main() {
    init_tracing();

    let config = Config::load();
    let addr = SocketAddr::new(config.host, config.port);

    let engine = match Engine::new(config) {
        Ok(engine) => engine,
        Err(err) => {
            tracing::error!("failed to start: {}", err);
            std::process::exit(1);
        }
    };

    serve(engine, addr).await;
}
