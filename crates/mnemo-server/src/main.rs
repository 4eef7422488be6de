use mnemo_server::ServerBuilder;
use tracing_subscriber::prelude::*;

fn setup_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mnemo_server=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_file(false)
                .with_target(false),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logging();

    let addr =
        std::env::var("MNEMO_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".into());

    let server = ServerBuilder::new().bind(&addr).build().await?;
    tracing::info!(%addr, "mnemo listening");

    server.run().await?;
    Ok(())
}
