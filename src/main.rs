use pubsub_probe::config::Config;
use pubsub_probe::probe;

// RUST_LOG=debug pubsub-probe --ws-url ws://localhost:8900
#[tokio::main]
async fn main() {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "info");
    }

    setup_tracing();

    let config = Config::parse();

    // A silent endpoint still counts as a completed probe; only transport
    // failures exit non-zero.
    if let Err(e) = probe::run(&config).await {
        tracing::error!("{e:#}");
        std::process::exit(1);
    }
}

fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
