use clap::Parser as _;
use lpalloc::BaseArgs;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    // Solutions go to stdout, so diagnostics are written to stderr. The
    // verbosity is controlled with RUST_LOG, e.g. RUST_LOG=lpa_solver=debug.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = BaseArgs::parse();
    args.evaluate().await
}
