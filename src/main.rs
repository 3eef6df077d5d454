//! MiniCraft headless driver
//!
//! Main entry point that delegates to the app module.

mod app;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting MiniCraft...");
    if let Err(e) = app::run() {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
