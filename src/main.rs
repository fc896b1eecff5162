use clap::Parser;
use line_notify::cli::{Cli, execute_command, init_logger_from_settings, load_and_merge_config};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_and_merge_config(&cli)?;
    init_logger_from_settings(&settings)?;
    tracing::debug!(version = line_notify::pkg_version(), ?settings, "Configuration loaded");

    // Ctrl-C aborts an in-flight request
    let ctx = CancellationToken::new();
    let signal_ctx = ctx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, cancelling");
            signal_ctx.cancel();
        }
    });

    execute_command(&cli, settings, ctx).await
}
