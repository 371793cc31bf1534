use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;
use teloxide::prelude::*;

use granobot::cli::{Cli, Commands};
use granobot::core::{config, diagnostics, init_logger, log_drive_configuration};
use granobot::flow::SessionStore;
use granobot::storage::FolderSink;
use granobot::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to the appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    init_logger()?;

    // Load environment variables from .env if present
    let _ = dotenv();

    match cli.command {
        Some(Commands::Run) | None => run_bot().await,
        Some(Commands::Estado) => {
            println!("{}", diagnostics::build_status_report());
            Ok(())
        }
    }
}

async fn run_bot() -> Result<()> {
    log::info!("Starting bot...");

    // Log uploads/Drive configuration at startup
    log_drive_configuration();

    let bot = create_bot()?;

    let bot_info = bot
        .get_me()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to the Bot API: {}", e))?;
    log::info!("Bot username: {:?}, Bot ID: {}", bot_info.username, bot_info.id);

    setup_bot_commands(&bot).await?;

    let sessions = Arc::new(SessionStore::new());

    // Sweep abandoned upload sessions unless disabled via env
    if let Some(idle) = config::session::idle_timeout() {
        let _cleanup_handle = Arc::clone(&sessions).spawn_cleanup_task(config::session::cleanup_interval(), idle);
        log::info!("Session cleanup task started (idle timeout: {}s)", idle.as_secs());
    } else {
        log::info!("Session cleanup disabled (SESSION_IDLE_TIMEOUT_SECS=0)");
    }

    let sink = Arc::new(FolderSink::new(bot.clone()));
    let handler_deps = HandlerDeps::new(sessions, sink);

    // Create the dispatcher handler tree using the modular schema
    let handler = schema(handler_deps);

    log::info!("================================================");
    log::info!("☕ Bot listo - esperando mensajes");
    log::info!("================================================");

    {
        use teloxide::update_listeners::Polling;

        // Drop updates that queued up while the bot was down; stale flow
        // messages would otherwise land in brand-new sessions
        let listener = Polling::builder(bot.clone()).drop_pending_updates().build();

        Dispatcher::builder(bot, handler)
            .dependencies(DependencyMap::new())
            .enable_ctrlc_handler()
            .build()
            .dispatch_with_listener(
                listener,
                LoggingErrorHandler::with_custom_text("An error from the update listener"),
            )
            .await;
    }

    log::info!("Dispatcher shutdown gracefully");
    Ok(())
}
