//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::{ChatKind, Message};

use super::commands::{
    handle_ayuda_command, handle_cancelar_command, handle_documento_command, handle_estado_command,
    handle_start_command,
};
use super::document::flow_message_handler;
use super::types::{HandlerDeps, HandlerError};
use crate::telegram::bot::Command;
use crate::telegram::Bot;

/// Creates the main dispatcher schema for the Telegram bot.
///
/// The same handler tree is used in production and in integration tests.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_commands = deps.clone();
    let deps_flow = deps.clone();

    dptree::entry()
        // Commands first: /documento restarts a flow, /cancelar aborts one
        .branch(command_handler(deps_commands))
        // Messages that belong to an active upload session
        .branch(flow_message_handler(deps_flow))
        // Anything else in a private chat gets a short hint
        .branch(fallback_handler())
}

/// Handler for bot commands (/start, /documento, /estado, ...)
fn command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message().branch(dptree::entry().filter_command::<Command>().endpoint(
        move |bot: Bot, msg: Message, cmd: Command| {
            let deps = deps.clone();
            async move {
                log::info!("Received command: {:?} from chat {}", cmd, msg.chat.id);

                let result = match cmd {
                    Command::Start => handle_start_command(&bot, &msg).await,
                    Command::Documento => handle_documento_command(&bot, &msg, &deps).await,
                    Command::Cancelar => handle_cancelar_command(&bot, &msg, &deps).await,
                    Command::Estado => handle_estado_command(&bot, &msg).await,
                    Command::Ayuda => handle_ayuda_command(&bot, &msg).await,
                };

                if let Err(e) = result {
                    log::error!("Command {:?} failed for chat {}: {:?}", cmd, msg.chat.id, e);
                }
                Ok(())
            }
        },
    ))
}

/// Hint for private-chat messages that match nothing else
fn fallback_handler() -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message| matches!(msg.chat.kind, ChatKind::Private(_)) && msg.text().is_some())
        .endpoint(|bot: Bot, msg: Message| async move {
            bot.send_message(msg.chat.id, "Usa /documento para registrar un documento de pago.")
                .await?;
            Ok(())
        })
}
