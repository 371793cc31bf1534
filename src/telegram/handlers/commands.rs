//! Command handlers (/start, /documento, /estado, ...)

use indoc::indoc;
use teloxide::prelude::*;
use teloxide::types::Message;
use teloxide::utils::command::BotCommands;

use super::document::{cancel_flow, start_flow};
use super::types::{HandlerDeps, SenderInfo};
use crate::core::diagnostics::build_status_report;
use crate::core::error::AppResult;
use crate::telegram::bot::Command;
use crate::telegram::Bot;

const WELCOME_TEXT: &str = indoc! {"
    ☕ ¡Hola! Soy el bot de documentos de la tostaduría.

    📄 Usa /documento para registrar el comprobante de pago de una compra o venta.
    ❓ Usa /ayuda para ver todos los comandos.
"};

pub(super) async fn handle_start_command(bot: &Bot, msg: &Message) -> AppResult<()> {
    bot.send_message(msg.chat.id, WELCOME_TEXT).await?;
    Ok(())
}

pub(super) async fn handle_documento_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> AppResult<()> {
    let Some(sender) = SenderInfo::from_message(msg) else {
        return Ok(());
    };
    log::info!("User {} ({}) entered the upload flow", sender.user_id, sender.display_name);
    start_flow(bot, deps, msg.chat.id, &sender).await
}

pub(super) async fn handle_cancelar_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> AppResult<()> {
    let Some(sender) = SenderInfo::from_message(msg) else {
        return Ok(());
    };
    cancel_flow(bot, deps, msg.chat.id, sender.user_id).await
}

pub(super) async fn handle_estado_command(bot: &Bot, msg: &Message) -> AppResult<()> {
    bot.send_message(msg.chat.id, build_status_report()).await?;
    Ok(())
}

pub(super) async fn handle_ayuda_command(bot: &Bot, msg: &Message) -> AppResult<()> {
    bot.send_message(msg.chat.id, Command::descriptions().to_string()).await?;
    Ok(())
}
