//! Guided payment-document upload conversation
//!
//! Renders the flow state machine to Telegram: prompts with reply keyboards,
//! one inbound message per transition, acknowledgment on every terminal
//! outcome. Internal failures never reach the chat as raw errors — the user
//! gets the maintenance notice and the session is dropped.

use teloxide::dispatching::UpdateFilterExt;
use teloxide::prelude::*;
use teloxide::types::{KeyboardButton, KeyboardMarkup, Message, ReplyMarkup};

use super::types::{HandlerDeps, HandlerError, SenderInfo};
use crate::core::error::AppResult;
use crate::flow::{
    advance, CompletedUpload, DocumentSession, FlowInput, FlowState, FlowStep, UploadedFile, CANCEL_TOKEN,
    CONFIRM_TOKEN, DECLINE_TOKEN,
};
use crate::telegram::Bot;

/// Shown when an input handler fails unexpectedly. Raw detail stays in the
/// internal log.
pub(super) const MAINTENANCE_TEXT: &str =
    "😔 El bot está en mantenimiento. Por favor envía el documento directamente al administrador.";

const CANCELLED_TEXT: &str = "✅ Registro cancelado. No se subió ningún documento.";

const DECLINED_TEXT: &str = "✅ Entendido, no se subió el documento. Usa /documento para empezar de nuevo.";

/// Prompt text for a state, echoing collected values where the state calls
/// for it.
pub(super) fn prompt_text(state: FlowState, session: &DocumentSession) -> String {
    match state {
        FlowState::SelectType => "📄 ¿Qué tipo de operación quieres registrar?".to_string(),
        FlowState::SelectId => "🔢 Escribe el identificador de la operación (por ejemplo PED-2024-001):".to_string(),
        FlowState::UploadFile => "📎 Envía el documento de pago (foto o archivo):".to_string(),
        FlowState::Confirm => {
            let tipo = session
                .operation_type
                .map(|t| t.to_string())
                .unwrap_or_else(|| "—".to_string());
            let operacion = session.operation_id.as_deref().unwrap_or("—");
            let archivo = session
                .file
                .as_ref()
                .and_then(|f| f.file_name.as_deref())
                .unwrap_or("documento recibido");
            format!(
                "🔍 Revisa antes de subir:\n\n\
                 • Tipo: {}\n\
                 • Operación: {}\n\
                 • Archivo: {}\n\n\
                 ¿Subo el documento?",
                tipo, operacion, archivo
            )
        }
    }
}

/// Reply keyboard for a state. Every non-terminal state offers the cancel
/// button.
pub(super) fn keyboard_for(state: FlowState) -> KeyboardMarkup {
    let rows: Vec<Vec<KeyboardButton>> = match state {
        FlowState::SelectType => vec![
            vec![KeyboardButton::new("COMPRA"), KeyboardButton::new("VENTA")],
            vec![KeyboardButton::new(CANCEL_TOKEN)],
        ],
        FlowState::SelectId | FlowState::UploadFile => vec![vec![KeyboardButton::new(CANCEL_TOKEN)]],
        FlowState::Confirm => vec![
            vec![KeyboardButton::new(CONFIRM_TOKEN), KeyboardButton::new(DECLINE_TOKEN)],
            vec![KeyboardButton::new(CANCEL_TOKEN)],
        ],
    };
    KeyboardMarkup::new(rows).resize_keyboard()
}

async fn send_prompt(bot: &Bot, chat_id: ChatId, state: FlowState, session: &DocumentSession) -> AppResult<()> {
    bot.send_message(chat_id, prompt_text(state, session))
        .reply_markup(keyboard_for(state))
        .await?;
    Ok(())
}

/// Entry point: creates (or overwrites) the user's session and presents the
/// first prompt. Always succeeds unless the outbound channel fails.
pub(super) async fn start_flow(bot: &Bot, deps: &HandlerDeps, chat_id: ChatId, sender: &SenderInfo) -> AppResult<()> {
    if deps.sessions.contains(sender.user_id) {
        log::info!("User {} restarted the upload flow, discarding prior session", sender.user_id);
    }

    let session = DocumentSession::new(sender.user_id, sender.display_name.clone());
    send_prompt(bot, chat_id, FlowState::SelectType, &session).await?;
    deps.sessions.put(session);
    Ok(())
}

/// Cancels whatever flow the user has. Idempotent: acknowledges even when no
/// session exists.
pub(super) async fn cancel_flow(bot: &Bot, deps: &HandlerDeps, chat_id: ChatId, user_id: i64) -> AppResult<()> {
    if deps.sessions.remove(user_id).is_some() {
        log::info!("User {} cancelled the upload flow", user_id);
    }
    bot.send_message(chat_id, CANCELLED_TEXT)
        .reply_markup(ReplyMarkup::kb_remove())
        .await?;
    Ok(())
}

/// Maps an inbound message to a flow input. Documents win over photos; the
/// dispatcher filter guarantees one of the three is present.
pub(super) fn extract_flow_input(msg: &Message) -> Option<FlowInput> {
    if let Some(doc) = msg.document() {
        return Some(FlowInput::File(UploadedFile {
            file_id: doc.file.id.0.clone(),
            file_name: doc.file_name.clone(),
            mime_type: doc.mime_type.as_ref().map(|m| m.to_string()),
            size: Some(doc.file.size),
        }));
    }
    if let Some(photos) = msg.photo() {
        let photo = photos.iter().max_by_key(|p| p.width * p.height)?;
        return Some(FlowInput::File(UploadedFile {
            file_id: photo.file.id.0.clone(),
            file_name: None,
            mime_type: Some("image/jpeg".to_string()),
            size: Some(photo.file.size),
        }));
    }
    msg.text().map(|t| FlowInput::Text(t.to_string()))
}

/// Handler for messages that belong to an active upload session
pub(super) fn flow_message_handler(deps: HandlerDeps) -> teloxide::dispatching::UpdateHandler<HandlerError> {
    let deps_filter = deps.clone();

    Update::filter_message()
        .filter(move |msg: Message| {
            let has_payload = msg.text().is_some() || msg.document().is_some() || msg.photo().is_some();
            has_payload
                && SenderInfo::from_message(&msg)
                    .map(|sender| deps_filter.sessions.contains(sender.user_id))
                    .unwrap_or(false)
        })
        .endpoint(move |bot: Bot, msg: Message| {
            let deps = deps.clone();
            async move {
                let chat_id = msg.chat.id;
                let Some(sender) = SenderInfo::from_message(&msg) else {
                    return Ok(());
                };

                if let Err(e) = process_flow_message(&bot, &deps, &msg, &sender).await {
                    // Fail closed: drop the session, apologize, keep the
                    // detail out of the chat
                    log::error!("Upload flow failed for user {}: {:?}", sender.user_id, e);
                    deps.sessions.remove(sender.user_id);
                    let _ = bot
                        .send_message(chat_id, MAINTENANCE_TEXT)
                        .reply_markup(ReplyMarkup::kb_remove())
                        .await;
                }
                Ok(())
            }
        })
}

async fn process_flow_message(bot: &Bot, deps: &HandlerDeps, msg: &Message, sender: &SenderInfo) -> AppResult<()> {
    let chat_id = msg.chat.id;

    let Some(mut session) = deps.sessions.get(sender.user_id) else {
        // Session vanished between filter and endpoint (cleanup sweep)
        bot.send_message(chat_id, "Usa /documento para registrar un documento de pago.")
            .await?;
        return Ok(());
    };

    let Some(input) = extract_flow_input(msg) else {
        return Ok(());
    };

    match advance(&mut session, input) {
        FlowStep::Prompt(next) => {
            send_prompt(bot, chat_id, next, &session).await?;
            deps.sessions.put(session);
        }
        FlowStep::Reprompt(current) => {
            bot.send_message(chat_id, "🤔 No entendí esa respuesta.").await?;
            send_prompt(bot, chat_id, current, &session).await?;
            deps.sessions.put(session);
        }
        FlowStep::Cancelled => {
            deps.sessions.remove(sender.user_id);
            bot.send_message(chat_id, CANCELLED_TEXT)
                .reply_markup(ReplyMarkup::kb_remove())
                .await?;
        }
        FlowStep::Declined => {
            deps.sessions.remove(sender.user_id);
            bot.send_message(chat_id, DECLINED_TEXT)
                .reply_markup(ReplyMarkup::kb_remove())
                .await?;
        }
        FlowStep::Completed(upload) => {
            // The session is gone either way; only the acknowledgment text
            // depends on the sink result
            deps.sessions.remove(sender.user_id);
            let ack = submit_and_ack(deps, &upload).await;
            bot.send_message(chat_id, ack)
                .reply_markup(ReplyMarkup::kb_remove())
                .await?;
        }
    }

    Ok(())
}

async fn submit_and_ack(deps: &HandlerDeps, upload: &CompletedUpload) -> String {
    match deps.sink.submit(upload).await {
        Ok(stored) => {
            log::info!(
                "Document for {} {} stored at {:?} by {}",
                upload.operation_type,
                upload.operation_id,
                stored.path,
                upload.submitted_by
            );
            format!(
                "✅ Documento registrado para {} {}.\n¡Gracias, {}!",
                upload.operation_type, upload.operation_id, upload.submitted_by
            )
        }
        Err(e) => {
            log::error!(
                "Sink failed for {} {}: {:?}",
                upload.operation_type,
                upload.operation_id,
                e
            );
            "⚠️ No se pudo guardar el documento. Inténtalo de nuevo más tarde o revisa /estado.".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::OperationType;

    /// Helper: flatten keyboard button labels
    fn labels(keyboard: &KeyboardMarkup) -> Vec<Vec<String>> {
        keyboard
            .keyboard
            .iter()
            .map(|row| row.iter().map(|b| b.text.clone()).collect())
            .collect()
    }

    #[test]
    fn test_select_type_keyboard_offers_both_types_and_cancel() {
        let kb = keyboard_for(FlowState::SelectType);
        let rows = labels(&kb);
        assert_eq!(rows[0], vec!["COMPRA", "VENTA"]);
        assert_eq!(rows[1], vec![CANCEL_TOKEN]);
    }

    #[test]
    fn test_intermediate_states_keep_cancel_available() {
        for state in [FlowState::SelectId, FlowState::UploadFile] {
            let rows = labels(&keyboard_for(state));
            assert_eq!(rows, vec![vec![CANCEL_TOKEN.to_string()]]);
        }
    }

    #[test]
    fn test_confirm_keyboard_has_affirmative_negative_cancel() {
        let rows = labels(&keyboard_for(FlowState::Confirm));
        assert_eq!(rows[0], vec![CONFIRM_TOKEN, DECLINE_TOKEN]);
        assert_eq!(rows[1], vec![CANCEL_TOKEN]);
    }

    #[test]
    fn test_confirm_prompt_echoes_collected_values() {
        let mut session = DocumentSession::new(1, "maria");
        session.operation_type = Some(OperationType::Purchase);
        session.operation_id = Some("PED-2024-001".to_string());
        session.file = Some(UploadedFile {
            file_id: "x".to_string(),
            file_name: Some("recibo.pdf".to_string()),
            mime_type: None,
            size: None,
        });

        let text = prompt_text(FlowState::Confirm, &session);
        assert!(text.contains("COMPRA"));
        assert!(text.contains("PED-2024-001"));
        assert!(text.contains("recibo.pdf"));
    }

    #[test]
    fn test_prompts_are_spanish_and_nonempty() {
        let session = DocumentSession::new(1, "maria");
        for state in [FlowState::SelectType, FlowState::SelectId, FlowState::UploadFile] {
            assert!(!prompt_text(state, &session).is_empty());
        }
    }
}
