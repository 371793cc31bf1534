//! Guided upload conversation state machine
//!
//! A fixed sequence of prompts collects an operation type, an operation
//! identifier, a file and a confirmation, then hands the result to the
//! document sink. Transitions are pure: the Telegram layer feeds one
//! [`FlowInput`] at a time and renders the returned [`FlowStep`]. Input that
//! doesn't match the current state never advances it — the same prompt is
//! presented again.

use strum::{Display, EnumString};

use crate::core::config::validation::MAX_OPERATION_ID_LENGTH;

/// Keyboard/cancel token recognized in every non-terminal state.
pub const CANCEL_TOKEN: &str = "❌ Cancelar";

/// Affirmative token at the confirmation step.
pub const CONFIRM_TOKEN: &str = "✅ Confirmar";

/// Negative token at the confirmation step.
pub const DECLINE_TOKEN: &str = "❌ No";

/// Business operation a payment document attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum OperationType {
    /// Coffee purchase from a supplier
    #[strum(serialize = "COMPRA")]
    Purchase,
    /// Coffee sale to a client
    #[strum(serialize = "VENTA")]
    Sale,
}

/// Stage of the guided conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    SelectType,
    SelectId,
    UploadFile,
    Confirm,
}

/// Reference to a file the user submitted, as Telegram reported it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_id: String,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
    pub size: Option<u32>,
}

/// One user's in-progress guided interaction.
///
/// Exists only while the conversation is unresolved; the session store drops
/// it on completion, cancellation or internal error.
#[derive(Debug, Clone)]
pub struct DocumentSession {
    pub user_id: i64,
    pub display_name: String,
    pub operation_type: Option<OperationType>,
    pub operation_id: Option<String>,
    pub file: Option<UploadedFile>,
    pub state: FlowState,
    /// Refreshed by the session store on every put; read by the idle sweep
    pub last_activity: std::time::Instant,
}

impl DocumentSession {
    pub fn new(user_id: i64, display_name: impl Into<String>) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            operation_type: None,
            operation_id: None,
            file: None,
            state: FlowState::SelectType,
            last_activity: std::time::Instant::now(),
        }
    }
}

/// One inbound user payload.
#[derive(Debug, Clone)]
pub enum FlowInput {
    Text(String),
    File(UploadedFile),
}

/// Everything the sink needs once the user has confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedUpload {
    pub user_id: i64,
    pub submitted_by: String,
    pub operation_type: OperationType,
    pub operation_id: String,
    pub file: UploadedFile,
}

/// Result of feeding one input to [`advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowStep {
    /// State advanced; present the prompt for the new state
    Prompt(FlowState),
    /// Input didn't match the current state; present its prompt again
    Reprompt(FlowState),
    /// Confirmation received; destroy the session and hand off to the sink
    Completed(CompletedUpload),
    /// Cancel token; destroy the session, no sink call
    Cancelled,
    /// Negative answer at the confirmation step; destroy the session
    Declined,
}

/// Feeds one user input into the session and returns the next step.
///
/// The cancel token terminates from any state. Everything else is matched
/// against the current state only; mismatches re-prompt without mutating the
/// session.
pub fn advance(session: &mut DocumentSession, input: FlowInput) -> FlowStep {
    if let FlowInput::Text(ref text) = input {
        if text.trim() == CANCEL_TOKEN {
            return FlowStep::Cancelled;
        }
    }

    match session.state {
        FlowState::SelectType => match input {
            FlowInput::Text(text) => match text.trim().parse::<OperationType>() {
                Ok(operation_type) => {
                    session.operation_type = Some(operation_type);
                    session.state = FlowState::SelectId;
                    FlowStep::Prompt(FlowState::SelectId)
                }
                Err(_) => FlowStep::Reprompt(FlowState::SelectType),
            },
            FlowInput::File(_) => FlowStep::Reprompt(FlowState::SelectType),
        },
        FlowState::SelectId => match input {
            FlowInput::Text(text) => {
                let id = text.trim();
                if id.is_empty() || id.chars().count() > MAX_OPERATION_ID_LENGTH {
                    FlowStep::Reprompt(FlowState::SelectId)
                } else {
                    session.operation_id = Some(id.to_string());
                    session.state = FlowState::UploadFile;
                    FlowStep::Prompt(FlowState::UploadFile)
                }
            }
            FlowInput::File(_) => FlowStep::Reprompt(FlowState::SelectId),
        },
        FlowState::UploadFile => match input {
            FlowInput::File(file) => {
                session.file = Some(file);
                session.state = FlowState::Confirm;
                FlowStep::Prompt(FlowState::Confirm)
            }
            FlowInput::Text(_) => FlowStep::Reprompt(FlowState::UploadFile),
        },
        FlowState::Confirm => match input {
            FlowInput::Text(text) => match text.trim() {
                CONFIRM_TOKEN => match (&session.operation_type, &session.operation_id, &session.file) {
                    (Some(operation_type), Some(operation_id), Some(file)) => {
                        FlowStep::Completed(CompletedUpload {
                            user_id: session.user_id,
                            submitted_by: session.display_name.clone(),
                            operation_type: *operation_type,
                            operation_id: operation_id.clone(),
                            file: file.clone(),
                        })
                    }
                    // Unreachable through the transitions above; treated as a
                    // mismatch so the user is never left without a prompt
                    _ => FlowStep::Reprompt(FlowState::Confirm),
                },
                DECLINE_TOKEN => FlowStep::Declined,
                _ => FlowStep::Reprompt(FlowState::Confirm),
            },
            FlowInput::File(_) => FlowStep::Reprompt(FlowState::Confirm),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_file() -> UploadedFile {
        UploadedFile {
            file_id: "BQACAgIAAxkBAAIBCGXx".to_string(),
            file_name: Some("recibo.pdf".to_string()),
            mime_type: Some("application/pdf".to_string()),
            size: Some(120_334),
        }
    }

    fn session() -> DocumentSession {
        DocumentSession::new(777, "maria")
    }

    #[test]
    fn test_happy_path_purchase() {
        let mut s = session();

        let step = advance(&mut s, FlowInput::Text("COMPRA".into()));
        assert_eq!(step, FlowStep::Prompt(FlowState::SelectId));
        assert_eq!(s.operation_type, Some(OperationType::Purchase));

        let step = advance(&mut s, FlowInput::Text("PED-2024-001".into()));
        assert_eq!(step, FlowStep::Prompt(FlowState::UploadFile));

        let step = advance(&mut s, FlowInput::File(sample_file()));
        assert_eq!(step, FlowStep::Prompt(FlowState::Confirm));

        let step = advance(&mut s, FlowInput::Text(CONFIRM_TOKEN.into()));
        let FlowStep::Completed(upload) = step else {
            panic!("expected Completed, got {:?}", step);
        };
        assert_eq!(upload.user_id, 777);
        assert_eq!(upload.submitted_by, "maria");
        assert_eq!(upload.operation_type, OperationType::Purchase);
        assert_eq!(upload.operation_id, "PED-2024-001");
        assert_eq!(upload.file, sample_file());
    }

    #[test]
    fn test_sale_token_parses() {
        let mut s = session();
        advance(&mut s, FlowInput::Text(" VENTA ".into()));
        assert_eq!(s.operation_type, Some(OperationType::Sale));
        assert_eq!(s.state, FlowState::SelectId);
    }

    #[test]
    fn test_invalid_type_leaves_state_untouched() {
        let mut s = session();
        let step = advance(&mut s, FlowInput::Text("TRUEQUE".into()));
        assert_eq!(step, FlowStep::Reprompt(FlowState::SelectType));
        assert_eq!(s.state, FlowState::SelectType);
        assert_eq!(s.operation_type, None);
    }

    #[test]
    fn test_file_during_type_selection_reprompts() {
        let mut s = session();
        let step = advance(&mut s, FlowInput::File(sample_file()));
        assert_eq!(step, FlowStep::Reprompt(FlowState::SelectType));
        assert_eq!(s.operation_type, None);
    }

    #[test]
    fn test_blank_operation_id_reprompts() {
        let mut s = session();
        advance(&mut s, FlowInput::Text("COMPRA".into()));
        let step = advance(&mut s, FlowInput::Text("   ".into()));
        assert_eq!(step, FlowStep::Reprompt(FlowState::SelectId));
        assert_eq!(s.operation_id, None);
    }

    #[test]
    fn test_oversized_operation_id_reprompts() {
        let mut s = session();
        advance(&mut s, FlowInput::Text("COMPRA".into()));
        let step = advance(&mut s, FlowInput::Text("X".repeat(MAX_OPERATION_ID_LENGTH + 1)));
        assert_eq!(step, FlowStep::Reprompt(FlowState::SelectId));
    }

    #[test]
    fn test_text_during_upload_reprompts() {
        let mut s = session();
        advance(&mut s, FlowInput::Text("VENTA".into()));
        advance(&mut s, FlowInput::Text("FAC-77".into()));
        let step = advance(&mut s, FlowInput::Text("aquí va el archivo".into()));
        assert_eq!(step, FlowStep::Reprompt(FlowState::UploadFile));
        assert_eq!(s.file, None);
    }

    #[test]
    fn test_cancel_from_every_state() {
        // SELECT_TYPE
        let mut s = session();
        assert_eq!(advance(&mut s, FlowInput::Text(CANCEL_TOKEN.into())), FlowStep::Cancelled);

        // SELECT_ID
        let mut s = session();
        advance(&mut s, FlowInput::Text("COMPRA".into()));
        assert_eq!(advance(&mut s, FlowInput::Text(CANCEL_TOKEN.into())), FlowStep::Cancelled);

        // UPLOAD_FILE
        let mut s = session();
        advance(&mut s, FlowInput::Text("COMPRA".into()));
        advance(&mut s, FlowInput::Text("PED-1".into()));
        assert_eq!(advance(&mut s, FlowInput::Text(CANCEL_TOKEN.into())), FlowStep::Cancelled);

        // CONFIRM
        let mut s = session();
        advance(&mut s, FlowInput::Text("COMPRA".into()));
        advance(&mut s, FlowInput::Text("PED-1".into()));
        advance(&mut s, FlowInput::File(sample_file()));
        assert_eq!(advance(&mut s, FlowInput::Text(CANCEL_TOKEN.into())), FlowStep::Cancelled);
    }

    #[test]
    fn test_decline_at_confirm() {
        let mut s = session();
        advance(&mut s, FlowInput::Text("VENTA".into()));
        advance(&mut s, FlowInput::Text("FAC-9".into()));
        advance(&mut s, FlowInput::File(sample_file()));
        assert_eq!(advance(&mut s, FlowInput::Text(DECLINE_TOKEN.into())), FlowStep::Declined);
    }

    #[test]
    fn test_unrecognized_text_at_confirm_reprompts() {
        let mut s = session();
        advance(&mut s, FlowInput::Text("VENTA".into()));
        advance(&mut s, FlowInput::Text("FAC-9".into()));
        advance(&mut s, FlowInput::File(sample_file()));
        let step = advance(&mut s, FlowInput::Text("sí".into()));
        assert_eq!(step, FlowStep::Reprompt(FlowState::Confirm));
        assert_eq!(s.state, FlowState::Confirm);
    }

    #[test]
    fn test_operation_type_set_iff_past_select_type() {
        let mut s = session();
        assert_eq!(s.state, FlowState::SelectType);
        assert!(s.operation_type.is_none());

        advance(&mut s, FlowInput::Text("COMPRA".into()));
        assert_ne!(s.state, FlowState::SelectType);
        assert!(s.operation_type.is_some());
    }
}
