//! Guided upload flow: state machine and per-user session store

pub mod machine;
pub mod session;

pub use machine::{
    advance, CompletedUpload, DocumentSession, FlowInput, FlowState, FlowStep, OperationType, UploadedFile,
    CANCEL_TOKEN, CONFIRM_TOKEN, DECLINE_TOKEN,
};
pub use session::SessionStore;
