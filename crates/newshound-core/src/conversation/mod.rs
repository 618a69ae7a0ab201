//! Conversation state: the transcript log and the controller that
//! orchestrates it against the backend.

pub mod controller;
pub mod transcript;

pub use controller::{
    ControllerEvent, ConversationController, ConversationSnapshot, MAX_MESSAGE_CHARS, Phase,
    SubmitDisposition,
};
pub use transcript::Transcript;
