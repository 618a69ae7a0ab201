//! Conversation orchestration for newshound.
//!
//! Owns the session and conversation state machine, and defines the trait
//! seams the infrastructure layer implements: [`gateway::ChatGateway`]
//! for the REST backend and [`session::SessionStore`] for durable
//! identity. No infrastructure dependencies.

pub mod conversation;
pub mod gateway;
pub mod session;
