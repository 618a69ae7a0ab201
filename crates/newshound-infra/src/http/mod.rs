//! HTTP implementation of the chat gateway.

mod client;
mod types;

pub use client::HttpChatGateway;
