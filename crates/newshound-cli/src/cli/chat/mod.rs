//! Interactive chat session against the news backend.

mod banner;
mod commands;
mod input;
mod loop_runner;
mod render;

pub use loop_runner::run_chat_loop;
