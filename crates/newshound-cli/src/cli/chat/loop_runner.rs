//! Main chat loop orchestration.
//!
//! Bootstraps the conversation (session identity, registration, history
//! hydration), then drives the controller from a single `select!` loop
//! over user input and submission completions. Submissions run in
//! spawned tasks, so the prompt stays live while an answer is pending --
//! which is also what lets `/reset` work mid-request.

use std::sync::Arc;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use newshound_core::conversation::{
    ControllerEvent, ConversationController, MAX_MESSAGE_CHARS, Phase, SubmitDisposition,
};
use newshound_core::gateway::ChatGateway;
use newshound_infra::http::HttpChatGateway;
use newshound_infra::store::FileSessionStore;
use newshound_types::chat::Role;

use crate::cli::{session, status};
use crate::state::AppState;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::render;

type Controller = ConversationController<HttpChatGateway, FileSessionStore>;

/// Run the interactive chat loop.
pub async fn run_chat_loop(state: &AppState) -> anyhow::Result<()> {
    let (mut controller, mut events) =
        ConversationController::new(Arc::clone(&state.gateway), state.identity());

    let boot_spinner = spinner_bar("connecting...");
    controller.bootstrap().await;
    boot_spinner.finish_and_clear();

    let snapshot = controller.snapshot();
    if snapshot.phase == Phase::Errored {
        // Backend or storage unreachable. Keep the loop alive so /reset
        // can recover once the backend is back.
        if let Some(message) = &snapshot.error {
            render::print_error_banner(message);
        }
    } else {
        let prefix = snapshot.session_prefix.unwrap_or_default();
        print_welcome_banner(&state.config.api_url, &prefix, snapshot.turns.len());

        if snapshot.turns.is_empty() {
            render::print_empty_state();
        } else {
            for turn in &snapshot.turns {
                render::print_turn(turn);
            }
            println!();
        }
    }

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) =
        ChatInput::new(prompt).map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    // Spinner for the in-flight submission, if any.
    let mut spinner: Option<ProgressBar> = None;

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break; };
                handle_completion(&mut controller, event, &mut spinner);
            }

            input = chat_input.read_line() => {
                match input {
                    InputEvent::Eof => {
                        println!("\n  {}", style("Session ended.").dim());
                        break;
                    }
                    InputEvent::Interrupted => {
                        println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                        continue;
                    }
                    InputEvent::Message(text) => {
                        if text.is_empty() {
                            continue;
                        }
                        if let Some(cmd) = commands::parse(&text) {
                            let exit = handle_command(
                                state,
                                &mut controller,
                                cmd,
                                &mut chat_input,
                                &mut spinner,
                            )
                            .await;
                            if exit {
                                break;
                            }
                            continue;
                        }
                        dispatch_submit(&mut controller, &text, &mut spinner);
                    }
                }
            }
        }
    }

    Ok(())
}

/// Apply a submission completion and render what it produced.
fn handle_completion(
    controller: &mut Controller,
    event: ControllerEvent,
    spinner: &mut Option<ProgressBar>,
) {
    let before = controller.transcript().len();
    controller.apply(event);

    // Nothing appended: a stale completion was discarded. Leave the
    // spinner alone; it belongs to a newer request if one is in flight.
    if controller.transcript().len() == before {
        return;
    }

    if let Some(bar) = spinner.take() {
        bar.finish_and_clear();
    }

    match controller.phase() {
        Phase::Ready => {
            if let Some(turn) = controller.transcript().turns().last() {
                println!();
                render::print_turn(turn);
                render::print_reply_footer(turn);
                println!();
            }
        }
        Phase::Errored => {
            if let Some(turn) = controller.transcript().turns().last() {
                println!();
                render::print_turn(turn);
            }
            if let Some(message) = controller.last_error() {
                render::print_error_banner(message);
            }
        }
        _ => {}
    }
}

/// Hand user text to the controller and show the outcome.
fn dispatch_submit(controller: &mut Controller, text: &str, spinner: &mut Option<ProgressBar>) {
    match controller.submit(text) {
        SubmitDisposition::Dispatched => {
            let chars = text.chars().count();
            if chars >= MAX_MESSAGE_CHARS * 9 / 10 {
                println!("  {}", style(format!("{chars}/{MAX_MESSAGE_CHARS}")).dim());
            }
            *spinner = Some(spinner_bar("thinking..."));
        }
        SubmitDisposition::EmptyInput => {}
        SubmitDisposition::OverLength { chars } => {
            println!(
                "\n  {} Message too long: {chars}/{MAX_MESSAGE_CHARS} characters.\n",
                style("!").yellow().bold()
            );
        }
        SubmitDisposition::RequestInFlight => {
            println!(
                "\n  {} Still waiting on the previous answer.\n",
                style("!").yellow().bold()
            );
        }
        SubmitDisposition::Faulted => {
            println!(
                "\n  {} Chat is disabled due to error. Use /reset to continue.\n",
                style("!").red().bold()
            );
        }
        SubmitDisposition::NotReady => {
            println!(
                "\n  {} Still connecting; one moment.\n",
                style("!").yellow().bold()
            );
        }
    }
}

/// Execute a slash command. Returns `true` when the loop should exit.
async fn handle_command(
    state: &AppState,
    controller: &mut Controller,
    command: ChatCommand,
    chat_input: &mut ChatInput,
    spinner: &mut Option<ProgressBar>,
) -> bool {
    match command {
        ChatCommand::Help => commands::print_help(),

        ChatCommand::Clear => chat_input.clear(),

        ChatCommand::Exit => {
            println!("\n  {}", style("Session ended.").dim());
            return true;
        }

        ChatCommand::Reset => {
            // An in-flight request keeps running; its completion will be
            // discarded as stale once the session changes.
            if let Some(bar) = spinner.take() {
                bar.finish_and_clear();
            }
            let bar = spinner_bar("resetting...");
            controller.reset().await;
            bar.finish_and_clear();

            if controller.phase() == Phase::Ready {
                let prefix = controller
                    .session()
                    .map(|id| id.prefix().to_string())
                    .unwrap_or_default();
                println!(
                    "\n  {} Fresh session: {}\n",
                    style("✓").green().bold(),
                    style(format!("{prefix}...")).cyan()
                );
                render::print_empty_state();
            } else if let Some(message) = controller.last_error() {
                render::print_error_banner(message);
            }
        }

        ChatCommand::Status => match state.gateway.fetch_status().await {
            Ok(system) => status::print_status(&system, &state.config.api_url),
            Err(err) => println!("\n  {} {err}\n", style("!").red().bold()),
        },

        ChatCommand::Session => match controller.session() {
            Some(id) => match state.gateway.session_info(id).await {
                Ok(info) => session::print_session_info(&info),
                Err(err) => println!("\n  {} {err}\n", style("!").red().bold()),
            },
            None => println!("\n  {} No active session.\n", style("!").yellow().bold()),
        },

        ChatCommand::History => {
            if controller.transcript().is_empty() {
                println!("\n  {}\n", style("No messages yet.").dim());
            } else {
                println!();
                for turn in controller.transcript().turns() {
                    render::print_turn(turn);
                }
                println!();
            }
        }

        ChatCommand::Sources => {
            let sources = controller
                .transcript()
                .turns()
                .iter()
                .rev()
                .find(|turn| turn.role == Role::Assistant && !turn.failed)
                .map(|turn| turn.sources.as_slice())
                .unwrap_or_default();
            render::print_sources(sources);
        }

        ChatCommand::Dismiss => {
            if controller.last_error().is_some() {
                controller.dismiss_banner();
                println!(
                    "\n  {}\n",
                    style("Error hidden. Chat stays locked until /reset.").dim()
                );
            } else {
                println!("\n  {}\n", style("No error to dismiss.").dim());
            }
        }

        ChatCommand::Unknown(name) => {
            println!(
                "\n  {} Unknown command: {}. Type /help for available commands.\n",
                style("?").yellow().bold(),
                style(name).dim()
            );
        }
    }

    false
}

fn spinner_bar(message: &'static str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}
