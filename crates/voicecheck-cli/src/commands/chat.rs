//! The `voicecheck chat` command: a console stand-in for the chat client.
//!
//! Each stdin line is one message. `/start` greets, the button text or
//! `/question` asks, `/voice [handle]` sends a voice message, anything else
//! is plain text. Replies go to stdout; progress goes to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};

use voicecheck_core::model::{AudioHandle, UserId};
use voicecheck_core::replies;
use voicecheck_core::session::SessionState;
use voicecheck_core::{CycleReporter, FeedbackReport, InboundEvent};

/// Console cycle reporter.
struct ConsoleReporter;

impl CycleReporter for ConsoleReporter {
    fn on_question_issued(&self, _user: UserId, previous: SessionState) {
        if previous == SessionState::AwaitingResponse {
            eprintln!("  (question re-issued)");
        }
    }

    fn on_processing(&self, _user: UserId, _audio: &AudioHandle) {
        eprintln!("{}", replies::PROCESSING);
    }

    fn on_feedback(&self, _user: UserId, report: &FeedbackReport) {
        eprintln!(
            "  Done: {}% ({}/{}) confidence {}",
            report.evaluation.correctness_score.percent(),
            report.evaluation.correctness_score.matched(),
            report.evaluation.correctness_score.total(),
            report.confidence.level,
        );
    }

    fn on_rejected(&self, _user: UserId) {}
}

/// Map one console line to a chat event. Blank lines map to nothing.
fn parse_line(line: &str, first_name: &str, voice_counter: &mut u32) -> Option<InboundEvent> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let event = match command {
        "/start" => InboundEvent::Start {
            first_name: first_name.to_string(),
        },
        "/question" => InboundEvent::RequestQuestion,
        "/voice" => {
            *voice_counter += 1;
            let handle = if rest.is_empty() {
                format!("voice-{voice_counter}")
            } else {
                rest.to_string()
            };
            InboundEvent::SubmitResponse(AudioHandle::new(handle))
        }
        _ => InboundEvent::from_text(line),
    };
    Some(event)
}

pub async fn execute(config_path: Option<PathBuf>, user_id: u64, first_name: String) -> Result<()> {
    let (_, engine) = super::build_engine(config_path.as_deref())?;
    let user = UserId(user_id);
    let reporter = ConsoleReporter;

    tracing::info!(user = %user, recognizer = engine.recognizer_name(), "chat session started");
    eprintln!("Бот запущен...");
    eprintln!(
        "Commands: /start, /question (or '{}'), /voice [handle]; Ctrl-D to quit.",
        replies::QUESTION_BUTTON
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut voice_counter = 0u32;

    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let Some(event) = parse_line(&line, &first_name, &mut voice_counter) else {
            continue;
        };
        let reply = engine.handle(user, event, &reporter).await;
        println!("{}\n", reply.text());
    }

    engine.end_session(user);
    Ok(())
}
