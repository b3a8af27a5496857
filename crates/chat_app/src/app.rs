use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use chat_core::{InteractionController, SubmissionState};
use chat_engine::EngineHandle;
use chat_logging::chat_info;

use crate::config::ChatConfig;
use crate::effects::EngineTransport;
use crate::input::{parse_line, InputLine, LineInput};
use crate::render::HtmlRenderer;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

type Controller<W> = InteractionController<HtmlRenderer<W>, LineInput, EngineTransport>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopControl {
    Continue,
    Quit,
}

pub fn run(config: &ChatConfig) -> anyhow::Result<()> {
    let engine = EngineHandle::new(config.transport_settings());
    let mut controller = InteractionController::new(
        HtmlRenderer::new(io::stdout()),
        LineInput::default(),
        EngineTransport::new(engine),
    );
    render_view(&mut controller);
    let lines = spawn_stdin_reader();

    loop {
        match lines.recv_timeout(POLL_INTERVAL) {
            Ok(line) => {
                let line = line.context("failed to read from stdin")?;
                if handle_line(&mut controller, &line) == LoopControl::Quit {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
        pump_responses(&mut controller, Duration::ZERO);
    }

    // Submissions always run to completion; there is no cancellation.
    settle_in_flight(&mut controller);
    chat_info!("Chat widget exiting");
    Ok(())
}

fn spawn_stdin_reader() -> mpsc::Receiver<io::Result<String>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let failed = line.is_err();
            if tx.send(line).is_err() || failed {
                break;
            }
        }
    });
    rx
}

fn handle_line<W: Write>(controller: &mut Controller<W>, line: &str) -> LoopControl {
    match parse_line(line) {
        InputLine::Quit => LoopControl::Quit,
        InputLine::Email(email) => {
            chat_info!(
                "Email field {}",
                if email.is_empty() { "cleared" } else { "set" }
            );
            controller.input_mut().set_email(email);
            LoopControl::Continue
        }
        InputLine::Query(query) => {
            controller.input_mut().set_query(query);
            controller.input_changed();
            if controller.state().submission() == SubmissionState::AwaitingResponse {
                chat_info!("Submit ignored while a query is in flight");
            }
            controller.submit();
            render_if_dirty(controller);
            LoopControl::Continue
        }
    }
}

fn pump_responses<W: Write>(controller: &mut Controller<W>, timeout: Duration) {
    loop {
        let outcome = controller.transport().poll(timeout);
        match outcome {
            Some(outcome) => {
                controller.response_arrived(outcome);
                render_if_dirty(controller);
            }
            None => break,
        }
    }
}

fn render_view<W: Write>(controller: &mut Controller<W>) {
    let view = controller.view();
    controller.renderer_mut().render_view(&view);
}

fn render_if_dirty<W: Write>(controller: &mut Controller<W>) {
    if controller.consume_dirty() {
        render_view(controller);
    }
}

fn settle_in_flight<W: Write>(controller: &mut Controller<W>) {
    while controller.state().submission() == SubmissionState::AwaitingResponse {
        pump_responses(controller, POLL_INTERVAL);
    }
}
