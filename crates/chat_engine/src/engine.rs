use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use chat_logging::{chat_error, chat_info, set_submission_id};

use crate::transport::{ReqwestTransport, Transport, TransportSettings};
use crate::{EngineEvent, FailureKind, QueryBody, RequestId, TransportError};

enum EngineCommand {
    Send { request_id: RequestId, body: QueryBody },
}

/// Runs queries on a background tokio runtime and reports completions over a channel.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: TransportSettings) -> Self {
        Self::with_transport(Arc::new(ReqwestTransport::new(settings)))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    chat_error!("Failed to start transport runtime: {}", err);
                    fail_all(cmd_rx, event_tx, &err.to_string());
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let transport = transport.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(transport.as_ref(), command, event_tx).await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn send(&self, request_id: RequestId, body: QueryBody) {
        let _ = self.cmd_tx.send(EngineCommand::Send { request_id, body });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    transport: &dyn Transport,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Send { request_id, body } => {
            set_submission_id(request_id);
            let result = transport.send(&body).await;
            // The task may resume on another worker thread.
            set_submission_id(request_id);
            match &result {
                Ok(response) => chat_info!("Query settled success={}", response.success),
                Err(err) => chat_info!("Query failed: {}", err),
            }
            let _ = event_tx.send(EngineEvent::QueryCompleted { request_id, result });
        }
    }
}

fn fail_all(
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
    reason: &str,
) {
    while let Ok(EngineCommand::Send { request_id, .. }) = cmd_rx.recv() {
        let _ = event_tx.send(EngineEvent::QueryCompleted {
            request_id,
            result: Err(TransportError::new(FailureKind::Network, reason)),
        });
    }
}
