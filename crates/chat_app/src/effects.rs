use std::time::Duration;

use chat_core::{QueryOutcome, QueryRequest, TransportCollaborator};
use chat_engine::{EngineEvent, EngineHandle, QueryBody, QueryResponse, RequestId, TransportError};
use chat_logging::{chat_info, chat_warn, set_submission_id};

/// Bridges controller `SendQuery` effects to the background engine.
pub struct EngineTransport {
    engine: EngineHandle,
    next_request_id: RequestId,
}

impl EngineTransport {
    pub fn new(engine: EngineHandle) -> Self {
        Self {
            engine,
            next_request_id: 0,
        }
    }

    /// Waits up to `timeout` for the in-flight query to settle.
    pub fn poll(&self, timeout: Duration) -> Option<QueryOutcome> {
        match self.engine.recv_timeout(timeout)? {
            EngineEvent::QueryCompleted { request_id, result } => {
                set_submission_id(request_id);
                Some(classify(result))
            }
        }
    }
}

impl TransportCollaborator for EngineTransport {
    fn send_query(&mut self, request: QueryRequest) {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        set_submission_id(request_id);
        chat_info!(
            "SendQuery query_len={} has_email={}",
            request.query.len(),
            !request.email.is_empty()
        );
        self.engine.send(
            request_id,
            QueryBody {
                query: request.query,
                email: request.email,
            },
        );
    }
}

fn classify(result: Result<QueryResponse, TransportError>) -> QueryOutcome {
    match result {
        Ok(QueryResponse {
            success: true,
            recommendation: Some(text),
        }) => QueryOutcome::Recommendation(text),
        Ok(QueryResponse {
            success: true,
            recommendation: None,
        }) => {
            chat_warn!("Backend reported success without a recommendation");
            QueryOutcome::Rejected
        }
        Ok(QueryResponse { success: false, .. }) => {
            chat_info!("Backend reported failure");
            QueryOutcome::Rejected
        }
        Err(err) => {
            chat_warn!("Error processing query: {}", err);
            QueryOutcome::TransportFailed(err.to_string())
        }
    }
}
