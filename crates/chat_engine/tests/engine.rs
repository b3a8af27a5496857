use std::sync::{Arc, Mutex};
use std::time::Duration;

use chat_engine::{
    EngineEvent, EngineHandle, FailureKind, QueryBody, QueryResponse, Transport, TransportError,
};

#[derive(Default)]
struct ScriptedTransport {
    seen: Mutex<Vec<QueryBody>>,
}

#[async_trait::async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, body: &QueryBody) -> Result<QueryResponse, TransportError> {
        self.seen.lock().unwrap().push(body.clone());
        Ok(QueryResponse {
            success: true,
            recommendation: Some(format!("answer to {}", body.query)),
        })
    }
}

#[test]
fn engine_reports_completion_with_request_id() {
    let transport = Arc::new(ScriptedTransport::default());
    let engine = EngineHandle::with_transport(transport.clone());

    engine.send(
        42,
        QueryBody {
            query: "monitor".to_string(),
            email: String::new(),
        },
    );

    let event = engine
        .recv_timeout(Duration::from_secs(5))
        .expect("completion event");
    assert_eq!(
        event,
        EngineEvent::QueryCompleted {
            request_id: 42,
            result: Ok(QueryResponse {
                success: true,
                recommendation: Some("answer to monitor".to_string()),
            }),
        }
    );
    assert_eq!(transport.seen.lock().unwrap().len(), 1);
    assert!(engine.try_recv().is_none());
}

#[test]
fn engine_surfaces_connection_failures() {
    // Port 9 (discard) on localhost is expected to refuse connections.
    let engine = EngineHandle::new(chat_engine::TransportSettings {
        endpoint: "http://127.0.0.1:9/api/query".to_string(),
        connect_timeout: Duration::from_secs(2),
        ..Default::default()
    });
    engine.send(
        1,
        QueryBody {
            query: "x".to_string(),
            email: String::new(),
        },
    );

    match engine.recv_timeout(Duration::from_secs(10)) {
        Some(EngineEvent::QueryCompleted { request_id, result }) => {
            assert_eq!(request_id, 1);
            let err = result.expect_err("connection should fail");
            assert!(matches!(
                err.kind,
                FailureKind::Network | FailureKind::Timeout
            ));
        }
        None => panic!("no completion event"),
    }
}
