//! Chat engine: query transport and the background thread that runs it.
mod engine;
mod transport;
mod types;

pub use engine::EngineHandle;
pub use transport::{ReqwestTransport, Transport, TransportSettings};
pub use types::{EngineEvent, FailureKind, QueryBody, QueryResponse, RequestId, TransportError};
