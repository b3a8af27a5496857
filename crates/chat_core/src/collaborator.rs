//! Capabilities the controller drives. The core never touches presentation
//! or I/O directly; front ends and tests plug in their own implementations.

use crate::{Message, MessageContent, QueryRequest, StatusNotice};

/// Paints the chat panel.
pub trait RenderingCollaborator {
    /// `MessageContent::Plain` must be escaped before it reaches any markup surface.
    fn append_message(&mut self, message: &Message, content: &MessageContent);
    fn set_notice(&mut self, notice: Option<&StatusNotice>);
    fn set_submission_affordance(&mut self, enabled: bool);
    fn set_typing_indicator(&mut self, visible: bool);
}

/// Reads and clears the query/email fields.
pub trait InputCollaborator {
    fn read_query(&self) -> String;
    fn read_email(&self) -> String;
    fn clear_query(&mut self);
}

/// Starts delivery of a query. The settle signal comes back later through
/// [`crate::InteractionController::response_arrived`].
pub trait TransportCollaborator {
    fn send_query(&mut self, request: QueryRequest);
}
