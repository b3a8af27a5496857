use crate::{Message, MessageContent, QueryRequest, StatusNotice};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    AppendMessage {
        message: Message,
        content: MessageContent,
    },
    /// `None` hides the notice.
    SetNotice(Option<StatusNotice>),
    SetSubmissionAffordance { enabled: bool },
    SetTypingIndicator { visible: bool },
    ClearQueryInput,
    SendQuery(QueryRequest),
}
