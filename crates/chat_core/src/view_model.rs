use crate::{Message, StatusNotice, SubmissionState};

pub const SUBMIT_LABEL_IDLE: &str = "Get Recommendations";
pub const SUBMIT_LABEL_BUSY: &str = "Processing...";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatViewModel {
    pub submission: SubmissionState,
    pub messages: Vec<Message>,
    pub notice: Option<StatusNotice>,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
    pub typing_visible: bool,
    /// Placeholder shown until the first message lands in the panel.
    pub show_empty_state: bool,
}
