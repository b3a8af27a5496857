use crate::view_model::{ChatViewModel, SUBMIT_LABEL_BUSY, SUBMIT_LABEL_IDLE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    AwaitingResponse,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn as_str(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

/// A chat entry. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
        }
    }
}

/// What the renderer paints for a message.
///
/// `Plain` must be escaped by the renderer; `Markup` is trusted formatter output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageContent {
    Plain(String),
    Markup(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Processing,
}

impl NoticeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
            NoticeKind::Processing => "processing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusNotice {
    pub text: String,
    pub kind: NoticeKind,
}

impl StatusNotice {
    pub fn new(kind: NoticeKind, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

/// Outbound payload; `email` is empty when none was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub query: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    submission: SubmissionState,
    messages: Vec<Message>,
    notice: Option<StatusNotice>,
    /// Email captured at submit time, used to word the success notice.
    pending_email: String,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> ChatViewModel {
        let accepting = self.submission != SubmissionState::AwaitingResponse;
        ChatViewModel {
            submission: self.submission,
            messages: self.messages.clone(),
            notice: self.notice.clone(),
            submit_enabled: accepting,
            submit_label: if accepting {
                SUBMIT_LABEL_IDLE
            } else {
                SUBMIT_LABEL_BUSY
            },
            typing_visible: self.submission == SubmissionState::AwaitingResponse,
            show_empty_state: self.messages.is_empty(),
        }
    }

    pub fn submission(&self) -> SubmissionState {
        self.submission
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn notice(&self) -> Option<&StatusNotice> {
        self.notice.as_ref()
    }

    /// Returns whether state changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_submission(&mut self, next: SubmissionState) {
        if self.submission != next {
            self.submission = next;
            self.dirty = true;
        }
    }

    pub(crate) fn push_message(&mut self, message: Message) {
        self.messages.push(message);
        self.dirty = true;
    }

    pub(crate) fn set_notice(&mut self, notice: Option<StatusNotice>) {
        if self.notice != notice {
            self.notice = notice;
            self.dirty = true;
        }
    }

    pub(crate) fn set_pending_email(&mut self, email: String) {
        self.pending_email = email;
    }

    pub(crate) fn take_pending_email(&mut self) -> String {
        std::mem::take(&mut self.pending_email)
    }
}
