//! Chat core: pure submission state machine and the response markup formatter.
mod collaborator;
mod controller;
mod effect;
pub mod markup;
mod msg;
mod state;
mod update;
mod view_model;

pub use collaborator::{InputCollaborator, RenderingCollaborator, TransportCollaborator};
pub use controller::InteractionController;
pub use effect::Effect;
pub use markup::{format_text, needs_formatting};
pub use msg::{Msg, QueryOutcome};
pub use state::{
    AppState, Message, MessageContent, NoticeKind, QueryRequest, Sender, StatusNotice,
    SubmissionState,
};
pub use update::update;
pub use view_model::{ChatViewModel, SUBMIT_LABEL_BUSY, SUBMIT_LABEL_IDLE};
