use crate::markup::{format_text, needs_formatting};
use crate::{
    AppState, Effect, Message, MessageContent, Msg, NoticeKind, QueryOutcome, QueryRequest,
    StatusNotice, SubmissionState,
};

const NOTICE_EMPTY_QUERY: &str = "Please enter a query.";
const NOTICE_PROCESSING: &str = "Processing your request...";
const NOTICE_GENERATED: &str = "✓ Recommendation generated successfully!";
const NOTICE_RETRY: &str = "Failed to get recommendation. Please try again.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged => {
            // Only error notices are dismissed by typing.
            let showing_error =
                matches!(state.notice(), Some(notice) if notice.kind == NoticeKind::Error);
            if showing_error {
                state.set_notice(None);
                vec![Effect::SetNotice(None)]
            } else {
                Vec::new()
            }
        }
        Msg::Submit { query, email } => {
            // The disabled affordance is the only guard; late clicks are dropped, not queued.
            if state.submission() != SubmissionState::Idle {
                return (state, Vec::new());
            }
            submit(&mut state, query, email)
        }
        Msg::ResponseArrived(outcome) => {
            if state.submission() != SubmissionState::AwaitingResponse {
                return (state, Vec::new());
            }
            settle(&mut state, outcome)
        }
    };

    (state, effects)
}

fn submit(state: &mut AppState, query: String, email: String) -> Vec<Effect> {
    state.set_submission(SubmissionState::Validating);
    let query = query.trim();
    if query.is_empty() {
        let notice = StatusNotice::new(NoticeKind::Error, NOTICE_EMPTY_QUERY);
        state.set_notice(Some(notice.clone()));
        state.set_submission(SubmissionState::Idle);
        return vec![Effect::SetNotice(Some(notice))];
    }

    let query = query.to_string();
    let email = email.trim().to_string();
    let message = Message::user(query.clone());
    let notice = StatusNotice::new(NoticeKind::Processing, NOTICE_PROCESSING);

    state.push_message(message.clone());
    state.set_notice(Some(notice.clone()));
    state.set_pending_email(email.clone());
    state.set_submission(SubmissionState::AwaitingResponse);

    vec![
        Effect::AppendMessage {
            content: MessageContent::Plain(message.text.clone()),
            message,
        },
        Effect::ClearQueryInput,
        Effect::SetSubmissionAffordance { enabled: false },
        Effect::SetTypingIndicator { visible: true },
        Effect::SetNotice(Some(notice)),
        Effect::SendQuery(QueryRequest { query, email }),
    ]
}

fn settle(state: &mut AppState, outcome: QueryOutcome) -> Vec<Effect> {
    let email = state.take_pending_email();
    let mut effects = Vec::with_capacity(4);

    let notice = match outcome {
        QueryOutcome::Recommendation(text) => {
            let content = render_bot_text(&text);
            let message = Message::bot(text);
            state.push_message(message.clone());
            effects.push(Effect::AppendMessage { message, content });
            success_notice(&email)
        }
        QueryOutcome::Rejected | QueryOutcome::TransportFailed(_) => {
            StatusNotice::new(NoticeKind::Error, NOTICE_RETRY)
        }
    };

    effects.push(Effect::SetTypingIndicator { visible: false });
    state.set_notice(Some(notice.clone()));
    effects.push(Effect::SetNotice(Some(notice)));
    state.set_submission(SubmissionState::Completed);

    // Every outcome leaves through here, so the affordance always comes back.
    state.set_submission(SubmissionState::Idle);
    effects.push(Effect::SetSubmissionAffordance { enabled: true });
    effects
}

fn render_bot_text(text: &str) -> MessageContent {
    if needs_formatting(text) {
        MessageContent::Markup(format_text(text))
    } else {
        MessageContent::Plain(text.to_string())
    }
}

fn success_notice(email: &str) -> StatusNotice {
    if email.is_empty() {
        StatusNotice::new(NoticeKind::Success, NOTICE_GENERATED)
    } else {
        StatusNotice::new(
            NoticeKind::Success,
            format!("✓ Recommendation sent to {email}!"),
        )
    }
}
