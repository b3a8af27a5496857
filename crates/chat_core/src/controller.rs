use crate::{
    update, AppState, ChatViewModel, Effect, InputCollaborator, Msg, QueryOutcome,
    RenderingCollaborator, TransportCollaborator,
};

/// Owns the single live [`AppState`] and applies reducer effects to the
/// injected collaborators.
pub struct InteractionController<R, I, T> {
    state: AppState,
    renderer: R,
    input: I,
    transport: T,
}

impl<R, I, T> InteractionController<R, I, T>
where
    R: RenderingCollaborator,
    I: InputCollaborator,
    T: TransportCollaborator,
{
    pub fn new(renderer: R, input: I, transport: T) -> Self {
        Self {
            state: AppState::new(),
            renderer,
            input,
            transport,
        }
    }

    /// Reads the input fields and submits them.
    pub fn submit(&mut self) {
        let query = self.input.read_query();
        let email = self.input.read_email();
        self.dispatch(Msg::Submit { query, email });
    }

    pub fn input_changed(&mut self) {
        self.dispatch(Msg::InputChanged);
    }

    pub fn response_arrived(&mut self, outcome: QueryOutcome) {
        self.dispatch(Msg::ResponseArrived(outcome));
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        for effect in effects {
            self.apply(effect);
        }
    }

    pub fn view(&self) -> ChatViewModel {
        self.state.view()
    }

    /// True once after any dispatch that changed what the view shows.
    pub fn consume_dirty(&mut self) -> bool {
        self.state.consume_dirty()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::AppendMessage { message, content } => {
                self.renderer.append_message(&message, &content);
            }
            Effect::SetNotice(notice) => self.renderer.set_notice(notice.as_ref()),
            Effect::SetSubmissionAffordance { enabled } => {
                self.renderer.set_submission_affordance(enabled);
            }
            Effect::SetTypingIndicator { visible } => self.renderer.set_typing_indicator(visible),
            Effect::ClearQueryInput => self.input.clear_query(),
            Effect::SendQuery(request) => self.transport.send_query(request),
        }
    }
}
