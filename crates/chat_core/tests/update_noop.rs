use chat_core::{update, AppState, Msg};

#[test]
fn input_change_without_notice_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::InputChanged);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
