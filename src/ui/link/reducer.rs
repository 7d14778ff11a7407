use crate::ui::link::intent::LinkIntent;
use crate::ui::link::state::LinkState;
use crate::ui::mvi::Reducer;

pub struct LinkReducer;

impl Reducer for LinkReducer {
    type State = LinkState;
    type Intent = LinkIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            // A new click clears a previous error.
            LinkIntent::Clicked => LinkState::Loading {
                pending: pending(&state) + 1,
            },
            LinkIntent::Settled => match state {
                LinkState::Loading { pending } if pending > 1 => LinkState::Loading {
                    pending: pending - 1,
                },
                LinkState::Failed { message, pending } if pending > 1 => LinkState::Failed {
                    message,
                    pending: pending - 1,
                },
                LinkState::Idle | LinkState::Loading { .. } | LinkState::Failed { .. } => {
                    LinkState::Idle
                }
            },
            LinkIntent::Failed { message } => LinkState::Failed {
                message,
                pending: pending(&state).saturating_sub(1),
            },
        }
    }
}

fn pending(state: &LinkState) -> u32 {
    match state {
        LinkState::Idle => 0,
        LinkState::Loading { pending } | LinkState::Failed { pending, .. } => *pending,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_starts_loading() {
        let state = LinkReducer::reduce(LinkState::Idle, LinkIntent::Clicked);
        assert_eq!(state, LinkState::Loading { pending: 1 });
    }

    #[test]
    fn double_click_stays_loading_until_both_settle() {
        let state = LinkReducer::reduce(LinkState::Idle, LinkIntent::Clicked);
        let state = LinkReducer::reduce(state, LinkIntent::Clicked);
        let state = LinkReducer::reduce(state, LinkIntent::Settled);
        assert!(state.is_loading());
        let state = LinkReducer::reduce(state, LinkIntent::Settled);
        assert_eq!(state, LinkState::Idle);
    }

    #[test]
    fn failure_shows_message() {
        let state = LinkReducer::reduce(LinkState::Loading { pending: 1 }, fail());
        assert_eq!(state.error_message(), Some("Failed to load data"));
        assert!(!state.is_loading());
    }

    #[test]
    fn click_after_failure_clears_error() {
        let state = LinkReducer::reduce(
            LinkState::Failed {
                message: "x".into(),
                pending: 0,
            },
            LinkIntent::Clicked,
        );
        assert_eq!(state, LinkState::Loading { pending: 1 });
    }

    #[test]
    fn failure_keeps_other_clicks_loading() {
        let state = LinkReducer::reduce(LinkState::Loading { pending: 2 }, fail());
        assert_eq!(
            state,
            LinkState::Failed {
                message: "Failed to load data".into(),
                pending: 1,
            }
        );
        assert!(state.is_loading());

        let state = LinkReducer::reduce(state, LinkIntent::Settled);
        assert_eq!(state, LinkState::Idle);
    }

    #[test]
    fn settle_keeps_error_while_others_pending() {
        let state = LinkState::Failed {
            message: "Failed to load data".into(),
            pending: 2,
        };
        let state = LinkReducer::reduce(state, LinkIntent::Settled);
        assert_eq!(state.error_message(), Some("Failed to load data"));
        assert!(state.is_loading());
    }

    #[test]
    fn failure_without_pending_click_does_not_underflow() {
        let state = LinkReducer::reduce(LinkState::Idle, fail());
        assert!(!state.is_loading());
        assert_eq!(state.error_message(), Some("Failed to load data"));
    }

    fn fail() -> LinkIntent {
        LinkIntent::Failed {
            message: "Failed to load data".into(),
        }
    }

    #[test]
    fn settle_when_idle_is_noop() {
        let state = LinkReducer::reduce(LinkState::Idle, LinkIntent::Settled);
        assert_eq!(state, LinkState::Idle);
    }
}
