use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum LinkIntent {
    /// User clicked the link and a transition started.
    Clicked,
    /// A transition from this link resolved, committed or not.
    Settled,
    /// A transition from this link failed.
    Failed { message: String },
}

impl Intent for LinkIntent {}
