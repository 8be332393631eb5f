//! ResetPhase - lifecycle of a "reset all preferences" request.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Phases of the reset workflow.
///
/// `Idle -> ConfirmPending -> (Cancelled | Applying) -> Idle`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetPhase {
    #[default]
    Idle,
    ConfirmPending,
    Cancelled,
    Applying,
}

impl StateMachine for ResetPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ResetPhase::*;
        matches!(
            (self, target),
            (Idle, ConfirmPending)
                | (ConfirmPending, Cancelled)
                | (ConfirmPending, Applying)
                | (Cancelled, Idle)
                | (Applying, Idle)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ResetPhase::*;
        match self {
            Idle => vec![ConfirmPending],
            ConfirmPending => vec![Cancelled, Applying],
            Cancelled => vec![Idle],
            Applying => vec![Idle],
        }
    }
}
