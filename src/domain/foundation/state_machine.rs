//! State machine trait for workflow phases.
//!
//! Gives every phase enum (reset workflow today) the same validated
//! transition API.

use super::ValidationError;

/// Trait for phase enums that represent state machines.
///
/// Implementors define the legal edges and get validated transitions
/// for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for ResetPhase {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!(
///             (self, target),
///             (Idle, ConfirmPending) | (ConfirmPending, Applying) // ...
///         )
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Idle => vec![ConfirmPending],
///             // ...
///         }
///     }
/// }
///
/// let phase = ResetPhase::Idle.transition_to(ResetPhase::ConfirmPending)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
