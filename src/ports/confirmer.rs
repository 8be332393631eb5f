//! Confirmer Port - blocking yes/no prompts.

use async_trait::async_trait;

/// Text of a yes/no prompt, already translated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub message: String,
    pub cancel_label: String,
    pub ok_label: String,
    pub fullscreen: bool,
}

/// Port for asking the user to confirm a destructive action.
#[async_trait]
pub trait Confirmer: Send + Sync {
    /// Resolves to `true` when the user accepts.
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool;
}
