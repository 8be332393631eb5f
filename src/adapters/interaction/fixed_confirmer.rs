//! Fixed Confirmer Adapter
//!
//! Answers every confirmation prompt with a preset value and remembers the
//! prompts it was shown. Used by headless callers and tests.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::ports::{ConfirmPrompt, Confirmer};

#[derive(Debug, Default)]
pub struct FixedConfirmer {
    answer: bool,
    prompts: Mutex<Vec<ConfirmPrompt>>,
}

impl FixedConfirmer {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts shown so far, oldest first.
    pub fn prompts(&self) -> Vec<ConfirmPrompt> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Confirmer for FixedConfirmer {
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.clone());
        }
        self.answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt() -> ConfirmPrompt {
        ConfirmPrompt {
            title: "Reset?".to_string(),
            message: "Everything goes back on".to_string(),
            cancel_label: "No".to_string(),
            ok_label: "Yes".to_string(),
            fullscreen: true,
        }
    }

    #[tokio::test]
    async fn returns_preset_answer_and_records_prompt() {
        let yes = FixedConfirmer::answering(true);
        let no = FixedConfirmer::answering(false);

        assert!(yes.confirm(&prompt()).await);
        assert!(!no.confirm(&prompt()).await);
        assert_eq!(yes.prompts(), vec![prompt()]);
    }
}
