//! ResetSettingsHandler - restores full default enablement after confirmation.
//!
//! The reset source is the settings as first loaded from the store, not the
//! edited matrix. Every notification type found there comes back with its
//! master switch and every delivery method on, and the result is saved.

use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};

use super::save_settings::{SaveSettingsHandler, SaveSettingsResult};
use crate::application::{SettingsError, SettingsWorkspace};
use crate::domain::foundation::StateMachine;
use crate::domain::preferences::{PreferenceRow, ResetPhase};
use crate::ports::{ConfirmPrompt, Confirmer, Translator};

const TITLE_KEY: &str = "notification.settings.reset-all-title";
const TEXT_KEY: &str = "notification.settings.reset-all-text";
const NO_KEY: &str = "action.no";
const YES_KEY: &str = "action.yes";

/// How a reset request ended.
#[derive(Debug, Clone, PartialEq)]
pub enum ResetOutcome {
    /// The user declined; nothing changed.
    Cancelled,
    /// Defaults were applied and saved.
    Applied(SaveSettingsResult),
}

/// Handler for resetting all notification settings.
pub struct ResetSettingsHandler {
    workspace: Arc<SettingsWorkspace>,
    save: Arc<SaveSettingsHandler>,
    confirmer: Arc<dyn Confirmer>,
    translator: Arc<dyn Translator>,
    phase: Mutex<ResetPhase>,
}

impl ResetSettingsHandler {
    pub fn new(
        workspace: Arc<SettingsWorkspace>,
        save: Arc<SaveSettingsHandler>,
        confirmer: Arc<dyn Confirmer>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        Self {
            workspace,
            save,
            confirmer,
            translator,
            phase: Mutex::new(ResetPhase::Idle),
        }
    }

    /// Current phase. A poisoned lock still reports the phase it holds.
    pub fn phase(&self) -> ResetPhase {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Asks for confirmation, then resets and saves.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if a reset is already under way.
    /// - `SaveInProgress` if a save holds the store when the reset is accepted;
    ///   the matrix is left untouched.
    /// - Any save error; the matrix then holds the unsaved defaults.
    pub async fn handle(&self) -> Result<ResetOutcome, SettingsError> {
        self.advance(ResetPhase::ConfirmPending)?;
        let _idle = BackToIdle(&self.phase);

        let accepted = self.confirmer.confirm(&self.prompt()).await;
        if !accepted {
            self.advance(ResetPhase::Cancelled)?;
            self.advance(ResetPhase::Idle)?;
            debug!("Notification settings reset cancelled");
            return Ok(ResetOutcome::Cancelled);
        }

        self.advance(ResetPhase::Applying)?;
        let result = self.apply().await;
        self.advance(ResetPhase::Idle)?;

        match result {
            Ok(saved) => {
                info!(rows = saved.row_count, "Notification settings reset to defaults");
                Ok(ResetOutcome::Applied(saved))
            }
            Err(e) => {
                warn!(error = %e, "Notification settings reset did not complete");
                Err(e)
            }
        }
    }

    async fn apply(&self) -> Result<SaveSettingsResult, SettingsError> {
        let _request = self.workspace.begin_request()?;

        let original = self.workspace.original().await;
        let codec = self.workspace.codec();
        let rows: Vec<PreferenceRow> = codec
            .decode_settings(&original)?
            .into_iter()
            .map(|row| PreferenceRow::fully_enabled(row.name, codec.catalog()))
            .collect();

        {
            let mut matrix = self.workspace.matrix().write().await;
            matrix.replace_all(rows)?;
            matrix.mark_dirty();
        }

        self.save.persist().await
    }

    fn prompt(&self) -> ConfirmPrompt {
        ConfirmPrompt {
            title: self.translator.translate(TITLE_KEY),
            message: self.translator.translate(TEXT_KEY),
            cancel_label: self.translator.translate(NO_KEY),
            ok_label: self.translator.translate(YES_KEY),
            fullscreen: true,
        }
    }

    fn advance(&self, target: ResetPhase) -> Result<(), SettingsError> {
        let mut phase = self
            .phase
            .lock()
            .map_err(|_| SettingsError::invalid_state("reset phase lock poisoned"))?;
        *phase = phase.transition_to(target)?;
        Ok(())
    }
}

/// Returns the phase to `Idle` if `handle` is dropped mid-flight.
struct BackToIdle<'a>(&'a Mutex<ResetPhase>);

impl Drop for BackToIdle<'_> {
    fn drop(&mut self) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = ResetPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FixedConfirmer, InMemorySettingsStore, StaticTranslator};
    use crate::domain::preferences::{
        CheckState, Column, DeliveryMethod, NotificationUserSettings,
    };
    use crate::ports::{NotificationSettingsRepository, StoreError};
    use async_trait::async_trait;
    use serde_json::json;

    fn loaded() -> NotificationUserSettings {
        serde_json::from_value(json!({
            "prefs": {
                "ALARM": { "enabled": false, "enabledDeliveryMethods": { "EMAIL": false, "SMS": false } },
                "GENERAL": { "enabled": true, "enabledDeliveryMethods": { "WEB": false } }
            }
        }))
        .unwrap()
    }

    struct Fixture {
        workspace: Arc<SettingsWorkspace>,
        store: Arc<InMemorySettingsStore>,
        confirmer: Arc<FixedConfirmer>,
        handler: ResetSettingsHandler,
    }

    async fn fixture(answer: bool, original: NotificationUserSettings) -> Fixture {
        let workspace = Arc::new(SettingsWorkspace::default());
        workspace.load(original.clone()).await.unwrap();
        let store = Arc::new(InMemorySettingsStore::with_settings(original));
        let confirmer = Arc::new(FixedConfirmer::answering(answer));
        let save = Arc::new(SaveSettingsHandler::new(workspace.clone(), store.clone()));
        let handler = ResetSettingsHandler::new(
            workspace.clone(),
            save,
            confirmer.clone(),
            Arc::new(StaticTranslator::new()),
        );
        Fixture {
            workspace,
            store,
            confirmer,
            handler,
        }
    }

    fn assert_all_enabled(rows: &[PreferenceRow]) {
        for row in rows {
            assert!(row.enabled, "{} should be enabled", row.name);
            assert!(
                row.enabled_delivery_methods.values().all(|on| *on),
                "{} should have every method on",
                row.name
            );
        }
    }

    #[tokio::test]
    async fn confirmed_reset_enables_everything_and_saves() {
        let f = fixture(true, loaded()).await;
        f.workspace
            .set_column_enabled(Column::Method(DeliveryMethod::MobileApp), false)
            .await
            .unwrap();

        let outcome = f.handler.handle().await.unwrap();

        assert!(matches!(outcome, ResetOutcome::Applied(ref saved) if saved.row_count == 2));
        let rows = f.workspace.rows().await;
        assert_eq!(rows.len(), 2);
        assert_all_enabled(&rows);
        assert!(!f.workspace.has_unsaved_changes().await);
        assert_eq!(f.store.save_count(), 1);
        assert_eq!(f.handler.phase(), ResetPhase::Idle);
        assert_eq!(f.workspace.check_state(Column::Enabled).await, CheckState::Checked);
    }

    #[tokio::test]
    async fn reset_uses_original_rows_not_edited_matrix() {
        let f = fixture(true, loaded()).await;
        // A later server-side save with fewer rows must not shrink the reset source.
        f.workspace
            .matrix()
            .write()
            .await
            .replace_all(Vec::new())
            .unwrap();

        f.handler.handle().await.unwrap();

        let names: Vec<_> = f.workspace.rows().await.into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["ALARM", "GENERAL"]);
    }

    #[tokio::test]
    async fn declined_reset_changes_nothing() {
        let f = fixture(false, loaded()).await;
        f.workspace.set_row_enabled("GENERAL", false).await.unwrap();
        let before = f.workspace.rows().await;

        let outcome = f.handler.handle().await.unwrap();

        assert_eq!(outcome, ResetOutcome::Cancelled);
        assert_eq!(f.workspace.rows().await, before);
        assert!(f.workspace.has_unsaved_changes().await);
        assert_eq!(f.store.save_count(), 0);
        assert_eq!(f.handler.phase(), ResetPhase::Idle);
    }

    #[tokio::test]
    async fn prompt_uses_translated_text() {
        let f = fixture(false, loaded()).await;

        f.handler.handle().await.unwrap();

        let prompts = f.confirmer.prompts();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].title, "Reset all notification settings");
        assert_eq!(prompts[0].cancel_label, "No");
        assert_eq!(prompts[0].ok_label, "Yes");
        assert!(prompts[0].fullscreen);
    }

    #[tokio::test]
    async fn reset_without_prefs_saves_empty_content() {
        let f = fixture(true, NotificationUserSettings::default()).await;

        let outcome = f.handler.handle().await.unwrap();

        assert!(matches!(outcome, ResetOutcome::Applied(ref saved) if saved.row_count == 0));
        assert_eq!(f.store.save_count(), 1);
        assert_eq!(
            f.store.current().await,
            serde_json::from_value::<NotificationUserSettings>(json!({ "prefs": {} })).unwrap()
        );
        assert!(f.workspace.rows().await.is_empty());
    }

    #[tokio::test]
    async fn failed_save_leaves_defaults_dirty_and_returns_to_idle() {
        let f = fixture(true, loaded()).await;
        f.store
            .fail_next_save(StoreError::Transport("offline".to_string()))
            .await;

        let err = f.handler.handle().await.unwrap_err();

        assert!(matches!(err, SettingsError::Store(StoreError::Transport(_))));
        assert_all_enabled(&f.workspace.rows().await);
        assert!(f.workspace.has_unsaved_changes().await);
        assert_eq!(f.handler.phase(), ResetPhase::Idle);
    }

    #[tokio::test]
    async fn reset_blocked_by_in_flight_save_keeps_matrix() {
        let f = fixture(true, loaded()).await;
        let before = f.workspace.rows().await;

        let busy = f.workspace.begin_request().unwrap();
        let err = f.handler.handle().await.unwrap_err();
        drop(busy);

        assert_eq!(err, SettingsError::SaveInProgress);
        assert_eq!(f.workspace.rows().await, before);
        assert_eq!(f.handler.phase(), ResetPhase::Idle);
    }

    #[tokio::test]
    async fn second_reset_while_confirming_is_rejected() {
        let f = fixture(true, loaded()).await;
        *f.handler.phase.lock().unwrap() = ResetPhase::ConfirmPending;

        let err = f.handler.handle().await.unwrap_err();

        assert!(matches!(err, SettingsError::InvalidState(_)));
        assert!(f.confirmer.prompts().is_empty());
        assert_eq!(f.handler.phase(), ResetPhase::ConfirmPending);
    }

    #[tokio::test]
    async fn phase_survives_poisoned_lock() {
        let f = fixture(true, loaded()).await;
        let phase = &f.handler.phase;
        std::thread::scope(|scope| {
            let poisoner = scope.spawn(|| {
                let mut guard = phase.lock().unwrap();
                *guard = ResetPhase::Applying;
                panic!("worker died while applying");
            });
            assert!(poisoner.join().is_err());
        });

        assert!(f.handler.phase.is_poisoned());
        assert_eq!(f.handler.phase(), ResetPhase::Applying);
        assert!(matches!(
            f.handler.handle().await,
            Err(SettingsError::InvalidState(_))
        ));
    }

    /// Repository whose answer differs from the request, like a server that
    /// normalizes input.
    struct NormalizingRepository;

    #[async_trait]
    impl NotificationSettingsRepository for NormalizingRepository {
        async fn load_user_settings(&self) -> Result<NotificationUserSettings, StoreError> {
            Ok(NotificationUserSettings::default())
        }

        async fn save_user_settings(
            &self,
            _settings: &NotificationUserSettings,
        ) -> Result<NotificationUserSettings, StoreError> {
            Ok(serde_json::from_value(json!({
                "prefs": { "ALARM": { "enabled": true, "enabledDeliveryMethods": { "SMS": false } } }
            }))
            .unwrap())
        }
    }

    #[tokio::test]
    async fn reset_ends_with_store_answer() {
        let workspace = Arc::new(SettingsWorkspace::default());
        workspace.load(loaded()).await.unwrap();
        let save = Arc::new(SaveSettingsHandler::new(
            workspace.clone(),
            Arc::new(NormalizingRepository),
        ));
        let handler = ResetSettingsHandler::new(
            workspace.clone(),
            save,
            Arc::new(FixedConfirmer::answering(true)),
            Arc::new(StaticTranslator::new()),
        );

        handler.handle().await.unwrap();

        let rows = workspace.rows().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].enabled_delivery_methods.get(&DeliveryMethod::Sms),
            Some(&false)
        );
    }
}
