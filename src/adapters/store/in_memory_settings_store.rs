//! In-Memory Settings Store Adapter
//!
//! Keeps one user's notification settings and the delivery method allow
//! list in memory. Useful for testing and development.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::preferences::{DeliveryMethod, NotificationUserSettings};
use crate::ports::{DeliveryMethodReader, NotificationSettingsRepository, StoreError};

/// In-memory settings store
#[derive(Debug, Clone)]
pub struct InMemorySettingsStore {
    settings: Arc<RwLock<NotificationUserSettings>>,
    available: Arc<RwLock<Vec<DeliveryMethod>>>,
    pending_failure: Arc<RwLock<Option<StoreError>>>,
    save_count: Arc<AtomicUsize>,
}

impl InMemorySettingsStore {
    /// Create an empty store that allows every delivery method
    pub fn new() -> Self {
        Self::with_settings(NotificationUserSettings::default())
    }

    /// Create a store seeded with `settings`
    pub fn with_settings(settings: NotificationUserSettings) -> Self {
        Self {
            settings: Arc::new(RwLock::new(settings)),
            available: Arc::new(RwLock::new(DeliveryMethod::all().to_vec())),
            pending_failure: Arc::new(RwLock::new(None)),
            save_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Replace the platform-wide allow list
    pub async fn set_available_methods(&self, methods: Vec<DeliveryMethod>) {
        *self.available.write().await = methods;
    }

    /// Make the next save fail with `error`
    pub async fn fail_next_save(&self, error: StoreError) {
        *self.pending_failure.write().await = Some(error);
    }

    /// Current stored settings
    pub async fn current(&self) -> NotificationUserSettings {
        self.settings.read().await.clone()
    }

    /// Number of saves that reached the store, failed ones included
    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }
}

impl Default for InMemorySettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationSettingsRepository for InMemorySettingsStore {
    async fn load_user_settings(&self) -> Result<NotificationUserSettings, StoreError> {
        Ok(self.settings.read().await.clone())
    }

    async fn save_user_settings(
        &self,
        settings: &NotificationUserSettings,
    ) -> Result<NotificationUserSettings, StoreError> {
        self.save_count.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = self.pending_failure.write().await.take() {
            return Err(error);
        }

        let mut stored = self.settings.write().await;
        *stored = settings.clone();
        Ok(stored.clone())
    }
}

#[async_trait]
impl DeliveryMethodReader for InMemorySettingsStore {
    async fn available_delivery_methods(&self) -> Result<Vec<DeliveryMethod>, StoreError> {
        Ok(self.available.read().await.clone())
    }
}
