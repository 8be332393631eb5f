//! Delivery Method Reader Port - the platform-wide allow list.

use async_trait::async_trait;

use super::StoreError;
use crate::domain::preferences::DeliveryMethod;

/// Port for reading which delivery methods are enabled platform-wide.
#[async_trait]
pub trait DeliveryMethodReader: Send + Sync {
    /// Methods the platform currently delivers through.
    async fn available_delivery_methods(&self) -> Result<Vec<DeliveryMethod>, StoreError>;
}
