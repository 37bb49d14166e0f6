//! Assets sub-client: detail lookups.

use crate::client::DashClient;
use crate::domain::asset::{adapt, AssetDetail};
use crate::error::SdkError;
use crate::query;
use crate::shared::AssetId;

/// Sub-client for single-asset operations.
pub struct Assets<'a> {
    pub(crate) client: &'a DashClient,
}

impl<'a> Assets<'a> {
    /// Fetch and normalize one asset's detail.
    pub async fn get(&self, id: impl Into<AssetId>) -> Result<AssetDetail, SdkError> {
        let payload = self.client.fetch(&query::asset(id)).await?;
        adapt(&payload)
    }
}
