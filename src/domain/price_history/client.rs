//! Price history sub-client: 7-day chart series.

use crate::client::DashClient;
use crate::domain::price_history::{build, PricePoint};
use crate::error::SdkError;
use crate::query;
use crate::shared::AssetId;

/// Sub-client for price history operations.
pub struct PriceHistoryClient<'a> {
    pub(crate) client: &'a DashClient,
}

impl<'a> PriceHistoryClient<'a> {
    pub async fn get(&self, id: impl Into<AssetId>) -> Result<Vec<PricePoint>, SdkError> {
        let payload = self.client.fetch(&query::price_chart(id)).await?;
        build(&payload)
    }
}
