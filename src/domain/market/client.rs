//! Markets sub-client: fetch and decode one page of the asset list.

use crate::client::DashClient;
use crate::domain::market::{decode_markets, view, AssetSummary, DecodedMarkets};
use crate::error::SdkError;
use crate::query::{self, ResultLimit, SortKey};

/// Sub-client for the asset list.
pub struct Markets<'a> {
    pub(crate) client: &'a DashClient,
}

impl<'a> Markets<'a> {
    /// Fetch the market-cap-ordered first page of `limit` assets.
    pub async fn list(&self, limit: ResultLimit) -> Result<DecodedMarkets, SdkError> {
        let payload = self.client.fetch(&query::markets(limit)).await?;
        decode_markets(&payload)
    }

    /// Fetch a page and project it through filter + sort in one call.
    pub async fn search(
        &self,
        limit: ResultLimit,
        filter_text: &str,
        sort_key: SortKey,
    ) -> Result<Vec<AssetSummary>, SdkError> {
        let decoded = self.list(limit).await?;
        Ok(view::apply(&decoded.summaries, filter_text, sort_key))
    }
}
