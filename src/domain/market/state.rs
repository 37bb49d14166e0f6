//! Market state container: app-owned, SDK-provided update logic.

use super::convert::DecodedMarkets;
use super::AssetSummary;

/// The most recently fetched page of asset summaries.
///
/// Replace-only: each successful list fetch swaps the whole page in; there is no
/// incremental merge, and a failed fetch leaves the previous page untouched.
#[derive(Debug, Clone, Default)]
pub struct MarketDataStore {
    summaries: Vec<AssetSummary>,
    dropped: usize,
}

impl MarketDataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored page with a freshly decoded one.
    pub fn replace(&mut self, decoded: DecodedMarkets) {
        self.dropped = decoded.dropped.len();
        self.summaries = decoded.summaries;
    }

    pub fn summaries(&self) -> &[AssetSummary] {
        &self.summaries
    }

    /// Records dropped while decoding the stored page.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }
}
