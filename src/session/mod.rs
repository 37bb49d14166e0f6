//! Dashboard session: the stateful fetch pipeline behind the UI.
//!
//! `DashboardSession` owns the user's [`QueryOptions`], the
//! [`MarketDataStore`] and one [`FetchSlot`] per request kind (list, detail,
//! chart). UI code calls the mutators and reads snapshots; nothing outside the
//! session mutates its state.
//!
//! Each fetch takes the lock twice: once to apply any option change and move
//! its slot to `Pending`, once to settle it. The lock is never held across the network call, so any
//! number of requests may be in flight; the generation check decides which
//! one lands.
//!
//! ```rust,ignore
//! let session = DashboardSession::new(DashClient::builder().build()?);
//! session.refresh_markets().await;
//! session.set_sort_key(SortKey::PriceDesc).await;
//! let view = session.view().await;
//! ```

pub mod fetch;

use crate::client::DashClient;
use crate::domain::asset::{self, AssetDetail};
use crate::domain::market::{self, AssetSummary, DecodedMarkets, MarketDataStore, MarketView};
use crate::domain::price_history::{self, PricePoint};
use crate::error::SdkError;
use crate::query::{self, QueryOptions, RequestDescriptor, ResultLimit, Slot, SortKey};
use crate::shared::AssetId;

use async_lock::RwLock;
use serde_json::Value;
use std::sync::Arc;

pub use fetch::{FetchSlot, FetchState, Generation};

/// How a started fetch ended, from the caller's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Succeeded,
    Failed,
    /// A later request (or a reset) took over the slot; this response was
    /// dropped without touching any state.
    Superseded,
}

#[derive(Debug, Default)]
struct SessionState {
    options: QueryOptions,
    store: MarketDataStore,
    markets: FetchSlot<Vec<AssetSummary>>,
    asset: FetchSlot<AssetDetail>,
    chart: FetchSlot<Vec<PricePoint>>,
}

fn markets_slot(state: &mut SessionState) -> &mut FetchSlot<Vec<AssetSummary>> {
    &mut state.markets
}

fn asset_slot(state: &mut SessionState) -> &mut FetchSlot<AssetDetail> {
    &mut state.asset
}

fn chart_slot(state: &mut SessionState) -> &mut FetchSlot<Vec<PricePoint>> {
    &mut state.chart
}

fn commit_markets(state: &mut SessionState, decoded: DecodedMarkets) -> Vec<AssetSummary> {
    let summaries = decoded.summaries.clone();
    state.store.replace(decoded);
    summaries
}

fn commit_as_is<T>(_: &mut SessionState, value: T) -> T {
    value
}

/// The market-data session. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct DashboardSession {
    client: DashClient,
    state: Arc<RwLock<SessionState>>,
}

impl DashboardSession {
    pub fn new(client: DashClient) -> Self {
        Self::with_options(client, QueryOptions::default())
    }

    pub fn with_options(client: DashClient, options: QueryOptions) -> Self {
        Self {
            client,
            state: Arc::new(RwLock::new(SessionState {
                options,
                ..SessionState::default()
            })),
        }
    }

    pub fn client(&self) -> &DashClient {
        &self.client
    }

    // ── Fetch lifecycle ──────────────────────────────────────────────────

    /// Start a fetch on the descriptor's slot and wait for it to settle.
    ///
    /// Issues exactly one request. If another `start` on the same slot begins
    /// before this one returns, this response is discarded.
    pub async fn start(&self, descriptor: RequestDescriptor) -> FetchOutcome {
        match descriptor.slot() {
            Slot::Markets => self.start_markets(move |_| descriptor).await,
            Slot::Asset => {
                self.drive(move |_| descriptor, asset_slot, asset::adapt, commit_as_is)
                    .await
            }
            Slot::PriceChart => {
                self.drive(move |_| descriptor, chart_slot, price_history::build, commit_as_is)
                    .await
            }
        }
    }

    async fn start_markets(
        &self,
        describe: impl FnOnce(&mut QueryOptions) -> RequestDescriptor,
    ) -> FetchOutcome {
        self.drive(describe, markets_slot, market::decode_markets, commit_markets)
            .await
    }

    /// `describe` runs under the same guard that begins the slot, so an
    /// option change and the request it triggers are ordered together.
    async fn drive<T, U>(
        &self,
        describe: impl FnOnce(&mut QueryOptions) -> RequestDescriptor,
        select: fn(&mut SessionState) -> &mut FetchSlot<T>,
        decode: fn(&Value) -> Result<U, SdkError>,
        commit: fn(&mut SessionState, U) -> T,
    ) -> FetchOutcome {
        let (descriptor, generation) = {
            let mut state = self.state.write().await;
            let descriptor = describe(&mut state.options);
            (descriptor, select(&mut *state).begin())
        };
        let slot = descriptor.slot();
        tracing::debug!(%slot, generation, "Fetch started");

        let response = self.client.fetch(&descriptor).await;

        let mut state = self.state.write().await;
        if !select(&mut *state).is_current(generation) {
            tracing::debug!(%slot, generation, "Discarding superseded response");
            return FetchOutcome::Superseded;
        }

        match response.map_err(SdkError::from).and_then(|body| decode(&body)) {
            Ok(decoded) => {
                let value = commit(&mut *state, decoded);
                select(&mut *state).resolve(generation, Ok(value));
                tracing::info!(%slot, generation, "Fetch succeeded");
                FetchOutcome::Succeeded
            }
            Err(e) => {
                tracing::warn!(%slot, generation, kind = ?e.kind(), "Fetch failed: {}", e);
                select(&mut *state).resolve(generation, Err(slot.failure_message().to_string()));
                FetchOutcome::Failed
            }
        }
    }

    /// Fetch the list with the current result limit.
    pub async fn refresh_markets(&self) -> FetchOutcome {
        self.start_markets(|options| query::markets(options.result_limit))
            .await
    }

    pub async fn load_asset(&self, id: impl Into<AssetId>) -> FetchOutcome {
        self.start(query::asset(id)).await
    }

    pub async fn load_price_chart(&self, id: impl Into<AssetId>) -> FetchOutcome {
        self.start(query::price_chart(id)).await
    }

    /// Return `slot` to `Idle`; a response still in flight for it is dropped.
    pub async fn reset(&self, slot: Slot) {
        let mut state = self.state.write().await;
        match slot {
            Slot::Markets => state.markets.reset(),
            Slot::Asset => state.asset.reset(),
            Slot::PriceChart => state.chart.reset(),
        }
        tracing::debug!(%slot, "Slot reset");
    }

    /// Leave the detail view: resets the detail and chart slots.
    pub async fn close_asset(&self) {
        self.reset(Slot::Asset).await;
        self.reset(Slot::PriceChart).await;
    }

    // ── Mutators ─────────────────────────────────────────────────────────

    /// Change the page size and fetch a new list.
    pub async fn set_result_limit(&self, limit: ResultLimit) -> FetchOutcome {
        self.start_markets(move |options| {
            options.result_limit = limit;
            query::markets(limit)
        })
        .await
    }

    /// Change the filter. The view is recomputed locally; nothing is fetched.
    pub async fn set_filter_text(&self, text: impl Into<String>) {
        self.state.write().await.options.filter_text = text.into();
    }

    /// Change the ordering. The view is recomputed locally; nothing is fetched.
    pub async fn set_sort_key(&self, key: SortKey) {
        self.state.write().await.options.sort_key = key;
    }

    // ── Snapshots ────────────────────────────────────────────────────────

    pub async fn options(&self) -> QueryOptions {
        self.state.read().await.options.clone()
    }

    pub async fn markets_state(&self) -> FetchState<Vec<AssetSummary>> {
        self.state.read().await.markets.state().clone()
    }

    pub async fn asset_state(&self) -> FetchState<AssetDetail> {
        self.state.read().await.asset.state().clone()
    }

    pub async fn chart_state(&self) -> FetchState<Vec<PricePoint>> {
        self.state.read().await.chart.state().clone()
    }

    /// The filtered, ordered grid computed from the store and current options.
    pub async fn view(&self) -> MarketView {
        let state = self.state.read().await;
        MarketView::project(
            state.store.summaries(),
            &state.options.filter_text,
            state.options.sort_key,
        )
    }

    /// Summaries of the last successful list fetch, in API order.
    pub async fn summaries(&self) -> Vec<AssetSummary> {
        self.state.read().await.store.summaries().to_vec()
    }

    /// Records dropped while decoding the stored page.
    pub async fn dropped_records(&self) -> usize {
        self.state.read().await.store.dropped()
    }
}

impl std::fmt::Debug for DashboardSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardSession")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HttpError;
    use crate::http::Transport;
    use async_trait::async_trait;
    use serde_json::json;

    /// Answers every URL from a fixed table.
    struct Table(Vec<(&'static str, Result<Value, u16>)>);

    #[async_trait]
    impl Transport for Table {
        async fn get_json(&self, url: &str) -> Result<Value, HttpError> {
            for (needle, answer) in &self.0 {
                if url.contains(needle) {
                    return match answer {
                        Ok(v) => Ok(v.clone()),
                        Err(status) => Err(HttpError::ServerError {
                            status: *status,
                            body: String::new(),
                        }),
                    };
                }
            }
            Err(HttpError::Transport(format!("no route for {}", url)))
        }
    }

    fn session(routes: Vec<(&'static str, Result<Value, u16>)>) -> DashboardSession {
        let client = DashClient::builder()
            .transport(Arc::new(Table(routes)))
            .build()
            .unwrap();
        DashboardSession::new(client)
    }

    #[test]
    fn test_options_default() {
        tokio_test::block_on(async {
            let s = session(vec![]);
            let options = s.options().await;
            assert_eq!(options.result_limit, ResultLimit::Ten);
            assert_eq!(options.sort_key, SortKey::MarketCapDesc);
            assert_eq!(options.filter_text, "");
            assert!(s.markets_state().await.is_idle());
        });
    }

    #[test]
    fn test_detail_failure_uses_slot_message() {
        tokio_test::block_on(async {
            let s = session(vec![("/bitcoin", Err(503))]);
            assert_eq!(s.load_asset("bitcoin").await, FetchOutcome::Failed);
            assert_eq!(s.asset_state().await.message(), Some("Failed to fetch coin"));
        });
    }

    #[test]
    fn test_malformed_detail_fails_slot() {
        tokio_test::block_on(async {
            let s = session(vec![("/bitcoin", Ok(json!({"id": "bitcoin", "symbol": "btc"})))]);
            assert_eq!(s.load_asset("bitcoin").await, FetchOutcome::Failed);
            assert_eq!(s.asset_state().await.message(), Some("Failed to fetch coin"));
        });
    }

    #[test]
    fn test_transport_failure_fails_chart() {
        tokio_test::block_on(async {
            let s = session(vec![]);
            assert_eq!(s.load_price_chart("bitcoin").await, FetchOutcome::Failed);
            assert_eq!(
                s.chart_state().await.message(),
                Some("Failed to fetch chart data")
            );
        });
    }

    #[test]
    fn test_filter_and_sort_do_not_fetch() {
        tokio_test::block_on(async {
            let s = session(vec![(
                "/markets",
                Ok(json!([
                    {"id": "a", "symbol": "a", "name": "Alpha", "current_price": 1, "market_cap": 30},
                    {"id": "b", "symbol": "b", "name": "Beta", "current_price": 2, "market_cap": 20}
                ])),
            )]);
            assert_eq!(s.refresh_markets().await, FetchOutcome::Succeeded);

            s.set_sort_key(SortKey::PriceDesc).await;
            let ids: Vec<String> = s.view().await.items.iter().map(|a| a.id.to_string()).collect();
            assert_eq!(ids, ["b", "a"]);

            s.set_filter_text("alp").await;
            let view = s.view().await;
            assert_eq!(view.items.len(), 1);
            assert!(!view.is_empty);
        });
    }

    #[test]
    fn test_close_asset_resets_detail_slots() {
        tokio_test::block_on(async {
            let s = session(vec![(
                "/market_chart",
                Ok(json!({"prices": [[1, 2]]})),
            )]);
            s.load_price_chart("bitcoin").await;
            assert!(s.chart_state().await.value().is_some());
            s.close_asset().await;
            assert!(s.chart_state().await.is_idle());
            assert!(s.asset_state().await.is_idle());
        });
    }
}
