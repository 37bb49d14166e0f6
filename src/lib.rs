//! # Crypto Dash SDK
//!
//! The market-data session pipeline behind the Crypto Dash dashboard.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core**: shared newtypes, display formatting, domain slices (always available)
//! 2. **Query**: user options and request descriptors (always available)
//! 3. **HTTP**: the `Transport` seam and `MarketDataHttp` with opt-in retry policies
//! 4. **Client**: `DashClient` with nested sub-clients for stateless access
//! 5. **Session**: `DashboardSession`, the per-slot fetch lifecycle, store and view
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use crypto_dash_sdk::prelude::*;
//!
//! let client = DashClient::builder().build()?;
//!
//! // Stateless
//! let page = client.markets().list(ResultLimit::Twenty).await?;
//! let detail = client.assets().get("bitcoin").await?;
//!
//! // Stateful, as the dashboard uses it
//! let session = DashboardSession::new(client);
//! session.refresh_markets().await;
//! session.set_filter_text("eth").await;
//! let view = session.view().await;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: Query ───────────────────────────────────────────────────────────

/// Options and request descriptors.
pub mod query;

// ── Layer 3: HTTP ────────────────────────────────────────────────────────────

/// HTTP transport with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: Client ──────────────────────────────────────────────────────────

/// `DashClient`, the stateless entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Layer 5: Session ─────────────────────────────────────────────────────────

/// `DashboardSession`, the stateful entry point.
#[cfg(feature = "http")]
pub mod session;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{AssetId, Metric};

    // Domain types
    pub use crate::domain::asset::{AssetDetail, AssetLinks, MarketSnapshot, PriceExtreme};
    pub use crate::domain::market::{
        AssetCard, AssetSummary, DecodedMarkets, MarketDataStore, MarketView, Trend,
    };
    pub use crate::domain::price_history::PricePoint;

    // Query
    pub use crate::query::{QueryOptions, RequestDescriptor, ResultLimit, Slot, SortKey};

    // Errors
    pub use crate::error::{ErrorKind, HttpError, SdkError};

    // Network
    pub use crate::network::{DEFAULT_COIN_API_URL, DEFAULT_MARKETS_URL};

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{
        AssetsClient, DashClient, DashClientBuilder, MarketsClient, PriceHistorySubClient,
    };
    #[cfg(feature = "http")]
    pub use crate::http::{RetryConfig, RetryPolicy, Transport};

    // Session
    #[cfg(feature = "http")]
    pub use crate::session::{DashboardSession, FetchOutcome, FetchState};
}
