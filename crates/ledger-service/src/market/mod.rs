//! Third-party market data
//!
//! [`MarketSource`] talks to the upstream API; [`EconomyGuard`] decides when
//! it may be called and what to serve when it fails.

mod guard;
mod source;

pub use guard::{
    EconomyGuard, EconomySnapshot, SnapshotOrigin, ECONOMY_KEY, ECONOMY_SOURCE, FALLBACK_TTL,
    FRESH_TTL,
};
pub use source::{AlphaVantageSource, MarketError, MarketSource};
