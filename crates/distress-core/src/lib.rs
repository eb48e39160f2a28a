//! # distress-core
//!
//! Deterministic engine for a distributional economic stress index: a
//! composite of group-specific inflation and a shared labor-market-slack
//! term, with bootstrap confidence intervals over expenditure-weight
//! sampling error.
//!
//! ## Quick Start
//!
//! ```
//! use distress_core::{
//!     PriceLevelTable, PriceRow, SlackRow, SlackSeries, SnapshotConfig, WeightRow, WeightTable,
//!     compute_snapshot,
//! };
//!
//! let prices = PriceLevelTable::from_rows(vec![
//!     PriceRow {
//!         period: "2023-11".to_string(),
//!         levels: [("FOOD".to_string(), 100.0)].into(),
//!     },
//!     PriceRow {
//!         period: "2024-11".to_string(),
//!         levels: [("FOOD".to_string(), 104.0)].into(),
//!     },
//! ])?;
//! let weights = WeightTable::new(vec![WeightRow {
//!     group: "Q1".to_string(),
//!     category: "FOOD".to_string(),
//!     weight: 1.0,
//! }]);
//! let slack = SlackSeries::new(vec![SlackRow {
//!     period: "2024-11".to_string(),
//!     geography: None,
//!     value: 4.2,
//! }]);
//!
//! let snapshot = compute_snapshot(&prices, &weights, &slack, "2024-11", &SnapshotConfig::default())?;
//! assert_eq!(snapshot.index.len(), 1);
//! # Ok::<(), distress_core::EngineError>(())
//! ```
//!
//! ## Architecture
//!
//! Price levels → relatives → group-weighted inflation → composite index →
//! summary, with the bootstrap engine repeatedly rerunning the middle stages
//! under perturbed weights.
//!
//! Every stage is a pure function over value types: identical inputs yield
//! bitwise-identical outputs, and the only randomness lives in an explicitly
//! seeded generator owned by the sampler's caller. Category and group
//! identifiers are opaque strings; nothing in the engine special-cases a
//! label.

pub mod bootstrap;
pub mod error;
pub mod index;
pub mod inflation;
pub mod period;
pub mod pipeline;
pub mod qa;
pub mod relatives;
pub mod sampling;
pub mod slack;
pub mod summary;
pub mod table;

pub use bootstrap::{
    BootstrapConfig, BootstrapRun, GroupInterval, IntervalEstimate, SampleMatrix, bootstrap,
};
pub use error::EngineError;
pub use index::{IndexParams, IndexRecord, compose_index};
pub use inflation::{
    AggregateResult, CONTRIBUTION_TOLERANCE, CategoryContribution, GroupInflation,
    aggregate_inflation, validate_contribution_closure,
};
pub use period::{DEFAULT_HORIZON_MONTHS, period_back};
pub use pipeline::{Snapshot, SnapshotConfig, compute_snapshot};
pub use qa::{CheckStatus, QaCheck, hard_checks, release_gate, soft_checks};
pub use relatives::price_relatives;
pub use sampling::{MIN_WEIGHT, perturb_weights};
pub use slack::resolve_slack;
pub use summary::{SummaryBounds, SummaryMetrics, summarize};
pub use table::{
    PriceLevelTable, PriceRow, SlackRow, SlackSeries, WEIGHT_SUM_TOLERANCE, WeightRow, WeightTable,
};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
