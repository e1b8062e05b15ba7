//! Financial metric derivation from filed statements.

pub mod metrics;
pub mod resolver;
pub mod service;

pub use metrics::{MetricEngine, MetricSet};
pub use resolver::{lookup_value, search_value};
pub use service::{FinancialReport, FinancialsService};
