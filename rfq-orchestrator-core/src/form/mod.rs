//! Form state projected from the selection store

mod aggregator;

pub use aggregator::{FormAggregator, parse_quantity};
