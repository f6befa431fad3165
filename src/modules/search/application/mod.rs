pub mod search_aggregator;

pub use search_aggregator::SearchAggregator;
