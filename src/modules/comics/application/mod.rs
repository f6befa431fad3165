pub mod comics_aggregator;

pub use comics_aggregator::ComicsAggregator;
