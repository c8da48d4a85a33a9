pub mod aggregator;
pub mod policies;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use policies::AggregationPolicy;
pub use ports::StatsService;
