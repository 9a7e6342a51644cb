//! Derived timeline feed: pure aggregation plus the read service.

pub mod aggregator;
pub mod service;

pub use aggregator::build_timeline;
pub use service::TimelineService;
