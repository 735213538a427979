pub mod aggregator;
pub mod loader;
pub mod normalizer;
