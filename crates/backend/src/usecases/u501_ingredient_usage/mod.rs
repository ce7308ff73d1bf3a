pub mod aggregator;
pub mod executor;
pub mod export;
pub mod splitter;

pub use executor::IngredientUsageExecutor;
