pub mod export;
pub mod service;

pub use service::build_pivot;
