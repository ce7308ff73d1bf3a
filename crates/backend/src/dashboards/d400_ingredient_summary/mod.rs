pub mod export;
pub mod service;

pub use service::{filter_machine, summarize};
