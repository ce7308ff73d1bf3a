pub mod service;

pub use service::build_dashboard;
