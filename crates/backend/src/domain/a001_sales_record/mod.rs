pub mod file_name;
pub mod parser;
pub mod service;
