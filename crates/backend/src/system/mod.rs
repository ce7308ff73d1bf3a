pub mod console;
pub mod run;
pub mod tracing;
