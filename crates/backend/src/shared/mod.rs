pub mod config;
pub mod csv_table;
pub mod format;
pub mod normalize;
pub mod workbook;
