//! Data module - CSV loading and numeric cleaning

mod loader;
mod processor;

pub use loader::DataLoader;
pub use processor::{is_numeric_dtype, DataProcessor, NUMERIC_COLUMNS};
