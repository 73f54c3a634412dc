//! Recording ingestion.

mod reader;

pub use reader::{Recording, read_recording};
