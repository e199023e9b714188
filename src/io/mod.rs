//! I/O helpers for exporting extraction results.

pub mod report;

pub use report::{write_csv, write_report, write_stats};
