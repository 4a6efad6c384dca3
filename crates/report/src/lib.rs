//! Output artifact for the soldrank system.
//!
//! Writes the single-row CSV report: `label,item_id,rank,top_price,status`.

pub mod writer;

pub use writer::{write_report, write_report_to, ReportRow, HEADER};
