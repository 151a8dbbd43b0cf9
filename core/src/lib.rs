//! # nessusfile core
//!
//! A read-only object model over `.nessus` scan reports.
//!
//! * **[`scan_file`]**: loading, host enumeration, plugin aggregation, policy preferences.
//! * **[`host`]**: a scanned host and its properties.
//! * **[`report_item`]**: a single finding.
//! * **[`element`]**: path queries over one document node; everything above is built on it.

pub mod element;
pub mod error;
pub mod host;
pub mod report_item;
pub mod scan_file;

pub use error::NessusError;
pub use host::{Host, HostProperty};
pub use report_item::ReportItem;
pub use scan_file::{PluginRecord, ScanFile, ScanSource};
