//! Output module for the duration report
//!
//! This module handles:
//! - Reducing crawled categories to duration statistics
//! - Rendering the sorted report table
//! - Listing categories skipped during the crawl

pub mod stats;
mod table;

pub use stats::{build_report, summarize, CategoryStatistics};
pub use table::{print_failures, print_report, render_report};
