// src/export/mod.rs
// =============================================================================
// This module turns report results into files.
//
// Submodules:
// - record: enriched API records and fixed-column tables
// - writer: the per-run output directory, CSV and GEXF writing
// =============================================================================

mod record;
mod writer;

pub use record::{Record, Table};
pub use writer::OutputDir;
