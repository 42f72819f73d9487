//! Core pipeline and bundle logic for scriptbundle.
//!
//! This crate ties together discovery, version resolution, decoding, and
//! document writing into the single `run_bundle` workflow.

pub mod decode;
pub mod document;
pub mod pipeline;
pub mod version;

pub use pipeline::{BundleOutcome, BundleReport, ProgressReporter, SilentProgress, run_bundle};
