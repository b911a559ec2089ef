//! compat-interop - Cross-browser interoperability statistics
//!
//! Reads a browser-compatibility dataset and answers, for every release
//! date: how many features were supported by exactly which subset of the
//! tracked browsers?
//!
//! Layers, bottom-up:
//! - `support`: raw support values normalized to records
//! - `timeline`: ordered, dated releases per browser
//! - `resolve`: one "version added" per (feature, browser)
//! - `dataset`: JSON loading and feature tree walking
//! - `interop`: snapshots, permutation tallies and side reports
//! - `cli`: configuration and report output

pub mod cli;
pub mod dataset;
pub mod interop;
pub mod observability;
pub mod resolve;
pub mod support;
pub mod timeline;
