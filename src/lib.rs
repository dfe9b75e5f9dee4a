//! Simplified social-security benefit calculator.
//!
//! This crate loads a table of remuneration records (pasted text, CSV or a
//! spreadsheet), averages the top 80% of the remunerations, applies the
//! benefit factor ("fator previdenciário") and labels every record as
//! before or after the 2019 reform. Results come with a full audit trace and
//! can be exported back to CSV or served over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod report;
