//! # SELECT * Analyzer Library
//!
//! Field-usage inference for ABAP fetch-all statements and explicit-column
//! remediation.

pub mod app;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod lexer;
pub mod output;
pub mod unit;
