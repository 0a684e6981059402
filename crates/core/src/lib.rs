//! Core library for pdfreflow
//!
//! This crate implements the **Functional Core** of the pdfreflow application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The pdfreflow project splits its work across three crates:
//!
//! - **`pdfreflow_core`** (this crate): Pure transformation functions with zero I/O
//! - **`pdf`**: The extraction adapter over `lopdf` and the pipeline driver
//! - **`pdfreflow`**: I/O operations and orchestration (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! All functions in this crate adhere to these principles:
//!
//! - **Pure functions**: Same input always produces the same output
//! - **No side effects**: No I/O operations, no external state mutations
//! - **Total**: Every string is a valid input, so nothing here returns an error
//!
//! # Module Organization
//!
//! - [`assemble`]: Joins a page's text runs into lines and pages into a document
//! - [`normalize`]: Classifies lines and re-inserts structural spacing
//!
//! # Example Usage
//!
//! ```rust
//! use pdfreflow_core::assemble::{assemble_document, TextRun};
//! use pdfreflow_core::normalize::normalize_text;
//!
//! let page = vec![
//!     TextRun::new("CHAPTER 1", true),
//!     TextRun::new("Once upon", false),
//!     TextRun::new("a time.", true),
//! ];
//!
//! let raw = assemble_document(&[page]);
//! assert_eq!(normalize_text(&raw), "CHAPTER 1\n\nOnce upon a time.");
//! ```

pub mod assemble;
pub mod normalize;
