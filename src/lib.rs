//! Lead ID Engine Library
//!
//! Structured Lead ID generation and duplicate detection for a sales-lead
//! dashboard, plus the HTTP host that exposes both.
//!
//! # Modules
//!
//! - `api`: API definitions.
//! - `core`: Core business logic.
//! - `codes`: Region, inquiry-type and owner code derivation.
//! - `config`: Configuration management.
//! - `duplicate`: Returning-customer and duplicate detection.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers and router.
//! - `lead_id`: Lead ID generation, parsing and checksum.
//! - `models`: Lead records and detection results.
//! - `sequence`: Daily sequence counter.

pub mod api;
pub mod core;

pub mod codes;
pub mod config;
pub mod duplicate;
pub mod errors;
pub mod handlers;
pub mod lead_id;
pub mod models;
pub mod sequence;
