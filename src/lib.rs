//! # shoplens - Survey Dashboard for Shopping-Channel Preferences
//!
//! shoplens reads a fixed-schema market research CSV (e-commerce vs
//! physical-store shopping preferences) and renders a descriptive report
//! in the terminal: ranked frequency tables, normalized stacked
//! comparisons, Likert-scale summaries and headline KPIs.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                      Survey CSV (file)                     │
//! └───────────────────────────┬────────────────────────────────┘
//!                             │ load once, cache per path
//!                             ▼
//! ┌────────────────────────────────────────────────────────────┐
//! │                    shoplens (This Crate)                   │
//! │                                                            │
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────┐  │
//! │  │   Dataset    │──▶│  Aggregate   │──▶│    Report    │  │
//! │  │ (immutable)  │   │  (pipeline)  │   │  (sections)  │  │
//! │  └──────────────┘   └──────────────┘   └───────┬──────┘  │
//! │                                                 │          │
//! │                         ┌───────────────┬───────┴──────┐  │
//! │                         ▼               ▼              ▼  │
//! │                  ┌──────────┐   ┌────────────┐  ┌───────┐│
//! │                  │   TUI    │   │  Headless  │  │Export ││
//! │                  │(ratatui) │   │   (text)   │  │ (json/││
//! │                  └──────────┘   └────────────┘  │  csv) ││
//! │                                                 └───────┘│
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - [`dataset`]: CSV ingestion with header trimming, validated column
//!   lookup, and the process-wide load cache
//! - [`aggregate`]: the aggregation pipeline — ranked frequency tables,
//!   percentage normalization, multi-select explosion, cross-tabulation,
//!   head-N truncation, Likert summaries
//! - [`report`]: the fixed section catalog built from the pipeline, with
//!   per-section failure isolation
//! - [`tui`]: interactive terminal dashboard
//! - [`export`]: summary JSON and verbatim dataset CSV
//! - [`cli`]: command-line argument parsing
//! - [`domain`]: core types and structured errors
//!
//! ## Operational Modes
//!
//! 1. **Dashboard** (default): interactive section-per-tab terminal UI
//! 2. **Headless** (`--headless`): plain-text report on stdout
//!
//! Both modes can additionally write `--export` (summary JSON) and
//! `--export-csv` (dataset round-trip) artifacts.

// Expose modules for testing
pub mod aggregate;
pub mod cli;
pub mod dataset;
pub mod domain;
pub mod export;
pub mod report;
pub mod tui;
