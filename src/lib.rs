//! # rangegen - Russia IP range and hotspot target list generator
//!
//! Turns the country's published network blocks plus four curated hotspot
//! lists into plain-text `first-last` target lists and scanner configs.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        rangegen                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  CLI (clap) + Config (serde_yaml)                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Fetcher (reqwest + rustls)                                 │
//! │    └── Bulk sources (ipdeny, country-ip-blocks)             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Pipeline (ipnet)                                           │
//! │    ├── Normalizer: CIDR -> first-last                       │
//! │    ├── Dedup: per category, first seen wins                 │
//! │    └── Combiner: union of all categories                    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Emitter (FileSystem trait)                                 │
//! │    ├── Category files + combined file                       │
//! │    └── masscan / nmap / NESCA templates                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```
//! use rangegen::combiner::combine;
//! use rangegen::hotspots::{Category, HOTSPOT_LISTS};
//! use rangegen::pipeline::build_categories;
//!
//! let bulk = vec!["1.2.3.0/24".to_string(), "1.2.3.1/24".to_string()];
//! let results = build_categories(&bulk, &HOTSPOT_LISTS);
//! assert_eq!(results.get(Category::AllRussia).len(), 1);
//!
//! let combined = combine(&results);
//! assert!(combined.iter().any(|r| r.to_string() == "1.2.3.0-1.2.3.255"));
//! ```
//!
//! ## Modules
//!
//! - [`normalizer`] - CIDR to address range conversion
//! - [`dedup`] - Per-category deduplication
//! - [`pipeline`] - The five category results
//! - [`combiner`] - Union across categories
//! - [`hotspots`] - Categories and curated hotspot lists
//! - [`fetcher`] - HTTP download of the bulk lists
//! - [`emitter`] - Output files
//! - [`templates`] - Scanner configuration text
//! - [`fs_abstraction`] - Injectable filesystem
//! - [`config`] - Configuration defaults and YAML loading
//! - [`cli`] - Command-line interface definitions
//! - [`commands`] - Command implementations
//! - [`utils`] - Count formatting

pub mod cli;
pub mod combiner;
pub mod commands;
pub mod config;
pub mod dedup;
pub mod emitter;
pub mod error;
pub mod fetcher;
pub mod fs_abstraction;
pub mod hotspots;
pub mod normalizer;
pub mod pipeline;
pub mod templates;
pub mod utils;

pub use cli::Cli;
pub use config::Config;
pub use error::RangegenError;
