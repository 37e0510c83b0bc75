#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`error`]: Domain error types (`ProductScannerError`)
//! - [`config`]: Scanner configuration (`ScannerConfig`, builder)
//! - [`types`]: Domain types (`ClassifiedCode`, `NormalizedProduct`, `SustainabilityAssessment`)
//! - [`classifier`]: Barcode validation and content-type classification
//! - [`normalizer`]: Provider record mapping (`ProviderResponse`, `normalize`)
//! - [`scoring`]: Sustainability factors, score, rating and analysis text
//! - [`lookup`]: Mirror iteration (`ProductSource` trait, `LookupOrchestrator`, `MirrorClient`)
//! - [`history`]: Capacity-bounded scan history (`KeyValueStore`, `HistoryStore`)
//! - [`session`]: End-to-end scan flow (`ScanSession`, `ScanReport`)
//!
//! # Architecture
//!
//! ```text
//! ScanEvent --> classify --> LookupOrchestrator --> ProductSource (mirror 1..n)
//!                                   |
//!                               normalize --> assess --> ScanReport
//!                                                            |
//!                                                      HistoryStore --> KeyValueStore
//! ```

pub mod classifier;
pub mod config;
pub mod error;
pub mod history;
pub mod lookup;
pub mod normalizer;
pub mod scoring;
pub mod session;
pub mod types;

// --- Public API Re-exports ---

// Session (main entry point)
pub use session::{LookupStatus, ScanReport, ScanSession};

// Configuration
pub use config::{ScannerConfig, ScannerConfigBuilder};

// Error
pub use error::ProductScannerError;

// Types
pub use types::{
    ClassifiedCode, ClassifiedScan, CodeType, ContentType, NormalizedProduct, NutritionGrade,
    OutboundAction, Rating, SustainabilityAssessment, SustainabilityFactors,
};

// Pure functions
pub use classifier::classify;
pub use normalizer::{ProviderProduct, ProviderResponse, normalize};
pub use scoring::assess;

// Lookup
pub use lookup::{LookupHit, LookupOrchestrator, MirrorClient, ProductSource};

// History
pub use history::{
    FileKeyValueStore, HistoryEntry, HistoryStore, KeyValueStore, MemoryKeyValueStore,
};
