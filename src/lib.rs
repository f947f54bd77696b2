pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::counter_store::{JsonCounterStore, MemoryCounterStore};
pub use adapters::docx::Document;
pub use adapters::storage::{LocalStorage, MemoryStorage};
pub use config::AppConfig;
pub use core::{engine::QuotationEngine, sequence::SequenceAllocator};
pub use domain::model::{Capacity, CustomerDetails, Phase, Quotation};
pub use utils::error::{QuoteError, Result};
