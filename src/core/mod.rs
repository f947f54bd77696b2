pub mod engine;
pub mod filler;
pub mod numerals;
pub mod placeholders;
pub mod quotation;
pub mod sequence;
pub mod share;

pub use crate::domain::model::{CustomerDetails, PlaceholderMap, Quotation};
pub use crate::domain::ports::{CounterStore, CredentialVerifier, Storage};
pub use crate::utils::error::Result;
