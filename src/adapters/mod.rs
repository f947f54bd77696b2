// Adapters layer: concrete implementations for external systems (files, documents, credentials).

pub mod auth;
pub mod counter_store;
pub mod docx;
pub mod register;
pub mod storage;
