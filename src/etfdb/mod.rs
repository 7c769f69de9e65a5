// src/etfdb/mod.rs
pub mod client;
pub mod models;

pub use client::{HttpTransport, Transport};
pub use models::{CatalogRecord, ScreenerRequest};
