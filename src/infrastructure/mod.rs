// Infrastructure layer - Configuration and in-process adapters
pub mod config;
pub mod memory_catalog;
pub mod memory_quote_store;
