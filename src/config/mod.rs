/// Database configuration and connection management
pub mod database;

/// Catalog seed data loading from config.toml
pub mod catalog;
