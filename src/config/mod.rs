/// Database connection and schema creation
pub mod database;

/// Bot settings from config.toml
pub mod settings;
