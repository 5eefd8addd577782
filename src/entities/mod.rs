//! Entity module - `SeaORM` entity definitions for the database.

pub mod warning;

pub use warning::{Column as WarningColumn, Entity as Warning, Model as WarningModel};
