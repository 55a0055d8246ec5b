pub mod config;
pub mod stmt;
pub mod store;
pub mod translate;
