pub mod config;
pub mod data;
pub mod enrich;
pub mod generate;
pub mod handlers;
pub mod schema;
pub mod services;
pub mod utils;

pub use data::db::DbPool;
