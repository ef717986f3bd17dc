// storage/mod.rs
// Database operations module

pub mod checks;
pub mod domains;
pub mod migrations;
pub mod models;
pub mod pool;
mod sink;

#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used items
pub use migrations::run_migrations;
pub use models::{DomainCheck, DomainRecord};
pub use pool::init_db_pool_with_path;
pub use sink::{Persisted, ResultSink, SqliteSink};
