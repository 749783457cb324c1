//! Application state

use reviewhub_store::MongoDb;

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Document store handle, constructed in main and injected here
    pub db: MongoDb,

    /// Server configuration
    pub config: Config,
}
