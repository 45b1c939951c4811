pub mod config;
pub mod contract;
pub mod desktop_entry;
pub mod discovery;
pub mod indexer;
pub mod launch;
pub mod logging;
pub mod model;
pub mod query_state;
pub mod runtime;
pub mod search;
pub mod session;
pub mod sqlite_store;
pub mod style;
pub mod transport;
pub mod usage_store;
