pub mod config;
pub mod diagnostics;
pub mod extractors;
pub mod logging;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod sessions;
pub mod state;
pub mod store;
pub mod validation;
pub mod workers;
