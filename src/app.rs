//! Route table for the service.

use std::sync::Arc;

use crate::directory::CollegeDirectory;
use crate::router::Router;
use crate::{health, lookup};

/// `GET /lookup`, `GET /healthz`, `GET /readyz`, all reading the same
/// directory.
pub fn router(directory: Arc<CollegeDirectory>) -> Router {
    Router::new()
        .get("/lookup",  lookup::handler(Arc::clone(&directory)))
        .get("/healthz", health::liveness)
        .get("/readyz",  health::readiness(directory))
}
