//! Liveness and readiness probes.
//!
//! | Probe | Path | Answer |
//! |---|---|---|
//! | **Liveness** | `/healthz` | `200 ok` whenever the process can respond. |
//! | **Readiness** | `/readyz` | `200 {"status":"ready","colleges":N}` once serving. |
//!
//! The server only starts after the directory has loaded, so readiness
//! reflects a loaded directory by construction. An empty directory (only
//! possible when one is built by hand) reports `503`.

use std::sync::Arc;

use serde::Serialize;

use crate::directory::CollegeDirectory;
use crate::response::{Json, Response};
use crate::status::Status;
use crate::Request;

/// Always `200 OK` with body `"ok"`.
pub async fn liveness(_req: Request) -> Response {
    Response::text("ok")
}

#[derive(Serialize)]
struct Readiness {
    status: &'static str,
    colleges: usize,
}

/// Builds the readiness handler over the shared directory.
pub fn readiness(
    directory: Arc<CollegeDirectory>,
) -> impl Fn(Request) -> std::future::Ready<Response> + Send + Sync + 'static {
    move |_req: Request| {
        let colleges = directory.len();
        let response = if colleges == 0 {
            Json(Readiness { status: "empty", colleges }).with_status(Status::ServiceUnavailable)
        } else {
            Json(Readiness { status: "ready", colleges }).with_status(Status::Ok)
        };
        std::future::ready(response)
    }
}
