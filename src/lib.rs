//! # college-cost
//!
//! Answers one question over HTTP: what does a year at this college cost?
//!
//! The answer comes from a CSV dataset read once at startup into a
//! [`CollegeDirectory`]. The directory is immutable afterwards and shared
//! by every request through an `Arc`.
//!
//! ```text
//! GET /lookup?college=<name>&room_and_board=<true|false>
//!   200 {"Cost":"15000.00"}
//!   400 {"message":"Error: College name is required"}
//!   400 {"message":"Error: College not found"}
//! ```
//!
//! Cost is in-state tuition, plus room and board unless
//! `room_and_board=false` is passed.
//!
//! ## Startup
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use college_cost::{CollegeDirectory, Server, app};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), college_cost::Error> {
//!     let directory = Arc::new(CollegeDirectory::load("college_costs.csv")?);
//!     Server::bind("0.0.0.0:3000".parse().unwrap())
//!         .serve(app::router(directory))
//!         .await
//! }
//! ```
//!
//! The directory is loaded before the listener is bound, so no request ever
//! sees a partially loaded dataset.

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod app;
pub mod config;
pub mod directory;
pub mod health;
pub mod lookup;
pub mod middleware;

pub use directory::{CollegeDirectory, CostRecord};
pub use error::Error;
pub use handler::Handler;
pub use method::{Method, UnknownMethod};
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::{Server, serve_listener};
pub use status::Status;
