//! Middleware layer.
//!
//! Cross-cutting concerns that wrap every dispatched request. Currently only
//! [`trace`], which the server applies to each request.

pub mod trace;
