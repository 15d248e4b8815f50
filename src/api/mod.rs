//! API module
//!
//! HTTP layer: routes and request/response types.

pub mod routes;

pub use routes::create_router;
