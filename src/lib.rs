//! Backend for a baseball statistics web application: account management,
//! per-user favorite teams and players, and a read-only proxy onto the
//! public MLB stats API.

pub mod auth;
pub mod config;
pub mod error;
pub mod mlb;
pub mod routes;
pub mod state;
pub mod store;

pub use routes::app;
pub use state::AppState;
