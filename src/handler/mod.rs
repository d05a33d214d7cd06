//! Request handler module
//!
//! Routing dispatch, the relay handler, and the static file fallback.

pub mod relay;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
