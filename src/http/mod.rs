//! HTTP protocol layer module
//!
//! Response builders, the CORS header set, and MIME detection, decoupled
//! from routing and relay logic.

pub mod cors;
pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_404_response, build_405_response, build_file_response, build_listing_response,
    build_preflight_response, build_relay_error_response, build_relay_reject_response,
    build_relay_response,
};
