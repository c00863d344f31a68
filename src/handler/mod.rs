//! Request handler module
//!
//! Responsible for request dispatch and static file serving, plus the demo
//! header override applied to every outgoing response.

pub mod finalize;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
