//! Tower layers shared by both HTTP servers.
//!
//! The queue service only uses [`tracing`]; [`rate_limit`] guards the web pages.

pub mod rate_limit;
pub mod tracing;
