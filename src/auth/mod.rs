//! Session cookie contract and credential hashing.
//!
//! - [`session_cookie`] - Cookie name, `Set-Cookie` builders and the request reader
//! - [`token`] - Session token generation, keyed hashing and password hashing

pub mod session_cookie;
pub mod token;

pub use session_cookie::{
    SESSION_COOKIE_NAME, delete_session_cookie, session_token_from_headers, set_session_cookie,
};
