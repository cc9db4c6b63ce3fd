//! JSON surface of the web application. Pages live in [`crate::web`].

pub mod dto;
pub mod handlers;
