//! HTML page handlers.

mod home;
mod import;
mod login;
mod logout;
mod not_found;
mod upload;

pub use home::home_handler;
pub use import::import_handler;
pub use login::{describe_login_error, login_handler, login_submit_handler};
pub use logout::logout_handler;
pub use not_found::not_found_handler;
pub use upload::upload_handler;
