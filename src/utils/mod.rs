pub mod error;
pub mod request;
pub mod window;
