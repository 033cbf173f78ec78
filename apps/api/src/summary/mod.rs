pub mod aggregate;
pub mod baseline;
pub mod handlers;
pub mod window;
