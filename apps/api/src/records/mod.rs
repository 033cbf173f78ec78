pub mod calc;
pub mod handlers;
pub mod queries;
pub mod targets;
