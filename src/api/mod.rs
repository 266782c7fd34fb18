//! REST API surface

pub mod assessment;
pub mod error;
pub mod health;
pub mod openapi;
pub mod system;
