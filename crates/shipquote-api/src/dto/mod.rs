//! Data Transfer Objects (DTOs) for API requests and responses

pub mod common;
pub mod quote;
pub mod rate;

pub use common::*;
pub use quote::*;
pub use rate::*;
