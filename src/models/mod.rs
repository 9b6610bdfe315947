//! Data models

pub mod dataset;
pub mod impact;
pub mod user;

pub use dataset::*;
pub use impact::*;
pub use user::*;
