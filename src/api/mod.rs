pub mod error;
pub mod models;

mod client;

pub use client::ApiClient;
pub use error::{ApiError, ApiResult};
pub use models::*;
