pub mod executor;
pub mod reply;
pub mod request;

pub use crate::domain::{QuoteResult, Transport};
pub use crate::utils::error::Result;
