pub mod model;
pub mod ports;
pub mod service;

pub use model::{PackageFormat, QuoteResult, YesNo, SUCCESSFUL_CODES};
pub use ports::Transport;
