//! Client for the Correios price and deadline ("preço e prazo") web service.
//!
//! Build a [`QuoteRequest`], hand it to a [`QuoteExecutor`] and read the
//! [`QuoteResult`]. The executor talks HTTP through a [`Transport`];
//! [`ReqwestTransport`] is the default.

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::ReqwestTransport;
pub use config::FreteConfig;
pub use self::core::{executor::QuoteExecutor, reply::CarrierReply, request::QuoteRequest};
pub use domain::{service, PackageFormat, QuoteResult, Transport, YesNo};
pub use utils::error::{FreteError, Result};
