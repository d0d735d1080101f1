use crate::config::FreteConfig;
use crate::core::reply::CarrierReply;
use crate::core::request::QuoteRequest;
use crate::domain::{QuoteResult, Transport};
use crate::utils::error::Result;

/// Public price/deadline endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://ws.correios.com.br/calculador/CalcPrecoPrazo.aspx";

/// Runs one request/response cycle against the carrier.
///
/// Holds no per-call state, so a single executor can serve any number of
/// independent requests.
pub struct QuoteExecutor<T: Transport> {
    endpoint: String,
    transport: T,
}

impl<T: Transport> QuoteExecutor<T> {
    pub fn new(transport: T) -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT, transport)
    }

    pub fn with_endpoint(endpoint: impl Into<String>, transport: T) -> Self {
        Self {
            endpoint: endpoint.into(),
            transport,
        }
    }

    pub fn from_config(config: &FreteConfig, transport: T) -> Self {
        Self::with_endpoint(config.endpoint(), transport)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn build_url(&self, request: &QuoteRequest) -> String {
        format!("{}?{}", self.endpoint, request.query_string())
    }

    /// Fetches a quote.
    ///
    /// Transport failures are returned as-is. A body that is not XML becomes
    /// [`FreteError::Fetch`](crate::FreteError::Fetch). A carrier-side
    /// rejection is not an error: it comes back with `successful == false`.
    pub async fn execute(&self, request: QuoteRequest) -> Result<QuoteResult> {
        let url = self.build_url(&request);
        tracing::debug!(
            "Requesting quote: {}?{}",
            self.endpoint,
            request.redacted_query_string()
        );

        let body = self.transport.get(&url).await?;
        tracing::debug!("Carrier reply: {} bytes", body.len());

        let reply = CarrierReply::parse(&body)?;
        Ok(map_reply(&reply))
    }
}

fn map_reply(reply: &CarrierReply) -> QuoteResult {
    let mut result = QuoteResult::new();

    if reply.is_successful() {
        result.set_successful(true);
        tracing::info!(
            "Quote for service {}: price {}, {} day(s)",
            reply.get("Codigo"),
            reply.get("Valor"),
            reply.get("PrazoEntrega")
        );
    } else {
        result
            .set_successful(false)
            .set_error(reply.error_message());
        tracing::warn!(
            "Carrier rejected quote (code {}): {}",
            reply.error_code(),
            reply.error_message()
        );
    }

    result.fill(reply.fields());
    result
}
