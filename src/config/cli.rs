use crate::config::FreteConfig;
use crate::core::request::QuoteRequest;
use crate::utils::error::Result;
use crate::utils::validation::{validate_url, Validate};
use clap::Parser;
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "correios-frete")]
#[command(about = "Fetch a Correios price and deadline quote")]
pub struct CliConfig {
    /// Origin CEP, digits only
    #[arg(long = "from")]
    pub origin: String,

    /// Destination CEP, digits only
    #[arg(long = "to")]
    pub destination: String,

    /// Weight in kg, packaging included
    #[arg(long)]
    pub weight: Decimal,

    /// 1 box/package, 2 roll/prism, 3 envelope
    #[arg(long, default_value = "1")]
    pub format: u8,

    #[arg(long)]
    pub length: Option<Decimal>,

    #[arg(long)]
    pub height: Option<Decimal>,

    #[arg(long)]
    pub width: Option<Decimal>,

    #[arg(long)]
    pub diameter: Option<Decimal>,

    /// S or N
    #[arg(long, default_value = "N")]
    pub hand_delivery: String,

    /// S or N
    #[arg(long, default_value = "N")]
    pub receipt_notice: String,

    #[arg(long)]
    pub declared_value: Option<Decimal>,

    /// Service codes; overrides the config file
    #[arg(long = "service", value_delimiter = ',')]
    pub services: Vec<String>,

    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Overrides the configured endpoint
    #[arg(long)]
    pub endpoint: Option<String>,

    #[arg(long, help = "Print the result as JSON")]
    pub json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl CliConfig {
    /// Loads the config file if one was given and applies command-line overrides.
    pub fn load_config(&self) -> Result<FreteConfig> {
        let mut config = match &self.config {
            Some(path) => FreteConfig::from_file(path)?,
            None => FreteConfig::default(),
        };

        if let Some(endpoint) = &self.endpoint {
            config.service.endpoint = endpoint.clone();
        }
        if !self.services.is_empty() {
            config.defaults.service_codes = self.services.clone();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn build_request(&self, config: &FreteConfig) -> Result<QuoteRequest> {
        let mut request = QuoteRequest::from_config(config);
        request
            .set_origin_postal_code(self.origin.as_str())
            .set_destination_postal_code(self.destination.as_str())
            .set_weight(self.weight)
            .set_format(self.format)?
            .set_hand_delivery(&self.hand_delivery)?
            .set_receipt_notice(&self.receipt_notice)?;

        if let Some(length) = self.length {
            request.set_length(length);
        }
        if let Some(height) = self.height {
            request.set_height(height);
        }
        if let Some(width) = self.width {
            request.set_width(width);
        }
        if let Some(diameter) = self.diameter {
            request.set_diameter(diameter);
        }
        if let Some(value) = self.declared_value {
            request.set_declared_value(value);
        }

        Ok(request)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(endpoint) = &self.endpoint {
            validate_url("--endpoint", endpoint)?;
        }
        Ok(())
    }
}
