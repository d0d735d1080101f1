use crate::config::FreteConfig;
use crate::domain::service::default_service_codes;
use crate::domain::{PackageFormat, YesNo};
use crate::utils::error::Result;
use rust_decimal::Decimal;
use url::form_urlencoded;

/// Value of `StrRetorno`; the carrier only offers XML replies here.
pub const RESPONSE_FORMAT: &str = "xml";

/// Shipment attributes for one price/deadline quote.
///
/// Enumerated fields are validated when they are set, so a built request
/// always serializes to values the carrier accepts. Numeric fields are not
/// range checked. A dimension left unset is sent as an empty value, which
/// the carrier treats as "not informed".
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRequest {
    company_code: String,
    password: String,
    service_codes: Vec<String>,
    origin_postal_code: String,
    destination_postal_code: String,
    weight_kg: Option<Decimal>,
    format: PackageFormat,
    length_cm: Option<Decimal>,
    height_cm: Option<Decimal>,
    width_cm: Option<Decimal>,
    diameter_cm: Option<Decimal>,
    hand_delivery: YesNo,
    declared_value: Decimal,
    receipt_notice: YesNo,
}

impl Default for QuoteRequest {
    fn default() -> Self {
        Self {
            company_code: String::new(),
            password: String::new(),
            service_codes: default_service_codes(),
            origin_postal_code: String::new(),
            destination_postal_code: String::new(),
            weight_kg: None,
            format: PackageFormat::default(),
            length_cm: None,
            height_cm: None,
            width_cm: None,
            diameter_cm: None,
            hand_delivery: YesNo::No,
            declared_value: Decimal::ZERO,
            receipt_notice: YesNo::No,
        }
    }
}

impl QuoteRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a request with the credentials and service list from `config`.
    pub fn from_config(config: &FreteConfig) -> Self {
        let mut request = Self::new();
        request
            .set_company_code(config.company_code())
            .set_password(config.password())
            .set_service_codes(config.service_codes().iter().cloned());
        request
    }

    pub fn set_company_code(&mut self, company_code: impl Into<String>) -> &mut Self {
        self.company_code = company_code.into();
        self
    }

    pub fn set_password(&mut self, password: impl Into<String>) -> &mut Self {
        self.password = password.into();
        self
    }

    /// Replaces the service list; codes are joined with commas on the wire.
    pub fn set_service_codes<I, S>(&mut self, codes: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.service_codes = codes.into_iter().map(Into::into).collect();
        self
    }

    pub fn set_service_code(&mut self, code: impl Into<String>) -> &mut Self {
        self.service_codes = vec![code.into()];
        self
    }

    /// CEP without separators, e.g. `05311900`.
    pub fn set_origin_postal_code(&mut self, cep: impl Into<String>) -> &mut Self {
        self.origin_postal_code = cep.into();
        self
    }

    pub fn set_destination_postal_code(&mut self, cep: impl Into<String>) -> &mut Self {
        self.destination_postal_code = cep.into();
        self
    }

    /// Weight including packaging, in kilograms.
    pub fn set_weight(&mut self, kg: Decimal) -> &mut Self {
        self.weight_kg = Some(kg);
        self
    }

    /// Raw carrier format code: 1 box/package, 2 roll/prism, 3 envelope.
    pub fn set_format(&mut self, code: u8) -> Result<&mut Self> {
        self.format = PackageFormat::try_from(code)?;
        Ok(self)
    }

    pub fn set_package_format(&mut self, format: PackageFormat) -> &mut Self {
        self.format = format;
        self
    }

    pub fn set_length(&mut self, cm: Decimal) -> &mut Self {
        self.length_cm = Some(cm);
        self
    }

    // Envelopes should be sent with height 0; left to the caller.
    pub fn set_height(&mut self, cm: Decimal) -> &mut Self {
        self.height_cm = Some(cm);
        self
    }

    pub fn set_width(&mut self, cm: Decimal) -> &mut Self {
        self.width_cm = Some(cm);
        self
    }

    pub fn set_diameter(&mut self, cm: Decimal) -> &mut Self {
        self.diameter_cm = Some(cm);
        self
    }

    /// `S` or `N`: deliver only to the addressee in person.
    pub fn set_hand_delivery(&mut self, flag: &str) -> Result<&mut Self> {
        self.hand_delivery = YesNo::parse_field("sCdMaoPropria", flag)?;
        Ok(self)
    }

    pub fn set_hand_delivery_flag(&mut self, flag: YesNo) -> &mut Self {
        self.hand_delivery = flag;
        self
    }

    /// Declared value in BRL; zero means no declared value service.
    pub fn set_declared_value(&mut self, value: Decimal) -> &mut Self {
        self.declared_value = value;
        self
    }

    /// `S` or `N`: return a signed delivery receipt to the sender.
    pub fn set_receipt_notice(&mut self, flag: &str) -> Result<&mut Self> {
        self.receipt_notice = YesNo::parse_field("sCdAvisoRecebimento", flag)?;
        Ok(self)
    }

    pub fn set_receipt_notice_flag(&mut self, flag: YesNo) -> &mut Self {
        self.receipt_notice = flag;
        self
    }

    pub fn service_codes(&self) -> &[String] {
        &self.service_codes
    }

    pub fn format(&self) -> PackageFormat {
        self.format
    }

    /// Wire field name and value pairs, `StrRetorno` last.
    pub fn serialize(&self) -> Vec<(&'static str, String)> {
        vec![
            ("nCdEmpresa", self.company_code.clone()),
            ("sDsSenha", self.password.clone()),
            ("nCdServico", self.service_codes.join(",")),
            ("nCdFormato", self.format.to_string()),
            ("sCepOrigem", self.origin_postal_code.clone()),
            ("sCepDestino", self.destination_postal_code.clone()),
            ("nVlPeso", decimal_field(self.weight_kg)),
            ("nVlComprimento", decimal_field(self.length_cm)),
            ("nVlAltura", decimal_field(self.height_cm)),
            ("nVlLargura", decimal_field(self.width_cm)),
            ("nVlDiametro", decimal_field(self.diameter_cm)),
            ("sCdMaoPropria", self.hand_delivery.to_string()),
            ("nVlValorDeclarado", self.declared_value.normalize().to_string()),
            ("sCdAvisoRecebimento", self.receipt_notice.to_string()),
            ("StrRetorno", RESPONSE_FORMAT.to_string()),
        ]
    }

    pub fn query_string(&self) -> String {
        encode(self.serialize())
    }

    /// Same as [`query_string`](Self::query_string) with the password masked, for logs.
    pub fn redacted_query_string(&self) -> String {
        let pairs = self.serialize().into_iter().map(|(key, value)| {
            if key == "sDsSenha" && !value.is_empty() {
                (key, "***".to_string())
            } else {
                (key, value)
            }
        });
        encode(pairs)
    }
}

fn decimal_field(value: Option<Decimal>) -> String {
    value.map(|v| v.normalize().to_string()).unwrap_or_default()
}

fn encode<I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'static str, String)>,
{
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, &value);
    }
    serializer.finish()
}
