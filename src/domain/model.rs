use crate::utils::error::{FreteError, Result};
use crate::utils::validation::validate_one_of;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Carrier error codes that still count as a usable quote.
/// `010` is returned when the deadline was computed with a warning.
pub const SUCCESSFUL_CODES: [&str; 2] = ["0", "010"];

/// Package shape, sent as `nCdFormato`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PackageFormat {
    /// Box or package.
    #[default]
    Box = 1,
    /// Roll or prism.
    Roll = 2,
    /// Envelope. The carrier expects height 0 for this format.
    Envelope = 3,
}

impl PackageFormat {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for PackageFormat {
    type Error = FreteError;

    fn try_from(value: u8) -> Result<Self> {
        match *validate_one_of("nCdFormato", value, &[1, 2, 3])? {
            1 => Ok(PackageFormat::Box),
            2 => Ok(PackageFormat::Roll),
            _ => Ok(PackageFormat::Envelope),
        }
    }
}

impl From<PackageFormat> for u8 {
    fn from(format: PackageFormat) -> Self {
        format.code()
    }
}

impl fmt::Display for PackageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Carrier yes/no flag, sent as `S` or `N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum YesNo {
    #[serde(rename = "S")]
    Yes,
    #[default]
    #[serde(rename = "N")]
    No,
}

impl YesNo {
    pub fn as_str(self) -> &'static str {
        match self {
            YesNo::Yes => "S",
            YesNo::No => "N",
        }
    }

    /// Parses `S`/`N`, reporting failures against `field`.
    pub fn parse_field(field: &str, value: &str) -> Result<Self> {
        match *validate_one_of(field, value, &["S", "N"])? {
            "S" => Ok(YesNo::Yes),
            _ => Ok(YesNo::No),
        }
    }
}

impl From<bool> for YesNo {
    fn from(value: bool) -> Self {
        if value {
            YesNo::Yes
        } else {
            YesNo::No
        }
    }
}

impl FromStr for YesNo {
    type Err = FreteError;

    fn from_str(s: &str) -> Result<Self> {
        YesNo::parse_field("S/N flag", s)
    }
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one quote request.
///
/// Carrier fields are kept as the raw strings the carrier sent (prices use a
/// decimal comma, flags are `S`/`N`). Fields are filled even when the
/// carrier reports an error so callers can inspect partial data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuoteResult {
    pub successful: bool,
    pub error_code: String,
    pub error_message: String,
    pub service_code: String,
    pub price: String,
    pub delivery_days: String,
    pub hand_delivery_fee: String,
    pub receipt_notice_fee: String,
    pub declared_value_fee: String,
    pub home_delivery: String,
    pub saturday_delivery: String,
}

impl QuoteResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_successful(&mut self, successful: bool) -> &mut Self {
        self.successful = successful;
        self
    }

    pub fn set_error(&mut self, message: impl Into<String>) -> &mut Self {
        self.error_message = message.into();
        self
    }

    /// Copies carrier fields by their XML element name. Unknown keys are ignored.
    pub fn fill(&mut self, fields: &BTreeMap<String, String>) -> &mut Self {
        for (key, value) in fields {
            if let Some(slot) = self.slot_mut(key) {
                *slot = value.clone();
            }
        }
        self
    }

    /// Reads a field by its carrier element name, e.g. `Valor`.
    pub fn get(&self, key: &str) -> Option<&str> {
        let value = match key {
            "Codigo" => &self.service_code,
            "Valor" => &self.price,
            "PrazoEntrega" => &self.delivery_days,
            "ValorMaoPropria" => &self.hand_delivery_fee,
            "ValorAvisoRecebimento" => &self.receipt_notice_fee,
            "ValorValorDeclarado" => &self.declared_value_fee,
            "EntregaDomiciliar" => &self.home_delivery,
            "EntregaSabado" => &self.saturday_delivery,
            "Erro" => &self.error_code,
            "MsgErro" => &self.error_message,
            _ => return None,
        };
        Some(value.as_str())
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut String> {
        match key {
            "Codigo" => Some(&mut self.service_code),
            "Valor" => Some(&mut self.price),
            "PrazoEntrega" => Some(&mut self.delivery_days),
            "ValorMaoPropria" => Some(&mut self.hand_delivery_fee),
            "ValorAvisoRecebimento" => Some(&mut self.receipt_notice_fee),
            "ValorValorDeclarado" => Some(&mut self.declared_value_fee),
            "EntregaDomiciliar" => Some(&mut self.home_delivery),
            "EntregaSabado" => Some(&mut self.saturday_delivery),
            "Erro" => Some(&mut self.error_code),
            "MsgErro" => Some(&mut self.error_message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_format_codes() {
        assert_eq!(PackageFormat::try_from(1).unwrap(), PackageFormat::Box);
        assert_eq!(PackageFormat::try_from(2).unwrap(), PackageFormat::Roll);
        assert_eq!(PackageFormat::try_from(3).unwrap(), PackageFormat::Envelope);
        assert_eq!(PackageFormat::Envelope.to_string(), "3");
    }

    #[test]
    fn test_package_format_rejects_unknown() {
        for bad in [0u8, 4, 255] {
            let err = PackageFormat::try_from(bad).unwrap_err();
            assert!(matches!(err, FreteError::InvalidArgument { .. }));
            assert!(err.to_string().contains("1, 2 or 3"));
        }
    }

    #[test]
    fn test_yes_no_parsing() {
        assert_eq!("S".parse::<YesNo>().unwrap(), YesNo::Yes);
        assert_eq!("N".parse::<YesNo>().unwrap(), YesNo::No);
        assert_eq!(YesNo::from(true).as_str(), "S");

        for bad in ["X", "s", "", "SIM"] {
            let err = bad.parse::<YesNo>().unwrap_err();
            assert!(err.to_string().contains("S or N"), "{}", err);
        }
    }

    #[test]
    fn test_fill_and_get() {
        let mut fields = BTreeMap::new();
        fields.insert("Valor".to_string(), "15,90".to_string());
        fields.insert("PrazoEntrega".to_string(), "3".to_string());
        fields.insert("Desconhecido".to_string(), "x".to_string());

        let mut result = QuoteResult::new();
        result.fill(&fields).set_successful(true);

        assert!(result.successful);
        assert_eq!(result.price, "15,90");
        assert_eq!(result.get("PrazoEntrega"), Some("3"));
        assert_eq!(result.get("Desconhecido"), None);
    }

    #[test]
    fn test_result_serializes_to_json() {
        let mut result = QuoteResult::new();
        result.set_successful(false).set_error("CEP de origem invalido.");

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["successful"], false);
        assert_eq!(json["error_message"], "CEP de origem invalido.");
    }
}
