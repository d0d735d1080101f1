use crate::domain::SUCCESSFUL_CODES;
use crate::utils::error::{FreteError, Result};
use std::collections::BTreeMap;
use xml::reader::{ParserConfig, XmlEvent};

/// Element holding one service quote inside the `<Servicos>` root.
const SERVICE_ELEMENT: &str = "cServico";

/// Documented children of `cServico`.
pub const REPLY_FIELDS: [&str; 10] = [
    "Codigo",
    "Valor",
    "PrazoEntrega",
    "ValorMaoPropria",
    "ValorAvisoRecebimento",
    "ValorValorDeclarado",
    "EntregaDomiciliar",
    "EntregaSabado",
    "Erro",
    "MsgErro",
];

/// The first `cServico` block of a carrier reply, keyed by element name.
///
/// Every documented field is present; elements the carrier left out read as
/// empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarrierReply {
    fields: BTreeMap<String, String>,
}

impl CarrierReply {
    /// Reads a raw reply body. The XML declaration decides the charset, so
    /// ISO-8859-1 replies decode without help from the transport.
    pub fn parse(body: &[u8]) -> Result<Self> {
        let mut fields: BTreeMap<String, String> = REPLY_FIELDS
            .iter()
            .map(|name| (name.to_string(), String::new()))
            .collect();

        let reader = ParserConfig::new()
            .whitespace_to_characters(true)
            .cdata_to_characters(true)
            .create_reader(body);

        let mut in_service = false;
        let mut seen_service = false;
        let mut current: Option<String> = None;

        for event in reader {
            let event = event.map_err(|e| {
                tracing::debug!("Carrier reply is not valid XML: {}", e);
                FreteError::fetch()
            })?;

            match event {
                XmlEvent::StartElement { name, .. } => {
                    if name.local_name == SERVICE_ELEMENT && !seen_service {
                        in_service = true;
                    } else if in_service && fields.contains_key(&name.local_name) {
                        current = Some(name.local_name);
                    }
                }
                XmlEvent::Characters(text) => {
                    if let Some(field) = current.as_ref().and_then(|c| fields.get_mut(c)) {
                        field.push_str(&text);
                    }
                }
                XmlEvent::EndElement { name } => {
                    if name.local_name == SERVICE_ELEMENT && in_service {
                        in_service = false;
                        seen_service = true;
                    }
                    current = None;
                }
                _ => {}
            }
        }

        if !seen_service {
            tracing::warn!("Carrier reply has no {} element", SERVICE_ELEMENT);
        }

        Ok(Self { fields })
    }

    pub fn get(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or_default()
    }

    pub fn error_code(&self) -> &str {
        self.get("Erro")
    }

    pub fn error_message(&self) -> &str {
        self.get("MsgErro")
    }

    /// Padding around `Erro` is ignored here; the stored value is not touched.
    pub fn is_successful(&self) -> bool {
        SUCCESSFUL_CODES.contains(&self.error_code().trim())
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }
}
