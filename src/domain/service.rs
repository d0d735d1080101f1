//! Carrier service codes for the products most contracts include.

pub const SEDEX: &str = "40010";
pub const SEDEX_A_COBRAR: &str = "40045";
pub const SEDEX_10: &str = "40215";
pub const SEDEX_HOJE: &str = "40290";
pub const PAC: &str = "41106";
pub const E_SEDEX: &str = "81019";

/// Queried when the caller does not pick services.
pub const DEFAULT_SERVICES: [&str; 2] = [SEDEX, PAC];

pub fn default_service_codes() -> Vec<String> {
    DEFAULT_SERVICES.iter().map(|c| c.to_string()).collect()
}

/// Human name for a known code.
pub fn name(code: &str) -> Option<&'static str> {
    match code {
        SEDEX => Some("SEDEX"),
        SEDEX_A_COBRAR => Some("SEDEX a Cobrar"),
        SEDEX_10 => Some("SEDEX 10"),
        SEDEX_HOJE => Some("SEDEX Hoje"),
        PAC => Some("PAC"),
        E_SEDEX => Some("e-SEDEX"),
        _ => None,
    }
}
