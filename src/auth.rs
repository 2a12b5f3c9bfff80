//! Mock phone/OTP authentication
//!
//! Nothing here is real security: the OTP is generated locally, shown to
//! the user, and compared literally. The only network call in the whole
//! application lives here — a read-only lookup of country dial codes at
//! login-page load, which degrades silently to an empty list on failure.

use crate::error::{ChatterboxError, Result};
use rand::Rng;
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

/// Default country/dial-code lookup endpoint
pub const DEFAULT_COUNTRIES_ENDPOINT: &str = "https://restcountries.com/v3.1/all?fields=name,idd";

/// A country with its phone dial code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    /// Common country name
    pub name: String,
    /// Dial code including the leading `+`
    pub dial_code: String,
}

#[derive(Debug, Deserialize)]
struct CountryRecord {
    name: CountryName,
    #[serde(default)]
    idd: DialInfo,
}

#[derive(Debug, Deserialize)]
struct CountryName {
    common: String,
}

#[derive(Debug, Default, Deserialize)]
struct DialInfo {
    root: Option<String>,
    #[serde(default)]
    suffixes: Vec<String>,
}

/// Fetch the country dial-code list
///
/// Countries without a complete dial code are skipped; the result is
/// sorted by name. Callers treat any error as "no countries" and log it —
/// login proceeds either way.
///
/// # Arguments
///
/// * `client` - Shared HTTP client
/// * `endpoint` - Lookup URL (configurable; see [`DEFAULT_COUNTRIES_ENDPOINT`])
pub async fn fetch_countries(client: &reqwest::Client, endpoint: &str) -> Result<Vec<Country>> {
    let records: Vec<CountryRecord> = client
        .get(endpoint)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let mut countries: Vec<Country> = records
        .into_iter()
        .filter_map(|record| {
            let root = record.idd.root?;
            let suffix = record.idd.suffixes.first()?;
            Some(Country {
                name: record.name.common,
                dial_code: format!("{}{}", root, suffix),
            })
        })
        .collect();

    countries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(countries)
}

/// Validate a phone number: digits only, at least 6
///
/// # Errors
///
/// Returns `ChatterboxError::Validation` with a user-facing message.
pub fn validate_phone(phone: &str) -> Result<()> {
    static PHONE_RE: OnceLock<Regex> = OnceLock::new();
    let re = PHONE_RE.get_or_init(|| Regex::new(r"^[0-9]{6,15}$").expect("valid phone regex"));
    if re.is_match(phone.trim()) {
        Ok(())
    } else {
        Err(ChatterboxError::Validation("Invalid phone number".to_string()).into())
    }
}

/// Validate an OTP: exactly 6 digits
///
/// # Errors
///
/// Returns `ChatterboxError::Validation` with a user-facing message.
pub fn validate_otp(otp: &str) -> Result<()> {
    static OTP_RE: OnceLock<Regex> = OnceLock::new();
    let re = OTP_RE.get_or_init(|| Regex::new(r"^[0-9]{6}$").expect("valid otp regex"));
    if re.is_match(otp.trim()) {
        Ok(())
    } else {
        Err(ChatterboxError::Validation("Enter 6-digit OTP".to_string()).into())
    }
}

/// Generate a random 6-digit OTP
pub fn generate_otp() -> String {
    rand::rng().random_range(100_000..=999_999).to_string()
}

/// Authenticated-user context
///
/// Created once the OTP is verified and passed down to the dashboard and
/// chat session explicitly; dropped on logout. There is deliberately no
/// global auth state.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Dial code chosen at login, if the country list was available
    pub dial_code: Option<String>,
    /// The verified phone number
    pub phone: String,
}

impl AuthContext {
    /// Create a context for a verified login
    pub fn log_in(dial_code: Option<String>, phone: impl Into<String>) -> Self {
        Self {
            dial_code,
            phone: phone.into(),
        }
    }

    /// The number as displayed in the dashboard header
    pub fn display_number(&self) -> String {
        match &self.dial_code {
            Some(code) => format!("{} {}", code, self.phone),
            None => self.phone.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_validate_phone_accepts_digits() {
        assert!(validate_phone("123456").is_ok());
        assert!(validate_phone("  5551234567  ").is_ok());
    }

    #[test]
    fn test_validate_phone_rejects_short_or_non_digit() {
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("phone").is_err());
        assert!(validate_phone("123-4567").is_err());
        assert!(validate_phone("").is_err());
    }

    #[test]
    fn test_validate_otp() {
        assert!(validate_otp("123456").is_ok());
        assert!(validate_otp("12345").is_err());
        assert!(validate_otp("1234567").is_err());
        assert!(validate_otp("12345a").is_err());
    }

    #[test]
    fn test_generate_otp_shape() {
        for _ in 0..20 {
            let otp = generate_otp();
            assert_eq!(otp.len(), 6);
            assert!(validate_otp(&otp).is_ok());
        }
    }

    #[test]
    fn test_auth_context_display_number() {
        let ctx = AuthContext::log_in(Some("+33".to_string()), "612345678");
        assert_eq!(ctx.display_number(), "+33 612345678");

        let ctx = AuthContext::log_in(None, "612345678");
        assert_eq!(ctx.display_number(), "612345678");
    }

    #[tokio::test]
    async fn test_fetch_countries_parses_and_sorts() {
        let server = MockServer::start().await;
        let payload = serde_json::json!([
            {
                "name": { "common": "Vietnam" },
                "idd": { "root": "+8", "suffixes": ["4"] }
            },
            {
                "name": { "common": "France" },
                "idd": { "root": "+3", "suffixes": ["3"] }
            },
            {
                "name": { "common": "Nowhere" },
                "idd": {}
            }
        ]);
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let countries = fetch_countries(&client, &server.uri())
            .await
            .expect("fetch countries");

        // Incomplete dial info is skipped, the rest sorted by name
        assert_eq!(
            countries,
            vec![
                Country {
                    name: "France".to_string(),
                    dial_code: "+33".to_string()
                },
                Country {
                    name: "Vietnam".to_string(),
                    dial_code: "+84".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_countries_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        assert!(fetch_countries(&client, &server.uri()).await.is_err());
    }
}
