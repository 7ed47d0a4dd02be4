use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::info;

use crate::error::ProposalError;
use crate::types::Letterhead;

/// Which search backend feeds the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchProviderKind {
    #[default]
    DuckDuckGo,
    Serper,
}

impl FromStr for SearchProviderKind {
    type Err = ProposalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "duckduckgo" | "ddg" => Ok(Self::DuckDuckGo),
            "serper" | "google" => Ok(Self::Serper),
            other => Err(ProposalError::Config(format!(
                "SEARCH_PROVIDER must be duckduckgo or serper, got {other}"
            ))),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Loaded once at process start and passed explicitly; never mutated after.
#[derive(Debug, Clone)]
pub struct Config {
    // Generative model
    pub google_api_key: Option<String>,
    pub gemini_model: String,
    pub strict_schema: bool,

    // Search
    pub search_provider: SearchProviderKind,
    pub serper_api_key: Option<String>,
    pub search_region: String,
    pub search_language: String,
    pub search_timeout: Duration,

    // Web server
    pub api_host: String,
    pub api_port: u16,
    pub static_dir: PathBuf,

    // Document
    pub company_name: Option<String>,
    pub company_contact: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            google_api_key: None,
            gemini_model: "gemini-3-flash-preview".to_string(),
            strict_schema: false,
            search_provider: SearchProviderKind::DuckDuckGo,
            serper_api_key: None,
            search_region: "jp-jp".to_string(),
            search_language: "ja".to_string(),
            search_timeout: Duration::from_secs(15),
            api_host: "0.0.0.0".to_string(),
            api_port: 8000,
            static_dir: PathBuf::from("static"),
            company_name: None,
            company_contact: Vec::new(),
        }
    }
}

impl Config {
    /// Load `.env` (if present) and then the process environment.
    pub fn from_env() -> Result<Self, ProposalError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ProposalError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let search_provider = match get("SEARCH_PROVIDER") {
            Some(v) => v.parse()?,
            None => defaults.search_provider,
        };
        let serper_api_key = get("SERPER_API_KEY");
        if search_provider == SearchProviderKind::Serper && serper_api_key.is_none() {
            return Err(ProposalError::Config(
                "SERPER_API_KEY is required when SEARCH_PROVIDER=serper".to_string(),
            ));
        }

        Ok(Self {
            google_api_key: get("GOOGLE_API_KEY"),
            gemini_model: get("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            strict_schema: match get("STRICT_SCHEMA") {
                Some(v) => parse_bool("STRICT_SCHEMA", &v)?,
                None => defaults.strict_schema,
            },
            search_provider,
            serper_api_key,
            search_region: get("SEARCH_REGION").unwrap_or(defaults.search_region),
            search_language: get("SEARCH_LANGUAGE").unwrap_or(defaults.search_language),
            search_timeout: match get("SEARCH_TIMEOUT_SECS") {
                Some(v) => Duration::from_secs(parse_number("SEARCH_TIMEOUT_SECS", &v)?),
                None => defaults.search_timeout,
            },
            api_host: get("API_HOST").unwrap_or(defaults.api_host),
            api_port: match get("API_PORT") {
                Some(v) => parse_number("API_PORT", &v)?,
                None => defaults.api_port,
            },
            static_dir: get("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            company_name: get("COMPANY_NAME"),
            company_contact: get("COMPANY_CONTACT")
                .map(|v| {
                    v.split('|')
                        .map(str::trim)
                        .filter(|l| !l.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        })
    }

    /// Override the model credential (CLI `--api-key`).
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        if !key.trim().is_empty() {
            self.google_api_key = Some(key);
        }
        self
    }

    /// The model credential, or `MissingCredential` before any request is made.
    pub fn require_api_key(&self) -> Result<&str, ProposalError> {
        self.google_api_key
            .as_deref()
            .ok_or(ProposalError::MissingCredential)
    }

    /// Letterhead for rendered documents, when a company name is configured.
    pub fn letterhead(&self) -> Option<Letterhead> {
        self.company_name.as_ref().map(|name| Letterhead {
            name: name.clone(),
            lines: self.company_contact.clone(),
        })
    }

    /// Country part of the region code (`jp-jp` -> `jp`), for Serper's `gl`.
    pub fn search_country(&self) -> &str {
        self.search_region
            .split('-')
            .next()
            .unwrap_or(&self.search_region)
    }

    /// Log config presence without leaking secrets.
    pub fn log_redacted(&self) {
        info!(
            google_api_key = presence(&self.google_api_key),
            gemini_model = %self.gemini_model,
            strict_schema = self.strict_schema,
            search_provider = ?self.search_provider,
            serper_api_key = presence(&self.serper_api_key),
            search_region = %self.search_region,
            search_timeout_secs = self.search_timeout.as_secs(),
            "Configuration loaded"
        );
    }
}

fn presence(value: &Option<String>) -> &'static str {
    if value.is_some() {
        "set"
    } else {
        "missing"
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T, ProposalError> {
    value
        .trim()
        .parse()
        .map_err(|_| ProposalError::Config(format!("{key} must be a number, got {value}")))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ProposalError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ProposalError::Config(format!(
            "{key} must be true or false, got {value}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert!(config.google_api_key.is_none());
        assert_eq!(config.gemini_model, "gemini-3-flash-preview");
        assert_eq!(config.search_provider, SearchProviderKind::DuckDuckGo);
        assert_eq!(config.search_region, "jp-jp");
        assert_eq!(config.search_timeout, Duration::from_secs(15));
        assert_eq!(config.api_port, 8000);
        assert!(!config.strict_schema);
    }

    #[test]
    fn empty_key_counts_as_missing() {
        let config = Config::from_lookup(lookup(&[("GOOGLE_API_KEY", "  ")])).unwrap();
        assert!(matches!(
            config.require_api_key(),
            Err(ProposalError::MissingCredential)
        ));
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("GOOGLE_API_KEY", "AIza-test"),
            ("GEMINI_MODEL", "gemini-2.5-flash"),
            ("SEARCH_PROVIDER", "serper"),
            ("SERPER_API_KEY", "serper-key"),
            ("SEARCH_REGION", "us-en"),
            ("SEARCH_TIMEOUT_SECS", "3"),
            ("STRICT_SCHEMA", "true"),
            ("API_PORT", "9000"),
        ]))
        .unwrap();
        assert_eq!(config.require_api_key().unwrap(), "AIza-test");
        assert_eq!(config.gemini_model, "gemini-2.5-flash");
        assert_eq!(config.search_provider, SearchProviderKind::Serper);
        assert_eq!(config.search_country(), "us");
        assert_eq!(config.search_timeout, Duration::from_secs(3));
        assert!(config.strict_schema);
        assert_eq!(config.api_port, 9000);
    }

    #[test]
    fn serper_without_key_is_a_config_error() {
        let err = Config::from_lookup(lookup(&[("SEARCH_PROVIDER", "serper")])).unwrap_err();
        assert!(matches!(err, ProposalError::Config(_)));
    }

    #[test]
    fn bad_numbers_are_config_errors() {
        let err = Config::from_lookup(lookup(&[("API_PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("API_PORT"));
    }

    #[test]
    fn letterhead_needs_a_company_name() {
        assert!(Config::default().letterhead().is_none());

        let config = Config::from_lookup(lookup(&[
            ("COMPANY_NAME", "株式会社サンプル"),
            ("COMPANY_CONTACT", "TEL 03-0000-0000 | | Mail: sales@example.jp"),
        ]))
        .unwrap();
        let head = config.letterhead().unwrap();
        assert_eq!(head.name, "株式会社サンプル");
        assert_eq!(head.lines, vec!["TEL 03-0000-0000", "Mail: sales@example.jp"]);
    }

    #[test]
    fn cli_key_overrides_env() {
        let config = Config::default().with_api_key("from-cli");
        assert_eq!(config.require_api_key().unwrap(), "from-cli");
        let config = Config::default().with_api_key("");
        assert!(config.require_api_key().is_err());
    }
}
