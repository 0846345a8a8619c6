use std::{fmt::Display, str::FromStr};

use url::Url;

use crate::gateway::GatewayError;

pub const UAT_BASE_URL: &str = "https://api.uat.payglocal.in";
pub const PROD_BASE_URL: &str = "https://api.prod.payglocal.in";

/// Which gateway deployment requests are addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GatewayEnvironment {
    #[default]
    Uat,
    Prod,
    /// A mock server or proxy.
    Custom(Url),
}

impl GatewayEnvironment {
    pub fn base_url(&self) -> Url {
        match self {
            Self::Uat => Url::parse(UAT_BASE_URL).expect("UAT_BASE_URL is a valid URL"),
            Self::Prod => Url::parse(PROD_BASE_URL).expect("PROD_BASE_URL is a valid URL"),
            Self::Custom(url) => url.clone(),
        }
    }

    /// Join an absolute API path onto the base URL, keeping any path prefix the base URL already has.
    pub fn url_for(&self, path: &str) -> Result<Url, GatewayError> {
        let base = self.base_url();
        let joined = format!("{}{}", base.as_str().trim_end_matches('/'), path);
        Url::parse(&joined).map_err(|e| GatewayError::InvalidEnvironment(format!("Cannot build a URL for {path}. {e}")))
    }
}

impl FromStr for GatewayEnvironment {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "uat" | "test" | "sandbox" => Ok(Self::Uat),
            "prod" | "production" | "live" => Ok(Self::Prod),
            lower if lower.starts_with("http://") || lower.starts_with("https://") => Url::parse(s)
                .map(Self::Custom)
                .map_err(|e| GatewayError::InvalidEnvironment(format!("{s} is not a valid URL. {e}"))),
            _ => Err(GatewayError::InvalidEnvironment(format!(
                "{s} is not a known environment. Use 'uat', 'prod' or a base URL"
            ))),
        }
    }
}

impl Display for GatewayEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uat => write!(f, "UAT"),
            Self::Prod => write!(f, "PROD"),
            Self::Custom(url) => write!(f, "{url}"),
        }
    }
}
