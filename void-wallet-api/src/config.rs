//! Server configuration loaded from the environment

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use tracing::warn;
use void_wallet::crypto::keys::ChecksumPolicy;
use void_wallet::AccountConfig;

/// API server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Interface to bind
    pub host: IpAddr,
    /// Port to bind
    pub port: u16,
    /// WIF checksum handling for private key import
    pub wif_checksum: ChecksumPolicy,
    /// Allow cross-origin requests from any origin
    pub cors_permissive: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            wif_checksum: ChecksumPolicy::Verify,
            cors_permissive: true,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through a variable lookup function
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            host: parse_or("VOID_API_HOST", lookup("VOID_API_HOST"), defaults.host),
            port: parse_or("VOID_API_PORT", lookup("VOID_API_PORT"), defaults.port),
            wif_checksum: match lookup("VOID_WIF_CHECKSUM").as_deref() {
                None => defaults.wif_checksum,
                Some("verify") => ChecksumPolicy::Verify,
                Some("skip") => ChecksumPolicy::Skip,
                Some(other) => {
                    warn!(value = other, "VOID_WIF_CHECKSUM must be 'verify' or 'skip', using default");
                    defaults.wif_checksum
                }
            },
            cors_permissive: parse_or(
                "VOID_CORS_PERMISSIVE",
                lookup("VOID_CORS_PERMISSIVE"),
                defaults.cors_permissive,
            ),
        }
    }

    /// Socket address to bind
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Configuration for the account service
    pub fn account_config(&self) -> AccountConfig {
        AccountConfig { wif_checksum: self.wif_checksum }
    }
}

fn parse_or<T: FromStr>(name: &str, value: Option<String>, default: T) -> T {
    match value {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(variable = name, value = %raw, "unparsable value, using default");
            default
        }),
    }
}
