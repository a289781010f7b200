use std::path::PathBuf;

use apple_app_store_connect_certificates::API_BASE_URL;
use clap::{ArgAction, Parser};

pub const DEFAULT_KEY_ID: &str = "ZA7M4DJPV8";
pub const DEFAULT_PRIVATE_KEY_PATH: &str = "AuthKey_ZA7M4DJPV8.p8";
pub const DEFAULT_CSR_PATH: &str = "ios_distribution.csr";
pub const DEFAULT_OUTPUT_PATH: &str = "ios_appstore_distribution.cer";

/// Create an iOS distribution certificate through the App Store Connect API.
///
/// Exits non-zero only when the issuer id, the private key or the CSR is missing.
/// Every other failure is logged and the process still exits 0.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Args {
    /// App Store Connect API Key ID
    #[arg(long, env = "KEY_ID", default_value = DEFAULT_KEY_ID)]
    pub key_id: String,

    /// App Store Connect Issuer ID (likely a UUID)
    #[arg(long, env = "ISSUER_ID")]
    pub issuer_id: Option<String>,

    /// Path to the PEM encoded EC private key
    #[arg(long, value_name = "PATH", default_value = DEFAULT_PRIVATE_KEY_PATH)]
    pub private_key_path: PathBuf,

    /// Path to the PEM encoded certificate signing request
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CSR_PATH)]
    pub csr_path: PathBuf,

    /// Where to write the issued certificate
    #[arg(long, value_name = "PATH", default_value = DEFAULT_OUTPUT_PATH)]
    pub output_path: PathBuf,

    /// Origin of the App Store Connect API, only overridden to point at a mock server
    #[arg(
        long,
        env = "APP_STORE_CONNECT_API_BASE_URL",
        default_value = API_BASE_URL,
        hide = true
    )]
    pub api_base_url: String,

    /// Increase logging verbosity. Can be specified multiple times
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

//
#[derive(Debug, Clone)]
pub struct Config {
    pub key_id: String,
    pub issuer_id: Option<String>,
    pub private_key_path: PathBuf,
    pub csr_path: PathBuf,
    pub output_path: PathBuf,
    pub api_base_url: String,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            key_id: args.key_id,
            issuer_id: args.issuer_id,
            private_key_path: args.private_key_path,
            csr_path: args.csr_path,
            output_path: args.output_path,
            api_base_url: args.api_base_url,
        }
    }
}

impl Config {
    /// Confirm the issuer id is set and both input files exist, returning the issuer id.
    pub fn check_inputs(&self) -> Result<&str, ConfigError> {
        let issuer_id = self
            .issuer_id
            .as_deref()
            .filter(|x| !x.trim().is_empty())
            .ok_or(ConfigError::IssuerIdMissing)?;

        if !self.private_key_path.exists() {
            return Err(ConfigError::PrivateKeyNotFound(
                self.private_key_path.clone(),
            ));
        }

        if !self.csr_path.exists() {
            return Err(ConfigError::CsrNotFound(self.csr_path.clone()));
        }

        Ok(issuer_id)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("missing ISSUER_ID")]
    IssuerIdMissing,
    #[error("private key file not found: {}", .0.display())]
    PrivateKeyNotFound(PathBuf),
    #[error("CSR file not found: {}", .0.display())]
    CsrNotFound(PathBuf),
}
