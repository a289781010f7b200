use std::{error::Error as StdError, fs, io, path::PathBuf};

use apple_app_store_connect_api_token::{create_from_path, CreateError};
use apple_app_store_connect_certificates::{CertificateType, Client, Error as ClientError};
use log::{error, info, warn};

use crate::config::{Config, ConfigError};

const TOKEN_PREFIX_LEN: usize = 50;

//
#[derive(Debug)]
pub enum Outcome {
    Success {
        certificate_id: String,
        output_path: PathBuf,
    },
    ConfigMissing(ConfigError),
    SigningFailed(CreateError),
    ApiRejected {
        status: u16,
        body: String,
    },
    UnexpectedFailure(FlowError),
}

impl Outcome {
    /// Anything but missing inputs exits 0 so the surrounding pipeline keeps going
    /// with whichever certificate it already has.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::ConfigMissing(_) => 1,
            _ => 0,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum FlowError {
    #[error("failed to read CSR {}", .path.display())]
    ReadCsrFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("App Store Connect request failed")]
    Api(#[from] ClientError),
    #[error("failed to write certificate {}", .path.display())]
    WriteCertificateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Request a distribution certificate and write it to `config.output_path`.
pub fn run(config: &Config) -> Outcome {
    info!("Using Key ID: {}", config.key_id);
    info!(
        "Using Issuer ID: {}",
        config.issuer_id.as_deref().unwrap_or_default()
    );

    let issuer_id = match config.check_inputs() {
        Ok(x) => x,
        Err(err) => {
            error!("{err}");
            return Outcome::ConfigMissing(err);
        }
    };

    let csr_content = match fs::read_to_string(&config.csr_path) {
        Ok(x) => x,
        Err(source) => {
            return unexpected(FlowError::ReadCsrFailed {
                path: config.csr_path.clone(),
                source,
            })
        }
    };

    info!("Creating JWT token...");
    let token = match create_from_path(&config.key_id, &config.private_key_path, issuer_id) {
        Ok(x) => x,
        Err(err) => {
            log_error_chain(&err);
            warn!("Token creation failed, but continuing pipeline...");
            return Outcome::SigningFailed(err);
        }
    };
    info!("JWT token created successfully");

    match request_certificate(config, issuer_id, &token, csr_content.trim()) {
        Ok(outcome) => outcome,
        Err(err) => unexpected(err),
    }
}

fn request_certificate(
    config: &Config,
    issuer_id: &str,
    token: &str,
    csr_content: &str,
) -> Result<Outcome, FlowError> {
    let client = Client::with_base_url(&config.api_base_url)?;

    info!("Testing API connectivity first...");
    let probe = client.list_certificates(token)?;
    info!("Test API Response: {}", probe.status);
    if probe.status == 200 {
        info!("API connectivity test successful");
    } else {
        warn!("API test failed: {}", probe.body);
    }

    info!("Calling App Store Connect API to create certificate...");
    let response = client.create_certificate(token, CertificateType::Distribution, csr_content)?;
    info!("API Response Status: {}", response.status);

    if !response.is_created() {
        error!("Failed to create certificate: {}", response.status);
        error!("Response: {}", response.body);

        if response.status == 401 {
            let token_prefix = token.chars().take(TOKEN_PREFIX_LEN).collect::<String>();
            info!("Debug info for 401 error:");
            info!("  - Token length: {}", token.len());
            info!("  - Token starts with: {token_prefix}...");
            info!("  - Key ID: {}", config.key_id);
            info!("  - Issuer ID: {issuer_id}");
        }

        warn!("Certificate creation failed, but continuing pipeline...");
        return Ok(Outcome::ApiRejected {
            status: response.status,
            body: response.body,
        });
    }

    let certificate = response.certificate()?.data;

    fs::write(
        &config.output_path,
        certificate.attributes.certificate_content.as_bytes(),
    )
    .map_err(|source| FlowError::WriteCertificateFailed {
        path: config.output_path.clone(),
        source,
    })?;

    info!("App Store distribution certificate created successfully!");
    info!("Certificate ID: {}", certificate.id);

    Ok(Outcome::Success {
        certificate_id: certificate.id.into(),
        output_path: config.output_path.clone(),
    })
}

fn unexpected(err: FlowError) -> Outcome {
    log_error_chain(&err);
    warn!("Exception occurred, but continuing pipeline...");
    Outcome::UnexpectedFailure(err)
}

fn log_error_chain(err: &dyn StdError) {
    error!("Error: {err}");
    let mut source = err.source();
    while let Some(err) = source {
        error!("  caused by: {err}");
        source = err.source();
    }
}
