//! [Doc](https://developer.apple.com/documentation/appstoreconnectapi/generating_tokens_for_api_requests)

use core::time::Duration;
use std::{fs, io, path::Path};

use chrono::{serde::ts_seconds, DateTime, Duration as ChronoDuration, Utc};
use jsonwebtoken::{encode, errors::Error as JsonwebtokenError, Algorithm, EncodingKey, Header};
use log::info;
use serde::{Deserialize, Serialize};

pub const AUDIENCE: &str = "appstoreconnect-v1";
// 20 minutes
pub const EXPIRATION_TIME_DURATION_SECONDS_MAX: u64 = 60 * 20;

//
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Claims {
    pub iss: Box<str>,
    #[serde(with = "ts_seconds")]
    pub iat: DateTime<Utc>,
    #[serde(with = "ts_seconds")]
    pub exp: DateTime<Utc>,
    pub aud: Box<str>,
}

/// Sign an ES256 token for App Store Connect API requests.
///
/// `auth_key_p8_bytes` is the PEM content of the `AuthKey_<key_id>.p8` file downloaded
/// from App Store Connect. The key id ends up in the `kid` header.
///
/// The token lives for `expiration_time_dur` (20 minutes when `None`), never longer
/// than [`EXPIRATION_TIME_DURATION_SECONDS_MAX`].
pub fn create(
    key_id: impl AsRef<str>,
    auth_key_p8_bytes: impl AsRef<[u8]>,
    issuer_id: impl AsRef<str>,
    issued_at: impl Into<Option<DateTime<Utc>>>,
    expiration_time_dur: impl Into<Option<Duration>>,
) -> Result<Box<str>, CreateError> {
    let issuer_id = issuer_id.as_ref();
    if issuer_id.is_empty() {
        return Err(CreateError::IssuerIdEmpty);
    }

    let key = EncodingKey::from_ec_pem(auth_key_p8_bytes.as_ref())
        .map_err(CreateError::MakeEncodingKeyFailed)?;

    let mut header = Header::new(Algorithm::ES256);
    header.typ = Some("JWT".to_owned());
    header.kid = Some(key_id.as_ref().to_owned());

    let issued_at = issued_at.into().unwrap_or_else(Utc::now);
    let expiration_time_dur = expiration_time_dur
        .into()
        .unwrap_or_else(|| Duration::from_secs(EXPIRATION_TIME_DURATION_SECONDS_MAX))
        .min(Duration::from_secs(EXPIRATION_TIME_DURATION_SECONDS_MAX));
    let expiration_time = issued_at + ChronoDuration::seconds(expiration_time_dur.as_secs() as i64);

    let claims = Claims {
        iss: issuer_id.into(),
        iat: issued_at,
        exp: expiration_time,
        aud: AUDIENCE.into(),
    };
    info!(
        "JWT Payload: iss={}, iat={}, exp={}, aud={}",
        claims.iss,
        claims.iat.timestamp(),
        claims.exp.timestamp(),
        claims.aud
    );

    let token = encode(&header, &claims, &key).map_err(CreateError::EncodeFailed)?;

    Ok(token.as_str().into())
}

/// Read the private key at `private_key_path` and sign a token expiring in 20 minutes.
pub fn create_from_path(
    key_id: impl AsRef<str>,
    private_key_path: impl AsRef<Path>,
    issuer_id: impl AsRef<str>,
) -> Result<Box<str>, CreateError> {
    let private_key_path = private_key_path.as_ref();
    let auth_key_p8_bytes =
        fs::read(private_key_path).map_err(|source| CreateError::ReadKeyFailed {
            path: private_key_path.display().to_string(),
            source,
        })?;
    info!("Private key length: {} bytes", auth_key_p8_bytes.len());

    create(key_id, auth_key_p8_bytes, issuer_id, None, None)
}

#[derive(thiserror::Error, Debug)]
pub enum CreateError {
    #[error("issuer id is empty")]
    IssuerIdEmpty,
    #[error("failed to read private key {path}")]
    ReadKeyFailed {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("private key is not a PEM encoded EC key")]
    MakeEncodingKeyFailed(#[source] JsonwebtokenError),
    #[error("failed to sign token")]
    EncodeFailed(#[source] JsonwebtokenError),
}
