use std::io;

use isahc::{
    http::{header, Error as HttpError, Request},
    Body, Error as IsahcError, HttpClient, ReadResponseExt,
};
use log::debug;
use serde_json::Error as SerdeJsonError;

use crate::objects::{CertificateCreateRequest, CertificateResponse, CertificateType};

pub const API_BASE_URL: &str = "https://api.appstoreconnect.apple.com";
pub const CERTIFICATES_PATH: &str = "/v1/certificates";

const USER_AGENT: &str =
    "apple-app-store-connect-certificates (https://github.com/bk-rs/apple-rs)";

//
/// Status and body of an App Store Connect response, left for the caller to interpret.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_created(&self) -> bool {
        self.status == 201
    }

    pub fn certificate(&self) -> Result<CertificateResponse, Error> {
        serde_json::from_str(&self.body).map_err(Error::DeserializeResponseBodyFailed)
    }
}

//
/// Blocking client for the Certificates resource.
///
/// Every call issues a fresh request; nothing is retried or deduplicated.
#[derive(Debug, Clone)]
pub struct Client {
    http_client: HttpClient,
    base_url: Box<str>,
}

impl Client {
    pub fn new() -> Result<Self, Error> {
        Self::with_base_url(API_BASE_URL)
    }

    pub fn with_base_url(base_url: impl AsRef<str>) -> Result<Self, Error> {
        let http_client = HttpClient::builder()
            .default_header(header::USER_AGENT, USER_AGENT)
            .build()
            .map_err(Error::MakeHttpClientFailed)?;

        Ok(Self {
            http_client,
            base_url: base_url.as_ref().trim_end_matches('/').into(),
        })
    }

    pub fn certificates_url(&self) -> String {
        format!("{}{}", self.base_url, CERTIFICATES_PATH)
    }

    /// `GET /v1/certificates`
    pub fn list_certificates(&self, token: impl AsRef<str>) -> Result<ApiResponse, Error> {
        let request = Request::get(self.certificates_url())
            .header(header::AUTHORIZATION, bearer(token.as_ref()))
            .header(header::ACCEPT, "application/json")
            .body(())
            .map_err(Error::MakeRequestFailed)?;

        self.send(request)
    }

    /// `POST /v1/certificates`
    ///
    /// Not idempotent, each successful call creates a new certificate.
    pub fn create_certificate(
        &self,
        token: impl AsRef<str>,
        certificate_type: CertificateType,
        csr_content: impl AsRef<str>,
    ) -> Result<ApiResponse, Error> {
        let body = serde_json::to_vec(&CertificateCreateRequest::new(
            certificate_type,
            csr_content,
        ))
        .map_err(Error::SerializeRequestBodyFailed)?;

        let request = Request::post(self.certificates_url())
            .header(header::AUTHORIZATION, bearer(token.as_ref()))
            .header(header::ACCEPT, "application/json")
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .map_err(Error::MakeRequestFailed)?;

        self.send(request)
    }

    fn send<B: Into<Body>>(&self, request: Request<B>) -> Result<ApiResponse, Error> {
        debug!("{} {}", request.method(), request.uri());

        let mut response = self
            .http_client
            .send(request)
            .map_err(Error::SendRequestFailed)?;

        let status = response.status().as_u16();
        let body = response.text().map_err(Error::ReadResponseBodyFailed)?;

        debug!("HTTP {status}, {} bytes", body.len());

        Ok(ApiResponse { status, body })
    }
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to make HTTP client")]
    MakeHttpClientFailed(#[source] IsahcError),
    #[error("failed to make request")]
    MakeRequestFailed(#[source] HttpError),
    #[error("failed to serialize request body")]
    SerializeRequestBodyFailed(#[source] SerdeJsonError),
    #[error("failed to send request")]
    SendRequestFailed(#[source] IsahcError),
    #[error("failed to read response body")]
    ReadResponseBodyFailed(#[source] io::Error),
    #[error("failed to deserialize response body")]
    DeserializeResponseBodyFailed(#[source] SerdeJsonError),
}
