//! [Doc](https://developer.apple.com/documentation/appstoreconnectapi/certificates)

pub mod client;
pub mod objects;

pub use client::{ApiResponse, Client, Error, API_BASE_URL, CERTIFICATES_PATH};
pub use objects::{
    Certificate, CertificateAttributes, CertificateCreateRequest, CertificateResponse,
    CertificateType,
};
