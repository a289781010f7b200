use serde::{Deserialize, Serialize};

pub const RESOURCE_TYPE: &str = "certificates";

//
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CertificateType {
    Development,
    Distribution,
    IosDevelopment,
    IosDistribution,
    MacAppDevelopment,
    MacAppDistribution,
    MacInstallerDistribution,
    DeveloperIdApplication,
    DeveloperIdKext,
    PassTypeId,
    PassTypeIdWithNfc,
    #[serde(other)]
    Unknown,
}

//
#[derive(Serialize, Debug, Clone)]
pub struct CertificateCreateRequest {
    pub data: CertificateCreateRequestData,
}

#[derive(Serialize, Debug, Clone)]
pub struct CertificateCreateRequestData {
    pub r#type: Box<str>,
    pub attributes: CertificateCreateRequestAttributes,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CertificateCreateRequestAttributes {
    pub certificate_type: CertificateType,
    pub csr_content: Box<str>,
}

impl CertificateCreateRequest {
    pub fn new(certificate_type: CertificateType, csr_content: impl AsRef<str>) -> Self {
        Self {
            data: CertificateCreateRequestData {
                r#type: RESOURCE_TYPE.into(),
                attributes: CertificateCreateRequestAttributes {
                    certificate_type,
                    csr_content: csr_content.as_ref().into(),
                },
            },
        }
    }
}

//
#[derive(Deserialize, Debug, Clone)]
pub struct CertificateResponse {
    pub data: Certificate,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Certificate {
    pub id: Box<str>,
    #[serde(default)]
    pub r#type: Option<Box<str>>,
    pub attributes: CertificateAttributes,
}

/// Only `certificateContent` is required, the rest varies by certificate type.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CertificateAttributes {
    /// Base64 DER, written to disk as received.
    pub certificate_content: Box<str>,
    #[serde(default)]
    pub certificate_type: Option<CertificateType>,
    #[serde(default)]
    pub display_name: Option<Box<str>>,
    #[serde(default)]
    pub name: Option<Box<str>>,
    #[serde(default)]
    pub platform: Option<Box<str>>,
    #[serde(default)]
    pub serial_number: Option<Box<str>>,
    #[serde(default)]
    pub expiration_date: Option<Box<str>>,
}
