use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Status envelope returned by mutating loan endpoints.
///
/// `status_code` mirrors the HTTP status as a string, e.g. `"201"`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDto {
    pub status_code: String,
    pub status_msg: String,
}

impl ResponseDto {
    pub fn new(status_code: &str, status_msg: &str) -> Self {
        Self { status_code: status_code.to_string(), status_msg: status_msg.to_string() }
    }
}

/// Support contact published by `/api/contact-info`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    pub on_call_support: Vec<String>,
}
