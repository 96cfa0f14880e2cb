//! Direct upload to the third-party media host.
//!
//! Two steps: the backend signs an upload (see
//! `services::seller::SellerService::sign_upload`), then the file goes
//! straight to the media host as multipart form data. The bearer token is
//! never sent to the media host.

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tokio::time::timeout;

use crate::api::client::ApiClient;
use crate::api::error::{extract_message, ApiError};

/// Signed upload parameters issued by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadDescriptor {
    pub upload_url: String,
    pub api_key: String,
    pub timestamp: i64,
    pub signature: String,
    #[serde(default)]
    pub folder: Option<String>,
}

/// An image ready to be uploaded.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Deserialize)]
struct UploadResult {
    secure_url: String,
}

impl ApiClient {
    /// Uploads one image with a signed descriptor and returns its hosted URL.
    pub async fn upload_image(
        &self,
        descriptor: &UploadDescriptor,
        image: ImageFile,
    ) -> Result<String, ApiError> {
        let mut form = Form::new()
            .part("file", Part::bytes(image.bytes).file_name(image.file_name))
            .text("api_key", descriptor.api_key.clone())
            .text("timestamp", descriptor.timestamp.to_string())
            .text("signature", descriptor.signature.clone());
        if let Some(folder) = &descriptor.folder {
            form = form.text("folder", folder.clone());
        }

        let request = self.http().post(&descriptor.upload_url).multipart(form).send();
        let response = match timeout(self.request_timeout(), request).await {
            Ok(Ok(response)) => response,
            Ok(Err(source)) => {
                return Err(ApiError::Connection {
                    url: descriptor.upload_url.clone(),
                    source,
                })
            }
            Err(_) => {
                return Err(ApiError::Timeout {
                    duration: self.request_timeout().as_secs(),
                })
            }
        };

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Media host rejected upload");
            return Err(ApiError::Upload(extract_message(&body).unwrap_or_default()));
        }

        let result: UploadResult = serde_json::from_str(&body).map_err(|e| ApiError::Decode {
            path: descriptor.upload_url.clone(),
            reason: e.to_string(),
        })?;
        Ok(result.secure_url)
    }
}
