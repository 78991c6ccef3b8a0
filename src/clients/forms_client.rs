//! Forms API 客户端

use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use crate::api::{BatchUpdateFormRequest, CreateFormRequest, CreatedForm};
use crate::clients::google_client::{endpoint_url, validate_resource_id, GoogleClient};
use crate::config::Config;
use crate::error::AppResult;
use crate::models::RemoteForm;
use crate::services::FormsApi;

/// 表单客户端
#[derive(Clone)]
pub struct FormsClient {
    google: GoogleClient,
    base_url: String,
}

impl FormsClient {
    pub fn new(google: GoogleClient, config: &Config) -> Self {
        Self {
            google,
            base_url: config.forms_api_base_url.clone(),
        }
    }
}

impl FormsApi for FormsClient {
    async fn create_form(&self, request: &CreateFormRequest) -> AppResult<RemoteForm> {
        let url = endpoint_url(&self.base_url, &["forms"])?;
        let created: CreatedForm = self
            .google
            .send_json("forms.create", Method::POST, url, Some(request))
            .await?;

        validate_resource_id("form id", &created.form_id)?;
        debug!("表单已创建: {}", created.form_id);

        Ok(RemoteForm {
            form_id: created.form_id,
            responder_uri: created.responder_uri,
        })
    }

    async fn batch_update(&self, form_id: &str, request: &BatchUpdateFormRequest) -> AppResult<()> {
        validate_resource_id("form id", form_id)?;
        let url = endpoint_url(&self.base_url, &["forms", &format!("{}:batchUpdate", form_id)])?;
        let _: Value = self
            .google
            .send_json("forms.batchUpdate", Method::POST, url, Some(request))
            .await?;
        Ok(())
    }
}
