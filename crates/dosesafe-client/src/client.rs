//! Thin async client over the analysis service

use std::path::Path;
use std::time::Duration;

use dosesafe_core::validation::validate_upload;
use dosesafe_core::{
    ChatReply, ChatTurn, Config, FallbackResponder, InteractionMedication, InteractionReport,
    ManualMedication, ScanRecord,
};
use reqwest::multipart::{Form, Part};
use reqwest::RequestBuilder;
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

use crate::{responses, ClientError, Endpoint};

pub struct ApiClient {
    http: reqwest::Client,
    config: Config,
    fallback: FallbackResponder,
}

impl ApiClient {
    pub fn new(config: Config) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(ClientError::Build)?;
        Ok(Self::with_http_client(config, http))
    }

    /// Use a preconfigured `reqwest::Client` (proxies, TLS, test setups)
    pub fn with_http_client(config: Config, http: reqwest::Client) -> Self {
        Self {
            http,
            config,
            fallback: FallbackResponder::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Upload a prescription image or PDF for OCR and analysis
    pub async fn scan_image(
        &self,
        path: &Path,
        patient_age: u32,
        patient_condition: &str,
    ) -> Result<ScanRecord, ClientError> {
        let file_error = |source| ClientError::File {
            path: path.to_path_buf(),
            source,
        };
        let size = std::fs::metadata(path).map_err(file_error)?.len();
        let mime = validate_upload(path, size)?;
        let bytes = std::fs::read(path).map_err(file_error)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        info!(file = %file_name, size, "starting OCR processing");

        let part = Part::bytes(bytes)
            .file_name(file_name.clone())
            .mime_str(mime)
            .map_err(ClientError::Build)?;
        let form = Form::new()
            .part("file", part)
            .text("patientAge", patient_age.to_string())
            .text("patientCondition", patient_condition.to_string());

        let endpoint = Endpoint::ScanImage;
        let timeout = self.config.image_timeout;
        let request = self
            .http
            .post(self.config.endpoint(endpoint.path()))
            .multipart(form);
        let data = self.execute(endpoint, request, timeout).await?;

        Ok(responses::image_scan(
            &data,
            patient_age,
            patient_condition,
            Some(&file_name),
        ))
    }

    /// Analyze a hand-entered medication list
    pub async fn scan_manual(
        &self,
        medications: &[ManualMedication],
        patient_age: u32,
        patient_condition: &str,
    ) -> Result<ScanRecord, ClientError> {
        info!(medications = medications.len(), "processing manual entry");
        let body = json!({
            "medications": medications,
            "patient_age": patient_age,
            "patient_condition": patient_condition,
        });
        let data = self.post_json(Endpoint::ScanManual, &body).await?;
        Ok(responses::manual_scan(&data, patient_age, patient_condition))
    }

    pub async fn try_check_interactions(
        &self,
        medications: &[InteractionMedication],
        patient_age: u32,
    ) -> Result<InteractionReport, ClientError> {
        let body = json!({
            "medications": medications,
            "patient_age": patient_age,
        });
        let data = self.post_json(Endpoint::Interactions, &body).await?;
        Ok(responses::interactions(&data))
    }

    /// Interaction check that never fails: errors yield a report advising the
    /// user to consult their provider
    pub async fn check_interactions(
        &self,
        medications: &[InteractionMedication],
        patient_age: u32,
    ) -> InteractionReport {
        match self.try_check_interactions(medications, patient_age).await {
            Ok(report) => report,
            Err(e) => {
                error!("interaction API error: {e}");
                InteractionReport::unavailable()
            }
        }
    }

    pub async fn try_send_chat(
        &self,
        message: &str,
        history: &[ChatTurn],
    ) -> Result<ChatReply, ClientError> {
        let body = json!({
            "message": message,
            "history": history,
        });
        let data = self.post_json(Endpoint::Chat, &body).await?;
        Ok(responses::chat(&data))
    }

    /// Chat call that never fails: errors yield a canned answer
    pub async fn send_chat(&self, message: &str, history: &[ChatTurn]) -> ChatReply {
        match self.try_send_chat(message, history).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("chatbot API error, answering offline: {e}");
                self.fallback.respond(message)
            }
        }
    }

    pub async fn health(&self) -> Result<Value, ClientError> {
        let endpoint = Endpoint::Health;
        let request = self.http.get(self.config.endpoint(endpoint.path()));
        self.execute(endpoint, request, self.config.request_timeout)
            .await
    }

    async fn post_json(&self, endpoint: Endpoint, body: &Value) -> Result<Value, ClientError> {
        let request = self
            .http
            .post(self.config.endpoint(endpoint.path()))
            .json(body);
        self.execute(endpoint, request, self.config.request_timeout)
            .await
    }

    /// Send with a timeout, log the exchange, and decode the JSON body.
    /// Non-2xx responses become `ClientError::Status`.
    async fn execute(
        &self,
        endpoint: Endpoint,
        request: RequestBuilder,
        timeout: Duration,
    ) -> Result<Value, ClientError> {
        let method = if endpoint == Endpoint::Health { "GET" } else { "POST" };
        debug!("API request: {method} {endpoint} (base {})", self.config.api_url);

        let response = request.timeout(timeout).send().await.map_err(|e| {
            error!("API request error on {endpoint}: {e}");
            ClientError::from_transport(endpoint, timeout, e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            let message = responses::error_message(&body)
                .unwrap_or_else(|| endpoint.failure_message().to_string());
            error!("API error: {} {endpoint}: {message}", status.as_u16());
            return Err(ClientError::Status {
                endpoint,
                status: status.as_u16(),
                message,
            });
        }

        info!("API response: {} {endpoint}", status.as_u16());
        response
            .json()
            .await
            .map_err(|e| ClientError::from_transport(endpoint, timeout, e))
    }
}
