//! Scan and chat flows layered over the raw client

use std::path::Path;

use dosesafe_core::chatbot::greeting;
use dosesafe_core::validation::{validate_age, validate_manual_medications, validate_message};
use dosesafe_core::{
    ChatReply, ChatTurn, ChatbotContext, ManualMedication, ScanHistory, ScanRecord,
};
use dosesafe_store::Store;
use tracing::info;

use crate::{ApiClient, ClientError};

/// Runs a scan and records the result in the local history
pub struct ScanService<'a, S> {
    client: &'a ApiClient,
    history: ScanHistory<S>,
}

impl<'a, S: Store> ScanService<'a, S> {
    pub fn new(client: &'a ApiClient, store: S) -> Self {
        let limit = client.config().history_limit;
        Self {
            client,
            history: ScanHistory::with_limit(store, limit),
        }
    }

    pub fn history(&self) -> &ScanHistory<S> {
        &self.history
    }

    pub async fn image_scan(
        &self,
        path: &Path,
        patient_age: u32,
        patient_condition: &str,
    ) -> Result<ScanRecord, ClientError> {
        let patient_age = validate_age(patient_age)?;
        let record = self
            .client
            .scan_image(path, patient_age, patient_condition.trim())
            .await?;
        let saved = self.history.save(record)?;
        info!(id = %saved.id, "image scan complete");
        Ok(saved)
    }

    pub async fn manual_scan(
        &self,
        medications: &[ManualMedication],
        patient_age: u32,
        patient_condition: &str,
    ) -> Result<ScanRecord, ClientError> {
        validate_manual_medications(medications)?;
        let patient_age = validate_age(patient_age)?;
        let record = self
            .client
            .scan_manual(medications, patient_age, patient_condition.trim())
            .await?;
        let saved = self.history.save(record)?;
        info!(id = %saved.id, "manual scan complete");
        Ok(saved)
    }
}

/// A conversation with the assistant; prior turns go along with each message
pub struct ChatSession<'a> {
    client: &'a ApiClient,
    turns: Vec<ChatTurn>,
}

impl<'a> ChatSession<'a> {
    /// Start with a greeting, which becomes the first assistant turn
    pub fn new(client: &'a ApiClient, context: Option<&ChatbotContext>) -> Self {
        Self {
            client,
            turns: vec![ChatTurn::assistant(greeting(context))],
        }
    }

    pub fn greeting(&self) -> &str {
        &self.turns[0].content
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// Send one message. Network failures are answered from the fallback
    /// rules, so only an empty message is an error.
    pub async fn send(&mut self, message: &str) -> Result<ChatReply, ClientError> {
        let message = validate_message(message)?;
        let reply = self.client.send_chat(message, &self.turns).await;
        self.turns.push(ChatTurn::user(message));
        self.turns.push(ChatTurn::assistant(reply.response.clone()));
        Ok(reply)
    }
}
