//! Domain records persisted locally or exchanged with the analysis service

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Millisecond timestamp id, the same scheme used for users and scans
pub fn new_record_id() -> String {
    Utc::now().timestamp_millis().to_string()
}

/// A signed-in (or registered) user. Passwords are never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: &str, name: &str) -> Self {
        Self {
            id: new_record_id(),
            email: email.trim().to_string(),
            name: name.trim().to_string(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanType {
    Image,
    #[default]
    Manual,
}

impl fmt::Display for ScanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanType::Image => f.write_str("image"),
            ScanType::Manual => f.write_str("manual"),
        }
    }
}

pub(crate) const DEFAULT_RISK_LEVEL: &str = "low";

fn default_risk_level() -> String {
    DEFAULT_RISK_LEVEL.to_string()
}

/// One persisted analysis result.
///
/// Array contents are whatever the analysis service returned; they are kept
/// as opaque JSON. Every field tolerates absence, `null`, or a value of the
/// wrong type. A numeric `id` is kept as its decimal string; an unreadable
/// `timestamp` becomes the Unix epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRecord {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type", default, deserialize_with = "lenient::scan_type")]
    pub scan_type: ScanType,
    #[serde(default, deserialize_with = "lenient::age")]
    pub patient_age: Option<u32>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub patient_condition: String,
    #[serde(default, deserialize_with = "lenient::list")]
    pub medications: Vec<Value>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub interactions: Vec<Value>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub age_warnings: Vec<Value>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub contraindications: Vec<Value>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub harmful_combinations: Vec<Value>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub dosing_considerations: Vec<Value>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub clinical_summary: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub ocr_text: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub confidence: Option<String>,
    #[serde(default = "default_risk_level", deserialize_with = "lenient::risk_level")]
    pub risk_level: String,
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_medications: usize,
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_interactions: usize,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub processing_time: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub source: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub file_name: Option<String>,
}

impl ScanRecord {
    /// Empty record stamped with a fresh id and the current time
    pub fn new(scan_type: ScanType) -> Self {
        Self {
            id: new_record_id(),
            timestamp: Utc::now(),
            scan_type,
            patient_age: None,
            patient_condition: String::new(),
            medications: Vec::new(),
            interactions: Vec::new(),
            age_warnings: Vec::new(),
            contraindications: Vec::new(),
            harmful_combinations: Vec::new(),
            dosing_considerations: Vec::new(),
            clinical_summary: String::new(),
            ocr_text: None,
            confidence: None,
            risk_level: default_risk_level(),
            total_medications: 0,
            total_interactions: 0,
            processing_time: None,
            source: String::new(),
            file_name: None,
        }
    }

    pub fn medication_names(&self) -> Vec<String> {
        self.medications.iter().map(medication_label).collect()
    }

    /// Snapshot handed to the chatbot when the user asks about this scan
    pub fn chatbot_context(&self) -> ChatbotContext {
        ChatbotContext {
            medications: self.medications.clone(),
            interactions: self.interactions.clone(),
            harmful_combinations: self.harmful_combinations.clone(),
            contraindications: self.contraindications.clone(),
            age_warnings: self.age_warnings.clone(),
            clinical_summary: self.clinical_summary.clone(),
            risk_level: Some(self.risk_level.clone()),
        }
    }
}

/// Human-readable label for a medication entry of unknown shape
pub fn medication_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => ["name", "drug_name", "medication", "generic_name"]
            .iter()
            .find_map(|field| map.get(*field).and_then(Value::as_str))
            .map(str::to_string)
            .unwrap_or_else(|| value.to_string()),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatbotContext {
    #[serde(default, deserialize_with = "lenient::list")]
    pub medications: Vec<Value>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub interactions: Vec<Value>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub harmful_combinations: Vec<Value>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub contraindications: Vec<Value>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub age_warnings: Vec<Value>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub clinical_summary: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub risk_level: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One prior message sent along with a chatbot request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyType {
    #[default]
    Info,
    Warning,
    Success,
    Error,
}

impl ReplyType {
    /// Unknown or missing values map to `Info`
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("warning") => ReplyType::Warning,
            Some("success") => ReplyType::Success,
            Some("error") => ReplyType::Error,
            _ => ReplyType::Info,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(rename = "type")]
    pub reply_type: ReplyType,
    /// Set when the reply came from the local fallback rules
    #[serde(skip)]
    pub fallback: bool,
}

/// Result of an interaction check; never persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionReport {
    pub interactions: Vec<Value>,
    pub risk_level: String,
    pub warnings: Vec<Value>,
    pub recommendations: Vec<Value>,
}

impl InteractionReport {
    /// Report substituted when the service cannot be reached
    pub fn unavailable() -> Self {
        Self {
            interactions: Vec::new(),
            risk_level: default_risk_level(),
            warnings: Vec::new(),
            recommendations: vec![Value::String(
                "Always consult with your healthcare provider".to_string(),
            )],
        }
    }
}

/// A medication typed in by hand for a manual scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualMedication {
    pub name: String,
    pub strength: String,
    #[serde(default)]
    pub frequency: String,
    #[serde(default = "default_dosage_form")]
    pub dosage_form: String,
}

fn default_dosage_form() -> String {
    "tablet".to_string()
}

impl ManualMedication {
    pub fn new(name: &str, strength: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            strength: strength.trim().to_string(),
            frequency: String::new(),
            dosage_form: default_dosage_form(),
        }
    }
}

/// Parses `name:strength[:frequency[:form]]`; empty parts are kept empty so
/// validation can report them.
impl FromStr for ManualMedication {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':').map(str::trim);
        let name = parts.next().unwrap_or_default();
        let strength = parts.next().unwrap_or_default();
        let mut medication = ManualMedication::new(name, strength);
        if let Some(frequency) = parts.next() {
            medication.frequency = frequency.to_string();
        }
        if let Some(form) = parts.next().filter(|f| !f.is_empty()) {
            medication.dosage_form = form.to_string();
        }
        Ok(medication)
    }
}

/// Medication entry sent to the interaction checker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionMedication {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
}

/// Parses `name[:dosage[:frequency]]`
impl FromStr for InteractionMedication {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':').map(str::trim);
        let name = parts.next().unwrap_or_default().to_string();
        let mut next_part = || parts.next().filter(|p| !p.is_empty()).map(str::to_string);
        let dosage = next_part();
        let frequency = next_part();
        Ok(Self {
            name,
            dosage,
            frequency,
        })
    }
}

impl From<&ManualMedication> for InteractionMedication {
    fn from(med: &ManualMedication) -> Self {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        Self {
            name: med.name.clone(),
            dosage: non_empty(&med.strength),
            frequency: non_empty(&med.frequency),
        }
    }
}

/// Deserializers that turn shape deviations into defaults instead of errors
mod lenient {
    use super::{ScanType, DEFAULT_RISK_LEVEL};
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Value>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Array(items) => items,
            _ => Vec::new(),
        })
    }

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(opt_string(d)?.unwrap_or_default())
    }

    pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
    }

    pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<usize, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => n.as_u64().map(|v| v as usize).unwrap_or(0),
            Value::String(s) => s.trim().parse().unwrap_or(0),
            _ => 0,
        })
    }

    pub fn age<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    pub fn risk_level<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(opt_string(d)?
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_RISK_LEVEL.to_string()))
    }

    /// RFC 3339 text or epoch milliseconds
    pub fn timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let parsed = match Value::deserialize(d)? {
            Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
                .ok()
                .map(|t| t.with_timezone(&Utc)),
            Value::Number(n) => n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis),
            _ => None,
        };
        Ok(parsed.unwrap_or_default())
    }

    pub fn scan_type<'de, D: Deserializer<'de>>(d: D) -> Result<ScanType, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) if s.eq_ignore_ascii_case("image") => ScanType::Image,
            _ => ScanType::Manual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scan_record_tolerates_partial_json() {
        let raw = json!({
            "id": "1700000000000",
            "timestamp": "2025-01-01T00:00:00Z",
            "type": "image",
            "medications": null,
            "interactions": "not a list",
            "riskLevel": "",
            "patientAge": "42",
            "totalMedications": "3"
        });
        let record: ScanRecord = serde_json::from_value(raw).unwrap();
        assert_eq!(record.scan_type, ScanType::Image);
        assert!(record.medications.is_empty());
        assert!(record.interactions.is_empty());
        assert_eq!(record.risk_level, "low");
        assert_eq!(record.patient_age, Some(42));
        assert_eq!(record.total_medications, 3);
        assert_eq!(record.clinical_summary, "");
    }

    #[test]
    fn test_scan_record_tolerates_odd_id_and_timestamp() {
        let numeric: ScanRecord = serde_json::from_value(json!({
            "id": 3,
            "timestamp": 1_700_000_000_000i64,
            "medications": [{"name": "Aspirin"}]
        }))
        .unwrap();
        assert_eq!(numeric.id, "3");
        assert_eq!(numeric.timestamp.timestamp_millis(), 1_700_000_000_000);
        assert_eq!(numeric.medications.len(), 1);

        let bare: ScanRecord =
            serde_json::from_value(json!({"timestamp": "last tuesday"})).unwrap();
        assert_eq!(bare.id, "");
        assert_eq!(bare.timestamp, DateTime::<Utc>::default());
    }

    #[test]
    fn test_scan_record_uses_camel_case_and_type_key() {
        let mut record = ScanRecord::new(ScanType::Manual);
        record.clinical_summary = "ok".to_string();
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["type"], "manual");
        assert_eq!(value["clinicalSummary"], "ok");
        assert_eq!(value["riskLevel"], "low");
        assert!(value.get("ocrText").is_none());
    }

    #[test]
    fn test_medication_label_shapes() {
        assert_eq!(medication_label(&json!("Aspirin")), "Aspirin");
        assert_eq!(medication_label(&json!({"name": "Warfarin", "dose": "5mg"})), "Warfarin");
        assert_eq!(medication_label(&json!({"drug_name": "Ibuprofen"})), "Ibuprofen");
        assert_eq!(medication_label(&json!(42)), "42");
    }

    #[test]
    fn test_manual_medication_parse() {
        let med: ManualMedication = "Metformin:500mg:twice daily".parse().unwrap();
        assert_eq!(med.name, "Metformin");
        assert_eq!(med.strength, "500mg");
        assert_eq!(med.frequency, "twice daily");
        assert_eq!(med.dosage_form, "tablet");

        let med: ManualMedication = "Insulin:10u::injection".parse().unwrap();
        assert_eq!(med.frequency, "");
        assert_eq!(med.dosage_form, "injection");

        let med: ManualMedication = "Aspirin".parse().unwrap();
        assert_eq!(med.strength, "");
    }

    #[test]
    fn test_interaction_medication_parse_and_serialize() {
        let med: InteractionMedication = "Warfarin:5mg".parse().unwrap();
        assert_eq!(med.dosage.as_deref(), Some("5mg"));
        assert_eq!(med.frequency, None);

        let value = serde_json::to_value(&med).unwrap();
        assert_eq!(value, json!({"name": "Warfarin", "dosage": "5mg"}));
    }

    #[test]
    fn test_interaction_medication_from_manual() {
        let manual = ManualMedication::new("Lisinopril", "10mg");
        let med = InteractionMedication::from(&manual);
        assert_eq!(med.dosage.as_deref(), Some("10mg"));
        assert_eq!(med.frequency, None);
    }

    #[test]
    fn test_reply_type_parse_lenient() {
        assert_eq!(ReplyType::parse_lenient(Some("Warning")), ReplyType::Warning);
        assert_eq!(ReplyType::parse_lenient(Some("something")), ReplyType::Info);
        assert_eq!(ReplyType::parse_lenient(None), ReplyType::Info);
    }

    #[test]
    fn test_chatbot_context_from_record() {
        let mut record = ScanRecord::new(ScanType::Image);
        record.medications = vec![json!({"name": "Aspirin"})];
        record.risk_level = "high".to_string();
        let context = record.chatbot_context();
        assert_eq!(context.medications.len(), 1);
        assert_eq!(context.risk_level.as_deref(), Some("high"));
    }
}
