//! Normalization of analysis-service responses into domain records.
//!
//! Responses are read defensively: a missing or mistyped field becomes a
//! default, never an error.

use dosesafe_core::{ChatReply, InteractionReport, ReplyType, ScanRecord, ScanType};
use serde_json::Value;

const DEFAULT_RISK: &str = "low";
const NO_CHAT_RESPONSE: &str = "I apologize, but I cannot process your request right now.";

/// First of `keys` holding an array; alternatives are only consulted when a
/// key is absent, so an empty array is kept as-is
fn list(data: &Value, keys: &[&str]) -> Vec<Value> {
    keys.iter()
        .find_map(|key| data.get(*key).and_then(Value::as_array))
        .cloned()
        .unwrap_or_default()
}

/// First of `keys` holding a non-empty string (numbers are stringified)
fn text(data: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match data.get(*key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// A positive count, else `fallback`
fn count(data: &Value, key: &str, fallback: usize) -> usize {
    data.get(key)
        .and_then(Value::as_u64)
        .filter(|&n| n > 0)
        .map(|n| n as usize)
        .unwrap_or(fallback)
}

fn base_record(data: &Value, scan_type: ScanType, patient_age: u32, condition: &str) -> ScanRecord {
    let mut record = ScanRecord::new(scan_type);
    record.patient_age = Some(patient_age);
    record.patient_condition = condition.to_string();
    record.interactions = list(data, &["drug_interactions", "interactions"]);
    record.contraindications = list(data, &["contraindications"]);
    record.harmful_combinations = list(data, &["harmful_combinations"]);
    record.clinical_summary = text(data, &["clinical_summary"]).unwrap_or_default();
    record
}

fn fill_totals(record: &mut ScanRecord, data: &Value) {
    record.total_medications = count(data, "total_medications", record.medications.len());
    record.total_interactions = count(data, "total_interactions", record.interactions.len());
}

pub fn image_scan(data: &Value, patient_age: u32, condition: &str, file_name: Option<&str>) -> ScanRecord {
    let mut record = base_record(data, ScanType::Image, patient_age, condition);
    record.medications = list(data, &["medications"]);
    record.age_warnings = list(data, &["age_specific_warnings"]);
    record.ocr_text = text(data, &["extracted_text"]);
    record.confidence = Some(text(data, &["confidence"]).unwrap_or_else(|| "Medium".to_string()));
    record.risk_level = text(data, &["risk_level"]).unwrap_or_else(|| DEFAULT_RISK.to_string());
    record.processing_time = Some(text(data, &["processing_time"]).unwrap_or_else(|| "N/A".to_string()));
    record.source = text(data, &["source"]).unwrap_or_else(|| "OCR Processing".to_string());
    record.file_name = file_name.map(str::to_string);
    fill_totals(&mut record, data);
    record
}

pub fn manual_scan(data: &Value, patient_age: u32, condition: &str) -> ScanRecord {
    let mut record = base_record(data, ScanType::Manual, patient_age, condition);
    record.medications = list(data, &["medications", "enhanced_medications"]);
    record.age_warnings = list(data, &["age_specific_warnings", "age_warnings"]);
    record.dosing_considerations = list(data, &["dosing_considerations"]);
    record.risk_level = text(data, &["overall_risk_assessment", "risk_level"])
        .unwrap_or_else(|| DEFAULT_RISK.to_string());
    record.source = text(data, &["source"]).unwrap_or_else(|| "Manual Entry".to_string());
    fill_totals(&mut record, data);
    record
}

pub fn interactions(data: &Value) -> InteractionReport {
    InteractionReport {
        interactions: list(data, &["interactions"]),
        risk_level: text(data, &["overall_risk"]).unwrap_or_else(|| DEFAULT_RISK.to_string()),
        warnings: list(data, &["warnings"]),
        recommendations: list(data, &["recommendations"]),
    }
}

pub fn chat(data: &Value) -> ChatReply {
    ChatReply {
        response: text(data, &["response"]).unwrap_or_else(|| NO_CHAT_RESPONSE.to_string()),
        reply_type: ReplyType::parse_lenient(data.get("type").and_then(Value::as_str)),
        fallback: false,
    }
}

/// The server's `error` field from a failed response body
pub fn error_message(data: &Value) -> Option<String> {
    text(data, &["error", "message", "detail"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_image_scan_full_response() {
        let data = json!({
            "medications": [{"name": "Warfarin"}, {"name": "Aspirin"}],
            "drug_interactions": [{"drugs": ["Warfarin", "Aspirin"], "severity": "major"}],
            "age_specific_warnings": ["Elderly: bleeding risk"],
            "clinical_summary": "High bleeding risk",
            "extracted_text": "Rx: Warfarin 5mg, Aspirin 81mg",
            "confidence": 0.92,
            "risk_level": "high",
            "processing_time": "2.1s"
        });

        let record = image_scan(&data, 70, "AFib", Some("rx.png"));
        assert_eq!(record.scan_type, ScanType::Image);
        assert_eq!(record.medications.len(), 2);
        assert_eq!(record.interactions.len(), 1);
        assert_eq!(record.age_warnings.len(), 1);
        assert_eq!(record.risk_level, "high");
        assert_eq!(record.confidence.as_deref(), Some("0.92"));
        assert_eq!(record.total_medications, 2);
        assert_eq!(record.total_interactions, 1);
        assert_eq!(record.file_name.as_deref(), Some("rx.png"));
        assert_eq!(record.patient_age, Some(70));
        assert_eq!(record.source, "OCR Processing");
    }

    #[test]
    fn test_image_scan_empty_response_defaults() {
        let record = image_scan(&json!({}), 30, "", None);
        assert!(record.medications.is_empty());
        assert!(record.interactions.is_empty());
        assert_eq!(record.risk_level, "low");
        assert_eq!(record.confidence.as_deref(), Some("Medium"));
        assert_eq!(record.processing_time.as_deref(), Some("N/A"));
        assert_eq!(record.ocr_text, None);
        assert_eq!(record.clinical_summary, "");
    }

    #[test]
    fn test_manual_scan_alternate_field_names() {
        let data = json!({
            "enhanced_medications": [{"name": "Metformin"}],
            "interactions": [{"severity": "minor"}],
            "age_warnings": ["check kidney function"],
            "dosing_considerations": ["take with meals"],
            "overall_risk_assessment": "moderate",
            "risk_level": "low",
            "total_medications": 0
        });

        let record = manual_scan(&data, 55, "diabetes");
        assert_eq!(record.medications.len(), 1);
        assert_eq!(record.interactions.len(), 1);
        assert_eq!(record.age_warnings.len(), 1);
        assert_eq!(record.dosing_considerations.len(), 1);
        assert_eq!(record.risk_level, "moderate");
        assert_eq!(record.total_medications, 1, "zero total falls back to list length");
        assert_eq!(record.source, "Manual Entry");
    }

    #[test]
    fn test_present_empty_array_is_not_replaced() {
        let data = json!({"drug_interactions": [], "interactions": [{"x": 1}]});
        assert!(list(&data, &["drug_interactions", "interactions"]).is_empty());
    }

    #[test]
    fn test_mistyped_fields_become_defaults() {
        let data = json!({"medications": "Aspirin", "risk_level": 3, "clinical_summary": null});
        let record = manual_scan(&data, 40, "");
        assert!(record.medications.is_empty());
        assert_eq!(record.risk_level, "3");
        assert_eq!(record.clinical_summary, "");
    }

    #[test]
    fn test_interactions_defaults() {
        let report = interactions(&json!({"interactions": [{"a": 1}], "warnings": "none"}));
        assert_eq!(report.interactions.len(), 1);
        assert_eq!(report.risk_level, "low");
        assert!(report.warnings.is_empty());
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn test_chat_defaults() {
        let reply = chat(&json!({"response": "", "type": "warning"}));
        assert_eq!(reply.response, NO_CHAT_RESPONSE);
        assert_eq!(reply.reply_type, ReplyType::Warning);
        assert!(!reply.fallback);

        let reply = chat(&json!({"response": "Take with food."}));
        assert_eq!(reply.response, "Take with food.");
        assert_eq!(reply.reply_type, ReplyType::Info);
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            error_message(&json!({"error": "No text found in image"})).as_deref(),
            Some("No text found in image")
        );
        assert_eq!(error_message(&json!({})), None);
    }
}
