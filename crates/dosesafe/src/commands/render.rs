//! Plain-text rendering of scan results and reports

use dosesafe_core::{medication_label, InteractionReport, Metrics, ScanRecord};
use serde_json::Value;

/// One line for a finding, whatever shape the service sent it in
pub fn format_finding(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => {
            let drugs = match map.get("drugs").and_then(Value::as_array) {
                Some(list) => list
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(" + "),
                None => ["drug1", "drug2"]
                    .iter()
                    .filter_map(|k| map.get(*k).and_then(Value::as_str))
                    .collect::<Vec<_>>()
                    .join(" + "),
            };
            let text = ["description", "warning", "message", "recommendation", "text"]
                .iter()
                .find_map(|k| map.get(*k).and_then(Value::as_str));
            let severity = map.get("severity").and_then(Value::as_str);

            let mut line = match (drugs.is_empty(), text) {
                (false, Some(text)) => format!("{drugs}: {text}"),
                (false, None) => drugs,
                (true, Some(text)) => text.to_string(),
                (true, None) => medication_label(value),
            };
            if let Some(severity) = severity {
                line.push_str(&format!(" ({severity})"));
            }
            line
        }
        other => other.to_string(),
    }
}

fn push_section(out: &mut String, title: &str, items: &[Value]) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("\n{title} ({}):\n", items.len()));
    for item in items {
        out.push_str(&format!("  - {}\n", format_finding(item)));
    }
}

pub fn format_scan(record: &ScanRecord) -> String {
    let mut out = format!(
        "Scan {} ({}, {})\nRisk level: {}\n",
        record.id,
        record.scan_type,
        record.timestamp.format("%Y-%m-%d %H:%M"),
        record.risk_level
    );
    if let Some(age) = record.patient_age {
        out.push_str(&format!("Patient age: {age}\n"));
    }
    if !record.patient_condition.is_empty() {
        out.push_str(&format!("Condition: {}\n", record.patient_condition));
    }
    if let Some(confidence) = &record.confidence {
        out.push_str(&format!("OCR confidence: {confidence}\n"));
    }

    let names = record.medication_names();
    out.push_str(&format!("\nMedications ({}):\n", names.len()));
    if names.is_empty() {
        out.push_str("  (none found)\n");
    }
    for name in &names {
        out.push_str(&format!("  - {name}\n"));
    }

    push_section(&mut out, "Interactions", &record.interactions);
    push_section(&mut out, "Harmful combinations", &record.harmful_combinations);
    push_section(&mut out, "Contraindications", &record.contraindications);
    push_section(&mut out, "Age warnings", &record.age_warnings);
    push_section(&mut out, "Dosing considerations", &record.dosing_considerations);

    if !record.clinical_summary.is_empty() {
        out.push_str(&format!("\nSummary: {}\n", record.clinical_summary));
    }
    out
}

/// One row per saved scan
pub fn format_history_row(record: &ScanRecord) -> String {
    format!(
        "{}  {}  {:<6}  {} med(s), {} interaction(s)  risk: {}",
        record.id,
        record.timestamp.format("%Y-%m-%d %H:%M"),
        record.scan_type.to_string(),
        record.medications.len(),
        record.interactions.len(),
        record.risk_level
    )
}

pub fn format_metrics(metrics: &Metrics) -> String {
    format!(
        "Scans: {}\n\
         Medications analyzed: {}\n\
         Interactions found: {}\n\
         People helped: {}",
        metrics.scans, metrics.medications, metrics.interactions, metrics.people_helped
    )
}

pub fn format_report(report: &InteractionReport) -> String {
    let mut out = format!("Risk level: {}\n", report.risk_level);
    if report.interactions.is_empty() {
        out.push_str("\nNo interactions found.\n");
    }
    push_section(&mut out, "Interactions", &report.interactions);
    push_section(&mut out, "Warnings", &report.warnings);
    push_section(&mut out, "Recommendations", &report.recommendations);
    out
}
