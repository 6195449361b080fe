use dosesafe_client::{ApiClient, ChatSession};
use dosesafe_core::chatbot::{load_context, save_context};
use dosesafe_core::{Config, MetricsTracker, ScanHistory, ScanRecord, ScanType, SessionManager, SignupForm};
use dosesafe_store::{FileStore, Paths, StorageKey};
use serde_json::json;
use tempfile::TempDir;

fn scan(meds: &[&str], interactions: usize) -> ScanRecord {
    let mut record = ScanRecord::new(ScanType::Manual);
    record.medications = meds.iter().map(|m| json!({"name": m})).collect();
    record.interactions = (0..interactions)
        .map(|_| json!({"drugs": meds, "severity": "major"}))
        .collect();
    record.risk_level = if interactions > 0 { "high" } else { "low" }.to_string();
    record
}

#[tokio::test]
async fn test_signup_scan_ask_logout() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(Paths::with_root(dir.path()));
    let session = SessionManager::new(&store);

    // Sign up
    let user = session
        .register(&SignupForm {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
        })
        .unwrap();
    assert_eq!(session.require_user().unwrap(), user);

    // Two scans land in history, newest first
    let history = ScanHistory::new(&store);
    let mut metrics = MetricsTracker::new(&store);
    history.save(scan(&["Metformin"], 0)).unwrap();
    let mut second = scan(&["Warfarin", "Aspirin"], 1);
    second.id = "second".into();
    history.save(second).unwrap();

    assert!(metrics.on_storage_change(StorageKey::ScanHistory));
    let counts = metrics.metrics();
    assert_eq!(counts.scans, 2);
    assert_eq!(counts.medications, 3);
    assert_eq!(counts.interactions, 1);
    assert_eq!(counts.people_helped, 1);

    // Ask the assistant about the latest result
    let latest = history.latest().unwrap();
    assert_eq!(latest.id, "second");
    save_context(&store, &latest.chatbot_context()).unwrap();

    let client = ApiClient::new(Config::new().with_api_url("http://127.0.0.1:9")).unwrap();
    let context = load_context(&store);
    let mut chat = ChatSession::new(&client, context.as_ref());
    assert!(chat.greeting().contains("recently scanned 2 medication(s)"));

    let reply = chat.send("Can I drink alcohol with these?").await.unwrap();
    assert!(reply.fallback);
    assert!(reply.response.contains("Alcohol and medications"));

    // Sign out drops the session and current result but keeps history
    session.logout().unwrap();
    assert!(session.require_user().is_err());
    assert!(history.latest().is_none());
    assert_eq!(history.read().len(), 2);
}

#[test]
fn test_history_survives_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let store = FileStore::new(Paths::with_root(dir.path()));
        let history = ScanHistory::new(&store);
        for _ in 0..12 {
            history.save(scan(&["Ibuprofen"], 0)).unwrap();
        }
    }

    let store = FileStore::new(Paths::with_root(dir.path()));
    let history = ScanHistory::new(&store);
    assert_eq!(history.read().len(), 10);
    assert!(dir.path().join("scan_history.json").exists());
}
