use dosesafe_store::{read_json, write_json, FileStore, Paths, Store, StorageKey};

fn temp_store() -> (tempfile::TempDir, FileStore) {
    let temp = tempfile::TempDir::new().unwrap();
    let store = FileStore::new(Paths::with_root(temp.path().join("data")));
    (temp, store)
}

#[test]
fn test_missing_key_reads_none() {
    let (_temp, store) = temp_store();
    for key in StorageKey::ALL {
        assert_eq!(store.get(key).unwrap(), None, "{key} should start empty");
    }
}

#[test]
fn test_set_creates_data_dir_and_file() {
    let (_temp, store) = temp_store();
    store.set(StorageKey::ScanHistory, "[]").unwrap();

    let path = store.paths().key_path(StorageKey::ScanHistory);
    assert!(path.exists());
    assert_eq!(std::fs::read_to_string(path).unwrap(), "[]");
}

#[test]
fn test_values_survive_reopen() {
    let (temp, store) = temp_store();
    write_json(&store, StorageKey::Users, &vec!["someone@example.com"]).unwrap();

    let reopened = FileStore::new(Paths::with_root(temp.path().join("data")));
    let users: Vec<String> = read_json(&reopened, StorageKey::Users).unwrap().unwrap();
    assert_eq!(users, vec!["someone@example.com"]);
}

#[test]
fn test_remove_only_touches_one_key() {
    let (_temp, store) = temp_store();
    store.set(StorageKey::CurrentUser, "{}").unwrap();
    store.set(StorageKey::LatestScan, "{}").unwrap();

    store.remove(StorageKey::CurrentUser).unwrap();

    assert_eq!(store.get(StorageKey::CurrentUser).unwrap(), None);
    assert!(store.get(StorageKey::LatestScan).unwrap().is_some());
}

#[test]
#[serial_test::serial]
fn test_open_default_uses_data_dir_env() {
    let temp = tempfile::TempDir::new().unwrap();
    std::env::set_var("DOSESAFE_HOME", temp.path());
    let store = FileStore::open_default();
    std::env::remove_var("DOSESAFE_HOME");

    let store = store.unwrap();
    assert_eq!(store.paths().root(), temp.path());
    store.set(StorageKey::CurrentUser, "{}").unwrap();
    assert!(temp.path().join("dosesafe_user.json").exists());
}
