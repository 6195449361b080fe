//! Typed storage keys

use std::fmt;

/// Every value the client persists lives under one of these keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// The signed-in user
    CurrentUser,
    /// Users registered on this machine
    Users,
    /// Recent scans, newest first
    ScanHistory,
    /// Snapshot shown by the results view
    LatestScan,
    /// Scan context handed to the chatbot
    ChatbotContext,
}

impl StorageKey {
    pub const ALL: [StorageKey; 5] = [
        StorageKey::CurrentUser,
        StorageKey::Users,
        StorageKey::ScanHistory,
        StorageKey::LatestScan,
        StorageKey::ChatbotContext,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::CurrentUser => "dosesafe_user",
            StorageKey::Users => "dosesafe_users",
            StorageKey::ScanHistory => "scan_history",
            StorageKey::LatestScan => "latest_scan_result",
            StorageKey::ChatbotContext => "chatbot_context",
        }
    }

    /// File name used by the file-backed store
    pub fn file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
