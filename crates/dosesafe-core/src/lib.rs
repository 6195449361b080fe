//! Client-side domain logic: session, scan history, metrics, validation and
//! chatbot fallbacks

pub mod chatbot;
mod config;
mod error;
pub mod history;
pub mod metrics;
pub mod session;
mod types;
pub mod validation;

pub use chatbot::FallbackResponder;
pub use config::{Config, DEFAULT_API_URL, DEFAULT_HISTORY_LIMIT};
pub use error::{Error, Result};
pub use history::{HistoryFilter, ScanHistory};
pub use metrics::{Metrics, MetricsTracker};
pub use session::{display_name_from_email, SessionManager, SignupForm};
pub use types::{
    medication_label, new_record_id, ChatReply, ChatRole, ChatTurn, ChatbotContext,
    InteractionMedication, InteractionReport, ManualMedication, ReplyType, ScanRecord, ScanType,
    User,
};
pub use validation::ValidationError;
