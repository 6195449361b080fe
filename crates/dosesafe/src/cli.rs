use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use dosesafe_core::{HistoryFilter, InteractionMedication, ManualMedication, ScanType};

#[derive(Parser)]
#[command(name = "dosesafe")]
#[command(version)]
#[command(about = "Prescription safety checks against the DoseSafe analysis service")]
pub struct Cli {
    /// Analysis service base URL (defaults to DOSESAFE_API_URL, VITE_API_URL, then localhost:5000)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Directory for local session data (defaults to DOSESAFE_HOME, then ~/.dosesafe)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a local account and sign in
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Password confirmation
        #[arg(long)]
        confirm: String,
    },

    /// Sign in
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Sign out and clear the current result
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Analyze a prescription
    Scan {
        #[command(subcommand)]
        kind: ScanKind,
    },

    /// Show the latest scan result
    Results {
        /// Hand this result to the chatbot as context
        #[arg(long)]
        ask: bool,
        /// Clear the current result
        #[arg(long, conflicts_with = "ask")]
        clear: bool,
    },

    /// Browse previous scans
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },

    /// Show counters derived from scan history
    Metrics,

    /// Ask the medication assistant (interactive when no message is given)
    Chat {
        message: Option<String>,
        /// List suggested questions
        #[arg(long)]
        questions: bool,
    },

    /// Check interactions between medications
    Interactions {
        /// Medication as name[:dosage[:frequency]], repeatable
        #[arg(long = "med", required = true)]
        meds: Vec<InteractionMedication>,
        #[arg(long)]
        age: u32,
    },

    /// Check that the analysis service is up
    Health,

    /// Print version information
    Version,
}

#[derive(Subcommand)]
pub enum ScanKind {
    /// Upload a prescription image (JPG, PNG) or PDF
    Image {
        path: PathBuf,
        /// Patient age in years (1-120)
        #[arg(long)]
        age: u32,
        /// Patient condition or diagnosis
        #[arg(long, default_value = "")]
        condition: String,
    },

    /// Enter medications by hand
    Manual {
        /// Medication as name:strength[:frequency[:form]], repeatable
        #[arg(long = "med", required = true)]
        meds: Vec<ManualMedication>,
        /// Patient age in years (1-120)
        #[arg(long)]
        age: u32,
        /// Patient condition or diagnosis
        #[arg(long, default_value = "")]
        condition: String,
    },
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List saved scans, newest first
    List {
        /// Text to find in medication names, the condition, or the file name
        #[arg(long)]
        search: Option<String>,
        #[arg(long = "type", value_enum, default_value_t = TypeFilter::All)]
        scan_type: TypeFilter,
        #[arg(long, value_enum, default_value_t = RiskFilter::All)]
        risk: RiskFilter,
    },
    /// Open a saved scan as the current result
    Show { id: String },
    /// Delete a saved scan
    Delete { id: String },
    /// Delete every saved scan
    Clear,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TypeFilter {
    All,
    Image,
    Manual,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RiskFilter {
    All,
    Low,
    Moderate,
    High,
}

/// Filter for `history list`; `all` leaves a field unconstrained
pub fn history_filter(search: Option<String>, scan_type: TypeFilter, risk: RiskFilter) -> HistoryFilter {
    HistoryFilter {
        search,
        scan_type: match scan_type {
            TypeFilter::All => None,
            TypeFilter::Image => Some(ScanType::Image),
            TypeFilter::Manual => Some(ScanType::Manual),
        },
        risk_level: match risk {
            RiskFilter::All => None,
            RiskFilter::Low => Some("low".to_string()),
            RiskFilter::Moderate => Some("moderate".to_string()),
            RiskFilter::High => Some("high".to_string()),
        },
    }
}
