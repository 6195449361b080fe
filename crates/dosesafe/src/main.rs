mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands, HistoryAction, ScanKind};
use commands::Context;
use dosesafe_core::HistoryFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so command output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = Context::new(cli.api_url.as_deref(), cli.data_dir)?;

    match cli.command {
        Commands::Signup {
            name,
            email,
            password,
            confirm,
        } => commands::session::run_signup(&ctx, name, email, password, confirm),
        Commands::Login { email, password } => commands::session::run_login(&ctx, &email, &password),
        Commands::Logout => commands::session::run_logout(&ctx),
        Commands::Whoami => commands::session::run_whoami(&ctx),
        Commands::Scan { kind } => match kind {
            ScanKind::Image {
                path,
                age,
                condition,
            } => commands::scan::run_image(&ctx, &path, age, &condition).await,
            ScanKind::Manual {
                meds,
                age,
                condition,
            } => commands::scan::run_manual(&ctx, &meds, age, &condition).await,
        },
        Commands::Results { ask, clear } => commands::results::run(&ctx, ask, clear),
        Commands::History { action } => match action {
            Some(HistoryAction::List {
                search,
                scan_type,
                risk,
            }) => commands::history::run_list(&ctx, &cli::history_filter(search, scan_type, risk)),
            None => commands::history::run_list(&ctx, &HistoryFilter::default()),
            Some(HistoryAction::Show { id }) => commands::history::run_show(&ctx, &id),
            Some(HistoryAction::Delete { id }) => commands::history::run_delete(&ctx, &id),
            Some(HistoryAction::Clear) => commands::history::run_clear(&ctx),
        },
        Commands::Metrics => commands::metrics::run(&ctx),
        Commands::Chat { message, questions } => {
            commands::chat::run(&ctx, message.as_deref(), questions).await
        }
        Commands::Interactions { meds, age } => commands::interactions::run(&ctx, &meds, age).await,
        Commands::Health => commands::health::run(&ctx).await,
        Commands::Version => commands::version::run(),
    }
}
