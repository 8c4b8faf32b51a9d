mod commands;
mod notifier;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tzcal_core::config::TzcalConfig;

use commands::Context;
use commands::new::NewArgs;

#[derive(Parser)]
#[command(name = "tzcal")]
#[command(about = "Record events in any timezone, see them in yours, and get reminded before they start")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an event (missing fields are prompted for)
    New {
        title: Option<String>,

        /// Date in the event's timezone (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,

        /// Time in the event's timezone (HH:MM)
        #[arg(short, long)]
        time: Option<String>,

        /// Location label (e.g. "Japan/Tokyo") or IANA zone id
        #[arg(short, long)]
        zone: Option<String>,

        /// Pre-fill from a share link or token
        #[arg(short, long)]
        link: Option<String>,
    },
    /// List events with their time in your timezone
    List {
        /// Print the raw events as JSON
        #[arg(long)]
        json: bool,
    },
    Delete {
        id: i64,
    },
    /// Print a share link for an event
    Share {
        id: i64,
    },
    /// Add an event to Google Calendar
    Export {
        id: i64,

        /// Only print the link
        #[arg(long)]
        no_open: bool,
    },
    /// List known location labels
    Zones {
        filter: Option<String>,
    },
    /// Convert a date and time from one timezone to yours
    Convert {
        /// YYYY-MM-DD
        date: String,

        /// HH:MM
        time: String,

        /// Location label or IANA zone id the time is in
        zone: String,

        /// Target zone (defaults to yours)
        #[arg(long)]
        to: Option<String>,
    },
    /// Enable desktop reminders
    Notifications,
    /// Send reminders until interrupted
    Watch,
    /// Toggle dark mode
    Theme,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let ctx = Context::load(TzcalConfig::load()?)?;

    match cli.command {
        Commands::New {
            title,
            date,
            time,
            zone,
            link,
        } => commands::new::run(
            NewArgs {
                title,
                date,
                time,
                zone,
                link,
            },
            &ctx,
        ),
        Commands::List { json } => commands::list::run(&ctx, json),
        Commands::Delete { id } => commands::delete::run(&ctx, id),
        Commands::Share { id } => commands::share::run(&ctx, id),
        Commands::Export { id, no_open } => commands::export::run(&ctx, id, no_open),
        Commands::Zones { filter } => commands::zones::run(&ctx, filter.as_deref()),
        Commands::Convert {
            date,
            time,
            zone,
            to,
        } => commands::convert::run(&ctx, &date, &time, &zone, to),
        Commands::Notifications => commands::notifications::run(&ctx).await,
        Commands::Watch => commands::watch::run(&ctx).await,
        Commands::Theme => commands::theme::run(&ctx),
    }
}
