//! MediFlux CLI - drive the booking core from a terminal.
//!
//! State lives in a JSON file store (`MEDIFLUX_STORE_PATH`, default
//! `.mediflux/store.json`), so a login survives between invocations.
//!
//! # Usage
//!
//! ```bash
//! # Seed the store and show the demo accounts
//! mediflux init
//! mediflux demo
//!
//! # Book as a patient
//! mediflux login -e john.doe@email.com -p patient123
//! mediflux doctors
//! mediflux request -d doc-001 --date 2026-11-02 --time 10:00 -r "Checkup"
//!
//! # Approve as an admin
//! mediflux login -e admin@mediflux.com -p admin123
//! mediflux pending
//! mediflux status apt-001 confirmed
//! ```
//!
//! # Commands
//!
//! - `init`, `reset` - Seed or re-seed the store
//! - `login`, `logout`, `register`, `whoami`, `profile`, `demo` - Session and account
//! - `doctors`, `request`, `appointments` - Patient booking
//! - `patients`, `pending`, `all`, `status` - Admin workflow
//! - `stats`, `range` - Reporting

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mediflux_booking::config::BookingConfig;
use mediflux_booking::error::{AppError, ErrorKind};
use mediflux_booking::state::BookingContext;

mod commands;

/// Store location when neither `--store` nor `MEDIFLUX_STORE_PATH` is set.
const DEFAULT_STORE_PATH: &str = ".mediflux/store.json";

#[derive(Parser)]
#[command(name = "mediflux")]
#[command(author, version, about = "MediFlux appointment booking")]
struct Cli {
    /// JSON file backing the store
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Skip simulated network latency
    #[arg(long, global = true)]
    no_latency: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed fixture data if the store is empty
    Init,
    /// Drop all collections and seed them again
    Reset,
    /// Show the demo login accounts
    Demo,
    /// Log in and persist the session
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Clear the persisted session
    Logout,
    /// Create a patient account and log in
    Register {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        password: String,
        #[arg(short, long)]
        age: Option<u32>,
    },
    /// Show the signed-in user
    Whoami,
    /// Show or edit the signed-in user's profile
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        age: Option<u32>,
    },
    /// List doctors
    Doctors,
    /// Request an appointment with a doctor
    Request {
        /// Doctor ID (e.g. `doc-001`)
        #[arg(short, long)]
        doctor: String,
        /// Appointment date, `YYYY-MM-DD`
        #[arg(long)]
        date: NaiveDate,
        /// Slot start, `HH:MM`
        #[arg(long)]
        time: String,
        #[arg(short, long)]
        reason: Option<String>,
    },
    /// List the signed-in patient's appointments
    Appointments,
    /// List patients (admin)
    Patients,
    /// List pending appointments (admin)
    Pending,
    /// List every appointment (admin)
    All,
    /// Set an appointment's status (admin)
    Status {
        /// Appointment ID
        id: String,
        /// `pending`, `confirmed`, `completed` or `cancelled`
        status: String,
    },
    /// Show dashboard counters for the signed-in role
    Stats,
    /// List appointments between two dates, inclusive
    Range {
        start: NaiveDate,
        end: NaiveDate,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mediflux_cli=info,mediflux_booking=warn".into()),
        )
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        if e.kind() == ErrorKind::Storage {
            tracing::error!(error = %e, "Storage failure");
        }
        tracing::error!("{}", e.user_message());
        if let Some(details) = e.details() {
            tracing::error!("{details}");
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let mut config = BookingConfig::from_env()?;
    if let Some(store) = cli.store {
        config.store_path = Some(store);
    }
    if config.store_path.is_none() {
        config.store_path = Some(PathBuf::from(DEFAULT_STORE_PATH));
    }
    if cli.no_latency {
        config = config.without_latency();
    }

    let ctx = BookingContext::open(config)?;
    let _ = ctx.auth().restore_session();

    match cli.command {
        Commands::Init => commands::store::init(&ctx),
        Commands::Reset => commands::store::reset(&ctx)?,
        Commands::Demo => commands::session::demo(),
        Commands::Login { email, password } => {
            commands::session::login(&ctx, &email, password).await?;
        }
        Commands::Logout => commands::session::logout(&ctx),
        Commands::Register {
            email,
            name,
            password,
            age,
        } => commands::session::register(&ctx, email, name, password, age).await?,
        Commands::Whoami => commands::session::whoami(&ctx),
        Commands::Profile {
            name,
            email,
            password,
            age,
        } => commands::session::profile(&ctx, name, email, password, age).await?,
        Commands::Doctors => commands::patient::doctors(&ctx).await,
        Commands::Request {
            doctor,
            date,
            time,
            reason,
        } => commands::patient::request(&ctx, doctor, date, time, reason).await?,
        Commands::Appointments => commands::patient::appointments(&ctx).await?,
        Commands::Patients => commands::admin::patients(&ctx).await?,
        Commands::Pending => commands::admin::pending(&ctx).await?,
        Commands::All => commands::admin::all(&ctx).await?,
        Commands::Status { id, status } => commands::admin::status(&ctx, &id, &status).await?,
        Commands::Stats => commands::report::stats(&ctx).await?,
        Commands::Range { start, end } => commands::report::range(&ctx, start, end).await?,
    }
    Ok(())
}
