//! Onboarding command-line client.
//!
//! Validates sign-up and sign-in input locally, then talks to the onboarding
//! API.
//!
//! # Usage
//!
//! ```bash
//! # Check a single value against the sign-up rules
//! onboard check username ab
//!
//! # Check against the sign-in rules
//! onboard check --login password 12345
//!
//! # Create an account
//! onboard signup --username jane_doe --password 'Ab1!abcd' --full-name 'Jane Doe' \
//!     --dob 1990-01-31 --address '221B Baker Street' --country India \
//!     --email jane@example.com --phone 5551234567
//!
//! # Sign in and list users
//! onboard --api-url http://localhost:9999 login --email jane@example.com --password 'Ab1!abcd'
//! onboard users
//! ```

mod commands;
mod paths;

use std::fs::File;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use onboard_lib::{ApiConfig, OnboardClient};
use simplelog::{Config, LevelFilter, WriteLogger};

/// Sign-up and sign-in client for the onboarding API.
#[derive(Parser, Debug)]
#[command(name = "onboard")]
#[command(version, about = "Validate onboarding forms and call the onboarding API")]
struct Cli {
    /// API base URL. Overrides `ONBOARD_API_URL`.
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Write debug output to the log file.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate one field value and print the result.
    Check {
        /// Use the sign-in rules instead of the sign-up rules.
        #[arg(long)]
        login: bool,

        /// Field name (username, password, full-name, dob, address, country, email, phone).
        field: String,

        /// Value to check. Dates use YYYY-MM-DD.
        #[arg(default_value = "", allow_hyphen_values = true)]
        value: String,
    },

    /// Validate the sign-up form and create an account.
    Signup(SignupArgs),

    /// Validate the sign-in form and sign in.
    Login {
        #[arg(long, default_value = "")]
        email: String,

        #[arg(long, default_value = "")]
        password: String,
    },

    /// List registered users.
    Users,
}

#[derive(clap::Args, Debug, Default)]
struct SignupArgs {
    #[arg(long, default_value = "")]
    username: String,

    #[arg(long, default_value = "")]
    password: String,

    #[arg(long, default_value = "")]
    full_name: String,

    /// Date of birth (YYYY-MM-DD).
    #[arg(long)]
    dob: Option<NaiveDate>,

    #[arg(long, default_value = "")]
    address: String,

    /// One of: India, Thailand, Singapore, Malaysia, UAE.
    #[arg(long, default_value = "")]
    country: String,

    #[arg(long, default_value = "")]
    email: String,

    #[arg(long, default_value = "")]
    phone: String,
}

/// Rotates old logs and routes `log` output to `latest.log` in the cache dir.
///
/// Logging is skipped when the cache directory is unavailable or unwritable.
fn init_logging(verbose: bool) {
    let Some(dir) = paths::LogDir::platform() else { return };
    let Ok(path) = dir.prepare() else { return };
    let Ok(file) = File::create(&path) else { return };

    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    let _ = WriteLogger::init(level, Config::default(), file);
}

fn client(api_url: Option<String>) -> anyhow::Result<OnboardClient> {
    let mut config = ApiConfig::from_env()?;
    if let Some(url) = api_url {
        config = config.with_base_url(url);
    }
    config.validate()?;
    log::debug!("Using API at {}", config.base_url);
    Ok(OnboardClient::from_config(config)?)
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let today = chrono::Local::now().date_naive();

    match cli.command {
        Command::Check { login, field, value } => commands::check(login, &field, &value, today),
        Command::Signup(args) => commands::signup(&client(cli.api_url)?, args, today).await,
        Command::Login { email, password } => {
            commands::login(&client(cli.api_url)?, &email, &password, today).await
        }
        Command::Users => commands::users(&client(cli.api_url)?).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
