//! DDCursor Console Entry Point
//!
//! Command-line front end for the client security utilities and the guarded
//! sign-in flow. Uses `anyhow` for startup errors, but sign-in outcomes are
//! reported through `auth::LoginError::user_message`.

use std::process::ExitCode;
use std::sync::Arc;

use auth::domain::repository::Clock;
use auth::{FileStorage, GuardConfig, LoginGuard, LoginInput, SupabaseAuthenticator, SystemClock};
use clap::{Parser, Subcommand};
use platform::config::AppConfig;
use platform::crypto::{generate_api_key, generate_hash, generate_secure_token};
use platform::file::UploadPolicy;
use platform::mask::{SensitiveKind, mask_sensitive_data};
use platform::password::check_password_policy;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Guard = LoginGuard<SupabaseAuthenticator, FileStorage, SystemClock>;

#[derive(Parser)]
#[command(name = "ddcursor")]
#[command(about = "Client security utilities and guarded sign-in", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in; the password is read from stdin
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,
    },

    /// Show whether sign-in is currently locked out
    Status,

    /// Check a password against the policy; read from stdin
    CheckPassword,

    /// Check a file against the upload policy and print its storage name and watermark
    CheckUpload {
        /// File name as chosen by the user
        file: String,

        /// Size in bytes
        #[arg(short, long)]
        size: u64,

        /// Uploader shown in the watermark
        #[arg(short, long)]
        user: String,
    },

    /// Mask an email, phone number or SSN for display
    Mask {
        /// One of: email, phone, ssn
        kind: SensitiveKind,
        data: String,
    },

    /// Generate a random hex token
    Token {
        /// Number of random bytes
        #[arg(short, long, default_value_t = platform::crypto::DEFAULT_TOKEN_BYTES)]
        bytes: usize,
    },

    /// Generate an API key
    ApiKey,

    /// SHA-256 of the input, hex encoded
    Hash { text: String },

    /// Encrypt text with the configured key
    Encrypt { text: String },

    /// Decrypt text produced by `encrypt`
    Decrypt { ciphertext: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::from_env();

    // Initialize tracing
    let default_filter = config
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Command::Login { email } => login(&config?, email).await,
        Command::Status => status(&config?).await,
        Command::CheckPassword => {
            let password = read_line("Password: ").await?;
            Ok(match check_password_policy(&password) {
                Ok(()) => {
                    println!("Password meets the policy");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    println!("{}", e);
                    ExitCode::FAILURE
                }
            })
        }
        Command::CheckUpload { file, size, user } => {
            let policy = config.map(|c| c.upload).unwrap_or_else(|_| UploadPolicy::default());
            Ok(match policy.prepare(&file, size, &user) {
                Ok(upload) => {
                    println!("{}", upload.sanitized_name);
                    println!("{}", upload.watermark);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    println!("{}", e);
                    ExitCode::FAILURE
                }
            })
        }
        Command::Mask { kind, data } => {
            println!("{}", mask_sensitive_data(&data, kind));
            Ok(ExitCode::SUCCESS)
        }
        Command::Token { bytes } => {
            println!("{}", generate_secure_token(bytes));
            Ok(ExitCode::SUCCESS)
        }
        Command::ApiKey => {
            println!("{}", generate_api_key());
            Ok(ExitCode::SUCCESS)
        }
        Command::Hash { text } => {
            println!("{}", generate_hash(&text));
            Ok(ExitCode::SUCCESS)
        }
        Command::Encrypt { text } => {
            println!("{}", config?.cipher()?.encrypt(&text)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Decrypt { ciphertext } => {
            println!("{}", config?.cipher()?.decrypt(&ciphertext)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn build_guard(config: &AppConfig) -> anyhow::Result<Guard> {
    let authenticator = SupabaseAuthenticator::new(&config.supabase)?;
    let storage = FileStorage::new(&config.storage_path);

    tracing::debug!(
        endpoint = authenticator.endpoint(),
        storage = %config.storage_path.display(),
        "Login guard configured"
    );

    Ok(LoginGuard::new(
        Arc::new(authenticator),
        Arc::new(storage),
        Arc::new(SystemClock),
        Arc::new(GuardConfig::from(config)),
    ))
}

async fn login(config: &AppConfig, email: String) -> anyhow::Result<ExitCode> {
    let guard = build_guard(config)?;

    if let Some(state) = guard.restore().await? {
        tracing::info!(locked_until = %state.locked_until, "Existing lockout restored");
    }

    let password = read_line("Password: ").await?;
    match guard.submit(LoginInput::new(email, password)).await {
        Ok(output) => {
            println!("Welcome to {}.", config.app_name);
            if let Some(email) = &output.session.email {
                println!("Signed in as {}", mask_sensitive_data(email.as_str(), SensitiveKind::Email));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("{}", e.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn status(config: &AppConfig) -> anyhow::Result<ExitCode> {
    let guard = build_guard(config)?;

    match guard.restore().await? {
        Some(state) => {
            let minutes = state.remaining_minutes(SystemClock.now());
            println!("Locked out. Try again in {} minutes.", minutes);
        }
        None => println!("Not locked out."),
    }
    Ok(ExitCode::SUCCESS)
}

async fn read_line(prompt: &str) -> anyhow::Result<String> {
    eprint!("{}", prompt);
    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
