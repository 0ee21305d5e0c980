//! CLI administration tool for login-service.
//!
//! Provides commands for managing users, inspecting login history and hashing
//! passwords without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a user (prompts for the password)
//! cargo run --bin admin -- user create --email bob@example.com
//!
//! # Show recent logins
//! cargo run --bin admin -- user history bob@example.com
//!
//! # Hash a password with the configured cost
//! cargo run --bin admin -- password hash
//!
//! # Print a hash of the built-in diagnostic password
//! cargo run --bin admin -- password diagnostic
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required for `user` and `db`): PostgreSQL connection string
//! - `BCRYPT_COST` (optional): cost factor for new hashes (default: 10)

use login_service::domain::entities::NewUser;
use login_service::domain::repositories::UserRepository;
use login_service::infrastructure::persistence::PgUserRepository;
use login_service::utils::password::{self, DEFAULT_COST, DIAGNOSTIC_PASSWORD};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// CLI tool for managing login-service.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Password hashing tools
    Password {
        #[command(subcommand)]
        action: PasswordAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Email address used to log in
        #[arg(short, long)]
        email: Option<String>,

        /// Display name
        #[arg(short, long)]
        name: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show the most recent logins of a user
    History {
        /// Email address of the user
        email: String,

        /// Number of entries to show
        #[arg(short, long, default_value_t = 10)]
        limit: i64,
    },
}

/// Password subcommands.
#[derive(Subcommand)]
enum PasswordAction {
    /// Hash a password read from the terminal
    Hash,

    /// Hash the built-in diagnostic password and verify the result
    Diagnostic,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::User { action } => {
            let pool = connect().await?;
            handle_user_action(action, &pool).await?
        }
        Commands::Password { action } => handle_password_action(action)?,
        Commands::Db { action } => {
            let pool = connect().await?;
            handle_db_action(action, &pool).await?
        }
    }

    Ok(())
}

async fn connect() -> Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

/// Reads `BCRYPT_COST`, defaulting to [`DEFAULT_COST`].
fn bcrypt_cost() -> u32 {
    std::env::var("BCRYPT_COST")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_COST)
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgUserRepository::new(Arc::new(pool.clone())));

    match action {
        UserAction::Create { email, name, yes } => create_user(repo, email, name, yes).await?,
        UserAction::History { email, limit } => show_history(repo, email, limit).await?,
    }

    Ok(())
}

/// Creates a new user with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for email and name (or use provided)
/// 2. Prompt for the password twice
/// 3. Confirm creation (unless `--yes` flag)
/// 4. Hash the password with bcrypt
/// 5. Store the user
async fn create_user(
    repo: Arc<PgUserRepository>,
    email: Option<String>,
    name: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };

    let name = match name {
        Some(n) => Some(n),
        None => {
            let entered: String = Input::new()
                .with_prompt("Name (optional)")
                .allow_empty(true)
                .interact_text()?;
            Some(entered).filter(|n| !n.trim().is_empty())
        }
    };

    let plain = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()?;

    println!();
    println!("{}", "User details:".bright_white().bold());
    println!("  Email: {}", email.cyan());
    if let Some(ref n) = name {
        println!("  Name:  {}", n.cyan());
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this user?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let hash = password::hash_password(&plain, bcrypt_cost())
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;

    let user = repo
        .create_user(NewUser::new(&email, hash, name))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!(
        "{} {}",
        "✅ User created with id".green().bold(),
        user.id.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Prints the most recent logins of a user.
///
/// # Output Format
///
/// ```text
/// 🕑 Login history for bob@example.com
///   Last login: 2024-01-16 14:20:11
///
///   #     Logged in at
///   ──────────────────────────────
///   12    2024-01-16 14:20:11
///   11    2024-01-15 10:30:02
/// ```
async fn show_history(repo: Arc<PgUserRepository>, email: String, limit: i64) -> Result<()> {
    let user = repo
        .find_by_email(&email.trim().to_lowercase())
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("User not found")?;

    println!(
        "{} {}",
        "🕑 Login history for".bright_blue().bold(),
        user.email.cyan()
    );

    match user.last_login_at {
        Some(at) => println!("  Last login: {}", at.format("%Y-%m-%d %H:%M:%S")),
        None => println!("  Last login: {}", "never".yellow()),
    }
    println!();

    let records = repo
        .list_login_history(user.id, limit)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load login history: {}", e))?;

    if records.is_empty() {
        println!("{}", "  No logins recorded".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {}",
        "#".bright_white().bold(),
        "Logged in at".bright_white().bold()
    );
    println!("  {}", "─".repeat(30).bright_black());

    for record in &records {
        println!(
            "  {:<5} {}",
            record.id.to_string().bright_black(),
            record.logged_in_at.format("%Y-%m-%d %H:%M:%S")
        );
    }

    println!();
    Ok(())
}

/// Dispatches password commands.
fn handle_password_action(action: PasswordAction) -> Result<()> {
    match action {
        PasswordAction::Hash => {
            let plain = Password::new().with_prompt("Password").interact()?;
            let hash = password::hash_password(&plain, bcrypt_cost())
                .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;

            println!("{}", hash.bright_yellow());
        }
        PasswordAction::Diagnostic => {
            let hash = password::diagnostic_hash()
                .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;

            println!("  Password: {}", DIAGNOSTIC_PASSWORD.cyan());
            println!("  Hash:     {}", hash.bright_yellow());

            if password::verify_hash(DIAGNOSTIC_PASSWORD, &hash) {
                println!("{}", "✅ Hash verifies".green().bold());
            } else {
                anyhow::bail!("Diagnostic hash did not verify");
            }
        }
    }

    Ok(())
}

/// Dispatches database commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
                .fetch_one(pool)
                .await
                .context("Database query failed")?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  Users: {}", users.to_string().bright_white());
        }
    }

    Ok(())
}
