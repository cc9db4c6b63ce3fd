//! CLI administration tool for peas.
//!
//! Provides commands for managing user accounts, viewing import statistics,
//! and performing database checks without going through the web application.
//!
//! # Usage
//!
//! ```bash
//! # Create a user (prompts for missing values)
//! cargo run --bin peas-admin -- user create --email cook@example.com
//!
//! # List users
//! cargo run --bin peas-admin -- user list
//!
//! # View import statistics
//! cargo run --bin peas-admin -- stats
//!
//! # Check database connection
//! cargo run --bin peas-admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME` (required)
//! - `SESSION_SECRET` (required for `user create`): must match the web application

use peas::application::services::AuthService;
use peas::application::services::auth_service::MIN_PASSWORD_LENGTH;
use peas::config::{Config, mask_connection_string};
use peas::domain::repositories::ImportRepository;
use peas::infrastructure::persistence::{
    PgImportRepository, PgSessionRepository, PgUserRepository,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

type PgAuthService = AuthService<PgUserRepository, PgSessionRepository>;

/// CLI tool for managing peas.
#[derive(Parser)]
#[command(name = "peas-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Show import statistics
    Stats,

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
        /// Email address used to sign in
        #[arg(short, long)]
        email: Option<String>,

        /// Password (prompted without echo when omitted)
        #[arg(short, long)]
        password: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all users
    List,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool, &database_url).await?,
    }

    Ok(())
}

/// Builds the authentication service used for account management.
fn auth_service(pool: &PgPool, secret: String) -> PgAuthService {
    let pool = Arc::new(pool.clone());
    AuthService::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgSessionRepository::new(pool)),
        secret,
        chrono::Duration::zero(),
    )
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    match action {
        UserAction::Create {
            email,
            password,
            yes,
        } => {
            let secret = std::env::var("SESSION_SECRET").context("SESSION_SECRET must be set")?;
            create_user(&auth_service(pool, secret), email, password, yes).await?;
        }
        UserAction::List => {
            // Listing never touches password hashes, so no secret is needed.
            list_users(&auth_service(pool, String::new())).await?;
        }
    }

    Ok(())
}

/// Creates a user account with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for email (or use provided)
/// 2. Prompt for password with confirmation (or use provided)
/// 3. Confirm creation (unless `--yes` flag)
/// 4. Store the account with a salted, keyed password hash
async fn create_user(
    service: &PgAuthService,
    email: Option<String>,
    password: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };

    let password = match password {
        Some(p) => {
            println!("{}", "⚠️  Using password from the command line".yellow());
            p
        }
        None => Password::new()
            .with_prompt(format!("Password (min {} characters)", MIN_PASSWORD_LENGTH))
            .with_confirmation("Repeat password", "Passwords do not match")
            .interact()?,
    };

    println!();
    println!("{}", "User details:".bright_white().bold());
    println!("  Email: {}", email.cyan());
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

    let user = service
        .create_user(&email, &password)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!("{}", "✅ User created successfully!".green().bold());
    println!("  ID: {}", user.id.to_string().bright_black());
    println!();

    Ok(())
}

/// Lists all user accounts.
///
/// # Output Format
///
/// ```text
/// 📋 Users
///
///   ID  Email                                    Created
///   ────────────────────────────────────────────────────────────────
///   1   cook@example.com                         2024-01-15 10:30
/// ```
async fn list_users(service: &PgAuthService) -> Result<()> {
    println!("{}", "📋 Users".bright_blue().bold());
    println!();

    let users = service
        .list_users()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        println!();
        println!(
            "  Create one with: {} peas-admin user create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<3} {:<40} {:<20}",
        "ID".bright_white().bold(),
        "Email".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(65).bright_black());

    for user in &users {
        println!(
            "  {:<3} {:<40} {}",
            user.id.to_string().bright_black(),
            user.email.cyan(),
            user.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Displays import statistics.
///
/// Shows the same counts as the import page: notes, ingredient lines and
/// parsing errors.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Import Statistics".bright_blue().bold());
    println!();

    let repository = PgImportRepository::new(Arc::new(pool.clone()));
    let stats = repository
        .get_import_stats()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load statistics: {}", e))?;

    println!(
        "  Notes:          {}",
        stats.note_count.to_string().bright_green().bold()
    );
    println!(
        "  Ingredients:    {}",
        stats.ingredient_count.to_string().bright_green().bold()
    );
    println!(
        "  Parsing errors: {}",
        stats.parsing_error_count.to_string().bright_red().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool, database_url: &str) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
                .fetch_one(pool)
                .await?;

            println!("  URL:        {}", mask_connection_string(database_url).bright_white());
            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Users:      {}", users.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
