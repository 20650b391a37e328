//! CLI administration tool for url-shortening-service.
//!
//! Inspects and manages short URLs in the configured PostgreSQL store without
//! going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Show a short URL and its access count
//! cargo run --bin admin -- stats abc123
//!
//! # Delete a short URL (asks for confirmation)
//! cargo run --bin admin -- delete abc123
//!
//! # Print fresh codes from the secure generator
//! cargo run --bin admin -- generate --length 8 --count 5
//!
//! # Run the URL validator against a URL
//! cargo run --bin admin -- check-url https://example.com
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server. `DATABASE_URL` (or the `DB_*` components) is required
//! for `stats`, `delete` and `db check`.

use url_shortening_service::application::services::UrlService;
use url_shortening_service::config::{self, Config};
use url_shortening_service::infrastructure::persistence::PgUrlRepository;
use url_shortening_service::server::connect_pool;
use url_shortening_service::utils::code_generator::generate_code;
use url_shortening_service::utils::input_validator::{
    InputValidator, MAX_SHORT_CODE_LENGTH, UrlValidator,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;

/// CLI tool for managing url-shortening-service.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Show a short URL with its access count
    Stats {
        /// Short code to inspect
        code: String,
    },

    /// Delete a short URL
    Delete {
        /// Short code to delete
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Print random short codes
    Generate {
        /// Code length (defaults to SHORT_CODE_LENGTH)
        #[arg(short, long)]
        length: Option<usize>,

        /// Number of codes to print
        #[arg(short, long, default_value_t = 1)]
        count: usize,
    },

    /// Validate a URL with the configured rules
    CheckUrl {
        /// URL to validate
        url: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection and count stored short URLs
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    match cli.command {
        Commands::Stats { code } => show_stats(&connect_service(&config).await?, &code).await?,
        Commands::Delete { code, yes } => {
            delete_url(&connect_service(&config).await?, &code, yes).await?
        }
        Commands::Generate { length, count } => {
            generate_codes(length.unwrap_or(config.shortener.code_length), count)?
        }
        Commands::CheckUrl { url } => check_url(&config, &url),
        Commands::Db { action } => handle_db_action(action, &config).await?,
    }

    Ok(())
}

/// Builds a [`UrlService`] on the configured PostgreSQL database.
async fn connect_service(config: &Config) -> Result<UrlService> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL (or DB_HOST with credentials) must be set")?;

    let pool = connect_pool(config, database_url).await?;
    let repository = Arc::new(PgUrlRepository::new(Arc::new(pool)));

    Ok(UrlService::new(repository, &config.shortener))
}

/// Prints a short URL record.
///
/// # Output Format
///
/// ```text
/// Short URL abc123
///
///   ID:       42
///   URL:      https://example.com/a
///   Accesses: 7
///   Created:  2024-01-15 10:30
///   Updated:  2024-01-15 10:30
/// ```
async fn show_stats(service: &UrlService, code: &str) -> Result<()> {
    let short_url = service
        .get_statistics(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load {}: {}", code, e))?;

    println!("{} {}", "Short URL".bright_blue().bold(), code.cyan());
    println!();
    println!("  ID:       {}", short_url.id.to_string().bright_black());
    println!("  URL:      {}", short_url.url.bright_white());
    println!(
        "  Accesses: {}",
        short_url.access_count.to_string().bright_green().bold()
    );
    println!(
        "  Created:  {}",
        short_url.created_at.format("%Y-%m-%d %H:%M").to_string().bright_black()
    );
    println!(
        "  Updated:  {}",
        short_url.updated_at.format("%Y-%m-%d %H:%M").to_string().bright_black()
    );
    println!();

    Ok(())
}

/// Deletes a short URL after showing it and asking for confirmation
/// (default: No).
async fn delete_url(service: &UrlService, code: &str, skip_confirm: bool) -> Result<()> {
    let short_url = service
        .get_statistics(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load {}: {}", code, e))?;

    println!("{}", "Delete Short URL".bright_blue().bold());
    println!();
    println!("  Code: {}", short_url.short_code.cyan());
    println!("  URL:  {}", short_url.url.bright_white());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this short URL?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_short_url(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete {}: {}", code, e))?;

    println!("{}", "Short URL deleted".green().bold());
    println!();

    Ok(())
}

fn generate_codes(length: usize, count: usize) -> Result<()> {
    if length > MAX_SHORT_CODE_LENGTH {
        println!(
            "{}",
            format!(
                "Warning: codes longer than {MAX_SHORT_CODE_LENGTH} characters are not valid custom codes"
            )
            .yellow()
        );
    }

    for _ in 0..count {
        let code = generate_code(length).context("Failed to generate code")?;
        println!("{}", code.bright_yellow());
    }

    Ok(())
}

fn check_url(config: &Config, url: &str) {
    let validator = UrlValidator::new(&config.shortener);

    match validator.validate_url(url) {
        Ok(()) => println!("{} {}", "Accepted:".green().bold(), url),
        Err(reason) => println!("{} {} ({})", "Rejected:".red().bold(), url, reason),
    }
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, config: &Config) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            let service = connect_service(config).await?;
            let count = service
                .count()
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

            println!("{}", "Database connection OK".green().bold());
            println!("  Short URLs: {}", count.to_string().bright_green().bold());
        }
    }

    Ok(())
}
