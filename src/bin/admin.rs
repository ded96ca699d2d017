//! CLI administration tool for tinylink.
//!
//! Provides commands for managing links and the database schema without
//! going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create the schema
//! cargo run --bin admin -- db init
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Shorten a URL, optionally with a chosen code
//! cargo run --bin admin -- links create https://example.com --code Docs01
//!
//! # List, inspect and delete links
//! cargo run --bin admin -- links list
//! cargo run --bin admin -- links show Docs01
//! cargo run --bin admin -- links delete Docs01
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`, or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`
//! - `BASE_URL` (optional): used to print full short URLs

use tinylink::application::services::{CodeAllocator, LinkService};
use tinylink::config::Config;
use tinylink::domain::entities::Link;
use tinylink::infrastructure::persistence::PgLinkStore;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing tinylink.
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
    /// Manage short links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// List all links, newest first
    List,

    /// Show one link without counting a click
    Show {
        /// Short code
        code: String,
    },

    /// Create a new short link
    Create {
        /// Target URL (prompted if omitted)
        url: Option<String>,

        /// Custom code, 6-8 letters or digits (random if omitted)
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Delete a link
    Delete {
        /// Short code
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Apply pending migrations
    Init,

    /// Check database connection
    Check,
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

    let result = match cli.command {
        Commands::Links { action } => handle_link_action(action, &pool).await,
        Commands::Db { action } => handle_db_action(action, &pool).await,
    };

    pool.close().await;
    result
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, pool: &PgPool) -> Result<()> {
    let store = Arc::new(PgLinkStore::new(Arc::new(pool.clone())));
    let base_url = std::env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".into());
    let base_url = base_url.trim_end_matches('/');

    match action {
        LinkAction::List => list_links(&LinkService::new(store), base_url).await,
        LinkAction::Show { code } => show_link(&LinkService::new(store), base_url, &code).await,
        LinkAction::Create { url, code } => {
            create_link(&CodeAllocator::new(store), base_url, url, code).await
        }
        LinkAction::Delete { code, yes } => {
            delete_link(&LinkService::new(store), &code, yes).await
        }
    }
}

/// Lists all links.
///
/// # Output Format
///
/// ```text
/// 🔗 Links
///
///   Code      Clicks  Created           Target
///   ──────────────────────────────────────────────────────────────
///   ABC123    12      2025-01-15 10:30  https://example.com/docs
/// ```
async fn list_links(service: &LinkService<PgLinkStore>, base_url: &str) -> Result<()> {
    println!("{}", "🔗 Links".bright_blue().bold());
    println!();

    let links = service.list_links().await.context("Failed to list links")?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!(
            "  Create one with: {} admin links create <url>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<9} {:<7} {:<17} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        let clicks = if link.was_clicked() {
            link.total_clicks.to_string().bright_green()
        } else {
            link.total_clicks.to_string().bright_black()
        };

        println!(
            "  {:<9} {:<7} {:<17} {}",
            link.code.cyan(),
            clicks,
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.target_url
        );
    }

    println!();
    println!(
        "  Total: {}  (short URLs under {})",
        links.len().to_string().bright_white().bold(),
        base_url.bright_black()
    );
    println!();

    Ok(())
}

/// Prints one link's details.
async fn show_link(service: &LinkService<PgLinkStore>, base_url: &str, code: &str) -> Result<()> {
    let link = service.get_link(code).await?;
    print_link(&link, base_url);
    Ok(())
}

/// Creates a link, prompting for the URL when it was not given.
async fn create_link(
    allocator: &CodeAllocator<PgLinkStore>,
    base_url: &str,
    url: Option<String>,
    code: Option<String>,
) -> Result<()> {
    println!("{}", "✨ Create Short Link".bright_blue().bold());
    println!();

    let target_url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("Target URL")
            .with_initial_text("https://")
            .interact_text()?,
    };

    let link = allocator
        .allocate(code.as_deref(), &target_url)
        .await
        .context("Failed to create link")?;

    println!("{}", "✅ Link created successfully!".green().bold());
    println!();
    print_link(&link, base_url);

    Ok(())
}

/// Deletes a link after confirmation (default: No).
async fn delete_link(service: &LinkService<PgLinkStore>, code: &str, yes: bool) -> Result<()> {
    println!("{}", "🗑  Delete Short Link".bright_blue().bold());
    println!();

    let link = service.get_link(code).await?;
    println!("  Code:   {}", link.code.cyan());
    println!("  Target: {}", link.target_url);
    println!();

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_link(code)
        .await
        .context("Failed to delete link")?;

    println!("{}", "✅ Link deleted".green().bold());
    println!();

    Ok(())
}

fn print_link(link: &Link, base_url: &str) {
    println!("  Code:         {}", link.code.cyan());
    println!(
        "  Short URL:    {}",
        format!("{}/{}", base_url, link.code).bright_yellow()
    );
    println!("  Target:       {}", link.target_url);
    println!(
        "  Created:      {}",
        link.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!(
        "  Clicks:       {}",
        link.total_clicks.to_string().bright_green().bold()
    );
    let last = link
        .last_clicked_at
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "never".to_string());
    println!("  Last clicked: {}", last.bright_black());
    println!();
}

/// Handles database commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Init => {
            println!("{}", "🛠  Applying migrations...".bright_blue());

            sqlx::migrate!("./migrations")
                .run(pool)
                .await
                .context("Failed to run database migrations")?;

            println!("{}", "✅ Schema is up to date".green().bold());
        }
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
                .fetch_one(pool)
                .await
                .context("Links table missing, run `admin db init`")?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!(
                "  Links: {}",
                links_count.to_string().bright_green().bold()
            );
        }
    }

    Ok(())
}
