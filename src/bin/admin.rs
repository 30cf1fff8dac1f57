//! CLI administration tool for is-in-country.
//!
//! Manages API tokens and country boundaries directly against the database,
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a new API token
//! cargo run --bin admin -- token create --name "Boundary loader"
//!
//! # Load the built-in sample rectangles
//! cargo run --bin admin -- country seed
//!
//! # Import real borders from a GeoJSON FeatureCollection
//! cargo run --bin admin -- country import ne_110m_admin_0_countries.geojson
//!
//! # Check a point locally
//! cargo run --bin admin -- check --lat 48.8566 --lon 2.3522 --code FRA
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `TOKEN_SIGNING_SECRET` (required for `token create`): must match the server
//! - `REDIS_URL` (optional): cached records are invalidated on change

use is_in_country::application::import::{parse_feature_collection, sample_countries};
use is_in_country::application::services::{
    AuthService, ContainmentService, CountryService, GeometryCache,
};
use is_in_country::domain::entities::{NewCountry, UpdateCountry};
use is_in_country::domain::geometry::parse_boundary;
use is_in_country::error::AppError;
use is_in_country::infrastructure::cache::{CacheService, NullCache, RedisCache};
use is_in_country::infrastructure::persistence::{PgCountryRepository, PgTokenRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::path::PathBuf;
use std::sync::Arc;

/// CLI tool for managing is-in-country.
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
    /// Manage API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Manage country boundaries
    Country {
        #[command(subcommand)]
        action: CountryAction,
    },

    /// Check whether a point lies inside a stored country
    Check {
        /// Latitude in degrees (-90..=90)
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in degrees (-180..=180)
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Country code, e.g. USA
        #[arg(long)]
        code: String,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Token management subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Create a new API token
    Create {
        /// Token name (e.g., "Boundary loader")
        #[arg(short, long)]
        name: Option<String>,

        /// Custom token value (optional, auto-generated if not provided)
        #[arg(short, long)]
        token: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all tokens
    List,

    /// Revoke a token
    Revoke {
        /// Token name or ID to revoke
        name_or_id: String,
    },
}

/// Country management subcommands.
#[derive(Subcommand)]
enum CountryAction {
    /// List stored countries
    List,

    /// Add one country from a GeoJSON geometry file
    Add {
        /// Three-letter country code
        #[arg(short, long)]
        code: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// File holding a Polygon or MultiPolygon geometry
        #[arg(short, long)]
        file: PathBuf,

        /// Replace the boundary if the country already exists
        #[arg(long)]
        replace: bool,
    },

    /// Remove a country
    Remove {
        /// Country code
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Import every country of a GeoJSON FeatureCollection
    Import {
        /// Path to the .geojson file
        file: PathBuf,

        /// Replace boundaries of countries that already exist
        #[arg(long)]
        replace: bool,
    },

    /// Insert the built-in sample rectangles, skipping existing codes
    Seed,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

/// Services wired for the CLI.
struct Admin {
    pool: PgPool,
    countries: CountryService<PgCountryRepository>,
    containment: ContainmentService<PgCountryRepository>,
}

impl Admin {
    async fn connect() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let pool = PgPool::connect(&database_url)
            .await
            .context("Failed to connect to database")?;

        let cache: Arc<dyn CacheService> = match std::env::var("REDIS_URL") {
            Ok(url) => match RedisCache::connect(&url, 3600).await {
                Ok(redis) => Arc::new(redis),
                Err(e) => {
                    println!(
                        "{}",
                        format!("⚠️  Redis unavailable ({e}); cached records expire on their own")
                            .yellow()
                    );
                    Arc::new(NullCache::new())
                }
            },
            Err(_) => Arc::new(NullCache::new()),
        };

        let repository = Arc::new(PgCountryRepository::new(Arc::new(pool.clone())));
        let geometries = Arc::new(GeometryCache::new());

        Ok(Self {
            countries: CountryService::new(repository.clone(), cache.clone(), geometries.clone()),
            containment: ContainmentService::new(repository, cache, geometries),
            pool,
        })
    }

    fn auth(&self) -> Result<AuthService<PgTokenRepository>> {
        let secret = std::env::var("TOKEN_SIGNING_SECRET")
            .context("TOKEN_SIGNING_SECRET must be set (same value as the server)")?;
        anyhow::ensure!(!secret.is_empty(), "TOKEN_SIGNING_SECRET must not be empty");

        let repository = Arc::new(PgTokenRepository::new(Arc::new(self.pool.clone())));
        Ok(AuthService::new(repository, secret))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let admin = Admin::connect().await?;

    match cli.command {
        Commands::Token { action } => handle_token_action(action, &admin).await?,
        Commands::Country { action } => handle_country_action(action, &admin).await?,
        Commands::Check { lat, lon, code } => check_point(&admin, lat, lon, &code).await?,
        Commands::Stats => handle_stats(&admin).await?,
        Commands::Db { action } => handle_db_action(action, &admin.pool).await?,
    }

    Ok(())
}

/// Dispatches token management commands.
async fn handle_token_action(action: TokenAction, admin: &Admin) -> Result<()> {
    match action {
        TokenAction::Create { name, token, yes } => create_token(admin, name, token, yes).await,
        TokenAction::List => list_tokens(admin).await,
        TokenAction::Revoke { name_or_id } => revoke_token(admin, name_or_id).await,
    }
}

/// Creates a new API token with interactive prompts.
///
/// Only the HMAC of the token is stored, so the raw value is shown once.
async fn create_token(
    admin: &Admin,
    name: Option<String>,
    token: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    let auth = admin.auth()?;

    println!("{}", "🔑 Create API Token".bright_blue().bold());
    println!();

    let token_name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Token name")
            .with_initial_text("Boundary loader")
            .interact_text()?,
    };

    if token.is_some() {
        println!("{}", "⚠️  Using provided token value".yellow());
    }

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Create token \"{}\"?", token_name))
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let (stored, raw) = auth
        .issue_token(&token_name, token)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create token: {}", e))?;

    println!();
    println!("{}", "✅ Token created successfully!".green().bold());
    println!();
    println!("  ID:    {}", stored.id.to_string().bright_black());
    println!("  Name:  {}", stored.name.cyan());
    println!("  Token: {}", raw.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -X DELETE -H \"Authorization: Bearer {}\" http://localhost:5000/api/v1/countries/XYZ",
        raw.bright_yellow()
    );
    println!();

    Ok(())
}

/// Lists all API tokens with status indicators.
async fn list_tokens(admin: &Admin) -> Result<()> {
    println!("{}", "📋 API Tokens".bright_blue().bold());
    println!();

    let tokens = admin
        .auth()?
        .list_tokens()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tokens: {}", e))?;

    if tokens.is_empty() {
        println!("{}", "  No tokens found".yellow());
        println!();
        println!(
            "  Create one with: {} admin token create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<4} {:<30} {:<17} {:<17} {:<8}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Created".bright_white().bold(),
        "Last used".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(82).bright_black());

    for token in &tokens {
        let status = if token.is_revoked() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };
        let last_used = token
            .last_used_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string());

        println!(
            "  {:<4} {:<30} {:<17} {:<17} {}",
            token.id.to_string().bright_black(),
            token.name.cyan(),
            token.created_at.format("%Y-%m-%d %H:%M").to_string().bright_black(),
            last_used.bright_black(),
            status
        );
    }

    println!();
    println!("  Total: {}", tokens.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Revokes a token by name or ID after confirmation (default: No).
async fn revoke_token(admin: &Admin, name_or_id: String) -> Result<()> {
    println!("{}", "🔒 Revoke API Token".bright_blue().bold());
    println!();

    let confirmed = Confirm::new()
        .with_prompt(format!("Revoke token \"{}\"?", name_or_id))
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    match admin.auth()?.revoke_token(&name_or_id).await {
        Ok(token) => {
            println!();
            println!(
                "{} {} (ID {})",
                "✅ Token revoked:".green().bold(),
                token.name.cyan(),
                token.id
            );
        }
        Err(AppError::NotFound { .. }) => {
            println!("{}", "⚠️  No active token with that name or ID".yellow());
        }
        Err(e) => anyhow::bail!("Failed to revoke token: {}", e),
    }
    println!();

    Ok(())
}

/// Dispatches country management commands.
async fn handle_country_action(action: CountryAction, admin: &Admin) -> Result<()> {
    match action {
        CountryAction::List => list_countries(admin).await,
        CountryAction::Add {
            code,
            name,
            file,
            replace,
        } => add_country(admin, code, name, file, replace).await,
        CountryAction::Remove { code, yes } => remove_country(admin, code, yes).await,
        CountryAction::Import { file, replace } => import_countries(admin, file, replace).await,
        CountryAction::Seed => seed_countries(admin).await,
    }
}

async fn list_countries(admin: &Admin) -> Result<()> {
    println!("{}", "🌍 Countries".bright_blue().bold());
    println!();

    let countries = admin
        .countries
        .list_countries()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list countries: {}", e))?;

    if countries.is_empty() {
        println!("{}", "  No countries found".yellow());
        println!();
        println!(
            "  Load samples with: {} admin country seed",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<5} {:<32} {:<13} {:<9} {}",
        "Code".bright_white().bold(),
        "Name".bright_white().bold(),
        "Geometry".bright_white().bold(),
        "Vertices".bright_white().bold(),
        "Updated".bright_white().bold()
    );
    println!("  {}", "─".repeat(80).bright_black());

    for country in &countries {
        let (kind, vertices) = match parse_boundary(&country.polygon_data) {
            Ok(geometry) => (geometry.kind().normal(), geometry.vertex_count().to_string()),
            Err(_) => ("MALFORMED".red(), "-".to_string()),
        };

        println!(
            "  {:<5} {:<32} {:<13} {:<9} {}",
            country.country_code.cyan(),
            country.country_name,
            kind,
            vertices,
            country
                .updated_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!("  Total: {}", countries.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

async fn add_country(
    admin: &Admin,
    code: String,
    name: String,
    file: PathBuf,
    replace: bool,
) -> Result<()> {
    let polygon_data = std::fs::read_to_string(&file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let outcome = save_country(
        admin,
        NewCountry {
            country_code: code,
            country_name: name,
            polygon_data,
        },
        replace,
    )
    .await
    .map_err(|e| anyhow::anyhow!("Failed to add country: {}", describe(&e)))?;

    match outcome {
        Saved::Created(code) => println!("{} {}", "✅ Added".green().bold(), code.cyan()),
        Saved::Replaced(code) => println!("{} {}", "✅ Replaced".green().bold(), code.cyan()),
        Saved::Exists(code) => println!(
            "{} {} (use --replace to overwrite)",
            "⏭️  Already exists:".yellow(),
            code.cyan()
        ),
    }

    Ok(())
}

async fn remove_country(admin: &Admin, code: String, skip_confirm: bool) -> Result<()> {
    let country = admin
        .countries
        .get_country(&code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", describe(&e)))?;

    println!(
        "  Country: {} ({})",
        country.country_name.cyan(),
        country.country_code
    );

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Remove this country?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    admin
        .countries
        .delete_country(&country.country_code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to remove country: {}", e))?;

    println!("{}", "✅ Country removed".green().bold());
    Ok(())
}

async fn import_countries(admin: &Admin, file: PathBuf, replace: bool) -> Result<()> {
    println!(
        "{} {}",
        "📥 Importing".bright_blue().bold(),
        file.display()
    );
    println!();

    let document = std::fs::read_to_string(&file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let batch = parse_feature_collection(&document)?;

    for skipped in &batch.skipped {
        println!(
            "  {} #{} {}: {}",
            "⚠️ ".yellow(),
            skipped.index,
            skipped.label,
            skipped.reason.bright_black()
        );
    }

    let totals = store_all(admin, batch.countries, replace).await;

    println!();
    println!(
        "  Added: {}  Replaced: {}  Existing: {}  Skipped: {}  Failed: {}",
        totals.created.to_string().green().bold(),
        totals.replaced.to_string().green(),
        totals.existing.to_string().yellow(),
        batch.skipped.len().to_string().yellow(),
        totals.failed.to_string().red()
    );
    println!();

    Ok(())
}

async fn seed_countries(admin: &Admin) -> Result<()> {
    println!("{}", "🌱 Seeding sample countries".bright_blue().bold());
    println!();

    let totals = store_all(admin, sample_countries(), false).await;

    println!();
    println!(
        "  Added: {}  Existing: {}  Failed: {}",
        totals.created.to_string().green().bold(),
        totals.existing.to_string().yellow(),
        totals.failed.to_string().red()
    );
    println!();

    Ok(())
}

#[derive(Default)]
struct Totals {
    created: usize,
    replaced: usize,
    existing: usize,
    failed: usize,
}

async fn store_all(admin: &Admin, countries: Vec<NewCountry>, replace: bool) -> Totals {
    let mut totals = Totals::default();

    for country in countries {
        let label = format!("{} ({})", country.country_name, country.country_code);

        match save_country(admin, country, replace).await {
            Ok(Saved::Created(_)) => {
                totals.created += 1;
                println!("  {} {}", "✅".green(), label);
            }
            Ok(Saved::Replaced(_)) => {
                totals.replaced += 1;
                println!("  {} {}", "🔄".green(), label);
            }
            Ok(Saved::Exists(_)) => {
                totals.existing += 1;
                println!("  {} {} already exists", "⏭️ ".yellow(), label);
            }
            Err(e) => {
                totals.failed += 1;
                println!("  {} {}: {}", "❌".red(), label, describe(&e));
            }
        }
    }

    totals
}

enum Saved {
    Created(String),
    Replaced(String),
    Exists(String),
}

async fn save_country(admin: &Admin, country: NewCountry, replace: bool) -> Result<Saved, AppError> {
    let NewCountry {
        country_code,
        country_name,
        polygon_data,
    } = country;

    match admin
        .countries
        .create_country(&country_code, country_name.clone(), polygon_data.clone())
        .await
    {
        Ok(created) => Ok(Saved::Created(created.country_code)),
        Err(AppError::Conflict { .. }) if replace => {
            let update = UpdateCountry {
                country_name: Some(country_name),
                polygon_data: Some(polygon_data),
            };
            let updated = admin.countries.update_country(&country_code, update).await?;
            Ok(Saved::Replaced(updated.country_code))
        }
        Err(AppError::Conflict { .. }) => Ok(Saved::Exists(country_code.to_uppercase())),
        Err(e) => Err(e),
    }
}

/// Message plus the `reason` detail, when the error carries one.
fn describe(error: &AppError) -> String {
    let (AppError::Validation { message, details }
    | AppError::Unauthorized { message, details }
    | AppError::NotFound { message, details }
    | AppError::MethodNotAllowed { message, details }
    | AppError::Conflict { message, details }
    | AppError::Internal { message, details }) = error;

    match details.get("reason").and_then(|r| r.as_str()) {
        Some(reason) => format!("{}: {}", message, reason),
        None => message.clone(),
    }
}

/// Runs a containment check against the stored record, as the API would.
async fn check_point(admin: &Admin, lat: f64, lon: f64, code: &str) -> Result<()> {
    anyhow::ensure!((-90.0..=90.0).contains(&lat), "Latitude must be between -90 and 90");
    anyhow::ensure!(
        (-180.0..=180.0).contains(&lon),
        "Longitude must be between -180 and 180"
    );

    let outcome = admin
        .containment
        .check(lat, lon, code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", describe(&e)))?;

    let verdict = if outcome.is_inside_country {
        "INSIDE".green().bold()
    } else {
        "OUTSIDE".red().bold()
    };

    println!(
        "  ({}, {}) is {} {} ({})",
        lat,
        lon,
        verdict,
        outcome.country_name.cyan(),
        outcome.country_code
    );

    Ok(())
}

/// Displays country and token statistics.
async fn handle_stats(admin: &Admin) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let countries = admin
        .countries
        .list_countries()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list countries: {}", e))?;

    let mut polygons = 0usize;
    let mut multi_polygons = 0usize;
    let mut malformed = 0usize;
    let mut vertices = 0usize;

    for country in &countries {
        match parse_boundary(&country.polygon_data) {
            Ok(geometry) => {
                vertices += geometry.vertex_count();
                if geometry.kind() == "MultiPolygon" {
                    multi_polygons += 1;
                } else {
                    polygons += 1;
                }
            }
            Err(_) => malformed += 1,
        }
    }

    let active_tokens: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM api_tokens WHERE revoked_at IS NULL")
            .fetch_one(&admin.pool)
            .await?;

    println!(
        "  Countries:      {}",
        countries.len().to_string().bright_green().bold()
    );
    println!("    Polygon:      {}", polygons);
    println!("    MultiPolygon: {}", multi_polygons);
    if malformed > 0 {
        println!("    Malformed:    {}", malformed.to_string().red().bold());
    }
    println!("  Vertices:       {}", vertices.to_string().bright_green());
    println!(
        "  Active tokens:  {}",
        active_tokens.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
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

            let migrations: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM _sqlx_migrations WHERE success",
            )
            .fetch_one(pool)
            .await
            .unwrap_or(0);

            let countries_size: String =
                sqlx::query_scalar("SELECT pg_size_pretty(pg_total_relation_size('countries'))")
                    .fetch_one(pool)
                    .await
                    .unwrap_or_else(|_| "n/a".to_string());

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations);
            println!("  countries:  {}", countries_size);
            println!();
        }
    }

    Ok(())
}
