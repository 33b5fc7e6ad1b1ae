//! bookshelf server entry point.

use bookshelf::{
    config::{Cli, Command, Config, CoverCommand},
    db::{Database, NewCover},
    server,
};
use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Find or load config
    let config_path = cli.config.clone().or_else(Config::find_config_file);

    let mut config = if let Some(ref path) = config_path {
        Config::load(path)?
    } else {
        Config::default()
    };
    config.apply_overrides(cli.database, cli.bind, cli.port);

    // Handle command
    match cli.command {
        Some(Command::Init { force }) => cmd_init(force, &config),
        Some(Command::Cover { action }) => cmd_cover(action, &config),
        Some(Command::Serve) | None => cmd_serve(config).await,
    }
}

/// Initialize config and database.
fn cmd_init(force: bool, config: &Config) -> anyhow::Result<()> {
    let config_path = PathBuf::from("config.toml");

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, Config::generate_default())?;
    println!("Created config file: {}", config_path.display());

    let _db = Database::open(&config.database.path, 1)?;
    println!("Initialized database: {}", config.database.path.display());

    println!("\nSeed the catalogue with: bookshelf cover add <title> --author <name>");
    println!("Then run: bookshelf serve");

    Ok(())
}

/// Cover catalogue commands.
fn cmd_cover(action: CoverCommand, config: &Config) -> anyhow::Result<()> {
    let db = Database::open(&config.database.path, 1)?;

    match action {
        CoverCommand::Add {
            title,
            author,
            image_url,
            rating,
            note,
        } => {
            let id = db.create_cover(&NewCover {
                title: title.clone(),
                author,
                image_url,
                rating,
            })?;
            if let Some(note) = note {
                db.set_cover_note(id, &note)?;
            }
            println!("Added cover: {} (id: {})", title, id);
        }

        CoverCommand::Note { id, text } => {
            db.set_cover_note(id, &text)?;
            println!("Saved note for cover {}", id);
        }

        CoverCommand::List => {
            let covers = db.list_covers(None)?;
            if covers.is_empty() {
                println!("No covers found.");
            } else {
                println!("{:<6} {:<40} {:<25} RATING", "ID", "TITLE", "AUTHOR");
                println!("{}", "-".repeat(80));
                for cover in covers {
                    let rating = cover
                        .rating
                        .map(|r| r.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "{:<6} {:<40} {:<25} {}",
                        cover.id, cover.title, cover.author, rating
                    );
                }
            }
        }
    }

    Ok(())
}

/// Start the server.
async fn cmd_serve(config: Config) -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookshelf=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db = Database::open(&config.database.path, config.database.pool_size)?;

    tracing::info!(
        bind = %config.server.bind,
        database = %config.database.path.display(),
        pool_size = db.pool_size(),
        "Starting bookshelf server"
    );

    let bind_addr = config.server.bind;
    let state = server::AppState::new(config, db);
    let app = server::create_router(state);

    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!(address = %bind_addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
