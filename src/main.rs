mod cli;

use sitecms::{
    auth, config,
    seed::{self, SeedOptions},
    ContentStore,
};
use sitecms_common::Error;
use sitecms_db::queries::games::{GameUpdate, NewGame};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{AdminCommands, Cli, Commands, ContentCommands, GameCommands, ImageArgs};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // A missing .env is fine
    dotenv::dotenv().ok();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "sitecms=trace,sitecms_db=trace".to_string()
        } else {
            "sitecms=info,sitecms_db=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Validate { file } => {
            let path = file.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("sitecms {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::HashPassword { password, cost } => {
            let hash = auth::hash_password(&password, cost)?;
            println!("{}", hash);
            Ok(())
        }
        command => {
            let config = load_config(cli.config.as_deref(), cli.db)?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(run_store_command(command, config))
        }
    }
}

fn load_config(config_path: Option<&Path>, db: Option<PathBuf>) -> Result<config::Config> {
    let mut config = config::load_config_or_default(config_path)?;
    config::apply_env_overrides(&mut config)?;
    if let Some(db) = db {
        config.database.path = Some(db);
    }
    Ok(config)
}

fn open_store(config: &config::Config) -> Result<ContentStore> {
    let db_path = config.database.db_path();
    tracing::debug!("Opening database at {:?}", db_path);
    ContentStore::open(&db_path)
        .with_context(|| format!("Failed to open database {:?}", db_path))
}

async fn run_store_command(command: Commands, mut config: config::Config) -> Result<()> {
    match command {
        Commands::Seed { schema, no_samples } => {
            if no_samples {
                config.seed.sample_content = false;
            }
            run_seed(&config, schema).await
        }
        Commands::Games(command) => run_games(&open_store(&config)?, command).await,
        Commands::Contents(command) => run_contents(&open_store(&config)?, command).await,
        Commands::Admins(command) => run_admins(&open_store(&config)?, command).await,
        Commands::Validate { .. } | Commands::Version | Commands::HashPassword { .. } => {
            unreachable!("handled before the runtime starts")
        }
    }
}

/// Seeding is a one-shot operational task: failures are logged here and
/// turned into a non-zero exit code instead of being propagated.
async fn run_seed(config: &config::Config, schema: Option<PathBuf>) -> Result<()> {
    let db_path = config.database.db_path();
    let store = match ContentStore::open_unmigrated(&db_path) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Error connecting to database {:?}: {}", db_path, e);
            std::process::exit(1);
        }
    };
    tracing::info!("Connected to database {:?}", db_path);

    // An explicit --schema must exist; only the configured default falls back
    let mut options = SeedOptions::from_config(config);
    if schema.is_some() {
        options.schema = schema;
    }
    match seed::run(&store, &options).await {
        Ok(report) => {
            tracing::info!(
                statements = report.statements,
                admin_created = report.admin_created,
                articles = report.articles_inserted,
                "Database seeded successfully"
            );
            println!("Database seeded successfully!");
            if report.admin_created {
                println!("Default admin credentials:");
                println!("Username: {}", options.admin_username);
                println!("Password: {}", options.admin_password);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Error seeding database: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run_games(store: &ContentStore, command: GameCommands) -> Result<()> {
    let games = store.games();
    match command {
        GameCommands::List { json } => {
            let all = games.find_all().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&all)?);
            } else if all.is_empty() {
                println!("No games.");
            } else {
                for game in &all {
                    println!("{:<20} {}", game.label, game.name);
                }
            }
        }
        GameCommands::Show { label, json } => {
            let game = games
                .find_by_label(&label)
                .await?
                .ok_or_else(|| Error::not_found("game", &label))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&game)?);
            } else {
                println!("Label: {}", game.label);
                println!("Name: {}", game.name);
                println!("Description: {}", game.description);
                println!("Images:");
                for image in game.images() {
                    println!("  {}", image);
                }
            }
        }
        GameCommands::Add {
            label,
            name,
            description,
            images,
        } => {
            let ImageArgs {
                image_main,
                image_1,
                image_2,
                image_3,
            } = images;
            let image_main = image_main.context("--image-main is required when adding a game")?;
            games
                .insert(NewGame {
                    label: label.clone(),
                    name,
                    description,
                    image_main,
                    image_1,
                    image_2,
                    image_3,
                })
                .await?;
            println!("Added game '{}'", label);
        }
        GameCommands::Update {
            label,
            name,
            description,
            images,
        } => {
            let update = GameUpdate {
                name,
                description,
                image_main: images.image_main,
                image_1: images.image_1,
                image_2: images.image_2,
                image_3: images.image_3,
            };
            if games.modify(&label, update).await? {
                println!("Updated game '{}'", label);
            } else {
                println!("No game labelled '{}'; nothing changed", label);
            }
        }
        GameCommands::Remove { label } => {
            if games.destroy(&label).await? {
                println!("Removed game '{}'", label);
            } else {
                println!("No game labelled '{}'; nothing removed", label);
            }
        }
    }
    Ok(())
}

async fn run_contents(store: &ContentStore, command: ContentCommands) -> Result<()> {
    match command {
        ContentCommands::List { json } => {
            let all = store.contents().find_all().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&all)?);
            } else if all.is_empty() {
                println!("No articles.");
            } else {
                for content in &all {
                    println!("{}  {}", content.id, content.title);
                }
            }
        }
        ContentCommands::Add {
            title,
            body,
            author,
        } => {
            let admin = store
                .admins()
                .find_by_username(&author)
                .await?
                .ok_or_else(|| Error::not_found("admin", &author))?;
            let content = store.contents().insert(&title, &body, admin.id).await?;
            println!("Added article {}", content.id);
        }
    }
    Ok(())
}

async fn run_admins(store: &ContentStore, command: AdminCommands) -> Result<()> {
    match command {
        AdminCommands::List { json } => {
            let all = store.admins().find_all().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&all)?);
            } else {
                for admin in &all {
                    println!("{}  {}", admin.id, admin.username);
                }
            }
        }
    }
    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let mut config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            config::Config::default()
        }
    };

    config::apply_env_overrides(&mut config)?;

    println!("  Schema: {}", config.database.schema.display());
    println!("  Database: {}", config.database.db_path().display());
    println!("  Default admin: {}", config.seed.admin_username);
    println!("  Sample content: {}", config.seed.sample_content);

    Ok(())
}
