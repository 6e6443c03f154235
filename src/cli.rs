use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sitecms")]
#[command(author, version, about = "Content store and seeding tool for the website backend")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file (overrides config and DB_PATH)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the schema, the default admin and the sample articles
    Seed {
        /// Schema definition to apply (defaults to database.schema)
        #[arg(long)]
        schema: Option<PathBuf>,

        /// Skip the sample articles
        #[arg(long)]
        no_samples: bool,
    },

    /// Manage games
    #[command(subcommand)]
    Games(GameCommands),

    /// Manage articles
    #[command(subcommand)]
    Contents(ContentCommands),

    /// Inspect admin accounts
    #[command(subcommand)]
    Admins(AdminCommands),

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        #[arg(value_name = "CONFIG")]
        file: Option<PathBuf>,
    },

    /// Display version information
    Version,

    /// Generate a bcrypt password hash for an admin account
    HashPassword {
        /// Password to hash
        password: String,

        /// bcrypt work factor
        #[arg(long, default_value_t = sitecms::auth::DEFAULT_COST)]
        cost: u32,
    },
}

#[derive(Subcommand)]
pub enum GameCommands {
    /// List all games
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one game
    Show {
        /// Game label
        label: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a game
    Add {
        /// Unique label
        label: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        description: String,

        #[command(flatten)]
        images: ImageArgs,
    },

    /// Update a game's name and description, and any images given
    Update {
        /// Game label
        label: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        description: String,

        #[command(flatten)]
        images: ImageArgs,
    },

    /// Remove a game
    Remove {
        /// Game label
        label: String,
    },
}

#[derive(Args, Debug, Default)]
pub struct ImageArgs {
    /// Main image
    #[arg(long)]
    pub image_main: Option<String>,

    /// First secondary image
    #[arg(long = "image-1")]
    pub image_1: Option<String>,

    /// Second secondary image
    #[arg(long = "image-2")]
    pub image_2: Option<String>,

    /// Third secondary image
    #[arg(long = "image-3")]
    pub image_3: Option<String>,
}

#[derive(Subcommand)]
pub enum ContentCommands {
    /// List all articles
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add an article
    Add {
        #[arg(long)]
        title: String,

        #[arg(long)]
        body: String,

        /// Username of the authoring admin
        #[arg(long, default_value = "admin")]
        author: String,
    },
}

#[derive(Subcommand)]
pub enum AdminCommands {
    /// List admin accounts
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
