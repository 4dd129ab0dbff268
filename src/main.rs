use clap::{Parser, Subcommand};
use gist::commands;
use gist::config::Config;
use gist::error::Result;
use gist::remote::RemoteClient;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gist")]
#[command(version)]
#[command(about = "A command-line client for GitHub gists", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List your gists
    List,

    /// Edit a gist in a temporary checkout and push the changes back
    Edit {
        /// Gist id
        id: String,
    },

    /// Update the description of a gist
    Description {
        /// Gist id
        id: String,
        /// New description
        desc: String,
    },

    /// Dump the raw JSON of a gist
    Info {
        /// Gist id
        id: String,
    },

    /// Fork a gist
    Fork {
        /// Gist id
        id: String,
    },

    /// List the files in a gist
    Files {
        /// Gist id
        id: String,
    },

    /// Delete one or more gists
    Delete {
        /// Gist ids
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Download a gist as a tar.gz archive in the current directory
    Archive {
        /// Gist id
        id: String,
    },

    /// Print the content of a gist's files
    Content {
        /// Gist id
        id: String,
        /// Only print this file
        filename: Option<String>,
        /// Decrypt encrypted files with gpg
        #[arg(long)]
        decrypt: bool,
    },

    /// Create a new gist from files, your editor, or piped stdin
    Create {
        /// Description of the gist
        desc: String,
        /// Make the gist public
        #[arg(long)]
        public: bool,
        /// Encrypt file contents with gpg before upload
        #[arg(long)]
        encrypt: bool,
        /// Files to include
        files: Vec<PathBuf>,
    },

    /// Clone a gist into the current directory
    Clone {
        /// Gist id
        id: String,
        /// Directory name (defaults to the id)
        name: Option<String>,
    },

    /// Print the version
    Version,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Version = cli.command {
        println!("gist-v{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = Config::load()?;
    init_tracing(&config);

    let client = RemoteClient::new(config.api_url(), config.token()?)?;

    match cli.command {
        Commands::List => commands::list(&client),
        Commands::Edit { id } => commands::edit(&client, &config, &id),
        Commands::Description { id, desc } => commands::description(&client, &id, &desc),
        Commands::Info { id } => commands::info(&client, &id),
        Commands::Fork { id } => commands::fork(&client, &id),
        Commands::Files { id } => commands::files(&client, &id),
        Commands::Delete { ids } => commands::delete(&client, &ids),
        Commands::Archive { id } => commands::archive(&client, &id),
        Commands::Content {
            id,
            filename,
            decrypt,
        } => commands::content(&client, &config, &id, filename.as_deref(), decrypt),
        Commands::Create {
            desc,
            public,
            encrypt,
            files,
        } => commands::create(&client, &config, &desc, &files, public, encrypt),
        Commands::Clone { id, name } => commands::clone(&client, &config, &id, name.as_deref()),
        Commands::Version => Ok(()),
    }
}

fn init_tracing(config: &Config) {
    let default_level = config.log_level.as_deref().unwrap_or("error");
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
