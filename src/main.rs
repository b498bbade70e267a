use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use letters_archive::framework::Purpose;
use letters_archive::index::MemoryIndex;
use letters_archive::lifecycle::{self, fixtures, setup_tracing, AppConfig, AppContext};
use letters_archive::model::EntityId;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "letters-archive")]
#[command(about = "Everyday tasks on the letters archive", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration profile (dev, test, prod)
    #[arg(long, global = true, default_value = "dev", env = "ARCHIVE_CONFIG")]
    config: String,

    /// TOML file overriding profile settings
    #[arg(long, global = true, env = "ARCHIVE_CONFIG_FILE")]
    config_file: Option<PathBuf>,

    /// JSON snapshot to start the store from
    #[arg(long, global = true, env = "ARCHIVE_DATA")]
    data: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write an empty archive holding the default roles and users
    DbCreate {
        #[arg(long, default_value = "archive.json")]
        out: PathBuf,
    },

    /// Like db-create, replacing an existing file
    DbRecreate {
        #[arg(long, default_value = "archive.json")]
        out: PathBuf,
    },

    /// Load demo data and write the resulting snapshot
    DbFixtures {
        #[arg(long, default_value = "fixtures.json")]
        out: PathBuf,
    },

    /// Rebuild search indexes from the store
    DbReindex {
        /// `all` or a comma separated list of index names
        #[arg(long, default_value = "all")]
        indexes: String,

        #[arg(long)]
        host: String,
    },

    /// Print one entity as a JSON:API document
    Show {
        /// Resource type or table name (`language`, `person-role`, ...)
        type_name: String,

        id: EntityId,

        /// Render with the search facade
        #[arg(long)]
        search: bool,

        /// Add related resources under `included`
        #[arg(long)]
        include: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();
    let cli = Cli::parse();

    let config = AppConfig::load(&cli.config, cli.config_file.as_deref(), cli.data)
        .context("Failed to load configuration")?;
    let app = AppContext::load(config, Arc::new(MemoryIndex::new()))?;

    let outcome = run(&app, cli.command).await;
    app.shutdown().await?;
    outcome
}

async fn run(app: &AppContext, command: Commands) -> Result<()> {
    match command {
        Commands::DbCreate { out } => {
            fixtures::create_database(app.config.store_buffer, &out, false).await?;
            println!("Created the database in {}", out.display());
        }
        Commands::DbRecreate { out } => {
            fixtures::create_database(app.config.store_buffer, &out, true).await?;
            println!("Dropped then recreated the database in {}", out.display());
        }
        Commands::DbFixtures { out } => {
            let summary = fixtures::load_fixtures(&app.store).await?;
            fixtures::dump_snapshot(&app.store, &out).await?;
            println!(
                "Loaded {} documents, {} persons, {} users to {}",
                summary.documents,
                summary.persons,
                summary.users,
                out.display()
            );
        }
        Commands::DbReindex { indexes, host } => {
            for report in lifecycle::reindex(app, &indexes, &host).await? {
                println!("Reindexed {}: {} entries", report.index, report.count);
            }
        }
        Commands::Show {
            type_name,
            id,
            search,
            include,
        } => {
            let purpose = if search { Purpose::Search } else { Purpose::Default };
            let document = lifecycle::show(app, &type_name, id, purpose, include).await?;
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
    }
    Ok(())
}
