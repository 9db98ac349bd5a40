mod admin;
mod import;
mod list;
mod scan;
mod schema;
mod view;

use clap::{Parser, Subcommand, ValueEnum};
use patrimonio_core::config::DataPaths;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "patrimonio",
    version,
    about = "Asset inventory with scan registration",
    long_about = "Patrimonio keeps an imported asset inventory, splits it into located and \
                  pending items, and registers each item once when its label is scanned."
)]
pub struct Cli {
    /// Directory holding the persisted inventory (overrides PATRIMONIO_DATA_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Also print logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum PartitionArg {
    Located,
    Pending,
    Registered,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replace the inventory with the records in a JSON file
    #[command(
        long_about = "Reads a JSON array of flat records. Header spellings such as \
                      'patrimonio' or 'descricao' are mapped to canonical fields and records \
                      without an asset id are skipped. Registrations are kept."
    )]
    Import {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Register one or more scanned identifiers
    Scan {
        #[arg(value_name = "ID", required = true)]
        ids: Vec<String>,
    },
    /// List a partition of the inventory
    List {
        #[arg(value_enum)]
        partition: PartitionArg,
        /// Case and accent insensitive match on id or description
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// List destination groups
    Groups,
    /// List the assets of one destination group
    Group {
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Show one asset with its registration and observation
    Show {
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Show the most recent scans
    History {
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,
    },
    /// Show inventory counts
    Stats,
    /// Attach an observation to a registered asset
    Observe {
        #[arg(value_name = "ID")]
        id: String,
        #[arg(value_name = "REASON")]
        reason: String,
        /// Destination group for unit transfers
        #[arg(long, value_name = "GROUP")]
        moved_to: Option<String>,
    },
    /// Check that materialized partitions match the stored state
    Check,
    /// Remove every registration mark, keeping the inventory
    ClearMarks,
    /// Remove the inventory, registrations and history
    Reset,
    /// Print the JSON schema accepted by `import`
    Schema,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let paths = match &cli.data_dir {
        Some(dir) => DataPaths::with_home(dir),
        None => DataPaths::from_env(),
    };
    let _guard = patrimonio_runtime::init_logging(&paths, "cli", cli.verbose);

    if let Commands::Schema = cli.command {
        return schema::run();
    }

    let inventory = patrimonio_runtime::open_inventory(&paths)?;

    match cli.command {
        Commands::Import { file } => import::run(&inventory, &file),
        Commands::Scan { ids } => scan::run(&inventory, &ids),
        Commands::List { partition, filter } => {
            list::partition(&*inventory, partition, filter.as_deref())
        }
        Commands::Groups => list::groups(&*inventory),
        Commands::Group { key } => list::group(&*inventory, &key),
        Commands::Show { id } => list::show(&inventory, &id),
        Commands::History { limit } => list::history(&*inventory, limit),
        Commands::Stats => list::stats(&*inventory),
        Commands::Observe {
            id,
            reason,
            moved_to,
        } => scan::observe(&inventory, &id, &reason, moved_to.as_deref()),
        Commands::Check => admin::check(&inventory),
        Commands::ClearMarks => admin::clear_marks(&inventory),
        Commands::Reset => admin::reset(&inventory),
        Commands::Schema => schema::run(),
    }
}
