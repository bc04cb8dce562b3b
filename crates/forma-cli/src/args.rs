use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(name = "forma", version, about = "FORMA CLI")]
pub struct Cli {
    /// Emit JSON output on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    /// Store root directory (default: .forma)
    #[arg(long, global = true, default_value = ".forma")]
    pub store_root: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Check a form schema's structural invariants.
    Check {
        /// Schema JSON file.
        schema: String,
    },

    /// Recompute derived fields and validate a data snapshot.
    Eval {
        /// Schema JSON file.
        schema: String,

        /// Data JSON file: an object of field id to value. Starts from the
        /// schema's default values; null entries mark a field as absent.
        #[arg(long)]
        data: Option<String>,

        /// Evaluation date for age formulas (YYYY-MM-DD, default: today UTC).
        #[arg(long)]
        today: Option<String>,
    },

    /// Save a schema into the local store.
    Save {
        /// Schema JSON file.
        schema: String,
    },

    /// List saved forms.
    List,

    /// Print a saved form schema.
    Show { id: String },

    /// Delete a saved form.
    Delete { id: String },

    /// Run environment checks.
    Doctor,
}
