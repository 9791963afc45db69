use clap::{Parser, Subcommand};

/// Command-line interface definition for speeches
#[derive(Parser)]
#[command(
    name = "speeches",
    version = env!("CARGO_PKG_VERSION"),
    about = "Store sections and speeches in SQLite, seed fixture trees and route speech requests",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show or edit the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Editor to use with --edit")]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, info)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create a tree of sections and speeches from a YAML or JSON descriptor file
    Seed {
        /// Descriptor file (.yaml, .yml or .json)
        file: String,

        #[arg(long = "instance", help = "Label of an existing instance to seed into")]
        instance: Option<String>,

        #[arg(long = "parent", help = "Id of an existing section to attach the tree under")]
        parent: Option<i64>,
    },

    /// Send a request through the speech route table
    Request {
        /// GET or POST
        method: String,

        /// Request path, e.g. /speech/3/edit
        path: String,

        #[arg(
            long = "field",
            short = 'f',
            value_name = "KEY=VALUE",
            help = "Form field sent with the request (repeatable)"
        )]
        fields: Vec<String>,
    },

    /// List the speech routes
    Routes,

    /// Print the section tree of an instance
    Tree {
        #[arg(long = "instance", help = "Instance label (default: every instance)")]
        instance: Option<String>,
    },
}
