//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{ArgGroup, Parser};

const EXAMPLES: &str = "\
Examples:
  aws-parameter-store -e /app > app.json          # Export a path
  aws-parameter-store -i app.json                 # Import plain values
  aws-parameter-store -i secrets.json -k default  # Import encrypted values
  aws-parameter-store -d obsolete.json            # Delete by document keys";

/// Export, import, and delete AWS Systems Manager parameters
#[derive(Parser, Debug)]
#[command(name = "aws-parameter-store")]
#[command(author, version, about, long_about = None, after_help = EXAMPLES)]
#[command(group(
    ArgGroup::new("action")
        .args(["export", "import", "delete", "list"])
        .multiple(false)
))]
pub struct Cli {
    /// Export every parameter under PATH to stdout as JSON
    #[arg(short, long, value_name = "PATH")]
    pub export: Option<String>,

    /// Import parameters from a JSON, YAML, or TOML document
    #[arg(short, long, visible_alias = "upload", value_name = "FILE")]
    pub import: Option<PathBuf>,

    /// Encrypt imported values: "default" for the account key, or a KMS key id
    #[arg(short, long, value_name = "KEY_ID", requires = "import")]
    pub key: Option<String>,

    /// Delete the parameters named by the keys of a document
    #[arg(short, long, value_name = "FILE")]
    pub delete: Option<PathBuf>,

    /// List name, type, and version of every parameter
    #[arg(short, long)]
    pub list: bool,

    /// Write the export to FILE instead of stdout
    #[arg(short, long, value_name = "FILE", requires = "export")]
    pub output: Option<PathBuf>,

    /// Report what import or delete would do without writing
    #[arg(long)]
    pub dry_run: bool,

    /// AWS region
    #[arg(long)]
    pub region: Option<String>,

    /// AWS shared-config profile
    #[arg(long)]
    pub profile: Option<String>,

    /// Override the SSM endpoint
    #[arg(long, value_name = "URL")]
    pub endpoint_url: Option<String>,

    /// Results per listing call (1-10)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u8).range(1..=10))]
    pub page_size: Option<u8>,

    /// Settings file (TOML, JSON, or YAML)
    #[arg(long, value_name = "FILE", env = "AWS_PARAMETER_STORE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// The single action requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Export {
        path: String,
        output: Option<PathBuf>,
    },
    Import {
        file: PathBuf,
        key: Option<String>,
    },
    Delete {
        file: PathBuf,
    },
    List,
}

impl Cli {
    /// The requested action, if any. clap guarantees at most one is set.
    pub fn action(&self) -> Option<Action> {
        if let Some(path) = &self.export {
            return Some(Action::Export {
                path: path.clone(),
                output: self.output.clone(),
            });
        }
        if let Some(file) = &self.import {
            return Some(Action::Import {
                file: file.clone(),
                key: self.key.clone(),
            });
        }
        if let Some(file) = &self.delete {
            return Some(Action::Delete { file: file.clone() });
        }
        self.list.then_some(Action::List)
    }
}
