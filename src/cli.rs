use crate::io::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_DRAFT_PATH: &str = ".rehab-draft.json";

#[derive(Parser, Debug)]
#[command(name = "rehab-estimator")]
#[command(about = "Renovation scope, budget and phase planner", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub plain: bool,

    /// Use this config file instead of searching for .rehab.toml
    #[arg(long, global = true, env = "REHAB_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default .rehab.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show the renovation item catalog
    Catalog {
        /// Only show this category (case-insensitive)
        #[arg(long)]
        category: Option<String>,
    },

    /// Produce a full estimate report for a project file
    Estimate {
        /// Project JSON file
        project: PathBuf,

        /// Output format (defaults to the configured format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Suggest scope items for a project file
    Recommend {
        /// Project JSON file
        project: PathBuf,
    },

    /// Check a project file; exits non-zero when it has errors
    Validate {
        /// Project JSON file
        project: PathBuf,
    },

    /// Drive the step-by-step wizard against a draft file
    Wizard {
        /// Draft file holding the in-progress project
        #[arg(long, global = true, default_value = DEFAULT_DRAFT_PATH)]
        draft: PathBuf,

        #[command(subcommand)]
        action: WizardAction,
    },

    /// Manage stored projects
    Projects {
        #[command(subcommand)]
        action: ProjectsAction,
    },

    /// Manage the vendor registry
    Vendors {
        #[command(subcommand)]
        action: VendorsAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum WizardAction {
    /// Show the current step, progress and running totals
    Status,
    /// Submit the payload for the current step and move on
    Next {
        /// JSON step payload (optional for the final review step)
        #[arg(long)]
        payload: Option<PathBuf>,
    },
    /// Go back one step
    Back,
    /// Return to an already visited step
    Jump {
        #[arg(long)]
        step: u8,
    },
    /// Save the in-progress project to the store without finishing
    Save,
    /// Discard the draft and start over
    Reset,
}

#[derive(Subcommand, Debug)]
pub enum ProjectsAction {
    /// List stored projects, newest first
    List,
    /// Show the estimate report of a stored project
    Show {
        id: String,

        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Store a project JSON file
    Import { file: PathBuf },
    /// Delete a stored project
    Delete { id: String },
    /// Portfolio totals across stored projects
    Stats,
}

#[derive(Subcommand, Debug)]
pub enum VendorsAction {
    /// List vendors
    List,
    /// Add a vendor
    Add {
        #[arg(long)]
        company: String,
        #[arg(long)]
        contact: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// Comma-separated specialties
        #[arg(long, value_delimiter = ',')]
        specialties: Vec<String>,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Remove a vendor
    Remove { id: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_wizard_draft_after_subcommand() {
        let cli = Cli::parse_from([
            "rehab-estimator",
            "wizard",
            "next",
            "--draft",
            "d.json",
            "--payload",
            "p.json",
        ]);
        match cli.command {
            Commands::Wizard { draft, action } => {
                assert_eq!(draft, PathBuf::from("d.json"));
                assert!(matches!(action, WizardAction::Next { payload: Some(_) }));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_vendor_specialties_split() {
        let cli = Cli::parse_from([
            "rehab-estimator",
            "vendors",
            "add",
            "--company",
            "Ace",
            "--specialties",
            "roofing,gutters",
        ]);
        let Commands::Vendors {
            action: VendorsAction::Add { specialties, .. },
        } = cli.command
        else {
            panic!("expected vendors add");
        };
        assert_eq!(specialties, vec!["roofing", "gutters"]);
    }
}
