//! Command-line argument parsing
//!
//! Every subcommand is a single pass: load records, apply one operation
//! through the message loop, write the result.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::FlowConfig;
use crate::model::Column;

/// Scenario flow editor
#[derive(Parser, Debug)]
#[command(name = "flowgrid", version, about = "Edit scenario flow records over imported dialogue lines")]
pub struct Cli {
    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the visible window of the grid
    View {
        /// Delimited text dataset
        texts: PathBuf,
        /// Flow snapshot to join against the texts
        #[arg(long)]
        flows: Option<PathBuf>,
        /// Vertical scroll offset in pixels
        #[arg(long, default_value_t = 0.0, value_name = "PX")]
        scroll: f64,
        /// Viewport height in pixels
        #[arg(long, default_value_t = 600.0, value_name = "PX")]
        height: f64,
        /// Keep rows whose column contains TEXT (case-insensitive); repeatable
        #[arg(long = "filter", value_name = "COLUMN=TEXT", value_parser = parse_filter)]
        filters: Vec<(Column, String)>,
    },

    /// Replace all flows with a linear NEXT chain
    Autolink {
        texts: PathBuf,
        /// Confirm that existing flows are discarded
        #[arg(long)]
        yes: bool,
        /// Where to write the resulting flow snapshot
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Commit one cell value
    Edit {
        texts: PathBuf,
        #[arg(long)]
        flows: PathBuf,
        /// Grid row, 1-based
        #[arg(long, value_name = "N")]
        row: usize,
        /// Column id (to_uid, transition_type, selection_label, ...)
        #[arg(long)]
        column: Column,
        #[arg(long)]
        value: String,
    },

    /// Add a branch below a row, or remove the row's flow
    Branch {
        texts: PathBuf,
        #[arg(long)]
        flows: PathBuf,
        /// Grid row, 1-based
        #[arg(long, value_name = "N")]
        row: usize,
        #[arg(long)]
        remove: bool,
    },

    /// Write flows as a batch INSERT statement
    Export {
        #[arg(long)]
        flows: PathBuf,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report orphaned and dangling flow references
    Lint {
        texts: PathBuf,
        #[arg(long)]
        flows: PathBuf,
    },

    /// Write the active configuration to the config file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Parse a `COLUMN=TEXT` filter argument
fn parse_filter(arg: &str) -> Result<(Column, String), String> {
    let (column, text) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected COLUMN=TEXT, got '{}'", arg))?;
    Ok((column.parse()?, text.to_string()))
}

impl Cli {
    /// Load config from `--config` or the default location
    pub fn load_config(&self) -> FlowConfig {
        match &self.config {
            Some(path) => FlowConfig::load_from(path),
            None => FlowConfig::load(),
        }
    }
}

impl Command {
    /// Grid row as a 0-based index
    ///
    /// Rows are 1-based on the command line; 0 is rejected.
    pub fn row_index(&self) -> Result<Option<usize>, String> {
        let row = match self {
            Command::Edit { row, .. } | Command::Branch { row, .. } => *row,
            _ => return Ok(None),
        };
        if row == 0 {
            return Err("rows are numbered from 1".to_string());
        }
        Ok(Some(row - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("flowgrid").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_view_defaults() {
        let cli = parse(&["view", "lines.csv"]);
        assert_eq!(
            cli.command,
            Command::View {
                texts: PathBuf::from("lines.csv"),
                flows: None,
                scroll: 0.0,
                height: 600.0,
                filters: vec![],
            }
        );
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_view_filters_repeat() {
        let cli = parse(&[
            "view",
            "lines.csv",
            "--filter",
            "actor=ali",
            "--filter",
            "to_uid=a=b",
        ]);
        let Command::View { filters, .. } = cli.command else {
            panic!("expected view");
        };
        assert_eq!(
            filters,
            vec![
                (Column::Actor, "ali".to_string()),
                (Column::ToUid, "a=b".to_string())
            ]
        );
    }

    #[test]
    fn test_view_filter_needs_known_column() {
        assert!(Cli::try_parse_from(["flowgrid", "view", "t.csv", "--filter", "actor"]).is_err());
        assert!(Cli::try_parse_from(["flowgrid", "view", "t.csv", "--filter", "mood=x"]).is_err());
    }

    #[test]
    fn test_init_config() {
        let cli = parse(&["init-config", "--config", "c.yaml", "--force"]);
        assert_eq!(cli.command, Command::InitConfig { force: true });
        assert_eq!(cli.config, Some(PathBuf::from("c.yaml")));
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = parse(&["lint", "t.csv", "--flows", "f.json", "--config", "c.yaml"]);
        assert_eq!(cli.config, Some(PathBuf::from("c.yaml")));
    }

    #[test]
    fn test_edit_parses_column() {
        let cli = parse(&[
            "edit",
            "t.csv",
            "--flows",
            "f.json",
            "--row",
            "3",
            "--column",
            "selection_label",
            "--value",
            "Run away",
        ]);
        assert!(matches!(
            &cli.command,
            Command::Edit { column: Column::SelectionLabel, value, .. } if value == "Run away"
        ));
        assert_eq!(cli.command.row_index(), Ok(Some(2)));
    }

    #[test]
    fn test_unknown_column_rejected() {
        let result = Cli::try_parse_from([
            "flowgrid", "edit", "t.csv", "--flows", "f.json", "--row", "1", "--column", "colour",
            "--value", "x",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_row_zero_rejected() {
        let cli = parse(&["branch", "t.csv", "--flows", "f.json", "--row", "0"]);
        assert!(cli.command.row_index().is_err());
    }

    #[test]
    fn test_autolink_requires_output() {
        assert!(Cli::try_parse_from(["flowgrid", "autolink", "t.csv", "--yes"]).is_err());
        let cli = parse(&["autolink", "t.csv", "-o", "f.json"]);
        assert!(matches!(cli.command, Command::Autolink { yes: false, .. }));
    }
}
