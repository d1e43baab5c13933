use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "podium")]
#[command(about = "Highscore table tool", version)]
pub struct Args {
    /// Path to the table snapshot file
    #[arg(short, long, default_value = "highscores.json", env = "PODIUM_TABLE")]
    pub table: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create an empty table snapshot
    Init {
        /// Number of entries the table keeps
        #[arg(short, long, default_value_t = podium_core::DEFAULT_CAPACITY)]
        capacity: u32,
    },
    /// Print the table
    Show,
    /// Submit a result and report the rank it earned
    Submit {
        /// Score achieved
        score: u32,
        /// Player name; omitted means anonymous
        #[arg(short, long)]
        name: Option<String>,
        /// Rank lowest scores first (elapsed-time games)
        #[arg(long)]
        lowest_first: bool,
    },
    /// Write the table to stdout or a file
    Export {
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Tsv)]
        format: ExportFormat,
        /// Output path; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Tsv,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_parsing() {
        let args = Args::try_parse_from(["podium", "submit", "1234", "--name", "DJ"]).unwrap();
        match args.command {
            Command::Submit {
                score,
                name,
                lowest_first,
            } => {
                assert_eq!(score, 1234);
                assert_eq!(name.as_deref(), Some("DJ"));
                assert!(!lowest_first);
            }
            _ => panic!("expected submit command"),
        }
    }

    #[test]
    fn test_table_path_flag() {
        let args = Args::try_parse_from(["podium", "-t", "scores/main.json", "show"]).unwrap();
        assert_eq!(args.table, PathBuf::from("scores/main.json"));
    }

    #[test]
    fn test_export_defaults_to_tsv() {
        let args = Args::try_parse_from(["podium", "export"]).unwrap();
        match args.command {
            Command::Export { format, output } => {
                assert_eq!(format, ExportFormat::Tsv);
                assert!(output.is_none());
            }
            _ => panic!("expected export command"),
        }
    }

    #[test]
    fn test_init_default_capacity() {
        let args = Args::try_parse_from(["podium", "init"]).unwrap();
        match args.command {
            Command::Init { capacity } => assert_eq!(capacity, podium_core::DEFAULT_CAPACITY),
            _ => panic!("expected init command"),
        }
    }
}
