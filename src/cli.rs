//! CLI argument definitions.

use std::error::Error;

use clap::Parser;
use tracing::info;

use crate::db::{DEFAULT_DB_PATH, DatabaseConfig};
use crate::output::{OutputFormat, Outputable};
use crate::seed::seed_database;

#[derive(Parser, Debug)]
#[command(author, version, about = "School sample database", long_about = None)]
#[command(after_help = "\
Examples:
  school_db --init                      # Create ./example.db and load the sample data
  school_db --init --db ./school.db     # Use another store
  school_db --init --format json        # Print the report as JSON")]
pub struct Args {
    /// Initialize the database and load the sample data
    #[arg(short, long, default_value_t = false)]
    pub init: bool,

    /// Store location: a path, sqlite://<path>, or :memory:
    #[arg(long, default_value = DEFAULT_DB_PATH)]
    pub db: String,

    /// Output format for the initialization report
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Log every executed script
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Args {
    /// Run the requested work.
    ///
    /// Without `--init` nothing is opened or written and `None` is returned.
    pub fn run(&self) -> Result<Option<String>, Box<dyn Error>> {
        if !self.init {
            info!("no --init flag, nothing to do");
            return Ok(None);
        }

        let config = DatabaseConfig::from_url(&self.db)?;
        let backend = config.connect()?;
        let result = seed_database(backend.as_ref())?;
        Ok(Some(result.format(self.format)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::tempdir;

    #[rstest]
    fn test_defaults() {
        let args = Args::try_parse_from(["school_db"]).unwrap();
        assert!(!args.init);
        assert_eq!(args.db, "./example.db");
        assert_eq!(args.format, OutputFormat::Table);
        assert!(!args.verbose);
    }

    #[rstest]
    #[case(&["school_db", "-i"])]
    #[case(&["school_db", "--init"])]
    fn test_init_flag(#[case] argv: &[&str]) {
        let args = Args::try_parse_from(argv).unwrap();
        assert!(args.init);
    }

    #[rstest]
    #[case("table", OutputFormat::Table)]
    #[case("json", OutputFormat::Json)]
    #[case("toon", OutputFormat::Toon)]
    fn test_format_option(#[case] value: &str, #[case] expected: OutputFormat) {
        let args = Args::try_parse_from(["school_db", "--format", value]).unwrap();
        assert_eq!(args.format, expected);
    }

    #[rstest]
    fn test_unknown_flag_rejected() {
        assert!(Args::try_parse_from(["school_db", "--reset"]).is_err());
    }

    #[rstest]
    fn test_init_takes_no_value() {
        assert!(Args::try_parse_from(["school_db", "--init=yes"]).is_err());
    }

    #[rstest]
    fn test_run_without_init_touches_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("school.db");
        let args = Args::try_parse_from(["school_db", "--db", path.to_str().unwrap()]).unwrap();

        assert_eq!(args.run().unwrap(), None);
        assert!(!path.exists());
    }

    #[rstest]
    fn test_run_with_init_in_memory() {
        let args = Args::try_parse_from(["school_db", "-i", "--db", ":memory:", "-o", "json"]).unwrap();
        let output = args.run().unwrap().expect("report");
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["inserted"]["students"], 8);
    }

    #[rstest]
    fn test_run_with_bad_url_fails() {
        let args = Args::try_parse_from(["school_db", "-i", "--db", "postgres://x"]).unwrap();
        assert!(args.run().is_err());
    }
}
