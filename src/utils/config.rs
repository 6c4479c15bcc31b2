use std::convert::TryFrom;
use std::ffi::OsString;
use std::path::PathBuf;

use getset::Getters;
use structopt::StructOpt;

use crate::error::{QueryError, Result};
use crate::operations::{DateRange, QueryFilter};

/* Parsed arguments */

#[derive(Debug, Clone, StructOpt)]
#[structopt(
    name = "query5",
    about = "TPC-H Q5: revenue per nation from local suppliers in a region"
)]
pub struct Cli {
    /// region name, matched exactly (e.g. ASIA)
    #[structopt(long = "r_name")]
    pub r_name: String,

    /// first order date included, YYYY-MM-DD
    #[structopt(long = "start_date")]
    pub start_date: String,

    /// first order date excluded, YYYY-MM-DD
    #[structopt(long = "end_date")]
    pub end_date: String,

    /// number of workers scanning lineitem
    #[structopt(long = "threads")]
    pub threads: usize,

    /// directory holding the .tbl files
    #[structopt(long = "table_path", parse(from_os_str))]
    pub table_path: PathBuf,

    /// output csv file
    #[structopt(long = "result_path", parse(from_os_str))]
    pub result_path: PathBuf,
}

/// Validated query invocation.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct QueryParams {
    #[getset(get = "pub")]
    filter: QueryFilter,
    #[getset(get = "pub")]
    threads: usize,
    #[getset(get = "pub")]
    table_path: PathBuf,
    #[getset(get = "pub")]
    result_path: PathBuf,
}

impl QueryParams {
    pub fn new(
        filter: QueryFilter,
        threads: usize,
        table_path: impl Into<PathBuf>,
        result_path: impl Into<PathBuf>,
    ) -> Self {
        QueryParams {
            filter,
            threads,
            table_path: table_path.into(),
            result_path: result_path.into(),
        }
    }

    /// Parses and validates a full argument list, program name first.
    ///
    /// Clap rejections (including `--help` and `--version`) come back as
    /// [QueryError::Arguments] instead of exiting the process.
    pub fn from_iter_safe<I>(args: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<OsString> + Clone,
    {
        let cli = Cli::from_iter_safe(args)?;
        QueryParams::try_from(cli)
    }
}

impl TryFrom<Cli> for QueryParams {
    type Error = QueryError;

    fn try_from(cli: Cli) -> std::result::Result<Self, Self::Error> {
        if cli.r_name.is_empty() {
            return Err(QueryError::Usage("--r_name must not be empty".into()));
        }
        for (option, date) in [("--start_date", &cli.start_date), ("--end_date", &cli.end_date)] {
            if !is_iso_date(date) {
                return Err(QueryError::Usage(format!(
                    "{} must be a YYYY-MM-DD date, got {:?}",
                    option, date
                )));
            }
        }
        if cli.threads < 1 {
            return Err(QueryError::Usage("--threads must be at least 1".into()));
        }
        if cli.table_path.as_os_str().is_empty() || cli.result_path.as_os_str().is_empty() {
            return Err(QueryError::Usage(
                "--table_path and --result_path must not be empty".into(),
            ));
        }
        Ok(QueryParams::new(
            QueryFilter::new(cli.r_name, DateRange::new(cli.start_date, cli.end_date)),
            cli.threads,
            cli.table_path,
            cli.result_path,
        ))
    }
}

/// `YYYY-MM-DD` with ASCII digits. Keeps text comparison equivalent to date comparison.
pub fn is_iso_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> std::result::Result<Cli, structopt::clap::Error> {
        Cli::from_iter_safe(std::iter::once("query5").chain(args.iter().copied()))
    }

    const FULL: [&str; 12] = [
        "--r_name",
        "ASIA",
        "--start_date",
        "1994-01-01",
        "--end_date",
        "1995-01-01",
        "--threads",
        "4",
        "--table_path",
        "resources/tpc-h/data/sample",
        "--result_path",
        "result.csv",
    ];

    #[test]
    fn can_parse_all_options() {
        let params = QueryParams::try_from(cli(&FULL).unwrap()).unwrap();
        assert_eq!(params.filter().r_name(), "ASIA");
        assert_eq!(params.filter().order_dates(), &DateRange::new("1994-01-01", "1995-01-01"));
        assert_eq!(*params.threads(), 4);
        assert_eq!(params.table_path(), &PathBuf::from("resources/tpc-h/data/sample"));
        assert_eq!(params.result_path(), &PathBuf::from("result.csv"));
    }

    #[test]
    fn every_option_is_required() {
        for skipped in (0..FULL.len()).step_by(2) {
            let args = FULL
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != skipped && *i != skipped + 1)
                .map(|(_, arg)| *arg)
                .collect::<Vec<&str>>();
            assert!(cli(&args).is_err(), "{} should be required", FULL[skipped]);
        }
    }

    #[test]
    fn zero_threads_is_a_usage_fault() {
        let mut args = FULL;
        args[7] = "0";
        let err = QueryParams::try_from(cli(&args).unwrap()).unwrap_err();
        assert!(matches!(err, QueryError::Usage(_)));

        args[7] = "-2";
        assert!(cli(&args).is_err());
    }

    #[test]
    fn dates_must_be_iso() {
        let mut args = FULL;
        args[3] = "1994-1-1";
        let err = QueryParams::try_from(cli(&args).unwrap()).unwrap_err();
        assert!(matches!(err, QueryError::Usage(_)));
    }

    fn params(args: &[&str]) -> Result<QueryParams> {
        QueryParams::from_iter_safe(std::iter::once("query5").chain(args.iter().copied()))
    }

    #[test]
    fn missing_option_exits_as_usage_fault() {
        let err = params(&FULL[..10]).unwrap_err();
        match &err {
            QueryError::Arguments(e) => assert!(e.use_stderr()),
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(err.exit_code(), 2);

        let mut args = FULL;
        args[7] = "0";
        assert_eq!(params(&args).unwrap_err().exit_code(), 2);
        assert!(params(&FULL).is_ok());
    }

    #[test]
    fn help_is_not_an_error_message() {
        match params(&["--help"]).unwrap_err() {
            QueryError::Arguments(e) => assert!(!e.use_stderr()),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn run_faults_exit_with_one() {
        let err = QueryError::MissingKey("nation name", "7".into());
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn iso_date_shape() {
        assert!(is_iso_date("1994-01-01"));
        assert!(!is_iso_date("1994/01/01"));
        assert!(!is_iso_date("94-01-01"));
        assert!(!is_iso_date("1994-01-011"));
        assert!(!is_iso_date(""));
    }
}
