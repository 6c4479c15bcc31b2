use std::num::ParseFloatError;
use std::path::PathBuf;

use quick_error::quick_error;

quick_error! {
    /// Every fault aborts the whole run; nothing is retried or skipped.
    #[derive(Debug)]
    pub enum QueryError {
        Arguments(err: structopt::clap::Error) {
            from()
            display("{}", err)
            source(err)
        }
        Usage(message: String) {
            display("invalid arguments: {}", message)
        }
        UnknownColumn(table: &'static str, column: &'static str) {
            display("table {} has no column {}", table, column)
        }
        MissingTable(table: &'static str, directory: PathBuf) {
            display("no file for table {} under {}", table, directory.display())
        }
        Ingestion(path: PathBuf, err: csv::Error) {
            display("failed to read {}: {}", path.display(), err)
            source(err)
        }
        NumericParse(column: &'static str, value: String, err: ParseFloatError) {
            display("{} value {:?} is not a number: {}", column, value, err)
            source(err)
        }
        MissingKey(index: &'static str, key: String) {
            display("key {:?} is missing from the {} index", key, index)
        }
        Output(path: PathBuf, err: csv::Error) {
            display("failed to write result to {}: {}", path.display(), err)
            source(err)
        }
        ThreadPool(err: rayon::ThreadPoolBuildError) {
            from()
            display("failed to start worker pool: {}", err)
            source(err)
        }
    }
}

impl QueryError {
    /// Process exit status: 2 for bad invocations, 1 for faults while running.
    pub fn exit_code(&self) -> i32 {
        match self {
            QueryError::Arguments(_) | QueryError::Usage(_) => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, QueryError>;
