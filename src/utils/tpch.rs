use std::path::{Path, PathBuf};
use std::time::Instant;

use glob::{glob, Pattern};

use crate::data::*;
use crate::error::{QueryError, Result};

/// Files holding `table` under `directory`.
///
/// `<table>.tbl` is used when present. Otherwise the table is read from its partitions
/// `<table>.tbl.1`, `<table>.tbl.2`, ... in natural order.
pub fn table_files(directory: &Path, table: &'static str) -> Result<Vec<PathBuf>> {
    let single = directory.join(format!("{}.tbl", table));
    if single.is_file() {
        return Ok(vec![single]);
    }
    let pattern = format!(
        "{}/{}.tbl.*",
        Pattern::escape(&directory.to_string_lossy()),
        table
    );
    let entries =
        glob(&pattern).map_err(|_| QueryError::MissingTable(table, directory.to_path_buf()))?;
    let mut input_files = partition_files(&single, entries)?;
    // To sort slices correctly taking into account the partition numbers.
    alphanumeric_sort::sort_path_slice(&mut input_files);
    Ok(input_files)
}

/// Collects the partitions matched for `table_file`. An unreadable match fails the whole
/// table, as does finding no partition at all.
fn partition_files<I, E>(table_file: &Path, entries: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator<Item = std::result::Result<PathBuf, E>>,
    E: Into<std::io::Error>,
{
    let mut input_files = vec![];
    for entry in entries {
        let path = entry.map_err(|e| {
            let err: std::io::Error = e.into();
            QueryError::Ingestion(table_file.to_path_buf(), err.into())
        })?;
        input_files.push(path);
    }
    if input_files.is_empty() {
        // Reported against the plain file name, the one a user is expected to provide.
        return Err(QueryError::Ingestion(
            table_file.to_path_buf(),
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file").into(),
        ));
    }
    Ok(input_files)
}

/// Reads pipe-delimited rows into `R`, keeping the projected columns only.
///
/// Extra trailing fields (including the empty one after a trailing `|`) are ignored and
/// missing ones are left empty. Blank lines are skipped. Bytes that are not valid UTF-8 are
/// replaced, so a damaged field never rejects its line.
pub fn read_table<R: TblRecord>(input_files: &[PathBuf]) -> Result<Vec<R>> {
    let schema = R::SCHEMA;
    let positions = R::PROJECTION
        .iter()
        .map(|column| {
            schema
                .index(column)
                .ok_or(QueryError::UnknownColumn(schema.table, *column))
        })
        .collect::<Result<Vec<usize>>>()?;

    let mut records = vec![];
    for path in input_files {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'|')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_path(path)
            .map_err(|err| QueryError::Ingestion(path.clone(), err))?;
        let mut row = csv::ByteRecord::new();
        while reader
            .read_byte_record(&mut row)
            .map_err(|err| QueryError::Ingestion(path.clone(), err))?
        {
            let fields = positions
                .iter()
                .map(|i| String::from_utf8_lossy(row.get(*i).unwrap_or_default()).into_owned())
                .collect::<Vec<String>>();
            records.push(R::from_projection(fields));
        }
    }
    Ok(records)
}

fn load_table<R: TblRecord>(directory: &Path) -> Result<Vec<R>> {
    let input_files = table_files(directory, R::SCHEMA.table)?;
    let records = read_table::<R>(&input_files)?;
    log::info!(
        "Loaded {} rows of {} from {:?}",
        records.len(),
        R::SCHEMA.table,
        input_files
    );
    Ok(records)
}

/// Reads the six tables the query needs. Any table failing to load aborts the whole load.
pub fn load_tables(directory: &Path) -> Result<Tables> {
    log::info!("Specified Input Directory: {}", directory.display());
    let start_time = Instant::now();
    let tables = Tables {
        region: load_table(directory)?,
        nation: load_table(directory)?,
        supplier: load_table(directory)?,
        customer: load_table(directory)?,
        orders: load_table(directory)?,
        lineitem: load_table(directory)?,
    };
    log::info!("Loading Tables Took: {:.2?}", start_time.elapsed());
    Ok(tables)
}
