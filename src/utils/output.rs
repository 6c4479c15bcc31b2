use std::path::Path;

use crate::error::{QueryError, Result};
use crate::operations::QueryResult;

pub const RESULT_HEADER: [&str; 2] = ["n_name", "revenue"];

/// Writes `n_name,revenue` followed by one line per nation, sorted by nation name.
///
/// The header is written even when no nation matched. Names are written as they are, unquoted.
pub fn save_result_to_csv(result: &QueryResult, file_path: &Path) -> Result<()> {
    let output_error = |err: csv::Error| QueryError::Output(file_path.to_path_buf(), err);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .from_path(file_path)
        .map_err(output_error)?;
    writer.write_record(RESULT_HEADER).map_err(output_error)?;
    for row in result.rows() {
        writer.serialize(&row).map_err(output_error)?;
    }
    writer.flush().map_err(|err| output_error(err.into()))?;
    log::info!("Wrote {} rows to {}", result.len(), file_path.display());
    Ok(())
}
