use std::time::Instant;

use super::config::QueryParams;
use super::output::save_result_to_csv;
use super::tpch::load_tables;
use crate::error::Result;
use crate::operations::{execute_query, QueryResult};

/// Loads the tables, runs the query and writes the result file.
///
/// Nothing is written unless every table loads and the query completes.
pub fn run_query(params: &QueryParams) -> Result<QueryResult> {
    let start_time = Instant::now();
    let tables = load_tables(params.table_path())?;
    let result = execute_query(&tables, params.filter(), *params.threads())?;
    save_result_to_csv(&result, params.result_path())?;
    log::info!("Query Result");
    for row in result.rows() {
        log::info!("{},{}", row.n_name, row.revenue);
    }
    log::info!("Query Took: {:.2?}", start_time.elapsed());
    Ok(result)
}
