#[global_allocator]
static GLOBAL: jemallocator::Jemalloc = jemallocator::Jemalloc;

use std::process;

use tpch_q5::utils::{run_query, QueryParams};
use tpch_q5::QueryError;

fn main() {
    env_logger::Builder::from_default_env()
        .format_timestamp_micros()
        .init();

    let params = match QueryParams::from_iter_safe(std::env::args_os()) {
        Ok(params) => params,
        // --help and --version
        Err(QueryError::Arguments(e)) if !e.use_stderr() => e.exit(),
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Run with --help for usage.");
            process::exit(e.exit_code());
        }
    };
    log::info!("Running Query 5 with {:?}", params);

    if let Err(e) = run_query(&params) {
        log::error!("{}", e);
        eprintln!("{}", e);
        process::exit(e.exit_code());
    }
}
