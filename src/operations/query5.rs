use std::time::Instant;

use getset::Getters;

use super::accumulator::QueryResult;
use super::filter::*;
use super::join_aggregate::JoinAggregate;
use crate::data::Tables;
use crate::error::Result;

// select
// 	n_name,
// 	sum(l_extendedprice * (1 - l_discount)) as revenue
// from
// 	customer,
// 	orders,
// 	lineitem,
// 	supplier,
// 	nation,
// 	region
// where
// 	c_custkey = o_custkey
// 	and l_orderkey = o_orderkey
// 	and l_suppkey = s_suppkey
// 	and s_nationkey = n_nationkey
// 	and n_regionkey = r_regionkey
// 	and r_name = :r_name
// 	and c_nationkey in (
// 		select n_nationkey from nation, region
// 		where n_regionkey = r_regionkey and r_name = :r_name)
// 	and o_orderdate >= :start_date
// 	and o_orderdate < :end_date
// group by
// 	n_name;

/// Query parameters: the region name and the order date interval.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct QueryFilter {
    #[getset(get = "pub")]
    r_name: String,
    #[getset(get = "pub")]
    order_dates: DateRange,
}

impl QueryFilter {
    pub fn new(r_name: impl Into<String>, order_dates: DateRange) -> Self {
        QueryFilter {
            r_name: r_name.into(),
            order_dates,
        }
    }
}

/// Runs the region -> nation -> supplier/customer -> order filters in sequence, then the
/// line item join-aggregate with `threads` workers.
pub fn execute_query(tables: &Tables, filter: &QueryFilter, threads: usize) -> Result<QueryResult> {
    let start_time = Instant::now();
    let region_keys = filter_regions(&tables.region, filter.r_name());
    let nations = filter_nations(&tables.nation, &region_keys);
    let suppliers = filter_suppliers(&tables.supplier, nations.keys());
    let customers = filter_customers(&tables.customer, nations.keys());
    let orders = filter_orders(&tables.orders, customers.keys(), filter.order_dates());
    log::info!(
        "Filters matched {} regions, {} nations, {} suppliers, {} customers, {} orders",
        region_keys.len(),
        nations.keys().len(),
        suppliers.keys().len(),
        customers.keys().len(),
        orders.keys().len()
    );
    log::info!("Filters Took: {:.2?}", start_time.elapsed());

    let start_time = Instant::now();
    let engine = JoinAggregate::new(
        orders.keys(),
        suppliers.keys(),
        suppliers.nation_of(),
        nations.names(),
    );
    let accumulator = engine.execute(&tables.lineitem, threads)?;
    log::info!(
        "Join-Aggregate over {} line items with {} threads Took: {:.2?}",
        tables.lineitem.len(),
        threads,
        start_time.elapsed()
    );
    Ok(accumulator.into_result())
}
