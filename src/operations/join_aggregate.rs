use rayon::prelude::*;

use super::accumulator::RevenueAccumulator;
use super::filter::{KeyIndex, KeySet};
use crate::data::LineItemRecord;
use crate::error::{QueryError, Result};

/// Joins line items against the qualifying order and supplier keys and sums
/// `l_extendedprice * (1 - l_discount)` per supplier nation.
///
/// The key sets and indices are only read, so every worker shares them by reference.
pub struct JoinAggregate<'a> {
    order_keys: &'a KeySet,
    supplier_keys: &'a KeySet,
    /// s_suppkey -> s_nationkey
    supplier_nation: &'a KeyIndex,
    /// n_nationkey -> n_name
    nation_names: &'a KeyIndex,
}

impl<'a> JoinAggregate<'a> {
    pub fn new(
        order_keys: &'a KeySet,
        supplier_keys: &'a KeySet,
        supplier_nation: &'a KeyIndex,
        nation_names: &'a KeyIndex,
    ) -> Self {
        JoinAggregate {
            order_keys,
            supplier_keys,
            supplier_nation,
            nation_names,
        }
    }

    /// Scans `lineitems` with `threads` workers, each folding one contiguous chunk into a
    /// private accumulator. Partial results are merged sequentially afterwards.
    pub fn execute(
        &self,
        lineitems: &[LineItemRecord],
        threads: usize,
    ) -> Result<RevenueAccumulator> {
        // No worker gets an empty chunk.
        let threads = threads.min(lineitems.len()).max(1);
        if threads == 1 {
            return self.scan(lineitems);
        }
        let chunk_size = (lineitems.len() + threads - 1) / threads;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("join-aggregate-{}", index))
            .build()?;
        let partials = pool.install(|| {
            lineitems
                .par_chunks(chunk_size)
                .map(|chunk| self.scan(chunk))
                .collect::<Result<Vec<RevenueAccumulator>>>()
        })?;
        log::debug!(
            "Merging {} partial accumulators ({} rows per worker)",
            partials.len(),
            chunk_size
        );
        let mut accumulator = RevenueAccumulator::new();
        for partial in partials {
            accumulator.merge(partial);
        }
        Ok(accumulator)
    }

    /// Single-threaded fold over a run of line items.
    pub fn scan(&self, lineitems: &[LineItemRecord]) -> Result<RevenueAccumulator> {
        let start_time = std::time::Instant::now();
        let mut accumulator = RevenueAccumulator::new();
        let mut matched = 0usize;
        for lineitem in lineitems {
            if !self.order_keys.contains(&lineitem.l_orderkey)
                || !self.supplier_keys.contains(&lineitem.l_suppkey)
            {
                continue;
            }
            let nation = self.nation_name(&lineitem.l_suppkey)?;
            accumulator.accumulate(nation, revenue(lineitem)?);
            matched += 1;
        }
        log::debug!(
            "[logging] type=execution thread={:?} action=scan rows={} matched={} time={:?}",
            std::thread::current().id(),
            lineitems.len(),
            matched,
            start_time.elapsed().as_micros()
        );
        Ok(accumulator)
    }

    /// Attribution is always by the supplier's nation.
    fn nation_name(&self, suppkey: &str) -> Result<&'a str> {
        let nationkey = self
            .supplier_nation
            .get(suppkey)
            .ok_or_else(|| QueryError::MissingKey("supplier nation", suppkey.to_string()))?;
        self.nation_names
            .get(nationkey)
            .map(String::as_str)
            .ok_or_else(|| QueryError::MissingKey("nation name", nationkey.clone()))
    }
}

/// `l_extendedprice * (1 - l_discount)`
pub fn revenue(lineitem: &LineItemRecord) -> Result<f64> {
    let extended_price = parse_decimal("l_extendedprice", &lineitem.l_extendedprice)?;
    let discount = parse_decimal("l_discount", &lineitem.l_discount)?;
    Ok(extended_price * (1.0 - discount))
}

fn parse_decimal(column: &'static str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|err| QueryError::NumericParse(column, value.to_string(), err))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_set(keys: &[&str]) -> KeySet {
        keys.iter().map(|k| k.to_string()).collect()
    }

    fn key_index(pairs: &[(&str, &str)]) -> KeyIndex {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn lineitem(orderkey: &str, suppkey: &str, price: &str, discount: &str) -> LineItemRecord {
        LineItemRecord {
            l_orderkey: orderkey.into(),
            l_suppkey: suppkey.into(),
            l_extendedprice: price.into(),
            l_discount: discount.into(),
        }
    }

    struct Fixture {
        order_keys: KeySet,
        supplier_keys: KeySet,
        supplier_nation: KeyIndex,
        nation_names: KeyIndex,
    }

    impl Fixture {
        fn new() -> Self {
            Fixture {
                order_keys: key_set(&["O1", "O2"]),
                supplier_keys: key_set(&["S1", "S2"]),
                supplier_nation: key_index(&[("S1", "1"), ("S2", "2")]),
                nation_names: key_index(&[("1", "CANADA"), ("2", "BRAZIL")]),
            }
        }

        fn engine(&self) -> JoinAggregate<'_> {
            JoinAggregate::new(
                &self.order_keys,
                &self.supplier_keys,
                &self.supplier_nation,
                &self.nation_names,
            )
        }
    }

    #[test]
    fn admits_only_rows_matching_both_keys() {
        let fixture = Fixture::new();
        let lineitems = vec![
            lineitem("O1", "S1", "1000.00", "0.05"),
            lineitem("O1", "S9", "1000.00", "0.05"),
            lineitem("O9", "S1", "1000.00", "0.05"),
            lineitem("O2", "S2", "200.00", "0.50"),
        ];
        let result = fixture.engine().execute(&lineitems, 1).unwrap().into_result();
        assert_eq!(result.len(), 2);
        assert!((result.revenue("CANADA").unwrap() - 950.0).abs() < 1e-9);
        assert!((result.revenue("BRAZIL").unwrap() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn unparsable_price_aborts() {
        let fixture = Fixture::new();
        let lineitems = vec![lineitem("O1", "S1", "12,50", "0.05")];
        let err = fixture.engine().execute(&lineitems, 1).unwrap_err();
        assert!(matches!(err, QueryError::NumericParse("l_extendedprice", _, _)));
    }

    #[test]
    fn unparsable_discount_on_filtered_row_is_ignored() {
        let fixture = Fixture::new();
        let lineitems = vec![
            lineitem("O9", "S1", "1000.00", "n/a"),
            lineitem("O1", "S1", "10.00", "0.00"),
        ];
        let result = fixture.engine().execute(&lineitems, 2).unwrap().into_result();
        assert_eq!(result.revenue("CANADA"), Some(10.0));
    }

    #[test]
    fn unresolved_nation_is_a_fault() {
        let mut fixture = Fixture::new();
        fixture.nation_names.remove("2");
        let lineitems = vec![lineitem("O2", "S2", "1.00", "0.00")];
        let err = fixture.engine().execute(&lineitems, 1).unwrap_err();
        assert!(matches!(err, QueryError::MissingKey("nation name", _)));
    }

    #[test]
    fn worker_count_does_not_change_totals() {
        let fixture = Fixture::new();
        let lineitems = (0..1_000)
            .map(|i| {
                let order = if i % 3 == 0 { "O1" } else { "O2" };
                let supplier = if i % 2 == 0 { "S1" } else { "S2" };
                lineitem(order, supplier, &format!("{}.25", i), "0.07")
            })
            .collect::<Vec<LineItemRecord>>();
        let serial = fixture.engine().execute(&lineitems, 1).unwrap().into_result();
        for threads in [2, 3, 8, 64] {
            let parallel = fixture.engine().execute(&lineitems, threads).unwrap().into_result();
            assert_eq!(parallel.len(), serial.len());
            for nation in serial.nations() {
                let expected = serial.revenue(nation).unwrap();
                let obtained = parallel.revenue(nation).unwrap();
                assert!(((expected - obtained) / expected).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn more_workers_than_rows() {
        let fixture = Fixture::new();
        let lineitems = vec![
            lineitem("O1", "S1", "1.00", "0.00"),
            lineitem("O2", "S1", "2.00", "0.00"),
            lineitem("O2", "S2", "4.00", "0.00"),
        ];
        let result = fixture.engine().execute(&lineitems, 16).unwrap().into_result();
        assert_eq!(result.revenue("CANADA"), Some(3.0));
        assert_eq!(result.revenue("BRAZIL"), Some(4.0));
    }

    #[test]
    fn empty_input_yields_empty_result() {
        let fixture = Fixture::new();
        assert!(fixture.engine().execute(&[], 4).unwrap().is_empty());
    }
}
