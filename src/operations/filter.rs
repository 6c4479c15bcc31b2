use getset::Getters;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::data::*;

/// Keys that passed a filter. Used only for membership tests.
pub type KeySet = FxHashSet<String>;

/// Maps a key of a filtered table to one of its attributes.
pub type KeyIndex = FxHashMap<String, String>;

type Extractor<R> = fn(&R) -> &str;

/// Collects the keys of the rows matching a predicate, plus one index per requested attribute.
///
/// ```ignore
/// let filtered = KeyFilter::new(|n: &NationRecord| n.n_nationkey.as_str())
///     .where_(|n| region_keys.contains(&n.n_regionkey))
///     .index_on(|n| n.n_name.as_str())
///     .apply(&tables.nation);
/// ```
pub struct KeyFilter<'a, R> {
    key: Extractor<R>,
    predicate: Box<dyn Fn(&R) -> bool + 'a>,
    attributes: Vec<Extractor<R>>,
}

impl<'a, R> KeyFilter<'a, R> {
    pub fn new(key: Extractor<R>) -> Self {
        KeyFilter {
            key,
            predicate: Box::new(|_| true),
            attributes: vec![],
        }
    }

    pub fn where_<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&R) -> bool + 'a,
    {
        self.predicate = Box::new(predicate);
        self
    }

    pub fn index_on(mut self, attribute: Extractor<R>) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn apply(&self, rows: &[R]) -> FilteredKeys {
        let mut keys = KeySet::default();
        let mut indices = vec![KeyIndex::default(); self.attributes.len()];
        for row in rows.iter().filter(|row| (self.predicate)(row)) {
            let key = (self.key)(row);
            for (index, attribute) in indices.iter_mut().zip(&self.attributes) {
                // Keys are unique in well-formed input; the last row wins otherwise.
                index.insert(key.to_string(), attribute(row).to_string());
            }
            keys.insert(key.to_string());
        }
        FilteredKeys { keys, indices }
    }
}

/// Output of [KeyFilter::apply]. Indices come in the order they were requested.
#[derive(Debug, Clone)]
pub struct FilteredKeys {
    pub keys: KeySet,
    pub indices: Vec<KeyIndex>,
}

impl FilteredKeys {
    fn split(self) -> (KeySet, std::vec::IntoIter<KeyIndex>) {
        (self.keys, self.indices.into_iter())
    }
}

/// Half-open interval `[start, end)` of `YYYY-MM-DD` dates.
///
/// Zero-padded ISO-8601 dates order lexicographically the same as chronologically, so the
/// bounds are compared as text.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct DateRange {
    #[getset(get = "pub")]
    start: String,
    #[getset(get = "pub")]
    end: String,
}

impl DateRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        DateRange {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn contains(&self, date: &str) -> bool {
        self.start.as_str() <= date && date < self.end.as_str()
    }
}

#[derive(Debug, Clone, Default, Getters)]
pub struct NationKeys {
    #[getset(get = "pub")]
    keys: KeySet,
    /// n_nationkey -> n_name
    #[getset(get = "pub")]
    names: KeyIndex,
}

#[derive(Debug, Clone, Default, Getters)]
pub struct SupplierKeys {
    #[getset(get = "pub")]
    keys: KeySet,
    /// s_suppkey -> s_nationkey
    #[getset(get = "pub")]
    nation_of: KeyIndex,
}

#[derive(Debug, Clone, Default, Getters)]
pub struct CustomerKeys {
    #[getset(get = "pub")]
    keys: KeySet,
    /// c_custkey -> c_nationkey
    #[getset(get = "pub")]
    nation_of: KeyIndex,
}

#[derive(Debug, Clone, Default, Getters)]
pub struct OrderKeys {
    #[getset(get = "pub")]
    keys: KeySet,
    /// o_orderkey -> o_custkey
    #[getset(get = "pub")]
    customer_of: KeyIndex,
    /// o_orderkey -> o_orderdate
    #[getset(get = "pub")]
    date_of: KeyIndex,
}

/// `r_name = <name>`, exact and case-sensitive.
pub fn filter_regions(regions: &[RegionRecord], r_name: &str) -> KeySet {
    KeyFilter::new(|r: &RegionRecord| r.r_regionkey.as_str())
        .where_(|r| r.r_name == r_name)
        .apply(regions)
        .keys
}

/// `n_regionkey IN <region keys>`
pub fn filter_nations(nations: &[NationRecord], region_keys: &KeySet) -> NationKeys {
    let (keys, mut indices) = KeyFilter::new(|n: &NationRecord| n.n_nationkey.as_str())
        .where_(|n| region_keys.contains(&n.n_regionkey))
        .index_on(|n| n.n_name.as_str())
        .apply(nations)
        .split();
    NationKeys {
        keys,
        names: indices.next().unwrap_or_default(),
    }
}

/// `s_nationkey IN <nation keys>`
pub fn filter_suppliers(suppliers: &[SupplierRecord], nation_keys: &KeySet) -> SupplierKeys {
    let (keys, mut indices) = KeyFilter::new(|s: &SupplierRecord| s.s_suppkey.as_str())
        .where_(|s| nation_keys.contains(&s.s_nationkey))
        .index_on(|s| s.s_nationkey.as_str())
        .apply(suppliers)
        .split();
    SupplierKeys {
        keys,
        nation_of: indices.next().unwrap_or_default(),
    }
}

/// `c_nationkey IN <nation keys>`
pub fn filter_customers(customers: &[CustomerRecord], nation_keys: &KeySet) -> CustomerKeys {
    let (keys, mut indices) = KeyFilter::new(|c: &CustomerRecord| c.c_custkey.as_str())
        .where_(|c| nation_keys.contains(&c.c_nationkey))
        .index_on(|c| c.c_nationkey.as_str())
        .apply(customers)
        .split();
    CustomerKeys {
        keys,
        nation_of: indices.next().unwrap_or_default(),
    }
}

/// `o_custkey IN <customer keys> AND o_orderdate IN [start, end)`
pub fn filter_orders(
    orders: &[OrderRecord],
    customer_keys: &KeySet,
    order_dates: &DateRange,
) -> OrderKeys {
    let (keys, mut indices) = KeyFilter::new(|o: &OrderRecord| o.o_orderkey.as_str())
        .where_(|o| customer_keys.contains(&o.o_custkey) && order_dates.contains(&o.o_orderdate))
        .index_on(|o| o.o_custkey.as_str())
        .index_on(|o| o.o_orderdate.as_str())
        .apply(orders)
        .split();
    OrderKeys {
        keys,
        customer_of: indices.next().unwrap_or_default(),
        date_of: indices.next().unwrap_or_default(),
    }
}
