use super::schema::{TableSchema, CUSTOMER, LINEITEM, NATION, ORDERS, REGION, SUPPLIER};

/// A fixed-layout row read from a `.tbl` file.
///
/// Only the columns listed in `PROJECTION` are kept. Fields stay in their raw textual form;
/// a column missing from a short line is stored as the empty string.
pub trait TblRecord: Sized + Send + Sync {
    const SCHEMA: &'static TableSchema;

    /// Columns read from the table, in the order `from_projection` receives them.
    const PROJECTION: &'static [&'static str];

    fn from_projection(fields: Vec<String>) -> Self;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionRecord {
    pub r_regionkey: String,
    pub r_name: String,
}

impl TblRecord for RegionRecord {
    const SCHEMA: &'static TableSchema = &REGION;
    const PROJECTION: &'static [&'static str] = &["r_regionkey", "r_name"];

    fn from_projection(fields: Vec<String>) -> Self {
        let mut fields = fields.into_iter();
        RegionRecord {
            r_regionkey: fields.next().unwrap_or_default(),
            r_name: fields.next().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NationRecord {
    pub n_nationkey: String,
    pub n_name: String,
    pub n_regionkey: String,
}

impl TblRecord for NationRecord {
    const SCHEMA: &'static TableSchema = &NATION;
    const PROJECTION: &'static [&'static str] = &["n_nationkey", "n_name", "n_regionkey"];

    fn from_projection(fields: Vec<String>) -> Self {
        let mut fields = fields.into_iter();
        NationRecord {
            n_nationkey: fields.next().unwrap_or_default(),
            n_name: fields.next().unwrap_or_default(),
            n_regionkey: fields.next().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplierRecord {
    pub s_suppkey: String,
    pub s_nationkey: String,
}

impl TblRecord for SupplierRecord {
    const SCHEMA: &'static TableSchema = &SUPPLIER;
    const PROJECTION: &'static [&'static str] = &["s_suppkey", "s_nationkey"];

    fn from_projection(fields: Vec<String>) -> Self {
        let mut fields = fields.into_iter();
        SupplierRecord {
            s_suppkey: fields.next().unwrap_or_default(),
            s_nationkey: fields.next().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRecord {
    pub c_custkey: String,
    pub c_nationkey: String,
}

impl TblRecord for CustomerRecord {
    const SCHEMA: &'static TableSchema = &CUSTOMER;
    const PROJECTION: &'static [&'static str] = &["c_custkey", "c_nationkey"];

    fn from_projection(fields: Vec<String>) -> Self {
        let mut fields = fields.into_iter();
        CustomerRecord {
            c_custkey: fields.next().unwrap_or_default(),
            c_nationkey: fields.next().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub o_orderkey: String,
    pub o_custkey: String,
    /// `YYYY-MM-DD`; compared as text.
    pub o_orderdate: String,
}

impl TblRecord for OrderRecord {
    const SCHEMA: &'static TableSchema = &ORDERS;
    const PROJECTION: &'static [&'static str] = &["o_orderkey", "o_custkey", "o_orderdate"];

    fn from_projection(fields: Vec<String>) -> Self {
        let mut fields = fields.into_iter();
        OrderRecord {
            o_orderkey: fields.next().unwrap_or_default(),
            o_custkey: fields.next().unwrap_or_default(),
            o_orderdate: fields.next().unwrap_or_default(),
        }
    }
}

/// Price and discount are parsed only when a line item survives the join, so a malformed
/// value on an unrelated row never aborts the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItemRecord {
    pub l_orderkey: String,
    pub l_suppkey: String,
    pub l_extendedprice: String,
    pub l_discount: String,
}

impl TblRecord for LineItemRecord {
    const SCHEMA: &'static TableSchema = &LINEITEM;
    const PROJECTION: &'static [&'static str] =
        &["l_orderkey", "l_suppkey", "l_extendedprice", "l_discount"];

    fn from_projection(fields: Vec<String>) -> Self {
        let mut fields = fields.into_iter();
        LineItemRecord {
            l_orderkey: fields.next().unwrap_or_default(),
            l_suppkey: fields.next().unwrap_or_default(),
            l_extendedprice: fields.next().unwrap_or_default(),
            l_discount: fields.next().unwrap_or_default(),
        }
    }
}

/// All six relations the query reads, fully materialized.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub region: Vec<RegionRecord>,
    pub nation: Vec<NationRecord>,
    pub supplier: Vec<SupplierRecord>,
    pub customer: Vec<CustomerRecord>,
    pub orders: Vec<OrderRecord>,
    pub lineitem: Vec<LineItemRecord>,
}
