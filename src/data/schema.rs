/// Column layout of one `.tbl` file, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSchema {
    pub table: &'static str,
    pub columns: &'static [&'static str],
}

impl TableSchema {
    pub fn index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| *c == column)
    }
}

pub const REGION: TableSchema = TableSchema {
    table: "region",
    columns: &["r_regionkey", "r_name", "r_comment"],
};

pub const NATION: TableSchema = TableSchema {
    table: "nation",
    columns: &["n_nationkey", "n_name", "n_regionkey", "n_comment"],
};

pub const SUPPLIER: TableSchema = TableSchema {
    table: "supplier",
    columns: &[
        "s_suppkey",
        "s_name",
        "s_address",
        "s_nationkey",
        "s_phone",
        "s_acctbal",
        "s_comment",
    ],
};

pub const CUSTOMER: TableSchema = TableSchema {
    table: "customer",
    columns: &[
        "c_custkey",
        "c_name",
        "c_address",
        "c_nationkey",
        "c_phone",
        "c_acctbal",
        "c_mktsegment",
        "c_comment",
    ],
};

pub const ORDERS: TableSchema = TableSchema {
    table: "orders",
    columns: &[
        "o_orderkey",
        "o_custkey",
        "o_orderstatus",
        "o_totalprice",
        "o_orderdate",
        "o_orderpriority",
        "o_clerk",
        "o_shippriority",
        "o_comment",
    ],
};

pub const LINEITEM: TableSchema = TableSchema {
    table: "lineitem",
    columns: &[
        "l_orderkey",
        "l_partkey",
        "l_suppkey",
        "l_linenumber",
        "l_quantity",
        "l_extendedprice",
        "l_discount",
        "l_tax",
        "l_returnflag",
        "l_linestatus",
        "l_shipdate",
        "l_commitdate",
        "l_receiptdate",
        "l_shipinstruct",
        "l_shipmode",
        "l_comment",
    ],
};
