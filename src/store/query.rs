//! Read-query description for the hosted catalog store
//!
//! A `Select` captures everything one read needs: table, projection
//! (including nested relationship expansion in the store's embed syntax),
//! filters, and ordering. `query_pairs` renders it to the store's
//! query-string dialect.

/// Filter predicate on a single column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Column equals value
    Eq(String, String),
    /// Column contains the needle, case-insensitive
    Contains(String, String),
    /// Column value is a member of the set
    In(String, Vec<String>),
}

impl Filter {
    /// Column this filter applies to
    pub fn column(&self) -> &str {
        match self {
            Filter::Eq(col, _) | Filter::Contains(col, _) | Filter::In(col, _) => col,
        }
    }

    fn operand(&self) -> String {
        match self {
            Filter::Eq(_, value) => format!("eq.{}", value),
            Filter::Contains(_, needle) => format!("ilike.*{}*", needle),
            Filter::In(_, values) => format!("in.({})", values.join(",")),
        }
    }

    /// Render to a single query-string pair
    pub fn query_pair(&self) -> (String, String) {
        (self.column().to_string(), self.operand())
    }
}

/// Sort direction for a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

/// A declarative read query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select {
    table: String,
    columns: String,
    filters: Vec<Filter>,
    order: Option<Order>,
}

impl Select {
    /// Start a query against a table, projecting all columns
    pub fn from(table: &str) -> Self {
        Self {
            table: table.to_string(),
            columns: "*".to_string(),
            filters: Vec::new(),
            order: None,
        }
    }

    /// Set the projection, which may include nested relationship expansion,
    /// e.g. `"id,name,contractors(name,sigle)"`
    pub fn columns(mut self, columns: &str) -> Self {
        self.columns = columns.to_string();
        self
    }

    /// Add a filter predicate
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Order ascending by a column
    pub fn order_by(mut self, column: &str) -> Self {
        self.order = Some(Order {
            column: column.to_string(),
            ascending: true,
        });
        self
    }

    /// Order descending by a column
    pub fn order_by_desc(mut self, column: &str) -> Self {
        self.order = Some(Order {
            column: column.to_string(),
            ascending: false,
        });
        self
    }

    /// Table this query reads
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Filters attached to this query
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Requested ordering, if any
    pub fn order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    /// Render to query-string pairs in the store's REST dialect
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_string(), self.columns.clone())];
        for filter in &self.filters {
            pairs.push((filter.column().to_string(), filter.operand()));
        }
        if let Some(ref order) = self.order {
            let direction = if order.ascending { "asc" } else { "desc" };
            pairs.push(("order".to_string(), format!("{}.{}", order.column, direction)));
        }
        pairs
    }
}
