//! Select query builder for the store's filter syntax.
//!
//! Filters are encoded as query parameters (`column=op.value`), pagination as
//! a `Range` header, and the exact match count is requested through
//! `Prefer: count=exact` and read back from `Content-Range`.

use serde::de::DeserializeOwned;

use super::client::{RestClient, Rows, check_status, content_range_total};
use crate::store::StoreResult;

/// Quote a value for use inside `{..}`, `(..)` or a logic tree.
fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

fn array_literal(values: &[String]) -> String {
    let quoted: Vec<String> = values.iter().map(|v| quote(v)).collect();
    format!("{{{}}}", quoted.join(","))
}

/// Builder for one select against a table.
pub struct TableQuery<'a> {
    client: &'a RestClient,
    table: String,
    select: String,
    filters: Vec<(String, String)>,
    order: Option<String>,
    range: Option<(usize, usize)>,
    limit: Option<usize>,
    count: bool,
}

impl<'a> TableQuery<'a> {
    pub(crate) fn new(client: &'a RestClient, table: &str) -> Self {
        Self {
            client,
            table: table.to_string(),
            select: "*".to_string(),
            filters: Vec::new(),
            order: None,
            range: None,
            limit: None,
            count: false,
        }
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.select = columns.to_string();
        self
    }

    /// `column = value`
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters
            .push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    /// Case-insensitive substring match.
    pub fn ilike(mut self, column: &str, needle: &str) -> Self {
        self.filters
            .push((column.to_string(), format!("ilike.*{}*", needle)));
        self
    }

    /// Case-insensitive substring match on any of `columns`.
    pub fn any_ilike(mut self, columns: &[&str], needle: &str) -> Self {
        let pattern = quote(&format!("*{}*", needle));
        let clauses: Vec<String> = columns
            .iter()
            .map(|c| format!("{}.ilike.{}", c, pattern))
            .collect();
        self.filters
            .push(("or".to_string(), format!("({})", clauses.join(","))));
        self
    }

    /// Array column shares at least one element with `values`.
    pub fn overlaps(mut self, column: &str, values: &[String]) -> Self {
        self.filters
            .push((column.to_string(), format!("ov.{}", array_literal(values))));
        self
    }

    /// Array column contains every element of `values`.
    pub fn contains_all(mut self, column: &str, values: &[String]) -> Self {
        self.filters
            .push((column.to_string(), format!("cs.{}", array_literal(values))));
        self
    }

    /// Column value is one of `values`.
    pub fn in_list(mut self, column: &str, values: &[String]) -> Self {
        let quoted: Vec<String> = values.iter().map(|v| quote(v)).collect();
        self.filters
            .push((column.to_string(), format!("in.({})", quoted.join(","))));
        self
    }

    pub fn gte(mut self, column: &str, value: impl ToString) -> Self {
        self.filters
            .push((column.to_string(), format!("gte.{}", value.to_string())));
        self
    }

    pub fn lte(mut self, column: &str, value: impl ToString) -> Self {
        self.filters
            .push((column.to_string(), format!("lte.{}", value.to_string())));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.order = Some(format!("{}.{}", column, direction));
        self
    }

    /// Inclusive row range, 0-based.
    pub fn range(mut self, from: usize, to: usize) -> Self {
        self.range = Some((from, to));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Request the exact number of matching rows.
    pub fn exact_count(mut self) -> Self {
        self.count = true;
        self
    }

    /// Query parameters in the order they will be sent.
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), self.select.clone())];
        params.extend(self.filters.iter().cloned());
        if let Some(order) = &self.order {
            params.push(("order".to_string(), order.clone()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }

    /// `Range` header value, if paginated.
    pub fn range_header(&self) -> Option<String> {
        self.range.map(|(from, to)| format!("{}-{}", from, to))
    }

    /// Run the select.
    pub async fn fetch<T: DeserializeOwned>(self) -> StoreResult<Rows<T>> {
        let mut request = self.client.get(&self.table)?.query(&self.params());
        if let Some(range) = self.range_header() {
            request = request
                .header("Range-Unit", "items")
                .header(reqwest::header::RANGE, range);
        }
        if self.count {
            request = request.header("Prefer", "count=exact");
        }

        let response = request.send().await?;
        // A range past the last row is answered with 416 and `*/total`.
        if response.status() == reqwest::StatusCode::RANGE_NOT_SATISFIABLE {
            return Ok(Rows {
                rows: Vec::new(),
                total: content_range_total(&response).or(Some(0)),
            });
        }
        let response = check_status(response).await?;
        let total = content_range_total(&response);
        let rows: Vec<T> = response.json().await?;
        Ok(Rows { rows, total })
    }

    /// Run the select and return the first row, if any.
    pub async fn fetch_optional<T: DeserializeOwned>(self) -> StoreResult<Option<T>> {
        let rows = self.limit(1).fetch::<T>().await?;
        Ok(rows.rows.into_iter().next())
    }
}
