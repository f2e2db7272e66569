//! Sheet feed parser.
//!
//! Feed contract: comma-separated rows, first non-empty line is a header and
//! is skipped without validation. Columns by position:
//!
//! | # | Column     | Type                          |
//! |---|------------|-------------------------------|
//! | 0 | `id`       | 32-bit integer                |
//! | 1 | `name`     | text                          |
//! | 2 | `sku`      | text                          |
//! | 3 | `price`    | invariant decimal, `.` point  |
//! | 4 | `quantity` | 32-bit integer                |
//!
//! Rows with fewer than [`MIN_FIELDS`] fields are skipped. A row that has all
//! the fields but an unparseable number fails the whole feed.

use thiserror::Error;
use tracing::debug;

use catalog_core::{Price, ProductId};

use crate::product::Product;

/// Rows with fewer fields than this are ignored.
pub const MIN_FIELDS: usize = 5;

const DELIMITER: char = ',';

/// A complete row carried a value that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: cannot parse {field} from '{value}': {reason}")]
pub struct ParseError {
    /// 1-based line number in the raw feed text.
    pub line: usize,
    pub field: &'static str,
    pub value: String,
    pub reason: String,
}

/// Parse the raw feed into products, preserving row order.
pub fn parse_catalog(raw: &str) -> Result<Vec<Product>, ParseError> {
    let mut rows = raw
        .split('\n')
        .enumerate()
        .filter(|(_, line)| !line.is_empty())
        .map(|(idx, line)| (idx + 1, line));

    // Header (column names are not validated).
    if rows.next().is_none() {
        return Ok(Vec::new());
    }

    let mut out = Vec::new();
    for (line_no, line) in rows {
        let fields: Vec<&str> = line.trim().split(DELIMITER).map(str::trim).collect();
        if fields.len() < MIN_FIELDS {
            debug!(line = line_no, fields = fields.len(), "skipping short feed row");
            continue;
        }
        out.push(parse_row(line_no, &fields)?);
    }

    Ok(out)
}

fn parse_row(line: usize, fields: &[&str]) -> Result<Product, ParseError> {
    let fail = |field: &'static str, value: &str, reason: String| ParseError {
        line,
        field,
        value: value.to_string(),
        reason,
    };

    let id: ProductId = fields[0]
        .parse()
        .map_err(|e: catalog_core::DomainError| fail("id", fields[0], e.to_string()))?;
    let price: Price = fields[3]
        .parse()
        .map_err(|e: catalog_core::DomainError| fail("price", fields[3], e.to_string()))?;
    let quantity: i32 = fields[4]
        .parse()
        .map_err(|e: std::num::ParseIntError| fail("quantity", fields[4], e.to_string()))?;

    Ok(Product::new(id, fields[1], fields[2], price, quantity))
}
