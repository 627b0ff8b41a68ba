//! Table support.
//!
//! Tables nest strictly: a `table` holds `tableRow`s, a row holds
//! `tableCell`s, and a cell holds phrasing content. [`TableBuilder`] builds
//! that shape from plain rows of cell content.

use super::node::{AlignKind, Node};

/// Table builder for creating tables with customized content
///
/// This builder provides a fluent API for creating tables with
/// headers and rows.
#[derive(Debug, Clone, Default)]
pub struct TableBuilder {
    /// Header cells, each holding phrasing content
    headers: Vec<Vec<Node>>,
    /// Body rows, each containing multiple cells
    rows: Vec<Vec<Vec<Node>>>,
    /// Column alignments (left, center, right, or none)
    alignments: Vec<AlignKind>,
}

fn convert_row(cells: Vec<Vec<Node>>) -> Node {
    Node::TableRow(cells.into_iter().map(Node::TableCell).collect())
}

impl TableBuilder {
    /// Creates a new table builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the header row
    ///
    /// # Arguments
    /// * `headers` - Phrasing content of each header cell
    pub fn headers(mut self, headers: Vec<Vec<Node>>) -> Self {
        self.headers = headers;
        self
    }

    /// Adds a single row to the table
    ///
    /// # Arguments
    /// * `row` - Phrasing content of each cell in the row
    pub fn add_row(mut self, row: Vec<Vec<Node>>) -> Self {
        self.rows.push(row);
        self
    }

    /// Adds multiple rows to the table
    pub fn add_rows(mut self, rows: Vec<Vec<Vec<Node>>>) -> Self {
        self.rows.extend(rows);
        self
    }

    /// Sets all columns to use the same alignment
    pub fn align_all(mut self, alignment: AlignKind) -> Self {
        self.alignments = vec![alignment; self.column_count().max(1)];
        self
    }

    /// Sets the alignment for a specific column
    ///
    /// # Arguments
    /// * `column` - Zero-based column index
    /// * `alignment` - Alignment to apply to the column
    pub fn align_column(mut self, column: usize, alignment: AlignKind) -> Self {
        if column >= self.alignments.len() {
            self.alignments.resize(column + 1, AlignKind::None);
        }
        self.alignments[column] = alignment;
        self
    }

    fn column_count(&self) -> usize {
        std::iter::once(&self.headers)
            .chain(&self.rows)
            .map(Vec::len)
            .max()
            .unwrap_or(0)
    }

    /// Builds the final table node
    ///
    /// Alignments are padded with `none` (or truncated) to the widest row.
    pub fn build(self) -> Node {
        let columns = self.column_count();
        let TableBuilder {
            headers,
            rows,
            mut alignments,
        } = self;

        if !alignments.is_empty() {
            alignments.resize(columns, AlignKind::None);
        }

        let mut children = Vec::with_capacity(rows.len() + 1);
        if !headers.is_empty() {
            children.push(convert_row(headers));
        }
        children.extend(rows.into_iter().map(convert_row));

        Node::Table {
            align: alignments,
            children,
        }
    }
}

/// Creates a simple table
///
/// # Arguments
/// * `headers` - Phrasing content of each header cell
/// * `rows` - Rows, each containing the phrasing content of its cells
pub fn simple_table(headers: Vec<Vec<Node>>, rows: Vec<Vec<Vec<Node>>>) -> Node {
    TableBuilder::new().headers(headers).add_rows(rows).build()
}
