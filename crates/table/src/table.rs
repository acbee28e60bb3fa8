use crate::value::Value;

/// Ordered rows × named columns.
///
/// Every row holds exactly one value per column; constructors pad short rows
/// with [`Value::Missing`] and drop surplus cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl RecordTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns, rows: Vec::new() }
    }

    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row);
        }
        table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn push_row(&mut self, mut row: Vec<Value>) {
        row.resize(self.columns.len(), Value::Missing);
        self.rows.push(row);
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// Iterate one column top to bottom. `None` when the column is absent.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Value> + '_> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |r| &r[idx]))
    }

    /// Replace a column's values, or append it as a new column.
    ///
    /// `values` is padded with Missing or truncated to the row count.
    pub fn set_column(&mut self, name: &str, mut values: Vec<Value>) {
        values.resize(self.rows.len(), Value::Missing);
        match self.column_index(name) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                self.columns.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
    }

    /// Builder form of [`set_column`](Self::set_column).
    pub fn with_column(mut self, name: &str, values: Vec<Value>) -> Self {
        self.set_column(name, values);
        self
    }

    /// Concatenate tables in order. Columns are the union in first-seen order;
    /// cells a table lacks are Missing. Rows are never deduplicated.
    pub fn concat<'a>(tables: impl IntoIterator<Item = &'a RecordTable>) -> RecordTable {
        let tables: Vec<&RecordTable> = tables.into_iter().collect();

        let mut columns: Vec<String> = Vec::new();
        for table in &tables {
            for column in &table.columns {
                if !columns.contains(column) {
                    columns.push(column.clone());
                }
            }
        }

        let mut combined = RecordTable::new(columns);
        for table in tables {
            let mapping: Vec<Option<usize>> = combined
                .columns
                .iter()
                .map(|c| table.column_index(c))
                .collect();
            for row in &table.rows {
                let new_row = mapping
                    .iter()
                    .map(|src| src.map(|i| row[i].clone()).unwrap_or(Value::Missing))
                    .collect();
                combined.rows.push(new_row);
            }
        }
        combined
    }

    /// First `n` rows.
    pub fn head(&self, n: usize) -> RecordTable {
        RecordTable {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Total Missing cells across the table.
    pub fn missing_count(&self) -> usize {
        self.rows.iter().flatten().filter(|v| v.is_missing()).count()
    }
}
