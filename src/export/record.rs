// src/export/record.rs
// =============================================================================
// Records and tables: the shape data takes between the API and a CSV file.
//
// A `Record` wraps one raw API object (left untouched) together with the
// context fields the API doesn't send, like the organization we were
// scraping or the member whose repos these are. Context fields win over raw
// fields of the same name.
//
// A `Table` is a file name, a fixed column list and the records for it.
// Projecting a record onto the columns drops every field that isn't listed
// and leaves listed-but-missing fields blank.
// =============================================================================

use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    context: Vec<(&'static str, String)>,
    raw: Value,
}

impl Record {
    pub fn new(raw: Value) -> Self {
        Self {
            context: Vec::new(),
            raw,
        }
    }

    /// Returns a copy of this record with one more context field.
    pub fn with(mut self, key: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.context.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => self.context.push((key, value)),
        }
        self
    }

    /// The value of `column` rendered as a CSV cell.
    pub fn field(&self, column: &str) -> String {
        if let Some((_, value)) = self.context.iter().find(|(k, _)| *k == column) {
            return value.clone();
        }
        self.raw.get(column).map(render).unwrap_or_default()
    }

    /// One cell per column, in column order.
    pub fn project(&self, columns: &[&str]) -> Vec<String> {
        columns.iter().map(|column| self.field(column)).collect()
    }
}

// Renders a JSON value the way the CSV exports always have:
// strings verbatim, True/False for booleans, blank for null
fn render(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct Table {
    pub file_name: &'static str,
    pub columns: &'static [&'static str],
    pub records: Vec<Record>,
}

impl Table {
    pub fn new(file_name: &'static str, columns: &'static [&'static str], records: Vec<Record>) -> Self {
        Self {
            file_name,
            columns,
            records,
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.records.iter().map(|record| record.project(self.columns))
    }
}
