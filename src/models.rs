use csv::StringRecord;
use rusqlite::types::{ToSql, ToSqlOutput};
use serde_json::{Map, Value};

use crate::error::{ImportError, Result};

/// One column of the statement: its destination name, the header it is read
/// from, and whether it holds a decimal value.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub header: &'static str,
    pub numeric: bool,
}

const fn text(name: &'static str, header: &'static str) -> Field {
    Field { name, header, numeric: false }
}

const fn decimal(name: &'static str) -> Field {
    Field { name, header: name, numeric: true }
}

/// Schema order. Only the two date columns are renamed on the way in.
pub const FIELDS: [Field; 10] = [
    text("Type", "Type"),
    text("Product", "Product"),
    text("Started_Date", "Started Date"),
    text("Completed_Date", "Completed Date"),
    text("Description", "Description"),
    decimal("Amount"),
    decimal("Fee"),
    text("Currency", "Currency"),
    text("State", "State"),
    decimal("Balance"),
];

/// Position of each required column within a source file's header row.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnIndex([usize; 10]);

impl ColumnIndex {
    pub fn resolve(headers: &StringRecord) -> Result<Self> {
        let mut positions = [0usize; 10];
        for (slot, field) in positions.iter_mut().zip(FIELDS.iter()) {
            *slot = headers
                .iter()
                .position(|h| h.trim() == field.header)
                .ok_or_else(|| ImportError::MissingColumn(field.header.to_string()))?;
        }
        Ok(Self(positions))
    }
}

/// A statement row as read from the source file, values untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementRow {
    pub line: u64,
    pub values: [String; 10],
}

impl StatementRow {
    pub fn from_record(record: &StringRecord, index: &ColumnIndex) -> Self {
        let values = index.0.map(|i| record.get(i).unwrap_or_default().to_string());
        let line = record.position().map_or(0, |p| p.line());
        Self { line, values }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        FIELDS
            .iter()
            .position(|f| f.name == name)
            .map(|i| self.values[i].as_str())
    }

    /// Mapping from destination field name to value, as handed to the
    /// validator. Decimal columns become numbers when they parse, null when
    /// blank, and stay strings otherwise.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        for (field, raw) in FIELDS.iter().zip(self.values.iter()) {
            let value = if field.numeric {
                match Decimal::parse(raw) {
                    Decimal::Number(n) => serde_json::Number::from_f64(n)
                        .map(Value::Number)
                        .unwrap_or_else(|| Value::String(raw.clone())),
                    Decimal::Empty => Value::Null,
                    Decimal::Text(_) => Value::String(raw.clone()),
                }
            } else {
                Value::String(raw.clone())
            };
            map.insert(field.name.to_string(), value);
        }
        Value::Object(map)
    }

    /// Parameters for the insert statement, in `FIELDS` order.
    pub fn params(&self) -> Vec<Cell<'_>> {
        FIELDS
            .iter()
            .zip(self.values.iter())
            .map(|(field, raw)| {
                if field.numeric {
                    Cell::Decimal(Decimal::parse(raw))
                } else {
                    Cell::Text(raw)
                }
            })
            .collect()
    }
}

/// A raw decimal cell. Text that does not parse is passed through so the
/// table's CHECK constraints decide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decimal<'a> {
    Number(f64),
    Empty,
    Text(&'a str),
}

impl<'a> Decimal<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Self::Number(n),
            _ => Self::Text(raw),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Cell<'a> {
    Text(&'a str),
    Decimal(Decimal<'a>),
}

impl ToSql for Cell<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Cell::Text(s) | Cell::Decimal(Decimal::Text(s)) => ToSqlOutput::from(*s),
            Cell::Decimal(Decimal::Number(n)) => ToSqlOutput::from(*n),
            Cell::Decimal(Decimal::Empty) => ToSqlOutput::from(rusqlite::types::Null),
        })
    }
}

/// A row read back from the destination table.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub kind: String,
    pub product: String,
    pub started_date: String,
    pub completed_date: String,
    pub description: String,
    pub amount: f64,
    pub fee: f64,
    pub currency: String,
    pub state: String,
    pub balance: Option<f64>,
}
