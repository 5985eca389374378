use serde::{Deserialize, Serialize};

use crate::error::SheetError;

/// Raw tabular content of one worksheet: a header row and data rows.
///
/// Cells are untyped text. Rows may be shorter or longer than the header;
/// interpreting them is the caller's job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Wire shape shared by the KV and HTTP backends: `{"values": [[...], ...]}`
/// where the first inner array is the header.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SheetBody {
    #[serde(default)]
    pub values: Vec<Vec<serde_json::Value>>,
}

impl Sheet {
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { header, rows }
    }

    /// True when there is neither a header nor any row.
    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.rows.is_empty()
    }

    pub(crate) fn to_body(&self) -> SheetBody {
        let mut values = Vec::with_capacity(self.rows.len() + 1);
        if !self.is_empty() {
            values.push(text_row(&self.header));
            values.extend(self.rows.iter().map(|r| text_row(r)));
        }
        SheetBody { values }
    }

    /// Spreadsheet services return numbers and booleans as JSON scalars;
    /// everything is flattened to text here.
    pub(crate) fn from_body(body: SheetBody) -> Self {
        let mut iter = body.values.into_iter();
        let header = match iter.next() {
            Some(h) => h.iter().map(cell_to_string).collect(),
            None => return Sheet::default(),
        };
        let rows = iter
            .map(|r| r.iter().map(cell_to_string).collect())
            .collect();
        Sheet { header, rows }
    }
}

fn text_row(cells: &[String]) -> Vec<serde_json::Value> {
    cells
        .iter()
        .map(|c| serde_json::Value::String(c.clone()))
        .collect()
}

fn cell_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// SheetStore is the external store collaborator: a whole worksheet is read
/// and replaced at once. There are no incremental updates.
pub trait SheetStore: Send + Sync {
    /// Read every row, header first. An absent worksheet reads as empty.
    fn read_all(&self) -> Result<Sheet, SheetError>;

    /// Replace the entire worksheet content.
    fn replace_all(&self, sheet: &Sheet) -> Result<(), SheetError>;
}
