//! Brain-data CSV codec.
//!
//! The file is a header-keyed table with one labeled point per row:
//!
//! ```text
//! Consideration,x,y,z
//! Value?,1,2,3
//! ```
//!
//! Columns are located by header name, so extra columns and column order do
//! not matter. Rows that cannot become a point (blank label, missing or
//! non-numeric coordinate) are reported in [`BrainData::skipped`] instead of
//! failing the whole file.

use foundation::math::Vec3;

pub const LABEL_COLUMN: &str = "Consideration";
pub const COORD_COLUMNS: [&str; 3] = ["x", "y", "z"];

#[derive(Debug, Clone, PartialEq)]
pub struct BrainRow {
    pub label: String,
    pub position: Vec3,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number in the source text (header is line 1).
    pub line: u64,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrainData {
    pub rows: Vec<BrainRow>,
    pub skipped: Vec<SkippedRow>,
}

#[derive(Debug)]
pub enum BrainCsvError {
    MissingColumn(&'static str),
    Malformed(String),
}

impl std::fmt::Display for BrainCsvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BrainCsvError::MissingColumn(name) => write!(f, "missing CSV column '{name}'"),
            BrainCsvError::Malformed(msg) => write!(f, "malformed CSV: {msg}"),
        }
    }
}

impl std::error::Error for BrainCsvError {}

impl From<csv::Error> for BrainCsvError {
    fn from(err: csv::Error) -> Self {
        BrainCsvError::Malformed(err.to_string())
    }
}

impl BrainData {
    pub fn from_csv_str(text: &str) -> Result<Self, BrainCsvError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        let column = |name: &'static str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(BrainCsvError::MissingColumn(name))
        };
        let label_idx = column(LABEL_COLUMN)?;
        let coord_idx = [
            column(COORD_COLUMNS[0])?,
            column(COORD_COLUMNS[1])?,
            column(COORD_COLUMNS[2])?,
        ];

        let mut data = BrainData::default();
        for record in reader.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let label = record.get(label_idx).unwrap_or("");
            if label.is_empty() {
                data.skipped.push(SkippedRow {
                    line,
                    reason: "empty label".to_string(),
                });
                continue;
            }

            let mut coords = [0.0f64; 3];
            let mut bad = None;
            for (slot, (idx, name)) in coords
                .iter_mut()
                .zip(coord_idx.iter().zip(COORD_COLUMNS.iter()))
            {
                match record.get(*idx).map(str::parse::<f64>) {
                    Some(Ok(v)) if v.is_finite() => *slot = v,
                    _ => {
                        bad = Some(*name);
                        break;
                    }
                }
            }
            if let Some(name) = bad {
                data.skipped.push(SkippedRow {
                    line,
                    reason: format!("invalid '{name}' for '{label}'"),
                });
                continue;
            }

            data.rows.push(BrainRow {
                label: label.to_string(),
                position: Vec3::from(coords),
            });
        }

        Ok(data)
    }
}
