use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::aggregate::{Field, GroupKey};

/// Column headers of the production dataset, in file order.
pub const COLUMNS: [&str; 5] = ["STATE/UT", "Region", "Oil_type", "Year", "Production"];

/// One row of the dataset: production of one oil type in one state for one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub state: String,
    pub region: String,
    pub oil_type: String,
    pub year: i32,
    /// Kilolitres, never negative.
    pub production: f64,
}

impl Record {
    pub fn new(state: &str, region: &str, oil_type: &str, year: i32, production: f64) -> Self {
        Self {
            state: state.to_string(),
            region: region.to_string(),
            oil_type: oil_type.to_string(),
            year,
            production,
        }
    }

    /// Value of a categorical field for this record.
    pub fn key(&self, field: Field) -> GroupKey {
        match field {
            Field::State => GroupKey::Text(self.state.clone()),
            Field::Region => GroupKey::Text(self.region.clone()),
            Field::OilType => GroupKey::Text(self.oil_type.clone()),
            Field::Year => GroupKey::Year(self.year),
        }
    }
}

/// A CSV row before validation. Every field is optional so that a bad row
/// can be counted and dropped instead of failing the whole load.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "STATE/UT")]
    state: Option<String>,
    #[serde(rename = "Region")]
    region: Option<String>,
    #[serde(rename = "Oil_type")]
    oil_type: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Production")]
    production: Option<String>,
}

impl RawRow {
    /// Apply the drop rule: production must be a finite non-negative number
    /// and year must be an integer.
    fn into_record(self) -> Option<Record> {
        let production = self.production?.trim().parse::<f64>().ok()?;
        if !production.is_finite() || production < 0.0 {
            return None;
        }
        let year = parse_year(self.year?.trim())?;

        Some(Record {
            state: self.state.unwrap_or_default(),
            region: self.region.unwrap_or_default(),
            oil_type: self.oil_type.unwrap_or_default(),
            year,
            production,
        })
    }
}

/// Years occasionally arrive as "2019.0" from spreadsheet exports.
fn parse_year(s: &str) -> Option<i32> {
    if let Ok(y) = s.parse::<i32>() {
        return Some(y);
    }
    let f = s.parse::<f64>().ok()?;
    if f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 {
        Some(f as i32)
    } else {
        None
    }
}

/// The full, immutable set of production records.
///
/// Loaded once by the composition root and passed by reference; nothing
/// hands out mutable access after construction.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Build a dataset from in-memory records, applying the same drop rule as the loaders.
    pub fn from_records(records: Vec<Record>) -> Self {
        let total = records.len();
        let records: Vec<Record> = records
            .into_iter()
            .filter(|r| r.production.is_finite() && r.production >= 0.0)
            .collect();
        report_dropped(total, records.len());
        Self { records }
    }

    /// Load the dataset from disk: a `.json` file holds an array of records,
    /// anything else is read as CSV.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open dataset '{}'", path.display()))?;
        let is_json = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
        let dataset = if is_json {
            serde_json::from_reader(BufReader::new(file))
                .context("Invalid JSON")
                .and_then(|value| Self::from_json(&value))
        } else {
            Self::from_reader(file)
        }
        .with_context(|| format!("Failed to load dataset '{}'", path.display()))?;
        info!("Loaded {} records from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    /// Parse CSV with a header row. Extra columns are ignored.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers().context("Failed to read CSV headers")?.clone();
        for column in COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(anyhow!("Dataset is missing required column '{}'", column));
            }
        }
        debug!("CSV headers: {:?}", headers);

        let mut total = 0;
        let mut records = Vec::new();
        for (row_idx, row) in rdr.deserialize::<RawRow>().enumerate() {
            let row = row.with_context(|| format!("Failed to read CSV row {}", row_idx + 1))?;
            total += 1;
            if let Some(record) = row.into_record() {
                records.push(record);
            }
        }

        report_dropped(total, records.len());
        Ok(Self { records })
    }

    /// Create a dataset from a JSON array of objects keyed by the CSV column names.
    pub fn from_json(value: &Value) -> Result<Self> {
        let array = value
            .as_array()
            .ok_or_else(|| anyhow!("Input data must be a JSON array of objects"))?;

        let mut records = Vec::new();
        for item in array {
            let obj = item
                .as_object()
                .ok_or_else(|| anyhow!("Items in array must be objects"))?;

            let field = |name: &str| -> Result<Option<String>> {
                match obj.get(name) {
                    Some(Value::String(s)) if s.is_empty() => Ok(None),
                    Some(Value::String(s)) => Ok(Some(s.clone())),
                    Some(Value::Number(n)) => Ok(Some(n.to_string())),
                    Some(Value::Null) | None => Ok(None),
                    _ => Err(anyhow!("Unsupported value type for field '{}'", name)),
                }
            };

            let raw = RawRow {
                state: field("STATE/UT")?,
                region: field("Region")?,
                oil_type: field("Oil_type")?,
                year: field("Year")?,
                production: field("Production")?,
            };
            if let Some(record) = raw.into_record() {
                records.push(record);
            }
        }

        report_dropped(array.len(), records.len());
        Ok(Self { records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted unique values of a text field, for populating selectors.
    pub fn distinct(&self, field: Field) -> Vec<String> {
        let set: BTreeSet<GroupKey> = self.records.iter().map(|r| r.key(field)).collect();
        set.into_iter().map(|k| k.to_string()).collect()
    }
}

fn report_dropped(total: usize, kept: usize) {
    let dropped = total - kept;
    if dropped > 0 {
        warn!(
            "Dropped {} of {} rows with missing or invalid Production/Year",
            dropped, total
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const CSV: &str = "\
STATE/UT,Region,Oil_type,Year,Production
Assam,North East,Crude,2019,1000.5
Gujarat,West,Crude,2019,2000
Gujarat,West,Condensate,2020,
Rajasthan,West,Crude,abc,300
Offshore,Offshore,Crude,2020.0,400
";

    #[test]
    fn test_from_reader_drops_invalid_rows() {
        let ds = Dataset::from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.records()[0], Record::new("Assam", "North East", "Crude", 2019, 1000.5));
        assert_eq!(ds.records()[2].year, 2020);
    }

    #[test]
    fn test_from_reader_missing_column() {
        let csv = "STATE/UT,Region,Year,Production\nA,B,2019,1\n";
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Oil_type"));
    }

    #[test]
    fn test_from_reader_extra_columns_ignored() {
        let csv = "Id,STATE/UT,Region,Oil_type,Year,Production\n7,A,R,Crude,2019,5\n";
        let ds = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records()[0].state, "A");
    }

    #[test]
    fn test_negative_production_dropped() {
        let csv = "STATE/UT,Region,Oil_type,Year,Production\nA,R,Crude,2019,-5\n";
        assert!(Dataset::from_reader(csv.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_from_json() {
        let value = json!([
            {"STATE/UT": "A", "Region": "R1", "Oil_type": "Crude", "Year": 2019, "Production": 10.5},
            {"STATE/UT": "B", "Region": "R2", "Oil_type": "Crude", "Year": "2020", "Production": null},
        ]);
        let ds = Dataset::from_json(&value).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records()[0].production, 10.5);
    }

    #[test]
    fn test_from_json_rejects_non_array() {
        assert!(Dataset::from_json(&json!({"a": 1})).is_err());
        assert!(Dataset::from_json(&json!([1, 2])).is_err());
    }

    #[test]
    fn test_load_picks_format_by_extension() {
        let dir = tempfile::TempDir::new().unwrap();
        let json_path = dir.path().join("oil.json");
        std::fs::write(
            &json_path,
            r#"[{"STATE/UT": "A", "Region": "R", "Oil_type": "Crude", "Year": 2019, "Production": 7}]"#,
        )
        .unwrap();
        let csv_path = dir.path().join("oil.csv");
        std::fs::write(&csv_path, CSV).unwrap();

        let from_json = Dataset::load(&json_path).unwrap();
        assert_eq!(from_json.records(), &[Record::new("A", "R", "Crude", 2019, 7.0)]);
        assert_eq!(Dataset::load(&csv_path).unwrap().len(), 3);
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = Dataset::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid JSON"));
    }

    #[test]
    fn test_distinct_sorted() {
        let ds = Dataset::from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(ds.distinct(Field::State), vec!["Assam", "Gujarat", "Offshore"]);
        assert_eq!(ds.distinct(Field::Region), vec!["North East", "Offshore", "West"]);
    }
}
