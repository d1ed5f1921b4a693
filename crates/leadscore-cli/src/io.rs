//! Batch file I/O: lead exports in and out, plus the two Golden Sheet
//! exports (brand pivot, category counts).

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use leadscore_core::{BrandEntry, BrandRegistry, CategoryTable, LeadRecord, Platform};

use crate::error::BatchError;

/// Read a lead batch from CSV or JSON, chosen by file extension.
///
/// JSON input is either a top-level array of objects or an object with a
/// `leads` array, matching the common export shapes.
pub fn read_leads(path: &Path) -> Result<Vec<LeadRecord>, BatchError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => read_leads_csv(path),
        Some("json") => read_leads_json(path),
        other => Err(BatchError::UnsupportedFormat(format!(
            "{} (extension {:?}, expected .csv or .json)",
            path.display(),
            other.unwrap_or("none")
        ))),
    }
}

fn open(path: &Path) -> Result<File, BatchError> {
    File::open(path).map_err(|source| BatchError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn read_leads_csv(path: &Path) -> Result<Vec<LeadRecord>, BatchError> {
    // Flexible: a ragged row must not abort the batch. Short rows simply
    // lack the trailing fields, extra cells are dropped.
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(open(path)?);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(ToString::to_string)
        .collect();

    let mut leads = Vec::new();
    for row in reader.records() {
        let row = row?;
        let pairs = headers
            .iter()
            .zip(row.iter())
            .map(|(name, value)| (name.clone(), value.to_string()))
            .collect();
        leads.push(LeadRecord::from_pairs(pairs));
    }
    Ok(leads)
}

fn read_leads_json(path: &Path) -> Result<Vec<LeadRecord>, BatchError> {
    let value: serde_json::Value = serde_json::from_reader(BufReader::new(open(path)?))?;
    let array = match &value {
        serde_json::Value::Array(items) => items.as_slice(),
        serde_json::Value::Object(map) => match map.get("leads") {
            Some(serde_json::Value::Array(items)) => items.as_slice(),
            _ => {
                return Err(BatchError::UnsupportedFormat(format!(
                    "{}: JSON object without a 'leads' array",
                    path.display()
                )))
            }
        },
        _ => {
            return Err(BatchError::UnsupportedFormat(format!(
                "{}: expected a JSON array of lead objects",
                path.display()
            )))
        }
    };

    let mut leads = Vec::new();
    for item in array {
        let Some(object) = item.as_object() else {
            return Err(BatchError::UnsupportedFormat(format!(
                "{}: lead entries must be JSON objects",
                path.display()
            )));
        };
        let pairs = object
            .iter()
            .map(|(name, value)| (name.clone(), json_cell(value)))
            .collect();
        leads.push(LeadRecord::from_pairs(pairs));
    }
    Ok(leads)
}

fn json_cell(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Write a lead batch as CSV. The header is the union of field names across
/// all records, in first-seen order; fields a record lacks are written empty.
pub fn write_leads_csv(path: &Path, leads: &[LeadRecord]) -> Result<(), BatchError> {
    let mut header: Vec<&str> = Vec::new();
    for lead in leads {
        for name in lead.field_names() {
            if !header.contains(&name) {
                header.push(name);
            }
        }
    }

    let file = File::create(path).map_err(|source| BatchError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(&header)?;
    for lead in leads {
        let row: Vec<&str> = header
            .iter()
            .map(|name| lead.get(name).unwrap_or_default())
            .collect();
        writer.write_record(&row)?;
    }
    writer.flush().map_err(|source| BatchError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(())
}

/// Read the Golden Sheet brand pivot export.
///
/// The export carries banner rows above the real header, so the header row
/// is located by its "Main Brand" cell rather than by position, and every
/// other column is mapped by name. Summary rows ("Grand Total") and blank
/// names are dropped by the registry constructor.
pub fn read_registry_csv(path: &Path) -> Result<BrandRegistry, BatchError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(open(path)?);

    let mut columns: Option<RegistryColumns> = None;
    let mut entries = Vec::new();

    for row in reader.records() {
        let row = row?;
        match &columns {
            None => {
                if let Some(found) = RegistryColumns::from_header(&row) {
                    columns = Some(found);
                }
            }
            Some(cols) => {
                if let Some(entry) = cols.parse_row(&row) {
                    entries.push(entry);
                }
            }
        }
    }

    if columns.is_none() {
        return Err(BatchError::UnsupportedFormat(format!(
            "{}: no header row with a 'Main Brand' column",
            path.display()
        )));
    }
    Ok(BrandRegistry::from_entries(entries))
}

struct RegistryColumns {
    name: usize,
    total: Option<usize>,
    markets: Option<usize>,
    platforms: Vec<(usize, Platform)>,
}

impl RegistryColumns {
    fn from_header(row: &csv::StringRecord) -> Option<Self> {
        let name = row.iter().position(|cell| cell.trim() == "Main Brand")?;
        let total = row.iter().position(|cell| cell.trim() == "Grand Total");
        let markets = row
            .iter()
            .position(|cell| matches!(cell.trim(), "markets_list" | "Markets"));
        let platforms = row
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| Platform::from_column(cell).map(|p| (idx, p)))
            .collect();
        Some(Self {
            name,
            total,
            markets,
            platforms,
        })
    }

    fn parse_row(&self, row: &csv::StringRecord) -> Option<BrandEntry> {
        let name = row.get(self.name)?.trim();
        if name.is_empty() {
            return None;
        }

        let total_assets_tested = self
            .total
            .and_then(|idx| row.get(idx))
            .and_then(|cell| cell.trim().parse::<u32>().ok())
            .unwrap_or(0);

        let platforms = self
            .platforms
            .iter()
            .filter(|(idx, _)| {
                row.get(*idx).is_some_and(|cell| !cell.trim().is_empty())
            })
            .map(|(_, platform)| *platform)
            .collect();

        let markets = self
            .markets
            .and_then(|idx| row.get(idx))
            .unwrap_or_default()
            .split(',')
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .collect();

        Some(BrandEntry {
            name: name.to_string(),
            total_assets_tested,
            platforms,
            markets,
        })
    }
}

/// Read the Golden Sheet category export ("Primary Category" / "Number of
/// Assets Tested"). Malformed counts load as 0; duplicate names are an error.
pub fn read_category_table_csv(path: &Path) -> Result<CategoryTable, BatchError> {
    let mut reader = csv::Reader::from_reader(open(path)?);
    let headers = reader.headers()?.clone();
    let name_idx = headers
        .iter()
        .position(|h| h.trim() == "Primary Category")
        .unwrap_or(0);
    let count_idx = headers
        .iter()
        .position(|h| h.trim() == "Number of Assets Tested")
        .unwrap_or(1);

    let mut pairs = Vec::new();
    for row in reader.records() {
        let row = row?;
        let name = row.get(name_idx).unwrap_or_default().trim();
        if name.is_empty() {
            continue;
        }
        let count = row
            .get(count_idx)
            .and_then(|cell| cell.trim().parse::<u32>().ok())
            .unwrap_or(0);
        pairs.push((name.to_string(), count));
    }
    Ok(CategoryTable::from_pairs(pairs)?)
}
