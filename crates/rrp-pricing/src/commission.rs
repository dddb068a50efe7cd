//! Per-retailer commission schedules and the sources they are built from.

use std::collections::HashMap;
use std::io::Read;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::PricingError;

static PERCENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+(?:[.,]\d+)?)\s*%?\s*$").expect("valid percent regex"));

#[derive(Debug, Clone, PartialEq)]
pub struct CommissionEntry {
    pub category: String,
    pub pct: f64,
}

/// Ordered category → percentage mapping.
///
/// Order matters: the first category is the fallback when classification
/// fails. Re-inserting a category updates its rate but keeps its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommissionSchedule {
    entries: Vec<CommissionEntry>,
    index: HashMap<String, usize>,
}

impl CommissionSchedule {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: impl Into<String>, pct: f64) {
        let category = category.into();
        if let Some(&pos) = self.index.get(&category) {
            self.entries[pos].pct = pct;
            return;
        }
        self.index.insert(category.clone(), self.entries.len());
        self.entries.push(CommissionEntry { category, pct });
    }

    #[must_use]
    pub fn get(&self, category: &str) -> Option<f64> {
        self.index.get(category).map(|&pos| self.entries[pos].pct)
    }

    /// Candidate list for the classifier, in schedule order.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.category.clone()).collect()
    }

    #[must_use]
    pub fn entries(&self) -> &[CommissionEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for CommissionSchedule {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut schedule = CommissionSchedule::new();
        for (category, pct) in iter {
            schedule.insert(category, pct);
        }
        schedule
    }
}

/// Commission for `category`, or the retailer's declared default.
#[must_use]
pub fn lookup(category: &str, schedule: &CommissionSchedule, default_pct: f64) -> f64 {
    schedule.get(category).unwrap_or(default_pct)
}

/// A schedule built from an external source plus the rows that were dropped.
#[derive(Debug, Clone, Default)]
pub struct ScheduleImport {
    pub schedule: CommissionSchedule,
    pub skipped: usize,
}

/// Parse a percentage cell: `"12"`, `"12,5"`, `"12.5 %"`.
///
/// Returns `None` unless the value lies strictly between 0 and 100.
#[must_use]
pub fn parse_percent(raw: &str) -> Option<f64> {
    let caps = PERCENT_RE.captures(raw)?;
    let value = caps.get(1)?.as_str().replace(',', ".").parse::<f64>().ok()?;
    (value > 0.0 && value < 100.0).then_some(value)
}

/// Read a delimited export of a commission spreadsheet.
///
/// The first row is a header. The first two columns are the category name
/// and the percentage; rows that fail either are skipped and counted.
///
/// # Errors
///
/// Returns `PricingError::Csv` only when the header itself cannot be read.
pub fn from_delimited<R: Read>(reader: R, delimiter: u8) -> Result<ScheduleImport, PricingError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    rdr.headers()?;

    let mut import = ScheduleImport::default();
    for record in rdr.records() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable commission row");
                import.skipped += 1;
                continue;
            }
        };

        let name = record.get(0).unwrap_or_default();
        let pct = record.get(1).and_then(parse_percent);
        match pct {
            Some(pct) if !name.is_empty() => import.schedule.insert(name, pct),
            _ => import.skipped += 1,
        }
    }

    if import.skipped > 0 {
        tracing::warn!(skipped = import.skipped, "commission rows skipped during import");
    }

    Ok(import)
}

/// Build a schedule from table rows extracted from a published document.
///
/// Each row's last two cells are read as name and percentage. Extraction is
/// best effort: header lines, merged cells and notes are skipped silently.
#[must_use]
pub fn from_document_rows(rows: &[Vec<String>]) -> ScheduleImport {
    let mut import = ScheduleImport::default();
    for row in rows {
        let parsed = match row.as_slice() {
            [.., name, value] => {
                let name = name.trim();
                parse_percent(value).filter(|_| !name.is_empty()).map(|pct| (name, pct))
            }
            _ => None,
        };
        match parsed {
            Some((name, pct)) => import.schedule.insert(name, pct),
            None => import.skipped += 1,
        }
    }
    import
}
