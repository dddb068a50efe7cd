//! Catalog intake from a delimited spreadsheet export.

use std::collections::HashMap;
use std::io::Read;

use rrp_core::{normalize_checked, parse_number, Dimensions, Product, Unit};

use crate::error::PricingError;

const SKU: &[&str] = &["sku", "артикул"];
const NAME: &[&str] = &["name", "название", "наименование"];
const LENGTH: &[&str] = &["length", "длина"];
const WIDTH: &[&str] = &["width", "ширина"];
const HEIGHT: &[&str] = &["height", "высота"];
const WEIGHT: &[&str] = &["weight", "вес"];
const COST: &[&str] = &["cost", "себестоимость", "закупка"];

/// Units the catalog's dimension and weight columns are recorded in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogUnits {
    pub dimension: Unit,
    pub weight: Unit,
}

impl Default for CatalogUnits {
    fn default() -> Self {
        Self {
            dimension: Unit::Centimeters,
            weight: Unit::Kilograms,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CatalogImport {
    /// One product per SKU; a repeated SKU replaces the earlier row in place.
    pub products: Vec<Product>,
    pub skipped: usize,
    /// Values converted by threshold inference close to the threshold.
    pub borderline: usize,
}

/// Header cell reduced to its bare name: `" Длина, см "` → `"длина"`.
fn header_key(raw: &str) -> String {
    raw.split([',', '('])
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase()
}

fn find_column(headers: &[String], aliases: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| aliases.iter().any(|a| h == a))
}

struct Columns {
    sku: usize,
    name: usize,
    length: Option<usize>,
    width: Option<usize>,
    height: Option<usize>,
    weight: Option<usize>,
    cost: Option<usize>,
}

impl Columns {
    fn locate(headers: &csv::StringRecord) -> Result<Self, PricingError> {
        let keys: Vec<String> = headers.iter().map(header_key).collect();
        let required = |aliases: &[&str]| {
            find_column(&keys, aliases).ok_or_else(|| PricingError::MissingColumn {
                column: aliases[0].to_string(),
            })
        };
        Ok(Self {
            sku: required(SKU)?,
            name: required(NAME)?,
            length: find_column(&keys, LENGTH),
            width: find_column(&keys, WIDTH),
            height: find_column(&keys, HEIGHT),
            weight: find_column(&keys, WEIGHT),
            cost: find_column(&keys, COST),
        })
    }
}

/// Read a catalog. Rows without a SKU or name are skipped and counted;
/// malformed numbers become `0.0`.
///
/// # Errors
///
/// Returns `PricingError::MissingColumn` when no SKU or name column exists,
/// or `PricingError::Csv` when the header row cannot be read.
pub fn read_catalog<R: Read>(
    reader: R,
    delimiter: u8,
    units: CatalogUnits,
) -> Result<CatalogImport, PricingError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = Columns::locate(rdr.headers()?)?;

    let mut import = CatalogImport::default();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for (line, record) in rdr.records().enumerate() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(row = line + 2, error = %e, "skipping unreadable catalog row");
                import.skipped += 1;
                continue;
            }
        };

        let cell = |idx: Option<usize>| idx.and_then(|i| record.get(i)).unwrap_or_default();
        let sku = cell(Some(columns.sku));
        let name = cell(Some(columns.name));
        if sku.is_empty() || name.is_empty() {
            import.skipped += 1;
            continue;
        }

        let mut convert = |field: &str, idx: Option<usize>, unit: Unit| {
            let raw = cell(idx);
            let conv = normalize_checked(raw, unit);
            if conv.borderline {
                import.borderline += 1;
                tracing::warn!(
                    sku,
                    field,
                    raw,
                    converted = conv.value,
                    inferred = conv.inferred,
                    "unit inference near threshold; check this value"
                );
            }
            conv.value
        };

        let dimensions = Dimensions {
            length_cm: convert("length", columns.length, units.dimension),
            width_cm: convert("width", columns.width, units.dimension),
            height_cm: convert("height", columns.height, units.dimension),
            weight_kg: convert("weight", columns.weight, units.weight),
        };
        let cost = parse_number(cell(columns.cost)).unwrap_or(0.0);

        let product = Product {
            sku: sku.to_string(),
            name: name.to_string(),
            dimensions,
            cost,
        };

        match positions.get(sku) {
            Some(&pos) => import.products[pos] = product,
            None => {
                positions.insert(product.sku.clone(), import.products.len());
                import.products.push(product);
            }
        }
    }

    if import.skipped > 0 {
        tracing::warn!(skipped = import.skipped, "catalog rows skipped during import");
    }

    Ok(import)
}
