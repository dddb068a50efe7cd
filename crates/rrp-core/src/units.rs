//! Conversion of raw catalog cells into canonical units (cm, kg).
//!
//! Parsing never fails: anything that is not a finite, non-negative number
//! becomes `0.0`, which downstream code treats as "unknown".

/// Dimension values above this many centimetres are assumed to be millimetres.
pub const DEFAULT_DIM_INFER_THRESHOLD_CM: f64 = 250.0;

/// Weight values above this many kilograms are assumed to be grams.
pub const DEFAULT_WEIGHT_INFER_THRESHOLD_KG: f64 = 150.0;

const BORDERLINE_LOW: f64 = 0.8;
const BORDERLINE_HIGH: f64 = 1.25;

/// Unit a raw value was recorded in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Unit {
    Centimeters,
    Millimeters,
    Kilograms,
    Grams,
    /// Centimetres, unless the value exceeds the threshold (then millimetres).
    InferDimension { threshold_cm: f64 },
    /// Kilograms, unless the value exceeds the threshold (then grams).
    InferWeight { threshold_kg: f64 },
}

impl Unit {
    /// Parse a unit label as written in catalog headers or CLI flags.
    ///
    /// `dim` and `weight` select threshold inference with the given thresholds.
    /// Returns `None` for labels that name no known unit.
    #[must_use]
    pub fn from_label(label: &str, dim_threshold_cm: f64, weight_threshold_kg: f64) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "cm" | "см" => Some(Self::Centimeters),
            "mm" | "мм" => Some(Self::Millimeters),
            "kg" | "кг" => Some(Self::Kilograms),
            "g" | "gr" | "г" | "гр" => Some(Self::Grams),
            "dim" => Some(Self::InferDimension {
                threshold_cm: dim_threshold_cm,
            }),
            "weight" => Some(Self::InferWeight {
                threshold_kg: weight_threshold_kg,
            }),
            _ => None,
        }
    }

    /// Whether this unit is already canonical (cm or kg).
    #[must_use]
    pub fn is_canonical(self) -> bool {
        matches!(self, Self::Centimeters | Self::Kilograms)
    }
}

/// Outcome of a checked conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion {
    pub value: f64,
    /// The threshold heuristic rescaled the value.
    pub inferred: bool,
    /// The raw value sat close enough to the threshold that the guess may be wrong.
    pub borderline: bool,
}

impl Conversion {
    fn plain(value: f64) -> Self {
        Self {
            value,
            inferred: false,
            borderline: false,
        }
    }
}

/// Parse a human-entered number.
///
/// Whitespace (including non-breaking spaces used as thousands separators) is
/// removed and a decimal comma is accepted. Returns `None` for empty input,
/// garbage, negative or non-finite values.
#[must_use]
pub fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{a0}' && *c != '\u{202f}')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Convert a raw cell to the canonical unit. Unparseable input yields `0.0`.
#[must_use]
pub fn normalize(raw: &str, unit: Unit) -> f64 {
    normalize_checked(raw, unit).value
}

/// Convert an already-parsed number to the canonical unit.
#[must_use]
pub fn normalize_number(value: f64, unit: Unit) -> f64 {
    convert(value, unit).value
}

/// Like [`normalize`], but also reports whether threshold inference kicked in
/// and whether the raw value was borderline.
#[must_use]
pub fn normalize_checked(raw: &str, unit: Unit) -> Conversion {
    match parse_number(raw) {
        Some(value) => convert(value, unit),
        None => Conversion::plain(0.0),
    }
}

fn convert(value: f64, unit: Unit) -> Conversion {
    if !value.is_finite() || value < 0.0 {
        return Conversion::plain(0.0);
    }

    match unit {
        Unit::Centimeters | Unit::Kilograms => Conversion::plain(value),
        Unit::Millimeters => Conversion::plain(value / 10.0),
        Unit::Grams => Conversion::plain(value / 1000.0),
        Unit::InferDimension { threshold_cm } => infer(value, threshold_cm, 10.0),
        Unit::InferWeight { threshold_kg } => infer(value, threshold_kg, 1000.0),
    }
}

fn infer(value: f64, threshold: f64, divisor: f64) -> Conversion {
    let borderline = value >= threshold * BORDERLINE_LOW && value <= threshold * BORDERLINE_HIGH;
    if value > threshold {
        Conversion {
            value: value / divisor,
            inferred: true,
            borderline,
        }
    } else {
        Conversion {
            value,
            inferred: false,
            borderline,
        }
    }
}
