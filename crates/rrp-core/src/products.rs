use serde::{Deserialize, Serialize};

/// Physical attributes in canonical units. Zero means unknown.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub length_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
    pub weight_kg: f64,
}

impl Dimensions {
    #[must_use]
    pub fn new(length_cm: f64, width_cm: f64, height_cm: f64, weight_kg: f64) -> Self {
        Self {
            length_cm,
            width_cm,
            height_cm,
            weight_kg,
        }
    }

    /// All three sides are known (strictly positive).
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.length_cm > 0.0 && self.width_cm > 0.0 && self.height_cm > 0.0
    }

    /// Volume in cubic metres; `0.0` when any side is unknown.
    #[must_use]
    pub fn volume_m3(&self) -> f64 {
        if self.is_complete() {
            self.length_cm * self.width_cm * self.height_cm / 1_000_000.0
        } else {
            0.0
        }
    }

    /// Volume in litres (dm³); `0.0` when any side is unknown.
    #[must_use]
    pub fn volume_dm3(&self) -> f64 {
        if self.is_complete() {
            self.length_cm * self.width_cm * self.height_cm / 1000.0
        } else {
            0.0
        }
    }

    #[must_use]
    pub fn longest_side_cm(&self) -> f64 {
        self.length_cm.max(self.width_cm).max(self.height_cm)
    }
}

/// A catalog entry. SKU is the identity; everything else may be updated by import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub sku: String,
    pub name: String,
    pub dimensions: Dimensions,
    /// Purchase cost. `0.0` marks the product as unpriced.
    pub cost: f64,
}

impl Product {
    #[must_use]
    pub fn is_priced(&self) -> bool {
        self.cost > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_of_complete_box() {
        let dims = Dimensions::new(50.0, 40.0, 30.0, 4.0);
        assert!(dims.is_complete());
        assert!((dims.volume_m3() - 0.06).abs() < 1e-12);
        assert!((dims.volume_dm3() - 60.0).abs() < 1e-9);
        assert!((dims.longest_side_cm() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn incomplete_box_has_no_volume() {
        let dims = Dimensions::new(50.0, 0.0, 30.0, 4.0);
        assert!(!dims.is_complete());
        assert!(dims.volume_m3().abs() < f64::EPSILON);
    }

    #[test]
    fn zero_cost_is_unpriced() {
        let product = Product {
            sku: "A-1".to_string(),
            name: "Drill".to_string(),
            dimensions: Dimensions::default(),
            cost: 0.0,
        };
        assert!(!product.is_priced());
    }
}
