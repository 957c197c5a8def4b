//! # Estimation Rates
//!
//! Unit prices, percentage adjustments and the mix/conversion parameters
//! used to turn volumes into material quantities.
//!
//! [`EstimationRates`] is the user-editable record. Before any arithmetic the
//! engine resolves it into [`ResolvedRates`], substituting fallbacks for
//! parameters that are zero, negative, non-finite or missing. A mix ratio or
//! bag volume of zero has no physical meaning and would divide by zero, so
//! zero means "unset" for those fields. Unit prices and percentages are
//! taken as given: a zero price is a legitimate free material.
//!
//! ## JSON Example
//!
//! Partial records are accepted; missing fields take their defaults.
//!
//! ```rust
//! use boq_core::rates::EstimationRates;
//!
//! let rates: EstimationRates = serde_json::from_str(r#"{ "cement": 700, "tax_percent": 0 }"#).unwrap();
//! assert_eq!(rates.cement, 700.0);
//! assert_eq!(rates.sand, EstimationRates::default().sand);
//! ```

use serde::{Deserialize, Serialize};

/// Fallback dry-volume factor for wet concrete/mortar
pub const FALLBACK_DRY_FACTOR: f64 = 1.54;

/// Fallback volume of one cement bag in cft
pub const FALLBACK_CEMENT_BAG_VOLUME_CFT: f64 = 1.25;

/// Fallback reinforcement multiplier
pub const FALLBACK_STEEL_FACTOR: f64 = 1.0;

/// Fallback concrete mix 1:1.5:3
pub const FALLBACK_CONCRETE_MIX: ConcreteMix = ConcreteMix { c: 1.0, s: 1.5, a: 3.0 };

/// Fallback mortar mix 1:5
pub const FALLBACK_MORTAR_MIX: MortarMix = MortarMix { c: 1.0, s: 5.0 };

/// Concrete mix ratio cement : sand : aggregate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcreteMix {
    pub c: f64,
    pub s: f64,
    pub a: f64,
}

impl Default for ConcreteMix {
    fn default() -> Self {
        FALLBACK_CONCRETE_MIX
    }
}

impl ConcreteMix {
    /// Replace unset components with the fallback mix, component by component.
    pub fn resolved(&self) -> ConcreteMix {
        ConcreteMix {
            c: configured_or(self.c, FALLBACK_CONCRETE_MIX.c),
            s: configured_or(self.s, FALLBACK_CONCRETE_MIX.s),
            a: configured_or(self.a, FALLBACK_CONCRETE_MIX.a),
        }
    }

    pub fn sum(&self) -> f64 {
        self.c + self.s + self.a
    }
}

/// Mortar mix ratio cement : sand
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MortarMix {
    pub c: f64,
    pub s: f64,
}

impl Default for MortarMix {
    fn default() -> Self {
        FALLBACK_MORTAR_MIX
    }
}

impl MortarMix {
    pub fn resolved(&self) -> MortarMix {
        MortarMix {
            c: configured_or(self.c, FALLBACK_MORTAR_MIX.c),
            s: configured_or(self.s, FALLBACK_MORTAR_MIX.s),
        }
    }

    pub fn sum(&self) -> f64 {
        self.c + self.s
    }
}

/// User-editable rates configuration.
///
/// Percentages are whole numbers (`10.0` means 10%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimationRates {
    /// Price per cement bag
    pub cement: f64,

    /// Price per cft of sand
    pub sand: f64,

    /// Price per cft of aggregate
    pub aggregate: f64,

    /// Price per brick
    pub brick: f64,

    /// Price per kg of steel
    pub steel: f64,

    /// Labor rate, scaled by the item's labor basis
    pub labor: f64,

    /// Applied to materials only, never labor
    pub wastage_percent: f64,

    pub overhead_percent: f64,

    pub profit_percent: f64,

    pub tax_percent: f64,

    /// Wet-to-dry volume factor
    pub dry_factor: f64,

    pub cement_bag_volume_cft: f64,

    pub concrete_mix: ConcreteMix,

    pub mortar_mix: MortarMix,

    /// Bricks per cft of wall volume
    pub brick_per_cft: f64,

    /// Multiplier applied to every steel quantity
    pub steel_factor: f64,
}

impl Default for EstimationRates {
    fn default() -> Self {
        EstimationRates {
            cement: 650.0,
            sand: 1200.0,
            aggregate: 1800.0,
            brick: 12.0,
            steel: 85.0,
            labor: 800.0,
            wastage_percent: 3.0,
            overhead_percent: 10.0,
            profit_percent: 7.0,
            tax_percent: 5.0,
            dry_factor: FALLBACK_DRY_FACTOR,
            cement_bag_volume_cft: FALLBACK_CEMENT_BAG_VOLUME_CFT,
            concrete_mix: FALLBACK_CONCRETE_MIX,
            mortar_mix: FALLBACK_MORTAR_MIX,
            brick_per_cft: 11.43,
            steel_factor: FALLBACK_STEEL_FACTOR,
        }
    }
}

impl EstimationRates {
    /// Resolve fallbacks into the values the engine actually uses.
    pub fn resolved(&self) -> ResolvedRates {
        ResolvedRates {
            cement: finite_or_zero(self.cement),
            sand: finite_or_zero(self.sand),
            aggregate: finite_or_zero(self.aggregate),
            brick: finite_or_zero(self.brick),
            steel: finite_or_zero(self.steel),
            labor: finite_or_zero(self.labor),
            wastage_percent: finite_or_zero(self.wastage_percent),
            overhead_percent: finite_or_zero(self.overhead_percent),
            profit_percent: finite_or_zero(self.profit_percent),
            tax_percent: finite_or_zero(self.tax_percent),
            dry_factor: configured_or(self.dry_factor, FALLBACK_DRY_FACTOR),
            cement_bag_volume_cft: configured_or(self.cement_bag_volume_cft, FALLBACK_CEMENT_BAG_VOLUME_CFT),
            concrete_mix: self.concrete_mix.resolved(),
            mortar_mix: self.mortar_mix.resolved(),
            brick_per_cft: configured(self.brick_per_cft),
            steel_factor: configured_or(self.steel_factor, FALLBACK_STEEL_FACTOR),
        }
    }
}

/// Rates with every fallback applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedRates {
    pub cement: f64,
    pub sand: f64,
    pub aggregate: f64,
    pub brick: f64,
    pub steel: f64,
    pub labor: f64,
    pub wastage_percent: f64,
    pub overhead_percent: f64,
    pub profit_percent: f64,
    pub tax_percent: f64,
    pub dry_factor: f64,
    pub cement_bag_volume_cft: f64,
    pub concrete_mix: ConcreteMix,
    pub mortar_mix: MortarMix,
    /// `None` when the rates carry no density; the item's own density applies
    pub brick_per_cft: Option<f64>,
    pub steel_factor: f64,
}

impl ResolvedRates {
    /// Material multiplier `1 + wastage/100`
    pub fn wastage_factor(&self) -> f64 {
        percent_factor(self.wastage_percent)
    }
}

/// `1 + percent/100`
pub fn percent_factor(percent: f64) -> f64 {
    1.0 + percent / 100.0
}

fn configured(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

fn configured_or(value: f64, fallback: f64) -> f64 {
    configured(value).unwrap_or(fallback)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let rates = EstimationRates::default();
        assert_eq!(rates.cement, 650.0);
        assert_eq!(rates.brick_per_cft, 11.43);
        assert_eq!(rates.concrete_mix, ConcreteMix { c: 1.0, s: 1.5, a: 3.0 });
        assert_eq!(rates.mortar_mix.sum(), 6.0);
    }

    #[test]
    fn test_zero_mix_falls_back() {
        let mut rates = EstimationRates::default();
        rates.concrete_mix = ConcreteMix { c: 0.0, s: 0.0, a: 0.0 };
        rates.mortar_mix = MortarMix { c: 2.0, s: 0.0 };
        rates.cement_bag_volume_cft = 0.0;
        rates.dry_factor = -1.0;
        rates.steel_factor = f64::NAN;

        let resolved = rates.resolved();
        assert_eq!(resolved.concrete_mix, FALLBACK_CONCRETE_MIX);
        assert_eq!(resolved.mortar_mix, MortarMix { c: 2.0, s: 5.0 });
        assert_eq!(resolved.cement_bag_volume_cft, 1.25);
        assert_eq!(resolved.dry_factor, 1.54);
        assert_eq!(resolved.steel_factor, 1.0);
    }

    #[test]
    fn test_zero_prices_kept() {
        let mut rates = EstimationRates::default();
        rates.cement = 0.0;
        rates.tax_percent = 0.0;
        rates.brick_per_cft = 0.0;
        let resolved = rates.resolved();
        assert_eq!(resolved.cement, 0.0);
        assert_eq!(resolved.tax_percent, 0.0);
        assert_eq!(resolved.brick_per_cft, None);
    }

    #[test]
    fn test_partial_deserialization() {
        let json = r#"{ "wastage_percent": 5, "concrete_mix": { "c": 1, "s": 2 } }"#;
        let rates: EstimationRates = serde_json::from_str(json).unwrap();
        assert_eq!(rates.wastage_percent, 5.0);
        assert_eq!(rates.concrete_mix, ConcreteMix { c: 1.0, s: 2.0, a: 3.0 });
        assert_eq!(rates.labor, 800.0);
    }

    #[test]
    fn test_percent_factor() {
        assert!((percent_factor(3.0) - 1.03).abs() < 1e-12);
        assert_eq!(percent_factor(0.0), 1.0);
    }
}
