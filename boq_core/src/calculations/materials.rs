//! # Material Derivation
//!
//! Splits a wet volume into cement bags, sand and aggregate using the
//! configured mix ratios, and works out reinforcement steel.
//!
//! ```text
//! dry      = volume x dry_factor
//! cement   = dry x c / (c + s + a) / bag_volume   (bags)
//! sand     = dry x s / (c + s + a)                (cft)
//! aggregate= dry x a / (c + s + a)                (cft)
//! ```
//!
//! Mortar uses the same split with a two-part mix and no aggregate.

use serde::{Deserialize, Serialize};

use super::dimensions::NormalizedDimensions;
use super::geometry::{brick_density, Geometry};
use super::reinforcement::{pile_take_off, PileReinforcement, PileSteel};
use crate::catalog::{ItemDefinition, MeasurementMode};
use crate::rates::ResolvedRates;
use crate::units::Feet;

/// Which material recipe an item uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialBasis {
    /// Reinforced concrete: concrete mix plus steel
    Concrete,
    /// Masonry wall: bricks plus mortar
    Masonry,
    /// Thin mortar layer (plaster, tile bedding)
    MortarLayer,
    /// No cement, sand, aggregate or steel (paint)
    Dry,
    /// Not in the catalog; nothing to derive from
    Unpriced,
}

impl MaterialBasis {
    pub fn for_item(def: Option<&ItemDefinition>) -> Self {
        let Some(def) = def else {
            return MaterialBasis::Unpriced;
        };
        // Retaining walls are measured like walls but built in concrete.
        if def.id == "retaining_wall" {
            return MaterialBasis::Concrete;
        }
        match def.mode {
            MeasurementMode::Volume => MaterialBasis::Concrete,
            MeasurementMode::Wall => MaterialBasis::Masonry,
            MeasurementMode::Area if def.id == "paint" => MaterialBasis::Dry,
            MeasurementMode::Area => MaterialBasis::MortarLayer,
        }
    }
}

/// Cement, sand and aggregate from a mix split.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MixSplit {
    pub cement_bags: f64,
    pub sand_cft: f64,
    pub aggregate_cft: f64,
}

/// Split a wet concrete volume by the concrete mix.
pub fn concrete_split(volume: f64, rates: &ResolvedRates) -> MixSplit {
    let dry = volume * rates.dry_factor;
    let mix = rates.concrete_mix;
    let sum = mix.sum();
    MixSplit {
        cement_bags: dry * mix.c / sum / rates.cement_bag_volume_cft,
        sand_cft: dry * mix.s / sum,
        aggregate_cft: dry * mix.a / sum,
    }
}

/// Split a wet mortar volume by the mortar mix.
pub fn mortar_split(volume: f64, rates: &ResolvedRates) -> MixSplit {
    let dry = volume * rates.dry_factor;
    let mix = rates.mortar_mix;
    let sum = mix.sum();
    MixSplit {
        cement_bags: dry * mix.c / sum / rates.cement_bag_volume_cft,
        sand_cft: dry * mix.s / sum,
        aggregate_cft: 0.0,
    }
}

/// Material quantities before wastage.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BaseMaterials {
    pub mix: MixSplit,
    /// kg, steel factor applied
    pub steel_kg: f64,
    /// Brick count when the recipe sets one; otherwise the geometry's count stands
    pub bricks: Option<f64>,
    /// Detailed take-off for one pile, when the item is a pile with diameter and length
    pub pile_steel: Option<PileSteel>,
}

/// Derive base material quantities for a measured entry.
///
/// `geometry` must already include quantity and multiple.
pub fn derive_materials(
    def: Option<&ItemDefinition>,
    geometry: &Geometry,
    dims: &NormalizedDimensions,
    rates: &ResolvedRates,
) -> BaseMaterials {
    let volume = geometry.volume;
    let steel_coefficient = def.map_or(0.0, |d| d.steel);

    match MaterialBasis::for_item(def) {
        MaterialBasis::Concrete => {
            let is_pile = def.is_some_and(|d| d.id == "pile");
            if is_pile && dims.width > 0.0 && dims.run_length() > 0.0 {
                let reo = PileReinforcement::from_dimensions(dims);
                let take_off = pile_take_off(Feet(dims.width), Feet(dims.run_length()), &reo);
                BaseMaterials {
                    mix: concrete_split(volume, rates),
                    steel_kg: take_off.total().0 * rates.steel_factor * dims.multiplier(),
                    bricks: None,
                    pile_steel: Some(take_off),
                }
            } else {
                BaseMaterials {
                    mix: concrete_split(volume, rates),
                    steel_kg: volume * steel_coefficient * rates.steel_factor,
                    bricks: None,
                    pile_steel: None,
                }
            }
        }
        MaterialBasis::Masonry => BaseMaterials {
            mix: mortar_split(volume, rates),
            steel_kg: steel_coefficient * volume * rates.steel_factor,
            bricks: Some(brick_density(def, rates) * volume),
            pile_steel: None,
        },
        MaterialBasis::MortarLayer => BaseMaterials {
            mix: mortar_split(volume, rates),
            ..Default::default()
        },
        MaterialBasis::Dry | MaterialBasis::Unpriced => BaseMaterials::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::rates::EstimationRates;

    #[test]
    fn test_basis_dispatch() {
        let catalog = Catalog::standard();
        let basis = |id: &str| MaterialBasis::for_item(catalog.find_item_def(id));
        assert_eq!(basis("slab"), MaterialBasis::Concrete);
        assert_eq!(basis("retaining_wall"), MaterialBasis::Concrete);
        assert_eq!(basis("lift_core"), MaterialBasis::Masonry);
        assert_eq!(basis("block_wall"), MaterialBasis::Masonry);
        assert_eq!(basis("plaster"), MaterialBasis::MortarLayer);
        assert_eq!(basis("paint"), MaterialBasis::Dry);
        assert_eq!(basis("unknown"), MaterialBasis::Unpriced);
    }

    #[test]
    fn test_concrete_split() {
        let rates = EstimationRates::default().resolved();
        let split = concrete_split(150.0, &rates);
        // dry 231 cft over 5.5 parts
        assert!((split.cement_bags - 33.6).abs() < 1e-9);
        assert!((split.sand_cft - 63.0).abs() < 1e-9);
        assert!((split.aggregate_cft - 126.0).abs() < 1e-9);
    }

    #[test]
    fn test_mortar_split() {
        let rates = EstimationRates::default().resolved();
        let split = mortar_split(60.0, &rates);
        // dry 92.4 cft over 6 parts
        assert!((split.cement_bags - 12.32).abs() < 1e-9);
        assert!((split.sand_cft - 77.0).abs() < 1e-9);
        assert_eq!(split.aggregate_cft, 0.0);
    }

    #[test]
    fn test_zero_mix_does_not_divide_by_zero() {
        let mut rates = EstimationRates::default();
        rates.concrete_mix.c = 0.0;
        rates.concrete_mix.s = 0.0;
        rates.concrete_mix.a = 0.0;
        rates.cement_bag_volume_cft = 0.0;
        let split = concrete_split(150.0, &rates.resolved());
        assert!(split.cement_bags.is_finite());
        assert!((split.cement_bags - 33.6).abs() < 1e-9);
    }
}
