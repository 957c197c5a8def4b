//! # Item Computation
//!
//! Computes quantities and costs for a single estimate entry.
//!
//! ## Pipeline
//!
//! 1. Normalize the dimensions and resolve the rates.
//! 2. Measure geometry (volume, area, bricks) and apply quantity x multiple.
//! 3. Derive cement, sand, aggregate and steel from the mix ratios.
//! 4. Add wastage to cement, sand, aggregate and steel (not bricks, not labor).
//! 5. Price each material and labor; sum to the subtotal.
//! 6. Compound overhead, then profit, then tax onto the subtotal.
//!
//! The computation never fails. Unknown item ids are measured as a plain
//! box with no materials.
//!
//! ## Example
//!
//! ```rust
//! use boq_core::calculations::{compute_item, DimensionsInput};
//! use boq_core::catalog::Catalog;
//! use boq_core::rates::EstimationRates;
//!
//! let dims = DimensionsInput::new(20.0).with_width(15.0).with_thickness(0.5);
//! let result = compute_item(Catalog::standard(), "slab", &dims, &EstimationRates::default());
//! assert!((result.materials.volume - 150.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use super::dimensions::DimensionsInput;
use super::geometry::measure_item;
use super::materials::derive_materials;
use super::reinforcement::PileSteel;
use super::totals::apply_adjustments;
use crate::catalog::{Catalog, MeasurementMode};
use crate::rates::EstimationRates;

/// Labor cost = labor basis x labor rate x this factor
pub const LABOR_RATE_FACTOR: f64 = 0.5;

/// Quantities for one entry, wastage included.
///
/// ## JSON Example
///
/// ```json
/// {
///   "volume": 150.0,
///   "area": 0.0,
///   "bricks": 0.0,
///   "cement": 34.608,
///   "sand": 64.89,
///   "aggregate": 129.78,
///   "steel": 13905.0,
///   "labor_basis": 150.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ComputedMaterials {
    /// cft
    pub volume: f64,

    /// sft (wall face or finished surface)
    pub area: f64,

    /// Number of bricks or blocks
    pub bricks: f64,

    /// Cement bags
    pub cement: f64,

    /// cft
    pub sand: f64,

    /// cft
    pub aggregate: f64,

    /// kg
    pub steel: f64,

    /// Quantity labor is priced on (area for finishes, else volume)
    pub labor_basis: f64,
}

/// Cost of one entry, before overhead, profit and tax.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ItemCosts {
    pub cement: f64,
    pub sand: f64,
    pub aggregate: f64,
    pub brick: f64,
    pub steel: f64,
    pub labor: f64,
    pub subtotal: f64,
}

/// Output of [`compute_item`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemComputationResult {
    pub materials: ComputedMaterials,

    pub costs: ItemCosts,

    /// Subtotal with overhead, profit and tax compounded in that order
    pub total_with_adjustments: f64,

    /// Main bar / spiral breakdown for one pile (before wastage, steel factor and count)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pile_steel: Option<PileSteel>,
}

/// Compute quantities and costs for one entry.
///
/// # Arguments
///
/// * `catalog` - Item table to look `item_id` up in
/// * `item_id` - Catalog id (e.g., "slab"); unknown ids use box geometry
/// * `dimensions` - Entry dimensions; normalized before use
/// * `rates` - Prices, percentages and mix parameters
pub fn compute_item(
    catalog: &Catalog,
    item_id: &str,
    dimensions: &DimensionsInput,
    rates: &EstimationRates,
) -> ItemComputationResult {
    let def = catalog.find_item_def(item_id);
    if def.is_none() {
        tracing::warn!(item_id, "unknown item type, measuring as a plain box");
    }

    let dims = dimensions.normalize();
    let rates = rates.resolved();

    let geometry = measure_item(def, &dims, &rates);
    let base = derive_materials(def, &geometry, &dims, &rates);

    let wastage = rates.wastage_factor();
    let is_area = def.is_some_and(|d| d.mode == MeasurementMode::Area);
    let labor_basis = if is_area && geometry.area != 0.0 {
        geometry.area
    } else {
        geometry.volume
    };

    let materials = ComputedMaterials {
        volume: geometry.volume,
        area: geometry.area,
        bricks: base.bricks.unwrap_or(geometry.bricks),
        cement: base.mix.cement_bags * wastage,
        sand: base.mix.sand_cft * wastage,
        aggregate: base.mix.aggregate_cft * wastage,
        steel: base.steel_kg * wastage,
        labor_basis,
    };

    let mut costs = ItemCosts {
        cement: materials.cement * rates.cement,
        sand: materials.sand * rates.sand,
        aggregate: materials.aggregate * rates.aggregate,
        brick: materials.bricks * rates.brick,
        steel: materials.steel * rates.steel,
        labor: labor_basis * rates.labor * LABOR_RATE_FACTOR,
        subtotal: 0.0,
    };
    costs.subtotal = costs.cement + costs.sand + costs.aggregate + costs.brick + costs.steel + costs.labor;

    let total_with_adjustments = apply_adjustments(costs.subtotal, &rates).total;

    tracing::debug!(
        item_id,
        volume = materials.volume,
        area = materials.area,
        subtotal = costs.subtotal,
        total = total_with_adjustments,
        "computed item"
    );

    ItemComputationResult {
        materials,
        costs,
        total_with_adjustments,
        pile_steel: base.pile_steel,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compute(id: &str, dims: DimensionsInput) -> ItemComputationResult {
        compute_item(Catalog::standard(), id, &dims, &EstimationRates::default())
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn test_slab_reference() {
        let r = compute("slab", DimensionsInput::new(20.0).with_width(15.0).with_thickness(0.5));
        assert!(close(r.materials.volume, 150.0));
        assert!(close(r.materials.steel, 13500.0 * 1.03));
        assert!(close(r.materials.cement, 33.6 * 1.03));
        assert!(close(r.materials.sand, 63.0 * 1.03));
        assert!(close(r.materials.aggregate, 126.0 * 1.03));
        assert_eq!(r.materials.bricks, 0.0);
        assert!(close(r.costs.labor, 150.0 * 800.0 * 0.5));
        assert!(r.pile_steel.is_none());
    }

    #[test]
    fn test_subtotal_is_sum_of_costs() {
        let r = compute("brick_wall", DimensionsInput::new(20.0).with_height(10.0));
        let c = r.costs;
        assert!(close(c.subtotal, c.cement + c.sand + c.aggregate + c.brick + c.steel + c.labor));
        assert!(close(c.brick, r.materials.bricks * 12.0));
    }

    #[test]
    fn test_pile_detailed_steel() {
        let dims = DimensionsInput::new(0.0)
            .with_width(2.0)
            .with_height(30.0)
            .with_pile_reinforcement(7.0, 20.0, 10.0, 6.0, 3.0, 30.0);
        let r = compute("pile", dims);
        let take_off = r.pile_steel.unwrap();
        assert!((take_off.total().0 - 224.35).abs() < 0.01);
        assert!(close(r.materials.steel, take_off.total().0 * 1.03));
    }

    #[test]
    fn test_pile_count_scales_take_off() {
        let dims = DimensionsInput::new(0.0).with_width(2.0).with_height(30.0);
        let single = compute("pile", dims.clone());
        let group = compute("pile", dims.with_quantity(4.0));
        assert!(close(group.materials.steel, 4.0 * single.materials.steel));
        // breakdown stays per pile
        assert_eq!(group.pile_steel, single.pile_steel);
    }

    #[test]
    fn test_pile_without_diameter_uses_coefficient() {
        let r = compute("pile", DimensionsInput::new(30.0));
        assert!(r.pile_steel.is_none());
        assert_eq!(r.materials.volume, 0.0);
        assert_eq!(r.materials.steel, 0.0);
    }

    #[test]
    fn test_steel_factor_scales_pile_take_off() {
        let dims = DimensionsInput::new(0.0).with_width(2.0).with_height(30.0);
        let mut rates = EstimationRates::default();
        rates.steel_factor = 2.0;
        let doubled = compute_item(Catalog::standard(), "pile", &dims, &rates);
        let single = compute("pile", dims);
        assert!(close(doubled.materials.steel, 2.0 * single.materials.steel));
    }

    #[test]
    fn test_retaining_wall_uses_concrete() {
        let r = compute("retaining_wall", DimensionsInput::new(20.0).with_height(8.0));
        let volume = 20.0 * 8.0 * 0.75;
        assert!(close(r.materials.volume, volume));
        assert!(r.materials.aggregate > 0.0);
        assert!(close(r.materials.steel, volume * 140.0 * 1.03));
        // brick count from the wall measurement is kept
        assert!(close(r.materials.bricks, volume * 11.43));
    }

    #[test]
    fn test_lift_core_masonry_recipe() {
        let r = compute("lift_core", DimensionsInput::new(8.0).with_width(6.0).with_height(10.0));
        assert!(close(r.materials.bricks, r.materials.volume * 11.43));
        assert_eq!(r.materials.aggregate, 0.0);
        assert_eq!(r.materials.steel, 0.0);
    }

    #[test]
    fn test_paint_has_labor_only() {
        let r = compute("paint", DimensionsInput::new(20.0).with_width(10.0));
        assert_eq!(r.materials.cement, 0.0);
        assert_eq!(r.materials.sand, 0.0);
        assert_eq!(r.materials.labor_basis, 200.0);
        assert!(close(r.costs.subtotal, 200.0 * 800.0 * 0.5));
    }

    #[test]
    fn test_plaster_labor_on_area() {
        let r = compute("plaster", DimensionsInput::new(20.0).with_width(10.0));
        assert_eq!(r.materials.labor_basis, 200.0);
        assert!(r.materials.cement > 0.0);
        assert_eq!(r.materials.aggregate, 0.0);
    }

    #[test]
    fn test_unknown_item_fallback() {
        let r = compute("gazebo", DimensionsInput::new(3.0).with_width(2.0).with_height(4.0));
        assert_eq!(r.materials.volume, 24.0);
        assert_eq!(r.materials.cement, 0.0);
        assert_eq!(r.materials.steel, 0.0);
        assert_eq!(r.materials.bricks, 0.0);
        assert!(close(r.costs.subtotal, 24.0 * 800.0 * 0.5));
        assert!(r.total_with_adjustments.is_finite());
    }

    #[test]
    fn test_all_zero_input() {
        let r = compute("slab", DimensionsInput::default());
        assert_eq!(r.costs.subtotal, 0.0);
        assert_eq!(r.total_with_adjustments, 0.0);
    }

    #[test]
    fn test_does_not_mutate_inputs() {
        let dims = DimensionsInput::new(10.0).with_width(2.0);
        let rates = EstimationRates::default();
        let (dims_before, rates_before) = (dims.clone(), rates.clone());
        let _ = compute_item(Catalog::standard(), "beam", &dims, &rates);
        assert_eq!(dims, dims_before);
        assert_eq!(rates, rates_before);
    }
}
