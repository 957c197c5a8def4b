//! # Geometry
//!
//! Converts normalized dimensions into raw volume (cft), area (sft) and
//! brick count for one entry. Each item type is measured by a
//! [`GeometryStrategy`]: a handful of item ids have their own shape, every
//! other item is measured by its [`MeasurementMode`], and ids that are not
//! in the catalog fall back to a plain box.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::dimensions::{first_positive, or_one, NormalizedDimensions};
use crate::catalog::{ItemDefinition, MeasurementMode};
use crate::rates::ResolvedRates;
use crate::units::{Feet, Inches, SqFt};

/// Wall thickness used for a wall item with no thickness anywhere
pub const FALLBACK_WALL_THICKNESS_FT: f64 = 0.33;

/// Shaft wall thickness used when the item has no default
pub const FALLBACK_SHAFT_THICKNESS_FT: f64 = 0.67;

/// Wall, floor and roof slab thicknesses of a box-shaped tank, in feet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinerThickness {
    /// Overridden by a user thickness, then the item default
    pub wall: f64,
    pub bottom: f64,
    pub top: f64,
}

/// Underground water reservoir: 7" walls, 8" base, 6" roof
pub const WATER_RESERVOIR_LINER: LinerThickness = LinerThickness { wall: 0.58, bottom: 0.67, top: 0.50 };

/// Overhead tank: 8" walls, 6" base, 4" roof
pub const OVERHEAD_TANK_LINER: LinerThickness = LinerThickness { wall: 0.67, bottom: 0.50, top: 0.33 };

/// Septic tank: 10" walls, 8" base, 6" roof
pub const SEPTIC_TANK_LINER: LinerThickness = LinerThickness { wall: 0.83, bottom: 0.67, top: 0.50 };

/// How an item's quantities are measured.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum GeometryStrategy {
    /// Circular pile: width is the diameter (ft), height (else length) the depth
    Pile,
    /// Closed box tank: four walls, a base and a roof
    Liner(LinerThickness),
    /// Hollow rectangular shaft: four walls, no base or roof
    Shaft,
    /// Wall measured on one face, extruded through its thickness
    Wall,
    /// Surface measured in plan, with an implied layer thickness
    Area,
    /// Solid block; `thickness_in_inches` for items whose depth is entered in inches
    Block { thickness_in_inches: bool },
    /// Unknown item: length x width x height, missing sides counted as 1
    Generic,
}

impl GeometryStrategy {
    /// Pick the strategy for an item, or [`GeometryStrategy::Generic`] when
    /// there is no definition.
    pub fn for_item(def: Option<&ItemDefinition>) -> Self {
        let Some(def) = def else {
            return GeometryStrategy::Generic;
        };
        match def.id.as_str() {
            "pile" => GeometryStrategy::Pile,
            "water_reservoir" => GeometryStrategy::Liner(WATER_RESERVOIR_LINER),
            "overhead_tank" => GeometryStrategy::Liner(OVERHEAD_TANK_LINER),
            "septic_tank" => GeometryStrategy::Liner(SEPTIC_TANK_LINER),
            "lift_core" => GeometryStrategy::Shaft,
            "footing" | "pile_cap" => GeometryStrategy::Block {
                thickness_in_inches: true,
            },
            _ => match def.mode {
                MeasurementMode::Wall => GeometryStrategy::Wall,
                MeasurementMode::Area => GeometryStrategy::Area,
                MeasurementMode::Volume => GeometryStrategy::Block {
                    thickness_in_inches: false,
                },
            },
        }
    }

    /// Measure one element (before quantity and multiple are applied).
    pub fn measure(
        &self,
        def: Option<&ItemDefinition>,
        dims: &NormalizedDimensions,
        rates: &ResolvedRates,
    ) -> Geometry {
        let default_thickness = def.map_or(0.0, ItemDefinition::default_thickness_ft);
        let (l, w, h) = (dims.length, dims.width, dims.height);

        match *self {
            GeometryStrategy::Pile => {
                let radius = dims.width / 2.0;
                Geometry::solid(PI * radius * radius * dims.run_length())
            }
            GeometryStrategy::Liner(liner) => {
                let t_wall = first_positive(&[dims.thickness, default_thickness, liner.wall]);
                let walls = 2.0 * (l + w) * h * t_wall;
                let bottom = l * w * liner.bottom;
                let top = l * w * liner.top;
                Geometry::solid(walls + bottom + top)
            }
            GeometryStrategy::Shaft => {
                let t = first_positive(&[dims.thickness, default_thickness, FALLBACK_SHAFT_THICKNESS_FT]);
                Geometry::solid(2.0 * (l + w) * h * t)
            }
            GeometryStrategy::Wall => {
                let t = first_positive(&[dims.thickness, default_thickness, FALLBACK_WALL_THICKNESS_FT]);
                let face = SqFt(l * h);
                let volume = face.times_thickness(Feet(t)).0;
                Geometry {
                    volume,
                    area: face.0,
                    bricks: brick_density(def, rates) * volume,
                }
            }
            GeometryStrategy::Area => {
                let area = SqFt(l * or_one(w));
                Geometry {
                    volume: area.times_thickness(Feet(default_thickness)).0,
                    area: area.0,
                    bricks: 0.0,
                }
            }
            GeometryStrategy::Block { thickness_in_inches } => {
                let thickness = if thickness_in_inches && dims.thickness > 0.0 {
                    Feet::from(Inches(dims.thickness)).0
                } else {
                    dims.thickness
                };
                let depth = first_positive(&[thickness, default_thickness, h]);
                let volume = if depth > 0.0 {
                    l * or_one(w) * depth
                } else {
                    l * or_one(w) * or_one(h)
                };
                Geometry::solid(volume)
            }
            GeometryStrategy::Generic => Geometry::solid(l * or_one(w) * or_one(h)),
        }
    }
}

/// Raw quantities of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    /// cft
    pub volume: f64,
    /// sft
    pub area: f64,
    pub bricks: f64,
}

impl Geometry {
    fn solid(volume: f64) -> Self {
        Geometry {
            volume,
            area: 0.0,
            bricks: 0.0,
        }
    }

    /// Scale every quantity by `factor`.
    pub fn scaled(self, factor: f64) -> Self {
        Geometry {
            volume: self.volume * factor,
            area: self.area * factor,
            bricks: self.bricks * factor,
        }
    }
}

/// Measure an entry, including its quantity and multiple.
pub fn measure_item(def: Option<&ItemDefinition>, dims: &NormalizedDimensions, rates: &ResolvedRates) -> Geometry {
    GeometryStrategy::for_item(def)
        .measure(def, dims, rates)
        .scaled(dims.multiplier())
}

/// Masonry units per cft: the rates' density, else the item's, else 0.
pub fn brick_density(def: Option<&ItemDefinition>, rates: &ResolvedRates) -> f64 {
    rates
        .brick_per_cft
        .or_else(|| def.and_then(|d| d.brick_per_cft))
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::DimensionsInput;
    use crate::catalog::Catalog;
    use crate::rates::EstimationRates;

    fn measure(id: &str, input: DimensionsInput) -> Geometry {
        let def = Catalog::standard().find_item_def(id);
        let rates = EstimationRates::default().resolved();
        measure_item(def, &input.normalize(), &rates)
    }

    #[test]
    fn test_strategy_dispatch() {
        let catalog = Catalog::standard();
        let strategy = |id: &str| GeometryStrategy::for_item(catalog.find_item_def(id));
        assert_eq!(strategy("pile"), GeometryStrategy::Pile);
        assert_eq!(strategy("septic_tank"), GeometryStrategy::Liner(SEPTIC_TANK_LINER));
        assert_eq!(strategy("lift_core"), GeometryStrategy::Shaft);
        assert_eq!(strategy("retaining_wall"), GeometryStrategy::Wall);
        assert_eq!(strategy("tiles"), GeometryStrategy::Area);
        assert_eq!(strategy("pile_cap"), GeometryStrategy::Block { thickness_in_inches: true });
        assert_eq!(strategy("slab"), GeometryStrategy::Block { thickness_in_inches: false });
        assert_eq!(strategy("nope"), GeometryStrategy::Generic);
    }

    #[test]
    fn test_pile_volume() {
        let g = measure("pile", DimensionsInput::new(0.0).with_width(2.0).with_height(30.0));
        assert!((g.volume - PI * 30.0).abs() < 1e-9);
        // length stands in for height
        let g = measure("pile", DimensionsInput::new(30.0).with_width(2.0));
        assert!((g.volume - PI * 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_water_reservoir_liner() {
        let g = measure("water_reservoir", DimensionsInput::new(10.0).with_width(8.0).with_height(6.0));
        let expected = 2.0 * 18.0 * 6.0 * 0.58 + 80.0 * 0.67 + 80.0 * 0.50;
        assert!((g.volume - expected).abs() < 1e-9);
    }

    #[test]
    fn test_liner_wall_override() {
        let g = measure(
            "overhead_tank",
            DimensionsInput::new(10.0).with_width(8.0).with_height(6.0).with_thickness(1.0),
        );
        let expected = 2.0 * 18.0 * 6.0 * 1.0 + 80.0 * 0.50 + 80.0 * 0.33;
        assert!((g.volume - expected).abs() < 1e-9);
    }

    #[test]
    fn test_lift_core_shaft() {
        let g = measure("lift_core", DimensionsInput::new(8.0).with_width(6.0).with_height(10.0));
        assert!((g.volume - 2.0 * 14.0 * 10.0 * 0.67).abs() < 1e-9);
        assert_eq!(g.area, 0.0);
    }

    #[test]
    fn test_brick_wall() {
        let g = measure("brick_wall", DimensionsInput::new(20.0).with_height(10.0));
        assert_eq!(g.area, 200.0);
        assert!((g.volume - 66.0).abs() < 1e-9);
        // rates density wins over the item's
        assert!((g.bricks - 66.0 * 11.43).abs() < 1e-9);
    }

    #[test]
    fn test_wall_uses_item_density_without_rate() {
        let def = Catalog::standard().find_item_def("brick_wall");
        let mut rates = EstimationRates::default();
        rates.brick_per_cft = 0.0;
        let dims = DimensionsInput::new(10.0).with_height(10.0).normalize();
        let g = measure_item(def, &dims, &rates.resolved());
        assert!((g.bricks - 33.0 * 500.0).abs() < 1e-6);
    }

    #[test]
    fn test_area_finish() {
        let g = measure("plaster", DimensionsInput::new(20.0).with_width(10.0));
        assert_eq!(g.area, 200.0);
        assert!((g.volume - 10.0).abs() < 1e-9);
        let g = measure("plumbing", DimensionsInput::new(12.0));
        assert_eq!(g.area, 12.0);
        assert_eq!(g.volume, 0.0);
    }

    #[test]
    fn test_footing_thickness_in_inches() {
        let g = measure("footing", DimensionsInput::new(6.0).with_width(6.0).with_thickness(18.0));
        assert!((g.volume - 54.0).abs() < 1e-9);
    }

    #[test]
    fn test_pile_cap_default_depth() {
        let g = measure("pile_cap", DimensionsInput::new(6.0).with_width(4.0).with_height(9.0));
        assert!((g.volume - 48.0).abs() < 1e-9);
    }

    #[test]
    fn test_block_falls_back_to_height() {
        let g = measure("column", DimensionsInput::new(1.0).with_width(1.5).with_height(10.0));
        assert!((g.volume - 15.0).abs() < 1e-9);
        let g = measure("column", DimensionsInput::new(2.0));
        assert_eq!(g.volume, 2.0);
    }

    #[test]
    fn test_generic_box() {
        let g = measure("gazebo", DimensionsInput::new(3.0).with_height(4.0));
        assert_eq!(g.volume, 12.0);
    }

    #[test]
    fn test_multiplier_applied() {
        let g = measure(
            "brick_wall",
            DimensionsInput::new(20.0).with_height(10.0).with_quantity(2.0).with_multiple(3.0),
        );
        assert_eq!(g.area, 1200.0);
        assert!((g.volume - 396.0).abs() < 1e-9);
    }
}
