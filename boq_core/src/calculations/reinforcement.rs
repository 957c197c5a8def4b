//! # Pile Reinforcement Take-off
//!
//! Detailed steel quantity for a circular bored pile: straight main bars
//! (with one lap) plus a spiral link at a fixed pitch.
//!
//! This is a quantity take-off only. Bar counts, diameters and spacing are
//! taken from the user as given; nothing here checks their adequacy.
//!
//! ## Formulas
//!
//! ```text
//! main   = n_bars x (L + lap) x w(main_dia)
//! clear  = max(D - 2 x cover, 0)
//! turns  = ceil(L / pitch)
//! spiral = turns x (pi x clear) x w(link_dia)
//! ```
//!
//! where `w(d)` is the unit weight of a bar in kg/ft.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::dimensions::NormalizedDimensions;
use crate::units::{Feet, Inches, Kilograms, Millimeters};

/// Unit weight of deformed bars, (diameter mm, kg per ft)
pub const BAR_UNIT_WEIGHTS: [(f64, f64); 5] = [
    (10.0, 0.19),
    (12.0, 0.27),
    (16.0, 0.48),
    (20.0, 0.75),
    (25.0, 1.17),
];

/// Unit weight used for an unlisted main bar diameter (20 mm)
pub const FALLBACK_MAIN_BAR_WEIGHT: f64 = 0.75;

/// Unit weight used for an unlisted link diameter (10 mm)
pub const FALLBACK_STIRRUP_WEIGHT: f64 = 0.19;

/// Unit weight in kg/ft for a listed bar diameter.
pub fn bar_unit_weight(diameter: Millimeters) -> Option<f64> {
    BAR_UNIT_WEIGHTS
        .iter()
        .find(|(mm, _)| (mm - diameter.0).abs() < 1e-9)
        .map(|&(_, kg_per_ft)| kg_per_ft)
}

/// Reinforcement detail for one pile, with defaults filled in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PileReinforcement {
    pub main_bar_count: f64,
    pub main_bar_dia: Millimeters,
    pub stirrup_dia: Millimeters,
    pub stirrup_spacing: Inches,
    pub clear_cover: Inches,
    pub lap_length: Inches,
}

impl Default for PileReinforcement {
    /// 7 nos 20 mm bars, 10 mm spiral at 6", 3" cover, 30" lap
    fn default() -> Self {
        PileReinforcement {
            main_bar_count: 7.0,
            main_bar_dia: Millimeters(20.0),
            stirrup_dia: Millimeters(10.0),
            stirrup_spacing: Inches(6.0),
            clear_cover: Inches(3.0),
            lap_length: Inches(30.0),
        }
    }
}

impl PileReinforcement {
    /// Take the detail from the dimensions; fields left at 0 use the defaults.
    pub fn from_dimensions(dims: &NormalizedDimensions) -> Self {
        let d = PileReinforcement::default();
        let pick = |given: f64, fallback: f64| if given > 0.0 { given } else { fallback };
        PileReinforcement {
            main_bar_count: pick(dims.main_bar_count, d.main_bar_count),
            main_bar_dia: Millimeters(pick(dims.main_bar_dia_mm, d.main_bar_dia.0)),
            stirrup_dia: Millimeters(pick(dims.stirrup_dia_mm, d.stirrup_dia.0)),
            stirrup_spacing: Inches(pick(dims.stirrup_spacing_in, d.stirrup_spacing.0)),
            clear_cover: Inches(pick(dims.clear_cover_in, d.clear_cover.0)),
            lap_length: Inches(pick(dims.lap_length_in, d.lap_length.0)),
        }
    }
}

/// Steel quantities from a pile take-off, before wastage and steel factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PileSteel {
    pub main: Kilograms,
    pub spiral: Kilograms,
    /// Number of spiral turns
    pub spiral_turns: f64,
}

impl PileSteel {
    pub fn total(&self) -> Kilograms {
        self.main + self.spiral
    }
}

/// Compute main bar and spiral steel for a pile of `diameter` and `length`.
pub fn pile_take_off(diameter: Feet, length: Feet, reo: &PileReinforcement) -> PileSteel {
    let lap: Feet = reo.lap_length.into();
    let main_wpf = bar_unit_weight(reo.main_bar_dia).unwrap_or(FALLBACK_MAIN_BAR_WEIGHT);
    let main = Kilograms(reo.main_bar_count * (length + lap).0 * main_wpf);

    let cover: Feet = reo.clear_cover.into();
    let clear_diameter = (diameter - cover * 2.0).0.max(0.0);
    let circumference = PI * clear_diameter;
    let pitch: Feet = reo.stirrup_spacing.into();
    let spiral_turns = if pitch.0 > 0.0 { (length.0 / pitch.0).ceil() } else { 0.0 };
    let stirrup_wpf = bar_unit_weight(reo.stirrup_dia).unwrap_or(FALLBACK_STIRRUP_WEIGHT);
    let spiral = Kilograms(spiral_turns * circumference * stirrup_wpf);

    PileSteel {
        main,
        spiral,
        spiral_turns,
    }
}
