//! # Unit Labels
//!
//! Tells a form which unit each dimension field is entered in for a given
//! item type. Drawings give member cross-sections and pile diameters in
//! inches, so a handful of item types report "in" for some fields; fields
//! an item does not use report "-".
//!
//! ## Example
//!
//! ```rust
//! use boq_core::catalog::Catalog;
//! use boq_core::labels::{get_unit_label, DimensionField, UnitLabel};
//!
//! let catalog = Catalog::standard();
//! assert_eq!(get_unit_label(catalog, "pile", DimensionField::Width), UnitLabel::Inches);
//! assert_eq!(get_unit_label(catalog, "brick_wall", DimensionField::Width).as_str(), "-");
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, MeasurementMode};

/// Items whose plan dimensions (length, width) are entered in inches.
const PLAN_IN_INCHES: [&str; 3] = ["column", "beam", "lintel"];

/// Items whose thickness is entered in inches.
const THICKNESS_IN_INCHES: [&str; 2] = ["footing", "pile_cap"];

/// A dimension field on the entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionField {
    Length,
    Width,
    Height,
    Thickness,
}

impl DimensionField {
    pub const ALL: [DimensionField; 4] = [
        DimensionField::Length,
        DimensionField::Width,
        DimensionField::Height,
        DimensionField::Thickness,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DimensionField::Length => "length",
            DimensionField::Width => "width",
            DimensionField::Height => "height",
            DimensionField::Thickness => "thickness",
        }
    }
}

/// Display unit for a dimension field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitLabel {
    #[serde(rename = "ft")]
    Feet,
    #[serde(rename = "in")]
    Inches,
    /// Field is not used by this item
    #[serde(rename = "-")]
    NotApplicable,
}

impl UnitLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitLabel::Feet => "ft",
            UnitLabel::Inches => "in",
            UnitLabel::NotApplicable => "-",
        }
    }
}

impl std::fmt::Display for UnitLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the display unit of `field` for item `item_id`.
///
/// Rules are applied in order and the first match wins. Unknown items
/// report feet for every field.
pub fn get_unit_label(catalog: &Catalog, item_id: &str, field: DimensionField) -> UnitLabel {
    use DimensionField::*;

    let Some(def) = catalog.find_item_def(item_id) else {
        return UnitLabel::Feet;
    };

    if def.id == "pile" {
        // width carries the diameter
        return match field {
            Width => UnitLabel::Inches,
            Length | Height => UnitLabel::Feet,
            Thickness => UnitLabel::NotApplicable,
        };
    }

    if THICKNESS_IN_INCHES.contains(&def.id.as_str()) && field == Thickness {
        return UnitLabel::Inches;
    }

    if PLAN_IN_INCHES.contains(&def.id.as_str()) {
        return match field {
            Length | Width => UnitLabel::Inches,
            Height => UnitLabel::Feet,
            Thickness => UnitLabel::NotApplicable,
        };
    }

    match (def.mode, field) {
        (MeasurementMode::Area, Height) => UnitLabel::NotApplicable,
        (MeasurementMode::Area, Thickness) if !def.has_default_thickness() => UnitLabel::NotApplicable,
        (MeasurementMode::Wall, Width) => UnitLabel::NotApplicable,
        _ => UnitLabel::Feet,
    }
}
