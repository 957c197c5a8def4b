//! # Item Catalog
//!
//! The catalog is the fixed table of item types an estimate can contain,
//! grouped into categories for browsing. Every item carries a
//! [`MeasurementMode`] that selects how its geometry is measured and which
//! material derivation applies.
//!
//! A [`Catalog`] is immutable once built. The computation functions borrow
//! it, so callers can supply their own table or use [`Catalog::standard`].
//!
//! ## Example
//!
//! ```rust
//! use boq_core::catalog::{Catalog, MeasurementMode};
//!
//! let catalog = Catalog::standard();
//! let slab = catalog.find_item_def("slab").unwrap();
//! assert_eq!(slab.mode, MeasurementMode::Volume);
//! assert_eq!(slab.default_thickness, Some(0.42));
//! ```

mod standard;

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

pub use standard::standard_categories;

static STANDARD_CATALOG: Lazy<Catalog> = Lazy::new(|| Catalog::build(standard_categories()));

/// How an item is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementMode {
    /// Solid concrete measured in cubic feet
    Volume,
    /// Walls measured as length x height with a thickness
    Wall,
    /// Surface finishes and services measured in square feet or points
    Area,
}

impl MeasurementMode {
    /// All modes in display order
    pub const ALL: [MeasurementMode; 3] = [
        MeasurementMode::Volume,
        MeasurementMode::Wall,
        MeasurementMode::Area,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            MeasurementMode::Volume => "Volume",
            MeasurementMode::Wall => "Wall",
            MeasurementMode::Area => "Area",
        }
    }
}

/// Definition of one item type.
///
/// `cement`, `sand` and `aggregate` are legacy per-unit coefficients kept for
/// display; quantities are derived from the mix ratios in
/// [`EstimationRates`](crate::rates::EstimationRates). `steel` is the generic
/// reinforcement coefficient in kg per cft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Unique key (e.g., "pile_cap")
    pub id: String,

    /// Display name (e.g., "Pile Cap")
    pub name: String,

    /// Display unit for the primary measurement (cft, sft, point, unit)
    pub unit: String,

    pub mode: MeasurementMode,

    /// Bags per cft
    pub cement: f64,

    /// Cft per cft
    pub sand: f64,

    /// Cft per cft
    pub aggregate: f64,

    /// Kg per cft
    pub steel: f64,

    /// Implied thickness or depth in feet when the user gives none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_thickness: Option<f64>,

    /// Masonry units per cft, used when the rates carry no density
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brick_per_cft: Option<f64>,
}

impl ItemDefinition {
    /// Create a definition with all coefficients zero.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        unit: impl Into<String>,
        mode: MeasurementMode,
    ) -> Self {
        ItemDefinition {
            id: id.into(),
            name: name.into(),
            unit: unit.into(),
            mode,
            cement: 0.0,
            sand: 0.0,
            aggregate: 0.0,
            steel: 0.0,
            default_thickness: None,
            brick_per_cft: None,
        }
    }

    /// Set the cement/sand/aggregate/steel coefficients.
    pub fn with_coefficients(mut self, cement: f64, sand: f64, aggregate: f64, steel: f64) -> Self {
        self.cement = cement;
        self.sand = sand;
        self.aggregate = aggregate;
        self.steel = steel;
        self
    }

    pub fn with_default_thickness(mut self, thickness_ft: f64) -> Self {
        self.default_thickness = Some(thickness_ft);
        self
    }

    pub fn with_brick_per_cft(mut self, bricks: f64) -> Self {
        self.brick_per_cft = Some(bricks);
        self
    }

    /// Default thickness in feet, or 0 when none is defined.
    pub fn default_thickness_ft(&self) -> f64 {
        self.default_thickness.unwrap_or(0.0)
    }

    /// True when a non-zero default thickness exists.
    pub fn has_default_thickness(&self) -> bool {
        self.default_thickness_ft() > 0.0
    }

    fn validate(&self) -> CalcResult<()> {
        if self.id.trim().is_empty() {
            return Err(CalcError::invalid_input("id", &self.id, "Item id cannot be empty"));
        }
        let coefficients = [
            ("cement", self.cement),
            ("sand", self.sand),
            ("aggregate", self.aggregate),
            ("steel", self.steel),
            ("default_thickness", self.default_thickness_ft()),
            ("brick_per_cft", self.brick_per_cft.unwrap_or(0.0)),
        ];
        for (field, value) in coefficients {
            if !value.is_finite() || value < 0.0 {
                return Err(CalcError::invalid_input(
                    format!("{}.{}", self.id, field),
                    value.to_string(),
                    "Coefficients must be non-negative",
                ));
            }
        }
        Ok(())
    }
}

/// A named, ordered group of item definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Stable key (e.g., "foundation")
    pub key: String,

    /// Display label (e.g., "Foundation Works")
    pub label: String,

    pub items: Vec<ItemDefinition>,
}

impl Category {
    pub fn new(key: impl Into<String>, label: impl Into<String>, items: Vec<ItemDefinition>) -> Self {
        Category {
            key: key.into(),
            label: label.into(),
            items,
        }
    }
}

/// Immutable item table with an id index.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
    /// id -> (category index, item index)
    index: HashMap<String, (usize, usize)>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and negative coefficients.
    pub fn new(categories: Vec<Category>) -> CalcResult<Self> {
        let mut seen = HashSet::new();
        for category in &categories {
            for item in &category.items {
                item.validate()?;
                if !seen.insert(item.id.as_str()) {
                    return Err(CalcError::invalid_input(
                        "id",
                        &item.id,
                        "Item ids must be unique across categories",
                    ));
                }
            }
        }
        Ok(Self::build(categories))
    }

    fn build(categories: Vec<Category>) -> Self {
        let mut index = HashMap::new();
        for (ci, category) in categories.iter().enumerate() {
            for (ii, item) in category.items.iter().enumerate() {
                index.entry(item.id.clone()).or_insert((ci, ii));
            }
        }
        Catalog { categories, index }
    }

    /// The built-in item table, constructed on first use.
    pub fn standard() -> &'static Catalog {
        &STANDARD_CATALOG
    }

    /// Look up an item definition by id.
    ///
    /// Returns `None` for an empty or unknown id; callers then fall back to
    /// generic box geometry.
    pub fn find_item_def(&self, id: &str) -> Option<&ItemDefinition> {
        if id.is_empty() {
            return None;
        }
        self.index
            .get(id)
            .map(|&(ci, ii)| &self.categories[ci].items[ii])
    }

    /// The category that contains `id`.
    pub fn category_of(&self, id: &str) -> Option<&Category> {
        self.index.get(id).map(|&(ci, _)| &self.categories[ci])
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// All definitions, flattened in category order.
    pub fn items(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.categories.iter().flat_map(|c| c.items.iter())
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Look up an item in the standard catalog.
pub fn find_item_def(id: &str) -> Option<&'static ItemDefinition> {
    Catalog::standard().find_item_def(id)
}
