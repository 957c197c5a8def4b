//! # Dimension Input
//!
//! Raw geometry and reinforcement detail for one estimate entry, and the
//! normalization that turns it into a fully populated value before any
//! arithmetic happens.
//!
//! Forms collect text; [`RawDimensions`] holds that text,
//! [`validate_dimensions`] checks the fields an item type needs, and
//! [`DimensionsInput::from_raw`] coerces it the way a lenient form does
//! (blank or unparseable becomes unset).
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "length": 20.0,
//!   "width": 15.0,
//!   "thickness": 0.5,
//!   "quantity": 1,
//!   "multiple": 2
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::{ItemDefinition, MeasurementMode};
use crate::errors::{CalcError, CalcResult};

/// Dimensions as supplied by the caller.
///
/// Lengths are feet unless the item type says otherwise (see
/// [`labels`](crate::labels)). Everything except `length` is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionsInput {
    pub length: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,

    /// Number of identical elements
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,

    /// Repeat count (e.g., number of floors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple: Option<f64>,

    /// Pile main bars (nos)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_bar_count: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_bar_dia_mm: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stirrup_dia_mm: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stirrup_spacing_in: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub clear_cover_in: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lap_length_in: Option<f64>,
}

impl DimensionsInput {
    pub fn new(length: f64) -> Self {
        DimensionsInput {
            length,
            ..Default::default()
        }
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = Some(thickness);
        self
    }

    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_multiple(mut self, multiple: f64) -> Self {
        self.multiple = Some(multiple);
        self
    }

    /// Set pile reinforcement detail: bar count, bar and stirrup diameters
    /// (mm), stirrup spacing, clear cover and lap length (inches).
    pub fn with_pile_reinforcement(
        mut self,
        main_bar_count: f64,
        main_bar_dia_mm: f64,
        stirrup_dia_mm: f64,
        stirrup_spacing_in: f64,
        clear_cover_in: f64,
        lap_length_in: f64,
    ) -> Self {
        self.main_bar_count = Some(main_bar_count);
        self.main_bar_dia_mm = Some(main_bar_dia_mm);
        self.stirrup_dia_mm = Some(stirrup_dia_mm);
        self.stirrup_spacing_in = Some(stirrup_spacing_in);
        self.clear_cover_in = Some(clear_cover_in);
        self.lap_length_in = Some(lap_length_in);
        self
    }

    /// Coerce form text into dimensions. Blank or unparseable fields are unset.
    pub fn from_raw(raw: &RawDimensions) -> Self {
        DimensionsInput {
            length: parse_dimension(&raw.length).unwrap_or(0.0),
            width: parse_dimension(&raw.width),
            height: parse_dimension(&raw.height),
            thickness: parse_dimension(&raw.thickness),
            quantity: parse_dimension(&raw.quantity),
            multiple: parse_dimension(&raw.multiple),
            main_bar_count: parse_dimension(&raw.main_bar_count),
            main_bar_dia_mm: parse_dimension(&raw.main_bar_dia_mm),
            stirrup_dia_mm: parse_dimension(&raw.stirrup_dia_mm),
            stirrup_spacing_in: parse_dimension(&raw.stirrup_spacing_in),
            clear_cover_in: parse_dimension(&raw.clear_cover_in),
            lap_length_in: parse_dimension(&raw.lap_length_in),
        }
    }

    /// Produce the fully populated value the engine computes with.
    ///
    /// Missing, negative or non-finite values become 0; quantity and
    /// multiple become 1 unless positive.
    pub fn normalize(&self) -> NormalizedDimensions {
        NormalizedDimensions {
            length: non_negative(Some(self.length)),
            width: non_negative(self.width),
            height: non_negative(self.height),
            thickness: non_negative(self.thickness),
            quantity: positive_or_one(self.quantity),
            multiple: positive_or_one(self.multiple),
            main_bar_count: non_negative(self.main_bar_count),
            main_bar_dia_mm: non_negative(self.main_bar_dia_mm),
            stirrup_dia_mm: non_negative(self.stirrup_dia_mm),
            stirrup_spacing_in: non_negative(self.stirrup_spacing_in),
            clear_cover_in: non_negative(self.clear_cover_in),
            lap_length_in: non_negative(self.lap_length_in),
        }
    }
}

/// Dimensions with every field populated. Zero means "not given" for the
/// geometry and reinforcement fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedDimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub thickness: f64,
    pub quantity: f64,
    pub multiple: f64,
    pub main_bar_count: f64,
    pub main_bar_dia_mm: f64,
    pub stirrup_dia_mm: f64,
    pub stirrup_spacing_in: f64,
    pub clear_cover_in: f64,
    pub lap_length_in: f64,
}

impl NormalizedDimensions {
    /// `quantity x multiple`
    pub fn multiplier(&self) -> f64 {
        self.quantity * self.multiple
    }

    /// Member length along its axis: height if given, else length.
    pub fn run_length(&self) -> f64 {
        first_positive(&[self.height, self.length])
    }
}

/// Dimension text as typed into a form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawDimensions {
    pub length: String,
    pub width: String,
    pub height: String,
    pub thickness: String,
    pub quantity: String,
    pub multiple: String,
    pub main_bar_count: String,
    pub main_bar_dia_mm: String,
    pub stirrup_dia_mm: String,
    pub stirrup_spacing_in: String,
    pub clear_cover_in: String,
    pub lap_length_in: String,
}

/// Parse one dimension field. Returns `None` for blank, non-numeric,
/// negative or non-finite text.
pub fn parse_dimension(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// Check that the fields an item type needs are present and numeric.
///
/// - Wall items need length and height.
/// - Area items need length and width.
/// - Everything else needs length, width, and height or thickness.
///
/// Any non-blank field that fails to parse is rejected as well.
pub fn validate_dimensions(def: Option<&ItemDefinition>, raw: &RawDimensions) -> CalcResult<()> {
    let fields = [
        ("length", &raw.length),
        ("width", &raw.width),
        ("height", &raw.height),
        ("thickness", &raw.thickness),
        ("quantity", &raw.quantity),
        ("multiple", &raw.multiple),
        ("main_bar_count", &raw.main_bar_count),
        ("main_bar_dia_mm", &raw.main_bar_dia_mm),
        ("stirrup_dia_mm", &raw.stirrup_dia_mm),
        ("stirrup_spacing_in", &raw.stirrup_spacing_in),
        ("clear_cover_in", &raw.clear_cover_in),
        ("lap_length_in", &raw.lap_length_in),
    ];
    for (field, text) in fields {
        if !text.trim().is_empty() && parse_dimension(text).is_none() {
            return Err(CalcError::invalid_input(
                field,
                text.as_str(),
                "Must be a non-negative number",
            ));
        }
    }

    let present = |text: &str| parse_dimension(text).is_some();
    let require = |field: &str, text: &str| {
        if present(text) {
            Ok(())
        } else {
            Err(CalcError::missing_field(field))
        }
    };

    require("length", raw.length.as_str())?;
    match def.map(|d| d.mode) {
        Some(MeasurementMode::Wall) => require("height", raw.height.as_str()),
        Some(MeasurementMode::Area) => require("width", raw.width.as_str()),
        _ => {
            require("width", raw.width.as_str())?;
            if present(raw.height.as_str()) || present(raw.thickness.as_str()) {
                Ok(())
            } else {
                Err(CalcError::missing_field("height"))
            }
        }
    }
}

/// First strictly positive value, or 0.
pub(crate) fn first_positive(values: &[f64]) -> f64 {
    values.iter().copied().find(|v| *v > 0.0).unwrap_or(0.0)
}

/// The value if positive, else 1.
pub(crate) fn or_one(value: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        1.0
    }
}

fn non_negative(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

fn positive_or_one(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 1.0,
    }
}
