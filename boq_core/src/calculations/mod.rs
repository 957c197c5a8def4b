//! # Quantity and Cost Calculations
//!
//! Every calculation here is a pure function over plain data:
//!
//! - [`DimensionsInput`] - Entry geometry (JSON-serializable)
//! - [`ItemComputationResult`] - Quantities and costs (JSON-serializable)
//! - [`compute_item`] - One entry, never fails
//! - [`compute_project_totals`] - Roll-up over item subtotals
//!
//! ## Modules
//!
//! - [`dimensions`] - Input parsing, validation and normalization
//! - [`geometry`] - Volume/area/brick measurement per item type
//! - [`reinforcement`] - Pile main bar and spiral take-off
//! - [`materials`] - Mix-ratio split and steel
//! - [`item`] - The full per-item pipeline
//! - [`totals`] - Overhead, profit and tax roll-up

pub mod dimensions;
pub mod geometry;
pub mod item;
pub mod materials;
pub mod reinforcement;
pub mod totals;

// Re-export commonly used types
pub use dimensions::{parse_dimension, validate_dimensions, DimensionsInput, NormalizedDimensions, RawDimensions};
pub use geometry::{Geometry, GeometryStrategy};
pub use item::{compute_item, ComputedMaterials, ItemComputationResult, ItemCosts};
pub use reinforcement::{PileReinforcement, PileSteel};
pub use totals::{compute_project_totals, ProjectTotals};
