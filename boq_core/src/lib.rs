//! # boq_core - Construction Quantity Estimation Engine
//!
//! `boq_core` turns item dimensions into a bill of quantities: concrete and
//! mortar volumes, cement bags, sand, aggregate, bricks, reinforcement steel,
//! labor and cost. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Item computation is a pure function of catalog, dimensions and rates
//! - **Forgiving**: Unknown items and bad numbers degrade to zeros, never errors
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types where errors can happen (input forms, files)
//!
//! ## Quick Start
//!
//! ```rust
//! use boq_core::calculations::{compute_item, DimensionsInput};
//! use boq_core::catalog::Catalog;
//! use boq_core::rates::EstimationRates;
//!
//! let dims = DimensionsInput::new(10.0).with_width(10.0).with_thickness(0.5);
//! let result = compute_item(Catalog::standard(), "slab", &dims, &EstimationRates::default());
//!
//! assert!((result.materials.volume - 50.0).abs() < 1e-9);
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Item types and their categories
//! - [`labels`] - Unit labels for dimension inputs
//! - [`rates`] - Prices, mixes and percentages
//! - [`calculations`] - Geometry, materials, costs and totals
//! - [`estimate`] - Project container with items, summary and listing
//! - [`file_io`] - Atomic saves and exports
//! - [`config`] - Rates files (JSON/TOML)
//! - [`format`] - Currency display
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod estimate;
pub mod file_io;
pub mod format;
pub mod labels;
pub mod rates;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{compute_item, compute_project_totals, DimensionsInput, ItemComputationResult, ProjectTotals};
pub use catalog::{find_item_def, Catalog, ItemDefinition, MeasurementMode};
pub use errors::{CalcError, CalcResult};
pub use estimate::{Estimate, EstimateEntry};
pub use file_io::{export_estimate, load_estimate, save_estimate};
pub use labels::get_unit_label;
pub use rates::EstimationRates;
