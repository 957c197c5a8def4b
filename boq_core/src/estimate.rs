//! # Estimate
//!
//! An [`Estimate`] is the root container for one project's bill of
//! quantities. It is saved as a flat JSON snapshot (see [`file_io`](crate::file_io)).
//!
//! ## Structure
//!
//! ```text
//! Estimate
//! ├── project_name
//! ├── client: ClientInfo
//! ├── rates: EstimationRates
//! └── items: Vec<EstimateEntry> (dimensions + computed result, in entry order)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use boq_core::calculations::DimensionsInput;
//! use boq_core::catalog::Catalog;
//! use boq_core::estimate::Estimate;
//!
//! let catalog = Catalog::standard();
//! let mut estimate = Estimate::new("Duplex, Plot 12");
//! estimate.add_dimensions(catalog, "slab", DimensionsInput::new(20.0).with_width(15.0).with_thickness(0.5), None);
//!
//! let totals = estimate.totals();
//! assert!(totals.grand_total > totals.subtotal);
//! ```

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{
    compute_item, compute_project_totals, validate_dimensions, DimensionsInput, ItemComputationResult,
    ProjectTotals, RawDimensions,
};
use crate::catalog::Catalog;
use crate::errors::{CalcError, CalcResult};
use crate::rates::EstimationRates;

/// Category label for entries whose type is not in the catalog
pub const UNCATEGORIZED: &str = "Other";

/// Type name for entries whose type is not in the catalog
pub const CUSTOM_TYPE_NAME: &str = "Custom Item";

/// Client contact details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientInfo {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

/// One line of the bill of quantities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateEntry {
    pub id: Uuid,

    /// Display code, e.g. "SLAB-003"
    pub code: String,

    /// Catalog id
    pub item_type: String,

    /// Catalog display name
    pub type_name: String,

    /// Catalog category label
    pub category: String,

    pub description: String,

    pub dimensions: DimensionsInput,

    pub result: ItemComputationResult,

    pub created_at: DateTime<Utc>,
}

impl EstimateEntry {
    pub fn subtotal(&self) -> f64 {
        self.result.costs.subtotal
    }

    pub fn total(&self) -> f64 {
        self.result.total_with_adjustments
    }
}

/// Root estimate container.
///
/// Every field is optional in a snapshot; missing ones take the values of
/// [`Estimate::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Estimate {
    pub project_name: String,
    pub client: ClientInfo,
    pub rates: EstimationRates,
    pub items: Vec<EstimateEntry>,
}

impl Default for Estimate {
    fn default() -> Self {
        Estimate::new("Untitled Project")
    }
}

impl Estimate {
    /// Create an empty estimate with default rates.
    pub fn new(project_name: impl Into<String>) -> Self {
        Estimate {
            project_name: project_name.into(),
            client: ClientInfo::default(),
            rates: EstimationRates::default(),
            items: Vec::new(),
        }
    }

    /// Validate form text, compute the entry and append it.
    ///
    /// Returns the new entry's id.
    ///
    /// # Errors
    ///
    /// * `MissingField` - no item type, or a dimension the type needs is blank
    /// * `InvalidInput` - a dimension is not a non-negative number
    pub fn add_item(
        &mut self,
        catalog: &Catalog,
        item_type: &str,
        raw: &RawDimensions,
        description: Option<&str>,
    ) -> CalcResult<Uuid> {
        if item_type.trim().is_empty() {
            return Err(CalcError::missing_field("item_type"));
        }
        validate_dimensions(catalog.find_item_def(item_type), raw)?;

        let description = description
            .filter(|d| !d.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| {
                default_description(catalog, item_type, &raw.length, &raw.width, &raw.height)
            });
        Ok(self.push_entry(catalog, item_type, DimensionsInput::from_raw(raw), description))
    }

    /// Compute and append an entry from already-typed dimensions.
    pub fn add_dimensions(
        &mut self,
        catalog: &Catalog,
        item_type: &str,
        dimensions: DimensionsInput,
        description: Option<&str>,
    ) -> Uuid {
        let description = match description {
            Some(d) if !d.trim().is_empty() => d.to_string(),
            _ => default_description(
                catalog,
                item_type,
                &dimensions.length.to_string(),
                &dimensions.width.unwrap_or(0.0).to_string(),
                &dimensions.height.unwrap_or(0.0).to_string(),
            ),
        };
        self.push_entry(catalog, item_type, dimensions, description)
    }

    fn push_entry(
        &mut self,
        catalog: &Catalog,
        item_type: &str,
        dimensions: DimensionsInput,
        description: String,
    ) -> Uuid {
        let result = compute_item(catalog, item_type, &dimensions, &self.rates);
        let entry = EstimateEntry {
            id: Uuid::new_v4(),
            code: format!("{}-{:03}", item_type.to_uppercase(), self.next_sequence()),
            item_type: item_type.to_string(),
            type_name: type_name(catalog, item_type),
            category: category_label(catalog, item_type),
            description,
            dimensions,
            result,
            created_at: Utc::now(),
        };
        let id = entry.id;
        tracing::info!(code = %entry.code, subtotal = entry.subtotal(), "added estimate entry");
        self.items.push(entry);
        id
    }

    /// Next entry sequence number: one past the highest in use.
    ///
    /// Copies ("SLAB-001-COPY") carry no sequence of their own.
    fn next_sequence(&self) -> usize {
        self.items
            .iter()
            .filter_map(|e| e.code.rsplit('-').next()?.parse::<usize>().ok())
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Re-validate form text and recompute an existing entry in place.
    ///
    /// The entry keeps its id, code and creation time; type, category,
    /// description, dimensions and result are replaced.
    ///
    /// # Errors
    ///
    /// * `ItemNotFound` - no entry has `id`
    /// * `MissingField` / `InvalidInput` - as for [`Estimate::add_item`]
    pub fn update_item(
        &mut self,
        catalog: &Catalog,
        id: &Uuid,
        item_type: &str,
        raw: &RawDimensions,
        description: Option<&str>,
    ) -> CalcResult<()> {
        let index = self.index_of(id)?;
        if item_type.trim().is_empty() {
            return Err(CalcError::missing_field("item_type"));
        }
        validate_dimensions(catalog.find_item_def(item_type), raw)?;

        let dimensions = DimensionsInput::from_raw(raw);
        let result = compute_item(catalog, item_type, &dimensions, &self.rates);
        let entry = &mut self.items[index];
        entry.item_type = item_type.to_string();
        entry.type_name = type_name(catalog, item_type);
        entry.category = category_label(catalog, item_type);
        entry.description = description
            .filter(|d| !d.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| default_description(catalog, item_type, &raw.length, &raw.width, &raw.height));
        entry.dimensions = dimensions;
        entry.result = result;
        tracing::info!(code = %entry.code, subtotal = entry.subtotal(), "updated estimate entry");
        Ok(())
    }

    /// Append a copy of an entry with a new id and timestamp.
    ///
    /// The copy's code and description are marked "-COPY" and " (Copy)".
    pub fn duplicate_item(&mut self, id: &Uuid) -> CalcResult<Uuid> {
        let index = self.index_of(id)?;
        let source = &self.items[index];
        let copy = EstimateEntry {
            id: Uuid::new_v4(),
            code: format!("{}-COPY", source.code),
            description: format!("{} (Copy)", source.description),
            created_at: Utc::now(),
            ..source.clone()
        };
        let new_id = copy.id;
        tracing::info!(code = %copy.code, "duplicated estimate entry");
        self.items.push(copy);
        Ok(new_id)
    }

    fn index_of(&self, id: &Uuid) -> CalcResult<usize> {
        self.items
            .iter()
            .position(|e| &e.id == id)
            .ok_or_else(|| CalcError::item_not_found(id.to_string()))
    }

    /// Remove an entry by id.
    pub fn remove_item(&mut self, id: &Uuid) -> CalcResult<EstimateEntry> {
        let index = self.index_of(id)?;
        let removed = self.items.remove(index);
        tracing::info!(code = %removed.code, "removed estimate entry");
        Ok(removed)
    }

    pub fn get_item(&self, id: &Uuid) -> Option<&EstimateEntry> {
        self.items.iter().find(|e| &e.id == id)
    }

    /// Replace the rates and recompute every entry with them.
    pub fn set_rates(&mut self, catalog: &Catalog, rates: EstimationRates) {
        self.rates = rates;
        self.recompute(catalog);
    }

    /// Recompute every entry's result from its stored dimensions.
    pub fn recompute(&mut self, catalog: &Catalog) {
        for entry in &mut self.items {
            entry.result = compute_item(catalog, &entry.item_type, &entry.dimensions, &self.rates);
        }
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Item subtotals in entry order.
    pub fn subtotals(&self) -> Vec<f64> {
        self.items.iter().map(EstimateEntry::subtotal).collect()
    }

    /// Project totals over the item subtotals.
    pub fn totals(&self) -> ProjectTotals {
        compute_project_totals(&self.subtotals(), &self.rates)
    }

    /// Quantity and cost summary.
    pub fn summary(&self) -> ProjectSummary {
        let mut category_breakdown: BTreeMap<String, CategoryTally> = BTreeMap::new();
        for entry in &self.items {
            let tally = category_breakdown.entry(entry.category.clone()).or_default();
            tally.items += 1;
            tally.cost += entry.subtotal();
        }
        ProjectSummary {
            total_items: self.items.len(),
            total_volume: self.items.iter().map(|e| e.result.materials.volume).sum(),
            total_steel: self.items.iter().map(|e| e.result.materials.steel).sum(),
            total_cost: self.items.iter().map(EstimateEntry::subtotal).sum(),
            category_breakdown,
        }
    }

    /// Entries matching `filter`, ordered by `sort`.
    pub fn list(&self, filter: &ItemFilter, sort: SortKey) -> Vec<&EstimateEntry> {
        let mut entries: Vec<&EstimateEntry> = self.items.iter().filter(|e| filter.matches(e)).collect();
        entries.sort_by(|a, b| sort.compare(a, b));
        entries
    }

    /// Suggested file name for an export, e.g. "Duplex_Plot_12_estimate.json".
    ///
    /// Each run of whitespace becomes a single underscore.
    pub fn export_file_name(&self) -> String {
        let mut stem = String::with_capacity(self.project_name.len());
        let mut in_space = false;
        for c in self.project_name.chars() {
            if c.is_whitespace() {
                if !in_space {
                    stem.push('_');
                }
                in_space = true;
            } else {
                stem.push(c);
                in_space = false;
            }
        }
        format!("{}_estimate.json", stem)
    }
}

/// Quantity and cost summary of an estimate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub total_items: usize,
    /// cft
    pub total_volume: f64,
    /// kg
    pub total_steel: f64,
    /// Sum of item subtotals
    pub total_cost: f64,
    pub category_breakdown: BTreeMap<String, CategoryTally>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryTally {
    pub items: usize,
    pub cost: f64,
}

/// Entry filter: case-insensitive text search plus an optional category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemFilter {
    /// Matched against description, type name and code
    pub search: String,
    /// Category label; `None` for all
    pub category: Option<String>,
}

impl ItemFilter {
    pub fn matches(&self, entry: &EstimateEntry) -> bool {
        let needle = self.search.to_lowercase();
        let text_match = needle.is_empty()
            || entry.description.to_lowercase().contains(&needle)
            || entry.type_name.to_lowercase().contains(&needle)
            || entry.code.to_lowercase().contains(&needle);
        let category_match = self.category.as_ref().map_or(true, |c| &entry.category == c);
        text_match && category_match
    }
}

/// Ordering for [`Estimate::list`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Most recent first
    #[default]
    Newest,
    /// Highest adjusted total first
    Cost,
    /// Largest volume first
    Volume,
    /// Type name, A-Z
    Type,
}

impl SortKey {
    fn compare(&self, a: &EstimateEntry, b: &EstimateEntry) -> Ordering {
        match self {
            SortKey::Newest => b.created_at.cmp(&a.created_at),
            SortKey::Cost => b.total().total_cmp(&a.total()),
            SortKey::Volume => b.result.materials.volume.total_cmp(&a.result.materials.volume),
            SortKey::Type => a.type_name.cmp(&b.type_name),
        }
    }
}

fn type_name(catalog: &Catalog, item_type: &str) -> String {
    catalog
        .find_item_def(item_type)
        .map_or(CUSTOM_TYPE_NAME, |d| d.name.as_str())
        .to_string()
}

fn category_label(catalog: &Catalog, item_type: &str) -> String {
    catalog
        .category_of(item_type)
        .map_or(UNCATEGORIZED, |c| c.label.as_str())
        .to_string()
}

fn default_description(catalog: &Catalog, item_type: &str, length: &str, width: &str, height: &str) -> String {
    format!(
        "{} - {}' × {}' × {}'",
        type_name(catalog, item_type),
        length.trim(),
        width.trim(),
        height.trim()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(length: &str, width: &str, height: &str, thickness: &str) -> RawDimensions {
        RawDimensions {
            length: length.to_string(),
            width: width.to_string(),
            height: height.to_string(),
            thickness: thickness.to_string(),
            ..Default::default()
        }
    }

    fn sample_estimate() -> Estimate {
        let catalog = Catalog::standard();
        let mut estimate = Estimate::new("Test Project");
        estimate.add_item(catalog, "slab", &raw("20", "15", "", "0.5"), None).unwrap();
        estimate.add_item(catalog, "brick_wall", &raw("30", "", "10", ""), Some("Boundary wall")).unwrap();
        estimate.add_item(catalog, "column", &raw("1", "1", "10", ""), None).unwrap();
        estimate
    }

    #[test]
    fn test_add_item_assigns_code_and_category() {
        let estimate = sample_estimate();
        assert_eq!(estimate.item_count(), 3);
        let slab = &estimate.items[0];
        assert_eq!(slab.code, "SLAB-001");
        assert_eq!(slab.type_name, "Slab");
        assert_eq!(slab.category, "Structural Works");
        assert_eq!(slab.description, "Slab - 20' × 15' × '");
        assert_eq!(estimate.items[1].code, "BRICK_WALL-002");
        assert_eq!(estimate.items[1].description, "Boundary wall");
    }

    #[test]
    fn test_add_item_validation() {
        let catalog = Catalog::standard();
        let mut estimate = Estimate::new("P");
        let err = estimate.add_item(catalog, "", &raw("1", "1", "1", ""), None).unwrap_err();
        assert_eq!(err, CalcError::missing_field("item_type"));
        let err = estimate.add_item(catalog, "brick_wall", &raw("30", "", "", ""), None).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(estimate.item_count(), 0);
    }

    #[test]
    fn test_unknown_type_is_uncategorized() {
        let catalog = Catalog::standard();
        let mut estimate = Estimate::new("P");
        estimate.add_dimensions(catalog, "gazebo", DimensionsInput::new(2.0).with_width(2.0).with_height(2.0), None);
        assert_eq!(estimate.items[0].category, UNCATEGORIZED);
        assert_eq!(estimate.items[0].type_name, CUSTOM_TYPE_NAME);
        assert!(estimate.items[0].description.starts_with("Custom Item - 2'"));
        assert_eq!(estimate.items[0].result.materials.volume, 8.0);
    }

    #[test]
    fn test_remove_item() {
        let mut estimate = sample_estimate();
        let id = estimate.items[1].id;
        let removed = estimate.remove_item(&id).unwrap();
        assert_eq!(removed.item_type, "brick_wall");
        assert_eq!(estimate.item_count(), 2);
        assert!(estimate.get_item(&id).is_none());
        assert_eq!(estimate.remove_item(&id).unwrap_err().error_code(), "ITEM_NOT_FOUND");
    }

    #[test]
    fn test_totals_use_subtotals() {
        let estimate = sample_estimate();
        let totals = estimate.totals();
        let sum: f64 = estimate.subtotals().iter().sum();
        assert!((totals.subtotal - sum).abs() < 1e-6);
        assert!((totals.grand_total - sum * 1.1 * 1.07 * 1.05).abs() < 1e-6);
    }

    #[test]
    fn test_set_rates_recomputes() {
        let catalog = Catalog::standard();
        let mut estimate = sample_estimate();
        let before = estimate.items[0].subtotal();
        let mut rates = EstimationRates::default();
        rates.labor = 0.0;
        rates.cement = 0.0;
        estimate.set_rates(catalog, rates);
        assert!(estimate.items[0].subtotal() < before);
        assert_eq!(estimate.items[0].result.costs.labor, 0.0);
    }

    #[test]
    fn test_summary() {
        let estimate = sample_estimate();
        let summary = estimate.summary();
        assert_eq!(summary.total_items, 3);
        assert_eq!(summary.category_breakdown["Structural Works"].items, 2);
        assert_eq!(summary.category_breakdown["Masonry Works"].items, 1);
        assert!((summary.total_cost - estimate.totals().subtotal).abs() < 1e-6);
        let volume: f64 = estimate.items.iter().map(|e| e.result.materials.volume).sum();
        assert!((summary.total_volume - volume).abs() < 1e-9);
    }

    #[test]
    fn test_list_filter_and_sort() {
        let estimate = sample_estimate();

        let walls = estimate.list(
            &ItemFilter {
                search: "BOUNDARY".to_string(),
                category: None,
            },
            SortKey::Newest,
        );
        assert_eq!(walls.len(), 1);

        let structural = estimate.list(
            &ItemFilter {
                search: String::new(),
                category: Some("Structural Works".to_string()),
            },
            SortKey::Type,
        );
        let names: Vec<_> = structural.iter().map(|e| e.type_name.as_str()).collect();
        assert_eq!(names, ["Column", "Slab"]);

        let by_volume = estimate.list(&ItemFilter::default(), SortKey::Volume);
        assert_eq!(by_volume[0].item_type, "slab");

        let by_cost = estimate.list(&ItemFilter::default(), SortKey::Cost);
        assert!(by_cost.windows(2).all(|w| w[0].total() >= w[1].total()));
    }

    #[test]
    fn test_export_file_name() {
        let estimate = Estimate::new("Duplex  Plot 12");
        assert_eq!(estimate.export_file_name(), "Duplex_Plot_12_estimate.json");
        let padded = Estimate::new(" Site\tB ");
        assert_eq!(padded.export_file_name(), "_Site_B__estimate.json");
    }

    #[test]
    fn test_update_item_keeps_identity() {
        let catalog = Catalog::standard();
        let mut estimate = sample_estimate();
        let before = estimate.items[2].clone();

        estimate
            .update_item(catalog, &before.id, "beam", &raw("1", "1.5", "20", ""), None)
            .unwrap();

        let after = estimate.get_item(&before.id).unwrap();
        assert_eq!(after.code, before.code);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.item_type, "beam");
        assert_eq!(after.type_name, "Beam");
        assert_eq!(after.category, "Structural Works");
        assert_eq!(after.description, "Beam - 1' × 1.5' × 20'");
        assert!((after.result.materials.volume - 30.0).abs() < 1e-9);
        assert_eq!(estimate.item_count(), 3);
    }

    #[test]
    fn test_update_item_errors() {
        let catalog = Catalog::standard();
        let mut estimate = sample_estimate();
        let err = estimate
            .update_item(catalog, &Uuid::new_v4(), "slab", &raw("1", "1", "1", ""), None)
            .unwrap_err();
        assert_eq!(err.error_code(), "ITEM_NOT_FOUND");

        let id = estimate.items[1].id;
        let before = estimate.items[1].clone();
        let err = estimate
            .update_item(catalog, &id, "brick_wall", &raw("30", "", "", ""), None)
            .unwrap_err();
        assert_eq!(err, CalcError::missing_field("height"));
        assert_eq!(estimate.items[1], before);
    }

    #[test]
    fn test_duplicate_item() {
        let mut estimate = sample_estimate();
        let source = estimate.items[1].clone();
        let copy_id = estimate.duplicate_item(&source.id).unwrap();

        assert_ne!(copy_id, source.id);
        let copy = estimate.get_item(&copy_id).unwrap();
        assert_eq!(copy.code, "BRICK_WALL-002-COPY");
        assert_eq!(copy.description, "Boundary wall (Copy)");
        assert_eq!(copy.result, source.result);
        assert_eq!(estimate.item_count(), 4);

        let err = estimate.duplicate_item(&Uuid::new_v4()).unwrap_err();
        assert_eq!(err.error_code(), "ITEM_NOT_FOUND");
    }

    #[test]
    fn test_codes_not_reused_after_removal() {
        let catalog = Catalog::standard();
        let mut estimate = sample_estimate();
        let first = estimate.items[0].id;
        estimate.duplicate_item(&first).unwrap();
        estimate.remove_item(&first).unwrap();

        estimate.add_item(catalog, "lintel", &raw("10", "1", "1", ""), None).unwrap();
        assert_eq!(estimate.items.last().unwrap().code, "LINTEL-004");
        let codes: std::collections::HashSet<_> = estimate.items.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes.len(), estimate.item_count());
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let estimate = sample_estimate();
        let json = serde_json::to_string_pretty(&estimate).unwrap();
        let roundtrip: Estimate = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.item_count(), 3);
        assert_eq!(roundtrip.items[1].id, estimate.items[1].id);
        assert_eq!(roundtrip.items[1].created_at, estimate.items[1].created_at);
        assert_eq!(roundtrip.items[2].dimensions, estimate.items[2].dimensions);
        assert!((roundtrip.totals().grand_total - estimate.totals().grand_total).abs() < 1e-6);
    }

    #[test]
    fn test_snapshot_without_rates_uses_defaults() {
        let json = r#"{ "project_name": "Old", "items": [] }"#;
        let estimate: Estimate = serde_json::from_str(json).unwrap();
        assert_eq!(estimate.rates, EstimationRates::default());
        assert_eq!(estimate.client, ClientInfo::default());
    }

    #[test]
    fn test_snapshot_without_project_name() {
        let estimate: Estimate = serde_json::from_str(r#"{ "items": [] }"#).unwrap();
        assert_eq!(estimate.project_name, "Untitled Project");
        assert_eq!(estimate.item_count(), 0);
    }
}
