//! Built-in item table.
//!
//! Thicknesses are in feet. Steel coefficients are kg per cft of concrete.

use super::{Category, ItemDefinition, MeasurementMode};

use MeasurementMode::{Area, Volume, Wall};

/// The standard categories, in display order.
pub fn standard_categories() -> Vec<Category> {
    vec![
        Category::new("foundation", "Foundation Works", foundation()),
        Category::new("structure", "Structural Works", structure()),
        Category::new("masonry", "Masonry Works", masonry()),
        Category::new("finishing", "Finishing Works", finishing()),
        Category::new("utilities", "Utility Works", utilities()),
        Category::new("custom", "Custom", custom()),
    ]
}

fn foundation() -> Vec<ItemDefinition> {
    vec![
        ItemDefinition::new("pile", "Pile", "cft", Volume).with_coefficients(0.38, 1.6, 3.2, 200.0),
        ItemDefinition::new("pile_cap", "Pile Cap", "cft", Volume)
            .with_coefficients(0.35, 1.5, 3.0, 110.0)
            .with_default_thickness(2.0),
        ItemDefinition::new("mat_foundation", "Mat Foundation", "cft", Volume)
            .with_coefficients(0.36, 1.6, 3.1, 110.0)
            .with_default_thickness(1.5),
        ItemDefinition::new("footing", "Isolated Footing", "cft", Volume)
            .with_coefficients(0.35, 1.5, 3.0, 100.0),
        ItemDefinition::new("combined_footing", "Combined Footing", "cft", Volume)
            .with_coefficients(0.35, 1.5, 3.0, 110.0),
        ItemDefinition::new("strap_footing", "Strap Footing", "cft", Volume)
            .with_coefficients(0.35, 1.5, 3.0, 110.0),
        ItemDefinition::new("strip_footing", "Strip Footing", "cft", Volume)
            .with_coefficients(0.34, 1.5, 2.9, 110.0),
        ItemDefinition::new("raft", "Raft Foundation", "cft", Volume)
            .with_coefficients(0.36, 1.6, 3.1, 110.0)
            .with_default_thickness(1.5),
        ItemDefinition::new("retaining_wall", "Retaining Wall", "sft", Wall)
            .with_coefficients(0.0, 0.0, 0.0, 140.0)
            .with_default_thickness(0.75)
            .with_brick_per_cft(0.0),
        ItemDefinition::new("water_reservoir", "UG Water Reservoir", "cft", Volume)
            .with_default_thickness(0.58),
        ItemDefinition::new("septic_tank", "Septic Tank", "cft", Volume).with_default_thickness(0.83),
    ]
}

fn structure() -> Vec<ItemDefinition> {
    vec![
        ItemDefinition::new("column", "Column", "cft", Volume).with_coefficients(0.38, 1.5, 2.8, 180.0),
        ItemDefinition::new("beam", "Beam", "cft", Volume).with_coefficients(0.36, 1.5, 2.8, 160.0),
        ItemDefinition::new("slab", "Slab", "cft", Volume)
            .with_coefficients(0.32, 1.4, 2.4, 90.0)
            .with_default_thickness(0.42),
        ItemDefinition::new("stair", "Stair", "cft", Volume).with_coefficients(0.35, 1.5, 3.0, 120.0),
        ItemDefinition::new("lintel", "Lintel", "cft", Volume).with_coefficients(0.34, 1.5, 2.8, 80.0),
        ItemDefinition::new("lift_core", "Lift Core", "cft", Wall).with_default_thickness(0.67),
        ItemDefinition::new("overhead_tank", "Overhead Tank", "cft", Volume).with_default_thickness(0.67),
    ]
}

fn masonry() -> Vec<ItemDefinition> {
    vec![
        ItemDefinition::new("brick_wall", "Brick Wall", "sft", Wall)
            .with_default_thickness(0.33)
            .with_brick_per_cft(500.0),
        ItemDefinition::new("block_wall", "Block Wall", "sft", Wall)
            .with_default_thickness(0.5)
            .with_brick_per_cft(280.0),
        ItemDefinition::new("partition", "Partition Wall", "sft", Wall)
            .with_default_thickness(0.25)
            .with_brick_per_cft(450.0),
    ]
}

fn finishing() -> Vec<ItemDefinition> {
    vec![
        ItemDefinition::new("plaster", "Plaster Work", "sft", Area)
            .with_coefficients(0.35, 1.5, 0.0, 0.0)
            .with_default_thickness(0.05),
        ItemDefinition::new("tiles", "Tile Work", "sft", Area)
            .with_coefficients(0.25, 1.0, 0.0, 0.0)
            .with_default_thickness(0.03),
        ItemDefinition::new("paint", "Paint Work", "sft", Area).with_default_thickness(0.0),
    ]
}

fn utilities() -> Vec<ItemDefinition> {
    vec![
        ItemDefinition::new("plumbing", "Plumbing Work", "point", Area),
        ItemDefinition::new("electrical", "Electrical Work", "point", Area),
        ItemDefinition::new("hvac", "HVAC Work", "point", Area),
    ]
}

fn custom() -> Vec<ItemDefinition> {
    vec![ItemDefinition::new("custom", "Custom Item", "unit", Volume).with_coefficients(0.35, 1.5, 3.0, 120.0)]
}
