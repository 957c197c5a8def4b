//! # BOQ CLI Application
//!
//! Terminal front-end for the estimation engine.
//!
//! ```text
//! boq_cli <estimate.json> [--rates <file>] [--export <file>]
//! boq_cli                 (interactive single-item estimate)
//! ```
//!
//! Set `RUST_LOG=boq_core=debug` to trace each computation.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use boq_core::calculations::{compute_item, DimensionsInput, ItemComputationResult};
use boq_core::catalog::Catalog;
use boq_core::config::load_rates_or_default;
use boq_core::estimate::Estimate;
use boq_core::file_io::{export_estimate, load_estimate};
use boq_core::format::format_currency_bdt;
use boq_core::labels::{get_unit_label, DimensionField};
use boq_core::CalcResult;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Args {
    estimate: Option<PathBuf>,
    rates: Option<PathBuf>,
    export: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--rates" => parsed.rates = Some(args.next().ok_or("--rates needs a file")?.into()),
            "--export" => parsed.export = Some(args.next().ok_or("--export needs a file")?.into()),
            flag if flag.starts_with("--") => return Err(format!("unknown option {}", flag)),
            path if parsed.estimate.is_none() => parsed.estimate = Some(path.into()),
            extra => return Err(format!("unexpected argument {}", extra)),
        }
    }
    Ok(parsed)
}

fn prompt_line(prompt: &str) -> String {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return String::new();
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_string()
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    prompt_line(prompt).parse().unwrap_or(default)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            eprintln!("Usage: boq_cli [<estimate.json>] [--rates <file>] [--export <file>]");
            return ExitCode::from(2);
        }
    };

    let outcome = match &args.estimate {
        Some(path) => run_report(path, &args),
        None => run_interactive(&args),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn run_report(path: &Path, args: &Args) -> CalcResult<()> {
    let catalog = Catalog::standard();
    let mut estimate = load_estimate(path)?;

    if let Some(rates_path) = &args.rates {
        estimate.set_rates(catalog, load_rates_or_default(Some(rates_path.as_path()))?);
    } else {
        // Stored results may predate a catalog or rates change
        estimate.recompute(catalog);
    }
    let totals = estimate.totals();
    tracing::info!(
        project = %estimate.project_name,
        items = estimate.item_count(),
        grand_total = totals.grand_total,
        "report ready"
    );

    print_report(&estimate);

    if let Some(export_path) = &args.export {
        let target = if export_path.is_dir() {
            export_path.join(estimate.export_file_name())
        } else {
            export_path.clone()
        };
        export_estimate(&estimate, &target)?;
        tracing::info!(target_path = %target.display(), "report exported");
        println!();
        println!("Exported to {}", target.display());
    }
    Ok(())
}

fn print_report(estimate: &Estimate) {
    println!("═══════════════════════════════════════════════════════════════════════");
    println!("  BILL OF QUANTITIES: {}", estimate.project_name);
    if !estimate.client.name.is_empty() {
        println!("  Client: {}", estimate.client.name);
    }
    println!("═══════════════════════════════════════════════════════════════════════");
    println!(
        "{:<16} {:<34} {:>10} {:>10} {:>14}",
        "Code", "Description", "Vol (cft)", "Steel (kg)", "Subtotal"
    );
    for entry in &estimate.items {
        println!(
            "{:<16} {:<34} {:>10.2} {:>10.2} {:>14}",
            entry.code,
            truncate(&entry.description, 34),
            entry.result.materials.volume,
            entry.result.materials.steel,
            format_currency_bdt(entry.subtotal()),
        );
    }

    let summary = estimate.summary();
    println!();
    println!("By category:");
    for (category, tally) in &summary.category_breakdown {
        println!("  {:<22} {:>3} items {:>16}", category, tally.items, format_currency_bdt(tally.cost));
    }

    let totals = estimate.totals();
    println!();
    println!("Total volume: {:.2} cft   Total steel: {:.2} kg", summary.total_volume, summary.total_steel);
    println!("  Subtotal:    {:>18}", format_currency_bdt(totals.subtotal));
    println!("  Overhead:    {:>18}", format_currency_bdt(totals.overhead));
    println!("  Profit:      {:>18}", format_currency_bdt(totals.profit));
    println!("  Tax:         {:>18}", format_currency_bdt(totals.tax));
    println!("───────────────────────────────────────────────────────────────────────");
    println!("  GRAND TOTAL: {:>18}", format_currency_bdt(totals.grand_total));
}

fn run_interactive(args: &Args) -> CalcResult<()> {
    let catalog = Catalog::standard();
    let rates = load_rates_or_default(args.rates.as_deref())?;

    println!("BOQ CLI - Construction Quantity Estimator");
    println!("=========================================");
    println!();
    for category in catalog.categories() {
        let ids: Vec<&str> = category.items.iter().map(|i| i.id.as_str()).collect();
        println!("  {:<18} {}", category.label, ids.join(", "));
    }
    println!();

    let mut item_id = prompt_line("Item type [slab]: ");
    if item_id.is_empty() {
        item_id = "slab".to_string();
    }
    if catalog.find_item_def(&item_id).is_none() {
        println!("Unknown item '{}', measuring as a plain box.", item_id);
    }

    let label = |field| get_unit_label(catalog, &item_id, field);
    let length = prompt_f64(&format!("Length ({}) [10.0]: ", label(DimensionField::Length)), 10.0);
    let width = prompt_f64(&format!("Width ({}) [10.0]: ", label(DimensionField::Width)), 10.0);
    let height = prompt_f64(&format!("Height ({}) [0]: ", label(DimensionField::Height)), 0.0);
    let thickness = prompt_f64(&format!("Thickness ({}) [0.5]: ", label(DimensionField::Thickness)), 0.5);
    let quantity = prompt_f64("Quantity [1]: ", 1.0);

    let dims = DimensionsInput::new(length)
        .with_width(width)
        .with_height(height)
        .with_thickness(thickness)
        .with_quantity(quantity);
    let result = compute_item(catalog, &item_id, &dims, &rates);

    println!();
    print_item(&result);

    println!();
    println!("JSON Output:");
    if let Ok(json) = serde_json::to_string_pretty(&result) {
        println!("{}", json);
    }
    Ok(())
}

fn print_item(result: &ItemComputationResult) {
    let m = &result.materials;
    let c = &result.costs;
    println!("═══════════════════════════════════════");
    println!("  ITEM ESTIMATE");
    println!("═══════════════════════════════════════");
    println!("Quantities:");
    println!("  Volume:    {:.2} cft", m.volume);
    println!("  Area:      {:.2} sft", m.area);
    println!("  Bricks:    {:.0}", m.bricks);
    println!("  Cement:    {:.2} bags", m.cement);
    println!("  Sand:      {:.2} cft", m.sand);
    println!("  Aggregate: {:.2} cft", m.aggregate);
    println!("  Steel:     {:.2} kg", m.steel);
    if let Some(pile) = &result.pile_steel {
        println!(
            "    main {:.2} kg, spiral {:.2} kg ({:.0} turns)",
            pile.main.0, pile.spiral.0, pile.spiral_turns
        );
    }
    println!();
    println!("Costs:");
    println!("  Cement:    {:>16}", format_currency_bdt(c.cement));
    println!("  Sand:      {:>16}", format_currency_bdt(c.sand));
    println!("  Aggregate: {:>16}", format_currency_bdt(c.aggregate));
    println!("  Bricks:    {:>16}", format_currency_bdt(c.brick));
    println!("  Steel:     {:>16}", format_currency_bdt(c.steel));
    println!("  Labor:     {:>16}", format_currency_bdt(c.labor));
    println!("  Subtotal:  {:>16}", format_currency_bdt(c.subtotal));
    println!("═══════════════════════════════════════");
    println!("  TOTAL (with overhead, profit, tax): {}", format_currency_bdt(result.total_with_adjustments));
    println!("═══════════════════════════════════════");
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args, String> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_args() {
        let parsed = args(&["site.json", "--rates", "rates.toml", "--export", "out.json"]).unwrap();
        assert_eq!(parsed.estimate, Some(PathBuf::from("site.json")));
        assert_eq!(parsed.rates, Some(PathBuf::from("rates.toml")));
        assert_eq!(parsed.export, Some(PathBuf::from("out.json")));

        assert!(args(&[]).unwrap().estimate.is_none());
        assert!(args(&["--rates"]).is_err());
        assert!(args(&["--verbose"]).is_err());
        assert!(args(&["a.json", "b.json"]).is_err());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Slab", 10), "Slab");
        assert_eq!(truncate("Reinforced slab", 6), "Reinf…");
    }
}
