//! Report command implementations
//!
//! Every report reads one snapshot of the store and hands it to the
//! analytics engine. `--json` prints the engine output as-is.

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use pricetrack_core::analytics::{
    average_annual_inflation, category_inflation, current_basket_cost, detect_anomalies,
    estimated_monthly_growth_rate, forecast, monthly_cpi, previous_month_basket_cost,
    purchasing_power_history, reference_annual_rate, year_over_year, PriceAnomaly,
};
use pricetrack_core::{
    Database, InflationSummary, PriceRepository, Settings, Snapshot, SummaryOptions,
};
use serde_json::json;

use super::truncate;

/// Shared inputs for report commands
pub struct ReportContext<'a> {
    /// Reference instant every report is computed for
    pub now: DateTime<Utc>,
    pub json: bool,
    pub settings: &'a Settings,
}

/// Resolve `--as-of` to the end of that day (UTC), or the current time
pub fn resolve_as_of(as_of: Option<&str>) -> Result<DateTime<Utc>> {
    let Some(s) = as_of else {
        return Ok(Utc::now());
    };
    let date = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid --as-of date '{}' (use YYYY-MM-DD)", s))?;
    date.and_hms_opt(23, 59, 59)
        .map(|dt| dt.and_utc())
        .with_context(|| format!("Invalid --as-of date '{}'", s))
}

fn load(db: &Database) -> Result<Snapshot> {
    db.snapshot().context("Failed to load price history")
}

fn print_json(value: serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn signed_percent(value: f64) -> String {
    format!("{:+.2}%", value)
}

/// Salary from the flag, else settings; must be positive
fn resolve_salary(flag: Option<f64>, settings: &Settings) -> Result<Option<f64>> {
    match flag.or(settings.salary) {
        Some(salary) if !salary.is_finite() || salary <= 0.0 => {
            anyhow::bail!("Salary must be a positive amount, got {}", salary)
        }
        other => Ok(other),
    }
}

/// Anomalies whose absolute change is at least `min_change` percent
pub fn filter_anomalies(anomalies: Vec<PriceAnomaly>, min_change: f64) -> Vec<PriceAnomaly> {
    anomalies
        .into_iter()
        .filter(|a| a.change_percent.abs() >= min_change)
        .collect()
}

pub fn cmd_report_basket(db: &Database, ctx: &ReportContext) -> Result<()> {
    let data = load(db)?;
    let current = current_basket_cost(&data.products, &data.records, ctx.now);
    let previous = previous_month_basket_cost(&data.products, &data.records, ctx.now);
    let change = (previous > 0.0).then(|| (current - previous) / previous * 100.0);

    if ctx.json {
        return print_json(json!({
            "as_of": ctx.now,
            "current_cost": current,
            "previous_month_cost": previous,
            "change_percent": change,
        }));
    }

    let money = |v| ctx.settings.money(v);
    println!();
    println!("🧺 Basket ({})", ctx.now.format("%Y-%m-%d"));
    println!("   ─────────────────────────────");
    println!("   Products:         {}", data.products.len());
    println!("   Current cost:     {}", money(current));
    println!("   A month ago:      {}", money(previous));
    match change {
        Some(c) => println!("   Change:           {}", signed_percent(c)),
        None => println!("   Change:           - (no prices a month ago)"),
    }
    println!();
    Ok(())
}

pub fn cmd_report_cpi(db: &Database, ctx: &ReportContext) -> Result<()> {
    let data = load(db)?;
    let series = monthly_cpi(&data.products, &data.records, ctx.now);
    let annual = average_annual_inflation(&series);
    let growth = estimated_monthly_growth_rate(&series);

    if ctx.json {
        return print_json(json!({
            "series": series,
            "average_annual_inflation": annual,
            "monthly_growth_rate": growth,
        }));
    }

    if series.is_empty() {
        println!("Not enough history for a CPI series yet (need prices in two different months).");
        return Ok(());
    }

    println!();
    println!("📈 Personal CPI");
    println!("   {:<10} {:>12} {:>12}", "Month", "Personal", "Reference");
    println!("   ─────────────────────────────────────");
    for point in &series {
        println!(
            "   {:<10} {:>12} {:>12}",
            point.month_label,
            signed_percent(point.personal_cpi),
            signed_percent(point.reference_cpi)
        );
    }
    println!();
    println!("   Average annual inflation: {:.2}%", annual);
    println!("   Monthly growth (trend):   {:.3}%", growth);
    println!(
        "   Reference rate {}:      {:.1}%",
        ctx.now.year(),
        reference_annual_rate(ctx.now.year())
    );
    println!();
    Ok(())
}

pub fn cmd_report_forecast(
    db: &Database,
    ctx: &ReportContext,
    months: Option<u32>,
    rate: Option<f64>,
) -> Result<()> {
    let data = load(db)?;
    let current = current_basket_cost(&data.products, &data.records, ctx.now);
    let rate = match rate {
        Some(r) => r,
        None => estimated_monthly_growth_rate(&monthly_cpi(&data.products, &data.records, ctx.now)),
    };
    let months = months.unwrap_or(ctx.settings.forecast_months);
    let points = forecast(current, rate, months, ctx.now);

    if ctx.json {
        return print_json(json!({
            "monthly_growth_rate": rate,
            "points": points,
        }));
    }

    println!();
    println!("🔮 Forecast at {:.3}% per month", rate);
    println!("   {:<10} {:>12}", "Month", "Basket");
    println!("   ─────────────────────────");
    for point in &points {
        println!(
            "   {:<10} {:>12}",
            point.month_label,
            ctx.settings.money(point.projected_cost)
        );
    }
    println!();
    Ok(())
}

pub fn cmd_report_power(db: &Database, ctx: &ReportContext, salary: Option<f64>) -> Result<()> {
    let salary = resolve_salary(salary, ctx.settings)?.context(
        "No salary configured. Pass --salary or set `salary` in the settings file.",
    )?;

    let data = load(db)?;
    let points = purchasing_power_history(salary, &data.products, &data.records, ctx.now);

    if ctx.json {
        return print_json(json!({
            "salary": salary,
            "points": points,
        }));
    }

    if points.is_empty() {
        println!("No prices logged yet.");
        return Ok(());
    }

    println!();
    println!("💵 Purchasing power of {} per month", ctx.settings.money(salary));
    println!("   {:<10} {:>10}", "Month", "Baskets");
    println!("   ─────────────────────────");
    for point in &points {
        println!("   {:<10} {:>10.2}", point.month_label, point.baskets_affordable);
    }
    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        if first.baskets_affordable > 0.0 {
            let change =
                (last.baskets_affordable - first.baskets_affordable) / first.baskets_affordable
                    * 100.0;
            println!();
            println!("   Since {}: {}", first.month_label, signed_percent(change));
        }
    }
    println!();
    Ok(())
}

pub fn cmd_report_anomalies(
    db: &Database,
    ctx: &ReportContext,
    min_change: Option<f64>,
) -> Result<()> {
    let min_change = min_change.unwrap_or(ctx.settings.anomaly_threshold_percent);
    let data = load(db)?;
    let anomalies = filter_anomalies(
        detect_anomalies(&data.products, &data.records, ctx.now),
        min_change,
    );

    if ctx.json {
        return print_json(json!(anomalies));
    }

    if anomalies.is_empty() {
        println!("✅ No price changes in the last month.");
        return Ok(());
    }

    let money = |v| ctx.settings.money(v);
    println!();
    println!("⚡ Price changes in the last month");
    println!(
        "   {:<28} {:>10} {:>10} {:>10}",
        "Product", "Before", "Now", "Change"
    );
    println!("   ─────────────────────────────────────────────────────────────");
    for a in &anomalies {
        println!(
            "   {:<28} {:>10} {:>10} {:>10}",
            truncate(&a.product_name, 28),
            money(a.previous_price),
            money(a.current_price),
            signed_percent(a.change_percent)
        );
    }
    println!();
    Ok(())
}

pub fn cmd_report_categories(db: &Database, ctx: &ReportContext) -> Result<()> {
    let data = load(db)?;
    let categories = category_inflation(&data.products, &data.records, ctx.now);

    if ctx.json {
        return print_json(json!(categories));
    }

    if categories.is_empty() {
        println!("Not enough history for category inflation yet.");
        return Ok(());
    }

    let money = |v| ctx.settings.money(v);
    println!();
    println!("🏷️  Inflation by category (last month)");
    println!(
        "   {:<20} {:>10} {:>10} {:>10}",
        "Category", "Before", "Now", "Change"
    );
    println!("   ─────────────────────────────────────────────────────");
    for c in &categories {
        println!(
            "   {:<20} {:>10} {:>10} {:>10}",
            truncate(&c.category, 20),
            money(c.previous_cost),
            money(c.current_cost),
            signed_percent(c.change_percent)
        );
    }
    println!();
    Ok(())
}

pub fn cmd_report_yoy(db: &Database, ctx: &ReportContext) -> Result<()> {
    let data = load(db)?;
    let yoy = year_over_year(&data.products, &data.records, ctx.now);

    if ctx.json {
        return print_json(json!(yoy));
    }

    let Some(yoy) = yoy else {
        println!("No prices from a year ago yet.");
        return Ok(());
    };

    println!();
    println!("📅 Year over year");
    println!("   ─────────────────────────────");
    println!(
        "   {}:      {}",
        yoy.year_ago_label,
        ctx.settings.money(yoy.year_ago_cost)
    );
    println!("   Now:           {}", ctx.settings.money(yoy.current_cost));
    println!("   Change:        {}", signed_percent(yoy.change_percent));
    println!();
    Ok(())
}

pub fn cmd_report_summary(db: &Database, ctx: &ReportContext, salary: Option<f64>) -> Result<()> {
    let options = SummaryOptions {
        salary: resolve_salary(salary, ctx.settings)?,
        forecast_months: ctx.settings.forecast_months,
    };
    let data = load(db)?;
    let mut summary = InflationSummary::compute(&data.products, &data.records, options, ctx.now);
    summary.anomalies = filter_anomalies(
        std::mem::take(&mut summary.anomalies),
        ctx.settings.anomaly_threshold_percent,
    );

    if ctx.json {
        return print_json(serde_json::to_value(&summary)?);
    }

    let money = |v| ctx.settings.money(v);
    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│        📊 Pricetrack Summary            │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  As of:            {}", summary.as_of.format("%Y-%m-%d"));
    println!("  Products:         {}", summary.product_count);
    println!("  Price records:    {}", summary.record_count);
    println!();
    println!("  🧺 Basket:         {}", money(summary.current_cost));
    if let Some(change) = summary.month_change_percent {
        println!("     vs last month:  {}", signed_percent(change));
    }
    if let Some(yoy) = &summary.year_over_year {
        println!("     vs {}:     {}", yoy.year_ago_label, signed_percent(yoy.change_percent));
    }
    println!();
    println!(
        "  📈 Annual inflation:  {:.2}%  (trend {:.3}%/mo)",
        summary.average_annual_inflation, summary.monthly_growth_rate
    );
    if let Some(last) = summary.forecast.last() {
        println!(
            "  🔮 {}:          {}",
            last.month_label,
            money(last.projected_cost)
        );
    }
    if let Some(last) = summary.purchasing_power.last() {
        println!("  💵 Baskets/month:    {:.2}", last.baskets_affordable);
    }

    if !summary.anomalies.is_empty() {
        println!();
        println!("  ⚡ Biggest movers:");
        for a in summary.anomalies.iter().take(5) {
            println!(
                "     {:<24} {}",
                truncate(&a.product_name, 24),
                signed_percent(a.change_percent)
            );
        }
    }
    println!();
    Ok(())
}
