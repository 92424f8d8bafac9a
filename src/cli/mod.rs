//! CLI command implementations.
//!
//! Provides subcommand handlers for:
//! - `bribemap home`: country totals and the state heatmap
//! - `bribemap explore`: filter, sort and page through every report
//! - `bribemap reports`: server-side paged listing
//! - `bribemap state CODE`: one state's metrics and department breakdown
//! - `bribemap districts CODE`: districts known for a state
//! - `bribemap submit`: file a new anonymous report
//! - `bribemap purge --yes`: delete every report
//! - `bribemap health`: check config, backend, topology and the log
//! - `bribemap diagnostics`: summarize recorded API failures
//! - `bribemap config show|init|set|reset`: configuration management

use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use colored::Colorize;

use crate::aggregate::ChartData;
use crate::api::{ApiClient, GetReportsParams, Report, ReportsApi, TopologyClient, TopologySource};
use crate::config::{self, schema::BribemapConfig};
use crate::diagnostics::Diagnostics;
use crate::diagnostics::logger;
use crate::diagnostics::reporter::{self, FailureReport};
use crate::format;
use crate::map::HeatmapView;
use crate::pages::{ExplorePage, HomePage, MetricCard, StateDetailsPage, SubmitPage};
use crate::table::{ReportColumn, ReportGrid};

/// Output format for tabular commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Table,
        }
    }
}

/// API and topology clients wired to the configured diagnostics log.
pub fn clients(cfg: &BribemapConfig) -> (ApiClient, TopologyClient) {
    let diagnostics = Diagnostics::from_config(&cfg.logging);
    let api = ApiClient::from_config(&cfg.api).with_diagnostics(diagnostics.clone());
    let topology = TopologyClient::new(
        &cfg.api.topology_url,
        Duration::from_millis(cfg.api.timeout_ms),
    )
    .with_diagnostics(diagnostics);
    (api, topology)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

// ---------------------------------------------------------------------------
// bribemap home
// ---------------------------------------------------------------------------

/// Show country totals and the heatmap.
pub fn run_home(cfg: &BribemapConfig, format: OutputFormat, top: Option<usize>) -> Result<()> {
    let (api, topology) = clients(cfg);
    let mut page = HomePage::new();
    page.mount(&api, &topology);

    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "stats": page.stats.data,
                "stats_error": page.stats.error,
                "heatmap": page.map.data,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Csv => {
            if let Some(view) = page.map.ready() {
                print_heatmap_csv(view);
            }
        }
        OutputFormat::Table => {
            println!("{}", "Corruption Across India".bold().cyan());
            println!("{}", "=".repeat(60));
            println!();
            if let Some(err) = &page.stats.error {
                println!("  {}", err.red());
            } else {
                print_metric_cards(&page.metric_cards());
            }
            println!();
            if let Some(view) = page.map.ready() {
                print_heatmap_table(view, cfg.display.bar_width, top);
            } else {
                println!("  {}", "Map data unavailable.".dimmed());
            }
            println!();
            println!(
                "  {}",
                "Data is user-reported and not independently verified.".dimmed()
            );
        }
    }
    Ok(())
}

fn print_heatmap_table(view: &HeatmapView, bar_width: usize, top: Option<usize>) {
    let rows: Vec<_> = view
        .rows
        .iter()
        .take(top.unwrap_or(usize::MAX))
        .collect();

    println!("{}", "Reported Bribes by State".bold().cyan());
    if rows.is_empty() {
        println!("  {}", "No reports yet.".yellow());
        return;
    }
    println!(
        "  {:<30} {:<4} {:>14} {:>8}  ",
        "State", "Code", "Amount", "Reports"
    );
    println!("  {}", "-".repeat(60 + bar_width));
    for row in rows {
        let filled = (row.intensity * bar_width as f64).round() as usize;
        let bar = "█".repeat(filled.max(usize::from(row.amount > 0.0)));
        let color = row.color;
        println!(
            "  {:<30} {:<4} {:>14} {:>8}  {}",
            format::truncate(&row.name, 30),
            row.code.as_deref().unwrap_or("-"),
            format::format_inr(row.amount),
            row.reports,
            bar.truecolor(color.0, color.1, color.2),
        );
    }
    println!(
        "  {}",
        format!(
            "{} of {} states with reports · scale max {}",
            view.reported_states(),
            view.rows.len(),
            format::format_compact_inr(view.max_amount)
        )
        .dimmed()
    );
}

fn print_heatmap_csv(view: &HeatmapView) {
    println!("state,code,amount,reports,color");
    for row in &view.rows {
        println!(
            "{},{},{},{},{}",
            csv_field(&row.name),
            row.code.as_deref().unwrap_or(""),
            row.amount,
            row.reports,
            row.color.hex(),
        );
    }
}

// ---------------------------------------------------------------------------
// bribemap explore
// ---------------------------------------------------------------------------

/// Options for `bribemap explore`.
#[derive(Debug, Clone, Default)]
pub struct ExploreOptions {
    pub state: Option<String>,
    pub department: Option<String>,
    pub amount_range: Option<String>,
    pub date_range: Option<String>,
    pub search: Option<String>,
    /// Header clicks, applied in order.
    pub sort: Vec<String>,
    pub page: usize,
    pub page_size: Option<usize>,
    pub chart: bool,
}

/// Browse all reports through the client-side grid.
pub fn run_explore(cfg: &BribemapConfig, opts: &ExploreOptions, format: OutputFormat) -> Result<()> {
    let mut grid = ReportGrid::new(cfg.display.page_size, cfg.display.page_size_options.clone());
    let filters = [
        ("state", &opts.state),
        ("department", &opts.department),
        ("amountRange", &opts.amount_range),
        ("dateRange", &opts.date_range),
        ("search", &opts.search),
    ];
    for (key, value) in filters {
        if let Some(value) = value {
            grid.set_filter(key, value).map_err(anyhow::Error::msg)?;
        }
    }
    for column in &opts.sort {
        let column: ReportColumn = column.parse().map_err(anyhow::Error::msg)?;
        grid.toggle_sort(column);
    }
    if let Some(size) = opts.page_size {
        grid.set_page_size(size).map_err(anyhow::Error::msg)?;
    }

    let (api, _) = clients(cfg);
    let mut page = ExplorePage::new(grid);
    page.mount(&api);
    if let Some(err) = &page.reports.error {
        bail!("{err}");
    }

    let today = today();
    let total = page.grid.matching(page.loaded(), today).len();
    page.grid.pagination.go_to(opts.page.max(1), total);
    let view = page.view(today);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
        OutputFormat::Csv => print_reports_csv(&view.rows),
        OutputFormat::Table => {
            println!("{}", "Explore Reports".bold().cyan());
            println!("{}", "=".repeat(60));
            if !page.grid.filter.is_empty() {
                println!(
                    "  {} {}",
                    "Filters:".bold(),
                    describe_filters(&page.grid).dimmed()
                );
            }
            if view.rows.is_empty() {
                println!("  {}", "No reports match the current filters.".yellow());
                return Ok(());
            }
            print_grid_table(&view.rows, &page.grid);
            println!(
                "  {}",
                format!(
                    "Page {} of {} · {} matching reports · {} per page",
                    view.page,
                    view.page_count,
                    format::format_count(view.total_matching as f64),
                    view.page_size
                )
                .dimmed()
            );
            if opts.chart {
                println!();
                println!("{}", "Amount by Department".bold().cyan());
                print_chart(&page.department_chart(today), cfg.display.bar_width);
            }
        }
    }
    Ok(())
}

fn describe_filters(grid: &ReportGrid) -> String {
    let f = &grid.filter;
    let mut parts = Vec::new();
    if let Some(state) = &f.state {
        parts.push(format!("state={state}"));
    }
    if let Some(department) = &f.department {
        parts.push(format!("department={department}"));
    }
    if let Some(range) = &f.amount {
        parts.push(format!("amount={range}"));
    }
    if let Some(window) = f.date {
        parts.push(format!("date={window}"));
    }
    if let Some(search) = &f.search {
        parts.push(format!("search=\"{search}\""));
    }
    parts.join("  ")
}

fn print_grid_table(rows: &[&Report], grid: &ReportGrid) {
    let header = |column: ReportColumn| match grid.sort.indicator(column) {
        Some(arrow) => format!("{} {arrow}", column.header()),
        None => column.header().to_string(),
    };
    println!(
        "  {:<24} {:<12} {:<36} {:>12} {:<12}",
        header(ReportColumn::Location),
        header(ReportColumn::Department),
        header(ReportColumn::Description),
        header(ReportColumn::Amount),
        header(ReportColumn::Date),
    );
    println!("  {}", "-".repeat(100));
    for (i, report) in rows.iter().enumerate() {
        let line = format!(
            "  {:<24} {:<12} {:<36} {:>12} {:<12}",
            format::truncate(&report.location(), 24),
            format::truncate(&report.department, 12),
            format::truncate(&report.description, 36),
            format::format_inr(report.amount),
            format::format_date(&report.date_reported),
        );
        if i % 2 == 0 {
            println!("{line}");
        } else {
            println!("{}", line.dimmed());
        }
    }
}

fn print_reports_csv(rows: &[&Report]) {
    println!("id,state,district,city,department,description,amount,date_reported");
    for r in rows {
        println!(
            "{},{},{},{},{},{},{},{}",
            csv_field(&r.id),
            csv_field(&r.state),
            csv_field(r.district.as_deref().unwrap_or("")),
            csv_field(r.city.as_deref().unwrap_or("")),
            csv_field(&r.department),
            csv_field(&r.description),
            r.amount,
            csv_field(&r.date_reported),
        );
    }
}

// ---------------------------------------------------------------------------
// bribemap reports
// ---------------------------------------------------------------------------

/// Server-side filtered and paged listing.
pub fn run_reports(cfg: &BribemapConfig, params: &GetReportsParams, format: OutputFormat) -> Result<()> {
    let (api, _) = clients(cfg);
    let listing = api
        .list_reports(params)
        .context("Failed to load reports")?;
    let rows: Vec<&Report> = listing.data.iter().collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&listing)?),
        OutputFormat::Csv => print_reports_csv(&rows),
        OutputFormat::Table => {
            println!("{}", "Reports".bold().cyan());
            println!("{}", "=".repeat(60));
            if rows.is_empty() {
                println!("  {}", "No reports found.".yellow());
                return Ok(());
            }
            print_grid_table(&rows, &ReportGrid::default());
            let offset = params.offset.unwrap_or(0) as usize;
            println!(
                "  {}",
                format!(
                    "Showing {}-{} of {}",
                    offset + 1,
                    offset + rows.len(),
                    format::format_count(listing.total as f64)
                )
                .dimmed()
            );
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// bribemap state
// ---------------------------------------------------------------------------

/// One state's metrics and department breakdown.
pub fn run_state(cfg: &BribemapConfig, code: &str, format: OutputFormat) -> Result<()> {
    let (api, _) = clients(cfg);
    let mut page = StateDetailsPage::default();
    page.navigate(code, &api);
    if let Some(err) = page.error() {
        bail!("{err}");
    }
    let chart = page.chart();

    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "code": page.code,
                "name": page.state_name(),
                "summary": page.summary.data,
                "most_reported": page.most_reported(),
                "chart": chart,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Csv => {
            println!("department,count");
            for slice in &chart.slices {
                println!("{},{}", csv_field(&slice.label), slice.value);
            }
        }
        OutputFormat::Table => {
            println!(
                "{}",
                format!("{} Corruption Report", page.state_name()).bold().cyan()
            );
            println!("{}", "=".repeat(60));
            print_metric_cards(&page.metric_cards());
            println!();
            println!("{}", "Reports by Department".bold().cyan());
            print_chart(&chart, cfg.display.bar_width);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// bribemap districts
// ---------------------------------------------------------------------------

pub fn run_districts(cfg: &BribemapConfig, code: &str, format: OutputFormat) -> Result<()> {
    let (api, _) = clients(cfg);
    let districts = api
        .districts(code)
        .with_context(|| format!("Failed to load districts for {code}"))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&districts)?),
        OutputFormat::Csv => {
            println!("district");
            for d in &districts {
                println!("{}", csv_field(d));
            }
        }
        OutputFormat::Table => {
            println!(
                "{}",
                format!("Districts of {}", crate::states::display_name(code)).bold().cyan()
            );
            if districts.is_empty() {
                println!("  {}", "No districts found.".yellow());
            }
            for d in &districts {
                println!("  {} {d}", "·".dimmed());
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// bribemap submit
// ---------------------------------------------------------------------------

/// Field values for `bribemap submit`.
#[derive(Debug, Clone, Default)]
pub struct SubmitOptions {
    pub state: String,
    pub district: Option<String>,
    pub city: String,
    pub department: String,
    pub description: String,
    pub amount: String,
}

/// File one report through the submission form.
pub fn run_submit(cfg: &BribemapConfig, opts: &SubmitOptions) -> Result<()> {
    let (api, _) = clients(cfg);
    let mut page = SubmitPage::new(Duration::from_secs(cfg.form.success_display_secs));
    let form = &mut page.form;

    form.set_state(&opts.state, &api);
    if let Some(district) = &opts.district {
        form.set_district(district).map_err(anyhow::Error::msg)?;
    }
    for (name, value) in [
        ("city", &opts.city),
        ("department", &opts.department),
        ("description", &opts.description),
        ("amount", &opts.amount),
    ] {
        form.set_field(name, value).map_err(anyhow::Error::msg)?;
    }

    let created = form.submit(&api, Instant::now())?;
    let banner = form.banner().unwrap_or_default();
    match created {
        Some(report) => {
            println!("{} {}", "✓".green().bold(), banner);
            println!(
                "  {} {} · {} · {}",
                "Report".dimmed(),
                report.id,
                report.location(),
                format::format_inr(report.amount)
            );
            Ok(())
        }
        None => bail!("{banner}"),
    }
}

// ---------------------------------------------------------------------------
// bribemap purge
// ---------------------------------------------------------------------------

/// Delete every report on the backend.
pub fn run_purge(cfg: &BribemapConfig, yes: bool) -> Result<()> {
    if !yes {
        bail!("refusing to delete all reports without --yes");
    }
    let (api, _) = clients(cfg);
    api.delete_all_reports()
        .context("Failed to delete reports")?;
    println!("{} All reports deleted from {}", "✓".green().bold(), api.base_url());
    Ok(())
}

// ---------------------------------------------------------------------------
// bribemap health
// ---------------------------------------------------------------------------

pub fn run_health(cfg: &BribemapConfig) -> Result<()> {
    println!("{}", "bribemap Health Check".bold().cyan());
    println!("{}", "=".repeat(40));

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    print_health_item(
        "Global config",
        global_exists,
        if global_exists {
            "~/.bribemap/config.toml found"
        } else {
            "not found (run `bribemap config init` to create)"
        },
    );
    print_health_item(
        "Project config",
        project_exists,
        if project_exists {
            ".bribemap.toml found"
        } else {
            "none (optional)"
        },
    );

    let (api, topology) = clients(&BribemapConfig {
        logging: crate::config::schema::LoggingConfig {
            console: false,
            ..cfg.logging.clone()
        },
        ..cfg.clone()
    });
    match api.health() {
        Ok(status) => print_health_item(
            "Backend",
            status.status.eq_ignore_ascii_case("ok"),
            &format!("{} at {} ({})", status.status, api.base_url(), status.service),
        ),
        Err(err) => print_health_item(
            "Backend",
            false,
            &format!("not reachable at {} ({})", api.base_url(), err.kind()),
        ),
    }
    match topology.state_names() {
        Ok(names) => print_health_item(
            "Map topology",
            true,
            &format!("{} state geometries", names.len()),
        ),
        Err(err) => print_health_item(
            "Map topology",
            false,
            &format!("unavailable ({}); map falls back to reported states", err.kind()),
        ),
    }

    let log_path = Diagnostics::from_config(&cfg.logging).log_path().map(|p| p.to_path_buf());
    let log_exists = log_path.as_ref().is_some_and(|p| p.exists());
    let entries = log_path
        .as_deref()
        .filter(|_| log_exists)
        .map(|p| logger::read_all_entries(p).len())
        .unwrap_or(0);
    print_health_item(
        "Diagnostics log",
        log_exists,
        &if log_exists {
            format!("{entries} failures recorded")
        } else if cfg.logging.enabled {
            "no log file yet".to_string()
        } else {
            "disabled".to_string()
        },
    );
    Ok(())
}

fn print_health_item(name: &str, ok: bool, detail: &str) {
    let status = if ok {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!("  {} {:<20} {}", status, name, detail.dimmed());
}

// ---------------------------------------------------------------------------
// bribemap diagnostics
// ---------------------------------------------------------------------------

/// Summarize recorded API failures.
pub fn run_diagnostics(cfg: &BribemapConfig, format: OutputFormat, days: Option<u32>) -> Result<()> {
    let Some(path) = Diagnostics::from_config(&cfg.logging).log_path().map(|p| p.to_path_buf()) else {
        println!("{}", "Diagnostics logging is disabled.".yellow());
        return Ok(());
    };
    let report = reporter::compute_report(&path, days);
    if report.total_failures == 0 {
        println!("{}", "No failures recorded.".green());
        return Ok(());
    }

    match format {
        OutputFormat::Json => print_diagnostics_json(&report)?,
        OutputFormat::Csv => {
            println!("operation,count,primary_kind,last_timestamp,last_message");
            for op in &report.operations {
                println!(
                    "{},{},{},{},{}",
                    op.operation,
                    op.count,
                    op.primary_kind,
                    op.last_timestamp,
                    csv_field(&op.last_message)
                );
            }
        }
        OutputFormat::Table => {
            println!("{}", "API Failure Report".bold().cyan());
            println!("{}", "=".repeat(60));
            println!("  {} {}", "Total failures:".bold(), report.total_failures);
            let k = &report.kinds;
            println!(
                "  Network: {} ({:.0}%)  Server: {} ({:.0}%)  Validation: {} ({:.0}%)  Other: {} ({:.0}%)",
                k.network,
                k.pct(k.network),
                k.server,
                k.pct(k.server),
                k.validation,
                k.pct(k.validation),
                k.other,
                k.pct(k.other),
            );
            println!();
            println!(
                "  {:<20} {:>6} {:<12} {:<26}",
                "Operation", "Count", "Kind", "Last seen"
            );
            println!("  {}", "-".repeat(66));
            for op in &report.operations {
                println!(
                    "  {:<20} {:>6} {:<12} {:<26}",
                    format::truncate(&op.operation, 20),
                    op.count,
                    op.primary_kind,
                    op.last_timestamp,
                );
                println!("    {}", format::truncate(&op.last_message, 80).dimmed());
            }
        }
    }
    Ok(())
}

fn print_diagnostics_json(report: &FailureReport) -> Result<()> {
    let value = serde_json::json!({
        "total_failures": report.total_failures,
        "kinds": {
            "network": report.kinds.network,
            "server": report.kinds.server,
            "validation": report.kinds.validation,
            "other": report.kinds.other,
        },
        "operations": report.operations.iter().map(|o| serde_json::json!({
            "operation": o.operation,
            "count": o.count,
            "primary_kind": o.primary_kind,
            "last_timestamp": o.last_timestamp,
            "last_message": o.last_message,
        })).collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// bribemap config show | init | set | reset
// ---------------------------------------------------------------------------

/// Show the effective (merged) configuration as TOML.
pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective bribemap Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    print_source("~/.bribemap/config.toml", global_exists);
    print_source(".bribemap.toml", project_exists);
    println!(
        "  {} {}",
        "·".dimmed(),
        "BRIBEMAP_* environment variables".dimmed()
    );
    Ok(())
}

fn print_source(name: &str, exists: bool) {
    if exists {
        println!("  {} {}", "✓".green(), name.dimmed());
    } else {
        println!("  {} {}", "·".dimmed(), format!("{name} (not found)").dimmed());
    }
}

/// Delete the diagnostics log.
pub fn run_diagnostics_clear(cfg: &BribemapConfig) -> Result<()> {
    let Some(path) = Diagnostics::from_config(&cfg.logging).log_path().map(|p| p.to_path_buf()) else {
        println!("{}", "Diagnostics logging is disabled.".yellow());
        return Ok(());
    };
    let removed = logger::clear_log(&path)?;
    println!(
        "{} Cleared {} entries from {}",
        "✓".green().bold(),
        removed,
        path.display()
    );
    Ok(())
}

/// Initialize a default config file at `~/.bribemap/config.toml`.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!(
        "{} Config written to {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

/// Set a single configuration value in the global config file.
pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} Set {} = {}", "✓".green().bold(), key.bold(), value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!(
        "{} Config reset to defaults at {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

fn print_metric_cards(cards: &[MetricCard]) {
    for card in cards {
        let title = format!("{:<24}", format!("{}:", card.title));
        if card.label.is_empty() {
            println!("  {} {}", title.bold(), card.value);
        } else {
            println!("  {} {}  {}", title.bold(), card.value, card.label.dimmed());
        }
    }
}

/// Horizontal bar legend for a department chart.
fn print_chart(chart: &ChartData, bar_width: usize) {
    if chart.is_empty() {
        println!("  {}", "No department data.".yellow());
        return;
    }
    let max = chart.slices.first().map_or(0.0, |s| s.value);
    for slice in &chart.slices {
        let bar = format!("{:<width$}", bar(slice.value, max, bar_width), width = bar_width);
        println!(
            "  {:<22} {} {:>12} {:>5.1}%",
            format::truncate(&slice.label, 22),
            bar.red(),
            slice.kind.format(slice.value),
            chart.share_pct(slice),
        );
    }
    let total = format!(
        "{:<22} {:<width$} {:>12}",
        "Total",
        "",
        chart.formatted_total(),
        width = bar_width
    );
    println!("  {}", total.bold());
}

/// `width`-scaled bar for `value` out of `max`.
fn bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let filled = ((value / max) * width as f64).round() as usize;
    "█".repeat(filled.clamp(1, width))
}

/// Quote a CSV field when it contains a separator, quote or newline.
fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::from_str_opt(None), OutputFormat::Table);
        assert_eq!(OutputFormat::from_str_opt(Some("json")), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str_opt(Some("csv")), OutputFormat::Csv);
        assert_eq!(
            OutputFormat::from_str_opt(Some("unknown")),
            OutputFormat::Table
        );
    }

    #[test]
    fn test_bar_scaling() {
        assert_eq!(bar(50.0, 100.0, 10), "█████");
        assert_eq!(bar(0.1, 100.0, 10), "█");
        assert_eq!(bar(0.0, 100.0, 10), "");
        assert_eq!(bar(100.0, 0.0, 10), "");
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("Police"), "Police");
        assert_eq!(csv_field("Pune, MH"), "\"Pune, MH\"");
        assert_eq!(csv_field("said \"pay\""), "\"said \"\"pay\"\"\"");
    }

    #[test]
    fn test_describe_filters() {
        let mut grid = ReportGrid::default();
        grid.set_filter("state", "MH").unwrap();
        grid.set_filter("amountRange", "10000+").unwrap();
        assert_eq!(describe_filters(&grid), "state=MH  amount=₹10,000+");
    }
}
