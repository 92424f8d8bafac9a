use anyhow::Result;
use clap::{Parser, Subcommand};

use bribemap::api::GetReportsParams;
use bribemap::cli::{self, ExploreOptions, OutputFormat, SubmitOptions};
use bribemap::config;
use bribemap::web;

#[derive(Debug, Parser)]
#[command(name = "bribemap")]
#[command(about = "Browse, map and submit anonymous corruption reports")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Country totals and the per-state heatmap
    Home {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
        /// Only show the N states with the largest totals
        #[arg(long)]
        top: Option<usize>,
    },
    /// Filter, sort and page through every report
    Explore {
        /// State code or name
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        department: Option<String>,
        /// 0-500, 500-2000, 2000-10000 or 10000+
        #[arg(long)]
        amount: Option<String>,
        /// last-month, last-year or older
        #[arg(long)]
        date: Option<String>,
        /// Case-insensitive text to find in descriptions
        #[arg(long)]
        search: Option<String>,
        /// Column header to click; repeat to toggle direction
        #[arg(long)]
        sort: Vec<String>,
        #[arg(long, default_value = "1")]
        page: usize,
        /// 20, 50 or 100
        #[arg(long)]
        page_size: Option<usize>,
        /// Also show the department breakdown
        #[arg(long)]
        chart: bool,
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Server-side paged report listing
    Reports {
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Metrics and department breakdown for one state
    State {
        /// Two-letter state code, e.g. MH
        code: String,
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Districts known for a state
    Districts {
        code: String,
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Submit an anonymous report
    Submit {
        /// State code
        #[arg(long)]
        state: String,
        #[arg(long)]
        district: Option<String>,
        /// City / mandal
        #[arg(long)]
        city: String,
        /// Police, Revenue, Transport, Municipal, Electricity or Other
        #[arg(long)]
        department: String,
        /// What happened
        #[arg(long)]
        description: String,
        /// Amount paid in INR; grouping and symbols are ignored
        #[arg(long)]
        amount: String,
    },
    /// Delete every report on the backend
    Purge {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Check config, backend, map topology and the diagnostics log
    Health,
    /// Summarize recorded API failures
    Diagnostics {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
        /// Only include the last N days
        #[arg(long)]
        days: Option<u32>,
        /// Delete the failure log instead of summarizing it
        #[arg(long)]
        clear: bool,
    },
    /// Serve the local web dashboard
    Web {
        /// Listen address (default from config: 127.0.0.1:9747)
        #[arg(long)]
        addr: Option<String>,
        /// Do not open a browser
        #[arg(long)]
        no_open: bool,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Write the default config to ~/.bribemap/config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Set a dotted key, e.g. `api.base_url http://localhost:3000`
    Set { key: String, value: String },
    /// Reset the global config to defaults
    Reset,
}

fn main() -> Result<()> {
    let app = App::parse();
    let cfg = config::load();
    if !cfg.display.color {
        colored::control::set_override(false);
    }

    let fmt = |s: &str| OutputFormat::from_str_opt(Some(s));

    match app.command {
        Commands::Home { format, top } => cli::run_home(&cfg, fmt(&format), top),
        Commands::Explore {
            state,
            department,
            amount,
            date,
            search,
            sort,
            page,
            page_size,
            chart,
            format,
        } => {
            let opts = ExploreOptions {
                state,
                department,
                amount_range: amount,
                date_range: date,
                search,
                sort,
                page,
                page_size,
                chart,
            };
            cli::run_explore(&cfg, &opts, fmt(&format))
        }
        Commands::Reports {
            state,
            department,
            limit,
            offset,
            format,
        } => {
            let params = GetReportsParams {
                state,
                department,
                limit,
                offset,
            };
            cli::run_reports(&cfg, &params, fmt(&format))
        }
        Commands::State { code, format } => cli::run_state(&cfg, &code, fmt(&format)),
        Commands::Districts { code, format } => cli::run_districts(&cfg, &code, fmt(&format)),
        Commands::Submit {
            state,
            district,
            city,
            department,
            description,
            amount,
        } => {
            let opts = SubmitOptions {
                state,
                district,
                city,
                department,
                description,
                amount,
            };
            cli::run_submit(&cfg, &opts)
        }
        Commands::Purge { yes } => cli::run_purge(&cfg, yes),
        Commands::Health => cli::run_health(&cfg),
        Commands::Diagnostics { format, days, clear } => {
            if clear {
                cli::run_diagnostics_clear(&cfg)
            } else {
                cli::run_diagnostics(&cfg, fmt(&format), days)
            }
        }
        Commands::Web { addr, no_open } => {
            let addr = addr.unwrap_or_else(|| cfg.web.addr.clone());
            let state = web::AppState::from_config(&cfg);
            web::serve(&state, &addr, cfg.web.open_browser && !no_open)
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigAction::Reset => cli::run_config_reset(),
        },
    }
}
