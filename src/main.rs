use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use attendance_dashboard::clean::date_utils::parse_date_string;
use attendance_dashboard::dashboard::{
    AnnualFilters, AnnualPage, DailyFilters, DailyPage, DataInfoPage, IndividualFilters,
    IndividualPage, MonthlyFilters, MonthlyPage,
};
use attendance_dashboard::filter::{DateRange, Selection};
use attendance_dashboard::utils::console::RenderText;
use attendance_dashboard::{DashboardConfig, DatasetManager, FileSource};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "attendance-dashboard")]
#[command(author, version, about = "Attendance and payroll dashboard", long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Root directory of the sheet files
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Print the page as JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    page: Page,
}

#[derive(Subcommand)]
enum Page {
    /// Yearly attendance overview
    Annual {
        #[arg(long, default_value = "All")]
        name: Selection,
    },
    /// Monthly salary and attendance overview
    Monthly {
        #[arg(long, default_value = "All")]
        month: Selection,
    },
    /// One person's annual and monthly figures
    Individual {
        #[arg(long, default_value = "All")]
        name: Selection,
        #[arg(long, default_value = "All")]
        month: Selection,
    },
    /// Daily attendance for one sheet
    Daily {
        /// Daily sheet; the first available when omitted
        #[arg(long)]
        sheet: Option<String>,
        #[arg(long, default_value = "All")]
        staff: Selection,
        /// First day of the range, day first
        #[arg(long, requires = "to")]
        from: Option<String>,
        /// Last day of the range, day first
        #[arg(long, requires = "from")]
        to: Option<String>,
    },
    /// List the daily sheets
    Sheets,
    /// Row and column counts of the loaded tables
    Info {
        #[arg(long)]
        sheet: Option<String>,
    },
}

fn main() -> Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    info!("Reading sheets from: {}", config.data_dir.display());

    let start = Instant::now();
    let source = FileSource::new(config.data_dir.clone());
    let manager = DatasetManager::with_system_clock(source, config);

    let output = match cli.page {
        Page::Annual { name } => {
            render(&AnnualPage::load(&manager, AnnualFilters { name }), cli.json)?
        }
        Page::Monthly { month } => {
            render(&MonthlyPage::load(&manager, MonthlyFilters { month }), cli.json)?
        }
        Page::Individual { name, month } => render(
            &IndividualPage::load(&manager, IndividualFilters { name, month }),
            cli.json,
        )?,
        Page::Daily {
            sheet,
            staff,
            from,
            to,
        } => {
            let date_range = match (from, to) {
                (Some(from), Some(to)) => {
                    let formats = &manager.config().date_format;
                    Some(DateRange::new(
                        parse_day(&from, formats)?,
                        parse_day(&to, formats)?,
                    ))
                }
                _ => None,
            };
            let filters = DailyFilters {
                sheet,
                staff,
                date_range,
            };
            render(&DailyPage::load(&manager, filters), cli.json)?
        }
        Page::Sheets => {
            let sheets = manager
                .daily_sheets()
                .context("Failed to list daily sheets")?;
            if cli.json {
                serde_json::to_string_pretty(&sheets)?
            } else {
                sheets.join("\n")
            }
        }
        Page::Info { sheet } => render(&DataInfoPage::load(&manager, sheet.as_deref()), cli.json)?,
    };

    println!("{output}");
    info!("Page built in {:?}", start.elapsed());
    Ok(())
}

/// Defaults, then the config file, then the environment, then flags
fn load_config(cli: &Cli) -> Result<DashboardConfig> {
    let config = match &cli.config {
        Some(path) => DashboardConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    let mut config = config
        .with_env()
        .context("Invalid environment configuration")?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir.clone_from(dir);
    }
    Ok(config)
}

fn parse_day(
    text: &str,
    formats: &attendance_dashboard::clean::DateFormatConfig,
) -> Result<NaiveDate> {
    match parse_date_string(text.trim(), formats) {
        Some(date) => Ok(date),
        None => bail!("Unrecognised date: {text}"),
    }
}

fn render<P: RenderText + Serialize>(page: &P, json: bool) -> Result<String> {
    if json {
        serde_json::to_string_pretty(page).context("Failed to serialize page")
    } else {
        Ok(page.render_text())
    }
}
