// Report commands: report, execution, rank, config

use std::fs;
use std::path::{Path, PathBuf};

use carex_io::{load_input, InputSource, LoadReport};
use carex_metrics::{Dimension, Engine, MetricsInput, Period, ReportPeriod};
use chrono::{Local, NaiveDate};

use crate::render;
use crate::settings::Settings;
use crate::{CliError, InputArgs};

/// A loaded snapshot plus the settings and reference period it runs under.
pub struct Run {
    pub settings: Settings,
    pub reference: ReportPeriod,
    pub input: MetricsInput,
    pub report: LoadReport,
}

impl Run {
    /// Resolve settings, apply flag overrides, pick the reference period and
    /// load the snapshot.
    pub fn prepare(config: Option<&Path>, args: &InputArgs) -> Result<Self, CliError> {
        let (mut settings, _) = Settings::load(config)?;
        if let Some(input) = &args.input {
            settings.input.path = Some(input.clone());
        }
        if let Some(budget) = &args.budget {
            settings.input.budget_path = Some(budget.clone());
        }

        let reference = match &args.as_of {
            Some(text) => ReportPeriod::parse(text).map_err(|e| {
                CliError::config(e.to_string()).with_hint("use --as-of YYYY-MM, e.g. --as-of 2024-06")
            })?,
            None => ReportPeriod::from_date(&Local::now()),
        };

        let source = InputSource::from_paths(
            settings.input_path()?,
            settings.input.budget_path.as_deref(),
        )?;
        log::info!("reference period {reference}, input {source:?}");
        let (input, report) = load_input(&source, &settings.input.layout)?;

        Ok(Self { settings, reference, input, report })
    }

    pub fn engine(&self) -> Engine<'_> {
        Engine::new(&self.settings.rules, &self.input)
    }
}

/// File names of the report artifacts for a run on `date`.
pub fn artifact_names(date: NaiveDate) -> (String, String) {
    let stamp = date.format("%Y-%m-%d");
    (
        format!("reporte_vendedoras_{stamp}.xlsx"),
        format!("dashboard_{stamp}.json"),
    )
}

pub fn cmd_report(
    config: Option<PathBuf>,
    args: InputArgs,
    out_dir: Option<PathBuf>,
    json: bool,
    no_export: bool,
) -> Result<(), CliError> {
    let run = Run::prepare(config.as_deref(), &args)?;
    let dashboard = run.engine().dashboard(run.reference);

    if !no_export {
        let dir = out_dir.unwrap_or_else(|| run.settings.output.dir.clone());
        fs::create_dir_all(&dir).map_err(|e| {
            CliError::export(format!("cannot create output directory '{}': {e}", dir.display()))
        })?;
        let (xlsx, dump) = artifact_names(Local::now().date_naive());
        carex_io::export::write_summary(&dashboard, &dir.join(&xlsx))?;
        carex_io::json::write_dashboard(&dashboard, &dir.join(&dump))?;
        if !json {
            eprintln!("wrote {}", dir.join(&xlsx).display());
            eprintln!("wrote {}", dir.join(&dump).display());
        }
    }

    if json {
        let value = serde_json::json!({
            "load": run.report,
            "dashboard": dashboard,
        });
        println!("{}", serde_json::to_string_pretty(&value).map_err(|e| CliError::export(e.to_string()))?);
    } else {
        print!("{}", render::dashboard(&dashboard));
    }
    Ok(())
}

pub fn cmd_execution(
    config: Option<PathBuf>,
    args: InputArgs,
    period: Period,
    json: bool,
) -> Result<(), CliError> {
    let run = Run::prepare(config.as_deref(), &args)?;
    let rows = run.engine().aggregate_by(Dimension::Salesperson, period, run.reference);

    if json {
        println!("{}", serde_json::to_string_pretty(&rows).map_err(|e| CliError::export(e.to_string()))?);
    } else {
        let title = format!("Ejecución por vendedor - {}", period.caption(run.reference));
        print!("{}", render::execution_table(&title, &rows));
    }
    Ok(())
}

pub fn cmd_rank(
    config: Option<PathBuf>,
    args: InputArgs,
    dimension: Dimension,
    period: Period,
    json: bool,
) -> Result<(), CliError> {
    let run = Run::prepare(config.as_deref(), &args)?;
    let rows = run.engine().rank_by(dimension, period, run.reference);

    if json {
        println!("{}", serde_json::to_string_pretty(&rows).map_err(|e| CliError::export(e.to_string()))?);
    } else {
        let title = format!("{} - {}", dimension.header(), period.caption(run.reference));
        print!("{}", render::ranked_table(&title, dimension, &rows));
    }
    Ok(())
}

pub fn cmd_config_show(config: Option<PathBuf>) -> Result<(), CliError> {
    let (settings, source) = Settings::load(config.as_deref())?;
    match source {
        Some(path) => eprintln!("# from {}", path.display()),
        None => eprintln!("# built-in defaults ({} not found)", Settings::default_path().display()),
    }
    let text = toml::to_string_pretty(&settings).map_err(|e| CliError::config(e.to_string()))?;
    print!("{text}");
    Ok(())
}

pub fn cmd_config_check(config: Option<PathBuf>, path: Option<PathBuf>) -> Result<(), CliError> {
    let path = path.or(config).unwrap_or_else(Settings::default_path);
    Settings::from_file(&path)?;
    println!("ok: {}", path.display());
    Ok(())
}
