//! Wallpaper CLI commands.
//!
//! `prepare` renders the wallpapers; `plan` only reports what `prepare`
//! would do, reading nothing but the image header.

use std::path::{Path, PathBuf};

use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::cli::output;
use crate::config::{self, WallpaperConfig};
use crate::error::WallpaperError;
use crate::platform::path::expand;
use crate::wallpaper::{
    Dimension, DisplayOutcome, DisplaySpec, DisplayTarget, PrepareOptions, ScalingReport,
    prepare_all, probe_dimension,
};

/// Arguments of `wallpaper prepare`.
#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// The image to prepare.
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    /// Display resolution as WIDTHxHEIGHT or NAME=WIDTHxHEIGHT. Repeat for
    /// several displays. Defaults to the `displays` list of the configuration file.
    #[arg(long = "display", short = 'd', value_name = "[NAME=]WxH")]
    pub displays: Vec<DisplaySpec>,

    /// Height in pixels of the black band at the top of each display.
    #[arg(long, short = 'm', value_name = "PX")]
    pub margin_top: Option<u32>,

    /// Corner radius in pixels of the visible image area.
    #[arg(long, short = 'r', value_name = "PX")]
    pub border_radius: Option<u32>,

    /// Directory to write the prepared wallpapers to.
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output_dir: Option<String>,

    /// Print the results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments of `wallpaper plan`.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// The image to inspect.
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    /// Display resolution as WIDTHxHEIGHT or NAME=WIDTHxHEIGHT. Repeat for
    /// several displays.
    #[arg(long = "display", short = 'd', value_name = "[NAME=]WxH")]
    pub displays: Vec<DisplaySpec>,

    /// Height in pixels of the black band at the top of each display.
    #[arg(long, short = 'm', value_name = "PX")]
    pub margin_top: Option<u32>,

    /// Print the reports as JSON.
    #[arg(long)]
    pub json: bool,
}

/// One line of the JSON output of `prepare`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OutcomeRecord {
    display: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    resolution: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<&DisplayOutcome> for OutcomeRecord {
    fn from(outcome: &DisplayOutcome) -> Self {
        let (output, error) = match &outcome.result {
            Ok(path) => (Some(path.clone()), None),
            Err(err) => (None, Some(err.to_string())),
        };

        Self {
            display: outcome.target.index,
            name: outcome.target.name.clone(),
            resolution: outcome.target.dimension.to_string(),
            output,
            error,
        }
    }
}

/// The plan for one display: a scaling report, or why there is none.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanEntry {
    display: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    resolution: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<ScalingReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip)]
    target: DisplayTarget,
}

impl PlanEntry {
    fn new(image: Dimension, target: DisplayTarget, margin_top: u32) -> Self {
        let (report, error) = match ScalingReport::new(image, target.dimension, margin_top) {
            Ok(report) => (Some(report), None),
            Err(err) => (None, Some(err.to_string())),
        };

        Self {
            display: target.index,
            name: target.name.clone(),
            resolution: target.dimension.to_string(),
            report,
            error,
            target,
        }
    }
}

/// Execute `wallpaper prepare`.
///
/// # Errors
///
/// Fails on invalid arguments, when the output directory cannot be created,
/// or with `PartialFailure` when any display could not be prepared.
pub fn execute_prepare(args: &PrepareArgs) -> Result<(), WallpaperError> {
    let settings = &config::get_config().wallpaper;

    ensure_image_exists(&args.image)?;
    let targets = resolve_targets(&args.displays, settings)?;
    let options = PrepareOptions::new(
        Some(args.margin_top.unwrap_or(settings.margin_top)),
        Some(args.border_radius.unwrap_or(settings.border_radius)),
    );
    let output_dir = args.output_dir.as_deref().map_or_else(
        || settings.output_dir(config::get_config_dir().as_deref()),
        expand,
    );

    tracing::debug!(
        image = %args.image.display(),
        displays = targets.len(),
        output_dir = %output_dir.display(),
        "preparing wallpapers"
    );

    let outcomes = prepare_all(&args.image, &targets, options, &output_dir)?;

    if args.json {
        let records: Vec<OutcomeRecord> = outcomes.iter().map(OutcomeRecord::from).collect();
        output::print_highlighted_json(&serde_json::to_value(records)?);
    } else {
        print_outcome_table(&outcomes);
    }

    let failed = outcomes.iter().filter(|outcome| !outcome.is_success()).count();
    if failed > 0 {
        return Err(WallpaperError::PartialFailure { failed, total: outcomes.len() });
    }

    Ok(())
}

/// Execute `wallpaper plan`.
///
/// Displays whose margin leaves no room get an error entry instead of a report.
///
/// # Errors
///
/// Fails on invalid arguments, if the image header cannot be read, or with
/// `PartialFailure` when any display has no valid plan.
pub fn execute_plan(args: &PlanArgs) -> Result<(), WallpaperError> {
    let settings = &config::get_config().wallpaper;

    ensure_image_exists(&args.image)?;
    let targets = resolve_targets(&args.displays, settings)?;
    let margin_top = args.margin_top.unwrap_or(settings.margin_top);
    let image = probe_dimension(&args.image)?;

    let entries: Vec<PlanEntry> =
        targets.into_iter().map(|target| PlanEntry::new(image, target, margin_top)).collect();

    if args.json {
        output::print_highlighted_json(&serde_json::to_value(&entries)?);
    } else {
        println!("{}", render_plan(&args.image, image, &entries));
    }

    let failed = entries.iter().filter(|entry| entry.error.is_some()).count();
    if failed > 0 {
        return Err(WallpaperError::PartialFailure { failed, total: entries.len() });
    }

    Ok(())
}

/// Renders the plan as text, one section per display.
fn render_plan(path: &Path, image: Dimension, entries: &[PlanEntry]) -> String {
    let mut sections = vec![format!("{} {} ({image})", "Image:".bold(), path.display())];

    for entry in entries {
        let heading = capitalize(&entry.target.to_string()).bold();
        let body = match (&entry.report, &entry.error) {
            (Some(report), _) => report.to_string(),
            (None, Some(error)) => error.red().to_string(),
            (None, None) => String::new(),
        };
        sections.push(format!("{heading}\n{body}"));
    }

    sections.join("\n\n")
}

fn ensure_image_exists(image: &Path) -> Result<(), WallpaperError> {
    if image.is_file() {
        Ok(())
    } else {
        Err(WallpaperError::InvalidArguments(format!("Image not found: {}", image.display())))
    }
}

/// Picks the displays from the command line, falling back to the configuration.
fn resolve_targets(
    displays: &[DisplaySpec],
    settings: &WallpaperConfig,
) -> Result<Vec<DisplayTarget>, WallpaperError> {
    let specs = if displays.is_empty() { settings.display_specs()? } else { displays.to_vec() };

    if specs.is_empty() {
        return Err(WallpaperError::InvalidArguments(
            "No displays given. Pass --display WIDTHxHEIGHT or set \"displays\" in the configuration file."
                .to_string(),
        ));
    }

    Ok(specs.into_iter().enumerate().map(|(index, spec)| spec.into_target(index)).collect())
}

fn print_outcome_table(outcomes: &[DisplayOutcome]) {
    #[derive(Tabled)]
    struct OutcomeRow {
        #[tabled(rename = "Display")]
        display: String,
        #[tabled(rename = "Resolution")]
        resolution: String,
        #[tabled(rename = "Status")]
        status: String,
        #[tabled(rename = "Output")]
        output: String,
    }

    let rows: Vec<OutcomeRow> = outcomes
        .iter()
        .map(|outcome| {
            let (status, output) = match &outcome.result {
                Ok(path) => (output::format_bool(true), path.display().to_string()),
                Err(err) => (output::format_bool(false), err.to_string().red().to_string()),
            };
            let display = match &outcome.target.name {
                Some(name) => format!("{} {name}", outcome.target.index),
                None => outcome.target.index.to_string(),
            };
            OutcomeRow {
                display,
                resolution: outcome.target.dimension.to_string(),
                status,
                output,
            }
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .with(Modify::new(Columns::new(1..2)).with(Alignment::right()))
        .with(Modify::new(Columns::new(2..3)).with(Alignment::center()))
        .to_string();

    println!("{}", format!("Wallpapers ({})", outcomes.len()).bold());
    println!("{table}");
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| first.to_uppercase().chain(chars).collect())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::wallpaper::ProcessingError;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: PrepareArgs,
    }

    #[derive(Parser)]
    struct PlanCli {
        #[command(flatten)]
        args: PlanArgs,
    }

    fn dim(width: u32, height: u32) -> Dimension { Dimension::new(width, height).unwrap() }

    fn spec(dimension: Dimension) -> DisplaySpec { DisplaySpec { name: None, dimension } }

    fn plan_entries(image: Dimension, displays: &[&str], margin_top: u32) -> Vec<PlanEntry> {
        let specs: Vec<DisplaySpec> = displays.iter().map(|d| d.parse().unwrap()).collect();
        resolve_targets(&specs, &WallpaperConfig::default())
            .unwrap()
            .into_iter()
            .map(|target| PlanEntry::new(image, target, margin_top))
            .collect()
    }

    #[test]
    fn test_prepare_args_parse() {
        let cli = TestCli::try_parse_from([
            "test",
            "/walls/forest.jpg",
            "-d",
            "2560x1440",
            "--display",
            "Side=1920X1080",
            "--margin-top",
            "32",
            "-r",
            "12",
        ])
        .unwrap();

        assert_eq!(cli.args.image, PathBuf::from("/walls/forest.jpg"));
        assert_eq!(
            cli.args.displays,
            vec![
                spec(dim(2560, 1440)),
                DisplaySpec { name: Some("Side".to_string()), dimension: dim(1920, 1080) },
            ]
        );
        assert_eq!(cli.args.margin_top, Some(32));
        assert_eq!(cli.args.border_radius, Some(12));
        assert!(cli.args.output_dir.is_none());
        assert!(!cli.args.json);
    }

    #[test]
    fn test_prepare_args_reject_bad_display() {
        assert!(TestCli::try_parse_from(["test", "a.png", "-d", "1920x0"]).is_err());
        assert!(TestCli::try_parse_from(["test", "a.png", "-d", "wide"]).is_err());
    }

    #[test]
    fn test_resolve_targets_prefers_command_line() {
        let settings =
            WallpaperConfig { displays: vec!["800x600".to_string()], ..Default::default() };
        let targets =
            resolve_targets(&[spec(dim(1920, 1080)), spec(dim(1080, 1920))], &settings).unwrap();

        assert_eq!(targets.len(), 2);
        assert_eq!(targets[1].index, 1);
        assert_eq!(targets[1].dimension, dim(1080, 1920));
    }

    #[test]
    fn test_resolve_targets_falls_back_to_config() {
        let settings = WallpaperConfig {
            displays: vec!["800x600".to_string(), "Side=600x800".to_string()],
            ..Default::default()
        };
        let targets = resolve_targets(&[], &settings).unwrap();
        assert_eq!(
            targets,
            vec![
                DisplayTarget::new(0, dim(800, 600)),
                DisplayTarget::new(1, dim(600, 800)).with_name("Side"),
            ]
        );
    }

    #[test]
    fn test_resolve_targets_requires_a_display() {
        let err = resolve_targets(&[], &WallpaperConfig::default()).unwrap_err();
        assert!(matches!(err, WallpaperError::InvalidArguments(_)));
    }

    #[test]
    fn test_resolve_targets_reports_bad_config_entry() {
        let settings = WallpaperConfig { displays: vec!["huge".to_string()], ..Default::default() };
        assert!(matches!(
            resolve_targets(&[], &settings),
            Err(WallpaperError::InvalidArguments(_))
        ));
    }

    #[test]
    fn test_outcome_record_serialization() {
        let ok = DisplayOutcome {
            target: DisplayTarget::new(0, dim(1920, 1080)),
            result: Ok(PathBuf::from("/out/a.png")),
        };
        let failed = DisplayOutcome {
            target: DisplayTarget::new(1, dim(800, 600)).with_name("Side"),
            result: Err(ProcessingError::InvalidRequest("no room".to_string())),
        };

        let ok_json = serde_json::to_value(OutcomeRecord::from(&ok)).unwrap();
        assert_eq!(ok_json["resolution"], "1920x1080");
        assert_eq!(ok_json["output"], "/out/a.png");
        assert!(ok_json.get("error").is_none());

        let failed_json = serde_json::to_value(OutcomeRecord::from(&failed)).unwrap();
        assert_eq!(failed_json["name"], "Side");
        assert!(failed_json["error"].as_str().unwrap().contains("no room"));
        assert!(failed_json.get("output").is_none());
    }

    #[test]
    fn test_plan_args_parse() {
        let cli = PlanCli::try_parse_from(["test", "a.png", "-d", "Built-in=100x20", "-m", "30", "--json"])
            .unwrap();
        assert_eq!(cli.args.displays[0].name.as_deref(), Some("Built-in"));
        assert_eq!(cli.args.margin_top, Some(30));
        assert!(cli.args.json);
    }

    #[test]
    fn test_plan_entry_reports_margin_covering_display() {
        let entries = plan_entries(dim(100, 100), &["100x20", "Main=200x100"], 30);

        assert!(entries[0].report.is_none());
        assert!(entries[0].error.as_deref().unwrap().contains("leaves no room"));
        assert!(entries[1].error.is_none());
        assert_eq!(entries[1].report.unwrap().scaled, dim(200, 200));
    }

    #[test]
    fn test_plan_json_has_entry_per_display() {
        let entries = plan_entries(dim(100, 100), &["100x20", "Main=200x100"], 30);
        let json = serde_json::to_value(&entries).unwrap();

        assert_eq!(json.as_array().unwrap().len(), 2);
        assert_eq!(json[0]["display"], 0);
        assert_eq!(json[0]["resolution"], "100x20");
        assert!(json[0].get("report").is_none());
        assert!(json[0]["error"].as_str().unwrap().contains("top margin 30px"));

        assert_eq!(json[1]["name"], "Main");
        assert_eq!(json[1]["report"]["cropAxis"], "vertical");
        assert_eq!(json[1]["report"]["scaled"]["width"], 200);
        assert!(json[1].get("error").is_none());
    }

    #[test]
    fn test_plan_text_reports_every_display() {
        colored::control::set_override(false);
        let entries = plan_entries(dim(100, 100), &["100x20", "Main=200x100"], 30);

        let text = render_plan(Path::new("square.png"), dim(100, 100), &entries);

        assert!(text.starts_with("Image: square.png (100x100)"));
        assert!(text.contains("Display 0 (100x20)\nInvalid request: top margin 30px leaves no room"));
        assert!(text.contains("Display 1 (Main, 200x100)\nImage orientation: square"));
        assert!(text.contains("Image will be scaled to 200x200"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("display 0 (1920x1080)"), "Display 0 (1920x1080)");
        assert_eq!(capitalize(""), "");
    }
}
