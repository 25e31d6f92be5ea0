//! CLI argument definitions for Plot Planner.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use planner_cli::selection::SelectionPlan;
use planner_model::{
    CellCoord, EntityKind, GridDims, PlantId, PlantlistEntryId, PlantlistId, PlotId, SearchFilter,
};

#[derive(Parser)]
#[command(
    name = "plot-planner",
    version,
    about = "Plot Planner - design garden plots from the terminal",
    long_about = "Design garden plots against a Plot Planner server.\n\n\
                  Paint plant symbols onto plot grids, link projects, plots and\n\
                  plant lists, and search the plant catalog."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    #[command(flatten)]
    pub server: ServerArgs,
}

/// Where the backend lives and who is logged in.
#[derive(Args)]
pub struct ServerArgs {
    /// JSON settings file (base_url, timeout_secs, session).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Server URL (overrides the settings file and PLOT_PLANNER_URL).
    #[arg(long = "url", value_name = "URL", global = true)]
    pub url: Option<String>,

    /// Session cookie of a logged-in user (overrides PLOT_PLANNER_SESSION).
    #[arg(long = "session", value_name = "TOKEN", global = true)]
    pub session: Option<String>,

    /// Request timeout in seconds.
    #[arg(long = "timeout", value_name = "SECS", global = true)]
    pub timeout_secs: Option<u64>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show and edit plot grids.
    #[command(subcommand)]
    Plot(PlotCommand),

    /// Link projects, plots and plant lists.
    #[command(subcommand)]
    Link(LinkCommand),

    /// Search the plant catalog.
    #[command(subcommand)]
    Plants(PlantsCommand),

    /// Manage plant symbols on plant lists.
    #[command(subcommand)]
    Symbol(SymbolCommand),
}

#[derive(Subcommand)]
pub enum PlotCommand {
    /// Print a plot's grid.
    Show(PlotArgs),

    /// Paint a plant-list entry's symbol on the selected cells.
    Paint(PaintArgs),

    /// Remove symbols from the selected cells.
    Clear(ClearArgs),

    /// List the symbols a plant list offers for painting.
    Palette {
        /// Plant list to read.
        #[arg(value_name = "PLANTLIST")]
        plantlist: PlantlistId,
    },
}

#[derive(Args)]
pub struct PlotArgs {
    /// Plot to work on.
    #[arg(value_name = "PLOT")]
    pub plot: PlotId,

    /// Grid size as ROWSxCOLS (the plot's length x width).
    #[arg(long = "size", value_name = "ROWSxCOLS")]
    pub size: GridDims,
}

#[derive(Args)]
pub struct PaintArgs {
    #[command(flatten)]
    pub plot: PlotArgs,

    /// Plant-list entry whose symbol is painted.
    #[arg(long = "entry", value_name = "ID")]
    pub entry: PlantlistEntryId,

    /// Plant list the entry belongs to; used to show the entry's own symbol.
    #[arg(long = "plantlist", value_name = "ID")]
    pub plantlist: Option<PlantlistId>,

    #[command(flatten)]
    pub selection: SelectionArgs,
}

#[derive(Args)]
pub struct ClearArgs {
    #[command(flatten)]
    pub plot: PlotArgs,

    #[command(flatten)]
    pub selection: SelectionArgs,
}

/// Which cells a paint or clear applies to.
///
/// Flags are applied as header clicks would be: `--all` first, then each
/// `--row`, each `--col` and each `--cell` toggle.
#[derive(Args)]
pub struct SelectionArgs {
    /// Select every cell.
    #[arg(long = "all")]
    pub all: bool,

    /// Toggle a whole row (repeatable).
    #[arg(long = "row", value_name = "ROW")]
    pub rows: Vec<u32>,

    /// Toggle a whole column (repeatable).
    #[arg(long = "col", value_name = "COL")]
    pub cols: Vec<u32>,

    /// Toggle one cell given as ROW,COL (repeatable).
    #[arg(long = "cell", value_name = "ROW,COL")]
    pub cells: Vec<CellCoord>,
}

impl SelectionArgs {
    pub fn plan(&self) -> SelectionPlan {
        SelectionPlan {
            all: self.all,
            rows: self.rows.clone(),
            cols: self.cols.clone(),
            cells: self.cells.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum LinkCommand {
    /// Link two entities.
    Add(LinkArgs),

    /// Unlink two entities.
    Remove(LinkArgs),

    /// Show what an entity is linked to and what it could be linked to.
    List {
        /// Kind of the entity to inspect (project, plot, plantlist).
        #[arg(value_name = "KIND")]
        primary: EntityKind,

        #[arg(value_name = "ID")]
        id: u32,

        /// Kind of entity to list.
        #[arg(value_name = "OTHER_KIND")]
        secondary: EntityKind,
    },
}

#[derive(Args)]
pub struct LinkArgs {
    /// Kind of the first entity (project, plot, plantlist).
    #[arg(value_name = "KIND")]
    pub primary: EntityKind,

    #[arg(value_name = "ID")]
    pub primary_id: u32,

    /// Kind of the second entity.
    #[arg(value_name = "OTHER_KIND")]
    pub secondary: EntityKind,

    /// One or more ids of the second kind.
    #[arg(value_name = "OTHER_ID", required = true, num_args = 1..)]
    pub secondary_ids: Vec<u32>,
}

#[derive(Subcommand)]
pub enum PlantsCommand {
    /// Search plants, optionally filtered.
    Search(SearchArgs),

    /// Follow a page link printed by an earlier search.
    Page {
        #[arg(value_name = "LINK")]
        link: String,
    },
}

#[derive(Args)]
pub struct SearchArgs {
    /// Free-text search; omit to browse main species.
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,

    /// Filter as FIELD=VALUE, e.g. edible_part=fruits (repeatable).
    #[arg(long = "filter", value_name = "FIELD=VALUE", value_parser = parse_filter)]
    pub filters: Vec<(SearchFilter, String)>,

    /// Only vegetables.
    #[arg(long = "vegetable")]
    pub vegetable: bool,

    /// Only evergreen plants.
    #[arg(long = "evergreen")]
    pub evergreen: bool,
}

#[derive(Subcommand)]
pub enum SymbolCommand {
    /// Choose the symbol a plant shows on a plant list.
    Set {
        #[arg(value_name = "PLANTLIST")]
        plantlist: PlantlistId,

        #[arg(value_name = "PLANT")]
        plant: PlantId,

        /// Icon classes, e.g. "fas fa-carrot".
        #[arg(long = "icon", value_name = "CLASSES")]
        icon: String,

        /// CSS colour, e.g. "#ff8800".
        #[arg(long = "symbol-color", value_name = "COLOR")]
        color: String,
    },
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_filter(raw: &str) -> Result<(SearchFilter, String), String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE but got '{raw}'"))?;
    let field = field.trim().to_ascii_lowercase();
    let filter = SearchFilter::ALL
        .into_iter()
        .find(|filter| filter.field() == field)
        .ok_or_else(|| {
            let known: Vec<_> = SearchFilter::ALL.iter().map(|f| f.field()).collect();
            format!("unknown filter '{field}', expected one of {}", known.join(", "))
        })?;
    Ok((filter, value.trim().to_string()))
}
