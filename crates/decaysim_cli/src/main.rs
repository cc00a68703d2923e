//! decaysim: command-line front end for the decay simulator core.
//!
//! Stands in for a presentation layer: it resolves the owner from a flag,
//! forwards typed input to the core and prints what comes back.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use decaysim_core::seed::{apply_units, default_units, seed_elements, units_from_json};
use decaysim_core::{
    core_version, init_logging, CoreConfig, DisplayValues, OwnerId, PlotRenderer,
    ReportExporter, SimulationId, SimulationInput, SimulationRecord, SimulationStore,
};

/// Radioactive decay simulator.
#[derive(Parser)]
#[command(name = "decaysim")]
#[command(version = core_version(), about = "Simulate first-order radioactive decay.")]
struct Cli {
    /// JSON configuration file; flags below override its values.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database file.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Directory receiving static plot images.
    #[arg(long, global = true)]
    plot_dir: Option<PathBuf>,

    /// Absolute directory for rolling log files.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Insert the default elements and apply a units table.
    Seed(SeedArgs),
    /// List element choices.
    Elements,
    /// Compute and store a new simulation.
    Simulate(SimulateArgs),
    /// List the owner's simulations, most recent first.
    History(OwnerArgs),
    /// Show one simulation with formatted values.
    Show(ShowArgs),
    /// Recompute an existing simulation from new inputs.
    Edit(EditArgs),
    /// Write the PDF report of one simulation.
    Export(ExportArgs),
}

#[derive(Args)]
struct OwnerArgs {
    /// Id of the user owning the simulations.
    #[arg(long, default_value_t = 1)]
    owner: OwnerId,
}

#[derive(Args)]
struct SeedArgs {
    /// JSON units table, `{"Carbon-14": ["years", "grams"]}`; defaults apply
    /// when omitted.
    #[arg(long)]
    units: Option<PathBuf>,
}

#[derive(Args)]
struct SimulateArgs {
    #[command(flatten)]
    owner: OwnerArgs,

    /// Element id (see `decaysim elements`).
    #[arg(long)]
    element: i64,

    /// Initial quantity N0.
    #[arg(long, allow_hyphen_values = true)]
    n0: f64,

    /// Elapsed time, in the element's time unit.
    #[arg(long, allow_hyphen_values = true)]
    t: f64,
}

#[derive(Args)]
struct ShowArgs {
    #[command(flatten)]
    owner: OwnerArgs,

    #[arg(long)]
    id: SimulationId,

    /// Also write the interactive chart fragment to this file.
    #[arg(long)]
    html: Option<PathBuf>,
}

#[derive(Args)]
struct EditArgs {
    #[command(flatten)]
    owner: OwnerArgs,

    #[arg(long)]
    id: SimulationId,

    /// New element id; keeps the current element when omitted.
    #[arg(long)]
    element: Option<i64>,

    /// New initial quantity; keeps the current value when omitted.
    #[arg(long, allow_hyphen_values = true)]
    n0: Option<f64>,

    /// New elapsed time; keeps the current value when omitted.
    #[arg(long, allow_hyphen_values = true)]
    t: Option<f64>,
}

#[derive(Args)]
struct ExportArgs {
    #[command(flatten)]
    owner: OwnerArgs,

    #[arg(long)]
    id: SimulationId,

    /// Output directory or file; defaults to `simulation_{id}.pdf` in the
    /// working directory.
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    if let Some(log_dir) = &config.log_dir {
        let log_dir = log_dir
            .to_str()
            .ok_or_else(|| anyhow!("log directory is not valid UTF-8: {}", log_dir.display()))?;
        init_logging(&config.log_level, log_dir).map_err(|err| anyhow!(err))?;
    }

    let store = SimulationStore::new(config.database());
    let exporter = ReportExporter::new(PlotRenderer::default(), &config.plot_dir);

    match cli.command {
        Commands::Seed(args) => cmd_seed(&store, args),
        Commands::Elements => cmd_elements(&store),
        Commands::Simulate(args) => cmd_simulate(&store, args),
        Commands::History(args) => cmd_history(&store, args),
        Commands::Show(args) => cmd_show(&store, &exporter, args),
        Commands::Edit(args) => cmd_edit(&store, args),
        Commands::Export(args) => cmd_export(&store, &exporter, args),
    }
}

fn resolve_config(cli: &Cli) -> Result<CoreConfig> {
    let mut config = match &cli.config {
        Some(path) => CoreConfig::load(path).map_err(|err| anyhow!(err))?,
        None => CoreConfig::default(),
    };
    if let Some(db) = &cli.db {
        config.database_path = db.clone();
    }
    if let Some(plot_dir) = &cli.plot_dir {
        config.plot_dir = plot_dir.clone();
    }
    if let Some(log_dir) = &cli.log_dir {
        config.log_dir = Some(log_dir.clone());
    }
    Ok(config)
}

fn cmd_seed(store: &SimulationStore, args: SeedArgs) -> Result<()> {
    let units = match &args.units {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read units table {}", path.display()))?;
            units_from_json(&raw).context("Invalid units table")?
        }
        None => default_units(),
    };

    let conn = store.database().connect().context("Failed to open database")?;
    let inserted = seed_elements(&conn).context("Failed to seed elements")?;
    let updated = apply_units(&conn, &units).context("Failed to apply units")?;

    println!("Seeded {inserted} element(s); updated units of {updated} element(s).");
    Ok(())
}

fn cmd_elements(store: &SimulationStore) -> Result<()> {
    let elements = store.elements().context("Failed to list elements")?;
    if elements.is_empty() {
        println!("No elements. Run `decaysim seed` first.");
        return Ok(());
    }

    println!("{:>4}  {:<14} {:>14}  {}", "ID", "ELEMENT", "HALF-LIFE", "UNITS");
    for element in elements {
        println!(
            "{:>4}  {:<14} {:>14}  {} / {}",
            element.id, element.name, element.half_life, element.time_unit, element.quantity_unit
        );
    }
    Ok(())
}

fn cmd_simulate(store: &SimulationStore, args: SimulateArgs) -> Result<()> {
    let input = SimulationInput {
        element_id: args.element,
        n0: args.n0,
        t: args.t,
    };
    let record = store
        .submit(args.owner.owner, &input)
        .context("Simulation rejected")?;
    print_record(&record)
}

fn cmd_history(store: &SimulationStore, args: OwnerArgs) -> Result<()> {
    let records = store
        .list(args.owner)
        .context("Failed to list simulations")?;
    if records.is_empty() {
        println!("No simulations yet.");
        return Ok(());
    }

    for record in records {
        let display = DisplayValues::of(&record)
            .with_context(|| format!("Stored simulation {} is inconsistent", record.id))?;
        println!(
            "#{:<5} {}  {:<14} N0={} t={} {}  N(t)={} {}",
            record.id,
            display.timestamp,
            record.element_name_snapshot,
            record.n0,
            record.t,
            record.unit_snapshot,
            display.nt,
            record.quantity_unit_snapshot
        );
    }
    Ok(())
}

fn cmd_show(store: &SimulationStore, exporter: &ReportExporter, args: ShowArgs) -> Result<()> {
    let detail = exporter
        .detail(store, args.id, args.owner.owner)
        .with_context(|| format!("Cannot show simulation {}", args.id))?;
    print_record(&detail.record)?;

    if let Some(path) = &args.html {
        fs::write(path, &detail.plot_markup)
            .with_context(|| format!("Failed to write chart to {}", path.display()))?;
        println!("Chart fragment written to {}", path.display());
    }
    Ok(())
}

fn cmd_edit(store: &SimulationStore, args: EditArgs) -> Result<()> {
    let owner = args.owner.owner;
    let current = store
        .get(args.id, owner)
        .with_context(|| format!("Cannot edit simulation {}", args.id))?;
    let input = SimulationInput {
        element_id: args.element.unwrap_or(current.element_id),
        n0: args.n0.unwrap_or(current.n0),
        t: args.t.unwrap_or(current.t),
    };

    let record = store
        .edit(args.id, owner, &input)
        .context("Edit rejected")?;
    print_record(&record)
}

fn cmd_export(store: &SimulationStore, exporter: &ReportExporter, args: ExportArgs) -> Result<()> {
    let report = exporter
        .export_for_owner(store, args.id, args.owner.owner)
        .with_context(|| format!("Cannot export simulation {}", args.id))?;

    let target = output_path(args.out.as_deref(), &report.filename);
    fs::write(&target, &report.bytes)
        .with_context(|| format!("Failed to write report to {}", target.display()))?;
    println!(
        "Wrote {} ({} bytes, {})",
        target.display(),
        report.bytes.len(),
        report.content_type
    );
    Ok(())
}

fn output_path(out: Option<&Path>, filename: &str) -> PathBuf {
    match out {
        Some(dir) if dir.is_dir() => dir.join(filename),
        Some(file) => file.to_path_buf(),
        None => PathBuf::from(filename),
    }
}

fn print_record(record: &SimulationRecord) -> Result<()> {
    let display = DisplayValues::of(record)
        .with_context(|| format!("Stored simulation {} is inconsistent", record.id))?;
    let unit = &record.unit_snapshot;
    let quantity_unit = &record.quantity_unit_snapshot;

    println!("Simulation #{}", record.id);
    println!("  Element:    {}", record.element_name_snapshot);
    println!("  Half-life:  {} {unit}", record.half_life_snapshot);
    println!("  N0:         {} {quantity_unit}", record.n0);
    println!("  t:          {} {unit}", record.t);
    println!("  lambda:     {} 1/{unit}", display.lambda);
    println!("  N(t):       {} {quantity_unit}", display.nt);
    println!("  Computed:   {} UTC", display.timestamp);
    Ok(())
}
