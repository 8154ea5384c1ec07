//! # Beamcalc CLI
//!
//! Command-line front end for the cantilever and voltage drop calculators.
//!
//! ```text
//! calc_cli cantilever intermediate --force "1200 lbf" --distance "15 ft" --length "25 ft"
//! calc_cli voltage-drop --source "24 V" --current "2 A" --gauge 12 --length "100 ft"
//! calc_cli run canopy.bcalc --today 2026-01-01
//! ```
//!
//! Logging goes to stderr and is filtered with `RUST_LOG` (default `info`).

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use calc_core::calculations::cantilever::{
    self, CantileverInput, CantileverLoad, CantileverResult, Stiffness,
};
use calc_core::calculations::voltage_drop::{self, VoltageDropInput, VoltageDropResult, WireResistance};
use calc_core::calculations::CalculationOutput;
use calc_core::equations::generate_equations_markdown;
use calc_core::file_io::{export_curves_csv, load_calculation_set};
use calc_core::materials::WireTable;
use calc_core::sampling::{Response, DEFAULT_SAMPLE_POINTS};
use calc_core::units::{available_units, unit_display, Dimension, Quantity};

#[derive(Parser)]
#[command(name = "calc_cli")]
#[command(about = "Cantilever beam and wire voltage drop calculator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Cantilever deflection, slope, shear and moment
    Cantilever {
        #[command(subcommand)]
        command: CantileverCommand,
    },
    /// Voltage at a load fed through a wire run
    VoltageDrop(VoltageDropArgs),
    /// Print or write the equations reference
    Equations(EquationsArgs),
    /// Evaluate every item in a saved calculation set
    Run(RunArgs),
    /// List selectable units for a dimension (e.g. "force", "flexural_rigidity")
    Units(UnitsArgs),
}

#[derive(Subcommand)]
enum CantileverCommand {
    /// Point load at the free end
    EndLoad(EndLoadArgs),
    /// Point load at a distance from the fixed end
    Intermediate(IntermediateArgs),
    /// Uniform load over the full span
    Uniform(UniformArgs),
}

#[derive(Args)]
struct EndLoadArgs {
    #[arg(long, default_value = "1200 lbf")]
    force: String,
    #[command(flatten)]
    beam: BeamArgs,
}

#[derive(Args)]
struct IntermediateArgs {
    #[arg(long, default_value = "1200 lbf")]
    force: String,
    /// Load position measured from the fixed end
    #[arg(long, default_value = "15 ft")]
    distance: String,
    #[command(flatten)]
    beam: BeamArgs,
}

#[derive(Args)]
struct UniformArgs {
    /// Load intensity (force per length)
    #[arg(long, default_value = "50 lbf/ft")]
    load: String,
    #[command(flatten)]
    beam: BeamArgs,
}

#[derive(Args)]
struct BeamArgs {
    #[arg(long, default_value = "25 ft")]
    length: String,
    /// Elastic modulus E
    #[arg(long, default_value = "27_500_000 lbf/in**2")]
    modulus: String,
    /// Second moment of area I
    #[arg(long, default_value = "209 in**4")]
    inertia: String,
    /// Flexural rigidity EI, replacing --modulus and --inertia
    #[arg(long)]
    ei: Option<String>,
    #[arg(long)]
    label: Option<String>,
    /// Grid points for sampled maxima and curves
    #[arg(long, default_value_t = DEFAULT_SAMPLE_POINTS)]
    samples: usize,
    /// Display small units (in, lbf) instead of large ones (ft, kip)
    #[arg(long)]
    minor: bool,
    /// Print the sampled curves as a table
    #[arg(long)]
    table: bool,
    /// Write the sampled curves to a CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct VoltageDropArgs {
    #[arg(long, default_value = "24 V")]
    source: String,
    #[arg(long, default_value = "2 A")]
    current: String,
    /// Total wire resistance
    #[arg(long, conflicts_with_all = ["gauge", "length", "conductors"])]
    resistance: Option<String>,
    /// Wire gauge to look up (e.g. 12, 4/0)
    #[arg(long, requires = "length")]
    gauge: Option<String>,
    /// One-way wire length
    #[arg(long, requires = "gauge")]
    length: Option<String>,
    #[arg(long, default_value_t = voltage_drop::DEFAULT_CONDUCTORS)]
    conductors: u32,
    /// CSV wire table with a `gauge,ohms_per_1000ft` header
    #[arg(long)]
    wire_table: Option<PathBuf>,
    #[arg(long)]
    label: Option<String>,
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct EquationsArgs {
    /// Output file; printed to stdout when omitted
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args)]
struct RunArgs {
    path: PathBuf,
    /// Evaluation date for the expiration check (defaults to today)
    #[arg(long)]
    today: Option<NaiveDate>,
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct UnitsArgs {
    dimension: String,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Cantilever { command } => run_cantilever(command),
        Command::VoltageDrop(args) => run_voltage_drop(args),
        Command::Equations(args) => write_equations(args),
        Command::Run(args) => run_set(args),
        Command::Units(args) => list_units(args),
    }
}

// ============================================================================
// Cantilever
// ============================================================================

fn run_cantilever(command: CantileverCommand) -> Result<()> {
    let (load, beam) = match command {
        CantileverCommand::EndLoad(args) => (CantileverLoad::EndLoad { force: args.force }, args.beam),
        CantileverCommand::Intermediate(args) => (
            CantileverLoad::IntermediateLoad {
                force: args.force,
                distance: args.distance,
            },
            args.beam,
        ),
        CantileverCommand::Uniform(args) => (
            CantileverLoad::UniformDistributedLoad { intensity: args.load },
            args.beam,
        ),
    };

    let stiffness = match &beam.ei {
        Some(ei) => Stiffness::Rigidity { ei: ei.clone() },
        None => Stiffness::Section {
            modulus: beam.modulus.clone(),
            inertia: beam.inertia.clone(),
        },
    };

    let mut input = CantileverInput {
        label: String::new(),
        load,
        length: beam.length.clone(),
        stiffness,
    };
    input.label = beam
        .label
        .clone()
        .unwrap_or_else(|| input.load_case().display_name().to_string());

    let result = cantilever::calculate(&input, beam.samples).context("cantilever calculation failed")?;

    if let Some(path) = &beam.csv {
        export_curves_csv(&result.curves, path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "curve export complete");
    }

    if beam.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print_cantilever(&result, beam.minor);
    if beam.table {
        print_curve_table(&result, beam.minor);
    }
    Ok(())
}

fn print_cantilever(result: &CantileverResult, minor: bool) {
    println!("═══════════════════════════════════════");
    println!("  {}", result.label.to_uppercase());
    println!("═══════════════════════════════════════");
    println!();
    println!("{}", result.load_case.markdown());
    println!("Maxima ({} grid points):", result.curves.first().map(|c| c.len()).unwrap_or(0));
    for response in Response::ALL {
        println!(
            "  {:<11} {}",
            format!("{}:", response.display_name()),
            unit_display(result.max_of(response), minor)
        );
    }
    println!();
}

fn print_curve_table(result: &CantileverResult, minor: bool) {
    let curves: Vec<_> = Response::ALL.iter().filter_map(|r| result.curve(*r)).collect();
    let Some(first) = curves.first() else {
        return;
    };

    println!(
        "{:<22} {:<28} {:<28} {:<28} {:<28}",
        "x", "Deflection", "Slope", "Shear", "Moment"
    );
    for i in 0..first.len() {
        let x = Quantity::new(first.points[i].0, Dimension::LENGTH);
        let mut row = format!("{:<22}", unit_display(x, minor));
        for curve in &curves {
            let value = Quantity::new(curve.points[i].1, curve.response.dimension());
            row.push_str(&format!(" {:<28}", unit_display(value, minor)));
        }
        println!("{}", row.trim_end());
    }
}

// ============================================================================
// Voltage drop
// ============================================================================

/// Fixed resistance, a gauge lookup, or the default circuit's wire when neither is given
fn wire_resistance(args: &VoltageDropArgs) -> Result<WireResistance> {
    match (&args.resistance, &args.gauge, &args.length) {
        (Some(total), None, None) => Ok(WireResistance::Fixed { total: total.clone() }),
        (None, Some(gauge), Some(length)) => Ok(WireResistance::Tabulated {
            gauge: gauge.clone(),
            length: length.clone(),
            conductors: args.conductors,
        }),
        (None, None, None) => Ok(VoltageDropInput::default().resistance),
        _ => bail!("give either --resistance or both --gauge and --length"),
    }
}

fn run_voltage_drop(args: VoltageDropArgs) -> Result<()> {
    let resistance = wire_resistance(&args)?;

    let table = match &args.wire_table {
        Some(path) => WireTable::load_from_csv(path)
            .with_context(|| format!("failed to load wire table {}", path.display()))?,
        None => WireTable::awg_copper(),
    };

    let input = VoltageDropInput {
        label: args.label.unwrap_or_else(|| VoltageDropInput::default().label),
        source: args.source,
        current: args.current,
        resistance,
    };
    let result = voltage_drop::calculate(&input, &table).context("voltage drop calculation failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", voltage_drop::markdown());
        print_voltage_drop(&result);
    }
    Ok(())
}

fn print_voltage_drop(result: &VoltageDropResult) {
    println!("{}:", result.label);
    println!("  Source:      {}", unit_display(result.source, false));
    println!("  Current:     {}", unit_display(result.current, false));
    println!("  Resistance:  {}", unit_display(result.total_resistance, false));
    println!(
        "  Drop:        {} ({:.2}%)",
        unit_display(result.voltage_drop, false),
        result.percent_drop
    );
    println!("  At load:     {}", unit_display(result.load_voltage, false));
}

// ============================================================================
// Equations, calculation sets, units
// ============================================================================

fn write_equations(args: EquationsArgs) -> Result<()> {
    let markdown = generate_equations_markdown();
    match args.out {
        Some(path) => {
            fs::write(&path, &markdown).with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = markdown.len(), "equations written");
        }
        None => print!("{}", markdown),
    }
    Ok(())
}

fn run_set(args: RunArgs) -> Result<()> {
    let set = load_calculation_set(&args.path)
        .with_context(|| format!("failed to load {}", args.path.display()))?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    let runs = set
        .run_all(today)
        .with_context(|| format!("cannot evaluate {}", args.path.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&runs)?);
    } else {
        println!("{} ({} items)", set.meta.title, runs.len());
        println!();
        for run in &runs {
            match &run.outcome {
                Ok(CalculationOutput::Cantilever(result)) => print_cantilever(result, set.settings.minor_units),
                Ok(CalculationOutput::VoltageDrop(result)) => {
                    print_voltage_drop(result);
                    println!();
                }
                Err(e) => println!("{} [{}]: {}\n", run.label, e.error_code(), e),
            }
        }
    }

    let failed = runs.iter().filter(|r| r.outcome.is_err()).count();
    if failed > 0 {
        bail!("{} of {} calculations failed", failed, runs.len());
    }
    Ok(())
}

fn list_units(args: UnitsArgs) -> Result<()> {
    let Some(dimension) = Dimension::named(&args.dimension) else {
        let known: Vec<&str> = Dimension::NAMED.iter().map(|(name, _)| *name).collect();
        bail!("unknown dimension '{}'; expected one of: {}", args.dimension, known.join(", "));
    };

    let units = available_units(dimension);
    if units.is_empty() {
        println!("No selectable units for {}", dimension);
    }
    for unit in units {
        println!("{}", unit);
    }
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
