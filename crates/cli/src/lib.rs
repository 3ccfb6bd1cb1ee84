use anyhow::{bail, Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use route_graph::{AverageSpeed, GraphError, RouteMap, TripPlan, AVERAGE_SPEED_KMH};
use serde::Serialize;
use std::io::{self, BufRead};
use std::path::PathBuf;

mod report;
mod seed;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "route")]
#[command(about = "Shortest trips and reachability over a map of locations", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Map file (.json or .toml); the built-in map is used when omitted
    #[arg(long, global = true)]
    map: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan the shortest trip between two locations
    Trip(TripArgs),

    /// Group locations into components
    Components(ComponentsArgs),

    /// List locations and their outgoing routes
    Locations(LocationsArgs),
}

#[derive(Args)]
struct TripArgs {
    /// Origin location (prompted when omitted)
    #[arg(long)]
    from: Option<String>,

    /// Destination location (prompted when omitted)
    #[arg(long)]
    to: Option<String>,

    /// Average speed in km/h used for the trip duration
    #[arg(long, default_value_t = AVERAGE_SPEED_KMH)]
    speed: u32,

    /// Payment method shown with the trip
    #[arg(long, default_value = "Debit card")]
    payment: String,

    /// Output JSON format
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ComponentsArgs {
    /// Follow routes in both directions instead of outgoing only
    #[arg(long)]
    undirected: bool,

    /// Output JSON format
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct LocationsArgs {
    /// Output JSON format
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct TripOutput {
    origin: String,
    destination: String,
    route: Option<TripPlan>,
}

#[derive(Serialize)]
struct ComponentsOutput {
    mode: &'static str,
    components: Vec<Vec<String>>,
}

#[derive(Serialize)]
struct LocationOutput {
    id: usize,
    name: String,
    routes: Vec<RouteOutput>,
}

#[derive(Serialize)]
struct RouteOutput {
    to: String,
    distance_km: u32,
}

pub fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    // Keep stdout clean for JSON parsing
    let json_output = match &cli.command {
        Commands::Trip(args) => args.json,
        Commands::Components(args) => args.json,
        Commands::Locations(args) => args.json,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let map = seed::load_map(cli.map.as_deref())?;

    match cli.command {
        Commands::Trip(args) => run_trip(&map, args)?,
        Commands::Components(args) => run_components(&map, args)?,
        Commands::Locations(args) => run_locations(&map, args)?,
    }

    Ok(())
}

fn run_trip(map: &RouteMap, args: TripArgs) -> Result<()> {
    let speed = AverageSpeed::new(args.speed).context("Invalid --speed")?;
    log::debug!("Timing trips at {} km/h", speed.kmh());

    let origin = match args.from {
        Some(name) => name,
        None => prompt("Origin")?,
    };
    let destination = match args.to {
        Some(name) => name,
        None => prompt("Destination")?,
    };

    let result = match map.shortest_path_with(&origin, &destination, &speed) {
        Ok(result) => result,
        Err(GraphError::UnknownLocation(name)) => bail!("Invalid destination: {name}"),
        Err(err) => return Err(err.into()),
    };

    if args.json {
        let output = TripOutput {
            origin,
            destination,
            route: result.into_plan(),
        };
        print_stdout(&serde_json::to_string_pretty(&output)?)?;
    } else {
        print_stdout(&report::render_trip(
            &origin,
            &destination,
            &result,
            &args.payment,
        ))?;
    }
    Ok(())
}

fn run_components(map: &RouteMap, args: ComponentsArgs) -> Result<()> {
    let (mode, components) = if args.undirected {
        ("undirected", map.undirected_components())
    } else {
        ("reachability", map.reachability_partition())
    };

    if args.json {
        let output = ComponentsOutput { mode, components };
        print_stdout(&serde_json::to_string_pretty(&output)?)?;
    } else {
        print_stdout(&report::render_components(&components, args.undirected))?;
    }
    Ok(())
}

fn run_locations(map: &RouteMap, args: LocationsArgs) -> Result<()> {
    if args.json {
        let output: Vec<LocationOutput> = map
            .locations()
            .map(|loc| LocationOutput {
                id: loc.id.index(),
                name: loc.name.clone(),
                routes: map
                    .routes_from(loc.id)
                    .into_iter()
                    .map(|route| RouteOutput {
                        to: map.name(route.to).unwrap_or_default().to_string(),
                        distance_km: route.distance_km,
                    })
                    .collect(),
            })
            .collect();
        print_stdout(&serde_json::to_string_pretty(&output)?)?;
    } else {
        print_stdout(&report::render_locations(map))?;
    }
    Ok(())
}

/// Ask for a location name: interactive prompt on a terminal, one stdin line otherwise
fn prompt(label: &str) -> Result<String> {
    let value = if console::Term::stderr().is_term() {
        dialoguer::Input::<String>::new()
            .with_prompt(label)
            .interact_text()
            .with_context(|| format!("Failed to read {label}"))?
    } else {
        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .with_context(|| format!("Failed to read {label} from stdin"))?;
        line
    };

    let value = value.trim();
    if value.is_empty() {
        bail!("{label} is required");
    }
    Ok(value.to_string())
}
