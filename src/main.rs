use std::path::PathBuf;

use clap::Parser;
use iss_flyover::config::{Config, Overrides};
use iss_flyover::flyover::{Coordinates, FlyoverWindow, LookupError, PassResolver};
use iss_flyover::logging::init_logging;
use iss_flyover::render::{error_line, render_passes};
use iss_flyover::server;

/// iss-flyover — when does the ISS next pass over me?
///
/// Looks up your public IP, geolocates it, and asks the pass prediction
/// service for the upcoming ISS passes over that spot.
///
/// Examples:
///   iss-flyover
///   iss-flyover --tz Europe/Stockholm --passes 3
///   iss-flyover --ip 162.245.144.188
///   iss-flyover --lat 40.7 --lon -74.0 --json
///   iss-flyover --serve --port 8080
#[derive(Parser)]
#[command(name = "iss-flyover", version, about, long_about = None)]
struct Cli {
    /// Skip the IP lookup and geolocate this address instead.
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    ip: Option<String>,

    /// Latitude (-90 to 90). With --lon, skips IP and geolocation lookups.
    #[arg(long, allow_hyphen_values = true, requires = "lon")]
    lat: Option<f64>,

    /// Longitude (-180 to 180).
    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    lon: Option<f64>,

    /// Number of passes to request.
    #[arg(long, short = 'n', value_parser = clap::value_parser!(u32).range(1..=100))]
    passes: Option<u32>,

    /// IANA timezone for printed rise times (e.g. Europe/Oslo). Defaults to UTC.
    #[arg(long)]
    tz: Option<String>,

    /// Print passes as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Per-request timeout in seconds.
    #[arg(long)]
    timeout: Option<u64>,

    /// IP echo service URL.
    #[arg(long)]
    ip_url: Option<String>,

    /// Geolocation service root; the IP is appended as a path segment.
    #[arg(long)]
    geo_url: Option<String>,

    /// Pass prediction service URL.
    #[arg(long)]
    flyover_url: Option<String>,

    /// Config file (JSON). Defaults to <config dir>/iss-flyover/config.json if present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start the HTTP API server instead of printing passes.
    #[arg(long)]
    serve: bool,

    /// Server bind address.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server port.
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// Debug logging for the lookups (RUST_LOG overrides).
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // ── Configuration ───────────────────────────────────────────

    let config = Config::load(cli.config.as_deref())
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        })
        .apply(Overrides {
            ip_url: cli.ip_url.clone(),
            geo_url: cli.geo_url.clone(),
            flyover_url: cli.flyover_url.clone(),
            timeout_secs: cli.timeout,
            passes: cli.passes,
            tz: cli.tz.clone(),
        });

    let tz = config.timezone().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    // ── Server mode ─────────────────────────────────────────────

    if cli.serve {
        let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("Error: Cannot start runtime: {}", e);
            std::process::exit(1);
        });
        if let Err(e) = runtime.block_on(server::start(&cli.host, cli.port, &config)) {
            eprintln!("Server error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    // ── Lookup ──────────────────────────────────────────────────

    let resolver = PassResolver::from_config(&config);
    let passes = lookup(&cli, &resolver).unwrap_or_else(|e| {
        eprintln!("{}", error_line(&e));
        std::process::exit(1);
    });

    if cli.json {
        match serde_json::to_string_pretty(&passes) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print!("{}", render_passes(&passes, tz));
    }
}

fn lookup(cli: &Cli, resolver: &PassResolver) -> Result<Vec<FlyoverWindow>, LookupError> {
    // Priority: --lat/--lon > --ip > full chain

    if let (Some(lat), Some(lon)) = (cli.lat, cli.lon) {
        let coords = Coordinates::new(lat, lon);
        if !coords.in_range() {
            eprintln!("Error: Invalid coordinates. Lat: -90..90, Lon: -180..180");
            std::process::exit(1);
        }
        return resolver.passes_for_coords(coords);
    }

    if let Some(ref ip) = cli.ip {
        return resolver.passes_for_ip(ip);
    }

    resolver.next_passes_for_my_location()
}
