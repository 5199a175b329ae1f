mod pilot;
mod sim;

use bincode::config::standard;
use clap::Parser;
use helm_goal_payloads::GeoPoint;
use helm_rc_input::{read_params, Params};
use helm_traits::{ErrorKind, HelmError, HelmResult};
use log::info;
use pilot::{default_script, parse_geo_point};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Parameter file (RON). Built-in defaults when omitted.
    #[clap(long)]
    params: Option<PathBuf>,
    /// Simulated time between two updates, in milliseconds
    #[clap(long, default_value_t = 20, value_parser = clap::value_parser!(u64).range(1..))]
    tick_ms: u64,
    /// Write every tick to this file as bincode encoded goal frames
    #[clap(long)]
    record: Option<PathBuf>,
    /// Home point as lat,lon,alt. Arming the vehicle state is refused without it.
    #[clap(long, value_parser = parse_geo_point)]
    home: Option<GeoPoint>,
    /// Print the effective parameters and exit
    #[clap(long)]
    dump_params: bool,
    /// Log every frame
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> HelmResult<()> {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .map_err(|e| HelmError::new(ErrorKind::Other, format!("Failed to set up logger: {}", e)))?;

    let params = match &args.params {
        Some(path) => read_params(path)?,
        None => Params::default(),
    };
    if args.dump_params {
        println!("{}", params.to_ron_string()?);
        return Ok(());
    }

    let mut recorder = match &args.record {
        Some(path) => Some(BufWriter::new(File::create(path)?)),
        None => None,
    };

    let script = default_script(&params, args.tick_ms);
    let home = args.home.unwrap_or(GeoPoint::NAN);
    let summary = sim::run(&params, &script, args.tick_ms, home, |frame| {
        if let Some(writer) = recorder.as_mut() {
            bincode::encode_into_std_write(*frame, writer, standard()).map_err(|e| {
                HelmError::new(ErrorKind::Io, "Failed to record frame").add_context(&e.to_string())
            })?;
        }
        Ok(())
    })?;
    if let Some(mut writer) = recorder {
        writer.flush()?;
    }

    info!(
        "{} ticks, armed: {}, final state: {}",
        summary.ticks, summary.armed, summary.final_state
    );
    Ok(())
}
