/*
 * Copyright © 2025, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use anyhow::{anyhow,Result};
use chrono::DateTime;
use clap::Parser;
use tracing::{debug,info,warn};
use tracing_subscriber::EnvFilter;
use odin_gnss::{compute_position, load_config, EphemerisSnapshot, GpsWeekTime};

#[derive(Parser,Debug)]
#[command(about="compute ECEF position of a satellite from a broadcast ephemeris snapshot")]
struct CliOpts {
    /// RON file with EphemerisSnapshot (looked up in $ODIN_GNSS_CONFIGS and configs/odin_gnss/)
    #[arg(default_value="gps_prn11_2018_007.ron")]
    config: String,

    /// evaluation time in seconds of reference week (overrides snapshot eval_time)
    #[arg(short,long)]
    time: Option<f64>,

    /// evaluation time as RFC 3339 GPST date (overrides snapshot eval_time)
    #[arg(short,long,conflicts_with="time")]
    date: Option<String>,

    /// per-axis tolerance in meters for comparison with expected position
    #[arg(long)]
    tolerance: Option<f64>,

    /// print position as JSON
    #[arg(long)]
    json: bool,

    #[arg(short,long)]
    verbose: bool,
}

fn main ()->Result<()> {
    let args = CliOpts::parse();
    init_tracing( args.verbose);

    let snapshot: EphemerisSnapshot = load_config( &args.config)?;
    info!("loaded ephemeris snapshot '{}' for PRN {}", snapshot.label, snapshot.prn);

    // propagation is total, so we only report invalid input
    if let Err(e) = snapshot.validate() {
        warn!("ephemeris snapshot failed validation, position will not be meaningful: {e}");
    }

    let t = get_eval_time( &args, &snapshot)?;
    debug!("t_k = {} s", t - snapshot.ephemeris.reference_time);

    let pos = compute_position( &snapshot.ephemeris, t, &snapshot.perturbations);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&pos)?);
    } else {
        println!("PRN {} at t={} s:", snapshot.prn, t);
        println!("  X: {:.6} m", pos.x);
        println!("  Y: {:.6} m", pos.y);
        println!("  Z: {:.6} m", pos.z);
    }

    if let Some(expected) = &snapshot.expected {
        let tolerance = args.tolerance.unwrap_or( snapshot.tolerance);
        println!("expected: {expected}");
        println!("max axis deviation: {:.6} m", pos.max_axis_deviation( expected));

        if pos.is_within( expected, tolerance) {
            println!("position matches within tolerance of {tolerance} m.");
        } else {
            println!("position does not match expected values within {tolerance} m.");
        }
    }

    Ok(())
}

fn init_tracing (verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else( |_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn get_eval_time (args: &CliOpts, snapshot: &EphemerisSnapshot)->Result<f64> {
    if let Some(t) = args.time {
        Ok(t)
    } else if let Some(ds) = &args.date {
        let date = DateTime::parse_from_rfc3339(ds)?.to_utc();
        info!("{ds} is {}", GpsWeekTime::from_gpst( date)?);
        Ok( snapshot.eval_time_for_gpst( date)?)
    } else {
        snapshot.eval_time.ok_or_else( || anyhow!("no evaluation time in {} and none specified", args.config))
    }
}
