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

use std::{env,fs,path::{Path,PathBuf}};
use chrono::{DateTime,Utc};
use serde::{Deserialize,Serialize,de::DeserializeOwned};
use tracing::{debug,info};
use crate::{
    ephemeris::{EphemerisParameters,PerturbationCoefficients},
    position::EcefPosition,
    gps_time::{time_of_reference_week,GpsWeekTime},
    errors::{OdinGnssError,Result}
};

/// env var that can be used to point to a directory with odin_gnss config files
pub const CONFIG_DIR_ENV: &str = "ODIN_GNSS_CONFIGS";

/// relative default location for config files, which follows the ODIN configs/<crate>/ convention
pub const DEFAULT_CONFIG_DIR: &str = "configs/odin_gnss";

/// one decoded broadcast ephemeris of a satellite, optionally with the time to evaluate it at and a
/// reference position to compare against. This is what the `get_sv_position` tool reads from RON files
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct EphemerisSnapshot {
    pub prn: u32,
    pub label: String,
    pub week: u32, // full GPS week of ephemeris reference time
    pub ephemeris: EphemerisParameters,

    #[serde(default)]
    pub perturbations: PerturbationCoefficients,

    #[serde(default)]
    pub eval_time: Option<f64>, // seconds of reference week

    #[serde(default)]
    pub expected: Option<EcefPosition>,

    #[serde(default="default_tolerance")]
    pub tolerance: f64 // per axis, in meters
}

fn default_tolerance()->f64 { 1e-2 }

impl EphemerisSnapshot {
    pub fn validate (&self)->Result<()> {
        self.ephemeris.validate()?;
        self.perturbations.validate()
    }

    pub fn reference_epoch (&self)->Result<GpsWeekTime> {
        GpsWeekTime::new( self.week, self.ephemeris.reference_time)
    }

    /// evaluation time in seconds of the reference week for a GPST date, which can be in a different week
    pub fn eval_time_for_gpst (&self, date: DateTime<Utc>)->Result<f64> {
        let t = GpsWeekTime::from_gpst( date)?;
        time_of_reference_week( &self.reference_epoch()?, &t)
    }
}

/// look up a config file: as given, in $ODIN_GNSS_CONFIGS, or in ./configs/odin_gnss/
pub fn find_config_file (filename: &str)->Option<PathBuf> {
    let path = Path::new(filename);
    if path.is_file() { return Some(path.to_path_buf()) }

    if let Ok(dir) = env::var(CONFIG_DIR_ENV) {
        let path = Path::new(&dir).join(filename);
        if path.is_file() { return Some(path) }
    }

    let path = Path::new(DEFAULT_CONFIG_DIR).join(filename);
    if path.is_file() { Some(path) } else { None }
}

pub fn load_config<C> (filename: &str)->Result<C> where C: DeserializeOwned {
    let path = find_config_file(filename).ok_or_else( || OdinGnssError::ConfigNotFound(filename.to_string()))?;
    info!("loading config {:?}", path);

    let data = fs::read_to_string(&path)?;
    parse_config( &data)
}

pub fn parse_config<C> (data: &str)->Result<C> where C: DeserializeOwned {
    let config = ron::from_str( data)?;
    debug!("parsed config of {} bytes", data.len());
    Ok(config)
}
