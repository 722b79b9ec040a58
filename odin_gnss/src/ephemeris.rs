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

use serde::{Deserialize,Serialize};
use crate::{
    gnss_constants::MU_EARTH,
    errors::{invalid_ephemeris,OdinGnssError,Result},
    sqrt, pow2, TWO_PI
};

/// the Keplerian orbital elements of a broadcast ephemeris at its reference epoch.
/// All angles are in radians, times are in seconds of the reference week
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct EphemerisParameters {
    pub sqrt_semi_major_axis: f64, // √A in m^½
    pub eccentricity: f64,
    pub inclination: f64, // i0 at reference time
    pub right_ascension: f64, // Ω0 at start of reference week
    pub argument_of_perigee: f64, // ω
    pub mean_anomaly: f64, // M0 at reference time
    pub reference_time: f64, // toe
    pub right_ascension_rate: f64, // Ω̇ in rad/s
}

impl EphemerisParameters {
    pub fn new (sqrt_semi_major_axis: f64, eccentricity: f64, inclination: f64, right_ascension: f64, 
                argument_of_perigee: f64, mean_anomaly: f64, reference_time: f64, right_ascension_rate: f64)->Self {
        EphemerisParameters { 
            sqrt_semi_major_axis, eccentricity, inclination, right_ascension, 
            argument_of_perigee, mean_anomaly, reference_time, right_ascension_rate 
        }
    }

    /// A in meters
    #[inline]
    pub fn semi_major_axis (&self)->f64 {
        pow2(self.sqrt_semi_major_axis)
    }

    /// uncorrected mean motion n0 in rad/s
    pub fn computed_mean_motion (&self)->f64 {
        sqrt( MU_EARTH / self.semi_major_axis().powi(3))
    }

    /// nominal (unperturbed) orbit period in seconds
    pub fn orbital_period (&self)->f64 {
        TWO_PI / self.computed_mean_motion()
    }

    /// range check for callers that want to reject ephemerides before propagating them.
    /// Propagation itself does not call this - out-of-range input just yields NaN/Inf positions
    pub fn validate (&self)->Result<()> {
        let fields = [
            ("sqrt_semi_major_axis", self.sqrt_semi_major_axis),
            ("eccentricity", self.eccentricity),
            ("inclination", self.inclination),
            ("right_ascension", self.right_ascension),
            ("argument_of_perigee", self.argument_of_perigee),
            ("mean_anomaly", self.mean_anomaly),
            ("reference_time", self.reference_time),
            ("right_ascension_rate", self.right_ascension_rate),
        ];
        check_finite( &fields)?;

        if self.sqrt_semi_major_axis <= 0.0 {
            return Err( invalid_ephemeris!("sqrt_semi_major_axis not positive: {}", self.sqrt_semi_major_axis))
        }
        if !(0.0..1.0).contains( &self.eccentricity) {
            return Err( invalid_ephemeris!("eccentricity outside [0,1): {}", self.eccentricity))
        }

        Ok(())
    }
}

/// the harmonic correction terms of a broadcast ephemeris. They come from a different part of the
/// navigation message than the Keplerian elements and are kept as a flat bundle
#[derive(Debug,Clone,Copy,PartialEq,Default,Serialize,Deserialize)]
pub struct PerturbationCoefficients {
    pub delta_n: f64, // mean motion correction in rad/s
    pub cuc: f64, // argument of latitude (cos,sin) in rad
    pub cus: f64,
    pub crc: f64, // orbit radius (cos,sin) in m
    pub crs: f64,
    pub cic: f64, // inclination (cos,sin) in rad
    pub cis: f64,
    pub idot: f64, // inclination rate in rad/s
}

impl PerturbationCoefficients {
    pub fn new (delta_n: f64, cuc: f64, cus: f64, crc: f64, crs: f64, cic: f64, cis: f64, idot: f64)->Self {
        PerturbationCoefficients { delta_n, cuc, cus, crc, crs, cic, cis, idot }
    }

    /// no corrections at all, which reduces propagation to the two-body problem
    pub fn zero ()->Self {
        PerturbationCoefficients::default()
    }

    pub fn validate (&self)->Result<()> {
        check_finite( &[
            ("delta_n", self.delta_n),
            ("cuc", self.cuc),
            ("cus", self.cus),
            ("crc", self.crc),
            ("crs", self.crs),
            ("cic", self.cic),
            ("cis", self.cis),
            ("idot", self.idot),
        ])
    }
}

fn check_finite (fields: &[(&str,f64)])->Result<()> {
    match fields.iter().find( |(_,v)| !v.is_finite()) {
        Some((name,v)) => Err( invalid_ephemeris!("{} not finite: {}", name, v)),
        None => Ok(())
    }
}
