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

/// GPS broadcast ephemeris constants (IS-GPS-200 §20.3.3.4.3). These are fixed properties of the
/// system and therefore not part of any per-call input or configuration

/// WGS-84 value of earth's gravitational parameter in m³/s²
pub const MU_EARTH: f64 = 3.986005e14;

/// WGS-84 value of earth's rotation rate in rad/s
pub const OMEGA_DOT_EARTH: f64 = 7.2921151467e-5;

pub const SECONDS_PER_WEEK: f64 = 604800.0;
pub const HALF_WEEK_SECONDS: f64 = SECONDS_PER_WEEK / 2.0;

/// number of fixed-point refinements of the eccentric anomaly.
/// Note this is not a convergence criterion - three steps are enough for the near circular
/// orbits of GNSS satellites, but not for highly eccentric orbits
pub const KEPLER_ITERATIONS: usize = 3;

/// start of GPS time (1980-01-06T00:00:00 GPST, week 0) as unix epoch seconds
pub const GPS_EPOCH_UNIX_SECONDS: i64 = 315964800;
