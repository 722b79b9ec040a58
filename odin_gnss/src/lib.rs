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

//! satellite positions from GNSS broadcast ephemerides
//! 
//! The core of this crate is [`propagator::compute_position`], which maps a decoded broadcast
//! ephemeris (Keplerian elements plus harmonic corrections) and a time of week into an ECEF position.
//! Everything else supports callers of that function: value types, GPS week/time alignment,
//! RON configs for ephemeris snapshots and errors for caller side validation.

use std::f64::consts::{PI as STD_PI};

pub mod errors;
pub mod gnss_constants;
pub mod ephemeris;
pub mod position;
pub mod propagator;
pub mod gps_time;
pub mod config;

pub use ephemeris::{EphemerisParameters,PerturbationCoefficients};
pub use position::EcefPosition;
pub use propagator::compute_position;
pub use gps_time::GpsWeekTime;
pub use config::{EphemerisSnapshot,load_config};

// syntactic sugar - the orbit equations are just more readable this way
#[inline(always)] pub fn sin(x:f64) -> f64 { x.sin() }
#[inline(always)] pub fn cos(x:f64) -> f64 { x.cos() }
#[inline(always)] pub fn tan(x:f64) -> f64 { x.tan() }
#[inline(always)] pub fn atan(x:f64) -> f64 { x.atan() }
#[inline(always)] pub fn sqrt(x:f64) -> f64 { x.sqrt() }
#[inline(always)] pub fn pow2(x:f64) -> f64 { x*x }

pub const PI: f64 = STD_PI;
pub const TWO_PI: f64 = PI * 2.0;
