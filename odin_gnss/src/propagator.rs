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

//! broadcast ephemeris orbit propagation (IS-GPS-200 §20.3.3.4.3 user algorithm).
//! 
//! This is a pure function of its arguments: there is no state, no I/O and no error return. Out of
//! range input (e.g. eccentricity >= 1) shows up as NaN/Inf coordinates, which callers can check with
//! [`EcefPosition::is_finite`] or avoid upfront with [`EphemerisParameters::validate`]

use crate::{
    ephemeris::{EphemerisParameters,PerturbationCoefficients},
    position::EcefPosition,
    gnss_constants::{OMEGA_DOT_EARTH, SECONDS_PER_WEEK, HALF_WEEK_SECONDS, KEPLER_ITERATIONS},
    sin, cos, tan, atan, sqrt
};

/// compute the ECEF position of a satellite at `eval_time` (seconds of the reference week).
/// Callers have to resolve week boundaries before calling - we only fold intra-week crossovers
pub fn compute_position (eph: &EphemerisParameters, eval_time: f64, pc: &PerturbationCoefficients)->EcefPosition {
    let e = eph.eccentricity;

    let a = eph.semi_major_axis();
    let n = eph.computed_mean_motion() + pc.delta_n;

    let t_k = time_from_ephemeris_epoch( eval_time, eph.reference_time);

    let m_k = eph.mean_anomaly + (n * t_k);
    let e_k = eccentric_anomaly( m_k, e);
    let v_k = true_anomaly( e_k, e);

    let phi_k = v_k + eph.argument_of_perigee; // argument of latitude
    let sin_2phi = sin( 2.0 * phi_k);
    let cos_2phi = cos( 2.0 * phi_k);

    // second harmonic perturbations
    let delta_u_k = (pc.cus * sin_2phi) + (pc.cuc * cos_2phi);
    let delta_r_k = (pc.crs * sin_2phi) + (pc.crc * cos_2phi);
    let delta_i_k = (pc.cis * sin_2phi) + (pc.cic * cos_2phi);

    let u_k = phi_k + delta_u_k;
    let r_k = a * (1.0 - (e * cos(e_k))) + delta_r_k;
    let i_k = eph.inclination + delta_i_k + (pc.idot * t_k);

    // position in orbital plane
    let x_k = r_k * cos(u_k);
    let y_k = r_k * sin(u_k);

    // longitude of ascending node, including earth rotation since start of week
    let omega_k = eph.right_ascension + ((eph.right_ascension_rate - OMEGA_DOT_EARTH) * t_k) - (OMEGA_DOT_EARTH * eph.reference_time);

    let sin_omega = sin(omega_k);
    let cos_omega = cos(omega_k);
    let cos_i = cos(i_k);

    EcefPosition {
        x: (x_k * cos_omega) - (y_k * cos_i * sin_omega),
        y: (x_k * sin_omega) + (y_k * cos_i * cos_omega),
        z: y_k * sin(i_k)
    }
}

/// time since ephemeris reference epoch, folded into [-302400,302400] to account for week crossovers
#[inline]
pub fn time_from_ephemeris_epoch (eval_time: f64, reference_time: f64)->f64 {
    let mut t_k = eval_time - reference_time;

    if t_k > HALF_WEEK_SECONDS { t_k -= SECONDS_PER_WEEK }
    if t_k < -HALF_WEEK_SECONDS { t_k += SECONDS_PER_WEEK }

    t_k
}

/// solve Kepler's equation M = E - e·sin(E) with a fixed number of Newton steps, starting at E = M.
/// For e == 0 the first step already leaves E unchanged
pub fn eccentric_anomaly (mean_anomaly: f64, eccentricity: f64)->f64 {
    let mut e_k = mean_anomaly;
    for _ in 0..KEPLER_ITERATIONS {
        e_k = e_k + (mean_anomaly - e_k + eccentricity * sin(e_k)) / (1.0 - eccentricity * cos(e_k));
    }
    e_k
}

/// half-angle form of the true anomaly. This deliberately uses atan (not atan2), i.e. the result
/// is the principal value in (-π,π) and jumps by 2π where E crosses odd multiples of π. All
/// subsequent uses are 2π periodic so positions stay continuous
#[inline]
pub fn true_anomaly (eccentric_anomaly: f64, eccentricity: f64)->f64 {
    2.0 * atan( sqrt( (1.0 + eccentricity) / (1.0 - eccentricity)) * tan( eccentric_anomaly / 2.0))
}
