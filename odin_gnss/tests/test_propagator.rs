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

use nalgebra::{Rotation3,Vector3};
use odin_gnss::{
    compute_position, EcefPosition, EphemerisParameters, PerturbationCoefficients,
    errors::OdinGnssError,
    gnss_constants::{MU_EARTH, OMEGA_DOT_EARTH, SECONDS_PER_WEEK},
    propagator::{eccentric_anomaly, time_from_ephemeris_epoch, true_anomaly},
    PI, TWO_PI
};

/// unit tests for broadcast ephemeris propagation
/// run with "cargo test -p odin_gnss --test test_propagator -- --nocapture"

/* #region test-data *************************************************************/

// GPS PRN 11, toe = GPST 2018-01-07 00:00:00
const PRN11_EPH: EphemerisParameters = EphemerisParameters {
    sqrt_semi_major_axis: 5153.75480270,
    eccentricity: 0.0167867515702,
    inclination: 0.903782727230,
    right_ascension: -0.657960408566,
    argument_of_perigee: 0.173129682312,
    mean_anomaly: -0.286954703389,
    reference_time: 0.0,
    right_ascension_rate: -0.868929051526e-8,
};

const PRN11_PC: PerturbationCoefficients = PerturbationCoefficients {
    delta_n: 0.583845748090e-8,
    cuc: -0.379979610443e-6,
    cus: 0.277347862720e-5,
    crc: 0.293218750000e3,
    crs: -0.965625000000e1,
    cic: 0.199303030968e-6,
    cis: 0.173225998878e-6,
    idot: 0.789318592573e-10,
};

// same closed form evaluated independently in double precision
const PRN11_POS_2100: EcefPosition = EcefPosition { x: 19899577.981407084, y: -16447676.074701414, z: 3938120.7146418476 };

/* #endregion test-data */

/// two-body position computed with rotation matrices and a converged Kepler solution (atan2 form)
fn two_body_position (eph: &EphemerisParameters, t: f64)->EcefPosition {
    let e = eph.eccentricity;
    let a = eph.semi_major_axis();
    let n = (MU_EARTH / (a*a*a)).sqrt();
    let t_k = time_from_ephemeris_epoch( t, eph.reference_time);
    let m = eph.mean_anomaly + n * t_k;

    let mut ea = m;
    for _ in 0..50 {
        let d = (ea - e * ea.sin() - m) / (1.0 - e * ea.cos());
        ea -= d;
        if d.abs() < 1e-15 { break }
    }

    let v = ((1.0 - e*e).sqrt() * ea.sin()).atan2( ea.cos() - e);
    let r = a * (1.0 - e * ea.cos());
    let u = v + eph.argument_of_perigee;
    let omega = eph.right_ascension + (eph.right_ascension_rate - OMEGA_DOT_EARTH) * t_k - OMEGA_DOT_EARTH * eph.reference_time;

    let p_orb = Vector3::new( r * u.cos(), r * u.sin(), 0.0);
    let rot = Rotation3::from_axis_angle( &Vector3::z_axis(), omega) * Rotation3::from_axis_angle( &Vector3::x_axis(), eph.inclination);
    EcefPosition::from( rot * p_orb)
}

fn normalize_pi (a: f64)->f64 {
    let x = a.rem_euclid(TWO_PI);
    if x > PI { x - TWO_PI } else { x }
}

fn assert_bit_identical (p1: &EcefPosition, p2: &EcefPosition) {
    assert_eq!( p1.x.to_bits(), p2.x.to_bits());
    assert_eq!( p1.y.to_bits(), p2.y.to_bits());
    assert_eq!( p1.z.to_bits(), p2.z.to_bits());
}

#[test]
fn test_prn11_position () {
    let p = compute_position( &PRN11_EPH, 2100.0, &PRN11_PC);
    println!("PRN 11 at 2100s: {p}");
    println!("deviation: {:.6} m", p.max_axis_deviation( &PRN11_POS_2100));

    assert!( p.is_within( &PRN11_POS_2100, 1e-2));

    let a = PRN11_EPH.semi_major_axis();
    let e = PRN11_EPH.eccentricity;
    let r = p.length();
    assert!( r > a * (1.0 - e) - 1000.0 && r < a * (1.0 + e) + 1000.0);
}

#[test]
fn test_determinism () {
    for t in [-300000.0, -2100.0, 0.0, 2100.0, 43200.0, 302401.0] {
        let p1 = compute_position( &PRN11_EPH, t, &PRN11_PC);
        let p2 = compute_position( &PRN11_EPH, t, &PRN11_PC);
        assert_bit_identical( &p1, &p2);
    }
}

#[test]
fn test_time_from_ephemeris_epoch () {
    assert_eq!( time_from_ephemeris_epoch( 2100.0, 0.0), 2100.0);
    assert_eq!( time_from_ephemeris_epoch( 302400.0, 0.0), 302400.0); // boundary itself is not folded
    assert_eq!( time_from_ephemeris_epoch( -302400.0, 0.0), -302400.0);
    assert_eq!( time_from_ephemeris_epoch( 302401.0, 0.0), -302399.0);
    assert_eq!( time_from_ephemeris_epoch( -302401.0, 0.0), 302399.0);
    assert_eq!( time_from_ephemeris_epoch( 302401.0 + SECONDS_PER_WEEK, SECONDS_PER_WEEK), -302399.0);
    assert_eq!( time_from_ephemeris_epoch( 10.0, 604790.0), 20.0);
}

#[test]
fn test_week_rollover_forward () {
    // t_k > 302400 folds back into previous week
    let p1 = compute_position( &PRN11_EPH, 302401.0, &PRN11_PC);
    let p2 = compute_position( &PRN11_EPH, 302401.0 - SECONDS_PER_WEEK, &PRN11_PC);
    println!("forward rollover: {p1} / {p2}");
    assert_bit_identical( &p1, &p2);
}

#[test]
fn test_week_rollover_backward () {
    // t_k < -302400 folds forward into next week
    let eph = EphemerisParameters { reference_time: 500000.0, ..PRN11_EPH };
    let p1 = compute_position( &eph, 500000.0 - 302401.0, &PRN11_PC);
    let p2 = compute_position( &eph, 500000.0 + 302399.0, &PRN11_PC);
    println!("backward rollover: {p1} / {p2}");
    assert_bit_identical( &p1, &p2);
}

#[test]
fn test_shifted_reference_week () {
    // same folded t_k but toe one week apart: the orbit is identical, only earth rotation since
    // start of week (OMEGA_DOT_EARTH * toe) rotates the result about the z axis
    let eph1 = EphemerisParameters { reference_time: 0.0, ..PRN11_EPH };
    let eph2 = EphemerisParameters { reference_time: SECONDS_PER_WEEK, ..PRN11_EPH };

    let p1 = compute_position( &eph1, 302401.0, &PRN11_PC);
    let p2 = compute_position( &eph2, 302401.0 + SECONDS_PER_WEEK, &PRN11_PC);
    println!("shifted reference week: {p1} / {p2}");

    assert_eq!( p1.z.to_bits(), p2.z.to_bits());
    assert!( (p1.length() - p2.length()).abs() < 1e-6);

    let dlon = normalize_pi( p2.y.atan2(p2.x) - p1.y.atan2(p1.x));
    let expected_dlon = normalize_pi( -OMEGA_DOT_EARTH * SECONDS_PER_WEEK);
    assert!( normalize_pi( dlon - expected_dlon).abs() < 1e-9);
}

#[test]
fn test_zero_eccentricity_anomaly () {
    for m in [-3.0, -0.286954703389, 0.0, 0.5, 1.0, 3.1, 6.0, 100.0] {
        assert_eq!( eccentric_anomaly( m, 0.0).to_bits(), m.to_bits());
    }

    // for e == 0 true anomaly is the principal value of E
    for ea in [-3.0, -1.0, 0.0, 0.5, 2.0, 3.0] {
        assert!( (true_anomaly( ea, 0.0) - ea).abs() < 1e-12);
    }
}

#[test]
fn test_kepler_solution () {
    let e = PRN11_EPH.eccentricity;
    for m in [-3.0, -1.0, -0.286954703389, 0.0, 0.7, 2.0, 3.1] {
        let ea = eccentric_anomaly( m, e);
        let residual = ea - e * ea.sin() - m;
        println!("M={m:6.3}, E={ea:.15}, residual={residual:e}");
        assert!( residual.abs() < 1e-12);
    }
}

#[test]
fn test_circular_unperturbed_orbit () {
    let eph = EphemerisParameters { eccentricity: 0.0, ..PRN11_EPH };
    let pc = PerturbationCoefficients::zero();

    for i in 0..24 {
        let t = -43200.0 + (i as f64) * 3600.0;
        let p = compute_position( &eph, t, &pc);
        let p_ref = two_body_position( &eph, t);

        assert!( p.is_within( &p_ref, 1e-3), "t={t}: {p} != {p_ref}");
        assert!( (p.length() - eph.semi_major_axis()).abs() < 1e-3);
    }
}

#[test]
fn test_eccentric_unperturbed_orbit () {
    let pc = PerturbationCoefficients::zero();

    for i in 0..72 {
        let t = (i as f64) * 600.0;
        let p = compute_position( &PRN11_EPH, t, &pc);
        let p_ref = two_body_position( &PRN11_EPH, t);

        assert!( p.is_within( &p_ref, 1e-3), "t={t}: {p} != {p_ref}");
    }
}

#[test]
fn test_continuity_across_true_anomaly_branch () {
    let n = PRN11_EPH.computed_mean_motion() + PRN11_PC.delta_n;
    let dt = 10.0;
    let max_step = 70000.0; // ECEF speed of GPS satellites stays well below 7 km/s

    let mut p_last = compute_position( &PRN11_EPH, 0.0, &PRN11_PC);
    let mut v_last = true_anomaly( eccentric_anomaly( PRN11_EPH.mean_anomaly, PRN11_EPH.eccentricity), PRN11_EPH.eccentricity);
    let mut n_branch_jumps = 0;

    for i in 1..5000 { // > 1 orbit
        let t = (i as f64) * dt;
        let p = compute_position( &PRN11_EPH, t, &PRN11_PC);
        assert!( p.distance_to( &p_last) < max_step, "discontinuity at t={t}");

        let m_k = PRN11_EPH.mean_anomaly + n * time_from_ephemeris_epoch( t, PRN11_EPH.reference_time);
        let v = true_anomaly( eccentric_anomaly( m_k, PRN11_EPH.eccentricity), PRN11_EPH.eccentricity);
        if (v - v_last).abs() > PI { n_branch_jumps += 1 }

        p_last = p;
        v_last = v;
    }

    println!("true anomaly branch jumps: {n_branch_jumps}");
    assert!( n_branch_jumps >= 1);
}

#[test]
fn test_invalid_input_propagates () {
    let eph = EphemerisParameters { eccentricity: 1.5, ..PRN11_EPH };
    let p = compute_position( &eph, 2100.0, &PRN11_PC);
    println!("e=1.5: {p}");
    assert!( !p.is_finite());
    assert!( p.max_axis_deviation( &PRN11_POS_2100).is_nan());
    assert!( !p.is_within( &PRN11_POS_2100, 1e-2));
}

#[test]
fn test_validate () {
    assert!( PRN11_EPH.validate().is_ok());
    assert!( PRN11_PC.validate().is_ok());

    let eph = EphemerisParameters { eccentricity: 1.0, ..PRN11_EPH };
    assert!( matches!( eph.validate(), Err(OdinGnssError::InvalidEphemeris(_))));

    let eph = EphemerisParameters { sqrt_semi_major_axis: -5153.75480270, ..PRN11_EPH };
    assert!( matches!( eph.validate(), Err(OdinGnssError::InvalidEphemeris(_))));

    let eph = EphemerisParameters { inclination: f64::NAN, ..PRN11_EPH };
    match eph.validate() {
        Err(e) => { println!("{e}"); assert!( e.to_string().contains("inclination")) }
        Ok(_) => panic!("NaN inclination not detected")
    }

    let pc = PerturbationCoefficients { crs: f64::INFINITY, ..PRN11_PC };
    assert!( matches!( pc.validate(), Err(OdinGnssError::InvalidEphemeris(_))));
}

#[test]
fn test_orbit_metrics () {
    let a = PRN11_EPH.semi_major_axis();
    let period = PRN11_EPH.orbital_period();
    println!("A = {a} m, period = {period} s");

    assert!( (a - 26561188.566353317).abs() < 1e-6);
    assert!( (period - 43080.64593801735).abs() < 1e-6);
}

#[test]
fn test_mean_motion_consistency () {
    // circular, unperturbed orbit with a node that co-rotates with earth: after exactly one
    // orbital period the satellite has to be back at its start position
    let eph = EphemerisParameters { eccentricity: 0.0, right_ascension_rate: OMEGA_DOT_EARTH, ..PRN11_EPH };
    let pc = PerturbationCoefficients::zero();
    let period = eph.orbital_period();

    let p0 = compute_position( &eph, 0.0, &pc);
    let p1 = compute_position( &eph, period, &pc);
    println!("after {period} s: {p0} / {p1}");
    assert!( p0.is_within( &p1, 1e-6));

    // half a period later the satellite is on the opposite side
    let p2 = compute_position( &eph, period / 2.0, &pc);
    assert!( (p0.distance_to( &p2) - 2.0 * eph.semi_major_axis()).abs() < 1e-6);
}
