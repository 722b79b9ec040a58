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

use std::fmt;
use nalgebra::Vector3;
use serde::{Deserialize,Serialize};

/// satellite position in the Earth-centered, Earth-fixed frame (meters).
/// Note that we do not use uom here since this is always the result of a single propagation step
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct EcefPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64
}

impl EcefPosition {
    pub fn new (x: f64, y: f64, z: f64)->Self {
        EcefPosition{x,y,z}
    }

    /// geocentric distance
    pub fn length (&self)->f64 {
        ((self.x * self.x) + (self.y * self.y) + (self.z * self.z)).sqrt()
    }

    pub fn distance_to (&self, p: &EcefPosition)->f64 {
        let dx = p.x - self.x;
        let dy = p.y - self.y;
        let dz = p.z - self.z;
        (dx*dx + dy*dy + dz*dz).sqrt()
    }

    /// largest absolute coordinate difference. This is NaN if any coordinate of either position is NaN
    pub fn max_axis_deviation (&self, p: &EcefPosition)->f64 {
        let dx = (p.x - self.x).abs();
        let dy = (p.y - self.y).abs();
        let dz = (p.z - self.z).abs();
        if dx.is_nan() || dy.is_nan() || dz.is_nan() { f64::NAN } else { dx.max(dy).max(dz) }
    }

    /// per-axis absolute tolerance check (false if any coordinate is NaN)
    pub fn is_within (&self, p: &EcefPosition, tolerance: f64)->bool {
        (p.x - self.x).abs() < tolerance && (p.y - self.y).abs() < tolerance && (p.z - self.z).abs() < tolerance
    }

    pub fn is_finite (&self)->bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl fmt::Display for EcefPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ {:.3}, {:.3}, {:.3} ] m", self.x, self.y, self.z)
    }
}

impl From<EcefPosition> for Vector3<f64> {
    fn from (p: EcefPosition)->Self {
        Vector3::new( p.x, p.y, p.z)
    }
}

impl From<&Vector3<f64>> for EcefPosition {
    fn from (v: &Vector3<f64>)->Self {
        EcefPosition { x: v[0], y: v[1], z: v[2] }
    }
}

impl From<Vector3<f64>> for EcefPosition {
    fn from (v: Vector3<f64>)->Self {
        EcefPosition::from( &v)
    }
}
