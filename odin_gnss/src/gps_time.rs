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
use chrono::{DateTime,TimeDelta,Utc};
use serde::{Deserialize,Serialize};
use crate::{
    gnss_constants::{GPS_EPOCH_UNIX_SECONDS, SECONDS_PER_WEEK, HALF_WEEK_SECONDS},
    errors::{invalid_time,OdinGnssError,Result}
};

const WEEK_SECS: i64 = SECONDS_PER_WEEK as i64;

/// a point in GPS time expressed as full week number (not truncated to the 10 bit broadcast value)
/// and seconds of that week. This is the timescale of ephemeris reference times, which means callers
/// can use it to align evaluation times before propagating
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct GpsWeekTime {
    pub week: u32,
    pub seconds_of_week: f64
}

impl GpsWeekTime {
    pub fn new (week: u32, seconds_of_week: f64)->Result<Self> {
        if !seconds_of_week.is_finite() || seconds_of_week < 0.0 || seconds_of_week >= SECONDS_PER_WEEK {
            return Err( invalid_time!("seconds of week outside [0,{}): {}", SECONDS_PER_WEEK, seconds_of_week))
        }
        Ok( GpsWeekTime { week, seconds_of_week })
    }

    /// interpret `date` as a GPST wall clock reading (GPST does not have leap seconds)
    pub fn from_gpst (date: DateTime<Utc>)->Result<Self> {
        let elapsed = date - gps_epoch();
        if elapsed < TimeDelta::zero() {
            return Err( invalid_time!("date before GPS epoch: {}", date))
        }

        let secs = elapsed.num_seconds();
        let week = u32::try_from( secs / WEEK_SECS).map_err( |_| invalid_time!("GPS week out of range: {}", date))?;
        let seconds_of_week = (secs % WEEK_SECS) as f64 + (elapsed.subsec_nanos() as f64 * 1e-9);

        Ok( GpsWeekTime { week, seconds_of_week })
    }

    /// convert a UTC date given the current GPS-UTC leap second offset (18s since 2017)
    pub fn from_utc (date: DateTime<Utc>, leap_seconds: i64)->Result<Self> {
        Self::from_gpst( date + TimeDelta::seconds( leap_seconds))
    }

    /// the GPST wall clock reading for this time (rounded to nanoseconds)
    pub fn to_gpst (&self)->DateTime<Utc> {
        let secs = self.seconds_of_week.floor();
        let nanos = ((self.seconds_of_week - secs) * 1e9).round() as i64;

        gps_epoch() 
            + TimeDelta::seconds( self.week as i64 * WEEK_SECS + secs as i64) 
            + TimeDelta::nanoseconds( nanos)
    }

    /// signed difference in seconds, spanning week boundaries
    pub fn seconds_since (&self, other: &GpsWeekTime)->f64 {
        ((self.week as f64 - other.week as f64) * SECONDS_PER_WEEK) + (self.seconds_of_week - other.seconds_of_week)
    }
}

impl fmt::Display for GpsWeekTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GPS week {} + {:.3} s", self.week, self.seconds_of_week)
    }
}

/// align `t` with the week of the ephemeris reference epoch `toe`, i.e. return the (possibly negative or
/// > one week) time in seconds of the reference week that can be passed into propagation.
/// Times more than half a week away from `toe` are outside the ephemeris fit and rejected
pub fn time_of_reference_week (toe: &GpsWeekTime, t: &GpsWeekTime)->Result<f64> {
    let dt = t.seconds_since( toe);
    if dt.abs() > HALF_WEEK_SECONDS {
        return Err( invalid_time!("{} is {:.0} s away from ephemeris reference epoch {}", t, dt, toe))
    }
    Ok( toe.seconds_of_week + dt)
}

pub fn gps_epoch ()->DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + TimeDelta::seconds( GPS_EPOCH_UNIX_SECONDS)
}
