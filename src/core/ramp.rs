use chrono::NaiveDate;

use crate::config::constants::{QUARTERS_PER_DAY, SUMMER_MONTH_WEIGHT, WINTER_MONTH_WEIGHT};

/// Winter multiplier matching a given summer multiplier so that the
/// month-weighted annual total stays at 1.0: redistribution, not growth.
pub fn winter_factor(summer_factor: f64) -> f64 {
    let s = SUMMER_MONTH_WEIGHT;
    let w = WINTER_MONTH_WEIGHT;
    (1.0 - (s / (s + w)) * summer_factor) / (w / (s + w))
}

/// Per-quarter-hour multiplier curve shifting baseload production into the
/// winter months: winter plateau January-February, linear fade through
/// March, summer plateau April-September, linear fade back through October,
/// winter plateau November-December.
pub fn seasonal_ramp_profile(year: i32, summer_factor: f64) -> Vec<f64> {
    let winter = winter_factor(summer_factor);

    let winter_a = quarters_between(year, 1, 1, year, 3, 1);
    let fade_down = quarters_between(year, 3, 1, year, 4, 1);
    let summer = quarters_between(year, 4, 1, year, 10, 1);
    let fade_up = quarters_between(year, 10, 1, year, 11, 1);
    let winter_b = quarters_between(year, 11, 1, year + 1, 1, 1);

    let mut profile = Vec::with_capacity(winter_a + fade_down + summer + fade_up + winter_b);
    profile.extend(std::iter::repeat(winter).take(winter_a));
    profile.extend(linspace(winter, summer_factor, fade_down));
    profile.extend(std::iter::repeat(summer_factor).take(summer));
    profile.extend(linspace(summer_factor, winter, fade_up));
    profile.extend(std::iter::repeat(winter).take(winter_b));
    profile
}

fn quarters_between(y0: i32, m0: u32, d0: u32, y1: i32, m1: u32, d1: u32) -> usize {
    let from = NaiveDate::from_ymd_opt(y0, m0, d0).expect("valid segment boundary");
    let to = NaiveDate::from_ymd_opt(y1, m1, d1).expect("valid segment boundary");
    (to - from).num_days() as usize * QUARTERS_PER_DAY
}

/// `count` evenly spaced values from `from` to `to`, both ends included.
fn linspace(from: f64, to: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    if count == 1 {
        return vec![from];
    }
    let step = (to - from) / (count - 1) as f64;
    (0..count).map(|i| from + step * i as f64).collect()
}
