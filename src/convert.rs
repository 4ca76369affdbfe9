//! Humidity and temperature compensation in the sensor's ticks.

use crate::error::ProtocolError;
use crate::frame::Params;

const RH_MIN: f32 = 0.0;
const RH_MAX: f32 = 100.0;
// 65.35 ticks per %RH
const RH_NUM: f64 = 6535.0;
const RH_DEN: f64 = 100.0;

const T_MIN: f32 = -45.0;
const T_MAX: f32 = 130.0;
// 374.4857142857 ticks per °C above -45 °C
const T_NUM: f64 = 3_744_857_142_857.0;
const T_DEN: f64 = 1e10;

fn check_range(value: f32, min: f32, max: f32) -> Result<(), ProtocolError> {
    // NaN fails both comparisons.
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ProtocolError::OutOfRange { value, min, max })
    }
}

// Only called on non-negative values, where truncating `x + 0.5`
// rounds half away from zero. Scale factors are kept as exact integer
// ratios so near-half products are not pushed across the boundary.
fn round(value: f64) -> u16 {
    (value + 0.5) as u16
}

/// Relative humidity in %RH, `0..=100`.
pub fn raw_humidity(rh_percent: f32) -> Result<u16, ProtocolError> {
    check_range(rh_percent, RH_MIN, RH_MAX)?;
    Ok(round(f64::from(rh_percent) * RH_NUM / RH_DEN))
}

/// Temperature in °C, `-45..=130`.
pub fn raw_temperature(temp_celsius: f32) -> Result<u16, ProtocolError> {
    check_range(temp_celsius, T_MIN, T_MAX)?;
    Ok(round((f64::from(temp_celsius) - f64::from(T_MIN)) * T_NUM / T_DEN))
}

/// Ambient conditions passed along with conditioning and measurement commands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Compensation {
    /// %RH
    pub humidity: f32,
    /// °C
    pub temperature: f32,
}

impl Compensation {
    pub const fn new(humidity: f32, temperature: f32) -> Self {
        Self {
            humidity,
            temperature,
        }
    }

    pub fn to_params(&self) -> Result<Params, ProtocolError> {
        Ok(Params::Compensated {
            raw_humidity: raw_humidity(self.humidity)?,
            raw_temperature: raw_temperature(self.temperature)?,
        })
    }
}

impl Default for Compensation {
    /// 50 %RH, 25 °C.
    fn default() -> Self {
        Self::new(50.0, 25.0)
    }
}
