//! Temperature unit conversions and the heat index approximation.
//!
//! Pure functions with no driver state; they operate on whatever readings
//! the caller already has.

/// Converts degrees Celsius to degrees Fahrenheit.
pub fn celsius_to_fahrenheit(c: f32) -> f32 {
    c * 1.8 + 32.0
}

/// Converts degrees Fahrenheit to degrees Celsius.
pub fn fahrenheit_to_celsius(f: f32) -> f32 {
    (f - 32.0) * 0.55555
}

/// Computes the heat index ("feels like" temperature) in degrees Fahrenheit.
///
/// Uses both Rothfusz and Steadman's equations:
/// <http://www.wpc.ncep.noaa.gov/html/heatindex_equation.shtml>
///
/// Steadman's simple estimate is used on its own when it comes out at or
/// below 79 °F; above that the full Rothfusz regression applies, with the
/// two empirical adjustments for very dry and very humid conditions.
///
/// `temperature` is in degrees Fahrenheit, `percent_humidity` in percent
/// relative humidity.
pub fn heat_index(temperature: f32, percent_humidity: f32) -> f32 {
    let t = temperature;
    let rh = percent_humidity;

    let mut hi = 0.5 * (t + 61.0 + ((t - 68.0) * 1.2) + (rh * 0.094));

    if hi > 79.0 {
        hi = -42.379
            + 2.04901523 * t
            + 10.14333127 * rh
            + -0.22475541 * t * rh
            + -0.00683783 * t * t
            + -0.05481717 * rh * rh
            + 0.00122874 * t * t * rh
            + 0.00085282 * t * rh * rh
            + -0.00000199 * t * t * rh * rh;

        if (rh < 13.0) && (80.0..=112.0).contains(&t) {
            hi -= ((13.0 - rh) * 0.25) * libm::sqrtf((17.0 - libm::fabsf(t - 95.0)) * 0.05882);
        } else if (rh > 85.0) && (80.0..=87.0).contains(&t) {
            hi += ((rh - 85.0) * 0.1) * ((87.0 - t) * 0.2);
        }
    }

    hi
}
