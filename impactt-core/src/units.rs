//! Gaussian width conversions.
//!
//! Laser and beam widths are quoted as FWHM in most lab settings while the
//! simulator wants RMS sigmas; the ratio is 2*sqrt(2*ln 2).

use std::f64::consts::LN_2;

fn fwhm_over_rms() -> f64 {
    2.0 * (2.0 * LN_2).sqrt()
}

pub fn fwhm_to_rms(fwhm: f64) -> f64 {
    fwhm / fwhm_over_rms()
}

pub fn rms_to_fwhm(rms: f64) -> f64 {
    rms * fwhm_over_rms()
}
