//! Quantity formulas for each curtain type.
//!
//! All inputs are millimeters. Paneled variants order fabric in whole
//! widths/meters and round up with `ceil`; the plain sheer variants are cut
//! from a continuous roll and keep fractional meters.

use crate::domain::{CurtainType, Measurement, QuantityResult};
use crate::error::QuoteError;

/// Fullness multiplier for sheer on S track.
const SHEER_S_TRACK_FULLNESS: f64 = 2.2;

/// Fullness multiplier for sheer on Silon track or rod.
const SHEER_SILON_FULLNESS: f64 = 2.5;

/// Side allowance added to the width, in centimeters (S track variants).
const S_TRACK_ALLOWANCE_CM: f64 = 44.0;

/// Side allowance added to the width, in millimeters (Silon track).
const SILON_ALLOWANCE_MM: f64 = 450.0;

/// Hem and heading allowance added to the drop, in millimeters.
const DROP_ALLOWANCE_MM: f64 = 300.0;

/// Usable roll width of long-drop sheer fabric, in centimeters.
const LONG_DROP_PANEL_CM: f64 = 300.0;

/// Usable width of one drape panel on S track, in centimeters.
const DRAPE_PANEL_CM: f64 = 140.0;

/// Usable width of one drape panel on Silon track, in millimeters.
const SILON_PANEL_MM: f64 = 700.0;

const MM_PER_M: f64 = 1000.0;
const MM_PER_CM: f64 = 10.0;

/// Compute the quantities for one curtain.
///
/// Fails with [`QuoteError::InvalidInput`] when `width_mm` or `drop_mm` is
/// negative, NaN or infinite. Negative values are rejected, never clamped.
pub fn compute(width_mm: f64, drop_mm: f64, curtain: CurtainType) -> Result<QuantityResult, QuoteError> {
    validate_mm("width", width_mm)?;
    validate_mm("drop", drop_mm)?;

    let result = match curtain {
        CurtainType::SheerOnSTrack => sheer_on_s_track(width_mm),
        CurtainType::SheerOnSTrackLongDrop => sheer_on_s_track_long_drop(width_mm, drop_mm),
        CurtainType::DrapeOnSTrack => drape_on_s_track(width_mm, drop_mm),
        CurtainType::DrapeOnSilonTrack => drape_on_silon_track(width_mm, drop_mm),
        CurtainType::SheerOnSilonTrackOrRod => sheer_on_silon_track_or_rod(width_mm),
    };
    Ok(result)
}

/// Convenience wrapper over [`compute`] for a [`Measurement`].
pub fn compute_measurement(m: Measurement, curtain: CurtainType) -> Result<QuantityResult, QuoteError> {
    compute(m.width_mm, m.drop_mm, curtain)
}

fn validate_mm(field: &'static str, value: f64) -> Result<(), QuoteError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(QuoteError::InvalidInput { field, value })
    }
}

fn sheer_on_s_track(width_mm: f64) -> QuantityResult {
    let making = width_mm * SHEER_S_TRACK_FULLNESS / MM_PER_M;
    sheer(making, width_mm)
}

fn sheer_on_s_track_long_drop(width_mm: f64, drop_mm: f64) -> QuantityResult {
    let width_cm = width_mm / MM_PER_CM;
    let making = (((width_cm + S_TRACK_ALLOWANCE_CM) * 2.0) / LONG_DROP_PANEL_CM).ceil();
    // Meters per panel, whole meters.
    let per_panel = (((drop_mm + DROP_ALLOWANCE_MM) * 2.0) / MM_PER_M).ceil();
    QuantityResult {
        making,
        fabric: per_panel * making,
        lining: None,
        track: width_mm / MM_PER_M,
        installation: width_mm / MM_PER_M,
    }
}

fn drape_on_s_track(width_mm: f64, drop_mm: f64) -> QuantityResult {
    let width_cm = width_mm / MM_PER_CM;
    let making = (((width_cm + S_TRACK_ALLOWANCE_CM) * 2.0) / DRAPE_PANEL_CM).ceil();
    drape(making, width_mm, drop_mm)
}

fn drape_on_silon_track(width_mm: f64, drop_mm: f64) -> QuantityResult {
    let widths = (((width_mm + SILON_ALLOWANCE_MM) * 2.0) / SILON_PANEL_MM).ceil();
    drape(widths, width_mm, drop_mm)
}

fn sheer_on_silon_track_or_rod(width_mm: f64) -> QuantityResult {
    let making = width_mm * SHEER_SILON_FULLNESS / MM_PER_M;
    sheer(making, width_mm)
}

fn sheer(making: f64, width_mm: f64) -> QuantityResult {
    QuantityResult {
        making,
        fabric: making,
        lining: None,
        track: width_mm / MM_PER_M,
        installation: width_mm / MM_PER_M,
    }
}

/// Drapes need `making` drops of fabric, rounded up to whole meters, and the
/// same length again in lining.
fn drape(making: f64, width_mm: f64, drop_mm: f64) -> QuantityResult {
    let fabric = (((drop_mm + DROP_ALLOWANCE_MM) * making) / MM_PER_M).ceil();
    QuantityResult {
        making,
        fabric,
        lining: Some(fabric),
        track: width_mm / MM_PER_M,
        installation: width_mm / MM_PER_M,
    }
}
