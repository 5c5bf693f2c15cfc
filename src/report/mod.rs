//! Reporting utilities: terminal formatting and the reference sample run.

pub mod format;

pub use format::*;

use crate::calc::compute;
use crate::domain::{CurtainType, Measurement, QuantityResult};
use crate::error::QuoteError;

/// One reference curtain case and its outcome.
#[derive(Debug, Clone)]
pub struct SampleCase {
    pub description: &'static str,
    pub measurement: Measurement,
    pub curtain: CurtainType,
    pub outcome: Result<QuantityResult, QuoteError>,
}

/// The reference cases, one per curtain type.
pub const SAMPLE_CASES: [(&str, f64, f64, CurtainType); 5] = [
    ("Sheer on S Track (2000mm x 2700mm)", 2000.0, 2700.0, CurtainType::SheerOnSTrack),
    (
        "Sheer on S Track with Drop > 3m (2000mm x 3100mm)",
        2000.0,
        3100.0,
        CurtainType::SheerOnSTrackLongDrop,
    ),
    ("Drape on S Track (3000mm x 2140mm)", 3000.0, 2140.0, CurtainType::DrapeOnSTrack),
    ("Drape on Silon Track (2000mm x 2700mm)", 2000.0, 2700.0, CurtainType::DrapeOnSilonTrack),
    (
        "Sheer on Silon Track or Rod (2000mm x 2700mm)",
        2000.0,
        2700.0,
        CurtainType::SheerOnSilonTrackOrRod,
    ),
];

/// Run every reference case. Failures are recorded, not propagated.
pub fn run_samples() -> Vec<SampleCase> {
    SAMPLE_CASES
        .iter()
        .map(|&(description, width_mm, drop_mm, curtain)| SampleCase {
            description,
            measurement: Measurement { width_mm, drop_mm },
            curtain,
            outcome: compute(width_mm, drop_mm, curtain),
        })
        .collect()
}

/// Format the outcome of [`run_samples`].
pub fn format_samples(cases: &[SampleCase]) -> String {
    let mut out = String::new();
    for case in cases {
        out.push_str(&format!("--- {} ---\n", case.description));
        match &case.outcome {
            Ok(result) => out.push_str(&format_quantities(case.measurement, case.curtain, result)),
            Err(e) => out.push_str(&format!("Error: {e}\n")),
        }
    }
    out
}
