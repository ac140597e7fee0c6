//! Blur scoring pipeline: decode, Laplacian, variance, classify

mod decode;
mod laplacian;

// Re-export public API
pub use decode::decode;
pub use laplacian::{laplacian, laplacian_variance, variance};

use crate::config::BlurConfig;
use crate::error::BlurError;

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlurReport {
    pub is_blurry: bool,
    // Laplacian variance, rounded to 2 decimals
    pub score: f64,
}

/// Round half away from zero to 2 decimal places
pub fn round_score(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}

/// Decode `data` and classify it against `config.threshold`
///
/// Classification uses the full-precision variance; only the reported
/// score is rounded.
pub fn check_blur(data: &[u8], config: &BlurConfig) -> Result<BlurReport, BlurError> {
    let img = decode(data, config.max_decode_bytes)?;
    let variance = laplacian_variance(&img);

    let report = BlurReport {
        is_blurry: config.is_blurry(variance),
        score: round_score(variance),
    };

    log::debug!(
        "Scored {}x{} image: variance {:.4} (threshold {}), blurry: {}",
        img.width(),
        img.height(),
        variance,
        config.threshold,
        report.is_blurry
    );

    Ok(report)
}
