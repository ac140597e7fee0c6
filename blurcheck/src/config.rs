use crate::error::BlurError;

/// Variance below which an image is classified as blurry
pub const DEFAULT_THRESHOLD: f64 = 200.0;

/// Decoder allocation budget per image, matching the `image` crate's default
pub const DEFAULT_MAX_DECODE_BYTES: u64 = 512 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BlurConfig {
    // Strict lower bound for a "sharp" Laplacian variance
    pub threshold: f64,
    // Upper bound on what the decoder may allocate for one image
    pub max_decode_bytes: u64,
}

impl Default for BlurConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            max_decode_bytes: DEFAULT_MAX_DECODE_BYTES,
        }
    }
}

impl BlurConfig {
    /// Build a config, rejecting thresholds that are not positive and finite
    pub fn new(threshold: f64) -> Result<Self, BlurError> {
        Self::default().with_threshold(Some(threshold))
    }

    pub fn with_threshold(self, threshold: Option<f64>) -> Result<Self, BlurError> {
        match threshold {
            Some(threshold) if !threshold.is_finite() || threshold <= 0.0 => {
                Err(BlurError::InvalidThreshold(threshold))
            }
            Some(threshold) => Ok(Self { threshold, ..self }),
            None => Ok(self),
        }
    }

    pub fn with_max_decode_bytes(self, max_decode_bytes: u64) -> Self {
        Self {
            max_decode_bytes,
            ..self
        }
    }

    pub fn is_blurry(&self, variance: f64) -> bool {
        variance < self.threshold
    }
}
