use imageproc::image::ImageError;

#[derive(Debug, thiserror::Error)]
pub enum BlurError {
    /// The buffer is not an image in any format the decoder understands
    #[error("Invalid image format")]
    InvalidImage(#[source] ImageError),

    /// The image decoded but exceeds the decoder's resource limits
    #[error("image exceeds decoder limits: {0}")]
    Limits(#[source] ImageError),

    #[error("threshold must be a positive, finite number (got {0})")]
    InvalidThreshold(f64),

    #[error("{0}")]
    Internal(String),
}

impl BlurError {
    /// Whether the failure was caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            BlurError::InvalidImage(_) | BlurError::InvalidThreshold(_)
        )
    }
}

impl From<ImageError> for BlurError {
    fn from(err: ImageError) -> Self {
        match err {
            // truncated buffers surface as io errors from the in-memory reader
            ImageError::Decoding(_)
            | ImageError::Unsupported(_)
            | ImageError::Parameter(_)
            | ImageError::IoError(_) => BlurError::InvalidImage(err),
            ImageError::Limits(_) => BlurError::Limits(err),
            _ => BlurError::Internal(err.to_string()),
        }
    }
}
