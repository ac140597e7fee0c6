pub mod config;
pub mod error;
pub mod image;

// Re-export commonly used types
pub use config::{BlurConfig, DEFAULT_MAX_DECODE_BYTES, DEFAULT_THRESHOLD};
pub use error::BlurError;
pub use image::{check_blur, BlurReport};
