use anyhow::{Context, Result};
use blurcheck::{BlurConfig, DEFAULT_MAX_DECODE_BYTES, DEFAULT_THRESHOLD};
use clap::Parser;
use tokio::net::TcpListener;

#[derive(Parser, Debug)]
#[command(name = "blurcheck-server")]
#[command(about = "Blur Detection API (Binary): POST raw image bytes to /check-blur", long_about = None)]
#[command(version)]
pub struct Args {
    /// Host name or address to bind
    #[arg(long, env = "BLURCHECK_HOST", default_value = "localhost")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "BLURCHECK_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Laplacian variance below which an image counts as blurry
    #[arg(short, long, env = "BLURCHECK_THRESHOLD", default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f64,

    /// Largest request body accepted, in bytes
    #[arg(long, env = "BLURCHECK_MAX_BODY_BYTES", value_name = "BYTES", default_value_t = 32 * 1024 * 1024)]
    pub max_body_bytes: usize,

    /// Most memory the decoder may allocate for one image, in bytes
    #[arg(long, env = "BLURCHECK_MAX_DECODE_BYTES", value_name = "BYTES", default_value_t = DEFAULT_MAX_DECODE_BYTES)]
    pub max_decode_bytes: u64,

    /// Verbose output
    #[arg(short, long, default_value_t)]
    pub verbose: bool,

    /// Quiet mode (no logging)
    #[arg(short, long, default_value_t, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    pub fn blur_config(&self) -> Result<BlurConfig> {
        Ok(BlurConfig::new(self.threshold)
            .context("Invalid --threshold")?
            .with_max_decode_bytes(self.max_decode_bytes))
    }

    pub async fn bind(&self) -> Result<TcpListener> {
        TcpListener::bind((self.host.as_str(), self.port))
            .await
            .with_context(|| format!("Failed to bind {}:{}", self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_endpoint() {
        let args = Args::try_parse_from(["blurcheck-server"]).unwrap();
        assert_eq!(args.host, "localhost");
        assert_eq!(args.port, 8000);
        assert_eq!(args.threshold, 200.0);
        assert_eq!(args.max_body_bytes, 32 * 1024 * 1024);
        assert_eq!(args.blur_config().unwrap(), BlurConfig::default());
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "blurcheck-server",
            "--host",
            "0.0.0.0",
            "-p",
            "9000",
            "--threshold",
            "150.5",
            "--max-decode-bytes",
            "1048576",
        ])
        .unwrap();
        assert_eq!(args.host, "0.0.0.0");
        assert_eq!(args.port, 9000);
        let config = args.blur_config().unwrap();
        assert_eq!(config.threshold, 150.5);
        assert_eq!(config.max_decode_bytes, 1024 * 1024);
    }

    #[test]
    fn rejects_non_positive_threshold() {
        let args = Args::try_parse_from(["blurcheck-server", "--threshold", "0"]).unwrap();
        assert!(args.blur_config().is_err());
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Args::try_parse_from(["blurcheck-server", "-v", "-q"]).is_err());
    }
}
