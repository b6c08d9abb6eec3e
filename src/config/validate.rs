//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas.size == 0 {
            return Err(ConfigError::ValidationError(
                "canvas.size must be > 0".into(),
            ));
        }
        if self.limits.max_file_size_mb == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_file_size_mb must be > 0".into(),
            ));
        }
        if self.limits.max_image_dimension == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_image_dimension must be > 0".into(),
            ));
        }
        if self.limits.decode_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "limits.decode_timeout_ms must be > 0".into(),
            ));
        }
        if self.frames.dir.is_empty() {
            return Err(ConfigError::ValidationError(
                "frames.dir must not be empty".into(),
            ));
        }
        if self.output.download_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "output.download_name must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_canvas_size() {
        let mut config = Config::default();
        config.canvas.size = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("canvas.size"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.limits.decode_timeout_ms = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("decode_timeout_ms"));
    }

    #[test]
    fn test_validate_rejects_empty_frames_dir() {
        let mut config = Config::default();
        config.frames.dir = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("frames.dir"));
    }
}
