//! Upload validation before decoding.

use crate::config::LimitsConfig;
use crate::error::PipelineError;
use crate::types::UploadedFile;

/// Validates uploads before the pipeline runs.
pub struct Validator {
    limits: LimitsConfig,
}

impl Validator {
    /// Create a new validator with the given limits.
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Perform quick validation before full decode.
    ///
    /// Checks:
    /// - Upload is non-empty
    /// - Declared MIME type is JPEG, PNG, or WEBP
    /// - Upload size is within limits
    /// - Content starts with valid image magic bytes
    pub fn validate(&self, file: &UploadedFile) -> Result<(), PipelineError> {
        if file.is_empty() {
            return Err(PipelineError::EmptyFile {
                name: file.file_name.clone(),
            });
        }

        if !file.has_supported_mime() {
            return Err(PipelineError::InvalidFileType {
                name: file.file_name.clone(),
                mime: file.mime.clone(),
            });
        }

        let max_bytes = self.limits.max_file_size_mb * 1024 * 1024;
        if file.len() > max_bytes {
            return Err(PipelineError::FileTooLarge {
                name: file.file_name.clone(),
                size_mb: file.len() / (1024 * 1024),
                max_mb: self.limits.max_file_size_mb,
            });
        }

        self.check_magic_bytes(file)?;

        Ok(())
    }

    /// Check content magic bytes to verify the upload is a decodable image.
    fn check_magic_bytes(&self, file: &UploadedFile) -> Result<(), PipelineError> {
        let mut header = [0u8; 12];
        let bytes_read = file.bytes.len().min(12);
        header[..bytes_read].copy_from_slice(&file.bytes[..bytes_read]);

        if bytes_read < 4 {
            return Err(PipelineError::Decode {
                name: file.file_name.clone(),
                message: "File too small to be a valid image".to_string(),
            });
        }

        if !Self::is_valid_image_header(&header, bytes_read) {
            return Err(PipelineError::Decode {
                name: file.file_name.clone(),
                message: "Unrecognized image format (invalid magic bytes)".to_string(),
            });
        }

        Ok(())
    }

    /// Check if the header bytes match a supported image format.
    fn is_valid_image_header(header: &[u8; 12], bytes_read: usize) -> bool {
        if bytes_read < 4 {
            return false;
        }

        // JPEG: FF D8 FF
        if header[0] == 0xFF && header[1] == 0xD8 && header[2] == 0xFF {
            return true;
        }

        // PNG: 89 50 4E 47
        if header[0] == 0x89 && header[1] == b'P' && header[2] == b'N' && header[3] == b'G' {
            return true;
        }

        // WebP: RIFF....WEBP
        if header[0] == b'R' && header[1] == b'I' && header[2] == b'F' && header[3] == b'F' {
            if bytes_read >= 12 {
                return header[8] == b'W'
                    && header[9] == b'E'
                    && header[10] == b'B'
                    && header[11] == b'P';
            }
            // Could be WebP, allow it to proceed
            return true;
        }

        false
    }
}
