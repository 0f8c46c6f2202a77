//! Resize and crop via ImageMagick's `convert`.
//!
//! The pixel work happens in the external tool; this module only builds the
//! invocation from a [`ResizePlan`] and reports failures. Install:
//! - Windows: `winget install ImageMagick.ImageMagick`
//! - macOS: `brew install imagemagick`
//! - Linux: `apt install imagemagick` or equivalent

use std::ffi::OsString;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::domain::ArtworkError;
use super::geometry::ResizePlan;
use super::traits::ImageTransform;
use crate::config::ImageConfig;

/// Runs `convert <src> -resize <geom> -gravity center -crop WxH+0+0 -quality Q <dst>`.
#[derive(Debug, Clone)]
pub struct ImageMagick {
    convert_path: PathBuf,
    quality: u8,
}

impl ImageMagick {
    pub fn new(config: &ImageConfig) -> Self {
        Self {
            convert_path: config.convert_path.clone(),
            quality: config.quality.clamp(1, 100),
        }
    }

    /// Arguments passed to `convert`, in order.
    pub fn command_args(&self, source: &Path, plan: &ResizePlan, destination: &Path) -> Vec<OsString> {
        vec![
            source.into(),
            "-resize".into(),
            plan.mode.to_geometry_arg().into(),
            "-gravity".into(),
            "center".into(),
            "-crop".into(),
            format!("{}x{}+0+0", plan.target_width, plan.target_height).into(),
            "-quality".into(),
            self.quality.to_string().into(),
            destination.into(),
        ]
    }

    /// First line of `convert -version` (for diagnostics)
    pub fn version(&self) -> Option<String> {
        Command::new(&self.convert_path)
            .arg("-version")
            .output()
            .ok()
            .filter(|o| o.status.success())
            .and_then(|o| {
                String::from_utf8_lossy(&o.stdout)
                    .lines()
                    .next()
                    .map(|line| line.trim().to_string())
            })
    }

    fn describe(&self, args: &[OsString]) -> String {
        std::iter::once(self.convert_path.as_os_str())
            .chain(args.iter().map(OsString::as_os_str))
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl ImageTransform for ImageMagick {
    fn apply(
        &self,
        source: &Path,
        plan: &ResizePlan,
        destination: &Path,
    ) -> Result<String, ArtworkError> {
        let args = self.command_args(source, plan, destination);
        let command_line = self.describe(&args);

        let output = Command::new(&self.convert_path)
            .args(&args)
            .output()
            .map_err(|e| {
                ArtworkError::Transform(format!(
                    "Failed to run {}: {}",
                    self.convert_path.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ArtworkError::Transform(format!(
                "{} failed: {}",
                command_line,
                stderr.trim()
            )));
        }

        Ok(command_line)
    }
}

/// Pixel size of an encoded image, read from its header.
pub fn probe_dimensions(data: &[u8]) -> Result<(u32, u32), ArtworkError> {
    image::ImageReader::new(Cursor::new(data))
        .with_guessed_format()?
        .into_dimensions()
        .map_err(|e| ArtworkError::InvalidImage(e.to_string()))
}
