//! Cover-fit resize planning.
//!
//! The source image is scaled so it covers the target box on both axes, then
//! center-cropped to the exact target size by the image tool.

/// Which axis the resize is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeMode {
    /// Scale to this width; the height then meets or exceeds the target.
    ByWidth(u32),
    /// Scale to this height; the width then meets or exceeds the target.
    ByHeight(u32),
}

impl ResizeMode {
    /// Geometry argument in ImageMagick syntax (`600` or `x600`).
    pub fn to_geometry_arg(self) -> String {
        match self {
            ResizeMode::ByWidth(width) => width.to_string(),
            ResizeMode::ByHeight(height) => format!("x{}", height),
        }
    }
}

/// Resize followed by a centered crop to `target_width` x `target_height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizePlan {
    pub mode: ResizeMode,
    pub target_width: u32,
    pub target_height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("source image has zero size ({width}x{height})")]
    EmptySource { width: u32, height: u32 },

    #[error("target size must be non-zero ({width}x{height})")]
    EmptyTarget { width: u32, height: u32 },
}

/// Plan a cover-fit resize of a `source_width` x `source_height` image.
pub fn plan(
    source_width: u32,
    source_height: u32,
    target_width: u32,
    target_height: u32,
) -> Result<ResizePlan, GeometryError> {
    if source_width == 0 || source_height == 0 {
        return Err(GeometryError::EmptySource {
            width: source_width,
            height: source_height,
        });
    }
    if target_width == 0 || target_height == 0 {
        return Err(GeometryError::EmptyTarget {
            width: target_width,
            height: target_height,
        });
    }

    let width_if_height_matched = scale_ceil(source_width, target_height, source_height);
    let mode = if width_if_height_matched >= u64::from(target_width) {
        ResizeMode::ByWidth(clamp_u32(width_if_height_matched))
    } else {
        ResizeMode::ByHeight(clamp_u32(scale_ceil(
            source_height,
            target_width,
            source_width,
        )))
    };

    Ok(ResizePlan {
        mode,
        target_width,
        target_height,
    })
}

/// `ceil(value * numerator / denominator)` without going through floats.
fn scale_ceil(value: u32, numerator: u32, denominator: u32) -> u64 {
    (u64::from(value) * u64::from(numerator)).div_ceil(u64::from(denominator))
}

fn clamp_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landscape_resizes_by_width() {
        let plan = plan(1000, 500, 300, 300).unwrap();
        assert_eq!(plan.mode, ResizeMode::ByWidth(600));
        assert_eq!((plan.target_width, plan.target_height), (300, 300));
    }

    #[test]
    fn test_portrait_resizes_by_height() {
        let plan = plan(500, 1000, 300, 300).unwrap();
        assert_eq!(plan.mode, ResizeMode::ByHeight(600));
    }

    #[test]
    fn test_exact_aspect_resizes_by_width() {
        let plan = plan(500, 500, 300, 300).unwrap();
        assert_eq!(plan.mode, ResizeMode::ByWidth(300));
    }

    #[test]
    fn test_rounds_up() {
        // 333 * 500 / 499 = 333.667
        let plan = plan(333, 499, 300, 500).unwrap();
        assert_eq!(plan.mode, ResizeMode::ByWidth(334));
    }

    #[test]
    fn test_zero_source_rejected() {
        assert_eq!(
            plan(0, 500, 300, 300),
            Err(GeometryError::EmptySource {
                width: 0,
                height: 500
            })
        );
        assert!(plan(500, 0, 300, 300).is_err());
    }

    #[test]
    fn test_zero_target_rejected() {
        assert!(matches!(
            plan(500, 500, 0, 300),
            Err(GeometryError::EmptyTarget { .. })
        ));
    }

    #[test]
    fn test_geometry_arg() {
        assert_eq!(ResizeMode::ByWidth(600).to_geometry_arg(), "600");
        assert_eq!(ResizeMode::ByHeight(600).to_geometry_arg(), "x600");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// After the planned resize both axes cover the target
        #[test]
        fn plan_always_covers_target(
            sw in 1u32..5000, sh in 1u32..5000,
            tw in 1u32..2000, th in 1u32..2000,
        ) {
            let plan = plan(sw, sh, tw, th).unwrap();
            let (w, h) = match plan.mode {
                ResizeMode::ByWidth(w) => (u64::from(w), scale_ceil(sh, w, sw)),
                ResizeMode::ByHeight(h) => (scale_ceil(sw, h, sh), u64::from(h)),
            };
            prop_assert!(w >= u64::from(tw), "width {} < {}", w, tw);
            prop_assert!(h >= u64::from(th), "height {} < {}", h, th);
        }
    }
}
