//! Webcam capture.
//!
//! Compiled only with the `camera` feature; the stub build keeps the
//! binary free of platform capture dependencies.

use anyhow::Result;
use snapedit_core::ImageBuf;

/// Grabs a single RGB frame from the default camera.
#[cfg(feature = "camera")]
pub fn capture_frame() -> Result<ImageBuf> {
    use anyhow::Context;
    use nokhwa::pixel_format::RgbFormat;
    use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
    use nokhwa::Camera;

    let requested =
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution);
    let mut camera =
        Camera::new(CameraIndex::Index(0), requested).context("failed to open camera 0")?;
    camera.open_stream().context("failed to start camera stream")?;

    let frame = camera.frame().context("failed to capture frame")?;
    let decoded = frame
        .decode_image::<RgbFormat>()
        .context("failed to decode camera frame")?;

    let _ = camera.stop_stream();

    let (width, height) = (decoded.width(), decoded.height());
    tracing::debug!(width, height, "captured camera frame");
    Ok(ImageBuf::from_data(width, height, 3, decoded.into_raw())?)
}

/// Stub used when the `camera` feature is disabled.
#[cfg(not(feature = "camera"))]
pub fn capture_frame() -> Result<ImageBuf> {
    anyhow::bail!("camera support not compiled in (enable the 'camera' feature)")
}
