use std::io::Cursor;

use image::RgbaImage;

use crate::error::{UnveilError, UnveilResult};

/// Output container. Static formats carry exactly one frame; animated ones
/// loop forever at the configured frame rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum OutputFormat {
    Png,
    Jpeg,
    Gif,
    WebP,
}

impl OutputFormat {
    pub fn is_animated(self) -> bool {
        matches!(self, Self::Gif | Self::WebP)
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Gif => "gif",
            Self::WebP => "webp",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::WebP => "image/webp",
        }
    }

    /// Download file name, derived mechanically from the container.
    pub fn file_name(self) -> String {
        format!("will_return.{}", self.extension())
    }
}

fn validate_frames(frames: &[RgbaImage]) -> UnveilResult<()> {
    let first = frames
        .first()
        .ok_or_else(|| UnveilError::encode("frame list must be non-empty"))?;
    let (w, h) = (first.width(), first.height());
    if frames.iter().any(|f| f.width() != w || f.height() != h) {
        return Err(UnveilError::encode("all frames must share one size"));
    }
    Ok(())
}

/// Encode an ordered frame sequence into `format`.
///
/// Static containers take the last frame (the fully-revealed state when fed
/// a reveal schedule); animated containers loop infinitely with a per-frame
/// delay of `1000 / fps` ms.
pub fn encode(frames: &[RgbaImage], fps: u32, format: OutputFormat) -> UnveilResult<Vec<u8>> {
    validate_frames(frames)?;
    if fps == 0 {
        return Err(UnveilError::encode("fps must be non-zero"));
    }

    match format {
        OutputFormat::Png | OutputFormat::Jpeg => match frames.last() {
            Some(last) => encode_still(last, format),
            None => Err(UnveilError::encode("frame list must be non-empty")),
        },
        OutputFormat::Gif => encode_gif(frames, fps),
        OutputFormat::WebP => encode_webp(frames, fps),
    }
}

pub fn encode_still(frame: &RgbaImage, format: OutputFormat) -> UnveilResult<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    match format {
        OutputFormat::Png => frame
            .write_to(&mut out, image::ImageFormat::Png)
            .map_err(|e| UnveilError::encode(format!("png encode failed: {e}")))?,
        OutputFormat::Jpeg => {
            // JPEG carries no alpha; flatten to RGB first.
            let rgb = image::DynamicImage::ImageRgba8(frame.clone()).to_rgb8();
            rgb.write_to(&mut out, image::ImageFormat::Jpeg)
                .map_err(|e| UnveilError::encode(format!("jpeg encode failed: {e}")))?;
        }
        other => {
            return Err(UnveilError::encode(format!(
                "{other:?} is not a static container"
            )));
        }
    }
    Ok(out.into_inner())
}

fn encode_gif(frames: &[RgbaImage], fps: u32) -> UnveilResult<Vec<u8>> {
    let mut out = Vec::new();
    {
        let mut encoder = image::codecs::gif::GifEncoder::new(&mut out);
        encoder
            .set_repeat(image::codecs::gif::Repeat::Infinite)
            .map_err(|e| UnveilError::encode(format!("gif repeat failed: {e}")))?;

        let delay = image::Delay::from_numer_denom_ms(1000, fps);
        for frame in frames {
            encoder
                .encode_frame(image::Frame::from_parts(frame.clone(), 0, 0, delay))
                .map_err(|e| UnveilError::encode(format!("gif frame encode failed: {e}")))?;
        }
    }
    Ok(out)
}

fn encode_webp(frames: &[RgbaImage], fps: u32) -> UnveilResult<Vec<u8>> {
    let (w, h) = (frames[0].width(), frames[0].height());
    let mut encoder = webp_animation::Encoder::new((w, h))
        .map_err(|e| UnveilError::encode(format!("webp encoder init failed: {e:?}")))?;

    let frame_ms = (1000 / fps) as i32;
    for (i, frame) in frames.iter().enumerate() {
        encoder
            .add_frame(frame.as_raw(), i as i32 * frame_ms)
            .map_err(|e| UnveilError::encode(format!("webp frame encode failed: {e:?}")))?;
    }
    let data = encoder
        .finalize(frames.len() as i32 * frame_ms)
        .map_err(|e| UnveilError::encode(format!("webp finalize failed: {e:?}")))?;
    Ok(data.to_vec())
}
