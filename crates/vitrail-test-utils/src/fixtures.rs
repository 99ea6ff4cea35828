//! Canned pixel buffers with known contents.

use vitrail_textures::{PixelBuffer, Rgba8};

/// 2x2 opaque red.
pub fn red2x2() -> PixelBuffer {
    PixelBuffer::solid(2, 2, Rgba8::new(255, 0, 0, 255))
}

/// 3x3 opaque white.
pub fn white3x3() -> PixelBuffer {
    PixelBuffer::solid(3, 3, Rgba8::new(255, 255, 255, 255))
}

/// 3x3 opaque yellow.
pub fn yellow3x3() -> PixelBuffer {
    PixelBuffer::solid(3, 3, Rgba8::new(255, 255, 0, 255))
}

/// Rec. 709-ish luminance, rounded to 8 bits.
fn luma(pixel: Rgba8) -> u8 {
    let y = 0.2125 * pixel.r as f32 + 0.7154 * pixel.g as f32 + 0.0721 * pixel.b as f32;
    y.round().clamp(0.0, 255.0) as u8
}

/// Recombines three images channel by channel: the output red channel is
/// the luminance of `red`, and likewise for `green` and `blue`. Alpha is
/// fully opaque.
///
/// # Panics
/// Panics if the shapes differ.
pub fn merge_channels(red: &PixelBuffer, green: &PixelBuffer, blue: &PixelBuffer) -> PixelBuffer {
    assert!(
        red.shape() == green.shape() && green.shape() == blue.shape(),
        "merge_channels requires equal shapes"
    );
    PixelBuffer::from_fn(red.width(), red.height(), |x, y| {
        Rgba8::new(
            luma(red.pixel(x, y)),
            luma(green.pixel(x, y)),
            luma(blue.pixel(x, y)),
            255,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn red2x2_has_the_advertised_shape() {
        let buffer = red2x2();
        assert_eq!(buffer.shape(), [2, 2, 4]);
        assert_eq!(buffer.byte_len(), 16);
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(buffer.pixel(x, y), Rgba8::new(255, 0, 0, 255));
            }
        }
    }

    #[test]
    fn merge_channels_recombines_luminance() {
        let red = PixelBuffer::solid(3, 3, Rgba8::new(255, 0, 0, 255));
        let merged = merge_channels(&red, &white3x3(), &yellow3x3());

        // luma(red) = 54, luma(white) = 255, luma(yellow) = 237
        assert_eq!(merged.shape(), [3, 3, 4]);
        assert_eq!(merged.pixel(1, 1), Rgba8::new(54, 255, 237, 255));
    }

    #[test]
    #[should_panic(expected = "equal shapes")]
    fn merge_channels_rejects_mismatched_shapes() {
        let _ = merge_channels(&red2x2(), &white3x3(), &yellow3x3());
    }
}
