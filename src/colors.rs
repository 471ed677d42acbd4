//! Packed 24-bit RGB colors.
//!
//! Colors are stored as `0x00RRGGBB` in a `u32`. Float channels are in
//! `[0.0, 1.0]` and are clamped before quantization.

pub const BLACK: u32 = 0x000000;
pub const WHITE: u32 = 0xFFFFFF;
pub const RED: u32 = 0xFF0000;
pub const GREEN: u32 = 0x00FF00;
pub const BLUE: u32 = 0x0000FF;

const RGB_MASK: u32 = 0x00FF_FFFF;

/// Pack three 8-bit channels into a 24-bit color.
#[inline]
pub fn pack_rgb8(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Split a packed color into its 8-bit channels.
#[inline]
pub fn unpack_rgb8(color: u32) -> [u8; 3] {
    [(color >> 16) as u8, (color >> 8) as u8, color as u8]
}

/// Quantize a float channel to 8 bits, clamping out-of-range values.
#[inline]
pub fn channel_to_u8(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Pack float channels into a 24-bit color.
#[inline]
pub fn pack_color(r: f32, g: f32, b: f32) -> u32 {
    pack_rgb8(channel_to_u8(r), channel_to_u8(g), channel_to_u8(b))
}

/// Unpack a 24-bit color into float channels in `[0.0, 1.0]`.
#[inline]
pub fn unpack_color(color: u32) -> (f32, f32, f32) {
    let [r, g, b] = unpack_rgb8(color);
    (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

/// Drop any bits above the 24-bit RGB range (e.g. an alpha byte).
#[inline]
pub fn to_rgb24(color: u32) -> u32 {
    color & RGB_MASK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_full_channels() {
        assert_eq!(pack_color(1.0, 0.0, 0.0), RED);
        assert_eq!(pack_color(0.0, 1.0, 1.0), 0x00FFFF);
    }

    #[test]
    fn out_of_range_channels_are_clamped() {
        assert_eq!(pack_color(1.7, -0.2, 0.5), 0xFF0080);
        assert_eq!(channel_to_u8(f32::NAN), 0);
    }

    #[test]
    fn nearly_one_rounds_to_full_intensity() {
        assert_eq!(channel_to_u8(0.999_999), 255);
    }

    #[test]
    fn alpha_byte_is_stripped() {
        assert_eq!(to_rgb24(0xFF12_3456), 0x12_3456);
        assert_eq!(unpack_rgb8(0x12_3456), [0x12, 0x34, 0x56]);
    }
}
