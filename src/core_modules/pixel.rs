// THEORY:
// The `Pixel` module is the most fundamental unit of the tracer. It is a "dumb"
// data container for a single color sample, stored in a wide 16-bit channel range
// so that 8-bit and 16-bit sources compare on the same scale.
//
// Key principles:
// 1.  **One scale**: 8-bit samples are widened by 0x101 (255 -> 65535), so a byte
//     value and its 16-bit equivalent are the same `Pixel`.
// 2.  **Alpha rides along**: the alpha channel is carried for completeness but no
//     heuristic in the tracer looks at it.
// 3.  **Target colors**: the color the user asks us to trace is also a `Pixel`,
//     parsed from a 3 or 6 digit hex string and always fully opaque.

pub mod pixel {
    use crate::error::TraceError;
    use std::str::FromStr;

    pub type Byte = u8;
    pub type Channel = u16;

    /// The largest value any channel can take.
    pub const MAX_CHANNEL: Channel = Channel::MAX;

    /// Widens an 8-bit sample to the 16-bit range (0xab -> 0xabab).
    const BYTE_SCALE: Channel = 0x101;

    /// A single RGBA color with 16-bit channels.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Pixel {
        /// The red channel value (0-65535).
        pub red: Channel,
        /// The green channel value (0-65535).
        pub green: Channel,
        /// The blue channel value (0-65535).
        pub blue: Channel,
        /// The alpha channel value (0-65535). Ignored when matching.
        pub alpha: Channel,
    }

    impl Pixel {
        pub fn new(red: Channel, green: Channel, blue: Channel, alpha: Channel) -> Self {
            Self {
                red,
                green,
                blue,
                alpha,
            }
        }

        /// Builds a pixel from 8-bit samples, widening each to 16 bits.
        pub fn from_bytes(red: Byte, green: Byte, blue: Byte, alpha: Byte) -> Self {
            Self::new(
                red as Channel * BYTE_SCALE,
                green as Channel * BYTE_SCALE,
                blue as Channel * BYTE_SCALE,
                alpha as Channel * BYTE_SCALE,
            )
        }

        /// Parses a target color such as `#000`, `fff` or `#1a2b3c`.
        /// The short form doubles each digit; the result is fully opaque.
        pub fn from_hex(input: &str) -> Result<Self, TraceError> {
            let invalid = |reason| TraceError::InvalidColor {
                input: input.to_string(),
                reason,
            };

            let digits = input.strip_prefix('#').unwrap_or(input).as_bytes();
            let expanded: Vec<Byte> = if digits.len() == 3 {
                digits.iter().flat_map(|&d| [d, d]).collect()
            } else {
                digits.to_vec()
            };
            if expanded.len() != 6 {
                return Err(invalid("must contain 3 or 6 hex digits"));
            }

            let mut rgb = [0u8; 3];
            for (channel, pair) in rgb.iter_mut().zip(expanded.chunks_exact(2)) {
                let high = from_hex_digit(pair[0]).ok_or_else(|| invalid("found invalid digits"))?;
                let low = from_hex_digit(pair[1]).ok_or_else(|| invalid("found invalid digits"))?;
                *channel = high * 16 + low;
            }

            Ok(Self::from_bytes(rgb[0], rgb[1], rgb[2], Byte::MAX))
        }

        /// The three color channels, in red, green, blue order.
        pub fn rgb(&self) -> [Channel; 3] {
            [self.red, self.green, self.blue]
        }
    }

    fn from_hex_digit(digit: Byte) -> Option<Byte> {
        (digit as char).to_digit(16).map(|v| v as Byte)
    }

    impl FromStr for Pixel {
        type Err = TraceError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            Self::from_hex(s)
        }
    }

    impl From<image::Rgba<u8>> for Pixel {
        fn from(rgba: image::Rgba<u8>) -> Self {
            let [r, g, b, a] = rgba.0;
            Self::from_bytes(r, g, b, a)
        }
    }

    impl From<image::Rgba<u16>> for Pixel {
        fn from(rgba: image::Rgba<u16>) -> Self {
            let [r, g, b, a] = rgba.0;
            Self::new(r, g, b, a)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::pixel::*;
    use crate::error::TraceError;

    #[test]
    fn short_hex_doubles_each_digit() {
        let short = Pixel::from_hex("#a1f").unwrap();
        let long = Pixel::from_hex("aa11ff").unwrap();
        assert_eq!(short, long);
        assert_eq!(short.rgb(), [0xaaaa, 0x1111, 0xffff]);
        assert_eq!(short.alpha, MAX_CHANNEL);
    }

    #[test]
    fn default_target_is_opaque_black() {
        let black = Pixel::from_hex("#000").unwrap();
        assert_eq!(black, Pixel::new(0, 0, 0, MAX_CHANNEL));
    }

    #[test]
    fn mixed_case_digits_parse() {
        let c: Pixel = "#1a2B3c".parse().unwrap();
        assert_eq!(c, Pixel::from_bytes(0x1a, 0x2b, 0x3c, 0xff));
    }

    #[test]
    fn wrong_length_is_rejected() {
        for input in ["", "#", "#12", "#1234", "#1234567", "##000"] {
            match Pixel::from_hex(input) {
                Err(TraceError::InvalidColor { reason, .. }) => {
                    assert_eq!(reason, "must contain 3 or 6 hex digits", "input {input:?}")
                }
                other => panic!("expected InvalidColor for {input:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn non_hex_digits_are_rejected() {
        let err = Pixel::from_hex("#00g").unwrap_err();
        assert_eq!(err.to_string(), "invalid color \"#00g\": found invalid digits");
    }

    #[test]
    fn eight_bit_samples_widen_to_sixteen() {
        let p = Pixel::from(image::Rgba([0u8, 1, 128, 255]));
        assert_eq!(p, Pixel::new(0, 0x0101, 0x8080, 0xffff));
    }
}
