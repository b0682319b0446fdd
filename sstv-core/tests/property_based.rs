use proptest::prelude::*;
use sstv_core::catalogue::mode_by_name;
use sstv_core::config::{DecoderConfig, EncoderConfig};
use sstv_core::decoder::Decoder;
use sstv_core::encoder::Encoder;
use sstv_core::scan::{freq_to_byte, ycbcr, ycbcr_to_rgb};
use sstv_core::utils::{bits_to_byte_lsb_first, byte_to_bits_lsb_first, even_parity7};

proptest! {
    /// Any byte survives a LSB-first bit decomposition and reassembly.
    #[test]
    fn test_bit_roundtrip_for_any_byte(value in any::<u8>()) {
        let bits = byte_to_bits_lsb_first(value, 8);
        prop_assert_eq!(bits_to_byte_lsb_first(&bits), value);
    }

    /// Parity bit flips exactly when the low 7 bits have odd popcount.
    #[test]
    fn test_parity_matches_popcount(value in 0u8..128) {
        let expected = (value.count_ones() % 2) as u8;
        prop_assert_eq!(even_parity7(value), expected);
    }

    /// YCbCr encode/decode stays within a few counts of the original pixel
    /// for any RGB input, matching the fixed-point rounding the mixer does.
    #[test]
    fn test_ycbcr_roundtrip_is_close_for_any_pixel(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
        let pixel = Some([r, g, b]);
        let y = freq_to_byte(ycbcr(0, pixel, 0, 0, false));
        let cr = freq_to_byte(ycbcr(1, pixel, 0, 0, false));
        let cb = freq_to_byte(ycbcr(2, pixel, 0, 0, false));
        let [rr, gg, bb] = ycbcr_to_rgb(y, cr, cb);
        prop_assert!((rr as i32 - r as i32).abs() <= 6);
        prop_assert!((gg as i32 - g as i32).abs() <= 6);
        prop_assert!((bb as i32 - b as i32).abs() <= 6);
    }

    /// A solid-color frame, encoded and decoded through any monochrome-family
    /// mode, should come back close to the original gray level at every row.
    #[test]
    fn test_monochrome_roundtrip_preserves_gray_level(level in any::<u8>()) {
        let mode = mode_by_name("B&W 8").unwrap();
        let mut enc = Encoder::new(mode, EncoderConfig { sample_rate: 8000, emit_vox: false, emit_footer: false });
        enc.set_source_image(1, 1, Box::new(move |_, _| Some([level, level, level])));
        let audio = enc.run_all();

        let mut dec = Decoder::new(DecoderConfig { sample_rate: 8000, ..Default::default() });
        let image = dec.decode(&audio).unwrap();

        let mid = (image.height as usize / 2 * image.width as usize + image.width as usize / 2) * 3;
        for channel in 0..3 {
            let v = image.rgb8[mid + channel] as i32;
            prop_assert!((v - level as i32).abs() <= 12, "channel {} drifted: {} vs {}", channel, v, level);
        }
    }
}
