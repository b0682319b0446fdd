use sstv_core::catalogue::mode_by_name;
use sstv_core::config::{DecoderConfig, EncoderConfig};
use sstv_core::decoder::Decoder;
use sstv_core::encoder::Encoder;

const SAMPLE_RATE: u32 = 8000;

fn encode_solid(mode_name: &str, rgb: [u8; 3]) -> (Vec<f32>, &'static sstv_core::catalogue::Mode) {
    let mode = mode_by_name(mode_name).unwrap();
    let mut enc = Encoder::new(mode, EncoderConfig { sample_rate: SAMPLE_RATE, emit_vox: false, emit_footer: false });
    enc.set_source_image(1, 1, Box::new(move |_, _| Some(rgb)));
    (enc.run_all(), mode)
}

fn decode(audio: &[f32]) -> sstv_core::decoder::DecodedImage {
    let mut dec = Decoder::new(DecoderConfig { sample_rate: SAMPLE_RATE, ..Default::default() });
    dec.decode(audio).unwrap()
}

#[test]
fn black_frame_scottie1_decodes_to_near_black() {
    let (audio, mode) = encode_solid("Scottie 1", [0, 0, 0]);
    let image = decode(&audio);
    assert_eq!(image.mode.name, mode.name);

    let mid = (image.height as usize / 2 * image.width as usize + image.width as usize / 2) * 3;
    for channel in 0..3 {
        assert!(image.rgb8[mid + channel] < 20, "channel {} too bright: {}", channel, image.rgb8[mid + channel]);
    }
}

#[test]
fn white_frame_martin2_decodes_to_near_white() {
    let (audio, mode) = encode_solid("Martin 2", [255, 255, 255]);
    let image = decode(&audio);
    assert_eq!(image.mode.name, mode.name);

    let mid = (image.height as usize / 2 * image.width as usize + image.width as usize / 2) * 3;
    for channel in 0..3 {
        assert!(image.rgb8[mid + channel] > 230, "channel {} too dark: {}", channel, image.rgb8[mid + channel]);
    }
}

#[test]
fn mid_gray_robot36_roundtrips_through_ycbcr() {
    let (audio, mode) = encode_solid("Robot 36", [128, 128, 128]);
    let image = decode(&audio);
    assert_eq!(image.mode.name, mode.name);

    let mid = (image.height as usize / 2 * image.width as usize + image.width as usize / 2) * 3;
    for channel in 0..3 {
        let v = image.rgb8[mid + channel] as i32;
        assert!((v - 128).abs() < 25, "channel {} drifted: {}", channel, v);
    }
}

#[test]
fn pump_in_small_chunks_matches_run_all_for_every_mode_family() {
    for name in ["B&W 12", "Martin 3", "Wraase SC2-180", "Scottie 2", "PD90", "Pasokon P5"] {
        let mode = mode_by_name(name).unwrap();
        let mut whole = Encoder::new(mode, EncoderConfig { sample_rate: SAMPLE_RATE, ..Default::default() });
        let run_all = whole.run_all();

        let mut chunked = Encoder::new(mode, EncoderConfig { sample_rate: SAMPLE_RATE, ..Default::default() });
        let mut pumped = Vec::new();
        let mut buf = [0.0f32; 61];
        loop {
            let n = chunked.pump(&mut buf);
            pumped.extend_from_slice(&buf[..n]);
            if n == 0 {
                break;
            }
        }

        assert_eq!(run_all.len(), pumped.len(), "mode {name} length mismatch");
        assert!(run_all.iter().zip(pumped.iter()).all(|(a, b)| (a - b).abs() < 1e-4), "mode {name} sample mismatch");
    }
}

#[test]
fn silence_is_rejected_as_too_short_to_decode() {
    let mut dec = Decoder::new(DecoderConfig { sample_rate: SAMPLE_RATE, ..Default::default() });
    let silence = vec![0.0f32; 10];
    assert!(dec.decode(&silence).is_err());
}
