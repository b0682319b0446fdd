//! Demodulation and decoding: recovers a VIS-coded mode and its scanned
//! image from a mono PCM stream.

use crate::catalogue::{self, Mode};
use crate::config::DecoderConfig;
use crate::demod::FrequencyTracker;
use crate::errors::{DecodeError, Result};
use crate::instruction::{flags::*, InstructionKind, ScanType};
use crate::logging::SignalLogger;
use crate::scan;
use crate::schedule::create_instructions;
use crate::utils::{bits_to_byte_lsb_first, clampf, even_parity7};

fn ms_samples(ms: f32, sample_rate: u32) -> usize {
    ((ms as f64) * (sample_rate as f64) / 1000.0).round() as usize
}

fn avg_freq(track: &[u16], start: usize, len: usize) -> f32 {
    let end = (start + len).min(track.len());
    if start >= end {
        return 0.0;
    }
    let sum: u32 = track[start..end].iter().map(|&v| v as u32).sum();
    sum as f32 / (end - start) as f32
}

/// A decoded image: the mode it was transmitted in, its fixed geometry,
/// and an RGB8 pixel buffer (`width * height * 3` bytes, row-major).
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub mode: &'static Mode,
    pub width: u16,
    pub height: u16,
    pub rgb8: Vec<u8>,
}

/// Recovers mode + image from a mono PCM stream.
pub struct Decoder {
    config: DecoderConfig,
    logger: SignalLogger,
}

impl Decoder {
    pub fn new(config: DecoderConfig) -> Self {
        Self { config, logger: SignalLogger::default() }
    }

    pub fn logger(&self) -> &SignalLogger {
        &self.logger
    }

    fn find_vis_leader(&self, track: &[u16]) -> Option<usize> {
        let window = ms_samples(300.0, self.config.sample_rate);
        let step = (self.config.sample_rate / 1000).max(1) as usize;
        let tol = self.config.tone_tolerance_hz;

        let mut i = 0usize;
        while i + window <= track.len() {
            let avg = avg_freq(track, i, window);
            if (avg - 1900.0).abs() <= tol {
                return Some(i);
            }
            i += step;
        }
        None
    }

    /// Decode a complete mono PCM buffer, auto-detecting the mode from its
    /// VIS header.
    pub fn decode(&mut self, samples: &[f32]) -> Result<DecodedImage> {
        let min_needed = ms_samples(670.0, self.config.sample_rate);
        if samples.len() < min_needed {
            return Err(DecodeError::EmptyInput { have: samples.len(), need: min_needed }.into());
        }

        let mut tracker = FrequencyTracker::new(self.config.sample_rate, self.config.smoothing_shift);
        let track: Vec<u16> = samples
            .iter()
            .map(|&s| tracker.push_sample((clampf(s, -1.0, 1.0) * i16::MAX as f32) as i16))
            .collect();

        self.logger.debug("DEMOD", format!("tracked {} samples", track.len()));

        let leader_start = self
            .find_vis_leader(&track)
            .ok_or(DecodeError::EmptyInput { have: track.len(), need: min_needed })?;
        self.logger.debug("VIS", format!("leader detected at sample {leader_start}"));

        let bit_window = ms_samples(30.0, self.config.sample_rate);
        let header_to_bits = ms_samples(300.0 + 10.0 + 300.0 + 30.0, self.config.sample_rate);
        let bits_start = leader_start + header_to_bits;

        let mut bits = [0u8; 7];
        for (b, slot) in bits.iter_mut().enumerate() {
            let avg = avg_freq(&track, bits_start + b * bit_window, bit_window);
            *slot = if avg < 1200.0 { 1 } else { 0 };
        }
        let assembled = bits_to_byte_lsb_first(&bits);

        let parity_avg = avg_freq(&track, bits_start + 7 * bit_window, bit_window);
        let parity_bit: u8 = if parity_avg < 1200.0 { 1 } else { 0 };
        if parity_bit != even_parity7(assembled) {
            return Err(DecodeError::VisParityMismatch { assembled }.into());
        }

        let mode = catalogue::mode_by_vis_code(assembled).ok_or(DecodeError::UnknownMode { code: assembled })?;
        self.logger.info("VIS", format!("decoded mode {} (vis code {assembled})", mode.name));

        let body_start = bits_start + 8 * bit_window + ms_samples(30.0, self.config.sample_rate);
        let rgb8 = self.decode_body(&track, body_start, mode);

        Ok(DecodedImage { mode, width: mode.width, height: mode.lines, rgb8 })
    }

    /// Decode and additionally verify the recovered mode matches
    /// `expected`, failing with [`DecodeError::UnexpectedMode`] otherwise.
    pub fn decode_expecting(&mut self, samples: &[f32], expected: &'static Mode) -> Result<DecodedImage> {
        let decoded = self.decode(samples)?;
        if decoded.mode.name != expected.name {
            return Err(DecodeError::UnexpectedMode { detected: decoded.mode.name, expected: expected.name }.into());
        }
        Ok(decoded)
    }

    fn decode_scan_line(&self, track: &[u16], start: usize, len_samples: usize, width: u16) -> Vec<u8> {
        let width = width as usize;
        let mut out = vec![0u8; width];
        if len_samples == 0 {
            return out;
        }
        for (x, slot) in out.iter_mut().enumerate() {
            let px_start = start + x * len_samples / width;
            let px_end = start + (x + 1) * len_samples / width;
            let avg = avg_freq(track, px_start, px_end.saturating_sub(px_start).max(1));
            *slot = scan::freq_to_byte(avg);
        }
        out
    }

    fn decode_body(&mut self, track: &[u16], start: usize, mode: &'static Mode) -> Vec<u8> {
        let instructions = create_instructions(mode);
        let width = mode.width as usize;
        let lines = mode.lines as usize;
        let fudge = self.config.fudge_samples();

        let mut rgb = vec![0u8; width * lines * 3];
        let mut y_buf = vec![vec![0u8; width]; lines];
        let mut cr_buf = vec![vec![0u8; width]; lines];
        let mut cb_buf = vec![vec![0u8; width]; lines];

        let mut cur_y: i32 = if instructions.first().map_or(false, |i| i.has_flag(NEW_LINE)) { 0 } else { -1 };
        let mut offset = start;
        let mut first = true;

        for ins in &instructions {
            let len_samples = ms_samples(ins.length_ms, self.config.sample_rate);

            if ins.has_flag(NEW_LINE) && !first {
                cur_y += 1;
            }
            first = false;

            if ins.kind == InstructionKind::Scan && cur_y >= 0 && (cur_y as usize) < lines {
                let row = cur_y as usize;
                let scan_start = offset + fudge;
                let line = self.decode_scan_line(track, scan_start, len_samples, mode.width);

                match mode.scan_type {
                    ScanType::Monochrome => {
                        for (x, &v) in line.iter().enumerate() {
                            let idx = (row * width + x) * 3;
                            rgb[idx] = v;
                            rgb[idx + 1] = v;
                            rgb[idx + 2] = v;
                        }
                    }
                    ScanType::Rgb => {
                        let channel = (ins.pitch as usize).min(2);
                        for (x, &v) in line.iter().enumerate() {
                            rgb[(row * width + x) * 3 + channel] = v;
                        }
                    }
                    ScanType::YCbCr => {
                        let channel = (ins.pitch as usize).min(2);
                        let rows: &[usize] = if ins.has_flag(SCAN_IS_DOUBLED) && row + 1 < lines {
                            &[0, 1]
                        } else {
                            &[0]
                        };
                        for &delta in rows {
                            let target = row + delta;
                            match channel {
                                0 => y_buf[target] = line.clone(),
                                1 => cr_buf[target] = line.clone(),
                                _ => cb_buf[target] = line.clone(),
                            }
                        }
                    }
                    ScanType::Sweep => {}
                }
            }

            offset += len_samples;
        }

        if mode.scan_type == ScanType::YCbCr {
            for row in 0..lines {
                for x in 0..width {
                    let [r, g, b] = scan::ycbcr_to_rgb(y_buf[row][x], cr_buf[row][x], cb_buf[row][x]);
                    let idx = (row * width + x) * 3;
                    rgb[idx] = r;
                    rgb[idx + 1] = g;
                    rgb[idx + 2] = b;
                }
            }
        }

        rgb
    }
}
