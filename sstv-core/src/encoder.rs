//! Phase-continuous SSTV encoder: walks a mode's instruction schedule and
//! synthesizes the corresponding tone sequence sample by sample.

use std::f32::consts::PI;

use crate::catalogue::Mode;
use crate::config::EncoderConfig;
use crate::geometry::{create_letterbox, Rect};
use crate::instruction::{flags::*, Instruction, ScanType};
use crate::logging::SignalLogger;
use crate::scan;
use crate::schedule::build_schedule;

/// Supplies pixels to the encoder during a scan instruction. Returns
/// `None` to fall back to the letterbox test pattern (e.g. outside the
/// source image's bounds).
pub type PixelProvider<'a> = Box<dyn FnMut(i32, i32) -> Option<[u8; 3]> + 'a>;

/// Modes whose schedule opens with a one-shot leading instruction (the
/// Scottie family's starting sync pulse) haven't entered line 0 yet at
/// `instruction_idx == 0`; modes whose first instruction is itself the
/// per-line sync pulse have.
fn starting_cur_y(schedule: &[Instruction]) -> i32 {
    if schedule.first().map_or(false, |i| i.has_flag(NEW_LINE)) {
        0
    } else {
        -1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderState {
    Idle,
    Running,
    Done,
}

/// Encodes one mode's worth of audio from a pixel source, one sample (or
/// one buffer) at a time.
pub struct Encoder<'a> {
    config: EncoderConfig,
    mode: &'static Mode,
    schedule: Vec<Instruction>,
    source_rect: Rect,
    letterbox: Rect,
    pixel_provider: Option<PixelProvider<'a>>,
    logger: SignalLogger,

    state: EncoderState,
    instruction_idx: usize,
    cur_sample: u64,
    last_instruction_sample: u64,
    phase: f32,
    cur_x: i32,
    cur_y: i32,
}

impl<'a> Encoder<'a> {
    pub fn new(mode: &'static Mode, config: EncoderConfig) -> Self {
        let schedule = build_schedule(mode, config.emit_vox, config.emit_footer);
        let source_rect = Rect { x: 0, y: 0, w: mode.width as i32, h: mode.lines as i32 };
        let letterbox = create_letterbox(mode.width as i32, mode.lines as i32, source_rect);

        Self {
            config,
            mode,
            schedule,
            source_rect,
            letterbox,
            pixel_provider: None,
            logger: SignalLogger::default(),
            state: EncoderState::Idle,
            instruction_idx: 0,
            cur_sample: 0,
            last_instruction_sample: 0,
            phase: 0.0,
            cur_x: 0,
            cur_y: starting_cur_y(&schedule),
        }
    }

    /// Attach the image this mode will scan. `width`/`height` are the
    /// source image's dimensions, used to compute the letterbox.
    pub fn set_source_image(&mut self, width: u32, height: u32, provider: PixelProvider<'a>) {
        self.source_rect = Rect { x: 0, y: 0, w: width as i32, h: height as i32 };
        self.letterbox = create_letterbox(self.mode.width as i32, self.mode.lines as i32, self.source_rect);
        self.pixel_provider = Some(provider);
    }

    pub fn logger(&self) -> &SignalLogger {
        &self.logger
    }

    pub fn state(&self) -> EncoderState {
        self.state
    }

    /// Total sample count the current schedule will produce at the
    /// configured sample rate.
    pub fn estimated_length_samples(&self) -> u64 {
        let total_ms: f64 = self.schedule.iter().map(|i| i.length_ms as f64).sum();
        ((total_ms * self.config.sample_rate as f64) / 1000.0) as u64
    }

    /// Rewind to the start of the schedule, ready to pump or run again.
    pub fn reset(&mut self) {
        self.instruction_idx = 0;
        self.cur_sample = 0;
        self.last_instruction_sample = 0;
        self.phase = 0.0;
        self.cur_x = 0;
        self.cur_y = starting_cur_y(&self.schedule);
        self.state = EncoderState::Idle;
    }

    fn len_samples(&self, ins: &Instruction) -> u64 {
        (((ins.length_ms as f64) * self.config.sample_rate as f64) / 1000.0) as u64
    }

    fn advance_instruction(&mut self) -> bool {
        self.last_instruction_sample = self.cur_sample;
        if self.instruction_idx + 1 >= self.schedule.len() {
            return false;
        }
        self.instruction_idx += 1;
        if self.schedule[self.instruction_idx].has_flag(NEW_LINE) {
            self.cur_y += 1;
        }
        true
    }

    fn resolve_pitch(&mut self, ins: &Instruction) -> f32 {
        if ins.has_flag(PITCH_IS_SWEEP) {
            return scan::sweep(self.cur_x, self.mode.width, true);
        }
        if !ins.has_flag(PITCH_IS_DELEGATED) {
            return ins.pitch;
        }

        let outside_letterbox = (self.letterbox.x > 0
            && (self.cur_x < self.letterbox.x || self.cur_x >= self.letterbox.x + self.letterbox.w))
            || (self.letterbox.y > 0
                && (self.cur_y < self.letterbox.y || self.cur_y >= self.letterbox.y + self.letterbox.h));

        let have_provider = self.pixel_provider.is_some();
        let pixel = if outside_letterbox {
            None
        } else if let Some(provider) = self.pixel_provider.as_mut() {
            let sample_x = self.source_rect.w * (self.cur_x - self.letterbox.x).max(0) / self.letterbox.w.max(1);
            let sample_y = self.source_rect.h * (self.cur_y - self.letterbox.y).max(0) / self.letterbox.h.max(1);
            provider(sample_x, sample_y)
        } else {
            None
        };

        if pixel.is_none() && !have_provider && self.cur_x == 0 && self.cur_y == 0 {
            self.logger.warn("SCAN", "pixel provider missing, using letterbox test pattern");
        }

        let show_pattern = outside_letterbox || !have_provider;
        let channel = ins.pitch as usize;
        match self.mode.scan_type {
            ScanType::Monochrome => scan::monochrome(pixel, self.cur_x, self.cur_y, show_pattern),
            ScanType::Rgb => scan::rgb(channel, pixel, self.cur_x, self.cur_y, show_pattern),
            ScanType::YCbCr => scan::ycbcr(channel, pixel, self.cur_x, self.cur_y, show_pattern),
            ScanType::Sweep => scan::sweep(self.cur_x, self.mode.width, false),
        }
    }

    fn next_sample(&mut self) -> f32 {
        let ins = self.schedule[self.instruction_idx];
        let pitch = self.resolve_pitch(&ins);

        self.phase += pitch * (2.0 * PI / self.config.sample_rate as f32);
        self.phase %= 2.0 * PI;
        self.phase.sin()
    }

    /// Write up to `buf.len()` samples, stopping early (and returning the
    /// count actually written) once the schedule is exhausted. Safe to
    /// call repeatedly across multiple buffers.
    pub fn pump(&mut self, buf: &mut [f32]) -> usize {
        if self.state == EncoderState::Done {
            return 0;
        }
        self.state = EncoderState::Running;

        let mut written = 0;
        for slot in buf.iter_mut() {
            let mut len_samples = self.len_samples(&self.schedule[self.instruction_idx]).max(1);

            if self.cur_sample >= self.last_instruction_sample + len_samples {
                if !self.advance_instruction() {
                    self.state = EncoderState::Done;
                    break;
                }
                len_samples = self.len_samples(&self.schedule[self.instruction_idx]).max(1);
            }

            let width_frac = (self.cur_sample - self.last_instruction_sample) as f32 / len_samples as f32;
            self.cur_x = (self.mode.width as f32 * width_frac) as i32;

            *slot = self.next_sample();
            self.cur_sample += 1;
            written += 1;
        }

        written
    }

    /// Run the complete schedule to a single in-memory buffer.
    pub fn run_all(&mut self) -> Vec<f32> {
        self.reset();
        let total = self.estimated_length_samples() as usize;
        let mut out = vec![0.0f32; total.max(1)];
        let mut offset = 0;
        loop {
            let written = self.pump(&mut out[offset..]);
            offset += written;
            if written == 0 || offset >= out.len() {
                break;
            }
        }
        out.truncate(offset);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::mode_by_name;

    #[test]
    fn run_all_produces_the_estimated_sample_count() {
        let mode = mode_by_name("Scottie 1").unwrap();
        let mut enc = Encoder::new(mode, EncoderConfig { sample_rate: 8000, ..Default::default() });
        let expected = enc.estimated_length_samples() as usize;
        let samples = enc.run_all();
        assert_eq!(samples.len(), expected);
    }

    #[test]
    fn pump_and_run_all_produce_identical_output() {
        let mode = mode_by_name("Martin 1").unwrap();
        let mut enc_a = Encoder::new(mode, EncoderConfig { sample_rate: 8000, ..Default::default() });
        let run_all = enc_a.run_all();

        let mut enc_b = Encoder::new(mode, EncoderConfig { sample_rate: 8000, ..Default::default() });
        enc_b.reset();
        let mut pumped = Vec::new();
        let mut chunk = [0.0f32; 97];
        loop {
            let n = enc_b.pump(&mut chunk);
            pumped.extend_from_slice(&chunk[..n]);
            if n == 0 {
                break;
            }
        }

        assert_eq!(run_all.len(), pumped.len());
        for (a, b) in run_all.iter().zip(pumped.iter()) {
            assert!((a - b).abs() < 1e-4);
        }
    }

    #[test]
    fn phase_is_continuous_across_instruction_boundaries() {
        // Tones never exceed 2300 Hz, so at 8 kHz no single-sample phase
        // step should exceed that tone's own increment; a "jump" from an
        // instruction boundary resetting phase would show up as a step far
        // larger than any in-tone increment.
        let mode = mode_by_name("B&W 8").unwrap();
        let mut enc = Encoder::new(mode, EncoderConfig { sample_rate: 8000, ..Default::default() });

        let max_step = 2300.0 * (2.0 * PI / 8000.0);
        let mut prev_phase = enc.phase;
        let mut buf = [0.0f32; 1];
        loop {
            let n = enc.pump(&mut buf);
            if n == 0 {
                break;
            }
            let raw_step = enc.phase - prev_phase;
            // phase wraps with `%=`, so a same-direction wrap looks like a
            // large negative jump; fold it back into the continuous step.
            let step = if raw_step < -PI { raw_step + 2.0 * PI } else { raw_step };
            assert!(step.abs() <= max_step + 1e-3, "discontinuous phase step {}", step);
            prev_phase = enc.phase;
        }
    }

    #[test]
    fn encoder_without_pixel_provider_falls_back_to_letterbox_pattern() {
        let mode = mode_by_name("Martin 1").unwrap();
        let mut enc = Encoder::new(mode, EncoderConfig { sample_rate: 8000, ..Default::default() });
        let samples = enc.run_all();
        assert!(!samples.is_empty());
    }
}
