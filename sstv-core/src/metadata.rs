//! Precomputed per-mode timing metadata: total transmission length and
//! single-scan-line loop duration, plus the catalogue-wide longest and
//! shortest modes.

use crate::catalogue::{Mode, MODES};
use crate::instruction::flags::{LENGTH_USES_INDEX, NEW_LINE};

#[derive(Debug, Clone, Copy)]
pub struct ModeMetadata {
    pub mode: &'static Mode,
    /// Looping body only; excludes VOX/VIS/footer framing, since those
    /// are a property of a given encode, not of the mode itself.
    pub length_ms: f32,
    pub loop_length_ms: f32,
}

#[derive(Debug)]
pub struct Metadata {
    per_mode: Vec<ModeMetadata>,
    longest: usize,
    shortest: usize,
}

fn instruction_divisor(mode: &Mode) -> usize {
    if !mode.uses_extra_lines {
        return 1;
    }
    mode.instructions[mode.instruction_loop_start..]
        .iter()
        .filter(|ins| ins.flags & NEW_LINE != 0)
        .count()
        .max(1)
}

fn resolved_length_ms(mode: &Mode, tmpl: &crate::instruction::InstructionTemplate) -> f32 {
    if tmpl.flags & LENGTH_USES_INDEX != 0 {
        mode.timings[tmpl.length_ms as usize]
    } else {
        tmpl.length_ms
    }
}

fn process_mode(mode: &'static Mode) -> ModeMetadata {
    let divisor = instruction_divisor(mode);
    let lines = mode.lines as usize / divisor;

    let loop_length_ms: f32 = mode.instructions[mode.instruction_loop_start..]
        .iter()
        .map(|tmpl| resolved_length_ms(mode, tmpl))
        .sum::<f32>()
        / divisor as f32;

    let mut total_length_ms: f32 = mode.instructions[..mode.instruction_loop_start]
        .iter()
        .map(|tmpl| resolved_length_ms(mode, tmpl))
        .sum();

    for _ in 0..lines {
        for tmpl in &mode.instructions[mode.instruction_loop_start..] {
            if !mode.uses_extra_lines && tmpl.flags & crate::instruction::flags::EXTRA_LINE != 0 {
                continue;
            }
            total_length_ms += resolved_length_ms(mode, tmpl);
        }
    }

    ModeMetadata { mode, length_ms: total_length_ms, loop_length_ms }
}

impl Metadata {
    /// Compute metadata for every catalogued mode.
    pub fn build() -> Self {
        let per_mode: Vec<ModeMetadata> = MODES.iter().map(process_mode).collect();

        let longest = per_mode
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.length_ms.partial_cmp(&b.1.length_ms).unwrap())
            .map(|(i, _)| i)
            .unwrap_or(0);
        let shortest = per_mode
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.length_ms.partial_cmp(&b.1.length_ms).unwrap())
            .map(|(i, _)| i)
            .unwrap_or(0);

        Self { per_mode, longest, shortest }
    }

    pub fn for_mode(&self, mode: &Mode) -> Option<&ModeMetadata> {
        self.per_mode.iter().find(|m| m.mode.name == mode.name)
    }

    pub fn longest(&self) -> &ModeMetadata {
        &self.per_mode[self.longest]
    }

    pub fn shortest(&self) -> &ModeMetadata {
        &self.per_mode[self.shortest]
    }

    pub fn all(&self) -> &[ModeMetadata] {
        &self.per_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::mode_by_name;

    #[test]
    fn every_catalogued_mode_has_metadata() {
        let meta = Metadata::build();
        assert_eq!(meta.all().len(), MODES.len());
    }

    #[test]
    fn longest_is_at_least_as_long_as_shortest() {
        let meta = Metadata::build();
        assert!(meta.longest().length_ms >= meta.shortest().length_ms);
    }

    #[test]
    fn scottie_dx_is_one_of_the_longer_modes() {
        let meta = Metadata::build();
        let dx = meta.for_mode(mode_by_name("Scottie DX").unwrap()).unwrap();
        let martin4 = meta.for_mode(mode_by_name("Martin 4").unwrap()).unwrap();
        assert!(dx.length_ms > martin4.length_ms);
    }
}
