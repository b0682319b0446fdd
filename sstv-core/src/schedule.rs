//! Builds the flat, runtime-ready [`Instruction`] sequence for a mode: VOX
//! preamble, VIS header, the mode's per-line body (expanded from its
//! looping template), and the footer.

use crate::catalogue::Mode;
use crate::instruction::{flags::*, Instruction, InstructionKind};
use crate::utils::even_parity7;

/// VOX preamble: eight 100ms tones alternating a 1500Hz reference with the
/// low (1900Hz) then high (2300Hz) VOX tones.
pub fn create_vox_header() -> Vec<Instruction> {
    const TONES: [f32; 8] = [1900.0, 1500.0, 1900.0, 1500.0, 2300.0, 1500.0, 2300.0, 1500.0];
    TONES
        .iter()
        .map(|&pitch| Instruction { name: "vox", length_ms: 100.0, pitch, kind: InstructionKind::Vox, flags: 0 })
        .collect()
}

/// VIS header: leader/break/leader, 30ms start bit, 7 mode bits (LSB
/// first, 1100Hz=1/1300Hz=0), an even-parity bit, and a 30ms stop bit.
pub fn create_vis_header(vis_code: u8) -> Vec<Instruction> {
    let mut ins = vec![
        Instruction { name: "leader 1", length_ms: 300.0, pitch: 1900.0, kind: InstructionKind::Vis, flags: 0 },
        Instruction { name: "break", length_ms: 10.0, pitch: 1200.0, kind: InstructionKind::Vis, flags: 0 },
        Instruction { name: "leader 2", length_ms: 300.0, pitch: 1900.0, kind: InstructionKind::Vis, flags: 0 },
        Instruction { name: "vis start", length_ms: 30.0, pitch: 1200.0, kind: InstructionKind::Vis, flags: 0 },
    ];

    let mut parity = false;
    for bit in 0..7 {
        let on = vis_code & (1 << bit) != 0;
        if on {
            parity = !parity;
        }
        ins.push(Instruction {
            name: "vis bit",
            length_ms: 30.0,
            pitch: if on { 1100.0 } else { 1300.0 },
            kind: InstructionKind::Vis,
            flags: 0,
        });
    }
    debug_assert_eq!(parity, even_parity7(vis_code) == 1);

    ins.push(Instruction { name: "vis parity", length_ms: 30.0, pitch: if parity { 1100.0 } else { 1300.0 }, kind: InstructionKind::Vis, flags: 0 });
    ins.push(Instruction { name: "vis stop", length_ms: 30.0, pitch: 1200.0, kind: InstructionKind::Vis, flags: 0 });
    ins
}

/// Undocumented four-tone footer some decoders (MMSSTV) expect after the
/// final scan line.
pub fn create_footer() -> Vec<Instruction> {
    const TONES: [f32; 4] = [1900.0, 1500.0, 1900.0, 1500.0];
    TONES
        .iter()
        .map(|&pitch| Instruction { name: "footer", length_ms: 100.0, pitch, kind: InstructionKind::Any, flags: 0 })
        .collect()
}

/// Expand `mode`'s looping instruction template into the per-line body,
/// resolving `LENGTH_USES_INDEX`/`PITCH_USES_INDEX` against the mode's
/// `timings`/`frequencies` tables. Does not include the VOX/VIS/footer
/// framing.
pub fn create_instructions(mode: &Mode) -> Vec<Instruction> {
    let instruction_divisor = if mode.uses_extra_lines {
        mode.instructions[mode.instruction_loop_start..]
            .iter()
            .filter(|ins| ins.flags & NEW_LINE != 0)
            .count()
            .max(1)
    } else {
        1
    };

    let lines = mode.lines as usize / instruction_divisor;

    let resolve = |tmpl: &crate::instruction::InstructionTemplate| -> Instruction {
        let length_ms = if tmpl.flags & LENGTH_USES_INDEX != 0 {
            mode.timings[tmpl.length_ms as usize]
        } else {
            tmpl.length_ms
        };
        let pitch = if tmpl.flags & PITCH_USES_INDEX != 0 {
            mode.frequencies[tmpl.pitch as usize] as f32
        } else {
            tmpl.pitch
        };
        Instruction { name: tmpl.name, length_ms, pitch, kind: tmpl.kind, flags: tmpl.flags }
    };

    let mut out = Vec::new();

    for tmpl in &mode.instructions[..mode.instruction_loop_start] {
        out.push(resolve(tmpl));
    }

    for _ in 0..lines {
        for tmpl in &mode.instructions[mode.instruction_loop_start..] {
            if !mode.uses_extra_lines && tmpl.flags & EXTRA_LINE != 0 {
                continue;
            }
            out.push(resolve(tmpl));
        }
    }

    out
}

/// Build the complete transmission schedule: VOX (optional) + VIS header +
/// mode body + footer (optional).
pub fn build_schedule(mode: &Mode, emit_vox: bool, emit_footer: bool) -> Vec<Instruction> {
    let mut out = Vec::new();
    if emit_vox {
        out.extend(create_vox_header());
    }
    out.extend(create_vis_header(mode.vis_code));
    out.extend(create_instructions(mode));
    if emit_footer {
        out.extend(create_footer());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::mode_by_name;

    #[test]
    fn vis_header_has_thirteen_instructions() {
        let h = create_vis_header(44);
        assert_eq!(h.len(), 13);
    }

    #[test]
    fn vis_parity_is_even_across_all_vis_codes() {
        for code in 0u8..128 {
            let h = create_vis_header(code);
            let bits: Vec<bool> = h[4..12].iter().map(|i| (i.pitch - 1100.0).abs() < 1.0).collect();
            let ones = bits.iter().filter(|&&b| b).count();
            assert_eq!(ones % 2, 0, "vis_code {code} has odd parity across its 8 bit+parity tones");
        }
    }

    #[test]
    fn robot36_uses_extra_lines_and_halves_instruction_count() {
        let mode = mode_by_name("Robot 36").unwrap();
        let ins = create_instructions(mode);
        let new_lines = ins.iter().filter(|i| i.flags & NEW_LINE != 0).count();
        assert_eq!(new_lines, mode.lines as usize);
    }

    #[test]
    fn scottie_leading_pulse_appears_once() {
        let mode = mode_by_name("Scottie 1").unwrap();
        let ins = create_instructions(mode);
        let leads = ins.iter().filter(|i| i.name == "starting sync pulse").count();
        assert_eq!(leads, 1);
    }

    #[test]
    fn create_instructions_is_idempotent() {
        let mode = mode_by_name("Martin 1").unwrap();
        let a = create_instructions(mode);
        let b = create_instructions(mode);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.length_ms, y.length_ms);
            assert_eq!(x.pitch, y.pitch);
        }
    }
}
