//! The instruction model shared by the schedule builder, encoder, and
//! decoder: a mode's transmission is a flat sequence of [`Instruction`]s,
//! each describing a constant- or swept-pitch tone held for some duration.

use std::fmt;

/// Per-instruction behavior flags.
///
/// Mirrors a C bitset: several of these are mutually exclusive ways of
/// resolving `length_ms`/`pitch` at schedule-build time, the rest are read
/// by the encoder/decoder while walking the built schedule.
pub mod flags {
    /// This instruction belongs to a line only emitted by modes that use
    /// extra lines (e.g. Robot 4:2:0's chroma subsampling).
    pub const EXTRA_LINE: u8 = 0b0000_0001;
    /// This instruction starts a new output scanline.
    pub const NEW_LINE: u8 = 0b0000_0010;
    /// `length_ms` is an index into the mode's `timings` table, not a
    /// literal duration.
    pub const LENGTH_USES_INDEX: u8 = 0b0000_0100;
    /// `pitch` is an index into the mode's `frequencies` table.
    pub const PITCH_USES_INDEX: u8 = 0b0000_1000;
    /// `pitch` selects which scan mixer channel to run (0/1/2), and the
    /// actual tone is computed from the pixel under the scan head.
    pub const PITCH_IS_DELEGATED: u8 = 0b0001_0000;
    /// `pitch` is resolved via the linear sweep pattern, not a scan mixer.
    pub const PITCH_IS_SWEEP: u8 = 0b0010_0000;
    /// This scan line's samples are written into two output rows (used by
    /// chroma-subsampled modes to upsample Cb/Cr back to full height).
    pub const SCAN_IS_DOUBLED: u8 = 0b0100_0000;
}

/// What an instruction represents, independent of how its timing/pitch are
/// resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionKind {
    Invalid,
    Vox,
    Vis,
    Pulse,
    Porch,
    Scan,
    Any,
}

impl Default for InstructionKind {
    fn default() -> Self {
        InstructionKind::Invalid
    }
}

impl fmt::Display for InstructionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InstructionKind::Invalid => "invalid",
            InstructionKind::Vox => "vox",
            InstructionKind::Vis => "vis",
            InstructionKind::Pulse => "pulse",
            InstructionKind::Porch => "porch",
            InstructionKind::Scan => "scan",
            InstructionKind::Any => "any",
        };
        write!(f, "{s}")
    }
}

/// Which scan mixer a mode's color lines run through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanType {
    Monochrome,
    /// Also written YCrCb/YCbCr in SSTV literature.
    YCbCr,
    Rgb,
    Sweep,
}

/// A single step of a mode's transmission schedule, as defined in a
/// catalogue template. `length_ms`/`pitch` are raw template values whose
/// meaning depends on `flags` — resolve them with [`crate::schedule`]
/// before using them to synthesize audio.
#[derive(Debug, Clone, Copy)]
pub struct InstructionTemplate {
    pub name: &'static str,
    pub length_ms: f32,
    pub pitch: f32,
    pub kind: InstructionKind,
    pub flags: u8,
}

/// A fully resolved instruction: `length_ms` is a literal duration and
/// `pitch` is either a literal tone in Hz (for most kinds) or a scan-mixer
/// channel index 0..=2 (when `flags & PITCH_IS_DELEGATED` is set).
#[derive(Debug, Clone, Copy)]
pub struct Instruction {
    pub name: &'static str,
    pub length_ms: f32,
    pub pitch: f32,
    pub kind: InstructionKind,
    pub flags: u8,
}

impl Instruction {
    pub fn has_flag(&self, flag: u8) -> bool {
        self.flags & flag != 0
    }
}
