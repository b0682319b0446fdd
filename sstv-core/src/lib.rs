//! SSTV core library
//!
//! Codec engine for Slow-Scan Television: converts RGB raster images to
//! and from mono PCM audio across the legacy amateur-radio SSTV mode
//! family (Robot, Martin, Scottie, Wraase, PD, Pasokon). Handles mode
//! catalogue lookup, VOX/VIS header framing, phase-continuous tone
//! synthesis, and frequency-tracking demodulation. Image/audio file I/O,
//! live playback, and capture are left to callers.

pub mod catalogue;
pub mod config;
pub mod decoder;
pub mod demod;
pub mod encoder;
pub mod errors;
pub mod geometry;
pub mod instruction;
pub mod logging;
pub mod metadata;
pub mod scan;
pub mod schedule;
pub mod utils;

pub use catalogue::{mode_by_name, mode_by_vis_code, Mode, MODES};
pub use config::{DecoderConfig, EncoderConfig};
pub use decoder::{Decoder, DecodedImage};
pub use encoder::{Encoder, EncoderState, PixelProvider};
pub use errors::{ConfigError, DecodeError, EncodeError, Result, SstvError};
pub use metadata::{Metadata, ModeMetadata};
