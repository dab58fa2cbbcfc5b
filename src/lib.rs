//! Cue sheet engine for CD audio albums stored in folders or zip archives.
//!
//! Parses and writes cue sheets, computes CUETools TOC strings and per track
//! byte ranges, and exposes the audio behind a uniform container interface.

pub mod album;
pub mod cd;
pub mod cue;
pub mod io;
pub mod toc;
