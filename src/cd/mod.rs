// src/cd/mod.rs
use std::fmt::Display;
use std::time::Duration;

pub const SECTOR_SIZE: usize = 2352;
pub const SECTORS_PER_SECOND: u32 = 75;
pub const SAMPLE_RATE: u32 = 44_100;
pub const CHANNELS: u16 = 2;
pub const BITS_PER_SAMPLE: u16 = 16;

/// A CD time position in minutes, seconds and frames.
///
/// One frame is one sector, 1/75 of a second. Frames are expected to stay in
/// `0..75`, minutes are unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Msf {
    pub minutes: u32,
    pub seconds: u32,
    pub frames: u32,
}

impl Msf {
    pub fn new(minutes: u32, seconds: u32, frames: u32) -> Self {
        Self {
            minutes,
            seconds,
            frames,
        }
    }

    pub fn to_sectors(&self) -> u64 {
        (self.minutes as u64 * 60 + self.seconds as u64) * SECTORS_PER_SECOND as u64
            + self.frames as u64
    }

    pub fn to_bytes(&self) -> u64 {
        self.to_sectors() * SECTOR_SIZE as u64
    }
}

impl Display for Msf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.minutes, self.seconds, self.frames
        )
    }
}

/// Converts a byte position inside raw CD audio to a playback duration.
///
/// Only whole sectors count, a partial sector at the end is dropped.
pub fn position_to_duration(position: u64) -> Duration {
    let sector = position / SECTOR_SIZE as u64;
    let seconds = sector / SECTORS_PER_SECOND as u64;
    let fraction = sector % SECTORS_PER_SECOND as u64;

    Duration::from_secs(seconds)
        + Duration::from_secs_f64(fraction as f64 / SECTORS_PER_SECOND as f64)
}
