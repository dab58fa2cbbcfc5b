use crate::cd::SECTOR_SIZE;
use crate::cue::models::{CueFile, CueSheet};
use crate::io::MusicContainer;
use log::debug;
use std::path::Path;

pub mod error;

pub use error::{TocError, TocResult};

/// Builds the CUETools database TOC string for a sheet.
///
/// One entry per track with an INDEX 01, holding its absolute start sector,
/// followed by the total sector count of all files. Every file size must be a
/// whole number of sectors.
pub fn ctdb_toc<F>(cue_sheet: &CueSheet, mut file_size: F) -> TocResult<String>
where
    F: FnMut(&str) -> TocResult<u64>,
{
    let mut sectors: Vec<u64> = Vec::new();
    let mut absolute_track_start_sector = 0u64;

    for file in &cue_sheet.files {
        let size = file_size(&file.filename)?;
        if size % SECTOR_SIZE as u64 != 0 {
            return Err(TocError::InvalidFileSize {
                file: file.filename.clone(),
                size,
            });
        }

        for track in &file.tracks {
            if let Some(index) = track.index(1) {
                sectors.push(absolute_track_start_sector + index.position.to_sectors());
            }
        }

        absolute_track_start_sector += size / SECTOR_SIZE as u64;
    }

    // Album length is the total of every file
    sectors.push(absolute_track_start_sector);

    let toc = sectors
        .iter()
        .map(|sector| sector.to_string())
        .collect::<Vec<_>>()
        .join(":");
    debug!("Computed TOC: {toc}");

    Ok(toc)
}

pub fn ctdb_toc_from_container(
    cue_sheet: &CueSheet,
    container: &dyn MusicContainer,
) -> TocResult<String> {
    ctdb_toc(cue_sheet, |name| Ok(container.file_size(name)?))
}

/// Like [`ctdb_toc`], with sizes taken from disk. Relative names resolve
/// against `working_folder`.
pub fn ctdb_toc_from_folder(
    cue_sheet: &CueSheet,
    working_folder: impl AsRef<Path>,
) -> TocResult<String> {
    let working_folder = working_folder.as_ref();

    ctdb_toc(cue_sheet, |name| {
        let path = working_folder.join(name);
        if !path.is_file() {
            return Err(TocError::MissingFile(path));
        }

        Ok(std::fs::metadata(&path)?.len())
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackOffsets {
    /// Byte offset of the first index, where the pre-gap begins.
    pub start: u64,
    /// Byte offset of INDEX 01, where playback begins.
    pub play: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByteRange {
    pub offset: u64,
    pub length: u64,
}

/// Offsets of every track in `file`, plus a sentinel at `file_size`.
///
/// A track without INDEX 01 plays from its first index, a track without any
/// index from byte 0.
pub fn track_offsets(file: &CueFile, file_size: u64) -> Vec<TrackOffsets> {
    let mut offsets: Vec<TrackOffsets> = file
        .tracks
        .iter()
        .map(|track| {
            let first = track.first_index().map(|i| i.position.to_bytes());
            let index1 = track.index(1).map(|i| i.position.to_bytes());

            TrackOffsets {
                start: first.unwrap_or(0),
                play: index1.or(first).unwrap_or(0),
            }
        })
        .collect();

    offsets.push(TrackOffsets {
        start: file_size,
        play: file_size,
    });

    offsets
}

/// Playable byte range of each track: from its INDEX 01 up to the first
/// index of the next track, the last one running to the end of the file.
pub fn track_ranges(file: &CueFile, file_size: u64) -> Vec<ByteRange> {
    track_offsets(file, file_size)
        .windows(2)
        .map(|pair| ByteRange {
            offset: pair[0].play,
            length: pair[1].start.saturating_sub(pair[0].play),
        })
        .collect()
}
