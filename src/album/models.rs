use crate::cd::position_to_duration;
use crate::cue::models::CueSheet;
use crate::io::error::ContainerResult;
use crate::io::{MusicContainer, ReadSeek, SubStream};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// One playable audio track of a loaded album.
#[derive(Debug, Clone)]
pub struct AlbumTrack {
    pub container: Arc<dyn MusicContainer>,
    pub cue_sheet: Arc<CueSheet>,
    /// File stem of the cue sheet.
    pub cue_sheet_name: String,
    /// Name of the cue sheet inside the container.
    pub cue_sheet_file_name: String,
    pub container_path: PathBuf,
    pub album_title: String,
    pub album_performer: String,
    pub track_file_name: String,
    pub track_file_not_found: bool,
    pub track_number: u32,
    pub track_title: String,
    pub track_performer: String,
    pub track_songwriter: String,
    /// Byte offset of INDEX 01 inside `track_file_name`, 0 when the file is missing.
    pub track_offset: u64,
    /// Playable length in bytes, 0 when the file is missing.
    pub track_size: u64,
}

impl AlbumTrack {
    pub fn duration(&self) -> Duration {
        position_to_duration(self.track_size)
    }

    /// Opens a stream over exactly this track's bytes.
    pub fn open_stream(&self) -> ContainerResult<SubStream<Box<dyn ReadSeek>>> {
        let file_size = self.container.file_size(&self.track_file_name)?;
        let stream = self.container.open_stream(&self.track_file_name)?;
        Ok(SubStream::with_inner_len(
            stream,
            file_size,
            self.track_offset,
            self.track_size,
        )?)
    }
}
