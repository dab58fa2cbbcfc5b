// src/cue/models
use crate::cd::Msf;
use crate::cue::known::track_modes;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CueSheet {
    pub files: Vec<CueFile>,
    /// Catalog number of the disc, 13 digits.
    pub catalog: Option<String>,
    /// External file holding CD-TEXT data.
    pub cd_text_file: Option<String>,
    pub arranger: Option<String>,
    pub composer: Option<String>,
    pub message: Option<String>,
    pub performer: Option<String>,
    pub songwriter: Option<String>,
    pub title: Option<String>,
    pub upc_ean: Option<String>,
}

impl CueSheet {
    /// All tracks of the sheet, in file order then track order.
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.files.iter().flat_map(|file| file.tracks.iter())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CueFile {
    pub filename: String,
    pub file_format: String,
    pub tracks: Vec<Track>,
    /// `REM` lines that preceded the `FILE` line.
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Track {
    pub number: u32,
    pub mode: String,
    pub flags: Vec<String>,
    pub indices: Vec<Index>,
    pub pregap: Option<Msf>,
    pub postgap: Option<Msf>,
    pub arranger: Option<String>,
    pub composer: Option<String>,
    /// Format: CCOOOOYYSSSSS.
    pub isrc: Option<String>,
    pub message: Option<String>,
    pub performer: Option<String>,
    pub songwriter: Option<String>,
    pub title: Option<String>,
}

impl Track {
    pub fn new(number: u32, mode: impl Into<String>) -> Self {
        Self {
            number,
            mode: mode.into(),
            ..Default::default()
        }
    }

    pub fn is_audio(&self) -> bool {
        self.mode == track_modes::AUDIO
    }

    pub fn first_index(&self) -> Option<&Index> {
        self.indices.first()
    }

    pub fn index(&self, number: u32) -> Option<&Index> {
        self.indices.iter().find(|i| i.number == number)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Index {
    /// 0 marks the start of the pre-gap, 1 the audible start of the track.
    pub number: u32,
    pub position: Msf,
}
