use crate::cd::Msf;
use crate::cue::error::CueResult;
use crate::cue::models::{Comment, CueFile, CueSheet, Index, Track};
use lazy_static::lazy_static;
use log::{trace, warn};
use regex::{Captures, Regex};
use std::path::Path;

lazy_static! {
    static ref FILE_RE: Regex = Regex::new(r#"FILE\s"([^"]+)"\s(\w+)"#).unwrap();
    static ref TRACK_RE: Regex = Regex::new(r"TRACK\s([0-9]+)\s([\w/]+)").unwrap();
    static ref INDEX_RE: Regex =
        Regex::new(r"\sINDEX\s([0-9]+)\s([0-9]+):([0-9]+):([0-9]+)").unwrap();
    static ref GAP_RE: Regex =
        Regex::new(r"\s(?:PREGAP|POSTGAP)\s([0-9]+):([0-9]+):([0-9]+)").unwrap();
}

const FILE_PREFIX: &str = "FILE";
const TRACK_PREFIX: &str = "  TRACK";
const INDEX_PREFIX: &str = "    INDEX";
const PREGAP_PREFIX: &str = "    PREGAP";
const POSTGAP_PREFIX: &str = "    POSTGAP";
const FLAGS_PREFIX: &str = "    FLAGS";

/// A keyword whose value is sliced out of the line by column.
///
/// The value starts one column after the prefix, plus one more for the
/// opening quote when `quoted`. A quoted value ends one character before the
/// end of the line.
struct Keyword<F> {
    prefix: &'static str,
    quoted: bool,
    field: F,
}

impl<F> Keyword<F> {
    const fn bare(prefix: &'static str, field: F) -> Self {
        Self {
            prefix,
            quoted: false,
            field,
        }
    }

    const fn quoted(prefix: &'static str, field: F) -> Self {
        Self {
            prefix,
            quoted: true,
            field,
        }
    }

    fn value<'a>(&self, line: &'a str) -> Option<&'a str> {
        let start = self.prefix.len() + 1 + usize::from(self.quoted);
        let end = if self.quoted {
            let (last, _) = line.char_indices().next_back()?;
            last
        } else {
            line.len()
        };

        line.get(start..end)
    }
}

#[derive(Debug, Clone, Copy)]
enum SheetField {
    Comment,
    Catalog,
    Title,
    Arranger,
    Composer,
    Message,
    Performer,
    Songwriter,
    CdTextFile,
}

#[derive(Debug, Clone, Copy)]
enum TrackField {
    Arranger,
    Composer,
    Isrc,
    Message,
    Performer,
    Songwriter,
    Title,
}

impl TrackField {
    fn slot(self, track: &mut Track) -> &mut Option<String> {
        match self {
            TrackField::Arranger => &mut track.arranger,
            TrackField::Composer => &mut track.composer,
            TrackField::Isrc => &mut track.isrc,
            TrackField::Message => &mut track.message,
            TrackField::Performer => &mut track.performer,
            TrackField::Songwriter => &mut track.songwriter,
            TrackField::Title => &mut track.title,
        }
    }
}

const SHEET_KEYWORDS: &[Keyword<SheetField>] = &[
    Keyword::bare("REM", SheetField::Comment),
    Keyword::bare("CATALOG", SheetField::Catalog),
    Keyword::quoted("TITLE", SheetField::Title),
    Keyword::quoted("ARRANGER", SheetField::Arranger),
    Keyword::quoted("COMPOSER", SheetField::Composer),
    Keyword::quoted("MESSAGE", SheetField::Message),
    Keyword::quoted("PERFORMER", SheetField::Performer),
    Keyword::quoted("SONGWRITER", SheetField::Songwriter),
    Keyword::quoted("CDTEXTFILE", SheetField::CdTextFile),
];

const TRACK_KEYWORDS: &[Keyword<TrackField>] = &[
    Keyword::quoted("    ARRANGER", TrackField::Arranger),
    Keyword::quoted("    COMPOSER", TrackField::Composer),
    Keyword::bare("    ISRC", TrackField::Isrc),
    Keyword::quoted("    MESSAGE", TrackField::Message),
    Keyword::quoted("    PERFORMER", TrackField::Performer),
    Keyword::quoted("    SONGWRITER", TrackField::Songwriter),
    Keyword::quoted("    TITLE", TrackField::Title),
];

enum ParseState {
    NoFile,
    InFile(CueFile),
    InTrack(CueFile, Track),
}

impl ParseState {
    fn track_mut(&mut self) -> Option<&mut Track> {
        match self {
            ParseState::InTrack(_, track) => Some(track),
            _ => None,
        }
    }

    /// Closes the open track, if any, and returns the open file.
    fn into_file(self) -> Option<CueFile> {
        match self {
            ParseState::NoFile => None,
            ParseState::InFile(file) => Some(file),
            ParseState::InTrack(mut file, track) => {
                file.tracks.push(track);
                Some(file)
            }
        }
    }
}

/// Line based cue sheet parser.
///
/// Malformed or unknown lines are dropped, parsing itself never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct CueReader;

impl CueReader {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_file(&self, cue_path: impl AsRef<Path>) -> CueResult<CueSheet> {
        let data = std::fs::read(cue_path.as_ref())?;
        let text = String::from_utf8(data)?;

        Ok(self.parse(text.strip_prefix('\u{feff}').unwrap_or(&text)))
    }

    pub fn parse(&self, data: &str) -> CueSheet {
        let mut sheet = CueSheet::default();
        let mut comments: Vec<Comment> = Vec::new();
        let mut state = ParseState::NoFile;

        for line in data.split(['\r', '\n']).filter(|line| !line.is_empty()) {
            if let Some(keyword) = SHEET_KEYWORDS.iter().find(|k| line.starts_with(k.prefix)) {
                let Some(value) = keyword.value(line) else {
                    trace!("Dropping malformed line: {line:?}");
                    continue;
                };
                let value = value.to_string();

                match keyword.field {
                    SheetField::Comment => comments.push(Comment { text: value }),
                    SheetField::Catalog => sheet.catalog = Some(value),
                    SheetField::Title => sheet.title = Some(value),
                    SheetField::Arranger => sheet.arranger = Some(value),
                    SheetField::Composer => sheet.composer = Some(value),
                    SheetField::Message => sheet.message = Some(value),
                    SheetField::Performer => sheet.performer = Some(value),
                    SheetField::Songwriter => sheet.songwriter = Some(value),
                    SheetField::CdTextFile => sheet.cd_text_file = Some(value),
                }
            } else if line.starts_with(FILE_PREFIX) {
                if let Some(file) = state.into_file() {
                    sheet.files.push(file);
                }

                let mut file = CueFile::default();
                match FILE_RE.captures(line) {
                    Some(caps) => {
                        file.filename = caps[1].to_string();
                        file.file_format = caps[2].to_string();
                    }
                    None => trace!("FILE line without name and format: {line:?}"),
                }
                file.comments.append(&mut comments);

                state = ParseState::InFile(file);
            } else if line.starts_with(TRACK_PREFIX) {
                let Some((number, mode)) = parse_track(line) else {
                    trace!("Dropping malformed TRACK line: {line:?}");
                    continue;
                };

                state = match state.into_file() {
                    Some(file) => ParseState::InTrack(file, Track::new(number, mode)),
                    None => {
                        warn!("TRACK {number:02} without a preceding FILE, ignoring");
                        ParseState::NoFile
                    }
                };
            } else if let Some(keyword) = TRACK_KEYWORDS.iter().find(|k| line.starts_with(k.prefix))
            {
                let Some(track) = state.track_mut() else {
                    warn!("{} without a preceding TRACK, ignoring", keyword.prefix.trim());
                    continue;
                };

                match keyword.value(line) {
                    Some(value) => *keyword.field.slot(track) = Some(value.to_string()),
                    None => trace!("Dropping malformed line: {line:?}"),
                }
            } else if line.starts_with(INDEX_PREFIX) {
                let Some(track) = state.track_mut() else {
                    warn!("INDEX without a preceding TRACK, ignoring");
                    continue;
                };

                match parse_index(line) {
                    Some(index) => track.indices.push(index),
                    None => trace!("Dropping malformed INDEX line: {line:?}"),
                }
            } else if line.starts_with(PREGAP_PREFIX) || line.starts_with(POSTGAP_PREFIX) {
                let Some(track) = state.track_mut() else {
                    warn!("{} without a preceding TRACK, ignoring", line.trim());
                    continue;
                };

                let Some(gap) = parse_gap(line) else {
                    trace!("Dropping malformed gap line: {line:?}");
                    continue;
                };

                if line.starts_with(PREGAP_PREFIX) {
                    track.pregap = Some(gap);
                } else {
                    track.postgap = Some(gap);
                }
            } else if line.starts_with(FLAGS_PREFIX) {
                let Some(track) = state.track_mut() else {
                    warn!("FLAGS without a preceding TRACK, ignoring");
                    continue;
                };

                let values = line.get(FLAGS_PREFIX.len() + 1..).unwrap_or_default();
                track
                    .flags
                    .extend(values.split(' ').filter(|f| !f.is_empty()).map(String::from));
            } else {
                trace!("Ignoring unknown line: {line:?}");
            }
        }

        if let Some(file) = state.into_file() {
            sheet.files.push(file);
        }

        sheet
    }
}

fn parse_track(line: &str) -> Option<(u32, String)> {
    let caps = TRACK_RE.captures(line)?;
    let number = caps[1].parse().ok()?;

    Some((number, caps[2].to_string()))
}

fn parse_index(line: &str) -> Option<Index> {
    let caps = INDEX_RE.captures(line)?;

    Some(Index {
        number: caps[1].parse().ok()?,
        position: msf_from_captures(&caps, 2)?,
    })
}

fn parse_gap(line: &str) -> Option<Msf> {
    let caps = GAP_RE.captures(line)?;
    msf_from_captures(&caps, 1)
}

fn msf_from_captures(caps: &Captures, first: usize) -> Option<Msf> {
    Some(Msf {
        minutes: caps[first].parse().ok()?,
        seconds: caps[first + 1].parse().ok()?,
        frames: caps[first + 2].parse().ok()?,
    })
}
