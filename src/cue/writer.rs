use crate::cue::error::CueResult;
use crate::cue::models::CueSheet;
use std::fmt::Write;
use std::path::Path;

const QUOTE: &str = "\"";
const NEW_LINE: &str = "\r\n";
const INDENT_LEVEL_0: &str = "";
const INDENT_LEVEL_1: &str = "  ";
const INDENT_LEVEL_2: &str = "    ";

/// Writes cue sheets in canonical layout with CRLF line endings.
#[derive(Debug, Default, Clone, Copy)]
pub struct CueWriter;

impl CueWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write(&self, sheet: &CueSheet) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_to(sheet, &mut out);
        out
    }

    pub fn write_file(&self, sheet: &CueSheet, path: impl AsRef<Path>) -> CueResult<()> {
        let mut out = String::new();
        self.write_to(sheet, &mut out)?;
        std::fs::write(path, out)?;

        Ok(())
    }

    pub fn write_to(&self, sheet: &CueSheet, w: &mut impl Write) -> std::fmt::Result {
        write_property(w, INDENT_LEVEL_0, "CATALOG", sheet.catalog.as_deref(), false)?;
        write_property(w, INDENT_LEVEL_0, "CDTEXTFILE", sheet.cd_text_file.as_deref(), true)?;
        write_property(w, INDENT_LEVEL_0, "TITLE", sheet.title.as_deref(), true)?;
        write_property(w, INDENT_LEVEL_0, "ARRANGER", sheet.arranger.as_deref(), true)?;
        write_property(w, INDENT_LEVEL_0, "COMPOSER", sheet.composer.as_deref(), true)?;
        write_property(w, INDENT_LEVEL_0, "MESSAGE", sheet.message.as_deref(), true)?;
        write_property(w, INDENT_LEVEL_0, "PERFORMER", sheet.performer.as_deref(), true)?;
        write_property(w, INDENT_LEVEL_0, "SONGWRITER", sheet.songwriter.as_deref(), true)?;
        // The second CDTEXTFILE line is part of the written format.
        write_property(w, INDENT_LEVEL_0, "CDTEXTFILE", sheet.cd_text_file.as_deref(), true)?;

        for file in &sheet.files {
            for comment in &file.comments {
                write_property(w, INDENT_LEVEL_0, "REM", Some(&comment.text), false)?;
            }

            let file_line = format!("{QUOTE}{}{QUOTE} {}", file.filename, file.file_format);
            write_property(w, INDENT_LEVEL_0, "FILE", Some(&file_line), false)?;

            for track in &file.tracks {
                let track_line = format!("{:02} {}", track.number, track.mode);
                write_property(w, INDENT_LEVEL_1, "TRACK", Some(&track_line), false)?;

                write_property(w, INDENT_LEVEL_2, "TITLE", track.title.as_deref(), true)?;
                write_property(w, INDENT_LEVEL_2, "ARRANGER", track.arranger.as_deref(), true)?;
                write_property(w, INDENT_LEVEL_2, "COMPOSER", track.composer.as_deref(), true)?;
                write_property(w, INDENT_LEVEL_2, "PERFORMER", track.performer.as_deref(), true)?;
                write_property(w, INDENT_LEVEL_2, "SONGWRITER", track.songwriter.as_deref(), true)?;
                write_property(w, INDENT_LEVEL_2, "ISRC", track.isrc.as_deref(), false)?;

                let pregap = track.pregap.map(|gap| gap.to_string());
                write_property(w, INDENT_LEVEL_2, "PREGAP", pregap.as_deref(), false)?;
                let postgap = track.postgap.map(|gap| gap.to_string());
                write_property(w, INDENT_LEVEL_2, "POSTGAP", postgap.as_deref(), false)?;

                if !track.flags.is_empty() {
                    let flags = track.flags.join(" ");
                    write_property(w, INDENT_LEVEL_2, "FLAGS", Some(&flags), false)?;
                }

                for index in &track.indices {
                    let index_line = format!("{:02} {}", index.number, index.position);
                    write_property(w, INDENT_LEVEL_2, "INDEX", Some(&index_line), false)?;
                }
            }
        }

        Ok(())
    }
}

fn write_property(
    w: &mut impl Write,
    indent: &str,
    name: &str,
    value: Option<&str>,
    quote: bool,
) -> std::fmt::Result {
    let Some(value) = value else {
        return Ok(());
    };

    let quote = if quote { QUOTE } else { "" };
    write!(w, "{indent}{name} {quote}{value}{quote}{NEW_LINE}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cd::Msf;
    use crate::cue::models::{Comment, CueFile, Index, Track};

    fn single_track_sheet() -> CueSheet {
        CueSheet {
            files: vec![CueFile {
                filename: "Drama CD (Japan).bin".to_string(),
                file_format: "BINARY".to_string(),
                tracks: vec![Track {
                    indices: vec![Index {
                        number: 1,
                        position: Msf::new(0, 0, 0),
                    }],
                    ..Track::new(1, "AUDIO")
                }],
                comments: Vec::new(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn writes_minimal_sheet() {
        let expected = "FILE \"Drama CD (Japan).bin\" BINARY\r\n  TRACK 01 AUDIO\r\n    INDEX 01 00:00:00\r\n";
        assert_eq!(CueWriter::new().write(&single_track_sheet()), expected);
    }

    #[test]
    fn writes_cd_text_in_canonical_order() {
        let mut sheet = single_track_sheet();
        sheet.songwriter = Some("Album Songwriter".to_string());
        sheet.title = Some("Album Title".to_string());
        sheet.performer = Some("Album Performer".to_string());
        sheet.catalog = Some("0724384960650".to_string());

        let track = &mut sheet.files[0].tracks[0];
        track.isrc = Some("QM9AA1871046".to_string());
        track.title = Some("Track Title".to_string());
        track.performer = Some("Track Performer".to_string());

        let expected = "CATALOG 0724384960650\r\n\
                        TITLE \"Album Title\"\r\n\
                        PERFORMER \"Album Performer\"\r\n\
                        SONGWRITER \"Album Songwriter\"\r\n\
                        FILE \"Drama CD (Japan).bin\" BINARY\r\n\
                        \x20 TRACK 01 AUDIO\r\n\
                        \x20   TITLE \"Track Title\"\r\n\
                        \x20   PERFORMER \"Track Performer\"\r\n\
                        \x20   ISRC QM9AA1871046\r\n\
                        \x20   INDEX 01 00:00:00\r\n";

        assert_eq!(CueWriter::new().write(&sheet), expected);
    }

    #[test]
    fn writes_cd_text_file_twice() {
        let mut sheet = CueSheet::default();
        sheet.cd_text_file = Some("disc.cdt".to_string());
        sheet.title = Some("T".to_string());

        assert_eq!(
            CueWriter::new().write(&sheet),
            "CDTEXTFILE \"disc.cdt\"\r\nTITLE \"T\"\r\nCDTEXTFILE \"disc.cdt\"\r\n"
        );
    }

    #[test]
    fn writes_comments_gaps_and_flags() {
        let mut sheet = single_track_sheet();
        sheet.files[0].comments.push(Comment {
            text: "GENRE Ambient".to_string(),
        });
        let track = &mut sheet.files[0].tracks[0];
        track.pregap = Some(Msf::new(0, 2, 0));
        track.flags = vec!["PRE".to_string(), "DCP".to_string()];

        let expected = "REM GENRE Ambient\r\n\
                        FILE \"Drama CD (Japan).bin\" BINARY\r\n\
                        \x20 TRACK 01 AUDIO\r\n\
                        \x20   PREGAP 00:02:00\r\n\
                        \x20   FLAGS PRE DCP\r\n\
                        \x20   INDEX 01 00:00:00\r\n";

        assert_eq!(CueWriter::new().write(&sheet), expected);
    }

    #[test]
    fn omits_empty_flags() {
        let output = CueWriter::new().write(&single_track_sheet());
        assert!(!output.contains("FLAGS"));
    }

    #[test]
    fn empty_sheet_writes_nothing() {
        assert_eq!(CueWriter::new().write(&CueSheet::default()), "");
    }
}
