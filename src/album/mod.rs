use crate::cue::CueReader;
use crate::io::{FolderContainer, MusicContainer, ZipContainer};
use crate::toc::track_ranges;
use log::{debug, info, warn};
use std::path::Path;
use std::sync::Arc;

pub mod error;
pub mod models;

pub use error::{AlbumError, AlbumResult};
pub use models::AlbumTrack;

pub const DEFAULT_SHEET_EXTENSION: &str = "cue";
pub const ARCHIVE_EXTENSION: &str = "zip";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Extension of the sheet file looked up in a container.
    pub sheet_extension: String,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            sheet_extension: DEFAULT_SHEET_EXTENSION.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AlbumLoader {
    options: LoaderOptions,
}

impl AlbumLoader {
    pub fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    /// Loads an album from a `.cue` file, using its folder, or from a `.zip` archive.
    pub fn load_from(&self, path: impl AsRef<Path>) -> AlbumResult<Vec<AlbumTrack>> {
        let container = self.open_container(path)?;
        self.load_container(container)
    }

    pub fn open_container(&self, path: impl AsRef<Path>) -> AlbumResult<Arc<dyn MusicContainer>> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();

        if extension.eq_ignore_ascii_case(&self.options.sheet_extension) {
            if !path.is_file() {
                return Err(AlbumError::FileNotFound(path.to_path_buf()));
            }

            let folder = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            debug!("Using folder container {}", folder.display());

            Ok(Arc::new(FolderContainer::new(folder)?))
        } else if extension.eq_ignore_ascii_case(ARCHIVE_EXTENSION) {
            if !path.is_file() {
                return Err(AlbumError::FileNotFound(path.to_path_buf()));
            }
            debug!("Using archive container {}", path.display());

            Ok(Arc::new(ZipContainer::open(path)?))
        } else {
            Err(AlbumError::UnsupportedPath(path.to_path_buf()))
        }
    }

    /// Builds the playable track list of the first cue sheet found in `container`.
    ///
    /// Tracks whose audio file is missing are kept, flagged, with an empty range.
    pub fn load_container(&self, container: Arc<dyn MusicContainer>) -> AlbumResult<Vec<AlbumTrack>> {
        let extension = &self.options.sheet_extension;
        let cue_sheet_file_name = container
            .enumerate_files_by_extension(extension)?
            .into_iter()
            .next()
            .ok_or_else(|| AlbumError::NoCueSheetFound {
                extension: extension.clone(),
                container: container.container_path().to_path_buf(),
            })?;

        info!("Loading cue sheet {cue_sheet_file_name}");
        let cue_data = container.read_text(&cue_sheet_file_name)?;
        let cue_sheet = Arc::new(CueReader::new().parse(&cue_data));

        let cue_sheet_name = Path::new(&cue_sheet_file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        let container_path = container.container_path().to_path_buf();

        let mut album_tracks = Vec::new();

        for file in &cue_sheet.files {
            let file_exists = container.file_exists(&file.filename);
            let file_size = if file_exists {
                container.file_size(&file.filename)?
            } else {
                warn!("Cue sheet references missing file: {}", file.filename);
                0
            };

            let ranges = track_ranges(file, file_size);

            for (track, range) in file.tracks.iter().zip(ranges) {
                if !track.is_audio() {
                    debug!("Skipping {} track {:02}", track.mode, track.number);
                    continue;
                }

                album_tracks.push(AlbumTrack {
                    container: container.clone(),
                    cue_sheet: cue_sheet.clone(),
                    cue_sheet_name: cue_sheet_name.clone(),
                    cue_sheet_file_name: cue_sheet_file_name.clone(),
                    container_path: container_path.clone(),
                    album_title: cue_sheet.title.clone().unwrap_or_default(),
                    album_performer: cue_sheet.performer.clone().unwrap_or_default(),
                    track_file_name: file.filename.clone(),
                    track_file_not_found: !file_exists,
                    track_number: track.number,
                    track_title: track.title.clone().unwrap_or_default(),
                    track_performer: track
                        .performer
                        .clone()
                        .or_else(|| cue_sheet.performer.clone())
                        .unwrap_or_default(),
                    track_songwriter: track
                        .songwriter
                        .clone()
                        .or_else(|| cue_sheet.songwriter.clone())
                        .unwrap_or_default(),
                    track_offset: if file_exists { range.offset } else { 0 },
                    track_size: if file_exists { range.length } else { 0 },
                });
            }
        }

        debug!("Loaded {} playable tracks", album_tracks.len());
        Ok(album_tracks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cd::SECTOR_SIZE;
    use std::fs;
    use std::io::Read;

    const SHEET: &str = "PERFORMER \"Album Artist\"\r\n\
                         SONGWRITER \"Album Writer\"\r\n\
                         TITLE \"Album\"\r\n\
                         FILE \"album.bin\" BINARY\r\n\
                         \x20 TRACK 01 AUDIO\r\n\
                         \x20   TITLE \"One\"\r\n\
                         \x20   INDEX 01 00:00:00\r\n\
                         \x20 TRACK 02 MODE1/2352\r\n\
                         \x20   INDEX 01 00:00:10\r\n\
                         \x20 TRACK 03 AUDIO\r\n\
                         \x20   TITLE \"Three\"\r\n\
                         \x20   PERFORMER \"Guest\"\r\n\
                         \x20   INDEX 00 00:00:20\r\n\
                         \x20   INDEX 01 00:00:30\r\n\
                         FILE \"missing.bin\" BINARY\r\n\
                         \x20 TRACK 04 AUDIO\r\n\
                         \x20   INDEX 01 00:00:00\r\n";

    fn album_folder() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("My Album.cue"), SHEET).unwrap();
        let audio: Vec<u8> = (0..SECTOR_SIZE * 40).map(|i| (i % 253) as u8).collect();
        fs::write(dir.path().join("album.bin"), audio).unwrap();
        dir
    }

    #[test]
    fn loads_audio_tracks_from_folder() {
        let dir = album_folder();
        let tracks = AlbumLoader::default()
            .load_from(dir.path().join("My Album.cue"))
            .unwrap();

        let numbers: Vec<u32> = tracks.iter().map(|t| t.track_number).collect();
        assert_eq!(numbers, vec![1, 3, 4]);

        let first = &tracks[0];
        assert_eq!(first.cue_sheet_name, "My Album");
        assert_eq!(first.album_title, "Album");
        assert_eq!(first.track_title, "One");
        assert_eq!(first.track_performer, "Album Artist");
        assert_eq!(first.track_songwriter, "Album Writer");
        assert_eq!(first.track_offset, 0);
        assert_eq!(first.track_size, 10 * SECTOR_SIZE as u64);

        let third = &tracks[1];
        assert_eq!(third.track_performer, "Guest");
        assert_eq!(third.track_offset, 30 * SECTOR_SIZE as u64);
        assert_eq!(third.track_size, 10 * SECTOR_SIZE as u64);
    }

    #[test]
    fn track_duration_follows_size() {
        let dir = album_folder();
        let tracks = AlbumLoader::default()
            .load_from(dir.path().join("My Album.cue"))
            .unwrap();

        assert_eq!(tracks[0].duration().as_millis(), 10 * 1000 / 75);
        assert_eq!(tracks[2].duration().as_millis(), 0);
    }

    #[test]
    fn toc_errors_convert_into_album_errors() {
        let err: AlbumError = crate::toc::TocError::MissingFile("gone.bin".into()).into();
        assert!(matches!(
            err,
            AlbumError::TocError(crate::toc::TocError::MissingFile(_))
        ));
    }

    #[test]
    fn missing_audio_file_is_flagged() {
        let dir = album_folder();
        let tracks = AlbumLoader::default()
            .load_from(dir.path().join("My Album.cue"))
            .unwrap();

        let missing = &tracks[2];
        assert!(missing.track_file_not_found);
        assert_eq!(missing.track_offset, 0);
        assert_eq!(missing.track_size, 0);
        assert!(!tracks[0].track_file_not_found);
    }

    #[test]
    fn track_stream_is_bounded() {
        let dir = album_folder();
        let tracks = AlbumLoader::default()
            .load_from(dir.path().join("My Album.cue"))
            .unwrap();

        let mut data = Vec::new();
        tracks[1].open_stream().unwrap().read_to_end(&mut data).unwrap();

        assert_eq!(data.len(), 10 * SECTOR_SIZE);
        assert_eq!(data[0], ((30 * SECTOR_SIZE) % 253) as u8);
    }

    #[test]
    fn folder_without_sheet_fails() {
        let dir = tempfile::tempdir().unwrap();
        let container = Arc::new(FolderContainer::new(dir.path()).unwrap());

        assert!(matches!(
            AlbumLoader::default().load_container(container),
            Err(AlbumError::NoCueSheetFound { .. })
        ));
    }

    #[test]
    fn rejects_unknown_and_missing_paths() {
        let dir = tempfile::tempdir().unwrap();

        assert!(matches!(
            AlbumLoader::default().load_from(dir.path().join("album.flac")),
            Err(AlbumError::UnsupportedPath(_))
        ));
        assert!(matches!(
            AlbumLoader::default().load_from(dir.path().join("gone.cue")),
            Err(AlbumError::FileNotFound(_))
        ));
        assert!(matches!(
            AlbumLoader::default().load_from(dir.path().join("gone.ZIP")),
            Err(AlbumError::FileNotFound(_))
        ));
    }

    #[test]
    fn custom_sheet_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("disc.sheet"), SHEET).unwrap();

        let loader = AlbumLoader::new(LoaderOptions {
            sheet_extension: "sheet".to_string(),
        });
        let tracks = loader.load_from(dir.path().join("disc.sheet")).unwrap();

        assert_eq!(tracks.len(), 3);
        assert!(tracks.iter().all(|t| t.track_file_not_found));
    }
}
