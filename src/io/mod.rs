use std::fmt::Debug;
use std::io::{Read, Seek};
use std::path::Path;

pub mod archive;
pub mod entry_stream;
pub mod error;
pub mod folder;
pub mod sub_stream;

pub use archive::ZipContainer;
pub use entry_stream::{ArchiveEntryStream, EntrySource};
pub use error::{ContainerError, ContainerResult};
pub use folder::FolderContainer;
pub use sub_stream::SubStream;

pub trait ReadSeek: Read + Seek + Send {}

impl<T: Read + Seek + Send> ReadSeek for T {}

/// A place holding a cue sheet and the audio files it references.
///
/// File names are relative to the container. Every `open_stream` call hands
/// out an independent, seekable stream.
pub trait MusicContainer: Debug + Send + Sync {
    fn container_path(&self) -> &Path;

    fn enumerate_files_by_extension(&self, extension: &str) -> ContainerResult<Vec<String>>;

    fn file_exists(&self, file_name: &str) -> bool;

    fn file_size(&self, file_name: &str) -> ContainerResult<u64>;

    fn read_text(&self, file_name: &str) -> ContainerResult<String>;

    fn read_bytes(&self, file_name: &str) -> ContainerResult<Vec<u8>>;

    /// Reads up to `count` bytes at `offset`, the buffer is truncated on a short read.
    fn read_bytes_range(&self, file_name: &str, offset: u64, count: u64) -> ContainerResult<Vec<u8>> {
        let mut stream = self.open_stream(file_name)?;
        stream.seek(std::io::SeekFrom::Start(offset))?;

        let mut buffer = Vec::new();
        stream.take(count).read_to_end(&mut buffer)?;

        Ok(buffer)
    }

    fn open_stream(&self, file_name: &str) -> ContainerResult<Box<dyn ReadSeek>>;
}

pub(crate) fn has_extension(file_name: &str, extension: &str) -> bool {
    let suffix = format!(".{}", extension.trim_start_matches('.'));

    file_name.len() >= suffix.len()
        && file_name
            .get(file_name.len() - suffix.len()..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case(&suffix))
}

pub(crate) fn decode_text(data: Vec<u8>) -> ContainerResult<String> {
    let text = String::from_utf8(data)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

    Ok(match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}
