use crate::io::entry_stream::{ArchiveEntryStream, EntrySource};
use crate::io::error::{ContainerError, ContainerResult, require_name};
use crate::io::{MusicContainer, ReadSeek, decode_text, has_extension};
use flate2::read::DeflateDecoder;
use log::debug;
use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use zip::result::ZipError;
use zip::{CompressionMethod, ZipArchive};

/// Album packed in a zip archive.
///
/// Entry names are full paths inside the archive. Streams opened from the
/// container each own a separate file handle and decoder.
pub struct ZipContainer {
    archive_path: PathBuf,
    archive: Mutex<ZipArchive<File>>,
}

impl std::fmt::Debug for ZipContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZipContainer")
            .field("archive_path", &self.archive_path)
            .finish_non_exhaustive()
    }
}

impl ZipContainer {
    pub fn open(archive_path: impl AsRef<Path>) -> ContainerResult<Self> {
        let archive_path = archive_path.as_ref();
        if archive_path.as_os_str().is_empty() {
            return Err(ContainerError::InvalidArgument("archive path must not be empty"));
        }
        if !archive_path.is_file() {
            return Err(ContainerError::FileNotFound(archive_path.to_path_buf()));
        }

        let archive = ZipArchive::new(File::open(archive_path)?)?;
        debug!(
            "Opened archive {} with {} entries",
            archive_path.display(),
            archive.len()
        );

        Ok(Self {
            archive_path: archive_path.to_path_buf(),
            archive: Mutex::new(archive),
        })
    }

    fn archive(&self) -> ContainerResult<MutexGuard<'_, ZipArchive<File>>> {
        self.archive.lock().map_err(|_| ContainerError::Poisoned)
    }

    fn entry_source(&self, file_name: &str) -> ContainerResult<ZipEntrySource> {
        require_name(file_name)?;

        let mut archive = self.archive()?;
        let index = archive
            .index_for_name(file_name)
            .ok_or_else(|| ContainerError::EntryNotFound(file_name.to_string()))?;
        let entry = archive.by_index_raw(index)?;

        if entry.encrypted() {
            return Err(ContainerError::UnsupportedEntry(file_name.to_string()));
        }

        let method = match entry.compression() {
            CompressionMethod::Stored => EntryMethod::Stored,
            CompressionMethod::Deflated => EntryMethod::Deflated,
            _ => return Err(ContainerError::UnsupportedEntry(file_name.to_string())),
        };

        Ok(ZipEntrySource {
            archive_path: self.archive_path.clone(),
            data_start: entry.data_start(),
            compressed_size: entry.compressed_size(),
            size: entry.size(),
            method,
        })
    }
}

fn entry_error(file_name: &str, err: ZipError) -> ContainerError {
    match err {
        ZipError::FileNotFound => ContainerError::EntryNotFound(file_name.to_string()),
        other => other.into(),
    }
}

impl MusicContainer for ZipContainer {
    fn container_path(&self) -> &Path {
        &self.archive_path
    }

    /// Entry paths ending in `.{extension}`, in archive order.
    fn enumerate_files_by_extension(&self, extension: &str) -> ContainerResult<Vec<String>> {
        let mut archive = self.archive()?;
        let mut names = Vec::new();

        for i in 0..archive.len() {
            let entry = archive.by_index_raw(i)?;
            if !entry.is_dir() && has_extension(entry.name(), extension) {
                names.push(entry.name().to_string());
            }
        }

        Ok(names)
    }

    fn file_exists(&self, file_name: &str) -> bool {
        if file_name.is_empty() {
            return false;
        }

        self.archive()
            .is_ok_and(|archive| archive.index_for_name(file_name).is_some())
    }

    fn file_size(&self, file_name: &str) -> ContainerResult<u64> {
        require_name(file_name)?;

        let mut archive = self.archive()?;
        let entry = archive
            .by_name(file_name)
            .map_err(|e| entry_error(file_name, e))?;

        Ok(entry.size())
    }

    fn read_text(&self, file_name: &str) -> ContainerResult<String> {
        decode_text(self.read_bytes(file_name)?)
    }

    fn read_bytes(&self, file_name: &str) -> ContainerResult<Vec<u8>> {
        require_name(file_name)?;

        let mut archive = self.archive()?;
        let mut entry = archive
            .by_name(file_name)
            .map_err(|e| entry_error(file_name, e))?;

        let mut data = Vec::new();
        entry.read_to_end(&mut data)?;

        Ok(data)
    }

    fn open_stream(&self, file_name: &str) -> ContainerResult<Box<dyn ReadSeek>> {
        let source = self.entry_source(file_name)?;
        debug!(
            "Opening archive entry {file_name} ({:?}, {} bytes)",
            source.method, source.size
        );

        Ok(Box::new(ArchiveEntryStream::new(source)?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMethod {
    Stored,
    Deflated,
}

/// Location of one entry's compressed bytes inside an archive file.
#[derive(Debug, Clone)]
pub struct ZipEntrySource {
    archive_path: PathBuf,
    data_start: u64,
    compressed_size: u64,
    size: u64,
    method: EntryMethod,
}

impl EntrySource for ZipEntrySource {
    type Reader = Box<dyn Read + Send>;

    fn open(&self) -> io::Result<Self::Reader> {
        let mut file = File::open(&self.archive_path)?;
        file.seek(SeekFrom::Start(self.data_start))?;
        let compressed = BufReader::new(file).take(self.compressed_size);

        Ok(match self.method {
            EntryMethod::Stored => Box::new(compressed),
            EntryMethod::Deflated => Box::new(DeflateDecoder::new(compressed)),
        })
    }

    fn len(&self) -> u64 {
        self.size
    }
}
