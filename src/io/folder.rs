use crate::io::error::{ContainerError, ContainerResult, require_name};
use crate::io::{MusicContainer, ReadSeek, decode_text, has_extension};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Album stored as plain files in one directory.
#[derive(Debug, Clone)]
pub struct FolderContainer {
    folder_path: PathBuf,
}

impl FolderContainer {
    pub fn new(folder_path: impl AsRef<Path>) -> ContainerResult<Self> {
        let folder_path = folder_path.as_ref();
        if folder_path.as_os_str().is_empty() {
            return Err(ContainerError::InvalidArgument("folder path must not be empty"));
        }

        Ok(Self {
            folder_path: folder_path.to_path_buf(),
        })
    }

    fn resolve(&self, file_name: &str) -> ContainerResult<PathBuf> {
        require_name(file_name)?;
        Ok(self.folder_path.join(file_name))
    }

    fn existing(&self, file_name: &str) -> ContainerResult<PathBuf> {
        let path = self.resolve(file_name)?;
        if !path.is_file() {
            return Err(ContainerError::FileNotFound(path));
        }

        Ok(path)
    }
}

impl MusicContainer for FolderContainer {
    fn container_path(&self) -> &Path {
        &self.folder_path
    }

    /// Names of the matching files directly inside the folder, sorted.
    fn enumerate_files_by_extension(&self, extension: &str) -> ContainerResult<Vec<String>> {
        let mut names = Vec::new();

        for entry in fs::read_dir(&self.folder_path)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            if let Some(name) = entry.file_name().to_str() {
                if has_extension(name, extension) {
                    names.push(name.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }

    fn file_exists(&self, file_name: &str) -> bool {
        self.resolve(file_name).is_ok_and(|path| path.is_file())
    }

    fn file_size(&self, file_name: &str) -> ContainerResult<u64> {
        Ok(fs::metadata(self.existing(file_name)?)?.len())
    }

    fn read_text(&self, file_name: &str) -> ContainerResult<String> {
        decode_text(self.read_bytes(file_name)?)
    }

    fn read_bytes(&self, file_name: &str) -> ContainerResult<Vec<u8>> {
        Ok(fs::read(self.existing(file_name)?)?)
    }

    fn open_stream(&self, file_name: &str) -> ContainerResult<Box<dyn ReadSeek>> {
        Ok(Box::new(File::open(self.existing(file_name)?)?))
    }
}
