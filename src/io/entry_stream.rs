use crate::io::error::ContainerError;
use log::trace;
use std::io::{self, Read, Seek, SeekFrom, Write};

/// Something that can hand out a fresh forward only reader positioned at byte 0.
pub trait EntrySource {
    type Reader: Read;

    fn open(&self) -> io::Result<Self::Reader>;

    /// Uncompressed length of the entry.
    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Makes a forward only entry reader seekable.
///
/// Forward seeks read and discard. Backward seeks reopen the entry and read
/// forward from the start, so they cost as much as the target offset.
/// A single stream must not be shared between threads without locking.
pub struct ArchiveEntryStream<S: EntrySource> {
    source: S,
    reader: Option<S::Reader>,
    position: u64,
    length: u64,
}

impl<S: EntrySource> std::fmt::Debug for ArchiveEntryStream<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveEntryStream")
            .field("position", &self.position)
            .field("length", &self.length)
            .field("closed", &self.reader.is_none())
            .finish()
    }
}

impl<S: EntrySource> ArchiveEntryStream<S> {
    pub fn new(source: S) -> io::Result<Self> {
        let reader = source.open()?;
        let length = source.len();

        Ok(Self {
            source,
            reader: Some(reader),
            position: 0,
            length,
        })
    }

    pub fn len(&self) -> u64 {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn is_closed(&self) -> bool {
        self.reader.is_none()
    }

    /// Drops the live reader; any further read or seek fails.
    pub fn close(&mut self) {
        self.reader = None;
    }

    fn reader(&mut self) -> io::Result<&mut S::Reader> {
        self.reader
            .as_mut()
            .ok_or_else(|| io::Error::other(ContainerError::StreamClosed))
    }
}

impl<S: EntrySource> Read for ArchiveEntryStream<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.reader()?.read(buf)?;
        self.position += read as u64;

        Ok(read)
    }
}

impl<S: EntrySource> Seek for ArchiveEntryStream<S> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.reader()?;

        let target = match pos {
            SeekFrom::Start(offset) => i128::from(offset),
            SeekFrom::Current(offset) => i128::from(self.position) + i128::from(offset),
            SeekFrom::End(offset) => i128::from(self.length) + i128::from(offset),
        };
        let target = u64::try_from(target).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "invalid seek to a negative or overflowing position",
            )
        })?;

        if target > self.position {
            let distance = target - self.position;
            advance(self.reader()?, distance)?;
        } else if target < self.position {
            trace!(
                "Rewinding archive entry from {} to {target}, reopening",
                self.position
            );
            let mut reader = self.source.open()?;
            advance(&mut reader, target)?;
            self.reader = Some(reader);
        }

        self.position = target;

        Ok(target)
    }

    fn stream_position(&mut self) -> io::Result<u64> {
        self.reader()?;
        Ok(self.position)
    }
}

impl<S: EntrySource> Write for ArchiveEntryStream<S> {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "archive entry stream is read only",
        ))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.reader()?;
        Ok(())
    }
}

/// Reads and discards up to `count` bytes, stopping early at end of stream.
fn advance(reader: &mut impl Read, count: u64) -> io::Result<u64> {
    io::copy(&mut reader.take(count), &mut io::sink())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::SubStream;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Forward only view over shared bytes, no `Seek`.
    struct ForwardOnly {
        data: Rc<Vec<u8>>,
        position: usize,
    }

    impl Read for ForwardOnly {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let remaining = &self.data[self.position..];
            let count = remaining.len().min(buf.len());
            buf[..count].copy_from_slice(&remaining[..count]);
            self.position += count;
            Ok(count)
        }
    }

    struct MemorySource {
        data: Rc<Vec<u8>>,
        opens: Rc<Cell<usize>>,
        reopen_fails: bool,
    }

    impl MemorySource {
        fn new(len: usize) -> (Self, Rc<Cell<usize>>) {
            let opens = Rc::new(Cell::new(0));
            let data = (0..len).map(|i| (i % 251) as u8).collect();
            (
                Self {
                    data: Rc::new(data),
                    opens: opens.clone(),
                    reopen_fails: false,
                },
                opens,
            )
        }
    }

    impl EntrySource for MemorySource {
        type Reader = ForwardOnly;

        fn open(&self) -> io::Result<ForwardOnly> {
            if self.reopen_fails && self.opens.get() > 0 {
                return Err(io::Error::other("entry vanished"));
            }
            self.opens.set(self.opens.get() + 1);
            Ok(ForwardOnly {
                data: self.data.clone(),
                position: 0,
            })
        }

        fn len(&self) -> u64 {
            self.data.len() as u64
        }
    }

    fn read_n(stream: &mut impl Read, n: usize) -> Vec<u8> {
        let mut buf = vec![0u8; n];
        stream.read_exact(&mut buf).unwrap();
        buf
    }

    #[test]
    fn forward_seek_skips_without_reopening() {
        let (source, opens) = MemorySource::new(20_000);
        let mut stream = ArchiveEntryStream::new(source).unwrap();

        assert_eq!(stream.seek(SeekFrom::Start(9_000)).unwrap(), 9_000);
        let expected: Vec<u8> = (9_000..9_003).map(|i| (i % 251) as u8).collect();
        assert_eq!(read_n(&mut stream, 3), expected);
        assert_eq!(opens.get(), 1);
    }

    #[test]
    fn backward_seek_matches_fresh_read() {
        let (source, opens) = MemorySource::new(10_000);
        let mut stream = ArchiveEntryStream::new(source).unwrap();
        let fresh = read_n(&mut stream, 10_000);

        stream.seek(SeekFrom::Start(4_321)).unwrap();
        let rewound = read_n(&mut stream, 100);

        assert_eq!(rewound, fresh[4_321..4_421].to_vec());
        assert_eq!(stream.stream_position().unwrap(), 4_421);
        assert_eq!(opens.get(), 2);
    }

    #[test]
    fn equal_seek_is_noop() {
        let (source, opens) = MemorySource::new(100);
        let mut stream = ArchiveEntryStream::new(source).unwrap();
        read_n(&mut stream, 10);

        assert_eq!(stream.seek(SeekFrom::Current(0)).unwrap(), 10);
        assert_eq!(opens.get(), 1);
    }

    #[test]
    fn seek_from_end_uses_entry_length() {
        let (source, _) = MemorySource::new(1_000);
        let mut stream = ArchiveEntryStream::new(source).unwrap();

        assert_eq!(stream.len(), 1_000);
        assert_eq!(stream.seek(SeekFrom::End(-10)).unwrap(), 990);
        assert_eq!(read_n(&mut stream, 10).len(), 10);

        let mut buf = [0u8; 4];
        assert_eq!(stream.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn seek_past_end_reads_nothing() {
        let (source, _) = MemorySource::new(100);
        let mut stream = ArchiveEntryStream::new(source).unwrap();

        assert_eq!(stream.seek(SeekFrom::Start(500)).unwrap(), 500);
        let mut buf = [0u8; 4];
        assert_eq!(stream.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn rejects_negative_seek() {
        let (source, _) = MemorySource::new(100);
        let mut stream = ArchiveEntryStream::new(source).unwrap();

        let err = stream.seek(SeekFrom::Current(-1)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn closed_stream_fails() {
        let (source, _) = MemorySource::new(100);
        let mut stream = ArchiveEntryStream::new(source).unwrap();
        stream.close();

        assert!(stream.is_closed());
        let mut buf = [0u8; 4];
        let err = stream.read(&mut buf).unwrap_err();
        assert!(matches!(
            err.get_ref().and_then(|e| e.downcast_ref::<ContainerError>()),
            Some(ContainerError::StreamClosed)
        ));
        assert!(stream.seek(SeekFrom::Start(0)).is_err());
    }

    #[test]
    fn failed_reopen_keeps_stream_usable() {
        let (mut source, _) = MemorySource::new(1_000);
        source.reopen_fails = true;
        let mut stream = ArchiveEntryStream::new(source).unwrap();
        read_n(&mut stream, 500);

        assert!(stream.seek(SeekFrom::Start(10)).is_err());
        assert!(!stream.is_closed());
        assert_eq!(stream.stream_position().unwrap(), 500);

        let expected: Vec<u8> = (500..504).map(|i| (i % 251) as u8).collect();
        assert_eq!(read_n(&mut stream, 4), expected);
    }

    #[test]
    fn window_with_known_length_skips_only_to_its_start() {
        let (source, opens) = MemorySource::new(20_000);
        let stream = ArchiveEntryStream::new(source).unwrap();
        let entry_len = stream.len();

        let mut window = SubStream::with_inner_len(stream, entry_len, 1_000, 10).unwrap();
        let expected: Vec<u8> = (1_000..1_010).map(|i| (i % 251) as u8).collect();
        assert_eq!(read_n(&mut window, 10), expected);

        assert_eq!(opens.get(), 1);
        assert_eq!(window.into_inner().stream_position().unwrap(), 1_010);
    }

    #[test]
    fn writes_are_unsupported() {
        let (source, _) = MemorySource::new(100);
        let mut stream = ArchiveEntryStream::new(source).unwrap();

        let err = stream.write(&[0]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
    }
}
