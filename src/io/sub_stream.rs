use std::io::{self, Read, Seek, SeekFrom, Write};

/// Read only window of `length` bytes starting at `start` of an inner stream.
///
/// Positions are relative to the window and always stay in `0..=length`.
#[derive(Debug)]
pub struct SubStream<S> {
    inner: S,
    start: u64,
    length: u64,
    position: u64,
}

impl<S: Read + Seek> SubStream<S> {
    /// Measures the inner stream by seeking to its end.
    pub fn new(mut inner: S, start: u64, length: u64) -> io::Result<Self> {
        let inner_position = inner.stream_position()?;
        let inner_length = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(inner_position))?;

        Self::with_inner_len(inner, inner_length, start, length)
    }

    /// Like [`SubStream::new`] for an inner stream whose length is already known.
    ///
    /// The inner stream is only moved into the window, never to its end.
    pub fn with_inner_len(mut inner: S, inner_length: u64, start: u64, length: u64) -> io::Result<Self> {
        let end = start
            .checked_add(length)
            .ok_or_else(|| out_of_range("window end overflows"))?;

        let inner_position = inner.stream_position()?;
        if end > inner_length {
            return Err(out_of_range("window extends past the end of the inner stream"));
        }

        let clamped = inner_position.clamp(start, end);
        inner.seek(SeekFrom::Start(clamped))?;

        Ok(Self {
            inner,
            start,
            length,
            position: clamped - start,
        })
    }

    pub fn len(&self) -> u64 {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: Read + Seek> Read for SubStream<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = self.length - self.position;
        let count = buf.len().min(usize::try_from(remaining).unwrap_or(usize::MAX));
        if count == 0 {
            return Ok(0);
        }

        let read = self.inner.read(&mut buf[..count])?;
        self.position += read as u64;

        Ok(read)
    }
}

impl<S: Read + Seek> Seek for SubStream<S> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(offset) => i128::from(offset),
            SeekFrom::Current(offset) => i128::from(self.position) + i128::from(offset),
            SeekFrom::End(offset) => i128::from(self.length) + i128::from(offset),
        };

        if target < 0 || target > i128::from(self.length) {
            return Err(out_of_range("seek outside of the window"));
        }

        let target = target as u64;
        self.inner.seek(SeekFrom::Start(self.start + target))?;
        self.position = target;

        Ok(target)
    }

    fn stream_position(&mut self) -> io::Result<u64> {
        Ok(self.position)
    }
}

impl<S> Write for SubStream<S> {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "sub stream is read only",
        ))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn out_of_range(message: &'static str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, message)
}
