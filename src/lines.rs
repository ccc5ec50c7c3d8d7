//! Line segmentation over chunked input
//!
//! Input arrives in chunks with no alignment to line boundaries. The
//! segmenter buffers partial lines across chunks and yields each complete
//! line with its `\n` removed. A non-empty trailing line without a newline
//! is still yielded once the input ends.

use std::io::{self, Read};

/// Default read size used when feeding a segmenter from a reader
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Lazy iterator of lines over a stream of byte chunks
///
/// Single pass: once the chunk source is exhausted the segmenter is done,
/// and a new stream needs a new segmenter.
#[derive(Debug)]
pub struct LineSegmenter<C> {
    chunks: C,
    buffer: Vec<u8>,
    /// Start of the unconsumed part of `buffer`
    cursor: usize,
    finished: bool,
}

impl<C, B> LineSegmenter<C>
where
    C: Iterator<Item = io::Result<B>>,
    B: AsRef<[u8]>,
{
    /// Create a segmenter over a chunk source
    pub fn new(chunks: C) -> Self {
        Self {
            chunks,
            buffer: Vec::new(),
            cursor: 0,
            finished: false,
        }
    }

    /// Take the next complete line out of the buffer, if one is present
    fn take_line(&mut self) -> Option<String> {
        let pending = &self.buffer[self.cursor..];
        let newline = pending.iter().position(|&b| b == b'\n')?;
        let line = String::from_utf8_lossy(&pending[..newline]).into_owned();
        self.cursor += newline + 1;
        Some(line)
    }

    /// Drop consumed bytes before appending a new chunk
    fn compact(&mut self) {
        if self.cursor > 0 {
            self.buffer.drain(..self.cursor);
            self.cursor = 0;
        }
    }
}

impl<C, B> Iterator for LineSegmenter<C>
where
    C: Iterator<Item = io::Result<B>>,
    B: AsRef<[u8]>,
{
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.take_line() {
                return Some(Ok(line));
            }
            if self.finished {
                return None;
            }

            match self.chunks.next() {
                Some(Ok(chunk)) => {
                    self.compact();
                    self.buffer.extend_from_slice(chunk.as_ref());
                }
                Some(Err(e)) => {
                    self.finished = true;
                    self.buffer.clear();
                    self.cursor = 0;
                    return Some(Err(e));
                }
                None => {
                    self.finished = true;
                    let rest = &self.buffer[self.cursor..];
                    if rest.is_empty() {
                        return None;
                    }
                    let line = String::from_utf8_lossy(rest).into_owned();
                    self.buffer.clear();
                    self.cursor = 0;
                    return Some(Ok(line));
                }
            }
        }
    }
}

/// Chunk source that reads fixed-size blocks from an `io::Read`
#[derive(Debug)]
pub struct ReadChunks<R> {
    reader: R,
    chunk_size: usize,
    done: bool,
}

impl<R: Read> ReadChunks<R> {
    /// Create a chunk source; `chunk_size` must be at least 1
    pub fn new(reader: R, chunk_size: usize) -> Self {
        Self {
            reader,
            chunk_size: chunk_size.max(1),
            done: false,
        }
    }
}

impl<R: Read> Iterator for ReadChunks<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut chunk = vec![0u8; self.chunk_size];
        loop {
            match self.reader.read(&mut chunk) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(n) => {
                    chunk.truncate(n);
                    return Some(Ok(chunk));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

/// Segment the contents of a reader into lines
pub fn lines_from_reader<R: Read>(
    reader: R,
    chunk_size: usize,
) -> LineSegmenter<ReadChunks<R>> {
    LineSegmenter::new(ReadChunks::new(reader, chunk_size))
}
