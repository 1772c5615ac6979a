use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use crate::error::{CheckError, Result};

const READ_BLOCK_BYTES: usize = 8 * 1024;

/// Fixed-size character chunks of a UTF-8 byte stream
/// Every chunk but the last holds exactly `chunk_size` characters.
/// Multi-byte sequences split across reads are carried over, never cut.
///
/// Yields `EncodingUnrecognized` once on invalid UTF-8 and stops.
pub struct CharChunks<R> {
    reader: R,
    path: PathBuf,
    chunk_size: usize,
    pending: Vec<u8>,
    decoded: String,
    decoded_chars: usize,
    eof: bool,
    done: bool,
}

impl CharChunks<BufReader<File>> {
    /// Chunk a file on disk
    ///
    /// # Arguments
    /// * `path` - file to read
    /// * `chunk_size` - characters per chunk, must be positive
    pub fn open(path: impl AsRef<Path>, chunk_size: usize) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(CheckError::computation)?;
        Self::new(BufReader::new(file), path, chunk_size)
    }
}

impl<R> CharChunks<R>
where
    R: Read,
{
    /// Chunk any reader; `path` only names the source in errors
    pub fn new(reader: R, path: impl Into<PathBuf>, chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(CheckError::InvalidInputType(
                "chunk size must be a positive integer".to_string(),
            ));
        }
        Ok(Self {
            reader,
            path: path.into(),
            chunk_size,
            pending: Vec::new(),
            decoded: String::new(),
            decoded_chars: 0,
            eof: false,
            done: false,
        })
    }

    fn take_chunk(&mut self) -> String {
        match self.decoded.char_indices().nth(self.chunk_size) {
            Some((split, _)) => {
                let rest = self.decoded.split_off(split);
                self.decoded_chars -= self.chunk_size;
                std::mem::replace(&mut self.decoded, rest)
            }
            None => {
                self.decoded_chars = 0;
                std::mem::take(&mut self.decoded)
            }
        }
    }

    fn fill(&mut self) -> Result<()> {
        let mut block = [0u8; READ_BLOCK_BYTES];
        let read = loop {
            match self.reader.read(&mut block) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(CheckError::computation(e)),
            }
        };
        if read == 0 {
            self.eof = true;
            if !self.pending.is_empty() {
                return Err(self.encoding_error());
            }
            return Ok(());
        }
        self.pending.extend_from_slice(&block[..read]);

        let valid_up_to = match std::str::from_utf8(&self.pending) {
            Ok(text) => text.len(),
            Err(e) if e.error_len().is_some() => return Err(self.encoding_error()),
            // incomplete trailing sequence stays pending for the next read
            Err(e) => e.valid_up_to(),
        };
        self.push_decoded(valid_up_to);
        Ok(())
    }

    fn push_decoded(&mut self, valid_up_to: usize) {
        let bytes: Vec<u8> = self.pending.drain(..valid_up_to).collect();
        // validated by the caller
        if let Ok(text) = std::str::from_utf8(&bytes) {
            self.decoded_chars += text.chars().count();
            self.decoded.push_str(text);
        }
    }

    fn encoding_error(&self) -> CheckError {
        CheckError::EncodingUnrecognized {
            path: self.path.clone(),
        }
    }
}

impl<R> Iterator for CharChunks<R>
where
    R: Read,
{
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            if self.decoded_chars >= self.chunk_size {
                return Some(Ok(self.take_chunk()));
            }
            if self.eof {
                self.done = true;
                if self.decoded.is_empty() {
                    return None;
                }
                return Some(Ok(self.take_chunk()));
            }
            if let Err(err) = self.fill() {
                self.done = true;
                return Some(Err(err));
            }
        }
    }
}
