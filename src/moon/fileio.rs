//! Reading and writing documents
//!
//! The pipeline itself never touches the filesystem. This module is the collaborator that turns
//! a path or an open handle into text and back. Text is UTF-8 unless another [`Encoding`] is
//! given. Decoding is strict: malformed input is an error, never replaced. Encoding refuses text
//! the target encoding cannot hold.

use crate::moon::error::{ArgumentError, Error, ReadError, WriteError};
use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

pub use encoding_rs::{Encoding, UTF_8};

/// Where a document is read from.
pub enum Source<'a> {
    Path(PathBuf),
    Reader(&'a mut dyn Read),
}

/// Where a document is written to.
pub enum Sink<'a> {
    Path(PathBuf),
    Writer(&'a mut dyn Write),
}

impl<'a> Source<'a> {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Source::Path(path.into())
    }

    pub fn reader(reader: &'a mut dyn Read) -> Self {
        Source::Reader(reader)
    }

    fn describe(&self) -> String {
        match self {
            Source::Path(path) => path.display().to_string(),
            Source::Reader(_) => "<reader>".to_string(),
        }
    }
}

impl<'a> Sink<'a> {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Sink::Path(path.into())
    }

    pub fn writer(writer: &'a mut dyn Write) -> Self {
        Sink::Writer(writer)
    }

    fn describe(&self) -> String {
        match self {
            Sink::Path(path) => path.display().to_string(),
            Sink::Writer(_) => "<writer>".to_string(),
        }
    }
}

impl From<&Path> for Source<'_> {
    fn from(path: &Path) -> Self {
        Source::path(path)
    }
}

impl From<PathBuf> for Source<'_> {
    fn from(path: PathBuf) -> Self {
        Source::Path(path)
    }
}

impl From<&Path> for Sink<'_> {
    fn from(path: &Path) -> Self {
        Sink::path(path)
    }
}

impl From<PathBuf> for Sink<'_> {
    fn from(path: PathBuf) -> Self {
        Sink::Path(path)
    }
}

fn check_path(path: &Path) -> Result<(), ArgumentError> {
    if path.as_os_str().is_empty() {
        return Err(ArgumentError::EmptyPath);
    }
    Ok(())
}

fn read_path(path: &Path) -> Result<Vec<u8>, Error> {
    check_path(path)?;

    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(ReadError::NotFound(path.to_path_buf()).into())
        }
        Err(err) => return Err(read_failure(path, err).into()),
    };
    if !metadata.is_file() {
        return Err(ReadError::NotAFile(path.to_path_buf()).into());
    }

    fs::read(path).map_err(|err| read_failure(path, err).into())
}

fn read_failure(path: &Path, source: io::Error) -> ReadError {
    match source.kind() {
        io::ErrorKind::PermissionDenied => ReadError::PermissionDenied {
            path: path.to_path_buf(),
            source,
        },
        _ => ReadError::Io {
            origin: path.display().to_string(),
            source,
        },
    }
}

fn write_failure(sink: &Sink<'_>, source: io::Error) -> WriteError {
    match (sink, source.kind()) {
        (Sink::Path(path), io::ErrorKind::PermissionDenied) => WriteError::PermissionDenied {
            path: path.clone(),
            source,
        },
        _ => WriteError::Io {
            target: sink.describe(),
            source,
        },
    }
}

/// Look up an encoding by label, e.g. `utf-8`, `latin1` or `shift_jis`.
pub fn encoding_for_label(label: &str) -> Result<&'static Encoding, ArgumentError> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| ArgumentError::UnknownEncoding(label.to_string()))
}

/// Read a whole document as UTF-8 text.
pub fn read(source: Source<'_>) -> Result<String, Error> {
    read_encoded(source, UTF_8)
}

/// Read a whole document and decode it with the given encoding.
pub fn read_encoded(source: Source<'_>, encoding: &'static Encoding) -> Result<String, Error> {
    let origin = source.describe();
    let bytes = match source {
        Source::Path(path) => read_path(&path)?,
        Source::Reader(reader) => {
            let mut bytes = Vec::new();
            reader
                .read_to_end(&mut bytes)
                .map_err(|source| ReadError::Io {
                    origin: origin.clone(),
                    source,
                })?;
            bytes
        }
    };

    tracing::debug!(origin = %origin, bytes = bytes.len(), encoding = encoding.name(), "read document");
    match encoding.decode_without_bom_handling_and_without_replacement(&bytes) {
        Some(text) => Ok(text.into_owned()),
        None => Err(ReadError::Decode {
            origin,
            encoding: encoding.name(),
        }
        .into()),
    }
}

/// Write one complete string.
pub fn write(content: &str, sink: Sink<'_>) -> Result<(), Error> {
    write_chunks([content], sink)
}

/// Write an ordered sequence of chunks as UTF-8.
pub fn write_chunks<I, S>(chunks: I, sink: Sink<'_>) -> Result<(), Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    write_chunks_encoded(chunks, sink, UTF_8)
}

/// Write an ordered sequence of chunks in the given encoding.
///
/// Every chunk is encoded before the sink is touched, so a chunk the encoding cannot hold leaves
/// no partial file behind.
pub fn write_chunks_encoded<I, S>(
    chunks: I,
    mut sink: Sink<'_>,
    encoding: &'static Encoding,
) -> Result<(), Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if encoding.output_encoding() != encoding {
        return Err(ArgumentError::DecodeOnlyEncoding(encoding.name()).into());
    }
    if let Sink::Path(path) = &sink {
        check_path(path)?;
    }
    let encoded = encode_all(chunks, &sink, encoding)?;

    let result = match &mut sink {
        Sink::Path(path) => {
            File::create(path.as_path()).and_then(|file| {
                let mut writer = BufWriter::new(file);
                let written = write_all(&mut writer, &encoded)?;
                writer.flush()?;
                Ok(written)
            })
        }
        Sink::Writer(writer) => write_all(&mut **writer, &encoded).and_then(|written| {
            writer.flush()?;
            Ok(written)
        }),
    };

    match result {
        Ok(written) => {
            tracing::debug!(target_sink = %sink.describe(), bytes = written, encoding = encoding.name(), "wrote document");
            Ok(())
        }
        Err(err) => Err(write_failure(&sink, err).into()),
    }
}

fn encode_all<I, S>(
    chunks: I,
    sink: &Sink<'_>,
    encoding: &'static Encoding,
) -> Result<Vec<Vec<u8>>, Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut encoded = Vec::new();
    for chunk in chunks {
        let (bytes, _, unmappable) = encoding.encode(chunk.as_ref());
        if unmappable {
            return Err(WriteError::Unencodable {
                target: sink.describe(),
                encoding: encoding.name(),
            }
            .into());
        }
        encoded.push(Cow::into_owned(bytes));
    }
    Ok(encoded)
}

fn write_all<W: Write + ?Sized>(writer: &mut W, chunks: &[Vec<u8>]) -> io::Result<usize> {
    let mut written = 0;
    for bytes in chunks {
        writer.write_all(bytes)?;
        written += bytes.len();
    }
    Ok(written)
}
