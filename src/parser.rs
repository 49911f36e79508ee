/*! The public parsing surface.

[Parser::parse] assembles the source and the town transformers into
one stream. Entries come out in row order as soon as their rows have
traversed the pipeline; the first failure ends the stream and is kept
on the side for the caller to read afterwards.
!*/
use std::io::Read;
use std::path::Path;

use crate::entry::Entry;
use crate::error::Error;
use crate::sources::KenAll;
use crate::transformers::{self, RawStream};

/// Normalizing parser over the KEN_ALL table.
pub struct Parser;

impl Parser {
    pub fn parse<R: Read + 'static>(reader: R) -> Entries {
        assemble(Box::new(KenAll::new(reader)))
    }

    pub fn parse_path<P: AsRef<Path>>(path: P) -> Result<Entries, Error> {
        Ok(assemble(Box::new(KenAll::from_path(path)?)))
    }
}

fn assemble(source: RawStream) -> Entries {
    let stream = transformers::stages()
        .into_iter()
        .fold(source, |input, stage| stage.run(input));
    Entries {
        stream,
        error: None,
    }
}

/// Stream of normalized entries plus the sticky first error.
pub struct Entries {
    stream: RawStream,
    error: Option<Error>,
}

impl Entries {
    /// The error that ended the stream, if one did. Meaningful once
    /// the iterator has returned [None].
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub fn into_error(self) -> Option<Error> {
        self.error
    }
}

impl Iterator for Entries {
    type Item = Entry;

    fn next(&mut self) -> Option<Self::Item> {
        if self.error.is_some() {
            return None;
        }
        match self.stream.next() {
            Some(Ok(raw)) => Some(raw.entry),
            Some(Err(e)) => {
                self.error = Some(e);
                None
            }
            None => None,
        }
    }
}
