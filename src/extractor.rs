//! Line-oriented extraction of tunes from one ABC source file.
//!
//! A file is scanned once, top to bottom. `X:` opens a tune (closing the one
//! before it), `T:`, `R:`, `M:` and `K:` fill in header fields, and every
//! other line becomes part of the open tune's body. Lines seen before the
//! first `X:` have no tune to belong to and are dropped.

use std::fs;

use crate::error::ExtractError;
use crate::models::{TuneFileDescriptor, TuneRecord};

/// Header tags recognised at the start of a trimmed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Header {
    TuneStart,
    Title,
    TuneType,
    Meter,
    Key,
}

impl Header {
    /// Split a trimmed line into its tag and trimmed value.
    fn parse(trimmed: &str) -> Option<(Header, &str)> {
        let header = match trimmed.get(..2)? {
            "X:" => Header::TuneStart,
            "T:" => Header::Title,
            "R:" => Header::TuneType,
            "M:" => Header::Meter,
            "K:" => Header::Key,
            _ => return None,
        };
        Some((header, trimmed[2..].trim()))
    }
}

/// A tune whose `X:` line has been seen but whose body is still growing.
#[derive(Debug)]
pub struct OpenTune {
    record: TuneRecord,
    body: Vec<String>,
}

impl OpenTune {
    fn new(book_number: u32, file_name: &str, ref_number: &str) -> Self {
        Self {
            record: TuneRecord {
                book_number,
                file_name: file_name.to_string(),
                ref_number: ref_number.to_string(),
                ..TuneRecord::default()
            },
            body: Vec::new(),
        }
    }

    fn set_header(&mut self, header: Header, value: &str) {
        let field = match header {
            Header::Title => &mut self.record.title,
            Header::TuneType => &mut self.record.tune_type,
            Header::Meter => &mut self.record.meter,
            Header::Key => &mut self.record.key,
            Header::TuneStart => return,
        };
        *field = value.to_string();
    }

    fn finish(self) -> TuneRecord {
        TuneRecord {
            abc_text: self.body.join("\n"),
            ..self.record
        }
    }
}

/// Extraction state carried from one line to the next.
#[derive(Debug, Default)]
pub enum ExtractorState {
    #[default]
    Idle,
    InTune(OpenTune),
}

/// Accumulates the tunes of a single file.
#[derive(Debug)]
pub struct TuneExtractor<'a> {
    book_number: u32,
    file_name: &'a str,
    state: ExtractorState,
    finished: Vec<TuneRecord>,
}

impl<'a> TuneExtractor<'a> {
    pub fn new(book_number: u32, file_name: &'a str) -> Self {
        Self {
            book_number,
            file_name,
            state: ExtractorState::Idle,
            finished: Vec::new(),
        }
    }

    pub fn state(&self) -> &ExtractorState {
        &self.state
    }

    /// Apply one physical line, with its terminator already removed.
    pub fn feed_line(&mut self, line: &str) {
        let header = Header::parse(line.trim());
        let state = std::mem::take(&mut self.state);

        self.state = match (state, header) {
            (state, Some((Header::TuneStart, ref_number))) => {
                if let ExtractorState::InTune(open) = state {
                    self.finished.push(open.finish());
                }
                ExtractorState::InTune(OpenTune::new(
                    self.book_number,
                    self.file_name,
                    ref_number,
                ))
            }
            (ExtractorState::Idle, _) => ExtractorState::Idle,
            (ExtractorState::InTune(mut open), Some((header, value))) => {
                open.set_header(header, value);
                ExtractorState::InTune(open)
            }
            (ExtractorState::InTune(mut open), None) => {
                open.body.push(line.to_string());
                ExtractorState::InTune(open)
            }
        };
    }

    /// Close any open tune and hand back everything collected, in file order.
    pub fn finish(mut self) -> Vec<TuneRecord> {
        if let ExtractorState::InTune(open) = std::mem::take(&mut self.state) {
            self.finished.push(open.finish());
        }
        self.finished
    }
}

/// Extract every tune from the full text of one file.
pub fn extract_tunes(text: &str, book_number: u32, file_name: &str) -> Vec<TuneRecord> {
    let mut extractor = TuneExtractor::new(book_number, file_name);
    for line in text.lines() {
        extractor.feed_line(line);
    }
    extractor.finish()
}

/// Read a discovered file and extract its tunes. Either the whole file is
/// read and all of its tunes come back, or an error naming the file does.
pub fn extract_file(descriptor: &TuneFileDescriptor) -> Result<Vec<TuneRecord>, ExtractError> {
    let path = &descriptor.absolute_path;
    let bytes = fs::read(path).map_err(|source| ExtractError::Io {
        path: path.clone(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|source| ExtractError::Decode {
        path: path.clone(),
        source,
    })?;

    let tunes = extract_tunes(&text, descriptor.book_number, &descriptor.file_name);
    tracing::debug!(file = %path.display(), tunes = tunes.len(), "extracted tunes");
    Ok(tunes)
}
