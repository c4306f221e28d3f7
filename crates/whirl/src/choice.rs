use derive_more::{AsRef, Deref, Display, From, Into};
use fs_err as fs;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

const BOM: char = '\u{feff}';

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct Label(String);

crate::impl_string_newtype!(Label);

/// One entry on the wheel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub name: Label,
}

impl Choice {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Label::new(name),
        }
    }
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Option source unavailable: {0}")]
    SourceUnavailable(#[source] std::io::Error),
    #[error("Malformed option record on line {line}: no usable label")]
    MalformedRecord { line: u64 },
}

pub fn load_options(path: impl AsRef<Path>) -> Result<Vec<Choice>, LoadError> {
    let file = fs::File::open(path.as_ref()).map_err(LoadError::SourceUnavailable)?;
    parse_options(file)
}

/// Reads one choice per record, taking the first field as the label. Extra fields are ignored.
pub fn parse_options<R: Read>(reader: R) -> Result<Vec<Choice>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut choices = Vec::new();
    let mut record = csv::StringRecord::new();

    loop {
        let line = reader.position().line();
        match reader.read_record(&mut record) {
            Ok(false) => break,
            Ok(true) => {
                let line = record.position().map_or(line, csv::Position::line);
                let label = record
                    .get(0)
                    .map(|field| field.trim_start_matches(BOM).trim())
                    .filter(|field| !field.is_empty())
                    .ok_or(LoadError::MalformedRecord { line })?;
                choices.push(Choice::new(label));
            }
            Err(e) => {
                let line = e.position().map_or(line, csv::Position::line);
                return Err(match e.into_kind() {
                    csv::ErrorKind::Io(io) => LoadError::SourceUnavailable(io),
                    _ => LoadError::MalformedRecord { line },
                });
            }
        }
    }

    log::debug!("Loaded {} options", choices.len());
    Ok(choices)
}
