use chartlab_core::model::{Dataset, Passenger};
use csv::{ReaderBuilder, StringRecord, Trim};

use crate::source::SourceError;

const PCLASS: &str = "pclass";
const SEX: &str = "sex";
const SURVIVED: &str = "survived";

/// Column positions of the three required fields.
struct Columns {
    pclass: usize,
    sex: usize,
    survived: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self, SourceError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or(SourceError::MissingColumn(name))
        };
        Ok(Self {
            pclass: find(PCLASS)?,
            sex: find(SEX)?,
            survived: find(SURVIVED)?,
        })
    }
}

/// Parse a CSV document into a `Dataset`.
///
/// Columns are matched by header name (case-insensitive); any other columns are ignored.
///
/// # Errors
///
/// Returns `SourceError::MissingColumn` when a required header is absent,
/// `SourceError::Malformed` for an unparseable row, and `SourceError::Dataset`
/// when the document has no rows.
pub fn parse_csv(text: &str) -> Result<Dataset, SourceError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());
    let columns = Columns::locate(reader.headers()?)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, csv::Position::line);
        let field = |idx: usize, name: &str| {
            record.get(idx).ok_or_else(|| SourceError::Malformed {
                line,
                reason: format!("missing `{name}` value"),
            })
        };
        let passenger = Passenger::parse(
            field(columns.pclass, PCLASS)?,
            field(columns.sex, SEX)?,
            field(columns.survived, SURVIVED)?,
        )
        .map_err(|err| SourceError::Malformed {
            line,
            reason: err.to_string(),
        })?;
        rows.push(passenger);
    }

    Ok(Dataset::new(rows)?)
}
