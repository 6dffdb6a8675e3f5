//! This module contains the persistent score log.
//!
//! Finished games are appended to a plain comma-separated text file, one
//! line per game, with a header line on top. The line format is explicit in
//! [ScoreRecord::format_line] and [ScoreRecord::parse_line] rather than
//! delegated to a CSV crate, because the file predates this crate and old
//! installations still contain five-field lines from before scores and
//! outcomes were recorded. Such legacy lines load as score 0 with an
//! unknown outcome.

use crate::session::GameSession;
use crate::validator::Validator;

use chrono::Local;

use rand::Rng;

use serde::{Deserialize, Serialize};

use std::fmt::{self, Display, Formatter};
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::num::{ParseFloatError, ParseIntError};
use std::path::{Path, PathBuf};

/// The header line written at the top of a fresh score file.
pub const HEADER: &str = "Name,Time,Errors,Hints,Score,Outcome,Date";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// How a recorded game ended.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Outcome {

    /// The grid was completed without reaching the error limit.
    Victory,

    /// The error limit was reached.
    Defeat,

    /// The line predates outcome recording, so nothing is known.
    Unknown
}

impl Outcome {

    fn parse(field: &str) -> Outcome {
        match field {
            "Victory" => Outcome::Victory,
            "Defeat" => Outcome::Defeat,
            _ => Outcome::Unknown
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Victory => write!(f, "Victory"),
            Outcome::Defeat => write!(f, "Defeat"),
            Outcome::Unknown => write!(f, "N/A")
        }
    }
}

/// An error which occurs while parsing a score file line with
/// [ScoreRecord::parse_line].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScoreParseError {

    /// The line does not have five (legacy) or seven fields.
    WrongNumberOfFields,

    /// A numeric field could not be parsed.
    NumberFormatError
}

impl From<ParseIntError> for ScoreParseError {
    fn from(_: ParseIntError) -> ScoreParseError {
        ScoreParseError::NumberFormatError
    }
}

impl From<ParseFloatError> for ScoreParseError {
    fn from(_: ParseFloatError) -> ScoreParseError {
        ScoreParseError::NumberFormatError
    }
}

impl Display for ScoreParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScoreParseError::WrongNumberOfFields =>
                write!(f, "line does not have 5 or 7 fields"),
            ScoreParseError::NumberFormatError =>
                write!(f, "numeric field is malformed")
        }
    }
}

impl std::error::Error for ScoreParseError { }

/// Syntactic sugar for `Result<V, ScoreParseError>`.
pub type ScoreParseResult<V> = Result<V, ScoreParseError>;

/// One finished game as stored in the score file.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ScoreRecord {

    /// The player's name. Commas are replaced by spaces when writing, since
    /// they would corrupt the line format.
    pub name: String,

    /// How long the game took, in seconds.
    pub time_seconds: f64,

    /// The number of conflicting moves.
    pub errors: u32,

    /// The number of hints taken.
    pub hints: u32,

    /// The final score, as computed by
    /// [GameSession::score](crate::session::GameSession::score).
    pub score: u32,

    /// How the game ended.
    pub outcome: Outcome,

    /// When the game finished, formatted as `%Y-%m-%d %H:%M:%S` in local
    /// time.
    pub timestamp: String
}

impl ScoreRecord {

    /// Creates a record for a finished session, timestamped with the
    /// current local time. `elapsed_seconds` is also used to compute the
    /// score.
    pub fn from_session<V, R>(name: &str, session: &GameSession<V, R>,
            elapsed_seconds: f64) -> ScoreRecord
    where
        V: Validator,
        R: Rng
    {
        let outcome = if session.is_won() {
            Outcome::Victory
        }
        else if session.is_lost() {
            Outcome::Defeat
        }
        else {
            Outcome::Unknown
        };

        ScoreRecord {
            name: name.to_owned(),
            time_seconds: elapsed_seconds,
            errors: session.error_count(),
            hints: session.hint_count(),
            score: session.score(elapsed_seconds),
            outcome,
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string()
        }
    }

    /// Formats this record as one score file line, without a trailing
    /// newline. The time is written with two decimals.
    pub fn format_line(&self) -> String {
        format!("{},{:.2},{},{},{},{},{}",
            self.name.replace(',', " "), self.time_seconds, self.errors,
            self.hints, self.score, self.outcome, self.timestamp)
    }

    /// Parses one score file line. Besides the current seven-field format,
    /// five-field lines written before scores and outcomes were recorded
    /// are accepted; they yield score 0 and [Outcome::Unknown].
    ///
    /// # Errors
    ///
    /// * `ScoreParseError::WrongNumberOfFields` if the line has neither
    /// five nor seven fields.
    /// * `ScoreParseError::NumberFormatError` if a numeric field is
    /// malformed.
    pub fn parse_line(line: &str) -> ScoreParseResult<ScoreRecord> {
        let fields: Vec<&str> = line.split(',').collect();

        match fields.as_slice() {
            [name, time, errors, hints, score, outcome, timestamp] =>
                Ok(ScoreRecord {
                    name: (*name).to_owned(),
                    time_seconds: time.parse()?,
                    errors: errors.parse()?,
                    hints: hints.parse()?,
                    score: score.parse()?,
                    outcome: Outcome::parse(outcome),
                    timestamp: (*timestamp).to_owned()
                }),
            [name, time, errors, hints, timestamp] =>
                Ok(ScoreRecord {
                    name: (*name).to_owned(),
                    time_seconds: time.parse()?,
                    errors: errors.parse()?,
                    hints: hints.parse()?,
                    score: 0,
                    outcome: Outcome::Unknown,
                    timestamp: (*timestamp).to_owned()
                }),
            _ => Err(ScoreParseError::WrongNumberOfFields)
        }
    }
}

/// The append-only score file. Appending creates the file with a [HEADER]
/// line if it does not exist yet; loading skips the header and tolerates
/// malformed lines instead of failing the whole file.
pub struct ScoreLog {
    path: PathBuf
}

impl ScoreLog {

    /// Creates a score log backed by the file at the given path. The file
    /// is not touched until the first append.
    pub fn new(path: impl AsRef<Path>) -> ScoreLog {
        ScoreLog {
            path: path.as_ref().to_path_buf()
        }
    }

    /// Appends one record to the file, creating it with a header line
    /// first if necessary.
    ///
    /// # Errors
    ///
    /// Any I/O error raised while opening or writing the file.
    pub fn append(&self, record: &ScoreRecord) -> io::Result<()> {
        let exists = self.path.is_file();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        if !exists {
            writeln!(file, "{}", HEADER)?;
        }

        writeln!(file, "{}", record.format_line())
    }

    /// Loads all records from the file. A missing file yields an empty
    /// list; the header line, empty lines, and lines that fail to parse
    /// are skipped.
    ///
    /// # Errors
    ///
    /// Any I/O error raised while reading an existing file.
    pub fn load(&self) -> io::Result<Vec<ScoreRecord>> {
        if !self.path.is_file() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let mut records = Vec::new();

        for line in reader.lines() {
            let line = line?;

            if line.is_empty() || line == HEADER {
                continue;
            }

            if let Ok(record) = ScoreRecord::parse_line(&line) {
                records.push(record);
            }
        }

        Ok(records)
    }

    /// Loads the records whose name equals the given one exactly.
    ///
    /// # Errors
    ///
    /// Any I/O error raised while reading an existing file.
    pub fn load_for_player(&self, name: &str)
            -> io::Result<Vec<ScoreRecord>> {
        Ok(self.load()?
            .into_iter()
            .filter(|record| record.name == name)
            .collect())
    }
}
