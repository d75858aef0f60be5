//! Text encodings used at the boundary to an external orchestration layer.
//!
//! - point: `x,y`
//! - partial aggregate: `sum_x,sum_y,count`
//! - centroid broadcast: a count plus one `x,y` line per centroid, the line index being the cluster label
//!
//! Fields are separated by a single comma without any whitespace. Numbers are written with the shortest
//! representation that parses back to the same value (`1.0`, not `1`).
//! Only finite numbers are accepted; `NaN` and infinities are malformed.
use crate::{KMeansError, PartialAggregate, Point, Primitive, Result};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

fn malformed(record: &str, reason: impl Into<String>) -> KMeansError {
    KMeansError::MalformedRecord { record: record.to_string(), reason: reason.into() }
}

fn split_fields<'a>(record: &'a str, expected: usize) -> Result<Vec<&'a str>> {
    let fields: Vec<&str> = record.split(',').collect();
    if fields.len() != expected {
        return Err(malformed(record, format!("expected {} fields, found {}", expected, fields.len())));
    }
    Ok(fields)
}

fn parse_float<T: Primitive>(record: &str, field: &str) -> Result<T> {
    if field.is_empty() || field.trim() != field {
        return Err(malformed(record, format!("invalid number '{}'", field)));
    }
    let value = field.parse::<T>().map_err(|e| malformed(record, format!("invalid number '{}': {}", field, e)))?;
    if !value.is_finite() {
        return Err(malformed(record, format!("non-finite number '{}'", field)));
    }
    Ok(value)
}

impl<T: Primitive> fmt::Display for Point<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?},{:?}", self.x(), self.y())
    }
}
impl<T: Primitive> FromStr for Point<T> {
    type Err = KMeansError;

    fn from_str(record: &str) -> Result<Self> {
        let fields = split_fields(record, 2)?;
        Ok(Point::new(parse_float(record, fields[0])?, parse_float(record, fields[1])?))
    }
}

impl<T: Primitive> fmt::Display for PartialAggregate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?},{:?},{}", self.sum_x, self.sum_y, self.count)
    }
}
impl<T: Primitive> FromStr for PartialAggregate<T> {
    type Err = KMeansError;

    fn from_str(record: &str) -> Result<Self> {
        let fields = split_fields(record, 3)?;
        let count = fields[2].parse::<usize>()
            .map_err(|e| malformed(record, format!("invalid count '{}': {}", fields[2], e)))?;
        Ok(PartialAggregate::new(parse_float(record, fields[0])?, parse_float(record, fields[1])?, count))
    }
}


/// Records parsed from a stream of text lines, together with every line that was rejected.
#[derive(Debug)]
pub struct Decoded<R> {
    pub records: Vec<R>,
    pub rejected: Vec<KMeansError>,
}

fn decode_lines<R, I, S>(lines: I) -> Decoded<R>
        where R: FromStr<Err = KMeansError>, I: IntoIterator<Item = S>, S: AsRef<str> {
    let mut decoded = Decoded { records: Vec::new(), rejected: Vec::new() };
    for (line_nr, line) in lines.into_iter().enumerate() {
        match line.as_ref().parse::<R>() {
            Ok(record) => decoded.records.push(record),
            Err(e) => {
                warn!(line = line_nr + 1, error = %e, "skipping malformed record");
                decoded.rejected.push(e);
            }
        }
    }
    decoded
}

/// Parse `x,y` lines. Malformed lines are logged and skipped, not fatal.
pub fn decode_points<T, I, S>(lines: I) -> Decoded<Point<T>>
        where T: Primitive, I: IntoIterator<Item = S>, S: AsRef<str> {
    decode_lines(lines)
}

/// Parse `sum_x,sum_y,count` lines. Malformed lines are logged and skipped, not fatal.
pub fn decode_partials<T, I, S>(lines: I) -> Decoded<PartialAggregate<T>>
        where T: Primitive, I: IntoIterator<Item = S>, S: AsRef<str> {
    decode_lines(lines)
}


/// Centroid set as handed to every partition before a round starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CentroidBroadcast {
    pub count: usize,
    pub lines: Vec<String>,
}
impl CentroidBroadcast {
    /// Decode the complete centroid set. Unlike record streams, a broadcast has to be complete: any malformed line or a
    /// count that does not match the amount of lines fails the whole broadcast.
    pub fn decode<T: Primitive>(&self) -> Result<Vec<Point<T>>> {
        if self.count != self.lines.len() {
            return Err(malformed(
                &self.count.to_string(),
                format!("broadcast announces {} centroids but carries {}", self.count, self.lines.len()),
            ));
        }
        self.lines.iter().map(|line| line.parse()).collect()
    }
}

pub fn encode_centroids<T: Primitive>(centroids: &[Point<T>]) -> CentroidBroadcast {
    CentroidBroadcast {
        count: centroids.len(),
        lines: centroids.iter().map(|c| c.to_string()).collect(),
    }
}
