//! Tagged data points: one record per sensor value
//!
//! Each observation row is split into independent `(tag, timestamp, value)`
//! records, the unit a message broker consumer expects. The broker client
//! itself lives outside this crate; anything implementing
//! [`DataPointSink`] can receive the records.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

use ndarray::ArrayView1;

use crate::error::{SynthError, SynthResult};

/// Topic raw sensor records are published to
pub const RAW_DATA_TOPIC: &str = "raw_data";

/// Characters per generated tag
pub const TAG_LENGTH: usize = 7;

const TAG_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// One sensor value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub tag_id: String,
    /// Unix time in seconds
    pub timestamp: i64,
    pub value: f64,
}

/// Fixed sensor identifiers, one per observation column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<String>,
}

impl TagSet {
    pub fn new(tags: Vec<String>) -> SynthResult<Self> {
        if tags.is_empty() {
            return Err(SynthError::InvalidParameter(
                "tag set must not be empty".to_string(),
            ));
        }
        Ok(Self { tags })
    }

    /// `count` distinct random tags of [`TAG_LENGTH`] characters over A–Z0–9
    pub fn random<R: Rng + ?Sized>(count: usize, rng: &mut R) -> SynthResult<Self> {
        let mut seen = HashSet::with_capacity(count);
        let mut tags = Vec::with_capacity(count);

        while tags.len() < count {
            let tag: String = (0..TAG_LENGTH)
                .map(|_| TAG_ALPHABET[rng.random_range(0..TAG_ALPHABET.len())] as char)
                .collect();
            if seen.insert(tag.clone()) {
                tags.push(tag);
            }
        }

        Self::new(tags)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// Seconds since the Unix epoch (0 if the clock is before it)
pub fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Pair the values of one observation row with tags, position by position
///
/// Extra values or extra tags are dropped.
pub fn row_to_datapoints(row: ArrayView1<f64>, tags: &TagSet, timestamp: i64) -> Vec<DataPoint> {
    tags.tags
        .iter()
        .zip(row.iter())
        .map(|(tag, &value)| DataPoint {
            tag_id: tag.clone(),
            timestamp,
            value,
        })
        .collect()
}

/// Receiver of data point records
pub trait DataPointSink {
    fn send(&mut self, point: &DataPoint) -> SynthResult<()>;

    fn flush(&mut self) -> SynthResult<()> {
        Ok(())
    }

    fn send_all(&mut self, points: &[DataPoint]) -> SynthResult<()> {
        for point in points {
            self.send(point)?;
        }
        Ok(())
    }
}

/// Writes each record as a JSON object on its own line
pub struct JsonLinesSink<W: Write> {
    writer: W,
    sent: u64,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, sent: 0 }
    }

    /// Records written so far
    pub fn sent(&self) -> u64 {
        self.sent
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DataPointSink for JsonLinesSink<W> {
    fn send(&mut self, point: &DataPoint) -> SynthResult<()> {
        serde_json::to_writer(&mut self.writer, point)?;
        self.writer.write_all(b"\n")?;
        self.sent += 1;
        Ok(())
    }

    fn flush(&mut self) -> SynthResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_tags() {
        let mut rng = StdRng::seed_from_u64(3);
        let tags = TagSet::random(20, &mut rng).unwrap();
        assert_eq!(tags.len(), 20);

        let unique: HashSet<_> = tags.tags().iter().collect();
        assert_eq!(unique.len(), 20);
        for tag in tags.tags() {
            assert_eq!(tag.len(), TAG_LENGTH);
            assert!(tag.bytes().all(|b| TAG_ALPHABET.contains(&b)));
        }

        assert!(TagSet::random(0, &mut rng).is_err());
    }

    #[test]
    fn test_row_to_datapoints() {
        let tags = TagSet::new(vec!["AAA".into(), "BBB".into()]).unwrap();
        let row = array![1.5, -2.0, 7.0];

        let points = row_to_datapoints(row.view(), &tags, 1_700_000_000);
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].tag_id, "BBB");
        assert_eq!(points[1].value, -2.0);
        assert_eq!(points[0].timestamp, 1_700_000_000);
    }

    #[test]
    fn test_json_lines_sink() {
        let mut sink = JsonLinesSink::new(Vec::new());
        let points = vec![
            DataPoint { tag_id: "X1".into(), timestamp: 10, value: 0.5 },
            DataPoint { tag_id: "X2".into(), timestamp: 10, value: -1.0 },
        ];
        sink.send_all(&points).unwrap();
        sink.flush().unwrap();
        assert_eq!(sink.sent(), 2);

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let decoded: Vec<DataPoint> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(decoded, points);
        assert!(text.starts_with(r#"{"tag_id":"X1","timestamp":10,"value":0.5}"#));
    }
}
