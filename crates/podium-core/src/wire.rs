//! Binary codec for records and scores.
//!
//! The wire carries no schema: both sides agree on the field layout out of
//! band, and a record is just its values in schema order with no length
//! prefix or checksum. Each value is a one-byte kind tag followed by its
//! payload, so the decoder can verify the stream against the schema it
//! expects. A score prepends a one-byte [`ScoreKind`] tag. All integers
//! are little-endian.

use std::sync::Arc;

use chrono::{TimeZone, Utc};

use crate::error::{Error, Result};
use crate::record::Record;
use crate::schema::Schema;
use crate::score::{Score, ScoreKind};
use crate::value::{Value, ValueKind};

const TAG_UINT: u8 = 0;
const TAG_INT: u8 = 1;
const TAG_DOUBLE: u8 = 2;
const TAG_TEXT: u8 = 3;
const TAG_DATE_TIME: u8 = 4;

/// Append-only buffer for building wire payloads.
#[derive(Debug, Default)]
pub struct WireWriter {
    buf: Vec<u8>,
}

impl WireWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn put_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    pub fn put_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn put_i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn put_i64(&mut self, v: i64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn put_f64(&mut self, v: f64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// One tagged value: kind byte, then payload.
    pub fn put_value(&mut self, value: &Value) {
        match value {
            Value::UInt(v) => {
                self.put_u8(TAG_UINT);
                self.put_u32(*v);
            }
            Value::Int(v) => {
                self.put_u8(TAG_INT);
                self.put_i32(*v);
            }
            Value::Double(v) => {
                self.put_u8(TAG_DOUBLE);
                self.put_f64(*v);
            }
            Value::Text(s) => {
                self.put_u8(TAG_TEXT);
                self.put_u32(s.len() as u32);
                self.buf.extend_from_slice(s.as_bytes());
            }
            Value::DateTime(None) => {
                self.put_u8(TAG_DATE_TIME);
                self.put_u8(0);
            }
            Value::DateTime(Some(dt)) => {
                self.put_u8(TAG_DATE_TIME);
                self.put_u8(1);
                self.put_i64(dt.timestamp_millis());
            }
        }
    }
}

/// Position-tracking cursor over a wire payload, with bounds-checked
/// reads that report the offending byte position.
#[derive(Debug)]
pub struct WireReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(count)
            .ok_or_else(|| Error::DecodeFailed {
                position: self.pos,
                message: "position overflow".to_string(),
            })?;
        if end > self.data.len() {
            return Err(Error::DecodeFailed {
                position: self.pos,
                message: format!(
                    "read of {} bytes exceeds payload length {}",
                    count,
                    self.data.len()
                ),
            });
        }
        let result = &self.data[self.pos..end];
        self.pos = end;
        Ok(result)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        let bytes = self.take(4)?;
        Ok(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        let bytes = self.take(8)?;
        Ok(i64::from_le_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ]))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        let bytes = self.take(8)?;
        Ok(f64::from_le_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ]))
    }

    /// One tagged value, checked against the kind the schema expects.
    pub fn read_value(&mut self, expected: ValueKind) -> Result<Value> {
        let at = self.pos;
        let tag = self.read_u8()?;
        let value = match tag {
            TAG_UINT => Value::UInt(self.read_u32()?),
            TAG_INT => Value::Int(self.read_i32()?),
            TAG_DOUBLE => Value::Double(self.read_f64()?),
            TAG_TEXT => {
                let len = self.read_u32()? as usize;
                let bytes = self.take(len)?;
                let text = std::str::from_utf8(bytes).map_err(|e| Error::DecodeFailed {
                    position: at,
                    message: format!("invalid UTF-8 in text value: {e}"),
                })?;
                Value::Text(text.to_string())
            }
            TAG_DATE_TIME => match self.read_u8()? {
                0 => Value::DateTime(None),
                1 => {
                    let millis = self.read_i64()?;
                    let stamp = Utc
                        .timestamp_millis_opt(millis)
                        .single()
                        .ok_or_else(|| Error::DecodeFailed {
                            position: at,
                            message: format!("timestamp out of range: {millis}"),
                        })?;
                    Value::DateTime(Some(stamp))
                }
                flag => {
                    return Err(Error::DecodeFailed {
                        position: at,
                        message: format!("invalid date-time presence flag {flag}"),
                    })
                }
            },
            _ => {
                return Err(Error::DecodeFailed {
                    position: at,
                    message: format!("unknown value tag {tag}"),
                })
            }
        };
        if value.kind() != expected {
            return Err(Error::DecodeFailed {
                position: at,
                message: format!("expected a {expected} value, found {}", value.kind()),
            });
        }
        Ok(value)
    }
}

/// Serialize a record's values in schema order.
pub fn encode_record(record: &Record) -> Vec<u8> {
    let mut writer = WireWriter::new();
    for value in record.values() {
        writer.put_value(value);
    }
    writer.into_bytes()
}

/// Serialize a score: kind tag, then the record.
pub fn encode_score(score: &Score) -> Vec<u8> {
    let mut writer = WireWriter::new();
    writer.put_u8(score.kind() as u8);
    for value in score.record().values() {
        writer.put_value(value);
    }
    writer.into_bytes()
}

fn read_record(reader: &mut WireReader<'_>, schema: &Arc<Schema>) -> Result<Record> {
    let mut record = Record::new(Arc::clone(schema));
    for slot in schema.slots() {
        let value = reader.read_value(slot.item().kind())?;
        record.set(slot.name(), value)?;
    }
    Ok(record)
}

fn expect_consumed(reader: &WireReader<'_>) -> Result<()> {
    if reader.remaining() != 0 {
        return Err(Error::DecodeFailed {
            position: reader.position(),
            message: format!("{} trailing bytes after record", reader.remaining()),
        });
    }
    Ok(())
}

/// Inverse of [`encode_record`], against an out-of-band schema.
pub fn decode_record(bytes: &[u8], schema: &Arc<Schema>) -> Result<Record> {
    let mut reader = WireReader::new(bytes);
    let record = read_record(&mut reader, schema)?;
    expect_consumed(&reader)?;
    Ok(record)
}

/// Inverse of [`encode_score`], against an out-of-band schema.
pub fn decode_score(bytes: &[u8], schema: &Arc<Schema>) -> Result<Score> {
    let mut reader = WireReader::new(bytes);
    let at = reader.position();
    let tag = reader.read_u8()?;
    let kind = ScoreKind::from_u8(tag).ok_or_else(|| Error::DecodeFailed {
        position: at,
        message: format!("unknown score kind {tag}"),
    })?;
    let mut score = Score::new(kind, Arc::clone(schema));
    *score.record_mut() = read_record(&mut reader, schema)?;
    expect_consumed(&reader)?;
    Ok(score)
}
