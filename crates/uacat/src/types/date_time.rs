// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::fmt;

use chrono::{SecondsFormat, TimeZone, Utc};
use roxmltree::Node;

use crate::codec::{
    BinaryEncodable, BinaryReader, BinaryWriter, CodecError, CodecResult, XmlDecoder,
    XmlEncodable, XmlWriter,
};
use crate::structure::impl_structural_eq_hash;

/// 100 ns ticks between 1601-01-01 and 1970-01-01.
const UNIX_EPOCH_TICKS: i64 = 116_444_736_000_000_000;
const TICKS_PER_SECOND: i64 = 10_000_000;

/// UTC timestamp in 100 ns ticks since 1601-01-01.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateTime(i64);

impl DateTime {
    /// Tick zero, also used as "no timestamp".
    pub const MIN: DateTime = DateTime(0);

    pub const fn from_ticks(ticks: i64) -> Self {
        Self(ticks)
    }

    pub const fn ticks(self) -> i64 {
        self.0
    }

    pub fn now() -> Self {
        Self::from_chrono(Utc::now())
    }

    /// Truncates below 100 ns; saturates outside the tick range.
    pub fn from_chrono(value: chrono::DateTime<Utc>) -> Self {
        let seconds = i128::from(value.timestamp());
        let sub_ticks = i128::from(value.timestamp_subsec_nanos() / 100);
        let ticks = seconds * i128::from(TICKS_PER_SECOND) + sub_ticks + i128::from(UNIX_EPOCH_TICKS);
        Self(ticks.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64)
    }

    pub fn to_chrono(self) -> Option<chrono::DateTime<Utc>> {
        let unix_ticks = self.0.checked_sub(UNIX_EPOCH_TICKS)?;
        let seconds = unix_ticks.div_euclid(TICKS_PER_SECOND);
        let nanos = (unix_ticks.rem_euclid(TICKS_PER_SECOND) * 100) as u32;
        Utc.timestamp_opt(seconds, nanos).single()
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_chrono() {
            Some(value) => f.write_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            None => write!(f, "{} ticks", self.0),
        }
    }
}

impl From<chrono::DateTime<Utc>> for DateTime {
    fn from(value: chrono::DateTime<Utc>) -> Self {
        Self::from_chrono(value)
    }
}

impl_structural_eq_hash!(DateTime);

impl BinaryEncodable for DateTime {
    fn encode(&self, writer: &mut BinaryWriter) -> CodecResult<()> {
        writer.write_i64(self.0);
        Ok(())
    }

    fn decode(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        reader.read_i64().map(Self)
    }
}

impl XmlEncodable for DateTime {
    const XML_TYPE_NAME: &'static str = "DateTime";

    fn encode_xml(&self, writer: &mut XmlWriter) -> CodecResult<()> {
        let value = self.to_chrono().ok_or_else(|| {
            CodecError::InvalidData(format!("DateTime {} ticks is not representable", self.0))
        })?;
        writer.text(&value.to_rfc3339_opts(SecondsFormat::AutoSi, true));
        Ok(())
    }

    fn decode_xml(node: Node<'_, '_>, _decoder: &mut XmlDecoder) -> CodecResult<Self> {
        let text = XmlDecoder::text(node);
        chrono::DateTime::parse_from_rfc3339(text)
            .map(|value| Self::from_chrono(value.with_timezone(&Utc)))
            .map_err(|e| CodecError::InvalidData(format!("invalid DateTime {text:?}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_xml, encode_xml};
    use crate::config::DecodingLimits;

    #[test]
    fn unix_epoch_offset() {
        let epoch = Utc.timestamp_opt(0, 0).single().unwrap();
        assert_eq!(DateTime::from_chrono(epoch).ticks(), UNIX_EPOCH_TICKS);
        assert_eq!(DateTime::MIN.to_string(), "1601-01-01T00:00:00Z");
    }

    #[test]
    fn sub_second_ticks_survive_xml() {
        let value = DateTime::from_ticks(UNIX_EPOCH_TICKS + 1_234_567);
        let xml = encode_xml(&value).unwrap();
        assert!(xml.contains("1970-01-01T00:00:00.1234567"));
        let decoded: DateTime = decode_xml(&xml, &DecodingLimits::default()).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn chrono_conversion_roundtrip() {
        let now = DateTime::now();
        assert_eq!(DateTime::from_chrono(now.to_chrono().unwrap()), now);
    }
}
