//! Immutable NMEA 0183 sentence value

use super::checksum::checksum;
use std::fmt;

/// Conventional NMEA line terminator
pub const LINE_TERMINATOR: &[u8] = b"\r\n";

/// A complete, checksummed sentence rendered as `$<body>*<HH>`.
///
/// Built once from a header (talker + type, e.g. `IIDPT`) and its fields;
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    text: String,
    checksum: u8,
}

impl Sentence {
    /// Build a sentence from a header and comma separated fields
    ///
    /// # Example
    /// ```
    /// use samudra_io::nmea::Sentence;
    ///
    /// let s = Sentence::new("IIMTW", ["35.0", "C"]);
    /// assert_eq!(s.as_str(), "$IIMTW,35.0,C*15");
    /// ```
    pub fn new<I, F>(header: &str, fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: fmt::Display,
    {
        let mut body = String::from(header);
        for field in fields {
            body.push(',');
            body.push_str(&field.to_string());
        }
        Self::from_body(&body)
    }

    /// Wrap an already formatted body (text between `$` and `*`)
    pub fn from_body(body: &str) -> Self {
        let checksum = checksum(body);
        let text = format!("${}*{:02X}", body, checksum);
        Self { text, checksum }
    }

    /// Full sentence text including `$` and checksum suffix
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Body between `$` and `*`
    pub fn body(&self) -> &str {
        // text is always "$" + body + "*HH"
        &self.text[1..self.text.len() - 3]
    }

    /// Talker + type, e.g. `IIDPT`
    pub fn header(&self) -> &str {
        let body = self.body();
        body.split(',').next().unwrap_or(body)
    }

    /// Fields after the header, in order (empty fields preserved)
    pub fn fields(&self) -> Vec<&str> {
        self.body().split(',').skip(1).collect()
    }

    /// Raw checksum byte
    #[inline]
    pub fn checksum(&self) -> u8 {
        self.checksum
    }

    /// Append the wire representation to `buffer`
    ///
    /// `buffer` is cleared first so callers can reuse one allocation
    /// across sends.
    pub fn write_datagram(&self, buffer: &mut Vec<u8>, line_terminator: bool) {
        buffer.clear();
        buffer.extend_from_slice(self.text.as_bytes());
        if line_terminator {
            buffer.extend_from_slice(LINE_TERMINATOR);
        }
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for Sentence {
    fn as_ref(&self) -> &str {
        &self.text
    }
}
