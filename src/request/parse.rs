//! Length-aware decoder for name/value-pair strings.
//!
//! The gateway replies with `NAME=value` pairs joined by `&`, optionally
//! carrying a `[len]` clause like requests do. When the clause is present
//! the value is taken by byte count, so it may contain the delimiter.

use super::{RequestError, append::DELIMITER};

/// Iterator over the pairs of an NVP string.
///
/// Stops at the first malformed pair; call [`NvpIter::finish`] to learn
/// whether the whole input was consumed cleanly.
pub struct NvpIter<'a> {
    input: &'a str,
    offset: usize,
    error: Option<RequestError>,
}

impl<'a> NvpIter<'a> {
    /// Start decoding `input`.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            offset: 0,
            error: None,
        }
    }

    /// Report the error that ended iteration, if any.
    ///
    /// # Errors
    /// Returns the first decoding error encountered.
    pub fn finish(self) -> Result<(), RequestError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn fail(&mut self, err: RequestError) -> Option<(&'a str, &'a str)> {
        self.error = Some(err);
        None
    }

    fn next_pair(&mut self) -> Result<(&'a str, &'a str), RequestError> {
        let start = self.offset;
        let rest = self.input.get(start..).unwrap_or_default();
        let Some(stop) = rest.find(['[', '=', DELIMITER]) else {
            return Err(RequestError::MissingSeparator(start));
        };
        let name = rest.get(..stop).unwrap_or_default();
        if name.is_empty() {
            return Err(RequestError::EmptyName(start));
        }
        let after_name = rest.get(stop..).unwrap_or_default();
        if after_name.starts_with(DELIMITER) {
            return Err(RequestError::MissingSeparator(start + stop));
        }

        if let Some(clause) = after_name.strip_prefix('[') {
            let Some(close) = clause.find(']') else {
                return Err(RequestError::InvalidLength(name.to_owned()));
            };
            let len: usize = clause
                .get(..close)
                .and_then(|digits| digits.parse().ok())
                .ok_or_else(|| RequestError::InvalidLength(name.to_owned()))?;
            let Some(body) = clause.get(close + 1..).and_then(|s| s.strip_prefix('=')) else {
                return Err(RequestError::MissingSeparator(start + stop));
            };
            let value = body
                .get(..len)
                .ok_or_else(|| RequestError::LengthOverrun(name.to_owned()))?;
            let tail = body.get(len..).unwrap_or_default();
            if !tail.is_empty() && !tail.starts_with(DELIMITER) {
                return Err(RequestError::MissingDelimiter(name.to_owned()));
            }
            self.offset = self.input.len() - tail.len() + usize::from(!tail.is_empty());
            return Ok((name, value));
        }

        let body = after_name.get(1..).unwrap_or_default();
        let value_len = body.find(DELIMITER).unwrap_or(body.len());
        let value = body.get(..value_len).unwrap_or_default();
        let consumed = value_len + usize::from(value_len < body.len());
        self.offset = self.input.len() - body.len() + consumed;
        Ok((name, value))
    }
}

impl<'a> Iterator for NvpIter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        if self.error.is_some() || self.offset >= self.input.len() {
            return None;
        }
        match self.next_pair() {
            Ok(pair) => Some(pair),
            Err(err) => self.fail(err),
        }
    }
}

/// Decode every pair of `input` in order.
///
/// # Errors
/// Returns the first decoding error.
pub fn decode_pairs(input: &str) -> Result<Vec<(&str, &str)>, RequestError> {
    let mut iter = NvpIter::new(input);
    let pairs = iter.by_ref().collect();
    iter.finish()?;
    Ok(pairs)
}
