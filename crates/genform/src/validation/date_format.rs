//! Token date formats (`YYYY-MM-DD`, `DD/MM/YYYY HH:mm`) translated to chrono.
//!
//! Schemas describe date formats with the token vocabulary common to
//! JavaScript date libraries. Runs of the same letter form one token; text in
//! square brackets is literal.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Default token format for `date` fields.
pub const DEFAULT_DATE_FORMAT: &str = "YYYY-MM-DD";

/// Default token format for `datetime` fields.
pub const DEFAULT_DATETIME_FORMAT: &str = "YYYY-MM-DDTHH:mm:ss";

/// A token format compiled to a chrono format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    tokens: String,
    chrono: String,
    has_time: bool,
}

impl DateFormat {
    /// Compiles a token format.
    #[must_use]
    pub fn new(tokens: &str) -> Self {
        let (chrono, has_time) = translate(tokens);
        Self {
            tokens: tokens.to_string(),
            chrono,
            has_time,
        }
    }

    /// The token format as written.
    #[must_use]
    pub fn tokens(&self) -> &str {
        &self.tokens
    }

    /// The equivalent chrono format string.
    #[must_use]
    pub fn chrono(&self) -> &str {
        &self.chrono
    }

    /// Whether the format carries a time of day.
    #[must_use]
    pub const fn has_time(&self) -> bool {
        self.has_time
    }

    /// Parses `text` into an instant. Date-only formats yield midnight.
    #[must_use]
    pub fn parse(&self, text: &str) -> Option<NaiveDateTime> {
        let text = text.trim();
        if self.has_time {
            NaiveDateTime::parse_from_str(text, &self.chrono).ok()
        } else {
            NaiveDate::parse_from_str(text, &self.chrono)
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        }
    }

    /// Formats an instant with this format.
    #[must_use]
    pub fn format(&self, instant: &NaiveDateTime) -> String {
        instant.format(&self.chrono).to_string()
    }
}

fn translate(tokens: &str) -> (String, bool) {
    let chars: Vec<char> = tokens.chars().collect();
    let mut out = String::with_capacity(tokens.len() * 2);
    let mut has_time = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '[' {
            i += 1;
            while i < chars.len() && chars[i] != ']' {
                push_literal(&mut out, chars[i]);
                i += 1;
            }
            i += 1;
            continue;
        }

        let mut run = 1;
        while i + run < chars.len() && chars[i + run] == c {
            run += 1;
        }

        let translated = match (c, run) {
            ('Y', 2) => Some("%y"),
            ('Y', _) => Some("%Y"),
            ('M', 1 | 2) => Some("%m"),
            ('M', 3) => Some("%b"),
            ('M', _) => Some("%B"),
            ('D', _) => Some("%d"),
            ('d', 3) => Some("%a"),
            ('d', 4) => Some("%A"),
            ('H', _) => Some("%H"),
            ('h', _) => Some("%I"),
            ('m', _) => Some("%M"),
            ('s', _) => Some("%S"),
            ('S', _) => Some("%3f"),
            ('A' | 'a', _) => Some("%p"),
            ('Z', 1) => Some("%:z"),
            ('Z', _) => Some("%z"),
            _ => None,
        };

        match translated {
            Some(translated) => {
                has_time |= matches!(c, 'H' | 'h' | 'm' | 's' | 'S');
                out.push_str(translated);
            }
            None => {
                for _ in 0..run {
                    push_literal(&mut out, c);
                }
            }
        }
        i += run;
    }

    (out, has_time)
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}
