//! The type-directed primitive codec.
//!
//! Maps a closed set of scalar types to their textual tokens and back. The
//! mapping is lossless and locale-independent: Rust's `Display`/`FromStr`
//! machinery never consults an ambient locale, so the conversion is a pure
//! function of the value; no thread-wide formatting state exists to save or
//! restore around a call.
//!
//! ## Token Shapes
//!
//! | Type | Token |
//! |------|-------|
//! | integers, floats, decimal | plain literal (`42`, `-0.5`) |
//! | `bool` | `True` / `False` |
//! | `char` | `'c'` |
//! | `String` | `"..."` (no escaping, see below) |
//! | `NaiveDateTime` | `2026-08-28T13:45:30` |
//! | `DateTime<FixedOffset>` | RFC 3339 |
//! | `Duration` | `[-][d.]hh:mm:ss[.fffffffff]` |
//! | `Option<T>` | `Null` or the token of the inner value |
//!
//! ## No String Escaping
//!
//! String tokens are wrapped in double quotes without escaping embedded
//! quotes. A value containing `"` therefore does not survive a round trip;
//! this matches the wire format and is deliberately left unfixed, since
//! adding escaping would change every file containing a quote.

use std::str::FromStr;

use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime};
use rust_decimal::Decimal;

use crate::error::{Result, TextsetError};
use crate::format::NULL_TOKEN;

const SECS_PER_DAY: u64 = 86_400;

/// Bidirectional conversion between a scalar value and its text token.
///
/// This trait is the codec's dispatch point: the derive macro emits one
/// `encode_token`/`decode_token` call per field, so a field of any type
/// outside the closed scalar set fails to compile rather than failing at
/// run time.
pub trait TextScalar: Sized {
    /// Encodes the value into its textual token.
    fn encode_token(&self) -> String;

    /// Decodes a token into a value.
    ///
    /// A token that does not match the expected literal shape yields
    /// [`TextsetError::Format`]; a well-formed numeric token outside the
    /// target range yields [`TextsetError::Range`].
    fn decode_token(token: &str) -> Result<Self>;
}

macro_rules! impl_int_scalar {
    ($($ty:ty),*) => {$(
        impl TextScalar for $ty {
            fn encode_token(&self) -> String {
                self.to_string()
            }

            fn decode_token(token: &str) -> Result<Self> {
                match token.parse::<$ty>() {
                    Ok(value) => Ok(value),
                    Err(e) => {
                        use std::num::IntErrorKind;
                        // A token that is a well-formed integer for a wider
                        // type (e.g. "-1" against u16) is out of range, not
                        // malformed.
                        let out_of_range = matches!(
                            e.kind(),
                            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow
                        ) || token.parse::<i128>().is_ok();
                        if out_of_range {
                            Err(TextsetError::Range(format!(
                                "'{token}' is outside the range of {}",
                                stringify!($ty)
                            )))
                        } else {
                            Err(TextsetError::Format(format!(
                                "'{token}' is not a valid {}",
                                stringify!($ty)
                            )))
                        }
                    }
                }
            }
        }
    )*};
}

impl_int_scalar!(i8, i16, i32, i64, u8, u16, u32, u64);

macro_rules! impl_float_scalar {
    ($($ty:ty),*) => {$(
        impl TextScalar for $ty {
            fn encode_token(&self) -> String {
                self.to_string()
            }

            fn decode_token(token: &str) -> Result<Self> {
                token.parse::<$ty>().map_err(|_| {
                    TextsetError::Format(format!(
                        "'{token}' is not a valid {}",
                        stringify!($ty)
                    ))
                })
            }
        }
    )*};
}

impl_float_scalar!(f32, f64);

impl TextScalar for Decimal {
    fn encode_token(&self) -> String {
        self.to_string()
    }

    fn decode_token(token: &str) -> Result<Self> {
        Decimal::from_str(token)
            .map_err(|e| TextsetError::Format(format!("'{token}' is not a valid decimal: {e}")))
    }
}

impl TextScalar for bool {
    fn encode_token(&self) -> String {
        if *self { "True" } else { "False" }.to_owned()
    }

    fn decode_token(token: &str) -> Result<Self> {
        if token.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if token.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(TextsetError::Format(format!(
                "'{token}' is not a boolean (expected True or False)"
            )))
        }
    }
}

impl TextScalar for char {
    fn encode_token(&self) -> String {
        format!("'{self}'")
    }

    fn decode_token(token: &str) -> Result<Self> {
        let inner = token
            .strip_prefix('\'')
            .and_then(|rest| rest.strip_suffix('\''))
            .ok_or_else(|| {
                TextsetError::Format(format!("'{token}' is not a single-quoted character"))
            })?;
        let mut chars = inner.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(TextsetError::Format(format!(
                "'{token}' must contain exactly one character between the quotes"
            ))),
        }
    }
}

impl TextScalar for String {
    fn encode_token(&self) -> String {
        format!("\"{self}\"")
    }

    fn decode_token(token: &str) -> Result<Self> {
        if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
            // The substring between the quotes, verbatim. No unescaping.
            Ok(token[1..token.len() - 1].to_owned())
        } else {
            Err(TextsetError::Format(format!(
                "'{token}' is not a double-quoted string"
            )))
        }
    }
}

impl TextScalar for NaiveDateTime {
    fn encode_token(&self) -> String {
        self.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
    }

    fn decode_token(token: &str) -> Result<Self> {
        token
            .parse::<NaiveDateTime>()
            .or_else(|_| NaiveDateTime::parse_from_str(token, "%Y-%m-%d %H:%M:%S%.f"))
            .map_err(|_| TextsetError::Format(format!("'{token}' is not a valid date-time")))
    }
}

impl TextScalar for DateTime<FixedOffset> {
    fn encode_token(&self) -> String {
        self.to_rfc3339()
    }

    fn decode_token(token: &str) -> Result<Self> {
        DateTime::parse_from_rfc3339(token).map_err(|_| {
            TextsetError::Format(format!("'{token}' is not a valid RFC 3339 date-time"))
        })
    }
}

/// Time spans use the fixed shape `[-][d.]hh:mm:ss[.fffffffff]` with a
/// 9-digit nanosecond fraction, emitted only when non-zero.
impl TextScalar for Duration {
    fn encode_token(&self) -> String {
        let negative = self.num_seconds() < 0 || self.subsec_nanos() < 0;
        let secs = self.num_seconds().unsigned_abs();
        let nanos = self.subsec_nanos().unsigned_abs();

        let days = secs / SECS_PER_DAY;
        let rem = secs % SECS_PER_DAY;
        let (hh, mm, ss) = (rem / 3600, (rem % 3600) / 60, rem % 60);

        let mut out = String::new();
        if negative {
            out.push('-');
        }
        if days > 0 {
            out.push_str(&days.to_string());
            out.push('.');
        }
        out.push_str(&format!("{hh:02}:{mm:02}:{ss:02}"));
        if nanos > 0 {
            out.push_str(&format!(".{nanos:09}"));
        }
        out
    }

    fn decode_token(token: &str) -> Result<Self> {
        let malformed =
            || TextsetError::Format(format!("'{token}' is not a valid time span"));

        let (negative, rest) = match token.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, token),
        };

        let mut parts = rest.split(':');
        let (hours_part, mins_part, secs_part) =
            match (parts.next(), parts.next(), parts.next(), parts.next()) {
                (Some(h), Some(m), Some(s), None) => (h, m, s),
                _ => return Err(malformed()),
            };

        // The hour field may carry a day prefix: "d.hh".
        let (days, hours_digits) = match hours_part.split_once('.') {
            Some((d, h)) => (d.parse::<u64>().map_err(|_| malformed())?, h),
            None => (0, hours_part),
        };
        let hours: u64 = hours_digits.parse().map_err(|_| malformed())?;
        let mins: u64 = mins_part.parse().map_err(|_| malformed())?;

        // The second field may carry a fraction: "ss.fffffffff".
        let (secs, nanos) = match secs_part.split_once('.') {
            Some((s, frac)) => {
                if frac.is_empty() || frac.len() > 9 || !frac.bytes().all(|b| b.is_ascii_digit())
                {
                    return Err(malformed());
                }
                let scale = 10u64.pow(9 - frac.len() as u32);
                let frac: u64 = frac.parse().map_err(|_| malformed())?;
                (s.parse::<u64>().map_err(|_| malformed())?, frac * scale)
            }
            None => (secs_part.parse::<u64>().map_err(|_| malformed())?, 0),
        };

        if hours >= 24 || mins >= 60 || secs >= 60 {
            return Err(malformed());
        }

        let overflow =
            || TextsetError::Range(format!("'{token}' exceeds the representable time span"));
        let total_secs = days
            .checked_mul(SECS_PER_DAY)
            .and_then(|d| d.checked_add(hours * 3600 + mins * 60 + secs))
            .ok_or_else(overflow)?;
        let total_secs = i64::try_from(total_secs).map_err(|_| overflow())?;

        let span = Duration::try_seconds(total_secs)
            .and_then(|s| s.checked_add(&Duration::nanoseconds(nanos as i64)))
            .ok_or_else(overflow)?;
        Ok(if negative { -span } else { span })
    }
}

/// Null handling for optional values.
///
/// `None` encodes to the bare token `Null`. On decode the whole token is
/// compared against the null token *before* delegating to the inner type;
/// this ordering is what distinguishes the sentinel `Null` from the quoted
/// string `"Null"`, whose surrounding quotes defeat the comparison and fall
/// through to `String` decoding.
impl<T: TextScalar> TextScalar for Option<T> {
    fn encode_token(&self) -> String {
        match self {
            None => NULL_TOKEN.to_owned(),
            Some(value) => value.encode_token(),
        }
    }

    fn decode_token(token: &str) -> Result<Self> {
        if token == NULL_TOKEN {
            Ok(None)
        } else {
            T::decode_token(token).map(Some)
        }
    }
}
