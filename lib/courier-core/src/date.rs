//! Date encoding strategies.
//!
//! JSON has no date type, so endpoints choose how dates inside their payloads
//! are written and read. Payload fields use [`Timestamp`]; its serde impls
//! consult the [`DateStrategy`] active on the current thread, which the codec
//! installs for the duration of a single encode or decode call.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use courier_core::{DateStrategy, Timestamp, with_date_strategy};
//!
//! let at = Timestamp(Utc.with_ymd_and_hms(2018, 6, 13, 0, 0, 0).unwrap());
//! let json = with_date_strategy(&DateStrategy::SecondsSince1970, || serde_json::to_string(&at));
//! assert_eq!(json.unwrap(), "1528848000.0");
//! ```

use std::cell::RefCell;
use std::fmt;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// How [`Timestamp`] values are represented in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum DateStrategy {
    /// The native representation of the date type (RFC 3339 with full precision).
    #[default]
    Deferred,
    /// Fractional seconds since the Unix epoch, as a number.
    SecondsSince1970,
    /// Milliseconds since the Unix epoch, as a number.
    MillisecondsSince1970,
    /// ISO 8601 / RFC 3339 string with whole seconds, in UTC (`2018-06-13T00:00:00Z`).
    Iso8601,
    /// A `strftime`-style format string, e.g. `%Y-%m-%dT%H:%M:%S%.3f%:z`.
    Formatted(String),
}

thread_local! {
    static ACTIVE: RefCell<DateStrategy> = RefCell::new(DateStrategy::Deferred);
}

impl DateStrategy {
    /// The strategy installed on the current thread.
    #[must_use]
    pub fn active() -> Self {
        ACTIVE.with(|active| active.borrow().clone())
    }
}

/// Restores the previously active strategy on drop.
struct Scope {
    previous: DateStrategy,
}

impl Scope {
    fn enter(strategy: &DateStrategy) -> Self {
        let previous = ACTIVE.with(|active| active.replace(strategy.clone()));
        Self { previous }
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        let previous = std::mem::take(&mut self.previous);
        ACTIVE.with(|active| *active.borrow_mut() = previous);
    }
}

/// Run `f` with `strategy` active for every [`Timestamp`] it (de)serializes.
pub fn with_date_strategy<R>(strategy: &DateStrategy, f: impl FnOnce() -> R) -> R {
    let _scope = Scope::enter(strategy);
    f()
}

/// A UTC instant whose JSON shape follows the active [`DateStrategy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub DateTime<Utc>);

impl Timestamp {
    /// The current instant.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

fn has_invalid_items(format: &str) -> bool {
    StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

impl Serialize for Timestamp {
    #[allow(clippy::cast_precision_loss)]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match DateStrategy::active() {
            DateStrategy::Deferred => self.0.serialize(serializer),
            DateStrategy::SecondsSince1970 => {
                let seconds = self.0.timestamp() as f64
                    + f64::from(self.0.timestamp_subsec_nanos()) / 1_000_000_000.0;
                serializer.serialize_f64(seconds)
            }
            DateStrategy::MillisecondsSince1970 => {
                serializer.serialize_i64(self.0.timestamp_millis())
            }
            DateStrategy::Iso8601 => {
                serializer.serialize_str(&self.0.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
            DateStrategy::Formatted(format) => {
                if has_invalid_items(&format) {
                    return Err(serde::ser::Error::custom(format!(
                        "invalid date format `{format}`"
                    )));
                }
                serializer.collect_str(&self.0.format(&format))
            }
        }
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    #[allow(clippy::cast_possible_truncation)]
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        match DateStrategy::active() {
            DateStrategy::Deferred => DateTime::<Utc>::deserialize(deserializer).map(Self),
            DateStrategy::SecondsSince1970 => {
                let seconds = f64::deserialize(deserializer)?;
                let whole = seconds.floor();
                let nanos = ((seconds - whole) * 1_000_000_000.0).round() as u32;
                DateTime::from_timestamp(whole as i64, nanos.min(999_999_999))
                    .map(Self)
                    .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {seconds}")))
            }
            DateStrategy::MillisecondsSince1970 => {
                let millis = f64::deserialize(deserializer)?.round() as i64;
                DateTime::from_timestamp_millis(millis)
                    .map(Self)
                    .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {millis}")))
            }
            DateStrategy::Iso8601 => {
                let text = String::deserialize(deserializer)?;
                DateTime::parse_from_rfc3339(&text)
                    .map(|date| Self(date.with_timezone(&Utc)))
                    .map_err(|e| D::Error::custom(format!("invalid ISO 8601 date `{text}`: {e}")))
            }
            DateStrategy::Formatted(format) => {
                let text = String::deserialize(deserializer)?;
                DateTime::parse_from_str(&text, &format)
                    .map(|date| date.with_timezone(&Utc))
                    .or_else(|_| NaiveDateTime::parse_from_str(&text, &format).map(|d| d.and_utc()))
                    .map(Self)
                    .map_err(|e| {
                        D::Error::custom(format!("date `{text}` does not match `{format}`: {e}"))
                    })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn june_12() -> Timestamp {
        // 2018-06-12T20:00:00-04:00
        Timestamp(
            Utc.with_ymd_and_hms(2018, 6, 13, 0, 0, 0)
                .single()
                .expect("valid date"),
        )
    }

    fn encode(strategy: &DateStrategy, value: &Timestamp) -> String {
        with_date_strategy(strategy, || serde_json::to_string(value)).expect("encode")
    }

    fn decode(strategy: &DateStrategy, json: &str) -> Timestamp {
        with_date_strategy(strategy, || serde_json::from_str(json)).expect("decode")
    }

    #[test]
    fn deferred_is_default() {
        assert_eq!(DateStrategy::active(), DateStrategy::Deferred);
        assert_eq!(
            serde_json::to_string(&june_12()).expect("encode"),
            r#""2018-06-13T00:00:00Z""#
        );
    }

    #[test]
    fn scope_restores_previous_strategy() {
        with_date_strategy(&DateStrategy::Iso8601, || {
            assert_eq!(DateStrategy::active(), DateStrategy::Iso8601);
            with_date_strategy(&DateStrategy::MillisecondsSince1970, || {
                assert_eq!(DateStrategy::active(), DateStrategy::MillisecondsSince1970);
            });
            assert_eq!(DateStrategy::active(), DateStrategy::Iso8601);
        });
        assert_eq!(DateStrategy::active(), DateStrategy::Deferred);
    }

    #[test]
    fn epoch_strategies() {
        let strategy = DateStrategy::SecondsSince1970;
        assert_eq!(encode(&strategy, &june_12()), "1528848000.0");
        assert_eq!(decode(&strategy, "1528848000"), june_12());

        let strategy = DateStrategy::MillisecondsSince1970;
        assert_eq!(encode(&strategy, &june_12()), "1528848000000");
        assert_eq!(decode(&strategy, "1528848000000"), june_12());
    }

    #[test]
    fn iso8601_strategy() {
        let strategy = DateStrategy::Iso8601;
        assert_eq!(encode(&strategy, &june_12()), r#""2018-06-13T00:00:00Z""#);
        assert_eq!(
            decode(&strategy, r#""2018-06-12T20:00:00-04:00""#),
            june_12()
        );
    }

    #[test]
    fn formatted_strategy_with_offset() {
        let strategy = DateStrategy::Formatted("%Y-%m-%dT%H:%M:%S%.3f%:z".to_string());
        assert_eq!(
            decode(&strategy, r#""2018-06-12T20:00:00.000-04:00""#),
            june_12()
        );
        assert_eq!(
            encode(&strategy, &june_12()),
            r#""2018-06-13T00:00:00.000+00:00""#
        );
    }

    #[test]
    fn formatted_strategy_without_offset_is_utc() {
        let strategy = DateStrategy::Formatted("%Y-%m-%d %H:%M".to_string());
        assert_eq!(decode(&strategy, r#""2018-06-13 00:00""#), june_12());
    }

    #[test]
    fn mismatched_strategy_fails() {
        let result: serde_json::Result<Timestamp> =
            with_date_strategy(&DateStrategy::Iso8601, || serde_json::from_str("1528848000"));
        assert!(result.is_err());

        let result = with_date_strategy(&DateStrategy::Formatted("%Q".to_string()), || {
            serde_json::to_string(&june_12())
        });
        assert!(result.is_err());
    }
}
