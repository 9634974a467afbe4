//! chrono's dates, times and durations.
//!
//! Datetimes are dumped as `YYYY-MM-DDTHH:MM:SS[.ffffff]` followed by `Z`
//! for UTC or by the `±HH:MM` offset. Microseconds are left out when zero
//! or when [`strip_microseconds`](crate::DumpOptions::strip_microseconds)
//! is set. A datetime without offset is loaded as UTC.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Utc};
use jk_reflect::Reflect;
use jk_reflect::info::TypeInfo;
use serde_json::Value;

use crate::context::{DumpContext, LoadContext};
use crate::converters::invalid_shape;
use crate::error::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

// -----------------------------------------------------------------------------
// Datetimes

/// Dumps `DateTime<Utc>` and `DateTime<FixedOffset>`.
pub fn dump_datetime(value: &dyn Reflect, _: &'static TypeInfo, ctx: &mut DumpContext<'_>) -> Result<Value, Error> {
    let datetime = if let Some(utc) = value.downcast_ref::<DateTime<Utc>>() {
        utc.fixed_offset()
    } else if let Some(fixed) = value.downcast_ref::<DateTime<FixedOffset>>() {
        *fixed
    } else {
        return Err(Error::custom("expected a chrono datetime"));
    };
    Ok(Value::String(format_datetime(&datetime, ctx.options().strip_microseconds())))
}

/// Loads `DateTime<Utc>` and `DateTime<FixedOffset>`.
pub fn load_datetime(json: &Value, cls: &'static TypeInfo, _: &mut LoadContext<'_>) -> Result<Box<dyn Reflect>, Error> {
    let Some(datetime) = json.as_str().and_then(parse_datetime) else {
        return Err(invalid_shape(json, cls, "an ISO 8601 datetime string"));
    };
    if cls.is::<DateTime<Utc>>() {
        Ok(Box::new(datetime.with_timezone(&Utc)))
    } else {
        Ok(Box::new(datetime))
    }
}

pub(crate) fn format_datetime(datetime: &DateTime<FixedOffset>, strip_microseconds: bool) -> String {
    let mut text = datetime.format(DATETIME_FORMAT).to_string();

    let micros = datetime.nanosecond() / 1_000 % 1_000_000;
    if micros != 0 && !strip_microseconds {
        text.push_str(&format!(".{micros:06}"));
    }

    let offset = datetime.offset().local_minus_utc();
    if offset == 0 {
        text.push('Z');
    } else {
        let sign = if offset < 0 { '-' } else { '+' };
        let minutes = offset.unsigned_abs() / 60;
        text.push_str(&format!("{sign}{:02}:{:02}", minutes / 60, minutes % 60));
    }
    text
}

/// Parses an RFC 3339 datetime, or one without offset as UTC.
pub(crate) fn parse_datetime(text: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime);
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc().fixed_offset())
}

// -----------------------------------------------------------------------------
// Dates, times and deltas

pub fn dump_date(value: &dyn Reflect, _: &'static TypeInfo, _: &mut DumpContext<'_>) -> Result<Value, Error> {
    let date = value
        .downcast_ref::<NaiveDate>()
        .ok_or_else(|| Error::custom("expected a chrono date"))?;
    Ok(Value::String(date.format(DATE_FORMAT).to_string()))
}

pub fn load_date(json: &Value, cls: &'static TypeInfo, _: &mut LoadContext<'_>) -> Result<Box<dyn Reflect>, Error> {
    json.as_str()
        .and_then(|text| NaiveDate::parse_from_str(text, DATE_FORMAT).ok())
        .map(|date| Box::new(date) as Box<dyn Reflect>)
        .ok_or_else(|| invalid_shape(json, cls, "a YYYY-MM-DD date string"))
}

/// Dumps a time of day, with microseconds when they are not zero.
pub fn dump_time(value: &dyn Reflect, _: &'static TypeInfo, ctx: &mut DumpContext<'_>) -> Result<Value, Error> {
    let time = value
        .downcast_ref::<NaiveTime>()
        .ok_or_else(|| Error::custom("expected a chrono time"))?;
    let mut text = time.format("%H:%M:%S").to_string();
    let micros = time.nanosecond() / 1_000 % 1_000_000;
    if micros != 0 && !ctx.options().strip_microseconds() {
        text.push_str(&format!(".{micros:06}"));
    }
    Ok(Value::String(text))
}

pub fn load_time(json: &Value, cls: &'static TypeInfo, _: &mut LoadContext<'_>) -> Result<Box<dyn Reflect>, Error> {
    json.as_str()
        .and_then(|text| NaiveTime::parse_from_str(text, "%H:%M:%S%.f").ok())
        .map(|time| Box::new(time) as Box<dyn Reflect>)
        .ok_or_else(|| invalid_shape(json, cls, "a HH:MM:SS time string"))
}

/// Dumps a delta as seconds.
pub fn dump_delta(value: &dyn Reflect, _: &'static TypeInfo, _: &mut DumpContext<'_>) -> Result<Value, Error> {
    let delta = value
        .downcast_ref::<TimeDelta>()
        .ok_or_else(|| Error::custom("expected a chrono time delta"))?;
    let seconds = delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) / 1e9;
    Ok(Value::from(seconds))
}

pub fn load_delta(json: &Value, cls: &'static TypeInfo, _: &mut LoadContext<'_>) -> Result<Box<dyn Reflect>, Error> {
    let Some(seconds) = json.as_f64() else {
        return Err(invalid_shape(json, cls, "a number of seconds"));
    };
    let whole = seconds.trunc();
    let nanos = ((seconds - whole) * 1e9).round() as i64;
    TimeDelta::try_seconds(whole as i64)
        .and_then(|delta| delta.checked_add(&TimeDelta::nanoseconds(nanos)))
        .map(|delta| Box::new(delta) as Box<dyn Reflect>)
        .ok_or_else(|| Error::custom(format_args!("{seconds} seconds is out of range")))
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
    use serde_json::json;

    use crate::{DumpOptions, dump_with, load};

    #[test]
    fn utc_datetimes() {
        let datetime = Utc.with_ymd_and_hms(2018, 7, 8, 21, 34, 0).unwrap();
        assert_eq!(crate::dump(&datetime).unwrap(), json!("2018-07-08T21:34:00Z"));

        let loaded = load::<DateTime<Utc>>(&json!("2018-07-08T21:34:00Z")).unwrap();
        assert_eq!(loaded, datetime);
    }

    #[test]
    fn offsets_and_microseconds() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let datetime = offset
            .with_ymd_and_hms(2020, 1, 2, 3, 4, 5)
            .unwrap()
            .checked_add_signed(TimeDelta::microseconds(120))
            .unwrap();
        assert_eq!(crate::dump(&datetime).unwrap(), json!("2020-01-02T03:04:05.000120+02:00"));

        let options = DumpOptions::new().with_strip_microseconds(true);
        assert_eq!(dump_with(&datetime, &options).unwrap(), json!("2020-01-02T03:04:05+02:00"));

        let loaded = load::<DateTime<FixedOffset>>(&json!("2020-01-02T03:04:05.000120+02:00")).unwrap();
        assert_eq!(loaded, datetime);
    }

    #[test]
    fn negative_offsets() {
        let offset = FixedOffset::west_opt(5 * 3600 + 1800).unwrap();
        let datetime = offset.with_ymd_and_hms(2018, 7, 8, 21, 34, 0).unwrap();
        assert_eq!(crate::dump(&datetime).unwrap(), json!("2018-07-08T21:34:00-05:30"));

        let loaded = load::<DateTime<FixedOffset>>(&json!("2018-07-08T21:34:00-05:30")).unwrap();
        assert_eq!(loaded, datetime);
        assert_eq!(loaded.offset().local_minus_utc(), -(5 * 3600 + 1800));
    }

    #[test]
    fn naive_datetime_is_utc() {
        let loaded = load::<DateTime<Utc>>(&json!("2021-05-06T07:08:09")).unwrap();
        assert_eq!(loaded, Utc.with_ymd_and_hms(2021, 5, 6, 7, 8, 9).unwrap());
    }

    #[test]
    fn dates_times_deltas() {
        let date = NaiveDate::from_ymd_opt(2019, 12, 31).unwrap();
        assert_eq!(crate::dump(&date).unwrap(), json!("2019-12-31"));
        assert_eq!(load::<NaiveDate>(&json!("2019-12-31")).unwrap(), date);

        let time = NaiveTime::from_hms_micro_opt(13, 14, 15, 500).unwrap();
        assert_eq!(crate::dump(&time).unwrap(), json!("13:14:15.000500"));
        assert_eq!(load::<NaiveTime>(&json!("13:14:15.000500")).unwrap(), time);

        let delta = TimeDelta::milliseconds(2500);
        assert_eq!(crate::dump(&delta).unwrap(), json!(2.5));
        assert_eq!(load::<TimeDelta>(&json!(2.5)).unwrap(), delta);
    }

    #[test]
    fn inferred_strings_become_datetimes() {
        let loaded = crate::load_any(&json!("2018-07-08T21:34:00Z"), &crate::LoadOptions::new()).unwrap();
        assert!(loaded.is::<DateTime<FixedOffset>>());

        let loaded = crate::load_any(&json!("not a date"), &crate::LoadOptions::new()).unwrap();
        assert!(loaded.is::<String>());
    }
}
