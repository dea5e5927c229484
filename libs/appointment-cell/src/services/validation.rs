use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde_json::{Map, Value};

use crate::models::{AppointmentError, ValidatedBooking};

/// Shape-checks a booking payload.
///
/// Accepts either `{"data": {...}}` or the bare object. Ids may be JSON
/// integers (or integral floats) or strings holding an integer. `date` must be
/// an RFC 3339 timestamp or an offset-less ISO-8601 date/date-time, which is
/// read as UTC.
pub fn validate_booking(payload: &Value) -> Result<ValidatedBooking, AppointmentError> {
    let data = match payload.get("data") {
        Some(inner @ Value::Object(_)) => inner,
        _ => payload,
    };

    let fields = data
        .as_object()
        .ok_or_else(|| invalid("request body must be a JSON object"))?;

    Ok(ValidatedBooking {
        provider_id: parse_id(fields, "provider_id")?,
        user_id: parse_id(fields, "user_id")?,
        date: parse_date(fields)?,
    })
}

/// Truncates a timestamp to the top of its hour.
pub fn start_of_hour(date: DateTime<Utc>) -> Result<DateTime<Utc>, AppointmentError> {
    date.with_minute(0)
        .and_then(|d| d.with_second(0))
        .and_then(|d| d.with_nanosecond(0))
        .ok_or_else(|| invalid("date cannot be truncated to the hour"))
}

fn parse_id(fields: &Map<String, Value>, field: &str) -> Result<i64, AppointmentError> {
    match fields.get(field) {
        None | Some(Value::Null) => Err(invalid(format!("{} is required", field))),
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| {
                number
                    .as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                    .map(|f| f as i64)
            })
            .ok_or_else(|| invalid(format!("{} must be an integer", field))),
        Some(Value::String(raw)) => raw
            .trim()
            .parse::<i64>()
            .map_err(|_| invalid(format!("{} must be an integer", field))),
        Some(_) => Err(invalid(format!("{} must be an integer", field))),
    }
}

fn parse_date(fields: &Map<String, Value>) -> Result<DateTime<Utc>, AppointmentError> {
    let raw = match fields.get("date") {
        None | Some(Value::Null) => return Err(invalid("date is required")),
        Some(Value::String(raw)) => raw.trim(),
        Some(_) => return Err(invalid("date must be an ISO-8601 string")),
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = raw.parse::<NaiveDateTime>() {
        return Ok(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
        return Ok(naive.and_utc());
    }
    if let Some(midnight) = raw.parse::<NaiveDate>().ok().and_then(|d| d.and_hms_opt(0, 0, 0)) {
        return Ok(midnight.and_utc());
    }

    Err(invalid(format!("'{}' is not a valid ISO-8601 date", raw)))
}

fn invalid(reason: impl Into<String>) -> AppointmentError {
    AppointmentError::ValidationError(reason.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_accepts_data_envelope_and_bare_object() {
        let expected = ValidatedBooking {
            provider_id: 1,
            user_id: 2,
            date: Utc.with_ymd_and_hms(2030, 1, 1, 10, 37, 0).unwrap(),
        };
        let body = json!({"provider_id": 1, "user_id": 2, "date": "2030-01-01T10:37:00Z"});

        assert_eq!(validate_booking(&json!({ "data": body.clone() })).unwrap(), expected);
        assert_eq!(validate_booking(&body).unwrap(), expected);
    }

    #[test]
    fn test_numeric_strings_and_integral_floats_are_coerced() {
        let booking = validate_booking(&json!({
            "provider_id": "15",
            "user_id": 3.0,
            "date": "2030-01-01T10:00:00"
        }))
        .unwrap();

        assert_eq!(booking.provider_id, 15);
        assert_eq!(booking.user_id, 3);
        assert_eq!(booking.date, Utc.with_ymd_and_hms(2030, 1, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_offsets_are_converted_to_utc() {
        let booking = validate_booking(&json!({
            "provider_id": 1,
            "user_id": 2,
            "date": "2030-01-01T10:15:00-03:00"
        }))
        .unwrap();

        assert_eq!(booking.date, Utc.with_ymd_and_hms(2030, 1, 1, 13, 15, 0).unwrap());
    }

    #[test]
    fn test_missing_or_malformed_fields_are_rejected() {
        let cases = [
            json!({"user_id": 2, "date": "2030-01-01T10:00:00Z"}),
            json!({"provider_id": null, "user_id": 2, "date": "2030-01-01T10:00:00Z"}),
            json!({"provider_id": 1.5, "user_id": 2, "date": "2030-01-01T10:00:00Z"}),
            json!({"provider_id": "abc", "user_id": 2, "date": "2030-01-01T10:00:00Z"}),
            json!({"provider_id": true, "user_id": 2, "date": "2030-01-01T10:00:00Z"}),
            json!({"provider_id": 1, "date": "2030-01-01T10:00:00Z"}),
            json!({"provider_id": 1, "user_id": 2}),
            json!({"provider_id": 1, "user_id": 2, "date": "tomorrow"}),
            json!({"provider_id": 1, "user_id": 2, "date": 1893492000}),
            json!([1, 2, 3]),
        ];

        for case in cases {
            assert_matches!(
                validate_booking(&case),
                Err(AppointmentError::ValidationError(_)),
                "expected rejection for {}",
                case
            );
        }
    }

    #[test]
    fn test_start_of_hour_truncates_minutes_and_seconds() {
        let date = Utc.with_ymd_and_hms(2030, 1, 1, 10, 37, 12).unwrap()
            + chrono::Duration::milliseconds(250);
        assert_eq!(
            start_of_hour(date).unwrap(),
            Utc.with_ymd_and_hms(2030, 1, 1, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_half_hour_offsets_truncate_on_the_utc_hour() {
        let booking = validate_booking(&json!({
            "provider_id": 1,
            "user_id": 2,
            "date": "2030-01-01T10:15:00+05:30"
        }))
        .unwrap();

        // 04:45Z, so the 04:00Z slot rather than 10:00 local
        assert_eq!(
            start_of_hour(booking.date).unwrap(),
            Utc.with_ymd_and_hms(2030, 1, 1, 4, 0, 0).unwrap()
        );
    }
}
