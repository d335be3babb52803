use chrono::{Duration, NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Errors raised while converting raw cell text into typed values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("Invalid value type '{0}'")]
    TypeError(String),

    #[error("Cannot parse '{value}' as {kind}")]
    ParseError { value: String, kind: &'static str },

    #[error("Field '{0}' is not populated")]
    MissingField(String),

    #[error("Field '{0}' holds a map, not text")]
    NotText(String),
}

/// Supported target types for cell text.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Boolean,
    BigInt,
    Double,
    Varchar,
    Date,
    Timestamp,
}

/// A typed cell value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Boolean(bool),
    BigInt(i64),
    Double(f64),
    Varchar(String),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
}

impl ValueKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::BigInt => "bigint",
            Self::Double => "double",
            Self::Varchar => "varchar",
            Self::Date => "date",
            Self::Timestamp => "timestamp",
        }
    }

    /// Parses a type name; supports various aliases for each type.
    pub fn parse(name: &str) -> Result<Self, ConversionError> {
        match name.trim().to_ascii_uppercase().as_str() {
            "BOOL" | "BOOLEAN" => Ok(Self::Boolean),
            "INT" | "BIGINT" | "INTEGER" => Ok(Self::BigInt),
            "FLOAT" | "DOUBLE" | "DECIMAL" | "NUMERIC" => Ok(Self::Double),
            "TEXT" | "STRING" | "VARCHAR" => Ok(Self::Varchar),
            "DATE" => Ok(Self::Date),
            "DATETIME" | "TIMESTAMP" => Ok(Self::Timestamp),
            _ => Err(ConversionError::TypeError(name.to_owned())),
        }
    }

    /// Converts trimmed cell text into a value of this kind.
    pub fn convert(&self, text: &str) -> Result<Value, ConversionError> {
        let text = text.trim();
        match self {
            Self::Boolean => to_boolean(text).map(Value::Boolean),
            Self::BigInt => to_bigint(text).map(Value::BigInt),
            Self::Double => to_double(text).map(Value::Double),
            Self::Varchar => Ok(Value::Varchar(text.to_owned())),
            Self::Date => to_date(text).map(Value::Date),
            Self::Timestamp => to_timestamp(text).map(Value::Timestamp),
        }
    }

    fn error(&self, value: &str) -> ConversionError {
        ConversionError::ParseError {
            value: value.to_owned(),
            kind: self.as_str(),
        }
    }
}

fn to_boolean(text: &str) -> Result<bool, ConversionError> {
    match text.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Ok(true),
        "0" | "false" | "no" | "n" => Ok(false),
        _ => Err(ValueKind::Boolean.error(text)),
    }
}

/// Parses only the leading integer part, so "12.0" and "12 pcs" both read as 12.
fn to_bigint(text: &str) -> Result<i64, ConversionError> {
    let mut integer = text;
    for (index, char) in text.char_indices() {
        if !char.is_ascii_digit() && !(index == 0 && char == '-') {
            integer = &text[..index];
            break;
        }
    }
    integer.parse::<i64>().map_err(|_| ValueKind::BigInt.error(text))
}

fn to_double(text: &str) -> Result<f64, ConversionError> {
    text.parse::<f64>().map_err(|_| ValueKind::Double.error(text))
}

/// Serial day numbers use the 1900 epoch, including the Lotus 1-2-3 leap year bug.
fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 || serial > 2_958_465.0 {
        return None; // beyond 9999-12-31
    }
    let days = serial.trunc() as i64;
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let offset = Duration::try_days(days + if days < 60 { 1 } else { 0 })?
        + Duration::microseconds((serial.fract() * 86_400_000_000f64).round() as i64);
    epoch.checked_add_signed(offset)
}

fn to_date(text: &str) -> Result<NaiveDate, ConversionError> {
    if let Ok(serial) = text.parse::<f64>() {
        return serial_to_datetime(serial)
            .map(|datetime| datetime.date())
            .ok_or_else(|| ValueKind::Date.error(text));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(text, "%Y/%m/%d"))
        .map_err(|_| ValueKind::Date.error(text))
}

fn to_timestamp(text: &str) -> Result<NaiveDateTime, ConversionError> {
    if let Ok(serial) = text.parse::<f64>() {
        return serial_to_datetime(serial).ok_or_else(|| ValueKind::Timestamp.error(text));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f"))
        .or_else(|_| to_date(text).map(|date| date.and_time(chrono::NaiveTime::MIN)))
        .map_err(|_| ValueKind::Timestamp.error(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_aliases() {
        assert_eq!(ValueKind::parse("int"), Ok(ValueKind::BigInt));
        assert_eq!(ValueKind::parse("Float"), Ok(ValueKind::Double));
        assert_eq!(ValueKind::parse("text"), Ok(ValueKind::Varchar));
        assert_eq!(ValueKind::parse("datetime"), Ok(ValueKind::Timestamp));
        assert_eq!(ValueKind::parse("blob"), Err(ConversionError::TypeError("blob".to_owned())));
    }

    #[test]
    fn numeric_conversion() {
        assert_eq!(ValueKind::BigInt.convert(" 42 "), Ok(Value::BigInt(42)));
        assert_eq!(ValueKind::BigInt.convert("12.0"), Ok(Value::BigInt(12)));
        assert_eq!(ValueKind::BigInt.convert("-7"), Ok(Value::BigInt(-7)));
        assert!(ValueKind::BigInt.convert("abc").is_err());
        assert_eq!(ValueKind::Double.convert("2.5"), Ok(Value::Double(2.5)));
        assert_eq!(ValueKind::Boolean.convert("Yes"), Ok(Value::Boolean(true)));
        assert_eq!(
            ValueKind::Boolean.convert("maybe"),
            Err(ConversionError::ParseError { value: "maybe".to_owned(), kind: "boolean" })
        );
    }

    #[test]
    fn date_conversion() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(ValueKind::Date.convert("2024-01-02"), Ok(Value::Date(date)));
        assert_eq!(ValueKind::Date.convert("45293"), Ok(Value::Date(date)));
        assert_eq!(
            ValueKind::Date.convert("1"),
            Ok(Value::Date(NaiveDate::from_ymd_opt(1900, 1, 1).unwrap()))
        );
        assert_eq!(
            ValueKind::Timestamp.convert("45293.5"),
            Ok(Value::Timestamp(date.and_hms_opt(12, 0, 0).unwrap()))
        );
        assert_eq!(
            ValueKind::Timestamp.convert("2024-01-02T08:30:00"),
            Ok(Value::Timestamp(date.and_hms_opt(8, 30, 0).unwrap()))
        );
        assert!(ValueKind::Date.convert("Jan 2nd").is_err());
    }
}
