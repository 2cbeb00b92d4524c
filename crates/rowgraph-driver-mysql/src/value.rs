use mysql_async::prelude::ToValue;
use rowgraph_core::stmt::Value as CoreValue;

/// Bridges core values and MySQL values.
#[derive(Debug)]
pub(crate) struct Value<'a>(pub(crate) &'a CoreValue);

impl ToValue for Value<'_> {
    fn to_value(&self) -> mysql_async::Value {
        match self.0 {
            CoreValue::Null => mysql_async::Value::NULL,
            CoreValue::Bool(value) => value.to_value(),
            CoreValue::I64(value) => value.to_value(),
            CoreValue::F64(value) => value.to_value(),
            CoreValue::String(value) => value.to_value(),
        }
    }
}

/// Converts a value read through the binary protocol. Temporal values are
/// rendered the way MySQL prints them.
pub(crate) fn from_sql(value: mysql_async::Value) -> CoreValue {
    use mysql_async::Value::*;

    match value {
        NULL => CoreValue::Null,
        Bytes(bytes) => CoreValue::String(String::from_utf8_lossy(&bytes).into_owned()),
        Int(v) => CoreValue::I64(v),
        UInt(v) => match i64::try_from(v) {
            Ok(v) => CoreValue::I64(v),
            Err(_) => CoreValue::String(v.to_string()),
        },
        Float(v) => CoreValue::F64(v as f64),
        Double(v) => CoreValue::F64(v),
        Date(year, month, day, hour, minute, second, _micros) => CoreValue::String(format!(
            "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
        )),
        Time(negative, days, hours, minutes, seconds, _micros) => {
            let sign = if negative { "-" } else { "" };
            let hours = u32::from(hours) + days * 24;
            CoreValue::String(format!("{sign}{hours:02}:{minutes:02}:{seconds:02}"))
        }
    }
}
