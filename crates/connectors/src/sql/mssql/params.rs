use model::core::value::Value;
use tiberius::{Query, numeric::Numeric};

/// Binds values in placeholder order. Values are passed through unchanged.
///
/// NULLs never reach this function: the INSERT renderer writes them inline as
/// `NULL` literals, so they have no placeholder.
pub fn bind_values<'a>(query: &mut Query<'a>, params: &'a [Value]) {
    for p in params {
        match p {
            Value::Int(i) => query.bind(*i),
            Value::Float(f) => query.bind(*f),
            Value::Decimal { value, scale } => query.bind(Numeric::new_with_scale(*value, *scale)),
            Value::String(s) => query.bind(s.as_str()),
            Value::Boolean(b) => query.bind(*b),
            Value::Uuid(u) => query.bind(*u),
            Value::Bytes(b) => query.bind(b.as_slice()),
            Value::Date(d) => query.bind(*d),
            Value::Time(t) => query.bind(*t),
            Value::Timestamp(ts) => query.bind(*ts),
            Value::TimestampTz(ts) => query.bind(*ts),
            Value::Null => unreachable!("NULL is rendered inline, never bound"),
        }
    }
}
