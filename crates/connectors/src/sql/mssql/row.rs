use crate::sql::base::error::DbError;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use model::{core::value::Value, records::row::RowData};
use tiberius::{ColumnData, FromSql, Row};

/// Converts a driver row into positional values, preserving column order.
pub fn to_row_data(row: Row) -> Result<RowData, DbError> {
    let values = row
        .into_iter()
        .map(column_value)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RowData::new(values))
}

pub fn column_value(data: ColumnData<'static>) -> Result<Value, DbError> {
    let value = match data {
        ColumnData::U8(v) => v.map(|v| Value::Int(v as i64)),
        ColumnData::I16(v) => v.map(|v| Value::Int(v as i64)),
        ColumnData::I32(v) => v.map(|v| Value::Int(v as i64)),
        ColumnData::I64(v) => v.map(Value::Int),
        ColumnData::F32(v) => v.map(|v| Value::Float(v as f64)),
        ColumnData::F64(v) => v.map(Value::Float),
        ColumnData::Bit(v) => v.map(Value::Boolean),
        ColumnData::String(v) => v.map(|s| Value::String(s.into_owned())),
        ColumnData::Guid(v) => v.map(Value::Uuid),
        ColumnData::Binary(v) => v.map(|b| Value::Bytes(b.into_owned())),
        ColumnData::Numeric(v) => v.map(|n| Value::Decimal {
            value: n.value(),
            scale: n.scale(),
        }),
        ColumnData::Xml(v) => v.map(|x| Value::String(x.into_owned().into_string())),
        ref ts @ (ColumnData::DateTime(_)
        | ColumnData::SmallDateTime(_)
        | ColumnData::DateTime2(_)) => NaiveDateTime::from_sql(ts)?.map(Value::Timestamp),
        ref d @ ColumnData::Date(_) => NaiveDate::from_sql(d)?.map(Value::Date),
        ref t @ ColumnData::Time(_) => NaiveTime::from_sql(t)?.map(Value::Time),
        ref ts @ ColumnData::DateTimeOffset(_) => {
            DateTime::<FixedOffset>::from_sql(ts)?.map(Value::TimestampTz)
        }
    };

    Ok(value.unwrap_or(Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use tiberius::{IntoSql, numeric::Numeric};

    #[test]
    fn integers_widen_to_i64() {
        assert_eq!(column_value(ColumnData::U8(Some(7))).unwrap(), Value::Int(7));
        assert_eq!(column_value(ColumnData::I16(Some(-3))).unwrap(), Value::Int(-3));
        assert_eq!(column_value(ColumnData::I32(Some(42))).unwrap(), Value::Int(42));
    }

    #[test]
    fn typed_nulls_become_null() {
        assert_eq!(column_value(ColumnData::I32(None)).unwrap(), Value::Null);
        assert_eq!(column_value(ColumnData::String(None)).unwrap(), Value::Null);
    }

    #[test]
    fn numeric_keeps_scale() {
        let n = Numeric::new_with_scale(12345, 2);
        assert_eq!(
            column_value(ColumnData::Numeric(Some(n))).unwrap(),
            Value::Decimal {
                value: 12345,
                scale: 2
            }
        );
    }

    #[test]
    fn strings_are_owned() {
        let data = ColumnData::String(Some(Cow::Owned("widget".to_string())));
        assert_eq!(column_value(data).unwrap(), Value::String("widget".into()));
    }

    #[test]
    fn chrono_types_round_trip() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(column_value(date.into_sql()).unwrap(), Value::Date(date));

        let ts = date.and_hms_opt(12, 30, 0).unwrap();
        assert_eq!(column_value(ts.into_sql()).unwrap(), Value::Timestamp(ts));
    }
}
