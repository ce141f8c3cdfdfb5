use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sql_middleware::middleware::RowValues;

/// A row field that can be handed to the store as a bind parameter.
pub trait Bind {
    fn bind(&self) -> RowValues;
}

impl Bind for i64 {
    fn bind(&self) -> RowValues {
        RowValues::Int(*self)
    }
}

impl Bind for bool {
    fn bind(&self) -> RowValues {
        RowValues::Bool(*self)
    }
}

impl Bind for str {
    fn bind(&self) -> RowValues {
        RowValues::Text(self.to_string())
    }
}

impl Bind for String {
    fn bind(&self) -> RowValues {
        RowValues::Text(self.clone())
    }
}

impl Bind for NaiveDateTime {
    fn bind(&self) -> RowValues {
        RowValues::Timestamp(*self)
    }
}

// stored as midnight; postgres columns for calendar dates are TIMESTAMP
impl Bind for NaiveDate {
    fn bind(&self) -> RowValues {
        RowValues::Timestamp(self.and_time(NaiveTime::MIN))
    }
}

impl<T: Bind> Bind for Option<T> {
    fn bind(&self) -> RowValues {
        self.as_ref().map_or(RowValues::Null, Bind::bind)
    }
}

impl<T: Bind + ?Sized> Bind for &T {
    fn bind(&self) -> RowValues {
        (**self).bind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_bind_null() {
        assert!(matches!(None::<i64>.bind(), RowValues::Null));
        assert!(matches!(Some(7_i64).bind(), RowValues::Int(7)));
        assert!(matches!(Some("MAD".to_string()).bind(), RowValues::Text(ref s) if s == "MAD"));
    }

    #[test]
    fn dates_bind_as_midnight() {
        let date = NaiveDate::from_ymd_opt(2023, 10, 5).expect("valid date");
        let RowValues::Timestamp(ts) = date.bind() else {
            panic!("date should bind as a timestamp");
        };
        assert_eq!(ts.to_string(), "2023-10-05 00:00:00");
    }
}
