use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeDelta, Utc};

use crate::impls::opaque::impl_reflect_opaque;

impl_reflect_opaque!(
    DateTime<Utc> => "chrono::DateTime<chrono::Utc>",
    "DateTime<Utc>",
    "DateTime",
    Some("chrono")
);
impl_reflect_opaque!(
    DateTime<FixedOffset> => "chrono::DateTime<chrono::FixedOffset>",
    "DateTime<FixedOffset>",
    "DateTime",
    Some("chrono")
);
impl_reflect_opaque!(NaiveDate => "chrono::NaiveDate", "NaiveDate", Some("chrono"));
impl_reflect_opaque!(NaiveTime => "chrono::NaiveTime", "NaiveTime", Some("chrono"));
impl_reflect_opaque!(TimeDelta => "chrono::TimeDelta", "TimeDelta", Some("chrono"));

#[cfg(test)]
mod tests {
    use chrono::{DateTime, FixedOffset, Utc};

    use crate::info::TypePath;

    #[test]
    fn offsets_are_distinct_types() {
        assert_ne!(
            <DateTime<Utc>>::type_path(),
            <DateTime<FixedOffset>>::type_path()
        );
        assert_eq!(<DateTime<Utc>>::type_ident(), "DateTime");
    }
}
