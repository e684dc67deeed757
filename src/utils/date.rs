use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const YEAR: i64 = 365 * DAY;

pub fn format_date_to_human_readable(date: DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Relative age of a post as shown next to its author.
pub fn get_meta_data(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = (now - date).num_seconds().abs();
    if elapsed < MINUTE {
        format!("{elapsed} seconds ago")
    } else if elapsed < HOUR {
        format!("{} minutes ago", elapsed / MINUTE)
    } else if elapsed < DAY {
        format!("{} hours ago", elapsed / HOUR)
    } else if elapsed < YEAR {
        date.format("%b %d at %H:%M:%S").to_string()
    } else {
        date.format("%b %d, %Y at %H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn posted() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 9, 7, 3).unwrap()
    }

    #[rstest]
    fn human_readable_date_has_no_padding(posted: DateTime<Utc>) {
        assert_eq!(format_date_to_human_readable(posted), "March 5, 2024");
    }

    #[rstest]
    #[case(Duration::seconds(0), "0 seconds ago")]
    #[case(Duration::seconds(59), "59 seconds ago")]
    #[case(Duration::seconds(60), "1 minutes ago")]
    #[case(Duration::minutes(59) + Duration::seconds(59), "59 minutes ago")]
    #[case(Duration::hours(5), "5 hours ago")]
    #[case(Duration::days(2), "Mar 05 at 09:07:03")]
    #[case(Duration::days(400), "Mar 05, 2024 at 09:07:03")]
    fn meta_data_by_age(posted: DateTime<Utc>, #[case] age: Duration, #[case] expected: &str) {
        assert_eq!(get_meta_data(posted, posted + age), expected);
    }

    #[rstest]
    fn dates_slightly_in_the_future_read_as_recent(posted: DateTime<Utc>) {
        assert_eq!(
            get_meta_data(posted, posted - Duration::seconds(3)),
            "3 seconds ago"
        );
    }
}
