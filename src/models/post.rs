use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::ranking;
use crate::utils::error::AppError;
use crate::utils::patterns;

const ORGANIZATION_MAX_LEN: usize = 75;
const LOCATION_MAX_LEN: usize = 100;
const FOOD_TYPE_MAX_LEN: usize = 25;
const DESCRIPTION_MAX_LEN: usize = 500;
const DESCRIPTION_MIN_LEN: usize = 15;
const IMAGE_URL_MAX_LEN: usize = 500;

/// A stored free-food announcement. Immutable once created; rows are only
/// read and eventually deleted when the event's end time passes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub college_id: String,
    pub organization_name: String,
    /// Zero-indexed calendar month, 0..=11.
    pub month: i32,
    pub day: i32,
    pub year: i32,
    pub start_hour: i32,
    pub start_minute: i32,
    pub end_hour: i32,
    pub end_minute: i32,
    pub location: String,
    pub lat: f64,
    pub lng: f64,
    pub people_fed: i32,
    pub type_of_food: String,
    pub description: String,
    /// Start time in minutes from midnight; the feed sorts on this.
    pub time_sort: i32,
    pub rank: f64,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn duration_minutes(&self) -> i32 {
        (self.end_hour * 60 + self.end_minute) - (self.start_hour * 60 + self.start_minute)
    }

    pub fn date_label(&self) -> String {
        const MONTHS: [&str; 12] = [
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ];
        let month = MONTHS.get(self.month as usize).copied().unwrap_or("Unknown");
        format!("{month} {}", self.day)
    }

    pub fn start_label(&self) -> String {
        clock_12h(self.start_hour, self.start_minute)
    }

    pub fn end_label(&self) -> String {
        clock_12h(self.end_hour, self.end_minute)
    }
}

fn clock_12h(hour: i32, minute: i32) -> String {
    let meridiem = if hour < 12 { "am" } else { "pm" };
    let hour_12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{hour_12}:{minute:02} {meridiem}")
}

/// An untrusted create-post submission. Numeric fields arrive as strings,
/// exactly as the entry form sends them, and nothing is parsed until the
/// raw value has passed its pattern check.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPostRequest {
    pub organization_name: String,
    /// Calendar month, 1..=12 on the wire; stored zero-indexed.
    pub month: String,
    pub day: String,
    /// 12-hour clock fields, paired with an am/pm indicator.
    pub start_hour: String,
    pub start_minute: String,
    pub start_am_or_pm: String,
    pub end_hour: String,
    pub end_minute: String,
    pub end_am_or_pm: String,
    pub location: String,
    pub lat: String,
    pub lng: String,
    pub people_fed: String,
    pub type_of_food: String,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl NewPostRequest {
    /// Validate every field, then build the stored record: convert times to
    /// the 24-hour clock, stamp the year from `now` in the reference zone,
    /// and compute the persisted rank. A submission that fails any check
    /// never reaches rank computation or storage.
    pub fn validate(self, college_id: &str, now: DateTime<Tz>) -> Result<Post, AppError> {
        super::validate_college_id(college_id)?;
        validate_text("organizationName", &self.organization_name, ORGANIZATION_MAX_LEN)?;
        validate_text("location", &self.location, LOCATION_MAX_LEN)?;
        validate_text("typeOfFood", &self.type_of_food, FOOD_TYPE_MAX_LEN)?;
        validate_text("description", &self.description, DESCRIPTION_MAX_LEN)?;
        if self.description.len() < DESCRIPTION_MIN_LEN {
            return Err(AppError::Validation(format!(
                "description must be at least {DESCRIPTION_MIN_LEN} characters"
            )));
        }

        let month = parse_unsigned("month", &self.month)? - 1;
        let day = parse_unsigned("day", &self.day)?;
        let start_minute = parse_unsigned("startMinute", &self.start_minute)?;
        let end_minute = parse_unsigned("endMinute", &self.end_minute)?;
        let people_fed = parse_unsigned("peopleFed", &self.people_fed)?;
        let lat = parse_decimal("lat", &self.lat)?;
        let lng = parse_decimal("lng", &self.lng)?;

        let start_hour = to_24_hour(
            parse_unsigned("startHour", &self.start_hour)?,
            parse_meridiem("startAmOrPm", &self.start_am_or_pm)?,
        );
        let end_hour = to_24_hour(
            parse_unsigned("endHour", &self.end_hour)?,
            parse_meridiem("endAmOrPm", &self.end_am_or_pm)?,
        );

        if !(0..=11).contains(&month) {
            return Err(AppError::Validation("month must be between 1 and 12".into()));
        }
        if !(1..=31).contains(&day) {
            return Err(AppError::Validation("day must be between 1 and 31".into()));
        }
        for (field, minute) in [("startMinute", start_minute), ("endMinute", end_minute)] {
            if !(0..=59).contains(&minute) {
                return Err(AppError::Validation(format!("{field} must be between 0 and 59")));
            }
        }
        if people_fed <= 0 {
            return Err(AppError::Validation("peopleFed must feed at least one person".into()));
        }
        if (start_hour, start_minute) > (end_hour, end_minute) {
            return Err(AppError::Validation("the event must start before it ends".into()));
        }

        let image_url = self
            .image_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
        if let Some(url) = &image_url {
            if url.len() > IMAGE_URL_MAX_LEN {
                return Err(AppError::Validation(format!(
                    "imageUrl must be at most {IMAGE_URL_MAX_LEN} characters"
                )));
            }
        }

        let mut post = Post {
            id: Uuid::new_v4(),
            college_id: college_id.to_string(),
            organization_name: self.organization_name,
            month,
            day,
            year: now.year(),
            start_hour,
            start_minute,
            end_hour,
            end_minute,
            location: self.location,
            lat,
            lng,
            people_fed,
            type_of_food: self.type_of_food,
            description: self.description,
            time_sort: start_hour * 60 + start_minute,
            rank: 0.0,
            image_url,
            created_at: Utc::now(),
        };
        post.rank = ranking::rank(post.people_fed, post.duration_minutes());
        Ok(post)
    }
}

fn validate_text(field: &str, value: &str, max_len: usize) -> Result<(), AppError> {
    if !patterns::TEXT.is_match(value) {
        return Err(AppError::Validation(format!(
            "{field} contains unsupported characters or is empty"
        )));
    }
    if value.len() > max_len {
        return Err(AppError::Validation(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(())
}

fn parse_unsigned(field: &str, raw: &str) -> Result<i32, AppError> {
    if !patterns::POSITIVE_INTEGER.is_match(raw) {
        return Err(AppError::Validation(format!("{field} must be a non-negative number")));
    }
    raw.parse()
        .map_err(|_| AppError::Validation(format!("{field} is out of range")))
}

fn parse_decimal(field: &str, raw: &str) -> Result<f64, AppError> {
    if !patterns::DECIMAL.is_match(raw) {
        return Err(AppError::Validation(format!("{field} must be a decimal number")));
    }
    raw.parse()
        .map_err(|_| AppError::Validation(format!("{field} is out of range")))
}

fn parse_meridiem(field: &str, raw: &str) -> Result<bool, AppError> {
    match raw.to_ascii_lowercase().as_str() {
        "am" => Ok(false),
        "pm" => Ok(true),
        _ => Err(AppError::Validation(format!("{field} must be 'am' or 'pm'"))),
    }
}

/// 12-hour clock to 24-hour: noon and midnight both arrive as 12, so the
/// hour is reduced modulo 12 before the pm offset is applied.
fn to_24_hour(hour: i32, is_pm: bool) -> i32 {
    let hour = hour % 12;
    if is_pm {
        hour + 12
    } else {
        hour
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::America::Los_Angeles;
    use chrono_tz::Tz;

    fn reference_now() -> DateTime<Tz> {
        Los_Angeles.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap()
    }

    fn request() -> NewPostRequest {
        NewPostRequest {
            organization_name: "Bread Club".to_string(),
            month: "3".to_string(),
            day: "15".to_string(),
            start_hour: "4".to_string(),
            start_minute: "30".to_string(),
            start_am_or_pm: "pm".to_string(),
            end_hour: "9".to_string(),
            end_minute: "30".to_string(),
            end_am_or_pm: "pm".to_string(),
            location: "Benson Memorial Center".to_string(),
            lat: "37.3476132".to_string(),
            lng: "-121.9394005".to_string(),
            people_fed: "100".to_string(),
            type_of_food: "Bread".to_string(),
            description: "Bread Club is officially giving away free bread!".to_string(),
            image_url: None,
        }
    }

    #[test]
    fn builds_a_post_from_a_valid_submission() {
        let post = request().validate("122931", reference_now()).unwrap();
        assert_eq!(post.college_id, "122931");
        assert_eq!(post.organization_name, "Bread Club");
        assert_eq!(post.month, 2); // stored zero-indexed
        assert_eq!(post.day, 15);
        assert_eq!(post.year, 2024); // stamped from the reference clock
        assert_eq!(post.start_hour, 16);
        assert_eq!(post.end_hour, 21);
        assert_eq!(post.time_sort, 16 * 60 + 30);
        assert_eq!(post.people_fed, 100);
        assert!((0.0..=1.0).contains(&post.rank));
    }

    #[test]
    fn afternoon_hours_get_the_pm_offset() {
        let mut req = request();
        req.start_hour = "11".to_string();
        req.start_am_or_pm = "am".to_string();
        req.end_hour = "1".to_string();
        req.end_am_or_pm = "pm".to_string();
        let post = req.validate("122931", reference_now()).unwrap();
        assert_eq!(post.start_hour, 11);
        assert_eq!(post.end_hour, 13);
    }

    #[test]
    fn twelve_am_is_midnight_and_twelve_pm_is_noon() {
        let mut req = request();
        req.start_hour = "12".to_string();
        req.start_minute = "10".to_string();
        req.start_am_or_pm = "am".to_string();
        req.end_hour = "12".to_string();
        req.end_minute = "30".to_string();
        req.end_am_or_pm = "pm".to_string();
        let post = req.validate("122931", reference_now()).unwrap();
        assert_eq!((post.start_hour, post.start_minute), (0, 10));
        assert_eq!((post.end_hour, post.end_minute), (12, 30));
    }

    #[test]
    fn duration_spans_one_minute_and_twelve_hours() {
        let mut one_minute = request();
        one_minute.start_hour = "4".to_string();
        one_minute.start_am_or_pm = "am".to_string();
        one_minute.end_hour = "4".to_string();
        one_minute.end_minute = "31".to_string();
        one_minute.end_am_or_pm = "am".to_string();
        let post = one_minute.validate("122931", reference_now()).unwrap();
        assert_eq!(post.duration_minutes(), 1);

        let mut half_day = request();
        half_day.start_hour = "4".to_string();
        half_day.start_am_or_pm = "am".to_string();
        half_day.end_hour = "4".to_string();
        half_day.end_am_or_pm = "pm".to_string();
        let post = half_day.validate("122931", reference_now()).unwrap();
        assert_eq!(post.duration_minutes(), 720);
    }

    #[test]
    fn rejects_negative_capacity() {
        let mut req = request();
        req.people_fed = "-3".to_string();
        assert!(req.validate("122931", reference_now()).is_err());
    }

    #[test]
    fn rejects_zero_capacity() {
        let mut req = request();
        req.people_fed = "0".to_string();
        assert!(req.validate("122931", reference_now()).is_err());
    }

    #[test]
    fn rejects_non_numeric_day() {
        let mut req = request();
        req.day = "tuesday".to_string();
        assert!(req.validate("122931", reference_now()).is_err());
    }

    #[test]
    fn rejects_out_of_range_month() {
        let mut req = request();
        req.month = "13".to_string();
        assert!(req.validate("122931", reference_now()).is_err());

        let mut req = request();
        req.month = "0".to_string();
        assert!(req.validate("122931", reference_now()).is_err());
    }

    #[test]
    fn rejects_start_after_end() {
        let mut req = request();
        req.start_hour = "9".to_string();
        req.start_am_or_pm = "pm".to_string();
        req.end_hour = "4".to_string();
        req.end_am_or_pm = "pm".to_string();
        assert!(req.validate("122931", reference_now()).is_err());
    }

    #[test]
    fn rejects_markup_in_text_fields() {
        let mut req = request();
        req.organization_name = "<b>Bread Club</b>".to_string();
        assert!(req.validate("122931", reference_now()).is_err());
    }

    #[test]
    fn rejects_short_description() {
        let mut req = request();
        req.description = "free food".to_string();
        assert!(req.validate("122931", reference_now()).is_err());
    }

    #[test]
    fn rejects_overlong_organization_name() {
        let mut req = request();
        req.organization_name = "a".repeat(76);
        assert!(req.validate("122931", reference_now()).is_err());
    }

    #[test]
    fn rejects_bad_college_id() {
        assert!(request().validate("not a college", reference_now()).is_err());
    }

    #[test]
    fn clock_labels_render_in_12_hour_form() {
        let post = request().validate("122931", reference_now()).unwrap();
        assert_eq!(post.start_label(), "4:30 pm");
        assert_eq!(post.end_label(), "9:30 pm");
        assert_eq!(post.date_label(), "March 15");

        assert_eq!(super::clock_12h(0, 5), "12:05 am");
        assert_eq!(super::clock_12h(12, 0), "12:00 pm");
        assert_eq!(super::clock_12h(23, 59), "11:59 pm");
    }
}
