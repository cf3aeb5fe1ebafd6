//! Scoring and lifecycle rules for posts.
//!
//! Everything here is pure: callers hand in records and a clock reading and
//! get values back. Deleting expired rows, mailing digests, and any other
//! side effect stays with the caller.

use std::cmp::Ordering;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone};
use chrono_tz::Tz;

use crate::models::post::Post;

/// Horizontal asymptotes of the capacity curve. A 10,000-person event and a
/// 500-person event should not differ 20x in influence, so capacity is
/// squashed through a logistic centered where a "big" campus event sits.
const PEOPLE_MAX: f64 = 10_000.0;
const PEOPLE_MIDPOINT: f64 = 190.0;
const PEOPLE_SLOPE: f64 = 70.0;

/// Duration curve: 719 minutes is one minute short of twelve hours, the
/// longest window the 12-hour entry form can describe within a day.
const DURATION_MAX: f64 = 719.0;
const DURATION_MIDPOINT: f64 = 230.0;
const DURATION_SLOPE: f64 = 100.0;

const CURVE_FLOOR: f64 = 1.0;

/// Importance score in `[0, 1]` blending how many people an event feeds
/// with how long it runs, weighted equally.
///
/// Both inputs pass through a logistic so outliers level off while larger
/// and longer events still score monotonically higher. The score is
/// computed once at creation and persisted with the post.
pub fn rank(people_fed: i32, duration_minutes: i32) -> f64 {
    // Validation rejects these before a post is ever built; hitting them
    // here is a programming error, not bad user input.
    debug_assert!(people_fed > 0, "rank() called with non-positive capacity");
    debug_assert!(duration_minutes >= 0, "rank() called with negative duration");

    let norm_people = logistic(people_fed as f64, PEOPLE_MAX, PEOPLE_MIDPOINT, PEOPLE_SLOPE);
    let norm_duration = logistic(
        duration_minutes as f64,
        DURATION_MAX,
        DURATION_MIDPOINT,
        DURATION_SLOPE,
    );

    let people_score = (norm_people - CURVE_FLOOR) / (PEOPLE_MAX - CURVE_FLOOR);
    let duration_score = (norm_duration - CURVE_FLOOR) / (DURATION_MAX - CURVE_FLOOR);

    0.5 * people_score + 0.5 * duration_score
}

fn logistic(x: f64, max: f64, midpoint: f64, slope: f64) -> f64 {
    (max - CURVE_FLOOR) / (1.0 + (-(x - midpoint) / slope).exp()) + CURVE_FLOOR
}

/// Where a post sits relative to "now" in the reference time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostStatus {
    /// End time has passed; the caller must delete the record.
    Expired,
    /// Dated today; eligible for the feed and the digest.
    ActiveToday,
    /// Dated in the future; stored but not surfaced yet.
    Upcoming,
}

/// Classify a post against the current time.
///
/// A stored date that does not exist on the calendar (day 31 slips through
/// the per-field range checks in a 30-day month) classifies as expired so
/// the next read pass collects it.
pub fn classify(post: &Post, now: DateTime<Tz>) -> PostStatus {
    let Some(end) = local_end(post, now.timezone()) else {
        return PostStatus::Expired;
    };

    if end < now {
        PostStatus::Expired
    } else if post.year == now.year()
        && post.month == now.month0() as i32
        && post.day == now.day() as i32
    {
        PostStatus::ActiveToday
    } else {
        PostStatus::Upcoming
    }
}

/// The post's end timestamp in the reference zone. `None` when the stored
/// fields name a nonexistent date, or a local time skipped by a DST gap.
fn local_end(post: &Post, tz: Tz) -> Option<DateTime<Tz>> {
    let date = NaiveDate::from_ymd_opt(post.year, post.month as u32 + 1, post.day as u32)?;
    let naive = date.and_hms_opt(post.end_hour as u32, post.end_minute as u32, 0)?;
    tz.from_local_datetime(&naive).earliest()
}

/// Top `k` posts by descending rank. The sort is stable, so posts with
/// equal rank keep their input order.
pub fn top_ranked(mut posts: Vec<Post>, k: usize) -> Vec<Post> {
    posts.sort_by(|a, b| b.rank.partial_cmp(&a.rank).unwrap_or(Ordering::Equal));
    posts.truncate(k);
    posts
}
