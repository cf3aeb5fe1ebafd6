//! HTML email bodies built by placeholder substitution. Text reaching this
//! module has already passed the input patterns, which exclude markup
//! characters, so values drop into the HTML as-is.

use crate::models::post::Post;

const WELCOME_HTML: &str = include_str!("../../templates/welcome.html");
const NEW_POST_HTML: &str = include_str!("../../templates/new_post.html");
const DAILY_DIGEST_HTML: &str = include_str!("../../templates/daily_digest.html");

const DIGEST_ROW_HTML: &str = "<h3>[organizationName] &mdash; [typeOfFood]</h3>\n\
    <p>[location], [startTime] &ndash; [endTime]. Feeds about [peopleFed] people.</p>\n\
    <p>[description]</p>\n";

pub fn welcome(name: &str) -> String {
    WELCOME_HTML.replace("[name]", name)
}

pub fn new_post(post: &Post) -> String {
    fill_post(NEW_POST_HTML, post)
}

/// Digest body for an already-ranked list; rows render in the order given.
pub fn daily_digest(posts: &[Post]) -> String {
    let rows: String = posts.iter().map(|post| fill_post(DIGEST_ROW_HTML, post)).collect();
    DAILY_DIGEST_HTML.replace("[rows]", &rows)
}

fn fill_post(template: &str, post: &Post) -> String {
    template
        .replace("[organizationName]", &post.organization_name)
        .replace("[typeOfFood]", &post.type_of_food)
        .replace("[location]", &post.location)
        .replace("[date]", &post.date_label())
        .replace("[startTime]", &post.start_label())
        .replace("[endTime]", &post.end_label())
        .replace("[peopleFed]", &post.people_fed.to_string())
        .replace("[description]", &post.description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn post(organization: &str, people_fed: i32) -> Post {
        Post {
            id: Uuid::new_v4(),
            college_id: "122931".to_string(),
            organization_name: organization.to_string(),
            month: 2,
            day: 15,
            year: 2024,
            start_hour: 16,
            start_minute: 30,
            end_hour: 21,
            end_minute: 30,
            location: "Benson Memorial Center".to_string(),
            lat: 37.3476132,
            lng: -121.9394005,
            people_fed,
            type_of_food: "Bread".to_string(),
            description: "Bread Club is officially giving away free bread!".to_string(),
            time_sort: 16 * 60 + 30,
            rank: 0.4,
            image_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn welcome_greets_by_name() {
        let html = welcome("Ada");
        assert!(html.contains("Welcome to noms, Ada!"));
        assert!(!html.contains("[name]"));
    }

    #[test]
    fn new_post_fills_every_placeholder() {
        let html = new_post(&post("Bread Club", 100));
        assert!(html.contains("Bread Club is sharing free food!"));
        assert!(html.contains("Benson Memorial Center"));
        assert!(html.contains("March 15"));
        assert!(html.contains("4:30 pm"));
        assert!(html.contains("9:30 pm"));
        assert!(html.contains("about 100 people"));
        assert!(!html.contains('['), "unfilled placeholder left in: {html}");
    }

    #[test]
    fn digest_lists_posts_in_the_order_given() {
        let html = daily_digest(&[post("Bigger Club", 400), post("Smaller Club", 20)]);
        let bigger = html.find("Bigger Club").unwrap();
        let smaller = html.find("Smaller Club").unwrap();
        assert!(bigger < smaller);
        assert!(!html.contains("[rows]"));
        assert!(!html.contains('['), "unfilled placeholder left in: {html}");
    }
}
