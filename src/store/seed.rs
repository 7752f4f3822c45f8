//! Demo content for the in-memory store
//!
//! Event dates are relative to `today` so the events page always has
//! upcoming entries, one past entry and one sold-out entry.

use super::{tables, Row};
use chrono::{Days, NaiveDate};
use serde_json::{json, Value};
use std::collections::HashMap;

fn rows(values: Vec<Value>) -> Vec<Row> {
    values
        .into_iter()
        .filter_map(|v| match v {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .collect()
}

fn timestamp(day: NaiveDate) -> String {
    format!("{}T09:00:00.000Z", day.format("%Y-%m-%d"))
}

fn shift(today: NaiveDate, days: i64) -> NaiveDate {
    let delta = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        today.checked_add_days(delta)
    } else {
        today.checked_sub_days(delta)
    };
    shifted.unwrap_or(today)
}

/// All demo tables keyed by table name
pub fn demo_tables(today: NaiveDate) -> HashMap<String, Vec<Row>> {
    let mut tables = HashMap::new();
    tables.insert(tables::BLOG_AUTHORS.to_string(), authors(today));
    tables.insert(tables::BLOG_TAGS.to_string(), tags(today));
    tables.insert(tables::BLOG_POSTS.to_string(), posts(today));
    tables.insert(tables::BLOG_POSTS_TAGS.to_string(), post_tags());
    tables.insert(tables::EVENTS.to_string(), events(today));
    tables.insert(tables::EVENT_REGISTRATIONS.to_string(), registrations(today));
    tables.insert(tables::TEAM_MEMBERS.to_string(), team_members(today));
    tables
}

fn authors(today: NaiveDate) -> Vec<Row> {
    let ts = timestamp(shift(today, -60));
    rows(vec![
        json!({
            "id": "author-sarah",
            "name": "Sarah Chen",
            "role": "Director of College Counseling",
            "avatar_url": "https://images.pexels.com/photos/3796217/pexels-photo-3796217.jpeg",
            "created_at": ts, "updated_at": ts
        }),
        json!({
            "id": "author-michael",
            "name": "Michael Thompson",
            "role": "Director of Test Prep",
            "avatar_url": null,
            "created_at": ts, "updated_at": ts
        }),
    ])
}

fn tags(today: NaiveDate) -> Vec<Row> {
    let ts = timestamp(shift(today, -60));
    rows(
        [
            ("tag-admissions", "College Admissions"),
            ("tag-essays", "Essays"),
            ("tag-ef", "Executive Functioning"),
            ("tag-sat", "SAT"),
            ("tag-act", "ACT"),
        ]
        .into_iter()
        .map(|(id, name)| json!({"id": id, "name": name, "created_at": ts, "updated_at": ts}))
        .collect(),
    )
}

fn posts(today: NaiveDate) -> Vec<Row> {
    rows(vec![
        json!({
            "id": "post-essay",
            "title": "Writing a College Essay That Stands Out",
            "preview": "Admissions officers read thousands of essays. Here is how to make yours memorable.",
            "content": "# Start with a story\n\nThe best essays open with a **specific moment** rather than a summary.\n\n## What to avoid\n\n- Restating your activities list\n- Writing what you think they *want* to hear\n\n## A simple process\n\n1. Brainstorm ten small moments\n2. Pick the one only you could write\n3. Revise out loud\n\nQuestions? [Contact us](/contact) for a free consultation.",
            "image_url": "https://images.pexels.com/photos/4144923/pexels-photo-4144923.jpeg",
            "author_id": "author-sarah",
            "created_at": timestamp(shift(today, -3)),
            "updated_at": timestamp(shift(today, -3))
        }),
        json!({
            "id": "post-sat-act",
            "title": "SAT vs ACT: Which Test Is Right for You?",
            "preview": "A side-by-side look at timing, content and scoring to help you choose.",
            "content": "# Two tests, one goal\n\nColleges accept **both** tests equally.\n\n### Timing\n\nThe ACT moves faster per question, the SAT gives more time to think.\n\n- Take a practice test of each\n- Compare percentiles, not raw scores",
            "image_url": "https://images.pexels.com/photos/6238050/pexels-photo-6238050.jpeg",
            "author_id": "author-michael",
            "created_at": timestamp(shift(today, -12)),
            "updated_at": timestamp(shift(today, -12))
        }),
        json!({
            "id": "post-planning",
            "title": "Five Habits for Managing a Heavy Course Load",
            "preview": "Executive functioning skills that help students stay ahead instead of catching up.",
            "content": "# Plan the week on Sunday\n\nA *weekly review* takes fifteen minutes and saves hours.\n\n- Keep one calendar\n- Break big assignments into dated steps\n- Protect sleep",
            "image_url": "",
            "author_id": "author-sarah",
            "created_at": timestamp(shift(today, -30)),
            "updated_at": timestamp(shift(today, -30))
        }),
    ])
}

fn post_tags() -> Vec<Row> {
    rows(
        [
            ("post-essay", "tag-admissions"),
            ("post-essay", "tag-essays"),
            ("post-sat-act", "tag-sat"),
            ("post-sat-act", "tag-act"),
            ("post-planning", "tag-ef"),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (post, tag))| {
            json!({"id": format!("link-{}", i + 1), "post_id": post, "tag_id": tag})
        })
        .collect(),
    )
}

fn events(today: NaiveDate) -> Vec<Row> {
    let ts = timestamp(shift(today, -20));
    let day = |offset: i64| shift(today, offset).format("%Y-%m-%d").to_string();
    rows(vec![
        json!({
            "id": "event-essay-workshop",
            "title": "College Essay Workshop",
            "description": "A hands-on session on brainstorming and drafting the personal statement.",
            "date": day(7),
            "time": "2:00 PM - 4:00 PM",
            "location": "Madison Office",
            "type": "workshop",
            "price": 0,
            "max_participants": 20,
            "zoom_webinar_id": null,
            "created_at": ts, "updated_at": ts
        }),
        json!({
            "id": "event-test-strategy",
            "title": "SAT/ACT Strategy Seminar",
            "description": "Our test prep directors walk through pacing and question strategy.",
            "date": day(14),
            "time": "6:00 PM - 7:30 PM",
            "location": "Online",
            "type": "seminar",
            "price": 25,
            "max_participants": null,
            "zoom_webinar_id": "84512093377",
            "created_at": ts, "updated_at": ts
        }),
        json!({
            "id": "event-info-night",
            "title": "Family Info Session",
            "description": "Meet the team and learn how our programs work.",
            "date": day(21),
            "time": "7:00 PM - 8:00 PM",
            "location": "Milwaukee Office",
            "type": "info-session",
            "price": 0,
            "max_participants": 2,
            "zoom_webinar_id": null,
            "created_at": ts, "updated_at": ts
        }),
        json!({
            "id": "event-fall-kickoff",
            "title": "Application Season Kickoff",
            "description": "Timelines and checklists for seniors.",
            "date": day(-10),
            "time": "5:00 PM - 6:00 PM",
            "location": "Madison Office",
            "type": "workshop",
            "price": 0,
            "max_participants": null,
            "zoom_webinar_id": null,
            "created_at": ts, "updated_at": ts
        }),
    ])
}

fn registrations(today: NaiveDate) -> Vec<Row> {
    let ts = timestamp(shift(today, -5));
    rows(vec![
        json!({"id": "reg-1", "event_id": "event-info-night", "user_id": "demo-parent-1", "status": "confirmed", "created_at": ts, "updated_at": ts}),
        json!({"id": "reg-2", "event_id": "event-info-night", "user_id": "demo-parent-2", "status": "confirmed", "created_at": ts, "updated_at": ts}),
        json!({"id": "reg-3", "event_id": "event-essay-workshop", "user_id": "demo-parent-1", "status": "confirmed", "created_at": ts, "updated_at": ts}),
    ])
}

fn team_members(today: NaiveDate) -> Vec<Row> {
    let ts = timestamp(shift(today, -90));
    rows(vec![
        json!({
            "id": "1",
            "name": "FirstName LastName",
            "title": "Founder & President",
            "image_url": "https://images.pexels.com/photos/2379004/pexels-photo-2379004.jpeg",
            "degrees": ["Ph.D. Educational Psychology", "M.Ed. Counseling"],
            "bio": "Bio goes here.",
            "category": "leadership",
            "created_at": ts, "updated_at": ts
        }),
        json!({
            "id": "2",
            "name": "Sarah Chen",
            "title": "Director of College Counseling",
            "image_url": "https://images.pexels.com/photos/3796217/pexels-photo-3796217.jpeg",
            "degrees": ["M.A. Higher Education", "B.A. Psychology"],
            "bio": "Sarah has helped hundreds of students navigate the college admissions process, with a focus on helping students find their perfect college match.",
            "category": "leadership",
            "created_at": ts, "updated_at": ts
        }),
        json!({
            "id": "3",
            "name": "Michael Thompson",
            "title": "Director of Test Prep",
            "image_url": "https://images.pexels.com/photos/5397723/pexels-photo-5397723.jpeg",
            "degrees": ["M.S. Mathematics Education", "B.S. Mathematics", "SAT/ACT Master Trainer Certification"],
            "bio": "Michael leads our test prep program with expertise in SAT and ACT preparation. His innovative teaching methods have helped students achieve significant score improvements.",
            "category": "tutor",
            "created_at": ts, "updated_at": ts
        }),
    ])
}
