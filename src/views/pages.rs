// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Page bodies.

use std::fmt::Write;

use super::charts::{bar_chart, line_chart};
use super::{escape, layout, ActivePage};
use crate::middleware::auth::SessionUser;
use crate::models::Workout;
use crate::services::dashboard::Dashboard;
use crate::services::history::DayGroup;

/// Dashboard with the two weekly charts.
pub fn home_page(dashboard: &Dashboard, session: Option<&SessionUser>) -> String {
    let mut body = String::from("<h1>Dashboard</h1>");

    if session.is_none() {
        body.push_str(
            r#"<p class="notice"><a href="/auth/signin">Sign in</a> to track your meals and workouts.</p>"#,
        );
    }

    let _ = write!(
        body,
        r#"<section class="card"><h2>Calories, last 7 days</h2><p class="total">Total: {} kcal</p>{}</section>"#,
        dashboard.total_calories,
        bar_chart("Calories per day", &dashboard.dates, &dashboard.calories),
    );
    let _ = write!(
        body,
        r#"<section class="card"><h2>Workout minutes, last 7 days</h2><p class="total">Total: {} min</p>{}</section>"#,
        dashboard.total_minutes,
        line_chart("Workout minutes per day", &dashboard.dates, &dashboard.minutes),
    );

    layout("Dashboard", ActivePage::Home, session, &body)
}

/// Food log: add form plus entries grouped by day.
pub fn food_page(groups: &[DayGroup], today: &str, session: Option<&SessionUser>) -> String {
    let mut body = String::from("<h1>Food</h1>");

    let _ = write!(
        body,
        r#"<form class="card entry-form" data-endpoint="/api/food">
<label>Food <input name="name" type="text" maxlength="200" placeholder="Food" data-default="Food"></label>
<label>Date <input name="date" type="date" value="{today}"></label>
<label>Calories <input name="calories" type="number" min="0" step="1" placeholder="0" data-number></label>
<button type="submit">Add</button>
</form>"#,
        today = escape(today),
    );

    if groups.is_empty() {
        body.push_str(r#"<p class="empty">No food logged yet.</p>"#);
    }

    for group in groups {
        let _ = write!(
            body,
            r#"<section class="card day"><h2>{date} <span class="subtotal">{total} kcal</span></h2><ul>"#,
            date = escape(&group.date),
            total = group.total_calories,
        );
        for food in &group.entries {
            let _ = write!(
                body,
                r#"<li><span class="item">{name}</span> <span class="amount">{calories} kcal</span> <button type="button" data-delete="/api/food/{id}">Delete</button></li>"#,
                name = escape(&food.name),
                calories = food.calories,
                id = escape(&food.id),
            );
        }
        body.push_str("</ul></section>");
    }

    layout("Food", ActivePage::Food, session, &body)
}

/// Workouts from the last week with an add form.
pub fn workouts_page(workouts: &[Workout], today: &str, session: Option<&SessionUser>) -> String {
    let mut body = String::from("<h1>Workouts</h1>");

    let _ = write!(
        body,
        r#"<form class="card entry-form" data-endpoint="/api/workouts">
<label>Title <input name="title" type="text" maxlength="200" placeholder="Workout" data-default="Workout"></label>
<label>Date <input name="date" type="date" value="{today}"></label>
<label>Minutes <input name="duration" type="number" min="0" step="1" placeholder="0" data-number></label>
<label>Notes <textarea name="notes" maxlength="2000" rows="2" data-optional></textarea></label>
<button type="submit">Add</button>
</form>"#,
        today = escape(today),
    );

    if workouts.is_empty() {
        body.push_str(r#"<p class="empty">No workouts in the last 7 days.</p>"#);
    } else {
        body.push_str(r#"<section class="card"><ul>"#);
        for workout in workouts {
            let _ = write!(
                body,
                r#"<li><span class="date">{date}</span> <span class="item">{title}</span> <span class="amount">{duration} min</span>"#,
                date = escape(&workout.date),
                title = escape(&workout.title),
                duration = workout.duration,
            );
            if let Some(notes) = &workout.notes {
                let _ = write!(body, r#" <p class="notes">{}</p>"#, escape(notes));
            }
            let _ = write!(
                body,
                r#" <button type="button" data-delete="/api/workouts/{}">Delete</button></li>"#,
                escape(&workout.id),
            );
        }
        body.push_str("</ul></section>");
    }

    layout("Workouts", ActivePage::Workouts, session, &body)
}

/// Message for an `error` code passed back to the sign-in page.
fn sign_in_error_message(code: &str) -> &'static str {
    match code {
        "AccessDenied" => "Sign-in was cancelled.",
        "Configuration" => "Sign-in is not configured on this server.",
        "InvalidState" => "Your sign-in link expired. Please try again.",
        _ => "Sign-in failed. Please try again.",
    }
}

/// Sign-in page with the Google button.
pub fn sign_in_page(provider_enabled: bool, redirect_to: &str, error: Option<&str>) -> String {
    let mut body = String::from(r#"<section class="card signin"><h1>Sign in</h1>"#);

    if let Some(code) = error {
        let _ = write!(
            body,
            r#"<p class="error">{}</p>"#,
            sign_in_error_message(code)
        );
    }

    if provider_enabled {
        let _ = write!(
            body,
            r#"<a class="button" href="/auth/google?redirect_to={}">Sign in with Google</a>"#,
            escape(&urlencoding::encode(redirect_to)),
        );
    } else {
        body.push_str(r#"<p class="notice">Google sign-in is not configured.</p>"#);
    }

    body.push_str("</section>");
    layout("Sign in", ActivePage::SignIn, None, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Food;
    use crate::services::dashboard::build_dashboard;
    use crate::services::history::group_by_date;
    use chrono::NaiveDate;

    #[test]
    fn test_home_page_signed_out_shows_sign_in_link() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        let html = home_page(&build_dashboard(&[], &[], today), None);
        assert!(html.contains(r#"<a href="/auth/signin">Sign in</a> to track"#));
        assert!(html.contains("Total: 0 kcal"));
        assert!(html.contains("Total: 0 min"));
    }

    #[test]
    fn test_food_page_groups_and_escapes() {
        let groups = group_by_date(vec![Food {
            id: "f1".to_string(),
            user_id: "u1".to_string(),
            date: "2024-01-01".to_string(),
            name: "<b>Pie</b>".to_string(),
            calories: 300,
        }]);
        let html = food_page(&groups, "2024-01-02", None);

        assert!(html.contains("&lt;b&gt;Pie&lt;/b&gt;"));
        assert!(!html.contains("<b>Pie</b>"));
        assert!(html.contains(r#"<span class="subtotal">300 kcal</span>"#));
        assert!(html.contains(r#"data-delete="/api/food/f1""#));
        assert!(html.contains(r#"value="2024-01-02""#));
    }

    #[test]
    fn test_workouts_page_empty() {
        let html = workouts_page(&[], "2024-01-02", None);
        assert!(html.contains("No workouts in the last 7 days."));
        assert!(html.contains(r#"data-endpoint="/api/workouts""#));
    }

    #[test]
    fn test_sign_in_page_never_echoes_error_code() {
        let html = sign_in_page(true, "/food", Some("<script>"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("Sign-in failed. Please try again."));
        assert!(html.contains("/auth/google?redirect_to=%2Ffood"));

        let html = sign_in_page(false, "/", None);
        assert!(html.contains("Google sign-in is not configured."));
        assert!(!html.contains("/auth/google"));
    }
}
