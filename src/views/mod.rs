// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Server-rendered HTML.
//!
//! Pages are plain strings built with `std::fmt::Write`. Every piece of
//! user-supplied text goes through [`escape`].

pub mod charts;
pub mod pages;

use std::fmt::Write;

use crate::middleware::auth::SessionUser;

/// Page highlighted in the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePage {
    Home,
    Workouts,
    Food,
    SignIn,
}

const NAV_LINKS: [(ActivePage, &str, &str); 3] = [
    (ActivePage::Home, "/", "Home"),
    (ActivePage::Workouts, "/workouts", "Workouts"),
    (ActivePage::Food, "/food", "Food"),
];

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn nav(active: ActivePage, session: Option<&SessionUser>) -> String {
    let mut html = String::from(r#"<nav class="nav"><span class="brand">Fitlog</span><ul>"#);
    for (page, href, label) in NAV_LINKS {
        let class = if page == active { r#" class="active""# } else { "" };
        let _ = write!(html, r#"<li><a href="{href}"{class}>{label}</a></li>"#);
    }
    html.push_str("</ul>");

    match session {
        Some(user) => {
            let who = user.name.as_deref().unwrap_or(&user.email);
            let _ = write!(
                html,
                r#"<span class="session">{} <button type="button" data-logout>Sign out</button></span>"#,
                escape(who)
            );
        }
        None if active != ActivePage::SignIn => {
            html.push_str(r#"<a class="session" href="/auth/signin">Sign in</a>"#);
        }
        None => {}
    }

    html.push_str("</nav>");
    html
}

/// Wrap a page body in the document shell.
pub fn layout(
    title: &str,
    active: ActivePage,
    session: Option<&SessionUser>,
    body: &str,
) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | Fitlog</title>
<link rel="stylesheet" href="/assets/app.css">
<script src="/assets/app.js" defer></script>
</head>
<body>
{nav}
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
        nav = nav(active, session),
    )
}
