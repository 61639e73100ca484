//! HTML fragments for the htmx front end.
//!
//! Every piece of user-controlled text goes through [`escape`].

use std::fmt::Write as _;

use time::{macros::format_description, OffsetDateTime};

use crate::items::services::ItemPage;

const HTMX_SRC: &str = "https://unpkg.com/htmx.org@1.9.12";

/// htmx drops 4xx bodies by default; validation and auth fragments must swap.
const SWAP_CLIENT_ERRORS: &str = r#"document.addEventListener("htmx:beforeSwap", function (evt) {
  var status = evt.detail.xhr.status;
  if (status === 400 || status === 401) {
    evt.detail.shouldSwap = true;
    evt.detail.isError = false;
  }
});"#;

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn format_timestamp(ts: OffsetDateTime) -> String {
    ts.format(format_description!("[year]-[month]-[day] [hour]:[minute]"))
        .unwrap_or_default()
}

pub fn page(body: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Items</title>
<script src="{HTMX_SRC}"></script>
<script>{SWAP_CLIENT_ERRORS}</script>
</head>
<body>
<main id="app">
{body}
</main>
</body>
</html>"#
    )
}

pub fn login_fragment(email: &str, error: &str) -> String {
    let error_html = if error.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="error">{}</div>"#, escape(error))
    };
    format!(
        r##"<section id="login">
<h1>Sign in</h1>
{error_html}
<form hx-post="/login" hx-target="#app" hx-swap="innerHTML">
<label>Email <input type="email" name="email" value="{email}" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Log in</button>
</form>
</section>"##,
        email = escape(email),
    )
}

pub fn dashboard_fragment(email: &str) -> String {
    format!(
        r##"<section id="dashboard">
<header>
<p>Signed in as <strong>{email}</strong></p>
<button hx-post="/logout" hx-target="#app" hx-swap="innerHTML">Log out</button>
</header>
<form id="search-form" hx-get="/items" hx-target="#item-list" hx-swap="outerHTML" hx-trigger="submit, keyup changed delay:300ms from:[name='q']">
<input type="search" name="q" placeholder="Search items">
</form>
<form hx-post="/items" hx-target="#item-list" hx-swap="outerHTML" hx-include="[name='q']">
<input type="text" name="name" placeholder="New item" required>
<button type="submit">Add</button>
</form>
<div id="item-list" hx-get="/items" hx-trigger="load" hx-swap="outerHTML"></div>
</section>"##,
        email = escape(email),
    )
}

pub fn items_fragment(listing: &ItemPage) -> String {
    let mut html = String::from(r#"<div id="item-list">"#);
    if !listing.search_term.is_empty() {
        let _ = write!(
            html,
            r#"<p class="filter">Matching &quot;{}&quot;</p>"#,
            escape(&listing.search_term)
        );
    }
    if listing.items.is_empty() {
        html.push_str(r#"<p class="empty">No items yet.</p>"#);
    } else {
        html.push_str("<ul>");
        for item in &listing.items {
            let _ = write!(
                html,
                r#"<li data-id="{}"><span class="name">{}</span> <time>{}</time></li>"#,
                item.id,
                escape(&item.name),
                format_timestamp(item.created_at),
            );
        }
        html.push_str("</ul>");
    }

    if listing.total_pages > 1 {
        html.push_str(r#"<nav class="pager">"#);
        if listing.page > 1 {
            let _ = write!(html, "{}", pager_button(listing.page - 1, "Prev"));
        }
        let _ = write!(
            html,
            r#"<span>Page {} of {}</span>"#,
            listing.page, listing.total_pages
        );
        if listing.page < listing.total_pages {
            let _ = write!(html, "{}", pager_button(listing.page + 1, "Next"));
        }
        html.push_str("</nav>");
    }
    html.push_str("</div>");
    html
}

fn pager_button(page: i64, label: &str) -> String {
    format!(
        r##"<button hx-get="/items" hx-vals='{{"page": {page}}}' hx-include="[name='q']" hx-target="#item-list" hx-swap="outerHTML">{label}</button>"##
    )
}

pub fn item_list_error(message: &str) -> String {
    format!(
        r#"<div id="item-list"><div class="error">{}</div></div>"#,
        escape(message)
    )
}

pub fn unauthorized_fragment() -> String {
    r#"<div class="notice">Unauthorized. Please log in.</div>"#.to_string()
}

pub fn internal_error_fragment() -> String {
    r#"<div class="error">Something went wrong. Please try again.</div>"#.to_string()
}
