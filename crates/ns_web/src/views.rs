//! HTML pages. Everything user-supplied goes through [`escape`].

use ns_core::{CategoryFilter, SentimentCategory};

use crate::charts::{DISTRIBUTION_CHART, SCORES_CHART};
use crate::search::SearchResults;
use crate::session::Flash;

pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Only http(s) links are rendered as clickable.
fn safe_href(url: &str) -> Option<String> {
    let lower = url.to_ascii_lowercase();
    (lower.starts_with("http://") || lower.starts_with("https://")).then(|| escape(url))
}

fn layout(title: &str, user: Option<&str>, flashes: &[Flash], body: &str) -> String {
    let nav = match user {
        Some(name) => format!(
            r#"<nav>Logged in as <strong>{}</strong> | <a href="/logout">Logout</a></nav>"#,
            escape(name)
        ),
        None => String::new(),
    };
    let flashes: String = flashes
        .iter()
        .map(|flash| {
            format!(
                r#"<div class="flash flash-{}">{}</div>"#,
                flash.level.as_str(),
                escape(&flash.message)
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; max-width: 960px; margin: 2em auto; }}
.flash {{ padding: .5em 1em; margin: .5em 0; border-radius: 4px; }}
.flash-success {{ background: #dff0d8; }}
.flash-info {{ background: #d9edf7; }}
.flash-danger {{ background: #f2dede; }}
.article {{ border-bottom: 1px solid #ddd; padding: .75em 0; }}
.sentiment-Positive {{ color: green; }}
.sentiment-Negative {{ color: red; }}
.sentiment-Neutral {{ color: #2456a6; }}
.charts img {{ max-width: 100%; }}
</style>
</head>
<body>
{nav}
{flashes}
{body}
</body>
</html>
"#,
        title = escape(title),
        nav = nav,
        flashes = flashes,
        body = body
    )
}

pub struct IndexView<'a> {
    pub results: &'a SearchResults,
    pub flashes: &'a [Flash],
    pub user: Option<&'a str>,
    pub show_charts: bool,
}

fn filter_options(selected: &CategoryFilter) -> String {
    let mut options = vec![(
        "all".to_string(),
        "All".to_string(),
        *selected == CategoryFilter::All,
    )];
    for category in SentimentCategory::ALL {
        options.push((
            category.as_str().to_lowercase(),
            category.as_str().to_string(),
            *selected == CategoryFilter::Only(category),
        ));
    }
    options
        .into_iter()
        .map(|(value, label, is_selected)| {
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                value,
                if is_selected { " selected" } else { "" },
                label
            )
        })
        .collect()
}

fn page_button(query: &str, filter: &str, page: u32, label: &str) -> String {
    format!(
        r#"<form method="post" action="/" style="display:inline">
<input type="hidden" name="query" value="{}">
<input type="hidden" name="sentiment_filter" value="{}">
<input type="hidden" name="page" value="{}">
<button type="submit">{}</button>
</form>"#,
        escape(query),
        escape(filter),
        page,
        label
    )
}

pub fn index_page(view: &IndexView<'_>) -> String {
    let request = &view.results.request;
    let filter = request.filter.as_param();

    let mut body = format!(
        r#"<h1>News Sentiment</h1>
<form method="post" action="/">
<input type="text" name="query" value="{}" placeholder="Keyword">
<select name="sentiment_filter">{}</select>
<input type="hidden" name="page" value="1">
<button type="submit">Search</button>
</form>
"#,
        escape(&request.query),
        filter_options(&request.filter)
    );

    if view.results.source_unavailable {
        body.push_str(r#"<p class="flash flash-danger">The news source is unavailable right now.</p>"#);
        body.push('\n');
    }

    if view.results.articles.is_empty() {
        body.push_str("<p>No articles found.</p>\n");
    } else {
        body.push_str(&format!(
            "<p>Showing {} articles for <strong>{}</strong> (page {}).</p>\n",
            view.results.articles.len(),
            escape(&request.query),
            request.page
        ));
        for scored in &view.results.articles {
            let article = &scored.article;
            let title = escape(&article.title);
            let heading = match safe_href(&article.url) {
                Some(href) => format!(r#"<a href="{}" target="_blank" rel="noopener">{}</a>"#, href, title),
                None => title,
            };
            let description = article
                .description
                .as_deref()
                .filter(|d| !d.is_empty())
                .map(|d| format!("<p>{}</p>", escape(d)))
                .unwrap_or_default();
            body.push_str(&format!(
                r#"<div class="article">
<h3>{}</h3>
<p>Source: {}</p>
{}
<p class="sentiment-{category}">Sentiment: {category} ({score:.3})</p>
</div>
"#,
                heading,
                escape(&article.source_name),
                description,
                category = scored.sentiment_category,
                score = scored.sentiment_score
            ));
        }
    }

    body.push_str(r#"<div class="pagination">"#);
    if request.page > 1 {
        body.push_str(&page_button(&request.query, &filter, request.page - 1, "Previous"));
    }
    if view.results.has_more {
        body.push_str(&page_button(&request.query, &filter, request.page + 1, "Next"));
    }
    body.push_str("</div>\n");

    if view.show_charts {
        body.push_str(&format!(
            r#"<div class="charts">
<img src="/static/{}" alt="Sentiment distribution">
<img src="/static/{}" alt="Sentiment scores">
</div>
"#,
            DISTRIBUTION_CHART, SCORES_CHART
        ));
    }

    layout("News Sentiment", view.user, view.flashes, &body)
}

fn credentials_form(action: &str, button: &str) -> String {
    format!(
        r#"<form method="post" action="{action}">
<label>Username <input type="text" name="username" maxlength="150" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">{button}</button>
</form>"#
    )
}

pub fn login_page(flashes: &[Flash]) -> String {
    let body = format!(
        r#"<h1>Login</h1>
{}
<p>No account? <a href="/register">Register</a></p>"#,
        credentials_form("/login", "Login")
    );
    layout("Login", None, flashes, &body)
}

pub fn register_page(flashes: &[Flash]) -> String {
    let body = format!(
        r#"<h1>Register</h1>
{}
<p>Already registered? <a href="/login">Login</a></p>"#,
        credentials_form("/register", "Register")
    );
    layout("Register", None, flashes, &body)
}
