//! HTML rendering for jotter pages
//!
//! Pages are small enough to build with plain string pushes. Titles and
//! categories are entity-escaped; entry text is emitted verbatim so stored
//! markup renders as written.

use std::fmt::Write;

use crate::models::{Entry, Flash};

/// Escape a string for use in HTML element content or attribute values.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n\
         <div class=\"page\">\n<h1>Jotter</h1>\n{body}</div>\n</body>\n</html>\n",
        title = escape(title),
        body = body,
    )
}

/// Render the list view: flash banner, add form, category filter, entries.
pub fn list_page(
    entries: &[Entry],
    categories: &[String],
    selected: Option<&str>,
    flash: Option<Flash>,
) -> String {
    let mut body = String::new();

    if let Some(flash) = flash {
        let _ = write!(
            body,
            "<div class=\"flash\">{}</div>\n",
            escape(flash.message())
        );
    }

    body.push_str(
        "<form action=\"/add\" method=\"post\" class=\"add-entry\">\n\
         <input type=\"text\" name=\"title\" placeholder=\"Title\">\n\
         <textarea name=\"text\" rows=\"5\" placeholder=\"Text\"></textarea>\n\
         <input type=\"text\" name=\"category\" placeholder=\"Category\">\n\
         <input type=\"submit\" value=\"Share\">\n\
         </form>\n",
    );

    body.push_str(&filter_form(categories, selected));
    body.push_str(&entry_list(entries));

    layout("Jotter", &body)
}

/// Render the edit form for one entry, pre-filled with its current values.
pub fn edit_page(entry: &Entry) -> String {
    let body = format!(
        "<form action=\"/submit_update\" method=\"post\" class=\"edit-entry\">\n\
         <input type=\"hidden\" name=\"id\" value=\"{id}\">\n\
         <input type=\"text\" name=\"title\" value=\"{title}\">\n\
         <textarea name=\"text\" rows=\"5\">{text}</textarea>\n\
         <input type=\"text\" name=\"category\" value=\"{category}\">\n\
         <input type=\"submit\" value=\"Save\">\n\
         </form>\n",
        id = entry.id,
        title = escape(&entry.title),
        text = escape(&entry.text),
        category = escape(&entry.category),
    );

    layout("Edit entry", &body)
}

fn filter_form(categories: &[String], selected: Option<&str>) -> String {
    let mut form = String::from(
        "<form action=\"/\" method=\"get\" class=\"filter\">\n\
         <select name=\"sort_selected\">\n\
         <option value=\"\">All categories</option>\n",
    );

    for category in categories {
        let marker = if selected == Some(category.as_str()) {
            " selected"
        } else {
            ""
        };
        let _ = write!(
            form,
            "<option value=\"{value}\"{marker}>{value}</option>\n",
            value = escape(category),
            marker = marker,
        );
    }

    form.push_str("</select>\n<input type=\"submit\" value=\"Filter\">\n</form>\n");
    form
}

fn entry_list(entries: &[Entry]) -> String {
    if entries.is_empty() {
        return "<ul class=\"entries\">\n<li><em>No entries here so far</em></li>\n</ul>\n"
            .to_string();
    }

    let mut list = String::from("<ul class=\"entries\">\n");
    for entry in entries {
        // Entry text is deliberately unescaped: stored markup renders as-is.
        let _ = write!(
            list,
            "<li>\n<h2>{title}</h2>\n{text}\n\
             <span class=\"category\">{category}</span>\n\
             <form action=\"/update\" method=\"post\" class=\"inline\">\
             <input type=\"hidden\" name=\"id\" value=\"{id}\">\
             <input type=\"submit\" value=\"Edit\"></form>\n\
             <form action=\"/delete\" method=\"post\" class=\"inline\">\
             <input type=\"hidden\" name=\"id\" value=\"{id}\">\
             <input type=\"submit\" value=\"Delete\"></form>\n</li>\n",
            title = escape(&entry.title),
            text = entry.text,
            category = escape(&entry.category),
            id = entry.id,
        );
    }
    list.push_str("</ul>\n");
    list
}
