//! HTML templates

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use std::fmt::{self, Write};

use crate::model::GameRecord;
use crate::paths;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 60rem; color: #222; }
nav a { margin-right: .75rem; }
nav a.selected { font-weight: bold; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border-bottom: 1px solid #ddd; padding: .4rem; text-align: left; }
form.inline { display: inline; }
fieldset { border: 1px solid #ccc; padding: 1rem; }
.muted { color: #888; }
"#;

// HTML forms cannot send DELETE, so forms carrying data-method are submitted with fetch.
// A followed redirect navigates; anything else is an error page and replaces the document.
const SCRIPT: &str = r#"
document.addEventListener('submit', function (event) {
  var form = event.target;
  var method = form.getAttribute('data-method');
  if (!method) { return; }
  event.preventDefault();
  fetch(form.action, {
    method: method,
    headers: { 'Content-Type': 'application/x-www-form-urlencoded' },
    body: new URLSearchParams(new FormData(form)).toString()
  }).then(function (res) {
    if (res.redirected) {
      window.location.href = res.url;
      return;
    }
    return res.text().then(function (html) {
      document.open();
      document.write(html);
      document.close();
    });
  });
});
"#;

/// Shared page shell
fn layout(
    out: &mut String,
    prefix: &str,
    title: &str,
    platforms: &[String],
    selected: Option<&str>,
    body: &str,
) -> fmt::Result {
    write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<style>{}</style>\n</head>\n<body>\n",
        text(title),
        STYLE
    )?;

    write!(
        out,
        "<nav>\n<a href=\"{}\">All games</a>\n<a href=\"{}\">Wishlist</a>\n",
        attr(&paths::prefixed(prefix, "")),
        attr(&paths::prefixed(prefix, "wishlist"))
    )?;
    for platform in platforms {
        let class = if selected == Some(platform.as_str()) {
            " class=\"selected\""
        } else {
            ""
        };
        writeln!(
            out,
            "<a href=\"{}\"{}>{}</a>",
            attr(&paths::platform_page(prefix, platform)),
            class,
            text(platform)
        )?;
    }
    out.push_str("</nav>\n");

    out.push_str(body);
    write!(out, "<script>{}</script>\n</body>\n</html>\n", SCRIPT)
}

fn optional(value: &Option<String>) -> String {
    match value {
        Some(v) => text(v).into_owned(),
        None => "<span class=\"muted\">-</span>".to_string(),
    }
}

fn key_fields(out: &mut String, game: &GameRecord) -> fmt::Result {
    write!(
        out,
        "<input type=\"hidden\" name=\"platform\" value=\"{}\">\
         <input type=\"hidden\" name=\"game_id\" value=\"{}\">",
        attr(&game.platform),
        attr(&game.game_id)
    )
}

fn add_form(out: &mut String, action: &str, legend: &str, platform: Option<&str>) -> fmt::Result {
    write!(
        out,
        "<form method=\"post\" action=\"{}\">\n<fieldset>\n<legend>{}</legend>\n\
         <label>Platform <input name=\"platform\" required value=\"{}\"></label>\n\
         <label>Name <input name=\"game_name\" required></label>\n\
         <label>Genre <input name=\"genre\"></label>\n\
         <label>Year <input name=\"year\" inputmode=\"numeric\"></label>\n\
         <button type=\"submit\">Add</button>\n</fieldset>\n</form>\n",
        attr(action),
        text(legend),
        attr(platform.unwrap_or_default())
    )
}

/// `index.html`
pub(super) fn index(
    prefix: &str,
    games: &[GameRecord],
    platforms: &[String],
    selected_platform: Option<&str>,
) -> Result<String, fmt::Error> {
    let heading = match selected_platform {
        Some(platform) => format!("{} games", platform),
        None => "All games".to_string(),
    };

    let mut body = String::new();
    writeln!(body, "<h1>{}</h1>", text(&heading))?;

    if games.is_empty() {
        body.push_str("<p class=\"muted\">No games yet.</p>\n");
    } else {
        body.push_str(
            "<table>\n<thead><tr><th>Name</th><th>Platform</th><th>Genre</th>\
             <th>Year</th><th>Added</th><th></th></tr></thead>\n<tbody>\n",
        );
        for game in games {
            write!(
                body,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>",
                text(&game.game_name),
                text(&game.platform),
                optional(&game.genre),
                optional(&game.year),
                text(&game.added_date)
            )?;
            write!(
                body,
                "<form class=\"inline\" method=\"post\" data-method=\"DELETE\" action=\"{}\">",
                attr(&paths::prefixed(prefix, "delete"))
            )?;
            key_fields(&mut body, game)?;
            body.push_str("<button type=\"submit\">Delete</button></form></td></tr>\n");
        }
        body.push_str("</tbody>\n</table>\n");
    }

    add_form(
        &mut body,
        &paths::prefixed(prefix, "add"),
        "Add a game",
        selected_platform,
    )?;

    let mut out = String::new();
    layout(&mut out, prefix, &heading, platforms, selected_platform, &body)?;
    Ok(out)
}

/// `wishlist.html`
pub(super) fn wishlist(
    prefix: &str,
    wishlist: &[GameRecord],
    platforms: &[String],
) -> Result<String, fmt::Error> {
    let mut body = String::from("<h1>Wishlist</h1>\n");

    if wishlist.is_empty() {
        body.push_str("<p class=\"muted\">Nothing on the wishlist.</p>\n");
    } else {
        body.push_str(
            "<table>\n<thead><tr><th>Name</th><th>Platform</th><th>Genre</th>\
             <th>Year</th><th></th></tr></thead>\n<tbody>\n",
        );
        for game in wishlist {
            write!(
                body,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>",
                text(&game.game_name),
                text(&game.platform),
                optional(&game.genre),
                optional(&game.year)
            )?;
            write!(
                body,
                "<form class=\"inline\" method=\"post\" action=\"{}\">",
                attr(&paths::prefixed(prefix, "wishlist/purchased"))
            )?;
            key_fields(&mut body, game)?;
            body.push_str("<button type=\"submit\">Purchased</button></form> ");
            write!(
                body,
                "<form class=\"inline\" method=\"post\" data-method=\"DELETE\" action=\"{}\">",
                attr(&paths::prefixed(prefix, "wishlist/delete"))
            )?;
            key_fields(&mut body, game)?;
            body.push_str("<button type=\"submit\">Remove</button></form></td></tr>\n");
        }
        body.push_str("</tbody>\n</table>\n");
    }

    add_form(
        &mut body,
        &paths::prefixed(prefix, "wishlist/add"),
        "Add to wishlist",
        None,
    )?;

    let mut out = String::new();
    layout(&mut out, prefix, "Wishlist", platforms, None, &body)?;
    Ok(out)
}

/// `error.html`
pub(super) fn error(prefix: &str, status_code: u16, message: &str) -> Result<String, fmt::Error> {
    let mut body = String::new();
    write!(
        body,
        "<h1>Error {}</h1>\n<p>{}</p>\n<p><a href=\"{}\">Back to the catalogue</a></p>\n",
        status_code,
        text(message),
        attr(&paths::prefixed(prefix, ""))
    )?;

    let mut out = String::new();
    layout(&mut out, prefix, &format!("Error {}", status_code), &[], None, &body)?;
    Ok(out)
}
