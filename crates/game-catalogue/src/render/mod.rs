//! Server-side HTML rendering
//!
//! Handlers describe what to show as a [`Page`]; a [`Renderer`] turns it into
//! markup. Every interpolated value is escaped for the context it lands in.

mod templates;

use game_catalogue_sdk::{HandlerError, Response};

use crate::model::GameRecord;

/// A page and the variables its template needs
#[derive(Debug, Clone, Copy)]
pub enum Page<'a> {
    /// `index.html`: owned games, across all platforms or for one
    Index {
        games: &'a [GameRecord],
        platforms: &'a [String],
        selected_platform: Option<&'a str>,
    },

    /// `wishlist.html`
    Wishlist {
        wishlist: &'a [GameRecord],
        platforms: &'a [String],
    },

    /// `error.html`
    Error { status_code: u16, message: &'a str },
}

impl Page<'_> {
    pub fn template_name(&self) -> &'static str {
        match self {
            Page::Index { .. } => "index.html",
            Page::Wishlist { .. } => "wishlist.html",
            Page::Error { .. } => "error.html",
        }
    }

    /// Status code the rendered page is served with
    pub fn status_code(&self) -> u16 {
        match self {
            Page::Error { status_code, .. } => *status_code,
            _ => 200,
        }
    }
}

/// Template collaborator
pub trait Renderer: Send + Sync {
    fn render(&self, page: &Page<'_>) -> Result<String, HandlerError>;

    /// Render `page` into an HTML response envelope.
    fn respond(&self, page: &Page<'_>) -> Result<Response, HandlerError> {
        let html = self.render(page)?;
        Ok(Response::html(page.status_code(), html))
    }
}

/// Built-in templates. Links and form actions are qualified with the routing prefix.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    route_prefix: String,
}

impl HtmlRenderer {
    pub fn new(route_prefix: impl Into<String>) -> Self {
        Self {
            route_prefix: route_prefix.into(),
        }
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, page: &Page<'_>) -> Result<String, HandlerError> {
        let prefix = self.route_prefix.as_str();
        let rendered = match *page {
            Page::Index {
                games,
                platforms,
                selected_platform,
            } => templates::index(prefix, games, platforms, selected_platform),
            Page::Wishlist {
                wishlist,
                platforms,
            } => templates::wishlist(prefix, wishlist, platforms),
            Page::Error {
                status_code,
                message,
            } => templates::error(prefix, status_code, message),
        };

        rendered.map_err(|e| {
            HandlerError::Template(format!("Failed to render {}: {}", page.template_name(), e))
        })
    }
}
