//! Renderings of the catalog: plain text for the CLI, HTML pages for the web front end.

mod html;
mod text;

pub use html::HtmlRenderer;
pub use text::{render_detail, render_listing, render_not_found, render_search_results, title_case};
