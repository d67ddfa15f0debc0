use super::title_case;
use crate::catalog::Catalog;
use anyhow::{Context as _, Result};
use serde::Serialize;
use tera::{Context, Tera};

const INDEX_TEMPLATE_NAME: &str = "index.html";
const LOGIN_TEMPLATE_NAME: &str = "login.html";

const INDEX_TEMPLATE: &str = include_str!("templates/index.html");
const LOGIN_TEMPLATE: &str = include_str!("templates/login.html");

#[derive(Serialize)]
struct CategoryView<'a> {
    name: &'a str,
    title: String,
    description: &'a str,
    links: &'a [String],
}

/// Renders the web pages. Templates are compiled once and autoescaped.
pub struct HtmlRenderer {
    tera: Tera,
}

impl HtmlRenderer {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (INDEX_TEMPLATE_NAME, INDEX_TEMPLATE),
            (LOGIN_TEMPLATE_NAME, LOGIN_TEMPLATE),
        ])
        .context("Failed to compile page templates")?;
        Ok(Self { tera })
    }

    /// The full catalog for an authenticated user, categories in catalog order.
    pub fn render_index_page(&self, catalog: &Catalog, user: &str) -> Result<String> {
        let categories: Vec<CategoryView> = catalog
            .categories()
            .map(|(name, category)| CategoryView {
                name,
                title: title_case(name),
                description: &category.description,
                links: &category.links,
            })
            .collect();

        let mut context = Context::new();
        context.insert("user", user);
        context.insert("categories", &categories);
        Ok(self.tera.render(INDEX_TEMPLATE_NAME, &context)?)
    }

    pub fn render_login_page(&self, error: Option<&str>) -> Result<String> {
        let mut context = Context::new();
        context.insert("error", &error);
        Ok(self.tera.render(LOGIN_TEMPLATE_NAME, &context)?)
    }
}
