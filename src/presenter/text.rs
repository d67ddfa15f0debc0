use crate::catalog::{Catalog, Category, CategoryNotFoundError};

/// Capitalizes the first letter of every run of letters and lowercases the rest.
///
/// Display only: lookups always go through the stored key.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut previous_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(c);
            previous_is_letter = false;
        }
    }
    out
}

pub fn render_listing(catalog: &Catalog) -> String {
    if catalog.is_empty() {
        return "No categories available.\n".to_string();
    }
    let mut out = String::from("Available categories:\n");
    for name in catalog.names() {
        out.push_str(&format!("- {}\n", name));
    }
    out
}

pub fn render_detail(name: &str, category: &Category) -> String {
    let mut out = format!("{}\n", title_case(name));
    if !category.description.is_empty() {
        out.push_str(&format!("{}\n", category.description));
    }
    if category.links.is_empty() {
        out.push_str("No links available.\n");
    } else {
        out.push_str("Links:\n");
        for link in category.links.iter() {
            out.push_str(&format!("  - {}\n", link));
        }
    }
    out
}

/// One line per match, name then description, in catalog order.
pub fn render_search_results<'a, I>(query: &str, results: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a Category)>,
{
    let mut out = String::new();
    for (name, category) in results {
        if category.description.is_empty() {
            out.push_str(&format!("- {}\n", name));
        } else {
            out.push_str(&format!("- {}: {}\n", name, category.description));
        }
    }
    if out.is_empty() {
        return format!("No categories match \"{}\".\n", query);
    }
    format!("Categories matching \"{}\":\n{}", query, out)
}

pub fn render_not_found(err: &CategoryNotFoundError) -> String {
    format!(
        "Category \"{}\" not found. Use --list to see the available categories.\n",
        err.category
    )
}
