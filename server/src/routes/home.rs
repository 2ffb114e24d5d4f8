use anyhow::Context;
use axum::response::Html;
use minijinja::{context, Environment};
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::{error::AppResult, prompt::Tag};

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");
const PAGE_TITLE: &str = "Email Categorizer";

#[derive(Serialize)]
struct TagView {
    label: &'static str,
    guidance: &'static str,
}

pub fn render_index() -> anyhow::Result<String> {
    let mut env = Environment::new();
    env.add_template("index.html", INDEX_TEMPLATE)
        .context("Invalid index template")?;

    let tags = Tag::iter()
        .map(|t| TagView {
            label: t.label(),
            guidance: t.guidance(),
        })
        .collect::<Vec<_>>();

    env.get_template("index.html")
        .and_then(|tmpl| tmpl.render(context! { title => PAGE_TITLE, tags => tags }))
        .context("Could not render index template")
}

/// # GET /
pub async fn index() -> AppResult<Html<String>> {
    Ok(Html(render_index()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::EnumCount;

    #[test]
    fn test_render_index_lists_vocabulary() {
        let html = render_index().unwrap();

        assert!(html.contains("<title>Email Categorizer</title>"));
        assert_eq!(html.matches("class=\"tag\"").count(), Tag::COUNT);
        assert!(html.contains("<strong>Bug Report</strong>"));
        assert!(html.contains("<strong>Technical Support</strong>"));
        assert!(html.contains("/classify-batch"));
        assert!(html.contains("/export-csv"));
    }
}
