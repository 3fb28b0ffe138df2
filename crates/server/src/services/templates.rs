use std::sync::Arc;

use axum::response::Html;
use serde::Serialize;
use tera::{Context, Tera};

use crate::error::Result;

/// Page templates, compiled once at startup from the files embedded in the binary.
#[derive(Clone)]
pub struct Templates {
    tera: Arc<Tera>,
}

impl Templates {
    pub fn new() -> tera::Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", include_str!("../../templates/base.html")),
            ("index.html", include_str!("../../templates/index.html")),
            ("about.html", include_str!("../../templates/about.html")),
            ("projects.html", include_str!("../../templates/projects.html")),
            ("skills.html", include_str!("../../templates/skills.html")),
            ("contact.html", include_str!("../../templates/contact.html")),
        ])?;

        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    pub fn render<T: Serialize>(&self, name: &str, page: &T) -> Result<Html<String>> {
        let context = Context::from_serialize(page)?;
        Ok(Html(self.tera.render(name, &context)?))
    }
}
