//! Theme engine
//!
//! Page templates are compiled into the binary from `templates/`. A
//! directory of `.html` files can be configured to replace any of them by
//! name, which lets the markup be edited without a rebuild.

use rust_embed::RustEmbed;
use serde::Serialize;
use std::error::Error as StdError;
use std::fs;
use std::path::Path;
use tera::{Context as TeraContext, Tera};

use crate::models::AuthUser;
use crate::ui::nav::NavView;
use crate::ui::Toast;

mod error;

pub use error::ThemeError;

/// Embedded page templates
#[derive(RustEmbed)]
#[folder = "templates/"]
#[include = "*.html"]
struct EmbeddedTemplates;

/// Template renderer shared by all handlers
pub struct ThemeEngine {
    tera: Tera,
}

/// Variables every page template receives
#[derive(Debug, Clone, Serialize)]
pub struct StandardTemplateVars {
    pub site_name: String,
    pub request_path: String,
    pub year: i32,
    pub placeholder_image: String,
    pub current_user: Option<AuthUser>,
    pub toast: Option<Toast>,
}

impl StandardTemplateVars {
    pub fn new(site_name: &str, request_path: &str, placeholder_image: &str) -> Self {
        use chrono::Datelike;
        Self {
            site_name: site_name.to_string(),
            request_path: request_path.to_string(),
            year: chrono::Utc::now().year(),
            placeholder_image: placeholder_image.to_string(),
            current_user: None,
            toast: None,
        }
    }

    pub fn with_user(mut self, user: Option<AuthUser>) -> Self {
        self.current_user = user;
        self
    }

    pub fn with_toast(mut self, toast: Option<Toast>) -> Self {
        self.toast = toast;
        self
    }
}

impl ThemeEngine {
    /// Load the embedded templates, then any overrides from `override_dir`
    pub fn new(override_dir: Option<&Path>) -> Result<Self, ThemeError> {
        let mut templates = embedded_templates()?;

        if let Some(dir) = override_dir {
            if !dir.is_dir() {
                return Err(ThemeError::NotFound(dir.display().to_string()));
            }
            let mut overrides = Vec::new();
            collect_templates_from_dir(dir, dir, &mut overrides)?;
            for (name, content) in overrides {
                tracing::info!("Template override: {}", name);
                match templates.iter_mut().find(|(existing, _)| *existing == name) {
                    Some(slot) => slot.1 = content,
                    None => templates.push((name, content)),
                }
            }
        }

        let mut tera = Tera::default();
        tera.add_raw_templates(templates)
            .map_err(|e| ThemeError::TemplateError(describe(&e)))?;

        tracing::debug!("Loaded {} templates", tera.get_template_names().count());
        Ok(Self { tera })
    }

    /// Render a template with the given context
    pub fn render(&self, template: &str, context: &TeraContext) -> Result<String, ThemeError> {
        self.tera.render(template, context).map_err(|e| {
            ThemeError::TemplateError(format!("Failed to render '{}': {}", template, describe(&e)))
        })
    }

    /// Render a template with the standard page variables added
    pub fn render_with_standard_vars(
        &self,
        template: &str,
        context: &TeraContext,
        standard_vars: &StandardTemplateVars,
    ) -> Result<String, ThemeError> {
        let mut full_context = context.clone();
        full_context.insert("site_name", &standard_vars.site_name);
        full_context.insert("request_path", &standard_vars.request_path);
        full_context.insert("year", &standard_vars.year);
        full_context.insert("placeholder_image", &standard_vars.placeholder_image);
        full_context.insert("nav", &NavView::for_path(&standard_vars.request_path));
        full_context.insert("contact_email", crate::content::COMPANY_EMAIL);
        full_context.insert("logo_url", crate::content::LOGO_URL);
        if let Some(ref user) = standard_vars.current_user {
            full_context.insert("current_user", user);
        }
        if let Some(ref toast) = standard_vars.toast {
            full_context.insert("toast", toast);
        }

        self.render(template, &full_context)
    }
}

/// Minimal error page that does not depend on any template
pub fn simple_error_page(title: &str, message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        body {{ font-family: system-ui, sans-serif; max-width: 600px; margin: 50px auto; padding: 20px; }}
        .error-box {{ border-left: 4px solid #e74c3c; padding: 20px; }}
        h1 {{ color: #e74c3c; margin-top: 0; }}
    </style>
</head>
<body>
    <div class="error-box">
        <h1>{title}</h1>
        <p>{message}</p>
        <p><a href="/">Back to home</a></p>
    </div>
</body>
</html>"#,
        title = escape(title),
        message = escape(message),
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Tera nests the useful part of an error in its source chain
fn describe(e: &tera::Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(s) = source {
        message.push_str(&format!("\n  Caused by: {}", s));
        source = s.source();
    }
    message
}

fn embedded_templates() -> Result<Vec<(String, String)>, ThemeError> {
    EmbeddedTemplates::iter()
        .filter_map(|name| EmbeddedTemplates::get(&name).map(|file| (name.to_string(), file)))
        .map(|(name, file)| {
            String::from_utf8(file.data.into_owned())
                .map(|content| (name.clone(), content))
                .map_err(|_| ThemeError::InvalidEncoding(name))
        })
        .collect()
}

fn collect_templates_from_dir(
    base_path: &Path,
    current_path: &Path,
    templates: &mut Vec<(String, String)>,
) -> Result<(), ThemeError> {
    for entry in fs::read_dir(current_path)? {
        let path = entry?.path();

        if path.is_dir() {
            collect_templates_from_dir(base_path, &path, templates)?;
        } else if path.extension().is_some_and(|ext| ext == "html") {
            let relative_path = path
                .strip_prefix(base_path)
                .map_err(|_| ThemeError::TemplateError("Failed to get relative path".to_string()))?;
            let name = relative_path.to_string_lossy().replace('\\', "/");
            templates.push((name, fs::read_to_string(&path)?));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_embedded_templates_load() {
        let engine = ThemeEngine::new(None).unwrap();
        let names: Vec<&str> = engine.tera.get_template_names().collect();
        for name in ["base.html", "home.html", "error.html", "events.html", "admin_blog.html"] {
            assert!(names.contains(&name), "missing {name}");
        }
    }

    #[test]
    fn test_standard_vars_reach_the_layout() {
        let engine = ThemeEngine::new(None).unwrap();
        let mut ctx = TeraContext::new();
        ctx.insert("status", &404);
        ctx.insert("error_title", "Page not found");
        ctx.insert("error_message", "Nothing here");
        let vars = StandardTemplateVars::new("Galin Education", "/nowhere", "placeholder.png")
            .with_toast(Some(Toast::error("Broken")));

        let html = engine.render_with_standard_vars("error.html", &ctx, &vars).unwrap();
        assert!(html.contains("Galin Education"));
        assert!(html.contains("Nothing here"));
        assert!(html.contains("toast-destructive"));
        assert!(html.contains("data-close-delay=\"300\""));
    }

    #[test]
    fn test_override_replaces_embedded_template() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("error.html"),
            "<p>custom: {{ error_message }}</p>",
        )
        .unwrap();

        let engine = ThemeEngine::new(Some(dir.path())).unwrap();
        let mut ctx = TeraContext::new();
        ctx.insert("error_message", "<boom>");
        let html = engine.render("error.html", &ctx).unwrap();
        assert_eq!(html, "<p>custom: &lt;boom&gt;</p>");
    }

    #[test]
    fn test_missing_override_dir() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            ThemeEngine::new(Some(&missing)),
            Err(ThemeError::NotFound(_))
        ));
    }

    #[test]
    fn test_broken_override_is_reported() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("broken.html"), "{% if %}").unwrap();
        assert!(matches!(
            ThemeEngine::new(Some(dir.path())),
            Err(ThemeError::TemplateError(_))
        ));
    }

    #[test]
    fn test_simple_error_page_escapes() {
        let html = simple_error_page("Oops", "<script>");
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
