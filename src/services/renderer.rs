use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use log::{debug, info};
use crate::errors::WikiError;
use crate::types::Page;
use crate::utils::{escape_attr, escape_html};

/// Templates known to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    View,
    Edit,
    Index,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 3] = [TemplateKind::View, TemplateKind::Edit, TemplateKind::Index];

    pub fn name(self) -> &'static str {
        match self {
            TemplateKind::View => "view",
            TemplateKind::Edit => "edit",
            TemplateKind::Index => "index",
        }
    }

    fn fallback(self) -> &'static str {
        match self {
            TemplateKind::View => DEFAULT_VIEW,
            TemplateKind::Edit => DEFAULT_EDIT,
            TemplateKind::Index => DEFAULT_INDEX,
        }
    }
}

const DEFAULT_VIEW: &str = "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\"><title>{{TITLE}}</title></head><body><h1>{{TITLE}}</h1><p>[<a href=\"/edit/{{TITLE}}\">edit</a>] [<a href=\"/\">index</a>]</p><pre>{{BODY}}</pre></body></html>";

const DEFAULT_EDIT: &str = "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\"><title>Editing {{TITLE}}</title></head><body><h1>Editing {{TITLE}}</h1><form action=\"/save/{{TITLE}}\" method=\"POST\"><div><textarea name=\"body\" rows=\"20\" cols=\"80\">{{BODY}}</textarea></div><div><input type=\"submit\" value=\"Save\"></div></form></body></html>";

const DEFAULT_INDEX: &str = "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\"><title>Wiki</title></head><body><h1>Pages</h1><ul class=\"listing\">\n{{ENTRIES}}</ul></body></html>";

/// Loaded templates, built once at startup and shared by all requests
#[derive(Debug, Clone)]
pub struct Renderer {
    templates: HashMap<TemplateKind, String>,
}

impl Renderer {
    /// Renderer using only the built-in templates
    pub fn builtin() -> Self {
        let templates = TemplateKind::ALL
            .iter()
            .map(|kind| (*kind, kind.fallback().to_string()))
            .collect();
        Self { templates }
    }

    /// Load `<name>.html` for each template from `dir`, falling back to the
    /// built-in template when a file is missing
    pub fn load(dir: &Path) -> Result<Self, WikiError> {
        let mut templates = HashMap::new();
        for kind in TemplateKind::ALL {
            let path = dir.join(format!("{}.html", kind.name()));
            let source = match fs::read_to_string(&path) {
                Ok(source) => {
                    info!("Loaded template {:?}", path);
                    source
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    debug!("No template at {:?}, using built-in '{}'", path, kind.name());
                    kind.fallback().to_string()
                }
                Err(e) => {
                    return Err(WikiError::Render(format!("failed to read template {:?}: {}", path, e)));
                }
            };
            templates.insert(kind, source);
        }
        Ok(Self { templates })
    }

    fn template(&self, kind: TemplateKind) -> Result<&str, WikiError> {
        self.templates
            .get(&kind)
            .map(String::as_str)
            .ok_or_else(|| WikiError::Render(format!("template '{}' is not loaded", kind.name())))
    }

    /// Render a page with the view or edit template
    pub fn render(&self, kind: TemplateKind, page: &Page) -> Result<String, WikiError> {
        if kind == TemplateKind::Index {
            return Err(WikiError::Render("the index template renders a title list, not a page".into()));
        }
        let html = self
            .template(kind)?
            .replace("{{TITLE}}", &escape_attr(page.title.as_str()))
            .replace("{{BODY}}", &escape_html(&page.body_text()));
        Ok(html)
    }

    /// Render the index of page titles
    pub fn render_index(&self, titles: &[String]) -> Result<String, WikiError> {
        let mut entries = String::new();
        for title in titles {
            entries.push_str(&format!(
                "  <li><a href=\"/view/{}\">{}</a></li>\n",
                escape_attr(title),
                escape_html(title)
            ));
        }
        Ok(self.template(TemplateKind::Index)?.replace("{{ENTRIES}}", &entries))
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Title;
    use tempfile::tempdir;

    #[test]
    fn view_escapes_body() {
        let page = Page::new(Title::parse("Foo").unwrap(), "<script>x</script> & more");
        let html = Renderer::builtin().render(TemplateKind::View, &page).unwrap();
        assert!(html.contains("<h1>Foo</h1>"));
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt; &amp; more"));
        assert!(html.contains("href=\"/edit/Foo\""));
    }

    #[test]
    fn edit_form_posts_to_save() {
        let page = Page::empty(Title::parse("Foo").unwrap());
        let html = Renderer::builtin().render(TemplateKind::Edit, &page).unwrap();
        assert!(html.contains("action=\"/save/Foo\""));
        assert!(html.contains("name=\"body\""));
    }

    #[test]
    fn index_links_titles() {
        let html = Renderer::builtin()
            .render_index(&["Alpha".to_string(), "Beta".to_string()])
            .unwrap();
        assert!(html.contains("<a href=\"/view/Alpha\">Alpha</a>"));
        assert!(html.contains("<a href=\"/view/Beta\">Beta</a>"));
    }

    #[test]
    fn index_template_cannot_render_a_page() {
        let page = Page::empty(Title::parse("Foo").unwrap());
        let err = Renderer::builtin().render(TemplateKind::Index, &page).unwrap_err();
        assert!(matches!(err, WikiError::Render(_)));
    }

    #[test]
    fn unreadable_template_fails_to_load() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("edit.html")).unwrap();
        assert!(matches!(Renderer::load(dir.path()), Err(WikiError::Render(_))));
    }

    #[test]
    fn load_prefers_files_on_disk() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("view.html"), "custom {{TITLE}}: {{BODY}}").unwrap();
        let renderer = Renderer::load(dir.path()).unwrap();
        let page = Page::new(Title::parse("Foo").unwrap(), "hi");
        assert_eq!(renderer.render(TemplateKind::View, &page).unwrap(), "custom Foo: hi");
        let edit = renderer.render(TemplateKind::Edit, &page).unwrap();
        assert!(edit.contains("Editing Foo"));
    }
}
