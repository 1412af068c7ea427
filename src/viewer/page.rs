//! HTML for the viewer: sidebar navigation plus the main panel.

use super::{panel, CatalogState, Panel, Selection};
use crate::model::is_page_name;
use crate::render::html::{html_escape, page_close, page_open, render_detail};

/// How sidebar entries are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sidebar {
    /// Names only. A single page has no sibling pages to link to.
    Plain,
    /// Each name links to its `<name>.html` page in a generated site.
    Linked,
}

/// Render the whole page for `(state, selection)`.
pub fn render_page(state: &CatalogState, selection: &Selection, sidebar: Sidebar) -> String {
    let title = match selection {
        Selection::Selected(name) => name.as_str(),
        Selection::Unselected => "Procedures",
    };
    let mut out = page_open(title);
    out.push_str(&render_sidebar(state, selection, sidebar));
    out.push_str("<main>\n");
    out.push_str(&render_panel(panel(state, selection)));
    out.push_str("</main>\n");
    out.push_str(page_close());
    out
}

fn render_sidebar(state: &CatalogState, selection: &Selection, sidebar: Sidebar) -> String {
    let mut out = String::from("<aside>\n<ul>\n");
    if let CatalogState::Loaded(records) = state {
        for record in records {
            let class = if selection.is(&record.name) {
                " class=\"active\""
            } else {
                ""
            };
            let name = html_escape(&record.name);
            if sidebar == Sidebar::Linked && is_page_name(&record.name) {
                out.push_str(&format!(
                    "  <li><a href=\"{}\"{}>{}</a></li>\n",
                    html_escape(&page_href(&record.name)),
                    class,
                    name
                ));
            } else {
                out.push_str(&format!("  <li><span{}>{}</span></li>\n", class, name));
            }
        }
    }
    out.push_str("</ul>\n</aside>\n");
    out
}

fn render_panel(panel: Panel<'_>) -> String {
    match panel {
        Panel::Loading => "<p>loading....</p>\n".to_string(),
        Panel::Failed(message) => format!(
            "<p class=\"error\">Failed to load procedures: {}</p>\n",
            html_escape(message)
        ),
        Panel::Detail(record) => render_detail(record),
    }
}

/// File name of a record's page in a generated site.
pub fn page_file_name(name: &str) -> String {
    format!("{}.html", name)
}

fn page_href(name: &str) -> String {
    page_file_name(name)
        .replace('%', "%25")
        .replace(' ', "%20")
        .replace('#', "%23")
        .replace('?', "%3F")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProcedureDoc;

    fn loaded() -> CatalogState {
        CatalogState::Loaded(vec![
            ProcedureDoc {
                name: "LoginUser".to_string(),
                description: "Authenticates a user.".to_string(),
                ..ProcedureDoc::default()
            },
            ProcedureDoc {
                name: "Get Users".to_string(),
                ..ProcedureDoc::default()
            },
        ])
    }

    #[test]
    fn sidebar_lists_every_record() {
        let out = render_page(&loaded(), &Selection::Unselected, Sidebar::Linked);
        assert!(out.contains("<li><a href=\"LoginUser.html\">LoginUser</a></li>"));
        assert!(out.contains("<li><a href=\"Get%20Users.html\">Get Users</a></li>"));
        assert!(out.contains("<p>loading....</p>"));
    }

    #[test]
    fn selected_record_is_highlighted_and_shown() {
        let selection = Selection::Selected("LoginUser".to_string());
        let out = render_page(&loaded(), &selection, Sidebar::Linked);
        assert!(out.contains("<a href=\"LoginUser.html\" class=\"active\">LoginUser</a>"));
        assert!(out.contains("<p>Authenticates a user.</p>"));
        assert!(!out.contains("loading...."));
    }

    #[test]
    fn failed_state_renders_error() {
        let state = CatalogState::Failed("disk <gone>".to_string());
        let out = render_page(&state, &Selection::Unselected, Sidebar::Plain);
        assert!(out.contains("Failed to load procedures: disk &lt;gone&gt;"));
        assert!(!out.contains("loading...."));
    }

    #[test]
    fn loading_state_has_empty_sidebar() {
        let out = render_page(&CatalogState::Loading, &Selection::Unselected, Sidebar::Plain);
        assert!(out.contains("<aside>\n<ul>\n</ul>\n</aside>"));
        assert!(out.contains("loading...."));
    }

    #[test]
    fn same_inputs_same_page() {
        let selection = Selection::Selected("LoginUser".to_string());
        assert_eq!(
            render_page(&loaded(), &selection, Sidebar::Plain),
            render_page(&loaded(), &selection, Sidebar::Plain)
        );
    }

    #[test]
    fn plain_sidebar_has_no_links() {
        let selection = Selection::Selected("LoginUser".to_string());
        let out = render_page(&loaded(), &selection, Sidebar::Plain);
        assert!(out.contains("<li><span class=\"active\">LoginUser</span></li>"));
        assert!(out.contains("<li><span>Get Users</span></li>"));
        assert!(!out.contains("href="));
    }

    #[test]
    fn path_like_name_is_never_linked() {
        let state = CatalogState::Loaded(vec![ProcedureDoc {
            name: "../../escaped".to_string(),
            ..ProcedureDoc::default()
        }]);
        let out = render_page(&state, &Selection::Unselected, Sidebar::Linked);
        assert!(out.contains("<li><span>../../escaped</span></li>"));
        assert!(!out.contains("href="));
    }
}
