//! Catalog viewer: sidebar of procedure names plus a detail panel.
//!
//! The page is a pure function of the catalog state and the selection.
//! Selecting a name is the only mutation.

pub mod page;
pub mod source;

use crate::model::{is_page_name, ProcedureDoc};
use page::Sidebar;
use source::CatalogSource;
use std::collections::HashSet;
use tracing::warn;

/// Result of the one catalog load per session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CatalogState {
    #[default]
    Loading,
    Failed(String),
    Loaded(Vec<ProcedureDoc>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Unselected,
    Selected(String),
}

impl Selection {
    pub fn is(&self, name: &str) -> bool {
        matches!(self, Selection::Selected(selected) if selected == name)
    }
}

/// What the main panel shows.
#[derive(Debug, PartialEq, Eq)]
pub enum Panel<'a> {
    /// Catalog still loading, nothing selected, or the selection has no match.
    Loading,
    Failed(&'a str),
    Detail(&'a ProcedureDoc),
}

#[derive(Debug, Default)]
pub struct Viewer {
    state: CatalogState,
    selection: Selection,
}

impl Viewer {
    /// A viewer whose catalog is still loading.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the catalog from `source`. A failed load becomes
    /// [`CatalogState::Failed`] rather than an error.
    pub fn load(source: &dyn CatalogSource) -> Self {
        let mut viewer = Self::new();
        viewer.state = match source.load() {
            Ok(records) => CatalogState::Loaded(records),
            Err(e) => {
                let message = format!("{:#}", e);
                warn!(error = %message, "catalog load failed");
                CatalogState::Failed(message)
            }
        };
        viewer
    }

    pub fn select(&mut self, name: impl Into<String>) {
        self.selection = Selection::Selected(name.into());
    }

    pub fn records(&self) -> &[ProcedureDoc] {
        match &self.state {
            CatalogState::Loaded(records) => records,
            _ => &[],
        }
    }

    pub fn current(&self) -> Option<&ProcedureDoc> {
        current(&self.state, &self.selection)
    }

    /// The current page on its own. Sidebar names are not links.
    pub fn render(&self) -> String {
        page::render_page(&self.state, &self.selection, Sidebar::Plain)
    }

    /// Every page of a static site: `index.html` with nothing selected, then
    /// one `<name>.html` per record.
    ///
    /// Records whose name cannot be a file name inside the site directory get
    /// no page. A repeated name gets one page, showing its first record.
    pub fn site_pages(&self) -> Vec<(String, String)> {
        let mut pages = vec![(
            "index.html".to_string(),
            page::render_page(&self.state, &Selection::Unselected, Sidebar::Linked),
        )];
        let mut seen = HashSet::new();
        for record in self.records() {
            if !is_page_name(&record.name) {
                warn!(name = %record.name, "skipping page for record with invalid name");
                continue;
            }
            if !seen.insert(record.name.as_str()) {
                warn!(name = %record.name, "duplicate record name, keeping the first");
                continue;
            }
            let selection = Selection::Selected(record.name.clone());
            pages.push((
                page::page_file_name(&record.name),
                page::render_page(&self.state, &selection, Sidebar::Linked),
            ));
        }
        pages
    }
}

/// Look the selected name up in the loaded list.
pub fn current<'a>(state: &'a CatalogState, selection: &Selection) -> Option<&'a ProcedureDoc> {
    match (state, selection) {
        (CatalogState::Loaded(records), Selection::Selected(name)) => {
            records.iter().find(|r| &r.name == name)
        }
        _ => None,
    }
}

pub fn panel<'a>(state: &'a CatalogState, selection: &Selection) -> Panel<'a> {
    if let CatalogState::Failed(message) = state {
        return Panel::Failed(message);
    }
    match current(state, selection) {
        Some(record) => Panel::Detail(record),
        None => Panel::Loading,
    }
}
