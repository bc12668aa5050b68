//! Navigation artifacts derived from the chunk sequence.
//!
//! Everything here is an output artifact for the host to embed: node trees
//! for the sidebar and jump dropdown, a fixed two-level breadcrumb trail,
//! previous/next wiring from array adjacency, and a keyboard-navigation
//! script string. No logic in this module executes client-side behavior.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::chunk::{Chunk, ChunkConfig};
use crate::text::escape_html;

/// A navigation endpoint (previous/next target).
#[derive(Debug, Clone, Serialize)]
pub struct NavTarget {
    pub title: String,
    pub href: String,
    pub chunk_id: u32,
}

/// Previous/next wiring for one chunk.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PrevNext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<NavTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<NavTarget>,
}

/// One crumb in a breadcrumb trail.
#[derive(Debug, Clone, Serialize)]
pub struct Crumb {
    pub title: String,
    pub href: String,
}

/// A sidebar sub-item (one per chunk sub-heading).
#[derive(Debug, Clone, Serialize)]
pub struct SidebarSubItem {
    pub title: String,
    pub href: String,
}

/// A sidebar item (one per chunk).
#[derive(Debug, Clone, Serialize)]
pub struct SidebarItem {
    pub title: String,
    pub href: String,
    pub chunk_id: u32,
    pub sub_items: Vec<SidebarSubItem>,
}

/// Sidebar outline: structured items plus a rendered HTML tree.
#[derive(Debug, Clone, Serialize)]
pub struct Sidebar {
    pub items: Vec<SidebarItem>,
    pub rendered_tree: String,
}

/// One option in the jump dropdown.
#[derive(Debug, Clone, Serialize)]
pub struct JumpOption {
    pub value: String,
    pub text: String,
    pub chunk_id: u32,
}

/// Jump-to-chunk dropdown artifact.
#[derive(Debug, Clone, Serialize)]
pub struct JumpDropdown {
    pub options: Vec<JumpOption>,
    pub rendered: String,
}

/// Keyboard navigation bindings plus the embeddable script artifact.
#[derive(Debug, Clone, Serialize)]
pub struct KeyboardShortcuts {
    pub bindings: BTreeMap<String, String>,
    pub script: String,
}

/// The complete navigation bundle.
#[derive(Debug, Clone, Serialize)]
pub struct Navigation {
    pub prev_next: BTreeMap<u32, PrevNext>,
    pub breadcrumbs: BTreeMap<u32, Vec<Crumb>>,
    pub sidebar: Sidebar,
    pub jump_dropdown: JumpDropdown,
    pub keyboard_shortcuts: KeyboardShortcuts,
}

/// Derive the navigation bundle from the finalized chunk sequence.
pub fn build_navigation(chunks: &[Chunk], config: &ChunkConfig) -> Navigation {
    Navigation {
        prev_next: build_prev_next(chunks, config),
        breadcrumbs: build_breadcrumbs(chunks, config),
        sidebar: build_sidebar(chunks, config),
        jump_dropdown: build_jump_dropdown(chunks, config),
        keyboard_shortcuts: build_keyboard_shortcuts(chunks, config),
    }
}

fn nav_target(chunk: &Chunk, config: &ChunkConfig) -> NavTarget {
    NavTarget {
        title: chunk.title.clone(),
        href: chunk.href(config),
        chunk_id: chunk.id,
    }
}

fn build_prev_next(chunks: &[Chunk], config: &ChunkConfig) -> BTreeMap<u32, PrevNext> {
    let mut prev_next = BTreeMap::new();
    for (i, chunk) in chunks.iter().enumerate() {
        let previous = i
            .checked_sub(1)
            .and_then(|p| chunks.get(p))
            .map(|c| nav_target(c, config));
        let next = chunks.get(i + 1).map(|c| nav_target(c, config));
        prev_next.insert(chunk.id, PrevNext { previous, next });
    }
    prev_next
}

/// Fixed two-level trail: Home, then the current chunk. This deliberately
/// does not mirror TOC depth.
fn build_breadcrumbs(chunks: &[Chunk], config: &ChunkConfig) -> BTreeMap<u32, Vec<Crumb>> {
    let mut breadcrumbs = BTreeMap::new();
    for chunk in chunks {
        breadcrumbs.insert(
            chunk.id,
            vec![
                Crumb {
                    title: "Home".to_string(),
                    href: config.base_url.clone(),
                },
                Crumb {
                    title: chunk.title.clone(),
                    href: chunk.href(config),
                },
            ],
        );
    }
    breadcrumbs
}

fn build_sidebar(chunks: &[Chunk], config: &ChunkConfig) -> Sidebar {
    let items: Vec<SidebarItem> = chunks
        .iter()
        .map(|chunk| SidebarItem {
            title: chunk.title.clone(),
            href: chunk.href(config),
            chunk_id: chunk.id,
            sub_items: chunk
                .sub_headings()
                .map(|h| SidebarSubItem {
                    title: h.text.clone(),
                    href: format!("{}#{}", chunk.href(config), h.slug),
                })
                .collect(),
        })
        .collect();

    let mut html = String::from("<nav class=\"sidebar\"><ul>");
    for item in &items {
        html.push_str("<li><a href=\"");
        html.push_str(&escape_html(&item.href));
        html.push_str("\">");
        html.push_str(&escape_html(&item.title));
        html.push_str("</a>");
        if !item.sub_items.is_empty() {
            html.push_str("<ul>");
            for sub in &item.sub_items {
                html.push_str("<li><a href=\"");
                html.push_str(&escape_html(&sub.href));
                html.push_str("\">");
                html.push_str(&escape_html(&sub.title));
                html.push_str("</a></li>");
            }
            html.push_str("</ul>");
        }
        html.push_str("</li>");
    }
    html.push_str("</ul></nav>");

    Sidebar {
        items,
        rendered_tree: html,
    }
}

fn build_jump_dropdown(chunks: &[Chunk], config: &ChunkConfig) -> JumpDropdown {
    let options: Vec<JumpOption> = chunks
        .iter()
        .map(|chunk| JumpOption {
            value: chunk.href(config),
            text: chunk.title.clone(),
            chunk_id: chunk.id,
        })
        .collect();

    let mut html =
        String::from("<select class=\"jump-nav\" onchange=\"window.location.href=this.value\">");
    for option in &options {
        html.push_str("<option value=\"");
        html.push_str(&escape_html(&option.value));
        html.push_str("\">");
        html.push_str(&escape_html(&option.text));
        html.push_str("</option>");
    }
    html.push_str("</select>");

    JumpDropdown {
        options,
        rendered: html,
    }
}

fn build_keyboard_shortcuts(chunks: &[Chunk], config: &ChunkConfig) -> KeyboardShortcuts {
    let mut bindings = BTreeMap::new();
    bindings.insert("ArrowLeft".to_string(), "previous".to_string());
    bindings.insert("ArrowRight".to_string(), "next".to_string());
    bindings.insert("Home".to_string(), "home".to_string());
    bindings.insert("h".to_string(), "home".to_string());

    let home_href = chunks
        .first()
        .map(|c| c.href(config))
        .unwrap_or_else(|| config.base_url.clone());

    let script = format!(
        r#"document.addEventListener('keydown', function (event) {{
  if (event.defaultPrevented) return;
  var tag = event.target && event.target.tagName;
  if (tag === 'INPUT' || tag === 'TEXTAREA' || tag === 'SELECT') return;
  if (event.key === 'ArrowLeft') {{
    var prev = document.querySelector('a[rel="prev"]');
    if (prev) window.location.href = prev.href;
  }} else if (event.key === 'ArrowRight') {{
    var next = document.querySelector('a[rel="next"]');
    if (next) window.location.href = next.href;
  }} else if (event.key === 'Home' || event.key === 'h') {{
    window.location.href = '{home}';
  }}
}});"#,
        home = home_href
    );

    KeyboardShortcuts { bindings, script }
}
