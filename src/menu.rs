//! Context menu descriptors.
//!
//! The host window renders the menu; this module only decides which entries
//! it has. Link targets get the two link entries, everything else gets the
//! page entries.

use serde::{Deserialize, Serialize};

// ============================================================================
// ContextMenuParams
// ============================================================================

/// What the user right-clicked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextMenuParams {
    /// Link under the pointer, if any.
    #[serde(default)]
    pub link_url: Option<String>,
    /// Pointer position, relative to the surface.
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
}

impl ContextMenuParams {
    /// Returns the link under the pointer, ignoring empty values.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.link_url.as_deref().filter(|link| !link.is_empty())
    }
}

// ============================================================================
// MenuItem
// ============================================================================

/// Zoom step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ZoomDirection {
    In,
    Out,
    Reset,
}

/// One context menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "camelCase")]
pub enum MenuItem {
    Copy,
    SelectAll,
    SaveAs,
    OpenLinkInNewTab { url: String },
    CopyLink { url: String },
    Zoom(ZoomDirection),
    Inspect,
    Separator,
}

impl MenuItem {
    /// Label shown to the user.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Copy => "Copy",
            Self::SelectAll => "Select All",
            Self::SaveAs => "Save Page As...",
            Self::OpenLinkInNewTab { .. } => "Open Link in New Tab",
            Self::CopyLink { .. } => "Copy Link Address",
            Self::Zoom(ZoomDirection::In) => "Zoom In",
            Self::Zoom(ZoomDirection::Out) => "Zoom Out",
            Self::Zoom(ZoomDirection::Reset) => "Reset Zoom",
            Self::Inspect => "Inspect Element",
            Self::Separator => "",
        }
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builds the menu for `params`.
///
/// `Inspect` is offered only when `devtools` is enabled.
#[must_use]
pub fn build_context_menu(params: &ContextMenuParams, devtools: bool) -> Vec<MenuItem> {
    if let Some(link) = params.link() {
        return vec![
            MenuItem::OpenLinkInNewTab {
                url: link.to_string(),
            },
            MenuItem::CopyLink {
                url: link.to_string(),
            },
        ];
    }

    let mut items = vec![
        MenuItem::Copy,
        MenuItem::SelectAll,
        MenuItem::SaveAs,
        MenuItem::Separator,
        MenuItem::Zoom(ZoomDirection::In),
        MenuItem::Zoom(ZoomDirection::Out),
        MenuItem::Zoom(ZoomDirection::Reset),
    ];

    if devtools {
        items.push(MenuItem::Separator);
        items.push(MenuItem::Inspect);
    }

    items
}
