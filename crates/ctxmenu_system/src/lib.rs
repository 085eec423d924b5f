//! Operating-system collaborators for ctxmenu.
//!
//! - **opener**: Default browser / URL handler
//! - **clipboard**: System clipboard
//! - **download**: HTTP downloads into the user's download directory

pub mod clipboard;
pub mod download;
pub mod opener;

use std::sync::Arc;

use ctxmenu_core::host::{Collaborators, MenuRenderer};

pub use clipboard::SystemClipboard;
pub use download::HttpDownloader;
pub use opener::SystemUrlOpener;

/// Bundle the system collaborators around a host-provided renderer.
pub fn system_collaborators(renderer: Arc<dyn MenuRenderer>) -> Collaborators {
    Collaborators::new(
        renderer,
        Arc::new(SystemUrlOpener),
        Arc::new(SystemClipboard::new()),
        Arc::new(HttpDownloader::new()),
    )
}
