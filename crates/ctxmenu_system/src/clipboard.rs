use parking_lot::Mutex;

use ctxmenu_core::host::Clipboard;
use ctxmenu_core::CtxMenuError;

/// System clipboard backed by `arboard`.
///
/// The handle is opened on first write and kept for the lifetime of this
/// value; on X11 the copied text is only served while a handle is alive.
/// There is no rich bookmark format, so links are written as plain text.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Mutex<Option<arboard::Clipboard>>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<(), CtxMenuError> {
        let mut handle = self.handle.lock();
        if handle.is_none() {
            let opened = arboard::Clipboard::new().map_err(|e| {
                CtxMenuError::clipboard_with_source("Failed to open clipboard", e)
            })?;
            *handle = Some(opened);
        }

        let Some(clipboard) = handle.as_mut() else {
            return Err(CtxMenuError::internal("Clipboard handle missing after open"));
        };
        clipboard
            .set_text(text.to_owned())
            .map_err(|e| CtxMenuError::clipboard_with_source("Failed to write clipboard", e))?;

        tracing::debug!(chars = text.chars().count(), "Wrote text to clipboard");
        Ok(())
    }
}
