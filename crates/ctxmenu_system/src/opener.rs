use ctxmenu_core::host::UrlOpener;
use ctxmenu_core::CtxMenuError;

/// Opens URLs with the platform's default handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemUrlOpener;

impl UrlOpener for SystemUrlOpener {
    fn open_external(&self, url: &str) -> Result<(), CtxMenuError> {
        if url.trim().is_empty() {
            return Err(CtxMenuError::open_url("Empty URL", url));
        }

        open::that(url).map_err(|e| CtxMenuError::open_url_with_source(url, e))?;
        tracing::debug!(url, "Opened URL in external handler");
        Ok(())
    }
}
