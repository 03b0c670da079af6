use wasm_bindgen::JsCast;
use web_sys::HtmlAnchorElement;

use super::js_error;
use crate::error::{Error, Result};
use crate::export::{DownloadSink, ExportedImage};

/// Saves images through a temporary `<a download>` element.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnchorDownload;

impl DownloadSink for AnchorDownload {
    fn deliver(&mut self, image: ExportedImage) -> Result<()> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| Error::Canvas("no document".to_string()))?;
        let anchor = document
            .create_element("a")
            .map_err(js_error)?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|_| Error::Canvas("not an anchor element".to_string()))?;
        anchor.set_href(&image.download_url());
        anchor.set_download(&image.file_name());
        anchor.click();
        tracing::info!(file = %image.file_name(), "download");
        Ok(())
    }
}
