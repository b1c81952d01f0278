use rayon::prelude::*;

use crate::assets::decode::{DecodedImage, decode_image};
use crate::assets::selection::{Selection, empty_selection};
use crate::foundation::color::Rgba8;
use crate::foundation::core::Category;
use crate::foundation::error::{PfpError, PfpResult};
use crate::render::surface::Surface;
use crate::store::object::ObjectStore;

/// Edge length of exported images.
pub const EXPORT_SIZE: u32 = 2400;
/// Edge length of low-resolution previews.
pub const PREVIEW_SIZE: u32 = 600;

/// Lossless encoded composition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// PNG bytes.
    pub png: Vec<u8>,
}

/// Compositor settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositorOpts {
    /// Export surface edge in pixels.
    pub size: u32,
    /// Preview surface edge in pixels.
    pub preview_size: u32,
    /// Root prefix of the high-resolution tier.
    pub high_res_root: String,
}

impl Default for CompositorOpts {
    fn default() -> Self {
        Self {
            size: EXPORT_SIZE,
            preview_size: PREVIEW_SIZE,
            high_res_root: "HD_ASSETS".to_owned(),
        }
    }
}

/// Composites a selection into a single PNG.
pub struct Compositor<'a> {
    store: &'a dyn ObjectStore,
    opts: CompositorOpts,
}

impl<'a> Compositor<'a> {
    /// Compositor reading layers from `store`.
    pub fn new(store: &'a dyn ObjectStore, opts: CompositorOpts) -> Self {
        Self { store, opts }
    }

    /// Settings in use.
    pub fn opts(&self) -> &CompositorOpts {
        &self.opts
    }

    /// Compose the export image from the high-resolution counterpart of every selected layer.
    ///
    /// `fallback` fills the surface only when the background slot is empty. Any layer that
    /// fails to fetch or decode aborts the whole composition.
    #[tracing::instrument(skip(self, selection), fields(size = self.opts.size))]
    pub fn compose(&self, selection: &Selection, fallback: Rgba8) -> PfpResult<EncodedImage> {
        let high_res = selection_with_root(selection, &self.opts.high_res_root)?;
        self.render(&high_res, fallback, self.opts.size)
    }

    /// Compose a preview from the selected low-resolution assets as-is.
    #[tracing::instrument(skip(self, selection), fields(size = self.opts.preview_size))]
    pub fn compose_preview(
        &self,
        selection: &Selection,
        fallback: Rgba8,
    ) -> PfpResult<EncodedImage> {
        self.render(selection, fallback, self.opts.preview_size)
    }

    fn render(&self, layers: &Selection, fallback: Rgba8, size: u32) -> PfpResult<EncodedImage> {
        let mut surface = Surface::new(size, size)?;
        if layers.get(Category::Background).is_none() {
            surface.fill(fallback);
        }

        let decoded = self.fetch_layers(layers)?;
        for (category, layer) in Category::ALL.into_iter().zip(decoded) {
            let Some(layer) = layer else {
                continue;
            };
            surface
                .draw_stretched(&layer)
                .map_err(|e| PfpError::composition(format!("draw {category} layer: {e}")))?;
        }

        let png = surface.encode_png()?;
        tracing::debug!(bytes = png.len(), "composition encoded");
        Ok(EncodedImage {
            width: size,
            height: size,
            png,
        })
    }

    /// Fetch and decode every selected layer in parallel.
    ///
    /// The result is indexed by z-order, independent of completion order.
    fn fetch_layers(&self, layers: &Selection) -> PfpResult<Vec<Option<DecodedImage>>> {
        Category::ALL
            .par_iter()
            .map(|&category| -> PfpResult<Option<DecodedImage>> {
                let Some(asset) = layers.get(category) else {
                    return Ok(None);
                };
                let bytes = self.store.fetch(asset).map_err(|e| {
                    PfpError::composition(format!("fetch {category} layer \"{asset}\": {e}"))
                })?;
                let image = decode_image(&bytes).map_err(|e| {
                    PfpError::composition(format!("decode {category} layer \"{asset}\": {e}"))
                })?;
                Ok(Some(image))
            })
            .collect()
    }
}

/// Swap every selected locator to `root`, preserving relative paths.
pub fn selection_with_root(selection: &Selection, root: &str) -> PfpResult<Selection> {
    let mut out = empty_selection();
    for (category, asset) in selection.iter() {
        *out.get_mut(category) = asset.as_ref().map(|a| a.with_root(root)).transpose()?;
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/compose.rs"]
mod tests;
