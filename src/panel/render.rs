use std::collections::HashMap;

use blake3::Hash;

use crate::compose::{side_by_side, stack};
use crate::error::Result;
use crate::frame::Frame;
use crate::geometry::Orientation;
use crate::logging::json_kv;
use crate::metrics::LayoutMetrics;
use crate::substitute::{Variables, substitute};

use super::core::{Layout, Panel, PanelId};

/// Framed leaf blocks from earlier renders, keyed by the hash of their input.
#[derive(Debug, Default)]
pub struct RenderCache {
    entries: HashMap<PanelId, CachedBlock>,
    hits: u64,
}

#[derive(Debug, Clone)]
struct CachedBlock {
    hash: Hash,
    block: String,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of leaves served from the cache so far.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Forget panels that are no longer part of `layout`.
    pub fn prune(&mut self, layout: &Layout) {
        self.entries.retain(|id, _| layout.panel(*id).is_ok());
    }

    fn fetch(&mut self, id: PanelId, hash: Hash, render: impl FnOnce() -> String) -> String {
        if let Some(cached) = self.entries.get(&id).filter(|cached| cached.hash == hash) {
            self.hits = self.hits.saturating_add(1);
            return cached.block.clone();
        }
        let block = render();
        self.entries.insert(
            id,
            CachedBlock {
                hash,
                block: block.clone(),
            },
        );
        block
    }
}

impl Layout {
    /// Render `id` into a block of text.
    ///
    /// A panel large enough to hold its own borders renders to exactly
    /// `height` lines of exactly `width` characters.
    pub fn render(&self, id: PanelId, vars: &Variables) -> Result<String> {
        let block = self.render_node(id, vars, None)?;
        self.finish_render(id, &block, 0);
        Ok(block)
    }

    /// Like [`Layout::render`], reusing leaf blocks whose input is unchanged.
    pub fn render_cached(
        &self,
        id: PanelId,
        vars: &Variables,
        cache: &mut RenderCache,
    ) -> Result<String> {
        let before = cache.hits();
        let block = self.render_node(id, vars, Some(&mut *cache))?;
        self.finish_render(id, &block, (cache.hits() - before) as usize);
        Ok(block)
    }

    fn render_node(
        &self,
        id: PanelId,
        vars: &Variables,
        mut cache: Option<&mut RenderCache>,
    ) -> Result<String> {
        let panel = self.panel(id)?;
        let frame = panel_frame(panel);

        if panel.is_leaf() {
            let text = substitute(panel.content(), vars)?;
            return Ok(match cache {
                Some(cache) => {
                    let hash = leaf_hash(&text, &frame);
                    cache.fetch(id, hash, || frame.apply(&text))
                }
                None => frame.apply(&text),
            });
        }

        let blocks = self.render_children(panel, vars, &mut cache)?;
        let composed = match panel.orientation() {
            Orientation::Horizontal => side_by_side(&blocks),
            _ => stack(&blocks),
        };
        Ok(frame.apply(&composed))
    }

    fn render_children(
        &self,
        panel: &Panel,
        vars: &Variables,
        cache: &mut Option<&mut RenderCache>,
    ) -> Result<Vec<String>> {
        panel
            .children()
            .iter()
            .map(|child| self.render_node(*child, vars, cache.as_deref_mut()))
            .collect()
    }

    fn finish_render(&self, id: PanelId, block: &str, cache_hits: usize) {
        self.record(|metrics: &mut LayoutMetrics| {
            metrics.record_render();
            metrics.record_cache_hits(cache_hits);
        });
        let name = self.panel(id).map(|panel| panel.name().to_string());
        self.emit(
            "render",
            "rendered",
            [
                json_kv("panel", name.unwrap_or_default()),
                json_kv("lines", block.split('\n').count()),
                json_kv("cache_hits", cache_hits),
            ],
        );
    }
}

/// The frame a panel draws around its own content.
fn panel_frame(panel: &Panel) -> Frame {
    Frame {
        width: Some(panel.width()),
        height: Some(panel.height().saturating_sub(panel.borders().edge_cells())),
        padding: panel.padding(),
        borders: panel.borders(),
    }
}

fn leaf_hash(text: &str, frame: &Frame) -> Hash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(text.as_bytes());
    for value in [frame.width, frame.height] {
        hasher.update(&value.map_or(u64::MAX, |v| v as u64).to_le_bytes());
    }
    hasher.update(&(frame.padding as u64).to_le_bytes());
    hasher.update(&[
        u8::from(frame.borders.top),
        u8::from(frame.borders.bottom),
        u8::from(frame.borders.left),
        u8::from(frame.borders.right),
    ]);
    hasher.finalize()
}
