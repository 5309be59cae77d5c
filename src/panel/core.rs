use std::ops::Index;

use serde::Serialize;
use serde_json::Value;

use crate::config::LayoutConfig;
use crate::error::{PanelError, Result};
use crate::geometry::{Borders, Orientation, Size, interior_height, interior_width};
use crate::logging::{LogLevel, event_with_fields, json_kv};
use crate::metrics::LayoutMetrics;

use super::reflow::distribute;

/// Stable handle to a panel inside a [`Layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PanelId(usize);

impl PanelId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A rectangular region: a content leaf or a subdivided container.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    name: String,
    width: usize,
    height: usize,
    borders: Borders,
    padding: usize,
    percent: Option<u8>,
    content: String,
    orientation: Orientation,
    children: Vec<PanelId>,
    parent: Option<PanelId>,
}

impl Panel {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn borders(&self) -> Borders {
        self.borders
    }

    pub fn padding(&self) -> usize {
        self.padding
    }

    pub fn percent(&self) -> Option<u8> {
        self.percent
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn children(&self) -> &[PanelId] {
        &self.children
    }

    pub fn parent(&self) -> Option<PanelId> {
        self.parent
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Width left for children once borders and padding are removed.
    pub fn interior_width(&self) -> usize {
        interior_width(self.width, self.padding, self.borders)
    }

    /// Height left for children once borders and padding are removed.
    pub fn interior_height(&self) -> usize {
        interior_height(self.height, self.padding, self.borders)
    }
}

/// Initial settings for a layout's root panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSpec {
    pub name: String,
    pub size: Size,
    pub padding: usize,
    pub borders: Borders,
}

impl PanelSpec {
    pub fn new(name: impl Into<String>, width: usize, height: usize) -> Self {
        Self {
            name: name.into(),
            size: Size::new(width, height),
            padding: 0,
            borders: Borders::ALL,
        }
    }

    pub fn with_padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_borders(mut self, borders: Borders) -> Self {
        self.borders = borders;
        self
    }
}

/// Arguments for [`Layout::subdivide`].
///
/// Padding and borders default to the parent's. Explicit `width`/`height`
/// only seed the new children; the reflow that follows sizes them to fill
/// the parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subdivision {
    pub count: usize,
    pub names: Option<Vec<String>>,
    pub orientation: Orientation,
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub padding: Option<usize>,
    pub borders: Option<Borders>,
}

impl Subdivision {
    pub fn new(count: usize, orientation: Orientation) -> Self {
        Self {
            count,
            names: None,
            orientation,
            width: None,
            height: None,
            padding: None,
            borders: None,
        }
    }

    pub fn horizontal(count: usize) -> Self {
        Self::new(count, Orientation::Horizontal)
    }

    pub fn vertical(count: usize) -> Self {
        Self::new(count, Orientation::Vertical)
    }

    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Starting width for every new child.
    ///
    /// [`Layout::subdivide`] reflows before it returns, which overwrites
    /// this value, so it is never observable on the resulting panels.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Starting height for every new child; overwritten by the reflow in
    /// the same way as [`Subdivision::with_width`].
    pub fn with_height(mut self, height: usize) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_padding(mut self, padding: usize) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn with_borders(mut self, borders: Borders) -> Self {
        self.borders = Some(borders);
        self
    }
}

/// Value written through [`Layout::assign`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    /// Share of the parent's free extent; `None` clears it.
    Percent(Option<u8>),
    /// Text for a leaf panel.
    Content(String),
}

impl From<u8> for Assignment {
    fn from(percent: u8) -> Self {
        Assignment::Percent(Some(percent))
    }
}

impl From<&str> for Assignment {
    fn from(content: &str) -> Self {
        Assignment::Content(content.to_string())
    }
}

impl From<String> for Assignment {
    fn from(content: String) -> Self {
        Assignment::Content(content)
    }
}

/// Serialisable view of a panel subtree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelSnapshot {
    pub name: String,
    pub width: usize,
    pub height: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent: Option<u8>,
    pub padding: usize,
    pub borders: Borders,
    pub orientation: Orientation,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PanelSnapshot>,
}

/// A tree of panels stored in an arena.
///
/// Every mutation that can move geometry reflows the whole tree from the
/// root, so after any successful call each container's children exactly fill
/// its interior along the stacking axis.
#[derive(Debug, Clone)]
pub struct Layout {
    nodes: Vec<Option<Panel>>,
    root: PanelId,
    config: LayoutConfig,
}

impl Layout {
    pub fn new(spec: PanelSpec) -> Self {
        Self::with_config(spec, LayoutConfig::default())
    }

    pub fn with_config(spec: PanelSpec, config: LayoutConfig) -> Self {
        let root = Panel {
            name: spec.name,
            width: spec.size.width,
            height: spec.size.height,
            borders: spec.borders,
            padding: spec.padding,
            percent: None,
            content: String::new(),
            orientation: Orientation::None,
            children: Vec::new(),
            parent: None,
        };
        Self {
            nodes: vec![Some(root)],
            root: PanelId(0),
            config,
        }
    }

    pub fn root(&self) -> PanelId {
        self.root
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn panel(&self, id: PanelId) -> Result<&Panel> {
        self.nodes
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or_else(|| PanelError::NotFound(format!("#{}", id.0)))
    }

    fn panel_mut(&mut self, id: PanelId) -> Result<&mut Panel> {
        self.nodes
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or_else(|| PanelError::NotFound(format!("#{}", id.0)))
    }

    pub fn children(&self, id: PanelId) -> Result<&[PanelId]> {
        Ok(self.panel(id)?.children())
    }

    pub fn parent(&self, id: PanelId) -> Result<Option<PanelId>> {
        Ok(self.panel(id)?.parent())
    }

    /// `from` and all of its descendants in depth-first pre-order.
    pub fn descendants(&self, from: PanelId) -> Result<Vec<PanelId>> {
        let mut order = Vec::new();
        let mut pending = vec![from];
        while let Some(id) = pending.pop() {
            let panel = self.panel(id)?;
            order.push(id);
            pending.extend(panel.children.iter().rev().copied());
        }
        Ok(order)
    }

    /// First panel named `name` in a depth-first walk of `from`'s subtree.
    pub fn find(&self, from: PanelId, name: &str) -> Result<PanelId> {
        let mut pending = vec![from];
        while let Some(id) = pending.pop() {
            let panel = self.panel(id)?;
            if panel.name == name {
                return Ok(id);
            }
            pending.extend(panel.children.iter().rev().copied());
        }
        Err(PanelError::NotFound(name.to_string()))
    }

    /// Look `name` up from the root.
    pub fn get(&self, name: &str) -> Result<PanelId> {
        self.find(self.root, name)
    }

    /// Find `name` under `from` and apply `value` to it.
    pub fn assign(
        &mut self,
        from: PanelId,
        name: &str,
        value: impl Into<Assignment>,
    ) -> Result<()> {
        let target = self.find(from, name)?;
        match value.into() {
            Assignment::Percent(percent) => self.set_percent(target, percent),
            Assignment::Content(content) => self.set_content(target, content),
        }
    }

    pub fn set_content(&mut self, id: PanelId, content: impl Into<String>) -> Result<()> {
        let panel = self.panel_mut(id)?;
        if !panel.is_leaf() {
            return Err(PanelError::invalid(format!(
                "subdivided panel `{}` cannot hold content",
                panel.name
            )));
        }
        panel.content = content.into();
        Ok(())
    }

    pub fn set_name(&mut self, id: PanelId, name: impl Into<String>) -> Result<()> {
        self.panel_mut(id)?.name = name.into();
        Ok(())
    }

    /// Claim `percent` of the parent's free extent, or share equally on `None`.
    pub fn set_percent(&mut self, id: PanelId, percent: Option<u8>) -> Result<()> {
        let panel = self.panel(id)?;
        if panel.parent.is_none() {
            return Err(PanelError::invalid(format!(
                "root panel `{}` has no parent to take a percent of",
                panel.name
            )));
        }
        if let Some(p) = percent.filter(|p| *p > 100) {
            return Err(PanelError::invalid(format!(
                "percent {p} for panel `{}` is outside 0..=100",
                panel.name
            )));
        }
        self.panel_mut(id)?.percent = percent;
        self.reflow()
    }

    pub fn set_padding(&mut self, id: PanelId, padding: usize) -> Result<()> {
        self.panel_mut(id)?.padding = padding;
        self.reflow()
    }

    pub fn set_borders(&mut self, id: PanelId, borders: Borders) -> Result<()> {
        self.panel_mut(id)?.borders = borders;
        self.reflow()
    }

    /// Give the root panel a new footprint and refit the tree.
    pub fn resize(&mut self, size: Size) -> Result<()> {
        let root = self.root;
        let panel = self.panel_mut(root)?;
        panel.width = size.width;
        panel.height = size.height;
        self.reflow()
    }

    /// Swap a container between side-by-side and stacked children.
    pub fn toggle_direction(&mut self, id: PanelId) -> Result<()> {
        let panel = self.panel_mut(id)?;
        let toggled = panel.orientation.toggled().ok_or_else(|| {
            PanelError::invalid(format!("panel `{}` has no direction to change", panel.name))
        })?;
        panel.orientation = toggled;
        let name = panel.name.clone();
        self.emit(
            "layout",
            "direction_toggled",
            [
                json_kv("panel", name),
                json_kv("orientation", format!("{toggled:?}")),
            ],
        );
        self.reflow()
    }

    /// Replace `id`'s children with `subdivision.count` fresh leaves.
    pub fn subdivide(&mut self, id: PanelId, subdivision: Subdivision) -> Result<Vec<PanelId>> {
        let parent = self.panel(id)?;
        let Subdivision {
            count,
            names,
            orientation,
            width,
            height,
            padding,
            borders,
        } = subdivision;

        if !parent.content.is_empty() {
            return Err(PanelError::invalid(format!(
                "panel `{}` holds content and cannot be subdivided",
                parent.name
            )));
        }
        if count == 0 {
            return Err(PanelError::invalid(format!(
                "panel `{}` needs at least one subdivision",
                parent.name
            )));
        }
        if orientation == Orientation::None {
            return Err(PanelError::invalid(format!(
                "panel `{}` must be subdivided horizontally or vertically",
                parent.name
            )));
        }
        if let Some(names) = names.as_ref().filter(|names| names.len() != count) {
            return Err(PanelError::invalid(format!(
                "{} names given for {count} subdivisions of `{}`",
                names.len(),
                parent.name
            )));
        }

        let inner_width = parent.interior_width();
        let inner_height = parent.interior_height();
        let (seed_width, seed_height) = match orientation {
            Orientation::Horizontal => (inner_width / count, inner_height),
            _ => (inner_width, inner_height / count),
        };
        let padding = padding.unwrap_or(parent.padding);
        let borders = borders.unwrap_or(parent.borders);
        let parent_name = parent.name.clone();
        let previous = parent.children.clone();

        for child in previous {
            self.release(child)?;
        }

        let mut names = names.unwrap_or_default().into_iter();
        let mut created = Vec::with_capacity(count);
        for n in 1..=count {
            let name = names
                .next()
                .unwrap_or_else(|| format!("{parent_name} daughter #{n}"));
            created.push(self.insert(Panel {
                name,
                width: width.unwrap_or(seed_width),
                height: height.unwrap_or(seed_height),
                borders,
                padding,
                percent: None,
                content: String::new(),
                orientation: Orientation::None,
                children: Vec::new(),
                parent: Some(id),
            }));
        }

        let panel = self.panel_mut(id)?;
        panel.children = created.clone();
        panel.orientation = orientation;

        self.record(LayoutMetrics::record_subdivision);
        self.emit(
            "layout",
            "subdivided",
            [
                json_kv("panel", parent_name),
                json_kv("count", count),
                json_kv("orientation", format!("{orientation:?}")),
            ],
        );

        self.reflow()?;
        Ok(created)
    }

    /// Refit the whole tree from the root. A lone leaf is left as is.
    pub fn reflow(&mut self) -> Result<()> {
        let root = self.root;
        if self.panel(root)?.is_leaf() {
            return Ok(());
        }
        self.seal(root)
    }

    /// Resize `id`'s children to fill its interior, then do the same for
    /// every container below it.
    pub fn seal(&mut self, id: PanelId) -> Result<()> {
        let sealed = self.seal_tree(id)?;
        self.record(|metrics| metrics.record_reflow(sealed));
        let name = self.panel(id)?.name.clone();
        self.emit(
            "layout",
            "sealed",
            [json_kv("panel", name), json_kv("containers", sealed)],
        );
        Ok(())
    }

    fn seal_tree(&mut self, id: PanelId) -> Result<usize> {
        self.seal_children(id)?;
        let mut sealed = 1;
        for child in self.panel(id)?.children.clone() {
            if !self.panel(child)?.is_leaf() {
                sealed += self.seal_tree(child)?;
            }
        }
        Ok(sealed)
    }

    fn seal_children(&mut self, id: PanelId) -> Result<()> {
        let panel = self.panel(id)?;
        if panel.is_leaf() {
            return Err(PanelError::invalid(format!(
                "panel `{}` has no children to seal",
                panel.name
            )));
        }
        let (axis, cross) = match panel.orientation {
            Orientation::Horizontal => (panel.interior_width(), panel.interior_height()),
            Orientation::Vertical => (panel.interior_height(), panel.interior_width()),
            Orientation::None => {
                return Err(PanelError::invalid(format!(
                    "panel `{}` has no direction",
                    panel.name
                )));
            }
        };
        let orientation = panel.orientation;
        let children = panel.children.clone();

        let percents = children
            .iter()
            .map(|child| self.panel(*child).map(Panel::percent))
            .collect::<Result<Vec<_>>>()?;
        let extents = distribute(axis, &percents, self.config.remainder_policy);

        for (child, extent) in children.into_iter().zip(extents) {
            let child = self.panel_mut(child)?;
            if orientation == Orientation::Horizontal {
                child.width = extent;
                child.height = cross;
            } else {
                child.height = extent;
                child.width = cross;
            }
        }
        Ok(())
    }

    /// Serialisable copy of `id`'s subtree.
    pub fn snapshot(&self, id: PanelId) -> Result<PanelSnapshot> {
        let panel = self.panel(id)?;
        let children = panel
            .children
            .iter()
            .map(|child| self.snapshot(*child))
            .collect::<Result<Vec<_>>>()?;
        Ok(PanelSnapshot {
            name: panel.name.clone(),
            width: panel.width,
            height: panel.height,
            percent: panel.percent,
            padding: panel.padding,
            borders: panel.borders,
            orientation: panel.orientation,
            content: panel.content.clone(),
            children,
        })
    }

    /// Hash of every live panel's name, settings and geometry.
    pub fn fingerprint(&self) -> blake3::Hash {
        let mut hasher = blake3::Hasher::new();
        for id in self.descendants(self.root).unwrap_or_default() {
            let Ok(panel) = self.panel(id) else {
                continue;
            };
            hasher.update(panel.name.as_bytes());
            hasher.update(&[0]);
            for value in [panel.width, panel.height, panel.padding] {
                hasher.update(&(value as u64).to_le_bytes());
            }
            hasher.update(&[
                panel.percent.unwrap_or(u8::MAX),
                panel.orientation as u8,
                u8::from(panel.borders.top),
                u8::from(panel.borders.bottom),
                u8::from(panel.borders.left),
                u8::from(panel.borders.right),
            ]);
            hasher.update(panel.content.as_bytes());
            hasher.update(&[0]);
        }
        hasher.finalize()
    }

    fn insert(&mut self, panel: Panel) -> PanelId {
        self.nodes.push(Some(panel));
        PanelId(self.nodes.len() - 1)
    }

    /// Drop `id` and its subtree from the arena.
    fn release(&mut self, id: PanelId) -> Result<()> {
        for dead in self.descendants(id)? {
            self.nodes[dead.0] = None;
        }
        Ok(())
    }

    pub(crate) fn record(&self, update: impl FnOnce(&mut LayoutMetrics)) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                update(&mut *guard);
            }
        }
    }

    pub(crate) fn emit(
        &self,
        scope: &str,
        message: &str,
        fields: impl IntoIterator<Item = (String, Value)>,
    ) {
        if let Some(logger) = self.config.logger.as_ref() {
            let target = format!("{}::{scope}", self.config.log_target);
            let event = event_with_fields(LogLevel::Debug, &target, message, fields);
            let _ = logger.log_event(event);
        }
    }
}

impl Index<&str> for Layout {
    type Output = Panel;

    /// # Panics
    /// Panics if no panel is named `name`; use [`Layout::get`] to handle that.
    fn index(&self, name: &str) -> &Panel {
        match self.get(name).and_then(|id| self.panel(id)) {
            Ok(panel) => panel,
            Err(err) => panic!("{err}"),
        }
    }
}
