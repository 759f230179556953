//! Frame driver: pointer picking, highlight update, render hand-off.

use std::sync::Arc;

use foundation::math::{Vec2, Vec3};
use runtime::Frame;

use crate::camera::Camera;
use crate::highlight::{EntryHighlight, HighlightState};
use crate::picking::{PickOptions, pick_ray};
use crate::registry::ConsiderationRegistry;

/// Marker state read once per frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerView {
    pub position: Vec3,
    pub active_label: Option<String>,
}

/// Whatever owns the marker (normally the marker controller).
pub trait MarkerSource {
    fn marker_view(&self) -> MarkerView;
}

impl MarkerSource for MarkerView {
    fn marker_view(&self) -> MarkerView {
        self.clone()
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug)]
pub struct SceneView<'a> {
    pub frame: Frame,
    pub registry: &'a ConsiderationRegistry,
    pub marker: &'a MarkerView,
    pub hovered: Option<usize>,
    pub highlights: &'a [EntryHighlight],
}

impl SceneView<'_> {
    pub fn hovered_label(&self) -> Option<&str> {
        self.hovered
            .and_then(|idx| self.registry.entry(idx))
            .map(|e| e.label.as_str())
    }
}

/// Rendering collaborator. Called exactly once per [`SceneLoop::tick`].
pub trait SceneRenderer {
    fn render(&mut self, view: &SceneView<'_>);
}

pub struct SceneLoop<R> {
    registry: Arc<ConsiderationRegistry>,
    camera: Camera,
    pointer: Vec2,
    pick: PickOptions,
    highlight: HighlightState,
    renderer: R,
}

impl<R: SceneRenderer> SceneLoop<R> {
    /// The pointer starts at the viewport center until the first move.
    pub fn new(registry: Arc<ConsiderationRegistry>, camera: Camera, renderer: R) -> Self {
        Self {
            registry,
            camera,
            pointer: Vec2::new(0.0, 0.0),
            pick: PickOptions::default(),
            highlight: HighlightState::new(),
            renderer,
        }
    }

    pub fn set_pointer_ndc(&mut self, ndc: Vec2) {
        self.pointer = ndc;
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn highlight(&self) -> &HighlightState {
        &self.highlight
    }

    /// Runs one frame and returns the hovered registry index.
    pub fn tick<M: MarkerSource + ?Sized>(&mut self, frame: Frame, marker: &M) -> Option<usize> {
        let marker = marker.marker_view();
        let hovered = self
            .camera
            .ray_from_ndc(self.pointer)
            .and_then(|ray| pick_ray(&self.registry, ray, self.pick))
            .map(|hit| hit.index);

        let highlights = self.highlight.update(
            &self.registry,
            hovered,
            marker.active_label.as_deref(),
            frame.elapsed,
        );

        self.renderer.render(&SceneView {
            frame,
            registry: &self.registry,
            marker: &marker,
            hovered,
            highlights,
        });
        hovered
    }
}
