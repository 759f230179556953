use scene::{HighlightCause, SceneRenderer, SceneView};
use tracing::{debug, info};

/// Renderer for the headless viewer: reports hover and active-label changes.
#[derive(Debug, Default)]
pub struct LogRenderer {
    hovered: Option<String>,
    active: Option<String>,
    frames: u64,
}

impl LogRenderer {
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl SceneRenderer for LogRenderer {
    fn render(&mut self, view: &SceneView<'_>) {
        self.frames += 1;

        let hovered = view.hovered_label().map(str::to_string);
        if hovered != self.hovered {
            match view.hovered.and_then(|idx| view.registry.entry(idx)) {
                Some(entry) => info!(
                    frame = view.frame.index,
                    color = %entry.base_color,
                    "hovering {}",
                    entry.label
                ),
                None => debug!(frame = view.frame.index, "hover cleared"),
            }
            self.hovered = hovered;
        }

        if view.marker.active_label != self.active {
            if let Some(label) = &view.marker.active_label {
                let pulse = view
                    .highlights
                    .iter()
                    .find(|h| h.cause == HighlightCause::Active)
                    .map(|h| h.scale);
                info!(frame = view.frame.index, ?pulse, "active consideration {label}");
            }
            self.active = view.marker.active_label.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foundation::math::Vec3;
    use foundation::time::Millis;
    use runtime::Frame;
    use scene::{ConsiderationRegistry, MarkerView};

    #[test]
    fn tracks_latest_hover_and_active_labels() {
        let mut registry = ConsiderationRegistry::new();
        registry.insert("Value?".to_string(), Vec3::ZERO);
        let marker = MarkerView {
            position: Vec3::ZERO,
            active_label: Some("Value?".to_string()),
        };

        let mut renderer = LogRenderer::default();
        let view = SceneView {
            frame: Frame::new(0, Millis(0.0)),
            registry: &registry,
            marker: &marker,
            hovered: Some(0),
            highlights: &[],
        };
        renderer.render(&view);
        renderer.render(&view);

        assert_eq!(renderer.frames(), 2);
        assert_eq!(renderer.hovered.as_deref(), Some("Value?"));
        assert_eq!(renderer.active.as_deref(), Some("Value?"));
    }
}
