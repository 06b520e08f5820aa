//! Fitting the workspace into the container.
//!
//! The fit is recomputed from the identity transform every time, so
//! repeated resizes never accumulate drift and identical inputs always give
//! an identical transform.

use serde::{Deserialize, Serialize};

use crate::geometry::find_scale_to_fit;
use crate::{CanvasEngine, Size, ViewportTransform};

/// Why a fit did not change the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The container has zero, negative or non-finite dimensions.
    DegenerateContainer,
    /// The workspace rectangle has no area or a non-finite position.
    DegenerateWorkspace,
    /// The zoom ratio gives a zero, negative or non-finite zoom.
    DegenerateZoom,
}

/// Result of one fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FitOutcome {
    /// The workspace is centered at `zoom`.
    Fitted {
        /// Zoom applied (margin ratio times fit scale).
        zoom: f64,
        /// The resulting viewport transform.
        transform: ViewportTransform,
    },
    /// No workspace exists; the viewport was reset to identity.
    NoWorkspace,
    /// The fit was skipped; the viewport transform is unchanged.
    Skipped {
        /// Which dimension was unusable.
        reason: SkipReason,
    },
}

/// Resize the canvas to `container` and center the workspace in it.
///
/// `zoom_ratio` shrinks the fit so a margin stays around the workspace
/// (0.95 leaves 5%). The workspace is the first object named
/// `workspace_name`; it is also re-asserted as the clip path.
pub fn fit<E>(canvas: &mut E, container: Size, zoom_ratio: f64, workspace_name: &str) -> FitOutcome
where
    E: CanvasEngine + ?Sized,
{
    canvas.set_dimensions(container);

    if !container.has_area() {
        tracing::warn!(
            "Skipping fit for degenerate container {}x{}",
            container.width,
            container.height
        );
        return FitOutcome::Skipped {
            reason: SkipReason::DegenerateContainer,
        };
    }

    let Some(workspace) = canvas.find_by_name(workspace_name) else {
        tracing::debug!("No workspace named {workspace_name:?}, resetting viewport");
        canvas.set_viewport_transform(ViewportTransform::IDENTITY);
        canvas.request_render();
        return FitOutcome::NoWorkspace;
    };
    let workspace_id = workspace.id;
    let workspace_center = workspace.center_point();

    let Some(scale) = find_scale_to_fit(workspace.size(), container) else {
        tracing::warn!("Skipping fit for zero-area workspace {workspace_id}");
        return FitOutcome::Skipped {
            reason: SkipReason::DegenerateWorkspace,
        };
    };
    let zoom = zoom_ratio * scale;
    if !(zoom.is_finite() && zoom > 0.0) {
        tracing::warn!("Skipping fit for unusable zoom {zoom} (ratio {zoom_ratio})");
        return FitOutcome::Skipped {
            reason: SkipReason::DegenerateZoom,
        };
    }

    let previous = canvas.viewport_transform();
    let center = canvas.center();
    canvas.set_viewport_transform(ViewportTransform::IDENTITY);
    canvas.zoom_to_point(center, zoom);

    let mut transform = canvas.viewport_transform();
    transform.set_translation(
        container.width / 2.0 - workspace_center.x * transform.scale_x(),
        container.height / 2.0 - workspace_center.y * transform.scale_y(),
    );
    if !transform.is_finite() {
        tracing::warn!("Fit produced a non-finite transform, keeping previous viewport");
        canvas.set_viewport_transform(previous);
        return FitOutcome::Skipped {
            reason: SkipReason::DegenerateWorkspace,
        };
    }
    canvas.set_viewport_transform(transform);
    canvas.set_clip_path(Some(workspace_id));
    canvas.request_render();

    tracing::debug!(
        "Fitted workspace into {}x{} at zoom {zoom:.4}",
        container.width,
        container.height
    );
    FitOutcome::Fitted { zoom, transform }
}

/// Re-fits the canvas whenever the observed container changes size.
///
/// Stands in for the host's resize observer: the owner forwards every size
/// notification to [`AutoResize::observe`] and calls
/// [`AutoResize::disconnect`] when the container or canvas goes away.
#[derive(Debug, Clone)]
pub struct AutoResize {
    zoom_ratio: f64,
    workspace_name: String,
    connected: bool,
    last_size: Option<Size>,
}

impl AutoResize {
    /// Create a connected observer.
    #[must_use]
    pub fn new(zoom_ratio: f64, workspace_name: impl Into<String>) -> Self {
        Self {
            zoom_ratio,
            workspace_name: workspace_name.into(),
            connected: true,
            last_size: None,
        }
    }

    /// Handle a size notification. Returns `None` once disconnected.
    pub fn observe<E>(&mut self, canvas: &mut E, size: Size) -> Option<FitOutcome>
    where
        E: CanvasEngine + ?Sized,
    {
        if !self.connected {
            return None;
        }
        self.last_size = Some(size);
        Some(fit(canvas, size, self.zoom_ratio, &self.workspace_name))
    }

    /// Stop reacting to notifications.
    pub fn disconnect(&mut self) {
        if self.connected {
            tracing::debug!("Resize observer disconnected");
        }
        self.connected = false;
    }

    /// Whether notifications are still handled.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.connected
    }

    /// The most recent size handled.
    #[must_use]
    pub const fn last_size(&self) -> Option<Size> {
        self.last_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CanvasObject, ObjectKind, Scene};

    const EPSILON: f64 = 1e-9;

    fn scene_with_workspace(width: f64, height: f64) -> Scene {
        let mut scene = Scene::new(100.0, 100.0);
        scene.add(
            CanvasObject::new(ObjectKind::Rect { rx: 0.0, ry: 0.0 }, width, height)
                .with_name("clip")
                .with_position(250.0, -80.0),
        );
        scene
    }

    #[test]
    fn fit_applies_margin_to_limiting_scale() {
        let mut scene = scene_with_workspace(900.0, 1200.0);
        let outcome = fit(&mut scene, Size::new(1600.0, 900.0), 0.95, "clip");

        let FitOutcome::Fitted { zoom, .. } = outcome else {
            panic!("expected a fit, got {outcome:?}");
        };
        let expected = 0.95 * (1600.0_f64 / 900.0).min(900.0 / 1200.0);
        assert!((zoom - expected).abs() < EPSILON);
        assert!((scene.viewport.scale_x() - expected).abs() < EPSILON);
        assert!((scene.viewport.scale_y() - expected).abs() < EPSILON);
    }

    #[test]
    fn fit_centers_workspace_in_container() {
        let mut scene = scene_with_workspace(900.0, 1200.0);
        fit(&mut scene, Size::new(1024.0, 700.0), 0.95, "clip");

        let center = scene.find_by_name("clip").expect("workspace").center_point();
        let mapped = scene.viewport.apply(center);
        assert!((mapped.x - 512.0).abs() < EPSILON);
        assert!((mapped.y - 350.0).abs() < EPSILON);
    }

    #[test]
    fn fit_resizes_surface_and_sets_clip() {
        let mut scene = scene_with_workspace(900.0, 1200.0);
        let workspace = scene.find_by_name("clip").expect("workspace").id;
        fit(&mut scene, Size::new(640.0, 480.0), 0.95, "clip");

        assert_eq!(scene.dimensions, Size::new(640.0, 480.0));
        assert_eq!(scene.clip_path(), Some(workspace));
        assert_eq!(scene.render_requests(), 1);
    }

    #[test]
    fn fit_is_idempotent() {
        let mut scene = scene_with_workspace(900.0, 1200.0);
        let first = fit(&mut scene, Size::new(1280.0, 720.0), 0.95, "clip");
        let second = fit(&mut scene, Size::new(1280.0, 720.0), 0.95, "clip");
        assert_eq!(first, second);
    }

    #[test]
    fn fit_without_workspace_resets_to_identity() {
        let mut scene = Scene::new(100.0, 100.0);
        scene.viewport = ViewportTransform([3.0, 0.0, 0.0, 3.0, 40.0, 40.0]);

        let outcome = fit(&mut scene, Size::new(800.0, 600.0), 0.95, "clip");
        assert_eq!(outcome, FitOutcome::NoWorkspace);
        assert_eq!(scene.viewport, ViewportTransform::IDENTITY);
    }

    #[test]
    fn fit_skips_degenerate_container() {
        let mut scene = scene_with_workspace(900.0, 1200.0);
        let before = scene.viewport;

        let outcome = fit(&mut scene, Size::new(0.0, 600.0), 0.95, "clip");
        assert_eq!(
            outcome,
            FitOutcome::Skipped {
                reason: SkipReason::DegenerateContainer,
            }
        );
        assert_eq!(scene.viewport, before);
        assert!(scene.viewport.is_finite());
    }

    #[test]
    fn fit_skips_zero_area_workspace() {
        let mut scene = scene_with_workspace(0.0, 1200.0);
        let outcome = fit(&mut scene, Size::new(800.0, 600.0), 0.95, "clip");
        assert_eq!(
            outcome,
            FitOutcome::Skipped {
                reason: SkipReason::DegenerateWorkspace,
            }
        );
        assert!(scene.viewport.is_finite());
    }

    #[test]
    fn fit_skips_non_positive_zoom_ratio() {
        for ratio in [0.0, -0.5, f64::NAN] {
            let mut scene = scene_with_workspace(900.0, 1200.0);
            let before = scene.viewport;

            let outcome = fit(&mut scene, Size::new(800.0, 600.0), ratio, "clip");
            assert_eq!(
                outcome,
                FitOutcome::Skipped {
                    reason: SkipReason::DegenerateZoom,
                },
                "ratio {ratio}"
            );
            assert_eq!(scene.viewport, before);
            assert_eq!(scene.render_requests(), 0);
        }
    }

    #[test]
    fn non_finite_workspace_keeps_previous_viewport() {
        let mut scene = scene_with_workspace(900.0, 1200.0);
        let id = scene.find_by_name("clip").expect("workspace").id;
        scene.object_mut(id).expect("workspace").left = f64::INFINITY;
        let before = ViewportTransform([2.0, 0.0, 0.0, 2.0, 10.0, 20.0]);
        scene.viewport = before;

        let outcome = fit(&mut scene, Size::new(800.0, 600.0), 0.95, "clip");
        assert_eq!(
            outcome,
            FitOutcome::Skipped {
                reason: SkipReason::DegenerateWorkspace,
            }
        );
        assert_eq!(scene.viewport, before);
    }

    #[test]
    fn auto_resize_refits_until_disconnected() {
        let mut scene = scene_with_workspace(900.0, 1200.0);
        let mut observer = AutoResize::new(0.95, "clip");

        assert!(observer.observe(&mut scene, Size::new(800.0, 600.0)).is_some());
        assert!(observer.observe(&mut scene, Size::new(400.0, 300.0)).is_some());
        assert_eq!(observer.last_size(), Some(Size::new(400.0, 300.0)));

        observer.disconnect();
        let transform = scene.viewport;
        assert!(observer.observe(&mut scene, Size::new(1920.0, 1080.0)).is_none());
        assert_eq!(scene.viewport, transform);
        assert!(!observer.is_connected());
    }
}
