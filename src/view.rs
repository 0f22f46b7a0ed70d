//! Mapping between model space (metres, Y up) and screen space (pixels, Y down).

use nalgebra::Vector2;

use crate::config::ViewConfig;
use crate::geometry::{BoundingBox, Point};

/// Position on the drawing surface in pixels, with the Y axis pointing down.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenPoint {
    /// Pixels from the left edge.
    pub x: f64,
    /// Pixels from the top edge.
    pub y: f64,
}

impl ScreenPoint {
    /// Create a [`ScreenPoint`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert the point into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
}

impl From<Vector2<f64>> for ScreenPoint {
    fn from(value: Vector2<f64>) -> Self {
        Self::new(value.x, value.y)
    }
}

/// Size of the drawing surface in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Create a viewport.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Centre of the surface; the reference origin of the view.
    #[must_use]
    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Zoom factor and pan offset of the view. Never persisted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    /// Zoom factor applied on top of the pixels-per-metre scale.
    pub zoom: f64,
    /// Pan offset in pixels.
    pub pan: Vector2<f64>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Vector2::zeros(),
        }
    }
}

/// Outcome of [`View::fit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FitOutcome {
    /// The layout was framed in the viewport.
    Fitted,
    /// There was nothing to frame; zoom and pan were reset.
    Reset,
    /// The layout or the viewport had no extent; the view was left alone.
    Skipped,
}

/// Model-to-screen transform driven by zoom and pan.
///
/// # Examples
/// ```
/// use rigidx::{point, ScreenPoint, View, ViewConfig, Viewport};
///
/// let view = View::new(ViewConfig::default(), Viewport::new(800.0, 600.0));
/// let screen = view.model_to_view(point(1.0, 1.0));
/// assert_eq!(screen, ScreenPoint::new(440.0, 260.0));
/// assert_eq!(view.view_to_model(screen), point(1.0, 1.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct View {
    /// Mapping parameters.
    config: ViewConfig,
    /// Current surface size.
    viewport: Viewport,
    /// Current zoom and pan.
    state: ViewState,
}

impl View {
    /// Create a view with default zoom and pan.
    #[must_use]
    pub fn new(config: ViewConfig, viewport: Viewport) -> Self {
        Self {
            config,
            viewport,
            state: ViewState::default(),
        }
    }

    /// Current zoom and pan.
    #[must_use]
    pub fn state(&self) -> ViewState {
        self.state
    }

    /// Current surface size.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Pixels per metre at the current zoom.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.state.zoom * self.config.pixels_per_meter
    }

    /// Change the surface size. Zoom and pan are kept.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Map a model point onto the screen.
    #[must_use]
    pub fn model_to_view(&self, point: Point) -> ScreenPoint {
        let origin = self.viewport.center().to_vector() + self.state.pan;
        let scale = self.scale();
        ScreenPoint::new(origin.x + point.x * scale, origin.y - point.y * scale)
    }

    /// Map a screen point back into model space.
    #[must_use]
    pub fn view_to_model(&self, screen: ScreenPoint) -> Point {
        let local = screen.to_vector() - self.viewport.center().to_vector() - self.state.pan;
        let scale = self.scale();
        Point::new(local.x / scale, -local.y / scale)
    }

    /// Multiply the zoom by `factor`, keeping the model point under `cursor`
    /// fixed on screen.
    ///
    /// Returns `false` and leaves the view untouched when the resulting zoom
    /// would fall outside the configured range.
    pub fn zoom_at(&mut self, factor: f64, cursor: ScreenPoint) -> bool {
        let zoom = self.state.zoom * factor;
        if !(self.config.min_zoom..=self.config.max_zoom).contains(&zoom) {
            return false;
        }
        let anchor = self.view_to_model(cursor);
        self.state.zoom = zoom;
        let drifted = self.model_to_view(anchor);
        self.state.pan -= drifted.to_vector() - cursor.to_vector();
        true
    }

    /// Zoom in by one wheel notch around `cursor`.
    pub fn zoom_in(&mut self, cursor: ScreenPoint) -> bool {
        self.zoom_at(self.config.zoom_step, cursor)
    }

    /// Zoom out by one wheel notch around `cursor`.
    pub fn zoom_out(&mut self, cursor: ScreenPoint) -> bool {
        self.zoom_at(self.config.zoom_step.recip(), cursor)
    }

    /// Shift the view by a number of pixels.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.state.pan += Vector2::new(dx, dy);
    }

    /// Restore the default zoom and pan.
    pub fn reset(&mut self) {
        self.state = ViewState::default();
    }

    /// Frame `bounds` in the viewport.
    ///
    /// A margin of the larger of a tenth of either extent and five metres is
    /// added on every side. The zoom is the largest that shows the framed box,
    /// capped at the maximum zoom, and the box is centred.
    ///
    /// The zoom never drops below the minimum zoom, so a box too large to show
    /// at that zoom is centred but cropped.
    pub fn fit(&mut self, bounds: Option<BoundingBox>) -> FitOutcome {
        let Some(bounds) = bounds else {
            self.reset();
            return FitOutcome::Reset;
        };
        let margin = (bounds.width() * self.config.fit_margin_ratio)
            .max(bounds.height() * self.config.fit_margin_ratio)
            .max(self.config.fit_min_margin);
        let framed = bounds.expand(margin);
        let (width, height) = (framed.width(), framed.height());
        if width <= 0.0 || height <= 0.0 || self.viewport.width <= 0.0 || self.viewport.height <= 0.0 {
            return FitOutcome::Skipped;
        }

        let ppm = self.config.pixels_per_meter;
        let zoom = (self.viewport.width / (width * ppm))
            .min(self.viewport.height / (height * ppm))
            .min(self.config.max_zoom)
            .max(self.config.min_zoom);
        let center = framed.center();
        let scale = zoom * ppm;
        self.state = ViewState {
            zoom,
            pan: Vector2::new(-center.x * scale, center.y * scale),
        };
        log::debug!("fitted view: zoom = {zoom:.4}, center = ({:.3}, {:.3})", center.x, center.y);
        FitOutcome::Fitted
    }

    /// Region of model space currently on screen.
    #[must_use]
    pub fn visible_bounds(&self) -> BoundingBox {
        let low = self.view_to_model(ScreenPoint::new(0.0, self.viewport.height));
        let high = self.view_to_model(ScreenPoint::new(self.viewport.width, 0.0));
        BoundingBox::new(low.x, low.y, high.x, high.y)
    }

    /// Spacing in metres of the background grid at the current zoom.
    ///
    /// The finest configured step that is still more than the minimum pixel
    /// spacing apart on screen; one metre when none qualifies.
    #[must_use]
    pub fn grid_spacing(&self) -> f64 {
        let scale = self.scale();
        self.config
            .grid_steps
            .iter()
            .copied()
            .find(|step| step * scale > self.config.min_grid_spacing_px)
            .unwrap_or(1.0)
    }
}
