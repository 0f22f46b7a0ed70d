//! Tunable constants for the editor and its view.

use crate::history::DEFAULT_UNDO_CAPACITY;

/// Parameters of the model-to-screen mapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewConfig {
    /// Screen pixels per model metre at zoom 1.0.
    pub pixels_per_meter: f64,
    /// Smallest allowed zoom factor.
    pub min_zoom: f64,
    /// Largest allowed zoom factor.
    pub max_zoom: f64,
    /// Zoom multiplier applied per wheel notch.
    pub zoom_step: f64,
    /// Grid lines closer than this many pixels are replaced by a coarser grid.
    pub min_grid_spacing_px: f64,
    /// Candidate grid steps in metres, finest first.
    pub grid_steps: &'static [f64],
    /// Fit-to-view margin as a fraction of the larger layout extent.
    pub fit_margin_ratio: f64,
    /// Smallest fit-to-view margin in metres.
    pub fit_min_margin: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            pixels_per_meter: 40.0,
            min_zoom: 0.2,
            max_zoom: 5.0,
            zoom_step: 1.1,
            min_grid_spacing_px: 50.0,
            grid_steps: &[0.1, 0.2, 0.5, 1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0],
            fit_margin_ratio: 0.1,
            fit_min_margin: 5.0,
        }
    }
}

/// Parameters of an editing session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EditorConfig {
    /// Number of undo snapshots retained.
    pub undo_capacity: usize,
    /// Distance an arrow-key nudge moves the selection, in metres.
    pub nudge_step: f64,
    /// View mapping parameters.
    pub view: ViewConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            undo_capacity: DEFAULT_UNDO_CAPACITY,
            nudge_step: 0.1,
            view: ViewConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_editor_conventions() {
        let config = EditorConfig::default();
        assert_eq!(config.undo_capacity, 20);
        assert_eq!(config.view.pixels_per_meter, 40.0);
        assert_eq!((config.view.min_zoom, config.view.max_zoom), (0.2, 5.0));
        assert!(config
            .view
            .grid_steps
            .windows(2)
            .all(|pair| pair[0] < pair[1]));
    }
}
