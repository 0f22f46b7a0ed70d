use std::fmt;

use rigidx::{Analysis, ElementSummary, Model, RigidityCenter, ViewState};

/// Textual summary of a layout and its analysis.
pub struct Report<'a> {
    /// Layout being described.
    model: &'a Model,
    /// Analysis of `model`.
    analysis: &'a Analysis,
}

impl<'a> Report<'a> {
    /// Describe `model` using a precomputed analysis.
    #[must_use]
    pub fn new(model: &'a Model, analysis: &'a Analysis) -> Self {
        Self { model, analysis }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let center = self.analysis.rigidity_center;
        writeln!(f, "Rigidity center: {center}")?;
        let mass = self.model.mass_center();
        writeln!(f, "Center of mass:  ({:.3}, {:.3})", mass.x, mass.y)?;

        // The eccentricity only exists when the rigidity center does.
        match (self.analysis.eccentricity, center) {
            (Some(eccentricity), _) => writeln!(
                f,
                "Eccentricity:    ex = {:+.3} m, ey = {:+.3} m",
                eccentricity.ex, eccentricity.ey
            )?,
            (None, RigidityCenter::Unstable) => {
                writeln!(f, "Eccentricity:    undefined (zero stiffness along one axis)")?;
            }
            (None, _) => writeln!(f, "Eccentricity:    undefined")?,
        }

        writeln!(
            f,
            "Stiffness sums:  Kx = {:.4e}, Ky = {:.4e}",
            self.analysis.sum_kx, self.analysis.sum_ky
        )?;

        writeln!(f, "Elements: {}", self.model.element_count())?;
        for (id, element) in self.model.elements() {
            let summary = ElementSummary::new(id, element);
            let (kx, ky) = summary.rigidity;
            writeln!(f, "  {summary}  (Kx = {kx:.4e}, Ky = {ky:.4e})")?;
        }
        Ok(())
    }
}

/// Render the analysis report for a layout.
#[must_use]
pub fn render_report(model: &Model, analysis: &Analysis) -> String {
    Report::new(model, analysis).to_string()
}

/// Render a fitted view state.
#[must_use]
pub fn render_view(state: &ViewState) -> String {
    format!(
        "zoom = {:.4}, pan = ({:.1}, {:.1}) px",
        state.zoom, state.pan.x, state.pan.y
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigidx::{point, Element, Orientation};

    #[test]
    fn formats_human_readable_report() {
        let mut model = Model::new();
        model
            .add(Element::column(point(0.0, 0.0), 0.3, 0.3).expect("valid column"))
            .expect("identifier available");
        model
            .add(Element::wall(point(4.0, 0.0), 3.0, 0.2, Orientation::Vertical).expect("valid wall"))
            .expect("identifier available");
        model
            .set_mass_center(point(2.0, 0.0))
            .expect("finite mass center");
        let analysis = model.analyze();

        let report = render_report(&model, &analysis);
        assert!(report.starts_with("Rigidity center: ("));
        assert!(report.contains("Center of mass:  (2.000, 0.000)"));
        assert!(report.contains("ey = +0.000 m"));
        assert!(report.contains("Elements: 2"));
        assert!(report.contains("  C1 column"));
        assert!(report.contains("  W1 wall"));
    }

    #[test]
    fn empty_layout_reports_undefined_center() {
        let model = Model::new();
        let report = render_report(&model, &model.analyze());
        assert!(report.contains("Rigidity center: N/A"));
        assert!(report.contains("Eccentricity:    undefined\n"));
        assert!(report.contains("Elements: 0"));
    }

    #[test]
    fn view_state_is_rounded() {
        let state = ViewState::default();
        assert_eq!(render_view(&state), "zoom = 1.0000, pan = (0.0, 0.0) px");
    }
}
