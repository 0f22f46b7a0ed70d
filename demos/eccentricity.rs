use rigidx::{point, Editor, Orientation};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut editor = Editor::default();
    editor.add_column(point(0.0, 0.0), 0.3, 0.3)?;
    editor.add_column(point(6.0, 0.0), 0.3, 0.3)?;
    editor.add_wall(point(0.0, 3.0), 4.0, 0.2, Orientation::Vertical)?;
    editor.add_wall(point(3.0, 6.0), 6.0, 0.2, Orientation::Horizontal)?;
    editor.set_mass_center(point(3.0, 3.0))?;

    let analysis = editor.analysis();
    println!("rigidity center = {}", analysis.rigidity_center);
    if let Some(eccentricity) = analysis.eccentricity {
        println!("ex = {:+.3} m, ey = {:+.3} m", eccentricity.ex, eccentricity.ey);
    }

    Ok(())
}
