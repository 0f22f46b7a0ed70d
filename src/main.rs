mod report;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use env_logger::Env;
use report::{render_report, render_view};
use rigidx::{point, Displacement, Editor, ElementId, FitOutcome, Orientation, Viewport};

#[derive(Parser)]
#[command(name = "rigidx")]
#[command(about = "Rigidity center and eccentricity of column and wall layouts", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the rigidity center, eccentricity and element table of a layout
    Analyze {
        /// Layout document
        file: PathBuf,
    },

    /// Add a rectangular column
    AddColumn {
        /// Layout document, created when missing
        file: PathBuf,
        /// X coordinate of the centre in metres
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        /// Y coordinate of the centre in metres
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
        /// Extent along X in metres
        #[arg(long)]
        width: f64,
        /// Extent along Y in metres
        #[arg(long)]
        height: f64,
    },

    /// Add a wall
    AddWall {
        /// Layout document, created when missing
        file: PathBuf,
        /// X coordinate of the midpoint in metres
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        /// Y coordinate of the midpoint in metres
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
        /// Length in metres
        #[arg(long)]
        length: f64,
        /// Thickness in metres
        #[arg(long)]
        thickness: f64,
        /// V for a wall running along Y, H for one running along X
        #[arg(long, default_value = "V")]
        orientation: Orientation,
    },

    /// Remove an element by label, e.g. C2 or W1
    Remove {
        /// Layout document
        file: PathBuf,
        /// Element label
        label: ElementId,
    },

    /// Move an element by an offset
    Move {
        /// Layout document
        file: PathBuf,
        /// Element label
        label: ElementId,
        /// Offset along X in metres
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        dx: f64,
        /// Offset along Y in metres
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        dy: f64,
    },

    /// Set the center of mass
    MassCenter {
        /// Layout document, created when missing
        file: PathBuf,
        /// X coordinate in metres
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        /// Y coordinate in metres
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
    },

    /// Print the zoom and pan that frame the layout in a viewport
    Fit {
        /// Layout document
        file: PathBuf,
        /// Viewport width in pixels
        #[arg(long, default_value_t = 800.0)]
        width: f64,
        /// Viewport height in pixels
        #[arg(long, default_value_t = 600.0)]
        height: f64,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        for cause in e.chain().skip(1) {
            eprintln!("  {cause}");
        }
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG overrides the default level.
    let env = if cli.debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("warn")
    };
    env_logger::Builder::from_env(env).init();

    match cli.command {
        Commands::Analyze { file } => {
            let editor = open(&file, false)?;
            print!("{}", render_report(editor.model(), editor.analysis()));
        }
        Commands::AddColumn {
            file,
            x,
            y,
            width,
            height,
        } => {
            let mut editor = open(&file, true)?;
            let id = editor
                .add_column(point(x, y), width, height)
                .context("Failed to add column")?;
            println!("Added {id}");
            commit(&mut editor, &file)?;
        }
        Commands::AddWall {
            file,
            x,
            y,
            length,
            thickness,
            orientation,
        } => {
            let mut editor = open(&file, true)?;
            let id = editor
                .add_wall(point(x, y), length, thickness, orientation)
                .context("Failed to add wall")?;
            println!("Added {id}");
            commit(&mut editor, &file)?;
        }
        Commands::Remove { file, label } => {
            let mut editor = open(&file, false)?;
            editor
                .delete_element(label)
                .with_context(|| format!("Failed to remove {label}"))?;
            println!("Removed {label}");
            commit(&mut editor, &file)?;
        }
        Commands::Move {
            file,
            label,
            dx,
            dy,
        } => {
            let mut editor = open(&file, false)?;
            editor
                .move_element(label, Displacement::new(dx, dy))
                .with_context(|| format!("Failed to move {label}"))?;
            println!("Moved {label}");
            commit(&mut editor, &file)?;
        }
        Commands::MassCenter { file, x, y } => {
            let mut editor = open(&file, true)?;
            editor
                .set_mass_center(point(x, y))
                .context("Failed to set the center of mass")?;
            commit(&mut editor, &file)?;
        }
        Commands::Fit {
            file,
            width,
            height,
        } => {
            let mut editor = open(&file, false)?;
            editor.resize(Viewport::new(width, height));
            match editor.fit_to_view() {
                (FitOutcome::Fitted, state) => println!("{}", render_view(&state)),
                (FitOutcome::Reset, state) => {
                    println!("{} (empty layout)", render_view(&state));
                }
                (FitOutcome::Skipped, _) => {
                    anyhow::bail!("Layout or viewport has no extent to fit")
                }
            }
        }
    }

    Ok(())
}

/// Load the layout at `file` into a fresh session, or start an empty one when
/// the file does not exist and `create` is set.
fn open(file: &Path, create: bool) -> anyhow::Result<Editor> {
    let mut editor = Editor::default();
    if create && !file.exists() {
        log::info!("starting a new layout at {}", file.display());
        return Ok(editor);
    }
    editor
        .load(file)
        .with_context(|| format!("Failed to load {}", file.display()))?;
    Ok(editor)
}

/// Save the session back to `file` and print the updated report.
fn commit(editor: &mut Editor, file: &Path) -> anyhow::Result<()> {
    editor
        .save(file)
        .with_context(|| format!("Failed to save {}", file.display()))?;
    print!("{}", render_report(editor.model(), editor.analysis()));
    Ok(())
}
