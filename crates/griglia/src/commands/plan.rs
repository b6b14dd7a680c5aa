use clap::Args;
use serde_json::json;

use griglia_core::Rect;
use griglia_core::config;
use griglia_core::grid::slot_rects;

/// Arguments for the `plan` subcommand.
#[derive(Args)]
pub struct PlanArgs {
    /// Grid rows
    #[arg(long)]
    rows: usize,
    /// Grid columns
    #[arg(long)]
    cols: usize,
    /// Area width in pixels
    #[arg(long, default_value_t = 1920.0)]
    width: f64,
    /// Area height in pixels
    #[arg(long, default_value_t = 1080.0)]
    height: f64,
    /// Outer padding (defaults to the configured value)
    #[arg(long)]
    padding: Option<f64>,
    /// Gap between slots (defaults to the configured value)
    #[arg(long)]
    spacing: Option<f64>,
    /// Emit the slots as JSON
    #[arg(long)]
    json: bool,
}

/// Computes and prints the slot rectangles for a grid.
///
/// Slots are listed in visual order, top-left first. Coordinates use
/// a bottom-left origin, matching what the engine sends to backends.
pub fn execute(args: &PlanArgs) {
    if args.rows == 0 || args.cols == 0 {
        eprintln!("Error: rows and cols must both be at least 1.");
        std::process::exit(1);
    }

    let tuning = config::load().arrange;
    let padding = args.padding.unwrap_or(tuning.padding);
    let spacing = args.spacing.unwrap_or(tuning.spacing);

    let area = Rect::new(0.0, 0.0, args.width, args.height);
    let mut slots = slot_rects(&area, args.rows, args.cols, padding, spacing);
    if tuning.pixel_snap {
        for slot in &mut slots {
            *slot = slot.snapped();
        }
    }

    if args.json {
        let out: Vec<_> = slots
            .iter()
            .enumerate()
            .map(|(i, r)| {
                json!({
                    "slot": i,
                    "x": r.x,
                    "y": r.y,
                    "width": r.width,
                    "height": r.height,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out).unwrap_or_default());
        return;
    }

    println!(
        "{} slots in a {}x{} grid over {}x{}:",
        slots.len(),
        args.rows,
        args.cols,
        args.width,
        args.height
    );
    for (i, r) in slots.iter().enumerate() {
        println!(
            "  slot {i}: ({}, {}) {}x{}",
            r.x, r.y, r.width, r.height
        );
    }
}
