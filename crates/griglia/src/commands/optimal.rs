use griglia_core::grid::optimal_grid;

/// Prints the grid dimensions chosen for `count` windows.
pub fn execute(count: usize) {
    let (rows, cols) = optimal_grid(count);
    println!("{count} windows: {rows} rows x {cols} columns ({} slots)", rows * cols);
}
