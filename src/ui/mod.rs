/// User interface module
///
/// - `stack_canvas.rs` - canvas painting the photo pile
/// - `grid.rs` - thumbnail grid with a lightbox
/// - `cover.rs` - album cover shown before the stack opens

pub mod cover;
pub mod grid;
pub mod stack_canvas;
