pub mod canvas;
pub mod labels;
pub mod renderer;

pub use canvas::{draw_board, Canvas, CellBuffer};
pub use labels::speed_label;
pub use renderer::{Overlay, Renderer, Scene};
