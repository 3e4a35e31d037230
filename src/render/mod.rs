pub mod export;
pub mod terminal;

pub use export::{
    CsvExporter,
    ResultExporter,
};
pub use terminal::TerminalRenderer;

use crate::core::{
    CloudWord,
    WordCloudError,
};

/// What the layout engine is asked to draw. `Empty` is an explicit "no data"
/// signal, distinct from "nothing computed yet".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CloudInput<'a> {
    Empty,
    Words(&'a [CloudWord]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Spatial layout and drawing of the cloud, owned by the front end.
pub trait CloudRenderer {
    fn render(&mut self, input: CloudInput<'_>, canvas: CanvasSize) -> Result<(), WordCloudError>;
}
