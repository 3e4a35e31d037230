use std::io::Write;

use super::{
    CanvasSize,
    CloudInput,
    CloudRenderer,
};
use crate::core::{
    RankedResult,
    WordCloudError,
    WordCount,
};

pub const EMPTY_CLOUD_MESSAGE: &str = "No word cloud data to display";

/// Plain-text stand-in for the cloud layout engine, used by the CLI.
pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn show_top_list(&mut self, top_list: &[WordCount]) -> Result<(), WordCloudError> {
        writeln!(self.out, "Top words:")?;
        for (idx, entry) in top_list.iter().enumerate() {
            writeln!(self.out, "{:>3}. {}\t{}", idx + 1, entry.word, entry.count)?;
        }
        Ok(())
    }

    pub fn show_summary(&mut self, result: &RankedResult) -> Result<(), WordCloudError> {
        writeln!(self.out, "{} tokens, {} unique words", result.total_tokens, result.unique_words)?;
        Ok(())
    }

    pub fn show_message(&mut self, message: &str) -> Result<(), WordCloudError> {
        writeln!(self.out, "{}", message)?;
        Ok(())
    }
}

impl<W: Write> CloudRenderer for TerminalRenderer<W> {
    fn render(&mut self, input: CloudInput<'_>, canvas: CanvasSize) -> Result<(), WordCloudError> {
        let words = match input {
            CloudInput::Empty => {
                writeln!(self.out, "{}", EMPTY_CLOUD_MESSAGE)?;
                return Ok(());
            }
            CloudInput::Words(words) => words,
        };

        writeln!(self.out, "Word cloud ({}x{}, {} words):", canvas.width, canvas.height, words.len())?;
        let line = words
            .iter()
            .map(|w| format!("{}({:.1})", w.text, w.weight))
            .collect::<Vec<_>>()
            .join("  ");
        writeln!(self.out, "{}", line)?;
        Ok(())
    }
}
