use std::io::Write;

use anyhow::{Context, Result};
use fuse_grid_core::CellCoord;
use fuse_grid_rendering::{Frame, FramePresenter};

const CELL_WIDTH: usize = 7;

/// Presents frames as an ASCII grid on the wrapped writer.
#[derive(Debug)]
pub(crate) struct TextPresenter<W: Write> {
    out: W,
}

impl<W: Write> TextPresenter<W> {
    pub(crate) fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> FramePresenter for TextPresenter<W> {
    fn present(&mut self, frame: &Frame) -> Result<()> {
        let size = frame.grid_size;
        let border = format!("+{}", format!("{}+", "-".repeat(CELL_WIDTH)).repeat(size as usize));

        writeln!(self.out, "{border}").context("writing frame border")?;
        for row in 0..size {
            let mut line = String::from("|");
            for column in 0..size {
                let cell = CellCoord::new(column, row);
                let value = frame
                    .tiles
                    .iter()
                    .find(|tile| tile.cell == cell)
                    .map(|tile| tile.value.get());
                line.push_str(&format_cell(value));
                line.push('|');
            }
            writeln!(self.out, "{line}").context("writing frame row")?;
            writeln!(self.out, "{border}").context("writing frame border")?;
        }
        Ok(())
    }
}

/// Centers a tile value within a fixed-width cell; empty cells stay blank.
fn format_cell(value: Option<u32>) -> String {
    match value {
        None => " ".repeat(CELL_WIDTH),
        Some(value) => {
            let mut text = value.to_string();
            while text.len() < CELL_WIDTH {
                if text.len() % 2 == 0 {
                    text = format!("{text} ");
                } else {
                    text = format!(" {text}");
                }
            }
            text
        }
    }
}
