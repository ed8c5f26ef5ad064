//! Printing block trees.

use std::io::Write;

use anyhow::Result;
use emmet_blocks_config::OutputFormat;
use emmet_blocks_engine::{Block, BlockSink, outline};

/// Render blocks in the given format, newline-terminated.
pub fn render(blocks: &[Block], format: OutputFormat) -> serde_json::Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string(blocks)? + "\n",
        OutputFormat::Pretty => serde_json::to_string_pretty(blocks)? + "\n",
        OutputFormat::Outline => outline(blocks),
    })
}

/// Sink that prints every inserted tree as soon as it arrives.
///
/// Inserting cannot fail, so the first write error is kept and reported by
/// [`PrintingSink::finish`]; later insertions are dropped.
pub struct PrintingSink<W> {
    out: W,
    format: OutputFormat,
    error: Option<anyhow::Error>,
}

impl<W: Write> PrintingSink<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            error: None,
        }
    }

    pub fn finish(mut self) -> Result<W> {
        if let Some(err) = self.error {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn write(&mut self, blocks: &[Block]) -> Result<()> {
        let text = render(blocks, self.format)?;
        self.out.write_all(text.as_bytes())?;
        Ok(())
    }
}

impl<W: Write> BlockSink for PrintingSink<W> {
    fn insert_blocks(&mut self, blocks: Vec<Block>) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.write(&blocks) {
            self.error = Some(err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emmet_blocks_engine::BlockMapper;
    use pretty_assertions::assert_eq;

    fn blocks() -> Vec<Block> {
        BlockMapper::default().map_html(r#"<row id="r"><p>Hi</p></row>"#)
    }

    #[test]
    fn json_is_one_line_per_insertion() {
        let text = render(&blocks(), OutputFormat::Json).unwrap();
        assert_eq!(
            text,
            concat!(
                r#"[{"name":"core/group","attributes":{"anchor":"r","layout":{"type":"flex","orientation":"horizontal"}},"#,
                r#""innerBlocks":[{"name":"core/paragraph","attributes":{"content":"Hi"},"innerBlocks":[]}]}]"#,
                "\n"
            )
        );
    }

    #[test]
    fn pretty_json_is_indented() {
        let text = render(&blocks(), OutputFormat::Pretty).unwrap();
        assert!(text.starts_with("[\n  {\n    \"name\": \"core/group\""));
        assert!(text.ends_with("]\n"));
    }

    #[test]
    fn outline_format() {
        let text = render(&blocks(), OutputFormat::Outline).unwrap();
        assert_eq!(
            text,
            "core/group anchor=\"r\" layout=\"flex horizontal\"\n  core/paragraph content=\"Hi\"\n"
        );
    }

    #[test]
    fn sink_writes_each_insertion() {
        let mut sink = PrintingSink::new(Vec::new(), OutputFormat::Outline);
        sink.insert_blocks(blocks());
        sink.insert_blocks(BlockMapper::default().map_html("<sep></sep>"));

        let out = String::from_utf8(sink.finish().unwrap()).unwrap();
        assert_eq!(out.lines().count(), 3);
        assert!(out.ends_with("core/separator\n"));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_errors_surface_on_finish() {
        let mut sink = PrintingSink::new(BrokenPipe, OutputFormat::Json);
        sink.insert_blocks(blocks());
        assert!(sink.finish().is_err());
    }
}
