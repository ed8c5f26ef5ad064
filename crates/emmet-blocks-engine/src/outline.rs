//! Plain-text outline of a block tree, one block per line.
//!
//! ```text
//! core/group tagName="header"
//!   core/paragraph content="Hi"
//! ```

use crate::blocks::Block;

pub fn outline(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        write_block(block, 0, &mut out);
    }
    out
}

fn write_block(block: &Block, depth: usize, out: &mut String) {
    out.push_str(&"  ".repeat(depth));
    out.push_str(block.name());
    for (key, value) in block.attributes().entries() {
        out.push_str(&format!(" {key}={value:?}"));
    }
    out.push('\n');

    for inner in block.inner_blocks() {
        write_block(inner, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::BlockMapper;
    use insta::assert_snapshot;

    #[test]
    fn nested_outline() {
        let blocks = BlockMapper::default().map_html(
            r#"<header class="top" id="h1"><p>Hi</p><ol><li>A</li><li>B</li></ol></header><stack><div></div></stack>"#,
        );
        assert_snapshot!(outline(&blocks), @r#"
        core/group className="top" anchor="h1" tagName="header"
          core/paragraph content="Hi"
          core/list ordered="true" values="<li>A</li><li>B</li>"
        core/group layout="flex vertical"
          core/group
        "#);
    }

    #[test]
    fn quotes_in_values_are_escaped() {
        let blocks = BlockMapper::default().map_html(r#"<p>say "hi"</p>"#);
        assert_eq!(outline(&blocks), "core/paragraph content=\"say \\\"hi\\\"\"\n");
    }

    #[test]
    fn empty_outline() {
        assert_eq!(outline(&[]), "");
    }
}
