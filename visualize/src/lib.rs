// MIT LICENSE
//
// Copyright (c) 2021 Dash Core Group
//
// Permission is hereby granted, free of charge, to any
// person obtaining a copy of this software and associated
// documentation files (the "Software"), to deal in the
// Software without restriction, including without
// limitation the rights to use, copy, modify, merge,
// publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software
// is furnished to do so, subject to the following
// conditions:
//
// The above copyright notice and this permission notice
// shall be included in all copies or substantial portions
// of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF
// ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED
// TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A
// PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT
// SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY
// CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR
// IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
// DEALINGS IN THE SOFTWARE.

//! Presentation of merkleroot trees.
//!
//! Two outputs, both written through any [`std::io::Write`]:
//! - [`Visualize`] draws a built tree top-down, root first;
//! - [`StepsWriter`] renders the step-by-step audit document.
//!
//! Nothing here touches the filesystem; callers choose where output goes.

mod steps;

use std::io::{Result, Write};

use itertools::Itertools;
use merkleroot::{Digest, MerkleTree, OddNodePolicy};
pub use steps::StepsWriter;

static HEX_LEN: usize = 8;
static INDENT_SPACES: usize = 4;

/// Pretty visualization of merkleroot components.
pub trait Visualize {
    fn visualize<W: Write>(&self, drawer: Drawer<W>) -> Result<Drawer<W>>;
}

/// A `io::Write` proxy to prepend padding and symbols to draw trees
pub struct Drawer<W: Write> {
    level: usize,
    write: W,
}

impl<W: Write> Drawer<W> {
    pub fn new(write: W) -> Self {
        Drawer { level: 0, write }
    }

    pub fn down(&mut self) {
        self.level += 1;
    }

    pub fn up(&mut self) {
        self.level -= 1;
    }

    pub fn write(&mut self, buf: &[u8]) -> Result<()> {
        let lines_iter = buf.split(|c| *c == b'\n');
        let sep = if self.level > 0 {
            let mut result = " ".repeat(INDENT_SPACES * self.level - 1);
            result.insert(0, '\n');
            result
        } else {
            String::from("\n")
        };
        let interspersed_lines_iter = Itertools::intersperse(lines_iter, sep.as_bytes());
        for line in interspersed_lines_iter {
            self.write.write_all(line)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.write.write_all(b"\n")?;
        self.write.flush()?;
        Ok(())
    }
}

/// Hex with the middle elided for anything wider than 16 characters.
pub fn to_hex(bytes: &[u8]) -> String {
    let encoded = hex::encode(bytes);
    let remaining = encoded.len().saturating_sub(HEX_LEN);
    if remaining >= 8 {
        format!("{}..{}", &encoded[0..HEX_LEN], &encoded[remaining..])
    } else {
        encoded
    }
}

impl Visualize for Digest {
    fn visualize<W: Write>(&self, mut drawer: Drawer<W>) -> Result<Drawer<W>> {
        drawer.write(format!("[hex: {}]", to_hex(self.as_bytes())).as_bytes())?;
        Ok(drawer)
    }
}

impl Visualize for MerkleTree {
    fn visualize<W: Write>(&self, mut drawer: Drawer<W>) -> Result<Drawer<W>> {
        let config = self.config();
        drawer.write(
            format!(
                "merkle tree (double {}, odd nodes: {}, leaves: {})",
                config.algorithm,
                config.odd_node_policy,
                self.leaf_count()
            )
            .as_bytes(),
        )?;
        drawer.down();
        drawer = draw_node(self, self.depth(), 0, "root", drawer)?;
        drawer.up();
        Ok(drawer)
    }
}

/// Draw the node at `(level, index)` and everything below it.
fn draw_node<W: Write>(
    tree: &MerkleTree,
    level: usize,
    index: usize,
    label: &str,
    mut drawer: Drawer<W>,
) -> Result<Drawer<W>> {
    let levels = tree.levels();
    let Some(digest) = levels[level].get(index) else {
        return Ok(drawer);
    };
    drawer.write(format!("\n{label}: ").as_bytes())?;
    drawer = digest.visualize(drawer)?;
    if level == 0 {
        return Ok(drawer);
    }

    let children = &levels[level - 1];
    let left = 2 * index;
    let right = left + 1;
    drawer.down();
    if right < children.len() {
        drawer = draw_node(tree, level - 1, left, "left", drawer)?;
        drawer = draw_node(tree, level - 1, right, "right", drawer)?;
    } else {
        match tree.config().odd_node_policy {
            OddNodePolicy::Duplicate => {
                drawer = draw_node(tree, level - 1, left, "left", drawer)?;
                drawer.write(b"\nright: (duplicate of left)")?;
            }
            OddNodePolicy::Promote => {
                drawer = draw_node(tree, level - 1, left, "promoted", drawer)?;
            }
        }
    }
    drawer.up();
    Ok(drawer)
}

/// `visualize` shortcut to write straight into stdout offhand
pub fn visualize_stdout<T: Visualize + ?Sized>(value: &T) -> Result<()> {
    let mut out = std::io::stdout();
    let mut drawer = value.visualize(Drawer::new(&mut out))?;
    drawer.flush()
}

/// `visualize` shortcut to write into provided buffer, should be a `Vec` not a
/// slice because slices won't grow if needed.
pub fn visualize_to_vec<T: Visualize + ?Sized>(v: &mut Vec<u8>, value: &T) {
    let drawer = Drawer::new(v);
    value
        .visualize(drawer)
        .expect("error while writing into vector");
}
