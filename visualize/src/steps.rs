//! Step-by-step audit document for one tree.

use std::io::{Result, Write};

use merkleroot::{OddNodePolicy, TreeReport};

const TITLE: &str = "Merkle Root Calculation - Step by Step";

/// Writes the calculation of a tree round by round.
///
/// Nodes are named `level.position` with 1-based positions, so `0.3` is the
/// third leaf and `1.1` the first node built from the leaves. Each round
/// lists how every parent was formed and its full hex digest.
#[derive(Debug, Clone, Copy)]
pub struct StepsWriter<'a> {
    report: &'a TreeReport,
}

impl<'a> StepsWriter<'a> {
    pub fn new(report: &'a TreeReport) -> Self {
        StepsWriter { report }
    }

    pub fn write<W: Write>(&self, mut out: W) -> Result<()> {
        let report = self.report;
        let hash_fn = format!("double_{}", report.algorithm.name().replace('-', "_"));

        writeln!(out, "{TITLE}")?;
        writeln!(out, "{}", "=".repeat(TITLE.len()))?;
        writeln!(out)?;
        writeln!(
            out,
            "Hash function: {hash_fn}(x) = {alg}({alg}(x))",
            alg = report.algorithm
        )?;
        writeln!(out, "Odd node policy: {}", report.odd_node_policy)?;
        writeln!(out)?;

        let leaves = report.levels.first().map(Vec::as_slice).unwrap_or_default();
        writeln!(out, "Transaction Hashes (Leaves):")?;
        for (index, leaf) in leaves.iter().enumerate() {
            writeln!(out, "{}. {leaf}", index + 1)?;
        }
        writeln!(out)?;

        if report.levels.len() <= 1 {
            writeln!(out, "Single leaf: no pairing rounds, the leaf is the root.")?;
            writeln!(out)?;
        }

        for (round, pair) in report.levels.windows(2).enumerate() {
            let (children, parents) = (&pair[0], &pair[1]);
            let (child_level, parent_level) = (round, round + 1);
            writeln!(
                out,
                "Round {parent_level}: Level {child_level} ({}) -> Level {parent_level} ({})",
                node_count(children.len()),
                node_count(parents.len())
            )?;
            for (index, parent) in parents.iter().enumerate() {
                let name = label(parent_level, index);
                let left = label(child_level, 2 * index);
                if 2 * index + 1 < children.len() {
                    let right = label(child_level, 2 * index + 1);
                    writeln!(out, "- {name} = {hash_fn}({left} || {right})")?;
                } else {
                    match report.odd_node_policy {
                        OddNodePolicy::Duplicate => writeln!(
                            out,
                            "- {name} = {hash_fn}({left} || {left})  [{left} duplicated]"
                        )?,
                        OddNodePolicy::Promote => {
                            writeln!(out, "- {name} = {left}  [promoted unchanged]")?
                        }
                    }
                }
                writeln!(out, "  => {parent}")?;
            }
            writeln!(out)?;
        }

        writeln!(out, "Merkle Root = {}", label(report.levels.len().saturating_sub(1), 0))?;
        writeln!(out, "  => {}", report.root)?;
        Ok(())
    }

    /// The whole document as a string.
    pub fn render(&self) -> String {
        let mut out = Vec::new();
        self.write(&mut out).expect("error while writing into vector");
        String::from_utf8_lossy(&out).into_owned()
    }
}

fn label(level: usize, index: usize) -> String {
    format!("{level}.{}", index + 1)
}

fn node_count(count: usize) -> String {
    if count == 1 {
        "1 node".to_string()
    } else {
        format!("{count} nodes")
    }
}
