//! Tree-dump diagnostics: `MCTS.log` (top 3 children per level) and
//! `MCTS_FULL.log` (unbounded), one line per visited node —
//! `visit, value, score, children count, move`.
//!
//! These are purely diagnostic: a failure to write either file is logged
//! and otherwise ignored, never propagated to the caller of `search()`.

use crate::board::id_to_str;
use crate::node_pool::{NodeId, NodePool};
use log::{debug, warn};
use std::fs::File;
use std::io::{self, Write};

const LOG_FILE: &str = "MCTS.log";
const LOG_FILE_FULL: &str = "MCTS_FULL.log";
const TOP_CHILDREN: usize = 3;

/// Write both tree-dump files for this search run and mirror the same
/// lines through `log::debug!`. `cp` is the exploration constant used to
/// recompute each child's UCB1 score for display.
pub fn dump_trees(pool: &NodePool, root: NodeId, cp: f64) {
    if let Err(err) = write_tree(pool, root, cp, LOG_FILE, Some(TOP_CHILDREN)) {
        warn!("failed to write {}: {}", LOG_FILE, err);
    }
    if let Err(err) = write_tree(pool, root, cp, LOG_FILE_FULL, None) {
        warn!("failed to write {}: {}", LOG_FILE_FULL, err);
    }
}

fn write_tree(
    pool: &NodePool,
    root: NodeId,
    cp: f64,
    path: &str,
    limit: Option<usize>,
) -> io::Result<()> {
    let mut file = File::create(path)?;
    let header = if limit.is_some() {
        "===============================PrintTree=============================\n"
    } else {
        "===============================PrintFullTree=============================\n"
    };
    file.write_all(header.as_bytes())?;

    let root_node = pool.get(root);
    writeln!(
        file,
        "visit: {}, value: {:.1}, children: {}",
        root_node.visit,
        root_node.value,
        root_node.children.len()
    )?;
    write_children(pool, root, cp, 1, limit, &mut file)?;

    file.write_all(b"================================TreeEnd============================\n\n")?;
    Ok(())
}

fn write_children(
    pool: &NodePool,
    node: NodeId,
    cp: f64,
    level: usize,
    limit: Option<usize>,
    out: &mut impl Write,
) -> io::Result<()> {
    let parent = pool.get(node);
    let precomputed = if parent.visit == 0 {
        0.0
    } else {
        (parent.visit as f64).ln().sqrt() * cp
    };

    let mut children: Vec<NodeId> = parent.children.clone();
    children.sort_by(|&a, &b| pool.get(b).visit.cmp(&pool.get(a).visit));

    for (i, &child) in children.iter().enumerate() {
        if let Some(limit) = limit {
            if i >= limit {
                break;
            }
        }
        let node = pool.get(child);
        let score = node.win_rate + node.expand_factor * precomputed;
        let indent = "   ".repeat(level);
        let line = format!(
            "{}{}visit: {}, value: {:.1}, score: {:.4}, children: {}, move: {}",
            level,
            indent,
            node.visit,
            node.value,
            score,
            node.children.len(),
            id_to_str(node.game.last_move),
        );
        writeln!(out, "{}", line)?;
        debug!("{}", line);
        write_children(pool, child, cp, level + 1, limit, out)?;
    }
    Ok(())
}
