//! Process-wide, corner-occupancy-keyed move-priority table.
//!
//! Corners are always `High` priority. The three cells diagonally/
//! orthogonally adjacent to a corner are `Low` while that corner is still
//! empty (playing there risks handing the corner to the opponent) and
//! revert to `Middle` once the corner is filled. Every other cell is
//! `Middle`. The table has only 16 possible keys (one bit per corner) so it
//! is computed once, behind a `lazy_static`, and treated as immutable for
//! the remainder of the process.

use crate::board::{coord_to_id, CellId, BOARD_SIZE, GRID_NUM};
use lazy_static::lazy_static;

/// Move-priority bucket. Declared High-to-Low so that iterating variants in
/// declaration order matches the "walk High -> Middle -> Low" rule used by
/// both `classify`'s bucket bookkeeping and `recompute_legal_moves`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum Priority {
    High = 0,
    Middle = 1,
    Low = 2,
}

pub const PRIORITIES_HIGH_TO_LOW: [Priority; 3] = [Priority::High, Priority::Middle, Priority::Low];

const NUM_KEYS: usize = 16;

lazy_static! {
    static ref PRIORITY_TABLE: [[Priority; GRID_NUM]; NUM_KEYS] = build_priority_table();
}

/// The priority table row for a given 4-bit corner-occupancy key.
pub fn priority_for(key: u8) -> &'static [Priority; GRID_NUM] {
    &PRIORITY_TABLE[key as usize]
}

fn build_priority_table() -> [[Priority; GRID_NUM]; NUM_KEYS] {
    let corners: [CellId; 4] = [
        coord_to_id(0, 0),
        coord_to_id(0, BOARD_SIZE - 1),
        coord_to_id(BOARD_SIZE - 1, 0),
        coord_to_id(BOARD_SIZE - 1, BOARD_SIZE - 1),
    ];
    // The three cells touching each corner, in the same corner order.
    let near_corner: [[CellId; 3]; 4] = [
        [
            coord_to_id(0, 1),
            coord_to_id(1, 0),
            coord_to_id(1, 1),
        ],
        [
            coord_to_id(0, BOARD_SIZE - 2),
            coord_to_id(1, BOARD_SIZE - 1),
            coord_to_id(1, BOARD_SIZE - 2),
        ],
        [
            coord_to_id(BOARD_SIZE - 1, 1),
            coord_to_id(BOARD_SIZE - 2, 0),
            coord_to_id(BOARD_SIZE - 2, 1),
        ],
        [
            coord_to_id(BOARD_SIZE - 1, BOARD_SIZE - 2),
            coord_to_id(BOARD_SIZE - 2, BOARD_SIZE - 1),
            coord_to_id(BOARD_SIZE - 2, BOARD_SIZE - 2),
        ],
    ];

    let mut table = [[Priority::Middle; GRID_NUM]; NUM_KEYS];
    for (key, row) in table.iter_mut().enumerate() {
        for &id in corners.iter() {
            row[id] = Priority::High;
        }
        for (corner_idx, near) in near_corner.iter().enumerate() {
            let corner_filled = key & (1 << corner_idx) != 0;
            if !corner_filled {
                for &id in near.iter() {
                    row[id] = Priority::Low;
                }
            }
        }
    }
    table
}
