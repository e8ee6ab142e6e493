//! Property tests for structural edits and weight redistribution.

use leadgrid_engine::scoring::equal_weights;
use leadgrid_engine::{Grid, InsertSide, ScoringEngine, SortDirection, TableData};
use proptest::prelude::*;
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
enum Op {
    SetCell(usize, usize, String),
    SetHeader(usize, String),
    AddColumn,
    InsertColumn(usize, bool),
    DeleteColumn(usize),
    AddRow,
    DeleteRows(Vec<usize>),
    MoveColumn(usize, usize),
    Resize(usize, u32),
    Sort(usize, bool),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..8usize, 0..8usize, "[a-z0-9 ]{0,4}").prop_map(|(r, c, v)| Op::SetCell(r, c, v)),
        (0..8usize, "[A-Za-z ]{0,5}").prop_map(|(c, v)| Op::SetHeader(c, v)),
        Just(Op::AddColumn),
        (0..8usize, any::<bool>()).prop_map(|(c, right)| Op::InsertColumn(c, right)),
        (0..8usize).prop_map(Op::DeleteColumn),
        Just(Op::AddRow),
        proptest::collection::vec(0..8usize, 0..3).prop_map(Op::DeleteRows),
        (0..8usize, 0..8usize).prop_map(|(a, b)| Op::MoveColumn(a, b)),
        (0..8usize, 0..400u32).prop_map(|(c, w)| Op::Resize(c, w)),
        (0..8usize, any::<bool>()).prop_map(|(c, asc)| Op::Sort(c, asc)),
    ]
}

fn table_strategy() -> impl Strategy<Value = TableData> {
    (1..5usize, 0..6usize).prop_flat_map(|(cols, rows)| {
        (
            proptest::collection::vec("[A-Z][a-z]{0,3}", cols),
            proptest::collection::vec(proptest::collection::vec("[a-z0-9]{0,3}", 0..6), rows),
        )
            .prop_map(|(headers, rows)| TableData::new(headers, rows))
    })
}

/// Apply an op; index errors leave the grid as it was.
fn apply(grid: &Grid, op: &Op) -> Grid {
    let result = match op {
        Op::SetCell(r, c, v) => grid.set_cell(*r, *c, v.clone()),
        Op::SetHeader(c, v) => grid.set_header(*c, v),
        Op::AddColumn => Ok(grid.add_column()),
        Op::InsertColumn(c, right) => {
            let side = if *right { InsertSide::Right } else { InsertSide::Left };
            grid.insert_column(*c, side)
        }
        Op::DeleteColumn(c) => grid.delete_column(*c),
        Op::AddRow => Ok(grid.add_row()),
        Op::DeleteRows(rows) => {
            let set: BTreeSet<usize> = rows.iter().copied().collect();
            Ok(grid.delete_rows(&set))
        }
        Op::MoveColumn(a, b) => grid.move_column(*a, *b),
        Op::Resize(c, w) => grid.resize_column(*c, *w),
        Op::Sort(c, asc) => {
            let direction = if *asc { SortDirection::Asc } else { SortDirection::Desc };
            grid.sort_by_column(*c, direction)
        }
    };
    result.unwrap_or_else(|_| grid.clone())
}

proptest! {
    #[test]
    fn rows_always_match_header_count(table in table_strategy(), ops in proptest::collection::vec(op_strategy(), 0..25)) {
        let mut grid = Grid::from_table(table);
        for op in &ops {
            grid = apply(&grid, op);
            prop_assert_eq!(grid.column_widths().len(), grid.column_count());
            prop_assert!(grid.column_count() >= 1);
            for row in grid.rows() {
                prop_assert_eq!(row.len(), grid.column_count());
            }
            for width in grid.column_widths() {
                prop_assert!(*width >= 100);
            }
        }
    }

    #[test]
    fn move_then_inverse_move_restores(table in table_strategy(), from in 0..5usize, to in 0..5usize) {
        let grid = Grid::from_table(table);
        prop_assume!(from < grid.column_count() && to < grid.column_count());
        let moved = grid.move_column(from, to).unwrap();
        let back = moved.move_column(to, from).unwrap();
        prop_assert_eq!(back, grid);
    }

    #[test]
    fn included_weights_total_one_hundred(n in 1..=20usize) {
        let mut engine = ScoringEngine::new();
        for i in 0..n {
            engine.include(&format!("col{}", i));
        }
        prop_assert_eq!(engine.total_weight(), 100);
        prop_assert!(engine.is_valid());

        let columns: Vec<String> = (0..n).map(|i| format!("col{}", i)).collect();
        let weights = equal_weights(&columns);
        let first = weights[&columns[0]];
        for column in &columns[1..] {
            prop_assert_eq!(weights[column], 100 / n as u32);
        }
        prop_assert_eq!(first, 100 - (100 / n as u32) * (n as u32 - 1));
    }
}
