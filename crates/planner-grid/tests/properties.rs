//! Property tests for grid and selection invariants.

use std::collections::HashSet;

use planner_grid::{Grid, SelectionSet, ToggleMode};
use planner_model::{Assignment, CellCoord, GridDims, PlantlistEntryId, SymbolGlyph};
use proptest::prelude::*;

fn dims() -> impl Strategy<Value = GridDims> {
    (1u32..8, 1u32..8).prop_map(|(rows, cols)| GridDims::new(rows, cols))
}

#[derive(Debug, Clone)]
enum Op {
    Cell(u32, u32),
    Row(u32),
    Col(u32),
    All,
    None,
}

fn ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![
            (0u32..8, 0u32..8).prop_map(|(r, c)| Op::Cell(r, c)),
            (0u32..8).prop_map(Op::Row),
            (0u32..8).prop_map(Op::Col),
            Just(Op::All),
            Just(Op::None),
        ],
        0..24,
    )
}

fn apply(selection: &mut SelectionSet, op: &Op) {
    // Out-of-range ops are expected to fail and leave the set alone.
    let _ = match *op {
        Op::Cell(r, c) => selection.toggle_cell(CellCoord::new(r, c)).map(drop),
        Op::Row(r) => selection.toggle_row(r).map(drop),
        Op::Col(c) => selection.toggle_col(c).map(drop),
        Op::All => {
            selection.select_all();
            Ok(())
        }
        Op::None => {
            selection.deselect_all();
            Ok(())
        }
    };
}

fn row_members(selection: &SelectionSet, row: u32) -> Vec<CellCoord> {
    selection.members().filter(|coord| coord.row == row).collect()
}

proptest! {
    #[test]
    fn toggle_row_twice_is_identity_on_that_row(dims in dims(), ops in ops(), row in 0u32..8) {
        prop_assume!(row < dims.rows);
        let mut selection = SelectionSet::new(dims);
        for op in &ops {
            apply(&mut selection, op);
        }
        let before = row_members(&selection, row);
        let mode = selection.row_mode(row).unwrap();

        selection.toggle_row(row).unwrap();
        selection.toggle_row(row).unwrap();

        // Add then remove always empties the row; remove then add always
        // fills it.
        let after = row_members(&selection, row);
        match mode {
            ToggleMode::Add => prop_assert!(after.is_empty()),
            ToggleMode::Remove => prop_assert_eq!(after.len(), dims.cols as usize),
        }
        prop_assert_eq!(selection.row_mode(row).unwrap(), mode);
        if before.is_empty() && mode == ToggleMode::Add {
            prop_assert_eq!(after, before);
        }
    }

    #[test]
    fn select_all_yields_every_cell_once(dims in dims(), ops in ops()) {
        let mut selection = SelectionSet::new(dims);
        for op in &ops {
            apply(&mut selection, op);
        }
        selection.select_all();

        let members: Vec<_> = selection.members().collect();
        let unique: HashSet<_> = members.iter().copied().collect();
        prop_assert_eq!(members.len(), dims.cell_count());
        prop_assert_eq!(unique.len(), dims.cell_count());
        prop_assert_eq!(selection.len(), dims.cell_count());
    }

    #[test]
    fn deselect_all_resets_everything(dims in dims(), ops in ops()) {
        let mut selection = SelectionSet::new(dims);
        for op in &ops {
            apply(&mut selection, op);
        }
        selection.deselect_all();

        prop_assert_eq!(selection.members().count(), 0);
        for row in 0..dims.rows {
            prop_assert_eq!(selection.row_mode(row).unwrap(), ToggleMode::Add);
        }
        for col in 0..dims.cols {
            prop_assert_eq!(selection.col_mode(col).unwrap(), ToggleMode::Add);
        }
    }

    #[test]
    fn members_stay_in_bounds_and_match_len(dims in dims(), ops in ops()) {
        let mut selection = SelectionSet::new(dims);
        for op in &ops {
            apply(&mut selection, op);
        }
        prop_assert!(selection.members().all(|coord| dims.contains(coord)));
        prop_assert_eq!(selection.members().count(), selection.len());
    }

    #[test]
    fn set_then_get_round_trips(dims in dims(), r in 0u32..8, c in 0u32..8, entry in 0u32..1000) {
        let coord = CellCoord::new(r, c);
        prop_assume!(dims.contains(coord));
        let mut grid = Grid::new(dims);
        let assignment = Assignment::new(PlantlistEntryId(entry), SymbolGlyph::default());

        grid.set_assignment(coord, assignment.clone()).unwrap();

        prop_assert_eq!(grid.get(coord).unwrap(), Some(&assignment));
    }

    #[test]
    fn load_rejects_any_out_of_range_coordinate(dims in dims(), r in 0u32..16, c in 0u32..16) {
        let coord = CellCoord::new(r, c);
        prop_assume!(!dims.contains(coord));
        let mut grid = Grid::new(dims);

        let result = grid.load([(coord, Some(Assignment::unlinked(SymbolGlyph::default())))]);

        prop_assert!(result.is_err());
        prop_assert_eq!(grid.assigned_count(), 0);
    }
}
