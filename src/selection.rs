//! Row selection: bulk toggles and the click-and-drag session.
//!
//! Every operation here *toggles*; nothing sets a row to a fixed value.  A
//! drag that crosses back over a row it already flipped flips it again.

/// Anything holding one checkbox per service row, addressed by row index.
///
/// Implemented for `Vec<bool>` in tests and by `dom_utils::DomCheckboxTable`
/// on the page.
pub trait CheckboxTable {
    fn row_count(&self) -> usize;
    fn is_checked(&self, row: usize) -> bool;
    fn set_checked(&mut self, row: usize, checked: bool);
}

impl CheckboxTable for Vec<bool> {
    fn row_count(&self) -> usize {
        self.len()
    }

    fn is_checked(&self, row: usize) -> bool {
        self.get(row).copied().unwrap_or(false)
    }

    fn set_checked(&mut self, row: usize, checked: bool) {
        if let Some(slot) = self.get_mut(row) {
            *slot = checked;
        }
    }
}

/// A change to apply to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOp {
    Toggle(usize),
    ToggleAll,
}

impl SelectionOp {
    pub fn apply<T: CheckboxTable + ?Sized>(&self, table: &mut T) {
        match *self {
            SelectionOp::Toggle(row) => {
                toggle_row(table, row);
            }
            SelectionOp::ToggleAll => toggle_all(table),
        }
    }
}

/// Flip one row. Out-of-range rows are ignored. Returns the new state.
pub fn toggle_row<T: CheckboxTable + ?Sized>(table: &mut T, row: usize) -> Option<bool> {
    if row >= table.row_count() {
        return None;
    }
    let checked = !table.is_checked(row);
    table.set_checked(row, checked);
    Some(checked)
}

/// Invert every row.
pub fn toggle_all<T: CheckboxTable + ?Sized>(table: &mut T) {
    for row in 0..table.row_count() {
        toggle_row(table, row);
    }
}

/// Primary-button drag across the table. `Idle → Dragging` on pointer-down
/// over a row, back to `Idle` on pointer-up anywhere in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragSession {
    #[default]
    Idle,
    Dragging {
        origin: usize,
    },
}

impl DragSession {
    pub fn begin(&mut self, origin: usize) {
        *self = DragSession::Dragging { origin };
    }

    /// Returns whether a session was actually running.
    pub fn end(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        *self = DragSession::Idle;
        was_dragging
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragSession::Dragging { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn toggle_ignores_missing_rows() {
        let mut table = vec![false, true];
        assert_eq!(toggle_row(&mut table, 5), None);
        assert_eq!(table, vec![false, true]);
        assert_eq!(toggle_row(&mut table, 1), Some(false));
    }

    #[test]
    fn drag_session_lifecycle() {
        let mut drag = DragSession::default();
        assert!(!drag.end(), "ending an idle session is a no-op");
        drag.begin(3);
        assert_eq!(drag, DragSession::Dragging { origin: 3 });
        assert!(drag.end());
        assert_eq!(drag, DragSession::Idle);
    }

    proptest! {
        #[test]
        fn toggle_all_inverts_every_row(rows in prop::collection::vec(any::<bool>(), 0..64)) {
            let mut table = rows.clone();
            SelectionOp::ToggleAll.apply(&mut table);
            let expected: Vec<bool> = rows.iter().map(|c| !c).collect();
            prop_assert_eq!(table, expected);
        }

        #[test]
        fn toggle_all_twice_is_identity(rows in prop::collection::vec(any::<bool>(), 0..64)) {
            let mut table = rows.clone();
            toggle_all(&mut table);
            toggle_all(&mut table);
            prop_assert_eq!(table, rows);
        }
    }
}
