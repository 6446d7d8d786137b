//! Row selection state.

use serde::Deserialize;
use serde::Serialize;

/// How many rows may be selected at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectionMode {
    /// Selection is always empty; clicks never select.
    #[default]
    None,
    /// Exactly zero or one selected row; clicking replaces the previous.
    Single,
    /// Toggle membership; insertion order is preserved for predictable
    /// re-render.
    Multiple,
}

/// The selected-row set, ordered by insertion.
///
/// Backed by a `Vec` rather than a hash set so a presentation layer
/// iterating the selection paints rows in the order the user picked them.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<T> {
    mode: SelectionMode,
    items: Vec<T>,
}

impl<T: PartialEq> Selection<T> {
    /// Creates an empty selection in the given mode.
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            items: Vec::new(),
        }
    }

    /// Returns the current mode.
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Switches modes.
    ///
    /// Switching to `None` clears the set; switching to `Single` truncates
    /// it to at most the first previously-selected row.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
        match mode {
            SelectionMode::None => self.items.clear(),
            SelectionMode::Single => self.items.truncate(1),
            SelectionMode::Multiple => {}
        }
    }

    /// Applies a row click to the selection.
    pub fn click(&mut self, item: &T)
    where
        T: Clone,
    {
        match self.mode {
            SelectionMode::None => {}
            SelectionMode::Single => {
                self.items.clear();
                self.items.push(item.clone());
            }
            SelectionMode::Multiple => {
                if let Some(position) = self.items.iter().position(|selected| selected == item) {
                    self.items.remove(position);
                } else {
                    self.items.push(item.clone());
                }
            }
        }
    }

    /// The selected rows, in insertion order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Returns `true` if the given row is selected.
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Empties the selection without changing the mode.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: PartialEq> Default for Selection<T> {
    fn default() -> Self {
        Self::new(SelectionMode::None)
    }
}
