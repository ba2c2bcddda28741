//! Shared backing buffer for dense matrices.
//!
//! A [`Storage`] is a reference-counted slice of cells. An owning matrix and
//! every window carved out of it hold handles to the same slice, so a write
//! through one handle is visible through all of them. The buffer lives as
//! long as its last handle.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

pub(crate) struct Storage {
    cells: Rc<[Cell<f64>]>,
}

impl Storage {
    pub(crate) fn filled(len: usize, value: f64) -> Self {
        Self {
            cells: (0..len).map(|_| Cell::new(value)).collect(),
        }
    }

    pub(crate) fn from_vec(data: Vec<f64>) -> Self {
        Self {
            cells: data.into_iter().map(Cell::new).collect(),
        }
    }

    /// Another handle onto the same cells.
    pub(crate) fn share(&self) -> Self {
        Self {
            cells: Rc::clone(&self.cells),
        }
    }

    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cells, &other.cells)
    }

    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub(crate) fn get(&self, index: usize) -> f64 {
        self.cells[index].get()
    }

    #[inline]
    pub(crate) fn set(&self, index: usize, value: f64) {
        self.cells[index].set(value);
    }

    #[inline]
    pub(crate) fn swap(&self, a: usize, b: usize) {
        self.cells[a].swap(&self.cells[b]);
    }

    pub(crate) fn cells(&self, start: usize, len: usize) -> &[Cell<f64>] {
        &self.cells[start..start + len]
    }
}

impl fmt::Debug for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storage")
            .field("len", &self.cells.len())
            .field("handles", &Rc::strong_count(&self.cells))
            .finish()
    }
}
