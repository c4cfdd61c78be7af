use serde::{Deserialize, Serialize};

/// What a cell holds. Fixed once the board is generated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Content {
    Mine,
    /// Number of mines in the Moore neighborhood, `0..=8`.
    AdjacentCount(u8),
}

impl Content {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }
}

impl Default for Content {
    fn default() -> Self {
        Self::AdjacentCount(0)
    }
}

/// A single board position: visibility plus immutable content.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) covered: bool,
    pub(crate) content: Content,
}

impl Cell {
    pub const fn covered(content: Content) -> Self {
        Self {
            covered: true,
            content,
        }
    }

    pub const fn is_covered(self) -> bool {
        self.covered
    }

    pub const fn content(self) -> Content {
        self.content
    }

    pub const fn is_mine(self) -> bool {
        self.content.is_mine()
    }

    /// Covered cell that does not hold a mine, i.e. one still blocking a win.
    pub const fn is_covered_safe(self) -> bool {
        self.covered && !self.content.is_mine()
    }

    pub const fn view(self) -> CellView {
        match (self.covered, self.content) {
            (true, _) => CellView::Covered,
            (false, Content::Mine) => CellView::Mine,
            (false, Content::AdjacentCount(0)) => CellView::Empty,
            (false, Content::AdjacentCount(count)) => CellView::Count(count),
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::covered(Content::default())
    }
}

/// Player-visible category of a cell, enough to render it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Covered,
    Empty,
    Mine,
    Count(u8),
}

impl CellView {
    pub const fn is_covered(self) -> bool {
        matches!(self, Self::Covered)
    }
}
