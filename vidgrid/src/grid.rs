use frame_types::{Error, Result};

/// Most participant tiles ever composed into one canvas.
pub const MAX_TILES: usize = 16;

/// All candidate grid layouts, smallest capacity first.
const CANDIDATE_GRIDS: &[(u32, u32)] = &[
    (1, 1), // 1 participant
    (2, 2), // up to 4
    (2, 3), // up to 6, two rows of three
    (3, 3), // up to 9
    (4, 4), // up to 16
];

/// A video grid layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    /// Number of rows in the grid
    pub rows: u32,
    /// Number of columns in the grid
    pub cols: u32,
}

/// One slot's position and size within a canvas, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl GridLayout {
    /// Create a new grid layout.
    pub fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// Get the total number of slots in this grid.
    pub fn total_slots(&self) -> u32 {
        self.rows * self.cols
    }

    /// Pick the grid for the given participant count.
    ///
    /// Counts above [`MAX_TILES`] are capped; the extra participants are
    /// not shown.
    pub fn for_count(count: usize) -> Self {
        let capped = count.clamp(1, MAX_TILES) as u32;
        for &(rows, cols) in CANDIDATE_GRIDS {
            if rows * cols >= capped {
                return Self::new(rows, cols);
            }
        }
        Self::new(4, 4)
    }

    /// Calculate the aspect ratio of this grid, assuming 16:9 videos in each cell.
    pub fn aspect_ratio(&self) -> f32 {
        (self.cols as f32 * 16.0) / (self.rows as f32 * 9.0)
    }

    /// Find the grid that best matches a canvas shape while holding
    /// `count` participants.
    ///
    /// The algorithm:
    /// 1. Calculate the canvas aspect ratio
    /// 2. For each candidate grid with enough slots, calculate how close
    ///    its aspect ratio is to the canvas
    /// 3. Select the grid with the smallest difference
    /// 4. Tie-breaker: prefer grids with more slots
    pub fn optimal_for_canvas(count: usize, width: f32, height: f32) -> Self {
        let canvas_ratio = width / height;
        let capped = count.clamp(1, MAX_TILES) as u32;

        let mut best_layout = Self::for_count(count); // Default fallback
        let mut best_score = f32::MAX;
        let mut best_slots = 0u32;

        for &(rows, cols) in CANDIDATE_GRIDS {
            let layout = GridLayout::new(rows, cols);
            if layout.total_slots() < capped {
                continue;
            }

            // Score is the absolute difference in aspect ratios
            let score = (canvas_ratio - layout.aspect_ratio()).abs();

            // Select if better score, or same score but more slots
            if score < best_score || (score == best_score && layout.total_slots() > best_slots) {
                best_layout = layout;
                best_score = score;
                best_slots = layout.total_slots();
            }
        }

        best_layout
    }

    /// Partition a canvas into one rectangle per slot, row-major.
    ///
    /// Cells differ by at most one pixel per axis: the remainder of the
    /// integer division is spread one pixel at a time across the leading
    /// columns and rows. The union of the rectangles tiles the canvas
    /// exactly, with no gaps and no overlap.
    pub fn slot_rects(&self, width: u32, height: u32) -> Result<Vec<SlotRect>> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_dimension(width, height));
        }

        let col_widths = split_evenly(width, self.cols);
        let row_heights = split_evenly(height, self.rows);

        let mut rects = Vec::with_capacity(self.total_slots() as usize);
        let mut y = 0u32;
        for &row_height in &row_heights {
            let mut x = 0u32;
            for &col_width in &col_widths {
                rects.push(SlotRect {
                    x,
                    y,
                    width: col_width,
                    height: row_height,
                });
                x += col_width;
            }
            y += row_height;
        }

        Ok(rects)
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::new(2, 2)
    }
}

/// Split `total` pixels into `parts` spans whose sizes differ by at most
/// one, larger spans first.
fn split_evenly(total: u32, parts: u32) -> Vec<u32> {
    let base = total / parts;
    let extra = total % parts;
    (0..parts)
        .map(|i| if i < extra { base + 1 } else { base })
        .collect()
}
