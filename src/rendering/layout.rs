/// Fixed-column grid layout for gallery cards

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Grow every side by `margin` (negative shrinks)
    pub fn inflate(&self, margin: f64) -> Rect {
        Rect {
            x: self.x - margin,
            y: self.y - margin,
            width: self.width + 2.0 * margin,
            height: self.height + 2.0 * margin,
        }
    }

    /// Overlap of two rectangles, `None` when they do not touch
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 < x0 || y1 < y0 {
            return None;
        }
        Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
    }
}

/// Cards are stacked left to right, top to bottom in creation order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub columns: u32,
    pub card_width: f64,
    pub card_height: f64,
    pub gap: f64,
    /// Space above the first row (header, controls)
    pub top_offset: f64,
}

impl GridLayout {
    /// Document-space rectangle of the card at `index`
    pub fn card_rect(&self, index: usize) -> Rect {
        let columns = self.columns.max(1) as usize;
        let col = (index % columns) as f64;
        let row = (index / columns) as f64;
        Rect {
            x: self.gap + col * (self.card_width + self.gap),
            y: self.top_offset + row * (self.card_height + self.gap),
            width: self.card_width,
            height: self.card_height,
        }
    }

    /// Total document height needed for `count` cards
    pub fn content_height(&self, count: usize) -> f64 {
        if count == 0 {
            return self.top_offset;
        }
        let columns = self.columns.max(1) as usize;
        let rows = count.div_ceil(columns) as f64;
        self.top_offset + rows * (self.card_height + self.gap)
    }
}
