use image::GrayImage;

/// Axis-aligned rectangle in frame pixel coordinates
///
/// `width` and `height` count pixels, so a single pixel has size 1x1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    /// Last column covered by the box
    pub fn right(&self) -> u32 {
        self.x + self.width - 1
    }

    /// Last row covered by the box
    pub fn bottom(&self) -> u32 {
        self.y + self.height - 1
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

/// Smallest rectangle enclosing every non-zero pixel of `mask`
///
/// Disjoint regions are merged into one box. Returns `None` for an
/// all-zero mask.
pub fn locate(mask: &GrayImage) -> Option<BoundingBox> {
    let mut extent: Option<(u32, u32, u32, u32)> = None;

    for (x, y, pixel) in mask.enumerate_pixels() {
        if pixel[0] == 0 {
            continue;
        }
        extent = Some(match extent {
            None => (x, y, x, y),
            Some((min_x, min_y, max_x, max_y)) => {
                (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
            }
        });
    }

    extent.map(|(min_x, min_y, max_x, max_y)| BoundingBox {
        x: min_x,
        y: min_y,
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
    })
}
