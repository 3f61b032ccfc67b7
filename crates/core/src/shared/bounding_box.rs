/// Axis-aligned detection box in unrotated input-pixel coordinates.
///
/// The origin is the top-left corner of the frame the detection came from,
/// so a box lives in `[0, frame_width) x [0, frame_height)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> f64 {
        self.width as f64 * self.height as f64
    }

    /// Intersection over union with `other`.
    ///
    /// Union is `area(self) + area(other) - intersection`. Pairs with an
    /// empty intersection (including degenerate zero-sized boxes) are 0.0.
    pub fn iou(&self, other: &BoundingBox) -> f64 {
        let ix1 = self.x.max(other.x);
        let iy1 = self.y.max(other.y);
        let ix2 = (self.x + self.width).min(other.x + other.width);
        let iy2 = (self.y + self.height).min(other.y + other.height);

        let inter = (ix2 - ix1).max(0) as f64 * (iy2 - iy1).max(0) as f64;
        if inter == 0.0 {
            return 0.0;
        }

        inter / (self.area() + other.area() - inter)
    }
}
