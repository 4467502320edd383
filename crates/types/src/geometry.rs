#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Scales to `width`, keeping the aspect ratio.
    pub fn scale_to_width(self, width: f32) -> Self {
        if self.width <= 0.0 {
            return Self::new(width, 0.0);
        }
        Self::new(width, self.height * width / self.width)
    }

    /// Shrinks (never grows) to fit inside `bounds`, keeping the aspect ratio.
    pub fn fit_within(self, bounds: Size) -> Self {
        if self.width <= 0.0 || self.height <= 0.0 {
            return self;
        }
        let ratio = (bounds.width / self.width)
            .min(bounds.height / self.height)
            .min(1.0);
        Self::new(self.width * ratio, self.height * ratio)
    }
}
