// Display surface and refresh scheduling seams

/// The surface landmarks are scaled onto
pub trait DisplaySurface: Send + Sync {
    fn width(&self) -> f32;
    fn height(&self) -> f32;
}

/// Single-shot "run again on the next display refresh" primitive.
///
/// Each call arms exactly one future invocation of the tracker cycle.
pub trait RefreshScheduler: Send + Sync {
    fn request_refresh(&self);
}

/// A display of constant size, for headless hosts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedDisplay {
    pub width: f32,
    pub height: f32,
}

impl FixedDisplay {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl DisplaySurface for FixedDisplay {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }
}
