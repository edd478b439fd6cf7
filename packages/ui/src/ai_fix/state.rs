//! Renderer-free state of the AI fix dialog: the request lifecycle and the
//! floating window geometry.

/// Smallest size the window can be resized to.
pub const MIN_WIDTH: f64 = 400.0;
pub const MIN_HEIGHT: f64 = 300.0;
/// Share of the viewport the window covers when it opens.
pub const OPEN_FRACTION: f64 = 0.95;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum FixState {
    #[default]
    Idle,
    Loading,
    Ready(String),
    Failed(String),
}

impl FixState {
    /// Begin a request. Refused while one is already running.
    pub fn start(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        *self = FixState::Loading;
        true
    }

    pub fn succeed(&mut self, html: String) {
        if self.is_loading() {
            *self = FixState::Ready(html);
        }
    }

    pub fn fail(&mut self, message: String) {
        if self.is_loading() {
            *self = FixState::Failed(message);
        }
    }

    /// Replace the proposed HTML with the user's edit of it.
    pub fn edit(&mut self, html: String) -> bool {
        match self {
            FixState::Ready(current) => {
                *current = html;
                true
            }
            _ => false,
        }
    }

    /// Hand out the proposed HTML, returning to idle.
    pub fn take_result(&mut self) -> Option<String> {
        match std::mem::take(self) {
            FixState::Ready(html) => Some(html),
            other => {
                *self = other;
                None
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FixState::Loading)
    }

    pub fn result(&self) -> Option<&str> {
        match self {
            FixState::Ready(html) => Some(html),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FixState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Counts dialog openings so a response that arrives after its dialog was
/// closed can be recognized and dropped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Generation(u64);

impl Generation {
    pub fn advance(&mut self) -> Generation {
        self.0 += 1;
        *self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatingWindow {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl FloatingWindow {
    /// Centered, covering [`OPEN_FRACTION`] of the viewport, never below the
    /// minimum size.
    pub fn centered(viewport_width: f64, viewport_height: f64) -> Self {
        let width = (viewport_width * OPEN_FRACTION).max(MIN_WIDTH);
        let height = (viewport_height * OPEN_FRACTION).max(MIN_HEIGHT);
        Self {
            x: ((viewport_width - width) / 2.0).max(0.0),
            y: ((viewport_height - height) / 2.0).max(0.0),
            width,
            height,
        }
    }

    /// Keep the window's top-left corner inside the viewport.
    pub fn moved_to(self, x: f64, y: f64, viewport_width: f64, viewport_height: f64) -> Self {
        let max_x = (viewport_width - self.width).max(0.0);
        let max_y = (viewport_height - self.height).max(0.0);
        Self {
            x: x.clamp(0.0, max_x),
            y: y.clamp(0.0, max_y),
            ..self
        }
    }

    pub fn resized_to(self, width: f64, height: f64) -> Self {
        Self {
            width: width.max(MIN_WIDTH),
            height: height.max(MIN_HEIGHT),
            ..self
        }
    }

    pub fn style(&self) -> String {
        format!(
            "left: {}px; top: {}px; width: {}px; height: {}px;",
            self.x, self.y, self.width, self.height
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureKind {
    Move,
    Resize,
}

/// A pointer drag in progress: where it started and the window at that time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragGesture {
    pub kind: GestureKind,
    pub start_x: f64,
    pub start_y: f64,
    pub origin: FloatingWindow,
}

impl DragGesture {
    pub fn begin(kind: GestureKind, start_x: f64, start_y: f64, origin: FloatingWindow) -> Self {
        Self { kind, start_x, start_y, origin }
    }

    /// The window after the pointer moved to (`x`, `y`).
    pub fn apply(&self, x: f64, y: f64, viewport: (f64, f64)) -> FloatingWindow {
        let dx = x - self.start_x;
        let dy = y - self.start_y;
        match self.kind {
            GestureKind::Move => self.origin.moved_to(
                self.origin.x + dx,
                self.origin.y + dy,
                viewport.0,
                viewport.1,
            ),
            GestureKind::Resize => self
                .origin
                .resized_to(self.origin.width + dx, self.origin.height + dy),
        }
    }
}
