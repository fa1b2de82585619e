//! Box construction with injected id and color providers.

#[cfg(test)]
#[path = "factory_test.rs"]
mod factory_test;

use crate::bounds::Position;
use crate::doc::CanvasBox;

/// Generator of fresh box identifiers. Must be collision-free for the
/// process lifetime — a UUID-class source, not a counter.
pub type IdProvider = Box<dyn Fn() -> String>;

/// Generator of fill colors for new boxes.
pub type ColorProvider = Box<dyn Fn() -> String>;

/// Where [`BoxFactory::create_default`] places a new box.
pub const DEFAULT_POSITION: Position = Position { left: 0.0, top: 0.0 };

/// Builds box records from injected generators, so tests can substitute
/// deterministic ids and colors for the browser's random ones.
pub struct BoxFactory {
    id_provider: IdProvider,
    color_provider: ColorProvider,
}

impl BoxFactory {
    #[must_use]
    pub fn new(id_provider: IdProvider, color_provider: ColorProvider) -> Self {
        Self { id_provider, color_provider }
    }

    /// A box at `position` with a fresh id, a fresh color, and the default
    /// size. No side effects beyond invoking the providers.
    #[must_use]
    pub fn create(&self, position: Position) -> CanvasBox {
        CanvasBox::new((self.id_provider)(), (self.color_provider)(), position)
    }

    /// Equivalent to `create(DEFAULT_POSITION)`.
    #[must_use]
    pub fn create_default(&self) -> CanvasBox {
        self.create(DEFAULT_POSITION)
    }
}
