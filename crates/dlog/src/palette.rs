//! crates/dlog/src/palette.rs
//! Rotating color assignment for newly created namespaces.

/// Palette used when no palette is configured.
pub const DEFAULT_PALETTE: [&str; 5] = ["#007ACC", "#CC3300", "#33CC33", "#B58900", "#6C71C4"];

/// Fixed ordered palette with a rotating index.
///
/// Each call to [`next_color`](Self::next_color) hands out the color at the
/// current index and advances it, wrapping modulo the palette length. One
/// assigner is shared by every namespace created through the same registry.
///
/// # Examples
///
/// ```
/// use dlog::ColorAssigner;
///
/// let mut colors = ColorAssigner::new(["red", "green"]);
/// assert_eq!(colors.next_color().as_deref(), Some("red"));
/// assert_eq!(colors.next_color().as_deref(), Some("green"));
/// assert_eq!(colors.next_color().as_deref(), Some("red"));
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ColorAssigner {
    palette: Vec<String>,
    index: usize,
}

impl ColorAssigner {
    /// Creates an assigner over `palette`, starting at its first color.
    pub fn new<I, T>(palette: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            palette: palette.into_iter().map(Into::into).collect(),
            index: 0,
        }
    }

    /// Returns the palette.
    #[must_use]
    pub fn palette(&self) -> &[String] {
        &self.palette
    }

    /// Returns the index of the color the next call will hand out.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the next color without advancing.
    #[must_use]
    pub fn peek(&self) -> Option<&str> {
        self.palette.get(self.index).map(String::as_str)
    }

    /// Returns the next color and advances the index.
    ///
    /// An empty palette yields `None` and leaves the index at zero.
    pub fn next_color(&mut self) -> Option<String> {
        let color = self.palette.get(self.index).cloned()?;
        self.index = (self.index + 1) % self.palette.len();
        Some(color)
    }

    /// Moves the index back to the first color.
    pub fn rewind(&mut self) {
        self.index = 0;
    }
}

impl Default for ColorAssigner {
    fn default() -> Self {
        Self::new(DEFAULT_PALETTE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_has_five_colors() {
        let colors = ColorAssigner::default();
        assert_eq!(colors.palette().len(), 5);
        assert_eq!(colors.peek(), Some("#007ACC"));
    }

    #[test]
    fn index_wraps_modulo_palette_length() {
        let mut colors = ColorAssigner::new(["a", "b", "c"]);
        let assigned: Vec<_> = (0..7).filter_map(|_| colors.next_color()).collect();
        assert_eq!(assigned, ["a", "b", "c", "a", "b", "c", "a"]);
        assert_eq!(colors.index(), 1);
    }

    #[test]
    fn empty_palette_yields_nothing() {
        let mut colors = ColorAssigner::new(Vec::<String>::new());
        assert_eq!(colors.next_color(), None);
        assert_eq!(colors.index(), 0);
        assert_eq!(colors.peek(), None);
    }

    #[test]
    fn rewind_restarts_rotation() {
        let mut colors = ColorAssigner::new(["a", "b"]);
        colors.next_color();
        colors.rewind();
        assert_eq!(colors.next_color().as_deref(), Some("a"));
    }
}
