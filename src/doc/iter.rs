//! Lazy traversal of every tile coordinate in a document.

use super::Document;

/// One tile's address within a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileCoord {
    pub frame: usize,
    pub layer: usize,
    pub x: usize,
    pub y: usize,
}

/// Lazy, finite, restartable sequence of every `(frame, layer, x, y)` in a
/// document, in the fixed nesting order frame, layer, y, x. Holds no borrow
/// of the document, so bulk operations can mutate while iterating.
#[derive(Debug, Clone)]
pub struct TileIter {
    frames: usize,
    layers: usize,
    width: usize,
    height: usize,
    next: Option<TileCoord>,
}

impl TileIter {
    pub fn new(frames: usize, layers: usize, width: usize, height: usize) -> Self {
        let next = (frames > 0 && layers > 0 && width > 0 && height > 0)
            .then_some(TileCoord { frame: 0, layer: 0, x: 0, y: 0 });
        Self { frames, layers, width, height, next }
    }
}

impl Iterator for TileIter {
    type Item = TileCoord;

    fn next(&mut self) -> Option<TileCoord> {
        let current = self.next?;
        let mut n = current;
        n.x += 1;
        if n.x == self.width {
            n.x = 0;
            n.y += 1;
            if n.y == self.height {
                n.y = 0;
                n.layer += 1;
                if n.layer == self.layers {
                    n.layer = 0;
                    n.frame += 1;
                }
            }
        }
        self.next = (n.frame < self.frames).then_some(n);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.next {
            None => (0, Some(0)),
            Some(c) => {
                let per_frame = self.layers * self.height * self.width;
                let done = (c.frame * self.layers + c.layer) * self.height * self.width
                    + c.y * self.width
                    + c.x;
                let remaining = self.frames * per_frame - done;
                (remaining, Some(remaining))
            }
        }
    }
}

impl Document {
    /// Fresh traversal of every tile coordinate in this document.
    pub fn tile_coords(&self) -> TileIter {
        TileIter::new(
            self.frame_count(),
            self.layer_count(),
            self.width(),
            self.height(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nesting_order() {
        let coords: Vec<TileCoord> = TileIter::new(2, 1, 2, 2).collect();
        assert_eq!(coords.len(), 8);
        assert_eq!(coords[0], TileCoord { frame: 0, layer: 0, x: 0, y: 0 });
        assert_eq!(coords[1], TileCoord { frame: 0, layer: 0, x: 1, y: 0 });
        assert_eq!(coords[2], TileCoord { frame: 0, layer: 0, x: 0, y: 1 });
        assert_eq!(coords[4], TileCoord { frame: 1, layer: 0, x: 0, y: 0 });
    }

    #[test]
    fn test_layer_before_frame() {
        let coords: Vec<TileCoord> = TileIter::new(2, 2, 1, 1).collect();
        assert_eq!(coords.len(), 4);
        assert_eq!(coords[1], TileCoord { frame: 0, layer: 1, x: 0, y: 0 });
        assert_eq!(coords[2], TileCoord { frame: 1, layer: 0, x: 0, y: 0 });
    }

    #[test]
    fn test_empty_document_yields_nothing() {
        assert_eq!(TileIter::new(0, 1, 4, 4).count(), 0);
    }

    #[test]
    fn test_restartable() {
        let it = TileIter::new(1, 2, 3, 3);
        assert_eq!(it.clone().count(), 18);
        assert_eq!(it.count(), 18);
    }

    #[test]
    fn test_size_hint_exact() {
        let mut it = TileIter::new(2, 2, 3, 2);
        assert_eq!(it.size_hint(), (24, Some(24)));
        it.next();
        it.next();
        assert_eq!(it.size_hint(), (22, Some(22)));
    }
}
