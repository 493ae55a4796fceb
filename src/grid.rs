//! Tile grid storage: four parallel dense grids, one per channel.
//!
//! A tile's full state is the 4-tuple (character, foreground, background,
//! transform). The four channels are stored as separate same-shaped arrays
//! rather than one array-of-structs: bulk per-channel operations and renderer
//! buffer uploads are column-oriented, and the channels change at very
//! different rates. All four arrays are indexed identically as
//! `[frame][(layer * height + y) * width + x]`, with `y` growing downward
//! and `x` rightward to match on-screen layout.
//!
//! Storage is mutated only through [`crate::doc::Document`] setters so every
//! mutation point can mark the change ledger and be captured for undo.

use crate::transform::TileTransform;

/// Full state of one tile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tile {
    pub ch: u32,
    pub fg: u32,
    pub bg: u32,
    pub xform: TileTransform,
}

impl Tile {
    pub const BLANK: Tile =
        Tile { ch: 0, fg: 0, bg: 0, xform: TileTransform::Normal };

    pub fn new(ch: u32, fg: u32, bg: u32, xform: TileTransform) -> Self {
        Self { ch, fg, bg, xform }
    }
}

/// The per-document multi-dimensional channel arrays.
///
/// Invariant: all four channel vectors always agree on frame count and
/// per-frame shape (`layers * height * width`). Shape-changing operations
/// rebuild all four within one call.
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrids {
    width: usize,
    height: usize,
    layers: usize,
    chars: Vec<Vec<u32>>,
    fgs: Vec<Vec<u32>>,
    bgs: Vec<Vec<u32>>,
    xforms: Vec<Vec<TileTransform>>,
}

impl TileGrids {
    /// Blank storage: every tile char 0, both colors transparent, upright.
    pub fn new(width: usize, height: usize, frames: usize, layers: usize) -> Self {
        let cell_count = layers * height * width;
        Self {
            width,
            height,
            layers,
            chars: vec![vec![0; cell_count]; frames],
            fgs: vec![vec![0; cell_count]; frames],
            bgs: vec![vec![0; cell_count]; frames],
            xforms: vec![vec![TileTransform::Normal; cell_count]; frames],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn frames(&self) -> usize {
        self.chars.len()
    }

    pub fn layers(&self) -> usize {
        self.layers
    }

    #[inline]
    fn idx(&self, layer: usize, x: usize, y: usize) -> usize {
        (layer * self.height + y) * self.width + x
    }

    fn frame_cells(&self) -> usize {
        self.layers * self.height * self.width
    }

    /// Read one tile's full 4-tuple.
    ///
    /// Coordinates must be in bounds; callers pre-validate on the editing
    /// paths (`Document::is_tile_inside`). Debug builds assert.
    #[inline]
    pub fn get(&self, frame: usize, layer: usize, x: usize, y: usize) -> Tile {
        debug_assert!(frame < self.frames() && layer < self.layers);
        debug_assert!(x < self.width && y < self.height);
        let i = self.idx(layer, x, y);
        Tile {
            ch: self.chars[frame][i],
            fg: self.fgs[frame][i],
            bg: self.bgs[frame][i],
            xform: self.xforms[frame][i],
        }
    }

    #[inline]
    pub fn set_char(&mut self, frame: usize, layer: usize, x: usize, y: usize, ch: u32) {
        debug_assert!(x < self.width && y < self.height);
        let i = self.idx(layer, x, y);
        self.chars[frame][i] = ch;
    }

    #[inline]
    pub fn set_fg(&mut self, frame: usize, layer: usize, x: usize, y: usize, fg: u32) {
        debug_assert!(x < self.width && y < self.height);
        let i = self.idx(layer, x, y);
        self.fgs[frame][i] = fg;
    }

    #[inline]
    pub fn set_bg(&mut self, frame: usize, layer: usize, x: usize, y: usize, bg: u32) {
        debug_assert!(x < self.width && y < self.height);
        let i = self.idx(layer, x, y);
        self.bgs[frame][i] = bg;
    }

    #[inline]
    pub fn set_xform(
        &mut self,
        frame: usize,
        layer: usize,
        x: usize,
        y: usize,
        xform: TileTransform,
    ) {
        debug_assert!(x < self.width && y < self.height);
        let i = self.idx(layer, x, y);
        self.xforms[frame][i] = xform;
    }

    /// Write all four channels of one tile.
    #[inline]
    pub fn set(&mut self, frame: usize, layer: usize, x: usize, y: usize, tile: Tile) {
        debug_assert!(x < self.width && y < self.height);
        let i = self.idx(layer, x, y);
        self.chars[frame][i] = tile.ch;
        self.fgs[frame][i] = tile.fg;
        self.bgs[frame][i] = tile.bg;
        self.xforms[frame][i] = tile.xform;
    }

    /// Raw per-frame channel slices, for renderer buffer builds.
    pub fn frame_channels(&self, frame: usize) -> (&[u32], &[u32], &[u32], &[TileTransform]) {
        (
            &self.chars[frame],
            &self.fgs[frame],
            &self.bgs[frame],
            &self.xforms[frame],
        )
    }

    // ----- frame lifecycle ------------------------------------------------

    /// Insert a blank frame at `index`, shifting subsequent frames. Layer 0's
    /// background may be pre-filled; every other cell is blank.
    pub fn insert_blank_frame(&mut self, index: usize, bg_fill: Option<u32>) {
        let cells = self.frame_cells();
        self.chars.insert(index, vec![0; cells]);
        self.fgs.insert(index, vec![0; cells]);
        let mut bg = vec![0; cells];
        if let Some(fill) = bg_fill {
            let layer0 = self.height * self.width;
            for cell in bg.iter_mut().take(layer0) {
                *cell = fill;
            }
        }
        self.bgs.insert(index, bg);
        self.xforms.insert(index, vec![TileTransform::Normal; cells]);
    }

    /// Deep-copy one frame's full layer stack to a new index.
    pub fn duplicate_frame(&mut self, src: usize, dest: usize) {
        let (ch, fg, bg, xf) = (
            self.chars[src].clone(),
            self.fgs[src].clone(),
            self.bgs[src].clone(),
            self.xforms[src].clone(),
        );
        self.chars.insert(dest, ch);
        self.fgs.insert(dest, fg);
        self.bgs.insert(dest, bg);
        self.xforms.insert(dest, xf);
    }

    /// Remove one frame's full layer stack.
    pub fn remove_frame(&mut self, index: usize) {
        self.chars.remove(index);
        self.fgs.remove(index);
        self.bgs.remove(index);
        self.xforms.remove(index);
    }

    /// Relocate a frame without copying its payload (pop-then-insert).
    pub fn move_frame(&mut self, src: usize, dest: usize) {
        let ch = self.chars.remove(src);
        self.chars.insert(dest, ch);
        let fg = self.fgs.remove(src);
        self.fgs.insert(dest, fg);
        let bg = self.bgs.remove(src);
        self.bgs.insert(dest, bg);
        let xf = self.xforms.remove(src);
        self.xforms.insert(dest, xf);
    }

    // ----- layer lifecycle ------------------------------------------------

    /// Append a copy of one layer's cells to every frame simultaneously, so
    /// duplication stays frame-consistent.
    pub fn append_layer_copy(&mut self, src_layer: usize) {
        let span = self.height * self.width;
        let start = src_layer * span;
        for frame in &mut self.chars {
            let copy: Vec<u32> = frame[start..start + span].to_vec();
            frame.extend(copy);
        }
        for frame in &mut self.fgs {
            let copy: Vec<u32> = frame[start..start + span].to_vec();
            frame.extend(copy);
        }
        for frame in &mut self.bgs {
            let copy: Vec<u32> = frame[start..start + span].to_vec();
            frame.extend(copy);
        }
        for frame in &mut self.xforms {
            let copy: Vec<TileTransform> = frame[start..start + span].to_vec();
            frame.extend(copy);
        }
        self.layers += 1;
    }

    /// Clear every cell of one layer in every frame back to blank.
    pub fn clear_layer(&mut self, layer: usize) {
        let span = self.height * self.width;
        let start = layer * span;
        for frame in &mut self.chars {
            frame[start..start + span].fill(0);
        }
        for frame in &mut self.fgs {
            frame[start..start + span].fill(0);
        }
        for frame in &mut self.bgs {
            frame[start..start + span].fill(0);
        }
        for frame in &mut self.xforms {
            frame[start..start + span].fill(TileTransform::Normal);
        }
    }

    /// Remove one layer's slice from every frame.
    pub fn remove_layer(&mut self, layer: usize) {
        let span = self.height * self.width;
        let start = layer * span;
        for frame in &mut self.chars {
            frame.drain(start..start + span);
        }
        for frame in &mut self.fgs {
            frame.drain(start..start + span);
        }
        for frame in &mut self.bgs {
            frame.drain(start..start + span);
        }
        for frame in &mut self.xforms {
            frame.drain(start..start + span);
        }
        self.layers -= 1;
    }

    // ----- resize ---------------------------------------------------------

    /// Shrink to `new_width x new_height`, keeping the region anchored at
    /// `(origin_x, origin_y)` in the old grid. Both dimensions may also stay
    /// equal; neither may grow here.
    pub fn crop(&mut self, new_width: usize, new_height: usize, origin_x: usize, origin_y: usize) {
        let (w, h, layers) = (self.width, self.height, self.layers);
        let sample = |src_layer: usize, x: usize, y: usize| {
            (src_layer * h + y + origin_y) * w + x + origin_x
        };
        for frame in &mut self.chars {
            *frame = rebuild_frame(frame, layers, new_width, new_height, sample);
        }
        for frame in &mut self.fgs {
            *frame = rebuild_frame(frame, layers, new_width, new_height, sample);
        }
        for frame in &mut self.bgs {
            *frame = rebuild_frame(frame, layers, new_width, new_height, sample);
        }
        for frame in &mut self.xforms {
            *frame = rebuild_frame(frame, layers, new_width, new_height, sample);
        }
        self.width = new_width;
        self.height = new_height;
    }

    /// Grow to `new_width x new_height`, keeping existing content at the
    /// top-left. New cells get char 0, the given foreground fill, the given
    /// background fill, and the upright transform.
    pub fn expand(&mut self, new_width: usize, new_height: usize, fill_fg: u32, fill_bg: u32) {
        let (w, h, layers) = (self.width, self.height, self.layers);
        let in_old = move |x: usize, y: usize| x < w && y < h;
        let sample = move |src_layer: usize, x: usize, y: usize| (src_layer * h + y) * w + x;
        for frame in &mut self.chars {
            *frame = grow_frame(frame, layers, new_width, new_height, 0, in_old, sample);
        }
        for frame in &mut self.fgs {
            *frame = grow_frame(frame, layers, new_width, new_height, fill_fg, in_old, sample);
        }
        for frame in &mut self.bgs {
            *frame = grow_frame(frame, layers, new_width, new_height, fill_bg, in_old, sample);
        }
        for frame in &mut self.xforms {
            *frame = grow_frame(
                frame,
                layers,
                new_width,
                new_height,
                TileTransform::Normal,
                in_old,
                sample,
            );
        }
        self.width = new_width;
        self.height = new_height;
    }

    // ----- bulk per-layer transforms --------------------------------------

    /// Mirror one layer of one frame across the vertical axis.
    pub fn flip_layer_horizontal(&mut self, frame: usize, layer: usize) {
        let (w, h) = (self.width, self.height);
        let span = h * w;
        let start = layer * span;
        mirror_rows(&mut self.chars[frame][start..start + span], w);
        mirror_rows(&mut self.fgs[frame][start..start + span], w);
        mirror_rows(&mut self.bgs[frame][start..start + span], w);
        mirror_rows(&mut self.xforms[frame][start..start + span], w);
    }

    /// Mirror one layer of one frame across the horizontal axis.
    pub fn flip_layer_vertical(&mut self, frame: usize, layer: usize) {
        let (w, h) = (self.width, self.height);
        let span = h * w;
        let start = layer * span;
        mirror_columns(&mut self.chars[frame][start..start + span], w, h);
        mirror_columns(&mut self.fgs[frame][start..start + span], w, h);
        mirror_columns(&mut self.bgs[frame][start..start + span], w, h);
        mirror_columns(&mut self.xforms[frame][start..start + span], w, h);
    }

    /// Wrapping (toroidal) translation of one layer of one frame.
    pub fn shift_layer(&mut self, frame: usize, layer: usize, dx: i32, dy: i32) {
        let (w, h) = (self.width, self.height);
        let span = h * w;
        let start = layer * span;
        shift_wrapped(&mut self.chars[frame][start..start + span], w, h, dx, dy);
        shift_wrapped(&mut self.fgs[frame][start..start + span], w, h, dx, dy);
        shift_wrapped(&mut self.bgs[frame][start..start + span], w, h, dx, dy);
        shift_wrapped(&mut self.xforms[frame][start..start + span], w, h, dx, dy);
    }
}

/// Rebuild every layer of one frame at a new (not larger) shape, sampling old
/// cells through `sample(layer, new_x, new_y)`.
fn rebuild_frame<T: Copy>(
    old: &[T],
    layers: usize,
    new_width: usize,
    new_height: usize,
    sample: impl Fn(usize, usize, usize) -> usize,
) -> Vec<T> {
    let mut out = Vec::with_capacity(layers * new_height * new_width);
    for layer in 0..layers {
        for y in 0..new_height {
            for x in 0..new_width {
                out.push(old[sample(layer, x, y)]);
            }
        }
    }
    out
}

/// Rebuild every layer of one frame at a larger shape, keeping old cells and
/// filling the rest with `fill`.
fn grow_frame<T: Copy>(
    old: &[T],
    layers: usize,
    new_width: usize,
    new_height: usize,
    fill: T,
    in_old: impl Fn(usize, usize) -> bool,
    sample: impl Fn(usize, usize, usize) -> usize,
) -> Vec<T> {
    let mut out = Vec::with_capacity(layers * new_height * new_width);
    for layer in 0..layers {
        for y in 0..new_height {
            for x in 0..new_width {
                if in_old(x, y) {
                    out.push(old[sample(layer, x, y)]);
                } else {
                    out.push(fill);
                }
            }
        }
    }
    out
}

/// Reverse each row of a `width`-column layer slice in place.
fn mirror_rows<T>(cells: &mut [T], width: usize) {
    for row in cells.chunks_mut(width) {
        row.reverse();
    }
}

/// Swap rows top-to-bottom in a `width x height` layer slice.
fn mirror_columns<T>(cells: &mut [T], width: usize, height: usize) {
    for y in 0..height / 2 {
        let opposite = height - 1 - y;
        for x in 0..width {
            cells.swap(y * width + x, opposite * width + x);
        }
    }
}

/// Toroidal translation of a `width x height` layer slice.
fn shift_wrapped<T: Copy>(cells: &mut [T], width: usize, height: usize, dx: i32, dy: i32) {
    let dx = dx.rem_euclid(width as i32) as usize;
    let dy = dy.rem_euclid(height as i32) as usize;
    if dx == 0 && dy == 0 {
        return;
    }
    let old: Vec<T> = cells.to_vec();
    for y in 0..height {
        for x in 0..width {
            let sx = (x + width - dx) % width;
            let sy = (y + height - dy) % height;
            cells[y * width + x] = old[sy * width + sx];
        }
    }
}
