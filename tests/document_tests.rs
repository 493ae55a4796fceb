//! Integration tests for tile editing, commands, and undo/redo.

use textel::{Charset, Document, Palette, Tile, TileTransform};

use std::rc::Rc;

fn blank_doc(width: usize, height: usize) -> Document {
    Document::new(
        Rc::new(Charset::builtin_ascii()),
        Rc::new(Palette::builtin_c16()),
        width,
        height,
    )
}

#[test]
fn test_blank_document_shape() {
    let doc = blank_doc(4, 4);
    assert_eq!(doc.width(), 4);
    assert_eq!(doc.height(), 4);
    assert_eq!(doc.frame_count(), 1);
    assert_eq!(doc.layer_count(), 1);
    assert_eq!(doc.get_tile(0, 0, 3, 3), Tile::BLANK);
    assert!(doc.is_tile_inside(3, 3));
    assert!(!doc.is_tile_inside(4, 0));
    assert!(!doc.is_tile_inside(0, 4));
}

#[test]
fn test_paint_and_undo_restores_blank() {
    let mut doc = blank_doc(4, 4);
    doc.begin_command();
    doc.set_tile_full(0, 0, 1, 1, Tile::new(5, 2, 3, TileTransform::Normal));
    doc.commit_command();
    assert_eq!(doc.get_tile(0, 0, 1, 1), Tile::new(5, 2, 3, TileTransform::Normal));

    doc.undo();
    assert_eq!(doc.get_tile(0, 0, 1, 1), Tile::new(0, 0, 0, TileTransform::Normal));
}

#[test]
fn test_undo_redo_inverse_law() {
    let mut doc = blank_doc(4, 4);
    // Three committed commands, one of them overwriting an earlier tile.
    doc.begin_command();
    doc.set_char_index(0, 0, 0, 0, 10);
    doc.set_fg(0, 0, 0, 0, 2);
    doc.commit_command();
    doc.begin_command();
    doc.set_tile_full(0, 0, 2, 3, Tile::new(7, 1, 4, TileTransform::FlipX));
    doc.commit_command();
    doc.begin_command();
    doc.set_char_index(0, 0, 0, 0, 11);
    doc.set_transform(0, 0, 0, 0, TileTransform::Rotate180);
    doc.commit_command();

    let expected: Vec<Tile> = doc
        .tile_coords()
        .map(|c| doc.get_tile(c.frame, c.layer, c.x, c.y))
        .collect();

    for _ in 0..3 {
        doc.undo();
    }
    assert_eq!(doc.get_tile(0, 0, 0, 0), Tile::BLANK);
    for _ in 0..3 {
        doc.redo();
    }
    let got: Vec<Tile> = doc
        .tile_coords()
        .map(|c| doc.get_tile(c.frame, c.layer, c.x, c.y))
        .collect();
    assert_eq!(got, expected);
}

#[test]
fn test_undo_on_empty_stack_is_noop() {
    let mut doc = blank_doc(2, 2);
    doc.undo();
    doc.redo();
    assert_eq!(doc.get_tile(0, 0, 0, 0), Tile::BLANK);
}

#[test]
fn test_noop_command_not_recorded() {
    let mut doc = blank_doc(2, 2);
    doc.begin_command();
    doc.set_char_index(0, 0, 0, 0, 0); // already 0
    doc.commit_command();
    assert_eq!(doc.undo_depth(), 0);
}

#[test]
fn test_new_command_discards_redo() {
    let mut doc = blank_doc(2, 2);
    doc.begin_command();
    doc.set_char_index(0, 0, 0, 0, 1);
    doc.commit_command();
    doc.undo();
    assert_eq!(doc.redo_depth(), 1);

    doc.begin_command();
    doc.set_char_index(0, 0, 1, 1, 2);
    doc.commit_command();
    assert_eq!(doc.redo_depth(), 0);
    doc.redo(); // nothing to redo
    assert_eq!(doc.get_tile(0, 0, 0, 0).ch, 0);
}

#[test]
fn test_repeated_edits_to_one_tile_unwind() {
    let mut doc = blank_doc(2, 2);
    doc.begin_command();
    doc.set_char_index(0, 0, 0, 0, 1);
    doc.set_char_index(0, 0, 0, 0, 2);
    doc.set_char_index(0, 0, 0, 0, 3);
    doc.commit_command();
    assert_eq!(doc.get_tile(0, 0, 0, 0).ch, 3);
    doc.undo();
    assert_eq!(doc.get_tile(0, 0, 0, 0).ch, 0);
    doc.redo();
    assert_eq!(doc.get_tile(0, 0, 0, 0).ch, 3);
}

#[test]
fn test_color_index_normalization() {
    let mut doc = blank_doc(2, 2);
    // Palette has 16 entries: 16 wraps to 0, 18 wraps to 2.
    doc.set_fg(0, 0, 0, 0, 18);
    assert_eq!(doc.get_tile(0, 0, 0, 0).fg, 2);
    doc.set_fg(0, 0, 0, 0, 16);
    assert_eq!(doc.get_tile(0, 0, 0, 0).fg, 0);
    doc.set_bg(0, 0, 0, 0, 15);
    assert_eq!(doc.get_tile(0, 0, 0, 0).bg, 15);
    doc.set_bg(0, 0, 0, 0, 0);
    assert_eq!(doc.get_tile(0, 0, 0, 0).bg, 0);
}

#[test]
fn test_partial_set_tile_writes_only_given_channels() {
    let mut doc = blank_doc(2, 2);
    doc.set_tile_full(0, 0, 0, 0, Tile::new(5, 2, 3, TileTransform::Rotate90));
    doc.set_tile(0, 0, 0, 0, Some(9), None, Some(7), None);
    let t = doc.get_tile(0, 0, 0, 0);
    assert_eq!(t, Tile::new(9, 2, 7, TileTransform::Rotate90));
}

#[test]
fn test_preview_never_reaches_undo_history() {
    let mut doc = blank_doc(4, 4);
    doc.preview_tile(0, 0, 1, 1, Tile::new(8, 3, 0, TileTransform::Normal));
    assert!(doc.has_preview());
    assert_eq!(doc.get_tile(0, 0, 1, 1).ch, 8);

    // Any real mutation reverts the preview first.
    doc.begin_command();
    doc.set_char_index(0, 0, 2, 2, 4);
    doc.commit_command();
    assert!(!doc.has_preview());
    assert_eq!(doc.get_tile(0, 0, 1, 1), Tile::BLANK);
    assert_eq!(doc.undo_depth(), 1);

    doc.undo();
    assert_eq!(doc.get_tile(0, 0, 2, 2), Tile::BLANK);
    assert_eq!(doc.get_tile(0, 0, 1, 1), Tile::BLANK);
}

#[test]
fn test_preview_cleared_by_update() {
    let mut doc = blank_doc(2, 2);
    doc.preview_tile(0, 0, 0, 0, Tile::new(3, 1, 0, TileTransform::Normal));
    doc.update(0.016);
    assert!(!doc.has_preview());
    assert_eq!(doc.get_tile(0, 0, 0, 0), Tile::BLANK);
}
