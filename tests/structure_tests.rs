//! Integration tests for structural operations: resize, frames, layers.

use textel::{Charset, Document, EditContext, Palette, Tile, TileTransform};

use std::rc::Rc;

fn blank_doc(width: usize, height: usize) -> Document {
    Document::new(
        Rc::new(Charset::builtin_ascii()),
        Rc::new(Palette::builtin_c16()),
        width,
        height,
    )
}

fn ctx(fg: u32, bg: u32) -> EditContext {
    EditContext { ch: 0, fg, bg, xform: TileTransform::Normal }
}

#[test]
fn test_resize_grow_fills_with_context() {
    let mut doc = blank_doc(2, 2);
    doc.set_char_index(0, 0, 1, 1, 9);
    doc.resize(4, 3, 0, 0, true, ctx(5, 6));
    assert_eq!(doc.width(), 4);
    assert_eq!(doc.height(), 3);
    assert_eq!(doc.get_tile(0, 0, 1, 1).ch, 9);
    let grown = doc.get_tile(0, 0, 3, 2);
    assert_eq!(grown.ch, 0);
    assert_eq!(grown.fg, 5);
    assert_eq!(grown.bg, 6);
}

#[test]
fn test_resize_grow_background_transparent_by_default() {
    let mut doc = blank_doc(2, 2);
    doc.resize(3, 2, 0, 0, false, ctx(5, 6));
    let grown = doc.get_tile(0, 0, 2, 0);
    assert_eq!(grown.fg, 5);
    assert_eq!(grown.bg, 0);
}

#[test]
fn test_resize_shrink_keeps_anchored_region() {
    let mut doc = blank_doc(4, 4);
    doc.set_char_index(0, 0, 2, 3, 7);
    doc.resize(2, 2, 1, 2, false, ctx(1, 0));
    assert_eq!(doc.width(), 2);
    assert_eq!(doc.height(), 2);
    assert_eq!(doc.get_tile(0, 0, 1, 1).ch, 7);
}

#[test]
fn test_resize_is_undoable() {
    let mut doc = blank_doc(4, 4);
    doc.set_char_index(0, 0, 3, 3, 5);
    doc.resize(2, 2, 0, 0, false, ctx(1, 0));
    assert_eq!(doc.width(), 2);
    doc.undo();
    assert_eq!(doc.width(), 4);
    assert_eq!(doc.height(), 4);
    assert_eq!(doc.get_tile(0, 0, 3, 3).ch, 5);
    doc.redo();
    assert_eq!(doc.width(), 2);
}

#[test]
fn test_resize_mixed_grow_and_shrink() {
    let mut doc = blank_doc(4, 2);
    doc.set_char_index(0, 0, 1, 0, 3);
    doc.resize(2, 4, 1, 0, false, ctx(1, 0));
    assert_eq!(doc.width(), 2);
    assert_eq!(doc.height(), 4);
    // Old (1, 0) sits at (0, 0) after the crop anchored at x=1.
    assert_eq!(doc.get_tile(0, 0, 0, 0).ch, 3);
    assert_eq!(doc.get_tile(0, 0, 0, 3), Tile::new(0, 1, 0, TileTransform::Normal));
}

#[test]
fn test_add_layer_is_blank_and_active() {
    let mut doc = blank_doc(3, 3);
    doc.set_char_index(0, 0, 1, 1, 9);
    doc.add_layer(None, None);
    assert_eq!(doc.layer_count(), 2);
    assert_eq!(doc.active_layer, 1);
    assert_eq!(doc.get_tile(0, 1, 1, 1), Tile::BLANK);
    assert_eq!(doc.get_tile(0, 0, 1, 1).ch, 9);
    assert!(doc.layers[1].z > doc.layers[0].z);
}

#[test]
fn test_duplicate_layer_copies_every_frame() {
    let mut doc = blank_doc(2, 2);
    doc.insert_frame_before(1, 0.2, None);
    doc.set_char_index(0, 0, 0, 0, 1);
    doc.set_char_index(1, 0, 1, 1, 2);
    doc.duplicate_layer(0, None, Some("dup".to_string()));
    assert_eq!(doc.layer_count(), 2);
    assert_eq!(doc.get_tile(0, 1, 0, 0).ch, 1);
    assert_eq!(doc.get_tile(1, 1, 1, 1).ch, 2);
    assert_eq!(doc.layers[1].name, "dup");
}

#[test]
fn test_delete_layer_clamps_active() {
    let mut doc = blank_doc(2, 2);
    doc.add_layer(None, None);
    doc.add_layer(None, None);
    assert_eq!(doc.active_layer, 2);
    doc.delete_layer(2);
    assert_eq!(doc.layer_count(), 2);
    assert_eq!(doc.active_layer, 1);
}

#[test]
fn test_delete_layer_is_undoable() {
    let mut doc = blank_doc(2, 2);
    doc.add_layer(None, Some("top".to_string()));
    doc.set_char_index(0, 1, 0, 0, 4);
    doc.delete_layer(1);
    assert_eq!(doc.layer_count(), 1);
    doc.undo();
    assert_eq!(doc.layer_count(), 2);
    assert_eq!(doc.get_tile(0, 1, 0, 0).ch, 4);
    assert_eq!(doc.layers[1].name, "top");
}

#[test]
fn test_insert_frame_prefills_layer0_background() {
    let mut doc = blank_doc(2, 2);
    doc.add_layer(None, None);
    doc.insert_frame_before(0, 0.5, Some(6));
    assert_eq!(doc.frame_count(), 2);
    assert_eq!(doc.frame_delays[0], 0.5);
    assert_eq!(doc.get_tile(0, 0, 1, 1).bg, 6);
    assert_eq!(doc.get_tile(0, 1, 1, 1).bg, 0);
}

#[test]
fn test_duplicate_frame_copies_layer_stack() {
    let mut doc = blank_doc(2, 2);
    doc.add_layer(None, None);
    doc.set_char_index(0, 1, 1, 0, 8);
    doc.duplicate_frame(0, None, None);
    assert_eq!(doc.frame_count(), 2);
    assert_eq!(doc.get_tile(1, 1, 1, 0).ch, 8);
    assert_eq!(doc.frame_delays[1], doc.frame_delays[0]);
}

#[test]
fn test_frame_delay_integrity_through_move() {
    let mut doc = blank_doc(2, 2);
    doc.insert_frame_before(0, 0.1, None);
    doc.insert_frame_before(1, 0.2, None);
    doc.insert_frame_before(2, 0.3, None);
    // Drop the original blank frame so exactly the three inserted remain.
    doc.delete_frame_at(3);
    for (frame, mark) in [(0, 1), (1, 2), (2, 3)] {
        doc.set_char_index(frame, 0, 0, 0, mark);
    }

    doc.move_frame_to(2, 0);
    assert_eq!(doc.frame_delays, vec![0.3, 0.1, 0.2]);
    assert_eq!(doc.get_tile(0, 0, 0, 0).ch, 3);
    assert_eq!(doc.get_tile(1, 0, 0, 0).ch, 1);
    assert_eq!(doc.get_tile(2, 0, 0, 0).ch, 2);
}

#[test]
fn test_delete_frame_clamps_active_and_undoes() {
    let mut doc = blank_doc(2, 2);
    doc.insert_frame_before(1, 0.2, None);
    doc.active_frame = 1;
    doc.set_char_index(1, 0, 0, 0, 5);
    doc.delete_frame_at(1);
    assert_eq!(doc.frame_count(), 1);
    assert_eq!(doc.active_frame, 0);
    doc.undo();
    assert_eq!(doc.frame_count(), 2);
    assert_eq!(doc.get_tile(1, 0, 0, 0).ch, 5);
    assert_eq!(doc.frame_delays[1], 0.2);
}
