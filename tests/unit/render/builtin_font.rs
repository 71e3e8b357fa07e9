use super::*;

#[test]
fn lowercase_and_accents_fold_to_uppercase() {
    assert_eq!(glyph('a'), glyph('A'));
    assert_eq!(glyph('é'), glyph('E'));
    assert_eq!(glyph('\u{2019}'), glyph('\''));
}

#[test]
fn unknown_chars_draw_a_box() {
    assert_eq!(glyph('\u{4e2d}'), BOX);
    assert_ne!(glyph('1'), BOX);
    assert_eq!(glyph(' '), [0; 7]);
}

#[test]
fn glyph_rows_fit_in_five_columns() {
    for c in (' '..='~').chain(['é', 'ç']) {
        for row in glyph(c) {
            assert!(row < (1 << GLYPH_COLUMNS), "{c:?}");
        }
    }
}

#[test]
fn width_accounts_for_spacing() {
    assert_eq!(line_width("", 4), 0);
    assert_eq!(line_width("A", 4), 20);
    assert_eq!(line_width("AB", 4), 44);
    assert_eq!(scale_for(48.0), 4);
    assert_eq!(scale_for(5.0), 1);
}

#[test]
fn draw_line_sets_pixels_of_the_glyph() {
    let mut pixmap = Pixmap::new(20, 20).unwrap();
    draw_line(&mut pixmap, "I", 0.0, 0.0, 2, [255, 255, 255]);
    let px = |x: u32, y: u32| pixmap.pixel(x, y).unwrap();
    // Top row of 'I' is 0b01110: column 0 empty, column 1 lit.
    assert_eq!(px(0, 0).alpha(), 0);
    assert_eq!(px(2, 0).alpha(), 255);
    assert_eq!(px(2, 0).red(), 255);
}
