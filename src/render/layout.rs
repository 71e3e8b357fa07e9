//! Fixed caption layout.

/// Title wrap width, in characters.
pub const TITLE_WRAP_COLUMNS: usize = 30;
/// Body wrap width, in characters.
pub const BODY_WRAP_COLUMNS: usize = 40;

pub const TITLE_FONT_SIZE: f32 = 60.0;
pub const BODY_FONT_SIZE: f32 = 48.0;
pub const CAPTION_FONT_SIZE: f32 = 36.0;
/// Line advance as a multiple of the font size.
pub const LINE_SPACING: f32 = 1.2;

/// Top of the title block.
pub const TITLE_TOP: f32 = 100.0;
/// Gap between the title block and the body.
pub const TITLE_BODY_GAP: f32 = 50.0;
/// Top of the body when there is no title.
pub const BODY_TOP_WITHOUT_TITLE: f32 = 200.0;
/// Distance of the link caption from the bottom edge.
pub const CAPTION_BOTTOM_OFFSET: f32 = 200.0;

pub const BACKGROUND_RGB: [u8; 3] = [25, 25, 112];
pub const TEXT_RGB: [u8; 3] = [255, 255, 255];

/// Greedy word wrap on character counts.
///
/// Runs of whitespace collapse to one space. Words longer than `width` are broken into
/// `width`-sized pieces.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut cur = String::new();
    let mut cur_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if cur_len > 0 && cur_len + 1 + word_len <= width {
            cur.push(' ');
            cur.push_str(word);
            cur_len += 1 + word_len;
            continue;
        }

        if cur_len > 0 {
            lines.push(std::mem::take(&mut cur));
            cur_len = 0;
        }

        if word_len <= width {
            cur.push_str(word);
            cur_len = word_len;
            continue;
        }

        let chars: Vec<char> = word.chars().collect();
        let mut pieces = chars.chunks(width).peekable();
        while let Some(piece) = pieces.next() {
            let s: String = piece.iter().collect();
            if pieces.peek().is_some() {
                lines.push(s);
            } else {
                cur = s;
                cur_len = piece.len();
            }
        }
    }

    if cur_len > 0 {
        lines.push(cur);
    }
    lines
}

/// Height of a block of `lines` at `font_size`: full advances between lines plus one line.
pub fn block_height(lines: usize, font_size: f32) -> f32 {
    if lines == 0 {
        return 0.0;
    }
    (lines - 1) as f32 * font_size * LINE_SPACING + font_size
}

/// Left edge that centers a line of `line_width` in `frame_width`.
pub fn centered_x(frame_width: u32, line_width: f32) -> f32 {
    ((frame_width as f32 - line_width) / 2.0).floor()
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
