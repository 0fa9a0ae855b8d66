pub const BYTES_PER_ROW: usize = 24;

/// Renders bytes as fixed-width rows of hex plus their printable ASCII, e.g.
///
/// ```text
/// 11 02 01 61 00 ...                                     | ...a.
/// ```
///
/// The hex part of the last row is padded, so the `|` columns line up.
pub fn hex_dump(bytes: &[u8]) -> String {
    let num_rows = (bytes.len() + BYTES_PER_ROW - 1) / BYTES_PER_ROW;
    let mut out = String::with_capacity(num_rows * (BYTES_PER_ROW * 4 + 4));

    for chunk in bytes.chunks(BYTES_PER_ROW) {
        for b in chunk {
            out.push_str(&format!("{:02x} ", b));
        }
        out.push_str(&" ".repeat((BYTES_PER_ROW - chunk.len()) * 3));
        out.push_str(" | ");
        out.extend(chunk.iter().map(|&b| {
            if (32..=126).contains(&b) {
                b as char
            } else {
                '.'
            }
        }));
        out.push('\n');
    }
    out
}
