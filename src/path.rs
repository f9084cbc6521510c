//! SVG path data shortening.
//!
//! SVG path syntax: https://www.w3.org/TR/SVG/paths.html
//!
//! This is a lossless rewrite of the path mini-language: no point moves and
//! no segment is dropped, only the spelling of command letters and
//! coordinates changes. For every segment we render two candidates (keep the
//! current absolute/relative mode, or flip it and offset the coordinates by
//! the pen position) and emit whichever is shorter. Generic lines that move
//! along one axis collapse to `H`/`V` first.

use crate::number;

/// Output-side state carried between emitted segments: the active command
/// letter (so repeats can be omitted) and what the previous number's text
/// looked like (so the next separator can be elided).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct EncodingState {
    cmd: u8,
    prev_digit: bool,
    prev_digit_is_int: bool,
}

impl EncodingState {
    /// Emit `cmd` into `buf` unless it is already active.
    fn begin(&mut self, buf: &mut Vec<u8>, cmd: u8) {
        if self.cmd != cmd {
            buf.push(cmd);
            *self = EncodingState {
                cmd,
                ..Default::default()
            };
        }
    }

    /// Append a rendered number, inserting a space only where the previous
    /// emission would otherwise swallow its first character.
    fn push_number(&mut self, buf: &mut Vec<u8>, text: &[u8]) {
        let Some(&first) = text.first() else { return };
        if self.prev_digit && (first.is_ascii_digit() || first == b'.' && self.prev_digit_is_int) {
            buf.push(b' ');
        }
        self.prev_digit = true;
        self.prev_digit_is_int = !text.iter().any(|&c| matches!(c, b'.' | b'e' | b'E'));
        buf.extend_from_slice(text);
    }
}

/// Reusable path shortening context.
///
/// Owns the pen position and the scratch buffers for candidate renderings,
/// so repeated calls don't reallocate. One context serves one caller at a
/// time; shortening independent inputs concurrently takes one context each.
pub struct PathShortener {
    precision: u8,
    // absolute pen position and the current subpath origin
    x: f64,
    y: f64,
    x0: f64,
    y0: f64,
    // spans into the current input, with their parsed values
    coords: Vec<(usize, usize)>,
    coord_floats: Vec<f64>,
    state: EncodingState,
    cur: Vec<u8>,
    alt: Vec<u8>,
    num: Vec<u8>,
}

impl Default for PathShortener {
    fn default() -> Self {
        Self::new()
    }
}

impl PathShortener {
    pub fn new() -> Self {
        Self::with_precision(number::DEFAULT_PRECISION)
    }

    /// A context whose rewritten coordinates keep at most `precision`
    /// significant digits. Original coordinate text is never re-rounded, so
    /// this only affects segments that flip between absolute and relative.
    pub fn with_precision(precision: u8) -> Self {
        Self {
            precision: precision.max(1),
            x: 0.0,
            y: 0.0,
            x0: 0.0,
            y0: 0.0,
            coords: Vec::new(),
            coord_floats: Vec::new(),
            state: EncodingState::default(),
            cur: Vec::new(),
            alt: Vec::new(),
            num: Vec::new(),
        }
    }

    /// Shorten raw path data into an equivalent, minimal spelling.
    ///
    /// Never fails: command groups with a wrong argument count are dropped
    /// and unrecognized bytes are skipped like separators.
    pub fn shorten(&mut self, path_data: &[u8]) -> Vec<u8> {
        self.x = 0.0;
        self.y = 0.0;
        self.x0 = 0.0;
        self.y0 = 0.0;
        self.state = EncodingState::default();
        self.coords.clear();
        self.coord_floats.clear();

        let mut out = Vec::with_capacity(path_data.len());
        let mut cmd = 0u8;

        let mut i = 0;
        while i < path_data.len() {
            let c = path_data[i];
            if matches!(c, b' ' | b',' | b'\t' | b'\n' | b'\r') {
                i += 1;
            } else if c.is_ascii_alphabetic() && !repeats(cmd, c) {
                if cmd != 0 {
                    self.flush_group(path_data, cmd, &mut out);
                }
                cmd = c;
                self.coords.clear();
                self.coord_floats.clear();
                i += 1;
            } else if let Some(len) = scan_number(&path_data[i..]) {
                let span = &path_data[i..i + len];
                self.coords.push((i, i + len));
                self.coord_floats.push(parse_float(span));
                i += len;
            } else {
                // stray byte between tokens, treat it like a separator
                i += 1;
            }
        }
        if cmd != 0 {
            self.flush_group(path_data, cmd, &mut out);
        }
        out
    }

    /// Rewrite one accumulated command group tuple by tuple.
    fn flush_group(&mut self, input: &[u8], cmd: u8, out: &mut Vec<u8>) {
        let n = self.coord_floats.len();
        if n == 0 {
            if cmd == b'Z' || cmd == b'z' {
                out.push(b'z');
                self.state = EncodingState {
                    cmd: b'z',
                    ..Default::default()
                };
                self.x = self.x0;
                self.y = self.y0;
            }
            return;
        }
        // wrong argument count, drop the whole group
        let Some(arity) = tuple_arity(cmd, n) else {
            return;
        };
        let is_rel = cmd.is_ascii_lowercase();

        for t in (0..n).step_by(arity) {
            let mut spans = [(0usize, 0usize); 7];
            let mut floats = [0f64; 7];
            spans[..arity].copy_from_slice(&self.coords[t..t + arity]);
            floats[..arity].copy_from_slice(&self.coord_floats[t..t + arity]);

            // absolute endpoint this tuple lands on, before any rewriting
            let (ax, ay) = match cmd {
                b'H' | b'h' => (floats[arity - 1], if is_rel { 0.0 } else { self.y }),
                b'V' | b'v' => (if is_rel { 0.0 } else { self.x }, floats[arity - 1]),
                _ => (floats[arity - 2], floats[arity - 1]),
            };

            // a line moving along one axis only becomes H or V, which drops
            // a coordinate and so must happen before the mode choice
            let mut seg_cmd = cmd;
            let (mut lo, mut hi) = (0, arity);
            if cmd == b'L' || cmd == b'l' {
                if is_rel {
                    if floats[0] == 0.0 {
                        seg_cmd = b'v';
                        lo = 1;
                    } else if floats[1] == 0.0 {
                        seg_cmd = b'h';
                        hi = 1;
                    }
                } else if floats[0] == self.x {
                    seg_cmd = b'V';
                    lo = 1;
                } else if floats[1] == self.y {
                    seg_cmd = b'H';
                    hi = 1;
                }
            }
            let spans = &spans[lo..hi];
            let floats = &floats[lo..hi];

            let cur_state = self.render_continuation(input, seg_cmd, spans);
            let alt_state = if is_rel {
                self.render_alternate(
                    input,
                    seg_cmd.to_ascii_uppercase(),
                    spans,
                    floats,
                    self.x,
                    self.y,
                )
            } else {
                self.render_alternate(
                    input,
                    seg_cmd.to_ascii_lowercase(),
                    spans,
                    floats,
                    -self.x,
                    -self.y,
                )
            };

            // flip the mode only when strictly shorter
            if self.alt.len() < self.cur.len() {
                out.extend_from_slice(&self.alt);
                self.state = alt_state;
            } else {
                out.extend_from_slice(&self.cur);
                self.state = cur_state;
            }

            // the pen moves the same way whichever spelling won
            if is_rel {
                self.x += ax;
                self.y += ay;
            } else {
                self.x = ax;
                self.y = ay;
            }
            if t == 0 && (cmd == b'M' || cmd == b'm') {
                self.x0 = self.x;
                self.y0 = self.y;
            }
        }
    }

    /// Render the tuple keeping its current mode, passing the original
    /// coordinate text through compaction.
    fn render_continuation(
        &mut self,
        input: &[u8],
        cmd: u8,
        spans: &[(usize, usize)],
    ) -> EncodingState {
        let mut state = self.state;
        self.cur.clear();
        state.begin(&mut self.cur, cmd);
        for &(start, end) in spans {
            self.num.clear();
            number::compact(&input[start..end], &mut self.num);
            state.push_number(&mut self.cur, &self.num);
        }
        state
    }

    /// Render the tuple with the opposite mode, offsetting each axis-bearing
    /// coordinate by the pen position and re-deriving its text.
    fn render_alternate(
        &mut self,
        input: &[u8],
        cmd: u8,
        spans: &[(usize, usize)],
        floats: &[f64],
        dx: f64,
        dy: f64,
    ) -> EncodingState {
        let mut state = self.state;
        self.alt.clear();
        state.begin(&mut self.alt, cmd);
        for (i, &f) in floats.iter().enumerate() {
            let offset = match cmd {
                b'M' | b'm' | b'L' | b'l' | b'C' | b'c' | b'S' | b's' | b'Q' | b'q' | b'T'
                | b't' => Some(if i % 2 == 0 { dx } else { dy }),
                b'H' | b'h' => Some(dx),
                b'V' | b'v' => Some(dy),
                // only the arc endpoint moves with the pen; radii, rotation
                // and the two flags keep their original spelling
                b'A' | b'a' if i % 7 == 5 => Some(dx),
                b'A' | b'a' if i % 7 == 6 => Some(dy),
                _ => None,
            };
            self.num.clear();
            match offset {
                Some(d) => number::format_shortest(f + d, self.precision, &mut self.num),
                None => {
                    let (start, end) = spans[i];
                    number::compact(&input[start..end], &mut self.num);
                }
            }
            state.push_number(&mut self.alt, &self.num);
        }
        state
    }
}

/// Whether letter `c` continues the active command rather than starting a
/// new one. `Z` and `z` are the same command either way.
fn repeats(cmd: u8, c: u8) -> bool {
    c == cmd || (c | 0x20) == b'z' && (cmd | 0x20) == b'z'
}

/// Arguments per repetition for each command, or `None` when the collected
/// count cannot be sliced into whole tuples.
fn tuple_arity(cmd: u8, n: usize) -> Option<usize> {
    let arity = match cmd.to_ascii_lowercase() {
        b'h' | b'v' => 1,
        b'm' | b'l' | b't' => 2,
        b's' | b'q' => 4,
        b'c' => 6,
        b'a' => 7,
        _ => return None,
    };
    (n % arity == 0).then_some(arity)
}

/// Scan one SVG number at the start of `b`, returning how many bytes it
/// spans. Accepts integer, fractional, and exponent forms.
fn scan_number(b: &[u8]) -> Option<usize> {
    let mut i = 0;
    if matches!(b.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }
    let mut digits = 0;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
        digits += 1;
    }
    if i < b.len() && b[i] == b'.' {
        i += 1;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return None;
    }
    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        let mut j = i + 1;
        if j < b.len() && (b[j] == b'+' || b[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        // only take the exponent if it has digits, otherwise the letter
        // belongs to the path, not the number
        if j > exp_start {
            i = j;
        }
    }
    Some(i)
}

fn parse_float(span: &[u8]) -> f64 {
    std::str::from_utf8(span)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shortened(d: &str) -> String {
        let out = PathShortener::new().shorten(d.as_bytes());
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_scan_number() {
        assert_eq!(scan_number(b"10"), Some(2));
        assert_eq!(scan_number(b"-10.5,"), Some(5));
        assert_eq!(scan_number(b".5.5"), Some(2));
        assert_eq!(scan_number(b"1e5z"), Some(3));
        assert_eq!(scan_number(b"1E-5"), Some(4));
        assert_eq!(scan_number(b"2e"), Some(1));
        assert_eq!(scan_number(b"5."), Some(2));
        assert_eq!(scan_number(b"."), None);
        assert_eq!(scan_number(b"-"), None);
        assert_eq!(scan_number(b"e5"), None);
    }

    #[test]
    fn test_horizontal_substitution() {
        assert_eq!(shortened("M10 10 L20 10"), "M10 10H20");
        assert_eq!(shortened("m5 5l10 0"), "m5 5h10");
    }

    #[test]
    fn test_vertical_substitution() {
        assert_eq!(shortened("M10 10L10 30"), "M10 10V30");
        assert_eq!(shortened("m0 0l0 5"), "m0 0v5");
    }

    #[test]
    fn test_alternate_mode_wins_when_shorter() {
        // H101 from (100,100) loses to the relative h1
        assert_eq!(shortened("M100 100L101 100"), "M100 100h1");
    }

    #[test]
    fn test_ties_keep_current_mode() {
        assert_eq!(shortened("M10 10L20 20"), "M10 10L20 20");
    }

    #[test]
    fn test_implicit_repetition() {
        // repeated pairs never get a new letter
        assert_eq!(shortened("M10 20 30 40"), "M10 20 30 40");
        assert_eq!(shortened("L10 20L30 40"), "L10 20 30 40");
        assert_eq!(shortened("l5 0 5 0"), "h5 5");
    }

    #[test]
    fn test_number_compaction_passes_through() {
        assert_eq!(shortened("M 10.00 0.50"), "M10 .5");
        assert_eq!(shortened("M+1 -0.5"), "M1-.5");
    }

    #[test]
    fn test_separator_rules() {
        // ".5" after a fractional number needs no space, after an integer
        // it does; "-" never does
        assert_eq!(shortened("M0.5 0.5 L-0.5 -0.5"), "M.5.5l-1-1");
        assert_eq!(shortened("h5 0.5"), "h5 .5");
        assert_eq!(shortened("M1e2 3"), "M1e2 3");
    }

    #[test]
    fn test_close_is_lowercased_and_resets_state() {
        assert_eq!(shortened("M10 10L20 20Z"), "M10 10L20 20z");
        // the letter after a close is never omitted
        assert_eq!(shortened("M10 10L20 20zL30 30"), "M10 10L20 20zL30 30");
    }

    #[test]
    fn test_close_restores_subpath_origin() {
        // after z the pen is back at (10,10), so l5 5 stays shortest as-is
        assert_eq!(shortened("M10 10l10 0zl5 5"), "M10 10h10zl5 5");
    }

    #[test]
    fn test_repeated_close_collapses() {
        assert_eq!(shortened("M1 1L2 2zz"), "M1 1L2 2z");
        assert_eq!(shortened("M1 1L2 2Zz"), "M1 1L2 2z");
    }

    #[test]
    fn test_malformed_group_dropped() {
        assert_eq!(shortened("M10 10L20"), "M10 10");
        // a bad group never takes the rest of the path with it
        assert_eq!(shortened("M10 10C1 2 3L20 20"), "M10 10L20 20");
        assert_eq!(shortened("Z10 10"), "");
    }

    #[test]
    fn test_stray_bytes_skipped() {
        assert_eq!(shortened("M10 10 # L20 10"), "M10 10H20");
        assert_eq!(shortened("M10\t10,L20\n10"), "M10 10H20");
    }

    #[test]
    fn test_tokens_before_any_command_dropped() {
        assert_eq!(shortened("10 20M1 2"), "M1 2");
        assert_eq!(shortened(""), "");
    }

    #[test]
    fn test_arc_keeps_flags_and_radii() {
        assert_eq!(
            shortened("M0 0a25,25 -30 0,1 50,-25"),
            "M0 0a25 25-30 0 1 50-25"
        );
    }

    #[test]
    fn test_curve_group() {
        assert_eq!(
            shortened("M0 0 C 10 20 30 40 50 60"),
            "M0 0C10 20 30 40 50 60"
        );
    }
}
