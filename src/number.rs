//! Textual number compaction and shortest round-trip float formatting.
//!
//! These rules are shared across the minification pipeline: a number spelled
//! anywhere in the output goes through the same compaction, so `0.50`,
//! `+.5`, and `.5` all end up as `.5`.

/// Significant-digit ceiling used when a coordinate has to be re-derived
/// from its float value.
pub const DEFAULT_PRECISION: u8 = 6;

/// Compact a numeric text span without re-deriving its value.
///
/// Strips a redundant leading `+`, the zero of `0.x`, trailing fractional
/// zeros, and a bare trailing `.`. Exponents lose a redundant `+` and
/// leading zeros. The result is appended to `out`.
pub fn compact(src: &[u8], out: &mut Vec<u8>) {
    let mut s = src;
    let mut neg = false;
    match s.first() {
        Some(b'+') => s = &s[1..],
        Some(b'-') => {
            neg = true;
            s = &s[1..];
        }
        _ => {}
    }

    let (mantissa, exp) = match s.iter().position(|&c| c == b'e' || c == b'E') {
        Some(i) => (&s[..i], Some(&s[i + 1..])),
        None => (s, None),
    };
    let (mut int, mut frac) = match mantissa.iter().position(|&c| c == b'.') {
        Some(i) => (&mantissa[..i], &mantissa[i + 1..]),
        None => (mantissa, &mantissa[..0]),
    };
    while let Some((&b'0', rest)) = int.split_first() {
        int = rest;
    }
    while let Some((&b'0', rest)) = frac.split_last() {
        frac = rest;
    }

    if int.is_empty() && frac.is_empty() {
        // all mantissa digits were zero, sign and exponent are redundant
        out.push(b'0');
        return;
    }

    if neg {
        out.push(b'-');
    }
    out.extend_from_slice(int);
    if !frac.is_empty() {
        out.push(b'.');
        out.extend_from_slice(frac);
    }

    if let Some(mut e) = exp {
        let mut exp_neg = false;
        match e.first() {
            Some(b'+') => e = &e[1..],
            Some(b'-') => {
                exp_neg = true;
                e = &e[1..];
            }
            _ => {}
        }
        while let Some((&b'0', rest)) = e.split_first() {
            e = rest;
        }
        // an exponent of zero is dropped outright
        if !e.is_empty() {
            out.push(b'e');
            if exp_neg {
                out.push(b'-');
            }
            out.extend_from_slice(e);
        }
    }
}

/// Render `f` as the shortest decimal text that parses back to the same
/// value within `precision` significant digits, appended to `out`.
///
/// The fast path formats the rounded value with ryu, which is exact by
/// construction. When decimal rounding lands on a float whose shortest
/// representation needs more digits than the budget, we fall back to an
/// explicit fixed/exponent rendering at the budget and compact that.
pub fn format_shortest(f: f64, precision: u8, out: &mut Vec<u8>) {
    let precision = precision.max(1);
    if f == 0.0 || !f.is_finite() {
        out.push(b'0');
        return;
    }

    let rounded = round_sig(f, precision);
    let mut buf = ryu::Buffer::new();
    let fast = buf.format_finite(rounded);

    let start = out.len();
    compact(fast.as_bytes(), out);
    if sig_digits(&out[start..]) <= precision as usize {
        return;
    }
    out.truncate(start);

    let exp = exponent10(rounded);
    let s = if exp < -4 || exp >= precision as i32 {
        format!("{:.prec$e}", rounded, prec = precision as usize - 1)
    } else {
        let decimals = (precision as i32 - 1 - exp).max(0) as usize;
        format!("{:.prec$}", rounded, prec = decimals)
    };
    compact(s.as_bytes(), out);
}

/// Round `f` to `digits` significant decimal digits.
pub fn round_sig(f: f64, digits: u8) -> f64 {
    if f == 0.0 || !f.is_finite() {
        return f;
    }
    let shift = digits as i32 - 1 - exponent10(f);
    let factor = 10f64.powi(shift);
    let scaled = f * factor;
    if !factor.is_finite() || !scaled.is_finite() {
        return f;
    }
    let rounded = scaled.round() / factor;
    if rounded.is_finite() { rounded } else { f }
}

fn exponent10(f: f64) -> i32 {
    f.abs().log10().floor() as i32
}

/// Count significant digits of compacted number text, ignoring any leading
/// zeros and the exponent part.
fn sig_digits(s: &[u8]) -> usize {
    let mut n = 0;
    let mut seen_nonzero = false;
    for &c in s {
        match c {
            b'e' | b'E' => break,
            b'0' if !seen_nonzero => {}
            b'0'..=b'9' => {
                seen_nonzero = true;
                n += 1;
            }
            _ => {}
        }
    }
    n
}
