/// Format a number the way ECMAScript `Number.prototype.toString` does.
///
/// Whole numbers print without a fractional part (`1`, not `1.0`) and `-0` prints as `0`.
pub(crate) fn js_number(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_owned();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if v == 0.0 {
        return "0".to_owned();
    }
    let mut buf = ryu_js::Buffer::new();
    buf.format_finite(v).to_owned()
}

/// Number of decimal digits needed to print `n`.
pub(crate) fn decimal_width(n: u32) -> usize {
    let mut width = 1;
    let mut rest = n / 10;
    while rest > 0 {
        width += 1;
        rest /= 10;
    }
    width
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
