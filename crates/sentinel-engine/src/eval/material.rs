//! Material ratio scoring.
//!
//! The score grows with the ratio between the two material totals rather than their
//! difference, so trading down while ahead raises it.

/// Constant added to both totals so bare kings do not divide by zero.
const OFFSET: i32 = 10;

/// Scale of the ratio; a ratio of 2:1 scores this much.
const SCALE: i32 = 500;

/// Score the material totals from White's point of view.
///
/// The stronger side gets `(stronger + 10) * 500 / (weaker + 10) - 500`; the result is
/// negated when Black is stronger.
pub fn material_score(white: i32, black: i32) -> i32 {
    if white > black {
        ratio(white, black)
    } else {
        -ratio(black, white)
    }
}

#[inline]
fn ratio(stronger: i32, weaker: i32) -> i32 {
    (stronger + OFFSET) * SCALE / (weaker + OFFSET) - SCALE
}
