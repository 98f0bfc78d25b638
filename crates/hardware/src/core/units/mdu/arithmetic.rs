//! Multiply/divide arithmetic.
//!
//! Closed-form M-extension results. Division never traps: a zero divisor
//! yields all-ones for the quotient and the dividend for the remainder, and
//! `i32::MIN / -1` yields `i32::MIN` with remainder 0.

use super::MduOp;

/// Number of bits in a word (used for the high-multiply shift).
const WORD_BITS: u32 = 32;

/// Computes `op(a, b)`.
///
/// # Arguments
///
/// * `op` - The M-extension operation.
/// * `a`  - Dividend / multiplicand (rs1).
/// * `b`  - Divisor / multiplier (rs2).
pub const fn compute(op: MduOp, a: u32, b: u32) -> u32 {
    match op {
        MduOp::Mul => a.wrapping_mul(b),
        MduOp::Mulh => ((a as i32 as i64 * b as i32 as i64) >> WORD_BITS) as u32,
        MduOp::Mulhsu => ((a as i32 as i64 * b as i64) >> WORD_BITS) as u32,
        MduOp::Mulhu => ((a as u64 * b as u64) >> WORD_BITS) as u32,
        MduOp::Div => {
            if b == 0 {
                u32::MAX
            } else {
                (a as i32).wrapping_div(b as i32) as u32
            }
        }
        MduOp::Divu => {
            if b == 0 {
                u32::MAX
            } else {
                a / b
            }
        }
        MduOp::Rem => {
            if b == 0 {
                a
            } else {
                (a as i32).wrapping_rem(b as i32) as u32
            }
        }
        MduOp::Remu => {
            if b == 0 {
                a
            } else {
                a % b
            }
        }
    }
}
