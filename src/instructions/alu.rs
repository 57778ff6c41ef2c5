//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADC / SBC: Add and subtract with carry, binary or packed BCD
//! - AND / ORA / EOR: Bitwise logic on the accumulator
//! - CMP / CPX / CPY: Register comparison
//! - BIT: Bit test
//!
//! Decimal mode follows NMOS behavior: the accumulator receives the BCD
//! result, while Z for ADC and every flag for SBC come from the binary
//! computation.

use crate::cpu::Operand;
use crate::{MemoryBus, CPU};

/// Result of an 8-bit addition or subtraction, with the flags it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Arithmetic {
    pub(crate) value: u8,
    pub(crate) carry: bool,
    pub(crate) overflow: bool,
    pub(crate) negative: bool,
    pub(crate) zero: bool,
}

/// Binary `a + m + carry`.
pub(crate) fn add_binary(a: u8, m: u8, carry: bool) -> Arithmetic {
    let sum = a as u16 + m as u16 + carry as u16;
    let value = sum as u8;

    Arithmetic {
        value,
        carry: sum > 0xFF,
        // Both operands share a sign that the result does not
        overflow: (a ^ value) & (m ^ value) & 0x80 != 0,
        negative: value & 0x80 != 0,
        zero: value == 0,
    }
}

/// Packed BCD `a + m + carry`.
pub(crate) fn add_decimal(a: u8, m: u8, carry: bool) -> Arithmetic {
    let binary = add_binary(a, m, carry);

    let mut lo = (a & 0x0F) as u16 + (m & 0x0F) as u16 + carry as u16;
    let mut hi = (a >> 4) as u16 + (m >> 4) as u16;
    if lo > 0x09 {
        lo += 0x06;
    }
    if lo > 0x0F {
        hi += 1;
    }

    // N and V are sampled before the high nibble is adjusted
    let negative = hi & 0x08 != 0;
    let overflow = ((hi << 4) as u8 ^ a) & 0x80 != 0 && (a ^ m) & 0x80 == 0;

    if hi > 0x09 {
        hi += 0x06;
    }

    Arithmetic {
        value: ((hi << 4) | (lo & 0x0F)) as u8,
        carry: hi > 0x0F,
        overflow,
        negative,
        zero: binary.zero,
    }
}

/// Binary `a - m - !carry`.
pub(crate) fn subtract_binary(a: u8, m: u8, carry: bool) -> Arithmetic {
    add_binary(a, !m, carry)
}

/// Packed BCD `a - m - !carry`.
pub(crate) fn subtract_decimal(a: u8, m: u8, carry: bool) -> Arithmetic {
    let binary = subtract_binary(a, m, carry);

    let mut lo = (a & 0x0F) as i16 - (m & 0x0F) as i16 - (!carry) as i16;
    let mut hi = (a >> 4) as i16 - (m >> 4) as i16;
    if lo < 0 {
        lo -= 0x06;
        hi -= 1;
    }
    if hi < 0 {
        hi -= 0x06;
    }

    Arithmetic {
        value: (((hi << 4) | (lo & 0x0F)) & 0xFF) as u8,
        ..binary
    }
}

fn apply_arithmetic<M: MemoryBus>(cpu: &mut CPU<M>, result: Arithmetic) {
    cpu.a = result.value;
    cpu.flag_c = result.carry;
    cpu.flag_v = result.overflow;
    cpu.flag_n = result.negative;
    cpu.flag_z = result.zero;
}

/// Executes the ADC (Add with Carry) instruction.
///
/// Adds the operand plus the carry flag to the accumulator. Updates N, V, Z
/// and C. Honors decimal mode.
pub(crate) fn execute_adc<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let value = cpu.load(operand);
    let result = if cpu.flag_d {
        add_decimal(cpu.a, value, cpu.flag_c)
    } else {
        add_binary(cpu.a, value, cpu.flag_c)
    };
    apply_arithmetic(cpu, result);
}

/// Executes the SBC (Subtract with Carry) instruction.
///
/// Subtracts the operand and the borrow (inverted carry) from the
/// accumulator. Updates N, V, Z and C. Honors decimal mode.
pub(crate) fn execute_sbc<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let value = cpu.load(operand);
    let result = if cpu.flag_d {
        subtract_decimal(cpu.a, value, cpu.flag_c)
    } else {
        subtract_binary(cpu.a, value, cpu.flag_c)
    };
    apply_arithmetic(cpu, result);
}

/// Executes the AND (Logical AND) instruction.
pub(crate) fn execute_and<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    cpu.a &= cpu.load(operand);
    cpu.set_zn(cpu.a);
}

/// Executes the ORA (Logical Inclusive OR) instruction.
pub(crate) fn execute_ora<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    cpu.a |= cpu.load(operand);
    cpu.set_zn(cpu.a);
}

/// Executes the EOR (Exclusive OR) instruction.
pub(crate) fn execute_eor<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    cpu.a ^= cpu.load(operand);
    cpu.set_zn(cpu.a);
}

/// Executes the BIT (Bit Test) instruction.
///
/// Z reflects `A & M`; N and V are copied from bits 7 and 6 of the operand.
/// The accumulator is not modified.
pub(crate) fn execute_bit<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let value = cpu.load(operand);
    cpu.flag_z = cpu.a & value == 0;
    cpu.flag_n = value & 0x80 != 0;
    cpu.flag_v = value & 0x40 != 0;
}

/// Executes CMP, CPX or CPY against `register`.
///
/// C is set when `register >= M`, Z when equal, N from bit 7 of the
/// difference.
pub(crate) fn execute_compare<M: MemoryBus>(cpu: &mut CPU<M>, register: u8, operand: Operand) {
    let value = cpu.load(operand);
    let difference = register.wrapping_sub(value);
    cpu.flag_c = register >= value;
    cpu.flag_z = register == value;
    cpu.flag_n = difference & 0x80 != 0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_binary_overflow() {
        let r = add_binary(0x50, 0x50, false);
        assert_eq!(r.value, 0xA0);
        assert!(r.overflow);
        assert!(r.negative);
        assert!(!r.carry);

        let r = add_binary(0xFF, 0x01, false);
        assert_eq!(r.value, 0x00);
        assert!(r.carry);
        assert!(r.zero);
        assert!(!r.overflow);
    }

    #[test]
    fn test_subtract_binary_borrow() {
        let r = subtract_binary(0x00, 0x01, true);
        assert_eq!(r.value, 0xFF);
        assert!(!r.carry);

        let r = subtract_binary(0x80, 0x01, true);
        assert_eq!(r.value, 0x7F);
        assert!(r.overflow);
        assert!(r.carry);
    }

    #[test]
    fn test_add_decimal() {
        assert_eq!(add_decimal(0x09, 0x01, false).value, 0x10);
        assert_eq!(add_decimal(0x45, 0x38, true).value, 0x84);

        let r = add_decimal(0x99, 0x01, false);
        assert_eq!(r.value, 0x00);
        assert!(r.carry);
    }

    #[test]
    fn test_add_decimal_zero_flag_is_binary() {
        // 0x99 + 0x01 = 0x9A in binary, so Z stays clear on NMOS
        assert!(!add_decimal(0x99, 0x01, false).zero);
        assert!(add_decimal(0x00, 0x00, false).zero);
    }

    #[test]
    fn test_subtract_decimal() {
        assert_eq!(subtract_decimal(0x10, 0x01, true).value, 0x09);
        assert_eq!(subtract_decimal(0x46, 0x12, true).value, 0x34);
        assert_eq!(subtract_decimal(0x40, 0x13, true).value, 0x27);

        let r = subtract_decimal(0x00, 0x01, true);
        assert_eq!(r.value, 0x99);
        assert!(!r.carry);
    }

    #[test]
    fn test_subtract_decimal_with_borrow_in() {
        assert_eq!(subtract_decimal(0x21, 0x10, false).value, 0x10);
    }
}
