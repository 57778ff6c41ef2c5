//! # 6502 Instruction Implementations
//!
//! This module contains the implementations of all 6502 instructions, organized by category.
//! Each instruction is implemented as a standalone function that takes a mutable reference
//! to the CPU and the already-resolved operand. By the time a handler runs, PC points at
//! the following instruction.
//!
//! ## Categories
//!
//! - **alu**: Arithmetic and logic operations (ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT)
//! - **branches**: Conditional branch instructions (BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS)
//! - **shifts**: Shift and rotate operations (ASL, LSR, ROL, ROR)
//! - **load_store**: Load and store instructions (LDA, LDX, LDY, STA, STX, STY)
//! - **inc_dec**: Increment and decrement operations (INC, DEC, INX, INY, DEX, DEY)
//! - **control**: Control flow instructions (JMP, JSR, RTS, RTI, BRK, NOP)
//! - **stack**: Stack operations (PHA, PHP, PLA, PLP)
//! - **flags**: Status flag manipulation (CLC, SEC, CLI, SEI, CLD, SED, CLV)
//! - **transfer**: Register transfer operations (TAX, TAY, TXA, TYA, TSX, TXS)

pub(crate) mod alu;
pub(crate) mod branches;
pub(crate) mod control;
pub(crate) mod flags;
pub(crate) mod inc_dec;
pub(crate) mod load_store;
pub(crate) mod shifts;
pub(crate) mod stack;
pub(crate) mod transfer;

use crate::cpu::Operand;
use crate::{Instruction, MemoryBus, CPU};

/// Runs the semantics of `instruction` and returns cycles owed beyond the
/// opcode's base cost (taken branches only).
pub(crate) fn execute<M: MemoryBus>(
    cpu: &mut CPU<M>,
    instruction: Instruction,
    operand: Operand,
) -> u8 {
    use Instruction::*;

    match instruction {
        Adc => alu::execute_adc(cpu, operand),
        Sbc => alu::execute_sbc(cpu, operand),
        And => alu::execute_and(cpu, operand),
        Ora => alu::execute_ora(cpu, operand),
        Eor => alu::execute_eor(cpu, operand),
        Bit => alu::execute_bit(cpu, operand),
        Cmp => {
            let a = cpu.a;
            alu::execute_compare(cpu, a, operand)
        }
        Cpx => {
            let x = cpu.x;
            alu::execute_compare(cpu, x, operand)
        }
        Cpy => {
            let y = cpu.y;
            alu::execute_compare(cpu, y, operand)
        }

        Bcc | Bcs | Bne | Beq | Bpl | Bmi | Bvc | Bvs => {
            return branches::execute_branch(cpu, instruction, operand)
        }

        Asl => shifts::execute_asl(cpu, operand),
        Lsr => shifts::execute_lsr(cpu, operand),
        Rol => shifts::execute_rol(cpu, operand),
        Ror => shifts::execute_ror(cpu, operand),

        Lda => load_store::execute_lda(cpu, operand),
        Ldx => load_store::execute_ldx(cpu, operand),
        Ldy => load_store::execute_ldy(cpu, operand),
        Sta => cpu.store(operand, cpu.a),
        Stx => cpu.store(operand, cpu.x),
        Sty => cpu.store(operand, cpu.y),

        Inc => inc_dec::execute_inc(cpu, operand),
        Dec => inc_dec::execute_dec(cpu, operand),
        Inx => inc_dec::execute_inx(cpu),
        Iny => inc_dec::execute_iny(cpu),
        Dex => inc_dec::execute_dex(cpu),
        Dey => inc_dec::execute_dey(cpu),

        Jmp => control::execute_jmp(cpu, operand),
        Jsr => control::execute_jsr(cpu, operand),
        Rts => control::execute_rts(cpu),
        Rti => control::execute_rti(cpu),
        Brk => control::execute_brk(cpu),
        Nop => {}

        Pha => stack::execute_pha(cpu),
        Php => stack::execute_php(cpu),
        Pla => stack::execute_pla(cpu),
        Plp => stack::execute_plp(cpu),

        Clc => flags::execute_clc(cpu),
        Sec => flags::execute_sec(cpu),
        Cli => flags::execute_cli(cpu),
        Sei => flags::execute_sei(cpu),
        Cld => flags::execute_cld(cpu),
        Sed => flags::execute_sed(cpu),
        Clv => flags::execute_clv(cpu),

        Tax => transfer::execute_tax(cpu),
        Tay => transfer::execute_tay(cpu),
        Txa => transfer::execute_txa(cpu),
        Tya => transfer::execute_tya(cpu),
        Tsx => transfer::execute_tsx(cpu),
        Txs => transfer::execute_txs(cpu),
    }

    0
}
