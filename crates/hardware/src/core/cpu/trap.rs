//! Retirement and Trap Bookkeeping.
//!
//! This module applies Writeback's architectural effects. It performs the following:
//! 1. **Commit:** Writes the register file and commits the CSR update in program order.
//! 2. **Trap Accounting:** Counts exceptions and interrupts as their trap entry commits.
//! 3. **Instruction Mix:** Classifies every retired instruction.
//! 4. **Commit Log:** With the `commit-log` feature and `trace_instructions`,
//!    emits one `tracing` event per retired instruction.

use super::Cpu;
use crate::core::pipeline::backend::writeback::WritebackPort;
use crate::isa::instruction::InstructionBits;
use crate::isa::privileged::opcodes as sys_op;
use crate::isa::rv32i::opcodes;
use crate::isa::rv32m;

impl Cpu {
    /// Applies this cycle's Writeback port at the clock edge.
    pub(crate) fn commit_writeback(&mut self, wb: &WritebackPort) {
        if let Some(w) = wb.reg {
            self.regs.write(w.rd, w.value);
        }
        self.csrs.clock(&wb.csr);

        let entry = &self.backend.mem_wb;
        if let Some(trap) = entry.trap.filter(|_| entry.valid && !entry.retired) {
            if trap.is_interrupt() {
                self.stats.interrupts_taken += 1;
            } else {
                self.stats.traps_taken += 1;
            }
        }

        if !wb.retire {
            return;
        }
        let inst = entry.inst;
        self.stats.instructions_retired += 1;
        match inst.opcode() {
            opcodes::OP_LOAD => self.stats.inst_load += 1,
            opcodes::OP_STORE => self.stats.inst_store += 1,
            opcodes::OP_BRANCH => self.stats.inst_branch += 1,
            opcodes::OP_JAL | opcodes::OP_JALR => self.stats.inst_jump += 1,
            opcodes::OP_REG if inst.funct7() == rv32m::MULDIV => self.stats.inst_mdu += 1,
            sys_op::OP_SYSTEM if inst.funct3() != sys_op::PRIV => self.stats.inst_csr += 1,
            sys_op::OP_SYSTEM | opcodes::OP_MISC_MEM => self.stats.inst_system += 1,
            _ => self.stats.inst_alu += 1,
        }

        #[cfg(feature = "commit-log")]
        if self.trace {
            let pc = entry.pc;
            match wb.reg {
                Some(w) => tracing::info!(
                    hart = self.hart_id,
                    "{pc:#010x}: {:<28} {} <- {:#010x}",
                    crate::isa::disasm::disassemble(inst),
                    crate::isa::abi::name(w.rd),
                    w.value
                ),
                None => tracing::info!(
                    hart = self.hart_id,
                    "{pc:#010x}: {}",
                    crate::isa::disasm::disassemble(inst)
                ),
            }
        }
    }
}
