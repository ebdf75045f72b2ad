// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::super::decode::decode_i_type;
use super::super::{ExceptionCause, CPU};
use crate::core::error::Result;
use crate::core::memory::Bus;

impl CPU {
    // === Load Instructions ===

    /// LW: Load Word (32-bit)
    ///
    /// Loads a 32-bit word from memory with load delay slot.
    /// The address must be 4-byte aligned.
    ///
    /// Format: lw rt, offset(rs)
    /// Operation: rt = memory[rs + sign_extend(offset)]
    ///
    /// # Arguments
    ///
    /// * `instruction` - The full 32-bit instruction
    /// * `bus` - Memory bus for reading
    ///
    /// # Returns
    ///
    /// Ok(()) on success, triggers AddressErrorLoad exception on misalignment
    pub(crate) fn op_lw(&mut self, instruction: u32, bus: &mut Bus) -> Result<()> {
        let (_, rs, rt, imm) = decode_i_type(instruction);
        let offset = (imm as i16) as i32; // Sign extend
        let addr = self.reg(rs).wrapping_add(offset as u32);

        // Check alignment
        if addr & 0x3 != 0 {
            self.exception(ExceptionCause::AddressErrorLoad);
            return Ok(());
        }

        let value = bus.read32(addr)?;
        self.set_reg_delayed(rt, value); // Load delay slot
        Ok(())
    }

    /// LH: Load Halfword (16-bit, sign-extended)
    ///
    /// Loads a 16-bit halfword from memory and sign-extends it to 32 bits.
    /// The address must be 2-byte aligned.
    ///
    /// Format: lh rt, offset(rs)
    /// Operation: rt = sign_extend(memory[rs + sign_extend(offset)])
    ///
    /// # Arguments
    ///
    /// * `instruction` - The full 32-bit instruction
    /// * `bus` - Memory bus for reading
    ///
    /// # Returns
    ///
    /// Ok(()) on success, triggers AddressErrorLoad exception on misalignment
    pub(crate) fn op_lh(&mut self, instruction: u32, bus: &mut Bus) -> Result<()> {
        let (_, rs, rt, imm) = decode_i_type(instruction);
        let offset = (imm as i16) as i32; // Sign extend
        let addr = self.reg(rs).wrapping_add(offset as u32);

        // Check alignment
        if addr & 0x1 != 0 {
            self.exception(ExceptionCause::AddressErrorLoad);
            return Ok(());
        }

        let value = bus.read16(addr)? as i16 as i32 as u32; // Sign extend
        self.set_reg_delayed(rt, value); // Load delay slot
        Ok(())
    }

    /// LHU: Load Halfword Unsigned (16-bit, zero-extended)
    ///
    /// Loads a 16-bit halfword from memory and zero-extends it to 32 bits.
    /// The address must be 2-byte aligned.
    ///
    /// Format: lhu rt, offset(rs)
    /// Operation: rt = zero_extend(memory[rs + sign_extend(offset)])
    ///
    /// # Arguments
    ///
    /// * `instruction` - The full 32-bit instruction
    /// * `bus` - Memory bus for reading
    ///
    /// # Returns
    ///
    /// Ok(()) on success, triggers AddressErrorLoad exception on misalignment
    pub(crate) fn op_lhu(&mut self, instruction: u32, bus: &mut Bus) -> Result<()> {
        let (_, rs, rt, imm) = decode_i_type(instruction);
        let offset = (imm as i16) as i32; // Sign extend
        let addr = self.reg(rs).wrapping_add(offset as u32);

        // Check alignment
        if addr & 0x1 != 0 {
            self.exception(ExceptionCause::AddressErrorLoad);
            return Ok(());
        }

        let value = bus.read16(addr)? as u32; // Zero extend
        self.set_reg_delayed(rt, value); // Load delay slot
        Ok(())
    }

    /// LB: Load Byte (8-bit, sign-extended)
    ///
    /// Loads an 8-bit byte from memory and sign-extends it to 32 bits.
    /// No alignment restrictions.
    ///
    /// Format: lb rt, offset(rs)
    /// Operation: rt = sign_extend(memory[rs + sign_extend(offset)])
    ///
    /// # Arguments
    ///
    /// * `instruction` - The full 32-bit instruction
    /// * `bus` - Memory bus for reading
    ///
    /// # Returns
    ///
    /// Ok(()) on success
    pub(crate) fn op_lb(&mut self, instruction: u32, bus: &mut Bus) -> Result<()> {
        let (_, rs, rt, imm) = decode_i_type(instruction);
        let offset = (imm as i16) as i32; // Sign extend
        let addr = self.reg(rs).wrapping_add(offset as u32);

        let value = bus.read8(addr)? as i8 as i32 as u32; // Sign extend
        self.set_reg_delayed(rt, value); // Load delay slot
        Ok(())
    }

    /// LBU: Load Byte Unsigned (8-bit, zero-extended)
    ///
    /// Loads an 8-bit byte from memory and zero-extends it to 32 bits.
    /// No alignment restrictions.
    ///
    /// Format: lbu rt, offset(rs)
    /// Operation: rt = zero_extend(memory[rs + sign_extend(offset)])
    ///
    /// # Arguments
    ///
    /// * `instruction` - The full 32-bit instruction
    /// * `bus` - Memory bus for reading
    ///
    /// # Returns
    ///
    /// Ok(()) on success
    pub(crate) fn op_lbu(&mut self, instruction: u32, bus: &mut Bus) -> Result<()> {
        let (_, rs, rt, imm) = decode_i_type(instruction);
        let offset = (imm as i16) as i32; // Sign extend
        let addr = self.reg(rs).wrapping_add(offset as u32);

        let value = bus.read8(addr)? as u32; // Zero extend
        self.set_reg_delayed(rt, value); // Load delay slot
        Ok(())
    }

    /// Current value of `rt` as seen by LWL/LWR: the in-flight load delay
    /// value if one targets this register, otherwise the architectural value.
    /// Never traps; the base is always well-defined.
    fn lwl_lwr_base(&self, rt: u8) -> u32 {
        match &self.load_delay {
            Some(delay) if delay.reg == rt => delay.value,
            _ => self.reg(rt),
        }
    }

    /// LWL: Load Word Left (unaligned load, high-order bytes of rt)
    ///
    /// Always accesses the 4-byte-aligned word containing `addr`; never
    /// traps on alignment. Merges 1-4 bytes from memory into the
    /// high-order end of rt depending on `addr & 3`.
    ///
    /// Format: lwl rt, offset(rs)
    pub(crate) fn op_lwl(&mut self, instruction: u32, bus: &mut Bus) -> Result<()> {
        let (_, rs, rt, imm) = decode_i_type(instruction);
        let offset = (imm as i16) as i32;
        let addr = self.reg(rs).wrapping_add(offset as u32);
        let aligned = addr & !0x3;
        let word = bus.read32(aligned)?;
        let cur = self.lwl_lwr_base(rt);

        let value = match addr & 0x3 {
            0 => (cur & 0x00ff_ffff) | (word << 24),
            1 => (cur & 0x0000_ffff) | (word << 16),
            2 => (cur & 0x0000_00ff) | (word << 8),
            3 => word,
            _ => unreachable!(),
        };
        self.set_reg_delayed(rt, value);
        Ok(())
    }

    /// LWR: Load Word Right (unaligned load, low-order bytes of rt)
    ///
    /// Mirror of LWL: merges 4-1 bytes from memory into the low-order end
    /// of rt depending on `addr & 3`.
    ///
    /// Format: lwr rt, offset(rs)
    pub(crate) fn op_lwr(&mut self, instruction: u32, bus: &mut Bus) -> Result<()> {
        let (_, rs, rt, imm) = decode_i_type(instruction);
        let offset = (imm as i16) as i32;
        let addr = self.reg(rs).wrapping_add(offset as u32);
        let aligned = addr & !0x3;
        let word = bus.read32(aligned)?;
        let cur = self.lwl_lwr_base(rt);

        let value = match addr & 0x3 {
            0 => word,
            1 => (cur & 0xff00_0000) | (word >> 8),
            2 => (cur & 0xffff_0000) | (word >> 16),
            3 => (cur & 0xffff_ff00) | (word >> 24),
            _ => unreachable!(),
        };
        self.set_reg_delayed(rt, value);
        Ok(())
    }
}
