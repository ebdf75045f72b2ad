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
use super::super::{ExceptionCause, COP0, CPU};
use crate::core::error::Result;
use crate::core::memory::Bus;

impl CPU {
    // === Store Instructions ===

    /// Whether COP0.SR.IsC (bit 16) is set, isolating the data cache from
    /// main memory. While set, all CPU stores are silently dropped.
    fn cache_isolated(&self) -> bool {
        self.cop0.regs[COP0::SR] & (1 << 16) != 0
    }

    /// SW: Store Word (32-bit)
    ///
    /// Stores a 32-bit word to memory.
    /// The address must be 4-byte aligned.
    ///
    /// Format: sw rt, offset(rs)
    /// Operation: memory[rs + sign_extend(offset)] = rt
    ///
    /// # Arguments
    ///
    /// * `instruction` - The full 32-bit instruction
    /// * `bus` - Memory bus for writing
    ///
    /// # Returns
    ///
    /// Ok(()) on success, triggers AddressErrorStore exception on misalignment
    pub(crate) fn op_sw(&mut self, instruction: u32, bus: &mut Bus) -> Result<()> {
        let (_, rs, rt, imm) = decode_i_type(instruction);
        let offset = (imm as i16) as i32; // Sign extend
        let addr = self.reg(rs).wrapping_add(offset as u32);

        // Check alignment
        if addr & 0x3 != 0 {
            self.exception(ExceptionCause::AddressErrorStore);
            return Ok(());
        }

        if self.cache_isolated() {
            return Ok(());
        }
        bus.write32(addr, self.reg(rt))?;
        Ok(())
    }

    /// SH: Store Halfword (16-bit)
    ///
    /// Stores the lower 16 bits of a register to memory.
    /// The address must be 2-byte aligned.
    ///
    /// Format: sh rt, offset(rs)
    /// Operation: memory[rs + sign_extend(offset)] = rt[15:0]
    ///
    /// # Arguments
    ///
    /// * `instruction` - The full 32-bit instruction
    /// * `bus` - Memory bus for writing
    ///
    /// # Returns
    ///
    /// Ok(()) on success, triggers AddressErrorStore exception on misalignment
    pub(crate) fn op_sh(&mut self, instruction: u32, bus: &mut Bus) -> Result<()> {
        let (_, rs, rt, imm) = decode_i_type(instruction);
        let offset = (imm as i16) as i32; // Sign extend
        let addr = self.reg(rs).wrapping_add(offset as u32);

        // Check alignment
        if addr & 0x1 != 0 {
            self.exception(ExceptionCause::AddressErrorStore);
            return Ok(());
        }

        if self.cache_isolated() {
            return Ok(());
        }
        bus.write16(addr, self.reg(rt) as u16)?;
        Ok(())
    }

    /// SB: Store Byte (8-bit)
    ///
    /// Stores the lower 8 bits of a register to memory.
    /// No alignment restrictions.
    ///
    /// Format: sb rt, offset(rs)
    /// Operation: memory[rs + sign_extend(offset)] = rt[7:0]
    ///
    /// # Arguments
    ///
    /// * `instruction` - The full 32-bit instruction
    /// * `bus` - Memory bus for writing
    ///
    /// # Returns
    ///
    /// Ok(()) on success
    pub(crate) fn op_sb(&mut self, instruction: u32, bus: &mut Bus) -> Result<()> {
        let (_, rs, rt, imm) = decode_i_type(instruction);
        let offset = (imm as i16) as i32; // Sign extend
        let addr = self.reg(rs).wrapping_add(offset as u32);

        if self.cache_isolated() {
            return Ok(());
        }
        bus.write8(addr, self.reg(rt) as u8)?;
        Ok(())
    }

    /// SWL: Store Word Left (unaligned store, high-order bytes of rt)
    ///
    /// Always writes the 4-byte-aligned word containing `addr`; never traps
    /// on alignment. Merges 1-4 high-order bytes of rt into memory depending
    /// on `addr & 3`.
    ///
    /// Format: swl rt, offset(rs)
    pub(crate) fn op_swl(&mut self, instruction: u32, bus: &mut Bus) -> Result<()> {
        if self.cache_isolated() {
            return Ok(());
        }
        let (_, rs, rt, imm) = decode_i_type(instruction);
        let offset = (imm as i16) as i32;
        let addr = self.reg(rs).wrapping_add(offset as u32);
        let aligned = addr & !0x3;
        let mem = bus.read32(aligned)?;
        let v = self.reg(rt);

        let value = match addr & 0x3 {
            0 => (mem & 0xffff_ff00) | (v >> 24),
            1 => (mem & 0xffff_0000) | (v >> 16),
            2 => (mem & 0xff00_0000) | (v >> 8),
            3 => v,
            _ => unreachable!(),
        };
        bus.write32(aligned, value)?;
        Ok(())
    }

    /// SWR: Store Word Right (unaligned store, low-order bytes of rt)
    ///
    /// Mirror of SWL: merges 4-1 low-order bytes of rt into memory depending
    /// on `addr & 3`.
    ///
    /// Format: swr rt, offset(rs)
    pub(crate) fn op_swr(&mut self, instruction: u32, bus: &mut Bus) -> Result<()> {
        if self.cache_isolated() {
            return Ok(());
        }
        let (_, rs, rt, imm) = decode_i_type(instruction);
        let offset = (imm as i16) as i32;
        let addr = self.reg(rs).wrapping_add(offset as u32);
        let aligned = addr & !0x3;
        let mem = bus.read32(aligned)?;
        let v = self.reg(rt);

        let value = match addr & 0x3 {
            0 => v,
            1 => (mem & 0x0000_00ff) | (v << 8),
            2 => (mem & 0x0000_ffff) | (v << 16),
            3 => (mem & 0x00ff_ffff) | (v << 24),
            _ => unreachable!(),
        };
        bus.write32(aligned, value)?;
        Ok(())
    }
}
