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

//! Memory bus implementation for PlayStation 1 emulator
//!
//! The Bus is the central component for all memory operations in the emulator.
//! It manages address translation, memory mapping, and routing of I/O port
//! accesses to whichever peripherals have been wired in via the `set_*`
//! methods.
//!
//! # Memory Map
//!
//! | Physical Address Range | Region       | Size   | Access |
//! |------------------------|--------------|--------|--------|
//! | 0x00000000-0x001FFFFF  | RAM          | 2MB    | R/W    |
//! | 0x1F000000-0x1F7FFFFF  | Expansion 1  | -      | R/W    |
//! | 0x1F800000-0x1F8003FF  | Scratchpad   | 1KB    | R/W    |
//! | 0x1F801000-0x1F802FFF  | I/O Ports    | 8KB    | R/W    |
//! | 0x1FA00000-0x1FBFFFFF  | Expansion 3  | -      | R/W    |
//! | 0x1FC00000-0x1FC7FFFF  | BIOS ROM     | 512KB  | R only |
//!
//! # Address Translation
//!
//! The PlayStation 1 uses MIPS memory segments:
//! - KUSEG (0x00000000-0x7FFFFFFF): User space, cached
//! - KSEG0 (0x80000000-0x9FFFFFFF): Kernel space, cached (mirrors physical memory)
//! - KSEG1 (0xA0000000-0xBFFFFFFF): Kernel space, uncached (mirrors physical memory)
//!
//! # Example
//!
//! ```
//! use psrx::core::memory::Bus;
//!
//! let mut bus = Bus::new();
//!
//! // Write to RAM via KSEG0
//! bus.write32(0x80000000, 0x12345678).unwrap();
//!
//! // Read from same location via different segment (should mirror)
//! assert_eq!(bus.read32(0x00000000).unwrap(), 0x12345678);
//! assert_eq!(bus.read32(0xA0000000).unwrap(), 0x12345678);
//! ```

use crate::core::cdrom::CDROM;
use crate::core::dma::DMA;
use crate::core::error::{EmulatorError, Result};
use crate::core::gpu::GPU;
use crate::core::interrupt::InterruptController;
use crate::core::spu::SPU;
use crate::core::system::ControllerPorts;
use crate::core::timer::Timers;
use std::cell::RefCell;
use std::fs::File;
use std::io::Read;
use std::rc::Rc;

mod cache;
pub mod io_device;
mod io_ports;
mod region;

pub use io_device::IODevice;
pub use region::MemoryRegion;

/// Memory bus managing all memory accesses
///
/// The Bus handles all memory operations including RAM, scratchpad,
/// BIOS ROM, and I/O ports. It performs address translation, ensures
/// proper alignment for memory accesses, and routes I/O port accesses
/// to the peripheral wired up via the `set_*` methods.
pub struct Bus {
    /// Main RAM (2MB)
    ///
    /// Physical address: 0x00000000-0x001FFFFF
    ram: Vec<u8>,

    /// Scratchpad (1KB fast RAM)
    ///
    /// Physical address: 0x1F800000-0x1F8003FF
    /// This is a small, fast RAM area used for time-critical data
    scratchpad: [u8; 1024],

    /// BIOS ROM (512KB)
    ///
    /// Physical address: 0x1FC00000-0x1FC7FFFF
    /// Contains the PlayStation BIOS code
    bios: Vec<u8>,

    /// Cache Control register
    ///
    /// Physical address: 0x1FFE0130 (accessed via 0xFFFE0130)
    /// Controls instruction cache, data cache, and scratchpad enable
    cache_control: u32,

    /// GPU, shared with the System for VRAM rendering and timing events
    pub(super) gpu: Option<Rc<RefCell<GPU>>>,

    /// DMA controller, shared with the System for transfer scheduling
    pub(super) dma: Option<Rc<RefCell<DMA>>>,

    /// CD-ROM drive, shared with the System for disc/data access
    pub(super) cdrom: Option<Rc<RefCell<CDROM>>>,

    /// Controller/memory card ports
    pub(super) controller_ports: Option<Rc<RefCell<ControllerPorts>>>,

    /// Root counter/timer channels
    pub(super) timers: Option<Rc<RefCell<Timers>>>,

    /// Interrupt controller (I_STAT/I_MASK)
    pub(super) interrupt_controller: Option<Rc<RefCell<InterruptController>>>,

    /// Sound Processing Unit
    pub(super) spu: Option<Rc<RefCell<SPU>>>,

    /// Queued (address, instruction) pairs awaiting ICache prefill
    ///
    /// Drained by the System once per step and applied to the CPU's
    /// instruction cache.
    icache_prefill_queue: Vec<(u32, u32)>,

    /// Queued addresses awaiting ICache invalidation
    icache_invalidate_queue: Vec<u32>,

    /// Queued address ranges awaiting ICache invalidation
    icache_invalidate_range_queue: Vec<(u32, u32)>,
}

impl Bus {
    /// RAM size (2MB)
    const RAM_SIZE: usize = 2 * 1024 * 1024;

    /// BIOS size (512KB)
    const BIOS_SIZE: usize = 512 * 1024;

    /// RAM physical address range
    const RAM_START: u32 = 0x00000000;
    const RAM_END: u32 = 0x001FFFFF;

    /// Scratchpad physical address range
    const SCRATCHPAD_START: u32 = 0x1F800000;
    const SCRATCHPAD_END: u32 = 0x1F8003FF;

    /// I/O ports physical address range
    const IO_START: u32 = 0x1F801000;
    const IO_END: u32 = 0x1F802FFF;

    /// BIOS ROM physical address range
    const BIOS_START: u32 = 0x1FC00000;
    const BIOS_END: u32 = 0x1FC7FFFF;

    /// Cache Control register address
    const CACHE_CONTROL: u32 = 0x1FFE0130;

    /// Expansion Region 1 physical address range
    const EXP1_LOW_START: u32 = 0x1F000000;
    const EXP1_LOW_END: u32 = 0x1F7FFFFF;

    /// Expansion Region 2 physical address range
    const EXP2_START: u32 = 0x1F802000;
    const EXP2_END: u32 = 0x1F802FFF;

    /// Expansion Region 3 physical address range
    const EXP3_START: u32 = 0x1FA00000;
    const EXP3_END: u32 = 0x1FBFFFFF;

    /// Range of physical RAM offsets eligible for ICache prefill tracking
    ///
    /// BIOS only ever copies its relocatable code into the first 512KB
    /// of RAM, so prefill tracking need not cover the whole 2MB range.
    const ICACHE_PREFILL_START: usize = 0x0000_0000;
    const ICACHE_PREFILL_END: usize = 0x0007_FFFF;

    // --- I/O port register addresses ---

    /// GPU GP0 command/data port (write) / GPUREAD (read)
    const GPU_GP0: u32 = 0x1F801810;
    /// GPU GP1 control port (write) / GPUSTAT (read)
    const GPU_GP1: u32 = 0x1F801814;

    /// Controller/memory card TX/RX data (JOY_DATA)
    const JOY_DATA: u32 = 0x1F801040;
    /// Controller/memory card status (JOY_STAT)
    const JOY_STAT: u32 = 0x1F801044;
    /// Controller/memory card mode (JOY_MODE)
    const JOY_MODE: u32 = 0x1F801048;
    /// Controller/memory card control (JOY_CTRL)
    const JOY_CTRL: u32 = 0x1F80104A;
    /// Controller/memory card baud rate (JOY_BAUD)
    const JOY_BAUD: u32 = 0x1F80104E;

    /// Interrupt status register (I_STAT)
    const I_STAT: u32 = 0x1F801070;
    /// Interrupt mask register (I_MASK)
    const I_MASK: u32 = 0x1F801074;

    /// DMA base address (channel registers follow at +0x10 per channel)
    const DMA_BASE: u32 = 0x1F801080;
    /// DMA base address of the last channel register block
    const DMA_CHANNELS_END: u32 = 0x1F8010EF;
    /// DMA Control Register (DPCR)
    const DMA_DPCR: u32 = 0x1F8010F0;
    /// DMA Interrupt Register (DICR)
    const DMA_DICR: u32 = 0x1F8010F4;

    /// Timer 0 (Dotclock) register base
    const TIMER0_COUNTER: u32 = 0x1F801100;
    const TIMER0_MODE: u32 = 0x1F801104;
    const TIMER0_TARGET: u32 = 0x1F801108;
    /// Timer 1 (Hblank) register base
    const TIMER1_COUNTER: u32 = 0x1F801110;
    const TIMER1_MODE: u32 = 0x1F801114;
    const TIMER1_TARGET: u32 = 0x1F801118;
    /// Timer 2 (System clock) register base
    const TIMER2_COUNTER: u32 = 0x1F801120;
    const TIMER2_MODE: u32 = 0x1F801124;
    const TIMER2_TARGET: u32 = 0x1F801128;

    /// CD-ROM index/status register (port 0)
    const CDROM_INDEX: u32 = 0x1F801800;
    /// CD-ROM port 1 (command / response FIFO)
    const CDROM_REG1: u32 = 0x1F801801;
    /// CD-ROM port 2 (parameter FIFO / interrupt flag)
    const CDROM_REG2: u32 = 0x1F801802;
    /// CD-ROM port 3 (request / interrupt enable)
    const CDROM_REG3: u32 = 0x1F801803;

    /// SPU register window (16-bit registers only)
    const SPU_START: u32 = 0x1F801C00;
    const SPU_END: u32 = 0x1F801FFF;

    /// Create a new Bus instance
    ///
    /// Initializes all memory regions with zeros. Peripherals are not yet
    /// attached; use the `set_*` methods to wire them up before running
    /// a [`crate::core::system::System`].
    ///
    /// # Example
    ///
    /// ```
    /// use psrx::core::memory::Bus;
    ///
    /// let bus = Bus::new();
    /// ```
    pub fn new() -> Self {
        Self {
            ram: vec![0u8; Self::RAM_SIZE],
            scratchpad: [0u8; 1024],
            bios: vec![0u8; Self::BIOS_SIZE],
            cache_control: 0,
            gpu: None,
            dma: None,
            cdrom: None,
            controller_ports: None,
            timers: None,
            interrupt_controller: None,
            spu: None,
            icache_prefill_queue: Vec::new(),
            icache_invalidate_queue: Vec::new(),
            icache_invalidate_range_queue: Vec::new(),
        }
    }

    /// Attach the GPU
    pub fn set_gpu(&mut self, gpu: Rc<RefCell<GPU>>) {
        self.gpu = Some(gpu);
    }

    /// Attach the DMA controller
    pub fn set_dma(&mut self, dma: Rc<RefCell<DMA>>) {
        self.dma = Some(dma);
    }

    /// Attach the CD-ROM drive
    pub fn set_cdrom(&mut self, cdrom: Rc<RefCell<CDROM>>) {
        self.cdrom = Some(cdrom);
    }

    /// Attach the controller/memory card ports
    pub fn set_controller_ports(&mut self, controller_ports: Rc<RefCell<ControllerPorts>>) {
        self.controller_ports = Some(controller_ports);
    }

    /// Attach the timer/root counter channels
    pub fn set_timers(&mut self, timers: Rc<RefCell<Timers>>) {
        self.timers = Some(timers);
    }

    /// Attach the interrupt controller
    pub fn set_interrupt_controller(
        &mut self,
        interrupt_controller: Rc<RefCell<InterruptController>>,
    ) {
        self.interrupt_controller = Some(interrupt_controller);
    }

    /// Attach the SPU
    pub fn set_spu(&mut self, spu: Rc<RefCell<SPU>>) {
        self.spu = Some(spu);
    }

    /// Mutable access to main RAM
    ///
    /// Used by the System to hand RAM to the DMA controller for
    /// device-to-memory transfers.
    pub fn ram_mut(&mut self) -> &mut [u8] {
        &mut self.ram
    }

    /// Read-only access to main RAM, for save-state capture
    pub(crate) fn ram(&self) -> &[u8] {
        &self.ram
    }

    /// Read-only access to the scratchpad, for save-state capture
    pub(crate) fn scratchpad(&self) -> &[u8] {
        &self.scratchpad
    }

    /// Overwrite main RAM and scratchpad from a save-state snapshot
    ///
    /// `ram_data` shorter than RAM is zero-padded; longer is truncated.
    pub(crate) fn restore_memory(&mut self, ram_data: &[u8], scratchpad_data: &[u8]) {
        let len = ram_data.len().min(self.ram.len());
        self.ram[..len].copy_from_slice(&ram_data[..len]);
        if len < self.ram.len() {
            self.ram[len..].fill(0);
        }

        let len = scratchpad_data.len().min(self.scratchpad.len());
        self.scratchpad[..len].copy_from_slice(&scratchpad_data[..len]);
        if len < self.scratchpad.len() {
            self.scratchpad[len..].fill(0);
        }
    }

    /// Reset the bus to initial state
    ///
    /// Clears RAM and scratchpad to zero, simulating a power-cycle.
    /// BIOS contents are preserved as they represent read-only ROM.
    /// Attached peripherals are not reset here; the System resets them
    /// individually.
    ///
    /// # Example
    ///
    /// ```
    /// use psrx::core::memory::Bus;
    ///
    /// let mut bus = Bus::new();
    /// bus.write32(0x80000000, 0x12345678).unwrap();
    /// bus.reset();
    /// assert_eq!(bus.read32(0x80000000).unwrap(), 0x00000000);
    /// ```
    pub fn reset(&mut self) {
        self.ram.fill(0);
        self.scratchpad.fill(0);
        self.cache_control = 0;
        self.icache_prefill_queue.clear();
        self.icache_invalidate_queue.clear();
        self.icache_invalidate_range_queue.clear();
        // BIOS is read-only ROM, so it is not cleared
    }

    /// Load BIOS from file
    ///
    /// Loads a BIOS ROM file into the BIOS region. The file must be
    /// exactly 512KB in size.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the BIOS file
    ///
    /// # Errors
    ///
    /// Returns `EmulatorError::BiosNotFound`/`InvalidBiosSize` if:
    /// - File cannot be opened
    /// - File size is not 512KB
    ///
    /// # Example
    ///
    /// ```no_run
    /// use psrx::core::memory::Bus;
    ///
    /// let mut bus = Bus::new();
    /// bus.load_bios("SCPH1001.BIN").unwrap();
    /// ```
    pub fn load_bios(&mut self, path: &str) -> Result<()> {
        let mut file =
            File::open(path).map_err(|_| EmulatorError::BiosNotFound(path.to_string()))?;

        let metadata = file.metadata()?;

        if metadata.len() != Self::BIOS_SIZE as u64 {
            return Err(EmulatorError::InvalidBiosSize {
                expected: Self::BIOS_SIZE,
                got: metadata.len() as usize,
            });
        }

        file.read_exact(&mut self.bios)?;

        Ok(())
    }

    /// Read 8-bit value from memory
    ///
    /// Reads a single byte from the specified virtual address.
    /// 8-bit reads do not require alignment.
    ///
    /// # Example
    ///
    /// ```
    /// use psrx::core::memory::Bus;
    ///
    /// let mut bus = Bus::new();
    /// bus.write8(0x80000000, 0x42).unwrap();
    /// assert_eq!(bus.read8(0x80000000).unwrap(), 0x42);
    /// ```
    pub fn read8(&self, vaddr: u32) -> Result<u8> {
        let paddr = self.translate_address(vaddr);

        match self.identify_region(vaddr) {
            MemoryRegion::RAM => Ok(self.ram[paddr as usize]),
            MemoryRegion::Scratchpad => {
                let offset = (paddr - Self::SCRATCHPAD_START) as usize;
                Ok(self.scratchpad[offset])
            }
            MemoryRegion::BIOS => {
                let offset = (paddr - Self::BIOS_START) as usize;
                Ok(self.bios[offset])
            }
            MemoryRegion::IO => self.read_io_port8(paddr),
            MemoryRegion::CacheControl => {
                log::debug!("Cache control read8 at 0x{:08X} (stubbed)", vaddr);
                Ok(0)
            }
            MemoryRegion::Expansion => Ok(Self::expansion_read(vaddr, 0x00, 0xFF)),
            MemoryRegion::Unmapped => Err(EmulatorError::InvalidMemoryAccess { address: vaddr }),
        }
    }

    /// Read 16-bit value from memory
    ///
    /// Reads a 16-bit value (little-endian) from the specified virtual address.
    /// The address must be 2-byte aligned (address & 0x1 == 0).
    ///
    /// # Example
    ///
    /// ```
    /// use psrx::core::memory::Bus;
    ///
    /// let mut bus = Bus::new();
    /// bus.write16(0x80000000, 0x1234).unwrap();
    /// assert_eq!(bus.read16(0x80000000).unwrap(), 0x1234);
    ///
    /// // Unaligned access fails
    /// assert!(bus.read16(0x80000001).is_err());
    /// ```
    pub fn read16(&self, vaddr: u32) -> Result<u16> {
        if vaddr & 0x1 != 0 {
            return Err(EmulatorError::UnalignedAccess {
                address: vaddr,
                size: 2,
            });
        }

        let paddr = self.translate_address(vaddr);

        match self.identify_region(vaddr) {
            MemoryRegion::RAM => {
                let offset = paddr as usize;
                Ok(u16::from_le_bytes([self.ram[offset], self.ram[offset + 1]]))
            }
            MemoryRegion::Scratchpad => {
                let offset = (paddr - Self::SCRATCHPAD_START) as usize;
                Ok(u16::from_le_bytes([
                    self.scratchpad[offset],
                    self.scratchpad[offset + 1],
                ]))
            }
            MemoryRegion::BIOS => {
                let offset = (paddr - Self::BIOS_START) as usize;
                Ok(u16::from_le_bytes([self.bios[offset], self.bios[offset + 1]]))
            }
            MemoryRegion::IO => {
                if (Self::SPU_START..=Self::SPU_END).contains(&paddr) {
                    self.read_io_port16(paddr)
                } else {
                    Ok(self.read_io_port32(paddr)? as u16)
                }
            }
            MemoryRegion::CacheControl => {
                log::debug!("Cache control read16 at 0x{:08X} (stubbed)", vaddr);
                Ok(0)
            }
            MemoryRegion::Expansion => Ok(Self::expansion_read(vaddr, 0x0000, 0xFFFF)),
            MemoryRegion::Unmapped => Err(EmulatorError::InvalidMemoryAccess { address: vaddr }),
        }
    }

    /// Read 32-bit value from memory
    ///
    /// Reads a 32-bit value (little-endian) from the specified virtual address.
    /// The address must be 4-byte aligned (address & 0x3 == 0).
    ///
    /// # Example
    ///
    /// ```
    /// use psrx::core::memory::Bus;
    ///
    /// let mut bus = Bus::new();
    /// bus.write32(0x80000000, 0x12345678).unwrap();
    /// assert_eq!(bus.read32(0x80000000).unwrap(), 0x12345678);
    ///
    /// // Unaligned access fails
    /// assert!(bus.read32(0x80000001).is_err());
    /// ```
    pub fn read32(&self, vaddr: u32) -> Result<u32> {
        if vaddr & 0x3 != 0 {
            return Err(EmulatorError::UnalignedAccess {
                address: vaddr,
                size: 4,
            });
        }

        let paddr = self.translate_address(vaddr);

        match self.identify_region(vaddr) {
            MemoryRegion::RAM => {
                let offset = paddr as usize;
                Ok(u32::from_le_bytes([
                    self.ram[offset],
                    self.ram[offset + 1],
                    self.ram[offset + 2],
                    self.ram[offset + 3],
                ]))
            }
            MemoryRegion::Scratchpad => {
                let offset = (paddr - Self::SCRATCHPAD_START) as usize;
                Ok(u32::from_le_bytes([
                    self.scratchpad[offset],
                    self.scratchpad[offset + 1],
                    self.scratchpad[offset + 2],
                    self.scratchpad[offset + 3],
                ]))
            }
            MemoryRegion::BIOS => {
                let offset = (paddr - Self::BIOS_START) as usize;
                Ok(u32::from_le_bytes([
                    self.bios[offset],
                    self.bios[offset + 1],
                    self.bios[offset + 2],
                    self.bios[offset + 3],
                ]))
            }
            MemoryRegion::IO => self.read_io_port32(paddr),
            MemoryRegion::CacheControl => {
                log::debug!(
                    "Cache control read at 0x{:08X}, returning 0x{:08X}",
                    vaddr,
                    self.cache_control
                );
                Ok(self.cache_control)
            }
            MemoryRegion::Expansion => Ok(Self::expansion_read(vaddr, 0x0000_0000, 0xFFFF_FFFF)),
            MemoryRegion::Unmapped => Err(EmulatorError::InvalidMemoryAccess { address: vaddr }),
        }
    }

    /// Write 8-bit value to memory
    ///
    /// Writes a single byte to the specified virtual address.
    /// 8-bit writes do not require alignment.
    ///
    /// # Example
    ///
    /// ```
    /// use psrx::core::memory::Bus;
    ///
    /// let mut bus = Bus::new();
    /// bus.write8(0x80000000, 0x42).unwrap();
    /// assert_eq!(bus.read8(0x80000000).unwrap(), 0x42);
    /// ```
    pub fn write8(&mut self, vaddr: u32, value: u8) -> Result<()> {
        let paddr = self.translate_address(vaddr);

        match self.identify_region(vaddr) {
            MemoryRegion::RAM => {
                self.ram[paddr as usize] = value;
                self.queue_icache_invalidation(paddr);
                Ok(())
            }
            MemoryRegion::Scratchpad => {
                let offset = (paddr - Self::SCRATCHPAD_START) as usize;
                self.scratchpad[offset] = value;
                Ok(())
            }
            MemoryRegion::BIOS => {
                log::trace!("Attempt to write to BIOS at 0x{:08X} (ignored)", paddr);
                Ok(())
            }
            MemoryRegion::IO => self.write_io_port8(paddr, value),
            MemoryRegion::CacheControl => {
                log::debug!(
                    "Cache control write8 at 0x{:08X} = 0x{:02X} (ignored)",
                    vaddr,
                    value
                );
                Ok(())
            }
            MemoryRegion::Expansion => {
                log::trace!(
                    "Expansion region write8 at 0x{:08X} = 0x{:02X} (ignored)",
                    vaddr,
                    value
                );
                Ok(())
            }
            MemoryRegion::Unmapped => Err(EmulatorError::InvalidMemoryAccess { address: vaddr }),
        }
    }

    /// Write 16-bit value to memory
    ///
    /// Writes a 16-bit value (little-endian) to the specified virtual address.
    /// The address must be 2-byte aligned (address & 0x1 == 0).
    ///
    /// # Example
    ///
    /// ```
    /// use psrx::core::memory::Bus;
    ///
    /// let mut bus = Bus::new();
    /// bus.write16(0x80000000, 0x1234).unwrap();
    /// assert_eq!(bus.read16(0x80000000).unwrap(), 0x1234);
    ///
    /// // Unaligned access fails
    /// assert!(bus.write16(0x80000001, 0x1234).is_err());
    /// ```
    pub fn write16(&mut self, vaddr: u32, value: u16) -> Result<()> {
        if vaddr & 0x1 != 0 {
            return Err(EmulatorError::UnalignedAccess {
                address: vaddr,
                size: 2,
            });
        }

        let paddr = self.translate_address(vaddr);
        let bytes = value.to_le_bytes();

        match self.identify_region(vaddr) {
            MemoryRegion::RAM => {
                let offset = paddr as usize;
                self.ram[offset] = bytes[0];
                self.ram[offset + 1] = bytes[1];
                self.queue_icache_invalidation(paddr);
                Ok(())
            }
            MemoryRegion::Scratchpad => {
                let offset = (paddr - Self::SCRATCHPAD_START) as usize;
                self.scratchpad[offset] = bytes[0];
                self.scratchpad[offset + 1] = bytes[1];
                Ok(())
            }
            MemoryRegion::BIOS => {
                log::trace!("Attempt to write to BIOS at 0x{:08X} (ignored)", paddr);
                Ok(())
            }
            MemoryRegion::IO => {
                if (Self::SPU_START..=Self::SPU_END).contains(&paddr) {
                    self.write_io_port16(paddr, value)
                } else {
                    self.write_io_port32(paddr, value as u32)
                }
            }
            MemoryRegion::CacheControl => {
                log::debug!(
                    "Cache control write16 at 0x{:08X} = 0x{:04X} (ignored)",
                    vaddr,
                    value
                );
                Ok(())
            }
            MemoryRegion::Expansion => {
                log::trace!(
                    "Expansion region write16 at 0x{:08X} = 0x{:04X} (ignored)",
                    vaddr,
                    value
                );
                Ok(())
            }
            MemoryRegion::Unmapped => Err(EmulatorError::InvalidMemoryAccess { address: vaddr }),
        }
    }

    /// Write 32-bit value to memory
    ///
    /// Writes a 32-bit value (little-endian) to the specified virtual address.
    /// The address must be 4-byte aligned (address & 0x3 == 0).
    ///
    /// # Example
    ///
    /// ```
    /// use psrx::core::memory::Bus;
    ///
    /// let mut bus = Bus::new();
    /// bus.write32(0x80000000, 0x12345678).unwrap();
    /// assert_eq!(bus.read32(0x80000000).unwrap(), 0x12345678);
    ///
    /// // Unaligned access fails
    /// assert!(bus.write32(0x80000001, 0x12345678).is_err());
    /// ```
    pub fn write32(&mut self, vaddr: u32, value: u32) -> Result<()> {
        if vaddr & 0x3 != 0 {
            return Err(EmulatorError::UnalignedAccess {
                address: vaddr,
                size: 4,
            });
        }

        let paddr = self.translate_address(vaddr);
        let bytes = value.to_le_bytes();

        match self.identify_region(vaddr) {
            MemoryRegion::RAM => {
                let offset = paddr as usize;
                self.ram[offset] = bytes[0];
                self.ram[offset + 1] = bytes[1];
                self.ram[offset + 2] = bytes[2];
                self.ram[offset + 3] = bytes[3];
                self.queue_icache_invalidation(paddr);
                Ok(())
            }
            MemoryRegion::Scratchpad => {
                let offset = (paddr - Self::SCRATCHPAD_START) as usize;
                self.scratchpad[offset] = bytes[0];
                self.scratchpad[offset + 1] = bytes[1];
                self.scratchpad[offset + 2] = bytes[2];
                self.scratchpad[offset + 3] = bytes[3];
                Ok(())
            }
            MemoryRegion::BIOS => {
                log::trace!("Attempt to write to BIOS at 0x{:08X} (ignored)", paddr);
                Ok(())
            }
            MemoryRegion::IO => self.write_io_port32(paddr, value),
            MemoryRegion::CacheControl => {
                log::debug!(
                    "Cache control write at 0x{:08X}, value 0x{:08X}",
                    vaddr,
                    value
                );
                self.cache_control = value;
                Ok(())
            }
            MemoryRegion::Expansion => {
                log::trace!(
                    "Expansion region write32 at 0x{:08X} = 0x{:08X} (ignored)",
                    vaddr,
                    value
                );
                Ok(())
            }
            MemoryRegion::Unmapped => Err(EmulatorError::InvalidMemoryAccess { address: vaddr }),
        }
    }

    /// Expansion region read helper
    ///
    /// BIOS probes expansion ROM headers expecting 0 (no ROM present) and
    /// treats the rest of the expansion window as open bus (all-ones).
    fn expansion_read<T>(vaddr: u32, rom_header: T, open_bus: T) -> T {
        let paddr = vaddr & 0x1FFF_FFFF;
        if (0x1F000000..=0x1F0000FF).contains(&paddr) {
            rom_header
        } else {
            open_bus
        }
    }

    /// Write directly to BIOS memory (test helper)
    ///
    /// This method bypasses the read-only protection of BIOS and allows
    /// direct writes for testing purposes only.
    ///
    /// # Panics
    ///
    /// Panics if offset + data.len() exceeds BIOS size
    #[cfg(test)]
    pub(crate) fn write_bios_for_test(&mut self, offset: usize, data: &[u8]) {
        let end = offset + data.len();
        assert!(
            end <= Self::BIOS_SIZE,
            "BIOS write out of bounds: offset={}, len={}",
            offset,
            data.len()
        );
        self.bios[offset..end].copy_from_slice(data);
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
