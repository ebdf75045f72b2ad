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

//! Emulator error types
//!
//! All fallible core operations return [`Result`]. Errors are split by
//! subsystem (bus, GPU, CD-ROM) and folded into [`EmulatorError`] so a
//! caller driving [`crate::core::system::System`] only has to match on
//! one type.

use thiserror::Error;

/// Result type for emulator operations
pub type Result<T> = std::result::Result<T, EmulatorError>;

/// Top-level error type for the emulator core
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmulatorError {
    /// Unaligned memory access (16/32-bit access not naturally aligned)
    #[error("unaligned {size}-byte access at address 0x{address:08X}")]
    UnalignedAccess {
        /// The address that was accessed
        address: u32,
        /// The size of the access in bytes (2 for 16-bit, 4 for 32-bit)
        size: u32,
    },

    /// Access landed outside every mapped bus region
    #[error("invalid memory access at address 0x{address:08X}")]
    InvalidAddress {
        /// The address that was accessed
        address: u32,
    },

    /// Bus access rejected by a device for reasons other than "unmapped"
    /// (wrong width, write to read-only region, disabled port, ...)
    #[error("bus fault at 0x{address:08X} ({width}-bit {op}): {reason}")]
    BusFault {
        /// The address that was accessed
        address: u32,
        /// Access width in bits
        width: u32,
        /// "read" or "write"
        op: &'static str,
        /// Human readable reason
        reason: String,
    },

    /// A device register was programmed with a value it cannot honor
    #[error("bad device configuration at 0x{address:08X}: 0x{value:08X}")]
    BadDeviceConfig {
        /// Register address
        address: u32,
        /// Value written
        value: u32,
    },

    /// A DMA channel was started with a combination of direction/sync
    /// mode this implementation does not model
    #[error("unsupported DMA configuration on channel {channel}: direction={direction}, sync_mode={sync_mode}")]
    UnsupportedDma {
        /// Channel number (0-6)
        channel: u8,
        /// 0 = to RAM, 1 = from RAM
        direction: u32,
        /// Sync mode field (0 = burst, 1 = request, 2 = linked-list)
        sync_mode: u32,
    },

    /// CPU fetched an opcode with no recognized decoding
    #[error("unknown opcode 0x{opcode:08X} at PC=0x{pc:08X}")]
    UnknownOpcode {
        /// Program counter at the time of the fault
        pc: u32,
        /// The raw instruction word
        opcode: u32,
    },

    /// GPU received a texture/CLUT combination outside the documented set
    #[error("reserved texture format selected")]
    ReservedTextureFormat,

    /// I/O error surfaced while loading BIOS/PS-EXE/disc images
    #[error("I/O error: {message}")]
    IoError {
        /// Error message
        message: String,
    },

    /// BIOS image could not be found at the given path
    #[error("BIOS image not found: {0}")]
    BiosNotFound(String),

    /// BIOS file error (corrupt, unreadable, ...)
    #[error("BIOS error: {message}")]
    BiosError {
        /// Error message
        message: String,
    },

    /// BIOS has an unexpected size
    #[error("invalid BIOS size: expected {expected} bytes, got {got} bytes")]
    InvalidBiosSize {
        /// Expected size in bytes
        expected: usize,
        /// Actual size in bytes
        got: usize,
    },

    /// Access landed outside every mapped bus region (legacy alias used by
    /// the memory bus; kept distinct from [`EmulatorError::InvalidAddress`]
    /// because callers match on it specifically for unmapped reads/writes)
    #[error("unmapped memory access at address 0x{address:08X}")]
    InvalidMemoryAccess {
        /// The address that was accessed
        address: u32,
    },

    /// PS-EXE / loader error (bad magic, region mismatch, ...)
    #[error("loader error: {0}")]
    LoaderError(String),

    /// Error bubbled up from the CD-ROM subsystem
    #[error(transparent)]
    CdRom(#[from] CdRomError),

    /// Error bubbled up from the GPU subsystem
    #[error(transparent)]
    Gpu(#[from] GpuError),
}

impl From<std::io::Error> for EmulatorError {
    fn from(err: std::io::Error) -> Self {
        EmulatorError::IoError {
            message: err.to_string(),
        }
    }
}

/// Errors raised while loading or seeking a disc image
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CdRomError {
    /// The .cue sheet or referenced .bin file could not be parsed or read
    #[error("disc load error: {0}")]
    DiscLoadError(String),
}

/// Errors raised by the GPU command/rasterization path
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GpuError {
    /// GP0 command word did not match any recognized command
    #[error("unrecognized GP0 command 0x{0:02X}")]
    UnknownGp0Command(u8),

    /// A polygon/rectangle command selected a texture page/CLUT
    /// combination the rasterizer does not support
    #[error("reserved texture format")]
    ReservedTextureFormat,
}
