//! ROM-image emitters (spec.md §6): binary bank files, flat octal text, and
//! a C header, plus the mirror-option transform. Byte order follows the
//! teacher's `util::Endian` convention.

use crate::error::{AssembleError, ErrorKind, Result};
use crate::types::{Bank, Rom, BANK_SIZE, ROM_SIZE};
use byteorder::WriteBytesExt;
use std::io::{self, Write};
use util::Endian;

/// Mirror option (spec.md §6): bank 1's `[0x000..0x400)` and `[0x800..0x1000)`
/// ranges (the bank-relative `i < 1024 || i >= 2048` windows) must be zero in
/// the source and are overwritten with bank 0's corresponding words.
pub fn apply_mirror(rom: &mut Rom) -> Result<()> {
    for i in 0..BANK_SIZE {
        if i < 1024 || i >= 2048 {
            let pc = i as u16;
            if rom.get(Bank::One, pc) != 0 {
                return Err(AssembleError::new(
                    ErrorKind::Option,
                    format!(
                        "mirror region word at bank 1 pc 0x{:03X} is non-zero in source",
                        pc
                    ),
                ));
            }
            let mirrored = rom.get(Bank::Zero, pc);
            rom.set(Bank::One, pc, mirrored);
        }
    }
    Ok(())
}

/// Writes the two binary bank files: 4096 little-endian 16-bit words each.
pub fn write_binary_banks(rom: &Rom, mut bank0: impl Write, mut bank1: impl Write) -> io::Result<()> {
    for pc in 0..BANK_SIZE as u16 {
        bank0.write_u16::<Endian>(rom.get(Bank::Zero, pc))?;
    }
    for pc in 0..BANK_SIZE as u16 {
        bank1.write_u16::<Endian>(rom.get(Bank::One, pc))?;
    }
    Ok(())
}

/// Flat ROM text: `OOOOO:OOOOO` (address:word), both 5-digit octal, in
/// address order across the full 8192-word image.
pub fn flat_rom_text(rom: &Rom) -> String {
    let mut out = String::new();
    for (addr, word) in rom.as_slice().iter().enumerate() {
        out.push_str(&format!("{:05o}:{:05o}\n", addr, word));
    }
    out
}

/// `int fw_rom[] = { ... };` with 8192 5-digit octal words, a group header
/// every 1024 words and a line break every 8 words.
pub fn c_header(rom: &Rom) -> String {
    let mut out = String::from("int fw_rom[] = {\n");
    for (i, word) in rom.as_slice().iter().enumerate() {
        if i % 1024 == 0 {
            out.push_str(&format!("  /* group {} */\n", i / 1024));
        }
        if i % 8 == 0 {
            out.push_str("  ");
        }
        out.push_str(&format!("{:05o}", word));
        if i != ROM_SIZE - 1 {
            out.push(',');
        }
        if i % 8 == 7 {
            out.push('\n');
        } else {
            out.push(' ');
        }
    }
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str("};\n");
    out
}
