//! Search predicate and memory normalization.

use crate::pb::memory::Unit;
use crate::pb::{Filter, Laptop, Memory};

const BYTE: u64 = 1 << 3;
const KILOBYTE: u64 = 1 << 13;
const MEGABYTE: u64 = 1 << 23;
const GIGABYTE: u64 = 1 << 33;
const TERABYTE: u64 = 1 << 43;

/// Returns true when `laptop` satisfies every bound set on `filter`.
///
/// Missing `cpu` or `ram` messages on the laptop count as zero, and a missing
/// `min_ram` on the filter counts as zero bits.
#[must_use]
pub fn is_qualified(filter: &Filter, laptop: &Laptop) -> bool {
    if filter
        .max_price_usd
        .is_some_and(|max_price| laptop.price_usd > max_price)
    {
        return false;
    }

    let (cores, min_ghz) = laptop
        .cpu
        .as_ref()
        .map_or((0, 0.0), |cpu| (cpu.number_cores, cpu.min_ghz));

    if cores < filter.min_cpu_cores {
        return false;
    }

    if min_ghz < filter.min_cpu_ghz {
        return false;
    }

    bits_or_zero(laptop.ram.as_ref()) >= bits_or_zero(filter.min_ram.as_ref())
}

/// Convert a memory size to a number of bits.
///
/// Units are powers of two (1 KB = 1024 bytes). An unknown unit yields 0 and
/// values too large for `u64` saturate at `u64::MAX`.
#[must_use]
pub fn to_bit(memory: &Memory) -> u64 {
    let multiplier = match Unit::try_from(memory.unit) {
        Ok(Unit::Bit) => 1,
        Ok(Unit::Byte) => BYTE,
        Ok(Unit::Kilobyte) => KILOBYTE,
        Ok(Unit::Megabyte) => MEGABYTE,
        Ok(Unit::Gigabyte) => GIGABYTE,
        Ok(Unit::Terabyte) => TERABYTE,
        Ok(Unit::Unknown) | Err(_) => 0,
    };
    memory.value.saturating_mul(multiplier)
}

fn bits_or_zero(memory: Option<&Memory>) -> u64 {
    memory.map_or(0, to_bit)
}
