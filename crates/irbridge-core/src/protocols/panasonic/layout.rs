/// Base time unit; every pulse is a whole number of ticks.
pub const TICK_US: u32 = 432;

pub const HDR_MARK_TICKS: u32 = 8;
pub const HDR_SPACE_TICKS: u32 = 4;
pub const BIT_MARK_TICKS: u32 = 1;
pub const ONE_SPACE_TICKS: u32 = 3;
pub const ZERO_SPACE_TICKS: u32 = 1;

pub const HDR_MARK_US: u32 = HDR_MARK_TICKS * TICK_US;
pub const HDR_SPACE_US: u32 = HDR_SPACE_TICKS * TICK_US;
pub const BIT_MARK_US: u32 = BIT_MARK_TICKS * TICK_US;
pub const ONE_SPACE_US: u32 = ONE_SPACE_TICKS * TICK_US;
pub const ZERO_SPACE_US: u32 = ZERO_SPACE_TICKS * TICK_US;
/// Closing space; ends the transmission rather than waiting.
pub const END_SPACE_US: u32 = 0;

pub const CARRIER_HZ: u32 = 36_700;

pub const HEADER_PULSES: usize = 2;
pub const PULSES_PER_BIT: usize = 2;
pub const TRAILER_PULSES: usize = 2;
pub const BITS_PER_BYTE: usize = 8;
