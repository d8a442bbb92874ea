use serde::{Deserialize, Serialize};

pub const FREQUENCY_OFFSET: usize = 0;
pub const FREQUENCY_LEN: usize = 4;
pub const INTERVALS_OFFSET: usize = FREQUENCY_OFFSET + FREQUENCY_LEN;

/// Wire width of one raw interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalWidth {
    #[default]
    U16,
    U32,
}

impl IntervalWidth {
    pub fn bytes(self) -> usize {
        match self {
            IntervalWidth::U16 => 2,
            IntervalWidth::U32 => 4,
        }
    }
}
