pub const COUNT_OFFSET: usize = 0;
pub const COUNT_LEN: usize = 1;
pub const FRAME_LEN_PREFIX: usize = 1;

pub const FIRST_FRAME_OFFSET: usize = COUNT_OFFSET + COUNT_LEN;
