/// The command ran successfully.
pub const NO_ERROR: i32 = 0;
/// The command failed.
pub const FATAL_ERROR: i32 = 1;
/// The command ran but some records couldn't be used.
pub const NON_FATAL_ERROR: i32 = 2;
