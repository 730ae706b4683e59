//! Standard exit codes (BSD sysexits.h compatible)

/// Successful termination
pub const OK: i32 = 0;

/// Command line usage error
pub const USAGE: i32 = 64;

/// Outline is not valid JSON or has the wrong shape
pub const DATAERR: i32 = 65;

/// Outline file missing or unreadable
pub const NOINPUT: i32 = 66;

/// Internal software error (rendering)
pub const SOFTWARE: i32 = 70;

/// Can't create output file
pub const CANTCREAT: i32 = 73;

/// Input/output error
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;
