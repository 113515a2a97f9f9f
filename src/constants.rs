//! Fixed layout constants of the TLE format.

use crate::span::FieldSpan;

/// Width of every TLE data line (characters).
pub const TLE_LINE_WIDTH: usize = 69;

/// Offset of the line-1 checksum digit.
pub const CHECKSUM_OFFSET: usize = 68;

/// Characters summed into the checksum.
pub const CHECKSUM_BODY: FieldSpan = FieldSpan::new("checksum_body", 0, CHECKSUM_OFFSET);

/// The embedded checksum digit.
pub const CHECKSUM_DIGIT: FieldSpan = FieldSpan::new("checksum_digit", CHECKSUM_OFFSET, TLE_LINE_WIDTH);

/// Satellite catalog number (line 1).
pub const SATELLITE_NUMBER: FieldSpan = FieldSpan::new("satellite_number", 2, 7);

/// Epoch: two-digit year, day of year, fractional day (line 1).
pub const EPOCH: FieldSpan = FieldSpan::new("epoch", 18, 32);

/// Eccentricity with implied leading decimal point (line 2).
pub const ECCENTRICITY: FieldSpan = FieldSpan::new("eccentricity", 26, 33);

/// Default lower edge of the rejected epoch-year band.
pub const EPOCH_YEAR_BAND_LOW: u16 = 26;

/// Default upper edge of the rejected epoch-year band.
pub const EPOCH_YEAR_BAND_HIGH: u16 = 56;

/// Epoch day must be strictly below this.
pub const EPOCH_DAY_MAX_EXCLUSIVE: u16 = 357;
