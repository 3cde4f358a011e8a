//! Size-unit conversion between megabytes and the 512-byte sectors
//! hdiutil's `ram://` spec wants.
//!
//! Integer (truncating) division is kept for compatibility with the
//! historical behavior. For the forward direction it is also exact:
//! 1_048_576 / 512 is a whole 2048, so every positive megabyte count
//! round-trips unchanged.

/// Megabytes to 512-byte sectors.
pub fn mb_to_sectors(mb: u64) -> u64 {
    mb * 1_048_576 / 512
}

/// 512-byte sectors back to megabytes, truncating any partial megabyte.
pub fn sectors_to_mb(sectors: u64) -> u64 {
    sectors * 512 / 1_048_576
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_conversions() {
        assert_eq!(mb_to_sectors(128), 262_144);
        assert_eq!(mb_to_sectors(256), 524_288);
        assert_eq!(sectors_to_mb(262_144), 128);
    }

    #[test]
    fn round_trip_is_exact_for_every_megabyte_count() {
        for mb in 1..=4096 {
            assert_eq!(sectors_to_mb(mb_to_sectors(mb)), mb, "round trip for {mb} MB");
        }
    }

    #[test]
    fn partial_megabytes_truncate() {
        // 1000 sectors is under half a megabyte.
        assert_eq!(sectors_to_mb(1000), 0);
        assert_eq!(sectors_to_mb(2047), 0);
        assert_eq!(sectors_to_mb(2049), 1);
    }
}
