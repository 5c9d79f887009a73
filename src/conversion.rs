/// Full scale value for a sample of the given bit depth.
///
/// `i64::MAX` shifted right by `64 - bits`, with the shift distance taken
/// modulo 64. A 16 bit depth gives `32_767`.
pub fn full_scale(bits: u16) -> i64 {
    let shift = (64 - bits as i32).rem_euclid(64);
    i64::MAX >> shift
}

/// Trait for converting decoded PCM samples to a floating point output type
pub trait FromPcmSample: Sized + Copy {
    /// Normalize `sample` against the full scale of a `bits` deep sample
    fn from_pcm(sample: i64, bits: u16) -> Self;
    /// `true` for silence
    fn is_zero(self) -> bool;
}

impl FromPcmSample for f64 {
    fn from_pcm(sample: i64, bits: u16) -> Self {
        if sample == 0 {
            return 0.0;
        }
        sample as f64 / full_scale(bits) as f64
    }

    fn is_zero(self) -> bool {
        self == 0.0
    }
}

impl FromPcmSample for f32 {
    fn from_pcm(sample: i64, bits: u16) -> Self {
        f64::from_pcm(sample, bits) as f32
    }

    fn is_zero(self) -> bool {
        self == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_scale_values() {
        assert_eq!(full_scale(16), 32_767);
        assert_eq!(full_scale(8), 127);
        assert_eq!(full_scale(24), 8_388_607);
        assert_eq!(full_scale(64), i64::MAX);
        assert_eq!(full_scale(0), i64::MAX);
    }

    #[test]
    fn test_f64_conversions() {
        assert_eq!(f64::from_pcm(0, 16), 0.0);
        assert_eq!(f64::from_pcm(32_767, 16), 1.0);
        assert_eq!(f64::from_pcm(-32_767, 16), -1.0);
        assert_eq!(f64::from_pcm(-32_768, 16), -32_768.0 / 32_767.0);
        assert_eq!(f64::from_pcm(16_384, 16), 16_384.0 / 32_767.0);
    }

    #[test]
    fn test_f32_conversions() {
        assert_eq!(f32::from_pcm(0, 16), 0.0);
        assert_eq!(f32::from_pcm(32_767, 16), 1.0);
        assert!((f32::from_pcm(1, 16) - 1.0 / 32_767.0).abs() < f32::EPSILON);
    }

    #[test]
    fn silence_is_zero() {
        // a 1 bit depth has a full scale of 0, silence must not become NaN
        assert!(f64::from_pcm(0, 1).is_zero());
        assert!(!f64::from_pcm(1, 16).is_zero());
        assert!(f32::from_pcm(0, 16).is_zero());
    }
}
