// src/audio/mapper.rs
//! Logarithmic frequency axis shared by every overlay and the spectrum bars.

/// Lower edge of the displayed range. Lower inputs are clamped here.
pub const MIN_FREQ_HZ: f64 = 20.0;
/// Upper edge of the displayed range.
pub const MAX_FREQ_HZ: f64 = 20_000.0;
/// Sample rate assumed for bin to frequency conversion.
pub const NOMINAL_SAMPLE_RATE: f64 = 44_100.0;

/// Map a frequency to a horizontal offset on a canvas `width` pixels wide.
///
/// `20 Hz` lands on `0` and `20 kHz` on `width`. Anything below 20 Hz
/// (including zero, negatives and NaN) is clamped to 20 Hz.
pub fn x_position(freq_hz: f64, width: f64) -> f64 {
    let log_min = MIN_FREQ_HZ.log10();
    let log_max = MAX_FREQ_HZ.log10();
    let log_freq = freq_hz.max(MIN_FREQ_HZ).log10();
    ((log_freq - log_min) / (log_max - log_min)) * width
}

/// Center frequency of `bin` when the spectrum has `bin_count` bins.
pub fn bin_frequency(bin: usize, bin_count: usize, sample_rate: f64) -> f64 {
    if bin_count == 0 {
        return 0.0;
    }
    bin as f64 * (sample_rate / 2.0) / bin_count as f64
}
