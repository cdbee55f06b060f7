//! Embedded sound data.
//!
//! Fallback chime compiled into the binary, used when no system sound
//! can be found or played. The data is a complete WAV file generated at
//! compile time.

/// WAV header size in bytes (RIFF + fmt chunk + data chunk header).
const WAV_HEADER_LEN: usize = 44;

/// Sample rate of the embedded chime in Hz.
const SAMPLE_RATE: usize = 8000;

/// Tone frequency of the embedded chime in Hz.
const TONE_HZ: usize = 1000;

/// Number of 8-bit samples (0.15 seconds at 8 kHz).
const DATA_LEN: usize = SAMPLE_RATE * 3 / 20;

/// Default embedded sound data.
///
/// A 0.15 second 1 kHz square-wave chime as 8-bit mono PCM WAV.
pub const DEFAULT_SOUND_DATA: &[u8] = &build_default_sound();

const fn build_default_sound() -> [u8; WAV_HEADER_LEN + DATA_LEN] {
    let mut wav = [0u8; WAV_HEADER_LEN + DATA_LEN];

    // RIFF header
    wav[0] = b'R';
    wav[1] = b'I';
    wav[2] = b'F';
    wav[3] = b'F';
    let riff_size = (WAV_HEADER_LEN + DATA_LEN - 8) as u32;
    wav[4] = riff_size as u8;
    wav[5] = (riff_size >> 8) as u8;
    wav[6] = (riff_size >> 16) as u8;
    wav[7] = (riff_size >> 24) as u8;
    wav[8] = b'W';
    wav[9] = b'A';
    wav[10] = b'V';
    wav[11] = b'E';

    // fmt chunk: PCM, mono, 8 kHz, 8-bit
    wav[12] = b'f';
    wav[13] = b'm';
    wav[14] = b't';
    wav[15] = b' ';
    wav[16] = 16; // chunk size
    wav[20] = 1; // audio format (PCM)
    wav[22] = 1; // channels
    wav[24] = (SAMPLE_RATE & 0xFF) as u8;
    wav[25] = ((SAMPLE_RATE >> 8) & 0xFF) as u8;
    // byte rate equals sample rate for 8-bit mono
    wav[28] = (SAMPLE_RATE & 0xFF) as u8;
    wav[29] = ((SAMPLE_RATE >> 8) & 0xFF) as u8;
    wav[32] = 1; // block align
    wav[34] = 8; // bits per sample

    // data chunk header
    wav[36] = b'd';
    wav[37] = b'a';
    wav[38] = b't';
    wav[39] = b'a';
    let data_size = DATA_LEN as u32;
    wav[40] = data_size as u8;
    wav[41] = (data_size >> 8) as u8;
    wav[42] = (data_size >> 16) as u8;
    wav[43] = (data_size >> 24) as u8;

    // Square wave samples, unsigned 8-bit centered on 0x80
    let half_period = SAMPLE_RATE / TONE_HZ / 2;
    let mut i = 0;
    while i < DATA_LEN {
        wav[WAV_HEADER_LEN + i] = if (i / half_period) % 2 == 0 { 0xB0 } else { 0x50 };
        i += 1;
    }

    wav
}

/// Returns the embedded sound data.
#[must_use]
pub const fn get_embedded_sound() -> &'static [u8] {
    DEFAULT_SOUND_DATA
}

/// Returns the format description of the embedded sound.
#[must_use]
pub const fn get_embedded_sound_format() -> &'static str {
    "WAV (8-bit PCM, 8kHz, Mono)"
}
