//! Morse identification sequences, keyed as a schedule of tones.
//!
//! Element timing follows ITU-R M.1677: a dash is three dots, one dot of space
//! between elements, three between letters and seven between words.

/// Keying tone frequency
pub const MORSE_TONE_HZ: u16 = 800;
/// Modem audio sample rate
pub const SAMPLE_RATE: u32 = 48_000;
/// Length of one dot in samples
pub const UNIT_SAMPLES: u32 = 3200;

const MORSE_TABLE: [(char, &str); 36] = [
    ('A', ".-"),
    ('B', "-..."),
    ('C', "-.-."),
    ('D', "-.."),
    ('E', "."),
    ('F', "..-."),
    ('G', "--."),
    ('H', "...."),
    ('I', ".."),
    ('J', ".---"),
    ('K', "-.-"),
    ('L', ".-.."),
    ('M', "--"),
    ('N', "-."),
    ('O', "---"),
    ('P', ".--."),
    ('Q', "--.-"),
    ('R', ".-."),
    ('S', "..."),
    ('T', "-"),
    ('U', "..-"),
    ('V', "...-"),
    ('W', ".--"),
    ('X', "-..-"),
    ('Y', "-.--"),
    ('Z', "--.."),
    ('0', "-----"),
    ('1', ".----"),
    ('2', "..---"),
    ('3', "...--"),
    ('4', "....-"),
    ('5', "....."),
    ('6', "-...."),
    ('7', "--..."),
    ('8', "---.."),
    ('9', "----."),
];

/// One entry of a tone schedule. `freq_hz` 0 is silence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tone {
    pub freq_hz: u16,
    pub samples: u32,
}

impl Tone {
    fn mark(units: u32) -> Self {
        Tone { freq_hz: MORSE_TONE_HZ, samples: units * UNIT_SAMPLES }
    }

    fn space(units: u32) -> Self {
        Tone { freq_hz: 0, samples: units * UNIT_SAMPLES }
    }
}

fn pattern(c: char) -> Option<&'static str> {
    MORSE_TABLE.iter().find(|(k, _)| *k == c).map(|(_, p)| *p)
}

pub struct MorseKeyer;

impl MorseKeyer {
    /// Tone schedule for `payload`. The last entry is the trailing silence at
    /// whose end the identification counts as complete.
    pub fn tones(payload: &str) -> Vec<Tone> {
        let mut tones = Vec::new();
        for c in payload.chars().map(|c| c.to_ascii_uppercase()) {
            match pattern(c) {
                Some(p) => {
                    for element in p.chars() {
                        tones.push(if element == '.' { Tone::mark(1) } else { Tone::mark(3) });
                        tones.push(Tone::space(1));
                    }
                }
                None if c != ' ' => tracing::debug!("morse: no pattern for {:?}, skipped", c),
                None => {}
            }

            // Letter space, 3 units with the element space above
            tones.push(Tone::space(2));

            // Word space, 7 units
            if c == ' ' {
                tones.push(Tone::space(4));
            }
        }
        tones.push(Tone::space(4));
        tones
    }

    /// Total length of the identification sequence for `payload`
    pub fn duration_samples(payload: &str) -> u64 {
        Self::tones(payload).iter().map(|t| t.samples as u64).sum()
    }

    pub fn duration_ms(payload: &str) -> u64 {
        Self::duration_samples(payload) * 1000 / SAMPLE_RATE as u64
    }
}
