//! Medium wave filter graph construction.
//!
//! The graph is a single `-filter_complex` expression for the render tool. It
//! is built from fixed constants only, so the result never changes during a
//! run and is cached after the first call.
//!
//! Graph layout:
//!
//! ```text
//! [in] mono -> highpass/lowpass -> EQ -> bitcrush ------------------> [a0]
//! sine -> tremolo -> vibrato -> mono -> volume -------------------> [w1]
//! noise -> highpass/lowpass -> bitcrush -> fast tremolo -> volume -> [k1]
//! [w1][k1] amix -> [w]
//! [a0][w]  amix (duration of main) -> [out]
//! ```

use crate::constants::SAMPLE_RATE;
use std::sync::OnceLock;

/// Label of the final mixed output stream.
pub const OUTPUT_LABEL: &str = "out";

/// Default input stream: the audio of the first input file.
pub const DEFAULT_INPUT: &str = "0:a";

/// Fixed parameters of the medium wave effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterParameters {
    pub bandpass_low_hz: u32,
    pub bandpass_high_hz: u32,
    /// Peaking EQ bands as (frequency Hz, width q, gain dB)
    pub eq_bands: [(u32, f32, f32); 3],
    pub crush_bits: u32,
    pub whistle_hz: u32,
    pub whistle_tremolo_hz: f32,
    pub whistle_vibrato_hz: f32,
    pub whistle_vibrato_depth: f32,
    pub whistle_gain: f32,
    pub crackle_low_hz: u32,
    pub crackle_high_hz: u32,
    pub crackle_bits: u32,
    /// Full-depth tremolo rate that chops the noise into bursts
    pub crackle_pulse_hz: f32,
    pub crackle_gain: f32,
    pub sample_rate: u32,
}

pub const MEDIUM_WAVE: FilterParameters = FilterParameters {
    bandpass_low_hz: 220,
    bandpass_high_hz: 4500,
    eq_bands: [(350, 1.0, 3.0), (1000, 1.0, 1.5), (2600, 2.0, -2.0)],
    crush_bits: 9,
    whistle_hz: 1800,
    whistle_tremolo_hz: 0.1,
    whistle_vibrato_hz: 0.4,
    whistle_vibrato_depth: 0.05,
    whistle_gain: 0.05,
    crackle_low_hz: 6000,
    crackle_high_hz: 12000,
    crackle_bits: 2,
    crackle_pulse_hz: 40.0,
    crackle_gain: 0.12,
    sample_rate: SAMPLE_RATE,
};

impl FilterParameters {
    /// Build the full filter graph reading from `input` (e.g. `0:a`).
    pub fn build(&self, input: &str) -> String {
        [
            self.main_chain(input),
            self.whistle_chain(),
            self.crackle_chain(),
            "[w1][k1]amix=inputs=2:normalize=0[w]".to_string(),
            format!("[a0][w]amix=inputs=2:duration=first:normalize=0[{OUTPUT_LABEL}]"),
        ]
        .join(";")
    }

    fn main_chain(&self, input: &str) -> String {
        let eq = self
            .eq_bands
            .iter()
            .map(|(f, w, g)| format!("equalizer=f={f}:t=q:w={w}:g={g}"))
            .collect::<Vec<_>>()
            .join(",");
        format!(
            "[{input}]aformat=channel_layouts=mono,\
             highpass=f={low},lowpass=f={high},{eq},\
             acrusher=bits={bits}:mode=log:aa=1,volume=0dB[a0]",
            low = self.bandpass_low_hz,
            high = self.bandpass_high_hz,
            bits = self.crush_bits,
        )
    }

    fn whistle_chain(&self) -> String {
        format!(
            "sine=frequency={hz}:sample_rate={sr}[wsrc];\
             [wsrc]tremolo=f={trem}:d=1,vibrato=f={vib}:d={vib_d},\
             aformat=channel_layouts=mono,volume={gain}[w1]",
            hz = self.whistle_hz,
            sr = self.sample_rate,
            trem = self.whistle_tremolo_hz,
            vib = self.whistle_vibrato_hz,
            vib_d = self.whistle_vibrato_depth,
            gain = self.whistle_gain,
        )
    }

    fn crackle_chain(&self) -> String {
        format!(
            "anoisesrc=color=white:amplitude=1.0:sample_rate={sr}[nk];\
             [nk]highpass=f={low},lowpass=f={high},\
             acrusher=bits={bits}:mode=log:aa=0.0,tremolo=f={pulse}:d=1,\
             aformat=channel_layouts=mono,volume={gain}[k1]",
            sr = self.sample_rate,
            low = self.crackle_low_hz,
            high = self.crackle_high_hz,
            bits = self.crackle_bits,
            pulse = self.crackle_pulse_hz,
            gain = self.crackle_gain,
        )
    }
}

/// The medium wave graph for the first input's audio stream, built once.
pub fn filter_graph() -> &'static str {
    static GRAPH: OnceLock<String> = OnceLock::new();
    GRAPH.get_or_init(|| MEDIUM_WAVE.build(DEFAULT_INPUT))
}

/// Split a graph into one chain per line for display.
pub fn pretty(graph: &str) -> String {
    graph.split(';').collect::<Vec<_>>().join(";\n")
}
