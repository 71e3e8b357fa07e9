pub mod synth;

pub use synth::{CommandSynthesizer, NarrationSynthesizer, SectionAudio, synthesize_sections};
