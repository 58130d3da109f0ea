//! LilyPond source serialization.
//!
//! Scores are written in absolute pitch mode: middle C (MIDI 60) is `c'`,
//! each octave above adds a `'` and each octave below adds a `,`. Sharps
//! use Dutch note names (`cis`, `fis`, ...), which is LilyPond's default
//! language.

use cantus_core::{DurationClass, Pitch, QuantizedNote, Score};

const LILYPOND_VERSION: &str = "2.24.0";

const PITCH_NAMES: [&str; 12] = [
    "c", "cis", "d", "dis", "e", "f", "fis", "g", "gis", "a", "ais", "b",
];

/// LilyPond note name in absolute mode (e.g., `c'` for middle C).
pub fn pitch_name(pitch: &Pitch) -> String {
    let semitone = (pitch.midi % 12) as usize;
    // Unmarked names sit in the octave starting at C3 (MIDI 48).
    let octave = pitch.midi as i32 / 12 - 1;
    let mut name = PITCH_NAMES[semitone].to_string();
    let marks = octave - 3;
    for _ in 0..marks.abs() {
        name.push(if marks > 0 { '\'' } else { ',' });
    }
    name
}

/// LilyPond duration digit for a duration class.
pub fn duration_digit(duration: DurationClass) -> &'static str {
    match duration {
        DurationClass::Whole => "1",
        DurationClass::Half => "2",
        DurationClass::Quarter => "4",
        DurationClass::Eighth => "8",
    }
}

fn note_token(note: &QuantizedNote) -> String {
    let mut token = format!("{}{}", pitch_name(&note.pitch), duration_digit(note.duration));
    if note.tied {
        token.push('~');
    }
    token
}

/// Serializes a score to a complete LilyPond source document.
///
/// Each measure becomes one line of notes ending in a bar check; an empty
/// score becomes one full-measure rest scaled to the time signature so the
/// document still compiles with a correctly filled bar.
pub fn score_to_lilypond(score: &Score) -> String {
    let mut body = String::new();
    if score.is_empty() {
        body.push_str(&format!("    R1*{}\n", score.time_signature));
    } else {
        for measure in &score.measures {
            let tokens: Vec<String> = measure.notes.iter().map(note_token).collect();
            body.push_str("    ");
            body.push_str(&tokens.join(" "));
            body.push_str(" |\n");
        }
    }

    format!(
        "\\version \"{version}\"\n\
         \n\
         melody = \\absolute {{\n\
         \x20   \\time {time}\n\
         {body}}}\n\
         \n\
         \\score {{\n\
         \x20 \\new Staff \\melody\n\
         \x20 \\layout {{ }}\n\
         }}\n",
        version = LILYPOND_VERSION,
        time = score.time_signature,
        body = body,
    )
}
