//! End-to-end pipeline tests over the public API.

use cantus_core::{
    transcribe, AnalysisInput, DurationClass, Overflow, PitchValue, TimeSignature,
    TranscribeConfig, MIDDLE_C_HZ,
};
use pretty_assertions::assert_eq;

fn input(pitch_hz: Vec<PitchValue>, confidence: Vec<f64>, onsets: Vec<f64>) -> AnalysisInput {
    AnalysisInput {
        sample_rate: 22050,
        hop_size: 512,
        pitch_hz,
        confidence,
        onsets,
    }
}

/// Scenario A: constant pitch over onsets [0.0, 0.2, 0.5, 1.6, 2.0]:
/// spans [0.2, 0.3, 1.1, 0.4], classes [eighth, quarter, whole, quarter],
/// running fill .5, 1.5, 5.5 (close, over-full), then 1.0 (final, partial).
#[test]
fn constant_pitch_melody_packs_into_two_measures() {
    let frames = 120; // covers 2.0s at 22050/512
    let result = transcribe(
        &input(
            vec![PitchValue::Voiced(440.0); frames],
            vec![0.9; frames],
            vec![0.0, 0.2, 0.5, 1.6, 2.0],
        ),
        &TranscribeConfig::default(),
    )
    .unwrap();

    let classes: Vec<Vec<DurationClass>> = result
        .score
        .measures
        .iter()
        .map(|m| m.notes.iter().map(|n| n.duration).collect())
        .collect();
    assert_eq!(
        classes,
        vec![
            vec![
                DurationClass::Eighth,
                DurationClass::Quarter,
                DurationClass::Whole,
            ],
            vec![DurationClass::Quarter],
        ]
    );
    assert_eq!(result.score.measures[0].filled, 5.5);
    assert_eq!(result.score.measures[1].filled, 1.0);
    assert!(result.warnings.is_empty());
    assert_eq!(result.notes.len(), 4);
    assert!(result.notes.iter().all(|n| n.name == "A4"));
}

/// Scenario B: an empty onset timeline produces an empty score, no error.
#[test]
fn empty_onsets_produce_empty_score() {
    let result = transcribe(
        &input(vec![PitchValue::Voiced(440.0); 10], vec![0.9; 10], vec![]),
        &TranscribeConfig::default(),
    )
    .unwrap();
    assert!(result.score.is_empty());
    assert!(result.warnings.is_empty());
    assert!(result.notes.is_empty());
}

/// Scenario C: every confidence below threshold: every note becomes middle
/// C and the fallback is reported deterministically (one aggregated
/// unvoiced-track warning).
#[test]
fn fully_unvoiced_track_transcribes_to_middle_c() {
    let frames = 60;
    let result = transcribe(
        &input(
            vec![PitchValue::Voiced(440.0); frames],
            vec![0.2; frames],
            vec![0.0, 0.3, 0.6, 0.9],
        ),
        &TranscribeConfig::default(),
    )
    .unwrap();

    assert_eq!(result.notes.len(), 3);
    assert!(result.notes.iter().all(|n| n.name == "C4"));
    for measure in &result.score.measures {
        for note in &measure.notes {
            assert_eq!(note.pitch.frequency_hz, MIDDLE_C_HZ);
        }
    }
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].code, "W001");
}

/// Note counts are conserved through packing, whatever the input length.
#[test]
fn packing_conserves_note_count() {
    for onset_count in [0usize, 1, 2, 5, 13] {
        let onsets: Vec<f64> = (0..onset_count).map(|i| i as f64 * 0.3).collect();
        let frames = 300;
        let result = transcribe(
            &input(vec![PitchValue::Voiced(330.0); frames], vec![1.0; frames], onsets),
            &TranscribeConfig::default(),
        )
        .unwrap();
        assert_eq!(result.score.note_count(), onset_count.saturating_sub(1));
    }
}

#[test]
fn non_increasing_onsets_abort_the_run() {
    let result = transcribe(
        &input(vec![PitchValue::Voiced(440.0); 10], vec![0.9; 10], vec![0.0, 0.5, 0.5]),
        &TranscribeConfig::default(),
    );
    assert!(result.is_err());
}

#[test]
fn split_policy_closes_measures_at_capacity() {
    let frames = 200;
    let config = TranscribeConfig::default().overflow(Overflow::Split);
    let result = transcribe(
        &input(
            vec![PitchValue::Voiced(440.0); frames],
            vec![0.9; frames],
            vec![0.0, 0.2, 0.5, 1.6, 2.0],
        ),
        &config,
    )
    .unwrap();
    // Same input as scenario A, but the whole note splits at the barline.
    assert_eq!(result.score.measures.len(), 2);
    assert_eq!(result.score.measures[0].filled, 4.0);
    assert_eq!(result.score.measures[1].filled, 2.5);
}

#[test]
fn three_four_time_uses_smaller_capacity() {
    let frames = 300;
    let config =
        TranscribeConfig::default().time_signature(TimeSignature::new(3, 4).unwrap());
    // Six quarter-note spans.
    let onsets: Vec<f64> = (0..7).map(|i| i as f64 * 0.3).collect();
    let result = transcribe(
        &input(vec![PitchValue::Voiced(440.0); frames], vec![1.0; frames], onsets),
        &config,
    )
    .unwrap();
    assert_eq!(result.score.measures.len(), 2);
    assert_eq!(result.score.measures[0].filled, 3.0);
    assert_eq!(result.score.measures[1].filled, 3.0);
}

#[test]
fn analysis_round_trips_through_json() {
    let original = input(
        vec![PitchValue::Voiced(440.0), PitchValue::Unvoiced],
        vec![0.9, 0.1],
        vec![0.0],
    );
    let json = serde_json::to_string(&original).unwrap();
    let parsed = AnalysisInput::from_json(&json).unwrap();
    assert_eq!(original, parsed);
}
