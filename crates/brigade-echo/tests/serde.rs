//! Preset files: TOML round-trips of the parameter snapshot.
#![cfg(feature = "serde")]

use brigade_echo::{CascadeMode, EngineParams, StageParams};

#[test]
fn partial_preset_fills_defaults() {
    let preset = r#"
mode = "cascaded"

[stage1]
delay_time_ms = 250.0

[stage2]
mix_percent = 20.0
"#;
    let params: EngineParams = toml::from_str(preset).expect("valid preset");
    assert_eq!(params.mode, CascadeMode::Cascaded);
    assert_eq!(params.stage1.delay_time_ms, 250.0);
    assert_eq!(params.stage1.feedback_percent, 30.0);
    assert_eq!(params.stage2.mix_percent, 20.0);
    assert_eq!(params.stage2.tone_percent, 70.0);
}

#[test]
fn empty_preset_is_default() {
    let params: EngineParams = toml::from_str("").expect("empty preset");
    assert_eq!(params, EngineParams::default());
}

#[test]
fn preset_round_trip() {
    let params = EngineParams {
        mode: CascadeMode::Cascaded,
        stage1: StageParams {
            delay_time_ms: 180.0,
            feedback_percent: 62.5,
            mix_percent: 40.0,
            tone_percent: 15.0,
        },
        stage2: StageParams {
            delay_time_ms: 33.0,
            feedback_percent: 0.0,
            mix_percent: 100.0,
            tone_percent: 90.0,
        },
    };
    let text = toml::to_string(&params).expect("serialize");
    assert!(text.contains("mode = \"cascaded\""), "{text}");
    let back: EngineParams = toml::from_str(&text).expect("deserialize");
    assert_eq!(back, params);
}

#[test]
fn unknown_mode_is_rejected() {
    assert!(toml::from_str::<EngineParams>("mode = \"pingpong\"").is_err());
}
