//! Built-in cue presets, grouped by event.
//!
//! The table is static data; it is never mutated and needs no setup.

use crate::event::HookEvent;
use crate::tone::Tone;

/// A named, hand-authored tone sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub tones: &'static [Tone],
}

// ── stop ────────────────────────────────────────────────────

static STOP: &[Preset] = &[
    Preset {
        name: "Major Chime",
        tones: &[
            Tone::new(523.25, 0.15), // C5
            Tone::new(659.25, 0.15), // E5
            Tone::new(783.99, 0.25), // G5
        ],
    },
    Preset {
        name: "Octave Chime",
        tones: &[
            Tone::new(261.63, 0.2), // C4
            Tone::new(523.25, 0.3), // C5
        ],
    },
    Preset {
        name: "Resolve",
        tones: &[
            Tone::new(392.00, 0.12), // G4
            Tone::new(493.88, 0.12), // B4
            Tone::new(587.33, 0.12), // D5
            Tone::new(783.99, 0.25), // G5
        ],
    },
];

// ── notification ────────────────────────────────────────────

static NOTIFICATION: &[Preset] = &[
    Preset {
        name: "Doorbell",
        tones: &[
            Tone::new(659.25, 0.2), // E5
            Tone::new(523.25, 0.3), // C5
        ],
    },
    Preset {
        name: "Attention",
        tones: &[
            Tone::new(880.00, 0.1), // A5
            Tone::rest(0.08),
            Tone::new(880.00, 0.12), // A5
        ],
    },
    Preset {
        name: "Question",
        tones: &[
            Tone::new(523.25, 0.15), // C5
            Tone::new(659.25, 0.25), // E5
        ],
    },
];

// ── limit ───────────────────────────────────────────────────

static LIMIT: &[Preset] = &[
    Preset {
        name: "Descending Warning",
        tones: &[
            Tone::new(392.00, 0.15), // G4
            Tone::new(293.66, 0.15), // D4
            Tone::new(220.00, 0.25), // A3
        ],
    },
    Preset {
        name: "Low Buzz",
        tones: &[
            Tone::new(220.00, 0.1), // A3
            Tone::rest(0.06),
            Tone::new(220.00, 0.1), // A3
            Tone::rest(0.06),
            Tone::new(220.00, 0.12), // A3
        ],
    },
    Preset {
        name: "Slide Down",
        tones: &[
            Tone::new(659.25, 0.12), // E5
            Tone::new(493.88, 0.12), // B4
            Tone::new(164.81, 0.25), // E3
        ],
    },
];

/// Presets available for an event, in menu order.
pub fn presets_for(event: HookEvent) -> &'static [Preset] {
    match event {
        HookEvent::Stop => STOP,
        HookEvent::Notification => NOTIFICATION,
        HookEvent::Limit => LIMIT,
    }
}

/// Presets for a category key (`"stop"`, `"notification"`, `"limit"`).
pub fn presets(category: &str) -> Option<&'static [Preset]> {
    category.parse().ok().map(presets_for)
}

/// Look up a preset by exact category key and exact name.
pub fn find(category: &str, name: &str) -> Option<&'static Preset> {
    presets(category)?.iter().find(|p| p.name == name)
}

/// Whether any built-in preset has this name, ignoring ASCII case.
pub fn is_builtin_name(name: &str) -> bool {
    HookEvent::ALL
        .into_iter()
        .flat_map(presets_for)
        .any(|p| p.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp;

    #[test]
    fn every_event_has_three_presets() {
        for e in HookEvent::ALL {
            assert_eq!(presets_for(e).len(), 3, "{e}");
        }
    }

    #[test]
    fn lookup_is_exact() {
        let p = find("stop", "Major Chime").unwrap();
        assert_eq!(p.tones.len(), 3);
        assert_eq!(p.tones[0], Tone::new(523.25, 0.15));
        assert!(find("stop", "major chime").is_none());
        assert!(find("Stop", "Major Chime").is_none());
        assert!(find("limit", "Major Chime").is_none());
        assert!(presets("unknown").is_none());
    }

    #[test]
    fn gaps_are_silent() {
        let buzz = find("limit", "Low Buzz").unwrap();
        assert!(buzz.tones[1].is_silent());
        assert!(buzz.tones[3].is_silent());
    }

    #[test]
    fn builtin_names_ignore_case() {
        assert!(is_builtin_name("doorbell"));
        assert!(is_builtin_name("SLIDE DOWN"));
        assert!(!is_builtin_name("Whistle"));
    }

    #[test]
    fn presets_render_to_their_length() {
        for e in HookEvent::ALL {
            for p in presets_for(e) {
                let samples = dsp::render(p.tones);
                let expected: usize = p.tones.iter().map(dsp::synth::sample_count).sum();
                assert_eq!(samples.len(), expected, "{}", p.name);
                assert!(samples.iter().any(|&s| s != 0), "{} is silent", p.name);
            }
        }
    }
}
