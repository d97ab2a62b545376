use super::{Task, DEFAULT_TEMPERATURE};
use crate::postprocess::{Cleanup, DedupKey, LineMode, Transform};
use crate::prompt::{CuePolicy, PromptComponents};

struct Builtin {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    inputs: &'static [&'static str],
    preamble: &'static str,
    prefixes: &'static [&'static str],
    examples: &'static [&'static [&'static str]],
    temperature: f32,
    cleanup: Cleanup,
}

impl Builtin {
    fn into_task(self) -> Task {
        let mut components = PromptComponents::new(self.prefixes.iter().copied())
            .with_preamble(self.preamble)
            .with_cue(CuePolicy::Omit);
        for example in self.examples {
            components = components.with_example(example.iter().copied());
        }
        Task {
            id: self.id.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            input_labels: self.inputs.iter().map(|s| s.to_string()).collect(),
            components,
            default_temperature: self.temperature,
            cleanup: self.cleanup,
        }
    }
}

fn cleanup(lines: LineMode, dedup: DedupKey, transform: Transform) -> Cleanup {
    Cleanup {
        lines,
        dedup,
        transform,
        limit: None,
    }
}

pub(super) fn tasks() -> Vec<Task> {
    let builtins = [
        Builtin {
            id: "simile",
            name: "Simile",
            description: "Create a simile about a thing or concept.",
            inputs: &["Thing"],
            preamble: "Write a vivid, original simile for each object.",
            prefixes: &["Object:", "Simile:"],
            examples: &[
                &["a city at night", "A city at night is like a jewelry box left open in the dark."],
                &["a first kiss", "A first kiss is like the first sip of cold water on a hot day."],
                &["time", "Time is like a river that carries everything downstream."],
            ],
            temperature: DEFAULT_TEMPERATURE,
            cleanup: cleanup(LineMode::FirstLine, DedupKey::Exact, Transform::None),
        },
        Builtin {
            id: "explode",
            name: "Explode",
            description: "Break a word into similar-sounding phrases.",
            inputs: &["Word"],
            preamble: "Split each word into a phrase of smaller words that sound like it when read aloud.",
            prefixes: &["Word:", "Exploded:"],
            examples: &[
                &["pigtails", "pig tales"],
                &["hemingway", "hem in way"],
                &["cornucopia", "corn you copy a"],
            ],
            temperature: 0.8,
            cleanup: cleanup(LineMode::FirstLine, DedupKey::CaseInsensitive, Transform::DropEcho),
        },
        Builtin {
            id: "unexpect",
            name: "Unexpect",
            description: "Make a scene more unexpected and imaginative.",
            inputs: &["Scene"],
            preamble: "Take each ordinary scene and add a surprising, imaginative twist.",
            prefixes: &["Scene:", "Unexpected:"],
            examples: &[
                &["a quiet library", "a quiet library, but every book is whispering its own ending"],
                &["a birthday party", "a birthday party, thrown by the cake for its candles"],
                &["a traffic jam", "a traffic jam, where the cars have started a book club"],
            ],
            temperature: 0.9,
            cleanup: cleanup(LineMode::FirstLine, DedupKey::CaseInsensitive, Transform::StripInputPrefix),
        },
        Builtin {
            id: "chain",
            name: "Chain",
            description: "Build a chain of semantically related items.",
            inputs: &["Word"],
            preamble: "List a chain of items where each one is closely related to the one before it.",
            prefixes: &["Word:", "Chain:"],
            examples: &[
                &["wind", "sail\nboat\nharbor\nlighthouse\nfog"],
                &["bread", "butter\ncow\nmeadow\nbee\nhoney"],
            ],
            temperature: DEFAULT_TEMPERATURE,
            cleanup: Cleanup {
                lines: LineMode::Flatten,
                dedup: DedupKey::CaseInsensitive,
                transform: Transform::DropEcho,
                limit: Some(12),
            },
        },
        Builtin {
            id: "pov",
            name: "POV",
            description: "Evaluate a topic through different points of view.",
            inputs: &["Topic"],
            preamble: "Describe each topic from the point of view of someone unexpected.",
            prefixes: &["Topic:", "Perspective:"],
            examples: &[
                &["the printing press", "A monk: It silenced the scriptorium and the quiet art of copying by hand."],
                &["homework", "A dog: It is the paper that keeps my child at the desk instead of the park."],
                &["rain", "A snail: Finally, a day when the whole world moves at my speed."],
            ],
            temperature: 0.8,
            cleanup: cleanup(LineMode::FirstLine, DedupKey::BeforeDelimiter(':'), Transform::Shuffle),
        },
        Builtin {
            id: "alliteration",
            name: "Alliteration",
            description: "Curate words on a topic that begin with a chosen letter.",
            inputs: &["Topic", "Letter"],
            preamble: "Write an alliterative phrase about each topic using the given letter.",
            prefixes: &["Topic:", "Letter:", "Alliteration:"],
            examples: &[
                &["the ocean", "w", "Wild waves whip and whirl with wonder."],
                &["coffee", "b", "Bold, bitter brew to banish bleary mornings."],
                &["winter", "s", "Silent snow settles softly on sleeping streets."],
            ],
            temperature: DEFAULT_TEMPERATURE,
            cleanup: cleanup(LineMode::FirstLine, DedupKey::CaseInsensitive, Transform::RequireInitial),
        },
        Builtin {
            id: "acronym",
            name: "Acronym",
            description: "Create an acronym using the letters of a word.",
            inputs: &["Word"],
            preamble: "Turn each word into an acronym whose expansion relates to the word.",
            prefixes: &["Word:", "Acronym:"],
            examples: &[
                &["rap", "RAP - Recognizing Analogous Patterns"],
                &["idea", "IDEA - Imagination Driving Every Adventure"],
                &["moon", "MOON - Midnight Orbiting Over Nightfall"],
            ],
            temperature: 0.8,
            cleanup: cleanup(LineMode::FirstLine, DedupKey::AfterDelimiter('-'), Transform::VerifyAcronym),
        },
        Builtin {
            id: "fuse",
            name: "Fuse",
            description: "Find intersections between two things.",
            inputs: &["Thing 1", "Thing 2"],
            preamble: "Describe what two seemingly unrelated things have in common.",
            prefixes: &["Thing 1:", "Thing 2:", "Intersection:"],
            examples: &[
                &["a library", "a volcano", "Both hold centuries of pressure beneath a quiet surface."],
                &["jazz", "coffee", "Both are best when a little bitter and improvised."],
            ],
            temperature: DEFAULT_TEMPERATURE,
            cleanup: cleanup(LineMode::FirstLine, DedupKey::CaseInsensitive, Transform::None),
        },
        Builtin {
            id: "scene",
            name: "Scene",
            description: "Generate sensory details about a scene.",
            inputs: &["Scene"],
            preamble: "List concrete sensory details someone would notice in each scene.",
            prefixes: &["Scene:", "Details:"],
            examples: &[
                &[
                    "a rainy train station",
                    "the hiss of brakes on wet rails\nwarm light pooling under the departure board\nthe smell of damp wool coats",
                ],
                &[
                    "a bakery at dawn",
                    "flour hanging in the air like mist\nthe crackle of crusts cooling on racks\nbutter and burnt sugar",
                ],
            ],
            temperature: 0.8,
            cleanup: Cleanup {
                lines: LineMode::Flatten,
                dedup: DedupKey::CaseInsensitive,
                transform: Transform::Shuffle,
                limit: Some(10),
            },
        },
        Builtin {
            id: "unfold",
            name: "Unfold",
            description: "Slot a word into other existing words or phrases.",
            inputs: &["Word"],
            preamble: "Find an existing word or phrase that contains each word.",
            prefixes: &["Word:", "Unfolded:"],
            examples: &[
                &["light", "limelight"],
                &["art", "heart of the artichoke"],
                &["ten", "attention span"],
            ],
            temperature: DEFAULT_TEMPERATURE,
            cleanup: cleanup(LineMode::FirstLine, DedupKey::CaseInsensitive, Transform::RequireKeyword),
        },
    ];

    builtins.into_iter().map(Builtin::into_task).collect()
}
