//! The closed catalog of supported exercises.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A supported exercise, selected by its string identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    Squat,
    PushUp,
    HammerCurl,
}

/// Identifier that does not name any catalog exercise.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown exercise identifier: {0}")]
pub struct UnknownExercise(pub String);

/// Execution instructions for one exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Instructions {
    pub starting_position: &'static [&'static str],
    pub execution: &'static [&'static str],
}

impl Instructions {
    /// Render as Markdown with numbered steps under two headings.
    pub fn to_markdown(&self) -> String {
        let mut out = String::from("### Starting position:\n");
        push_steps(&mut out, self.starting_position);
        out.push_str("\n### Execution:\n");
        push_steps(&mut out, self.execution);
        out
    }
}

fn push_steps(out: &mut String, steps: &[&str]) {
    for (i, step) in steps.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, step));
    }
}

const SQUAT_INSTRUCTIONS: Instructions = Instructions {
    starting_position: &[
        "Stand with your feet shoulder-width apart.",
        "Keep your back straight and your chest up.",
    ],
    execution: &[
        "Squat as if sitting into a chair, pushing your hips back.",
        "Lower until your thighs are parallel to the floor.",
        "Drive back up to the starting position through your heels.",
    ],
};

const PUSH_UP_INSTRUCTIONS: Instructions = Instructions {
    starting_position: &[
        "Get into a plank with your hands directly below your shoulders.",
        "Keep your body straight from head to heels.",
    ],
    execution: &[
        "Lower your body until your chest almost touches the floor.",
        "Push back up to the starting position.",
    ],
};

const HAMMER_CURL_INSTRUCTIONS: Instructions = Instructions {
    starting_position: &[
        "Hold a dumbbell in each hand with your palms facing each other.",
        "Keep your elbows close to your body.",
    ],
    execution: &[
        "Raise the dumbbells towards your shoulders, palms still facing inward.",
        "Lower the dumbbells back to the starting position under control.",
    ],
};

impl ExerciseKind {
    pub const ALL: [ExerciseKind; 3] = [Self::Squat, Self::PushUp, Self::HammerCurl];

    /// Wire identifier (`"squat"`, `"push_up"`, `"hammer_curl"`).
    pub fn id(self) -> &'static str {
        match self {
            Self::Squat => "squat",
            Self::PushUp => "push_up",
            Self::HammerCurl => "hammer_curl",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Squat => "Squat",
            Self::PushUp => "Push-up",
            Self::HammerCurl => "Hammer curl",
        }
    }

    pub fn instructions(self) -> &'static Instructions {
        match self {
            Self::Squat => &SQUAT_INSTRUCTIONS,
            Self::PushUp => &PUSH_UP_INSTRUCTIONS,
            Self::HammerCurl => &HAMMER_CURL_INSTRUCTIONS,
        }
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ExerciseKind {
    type Err = UnknownExercise;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| UnknownExercise(s.to_string()))
    }
}
