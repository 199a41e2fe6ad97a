use thiserror::Error;

/// Rest inserted between two exercises within a set, in seconds.
pub const EXERCISE_PAUSE_SECS: u32 = 15;
/// Rest inserted between two sets, in seconds.
pub const SET_PAUSE_SECS: u32 = 120;
/// Fixed length of the extend ("up") half of a rep cycle, in seconds.
pub const EXTEND_SECS: u32 = 1;

pub const MIN_SETS: u32 = 1;
pub const MAX_SETS: u32 = 10;
pub const DEFAULT_SETS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseKind {
    /// Counted extend/contract cycles.
    Reps,
    /// A single sustained position measured against a time target.
    Hold,
}

/// One entry of the built-in workout. `duration_secs` is the contract-phase
/// length for rep exercises and the hold target for holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExerciseSpec {
    pub name: &'static str,
    pub reps: u32,
    pub duration_secs: u32,
    pub kind: ExerciseKind,
}

impl ExerciseSpec {
    const fn reps(name: &'static str, reps: u32, duration_secs: u32) -> Self {
        Self {
            name,
            reps,
            duration_secs,
            kind: ExerciseKind::Reps,
        }
    }

    const fn hold(name: &'static str, duration_secs: u32) -> Self {
        Self {
            name,
            reps: 1,
            duration_secs,
            kind: ExerciseKind::Hold,
        }
    }

    /// Seconds of one full extend+contract cycle.
    pub fn cycle_secs(&self) -> u32 {
        EXTEND_SECS + self.duration_secs
    }

    /// Seconds a complete run through this exercise takes, rests excluded.
    pub fn total_secs(&self) -> u32 {
        match self.kind {
            ExerciseKind::Reps => self.reps * self.cycle_secs(),
            ExerciseKind::Hold => self.duration_secs,
        }
    }
}

const STANDARD_EXERCISES: &[ExerciseSpec] = &[
    ExerciseSpec::reps("Clamshell Left", 15, 3),
    ExerciseSpec::reps("Clamshell Right", 15, 3),
    ExerciseSpec::reps("Side Lying Leg Lift Left", 15, 3),
    ExerciseSpec::reps("Side Lying Leg Lift Right", 15, 3),
    ExerciseSpec::reps("Romanian Squat Left", 15, 3),
    ExerciseSpec::reps("Romanian Squat Right", 15, 3),
    ExerciseSpec::reps("Butt Bridge", 20, 3),
    ExerciseSpec::hold("Plank", 60),
    ExerciseSpec::hold("1 Leg Stance Left", 60),
    ExerciseSpec::hold("1 Leg Stance Right", 60),
];

/// Grouped rows for the configuration screen (sides collapsed).
pub const DISPLAY_GROUPS: &[(&str, &str)] = &[
    ("Clamshell", "15 reps/side"),
    ("Side Lying Leg Lift", "15 reps/side"),
    ("Romanian Squat", "15 reps/side"),
    ("Butt Bridge", "20 reps"),
    ("Plank", "1 min"),
    ("1 Leg Stance", "1 min/side"),
];

pub const MOTIVATIONAL_QUOTES: &[&str] = &[
    "You're stronger than you think!",
    "Great job! Your dedication is inspiring!",
    "Training complete! You crushed it!",
    "Awesome work! Keep up the momentum!",
    "You did it! Every rep counts!",
    "Amazing effort! You're unstoppable!",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("workout plan has no exercises")]
    EmptyPlan,
    #[error("exercise {0:?} has a zero rep count")]
    ZeroReps(&'static str),
    #[error("exercise {0:?} has a zero duration")]
    ZeroDuration(&'static str),
    #[error("hold exercise {0:?} must have exactly one rep")]
    MultiRepHold(&'static str),
    #[error("set count {0} outside {MIN_SETS}..={MAX_SETS}")]
    SetsOutOfRange(u32),
}

/// The ordered, validated exercise sequence a session runs through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutPlan {
    exercises: Vec<ExerciseSpec>,
}

impl WorkoutPlan {
    pub fn new(exercises: Vec<ExerciseSpec>) -> Result<Self, PlanError> {
        if exercises.is_empty() {
            return Err(PlanError::EmptyPlan);
        }
        for ex in &exercises {
            if ex.reps == 0 {
                return Err(PlanError::ZeroReps(ex.name));
            }
            if ex.duration_secs == 0 {
                return Err(PlanError::ZeroDuration(ex.name));
            }
            if ex.kind == ExerciseKind::Hold && ex.reps != 1 {
                return Err(PlanError::MultiRepHold(ex.name));
            }
        }
        Ok(Self { exercises })
    }

    /// The built-in workout.
    pub fn standard() -> Self {
        Self {
            exercises: STANDARD_EXERCISES.to_vec(),
        }
    }

    pub fn exercises(&self) -> &[ExerciseSpec] {
        &self.exercises
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn exercise(&self, index: usize) -> &ExerciseSpec {
        &self.exercises[index]
    }

    /// Seconds one full set takes, including the rests between exercises
    /// (but not the rest that follows a set).
    pub fn set_secs(&self) -> u32 {
        let work: u32 = self.exercises.iter().map(ExerciseSpec::total_secs).sum();
        work + EXERCISE_PAUSE_SECS * (self.exercises.len() as u32 - 1)
    }

    /// Seconds a whole session of `total_sets` takes.
    pub fn session_secs(&self, total_sets: u32) -> u32 {
        self.set_secs() * total_sets + SET_PAUSE_SECS * total_sets.saturating_sub(1)
    }
}

/// User-chosen session parameters, immutable once training starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub total_sets: u32,
}

impl SessionConfig {
    pub fn new(total_sets: u32) -> Result<Self, PlanError> {
        if !(MIN_SETS..=MAX_SETS).contains(&total_sets) {
            return Err(PlanError::SetsOutOfRange(total_sets));
        }
        Ok(Self { total_sets })
    }

    /// Force a possibly out-of-range count into the valid window.
    pub fn clamped(total_sets: u32) -> Self {
        Self {
            total_sets: total_sets.clamp(MIN_SETS, MAX_SETS),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            total_sets: DEFAULT_SETS,
        }
    }
}
