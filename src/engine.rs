use crate::audio::{self, AudioCue};
use crate::plan::{
    ExerciseKind, ExerciseSpec, SessionConfig, WorkoutPlan, EXERCISE_PAUSE_SECS, EXTEND_SECS,
    MAX_SETS, MIN_SETS, SET_PAUSE_SECS,
};

/// The half of a rep cycle currently counting down. Extend is the fixed
/// one-second "up" half, contract the exercise-specific "down" half.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepPhase {
    Extend,
    Contract,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestKind {
    BetweenExercises,
    BetweenSets,
}

/// Progress through the currently loaded exercise, or the rest period
/// that precedes it. Exactly one counter is live at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Resting {
        kind: RestKind,
        secs_remaining: u32,
    },
    Repping {
        reps_done: u32,
        phase: RepPhase,
        phase_secs_remaining: u32,
        secs_into_phase: u32,
    },
    Holding {
        secs_elapsed: u32,
    },
}

impl Step {
    /// The state an exercise starts in: first extend second of the first
    /// rep, or zero seconds into the hold.
    fn fresh(exercise: &ExerciseSpec) -> Self {
        match exercise.kind {
            ExerciseKind::Reps => Step::Repping {
                reps_done: 0,
                phase: RepPhase::Extend,
                phase_secs_remaining: EXTEND_SECS,
                secs_into_phase: 0,
            },
            ExerciseKind::Hold => Step::Holding { secs_elapsed: 0 },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveState {
    pub paused: bool,
    pub set_index: u32,
    pub exercise_index: usize,
    pub step: Step,
}

/// The whole session state as one tagged value; invalid flag combinations
/// (resting while holding, paused while configuring) cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Configuring,
    Active(ActiveState),
    Completed,
}

/// Coarse mode tag carried by snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    Configuring,
    Active,
    Completed,
}

/// Flat, render-ready projection of the engine. Fields that do not apply
/// to the current mode hold their zero values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub mode: ModeKind,
    pub paused: bool,
    pub total_sets: u32,
    pub set_index: u32,
    pub exercise_count: usize,
    pub exercise_index: usize,
    /// The loaded exercise; during a rest this is already the upcoming one.
    pub exercise: Option<ExerciseSpec>,
    pub rep_count: u32,
    pub rep_phase: RepPhase,
    pub phase_secs_remaining: u32,
    pub secs_into_phase: u32,
    pub hold_secs_elapsed: u32,
    pub rest: Option<(RestKind, u32)>,
    pub elapsed_secs: u32,
    pub remaining_secs: u32,
    pub total_secs: u32,
    pub set_secs: u32,
}

/// Owns all session state. Driven by an external once-per-second ticker
/// and synchronous commands; emits audio cues into a queue the caller
/// drains after each call.
#[derive(Debug)]
pub struct SessionEngine {
    plan: WorkoutPlan,
    config: SessionConfig,
    mode: Mode,
    cues: Vec<AudioCue>,
}

impl SessionEngine {
    pub fn new(plan: WorkoutPlan, config: SessionConfig) -> Self {
        Self {
            plan,
            config,
            mode: Mode::Configuring,
            cues: Vec::new(),
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn plan(&self) -> &WorkoutPlan {
        &self.plan
    }

    pub fn total_sets(&self) -> u32 {
        self.config.total_sets
    }

    /// Cues emitted since the last drain, oldest first.
    pub fn drain_cues(&mut self) -> Vec<AudioCue> {
        std::mem::take(&mut self.cues)
    }

    /// Raise the set count. Only honored while configuring.
    pub fn increment_sets(&mut self) {
        if self.mode == Mode::Configuring {
            self.config.total_sets = (self.config.total_sets + 1).min(MAX_SETS);
        }
    }

    /// Lower the set count. Only honored while configuring.
    pub fn decrement_sets(&mut self) {
        if self.mode == Mode::Configuring {
            self.config.total_sets = self.config.total_sets.saturating_sub(1).max(MIN_SETS);
        }
    }

    /// Begin a fresh session at set 0, exercise 0. No-op unless configuring.
    pub fn start(&mut self) {
        if self.mode != Mode::Configuring {
            return;
        }
        self.mode = Mode::Active(ActiveState {
            paused: false,
            set_index: 0,
            exercise_index: 0,
            step: Step::fresh(self.plan.exercise(0)),
        });
    }

    /// Flip the pause flag. Nothing else moves, so rapid toggling is safe.
    pub fn toggle_pause(&mut self) {
        if let Mode::Active(state) = &mut self.mode {
            state.paused = !state.paused;
        }
    }

    /// Discard the session and return to configuration.
    pub fn abort(&mut self) {
        self.mode = Mode::Configuring;
    }

    /// Leave the completed screen for a new configuration round.
    pub fn reset(&mut self) {
        if self.mode == Mode::Completed {
            self.mode = Mode::Configuring;
        }
    }

    /// Jump to the next exercise, bypassing any pending rest. Skipping the
    /// last exercise of a non-final set instead enters the between-set
    /// rest, mirroring natural set completion. No-op at the very end.
    pub fn skip_forward(&mut self) {
        let Mode::Active(mut state) = self.mode else {
            return;
        };
        if state.exercise_index + 1 < self.plan.len() {
            state.exercise_index += 1;
            state.step = Step::fresh(self.plan.exercise(state.exercise_index));
            self.mode = Mode::Active(state);
        } else if state.set_index + 1 < self.config.total_sets {
            state.set_index += 1;
            state.exercise_index = 0;
            state.step = Step::Resting {
                kind: RestKind::BetweenSets,
                secs_remaining: SET_PAUSE_SECS,
            };
            self.mode = Mode::Active(state);
        }
        self.detect_completion();
    }

    /// Step back one exercise within the current set. No-op on the first
    /// exercise; never crosses a set boundary.
    pub fn skip_backward(&mut self) {
        let Mode::Active(mut state) = self.mode else {
            return;
        };
        if state.exercise_index == 0 {
            return;
        }
        state.exercise_index -= 1;
        state.step = Step::fresh(self.plan.exercise(state.exercise_index));
        self.mode = Mode::Active(state);
        self.detect_completion();
    }

    /// Advance the live counter by one second. Must be a no-op in every
    /// state other than running, which is what makes pause and late ticks
    /// from a stale ticker harmless.
    pub fn on_tick(&mut self) {
        let Mode::Active(mut state) = self.mode else {
            return;
        };
        if state.paused {
            return;
        }
        let exercise = *self.plan.exercise(state.exercise_index);
        state.step = match state.step {
            Step::Resting {
                kind,
                secs_remaining,
            } => tick_rest(kind, secs_remaining, &exercise),
            Step::Holding { secs_elapsed } => tick_hold(secs_elapsed, exercise.duration_secs),
            Step::Repping {
                reps_done,
                phase,
                phase_secs_remaining,
                secs_into_phase,
            } => {
                let (step, cue) = tick_reps(
                    reps_done,
                    phase,
                    phase_secs_remaining,
                    secs_into_phase,
                    exercise.duration_secs,
                );
                if let Some(cue) = cue {
                    self.cues.push(cue);
                }
                step
            }
        };
        self.mode = Mode::Active(state);
        self.detect_completion();
    }

    /// Runs after every tick and every manual skip: if the loaded exercise
    /// has delivered all its reps and no rest is pending, chime and move
    /// on to the next exercise, the next set, or the completed screen.
    fn detect_completion(&mut self) {
        let Mode::Active(mut state) = self.mode else {
            return;
        };
        let exercise = *self.plan.exercise(state.exercise_index);
        let rep_count = match state.step {
            Step::Resting { .. } => return,
            Step::Repping { reps_done, .. } => reps_done,
            Step::Holding { secs_elapsed } => u32::from(secs_elapsed >= exercise.duration_secs),
        };
        if rep_count < exercise.reps {
            return;
        }
        self.cues.push(AudioCue::Chime);
        if state.exercise_index + 1 < self.plan.len() {
            // Advance the pointer now so the rest screen can announce the
            // upcoming exercise.
            state.exercise_index += 1;
            state.step = Step::Resting {
                kind: RestKind::BetweenExercises,
                secs_remaining: EXERCISE_PAUSE_SECS,
            };
            self.mode = Mode::Active(state);
        } else if state.set_index + 1 < self.config.total_sets {
            state.set_index += 1;
            state.exercise_index = 0;
            state.step = Step::Resting {
                kind: RestKind::BetweenSets,
                secs_remaining: SET_PAUSE_SECS,
            };
            self.mode = Mode::Active(state);
        } else {
            self.mode = Mode::Completed;
            self.cues.push(AudioCue::Cheer);
        }
    }

    /// Length of the whole session in seconds, rests included.
    pub fn total_secs(&self) -> u32 {
        self.plan.session_secs(self.config.total_sets)
    }

    /// Seconds of the session consumed so far, recomputed from the current
    /// state on every call. Rep progress counts in whole cycles.
    pub fn elapsed_secs(&self) -> u32 {
        let total = self.total_secs();
        let Mode::Active(state) = self.mode else {
            return match self.mode {
                Mode::Completed => total,
                _ => 0,
            };
        };

        let mut elapsed = state.set_index * self.plan.set_secs();
        if let Step::Resting {
            kind: RestKind::BetweenSets,
            secs_remaining,
        } = state.step
        {
            // set_index already points at the upcoming set.
            elapsed += state.set_index.saturating_sub(1) * SET_PAUSE_SECS;
            elapsed += SET_PAUSE_SECS - secs_remaining;
            return elapsed.min(total);
        }
        elapsed += state.set_index * SET_PAUSE_SECS;

        elapsed += self.plan.exercises()[..state.exercise_index]
            .iter()
            .map(ExerciseSpec::total_secs)
            .sum::<u32>();
        let exercise = self.plan.exercise(state.exercise_index);
        match state.step {
            Step::Resting { secs_remaining, .. } => {
                elapsed += (state.exercise_index as u32).saturating_sub(1) * EXERCISE_PAUSE_SECS;
                elapsed += EXERCISE_PAUSE_SECS - secs_remaining;
            }
            Step::Repping { reps_done, .. } => {
                elapsed += state.exercise_index as u32 * EXERCISE_PAUSE_SECS;
                elapsed += reps_done * exercise.cycle_secs();
            }
            Step::Holding { secs_elapsed } => {
                elapsed += state.exercise_index as u32 * EXERCISE_PAUSE_SECS;
                elapsed += secs_elapsed;
            }
        }
        elapsed.min(total)
    }

    pub fn remaining_secs(&self) -> u32 {
        self.total_secs().saturating_sub(self.elapsed_secs())
    }

    /// Cheap read-only projection for rendering.
    pub fn snapshot(&self) -> Snapshot {
        let mut snap = Snapshot {
            mode: match self.mode {
                Mode::Configuring => ModeKind::Configuring,
                Mode::Active(_) => ModeKind::Active,
                Mode::Completed => ModeKind::Completed,
            },
            paused: false,
            total_sets: self.config.total_sets,
            set_index: 0,
            exercise_count: self.plan.len(),
            exercise_index: 0,
            exercise: None,
            rep_count: 0,
            rep_phase: RepPhase::Extend,
            phase_secs_remaining: EXTEND_SECS,
            secs_into_phase: 0,
            hold_secs_elapsed: 0,
            rest: None,
            elapsed_secs: self.elapsed_secs(),
            remaining_secs: self.remaining_secs(),
            total_secs: self.total_secs(),
            set_secs: self.plan.set_secs(),
        };
        if let Mode::Active(state) = self.mode {
            let exercise = *self.plan.exercise(state.exercise_index);
            snap.paused = state.paused;
            snap.set_index = state.set_index;
            snap.exercise_index = state.exercise_index;
            snap.exercise = Some(exercise);
            match state.step {
                Step::Resting {
                    kind,
                    secs_remaining,
                } => snap.rest = Some((kind, secs_remaining)),
                Step::Repping {
                    reps_done,
                    phase,
                    phase_secs_remaining,
                    secs_into_phase,
                } => {
                    snap.rep_count = reps_done;
                    snap.rep_phase = phase;
                    snap.phase_secs_remaining = phase_secs_remaining;
                    snap.secs_into_phase = secs_into_phase;
                }
                Step::Holding { secs_elapsed } => {
                    snap.hold_secs_elapsed = secs_elapsed;
                    snap.rep_count = u32::from(secs_elapsed >= exercise.duration_secs);
                }
            }
        }
        snap
    }
}

/// Rest countdown. Reaching zero resumes the exercise that was loaded
/// when the rest was entered.
fn tick_rest(kind: RestKind, secs_remaining: u32, exercise: &ExerciseSpec) -> Step {
    if secs_remaining <= 1 {
        Step::fresh(exercise)
    } else {
        Step::Resting {
            kind,
            secs_remaining: secs_remaining - 1,
        }
    }
}

/// Hold count-up, clamped at the target.
fn tick_hold(secs_elapsed: u32, target_secs: u32) -> Step {
    Step::Holding {
        secs_elapsed: (secs_elapsed + 1).min(target_secs),
    }
}

/// Rep phase countdown. Phase-boundary ticks flip the phase silently; all
/// other ticks beep, the contract count-in fading to a floor volume.
fn tick_reps(
    reps_done: u32,
    phase: RepPhase,
    phase_secs_remaining: u32,
    secs_into_phase: u32,
    contract_secs: u32,
) -> (Step, Option<AudioCue>) {
    if phase_secs_remaining <= 1 {
        let step = match phase {
            RepPhase::Extend => Step::Repping {
                reps_done,
                phase: RepPhase::Contract,
                phase_secs_remaining: contract_secs,
                secs_into_phase: 0,
            },
            RepPhase::Contract => Step::Repping {
                reps_done: reps_done + 1,
                phase: RepPhase::Extend,
                phase_secs_remaining: EXTEND_SECS,
                secs_into_phase: 0,
            },
        };
        return (step, None);
    }
    let secs_into_phase = secs_into_phase + 1;
    let cue = AudioCue::Beep {
        pitch_hz: match phase {
            RepPhase::Extend => audio::EXTEND_BEEP_HZ,
            RepPhase::Contract => audio::CONTRACT_BEEP_HZ,
        },
        secs: audio::BEEP_SECS,
        volume: match phase {
            RepPhase::Extend => audio::EXTEND_BEEP_VOLUME,
            RepPhase::Contract => audio::contract_volume(secs_into_phase),
        },
    };
    (
        Step::Repping {
            reps_done,
            phase,
            phase_secs_remaining: phase_secs_remaining - 1,
            secs_into_phase,
        },
        Some(cue),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{ExerciseKind, ExerciseSpec};
    use assert_matches::assert_matches;

    fn rep_exercise(reps: u32, duration_secs: u32) -> ExerciseSpec {
        ExerciseSpec {
            name: "rep",
            reps,
            duration_secs,
            kind: ExerciseKind::Reps,
        }
    }

    fn hold_exercise(duration_secs: u32) -> ExerciseSpec {
        ExerciseSpec {
            name: "hold",
            reps: 1,
            duration_secs,
            kind: ExerciseKind::Hold,
        }
    }

    fn engine(exercises: Vec<ExerciseSpec>, sets: u32) -> SessionEngine {
        SessionEngine::new(
            WorkoutPlan::new(exercises).unwrap(),
            SessionConfig::new(sets).unwrap(),
        )
    }

    fn step(engine: &SessionEngine) -> Step {
        match engine.mode() {
            Mode::Active(state) => state.step,
            other => panic!("expected active mode, got {other:?}"),
        }
    }

    #[test]
    fn tick_is_noop_outside_running() {
        let mut eng = engine(vec![rep_exercise(2, 2)], 1);
        eng.on_tick();
        assert_eq!(*eng.mode(), Mode::Configuring);

        eng.start();
        eng.toggle_pause();
        let frozen = *eng.mode();
        for _ in 0..50 {
            eng.on_tick();
        }
        assert_eq!(*eng.mode(), frozen);
    }

    #[test]
    fn start_only_from_configuring() {
        let mut eng = engine(vec![rep_exercise(2, 2)], 1);
        eng.start();
        let running = *eng.mode();
        eng.start();
        assert_eq!(*eng.mode(), running);
    }

    #[test]
    fn fresh_start_state() {
        let mut eng = engine(vec![rep_exercise(2, 2)], 1);
        eng.start();
        assert_eq!(
            *eng.mode(),
            Mode::Active(ActiveState {
                paused: false,
                set_index: 0,
                exercise_index: 0,
                step: Step::Repping {
                    reps_done: 0,
                    phase: RepPhase::Extend,
                    phase_secs_remaining: 1,
                    secs_into_phase: 0,
                },
            })
        );
    }

    #[test]
    fn rep_cycle_tick_by_tick() {
        let mut eng = engine(vec![rep_exercise(2, 2)], 1);
        eng.start();

        // t1: extend boundary flips into a 2s contract
        eng.on_tick();
        assert_matches!(
            step(&eng),
            Step::Repping {
                reps_done: 0,
                phase: RepPhase::Contract,
                phase_secs_remaining: 2,
                secs_into_phase: 0,
            }
        );
        // t2: contract counts down
        eng.on_tick();
        assert_matches!(
            step(&eng),
            Step::Repping {
                reps_done: 0,
                phase: RepPhase::Contract,
                phase_secs_remaining: 1,
                secs_into_phase: 1,
            }
        );
        // t3: contract boundary completes the first rep
        eng.on_tick();
        assert_matches!(
            step(&eng),
            Step::Repping {
                reps_done: 1,
                phase: RepPhase::Extend,
                phase_secs_remaining: 1,
                ..
            }
        );
        // t4..t6: second rep, then the session is done
        eng.on_tick();
        eng.on_tick();
        eng.on_tick();
        assert_eq!(*eng.mode(), Mode::Completed);
    }

    #[test]
    fn boundary_ticks_do_not_beep() {
        let mut eng = engine(vec![rep_exercise(1, 2)], 1);
        eng.start();
        eng.on_tick(); // boundary into contract
        assert!(eng.drain_cues().is_empty());
        eng.on_tick(); // in-phase tick
        let cues = eng.drain_cues();
        assert_eq!(
            cues,
            vec![AudioCue::Beep {
                pitch_hz: audio::CONTRACT_BEEP_HZ,
                secs: audio::BEEP_SECS,
                volume: 0.15,
            }]
        );
    }

    #[test]
    fn contract_count_in_fades_to_floor() {
        // 5s contract: in-phase ticks at secs 1..=4
        let mut eng = engine(vec![rep_exercise(1, 5)], 1);
        eng.start();
        eng.on_tick(); // boundary
        let mut volumes = Vec::new();
        for _ in 0..4 {
            eng.on_tick();
            for cue in eng.drain_cues() {
                if let AudioCue::Beep { volume, .. } = cue {
                    volumes.push(volume);
                }
            }
        }
        assert_eq!(volumes, vec![0.15, 0.09, 0.08, 0.08]);
    }

    #[test]
    fn hold_counts_up_and_clamps() {
        let mut eng = engine(vec![hold_exercise(3), rep_exercise(1, 2)], 1);
        eng.start();
        eng.on_tick();
        assert_matches!(step(&eng), Step::Holding { secs_elapsed: 1 });
        eng.on_tick();
        assert_matches!(step(&eng), Step::Holding { secs_elapsed: 2 });
        eng.on_tick();
        // Reaching the target completes the hold and enters the rest with
        // the next exercise already loaded.
        assert_matches!(
            step(&eng),
            Step::Resting {
                kind: RestKind::BetweenExercises,
                secs_remaining: EXERCISE_PAUSE_SECS,
            }
        );
        match eng.mode() {
            Mode::Active(state) => assert_eq!(state.exercise_index, 1),
            other => panic!("unexpected mode {other:?}"),
        }
    }

    #[test]
    fn holds_emit_no_per_second_cue() {
        let mut eng = engine(vec![hold_exercise(5)], 1);
        eng.start();
        eng.on_tick();
        eng.on_tick();
        assert!(eng.drain_cues().is_empty());
    }

    #[test]
    fn rest_counts_down_then_resumes_loaded_exercise() {
        let mut eng = engine(vec![hold_exercise(1), rep_exercise(1, 2)], 1);
        eng.start();
        eng.on_tick(); // hold done -> rest, exercise 1 loaded
        for expected in (1..EXERCISE_PAUSE_SECS).rev() {
            eng.on_tick();
            assert_matches!(
                step(&eng),
                Step::Resting { secs_remaining, .. } if secs_remaining == expected
            );
        }
        eng.on_tick(); // final rest second -> fresh rep state
        assert_matches!(
            step(&eng),
            Step::Repping {
                reps_done: 0,
                phase: RepPhase::Extend,
                phase_secs_remaining: 1,
                secs_into_phase: 0,
            }
        );
    }

    #[test]
    fn set_rollover_enters_long_rest() {
        let mut eng = engine(vec![rep_exercise(1, 2)], 2);
        eng.start();
        eng.on_tick();
        eng.on_tick();
        eng.on_tick(); // rep complete -> set 1 of 2 done
        assert_matches!(
            step(&eng),
            Step::Resting {
                kind: RestKind::BetweenSets,
                secs_remaining: SET_PAUSE_SECS,
            }
        );
        match eng.mode() {
            Mode::Active(state) => {
                assert_eq!(state.set_index, 1);
                assert_eq!(state.exercise_index, 0);
            }
            other => panic!("unexpected mode {other:?}"),
        }
    }

    #[test]
    fn chime_then_cheer_on_final_completion() {
        let mut eng = engine(vec![rep_exercise(1, 2)], 1);
        eng.start();
        eng.on_tick();
        eng.on_tick();
        eng.drain_cues();
        eng.on_tick();
        assert_eq!(eng.drain_cues(), vec![AudioCue::Chime, AudioCue::Cheer]);
        assert_eq!(*eng.mode(), Mode::Completed);
        // Late ticks after completion change nothing.
        eng.on_tick();
        assert_eq!(*eng.mode(), Mode::Completed);
        assert!(eng.drain_cues().is_empty());
    }

    #[test]
    fn chime_without_cheer_between_exercises() {
        let mut eng = engine(vec![hold_exercise(1), hold_exercise(1)], 1);
        eng.start();
        eng.on_tick();
        assert_eq!(eng.drain_cues(), vec![AudioCue::Chime]);
    }

    #[test]
    fn pause_freezes_every_counter() {
        let mut eng = engine(vec![rep_exercise(3, 3)], 1);
        eng.start();
        eng.on_tick();
        eng.on_tick();
        let frozen = *eng.mode();
        let elapsed = eng.elapsed_secs();
        eng.toggle_pause();
        for _ in 0..100 {
            eng.on_tick();
        }
        assert_eq!(
            *eng.mode(),
            match frozen {
                Mode::Active(mut s) => {
                    s.paused = true;
                    Mode::Active(s)
                }
                other => other,
            }
        );
        assert_eq!(eng.elapsed_secs(), elapsed);
        // Resume picks up exactly where it left off.
        eng.toggle_pause();
        assert_eq!(*eng.mode(), frozen);
    }

    #[test]
    fn skip_forward_mid_set_bypasses_rest() {
        let mut eng = engine(vec![hold_exercise(5), rep_exercise(2, 2)], 1);
        eng.start();
        eng.on_tick();
        eng.skip_forward();
        match eng.mode() {
            Mode::Active(state) => {
                assert_eq!(state.exercise_index, 1);
                assert_matches!(state.step, Step::Repping { reps_done: 0, .. });
            }
            other => panic!("unexpected mode {other:?}"),
        }
        assert!(eng.drain_cues().is_empty());
    }

    #[test]
    fn skip_forward_clears_pending_rest() {
        let mut eng = engine(vec![hold_exercise(1), hold_exercise(5), hold_exercise(5)], 1);
        eng.start();
        eng.on_tick(); // rest, exercise 1 loaded
        eng.skip_forward();
        match eng.mode() {
            Mode::Active(state) => {
                assert_eq!(state.exercise_index, 2);
                assert_matches!(state.step, Step::Holding { secs_elapsed: 0 });
            }
            other => panic!("unexpected mode {other:?}"),
        }
    }

    #[test]
    fn skip_forward_on_last_exercise_advances_set_with_rest() {
        let mut eng = engine(vec![rep_exercise(5, 3)], 2);
        eng.start();
        eng.on_tick();
        eng.skip_forward();
        match eng.mode() {
            Mode::Active(state) => {
                assert_eq!(state.set_index, 1);
                assert_eq!(state.exercise_index, 0);
                assert_eq!(
                    state.step,
                    Step::Resting {
                        kind: RestKind::BetweenSets,
                        secs_remaining: SET_PAUSE_SECS,
                    }
                );
            }
            other => panic!("unexpected mode {other:?}"),
        }
    }

    #[test]
    fn skip_forward_at_session_end_is_noop() {
        let mut eng = engine(vec![rep_exercise(5, 3)], 1);
        eng.start();
        eng.on_tick();
        let before = *eng.mode();
        eng.skip_forward();
        assert_eq!(*eng.mode(), before);
    }

    #[test]
    fn skip_backward_rules() {
        let mut eng = engine(vec![hold_exercise(5), hold_exercise(5)], 2);
        eng.start();
        // On the very first exercise: no-op.
        let before = *eng.mode();
        eng.skip_backward();
        assert_eq!(*eng.mode(), before);

        eng.skip_forward();
        eng.on_tick();
        eng.skip_backward();
        match eng.mode() {
            Mode::Active(state) => {
                assert_eq!(state.exercise_index, 0);
                assert_matches!(state.step, Step::Holding { secs_elapsed: 0 });
            }
            other => panic!("unexpected mode {other:?}"),
        }

        // Never crosses a set boundary: index 0 of set 1 stays put.
        eng.skip_forward();
        eng.skip_forward(); // into set 1 rest
        eng.skip_backward();
        match eng.mode() {
            Mode::Active(state) => {
                assert_eq!(state.set_index, 1);
                assert_eq!(state.exercise_index, 0);
            }
            other => panic!("unexpected mode {other:?}"),
        }
    }

    #[test]
    fn abort_then_start_matches_first_start() {
        let mut first = engine(vec![rep_exercise(3, 3), hold_exercise(5)], 2);
        first.start();
        let reference = *first.mode();

        let mut eng = engine(vec![rep_exercise(3, 3), hold_exercise(5)], 2);
        eng.start();
        for _ in 0..20 {
            eng.on_tick();
        }
        eng.toggle_pause();
        eng.abort();
        assert_eq!(*eng.mode(), Mode::Configuring);
        eng.start();
        assert_eq!(*eng.mode(), reference);
    }

    #[test]
    fn reset_only_from_completed() {
        let mut eng = engine(vec![rep_exercise(1, 2)], 1);
        eng.reset();
        assert_eq!(*eng.mode(), Mode::Configuring);
        eng.start();
        eng.reset();
        assert_matches!(eng.mode(), Mode::Active(_));
        eng.on_tick();
        eng.on_tick();
        eng.on_tick();
        assert_eq!(*eng.mode(), Mode::Completed);
        eng.reset();
        assert_eq!(*eng.mode(), Mode::Configuring);
    }

    #[test]
    fn set_count_adjustable_only_while_configuring() {
        let mut eng = engine(vec![rep_exercise(1, 2)], 1);
        eng.increment_sets();
        assert_eq!(eng.total_sets(), 2);
        eng.decrement_sets();
        eng.decrement_sets();
        assert_eq!(eng.total_sets(), MIN_SETS);
        for _ in 0..20 {
            eng.increment_sets();
        }
        assert_eq!(eng.total_sets(), MAX_SETS);

        eng.start();
        eng.decrement_sets();
        assert_eq!(eng.total_sets(), MAX_SETS);
    }

    #[test]
    fn elapsed_tracks_rep_cycles_and_rest() {
        let mut eng = engine(vec![rep_exercise(2, 2), hold_exercise(4)], 1);
        eng.start();
        assert_eq!(eng.total_secs(), 2 * 3 + 4 + EXERCISE_PAUSE_SECS);
        assert_eq!(eng.elapsed_secs(), 0);
        eng.on_tick();
        eng.on_tick();
        eng.on_tick(); // first rep banked
        assert_eq!(eng.elapsed_secs(), 3);
        eng.on_tick();
        eng.on_tick();
        eng.on_tick(); // exercise complete, rest entered
        assert_eq!(eng.elapsed_secs(), 6);
        eng.on_tick();
        assert_eq!(eng.elapsed_secs(), 7);
        assert_eq!(eng.remaining_secs(), eng.total_secs() - 7);
    }

    #[test]
    fn snapshot_projects_active_state() {
        let mut eng = engine(vec![rep_exercise(2, 2)], 3);
        let idle = eng.snapshot();
        assert_eq!(idle.mode, ModeKind::Configuring);
        assert_eq!(idle.total_sets, 3);
        assert!(idle.exercise.is_none());

        eng.start();
        eng.on_tick();
        eng.on_tick();
        let snap = eng.snapshot();
        assert_eq!(snap.mode, ModeKind::Active);
        assert_eq!(snap.rep_phase, RepPhase::Contract);
        assert_eq!(snap.phase_secs_remaining, 1);
        assert_eq!(snap.rep_count, 0);
        assert_eq!(snap.exercise.unwrap().name, "rep");
        assert_eq!(snap.elapsed_secs + snap.remaining_secs, snap.total_secs);
    }

    #[test]
    fn snapshot_tracks_hold_progress() {
        let mut eng = engine(vec![hold_exercise(3), hold_exercise(3)], 1);
        eng.start();
        eng.on_tick();
        let snap = eng.snapshot();
        assert_eq!(snap.hold_secs_elapsed, 1);
        assert_eq!(snap.rep_count, 0);
        eng.on_tick();
        eng.on_tick(); // target reached, rest entered with the next hold loaded
        let snap = eng.snapshot();
        assert_eq!(snap.exercise_index, 1);
        assert_matches!(snap.rest, Some((RestKind::BetweenExercises, EXERCISE_PAUSE_SECS)));
        assert_eq!(snap.hold_secs_elapsed, 0);
    }

    #[test]
    fn rest_transition_function_boundaries() {
        let ex = rep_exercise(2, 2);
        assert_eq!(
            tick_rest(RestKind::BetweenExercises, 3, &ex),
            Step::Resting {
                kind: RestKind::BetweenExercises,
                secs_remaining: 2,
            }
        );
        assert_eq!(tick_rest(RestKind::BetweenExercises, 1, &ex), Step::fresh(&ex));
    }

    #[test]
    fn hold_transition_function_clamps() {
        assert_eq!(tick_hold(0, 3), Step::Holding { secs_elapsed: 1 });
        assert_eq!(tick_hold(3, 3), Step::Holding { secs_elapsed: 3 });
    }
}
