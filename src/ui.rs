use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget, Wrap},
};

use crate::celebration::Confetti;
use crate::engine::{ModeKind, RepPhase, RestKind, Snapshot};
use crate::plan::{ExerciseKind, DISPLAY_GROUPS};
use crate::util::format_mmss;
use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

const CONFETTI_COLORS: [Color; 7] = [
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
    Color::Green,
    Color::Red,
    Color::Blue,
    Color::LightYellow,
];

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snap = self.engine.snapshot();
        match snap.mode {
            ModeKind::Configuring => render_configuring(&snap, area, buf),
            ModeKind::Active => render_active(&snap, area, buf),
            ModeKind::Completed => {
                render_completed(&snap, self.quote, area, buf);
                if self.confetti.is_active {
                    render_confetti(&self.confetti, area, buf);
                }
            }
        }
    }
}

fn render_configuring(snap: &Snapshot, area: Rect, buf: &mut Buffer) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let dim = Style::default().add_modifier(Modifier::DIM);

    let mut lines = vec![
        Line::styled("STRENGTH TRAINER", bold.fg(Color::Cyan)),
        Line::raw(""),
        Line::from(vec![
            Span::raw("Number of Sets:  "),
            Span::styled(format!("< {} >", snap.total_sets), bold.fg(Color::Green)),
        ]),
        Line::styled("up/down to adjust", dim),
        Line::raw(""),
        Line::styled("Exercises per set", bold),
    ];
    for (name, reps) in DISPLAY_GROUPS {
        lines.push(Line::from(vec![
            Span::raw(*name),
            Span::styled(format!("  {reps}"), dim),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::raw("Session length: "),
        Span::styled(format_mmss(snap.total_secs), bold),
    ]));
    lines.push(Line::raw(""));
    lines.push(Line::styled("(enter) start  (esc) quit", dim));

    centered(lines, area, buf);
}

fn render_active(snap: &Snapshot, area: Rect, buf: &mut Buffer) {
    let Some(exercise) = snap.exercise else {
        return;
    };
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let dim = Style::default().add_modifier(Modifier::DIM);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints(
            [
                Constraint::Length(2), // set badge
                Constraint::Length(2), // exercise / rest title
                Constraint::Length(3), // progress or rest countdown
                Constraint::Min(4),    // phase display
                Constraint::Length(2), // aggregate times
                Constraint::Length(1), // key hints
            ]
            .as_ref(),
        )
        .split(area);

    Paragraph::new(Line::styled(
        format!("SET {} / {}", snap.set_index + 1, snap.total_sets),
        bold.fg(Color::Cyan),
    ))
    .alignment(Alignment::Center)
    .render(chunks[0], buf);

    match snap.rest {
        Some((kind, secs_remaining)) => {
            let title = match kind {
                RestKind::BetweenSets => "Rest Between Sets",
                RestKind::BetweenExercises => "Rest Between Exercises",
            };
            Paragraph::new(Line::styled(title, bold))
                .alignment(Alignment::Center)
                .render(chunks[1], buf);

            let next = match kind {
                RestKind::BetweenSets => "New Set".to_string(),
                RestKind::BetweenExercises => exercise.name.to_string(),
            };
            Paragraph::new(vec![
                Line::styled(format_mmss(secs_remaining), bold.fg(Color::Cyan)),
                Line::raw(""),
                Line::from(vec![Span::raw("Next: "), Span::styled(next, bold)]),
            ])
            .alignment(Alignment::Center)
            .render(chunks[3], buf);
        }
        None => {
            Paragraph::new(Line::styled(exercise.name, bold))
                .alignment(Alignment::Center)
                .render(chunks[1], buf);

            let (progress_label, ratio) = match exercise.kind {
                ExerciseKind::Hold => (
                    format!("{}s / {}s", snap.hold_secs_elapsed, exercise.duration_secs),
                    f64::from(snap.hold_secs_elapsed) / f64::from(exercise.duration_secs),
                ),
                ExerciseKind::Reps => (
                    format!("Rep {} / {}", (snap.rep_count + 1).min(exercise.reps), exercise.reps),
                    f64::from(snap.rep_count) / f64::from(exercise.reps),
                ),
            };
            let ratio = ratio.clamp(0.0, 1.0);
            Gauge::default()
                .gauge_style(Style::default().fg(Color::Cyan))
                .label(format!("{progress_label}  {}%", (ratio * 100.0).round()))
                .ratio(ratio)
                .render(inset(chunks[2]), buf);

            let (count, label, color) = match exercise.kind {
                ExerciseKind::Hold => (
                    exercise.duration_secs - snap.hold_secs_elapsed,
                    "HOLD",
                    Color::Yellow,
                ),
                ExerciseKind::Reps => match snap.rep_phase {
                    RepPhase::Extend => (snap.phase_secs_remaining, "UP", Color::Green),
                    RepPhase::Contract => (snap.phase_secs_remaining, "DOWN", Color::Blue),
                },
            };
            Paragraph::new(vec![
                Line::raw(""),
                Line::styled(count.to_string(), bold.fg(color)),
                Line::styled(label, bold.fg(color)),
            ])
            .alignment(Alignment::Center)
            .render(chunks[3], buf);
        }
    }

    Paragraph::new(Line::from(vec![
        Span::raw(format!("elapsed {}", format_mmss(snap.elapsed_secs))),
        Span::raw("   "),
        Span::styled(
            format!("remaining {}", format_mmss(snap.remaining_secs)),
            dim,
        ),
    ]))
    .alignment(Alignment::Center)
    .render(chunks[4], buf);

    let hints = if snap.paused {
        Line::styled(
            "PAUSED  (space) resume  (a) abort",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Line::styled("(space) pause  (n) next  (p) previous  (esc) quit", dim)
    };
    Paragraph::new(hints)
        .alignment(Alignment::Center)
        .render(chunks[5], buf);
}

fn render_completed(snap: &Snapshot, quote: &str, area: Rect, buf: &mut Buffer) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let dim = Style::default().add_modifier(Modifier::DIM);

    let sets_label = if snap.total_sets == 1 { "Set" } else { "Sets" };
    let lines = vec![
        Line::styled("TRAINING COMPLETE!", bold.fg(Color::Green)),
        Line::raw(""),
        Line::styled(quote.to_string(), Style::default().add_modifier(Modifier::ITALIC)),
        Line::raw(""),
        Line::raw("You completed:"),
        Line::styled(format!("{} {}", snap.total_sets, sets_label), bold),
        Line::styled(
            format!("{} exercises per set", snap.exercise_count),
            dim,
        ),
        Line::raw(""),
        Line::styled("(enter) new session  (esc) quit", dim),
    ];
    centered(lines, area, buf);
}

/// Render a block of lines centered on both axes.
fn centered(lines: Vec<Line>, area: Rect, buf: &mut Buffer) {
    let height = lines.len() as u16;
    let top = area.height.saturating_sub(height) / 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(top),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[1], buf);
}

/// Pull the gauge in from the screen edges.
fn inset(area: Rect) -> Rect {
    let margin = area.width / 6;
    Rect {
        x: area.x + margin,
        width: area.width.saturating_sub(margin * 2),
        ..area
    }
}

/// Confetti overlay drawn on top of the completed screen.
fn render_confetti(confetti: &Confetti, area: Rect, buf: &mut Buffer) {
    for piece in &confetti.pieces {
        if piece.x < 0.0 || piece.y < 0.0 {
            continue;
        }
        let (x, y) = (piece.x as u16, piece.y as u16);
        if x < area.width && y < area.height {
            if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
                cell.set_char(piece.symbol);
                cell.set_fg(CONFETTI_COLORS[piece.color_index % CONFETTI_COLORS.len()]);
            }
        }
    }
}
