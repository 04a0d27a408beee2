//! Color constants for terminal output (256-color palette).

use crossterm::style::Color;

use crate::fields::{DueState, Priority};

// Banner frame and task ids
pub const PINK: Color = Color::AnsiValue(211);
pub const TITLE: Color = Color::AnsiValue(219);
pub const TEXT: Color = Color::AnsiValue(250);
pub const MUTED: Color = Color::AnsiValue(244);

pub const RED: Color = Color::AnsiValue(203);
pub const YELLOW: Color = Color::AnsiValue(221);
pub const GREEN: Color = Color::AnsiValue(114);

pub fn priority_color(p: Priority) -> Color {
    match p {
        Priority::High => RED,
        Priority::Medium => YELLOW,
        Priority::Low => GREEN,
    }
}

pub fn due_state_color(s: DueState) -> Color {
    match s {
        DueState::Overdue => RED,
        DueState::DueToday => YELLOW,
        DueState::OnSchedule => GREEN,
        DueState::Done => MUTED,
    }
}
