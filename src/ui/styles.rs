//! # UI Styling Module
//!
//! Centralized styling utilities for consistent UI appearance across screens.
//! Extracts button styling logic for reusability.

use crate::model::TriggerKind;
use iced::widget::button;
use iced::{Background, Border, Color};

fn lighten(color: Color, amount: f32) -> Color {
    Color::from_rgb(
        (color.r + amount).min(1.0),
        (color.g + amount).min(1.0),
        (color.b + amount).min(1.0),
    )
}

fn darken(color: Color, amount: f32) -> Color {
    Color::from_rgb(
        (color.r - amount).max(0.0),
        (color.g - amount).max(0.0),
        (color.b - amount).max(0.0),
    )
}

/// Solid-color button with hover/press shading
fn solid_button_style(base: Color) -> impl Fn(&iced::Theme, button::Status) -> button::Style {
    move |_theme: &iced::Theme, status: button::Status| {
        let background = match status {
            button::Status::Active => base,
            button::Status::Hovered => lighten(base, 0.08),
            button::Status::Pressed => darken(base, 0.08),
            button::Status::Disabled => Color::from_rgb(0.3, 0.3, 0.3),
        };
        let text_color = match status {
            button::Status::Disabled => Color::from_rgb(0.6, 0.6, 0.6),
            _ => Color::WHITE,
        };
        button::Style {
            background: Some(Background::Color(background)),
            text_color,
            border: Border {
                color: lighten(base, 0.12),
                width: 1.0,
                radius: 8.0.into(),
            },
            ..Default::default()
        }
    }
}

/// Trigger buttons keep the severity color coding: green for normal, orange
/// for panic, red for seizure
pub fn trigger_button_style(
    kind: TriggerKind,
) -> impl Fn(&iced::Theme, button::Status) -> button::Style {
    let base = match kind {
        TriggerKind::Normal => Color::from_rgb(0.30, 0.69, 0.31),
        TriggerKind::Panic => Color::from_rgb(1.0, 0.60, 0.0),
        TriggerKind::Seizure => Color::from_rgb(0.90, 0.22, 0.21),
    };
    solid_button_style(base)
}

/// Style for the monitor start button (blue theme)
pub fn start_button_style() -> impl Fn(&iced::Theme, button::Status) -> button::Style {
    solid_button_style(Color::from_rgb(0.13, 0.59, 0.95))
}

/// Style for stop/logout buttons (muted dark theme)
pub fn stop_button_style() -> impl Fn(&iced::Theme, button::Status) -> button::Style {
    solid_button_style(Color::from_rgb(0.25, 0.25, 0.28))
}

/// Style for confirm/link/submit buttons (green theme)
pub fn confirm_button_style() -> impl Fn(&iced::Theme, button::Status) -> button::Style {
    solid_button_style(Color::from_rgb(0.2, 0.7, 0.2))
}

/// Style for navigation and selector buttons based on active state
pub fn nav_button_style(is_active: bool) -> impl Fn(&iced::Theme, button::Status) -> button::Style {
    move |theme: &iced::Theme, status: button::Status| {
        if is_active {
            // Active: teal background for visual feedback
            solid_button_style(Color::from_rgb(0.2, 0.6, 0.7))(theme, status)
        } else {
            // Inactive: neutral gray background
            solid_button_style(Color::from_rgb(0.4, 0.4, 0.4))(theme, status)
        }
    }
}
