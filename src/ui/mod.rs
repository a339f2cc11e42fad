//! # UI Module
//!
//! Per-screen view construction plus the widgets shared between screens
//! (sidebar navigation, notice banner). Views are pure functions from screen
//! state to elements; everything stateful stays in `app`.

pub mod auth;
pub mod dashboard;
pub mod patients;
pub mod profile;
pub mod styles;

use crate::app::Message;
use crate::model::{Identity, Role};
use iced::widget::{button, column, container, row, text};
use iced::{Element, Length};

/// Dismissible banner carrying the most recent user-facing notice. The
/// application surfaces every screen-level failure here; nothing retries.
pub fn notice_banner(notice: &str) -> Element<'_, Message> {
    let content = row![
        text(notice).size(14).width(Length::Fill),
        button(text("Dismiss").size(14))
            .on_press(Message::NoticeDismissed)
            .padding(6),
    ]
    .spacing(10)
    .padding(10);

    container(content)
        .style(container::bordered_box)
        .width(Length::Fill)
        .into()
}

/// Navigation sidebar. Routes depend on the viewer's role: patients get
/// their dashboard and profile, caregivers their patient list and profile.
pub fn sidebar(viewer: Option<&Identity>, active: &str) -> Element<'static, Message> {
    let title = text("NeuroGuard").size(20);

    let mut entries = column![title].spacing(10).padding(20).width(220);

    if let Some(identity) = viewer {
        if let Some(name) = &identity.name {
            entries = entries.push(text(name.clone()).size(14));
        }

        let routes: Vec<(&str, Message)> = match identity.role {
            Role::Patient => vec![
                ("Dashboard", Message::DashboardOpened(identity.id.clone())),
                (
                    "Profile",
                    Message::ProfileOpened(identity.role, identity.id.clone()),
                ),
            ],
            Role::Caregiver => vec![
                ("Patients", Message::PatientsOpened),
                (
                    "Profile",
                    Message::ProfileOpened(identity.role, identity.id.clone()),
                ),
            ],
        };

        for (label, message) in routes {
            let is_active = label == active;
            entries = entries.push(
                button(text(label).size(14))
                    .on_press(message)
                    .width(Length::Fill)
                    .padding(10)
                    .style(styles::nav_button_style(is_active)),
            );
        }

        entries = entries.push(
            button(text("Logout").size(14))
                .on_press(Message::LoggedOut)
                .width(Length::Fill)
                .padding(10)
                .style(styles::stop_button_style()),
        );
    }

    container(entries)
        .style(container::bordered_box)
        .width(Length::Fixed(220.0))
        .height(Length::Fill)
        .into()
}
