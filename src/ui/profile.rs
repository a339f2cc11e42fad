//! Profile viewer for either role; renders only the fields the account has.

use crate::app::{Message, ProfileScreen};
use crate::model::{Identity, Role};
use iced::widget::{column, container, row, text};
use iced::{Element, Length};

fn info_row<'a>(label: &'static str, value: &'a str) -> Element<'a, Message> {
    container(
        row![
            text(label).size(13).width(Length::Fixed(130.0)),
            text(value).size(14),
        ]
        .spacing(10),
    )
    .style(container::bordered_box)
    .padding(10)
    .width(Length::Fill)
    .into()
}

pub fn view<'a>(
    screen: &'a ProfileScreen,
    viewer: Option<&'a Identity>,
) -> Element<'a, Message> {
    let main: Element<'a, Message> = match &screen.profile {
        None => container(text("Loading profile...").size(16))
            .width(Length::Fill)
            .height(Length::Fill)
            .center(Length::Fill)
            .into(),
        Some(profile) => {
            let name = profile.name.as_deref().unwrap_or("User");
            let role_label = match screen.role {
                Role::Patient => "Patient",
                Role::Caregiver => "Caregiver",
            };
            let shown_id = profile.id.as_deref().unwrap_or(&screen.id);

            let mut info = column![
                text("Profile Information").size(24),
                text(format!("{} - {} - ID: {}", name, role_label, shown_id)).size(14),
            ]
            .spacing(10);

            // Only non-null fields are rendered.
            if let Some(email) = &profile.email {
                info = info.push(info_row("Email", email));
            }
            if let Some(phone) = &profile.phone {
                info = info.push(info_row("Phone", phone));
            }
            if screen.role == Role::Patient {
                if let Some(age) = &profile.age {
                    info = info.push(info_row("Age", age));
                }
                if let Some(sex) = &profile.sex {
                    info = info.push(info_row("Sex", sex));
                }
                if let Some(address) = &profile.home_address {
                    info = info.push(info_row("Home Address", address));
                }
                if let Some(code) = &profile.code {
                    info = info.push(info_row("Patient Code", code));
                }
            }

            info.padding(20).width(Length::Fill).into()
        }
    };

    row![super::sidebar(viewer, "Profile"), main].into()
}
