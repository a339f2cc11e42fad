//! Caregiver patient list: link-by-code form plus the linked patients,
//! each opening that patient's dashboard.

use crate::app::{Message, PatientsScreen};
use crate::model::Identity;
use iced::widget::{button, column, container, row, scrollable, text, text_input};
use iced::{Element, Length};

fn link_form(screen: &PatientsScreen) -> Element<'_, Message> {
    let form = row![
        text_input("Enter patient code", &screen.link_code)
            .on_input(Message::LinkCodeChanged)
            .padding(10)
            .width(Length::Fill),
        button(text("Link Patient").size(14))
            .on_press(Message::LinkSubmitted)
            .padding(10)
            .style(super::styles::confirm_button_style()),
    ]
    .spacing(10);

    container(column![text("Link New Patient").size(16), form].spacing(8))
        .style(container::bordered_box)
        .padding(12)
        .width(Length::Fill)
        .into()
}

fn patient_list(screen: &PatientsScreen) -> Element<'_, Message> {
    let mut list = column![text(format!("Linked Patients ({})", screen.patients.len())).size(16)]
        .spacing(8);

    if screen.patients.is_empty() {
        list = list.push(
            text("No patients linked yet. Use the form above to link a patient.").size(14),
        );
    } else {
        for patient in &screen.patients {
            let name = patient.name.clone().unwrap_or_else(|| "Patient".to_string());
            let label = format!("{}\nID: {}", name, patient.id);
            list = list.push(
                button(text(label).size(14))
                    .on_press(Message::DashboardOpened(patient.id.clone()))
                    .width(Length::Fill)
                    .padding(10)
                    .style(super::styles::nav_button_style(false)),
            );
        }
    }

    scrollable(list).height(Length::Fill).into()
}

pub fn view<'a>(
    screen: &'a PatientsScreen,
    viewer: Option<&'a Identity>,
) -> Element<'a, Message> {
    let main = column![
        text("My Patients").size(24),
        text("Manage and monitor your linked patients").size(14),
        link_form(screen),
        patient_list(screen),
    ]
    .spacing(16)
    .padding(20)
    .width(Length::Fill);

    row![super::sidebar(viewer, "Patients"), main].into()
}
