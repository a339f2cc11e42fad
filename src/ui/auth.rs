//! Login and signup forms with the patient/caregiver role selector.
//! Login authenticates by email alone; patient signup adds demographics.

use crate::app::{AuthField, AuthMode, AuthScreen, Message};
use crate::model::Role;
use iced::widget::{button, column, container, row, text, text_input};
use iced::{Element, Length};

fn field_input<'a>(
    placeholder: &'a str,
    value: &'a str,
    field: AuthField,
) -> Element<'a, Message> {
    text_input(placeholder, value)
        .on_input(move |v| Message::AuthFieldChanged(field, v))
        .padding(10)
        .into()
}

pub fn view(auth: &AuthScreen) -> Element<'_, Message> {
    let (title, subtitle) = match auth.mode {
        AuthMode::Login => ("Welcome Back", "Log in to continue monitoring"),
        AuthMode::Signup => ("Create Account", "Set up a patient or caregiver account"),
    };

    let role_selector = row![
        text("I am a").size(14),
        button(text("Patient").size(14))
            .on_press(Message::AuthRoleSelected(Role::Patient))
            .padding(10)
            .style(super::styles::nav_button_style(auth.role == Role::Patient)),
        button(text("Caregiver").size(14))
            .on_press(Message::AuthRoleSelected(Role::Caregiver))
            .padding(10)
            .style(super::styles::nav_button_style(auth.role == Role::Caregiver)),
    ]
    .spacing(10);

    let mut form = column![text(title).size(28), text(subtitle).size(14), role_selector]
        .spacing(12)
        .max_width(420);

    match auth.mode {
        AuthMode::Login => {
            form = form.push(field_input("Email", &auth.email, AuthField::Email));
        }
        AuthMode::Signup => {
            form = form
                .push(field_input("Full Name", &auth.name, AuthField::Name))
                .push(field_input("Email", &auth.email, AuthField::Email))
                .push(field_input("Phone Number", &auth.phone, AuthField::Phone));

            if auth.role == Role::Patient {
                form = form
                    .push(field_input("Age", &auth.age, AuthField::Age))
                    .push(field_input("Sex", &auth.sex, AuthField::Sex))
                    .push(field_input(
                        "Home Address",
                        &auth.home_address,
                        AuthField::HomeAddress,
                    ));
            }
        }
    }

    let submit_label = match auth.mode {
        AuthMode::Login => "Log In",
        AuthMode::Signup => "Sign Up",
    };
    let submit = button(text(if auth.busy { "Please wait..." } else { submit_label }))
        .on_press_maybe(if auth.busy {
            None
        } else {
            Some(Message::AuthSubmitted)
        })
        .padding(10)
        .width(Length::Fill)
        .style(super::styles::confirm_button_style());

    let toggle_label = match auth.mode {
        AuthMode::Login => "Need an account? Sign up",
        AuthMode::Signup => "Already registered? Log in",
    };
    let toggle = button(text(toggle_label).size(14))
        .on_press(Message::AuthModeToggled)
        .padding(6);

    form = form.push(submit).push(toggle);

    container(form)
        .width(Length::Fill)
        .height(Length::Fill)
        .center(Length::Fill)
        .into()
}
