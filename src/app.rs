//! # Application State Module
//!
//! The iced application: screen routing, message handling, and the dashboard
//! session controller. All UI state lives here and is mutated only inside
//! `update`; the monitor thread feeds readings in over an mpsc channel that
//! is drained on a periodic tick, mirroring how one-shot API results arrive
//! as messages from `Task::perform` futures.
//!
//! ## Session Controller
//! The dashboard's monitor lifecycle is {inactive, active}. Active is entered
//! only after the server acknowledges monitor init; stop (user action, logout
//! or navigation) sends a stop command and clears the flag. Updates drained
//! while inactive are discarded, which is what keeps a late poll result from
//! mutating the window after stop.

use crate::alerts::{breaches_thresholds, AlertSink, LogAlertSink};
use crate::api::ApiClient;
use crate::config::{Config, ThemePreference};
use crate::error::ApiError;
use crate::geo::{ConfigLocation, LocationSource};
use crate::model::{
    Identity, LoginResponse, MessageResponse, MonitorInitRequest, PatientRef, Profile, Role,
    SignupRequest, Summary, TriggerKind, UploadRequest, UploadResponse, VitalsReading,
};
use crate::monitor::{MonitorCommand, MonitorUpdate};
use crate::telemetry::TelemetryWindow;
use crate::ui;
use iced::widget::column;
use iced::{Element, Length, Subscription, Task, Theme};
use std::sync::mpsc::{Receiver, Sender};
use std::time::Duration;

/// How often the UI drains the monitor channel. Independent of the poll
/// interval; draining an empty channel is cheap.
const DRAIN_INTERVAL_MS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Name,
    Email,
    Phone,
    Age,
    Sex,
    HomeAddress,
}

/// Login/signup form state
pub struct AuthScreen {
    pub mode: AuthMode,
    pub role: Role,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub age: String,
    pub sex: String,
    pub home_address: String,
    pub busy: bool,
}

impl Default for AuthScreen {
    fn default() -> Self {
        Self {
            mode: AuthMode::Login,
            role: Role::Patient,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            age: String::new(),
            sex: String::new(),
            home_address: String::new(),
            busy: false,
        }
    }
}

/// Patient dashboard state: summary, telemetry window, monitor session flag
pub struct DashboardScreen {
    pub patient_id: String,
    pub summary: Option<Summary>,
    pub window: TelemetryWindow,
    pub monitor_active: bool,
}

impl DashboardScreen {
    pub fn new(patient_id: String, window_capacity: usize) -> Self {
        Self {
            patient_id,
            summary: None,
            window: TelemetryWindow::new(window_capacity),
            monitor_active: false,
        }
    }
}

/// Caregiver patient-list state
pub struct PatientsScreen {
    pub caregiver_id: String,
    pub patients: Vec<PatientRef>,
    pub link_code: String,
}

/// Profile viewer state
pub struct ProfileScreen {
    pub role: Role,
    pub id: String,
    pub profile: Option<Profile>,
}

pub enum Screen {
    Auth(AuthScreen),
    Dashboard(DashboardScreen),
    Patients(PatientsScreen),
    Profile(ProfileScreen),
}

// Iced Application State
pub struct NeuroGuardDesk {
    config: Config,
    client: ApiClient,
    location: ConfigLocation,
    alert_sink: Box<dyn AlertSink>,
    monitor_commands: Sender<MonitorCommand>,
    monitor_updates: Receiver<MonitorUpdate>,
    pub identity: Option<Identity>,
    pub screen: Screen,
    pub notice: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Message {
    Tick,
    NoticeDismissed,
    // auth
    AuthModeToggled,
    AuthRoleSelected(Role),
    AuthFieldChanged(AuthField, String),
    AuthSubmitted,
    SignupFinished(Result<MessageResponse, ApiError>),
    LoginFinished(Result<LoginResponse, ApiError>),
    // navigation
    DashboardOpened(String),
    PatientsOpened,
    ProfileOpened(Role, String),
    LoggedOut,
    // dashboard
    SummaryLoaded(Result<Summary, ApiError>),
    HistoryLoaded(Result<Vec<VitalsReading>, ApiError>),
    TriggerPressed(TriggerKind),
    TriggerUploaded(Result<UploadResponse, ApiError>),
    MonitorStartPressed,
    MonitorArmed(String, Result<MessageResponse, ApiError>),
    MonitorStopPressed,
    // patients
    PatientsLoaded(Result<Vec<PatientRef>, ApiError>),
    LinkCodeChanged(String),
    LinkSubmitted,
    LinkFinished(Result<MessageResponse, ApiError>),
    // profile
    ProfileLoaded(Result<Profile, ApiError>),
}

impl NeuroGuardDesk {
    pub fn new(
        config: Config,
        client: ApiClient,
        monitor_updates: Receiver<MonitorUpdate>,
        monitor_commands: Sender<MonitorCommand>,
    ) -> (Self, Task<Message>) {
        let location = ConfigLocation::from_config(&config);
        (
            NeuroGuardDesk {
                config,
                client,
                location,
                alert_sink: Box::new(LogAlertSink),
                monitor_commands,
                monitor_updates,
                identity: None,
                screen: Screen::Auth(AuthScreen::default()),
                notice: None,
            },
            Task::none(),
        )
    }

    pub fn theme(&self) -> Theme {
        match self.config.theme {
            ThemePreference::Light => Theme::Light,
            ThemePreference::Dark => Theme::Dark,
        }
    }

    fn dark(&self) -> bool {
        self.config.theme == ThemePreference::Dark
    }

    pub fn subscription(&self) -> Subscription<Message> {
        iced::time::every(Duration::from_millis(DRAIN_INTERVAL_MS)).map(|_| Message::Tick)
    }

    /// Apply one drained monitor update. Readings are merged only while the
    /// dashboard monitor is active; anything arriving after stop is dropped.
    fn apply_monitor_update(&mut self, update: MonitorUpdate) {
        match update {
            MonitorUpdate::Reading(reading) => {
                if let Screen::Dashboard(dashboard) = &mut self.screen {
                    if !dashboard.monitor_active {
                        return;
                    }
                    if dashboard.window.insert(reading.clone())
                        && breaches_thresholds(&reading)
                    {
                        self.alert_sink.threshold_exceeded(&reading);
                    }
                }
            }
            MonitorUpdate::Stopped => {
                log::debug!("monitor poll loop confirmed stopped");
            }
        }
    }

    /// Merge a reading produced outside the poll cycle (manual trigger
    /// upload). Applied immediately, whatever the monitor state.
    fn merge_manual_reading(&mut self, reading: VitalsReading) {
        if let Screen::Dashboard(dashboard) = &mut self.screen {
            if dashboard.window.insert(reading.clone()) && breaches_thresholds(&reading) {
                self.alert_sink.threshold_exceeded(&reading);
            }
        }
    }

    fn stop_monitor(&mut self) {
        if let Screen::Dashboard(dashboard) = &mut self.screen {
            if dashboard.monitor_active {
                dashboard.monitor_active = false;
                if self.monitor_commands.send(MonitorCommand::Stop).is_err() {
                    log::error!("monitor thread is gone; stop command dropped");
                }
            }
        }
    }

    fn open_dashboard(&mut self, patient_id: String) -> Task<Message> {
        self.stop_monitor();
        self.screen = Screen::Dashboard(DashboardScreen::new(
            patient_id.clone(),
            self.config.window_capacity,
        ));

        // Populate the initial view before any live data arrives.
        let summary_client = self.client.clone();
        let summary_id = patient_id.clone();
        let vitals_client = self.client.clone();
        Task::batch(vec![
            Task::perform(
                async move { summary_client.patient_summary(&summary_id).await },
                Message::SummaryLoaded,
            ),
            Task::perform(
                async move { vitals_client.patient_vitals(&patient_id).await },
                Message::HistoryLoaded,
            ),
        ])
    }

    fn open_patients(&mut self, caregiver_id: String) -> Task<Message> {
        self.stop_monitor();
        self.screen = Screen::Patients(PatientsScreen {
            caregiver_id: caregiver_id.clone(),
            patients: Vec::new(),
            link_code: String::new(),
        });

        let client = self.client.clone();
        Task::perform(
            async move { client.caregiver_patients(&caregiver_id).await },
            Message::PatientsLoaded,
        )
    }

    fn open_profile(&mut self, role: Role, id: String) -> Task<Message> {
        self.stop_monitor();
        self.screen = Screen::Profile(ProfileScreen {
            role,
            id: id.clone(),
            profile: None,
        });

        let client = self.client.clone();
        Task::perform(
            async move { client.profile(role, &id).await },
            Message::ProfileLoaded,
        )
    }

    fn submit_auth(&mut self) -> Task<Message> {
        let Screen::Auth(auth) = &mut self.screen else {
            return Task::none();
        };
        let role = auth.role;
        let client = self.client.clone();

        match auth.mode {
            AuthMode::Login => {
                auth.busy = true;
                let email = auth.email.trim().to_string();
                Task::perform(
                    async move { client.login(role, &email).await },
                    Message::LoginFinished,
                )
            }
            AuthMode::Signup => {
                let mut request = SignupRequest {
                    name: auth.name.trim().to_string(),
                    email: auth.email.trim().to_string(),
                    phone: auth.phone.trim().to_string(),
                    age: None,
                    sex: None,
                    home_address: None,
                    latitude: None,
                    longitude: None,
                    role: None,
                };

                // Patient signup carries demographics plus the device
                // location; caregiver signup is the bare form.
                if role == Role::Patient {
                    let point = match self.location.current_location() {
                        Ok(point) => point,
                        Err(e) => {
                            self.notice = Some(e.to_string());
                            return Task::none();
                        }
                    };
                    request.age = Some(auth.age.trim().to_string());
                    request.sex = Some(auth.sex.trim().to_string());
                    request.home_address = Some(auth.home_address.trim().to_string());
                    request.latitude = Some(point.latitude);
                    request.longitude = Some(point.longitude);
                    request.role = Some(role);
                }

                auth.busy = true;
                Task::perform(
                    async move { client.signup(role, &request).await },
                    Message::SignupFinished,
                )
            }
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => {
                // Process all pending monitor updates without blocking
                while let Ok(update) = self.monitor_updates.try_recv() {
                    self.apply_monitor_update(update);
                }
                Task::none()
            }
            Message::NoticeDismissed => {
                self.notice = None;
                Task::none()
            }
            Message::AuthModeToggled => {
                if let Screen::Auth(auth) = &mut self.screen {
                    auth.mode = match auth.mode {
                        AuthMode::Login => AuthMode::Signup,
                        AuthMode::Signup => AuthMode::Login,
                    };
                }
                Task::none()
            }
            Message::AuthRoleSelected(role) => {
                if let Screen::Auth(auth) = &mut self.screen {
                    auth.role = role;
                }
                Task::none()
            }
            Message::AuthFieldChanged(field, value) => {
                if let Screen::Auth(auth) = &mut self.screen {
                    match field {
                        AuthField::Name => auth.name = value,
                        AuthField::Email => auth.email = value,
                        AuthField::Phone => auth.phone = value,
                        AuthField::Age => auth.age = value,
                        AuthField::Sex => auth.sex = value,
                        AuthField::HomeAddress => auth.home_address = value,
                    }
                }
                Task::none()
            }
            Message::AuthSubmitted => self.submit_auth(),
            Message::SignupFinished(result) => {
                if let Screen::Auth(auth) = &mut self.screen {
                    auth.busy = false;
                    match result {
                        Ok(_) => {
                            auth.mode = AuthMode::Login;
                            self.notice = Some("Signup successful! Please log in.".to_string());
                        }
                        Err(e) => {
                            self.notice = Some(format!("Signup error: {}", e));
                        }
                    }
                }
                Task::none()
            }
            Message::LoginFinished(result) => {
                let Screen::Auth(auth) = &mut self.screen else {
                    return Task::none();
                };
                auth.busy = false;
                let role = auth.role;
                match result {
                    Ok(response) => match response.subject_id() {
                        Some(id) => {
                            self.identity = Some(Identity {
                                role,
                                id: id.clone(),
                                name: response.name.clone(),
                            });
                            match role {
                                Role::Patient => self.open_dashboard(id),
                                Role::Caregiver => self.open_patients(id),
                            }
                        }
                        None => {
                            self.notice =
                                Some("Login response carried no account id".to_string());
                            Task::none()
                        }
                    },
                    Err(e) => {
                        self.notice = Some(format!("Auth error: {}", e));
                        Task::none()
                    }
                }
            }
            Message::DashboardOpened(patient_id) => self.open_dashboard(patient_id),
            Message::PatientsOpened => match &self.identity {
                Some(identity) if identity.role == Role::Caregiver => {
                    let id = identity.id.clone();
                    self.open_patients(id)
                }
                _ => Task::none(),
            },
            Message::ProfileOpened(role, id) => self.open_profile(role, id),
            Message::LoggedOut => {
                self.stop_monitor();
                self.identity = None;
                self.screen = Screen::Auth(AuthScreen::default());
                Task::none()
            }
            Message::SummaryLoaded(result) => {
                match result {
                    Ok(summary) => {
                        if let Screen::Dashboard(dashboard) = &mut self.screen {
                            dashboard.summary = Some(summary);
                        }
                    }
                    Err(e) => log::error!("summary fetch failed: {}", e),
                }
                Task::none()
            }
            Message::HistoryLoaded(result) => {
                match result {
                    Ok(history) => {
                        if let Screen::Dashboard(dashboard) = &mut self.screen {
                            dashboard.window.seed(history);
                        }
                    }
                    Err(e) => log::error!("vitals history fetch failed: {}", e),
                }
                Task::none()
            }
            Message::TriggerPressed(kind) => {
                let Screen::Dashboard(dashboard) = &self.screen else {
                    return Task::none();
                };
                let point = match self.location.current_location() {
                    Ok(point) => point,
                    Err(e) => {
                        self.notice = Some(e.to_string());
                        return Task::none();
                    }
                };
                let request = UploadRequest::new(dashboard.patient_id.clone(), kind, point);
                let client = self.client.clone();
                Task::perform(
                    async move { client.upload_vitals(&request).await },
                    Message::TriggerUploaded,
                )
            }
            Message::TriggerUploaded(result) => match result {
                Ok(response) => {
                    self.merge_manual_reading(response.vitals);
                    self.notice = Some("Vitals sent!".to_string());

                    // The stored reading changes the aggregate; refetch it.
                    if let Screen::Dashboard(dashboard) = &self.screen {
                        let client = self.client.clone();
                        let id = dashboard.patient_id.clone();
                        return Task::perform(
                            async move { client.patient_summary(&id).await },
                            Message::SummaryLoaded,
                        );
                    }
                    Task::none()
                }
                Err(e) => {
                    self.notice = Some(format!("Upload failed: {}", e));
                    Task::none()
                }
            },
            Message::MonitorStartPressed => {
                let Screen::Dashboard(dashboard) = &self.screen else {
                    return Task::none();
                };
                if dashboard.monitor_active {
                    // Session guard: one active poller per session.
                    return Task::none();
                }
                let point = match self.location.current_location() {
                    Ok(point) => point,
                    Err(e) => {
                        self.notice = Some(e.to_string());
                        return Task::none();
                    }
                };
                let patient_id = dashboard.patient_id.clone();
                let request = MonitorInitRequest {
                    patient_id: patient_id.clone(),
                    latitude: point.latitude,
                    longitude: point.longitude,
                };
                let client = self.client.clone();
                Task::perform(
                    async move { client.monitor_init(&request).await },
                    move |result| Message::MonitorArmed(patient_id.clone(), result),
                )
            }
            Message::MonitorArmed(patient_id, result) => {
                match result {
                    Ok(_) => {
                        if let Screen::Dashboard(dashboard) = &mut self.screen {
                            // The ack is only valid for the dashboard that
                            // requested it; a navigation in between makes it
                            // stale, same as a late poll result.
                            if dashboard.patient_id != patient_id {
                                log::debug!(
                                    "monitor ack for {} discarded; dashboard moved on",
                                    patient_id
                                );
                                return Task::none();
                            }
                            dashboard.monitor_active = true;
                            let command = MonitorCommand::Start {
                                interval: self.config.poll_interval(),
                            };
                            if self.monitor_commands.send(command).is_err() {
                                dashboard.monitor_active = false;
                                self.notice =
                                    Some("Monitor thread unavailable".to_string());
                            } else {
                                self.notice = Some(
                                    "Monitor initialized! Hardware can now send vitals."
                                        .to_string(),
                                );
                            }
                        }
                    }
                    Err(e) => {
                        self.notice = Some(format!("Monitor init failed: {}", e));
                    }
                }
                Task::none()
            }
            Message::MonitorStopPressed => {
                self.stop_monitor();
                Task::none()
            }
            Message::PatientsLoaded(result) => {
                match result {
                    Ok(patients) => {
                        if let Screen::Patients(screen) = &mut self.screen {
                            screen.patients = patients;
                        }
                    }
                    Err(e) => {
                        self.notice = Some(format!("Could not load patients: {}", e));
                    }
                }
                Task::none()
            }
            Message::LinkCodeChanged(code) => {
                if let Screen::Patients(screen) = &mut self.screen {
                    screen.link_code = code;
                }
                Task::none()
            }
            Message::LinkSubmitted => {
                let Screen::Patients(screen) = &self.screen else {
                    return Task::none();
                };
                let client = self.client.clone();
                let caregiver_id = screen.caregiver_id.clone();
                let code = screen.link_code.trim().to_string();
                Task::perform(
                    async move { client.link_patient(&caregiver_id, &code).await },
                    Message::LinkFinished,
                )
            }
            Message::LinkFinished(result) => match result {
                Ok(response) => {
                    self.notice =
                        Some(response.message.unwrap_or_else(|| "Patient linked".to_string()));
                    // Refresh the list after linking.
                    if let Screen::Patients(screen) = &mut self.screen {
                        screen.link_code.clear();
                        let client = self.client.clone();
                        let caregiver_id = screen.caregiver_id.clone();
                        return Task::perform(
                            async move { client.caregiver_patients(&caregiver_id).await },
                            Message::PatientsLoaded,
                        );
                    }
                    Task::none()
                }
                Err(e) => {
                    self.notice = Some(format!("Failed to link: {}", e));
                    Task::none()
                }
            },
            Message::ProfileLoaded(result) => {
                match result {
                    Ok(profile) => {
                        if let Screen::Profile(screen) = &mut self.screen {
                            screen.profile = Some(profile);
                        }
                    }
                    Err(e) => {
                        self.notice = Some(format!("Could not load profile: {}", e));
                    }
                }
                Task::none()
            }
        }
    }

    pub fn view(&'_ self) -> Element<'_, Message> {
        let body = match &self.screen {
            Screen::Auth(auth) => ui::auth::view(auth),
            Screen::Dashboard(dashboard) => {
                ui::dashboard::view(dashboard, self.identity.as_ref(), self.dark())
            }
            Screen::Patients(patients) => ui::patients::view(patients, self.identity.as_ref()),
            Screen::Profile(profile) => ui::profile::view(profile, self.identity.as_ref()),
        };

        let mut content = column![].width(Length::Fill).height(Length::Fill);
        if let Some(notice) = &self.notice {
            content = content.push(ui::notice_banner(notice));
        }
        content.push(body).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::sync::mpsc;

    fn reading(id: &str, heart_rate: i32) -> VitalsReading {
        VitalsReading {
            id: id.to_string(),
            heart_rate,
            spo2: 98.0,
            temperature: 36.7,
            accel_x: 0.0,
            accel_y: 0.0,
            accel_z: 0.0,
            gyro_x: 0.0,
            gyro_y: 0.0,
            gyro_z: 0.0,
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap(),
            prediction: None,
        }
    }

    fn test_app() -> (NeuroGuardDesk, mpsc::Sender<MonitorUpdate>) {
        let client = ApiClient::new("http://localhost:3000").expect("client");
        let (update_sender, update_receiver) = mpsc::channel();
        let (command_sender, _command_receiver) = mpsc::channel();
        let (app, _task) =
            NeuroGuardDesk::new(Config::default(), client, update_receiver, command_sender);
        (app, update_sender)
    }

    fn with_dashboard(app: &mut NeuroGuardDesk, monitor_active: bool) {
        let mut dashboard = DashboardScreen::new("p1".to_string(), 3);
        dashboard.monitor_active = monitor_active;
        app.screen = Screen::Dashboard(dashboard);
    }

    fn window_ids(app: &NeuroGuardDesk) -> Vec<String> {
        match &app.screen {
            Screen::Dashboard(d) => d.window.iter().map(|r| r.id.clone()).collect(),
            _ => panic!("not on dashboard"),
        }
    }

    #[test]
    fn test_active_session_merges_readings() {
        let (mut app, _sender) = test_app();
        with_dashboard(&mut app, true);

        app.apply_monitor_update(MonitorUpdate::Reading(reading("A", 80)));
        app.apply_monitor_update(MonitorUpdate::Reading(reading("B", 82)));

        assert_eq!(window_ids(&app), vec!["A", "B"]);
    }

    #[test]
    fn test_duplicate_reading_merged_once() {
        let (mut app, _sender) = test_app();
        with_dashboard(&mut app, true);

        app.apply_monitor_update(MonitorUpdate::Reading(reading("A", 80)));
        app.apply_monitor_update(MonitorUpdate::Reading(reading("A", 80)));

        assert_eq!(window_ids(&app), vec!["A"]);
    }

    #[test]
    fn test_update_after_stop_does_not_mutate_window() {
        let (mut app, _sender) = test_app();
        with_dashboard(&mut app, true);
        app.apply_monitor_update(MonitorUpdate::Reading(reading("A", 80)));

        // user stops the session, then a late poll result is drained
        if let Screen::Dashboard(d) = &mut app.screen {
            d.monitor_active = false;
        }
        app.apply_monitor_update(MonitorUpdate::Reading(reading("B", 82)));

        assert_eq!(window_ids(&app), vec!["A"]);
    }

    #[test]
    fn test_window_capacity_enforced_through_session() {
        let (mut app, _sender) = test_app();
        with_dashboard(&mut app, true);

        for id in ["A", "B", "C", "D"] {
            app.apply_monitor_update(MonitorUpdate::Reading(reading(id, 80)));
        }

        assert_eq!(window_ids(&app), vec!["B", "C", "D"]);
    }

    #[test]
    fn test_tick_drains_channel_into_window() {
        let (mut app, sender) = test_app();
        with_dashboard(&mut app, true);

        sender
            .send(MonitorUpdate::Reading(reading("A", 80)))
            .expect("send");
        sender
            .send(MonitorUpdate::Reading(reading("B", 82)))
            .expect("send");
        let _ = app.update(Message::Tick);

        assert_eq!(window_ids(&app), vec!["A", "B"]);
    }

    #[test]
    fn test_manual_upload_merges_while_monitor_inactive() {
        let (mut app, _sender) = test_app();
        with_dashboard(&mut app, false);

        app.merge_manual_reading(reading("M", 132));

        // merged immediately, and at the head of the displayed history
        match &app.screen {
            Screen::Dashboard(d) => {
                assert_eq!(
                    d.window.newest_first().next().map(|r| r.id.as_str()),
                    Some("M")
                );
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_stale_monitor_ack_for_another_patient_is_discarded() {
        let (mut app, _sender) = test_app();
        // the user armed p1's dashboard, then navigated to p2 before the
        // server acknowledged
        app.screen = Screen::Dashboard(DashboardScreen::new("p2".to_string(), 3));

        let _ = app.update(Message::MonitorArmed(
            "p1".to_string(),
            Ok(MessageResponse { message: None }),
        ));

        match &app.screen {
            Screen::Dashboard(d) => assert!(!d.monitor_active),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_matching_monitor_ack_activates_session() {
        let client = ApiClient::new("http://localhost:3000").expect("client");
        let (_update_sender, update_receiver) = mpsc::channel();
        let (command_sender, command_receiver) = mpsc::channel();
        let (mut app, _task) =
            NeuroGuardDesk::new(Config::default(), client, update_receiver, command_sender);
        with_dashboard(&mut app, false);

        let _ = app.update(Message::MonitorArmed(
            "p1".to_string(),
            Ok(MessageResponse { message: None }),
        ));

        match &app.screen {
            Screen::Dashboard(d) => assert!(d.monitor_active),
            _ => unreachable!(),
        }
        assert!(matches!(
            command_receiver.try_recv(),
            Ok(MonitorCommand::Start { .. })
        ));
    }

    #[test]
    fn test_stop_monitor_sends_command_and_clears_flag() {
        let client = ApiClient::new("http://localhost:3000").expect("client");
        let (_update_sender, update_receiver) = mpsc::channel();
        let (command_sender, command_receiver) = mpsc::channel();
        let (mut app, _task) =
            NeuroGuardDesk::new(Config::default(), client, update_receiver, command_sender);
        with_dashboard(&mut app, true);

        app.stop_monitor();

        match &app.screen {
            Screen::Dashboard(d) => assert!(!d.monitor_active),
            _ => unreachable!(),
        }
        assert!(matches!(
            command_receiver.try_recv(),
            Ok(MonitorCommand::Stop)
        ));
    }

    #[test]
    fn test_logout_returns_to_auth() {
        let (mut app, _sender) = test_app();
        with_dashboard(&mut app, false);
        app.identity = Some(Identity {
            role: Role::Patient,
            id: "p1".to_string(),
            name: None,
        });

        let _ = app.update(Message::LoggedOut);

        assert!(app.identity.is_none());
        assert!(matches!(app.screen, Screen::Auth(_)));
    }
}
