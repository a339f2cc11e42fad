//! Patient dashboard: trigger buttons, monitor control, health summary,
//! latest-readings table and the live charts over the telemetry window.

use crate::app::{DashboardScreen, Message};
use crate::charts::{
    AccelChartType, GyroChartType, HrChartType, OxygenChartType, TemperatureChartType,
};
use crate::model::{Identity, TriggerKind};
use iced::widget::{button, column, container, row, scrollable, text};
use iced::{Element, Length};
use plotters_iced::ChartWidget;

const TABLE_ROWS: usize = 5;

fn trigger_button(kind: TriggerKind) -> Element<'static, Message> {
    button(text(kind.label()).size(14))
        .on_press(Message::TriggerPressed(kind))
        .padding(10)
        .style(super::styles::trigger_button_style(kind))
        .into()
}

fn quick_actions(dashboard: &DashboardScreen) -> Element<'_, Message> {
    let monitor_button = if dashboard.monitor_active {
        button(text("Stop Monitoring").size(14))
            .on_press(Message::MonitorStopPressed)
            .padding(10)
            .style(super::styles::stop_button_style())
    } else {
        button(text("Monitor (ESP32)").size(14))
            .on_press(Message::MonitorStartPressed)
            .padding(10)
            .style(super::styles::start_button_style())
    };

    row![
        trigger_button(TriggerKind::Normal),
        trigger_button(TriggerKind::Panic),
        trigger_button(TriggerKind::Seizure),
        monitor_button,
    ]
    .spacing(10)
    .into()
}

fn summary_widget(dashboard: &DashboardScreen) -> Element<'_, Message> {
    let Some(summary) = &dashboard.summary else {
        return text("Loading summary...").size(14).into();
    };

    let name = summary
        .patient_details
        .as_ref()
        .and_then(|p| p.name.as_deref())
        .unwrap_or("Patient");

    let last_hr = summary
        .last_reading()
        .map(|r| r.heart_rate.to_string())
        .unwrap_or_else(|| "-".to_string());
    let avg_hr = summary
        .average_heart_rate()
        .map(|hr| format!("{:.1}", hr))
        .unwrap_or_else(|| "-".to_string());

    let cell = |label: &'static str, value: String| {
        container(
            column![text(label).size(12), text(value).size(26)].spacing(4),
        )
        .style(container::bordered_box)
        .padding(12)
        .width(Length::Fill)
    };

    column![
        text(name.to_string()).size(20),
        row![
            cell("Last Heart Rate (bpm)", last_hr),
            cell("Average Heart Rate (bpm)", avg_hr),
            cell("Total Alerts", summary.all_alerts.len().to_string()),
            cell("Records", summary.all_vitals.len().to_string()),
        ]
        .spacing(10),
    ]
    .spacing(10)
    .into()
}

fn readings_table(dashboard: &DashboardScreen) -> Element<'_, Message> {
    let header = row![
        text("Time").size(13).width(Length::FillPortion(2)),
        text("HR").size(13).width(Length::FillPortion(1)),
        text("SpO2").size(13).width(Length::FillPortion(1)),
        text("Temp").size(13).width(Length::FillPortion(1)),
        text("Prediction").size(13).width(Length::FillPortion(2)),
    ]
    .spacing(8);

    let mut table = column![text("Latest Readings").size(16), header].spacing(6);

    if dashboard.window.is_empty() {
        table = table.push(text("No readings yet").size(13));
    } else {
        for reading in dashboard.window.newest_first().take(TABLE_ROWS) {
            table = table.push(
                row![
                    text(reading.timestamp.format("%b %d %H:%M:%S").to_string())
                        .size(13)
                        .width(Length::FillPortion(2)),
                    text(reading.heart_rate.to_string())
                        .size(13)
                        .width(Length::FillPortion(1)),
                    text(format!("{:.0}%", reading.spo2))
                        .size(13)
                        .width(Length::FillPortion(1)),
                    text(format!("{:.1}C", reading.temperature))
                        .size(13)
                        .width(Length::FillPortion(1)),
                    text(reading.prediction.clone().unwrap_or_else(|| "-".to_string()))
                        .size(13)
                        .width(Length::FillPortion(2)),
                ]
                .spacing(8),
            );
        }
    }

    container(table)
        .style(container::bordered_box)
        .padding(12)
        .width(Length::Fill)
        .into()
}

fn chart_stack(dashboard: &DashboardScreen, dark: bool) -> Element<'_, Message> {
    let window = &dashboard.window;

    let hr_chart = ChartWidget::new(HrChartType { window, dark })
        .width(Length::Fill)
        .height(Length::Fixed(180.0));
    let spo2_chart = ChartWidget::new(OxygenChartType { window, dark })
        .width(Length::Fill)
        .height(Length::Fixed(180.0));
    let temp_chart = ChartWidget::new(TemperatureChartType { window, dark })
        .width(Length::Fill)
        .height(Length::Fixed(180.0));
    let accel_chart = ChartWidget::new(AccelChartType { window, dark })
        .width(Length::Fill)
        .height(Length::Fixed(180.0));
    let gyro_chart = ChartWidget::new(GyroChartType { window, dark })
        .width(Length::Fill)
        .height(Length::Fixed(180.0));

    column![hr_chart, spo2_chart, temp_chart, accel_chart, gyro_chart]
        .spacing(10)
        .into()
}

pub fn view<'a>(
    dashboard: &'a DashboardScreen,
    viewer: Option<&'a Identity>,
    dark: bool,
) -> Element<'a, Message> {
    let monitor_state = if dashboard.monitor_active {
        "Live monitoring active"
    } else {
        "Monitoring inactive"
    };

    let main = column![
        text("Patient Dashboard").size(24),
        text(format!(
            "Real-time monitoring and health insights - {}",
            monitor_state
        ))
        .size(14),
        quick_actions(dashboard),
        summary_widget(dashboard),
        readings_table(dashboard),
        chart_stack(dashboard, dark),
    ]
    .spacing(16)
    .padding(20)
    .width(Length::Fill);

    row![
        super::sidebar(viewer, "Dashboard"),
        scrollable(main).width(Length::Fill).height(Length::Fill),
    ]
    .into()
}
