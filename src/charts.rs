use crate::app::Message;
use crate::telemetry::{SampleSliceExt, TelemetryWindow};
use plotters::chart::ChartBuilder;
use plotters::series::LineSeries;
use plotters::style::{BLUE, CYAN, GREEN, MAGENTA, RED, RGBColor};
use plotters_iced::{Chart, DrawingBackend};

// Chart backgrounds per theme; the preference is injected, never read from
// ambient state.
fn plot_background(dark: bool) -> RGBColor {
    if dark {
        RGBColor(30, 32, 38)
    } else {
        RGBColor(245, 245, 240)
    }
}

fn axis_color(dark: bool) -> RGBColor {
    if dark {
        RGBColor(190, 190, 190)
    } else {
        RGBColor(60, 60, 60)
    }
}

// Chart types
pub struct HrChartType<'a> {
    pub window: &'a TelemetryWindow,
    pub dark: bool,
}

pub struct OxygenChartType<'a> {
    pub window: &'a TelemetryWindow,
    pub dark: bool,
}

pub struct TemperatureChartType<'a> {
    pub window: &'a TelemetryWindow,
    pub dark: bool,
}

pub struct AccelChartType<'a> {
    pub window: &'a TelemetryWindow,
    pub dark: bool,
}

pub struct GyroChartType<'a> {
    pub window: &'a TelemetryWindow,
    pub dark: bool,
}

// Ranges built from data need a non-zero span or plotters draws nothing
fn pad_time(min: i64, max: i64) -> (i64, i64) {
    if min == max {
        (min, max + 1)
    } else {
        (min, max)
    }
}

fn pad_value(min: f64, max: f64) -> (f64, f64) {
    if (max - min).abs() < f64::EPSILON {
        (min - 1.0, max + 1.0)
    } else {
        (min, max)
    }
}

// Heart Rate Chart
impl<'a> Chart<Message> for HrChartType<'a> {
    type State = ();

    fn build_chart<DB: DrawingBackend>(&self, _state: &Self::State, mut builder: ChartBuilder<DB>) {
        let samples = self.window.samples(|r| r.heart_rate as f64);
        let (min_time, max_time) = (&samples[..]).min_max_time().unwrap_or((0, 1));
        let (min_time, max_time) = pad_time(min_time, max_time);

        let mut chart = builder
            .margin(15)
            .caption("Heart Rate (bpm)", ("sans-serif", 20))
            .x_label_area_size(0)
            .y_label_area_size(30)
            .build_cartesian_2d(min_time..max_time, 40.0..170.0)
            .expect("Failed to build chart");

        chart
            .plotting_area()
            .fill(&plot_background(self.dark))
            .expect("Failed to fill background");

        chart
            .configure_mesh()
            .axis_style(axis_color(self.dark))
            .draw()
            .expect("Failed to draw mesh");

        chart
            .draw_series(LineSeries::new(
                samples.iter().map(|s| (s.time, s.value)),
                &RED,
            ))
            .expect("Failed to draw series");
    }
}

// SpO2 Chart
impl<'a> Chart<Message> for OxygenChartType<'a> {
    type State = ();

    fn build_chart<DB: DrawingBackend>(&self, _state: &Self::State, mut builder: ChartBuilder<DB>) {
        let samples = self.window.samples(|r| r.spo2);
        let (min_time, max_time) = (&samples[..]).min_max_time().unwrap_or((0, 1));
        let (min_time, max_time) = pad_time(min_time, max_time);

        let mut chart = builder
            .margin(15)
            .caption("SpO2 (%)", ("sans-serif", 20))
            .x_label_area_size(0)
            .y_label_area_size(30)
            .build_cartesian_2d(min_time..max_time, 80.0..100.0)
            .expect("Failed to build chart");

        chart
            .plotting_area()
            .fill(&plot_background(self.dark))
            .expect("Failed to fill background");

        chart
            .configure_mesh()
            .axis_style(axis_color(self.dark))
            .draw()
            .expect("Failed to draw mesh");

        chart
            .draw_series(LineSeries::new(
                samples.iter().map(|s| (s.time, s.value)),
                &BLUE,
            ))
            .expect("Failed to draw series");
    }
}

// Temperature Chart
impl<'a> Chart<Message> for TemperatureChartType<'a> {
    type State = ();

    fn build_chart<DB: DrawingBackend>(&self, _state: &Self::State, mut builder: ChartBuilder<DB>) {
        let samples = self.window.samples(|r| r.temperature);
        let (min_time, max_time) = (&samples[..]).min_max_time().unwrap_or((0, 1));
        let (min_time, max_time) = pad_time(min_time, max_time);
        let (min_temp, max_temp) = (&samples[..]).min_max_value().unwrap_or((35.0, 40.0));
        let (min_temp, max_temp) = pad_value(min_temp, max_temp);

        let mut chart = builder
            .margin(15)
            .caption("Temperature (C)", ("sans-serif", 20))
            .x_label_area_size(0)
            .y_label_area_size(30)
            .build_cartesian_2d(min_time..max_time, min_temp..max_temp)
            .expect("Failed to build chart");

        chart
            .plotting_area()
            .fill(&plot_background(self.dark))
            .expect("Failed to fill background");

        chart
            .configure_mesh()
            .axis_style(axis_color(self.dark))
            .draw()
            .expect("Failed to draw mesh");

        chart
            .draw_series(LineSeries::new(
                samples.iter().map(|s| (s.time, s.value)),
                &MAGENTA,
            ))
            .expect("Failed to draw series");
    }
}

// Acceleration Chart (three axes on shared bounds)
impl<'a> Chart<Message> for AccelChartType<'a> {
    type State = ();

    fn build_chart<DB: DrawingBackend>(&self, _state: &Self::State, mut builder: ChartBuilder<DB>) {
        let x_samples = self.window.samples(|r| r.accel_x);
        let y_samples = self.window.samples(|r| r.accel_y);
        let z_samples = self.window.samples(|r| r.accel_z);

        let (min_time, max_time) = (&x_samples[..]).min_max_time().unwrap_or((0, 1));
        let (min_time, max_time) = pad_time(min_time, max_time);

        let (min_x, max_x) = (&x_samples[..]).min_max_value().unwrap_or((0.0, 1.0));
        let (min_y, max_y) = (&y_samples[..]).min_max_value().unwrap_or((0.0, 1.0));
        let (min_z, max_z) = (&z_samples[..]).min_max_value().unwrap_or((0.0, 1.0));

        let total_min = min_x.min(min_y).min(min_z);
        let total_max = max_x.max(max_y).max(max_z);
        let (total_min, total_max) = pad_value(total_min, total_max);

        let mut chart = builder
            .margin(15)
            .caption("Acceleration", ("sans-serif", 20))
            .x_label_area_size(0)
            .y_label_area_size(30)
            .build_cartesian_2d(min_time..max_time, total_min..total_max)
            .expect("Failed to build chart");

        chart
            .plotting_area()
            .fill(&plot_background(self.dark))
            .expect("Failed to fill background");

        chart
            .configure_mesh()
            .axis_style(axis_color(self.dark))
            .draw()
            .expect("Failed to draw mesh");

        chart
            .draw_series(LineSeries::new(
                x_samples.iter().map(|s| (s.time, s.value)),
                &GREEN,
            ))
            .expect("Failed to draw X series");

        chart
            .draw_series(LineSeries::new(
                y_samples.iter().map(|s| (s.time, s.value)),
                &MAGENTA,
            ))
            .expect("Failed to draw Y series");

        chart
            .draw_series(LineSeries::new(
                z_samples.iter().map(|s| (s.time, s.value)),
                &CYAN,
            ))
            .expect("Failed to draw Z series");
    }
}

// Angular Velocity Chart (three axes on shared bounds)
impl<'a> Chart<Message> for GyroChartType<'a> {
    type State = ();

    fn build_chart<DB: DrawingBackend>(&self, _state: &Self::State, mut builder: ChartBuilder<DB>) {
        let x_samples = self.window.samples(|r| r.gyro_x);
        let y_samples = self.window.samples(|r| r.gyro_y);
        let z_samples = self.window.samples(|r| r.gyro_z);

        let (min_time, max_time) = (&x_samples[..]).min_max_time().unwrap_or((0, 1));
        let (min_time, max_time) = pad_time(min_time, max_time);

        let (min_x, max_x) = (&x_samples[..]).min_max_value().unwrap_or((0.0, 1.0));
        let (min_y, max_y) = (&y_samples[..]).min_max_value().unwrap_or((0.0, 1.0));
        let (min_z, max_z) = (&z_samples[..]).min_max_value().unwrap_or((0.0, 1.0));

        let total_min = min_x.min(min_y).min(min_z);
        let total_max = max_x.max(max_y).max(max_z);
        let (total_min, total_max) = pad_value(total_min, total_max);

        let mut chart = builder
            .margin(15)
            .caption("Angular Velocity", ("sans-serif", 20))
            .x_label_area_size(0)
            .y_label_area_size(30)
            .build_cartesian_2d(min_time..max_time, total_min..total_max)
            .expect("Failed to build chart");

        chart
            .plotting_area()
            .fill(&plot_background(self.dark))
            .expect("Failed to fill background");

        chart
            .configure_mesh()
            .axis_style(axis_color(self.dark))
            .draw()
            .expect("Failed to draw mesh");

        chart
            .draw_series(LineSeries::new(
                x_samples.iter().map(|s| (s.time, s.value)),
                &GREEN,
            ))
            .expect("Failed to draw X series");

        chart
            .draw_series(LineSeries::new(
                y_samples.iter().map(|s| (s.time, s.value)),
                &MAGENTA,
            ))
            .expect("Failed to draw Y series");

        chart
            .draw_series(LineSeries::new(
                z_samples.iter().map(|s| (s.time, s.value)),
                &CYAN,
            ))
            .expect("Failed to draw Z series");
    }
}
