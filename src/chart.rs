//! Vitals chart rendering
//!
//! Renders a materialized daily sequence as a four-panel PNG time series:
//! blood pressure (two series), weight, temperature, and pulse rate, sharing
//! a day-labeled x axis.

use chrono::NaiveDate;
use image::{DynamicImage, ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::config::DATE_FORMAT;
use crate::range::DailySlot;

/// Default chart dimensions in pixels.
pub const CHART_WIDTH: u32 = 1500;
pub const CHART_HEIGHT: u32 = 800;

const WEIGHT_COLOR: RGBColor = RGBColor(255, 165, 0);

/// Render the four-panel vitals chart as PNG bytes.
///
/// A single-slot sequence draws markers only; longer sequences draw line
/// series with point markers.
pub fn render_vitals_chart(
    slots: &[DailySlot],
    begin: NaiveDate,
    end: NaiveDate,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, String> {
    if slots.is_empty() {
        return Err("No data to chart".to_string());
    }

    let mut buffer = vec![0u8; (width * height * 3) as usize];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| e.to_string())?;

        let title = format!(
            "Vital signs from {} to {}.",
            begin.format(DATE_FORMAT),
            end.format(DATE_FORMAT)
        );
        let root = root
            .titled(&title, ("sans-serif", 24))
            .map_err(|e| e.to_string())?;

        let panels = root.split_evenly((4, 1));

        draw_bp_panel(&panels[0], slots)?;
        draw_value_panel(&panels[1], slots, |s| s.weight as f64, "Weight lbs", &WEIGHT_COLOR)?;
        draw_value_panel(&panels[2], slots, |s| s.temp, "Temperature F", &GREEN)?;
        draw_value_panel(&panels[3], slots, |s| s.pulse_rate as f64, "Pulse Rate", &RED)?;

        root.present().map_err(|e| e.to_string())?;
    }

    // Convert the RGB buffer to PNG
    let img = RgbImage::from_raw(width, height, buffer)
        .ok_or("Failed to create image from buffer")?;

    let mut png_bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut std::io::Cursor::new(&mut png_bytes), ImageFormat::Png)
        .map_err(|e| e.to_string())?;

    Ok(png_bytes)
}

/// Blood-pressure panel: systolic and diastolic series plus the legend.
fn draw_bp_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    slots: &[DailySlot],
) -> Result<(), String> {
    let systolic: Vec<(i32, f64)> = slots
        .iter()
        .enumerate()
        .map(|(i, s)| (i as i32, s.bp_sys as f64))
        .collect();
    let diastolic: Vec<(i32, f64)> = slots
        .iter()
        .enumerate()
        .map(|(i, s)| (i as i32, s.bp_dia as f64))
        .collect();

    let (y_min, y_max) = value_bounds(systolic.iter().chain(diastolic.iter()).map(|(_, y)| *y));

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(0..slots.len() as i32, y_min..y_max)
        .map_err(|e| e.to_string())?;

    chart
        .configure_mesh()
        .x_labels(slots.len().min(10))
        .x_label_formatter(&|x| date_label(slots, *x))
        .y_desc("Pressure")
        .draw()
        .map_err(|e| e.to_string())?;

    if slots.len() > 1 {
        chart
            .draw_series(LineSeries::new(systolic.clone(), RED.stroke_width(2)))
            .map_err(|e| e.to_string())?
            .label("Systolic")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

        chart
            .draw_series(LineSeries::new(diastolic.clone(), BLUE.stroke_width(2)))
            .map_err(|e| e.to_string())?
            .label("Diastolic")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(2)));

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(|e| e.to_string())?;
    }

    chart
        .draw_series(
            systolic
                .iter()
                .map(|(x, y)| Circle::new((*x, *y), 3, RED.filled())),
        )
        .map_err(|e| e.to_string())?;
    chart
        .draw_series(
            diastolic
                .iter()
                .map(|(x, y)| Circle::new((*x, *y), 3, BLUE.filled())),
        )
        .map_err(|e| e.to_string())?;

    Ok(())
}

/// Single-series panel for weight, temperature, or pulse.
fn draw_value_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    slots: &[DailySlot],
    value: impl Fn(&DailySlot) -> f64,
    label: &str,
    color: &RGBColor,
) -> Result<(), String> {
    let points: Vec<(i32, f64)> = slots
        .iter()
        .enumerate()
        .map(|(i, s)| (i as i32, value(s)))
        .collect();

    let (y_min, y_max) = value_bounds(points.iter().map(|(_, y)| *y));

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(0..slots.len() as i32, y_min..y_max)
        .map_err(|e| e.to_string())?;

    chart
        .configure_mesh()
        .x_labels(slots.len().min(10))
        .x_label_formatter(&|x| date_label(slots, *x))
        .y_desc(label)
        .draw()
        .map_err(|e| e.to_string())?;

    if points.len() > 1 {
        chart
            .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))
            .map_err(|e| e.to_string())?;
    }
    chart
        .draw_series(
            points
                .iter()
                .map(|(x, y)| Circle::new((*x, *y), 3, color.filled())),
        )
        .map_err(|e| e.to_string())?;

    Ok(())
}

fn date_label(slots: &[DailySlot], idx: i32) -> String {
    if idx >= 0 && (idx as usize) < slots.len() {
        slots[idx as usize].date_index.format("%m/%d").to_string()
    } else {
        String::new()
    }
}

fn value_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    (min - 10.0, max + 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(day: u32, bp_sys: i64) -> DailySlot {
        DailySlot {
            date_index: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            bp_sys,
            bp_dia: 80,
            pulse_rate: 70,
            weight: 180,
            temp: 98.6,
            notes: String::new(),
        }
    }

    #[test]
    fn test_empty_sequence_is_rejected() {
        let begin = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let result = render_vitals_chart(&[], begin, begin, 400, 300);
        assert!(result.is_err());
    }

    #[test]
    fn test_single_slot_renders_png() {
        let begin = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let png = render_vitals_chart(&[slot(1, 120)], begin, begin, 400, 300).unwrap();
        // PNG signature
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n']);
    }

    #[test]
    fn test_multi_slot_renders_png() {
        let begin = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
        let slots = vec![slot(1, 118), slot(2, 0), slot(3, 126)];
        let png = render_vitals_chart(&slots, begin, end, 400, 300).unwrap();
        assert!(!png.is_empty());
    }
}
