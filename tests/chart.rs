//! Chart axis windows and layout through the public API.

mod common;

use common::{kinds, surface};
use pagebox::surface::DrawCommand;
use pagebox::{
    AxisLimits, ChartConfig, Color, FontFamily, FontStyle, HorizontalLine, LabelFn, Legend,
    LineStyle, PageId, Region, Series, TextStyle, ValidationError,
};

const RED: LineStyle = LineStyle::solid(Color::RED);
const BLUE: LineStyle = LineStyle::solid(Color::BLUE);

#[test]
fn automatic_limits_span_all_series() {
    let chart = ChartConfig::new()
        .series(Series::new([1.0, 3.0, 2.0], RED))
        .series(Series::new([0.0, 5.0, 1.0], BLUE))
        .build()
        .unwrap();
    assert_eq!(chart.y_limits(), (0.0, 5.0));
    assert_eq!(chart.x_limits(), (0, 3));
}

#[test]
fn x_window_selects_samples() {
    let chart = ChartConfig::new()
        .series(Series::new([5.0, 6.0, 7.0, 8.0, 9.0], RED))
        .series(Series::new([1.0, 2.0, 3.0], BLUE))
        .axis_limits(AxisLimits {
            x: Some((2, 4)),
            y: None,
        })
        .build()
        .unwrap();
    assert_eq!(chart.series()[0].values, vec![7.0, 8.0]);
    assert_eq!(chart.series()[1].values, vec![3.0]);
}

#[test]
fn single_sample_series_is_rejected() {
    let err = ChartConfig::new()
        .series(Series::new([1.0], RED))
        .build()
        .unwrap_err();
    assert_eq!(err, ValidationError::TooFewSamples { series: 0, len: 1 });
}

#[test]
fn segments_follow_the_series() {
    let mut s = surface(100.0, 100.0);
    let chart = ChartConfig::new()
        .series(Series::new([1.0, 2.0, 3.0], RED))
        .build()
        .unwrap();
    Region::full_page(PageId(1)).with(chart).draw(&mut s).unwrap();

    let xs: Vec<(f64, f64)> = s
        .commands(PageId(1))
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Line { from, to, .. } => Some((from.x, to.x)),
            _ => None,
        })
        .collect();
    assert_eq!(xs, vec![(0.5, 50.0), (50.0, 99.5)]);

    // Rising values climb the page.
    let ys: Vec<f64> = s
        .commands(PageId(1))
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Line { to, .. } => Some(to.y),
            _ => None,
        })
        .collect();
    assert!(ys[0] > ys[1], "{ys:?}");
}

#[test]
fn reference_line_outside_limits_is_not_drawn() {
    let mut s = surface(100.0, 100.0);
    let chart = ChartConfig::new()
        .series(Series::new([1.0, 2.0], RED))
        .axis_limits(AxisLimits {
            x: None,
            y: Some((0.0, 5.0)),
        })
        .horizontal_line(HorizontalLine::new(10.0, "max", BLUE))
        .horizontal_line(HorizontalLine::new(2.5, "mid", BLUE))
        .build()
        .unwrap();
    Region::full_page(PageId(1)).with(chart).draw(&mut s).unwrap();

    let labels: Vec<&str> = s
        .commands(PageId(1))
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(labels, vec!["mid"]);
    let blue_lines = s
        .commands(PageId(1))
        .iter()
        .filter(|c| matches!(c, DrawCommand::Line { color, .. } if *color == Color::BLUE))
        .count();
    assert_eq!(blue_lines, 1);
}

#[test]
fn custom_labels_are_used() {
    let mut s = surface(300.0, 200.0);
    let months = ["Jan", "Feb", "Mar", "Apr", "May"];
    let chart = ChartConfig::new()
        .series(Series::new([3.0, 1.0, 4.0, 1.0, 5.0], RED))
        .axis_markers(3, 1)
        .axis_labels(
            LabelFn::new(move |i: usize| months[i % months.len()].to_string()),
            LabelFn::new(|v: f64| format!("{v:.0}%")),
        )
        .build()
        .unwrap();
    Region::full_page(PageId(1)).with(chart).draw(&mut s).unwrap();

    let labels: Vec<&str> = s
        .commands(PageId(1))
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(labels, vec!["Feb", "Mar", "Apr", "3%"]);
}

#[test]
fn overflowing_legend_is_skipped() {
    let mut s = surface(100.0, 100.0);
    let huge = TextStyle::new(FontFamily::Arial, FontStyle::Regular, 40.0).unwrap();
    let small = TextStyle::new(FontFamily::Arial, FontStyle::Italic, 6.0).unwrap();
    let chart = ChartConfig::new()
        .series(Series::new([1.0, 2.0], RED))
        .legend(Legend::new("skipped", huge, 0.0, 0.9))
        .legend(Legend::new("kept", small, 0.5, 0.0))
        .border(LineStyle::DEFAULT)
        .build()
        .unwrap();
    Region::full_page(PageId(1)).with(chart).draw(&mut s).unwrap();
    insta::assert_debug_snapshot!(kinds(&s, PageId(1)), @r#"
    [
        "line",
        "text",
        "stroke",
    ]
    "#);
}
