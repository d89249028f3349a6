//! Lays out a one-page report and writes its display list.
//!
//! Run with `RUST_LOG=debug cargo run --example report --features tracing`
//! to watch the layout decisions. Pass a path to choose where the dump goes.

use pagebox::{
    ChartConfig, Color, CommentsConfig, FontFamily, FontStyle, Gravity, GravitySet, GridMode,
    HorizontalLine, LabelFn, Legend, LineElement, LineStyle, NormalizedBox, PageId,
    RecordingSurface, Region, Series, SignatureConfig, Surface, TextConfig, TextStyle,
    VerticalLine, draw_regions,
};
use tracing_subscriber::EnvFilter;

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let page = PageId(1);
    let title = TextStyle::new(FontFamily::Helvetica, FontStyle::Bold, 16.0)?;
    let small = TextStyle::new(FontFamily::Helvetica, FontStyle::Italic, 8.0)?;

    let header = Region::new(NormalizedBox::new(0.0, 0.0, 1.0, 0.12)?, page)
        .with(TextConfig::new("Plant throughput", title).centered().build()?)
        .with(
            TextConfig::version("report ", 1, 4, 2, small)
                .gravity(GravitySet::BOTTOM | Gravity::Right)
                .build()?,
        )
        .with(LineElement::new(NormalizedBox::LINE_BOTTOM, LineStyle::DEFAULT));

    let weeks = ["W1", "W2", "W3", "W4", "W5", "W6", "W7", "W8"];
    let chart = ChartConfig::new()
        .series(Series::new(
            [12.0, 15.5, 14.0, 18.2, 21.0, 19.4, 23.8, 25.1],
            LineStyle::new(Color::BLUE, 1.5, 1.0)?,
        ))
        .series(Series::new(
            [10.0, 11.0, 13.5, 12.0, 16.0, 18.5, 17.0, 20.0],
            LineStyle::new(Color::TEAL, 1.0, 0.5)?,
        ))
        .axis_markers(6, 4)
        .axis_labels(
            LabelFn::new(move |i: usize| weeks.get(i).copied().unwrap_or("").to_string()),
            LabelFn::new(|v: f64| format!("{v:.0}t")),
        )
        .grid(LineStyle::new(Color::GREY, 0.5, 0.25)?, GridMode::AgainstMarkers { x: true, y: true })
        .background(Color::AMBER.with_alpha(40).over(Color::WHITE))
        .border(LineStyle::DEFAULT)
        .horizontal_fill(15.0, 20.0, Color::GREEN.with_alpha(60).over(Color::WHITE))
        .horizontal_line(HorizontalLine::new(22.0, "target", LineStyle::new(Color::RED, 1.0, 0.5)?))
        .vertical_line(VerticalLine::new(4, "audit", LineStyle::DEFAULT_DASHED))
        .legend(Legend::new("output", small.with_color(Color::BLUE), 0.15, 0.05))
        .legend(Legend::new("plan", small.with_color(Color::TEAL), 0.15, 0.1))
        .build()?;
    let body = Region::new(NormalizedBox::new(0.0, 0.14, 1.0, 0.72)?, page).with(chart);

    let footer = Region::new(NormalizedBox::new(0.0, 0.75, 1.0, 1.0)?, page)
        .with(SignatureConfig::new(0.35, "Plant manager").start_at(0.05, 0.3).build()?)
        .with(
            CommentsConfig::new(0.12)
                .title("Remarks", small)
                .line_width(0.5)
                .start_at(0.48, 0.05)
                .build()?,
        );

    let mut surface = RecordingSurface::new();
    draw_regions(&mut surface, &[header, body, footer])?;

    let destination = std::env::args()
        .nth(1)
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("pagebox-report.txt"));
    if !surface.finalize(&destination) {
        return Err(miette::miette!("could not write {}", destination.display()));
    }
    println!(
        "{} draw commands written to {}",
        surface.commands(page).len(),
        destination.display()
    );
    Ok(())
}
