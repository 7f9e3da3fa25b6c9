//! SVG renderers for the two experiment charts.
//!
//! Both renderers are pure functions of the dataset: the same rows always
//! produce byte-identical SVG.

use chartlab_core::model::{ChartVariant, Dataset, Pclass, Sex, SurvivalTable};
use std::ops::Range;

use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::error::ChartError;

const FONT: &str = "sans-serif";
const BARS_SIZE: (u32, u32) = (800, 480);
const HEATMAP_SIZE: (u32, u32) = (720, 540);
const COLORBAR_WIDTH: u32 = 130;
#[allow(clippy::cast_possible_wrap)]
const HEATMAP_SPLIT: i32 = (HEATMAP_SIZE.0 - COLORBAR_WIDTH) as i32;
const COLORBAR_STEPS: usize = 64;

// Set2 palette, one colour per sex.
const FEMALE_COLOR: RGBColor = RGBColor(102, 194, 165);
const MALE_COLOR: RGBColor = RGBColor(252, 141, 98);
const MISSING_COLOR: RGBColor = RGBColor(230, 230, 230);

// YlGnBu colour map stops, light to dark.
const YLGNBU: [(u8, u8, u8); 9] = [
    (255, 255, 217),
    (237, 248, 177),
    (199, 233, 180),
    (127, 205, 187),
    (65, 182, 196),
    (29, 145, 192),
    (34, 94, 168),
    (37, 52, 148),
    (8, 29, 88),
];

/// A rendered chart as a standalone SVG document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartImage {
    variant: ChartVariant,
    svg: String,
}

impl ChartImage {
    #[must_use]
    pub fn variant(&self) -> ChartVariant {
        self.variant
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        self.variant.title()
    }

    #[must_use]
    pub fn svg(&self) -> &str {
        &self.svg
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ChartService;

impl ChartService {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Render the chart for `variant`.
    ///
    /// # Errors
    ///
    /// Returns `ChartError::Render` if the drawing backend fails.
    pub fn render(&self, variant: ChartVariant, dataset: &Dataset) -> Result<ChartImage, ChartError> {
        match variant {
            ChartVariant::ClassGenderBars => render_class_gender_bars(dataset),
            ChartVariant::SurvivalHeatmap => render_survival_heatmap(dataset),
        }
    }
}

/// Linear `f64` axis labelled only at the given positions.
struct TickedAxis {
    range: Range<f64>,
    ticks: Vec<f64>,
}

impl TickedAxis {
    fn new(range: Range<f64>, ticks: &[f64]) -> Self {
        Self {
            range,
            ticks: ticks.to_vec(),
        }
    }
}

impl Ranged for TickedAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        let t = (value - self.range.start) / (self.range.end - self.range.start);
        #[allow(clippy::cast_possible_truncation)]
        let offset = (f64::from(limit.1 - limit.0) * t).round() as i32;
        limit.0 + offset
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        if hint.max_num_points() == 0 {
            return Vec::new();
        }
        self.ticks.clone()
    }

    fn range(&self) -> Range<f64> {
        self.range.clone()
    }
}

fn render_err<E: std::fmt::Display>(err: E) -> ChartError {
    ChartError::Render(err.to_string())
}

fn sex_color(sex: Sex) -> RGBColor {
    match sex {
        Sex::Female => FEMALE_COLOR,
        Sex::Male => MALE_COLOR,
    }
}

/// Grouped bar chart: one group per class, one bar per sex, y axis in percent.
///
/// # Errors
///
/// Returns `ChartError::Render` if the drawing backend fails.
pub fn render_class_gender_bars(dataset: &Dataset) -> Result<ChartImage, ChartError> {
    let variant = ChartVariant::ClassGenderBars;
    let table = dataset.survival_table();
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, BARS_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(variant.title(), (FONT, 22).into_font().style(FontStyle::Bold))
            .margin(16)
            .x_label_area_size(48)
            .y_label_area_size(72)
            .build_cartesian_2d(
                TickedAxis::new(0.0..3.0, &[0.5, 1.5, 2.5]),
                TickedAxis::new(0.0..1.0, &[0.0, 0.25, 0.5, 0.75, 1.0]),
            )
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Passenger Class")
            .y_desc("Survival Rate")
            .axis_desc_style((FONT, 16))
            .x_label_formatter(&|x| class_at(*x).to_string())
            .y_label_formatter(&|y| format!("{:.0}%", y * 100.0))
            .draw()
            .map_err(render_err)?;

        for sex in Sex::ALL {
            let color = sex_color(sex);
            let bars = bar_rects(&table, sex);
            chart
                .draw_series(
                    bars.into_iter()
                        .map(move |(x0, x1, rate)| Rectangle::new([(x0, 0.0), (x1, rate)], color.filled())),
                )
                .map_err(render_err)?
                .label(sex.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 14, y + 6)], color.filled()));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.85))
            .border_style(&BLACK)
            .label_font((FONT, 14))
            .draw()
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
    }
    Ok(ChartImage { variant, svg })
}

/// Bar extents `(x0, x1, rate)` for one sex; empty groups draw no bar.
fn bar_rects(table: &SurvivalTable, sex: Sex) -> Vec<(f64, f64, f64)> {
    const GROUP_PAD: f64 = 0.1;
    const BAR_WIDTH: f64 = 0.4;
    Pclass::ALL
        .into_iter()
        .filter_map(|pclass| {
            let rate = table.rate(pclass, sex)?;
            #[allow(clippy::cast_precision_loss)]
            let x0 = pclass.index() as f64 + GROUP_PAD + sex.index() as f64 * BAR_WIDTH;
            Some((x0, x0 + BAR_WIDTH, rate))
        })
        .collect()
}

fn class_at(x: f64) -> u8 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let idx = x.floor().clamp(0.0, 2.0) as u8;
    idx + 1
}

/// Heatmap of the class x sex pivot with per-cell annotations and a colour bar.
///
/// # Errors
///
/// Returns `ChartError::Render` if the drawing backend fails.
pub fn render_survival_heatmap(dataset: &Dataset) -> Result<ChartImage, ChartError> {
    let variant = ChartVariant::SurvivalHeatmap;
    let table = dataset.survival_table();
    let (vmin, vmax) = rate_bounds(&table);
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, HEATMAP_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;
        let root = root
            .titled(variant.title(), (FONT, 20).into_font().style(FontStyle::Bold))
            .map_err(render_err)?;
        let (main, bar) = root.split_horizontally(HEATMAP_SPLIT);

        let mut chart = ChartBuilder::on(&main)
            .margin(16)
            .x_label_area_size(48)
            .y_label_area_size(64)
            .build_cartesian_2d(
                TickedAxis::new(0.0..2.0, &[0.5, 1.5]),
                TickedAxis::new(0.0..3.0, &[0.5, 1.5, 2.5]),
            )
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_desc("sex")
            .y_desc("pclass")
            .axis_desc_style((FONT, 16))
            .x_label_formatter(&|x| if *x < 1.0 { "female" } else { "male" }.to_string())
            // Class 1 sits at the top, like a table.
            .y_label_formatter(&|y| (4 - class_at(*y)).to_string())
            .draw()
            .map_err(render_err)?;

        let cells: Vec<_> = table
            .iter_rates()
            .map(|(pclass, sex, rate)| {
                #[allow(clippy::cast_precision_loss)]
                let x0 = sex.index() as f64;
                #[allow(clippy::cast_precision_loss)]
                let y0 = (2 - pclass.index()) as f64;
                (x0, y0, rate)
            })
            .collect();

        chart
            .draw_series(cells.iter().map(|&(x0, y0, rate)| {
                let color = rate.map_or(MISSING_COLOR, |r| ylgnbu(normalize(r, vmin, vmax)));
                Rectangle::new([(x0, y0), (x0 + 1.0, y0 + 1.0)], color.filled())
            }))
            .map_err(render_err)?;

        chart
            .draw_series(cells.iter().filter_map(|&(x0, y0, rate)| {
                let rate = rate?;
                let ink = if normalize(rate, vmin, vmax) > 0.6 { WHITE } else { BLACK };
                let style = (FONT, 20)
                    .into_font()
                    .color(&ink)
                    .pos(Pos::new(HPos::Center, VPos::Center));
                Some(Text::new(format!("{rate:.2}"), (x0 + 0.5, y0 + 0.5), style))
            }))
            .map_err(render_err)?;

        draw_colorbar(&bar, vmin, vmax)?;
        root.present().map_err(render_err)?;
    }
    Ok(ChartImage { variant, svg })
}

fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    vmin: f64,
    vmax: f64,
) -> Result<(), ChartError> {
    let mut chart = ChartBuilder::on(area)
        .margin_top(16)
        .margin_bottom(64)
        .margin_right(8)
        .right_y_label_area_size(72)
        .build_cartesian_2d(0.0_f64..1.0_f64, vmin..vmax)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(0)
        .y_labels(5)
        .y_desc("Survival Rate")
        .axis_desc_style((FONT, 14))
        .y_label_formatter(&|v| format!("{v:.2}"))
        .draw()
        .map_err(render_err)?;

    #[allow(clippy::cast_precision_loss)]
    let step = (vmax - vmin) / COLORBAR_STEPS as f64;
    chart
        .draw_series((0..COLORBAR_STEPS).map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let lo = vmin + step * i as f64;
            let t = (i as f64 + 0.5) / COLORBAR_STEPS as f64;
            Rectangle::new([(0.0, lo), (1.0, lo + step)], ylgnbu(t).filled())
        }))
        .map_err(render_err)?;
    Ok(())
}

/// Colour scale bounds taken from the data, like an auto-scaled heatmap.
fn rate_bounds(table: &SurvivalTable) -> (f64, f64) {
    let rates: Vec<f64> = table.iter_rates().filter_map(|(_, _, rate)| rate).collect();
    let min = rates.iter().copied().fold(f64::INFINITY, f64::min);
    let max = rates.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if rates.is_empty() || (max - min).abs() < f64::EPSILON {
        (0.0, 1.0)
    } else {
        (min, max)
    }
}

fn normalize(value: f64, vmin: f64, vmax: f64) -> f64 {
    ((value - vmin) / (vmax - vmin)).clamp(0.0, 1.0)
}

/// Linear interpolation along the YlGnBu stops, `t` in `[0, 1]`.
fn ylgnbu(t: f64) -> RGBColor {
    let last = YLGNBU.len() - 1;
    #[allow(clippy::cast_precision_loss)]
    let scaled = t.clamp(0.0, 1.0) * last as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let lo = (scaled.floor() as usize).min(last - 1);
    #[allow(clippy::cast_precision_loss)]
    let frac = scaled - lo as f64;
    let (a, b) = (YLGNBU[lo], YLGNBU[lo + 1]);
    let mix = |x: u8, y: u8| {
        let v = f64::from(x) + (f64::from(y) - f64::from(x)) * frac;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let v = v.round().clamp(0.0, 255.0) as u8;
        v
    };
    RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartlab_core::model::Passenger;
    use dataset::BundledSource;

    fn titanic() -> Dataset {
        BundledSource::new().load().unwrap()
    }

    #[test]
    fn bars_render_title_axes_and_legend() {
        let image = ChartService::new()
            .render(ChartVariant::ClassGenderBars, &titanic())
            .unwrap();
        assert_eq!(image.variant(), ChartVariant::ClassGenderBars);
        let svg = image.svg();
        assert!(svg.contains("<svg"), "{svg}");
        assert!(svg.contains("Survival Rate by Passenger Class and Gender"));
        assert!(svg.contains("Passenger Class"));
        assert!(svg.contains("female"));

        let labels = text_nodes(svg);
        for tick in ["0%", "25%", "50%", "75%", "100%"] {
            assert!(labels.contains(&tick), "missing y tick {tick}: {labels:?}");
        }
        for class in ["1", "2", "3"] {
            assert!(labels.contains(&class), "missing class label {class}");
        }
    }

    fn text_nodes(svg: &str) -> Vec<&str> {
        svg.split('>')
            .filter_map(|chunk| chunk.split('<').next())
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .collect()
    }

    #[test]
    fn ticked_axis_maps_linearly_in_both_directions() {
        let axis = TickedAxis::new(0.0..1.0, &[0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(axis.map(&0.25, (0, 100)), 25);
        assert_eq!(axis.map(&0.25, (100, 0)), 75);
        assert_eq!(axis.map(&1.0, (10, 410)), 410);
        assert_eq!(axis.range(), 0.0..1.0);
    }

    #[test]
    fn heatmap_annotates_every_cell() {
        let image = render_survival_heatmap(&titanic()).unwrap();
        let svg = image.svg();
        assert!(svg.contains("Heatmap of Survival Rate"));
        // 91/94 first-class women, 47/347 third-class men.
        assert!(svg.contains("0.97"), "missing first class female rate");
        assert!(svg.contains("0.14"), "missing third class male rate");
        assert!(svg.contains("Survival Rate"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let ds = titanic();
        let service = ChartService::new();
        for variant in ChartVariant::ALL {
            let a = service.render(variant, &ds).unwrap();
            let b = service.render(variant, &ds).unwrap();
            assert_eq!(a, b, "{variant} differs between renders");
        }
    }

    #[test]
    fn sparse_dataset_still_renders() {
        let ds = Dataset::new(vec![Passenger::new(Pclass::Second, Sex::Male, true)]).unwrap();
        assert!(render_survival_heatmap(&ds).is_ok());
        assert!(render_class_gender_bars(&ds).is_ok());
        assert_eq!(rate_bounds(&ds.survival_table()), (0.0, 1.0));
    }

    #[test]
    fn colour_ramp_hits_both_ends() {
        assert_eq!(ylgnbu(0.0), RGBColor(255, 255, 217));
        assert_eq!(ylgnbu(1.0), RGBColor(8, 29, 88));
        assert_eq!(class_at(2.5), 3);
    }
}
