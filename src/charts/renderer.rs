//! Renders extracted series and climatologies as embeddable plotly fragments.
//!
//! The fragments contain a `div` and an inline script only; the page embedding them must
//! load plotly.js itself.

use crate::types::pollutant::Unit;
use crate::types::series::{Climatology, TimeSeries};
use crate::utils::{element_id, escape_html};
use plotly::common::{Line, Mode, Title};
use plotly::layout::{Axis, Margin};
use plotly::{Layout, Plot, Scatter};

const CHART_HEIGHT: usize = 400;
const LINE_COLOR: &str = "teal";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn chart_layout(title: String, x_title: &str, unit: Unit) -> Layout {
    Layout::new()
        .title(Title::with_text(title))
        .x_axis(Axis::new().title(Title::with_text(x_title)))
        .y_axis(Axis::new().title(Title::with_text(format!("Stężenie ({})", unit))))
        .height(CHART_HEIGHT)
        .margin(Margin::new().left(40).right(40).top(60).bottom(40))
}

/// Short fragment shown instead of a chart when a station has no column in the dataset.
pub fn no_data_fragment(station: &str) -> String {
    format!("<p>Brak danych dla stacji {}</p>", escape_html(station))
}

/// Renders one station's series as a line chart over time.
///
/// `series` is the result of [`crate::extract`]; `None` (the station is not in the dataset)
/// yields [`no_data_fragment`] instead of a chart. The output only depends on the inputs.
pub fn render_series(
    series: Option<&TimeSeries>,
    station: &str,
    pollutant: &str,
    unit: Unit,
) -> String {
    let Some(series) = series else {
        return no_data_fragment(station);
    };

    let (x, y): (Vec<String>, Vec<f64>) = series
        .points()
        .map(|(timestamp, value)| (timestamp.format(TIMESTAMP_FORMAT).to_string(), value))
        .unzip();
    let trace = Scatter::new(x, y)
        .mode(Mode::Lines)
        .line(Line::new().color(LINE_COLOR))
        .name(station);

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(chart_layout(
        format!("Przebieg stężeń – {} ({}) – stacja {}", pollutant, unit, station),
        "Data",
        unit,
    ));
    plot.to_inline_html(Some(&element_id(&["series", pollutant, station])))
}

/// Renders a climatology as a line chart over the day of year.
///
/// Days whose mean is missing are left as gaps. The output only depends on the inputs.
pub fn render_climatology(table: &Climatology, pollutant: &str, unit: Unit) -> String {
    let days: Vec<u32> = table.points.iter().map(|point| point.day_of_year).collect();
    let means: Vec<Option<f64>> = table.points.iter().map(|point| point.mean).collect();
    let trace = Scatter::new(days, means)
        .mode(Mode::Lines)
        .line(Line::new().color(LINE_COLOR))
        .name(pollutant);

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(chart_layout(
        format!("Średni roczny przebieg – {} ({})", pollutant, unit),
        "Dzień roku",
        unit,
    ));
    plot.to_inline_html(Some(&element_id(&[
        "climatology",
        pollutant,
        &table.stations.join("-"),
    ])))
}
