//! Minimal HTML pages wrapping the chart fragments.

use crate::utils::escape_html;

const PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.12.1.min.js";

fn document(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="pl">
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{PLOTLY_JS}"></script>
</head>
<body>
<nav><a href="/">Mapa</a> | <a href="/plot">Wykres stacji</a> | <a href="/location_overview">Przegląd lokalizacji</a></nav>
{body}
</body>
</html>
"#,
        title = escape_html(title),
    )
}

fn select(name: &str, options: &[&str], selected: &str) -> String {
    let options: String = options
        .iter()
        .map(|option| {
            let marker = if *option == selected { " selected" } else { "" };
            format!(
                "<option value=\"{value}\"{marker}>{value}</option>",
                value = escape_html(option)
            )
        })
        .collect();
    format!(
        "<select name=\"{name}\" onchange=\"this.form.submit()\">{options}</select>",
        name = escape_html(name)
    )
}

pub fn index_page(selected: &str, map_file: &str, pollutants: &[&str]) -> String {
    let body = format!(
        r#"<h1>Mapa stężeń: {selected}</h1>
<form method="post" action="/">{select}</form>
<iframe src="/maps/{map_file}" width="100%" height="600" frameborder="0"></iframe>"#,
        selected = escape_html(selected),
        select = select("pollutant", pollutants, selected),
        map_file = escape_html(map_file),
    );
    document("Jakość powietrza", &body)
}

pub fn plot_page(
    chart: &str,
    pollutant: &str,
    station: &str,
    pollutants: &[&str],
    stations: &[&str],
) -> String {
    let body = format!(
        r#"<h1>{pollutant} - stacja {station}</h1>
<form method="post" action="/plot">{pollutant_select} {station_select}</form>
<div class="chart">{chart}</div>"#,
        pollutant = escape_html(pollutant),
        station = escape_html(station),
        pollutant_select = select("pollutant", pollutants, pollutant),
        station_select = select("station", stations, station),
    );
    document("Wykres stacji", &body)
}

/// `charts` holds (pollutant, chart fragment) pairs in display order.
pub fn location_overview_page(
    location: &str,
    locations: &[&str],
    charts: &[(String, String)],
) -> String {
    let content = if charts.is_empty() {
        "<p>Brak danych dla wybranej lokalizacji.</p>".to_string()
    } else {
        charts
            .iter()
            .map(|(pollutant, chart)| {
                format!(
                    "<section><h2>{}</h2>{}</section>\n",
                    escape_html(pollutant),
                    chart
                )
            })
            .collect()
    };
    let body = format!(
        r#"<h1>Przegląd lokalizacji: {location}</h1>
<form method="post" action="/location_overview">{select}</form>
{content}"#,
        location = escape_html(location),
        select = select("location", locations, location),
    );
    document("Przegląd lokalizacji", &body)
}
