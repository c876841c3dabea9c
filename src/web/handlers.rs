//! HTTP handlers for the three dashboard views.
//!
//! Every handler accepts its parameters either from the query string (GET) or from an
//! urlencoded form body (POST).

use crate::analysis::climatology::aggregate;
use crate::analysis::extractor::extract;
use crate::charts::renderer::{render_climatology, render_series};
use crate::datasets::error::DatasetError;
use crate::types::pollutant::{Pollutant, Unit};
use crate::web::pages;
use crate::web::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use log::{debug, warn};
use serde::Deserialize;
use std::sync::Arc;

const DEFAULT_POLLUTANT: Pollutant = Pollutant::PM10;
const NO_STATIONS: &str = "Brak dostępnych stacji lub danych.";
const NO_LOCATIONS: &str = "Brak dostępnych lokalizacji.";

#[derive(Debug, Default, Deserialize)]
pub struct IndexParams {
    pollutant: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlotParams {
    pollutant: Option<String>,
    station: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LocationParams {
    location: Option<String>,
}

fn pollutant_names() -> Vec<&'static str> {
    Pollutant::ALL.iter().map(|p| p.name()).collect()
}

fn internal_error(context: &str, e: impl std::fmt::Display) -> Response {
    warn!("{}: {}", context, e);
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
}

/// Map view for the selected pollutant.
pub async fn index(Form(params): Form<IndexParams>) -> Html<String> {
    let selected = params
        .pollutant
        .unwrap_or_else(|| DEFAULT_POLLUTANT.name().to_string());
    let map_file = selected
        .parse::<Pollutant>()
        .map(|pollutant| pollutant.map_file())
        .unwrap_or(DEFAULT_POLLUTANT.map_file());

    Html(pages::index_page(&selected, map_file, &pollutant_names()))
}

/// Builds the `/plot` page, or `None` when the pollutant has no dataset, the dataset has
/// no stations or the requested station is blank.
fn build_plot_page(
    state: &AppState,
    pollutant: &str,
    station: Option<String>,
) -> Result<Option<String>, DatasetError> {
    let Some(dataset) = state.store.get_by_name(pollutant) else {
        debug!("No dataset loaded for {}", pollutant);
        return Ok(None);
    };
    let stations: Vec<&str> = dataset.stations().iter().map(String::as_str).collect();
    let station = match station {
        Some(station) if station.trim().is_empty() => return Ok(None),
        Some(station) => station,
        None => match stations.first() {
            Some(first) => first.to_string(),
            None => return Ok(None),
        },
    };

    let series = extract(dataset, &station, pollutant)?;
    let chart = render_series(
        series.as_ref(),
        &station,
        pollutant,
        Unit::for_pollutant(pollutant),
    );
    Ok(Some(pages::plot_page(
        &chart,
        pollutant,
        &station,
        &pollutant_names(),
        &stations,
    )))
}

/// Time series of one station for one pollutant.
///
/// Responds 404 with a plain-text message when the pollutant has no dataset or the
/// dataset has no stations, and when the station is given but blank. An unknown station
/// renders a "no data" message in place of the chart.
pub async fn plot(
    State(state): State<Arc<AppState>>,
    Form(params): Form<PlotParams>,
) -> Response {
    let pollutant = params
        .pollutant
        .unwrap_or_else(|| DEFAULT_POLLUTANT.name().to_string());
    let station = params.station;

    let context = format!("Plot for {}/{}", pollutant, station.as_deref().unwrap_or("-"));
    let page =
        tokio::task::spawn_blocking(move || build_plot_page(&state, &pollutant, station)).await;

    match page {
        Ok(Ok(Some(html))) => Html(html).into_response(),
        Ok(Ok(None)) => (StatusCode::NOT_FOUND, NO_STATIONS).into_response(),
        Ok(Err(e)) => internal_error(&context, e),
        Err(e) => internal_error(&context, e),
    }
}

/// Mean annual course of every available pollutant over the stations of one location.
///
/// Pollutants with no station in the location, or whose aggregation fails, are left out.
pub async fn location_overview(
    State(state): State<Arc<AppState>>,
    Form(params): Form<LocationParams>,
) -> Response {
    let locations = state.index.all_locations();
    let Some(location) = params.location.or_else(|| locations.first().cloned()) else {
        return (StatusCode::NOT_FOUND, NO_LOCATIONS).into_response();
    };

    let station_codes = state.index.stations_for_location(&location);
    let charts = tokio::task::spawn_blocking(move || {
        state
            .store
            .available()
            .filter_map(|dataset| {
                let pollutant = dataset.pollutant().name();
                match aggregate(dataset, &station_codes, pollutant) {
                    Ok(Some(table)) => Some((
                        pollutant.to_string(),
                        render_climatology(&table, pollutant, table.unit),
                    )),
                    Ok(None) => None,
                    Err(e) => {
                        warn!("Climatology for {} failed: {}", pollutant, e);
                        None
                    }
                }
            })
            .collect::<Vec<_>>()
    })
    .await;

    let charts = match charts {
        Ok(charts) => charts,
        Err(e) => return internal_error("Location overview task", e),
    };
    let locations: Vec<&str> = locations.iter().map(String::as_str).collect();

    Html(pages::location_overview_page(&location, &locations, &charts)).into_response()
}
