use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::info;

use crate::artifacts::{ArtifactSummary, Artifacts};
use crate::data::Region;
use crate::wizard::{render_result, ResultView, SelectionBuilder, SelectionInput, SelectionState};

pub struct AppState {
    pub artifacts: Artifacts,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogResponse {
    pub regions: Vec<Region>,
    pub maps: Vec<String>,
    pub defaults: SelectionState,
}

/// Build the Axum router for the prediction page.
pub fn router(state: AppState, static_dir: Option<&str>) -> Router {
    let mut app = Router::new()
        .route("/", get(index_handler))
        .route("/api/catalog", get(catalog_handler))
        .route("/api/selection", post(selection_handler))
        .route("/api/predict", post(predict_handler))
        .route("/api/status", get(status_handler));
    if let Some(dir) = static_dir {
        info!("Serving static assets from {}", dir);
        app = app.nest_service("/static", ServeDir::new(dir));
    }
    app.layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Team fields may arrive as display names; the catalog speaks abbreviations.
fn normalise(state: &AppState, mut input: SelectionInput) -> SelectionState {
    let names = &state.artifacts.names;
    input.a_team = input.a_team.map(|t| names.resolve(&t).to_string());
    input.b_team = input.b_team.map(|t| names.resolve(&t).to_string());
    SelectionBuilder::from_input(&state.artifacts.catalog, input).build()
}

async fn index_handler() -> impl IntoResponse {
    Html(PAGE_HTML)
}

/// GET /api/catalog
async fn catalog_handler(State(state): State<Arc<AppState>>) -> Json<CatalogResponse> {
    let catalog = &state.artifacts.catalog;
    Json(CatalogResponse {
        regions: catalog.regions.clone(),
        maps: catalog.maps.clone(),
        defaults: SelectionBuilder::new(catalog).build(),
    })
}

/// POST /api/selection
async fn selection_handler(
    State(state): State<Arc<AppState>>,
    Json(input): Json<SelectionInput>,
) -> Json<SelectionState> {
    Json(normalise(&state, input))
}

/// POST /api/predict
async fn predict_handler(
    State(state): State<Arc<AppState>>,
    Json(input): Json<SelectionInput>,
) -> Result<Json<ResultView>, (StatusCode, String)> {
    let selection = normalise(&state, input).selection;
    let request = selection
        .to_request()
        .map_err(|w| (StatusCode::BAD_REQUEST, w.to_string()))?;
    let outcome = state
        .artifacts
        .predict(&request.team1, &request.team2, &request.map);
    Ok(Json(render_result(&request, &outcome)))
}

/// GET /api/status
async fn status_handler(State(state): State<Arc<AppState>>) -> Json<ArtifactSummary> {
    Json(state.artifacts.summary())
}

/// Embedded single-file page (HTML + CSS + JS)
const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>VCT Match Predictor</title>
<style>
  :root {
    --bg: #0f1117;
    --card: #1a1d27;
    --border: #2a2d3a;
    --accent: #ff4655;
    --text: #e0e0e0;
    --muted: #8888aa;
  }
  * { box-sizing: border-box; margin: 0; padding: 0; }
  body { background: var(--bg); color: var(--text); font-family: 'Segoe UI', system-ui, sans-serif; }
  header { padding: 1rem 2rem; border-bottom: 1px solid var(--border); }
  header h1 { font-size: 1.4rem; font-weight: 700; }
  main { padding: 1.5rem 2rem; max-width: 960px; margin: 0 auto; }
  .hidden { display: none !important; }
  .sides { display: grid; grid-template-columns: 4fr 1fr 4fr; gap: 1rem; align-items: center; }
  .card { background: var(--card); border: 1px solid var(--border); border-radius: 10px; padding: 1.2rem; }
  .card h2 { font-size: 1rem; margin-bottom: .8rem; color: var(--muted); text-transform: uppercase; letter-spacing: .06em; }
  label { display: block; font-size: .8rem; color: var(--muted); margin: .6rem 0 .3rem; }
  select { width: 100%; padding: .5rem; background: var(--bg); color: var(--text); border: 1px solid var(--border); border-radius: 6px; }
  .vs { text-align: center; font-size: 2rem; font-weight: 800; }
  .logo { width: 120px; height: 120px; object-fit: contain; display: block; margin: .8rem auto 0; }
  .btn { width: 100%; height: 56px; font-size: 1.1rem; background: var(--accent); color: #fff; border: none; border-radius: 10px; cursor: pointer; margin-top: 1.5rem; }
  .btn:hover { filter: brightness(.85); }
  .warn { color: #ff9800; font-size: .85rem; margin-top: .6rem; }
  .team-name { font-size: 1.5rem; font-weight: 700; text-align: center; }
  .win-prob { font-size: 1.8rem; font-weight: 700; color: var(--accent); text-align: center; margin-top: .6rem; }
  .confidence { color: var(--muted); margin-top: 1rem; text-align: center; }
  .error { color: var(--accent); margin: 1rem 0; }
</style>
</head>
<body>
<header><h1>VCT Match Predictor</h1></header>
<main>
  <section id="selection-screen">
    <div class="sides">
      <div class="card">
        <h2>Team A</h2>
        <label for="a-region">Region</label><select id="a-region"></select>
        <label for="a-team">Team</label><select id="a-team"></select>
        <img class="logo" id="a-logo" alt="" onerror="this.classList.add('hidden')">
      </div>
      <div class="vs">VS</div>
      <div class="card">
        <h2>Team B</h2>
        <label for="b-region">Region</label><select id="b-region"></select>
        <label for="b-team">Team</label><select id="b-team"></select>
        <img class="logo" id="b-logo" alt="" onerror="this.classList.add('hidden')">
        <div class="warn" id="b-warn"></div>
      </div>
    </div>
    <div class="card" style="margin-top:1rem;">
      <h2>Map</h2>
      <select id="map"></select>
    </div>
    <button class="btn" id="predict-btn">Predict</button>
    <div class="warn" id="predict-warn"></div>
  </section>

  <section id="result-screen" class="hidden">
    <div class="card">
      <div id="result-error" class="error hidden"></div>
      <div id="result-body" class="sides">
        <div>
          <div class="team-name" id="r-team1"></div>
          <img class="logo" id="r-logo1" alt="" onerror="this.classList.add('hidden')">
          <div class="win-prob" id="r-prob1"></div>
        </div>
        <div>
          <div class="vs">VS</div>
          <div style="text-align:center;" id="r-map"></div>
        </div>
        <div>
          <div class="team-name" id="r-team2"></div>
          <img class="logo" id="r-logo2" alt="" onerror="this.classList.add('hidden')">
          <div class="win-prob" id="r-prob2"></div>
        </div>
      </div>
      <div class="confidence" id="r-confidence"></div>
    </div>
    <button class="btn" id="back-btn">Back</button>
  </section>
</main>

<script>
const $ = id => document.getElementById(id);
let current = null;

function fill(sel, values, chosen) {
  sel.replaceChildren(...values.map(v => {
    const opt = document.createElement('option');
    opt.value = v;
    opt.textContent = v;
    return opt;
  }));
  if (chosen != null) sel.value = chosen;
}

function logo(img, team) {
  if (!team) { img.classList.add('hidden'); return; }
  img.classList.remove('hidden');
  img.src = `/static/${encodeURIComponent(team)}.png`;
}

function show(state, regions, maps) {
  current = state.selection;
  if (regions) {
    fill($('a-region'), regions.map(r => r.name));
    fill($('b-region'), regions.map(r => r.name));
  }
  if (maps) fill($('map'), maps);
  $('a-region').value = current.a_region;
  $('b-region').value = current.b_region;
  fill($('a-team'), state.a_teams, current.a_team);
  fill($('b-team'), state.b_teams, current.b_team);
  $('map').value = current.map;
  $('b-warn').textContent = state.warnings.join(' ');
  logo($('a-logo'), current.a_team);
  logo($('b-logo'), current.b_team);
}

function readSelection() {
  return {
    a_region: $('a-region').value,
    a_team: $('a-team').value,
    b_region: $('b-region').value,
    b_team: $('b-team').value || null,
    map: $('map').value,
  };
}

async function refresh() {
  const r = await fetch('/api/selection', {
    method: 'POST', headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify(readSelection()),
  });
  if (r.ok) show(await r.json());
}

async function predict() {
  $('predict-warn').textContent = '';
  const r = await fetch('/api/predict', {
    method: 'POST', headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify(current),
  });
  if (!r.ok) { $('predict-warn').textContent = await r.text(); return; }
  const v = await r.json();
  if (v.status === 'error') {
    $('result-error').textContent = v.error;
    $('result-error').classList.remove('hidden');
    $('result-body').classList.add('hidden');
    $('r-confidence').textContent = '';
  } else {
    $('result-error').classList.add('hidden');
    $('result-body').classList.remove('hidden');
    $('r-team1').textContent = v.team1.team;
    $('r-team2').textContent = v.team2.team;
    $('r-prob1').textContent = v.team1.win_pct;
    $('r-prob2').textContent = v.team2.win_pct;
    logo($('r-logo1'), v.team1.team);
    logo($('r-logo2'), v.team2.team);
    $('r-map').textContent = 'Map: ' + v.map;
    $('r-confidence').textContent = 'Confidence: ' + v.confidence;
  }
  $('selection-screen').classList.add('hidden');
  $('result-screen').classList.remove('hidden');
}

function back() {
  $('result-screen').classList.add('hidden');
  $('selection-screen').classList.remove('hidden');
}

async function init() {
  const r = await fetch('/api/catalog');
  if (!r.ok) { $('predict-warn').textContent = 'Failed to load catalog'; return; }
  const c = await r.json();
  show(c.defaults, c.regions, c.maps);
  ['a-region', 'a-team', 'b-region', 'b-team', 'map'].forEach(id => $(id).addEventListener('change', refresh));
  $('predict-btn').addEventListener('click', predict);
  $('back-btn').addEventListener('click', back);
}

init();
</script>
</body>
</html>"#;
