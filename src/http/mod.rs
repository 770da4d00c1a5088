//! REST API over the in-memory tournaments. Mounted by `src/bin/web.rs` through
//! [`configure`]; tests mount it the same way.
//!
//! The caller's role comes from the `X-Role` header (`organizer` or `spectator`,
//! default spectator). Only organizers may change anything.

use crate::logic::{advance_to_next_stage, bracket_overview, generate_group_stage};
use crate::models::{MatchId, RequestContext, Role, Tournament, TournamentError, TournamentId};
use actix_web::{
    delete, get, post, put,
    web::{self, Bytes, Data, Json, Path},
    HttpRequest, HttpResponse, Responder,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Header carrying the caller's role.
pub const ROLE_HEADER: &str = "X-Role";

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
pub struct TournamentEntry {
    pub tournament: Tournament,
    pub last_activity: Instant,
}

/// All tournaments by id.
pub type Tournaments = RwLock<HashMap<TournamentId, TournamentEntry>>;

type AppState = Data<Tournaments>;

pub fn new_state() -> Data<Tournaments> {
    Data::new(RwLock::new(HashMap::new()))
}

/// Drop tournaments idle for at least `timeout`. Returns how many were removed.
pub fn remove_inactive(state: &Tournaments, timeout: Duration) -> usize {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return 0,
    };
    let before = g.len();
    g.retain(|_, entry| entry.last_activity.elapsed() < timeout);
    before - g.len()
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    #[serde(default = "default_tournament_name")]
    name: String,
}

fn default_tournament_name() -> String {
    "Tournament".to_string()
}

#[derive(Deserialize)]
struct AddTeamBody {
    name: String,
}

#[derive(Deserialize)]
struct SetScoreBody {
    score1: u32,
    score2: u32,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

#[derive(Deserialize)]
struct TournamentTeamPath {
    id: TournamentId,
    team_id: String,
}

#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: MatchId,
}

#[derive(Deserialize)]
struct MatchActionPath {
    id: TournamentId,
    match_id: MatchId,
    action: String,
}

fn role_of(req: &HttpRequest) -> Role {
    req.headers()
        .get(ROLE_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or_default()
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::TeamNotFound(_) | TournamentError::MatchNotFound(_) => {
            HttpResponse::NotFound().json(body)
        }
        TournamentError::Forbidden => HttpResponse::Forbidden().json(body),
        TournamentError::StageAlreadyGenerated(_) => HttpResponse::Conflict().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn no_tournament() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

/// Run `f` against tournament `id` with the caller's context, refreshing last activity.
fn with_tournament<F>(state: &AppState, req: &HttpRequest, id: TournamentId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament, &RequestContext) -> Result<HttpResponse, TournamentError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return no_tournament(),
    };
    entry.last_activity = Instant::now();
    let ctx = RequestContext::new(id, role_of(req));
    match f(&mut entry.tournament, &ctx) {
        Ok(resp) => resp,
        Err(e) => error_response(&e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "bracket-tournament-web",
    })
}

/// Create a new tournament (organizers only). Returns it with its id.
#[post("/api/tournaments")]
async fn api_create_tournament(
    state: AppState,
    req: HttpRequest,
    body: Option<Json<CreateTournamentBody>>,
) -> HttpResponse {
    if role_of(&req) != Role::Organizer {
        return error_response(&TournamentError::Forbidden);
    }
    let name = body
        .map(|b| b.into_inner().name)
        .unwrap_or_else(default_tournament_name);
    let tournament = Tournament::new(name.trim());
    let id = tournament.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let resp = HttpResponse::Ok().json(&tournament);
    g.insert(
        id,
        TournamentEntry {
            tournament,
            last_activity: Instant::now(),
        },
    );
    log::info!("Created tournament {}", id);
    resp
}

/// Get a tournament by id (404 if not found).
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, req: HttpRequest, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, &req, path.id, |t, _| Ok(HttpResponse::Ok().json(&*t)))
}

/// Stage views, statuses, current stage and whether "advance" is enabled.
#[get("/api/tournaments/{id}/bracket")]
async fn api_get_bracket(state: AppState, req: HttpRequest, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, &req, path.id, |t, _| {
        Ok(HttpResponse::Ok().json(bracket_overview(t)))
    })
}

#[post("/api/tournaments/{id}/teams")]
async fn api_add_team(
    state: AppState,
    req: HttpRequest,
    path: Path<TournamentPath>,
    body: Json<AddTeamBody>,
) -> HttpResponse {
    with_tournament(&state, &req, path.id, |t, ctx| {
        t.add_team(ctx, &body.name)?;
        Ok(HttpResponse::Ok().json(&*t))
    })
}

/// Register teams from a CSV body with a `name` header.
#[post("/api/tournaments/{id}/teams/import")]
async fn api_import_teams(
    state: AppState,
    req: HttpRequest,
    path: Path<TournamentPath>,
    body: Bytes,
) -> HttpResponse {
    with_tournament(&state, &req, path.id, |t, ctx| {
        let added = t.import_teams_csv(ctx, body.as_ref())?;
        log::info!("Tournament {}: imported {} team(s)", t.id, added);
        Ok(HttpResponse::Ok().json(&*t))
    })
}

#[delete("/api/tournaments/{id}/teams/{team_id}")]
async fn api_remove_team(state: AppState, req: HttpRequest, path: Path<TournamentTeamPath>) -> HttpResponse {
    with_tournament(&state, &req, path.id, |t, ctx| {
        t.remove_team(ctx, &path.team_id)?;
        Ok(HttpResponse::Ok().json(&*t))
    })
}

/// Generate the round-robin group stage.
#[post("/api/tournaments/{id}/stages/group")]
async fn api_generate_group_stage(
    state: AppState,
    req: HttpRequest,
    path: Path<TournamentPath>,
) -> HttpResponse {
    with_tournament(&state, &req, path.id, |t, ctx| {
        generate_group_stage(t, ctx)?;
        Ok(HttpResponse::Ok().json(bracket_overview(t)))
    })
}

/// Create the next stage from the current stage's qualifiers.
#[post("/api/tournaments/{id}/stages/advance")]
async fn api_advance_stage(state: AppState, req: HttpRequest, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, &req, path.id, |t, ctx| {
        advance_to_next_stage(t, ctx)?;
        Ok(HttpResponse::Ok().json(bracket_overview(t)))
    })
}

/// Match control: start, pause, resume or finish.
#[post("/api/tournaments/{id}/matches/{match_id}/{action}")]
async fn api_match_action(state: AppState, req: HttpRequest, path: Path<MatchActionPath>) -> HttpResponse {
    let action = path.action.as_str();
    if !matches!(action, "start" | "pause" | "resume" | "finish") {
        return HttpResponse::NotFound().json(serde_json::json!({ "error": "Unknown action" }));
    }
    with_tournament(&state, &req, path.id, |t, ctx| {
        let m = match action {
            "start" => t.start_match(ctx, path.match_id)?,
            "pause" => t.pause_match(ctx, path.match_id)?,
            "resume" => t.resume_match(ctx, path.match_id)?,
            _ => t.finish_match(ctx, path.match_id)?,
        };
        Ok(HttpResponse::Ok().json(m))
    })
}

#[put("/api/tournaments/{id}/matches/{match_id}/score")]
async fn api_set_score(
    state: AppState,
    req: HttpRequest,
    path: Path<TournamentMatchPath>,
    body: Json<SetScoreBody>,
) -> HttpResponse {
    with_tournament(&state, &req, path.id, |t, ctx| {
        let m = t.set_score(ctx, path.match_id, body.score1, body.score2)?;
        Ok(HttpResponse::Ok().json(m))
    })
}

/// Register every route on an `App`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api_health)
        .service(api_create_tournament)
        .service(api_get_tournament)
        .service(api_get_bracket)
        .service(api_add_team)
        .service(api_import_teams)
        .service(api_remove_team)
        .service(api_generate_group_stage)
        .service(api_advance_stage)
        .service(api_set_score)
        .service(api_match_action);
}
