//! `/api/ark/*` routes — the Ark Passive what-if simulator.
//!
//! Loading routes take JSON bodies posted by the page (config, catalogue,
//! tooltip templates, the armory snapshot). Editing routes take HTMX form
//! bodies and answer with the re-rendered board; when the edit committed, the
//! working snapshot is appended as an out-of-band `#ark-snapshot` element
//! for the build summary view.

use crate::ark::board::LevelDelta;
use crate::ark::catalogue::NodeKey;
use crate::ark::category::Category;
use crate::ark::render;
use crate::ark::session::{Session, with_session, with_session_mut};
use crate::routes::util::{get_param, parse_form_body, parse_query};

const NO_CHARACTER: &str = "캐릭터 정보를 먼저 불러오세요";

// ── POST /api/ark/config ───────────────────────────────────────────

pub fn handle_config_post(body: &str) -> String {
    with_session_mut(|s| match s.load_config(body) {
        Ok(()) => render::render_status(true, "설정을 적용했습니다"),
        Err(e) => render::render_status(false, &format!("설정 오류: {}", e)),
    })
}

// ── POST /api/ark/catalogue ────────────────────────────────────────

pub fn handle_catalogue_post(body: &str) -> String {
    with_session_mut(|s| match s.load_catalogue(body) {
        Ok(n) => render::render_status(true, &format!("{}개 직업 노드 정보를 불러왔습니다", n)),
        Err(e) => render::render_status(false, &format!("노드 정보 오류: {}", e)),
    })
}

// ── POST /api/ark/tooltips ─────────────────────────────────────────

pub fn handle_tooltips_post(body: &str) -> String {
    with_session_mut(|s| match s.load_tooltips(body) {
        Ok(n) => render::render_status(true, &format!("툴팁 {}개를 불러왔습니다", n)),
        Err(e) => render::render_status(false, &format!("툴팁 오류: {}", e)),
    })
}

// ── POST /api/ark/character ────────────────────────────────────────

/// Handle POST /api/ark/character?class={class}&name={character}
/// Body is the armory snapshot JSON. Replaces any previous character.
pub fn handle_character_post(query: &str, body: &str) -> String {
    let params = parse_query(query);
    let class = get_param(&params, "class").unwrap_or("");
    let name = get_param(&params, "name").unwrap_or("");
    if class.is_empty() {
        return render::render_status(false, "Missing class parameter");
    }
    with_session_mut(|s| match s.load_character(class, name, body) {
        Ok(()) => board_response(s),
        Err(e) => render::render_status(false, &format!("캐릭터 정보 오류: {}", e)),
    })
}

// ── GET /api/ark/board ─────────────────────────────────────────────

/// Handle GET /api/ark/board?category={label}
pub fn handle_board_get(query: &str) -> String {
    let params = parse_query(query);
    let only = get_param(&params, "category").and_then(Category::from_label);
    with_session(|s| match s.engine() {
        Ok(engine) => render::render_board(engine, only),
        Err(_) => render::render_empty_board(NO_CHARACTER),
    })
}

// ── POST /api/ark/adjust ───────────────────────────────────────────

/// Handle POST /api/ark/adjust
/// Body params: `category={label}&node={name}&delta={±n}`
pub fn handle_adjust_post(body: &str) -> String {
    let params = parse_form_body(body);
    let Some(category) = get_param(&params, "category").and_then(Category::from_label) else {
        return render::render_status(false, "Missing or invalid category parameter");
    };
    let node = get_param(&params, "node").unwrap_or("");
    if node.trim().is_empty() {
        return render::render_status(false, "Missing node parameter");
    }
    let delta: i32 = get_param(&params, "delta")
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0);

    with_session_mut(|s| {
        let Ok(engine) = s.engine_mut() else {
            return render::render_empty_board(NO_CHARACTER);
        };
        engine.adjust_level(&NodeKey::new(category, node), delta);
        board_response(s)
    })
}

// ── POST /api/ark/reset ────────────────────────────────────────────

pub fn handle_reset_post(_body: &str) -> String {
    with_session_mut(|s| {
        let Ok(engine) = s.engine_mut() else {
            return render::render_empty_board(NO_CHARACTER);
        };
        engine.reset();
        // The detail panel pointed at the discarded working copy.
        let detail = render::render_detail(None, &s.tooltips, "", true);
        board_response(s) + &detail
    })
}

// ── GET /api/ark/snapshot ──────────────────────────────────────────

/// Working snapshot as JSON, for views that poll instead of listening for
/// the out-of-band element.
pub fn handle_snapshot_get(_query: &str) -> String {
    with_session(|s| match s.engine() {
        Ok(engine) => engine.snapshot().to_json(),
        Err(_) => "{}".to_string(),
    })
}

// ── GET /api/ark/points ────────────────────────────────────────────

pub fn handle_points_get(_query: &str) -> String {
    with_session(|s| match s.engine() {
        Ok(engine) => serde_json::to_string(engine.working().points())
            .unwrap_or_else(|_| "[]".to_string()),
        Err(_) => "[]".to_string(),
    })
}

// ── GET /api/ark/diff ──────────────────────────────────────────────

pub fn handle_diff_get(_query: &str) -> String {
    with_session(|s| match s.engine() {
        Ok(engine) => serde_json::to_string(&engine.diff()).unwrap_or_else(|_| "[]".to_string()),
        Err(_) => "[]".to_string(),
    })
}

// ── POST /api/ark/apply ────────────────────────────────────────────

/// Handle POST /api/ark/apply with a JSON array of `{category, node, to}`
/// (the shape `/api/ark/diff` returns), e.g. a shared build.
pub fn handle_apply_post(body: &str) -> String {
    let deltas: Vec<LevelDelta> = match serde_json::from_str(body) {
        Ok(d) => d,
        Err(e) => return render::render_status(false, &format!("Invalid build JSON: {}", e)),
    };
    with_session_mut(|s| {
        let Ok(engine) = s.engine_mut() else {
            return render::render_empty_board(NO_CHARACTER);
        };
        engine.apply_deltas(&deltas);
        board_response(s)
    })
}

// ── GET /api/ark/detail ────────────────────────────────────────────

/// Handle GET /api/ark/detail?category={label}&node={name}
pub fn handle_detail_get(query: &str) -> String {
    let params = parse_query(query);
    let category = get_param(&params, "category").and_then(Category::from_label);
    let node = get_param(&params, "node").unwrap_or("");
    with_session_mut(|s| {
        if let (Some(category), Ok(engine)) = (category, s.engine_mut()) {
            if engine.open_detail(&NodeKey::new(category, node)).is_none() {
                engine.close_detail();
            }
        }
        render::render_detail(s.engine.as_ref(), &s.tooltips, s.class_name(), false)
    })
}

// ── POST /api/ark/detail/apply ─────────────────────────────────────

/// Handle POST /api/ark/detail/apply with body `level={n}`.
pub fn handle_detail_apply_post(body: &str) -> String {
    let params = parse_form_body(body);
    let desired: Option<i64> = get_param(&params, "level").and_then(|s| s.trim().parse().ok());
    with_session_mut(|s| {
        let Ok(engine) = s.engine_mut() else {
            return render::render_empty_board(NO_CHARACTER);
        };
        // A blank or garbled field is not a request to clear the node.
        if let Some(desired) = desired {
            engine.apply_detail(desired);
        }
        let detail = render::render_detail(s.engine.as_ref(), &s.tooltips, s.class_name(), true);
        board_response(s) + &detail
    })
}

// ── POST /api/ark/detail/close ─────────────────────────────────────

pub fn handle_detail_close_post(_body: &str) -> String {
    with_session_mut(|s| {
        if let Some(engine) = s.engine.as_mut() {
            engine.close_detail();
        }
        render::render_detail(None, &s.tooltips, "", false)
    })
}

/// Board HTML plus the snapshot published by the last commit, if any.
fn board_response(s: &Session) -> String {
    let Ok(engine) = s.engine() else {
        return render::render_empty_board(NO_CHARACTER);
    };
    let mut html = render::render_board(engine, None);
    if let Some(snapshot) = s.take_published() {
        html.push_str(&render::render_published(&snapshot));
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ark::fixtures;
    use crate::ark::session::replace_session;

    fn reset_state() {
        replace_session(Session::default());
    }

    fn load_character() -> String {
        handle_catalogue_post(fixtures::CATALOGUE_JSON);
        handle_tooltips_post(fixtures::TOOLTIPS_JSON);
        handle_character_post("?class=%EB%B2%84%EC%84%9C%EC%BB%A4&name=test", fixtures::BASELINE_JSON)
    }

    #[test]
    fn board_without_character() {
        reset_state();
        let html = handle_board_get("");
        assert!(html.contains(NO_CHARACTER));
        let html = handle_adjust_post("category=evolution&node=x&delta=1");
        assert!(html.contains(NO_CHARACTER));
        assert_eq!(handle_snapshot_get(""), "{}");
    }

    #[test]
    fn catalogue_errors_are_reported() {
        reset_state();
        let html = handle_catalogue_post(r#"{"버서커":{"진화":[{"name":"치명","tier":1,"max":30},{"name":"약자 무시 치명","tier":3,"max":2}]}}"#);
        assert!(html.contains("text-kip-red"));
        assert!(html.contains("ambiguous"));
        reset_state();
    }

    #[test]
    fn character_load_renders_board_and_publishes() {
        reset_state();
        let html = load_character();
        assert!(html.contains(r#"id="ark-board""#));
        assert!(html.contains(r#"id="ark-snapshot""#));
        reset_state();
    }

    #[test]
    fn character_requires_class() {
        reset_state();
        handle_catalogue_post(fixtures::CATALOGUE_JSON);
        let html = handle_character_post("?name=test", fixtures::BASELINE_JSON);
        assert!(html.contains("Missing class parameter"));
        let html = handle_character_post("?class=%EB%B0%94%EB%93%9C", fixtures::BASELINE_JSON);
        assert!(html.contains("unknown class"));
        reset_state();
    }

    #[test]
    fn adjust_commits_and_publishes() {
        reset_state();
        load_character();
        let html = handle_adjust_post("category=evolution&node=%EC%B9%98%EB%AA%85&delta=1");
        assert!(html.contains("11 / 30"));
        assert!(html.contains("ark-snapshot"));
        assert!(html.contains("Lv.11"));
        assert!(handle_snapshot_get("").contains("Lv.11"));
        reset_state();
    }

    #[test]
    fn out_of_bounds_adjust_does_not_publish() {
        reset_state();
        load_character();
        let html = handle_adjust_post("category=evolution&node=%ED%8A%B9%ED%99%94&delta=-1");
        assert!(html.contains(r#"id="ark-board""#));
        assert!(!html.contains("ark-snapshot"));
        reset_state();
    }

    #[test]
    fn adjust_validates_params() {
        reset_state();
        load_character();
        assert!(handle_adjust_post("node=x&delta=1").contains("invalid category"));
        assert!(handle_adjust_post("category=leap&delta=1").contains("Missing node"));
        reset_state();
    }

    #[test]
    fn reset_restores_baseline_and_closes_detail() {
        reset_state();
        load_character();
        handle_detail_get("?category=evolution&node=%EC%B9%98%EB%AA%85");
        handle_adjust_post("category=evolution&node=%EC%B9%98%EB%AA%85&delta=10");
        let html = handle_reset_post("");
        assert!(html.contains("10 / 30"));
        assert!(html.contains(r#"<div id="ark-detail" hx-swap-oob="true"></div>"#));
        assert_eq!(handle_diff_get(""), "[]");
        with_session(|s| assert!(s.engine().unwrap().detail().is_none()));
        reset_state();
    }

    #[test]
    fn points_and_diff_json() {
        reset_state();
        load_character();
        handle_adjust_post("category=leap&node=%EC%B6%A9%EB%A7%8C%ED%95%9C+%EA%B8%B0%EC%9A%B4&delta=2");
        let points: serde_json::Value = serde_json::from_str(&handle_points_get("")).unwrap();
        assert_eq!(points[2]["current_points"], 14);
        assert_eq!(points[0]["current_points"], 30);
        let diff: Vec<LevelDelta> = serde_json::from_str(&handle_diff_get("")).unwrap();
        assert_eq!(diff.len(), 1);
        assert_eq!(diff[0].node, "충만한 기운");
        assert_eq!(diff[0].to, 2);
        reset_state();
    }

    #[test]
    fn apply_shared_build() {
        reset_state();
        load_character();
        let html = handle_apply_post(r#"[{"category":"진화","node":"치명","to":30},{"category":"도약","node":"잠재력 해방","to":1}]"#);
        assert!(html.contains("30 / 30"));
        assert!(html.contains("ark-snapshot"));
        assert!(handle_apply_post("[oops").contains("Invalid build JSON"));
        reset_state();
    }

    #[test]
    fn detail_open_apply_close() {
        reset_state();
        load_character();
        let html = handle_detail_get("?category=%EC%A7%84%ED%99%94&node=%EC%B9%98%EB%AA%85");
        assert!(html.contains("치명 +500"));

        let html = handle_detail_apply_post("level=11");
        assert!(html.contains("11 / 30"));
        assert!(html.contains("버서커 전용 치명 +550"));

        let html = handle_detail_apply_post("level=");
        assert!(html.contains("11 / 30"));

        let html = handle_detail_close_post("");
        assert_eq!(html, r#"<div id="ark-detail"></div>"#);
        let html = handle_detail_apply_post("level=3");
        assert!(html.contains("11 / 30"));
        reset_state();
    }

    #[test]
    fn detail_for_unknown_node_is_empty() {
        reset_state();
        load_character();
        let html = handle_detail_get("?category=evolution&node=nothing");
        assert_eq!(html, r#"<div id="ark-detail"></div>"#);
        reset_state();
    }
}
