//! HTML fragments for the Ark Passive simulator panel.
//!
//! The board is swapped as a whole (`#ark-board`, `outerHTML`) after every
//! edit. The detail panel (`#ark-detail`) and the snapshot consumed by the
//! build summary (`#ark-snapshot`) ride along as out-of-band swaps.

use std::collections::HashSet;

use crate::ark::catalogue::{MasterNode, NodeKey};
use crate::ark::category::Category;
use crate::ark::engine::AllocationEngine;
use crate::ark::snapshot::Snapshot;
use crate::ark::tooltip::TooltipTable;

/// Escape text for HTML content and attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_status(ok: bool, message: &str) -> String {
    let class = if ok { "text-emerald-600" } else { "text-kip-red" };
    format!(r#"<span class="{}">{}</span>"#, class, escape_html(message))
}

/// Shown in place of the board until a character is loaded.
pub fn render_empty_board(message: &str) -> String {
    format!(
        r#"<div id="ark-board" class="w-full text-center text-slate-500">{}</div>"#,
        escape_html(message)
    )
}

/// Render the board for every category, or just `only`.
pub fn render_board(engine: &AllocationEngine, only: Option<Category>) -> String {
    let modified: HashSet<NodeKey> = engine
        .diff()
        .into_iter()
        .map(|d| NodeKey::new(d.category, &d.node))
        .collect();

    let mut html = String::with_capacity(8192);
    html.push_str(&format!(
        r#"<div id="ark-board" class="grid grid-cols-1 gap-4" data-revision="{}">"#,
        engine.revision()
    ));

    // Toolbar: reset is only meaningful once something changed
    html.push_str(r#"<div class="flex justify-end">"#);
    html.push_str(&format!(
        r##"<button class="px-2 py-1 rounded border border-kip-red text-kip-red{}" hx-post="/api/ark/reset" hx-target="#ark-board" hx-swap="outerHTML">초기화</button>"##,
        if modified.is_empty() { " opacity-40" } else { "" }
    ));
    html.push_str("</div>");

    for category in Category::ALL {
        if only.is_some_and(|c| c != category) {
            continue;
        }
        render_category(&mut html, engine, category, &modified);
    }

    html.push_str("</div>");
    html
}

fn render_category(
    html: &mut String,
    engine: &AllocationEngine,
    category: Category,
    modified: &HashSet<NodeKey>,
) {
    let points = engine.points_for(category);
    html.push_str(&format!(
        r#"<section id="ark-{}" class="rounded bg-amber-50 p-2">"#,
        category.slug()
    ));
    html.push_str(&format!(
        r#"<header class="flex justify-between font-bold"><span>{}</span><span class="ark-points" title="{}">{}</span></header>"#,
        category.label(),
        escape_html(&points.label),
        points.current_points
    ));
    html.push_str(r#"<div class="mt-1 h-0.5 w-full bg-kip-red"></div>"#);

    let mut current_tier = 0;
    for node in engine.catalogue().nodes_in(category) {
        if node.tier != current_tier {
            if current_tier != 0 {
                html.push_str("</ul>");
            }
            current_tier = node.tier;
            html.push_str(&format!(
                r#"<p class="mt-2 text-xs text-slate-500">{}티어</p><ul class="grid grid-cols-1 gap-1">"#,
                current_tier
            ));
        }
        render_node(html, engine, node, modified.contains(&node.key()));
    }
    if current_tier != 0 {
        html.push_str("</ul>");
    }
    html.push_str("</section>");
}

fn render_node(html: &mut String, engine: &AllocationEngine, node: &MasterNode, modified: bool) {
    let level = engine.level_of(&node.key());
    let step = engine.config().step();
    let name = escape_html(&node.name);

    let mut classes = String::from("flex items-center gap-1");
    if level == 0 {
        classes.push_str(" opacity-50");
    }
    if modified {
        classes.push_str(" ark-modified font-semibold");
    }

    html.push_str(&format!(r#"<li class="{}">"#, classes));
    html.push_str(&format!(
        r#"<img src="{}" alt="" class="w-6 h-6" loading="lazy">"#,
        escape_html(&node.icon_url)
    ));
    html.push_str(&format!(
        r##"<button class="grow text-left" hx-get="/api/ark/detail" hx-vals="{}" hx-target="#ark-detail" hx-swap="outerHTML">{}</button>"##,
        escape_html(&node_vals(node, None)),
        name
    ));
    html.push_str(&format!(
        r#"<span class="tabular-nums">{} / {}</span>"#,
        level, node.max
    ));
    for (delta, text) in [(-step, format!("-{step}")), (-1, "-".into()), (1, "+".into()), (step, format!("+{step}"))] {
        let blocked = (delta < 0 && level == 0) || (delta > 0 && level >= node.max);
        html.push_str(&format!(
            r##"<button class="w-8 rounded border border-slate-400{}" hx-post="/api/ark/adjust" hx-vals="{}" hx-target="#ark-board" hx-swap="outerHTML">{}</button>"##,
            if blocked { " opacity-40" } else { "" },
            escape_html(&node_vals(node, Some(delta))),
            text
        ));
    }
    html.push_str("</li>");
}

fn node_vals(node: &MasterNode, delta: Option<i32>) -> String {
    let mut vals = serde_json::json!({
        "category": node.category.label(),
        "node": node.name,
    });
    if let Some(delta) = delta {
        vals["delta"] = serde_json::Value::from(delta.to_string());
    }
    vals.to_string()
}

/// Detail panel for the node the engine has open, or an empty placeholder.
pub fn render_detail(engine: Option<&AllocationEngine>, tooltips: &TooltipTable, class: &str, oob: bool) -> String {
    let oob_attr = if oob { r#" hx-swap-oob="true""# } else { "" };
    let node = engine.and_then(|e| e.detail().and_then(|d| e.catalogue().node(&d.key)).map(|n| (e, n)));
    let Some((engine, node)) = node else {
        return format!(r#"<div id="ark-detail"{}></div>"#, oob_attr);
    };

    let level = engine.level_of(&node.key());
    let preview = level.max(1);
    let baseline = engine.baseline().level_of(&node.key());

    let mut html = String::with_capacity(2048);
    html.push_str(&format!(
        r#"<div id="ark-detail"{} class="rounded border border-kip-drk-goldenrod p-3">"#,
        oob_attr
    ));
    html.push_str(&format!(
        r#"<div class="flex items-center gap-2"><img src="{}" alt="" class="w-8 h-8"><p class="font-bold">{} {}</p><span class="text-xs">{}티어</span></div>"#,
        escape_html(&node.icon_url),
        node.category.label(),
        escape_html(&node.name),
        node.tier
    ));
    html.push_str(&format!(
        r#"<p class="text-sm">Lv.{} / {} <span class="text-slate-500">(기본 Lv.{})</span></p>"#,
        level, node.max, baseline
    ));

    html.push_str(r#"<ul class="my-2 text-sm">"#);
    for line in tooltips.describe(node.category, &node.name, preview, class) {
        html.push_str(&format!("<li>{}</li>", escape_html(line)));
    }
    html.push_str("</ul>");

    html.push_str(&format!(
        r##"<form class="flex gap-2" hx-post="/api/ark/detail/apply" hx-target="#ark-board" hx-swap="outerHTML"><input type="number" name="level" min="0" max="{max}" value="{level}" class="w-16 border rounded px-1"><button type="submit" class="px-2 rounded bg-kip-red text-white">적용</button><button type="button" class="px-2 rounded border" hx-post="/api/ark/detail/close" hx-target="#ark-detail" hx-swap="outerHTML">닫기</button></form>"##,
        max = node.max,
        level = level
    ));
    html.push_str("</div>");
    html
}

/// Out-of-band element carrying the working snapshot for the build summary.
pub fn render_published(snapshot: &Snapshot) -> String {
    let json = snapshot.to_json().replace("</", "<\\/");
    format!(
        r#"<script type="application/json" id="ark-snapshot" hx-swap-oob="true">{}</script>"#,
        json
    )
}
