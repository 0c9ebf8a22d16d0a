//! Plain-text and JSON renderings of catalog pages.

use crate::catalog::{CatalogEntity, EntityKind};
use crate::web::routes::Route;
use crate::web::views::{DetailContext, HomeContext, ListContext, NotFoundContext, Page, SiteContext};

/// Columns shown next to each name on list pages.
fn summary_columns(kind: EntityKind) -> &'static [&'static str] {
    match kind {
        EntityKind::Monster => &["Class", "MonsterType"],
        EntityKind::Item => &["ItemTier", "ItemActPass"],
        EntityKind::Survivor => &["Class"],
    }
}

fn display_value(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}

fn format_entry<E: CatalogEntity>(record: &E) -> String {
    let summary: Vec<&str> = summary_columns(E::KIND)
        .iter()
        .filter_map(|column| record.field(column))
        .filter(|value| !value.trim().is_empty())
        .collect();
    let path = Route::detail(E::KIND, record.key()).path();
    if summary.is_empty() {
        format!("{}  {}", record.key(), path)
    } else {
        format!("{} ({})  {}", record.key(), summary.join(", "), path)
    }
}

fn format_footer(site: &SiteContext) -> Vec<String> {
    let classes = if site.survivor_classes.is_empty() {
        "none".to_string()
    } else {
        site.survivor_classes.join(", ")
    };
    vec![String::new(), format!("Survivor classes: {}", classes)]
}

fn format_section<E: CatalogEntity>(records: &[E]) -> Vec<String> {
    let kind = E::KIND;
    let mut lines = vec![format!(
        "--- {} ({}) {} ---",
        capitalize(kind.plural()),
        records.len(),
        Route::list(kind).path()
    )];
    if records.is_empty() {
        lines.push(format!("No {} imported yet.", kind.plural()));
    }
    for (idx, record) in records.iter().enumerate() {
        lines.push(format!("{}. {}", idx + 1, format_entry(record)));
    }
    lines
}

pub fn format_home(ctx: &HomeContext) -> Vec<String> {
    let mut lines = vec![format!("=== {} ===", ctx.site.site_name)];
    lines.extend(format_section(&ctx.survivors));
    lines.extend(format_section(&ctx.monsters));
    lines.extend(format_section(&ctx.items));
    lines.extend(format_footer(&ctx.site));
    lines
}

pub fn format_list<E: CatalogEntity>(ctx: &ListContext<E>) -> Vec<String> {
    let mut lines = vec![format!("=== {} ===", ctx.site.site_name)];
    lines.extend(format_section(&ctx.records));
    lines.extend(format_footer(&ctx.site));
    lines
}

pub fn format_detail<E: CatalogEntity>(ctx: &DetailContext<E>) -> Vec<String> {
    let record = &ctx.record;
    let mut lines = vec![format!("=== {}: {} ===", ctx.kind.title(), record.key())];
    for (spec, value) in record.fields() {
        if spec.column == E::KEY_COLUMN {
            continue;
        }
        lines.push(format!("{}: {}", spec.label, display_value(value)));
    }
    lines.push(format!("Back: {}", Route::list(ctx.kind).path()));
    lines.extend(format_footer(&ctx.site));
    lines
}

pub fn format_not_found(ctx: &NotFoundContext) -> Vec<String> {
    vec![
        "=== 404 Not Found ===".to_string(),
        ctx.message.clone(),
        format!("Home: {}", Route::Home.path()),
    ]
}

pub fn format_page(page: &Page) -> Vec<String> {
    match page {
        Page::Home(ctx) => format_home(ctx),
        Page::SurvivorList(ctx) => format_list(ctx),
        Page::MonsterList(ctx) => format_list(ctx),
        Page::ItemList(ctx) => format_list(ctx),
        Page::SurvivorDetail(ctx) => format_detail(ctx),
        Page::MonsterDetail(ctx) => format_detail(ctx),
        Page::ItemDetail(ctx) => format_detail(ctx),
        Page::NotFound(ctx) => format_not_found(ctx),
    }
}

/// Render a page as text, one line per entry.
pub fn render_text(page: &Page) -> String {
    format_page(page).join("\n")
}

pub fn render_json(page: &Page) -> serde_json::Result<String> {
    serde_json::to_string_pretty(page)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
