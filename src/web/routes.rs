//! Site paths for the catalog pages.
//!
//! Detail paths embed the record key as one percent-encoded segment, so names with spaces
//! or slashes ("Stone Golem", "MUL-T", "AtG Missile Mk. 1") round-trip through
//! [`Route::path`] and [`Route::resolve`].

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::catalog::EntityKind;

/// Unreserved URL characters stay literal; everything else in a key is encoded.
const KEY_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    SurvivorList,
    SurvivorDetail(String),
    MonsterList,
    MonsterDetail(String),
    ItemList,
    ItemDetail(String),
}

impl Route {
    pub fn list(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Monster => Route::MonsterList,
            EntityKind::Item => Route::ItemList,
            EntityKind::Survivor => Route::SurvivorList,
        }
    }

    pub fn detail(kind: EntityKind, key: impl Into<String>) -> Self {
        let key = key.into();
        match kind {
            EntityKind::Monster => Route::MonsterDetail(key),
            EntityKind::Item => Route::ItemDetail(key),
            EntityKind::Survivor => Route::SurvivorDetail(key),
        }
    }

    /// Route name, e.g. `survivor-detail`.
    pub fn name(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::SurvivorList => "survivor-list",
            Route::SurvivorDetail(_) => "survivor-detail",
            Route::MonsterList => "monster-list",
            Route::MonsterDetail(_) => "monster-detail",
            Route::ItemList => "item-list",
            Route::ItemDetail(_) => "item-detail",
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::SurvivorList => "/survivors/".to_string(),
            Route::MonsterList => "/monsters/".to_string(),
            Route::ItemList => "/items/".to_string(),
            Route::SurvivorDetail(key) => format!("/survivor/{}/", encode_key(key)),
            Route::MonsterDetail(key) => format!("/monster/{}/", encode_key(key)),
            Route::ItemDetail(key) => format!("/item/{}/", encode_key(key)),
        }
    }

    /// Parse a site path. The trailing slash is optional; unknown paths give `None`.
    pub fn resolve(path: &str) -> Option<Self> {
        let trimmed = path.trim().trim_start_matches('/');
        let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
        if trimmed.is_empty() {
            return Some(Route::Home);
        }

        let segments: Vec<&str> = trimmed.split('/').collect();
        match segments.as_slice() {
            ["survivors"] => Some(Route::SurvivorList),
            ["monsters"] => Some(Route::MonsterList),
            ["items"] => Some(Route::ItemList),
            ["survivor", key] => decode_key(key).map(Route::SurvivorDetail),
            ["monster", key] => decode_key(key).map(Route::MonsterDetail),
            ["item", key] => decode_key(key).map(Route::ItemDetail),
            _ => None,
        }
    }
}

fn encode_key(key: &str) -> String {
    utf8_percent_encode(key, KEY_SEGMENT).to_string()
}

fn decode_key(segment: &str) -> Option<String> {
    if segment.is_empty() {
        return None;
    }
    percent_decode_str(segment)
        .decode_utf8()
        .ok()
        .map(|key| key.into_owned())
}
