//! Migration v1: groups and tab records

pub(super) const SQL: &str = "
CREATE TABLE IF NOT EXISTS tab_groups (
    name TEXT PRIMARY KEY NOT NULL,
    tabs TEXT NOT NULL DEFAULT '[]',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS tabs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    group_name TEXT NOT NULL,
    title TEXT NOT NULL,
    url TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_tabs_group ON tabs(group_name);
";
