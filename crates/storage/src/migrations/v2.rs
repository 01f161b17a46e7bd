//! Migration v2: composite index for per-group URL lookups during merge-writes

pub(super) const SQL: &str = "
CREATE INDEX IF NOT EXISTS idx_tabs_group_url ON tabs(group_name, url);
";
