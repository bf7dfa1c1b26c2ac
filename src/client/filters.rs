use std::time::{Duration, Instant};

use chrono::NaiveDate;

use super::debounce::Debounced;
use crate::model::Provider;

const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ProviderFilter {
    #[default]
    All,
    Only(Provider),
}

impl ProviderFilter {
    /// `"all"` or blank selects every provider.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" | "all" => ProviderFilter::All,
            other => ProviderFilter::Only(Provider::from(other)),
        }
    }
}

/// Creation-date bounds, both inclusive whole days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }
}

pub fn start_of_day(date: NaiveDate) -> Option<String> {
    date.and_hms_milli_opt(0, 0, 0, 0)
        .map(|dt| dt.format(DATE_TIME_FORMAT).to_string())
}

/// Last millisecond of `date` in UTC, so the range covers the whole day.
pub fn end_of_day(date: NaiveDate) -> Option<String> {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .map(|dt| dt.format(DATE_TIME_FORMAT).to_string())
}

/// Committed value of every filter, in a fixed order. Two equal keys name
/// the same listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FetchKey {
    pub name: String,
    pub path: String,
    pub provider: ProviderFilter,
    pub order: SortOrder,
    pub mimetype: String,
    pub date_range: DateRange,
    /// Parsed bounds; text that is not an unsigned integer counts as unset.
    pub size_min: Option<u64>,
    pub size_max: Option<u64>,
}

/// Filter inputs as the dashboard edits them. Text inputs are debounced,
/// selects and the date range apply immediately.
#[derive(Debug, Clone)]
pub struct FileFilters {
    name: Debounced<String>,
    path: Debounced<String>,
    mimetype: Debounced<String>,
    size_min: Debounced<String>,
    size_max: Debounced<String>,
    provider: ProviderFilter,
    order: SortOrder,
    date_range: DateRange,
}

impl FileFilters {
    pub fn new(debounce: Duration) -> Self {
        Self {
            name: Debounced::new(String::new(), debounce),
            path: Debounced::new(String::new(), debounce),
            mimetype: Debounced::new(String::new(), debounce),
            size_min: Debounced::new(String::new(), debounce),
            size_max: Debounced::new(String::new(), debounce),
            provider: ProviderFilter::All,
            order: SortOrder::Desc,
            date_range: DateRange::default(),
        }
    }

    pub fn set_name(&mut self, value: impl Into<String>, now: Instant) {
        self.name.set(value.into(), now);
    }

    pub fn set_path(&mut self, value: impl Into<String>, now: Instant) {
        self.path.set(value.into(), now);
    }

    pub fn set_mimetype(&mut self, value: impl Into<String>, now: Instant) {
        self.mimetype.set(value.into(), now);
    }

    pub fn set_size_min(&mut self, value: impl Into<String>, now: Instant) {
        self.size_min.set(value.into(), now);
    }

    pub fn set_size_max(&mut self, value: impl Into<String>, now: Instant) {
        self.size_max.set(value.into(), now);
    }

    pub fn set_provider(&mut self, provider: ProviderFilter) {
        self.provider = provider;
    }

    pub fn set_order(&mut self, order: SortOrder) {
        self.order = order;
    }

    pub fn set_date_range(&mut self, range: DateRange) {
        self.date_range = range;
    }

    pub fn name(&self) -> &str {
        self.name.pending()
    }

    pub fn path(&self) -> &str {
        self.path.pending()
    }

    pub fn mimetype(&self) -> &str {
        self.mimetype.pending()
    }

    pub fn size_min(&self) -> &str {
        self.size_min.pending()
    }

    pub fn size_max(&self) -> &str {
        self.size_max.pending()
    }

    pub fn provider(&self) -> &ProviderFilter {
        &self.provider
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn date_range(&self) -> DateRange {
        self.date_range
    }

    /// Commits every text field whose window has elapsed.
    pub fn poll(&mut self, now: Instant) -> bool {
        // no short-circuit: every field has to advance
        [
            self.name.poll(now),
            self.path.poll(now),
            self.mimetype.poll(now),
            self.size_min.poll(now),
            self.size_max.poll(now),
        ]
        .into_iter()
        .any(|changed| changed)
    }

    pub fn flush(&mut self) -> bool {
        [
            self.name.flush(),
            self.path.flush(),
            self.mimetype.flush(),
            self.size_min.flush(),
            self.size_max.flush(),
        ]
        .into_iter()
        .any(|changed| changed)
    }

    /// Earliest moment a pending text value will commit.
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.name.deadline(),
            self.path.deadline(),
            self.mimetype.deadline(),
            self.size_min.deadline(),
            self.size_max.deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    pub fn key(&self) -> FetchKey {
        FetchKey {
            name: self.name.committed().clone(),
            path: self.path.committed().clone(),
            provider: self.provider.clone(),
            order: self.order,
            mimetype: self.mimetype.committed().clone(),
            date_range: self.date_range,
            size_min: parse_size(self.size_min.committed()),
            size_max: parse_size(self.size_max.committed()),
        }
    }
}

/// Query parameters for `GET /files`. `None` fields are never sent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListQuery {
    pub name: Option<String>,
    pub location: Option<String>,
    pub provider: Option<Provider>,
    pub mimetype: Option<String>,
    pub created_at_from: Option<String>,
    pub created_at_to: Option<String>,
    pub size_from: Option<u64>,
    pub size_to: Option<u64>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub order: SortOrder,
    pub revalidate: bool,
}

impl ListQuery {
    pub fn from_key(key: &FetchKey) -> Self {
        Self {
            name: non_blank(&key.name),
            location: non_blank(&key.path),
            provider: match &key.provider {
                ProviderFilter::All => None,
                ProviderFilter::Only(provider) => Some(provider.clone()),
            },
            mimetype: non_blank(&key.mimetype).map(|m| m.to_lowercase()),
            created_at_from: key.date_range.from.and_then(start_of_day),
            created_at_to: key.date_range.to.and_then(end_of_day),
            size_from: key.size_min,
            size_to: key.size_max,
            limit: None,
            offset: None,
            order: key.order,
            revalidate: false,
        }
    }

    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("order", self.order.as_str().to_string())];

        if let Some(name) = &self.name {
            pairs.push(("name", name.clone()));
        }
        if let Some(location) = &self.location {
            pairs.push(("location", location.clone()));
        }
        if let Some(provider) = &self.provider {
            pairs.push(("provider", provider.to_string()));
        }
        if let Some(mimetype) = &self.mimetype {
            pairs.push(("mimetype", mimetype.clone()));
        }
        if let Some(from) = &self.created_at_from {
            pairs.push(("createdAtFrom", from.clone()));
        }
        if let Some(to) = &self.created_at_to {
            pairs.push(("createdAtTo", to.clone()));
        }
        if let Some(size) = self.size_from {
            pairs.push(("sizeFrom", size.to_string()));
        }
        if let Some(size) = self.size_to {
            pairs.push(("sizeTo", size.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        if self.revalidate {
            pairs.push(("revalidate", "true".to_string()));
        }

        pairs
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_size(value: &str) -> Option<u64> {
    value.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(pairs: &[(&'static str, String)]) -> Vec<&'static str> {
        pairs.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn test_default_query_only_sends_order() {
        let filters = FileFilters::new(Duration::ZERO);
        let query = ListQuery::from_key(&filters.key());
        assert_eq!(query.pairs(), vec![("order", "desc".to_string())]);
    }

    #[test]
    fn test_unset_fields_do_not_leak_between_keys() {
        let now = Instant::now();
        let mut filters = FileFilters::new(Duration::ZERO);
        filters.set_name("report", now);
        filters.set_path("/docs", now);
        filters.set_mimetype("Image/PNG", now);
        filters.set_size_min("500", now);
        filters.set_size_max("9000", now);
        filters.set_provider(ProviderFilter::Only(Provider::ImageKit));
        filters.set_date_range(DateRange::new(NaiveDate::from_ymd_opt(2024, 1, 1), None));
        filters.poll(now);

        let full = ListQuery::from_key(&filters.key()).pairs();
        assert_eq!(
            names(&full),
            vec!["order", "name", "location", "provider", "mimetype", "createdAtFrom", "sizeFrom", "sizeTo"]
        );
        assert!(full.contains(&("mimetype", "image/png".to_string())));
        assert!(full.contains(&("provider", "imagekit".to_string())));

        filters.set_name("", now);
        filters.set_path("   ", now);
        filters.set_size_max("", now);
        filters.set_provider(ProviderFilter::All);
        filters.set_date_range(DateRange::default());
        filters.poll(now);

        let narrowed = ListQuery::from_key(&filters.key()).pairs();
        assert_eq!(names(&narrowed), vec!["order", "mimetype", "sizeFrom"]);
    }

    #[test]
    fn test_date_range_covers_whole_final_day() {
        let key = FetchKey {
            date_range: DateRange::new(
                NaiveDate::from_ymd_opt(2024, 1, 1),
                NaiveDate::from_ymd_opt(2024, 1, 5),
            ),
            ..FetchKey::default()
        };
        let query = ListQuery::from_key(&key);
        assert_eq!(query.created_at_from.as_deref(), Some("2024-01-01T00:00:00.000Z"));
        assert_eq!(query.created_at_to.as_deref(), Some("2024-01-05T23:59:59.999Z"));
    }

    #[test]
    fn test_invalid_size_is_omitted() {
        let now = Instant::now();
        let mut filters = FileFilters::new(Duration::ZERO);
        filters.set_size_min("lots", now);
        filters.set_size_max("-4", now);
        filters.poll(now);

        assert_eq!(filters.key(), FetchKey::default());
        let query = ListQuery::from_key(&filters.key());
        assert_eq!(query.size_from, None);
        assert_eq!(query.size_to, None);
    }

    #[test]
    fn test_equivalent_size_text_shares_key() {
        let now = Instant::now();
        let mut filters = FileFilters::new(Duration::ZERO);

        filters.set_size_min("500", now);
        filters.poll(now);
        let key = filters.key();
        assert_eq!(key.size_min, Some(500));

        for text in [" 500", "0500", "500 "] {
            filters.set_size_min(text, now);
            filters.poll(now);
            assert_eq!(filters.key(), key);
        }
    }

    #[test]
    fn test_selects_apply_immediately_text_waits() {
        let now = Instant::now();
        let mut filters = FileFilters::new(Duration::from_millis(500));
        let initial = filters.key();

        filters.set_name("cat", now);
        assert_eq!(filters.key(), initial);
        assert_eq!(filters.name(), "cat");
        assert_eq!(filters.next_deadline(), Some(now + Duration::from_millis(500)));

        filters.set_order(SortOrder::Asc);
        assert_ne!(filters.key(), initial);
        assert_eq!(filters.key().name, "");

        assert!(filters.poll(now + Duration::from_millis(500)));
        assert_eq!(filters.key().name, "cat");
    }

    #[test]
    fn test_provider_filter_parse() {
        assert_eq!(ProviderFilter::parse("all"), ProviderFilter::All);
        assert_eq!(ProviderFilter::parse(""), ProviderFilter::All);
        assert_eq!(
            ProviderFilter::parse("google-cloud-storage"),
            ProviderFilter::Only(Provider::GoogleCloudStorage)
        );
    }
}
