//! Region → city → district dropdown chain.
//!
//! Every change of a controlling selector issues a new ticket for the dependent one;
//! a response is applied only while its ticket is still the latest (latest request
//! wins). Resets also advance the ticket, so a response that lands after the user
//! cleared the selection is dropped.

use crate::config::SelectorConfig;
use crate::model::OptionEntry;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    City,
    District,
}

impl Level {
    fn slot(self) -> usize {
        match self {
            Level::City => 0,
            Level::District => 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Full contents of one dependent `<select>`; the first option is the placeholder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OptionList {
    pub level: Level,
    pub options: Vec<SelectOption>,
}

impl OptionList {
    pub fn len(&self) -> usize { self.options.len() }
    pub fn is_empty(&self) -> bool { self.options.is_empty() }
    pub fn is_placeholder_only(&self) -> bool { self.options.len() == 1 }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    pub level: Level,
    pub endpoint: String,
    pub param: &'static str,
    pub value: String,
    pub ticket: u64,
}

impl FetchRequest {
    pub fn query(&self) -> [(&str, &str); 1] { [(self.param, self.value.as_str())] }

    /// Unencoded form, for diagnostics.
    pub fn url(&self) -> String { format!("{}?{}={}", self.endpoint, self.param, self.value) }
}

/// What the page has to do after a selector changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CascadeChange {
    /// Selectors to reset right away, already as placeholder-only lists.
    pub resets: Vec<OptionList>,
    pub fetch: Option<FetchRequest>,
}

pub struct Cascade {
    config: SelectorConfig,
    tickets: [u64; 2],
}

impl Cascade {
    pub fn new(config: SelectorConfig) -> Self { Cascade { config, tickets: [0; 2] } }

    pub fn config(&self) -> &SelectorConfig { &self.config }

    pub fn current_ticket(&self, level: Level) -> u64 { self.tickets[level.slot()] }

    pub fn on_region_change(&mut self, region_id: &str) -> CascadeChange {
        if region_id.is_empty() {
            self.bump(Level::City);
            self.bump(Level::District);
            return CascadeChange {
                resets: vec![self.placeholder_only(Level::City), self.placeholder_only(Level::District)],
                fetch: None,
            };
        }
        CascadeChange { resets: Vec::new(), fetch: Some(self.request(Level::City, region_id)) }
    }

    pub fn on_city_change(&mut self, city_id: &str) -> CascadeChange {
        if city_id.is_empty() {
            self.bump(Level::District);
            return CascadeChange { resets: vec![self.placeholder_only(Level::District)], fetch: None };
        }
        CascadeChange { resets: Vec::new(), fetch: Some(self.request(Level::District, city_id)) }
    }

    /// Builds the new option list for a completed fetch, or `None` if a newer change
    /// superseded `req`.
    pub fn apply_response(&self, req: &FetchRequest, entries: &[OptionEntry]) -> Option<OptionList> {
        let current = self.current_ticket(req.level);
        if req.ticket != current {
            tracing::debug!(level = ?req.level, ticket = req.ticket, current, "dropping stale options response");
            return None;
        }
        let mut list = self.placeholder_only(req.level);
        list.options.extend(entries.iter().map(|e| SelectOption { value: e.id.to_string(), label: e.name.clone() }));
        Some(list)
    }

    pub fn placeholder_only(&self, level: Level) -> OptionList {
        let label = match level {
            Level::City => &self.config.city_placeholder,
            Level::District => &self.config.district_placeholder,
        };
        OptionList { level, options: vec![SelectOption { value: String::new(), label: label.clone() }] }
    }

    fn request(&mut self, level: Level, value: &str) -> FetchRequest {
        let ticket = self.bump(level);
        let (endpoint, param) = match level {
            Level::City => (&self.config.cities_endpoint, "region_id"),
            Level::District => (&self.config.districts_endpoint, "city_id"),
        };
        FetchRequest { level, endpoint: endpoint.clone(), param, value: value.to_string(), ticket }
    }

    fn bump(&mut self, level: Level) -> u64 {
        let t = &mut self.tickets[level.slot()];
        *t = t.wrapping_add(1);
        *t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    #[traced_test]
    fn stale_drop_is_logged() {
        let mut c = Cascade::new(SelectorConfig::default());
        let old = c.on_city_change("1").fetch.unwrap();
        c.on_city_change("2");
        assert!(c.apply_response(&old, &[]).is_none());
        assert!(logs_contain("dropping stale options response"));
    }
}
