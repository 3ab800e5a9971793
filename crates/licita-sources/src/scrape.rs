//! Best-effort portal scraper.
//!
//! The public search page has no stable markup contract, so extraction here
//! is heuristic by design: it looks for result-ish elements first, then
//! falls back to plain table rows. The output may be partial or empty and
//! carries null placeholders for whatever could not be recovered — the core
//! pipeline tolerates that without special-casing.

use anyhow::Context;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde_json::{Map, Value};
use tracing::debug;

use licita_core::config::Config;
use licita_core::Record;

use crate::api::SearchQuery;

/// Fields the scraper can never recover from markup; emitted as nulls so
/// scraped records have the same shape as API records.
const UNRECOVERABLE_FIELDS: [&str; 6] = [
    "municipio_nome",
    "uf",
    "modalidade_licitacao_nome",
    "situacao_nome",
    "numero_controle_pncp",
    "valor_global",
];

pub struct PortalScraper {
    http: reqwest::Client,
    base_url: String,
    search_path: String,
}

impl PortalScraper {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.api.timeout_secs))
            .user_agent(config.api.user_agent.clone())
            .build()
            .context("building portal scraper client")?;
        Ok(PortalScraper {
            http,
            base_url: config.portal.base_url.clone(),
            search_path: config.portal.search_path.clone(),
        })
    }

    /// Fetch the search page with the active filters and extract whatever
    /// notices the markup yields.
    pub async fn search(&self, query: &SearchQuery) -> anyhow::Result<Vec<Record>> {
        let url = format!("{}{}", self.base_url, self.search_path);
        let params = query.filters_for_portal();

        let html = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await
            .context("portal request failed")?
            .error_for_status()
            .context("portal returned an error status")?
            .text()
            .await
            .context("portal response was not readable text")?;

        let notices = extract_notices(&html);
        debug!(count = notices.len(), "portal scrape finished");
        Ok(notices)
    }
}

impl SearchQuery {
    /// The portal search page accepts the same filter names as the API but
    /// no pagination.
    fn filters_for_portal(&self) -> Vec<(&'static str, String)> {
        let filters = [
            ("uf", &self.uf),
            ("municipio", &self.municipio),
            ("orgao", &self.orgao),
            ("modalidade", &self.modalidade),
            ("situacao", &self.situacao),
            ("data_inicio", &self.data_inicio),
            ("data_fim", &self.data_fim),
        ];
        filters
            .into_iter()
            .filter_map(|(name, value)| {
                value
                    .as_deref()
                    .filter(|v| !v.is_empty())
                    .map(|v| (name, v.to_string()))
            })
            .collect()
    }
}

/// Extract notice records from search-page HTML.
///
/// First pass: elements whose class hints at a result entry. Second pass,
/// only when the first found nothing: plain table rows, header skipped.
pub fn extract_notices(html: &str) -> Vec<Record> {
    let document = Html::parse_document(html);
    let candidates =
        Selector::parse("div, tr, li").expect("static candidate selector must be valid");
    let class_hint =
        Regex::new("licitacao|item|resultado").expect("static class pattern must be valid");

    let mut notices: Vec<Record> = document
        .select(&candidates)
        .filter(|element| {
            element
                .value()
                .attr("class")
                .is_some_and(|class| class_hint.is_match(class))
        })
        .filter_map(|element| notice_from_element(&element))
        .collect();

    if notices.is_empty() {
        let tables = Selector::parse("table").expect("static table selector must be valid");
        let rows = Selector::parse("tr").expect("static row selector must be valid");
        for table in document.select(&tables) {
            for row in table.select(&rows).skip(1) {
                if let Some(record) = notice_from_row(&row) {
                    notices.push(record);
                }
            }
        }
    }

    notices
}

/// Result-entry heuristic: the element must contain a link whose text
/// mentions a notice. Publication date and organization are regex guesses
/// over the surrounding text.
fn notice_from_element(element: &ElementRef) -> Option<Record> {
    let links = Selector::parse("a").expect("static link selector must be valid");
    let link = element.select(&links).next()?;

    let title = collapsed_text(link);
    if title.is_empty() || !title.to_lowercase().contains("licita") {
        return None;
    }
    let href = link.value().attr("href").map(str::to_string);

    let surrounding = collapsed_text(*element);
    let date = Regex::new(r"\d{2}/\d{2}/\d{4}")
        .expect("static date pattern must be valid")
        .find(&surrounding)
        .map(|m| m.as_str().to_string());
    let orgao = Regex::new(r"[A-Z]{2,}[A-Z ]*")
        .expect("static organization pattern must be valid")
        .find(&surrounding)
        .map(|m| m.as_str().trim().to_string());

    Some(scraped_record(title, href, orgao, date))
}

/// Table-row fallback: first cell is the title (possibly linked), second the
/// organization, third the publication date.
fn notice_from_row(row: &ElementRef) -> Option<Record> {
    let cell_selector = Selector::parse("td, th").expect("static cell selector must be valid");
    let links = Selector::parse("a").expect("static link selector must be valid");

    let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
    if cells.len() < 2 {
        return None;
    }

    let title = collapsed_text(cells[0]);
    if title.is_empty() {
        return None;
    }
    let href = cells[0]
        .select(&links)
        .next()
        .and_then(|link| link.value().attr("href"))
        .map(str::to_string);
    let orgao = Some(collapsed_text(cells[1])).filter(|text| !text.is_empty());
    let date = cells
        .get(2)
        .map(|cell| collapsed_text(*cell))
        .filter(|text| !text.is_empty());

    Some(scraped_record(title, href, orgao, date))
}

fn collapsed_text(element: ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn scraped_record(
    title: String,
    item_url: Option<String>,
    orgao: Option<String>,
    data_publicacao: Option<String>,
) -> Record {
    let mut fields = Map::new();
    fields.insert("title".to_string(), Value::String(title));
    fields.insert("item_url".to_string(), optional(item_url));
    fields.insert("orgao_nome".to_string(), optional(orgao));
    fields.insert("data_publicacao_pncp".to_string(), optional(data_publicacao));
    for field in UNRECOVERABLE_FIELDS {
        fields.insert(field.to_string(), Value::Null);
    }
    Record::new(fields)
}

fn optional(value: Option<String>) -> Value {
    value.map(Value::String).unwrap_or(Value::Null)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
