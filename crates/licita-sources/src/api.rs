//! Catalog search API client.
//!
//! Thin wrapper over `GET {base_url}/catalog/items`. Server-side filters are
//! forwarded as query parameters; the response envelope (an object with an
//! `items` array) goes straight through `records_from_value`. Request
//! failures surface as errors so the caller can decide on a fallback.

use std::time::Duration;

use anyhow::Context;
use serde_json::Value;
use tracing::debug;

use licita_core::config::Config;
use licita_core::{records_from_value, Record};

/// Server-side search parameters. All filters are optional; pagination
/// defaults to the first page with the configured page size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub uf: Option<String>,
    pub municipio: Option<String>,
    pub orgao: Option<String>,
    pub modalidade: Option<String>,
    pub situacao: Option<String>,
    /// `YYYY-MM-DD`, inclusive lower bound on publication date.
    pub data_inicio: Option<String>,
    /// `YYYY-MM-DD`, inclusive upper bound on publication date.
    pub data_fim: Option<String>,
    pub pagina: u32,
    /// 0 means "use the configured page size".
    pub tamanho_pagina: u32,
}

impl Default for SearchQuery {
    fn default() -> Self {
        SearchQuery {
            uf: None,
            municipio: None,
            orgao: None,
            modalidade: None,
            situacao: None,
            data_inicio: None,
            data_fim: None,
            pagina: 1,
            tamanho_pagina: 0,
        }
    }
}

impl SearchQuery {
    /// Active filters as query parameters, without pagination.
    fn filter_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        let filters = [
            ("uf", &self.uf),
            ("municipio", &self.municipio),
            ("orgao", &self.orgao),
            ("modalidade", &self.modalidade),
            ("situacao", &self.situacao),
            ("data_inicio", &self.data_inicio),
            ("data_fim", &self.data_fim),
        ];
        for (name, value) in filters {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                params.push((name, value.to_string()));
            }
        }
        params
    }
}

pub struct PncpClient {
    http: reqwest::Client,
    base_url: String,
    page_size: u32,
    max_page_size: u32,
}

impl PncpClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .user_agent(config.api.user_agent.clone())
            .build()
            .context("building catalog API client")?;
        Ok(PncpClient {
            http,
            base_url: config.api.base_url.clone(),
            page_size: config.api.page_size,
            max_page_size: config.api.max_page_size,
        })
    }

    /// One page of catalog search results, newest publications first.
    pub async fn search(&self, query: &SearchQuery) -> anyhow::Result<Vec<Record>> {
        let url = format!("{}/catalog/items", self.base_url);
        let size = match query.tamanho_pagina {
            0 => self.page_size,
            requested => requested.min(self.max_page_size),
        };

        let mut params = vec![
            ("page", query.pagina.to_string()),
            ("size", size.to_string()),
            ("sort", "data_publicacao_pncp,desc".to_string()),
        ];
        params.extend(query.filter_params());

        debug!(url = url.as_str(), page = query.pagina, size, "catalog search");

        let body: Value = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await
            .context("catalog API request failed")?
            .error_for_status()
            .context("catalog API returned an error status")?
            .json()
            .await
            .context("catalog API response was not JSON")?;

        Ok(records_from_value(body)?)
    }

    /// Search by the organization's CNPJ (forwarded through the `orgao`
    /// parameter, as the catalog accepts either name or tax id there).
    pub async fn search_cnpj(&self, cnpj: &str, pagina: u32, tamanho: u32) -> anyhow::Result<Vec<Record>> {
        let query = SearchQuery {
            orgao: Some(cnpj.to_string()),
            pagina,
            tamanho_pagina: tamanho,
            ..SearchQuery::default()
        };
        self.search(&query).await
    }

    /// Search by municipality, optionally narrowed to a state.
    pub async fn search_municipio(
        &self,
        municipio: &str,
        uf: Option<&str>,
        pagina: u32,
        tamanho: u32,
    ) -> anyhow::Result<Vec<Record>> {
        let query = SearchQuery {
            municipio: Some(municipio.to_string()),
            uf: uf.map(str::to_string),
            pagina,
            tamanho_pagina: tamanho,
            ..SearchQuery::default()
        };
        self.search(&query).await
    }
}
