//! Record normalizer — canonical display shape for one notice.
//!
//! [`NoticeSummary::from_record`] flattens a raw record into the fixed,
//! ordered set of labelled display fields used by the detail view and the
//! spreadsheet-style exports. Missing values become `"N/A"`, dates go
//! through the legacy long format, and the monetary value gets a currency
//! prefix with thousands separators. Pure function of the record.

use crate::dates::{format_long, PLACEHOLDER};
use crate::types::Record;

/// Host origin every relative `item_url` is resolved against.
pub const PORTAL_ORIGIN: &str = "https://pncp.gov.br";

/// Canonical display mapping for one notice, labelled with the catalog's own
/// vocabulary. Field order here is the order every consumer renders in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeSummary {
    pub titulo: String,
    pub numero_controle: String,
    pub orgao: String,
    pub municipio: String,
    pub uf: String,
    pub modalidade: String,
    pub situacao: String,
    pub data_publicacao: String,
    pub data_inicio_vigencia: String,
    pub data_fim_vigencia: String,
    pub valor_global: String,
    pub url: String,
}

impl NoticeSummary {
    pub fn from_record(record: &Record) -> Self {
        NoticeSummary {
            titulo: text_or_placeholder(record, "title"),
            numero_controle: text_or_placeholder(record, "numero_controle_pncp"),
            orgao: text_or_placeholder(record, "orgao_nome"),
            municipio: text_or_placeholder(record, "municipio_nome"),
            uf: text_or_placeholder(record, "uf"),
            modalidade: text_or_placeholder(record, "modalidade_licitacao_nome"),
            situacao: text_or_placeholder(record, "situacao_nome"),
            data_publicacao: format_long(&record.text("data_publicacao_pncp")),
            data_inicio_vigencia: format_long(&record.text("data_inicio_vigencia")),
            data_fim_vigencia: format_long(&record.text("data_fim_vigencia")),
            valor_global: format_valor_global(record),
            url: absolute_url(&record.text("item_url")),
        }
    }

    /// Labelled fields in display order.
    pub fn fields(&self) -> [(&'static str, &str); 12] {
        [
            ("Título", self.titulo.as_str()),
            ("Número PNCP", self.numero_controle.as_str()),
            ("Órgão", self.orgao.as_str()),
            ("Município", self.municipio.as_str()),
            ("UF", self.uf.as_str()),
            ("Modalidade", self.modalidade.as_str()),
            ("Situação", self.situacao.as_str()),
            ("Data Publicação", self.data_publicacao.as_str()),
            ("Data Início Vigência", self.data_inicio_vigencia.as_str()),
            ("Data Fim Vigência", self.data_fim_vigencia.as_str()),
            ("Valor Global", self.valor_global.as_str()),
            ("URL", self.url.as_str()),
        ]
    }
}

fn text_or_placeholder(record: &Record, field: &str) -> String {
    let value = record.text(field);
    if value.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        value
    }
}

/// Zero and absent both mean "no global value published".
fn format_valor_global(record: &Record) -> String {
    match record.get("valor_global").and_then(|v| v.as_f64()) {
        Some(valor) if valor != 0.0 => format_currency(valor),
        _ => PLACEHOLDER.to_string(),
    }
}

/// `R$ ` prefix, comma thousands separators, two decimal digits.
pub fn format_currency(valor: f64) -> String {
    let negative = valor < 0.0;
    let cents = (valor.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("R$ {sign}{grouped}.{frac:02}")
}

/// Resolve a stored `item_url` path against the portal origin.
///
/// Already-absolute URLs pass through unchanged; a missing leading slash is
/// supplied; an empty path resolves to the bare origin.
pub fn absolute_url(path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    if path.is_empty() {
        return PORTAL_ORIGIN.to_string();
    }
    if path.starts_with('/') {
        format!("{PORTAL_ORIGIN}{path}")
    } else {
        format!("{PORTAL_ORIGIN}/{path}")
    }
}
