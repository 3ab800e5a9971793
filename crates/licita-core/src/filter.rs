//! Filter engine — conjunction of independent field predicates.
//!
//! Every criterion is optional; an absent or empty criterion always passes.
//! A record survives only if all active criteria hold. Relative order of
//! surviving records is preserved, and no predicate reads a field outside
//! its own contract.

use crate::types::Record;

/// One field-scoped predicate per member, combined with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Exact state-code match, case-insensitive.
    pub uf: Option<String>,
    /// Substring match against `municipio_nome`, case-insensitive.
    pub municipio: Option<String>,
    /// Substring match against `modalidade_licitacao_nome`, case-insensitive.
    pub modalidade: Option<String>,
    /// Substring match against `situacao_nome`, case-insensitive.
    pub situacao: Option<String>,
    /// Substring match against `orgao_nome`, case-insensitive.
    pub orgao: Option<String>,
    /// Exact string match against `ano`.
    pub ano: Option<String>,
    /// Free-text search over title, description, organization, municipality.
    pub search: Option<String>,
}

impl FilterCriteria {
    pub fn matches(&self, record: &Record) -> bool {
        if let Some(uf) = active(&self.uf) {
            if !record.text("uf").eq_ignore_ascii_case(uf) {
                return false;
            }
        }
        if !contains_term(&record.text("municipio_nome"), &self.municipio) {
            return false;
        }
        if !contains_term(&record.text("modalidade_licitacao_nome"), &self.modalidade) {
            return false;
        }
        if !contains_term(&record.text("situacao_nome"), &self.situacao) {
            return false;
        }
        if !contains_term(&record.text("orgao_nome"), &self.orgao) {
            return false;
        }
        if let Some(ano) = active(&self.ano) {
            if record.text("ano") != ano {
                return false;
            }
        }
        if let Some(term) = active(&self.search) {
            let compound = [
                record.text("title"),
                record.text("description"),
                record.text("orgao_nome"),
                record.text("municipio_nome"),
            ]
            .join(" ")
            .to_lowercase();
            if !compound.contains(&term.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

/// Keep the records that satisfy all active criteria, in their original
/// relative order.
pub fn filter(records: Vec<Record>, criteria: &FilterCriteria) -> Vec<Record> {
    records
        .into_iter()
        .filter(|record| criteria.matches(record))
        .collect()
}

/// An empty criterion string counts as absent.
fn active(criterion: &Option<String>) -> Option<&str> {
    criterion.as_deref().filter(|term| !term.is_empty())
}

/// Case-insensitive substring predicate. A missing field value is the empty
/// string, so it never matches a non-empty term.
fn contains_term(value: &str, criterion: &Option<String>) -> bool {
    match active(criterion) {
        None => true,
        Some(term) => value.to_lowercase().contains(&term.to_lowercase()),
    }
}
