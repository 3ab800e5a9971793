//! Test builders — ergonomic constructors for catalog records.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use licita_core::Record;
use serde_json::{Map, Value};

/// Fluent builder for [`Record`] test fixtures.
///
/// # Example
///
/// ```rust
/// let record = RecordBuilder::new("Edital nº 1/2025")
///     .uf("PR")
///     .ano("2025")
///     .municipio("Mandirituba")
///     .build();
/// ```
pub struct RecordBuilder {
    fields: Map<String, Value>,
}

impl RecordBuilder {
    pub fn new(title: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("title".to_string(), Value::String(title.to_string()));
        Self { fields }
    }

    /// Start from an entirely empty record, title included.
    pub fn empty() -> Self {
        Self { fields: Map::new() }
    }

    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn uf(self, uf: &str) -> Self {
        self.field("uf", uf)
    }

    pub fn ano(self, ano: &str) -> Self {
        self.field("ano", ano)
    }

    pub fn municipio(self, municipio: &str) -> Self {
        self.field("municipio_nome", municipio)
    }

    pub fn orgao(self, orgao: &str) -> Self {
        self.field("orgao_nome", orgao)
    }

    pub fn modalidade(self, modalidade: &str) -> Self {
        self.field("modalidade_licitacao_nome", modalidade)
    }

    pub fn situacao(self, situacao: &str) -> Self {
        self.field("situacao_nome", situacao)
    }

    pub fn descricao(self, descricao: &str) -> Self {
        self.field("description", descricao)
    }

    pub fn publicacao(self, timestamp: &str) -> Self {
        self.field("data_publicacao_pncp", timestamp)
    }

    pub fn vigencia(self, inicio: &str, fim: &str) -> Self {
        self.field("data_inicio_vigencia", inicio)
            .field("data_fim_vigencia", fim)
    }

    pub fn item_url(self, path: &str) -> Self {
        self.field("item_url", path)
    }

    pub fn valor_global(self, valor: f64) -> Self {
        self.field("valor_global", valor)
    }

    pub fn build(self) -> Record {
        Record::new(self.fields)
    }
}

/// Build a minimal notice with the three fields most filters touch.
pub fn notice(title: &str, uf: &str, ano: &str) -> Record {
    RecordBuilder::new(title).uf(uf).ano(ano).build()
}
