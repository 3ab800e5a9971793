//! Output renderers — pure presentation over the filtered, sorted sequence.
//!
//! Each renderer writes the whole batch to the given writer and nothing
//! else; selecting one happens before any record is touched, so an unknown
//! format never produces partial output. Rendering the same sequence twice
//! yields byte-identical output.

use std::io::Write;
use std::str::FromStr;

use crate::dates::format_short;
use crate::error::Error;
use crate::normalize::absolute_url;
use crate::types::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    List,
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Error> {
        match name {
            "list" => Ok(OutputFormat::List),
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::List => write!(f, "list"),
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

pub fn render(records: &[Record], format: OutputFormat, out: &mut impl Write) -> Result<(), Error> {
    match format {
        OutputFormat::List => render_list(records, out),
        OutputFormat::Table => render_table(records, out),
        OutputFormat::Json => render_json(records, out),
        OutputFormat::Csv => render_csv(records, out),
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

pub fn render_list(records: &[Record], out: &mut impl Write) -> Result<(), Error> {
    for record in records {
        writeln!(
            out,
            "{} ({}, {})",
            record.text("title"),
            record.text("tipo_nome"),
            record.text("modalidade_licitacao_nome"),
        )?;
        writeln!(
            out,
            "- Situação: {} | Órgão: {} | {}/{} | Ano: {} | Seq: {}",
            record.text("situacao_nome"),
            record.text("orgao_nome"),
            record.text("municipio_nome"),
            record.text("uf"),
            record.text("ano"),
            record.text("numero_sequencial"),
        )?;
        writeln!(
            out,
            "- Vigência: {} → {}",
            format_short(&record.text("data_inicio_vigencia")),
            format_short(&record.text("data_fim_vigencia")),
        )?;
        writeln!(out, "- URL: {}", absolute_url(&record.text("item_url")))?;
        writeln!(out)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// Column key, header, and truncation width for the terminal table.
const TABLE_COLUMNS: [(&str, &str, usize); 10] = [
    ("ano", "Ano", 4),
    ("tipo_nome", "Tipo", 20),
    ("modalidade_licitacao_nome", "Modalidade", 22),
    ("situacao_nome", "Situação", 22),
    ("orgao_nome", "Órgão", 32),
    ("munuf", "Mun/UF", 22),
    ("title", "Título", 60),
    ("data_inicio_vigencia", "Início", 16),
    ("data_fim_vigencia", "Fim", 16),
    ("url", "URL", 60),
];

pub fn render_table(records: &[Record], out: &mut impl Write) -> Result<(), Error> {
    let header: Vec<String> = TABLE_COLUMNS
        .iter()
        .map(|(_, title, width)| cell(title, *width))
        .collect();
    writeln!(out, "{}", header.join(" | "))?;

    let separator: Vec<String> = TABLE_COLUMNS
        .iter()
        .map(|(_, _, width)| "-".repeat(*width))
        .collect();
    writeln!(out, "{}", separator.join("-+-"))?;

    for record in records {
        let row: Vec<String> = TABLE_COLUMNS
            .iter()
            .map(|(key, _, width)| cell(&column_value(record, key), *width))
            .collect();
        writeln!(out, "{}", row.join(" | "))?;
    }
    Ok(())
}

fn column_value(record: &Record, key: &str) -> String {
    match key {
        "munuf" => format!("{}/{}", record.text("municipio_nome"), record.text("uf")),
        "url" => absolute_url(&record.text("item_url")),
        "data_inicio_vigencia" | "data_fim_vigencia" => format_short(&record.text(key)),
        _ => record.text(key),
    }
}

/// Truncate to `width` characters (ellipsis marker on overflow) and
/// left-justify with spaces.
fn cell(value: &str, width: usize) -> String {
    let truncated = truncate(value, width);
    let padding = width.saturating_sub(truncated.chars().count());
    format!("{}{}", truncated, " ".repeat(padding))
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return value.chars().take(width).collect();
    }
    let mut cut: String = value.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// The exact record sequence, pretty-printed, original fields preserved.
pub fn render_json(records: &[Record], out: &mut impl Write) -> Result<(), Error> {
    serde_json::to_writer_pretty(&mut *out, records)?;
    writeln!(out)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Fixed export column list: the common catalog fields plus the computed
/// absolute URL. Extra record fields are dropped; missing ones emit empty.
const CSV_COLUMNS: [&str; 20] = [
    "id",
    "title",
    "description",
    "ano",
    "numero_sequencial",
    "numero_controle_pncp",
    "orgao_nome",
    "orgao_cnpj",
    "municipio_nome",
    "uf",
    "modalidade_licitacao_nome",
    "situacao_nome",
    "data_publicacao_pncp",
    "data_atualizacao_pncp",
    "data_inicio_vigencia",
    "data_fim_vigencia",
    "valor_global",
    "tipo_nome",
    "item_url",
    "url",
];

pub fn render_csv(records: &[Record], out: &mut impl Write) -> Result<(), Error> {
    let mut writer = csv::Writer::from_writer(&mut *out);
    writer.write_record(CSV_COLUMNS)?;
    for record in records {
        let row: Vec<String> = CSV_COLUMNS
            .iter()
            .map(|&column| match column {
                "url" => absolute_url(&record.text("item_url")),
                _ => record.text(column),
            })
            .collect();
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}
