//! Export formats for extracted listings.

use chrono::{DateTime, Local};
use clap::ValueEnum;
use placemark_core::{ExtractedListing, COLUMN_HEADERS};
use serde::Serialize;

/// Header of the leading column naming the keyword a row was found under.
const KEYWORD_HEADER: &str = "검색어";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    /// Tab-separated, one header row
    Tsv,
    /// Comma-separated with RFC 4180 quoting
    Csv,
    /// Metadata envelope plus full records
    Json,
}

impl Format {
    pub(crate) fn extension(self) -> &'static str {
        match self {
            Format::Tsv => "tsv",
            Format::Csv => "csv",
            Format::Json => "json",
        }
    }
}

/// Listings found for one keyword, or read from one input source.
#[derive(Debug)]
pub(crate) struct KeywordResults {
    pub keyword: String,
    pub listings: Vec<ExtractedListing>,
}

impl KeywordResults {
    pub(crate) fn new(keyword: impl Into<String>, listings: Vec<ExtractedListing>) -> Self {
        Self {
            keyword: keyword.into(),
            listings,
        }
    }
}

/// Run-level facts written alongside the listings.
#[derive(Debug, Serialize)]
pub(crate) struct RunMetadata {
    /// Keywords in the order they were run.
    pub keywords: Vec<String>,
    pub total_keywords: usize,
    #[serde(serialize_with = "rfc3339")]
    pub crawled_at: DateTime<Local>,
    pub total_places: usize,
}

fn rfc3339<S: serde::Serializer>(at: &DateTime<Local>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339())
}

impl RunMetadata {
    pub(crate) fn for_results(results: &[KeywordResults], crawled_at: DateTime<Local>) -> Self {
        Self {
            keywords: results.iter().map(|r| r.keyword.clone()).collect(),
            total_keywords: results.len(),
            crawled_at,
            total_places: results.iter().map(|r| r.listings.len()).sum(),
        }
    }

    /// `placemark_<keyword>_<YYYYmmdd_HHMMSS>.<ext>`, with whitespace and
    /// path separators in the keyword replaced by `_`.
    ///
    /// Several keywords are named after the first one plus `_외<N>` for the rest.
    pub(crate) fn default_file_name(&self, format: Format) -> String {
        let label = match self.keywords.as_slice() {
            [] => "results".to_owned(),
            [only] => only.clone(),
            [first, rest @ ..] => format!("{first}_외{}", rest.len()),
        };
        let label: String = label
            .chars()
            .map(|c| {
                if c.is_whitespace() || matches!(c, '/' | '\\' | ':') {
                    '_'
                } else {
                    c
                }
            })
            .collect();
        format!(
            "placemark_{label}_{}.{}",
            self.crawled_at.format("%Y%m%d_%H%M%S"),
            format.extension()
        )
    }
}

/// One output row: a listing tagged with the keyword it was found under.
#[derive(Serialize)]
struct KeywordedListing<'a> {
    search_keyword: &'a str,
    #[serde(flatten)]
    listing: &'a ExtractedListing,
}

#[derive(Serialize)]
struct JsonExport<'a> {
    metadata: &'a RunMetadata,
    listings: Vec<KeywordedListing<'a>>,
}

/// Every listing across `results`, sorted by keyword and then rank.
///
/// Listings without a rank go last within their keyword; ties keep input order.
fn sorted_rows(results: &[KeywordResults]) -> Vec<KeywordedListing<'_>> {
    let mut rows: Vec<KeywordedListing<'_>> = results
        .iter()
        .flat_map(|set| {
            set.listings.iter().map(|listing| KeywordedListing {
                search_keyword: &set.keyword,
                listing,
            })
        })
        .collect();
    rows.sort_by(|a, b| {
        a.search_keyword
            .cmp(b.search_keyword)
            .then_with(|| rank_key(a.listing).cmp(&rank_key(b.listing)))
    });
    rows
}

fn rank_key(listing: &ExtractedListing) -> (bool, Option<u32>) {
    (listing.rank.is_none(), listing.rank)
}

pub(crate) fn render(
    results: &[KeywordResults],
    format: Format,
    metadata: &RunMetadata,
) -> anyhow::Result<String> {
    let rows = sorted_rows(results);
    match format {
        Format::Tsv => {
            let mut builder = csv::WriterBuilder::new();
            builder
                .delimiter(b'\t')
                .quote_style(csv::QuoteStyle::Never);
            render_table(&builder, &rows, true)
        }
        Format::Csv => render_table(&csv::WriterBuilder::new(), &rows, false),
        Format::Json => {
            let export = JsonExport {
                metadata,
                listings: rows,
            };
            let mut json = serde_json::to_string_pretty(&export)?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Writes the header and one record per row.
///
/// With `flatten_cells`, tabs and line breaks inside a cell become spaces;
/// unquoted TSV has no other way to keep the row structure intact.
fn render_table(
    builder: &csv::WriterBuilder,
    rows: &[KeywordedListing<'_>],
    flatten_cells: bool,
) -> anyhow::Result<String> {
    let cell = |value: &str| {
        if flatten_cells {
            value.replace(['\t', '\r', '\n'], " ")
        } else {
            value.to_owned()
        }
    };

    let mut writer = builder.from_writer(Vec::new());
    writer.write_record(std::iter::once(KEYWORD_HEADER).chain(COLUMN_HEADERS))?;
    for row in rows {
        let fields = row.listing.to_row();
        writer.write_record(
            std::iter::once(cell(row.search_keyword)).chain(fields.iter().map(|v| cell(v))),
        )?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush table output: {}", e.error()))?;
    Ok(String::from_utf8(bytes)?)
}
