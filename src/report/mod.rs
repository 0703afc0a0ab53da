//! Report builder: the fixed section catalog of the dashboard.
//!
//! `build_report()` runs the aggregation pipeline once per section and
//! collects the results into a [`Report`], the view model consumed by the
//! TUI, the headless text printer, and the JSON export.
//!
//! Sections are independent: a builder that fails (typically a missing
//! question column) is logged, recorded under [`Report::skipped`], and the
//! remaining sections still render. Only the initial dataset load is fatal
//! to the run.

use crate::aggregate::{self, CrossTab, FrequencyTable, ScoreSummary};
use crate::dataset::Dataset;
use crate::domain::AggregateError;
use log::warn;
use serde::Serialize;

pub mod schema;
pub mod text;

/// Motivation entries shown per channel.
const TOP_MOTIVES: usize = 8;
/// Product categories shown per channel.
const TOP_PRODUCTS: usize = 10;
/// Abandonment reasons shown.
const TOP_ABANDONMENT: usize = 10;
/// Reasons highlighted in the abandonment summary panel.
const ABANDONMENT_HIGHLIGHTS: usize = 3;
/// Upper bound of both Likert scales.
pub const SCORE_MAX: f64 = 5.0;

/// The whole built report: headline KPIs plus the section catalog.
#[derive(Debug, Serialize)]
pub struct Report {
    pub respondents: usize,
    pub kpis: Kpis,
    pub sections: Vec<Section>,
    pub skipped: Vec<SkippedSection>,
}

/// Headline numbers shown above the sections.
#[derive(Debug, Serialize)]
pub struct Kpis {
    pub respondents: usize,
    pub top_channel: Option<ChannelShare>,
    pub online_trust_mean: Option<f64>,
}

/// The most popular purchase channel and its share of respondents.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelShare {
    pub channel: String,
    pub count: u64,
    pub share: f64,
}

/// A section that failed to build, with the reason it was skipped.
#[derive(Debug, Serialize)]
pub struct SkippedSection {
    pub title: &'static str,
    pub reason: String,
}

/// One dashboard section: a title plus the panels rendered side by side.
#[derive(Debug, Serialize)]
pub struct Section {
    pub title: &'static str,
    pub panels: Vec<Panel>,
}

#[derive(Debug, Serialize)]
pub struct Panel {
    pub title: String,
    pub body: PanelBody,
}

/// Panel payloads, one variant per chart/widget family of the dashboard.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PanelBody {
    /// Ranked bar list.
    Frequency { table: FrequencyTable },
    /// Normalized stacked bars (one per row, each summing to 100%).
    Stacked { crosstab: CrossTab },
    /// Score histogram with mean/median.
    Scores { summary: ScoreSummary },
    /// Label/value callouts.
    Metrics { metrics: Vec<Metric> },
    /// Key-takeaway list.
    Insights { insights: Vec<Insight> },
}

#[derive(Debug, Serialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Insight {
    pub label: &'static str,
    pub value: String,
}

type SectionBuilder = fn(&Dataset, &str) -> Result<Section, AggregateError>;

/// Build the full report from the loaded dataset.
///
/// `delimiter` separates the tokens of multi-select answers (the survey
/// export uses `;`).
#[must_use]
pub fn build_report(dataset: &Dataset, delimiter: &str) -> Report {
    let builders: [(&'static str, SectionBuilder); 7] = [
        ("Respondent profile", profile_section),
        ("Purchase channels", channels_section),
        ("Purchase motivations", motivations_section),
        ("Trust & experience", ratings_section),
        ("Product categories", products_section),
        ("Purchase abandonment", abandonment_section),
        ("Survey insights", insights_section),
    ];

    let mut sections = Vec::with_capacity(builders.len());
    let mut skipped = Vec::new();
    for (title, build) in builders {
        match build(dataset, delimiter) {
            Ok(section) => sections.push(section),
            Err(error) => {
                warn!("skipping section \"{title}\": {error}");
                skipped.push(SkippedSection { title, reason: error.to_string() });
            }
        }
    }

    Report { respondents: dataset.len(), kpis: build_kpis(dataset), sections, skipped }
}

/// Headline KPIs. Each is independently optional: a missing column or an
/// all-empty answer set downgrades the KPI to absent instead of failing.
fn build_kpis(dataset: &Dataset) -> Kpis {
    let respondents = dataset.len();

    let top_channel = match aggregate::rank(dataset, schema::PRIMARY_CHANNEL) {
        Ok(table) => table.normalized_by(respondents as u64).top().map(|entry| ChannelShare {
            channel: entry.label.clone(),
            count: entry.count,
            share: entry.percentage.unwrap_or(0.0),
        }),
        Err(error) => {
            warn!("channel KPI unavailable: {error}");
            None
        }
    };

    let online_trust_mean = match aggregate::score_summary(dataset, schema::ONLINE_TRUST) {
        Ok(summary) => summary.mean,
        Err(error) => {
            warn!("trust KPI unavailable: {error}");
            None
        }
    };

    Kpis { respondents, top_channel, online_trust_mean }
}

fn profile_section(dataset: &Dataset, _delimiter: &str) -> Result<Section, AggregateError> {
    Ok(Section {
        title: "Respondent profile",
        panels: vec![
            frequency_panel("Age band", aggregate::rank(dataset, schema::AGE_BAND)?),
            frequency_panel("Gender", aggregate::rank(dataset, schema::GENDER)?),
            frequency_panel(
                "Purchase frequency",
                aggregate::rank(dataset, schema::PURCHASE_FREQUENCY)?,
            ),
        ],
    })
}

fn channels_section(dataset: &Dataset, _delimiter: &str) -> Result<Section, AggregateError> {
    let crosstab = aggregate::cross_tabulate(dataset, schema::AGE_BAND, schema::PRIMARY_CHANNEL)?
        .with_row_order(&schema::AGE_BAND_ORDER);

    // Share of respondents, not of answers: blanks lower every percentage
    let distribution = aggregate::rank(dataset, schema::PRIMARY_CHANNEL)?
        .normalized_by(dataset.len() as u64);
    let metrics = distribution
        .entries()
        .iter()
        .map(|entry| Metric {
            label: entry.label.clone(),
            value: format!("{} respondents", entry.count),
            note: entry.percentage.map(|share| format!("{share}% of total")),
        })
        .collect();

    Ok(Section {
        title: "Purchase channels",
        panels: vec![
            Panel {
                title: "Channel preference by age band".to_string(),
                body: PanelBody::Stacked { crosstab },
            },
            Panel { title: "Overall channel split".to_string(), body: PanelBody::Metrics { metrics } },
        ],
    })
}

fn motivations_section(dataset: &Dataset, _delimiter: &str) -> Result<Section, AggregateError> {
    // Percent of all answers: normalize the full table, then truncate
    let online = aggregate::rank(dataset, schema::ONLINE_MOTIVE)?.normalized().head(TOP_MOTIVES);
    let store = aggregate::rank(dataset, schema::STORE_MOTIVE)?.normalized().head(TOP_MOTIVES);

    Ok(Section {
        title: "Purchase motivations",
        panels: vec![
            frequency_panel("Reasons to buy online", online),
            frequency_panel("Reasons to buy in store", store),
        ],
    })
}

fn ratings_section(dataset: &Dataset, _delimiter: &str) -> Result<Section, AggregateError> {
    let online = aggregate::score_summary(dataset, schema::ONLINE_TRUST)?;
    let store = aggregate::score_summary(dataset, schema::STORE_EXPERIENCE)?;
    let comparison = comparison_metrics(&online, &store);

    Ok(Section {
        title: "Trust & experience",
        panels: vec![
            Panel {
                title: "Trust in online purchases".to_string(),
                body: PanelBody::Scores { summary: online },
            },
            Panel {
                title: "In-store experience".to_string(),
                body: PanelBody::Scores { summary: store },
            },
            Panel {
                title: "Average comparison".to_string(),
                body: PanelBody::Metrics { metrics: comparison },
            },
        ],
    })
}

fn comparison_metrics(online: &ScoreSummary, store: &ScoreSummary) -> Vec<Metric> {
    let mut metrics = Vec::new();
    for (label, summary) in [("Online average", online), ("In-store average", store)] {
        if let Some(mean) = summary.mean {
            metrics.push(Metric {
                label: label.to_string(),
                value: format!("{mean:.2}/{SCORE_MAX:.0}"),
                note: summary.median.map(|median| format!("median {median:.0}")),
            });
        }
    }
    if let (Some(online_mean), Some(store_mean)) = (online.mean, store.mean) {
        let delta = store_mean - online_mean;
        let leader = if delta >= 0.0 { "In-store" } else { "Online" };
        metrics.push(Metric {
            label: "Leader".to_string(),
            value: leader.to_string(),
            note: Some(format!("ahead by {:.2} points", delta.abs())),
        });
    }
    metrics
}

fn products_section(dataset: &Dataset, delimiter: &str) -> Result<Section, AggregateError> {
    // Percent of shown: truncate to the top N, then normalize
    let online = aggregate::explode_multi_select(dataset, schema::ONLINE_PRODUCTS, delimiter)?
        .head(TOP_PRODUCTS)
        .normalized();
    let store = aggregate::explode_multi_select(dataset, schema::STORE_PRODUCTS, delimiter)?
        .head(TOP_PRODUCTS)
        .normalized();

    Ok(Section {
        title: "Product categories",
        panels: vec![
            frequency_panel("Top products bought online", online),
            frequency_panel("Top products bought in store", store),
        ],
    })
}

fn abandonment_section(dataset: &Dataset, delimiter: &str) -> Result<Section, AggregateError> {
    // Share of people: one respondent can cite several reasons, so
    // percentages use the respondent total rather than the mention total
    let reasons = aggregate::explode_multi_select(dataset, schema::ABANDONMENT, delimiter)?
        .normalized_by(dataset.len() as u64);
    let table = reasons.head(TOP_ABANDONMENT);

    let highlights = reasons
        .entries()
        .iter()
        .take(ABANDONMENT_HIGHLIGHTS)
        .enumerate()
        .map(|(position, entry)| Metric {
            label: format!("{}. {}", position + 1, entry.label),
            value: format!("{} mentions", entry.count),
            note: entry.percentage.map(|share| format!("{share}% of respondents")),
        })
        .collect();

    Ok(Section {
        title: "Purchase abandonment",
        panels: vec![
            frequency_panel("Reasons to abandon a purchase", table),
            Panel { title: "Top reasons".to_string(), body: PanelBody::Metrics { metrics: highlights } },
        ],
    })
}

/// Key takeaways. Every entry is a "top result" over some table, so each is
/// guarded: an empty table or a missing column omits the insight (with a
/// warning) instead of failing the section.
fn insights_section(dataset: &Dataset, delimiter: &str) -> Result<Section, AggregateError> {
    let mut insights = Vec::new();

    let single_selects: [(&str, &'static str); 5] = [
        (schema::AGE_BAND, "Dominant age band"),
        (schema::GENDER, "Dominant gender"),
        (schema::PURCHASE_FREQUENCY, "Most common purchase frequency"),
        (schema::ONLINE_MOTIVE, "Top reason to buy online"),
        (schema::STORE_MOTIVE, "Top reason to buy in store"),
    ];
    for (column, label) in single_selects {
        match aggregate::rank(dataset, column) {
            Ok(table) => {
                if let Some(top) = table.top() {
                    insights.push(Insight { label, value: top.label.clone() });
                }
            }
            Err(error) => warn!("insight \"{label}\" unavailable: {error}"),
        }
    }

    let multi_selects: [(&str, &'static str); 2] = [
        (schema::ONLINE_PRODUCTS, "Most bought online"),
        (schema::STORE_PRODUCTS, "Most bought in store"),
    ];
    for (column, label) in multi_selects {
        match aggregate::explode_multi_select(dataset, column, delimiter) {
            Ok(table) => {
                if let Some(top) = table.top() {
                    insights.push(Insight { label, value: top.label.clone() });
                }
            }
            Err(error) => warn!("insight \"{label}\" unavailable: {error}"),
        }
    }

    Ok(Section {
        title: "Survey insights",
        panels: vec![Panel {
            title: "Key takeaways".to_string(),
            body: PanelBody::Insights { insights },
        }],
    })
}

fn frequency_panel(title: &str, table: FrequencyTable) -> Panel {
    Panel { title: title.to_string(), body: PanelBody::Frequency { table } }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Quote header cells: some question texts contain commas.
    fn quoted_header(columns: &[&str]) -> String {
        columns.iter().map(|c| format!("\"{c}\"")).collect::<Vec<_>>().join(",")
    }

    fn all_columns() -> Vec<&'static str> {
        vec![
            schema::AGE_BAND,
            schema::GENDER,
            schema::PURCHASE_FREQUENCY,
            schema::PRIMARY_CHANNEL,
            schema::ONLINE_MOTIVE,
            schema::STORE_MOTIVE,
            schema::ONLINE_TRUST,
            schema::STORE_EXPERIENCE,
            schema::ONLINE_PRODUCTS,
            schema::STORE_PRODUCTS,
            schema::ABANDONMENT,
        ]
    }

    /// A miniature survey covering every schema column.
    fn full_dataset() -> Dataset {
        let header = quoted_header(&all_columns());
        let rows = [
            "18 a 24 anos,Feminino,Semanal,Online,Preço,Atendimento,4,5,Eletrônicos; Livros,Roupas,Frete caro",
            "25 a 34 anos,Masculino,Mensal,Online,Comodidade,Atendimento,5,4,Livros,Alimentos; Roupas,Frete caro; Propaganda enganosa",
            "25 a 34 anos,Feminino,Semanal,Loja física,Preço,Proximidade,3,4,Eletrônicos,Alimentos,",
        ];
        let csv = format!("{header}\n{}\n", rows.join("\n"));
        Dataset::from_reader(csv.as_bytes()).expect("fixture CSV should parse")
    }

    #[test]
    fn test_full_report_builds_every_section() {
        let dataset = full_dataset();
        let report = build_report(&dataset, ";");

        assert_eq!(report.respondents, 3);
        assert_eq!(report.sections.len(), 7);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_kpis_reflect_the_data() {
        let dataset = full_dataset();
        let report = build_report(&dataset, ";");

        let top = report.kpis.top_channel.expect("channel column present");
        assert_eq!(top.channel, "Online");
        assert_eq!(top.count, 2);
        assert!((top.share - 66.7).abs() < 0.01);

        let mean = report.kpis.online_trust_mean.expect("trust column present");
        assert!((mean - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_column_skips_only_its_sections() {
        let header = quoted_header(&[schema::PRIMARY_CHANNEL, schema::ONLINE_TRUST]);
        let csv = format!("{header}\nOnline,4\nLoja física,2\n");
        let dataset = Dataset::from_reader(csv.as_bytes()).expect("fixture CSV should parse");
        let report = build_report(&dataset, ";");

        // Channels section needs the age-band column -> skipped; insights
        // degrade gracefully and stay
        let built: Vec<&str> = report.sections.iter().map(|s| s.title).collect();
        assert!(built.contains(&"Survey insights"));
        assert!(!built.contains(&"Respondent profile"));

        let skipped: Vec<&str> = report.skipped.iter().map(|s| s.title).collect();
        assert!(skipped.contains(&"Respondent profile"));
        assert!(skipped.contains(&"Purchase channels"));

        // KPIs survive with what the dataset offers
        assert_eq!(report.kpis.top_channel.as_ref().map(|c| c.channel.as_str()), Some("Online"));
    }

    #[test]
    fn test_empty_dataset_yields_empty_but_valid_report() {
        let csv = format!("{}\n", quoted_header(&all_columns()));
        let dataset = Dataset::from_reader(csv.as_bytes()).expect("fixture CSV should parse");
        let report = build_report(&dataset, ";");

        assert_eq!(report.respondents, 0);
        assert_eq!(report.sections.len(), 7);
        // No answers -> no top channel, no trust mean, no insights; not a crash
        assert!(report.kpis.top_channel.is_none());
        assert!(report.kpis.online_trust_mean.is_none());
        let insights = report
            .sections
            .iter()
            .find(|s| s.title == "Survey insights")
            .expect("insights section built");
        match &insights.panels[0].body {
            PanelBody::Insights { insights } => assert!(insights.is_empty()),
            other => panic!("unexpected panel body: {other:?}"),
        }
    }

    #[test]
    fn test_motivations_normalize_before_truncation() {
        // 9 distinct motives, one dominant: percentages must be computed
        // against all 10 answers even though only 8 entries are shown
        let mut rows = vec!["Preço,".to_string(), "Preço,".to_string()];
        for i in 0..8 {
            rows.push(format!("Motivo {i},"));
        }
        let header = quoted_header(&[schema::ONLINE_MOTIVE, schema::STORE_MOTIVE]);
        let csv = format!("{header}\n{}\n", rows.join("\n"));
        let dataset = Dataset::from_reader(csv.as_bytes()).expect("fixture CSV should parse");

        let section = motivations_section(&dataset, ";").expect("section builds");
        let PanelBody::Frequency { table } = &section.panels[0].body else {
            panic!("expected frequency panel");
        };
        assert_eq!(table.len(), 8);
        assert_eq!(table.entries()[0].percentage, Some(20.0)); // 2 of 10, not 2 of 9 shown
    }
}
