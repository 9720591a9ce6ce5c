//! Paginated report document.
//!
//! Layout is expressed as data: `build_report` assembles a fixed-order list
//! of typed sections, and any `ReportRenderer` consumes that list. The
//! bundled `TextRenderer` produces a paged plain-text document; other
//! backends (PDF, HTML) implement the same trait against the same sections.
//!
//! Renderers are pure: identical sections in, byte-identical output out.
//! The generation date is an input, never read from the clock here.

use crate::engine::{line_emissions, validate_entry};
use crate::format::{format_emissions, format_kg, format_quantity};
use crate::models::{CalculationData, Equivalencies, Scope, ScopeTotals};

/// Platform name shown in the title block.
pub const PLATFORM_NAME: &str = "Carbon Insight";

/// Report title shown in the title block.
pub const REPORT_TITLE: &str = "Greenhouse Gas Emissions Report";

/// Fixed attribution string carried in every page footer.
pub const FOOTER_ATTRIBUTION: &str = "Generated by Carbon Insight";

/// Methodology disclaimer closing the equivalencies section.
pub const METHODOLOGY_NOTE: &str = "Emission factors follow the GHG Protocol Corporate Standard \
and draw on published EPA and DEFRA conversion factors. Equivalency figures follow the EPA \
Greenhouse Gas Equivalencies Calculator and are approximate.";

/// One label/value line of the executive summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub label: String,
    pub value: String,
}

/// One entry row of a per-scope table, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeTableRow {
    pub source: String,
    pub activity_data: String,
    pub unit: String,
    pub emission_factor: String,
    pub emissions: String,
}

/// Report sections in their contract order. The renderer must not reorder
/// them and must not split a table or the equivalencies block mid-row.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportSection {
    Title {
        organization: String,
        generated_on: String,
    },
    Summary {
        rows: Vec<SummaryRow>,
    },
    ScopeTable {
        scope: Scope,
        rows: Vec<ScopeTableRow>,
        total: String,
    },
    Equivalencies {
        lines: Vec<String>,
        methodology: String,
    },
}

/// A fully assembled report, ready for any renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub sections: Vec<ReportSection>,
}

/// Assemble the section list in the fixed contract order: title, executive
/// summary, one table per non-empty scope, equivalencies. Entries failing
/// the validation gate are left out of the tables; an empty scope gets no
/// table at all.
pub fn build_report(
    data: &CalculationData,
    totals: &ScopeTotals,
    equivalencies: &Equivalencies,
    organization: &str,
    generated_on: &str,
) -> Report {
    let mut sections = Vec::new();

    sections.push(ReportSection::Title {
        organization: organization.to_string(),
        generated_on: generated_on.to_string(),
    });

    let mut summary = vec![SummaryRow {
        label: "Total Emissions".into(),
        value: format_emissions(totals.total),
    }];
    for scope in Scope::ALL {
        summary.push(SummaryRow {
            label: scope.summary_label().into(),
            value: format_emissions(totals.scope(scope)),
        });
    }
    sections.push(ReportSection::Summary { rows: summary });

    for scope in Scope::ALL {
        let rows: Vec<ScopeTableRow> = data
            .entries(scope)
            .iter()
            .filter(|e| validate_entry(e).is_valid)
            .map(|e| ScopeTableRow {
                source: e.source.clone(),
                activity_data: e.activity_data.map(format_quantity).unwrap_or_default(),
                unit: e.unit.clone(),
                emission_factor: e.emission_factor.map(format_quantity).unwrap_or_default(),
                emissions: format_kg(line_emissions(e.activity_data, e.emission_factor)),
            })
            .collect();
        if rows.is_empty() {
            continue;
        }
        sections.push(ReportSection::ScopeTable {
            scope,
            rows,
            total: format_kg(totals.scope(scope)),
        });
    }

    sections.push(ReportSection::Equivalencies {
        lines: vec![
            format!("{:.2} passenger vehicles driven for one year", equivalencies.cars),
            format!("{} tree seedlings grown for ten years", equivalencies.trees),
            format!("{:.3} homes' energy use for one year", equivalencies.homes),
            format!("{} smartphones charged", equivalencies.smartphones),
            format!("{} miles flown on a passenger aircraft", equivalencies.flight_miles),
        ],
        methodology: METHODOLOGY_NOTE.to_string(),
    });

    Report { sections }
}

/// Rendering capability over the section list.
pub trait ReportRenderer {
    fn render(&self, report: &Report) -> String;
}

/// Character width of the rendered page.
const PAGE_WIDTH: usize = 72;

/// Lines reserved at the bottom of every page for the footer.
const FOOTER_LINES: usize = 2;

/// Column widths of the per-scope tables: source, activity, unit, factor;
/// the emissions column takes the remaining 19 characters of the page.
const COL_WIDTHS: [usize; 4] = [20, 14, 10, 9];

/// Plain-text paginated renderer.
///
/// A section that no longer fits on the current page starts a new page
/// instead of splitting mid-row; only a section taller than a whole page
/// body flows across pages at line granularity.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    pub lines_per_page: usize,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self { lines_per_page: 60 }
    }
}

impl ReportRenderer for TextRenderer {
    fn render(&self, report: &Report) -> String {
        let capacity = self.lines_per_page.saturating_sub(FOOTER_LINES).max(1);

        let mut pages: Vec<Vec<String>> = Vec::new();
        let mut current: Vec<String> = Vec::new();

        for section in &report.sections {
            let block = section_lines(section);
            let fits_fresh = block.len() <= capacity;
            if !current.is_empty() && current.len() + block.len() > capacity && fits_fresh {
                pages.push(std::mem::take(&mut current));
            }
            for line in block {
                if current.len() == capacity {
                    pages.push(std::mem::take(&mut current));
                }
                current.push(line);
            }
        }
        if !current.is_empty() {
            pages.push(current);
        }

        let total_pages = pages.len();
        let mut out = String::new();
        for (i, page) in pages.iter().enumerate() {
            for line in page {
                out.push_str(line);
                out.push('\n');
            }
            for _ in page.len()..capacity {
                out.push('\n');
            }
            out.push('\n');
            out.push_str(&footer_line(i + 1, total_pages));
            out.push('\n');
            if i + 1 < total_pages {
                out.push('\u{000C}');
                out.push('\n');
            }
        }
        out
    }
}

fn footer_line(page: usize, total: usize) -> String {
    let indicator = format!("Page {page} of {total}");
    let pad = PAGE_WIDTH.saturating_sub(FOOTER_ATTRIBUTION.len() + indicator.len());
    format!("{FOOTER_ATTRIBUTION}{}{indicator}", " ".repeat(pad))
}

fn rule(ch: char) -> String {
    std::iter::repeat(ch).take(PAGE_WIDTH).collect()
}

fn center(text: &str) -> String {
    format!("{text:^PAGE_WIDTH$}").trim_end().to_string()
}

fn table_row(cells: [&str; 5]) -> String {
    let mut line = String::new();
    for (cell, width) in cells.iter().take(4).zip(COL_WIDTHS) {
        line.push_str(&format!("{cell:<width$}"));
    }
    line.push_str(cells[4]);
    line.trim_end().to_string()
}

fn section_lines(section: &ReportSection) -> Vec<String> {
    match section {
        ReportSection::Title {
            organization,
            generated_on,
        } => vec![
            rule('='),
            center(PLATFORM_NAME),
            center(REPORT_TITLE),
            String::new(),
            format!("Organization: {organization}"),
            format!("Generated: {generated_on}"),
            rule('='),
            String::new(),
        ],
        ReportSection::Summary { rows } => {
            let mut lines = vec!["EXECUTIVE SUMMARY".to_string(), rule('-')];
            for row in rows {
                lines.push(format!("{:<32}{}", row.label, row.value));
            }
            lines.push(String::new());
            lines
        }
        ReportSection::ScopeTable { scope, rows, total } => {
            let mut lines = vec![
                format!("{} EMISSIONS", scope.label().to_uppercase()),
                rule('-'),
                table_row(["Source", "Activity Data", "Unit", "Factor", "Emissions (kg CO2e)"]),
            ];
            for row in rows {
                lines.push(table_row([
                    &row.source,
                    &row.activity_data,
                    &row.unit,
                    &row.emission_factor,
                    &row.emissions,
                ]));
            }
            lines.push(rule('-'));
            lines.push(table_row([
                &format!("{} Total", scope.label()),
                "",
                "",
                "",
                total,
            ]));
            lines.push(String::new());
            lines
        }
        ReportSection::Equivalencies { lines: items, methodology } => {
            let mut lines = vec!["EMISSIONS IN CONTEXT".to_string(), rule('-')];
            lines.push("This footprint is equivalent to any one of the following:".to_string());
            for item in items {
                lines.push(format!("  - {item}"));
            }
            lines.push(String::new());
            lines.extend(wrap(methodology, PAGE_WIDTH));
            lines.push(String::new());
            lines
        }
    }
}

/// Deterministic greedy word wrap.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::totals;
    use crate::equivalency::equivalencies;
    use crate::models::{CalculationEntry, EquivalencyFactor, EquivalencyFactors};

    fn entry(scope: Scope, source: &str, activity: f64, factor: f64) -> CalculationEntry {
        CalculationEntry {
            scope,
            category: "stationaryCombustion".into(),
            source: source.into(),
            activity_data: Some(activity),
            unit: "m3".into(),
            emission_factor: Some(factor),
        }
    }

    fn sample_factors() -> EquivalencyFactors {
        EquivalencyFactors {
            passenger_vehicles_per_year: EquivalencyFactor { factor: 0.000217 },
            trees_needed: EquivalencyFactor { factor: 0.0165 },
            homes_energy_use: EquivalencyFactor { factor: 0.000133 },
            smartphone_charges: EquivalencyFactor { factor: 121.643 },
            miles_on_flight: EquivalencyFactor { factor: 3.92 },
        }
    }

    fn sample_report(data: &CalculationData) -> Report {
        let t = totals(data);
        let eq = equivalencies(t.total, Some(&sample_factors()));
        build_report(data, &t, &eq, "Acme Corp", "2026-08-07")
    }

    fn sample_data() -> CalculationData {
        CalculationData {
            scope1: vec![entry(Scope::Scope1, "naturalGas", 100.0, 2.01)],
            scope2: vec![entry(Scope::Scope2, "gridAverage", 5000.0, 0.39)],
            scope3: vec![],
        }
    }

    #[test]
    fn sections_appear_in_contract_order() {
        let report = sample_report(&sample_data());
        assert!(matches!(report.sections[0], ReportSection::Title { .. }));
        assert!(matches!(report.sections[1], ReportSection::Summary { .. }));
        assert!(matches!(
            report.sections[2],
            ReportSection::ScopeTable { scope: Scope::Scope1, .. }
        ));
        assert!(matches!(
            report.sections[3],
            ReportSection::ScopeTable { scope: Scope::Scope2, .. }
        ));
        assert!(matches!(report.sections.last(), Some(ReportSection::Equivalencies { .. })));
        // scope3 has no entries, so no table for it
        assert_eq!(report.sections.len(), 5);
    }

    #[test]
    fn summary_formats_tonnes_at_the_threshold() {
        let report = sample_report(&sample_data());
        let ReportSection::Summary { rows } = &report.sections[1] else {
            panic!("expected summary");
        };
        // total = 201 + 1950 = 2151 kg -> tonnes
        assert_eq!(rows[0].value, "2.15 tonnes CO2e");
        assert_eq!(rows[1].value, "201.00 kg CO2e");
        assert_eq!(rows[2].value, "1.95 tonnes CO2e");
        assert_eq!(rows[3].value, "0.00 kg CO2e");
    }

    #[test]
    fn invalid_entries_are_excluded_from_tables_without_aborting_siblings() {
        let mut data = sample_data();
        data.scope1.insert(0, {
            let mut bad = entry(Scope::Scope1, "heatingOil", 1.0, 2.52);
            bad.activity_data = Some(0.0);
            bad
        });
        let report = sample_report(&data);
        let ReportSection::ScopeTable { rows, .. } = &report.sections[2] else {
            panic!("expected scope 1 table");
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].source, "naturalGas");
    }

    #[test]
    fn text_renderer_is_deterministic() {
        let report = sample_report(&sample_data());
        let renderer = TextRenderer::default();
        assert_eq!(renderer.render(&report), renderer.render(&report));
    }

    #[test]
    fn single_page_report_carries_page_one_of_one() {
        let rendered = TextRenderer::default().render(&sample_report(&sample_data()));
        assert!(rendered.contains("Page 1 of 1"));
        assert!(rendered.contains(PLATFORM_NAME));
        assert!(rendered.contains("Organization: Acme Corp"));
        assert!(rendered.contains("Generated: 2026-08-07"));
        assert!(rendered.contains("SCOPE 1 EMISSIONS"));
    }

    #[test]
    fn a_table_that_no_longer_fits_starts_a_new_page() {
        let mut data = CalculationData::default();
        for i in 0..40 {
            data.scope1.push(entry(Scope::Scope1, &format!("naturalGas{i}"), 1.0, 2.0));
        }
        let rendered = TextRenderer::default().render(&sample_report(&data));
        let pages: Vec<&str> = rendered.split('\u{000C}').collect();
        assert_eq!(pages.len(), 3);
        assert!(pages[0].contains("Page 1 of 3"));
        assert!(pages[1].contains("Page 2 of 3"));
        // the 46-line scope table did not fit under the title + summary, so
        // the whole table moved to page 2; equivalencies then no longer fit
        // under the table and moved to page 3
        assert!(!pages[0].contains("SCOPE 1 EMISSIONS"));
        assert!(pages[1].contains("SCOPE 1 EMISSIONS"));
        assert!(pages[1].contains("naturalGas0"));
        assert!(pages[2].contains("EMISSIONS IN CONTEXT"));
    }

    #[test]
    fn every_page_carries_the_attribution_footer() {
        let mut data = CalculationData::default();
        for i in 0..40 {
            data.scope1.push(entry(Scope::Scope1, &format!("src{i}"), 1.0, 2.0));
        }
        let rendered = TextRenderer::default().render(&sample_report(&data));
        for page in rendered.split('\u{000C}') {
            assert!(page.contains(FOOTER_ATTRIBUTION));
        }
    }

    #[test]
    fn equivalency_section_lists_all_five_categories_and_the_methodology() {
        let rendered = TextRenderer::default().render(&sample_report(&sample_data()));
        assert!(rendered.contains("passenger vehicles driven for one year"));
        assert!(rendered.contains("tree seedlings grown for ten years"));
        assert!(rendered.contains("homes' energy use for one year"));
        assert!(rendered.contains("smartphones charged"));
        assert!(rendered.contains("miles flown on a passenger aircraft"));
        assert!(rendered.contains("GHG Protocol Corporate Standard"));
    }
}
