//! Formatted terminal output.
//!
//! All user-facing text is assembled here so evaluators and the resolver
//! stay free of presentation concerns.

use crate::catalog::Catalog;
use crate::domain::{Field, FieldDependencySpec, Locale, ParameterSet, Severity, ZoneCode};
use crate::io::ingest::RowError;

use super::BatchSummary;

/// Parameter table for one parcel.
pub fn format_parameter_set(set: &ParameterSet, locale: Locale) -> String {
    let mut out = String::new();

    out.push_str(&format!("Legislation: {}\n", set.legislation));
    out.push_str(&format!("Municipality: {}\n\n", set.municipality));

    let (h_param, h_value, h_rule) = match locale {
        Locale::En => ("parameter", "value", "rule"),
        Locale::PtBr => ("parâmetro", "valor", "regra"),
    };
    out.push_str(format!("{:<20} {:<50} {}", h_param, h_value, h_rule).trim_end());
    out.push('\n');
    out.push_str(&format!("{:-<20} {:-<50} {:-<30}\n", "", "", ""));

    for p in set.iter() {
        let marker = if p.is_blocked() { "!" } else { " " };
        let line = format!(
            "{:<20} {:<50} {}",
            p.name.label(locale),
            format!("{marker}{}", truncate(&p.display_value(locale), 49)),
            p.rule
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

/// One line listing the mandatory fields an input is still missing.
pub fn format_missing_fields(missing: &[Field], locale: Locale) -> String {
    if missing.is_empty() {
        return String::new();
    }
    let labels: Vec<&str> = missing.iter().map(|f| f.label(locale)).collect();
    match locale {
        Locale::En => format!("Missing mandatory fields: {}\n", labels.join(", ")),
        Locale::PtBr => format!("Campos obrigatórios ausentes: {}\n", labels.join(", ")),
    }
}

/// Form requirements for a zone (and nature, when given).
pub fn format_dependencies(spec: &FieldDependencySpec, locale: Locale) -> String {
    let mut out = String::new();

    match spec.nature {
        Some(nature) => out.push_str(&format!("Zone {} / {}\n", spec.zone, nature.label(locale))),
        None => out.push_str(&format!("Zone {}\n", spec.zone)),
    }

    push_field_list(&mut out, "mandatory", &spec.mandatory, locale);
    push_field_list(&mut out, "optional", &spec.optional, locale);
    push_field_list(&mut out, "hidden", &spec.hidden, locale);

    for cond in &spec.conditional {
        let natures: Vec<&str> = cond.required_for.iter().map(|n| n.label(locale)).collect();
        out.push_str(&format!(
            "  conditional: {} (for {})\n",
            cond.field.label(locale),
            natures.join(", ")
        ));
    }

    for choice in &spec.choices {
        out.push_str(&format!("  {} options:\n", choice.field.label(locale)));
        for option in &choice.options {
            out.push_str(&format!("    - {option}\n"));
        }
    }

    if !spec.advisories.is_empty() {
        out.push('\n');
        for advisory in &spec.advisories {
            let tag = match advisory.severity() {
                Severity::Warning => "[warn]",
                Severity::Info => "[info]",
            };
            out.push_str(&format!("{tag} {}\n", advisory.text(locale)));
        }
    }

    if !spec.preview.is_empty() {
        out.push_str("\nPreview:\n");
        for entry in &spec.preview {
            let deps: Vec<&str> = entry.depends_on.iter().map(|f| f.key()).collect();
            let mut flags = Vec::new();
            if entry.conditional {
                flags.push("conditional");
            }
            if !entry.computable {
                flags.push("not computable");
            }
            let flags = if flags.is_empty() {
                String::new()
            } else {
                format!(" ({})", flags.join(", "))
            };
            out.push_str(&format!(
                "  {:<20} <- {}{flags}\n",
                entry.parameter.label(locale),
                deps.join(", ")
            ));
        }
    }

    out
}

fn push_field_list(out: &mut String, title: &str, fields: &[Field], locale: Locale) {
    if fields.is_empty() {
        return;
    }
    let labels: Vec<&str> = fields.iter().map(|f| f.label(locale)).collect();
    out.push_str(&format!("  {title}: {}\n", labels.join(", ")));
}

/// Totals for a batch run plus the skipped rows.
pub fn format_batch_summary(summary: &BatchSummary, row_errors: &[RowError]) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Parcels: {} evaluated, {} complete, {} with blocked parameters\n",
        summary.parcels,
        summary.complete,
        summary.parcels - summary.complete
    ));
    out.push_str(&format!(
        "Parameters: {} resolved, {} not applicable, {} blocked\n",
        summary.resolved, summary.not_applicable, summary.blocked
    ));

    if summary.blocked > 0 {
        out.push_str("\nBlocked by parameter:\n");
        for (name, count) in &summary.blocked_by_parameter {
            if *count > 0 {
                out.push_str(&format!("  {:<20} {count}\n", name.key()));
            }
        }
        out.push_str("Blocked by reason:\n");
        for (code, count) in &summary.blocked_by_code {
            out.push_str(&format!("  {code:<22} {count}\n"));
        }
    }

    if !row_errors.is_empty() {
        out.push_str(&format!("\nSkipped rows: {}\n", row_errors.len()));
        for err in row_errors {
            out.push_str(&format!(
                "  line {:>5} {:<16} {}\n",
                err.line,
                truncate(err.id.as_deref().unwrap_or("-"), 16),
                err.message
            ));
        }
    }

    out
}

/// Every zone code with the catalog tables that mention it.
pub fn format_catalog(catalog: &Catalog) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} ({})\n\n", catalog.legislation, catalog.municipality));
    for zone in ZoneCode::ALL {
        let tables = catalog.memberships(zone);
        let tables = if tables.is_empty() {
            "-".to_string()
        } else {
            tables.join(", ")
        };
        out.push_str(&format!("{:<6} {tables}\n", zone.code()));
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deps::resolve_dependencies;
    use crate::domain::{BuildingNature, CalculationInput};
    use crate::eval::evaluate;
    use crate::report::summarize;

    #[test]
    fn parameter_table_marks_blocked_rows() {
        let set = evaluate(&CalculationInput::new(ZoneCode::Zc1, "residential"));
        let text = format_parameter_set(&set, Locale::En);

        assert!(text.starts_with("Legislation: LC_108_2009_ALTERADA_LC_415_2023\n"));
        assert!(text.contains("Frontal setback"));
        assert!(text.contains(" 4.00 m"));
        assert!(text.contains("!insufficient data"));
        assert_eq!(text.lines().count(), 3 + 2 + 6);
    }

    #[test]
    fn parameter_table_in_portuguese() {
        let input = CalculationInput::new(ZoneCode::Zad2, "residencial");
        let text = format_parameter_set(&evaluate(&input), Locale::PtBr);
        assert!(text.contains("Recuo frontal"));
        assert!(text.contains("Altura máxima"));
        assert!(text.contains("livre"));
    }

    #[test]
    fn missing_fields_line() {
        assert_eq!(format_missing_fields(&[], Locale::En), "");
        assert_eq!(
            format_missing_fields(&[Field::Floors, Field::Avenue], Locale::En),
            "Missing mandatory fields: floor count, avenue\n"
        );
    }

    #[test]
    fn dependency_report_lists_options_and_advisories() {
        let spec = resolve_dependencies(ZoneCode::Zct2, None, Catalog::standard());
        let text = format_dependencies(&spec, Locale::En);
        assert!(text.starts_with("Zone ZCT2\n"));
        assert!(text.contains("    - Av. Tancredo Neves\n"));
        assert!(text.contains("[warn] Floor count and total height"));
        assert!(text.contains("conditional: minimum frontage"));
        assert!(text.contains("Preview:"));

        let spec = resolve_dependencies(ZoneCode::Zh2, Some(BuildingNature::NotApplicable), Catalog::standard());
        let text = format_dependencies(&spec, Locale::En);
        assert!(text.contains("  hidden: minimum frontage, minimum lot area, avenue\n"));
        assert!(text.contains("not computable"));
    }

    #[test]
    fn batch_summary_lists_skipped_rows() {
        let results = vec![crate::domain::ParcelResult {
            parcel_id: "A".to_string(),
            parameters: evaluate(&CalculationInput::new(ZoneCode::Zh1, "residential")),
            missing_fields: Vec::new(),
        }];
        let errors = vec![RowError {
            line: 4,
            id: Some("B".to_string()),
            message: "Missing required value: `zone`".to_string(),
        }];
        let text = format_batch_summary(&summarize(&results), &errors);
        assert!(text.contains("Parcels: 1 evaluated, 0 complete, 1 with blocked parameters"));
        assert!(text.contains("zone_not_found"));
        assert!(text.contains("Skipped rows: 1"));
        assert!(text.contains("line     4 B"));
    }

    #[test]
    fn catalog_listing_covers_every_zone() {
        let text = format_catalog(Catalog::standard());
        assert_eq!(text.lines().count(), 2 + ZoneCode::ALL.len());
        assert!(text.contains("ZIA2   -\n"));
        assert!(text.contains("ZII    height\n"));
    }

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate("abc", 5), "abc");
        assert_eq!(truncate("abcdefgh", 5), "abcd.");
    }
}
