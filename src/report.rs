//! Plain-text rendering of a campaign report

use crate::insights::CampaignReport;
use std::fmt::Write;

/// Whole-euro amount with thousands separators, e.g. `€141,667`
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}€{}", sign, grouped)
}

/// Fraction as a percentage with one decimal, e.g. `8.5%`
pub fn format_pct(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// Render the report as the text dashboard printed by the CLI
pub fn render_text(report: &CampaignReport) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_report(&mut out, report);
    out
}

fn write_report(out: &mut String, report: &CampaignReport) -> std::fmt::Result {
    writeln!(out, "Mortgage Retention Campaign Insights")?;
    writeln!(out, "====================================")?;
    writeln!(out, "Source: {} ({} calls)", report.source, report.total_calls)?;
    writeln!(out, "Generated: {}\n", report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"))?;

    let kpis = &report.kpis;
    writeln!(out, "Executive Summary")?;
    writeln!(out, "{}", "-".repeat(40))?;
    writeln!(out, "  Estimated Retention Uplift: {}", format_pct(kpis.retention_uplift))?;
    writeln!(out, "  Current Answer Rate:        {}", format_pct(kpis.campaign_answer_rate))?;
    match kpis.observed_answer_rate {
        Some(rate) => writeln!(out, "  Observed Answer Rate:       {}", format_pct(rate))?,
        None => writeln!(out, "  Observed Answer Rate:       n/a")?,
    }
    writeln!(
        out,
        "  Projected Annual LTV Gain ({:.0}% increase): {}\n",
        kpis.answer_rate_increase,
        format_currency(kpis.projected_annual_ltv_gain)
    )?;

    writeln!(out, "Call Result Distribution")?;
    writeln!(out, "{}", "-".repeat(40))?;
    for (label, count) in &report.call_result_counts {
        writeln!(out, "  {:<12} {:>8}", label, count)?;
    }
    writeln!(out)?;

    writeln!(out, "Retention Rate by Call Result")?;
    writeln!(out, "{}", "-".repeat(40))?;
    writeln!(out, "  {:<12} {:>8} {:>8} {:>10}", "Result", "Rows", "Obs", "Retention")?;
    for group in report.retention.groups() {
        let rate = group.retention_rate.map(format_pct).unwrap_or_else(|| "n/a".to_string());
        writeln!(out, "  {:<12} {:>8} {:>8} {:>10}", group.call_result, group.rows, group.observed, rate)?;
    }
    writeln!(out)?;

    writeln!(out, "Causal Impact ({}, illustrative)", report.effect.method)?;
    writeln!(out, "{}", "-".repeat(40))?;
    writeln!(
        out,
        "  Customers who answered were {} more likely to retain their mortgage.",
        format_pct(report.effect.uplift)
    )?;
    writeln!(out, "  {}\n", report.effect.note)?;

    writeln!(out, "LTV Simulator")?;
    writeln!(out, "{}", "-".repeat(40))?;
    for point in &report.ltv_sweep {
        writeln!(
            out,
            "  +{:>2.0}% answer rate: {:>12}",
            point.answer_rate_increase,
            format_currency(point.annual_ltv_gain)
        )?;
    }
    writeln!(out)?;

    let rec = &report.recommendations;
    writeln!(out, "Recommendations")?;
    writeln!(out, "{}", "-".repeat(40))?;
    writeln!(out, "  {}", rec.recommendation)?;
    for segment in &rec.target_segments {
        writeln!(out, "    - {}", segment)?;
    }
    match report.segment.retention.rate("answer") {
        Some(rate) => writeln!(
            out,
            "  Segment calls: {}, answered retention: {}",
            report.segment.calls,
            format_pct(rate)
        )?,
        None => writeln!(out, "  Segment calls: {}", report.segment.calls)?,
    }
    writeln!(out, "  Projected benefits:")?;
    for benefit in &rec.benefits {
        writeln!(out, "    - {}", benefit)?;
    }
    writeln!(out, "  Limitations:")?;
    for limitation in &rec.limitations {
        writeln!(out, "    - {}", limitation)?;
    }
    writeln!(out, "  Next steps:")?;
    for step in &rec.next_steps {
        writeln!(out, "    - {}", step)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calls::CallRecord;
    use crate::config::AnalysisConfig;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(141_666.666), "€141,667");
        assert_eq!(format_currency(0.0), "€0");
        assert_eq!(format_currency(999.4), "€999");
        assert_eq!(format_currency(1_000.0), "€1,000");
        assert_eq!(format_currency(8_500_000.0), "€8,500,000");
        assert_eq!(format_currency(-28_333.3), "-€28,333");
    }

    #[test]
    fn test_format_pct() {
        assert_eq!(format_pct(0.085), "8.5%");
        assert_eq!(format_pct(0.38), "38.0%");
    }

    #[test]
    fn test_render_sections() {
        let data = vec![CallRecord::new("answer", 1), CallRecord::new("busy", 0)];
        let report = CampaignReport::build(&data, "inline", &AnalysisConfig::default()).unwrap();
        let text = render_text(&report);

        assert!(text.contains("Source: inline (2 calls)"));
        assert!(text.contains("€141,667"));
        assert!(text.contains("Retention Rate by Call Result"));
        assert!(text.contains("Next steps:"));
    }
}
