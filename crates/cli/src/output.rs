//! Rendering of a finished run for stdout.

use std::fmt::Write;

use nodes::ResearchRun;

/// The report followed by the query, the result lines and token usage.
pub fn render(run: &ResearchRun) -> String {
    let research = &run.research;
    let usage = run.total_usage();

    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "{}\n", research.report);
    let _ = writeln!(out, "Query: {}", research.query);
    let _ = writeln!(out, "Sources:");
    for line in &research.results {
        let _ = writeln!(out, "  - {line}");
    }
    let _ = write!(
        out,
        "Tokens: {} in / {} out (run {})",
        usage.input, usage.output, run.run_id
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodes::StepRecord;
    use pipeline::{CompletedResearch, PipelineRunId, StepName, Timestamp, TokenUsage, Topic};

    #[test]
    fn test_render_lists_report_sources_and_usage() {
        let now = Timestamp::now();
        let run = ResearchRun {
            run_id: PipelineRunId::new_random(),
            research: CompletedResearch {
                topic: Topic::new("qec").unwrap(),
                details: "d".into(),
                query: "surface code".into(),
                results: vec!["A - https://a".into(), "B - https://b".into()],
                report: "The report.".into(),
            },
            steps: vec![StepRecord {
                step: StepName::SynthesizeReport,
                started_at: now,
                finished_at: now,
                usage: TokenUsage::new(100, 40),
            }],
        };

        let text = render(&run);

        assert!(text.starts_with("The report.\n\n"));
        assert!(text.contains("Query: surface code\n"));
        assert!(text.contains("  - A - https://a\n  - B - https://b\n"));
        assert!(text.contains("Tokens: 100 in / 40 out"));
    }
}
