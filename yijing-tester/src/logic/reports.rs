use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::time::Duration;

use super::StrategyResult;

pub fn generate_console_report(
    out: &mut impl Write,
    results: &[StrategyResult],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Self-Play Results Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "============================".cyan())?;

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    writeln!(out, "Strategies: {total}")?;
    writeln!(out, "Passed: {}", passed.to_string().green())?;
    writeln!(out, "Failed: {}", (total - passed).to_string().red())?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(out, "{status} {}", result.strategy_name.bold())?;
        writeln!(
            out,
            "   Games: {}/{} clean, {} won, {} hit the turn limit",
            result.clean_games, result.games_run, result.victories, result.turn_limit_endings
        )?;
        writeln!(out, "   Average turns: {:.1}", result.average_turns)?;
        writeln!(out, "   Average time: {:?}", result.average_duration)?;
        if !result.conditions.is_empty() {
            let achieved: Vec<String> = result
                .conditions
                .iter()
                .map(|(id, count)| format!("{id} x{count}"))
                .collect();
            writeln!(out, "   Conditions: {}", achieved.join(", "))?;
        }
        if !result.failures.is_empty() {
            writeln!(out, "   Failures:")?;
            for failure in &result.failures {
                writeln!(out, "     • {}", failure.red())?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn generate_json_report(out: &mut impl Write, results: &[StrategyResult]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, results)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut impl Write, results: &[StrategyResult]) -> Result<()> {
    writeln!(out, "# Yijing Self-Play Results\n")?;

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Strategies**: {total}")?;
    writeln!(out, "- **Passed**: {passed}")?;
    writeln!(out, "- **Failed**: {}\n", total - passed)?;

    writeln!(out, "| Strategy | Games | Clean | Won | Turn limit | Avg turns |")?;
    writeln!(out, "|---|---|---|---|---|---|")?;
    for result in results {
        writeln!(
            out,
            "| {} | {} | {} | {} | {} | {:.1} |",
            result.strategy_name,
            result.games_run,
            result.clean_games,
            result.victories,
            result.turn_limit_endings,
            result.average_turns
        )?;
    }
    writeln!(out)?;

    for result in results.iter().filter(|r| !r.failures.is_empty()) {
        writeln!(out, "### ❌ {}\n", result.strategy_name)?;
        for failure in &result.failures {
            writeln!(out, "- {failure}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}
