//! 报告聚合与控制台渲染
use anyhow::Result;
use std::io::Write;

use crate::options::HealOptions;
use crate::types::{BalanceError, Finding, HealOutcome, Match};

/// 配平伪检测器在报告中的名称与说明（目录发现之后追加）
pub(crate) const BALANCE_DETECTOR: &str = "bracket-balance";
pub(crate) const BALANCE_DESCRIPTION: &str =
    "unmatched brackets, parentheses, or braces (detection only, cannot auto-fix)";

/// 聚合目录发现与配平错误为整体结果
/// 不变量：total_found 等于全部 Finding（含配平伪 Finding）的 count 之和
pub fn build_outcome(
    mut findings: Vec<Finding>,
    balance_errors: &[BalanceError],
    fixed_text: String,
) -> HealOutcome {
    if !balance_errors.is_empty() {
        findings.push(Finding {
            detector: BALANCE_DETECTOR.to_string(),
            description: BALANCE_DESCRIPTION.to_string(),
            count: balance_errors.len(),
            matches: balance_errors
                .iter()
                .map(|e| Match {
                    kind: e.kind.describe(),
                    matched_text: e.line_text.clone(),
                    line_number: e.line_number,
                })
                .collect(),
        });
    }

    let total_found: usize = findings.iter().map(|f| f.count).sum();
    let balance_error_count = balance_errors.len();
    HealOutcome {
        total_found,
        findings,
        balance_error_count,
        // 可修复数 = 总数 - 仅检测的配平错误数
        fixable_count: total_found - balance_error_count,
        fixed_text,
        did_write: false,
    }
}

/// 将结果渲染为人类可读的报告（非机器可解析格式）
/// 每类问题：标题行 + 计数行 + 至多 preview_examples 条示例 + 剩余条数
pub fn render_report(outcome: &HealOutcome, out: &mut dyn Write, opts: &HealOptions) -> Result<()> {
    writeln!(
        out,
        "DETECTED ERRORS - found {} issue(s) across {} categories",
        outcome.total_found,
        outcome.findings.len()
    )?;
    writeln!(out)?;

    for finding in &outcome.findings {
        writeln!(out, "  * {} - {}", finding.detector, finding.description)?;
        writeln!(out, "    found {} occurrence(s)", finding.count)?;
        for m in finding.matches.iter().take(opts.preview_examples) {
            writeln!(out, "    line {}: {}", m.line_number, preview(&m.matched_text, opts.preview_width))?;
        }
        if finding.matches.len() > opts.preview_examples {
            writeln!(out, "    ... and {} more", finding.matches.len() - opts.preview_examples)?;
        }
        writeln!(out)?;
    }

    Ok(())
}

/// 截断到给定宽度（按字符计），超出部分以 `...` 标记
fn preview(text: &str, width: usize) -> String {
    let mut truncated: String = text.chars().take(width).collect();
    if text.chars().count() > width {
        truncated.push_str("...");
    }
    truncated
}
