//! 修复主流程：校验 → 读取 → 扫描 → 配平检查 → 报告 → 备份并写回
use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::balance::check_balance;
use crate::detectors::DetectorSet;
use crate::options::HealOptions;
use crate::report::{build_outcome, render_report};
use crate::scan::scan_text;
use crate::types::{HealError, HealOutcome};

/// 对单个文件执行完整修复流程，人类可读报告写入 `out`（CLI 传入 stdout）
///
/// 副作用约定：
/// - total_found == 0 时不触碰文件系统，直接报告通过；
/// - 存在可修复项时先把原始字节完整写出到 `<path>.<suffix>` 备份，再覆盖原路径，
///   保证覆盖途中失败也不会丢失唯一的原始副本；
/// - 配平错误从不阻止无关的目录修复写回，只在报告尾部追加人工处理警告。
pub fn heal_file(path: &Path, out: &mut dyn Write, opts: &HealOptions) -> Result<HealOutcome> {
    if !path.exists() {
        return Err(HealError::FileNotFound(path.to_path_buf()).into());
    }
    let extension_ok = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e == opts.extension)
        .unwrap_or(false);
    if !extension_ok {
        return Err(HealError::UnsupportedExtension {
            path: path.to_path_buf(),
            expected: opts.extension.clone(),
        }
        .into());
    }

    info!(path = %path.display(), "analyzing file");
    let original = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    debug!(bytes = original.len(), "file loaded");

    let detectors = DetectorSet::builtin()?;
    let (findings, fixed_text) = scan_text(&original, &detectors, opts);
    // 配平检查跑在全部重写之后的文本上，错误位置对应调用方最终看到的输出
    let balance_errors = check_balance(&fixed_text);

    let mut outcome = build_outcome(findings, &balance_errors, fixed_text);

    if outcome.total_found == 0 {
        writeln!(out, "no syntax errors detected, code looks good")?;
        return Ok(outcome);
    }

    render_report(&outcome, out, opts)?;

    if outcome.fixable_count > 0 {
        writeln!(out, "applying {} fix(es)...", outcome.fixable_count)?;

        // 备份必须先于覆盖完整落盘
        let backup_path = backup_path_for(path, &opts.backup_suffix);
        std::fs::write(&backup_path, &original)
            .with_context(|| format!("write backup {}", backup_path.display()))?;
        writeln!(out, "backup created: {}", backup_path.display())?;

        std::fs::write(path, &outcome.fixed_text)
            .with_context(|| format!("overwrite {}", path.display()))?;
        outcome.did_write = true;
        info!(fixes = outcome.fixable_count, path = %path.display(), "file healed");
        writeln!(out, "fixed {} error(s) in {}", outcome.fixable_count, path.display())?;
    }

    if outcome.balance_error_count > 0 {
        writeln!(out)?;
        writeln!(
            out,
            "WARNING: {} bracket/quote error(s) detected but NOT fixed.",
            outcome.balance_error_count
        )?;
        writeln!(out, "         these require manual correction.")?;
    }

    Ok(outcome)
}

/// 备份路径：在原路径整体之后追加 `.<suffix>`
fn backup_path_for(path: &Path, suffix: &str) -> PathBuf {
    let mut raw = path.as_os_str().to_os_string();
    raw.push(".");
    raw.push(suffix);
    PathBuf::from(raw)
}
