//! 扫描引擎：按目录序匹配并应用重写
use tracing::{debug, warn};

use crate::detectors::{Detector, DetectorSet};
use crate::options::HealOptions;
use crate::types::{Finding, Match};

/// 对整段文本运行全部检测器，返回（发现列表，重写后的文本）
///
/// 行为约定：
/// - 命中收集发生在该检测器自身重写之前，行号按当时的工作文本计算；
/// - 非迭代检测器做一遍全文替换（同一遍内各命中互不依赖）；
/// - 迭代检测器反复替换直至不动点，受 `max_fix_passes` 护栏限制；
/// - 后续检测器在前序检测器的输出上匹配，重写按目录序串行复合。
pub fn scan_text(text: &str, detectors: &DetectorSet, opts: &HealOptions) -> (Vec<Finding>, String) {
    let mut working = text.to_string();
    let mut findings: Vec<Finding> = Vec::new();

    for det in &detectors.detectors {
        let matches = collect_matches(det, &working);
        // 零命中：不产生 Finding，工作文本保持不变
        if matches.is_empty() {
            continue;
        }
        debug!(detector = det.name, count = matches.len(), "detector matched");
        findings.push(Finding {
            detector: det.name.to_string(),
            description: det.description.to_string(),
            count: matches.len(),
            matches,
        });

        if det.iterative {
            working = rewrite_to_fixed_point(det, working, opts.max_fix_passes);
        } else {
            working = det.pattern.replace_all(&working, det.rewrite).into_owned();
        }
    }

    (findings, working)
}

/// 收集单个检测器的全部非重叠命中，行号 = 命中起点之前的换行数 + 1
fn collect_matches(det: &Detector, text: &str) -> Vec<Match> {
    det.pattern
        .find_iter(text)
        .map(|m| Match {
            kind: det.name.to_string(),
            matched_text: m.as_str().to_string(),
            line_number: text[..m.start()].bytes().filter(|&b| b == b'\n').count() + 1,
        })
        .collect()
}

/// 反复应用重写直至整遍无变化（不动点）
/// 护栏：`[1 2 3]` 这类输入每遍只能暴露一个新的相邻对，正常收敛很快；
/// 达到 `max_passes` 仍未稳定则放弃并告警，不视为致命错误
fn rewrite_to_fixed_point(det: &Detector, mut working: String, max_passes: usize) -> String {
    let mut passes = 0usize;
    loop {
        let next = det.pattern.replace_all(&working, det.rewrite).into_owned();
        let stable = next == working;
        working = next;
        passes += 1;
        if stable {
            debug!(detector = det.name, passes, "fixed point reached");
            break;
        }
        if passes >= max_passes {
            warn!(detector = det.name, passes, "fixed-point iteration cap hit, giving up");
            break;
        }
    }
    working
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(input: &str) -> (Vec<Finding>, String) {
        let detectors = DetectorSet::builtin().unwrap();
        scan_text(input, &detectors, &HealOptions::default())
    }

    #[test]
    fn clean_text_yields_no_findings_and_identical_output() {
        let src = "def main():\n    print(\"ok\")\n    return 0\n";
        let (findings, fixed) = scan(src);
        assert!(findings.is_empty());
        assert_eq!(fixed, src);
    }

    #[test]
    fn iterative_comma_fix_reaches_fixed_point() {
        let (findings, fixed) = scan("values = [1 2 3]\n");
        assert_eq!(fixed, "values = [1, 2, 3]\n");
        // 命中按首遍匹配计数：三元素行首遍只有一个相邻对命中
        let comma = findings.iter().find(|f| f.detector == "missing-comma").unwrap();
        assert_eq!(comma.count, 1);
    }

    #[test]
    fn rescanning_fixed_output_is_stable() {
        let (_, fixed) = scan("print \"hi\"\nif x > 5\nvalues = [1 2 3]\n");
        let (findings, refixed) = scan(&fixed);
        assert!(findings.is_empty(), "fixed output must be a fixed point: {findings:?}");
        assert_eq!(refixed, fixed);
    }

    #[test]
    fn colon_and_assignment_fixes_compose_in_catalog_order() {
        // 缺冒号检测先补冒号，误用赋值检测随后在其输出上改写
        let (findings, fixed) = scan("if x = 5\n");
        assert_eq!(fixed, "if x == 5:\n");
        let names: Vec<&str> = findings.iter().map(|f| f.detector.as_str()).collect();
        assert_eq!(names, ["missing-colon", "assignment-in-conditional"]);
    }

    #[test]
    fn line_numbers_are_one_based_newline_counts() {
        let src = "x = 1\n\nprint \"a\"\ny = 2\nprint \"b\"\n";
        let (findings, _) = scan(src);
        let print_finding = findings.iter().find(|f| f.detector == "print-missing-parens").unwrap();
        assert_eq!(print_finding.count, 2);
        assert_eq!(print_finding.matches[0].line_number, 3);
        assert_eq!(print_finding.matches[1].line_number, 5);
    }

    #[test]
    fn matched_text_is_the_whole_pattern_hit() {
        let (findings, _) = scan("print \"hello\"\n");
        assert_eq!(findings[0].matches[0].matched_text, "print \"hello\"");
    }

    #[test]
    fn correct_print_call_untouched() {
        let src = "print(\"hello world\")\n";
        let (findings, fixed) = scan(src);
        assert!(findings.is_empty());
        assert_eq!(fixed, src);
    }
}
