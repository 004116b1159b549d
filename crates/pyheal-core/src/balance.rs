//! 括号配平检查（仅检测，不修复）
//!
//! 行为约定（与既有行为保持一致，作为已记录的不精确性保留）：
//! - 引号内状态按行复位：跨行字符串不被跟踪，可能产生误报/漏报；
//! - 行内以 `\` 转义的引号不改变引号状态；
//! - 引号内部的括号字符一律忽略；
//! - 开符栈跨行持续，未闭合的开符在扫描结束后按其开启行报告。
use crate::types::{BalanceError, BalanceKind};

/// 开符对应的闭符
fn closing_of(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}

/// 对整段文本做一次从左到右、逐行逐字符的扫描，返回全部配平错误
pub fn check_balance(text: &str) -> Vec<BalanceError> {
    let lines: Vec<&str> = text.lines().collect();
    let mut errors: Vec<BalanceError> = Vec::new();
    // 栈内记录开符及其所在行（1 起始）
    let mut stack: Vec<(char, usize)> = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let line_number = idx + 1;
        let chars: Vec<char> = line.chars().collect();
        let mut in_string = false;
        let mut quote = '"';

        for i in 0..chars.len() {
            let ch = chars[i];
            let escaped = i > 0 && chars[i - 1] == '\\';

            // 引号边界：不在字符串中时任一未转义引号开启；字符串中仅匹配的未转义引号关闭
            if (ch == '"' || ch == '\'') && !escaped {
                if !in_string {
                    in_string = true;
                    quote = ch;
                } else if ch == quote {
                    in_string = false;
                }
                continue;
            }
            if in_string {
                continue;
            }

            match ch {
                '(' | '[' | '{' => stack.push((ch, line_number)),
                ')' | ']' | '}' => match stack.pop() {
                    None => errors.push(BalanceError {
                        line_number,
                        line_text: line.trim().to_string(),
                        kind: BalanceKind::UnexpectedClose(ch),
                    }),
                    Some((opened, _)) => {
                        if closing_of(opened) != ch {
                            errors.push(BalanceError {
                                line_number,
                                line_text: line.trim().to_string(),
                                kind: BalanceKind::Mismatched { opened, closed: ch },
                            });
                        }
                    }
                },
                _ => {}
            }
        }
    }

    // 扫描结束后仍未闭合的开符，逐个在其开启行报告
    for (opened, line_number) in stack {
        errors.push(BalanceError {
            line_number,
            line_text: lines[line_number - 1].trim().to_string(),
            kind: BalanceKind::Unclosed(opened),
        });
    }

    errors
}
