//! 检测器目录（固定四类常见语法缺陷）
//!
//! 约定：
//! - 目录在进程启动时静态构建，顺序即应用顺序（目录序，而非置信度序）。
//! - `regex` crate 不支持环视，原有的前瞻/后顾守卫在此改写为等价的排除字符类，
//!   接受与拒绝的行集合保持一致。
//! - 每条重写独立作用于自身的捕获组，同一检测器的全部命中在同一遍替换中完成。
use anyhow::{Context, Result};
use regex::{Captures, Regex};

/// 单个检测器：命名的模式 + 配套重写规则
#[derive(Debug)]
pub struct Detector {
    pub name: &'static str,
    pub description: &'static str,
    pub(crate) pattern: Regex,
    pub(crate) rewrite: fn(&Captures) -> String,
    /// 为真时重写需反复应用直至不动点：每次应用可能暴露新的相邻对
    pub iterative: bool,
}

/// 不可变的有序检测器集合
#[derive(Debug)]
pub struct DetectorSet {
    pub(crate) detectors: Vec<Detector>,
}

impl DetectorSet {
    /// 构建内置目录（顺序固定：print 补括号 → 缺冒号 → 条件误用赋值 → 缺逗号）
    pub fn builtin() -> Result<Self> {
        let detectors = vec![
            Detector {
                name: "print-missing-parens",
                description: "Python 2 style print statements",
                // 参数段排除 `(`：等价于原逻辑“print 之后该行不含左括号才算命中”
                pattern: Regex::new(r"(?m)^([ \t]*)print[ \t]+([^(#\n]*?)([ \t]*#[^\n]*)?$")
                    .context("compile print pattern")?,
                rewrite: fix_print,
                iterative: false,
            },
            Detector {
                name: "missing-colon",
                description: "missing colon after if/else/for/while/def/class/try/except",
                // 头部与注释段都排除 `:`：行内任意位置已有冒号即不命中（保守守卫）
                pattern: Regex::new(
                    r"(?m)^([ \t]*)(if|elif|else|for|while|def|class|try|except|finally|with)\b([^:#\n]*?)([ \t]*)(#[^:\n]*)?$",
                )
                .context("compile colon pattern")?,
                rewrite: fix_missing_colon,
                iterative: false,
            },
            Detector {
                name: "assignment-in-conditional",
                description: "using = instead of == in if statements",
                // 两侧均排除 `=`：已含 `==`（或复合比较）的行不命中
                pattern: Regex::new(
                    r"(?m)^([ \t]*)(if|elif|while)\b([^=#\n]+?)[ \t]+=[ \t]+([^=#\n]+?)[ \t]*(:?)([ \t]*#[^\n]*)?$",
                )
                .context("compile assignment pattern")?,
                rewrite: fix_assignment,
                iterative: false,
            },
            Detector {
                name: "missing-comma",
                description: "missing comma between list or tuple elements",
                // 前缀限定在开括号/逗号之后，两个相邻字面量（带引号字符串、整数、裸标识符）
                pattern: Regex::new(r#"([\[,(]\s*)("[^"]*"|'[^']*'|\d+|\w+)\s+("[^"]*"|'[^']*'|\d+|\w+)"#)
                    .context("compile comma pattern")?,
                rewrite: fix_missing_comma,
                iterative: true,
            },
        ];
        Ok(Self { detectors })
    }

    /// 目录内的检测器（目录序）
    pub fn detectors(&self) -> &[Detector] {
        &self.detectors
    }
}

/// print 补括号：缩进与行尾注释原样保留，参数去除两端空白后包裹
fn fix_print(caps: &Captures) -> String {
    let indent = &caps[1];
    let statement = caps[2].trim();
    let comment = caps.get(3).map(|m| m.as_str()).unwrap_or("");
    format!("{indent}print({statement}){comment}")
}

/// 缺冒号：冒号插在头部之后、注释之前；else/try/finally 这类无头部的关键字直接跟冒号
fn fix_missing_colon(caps: &Captures) -> String {
    let indent = &caps[1];
    let keyword = &caps[2];
    let header = caps[3].trim();
    // 注释存在时保留其前导空白；无注释时行尾空白一并丢弃
    let tail = match caps.get(5) {
        Some(comment) => format!("{}{}", &caps[4], comment.as_str()),
        None => String::new(),
    };
    if header.is_empty() {
        format!("{indent}{keyword}:{tail}")
    } else {
        format!("{indent}{keyword} {header}:{tail}")
    }
}

/// 条件误用赋值：单个 `=` 替换为 `==`，可选的行尾冒号与注释原样保留
fn fix_assignment(caps: &Captures) -> String {
    let indent = &caps[1];
    let keyword = &caps[2];
    let lhs = caps[3].trim();
    let rhs = caps[4].trim();
    let colon = &caps[5];
    let comment = caps.get(6).map(|m| m.as_str()).unwrap_or("");
    format!("{indent}{keyword} {lhs} == {rhs}{colon}{comment}")
}

/// 缺逗号：在相邻两个字面量之间补 `, `
fn fix_missing_comma(caps: &Captures) -> String {
    format!("{}{}, {}", &caps[1], &caps[2], &caps[3])
}
