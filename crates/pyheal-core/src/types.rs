//! 公共类型（对外暴露）
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// 单次命中（扫描期间产生，不跨次持久化）
#[derive(Debug, Clone, Serialize)]
pub struct Match {
    /// 命中所属检测器（或配平错误种类）的名称
    pub kind: String,
    /// 命中的原始文本片段
    pub matched_text: String,
    /// 1 起始行号 = 命中起点之前的换行数 + 1
    pub line_number: usize,
}

/// 单个检测器在一次扫描中的聚合结果
/// 计数为 0 的检测器不会出现在结果列表里
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub detector: String,
    pub description: String,
    pub count: usize,
    pub matches: Vec<Match>,
}

/// 括号配平错误的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BalanceKind {
    /// 栈空时遇到的闭合符
    UnexpectedClose(char),
    /// 弹栈后开合不配对
    Mismatched { opened: char, closed: char },
    /// 扫描结束后仍留在栈上的开符
    Unclosed(char),
}

impl BalanceKind {
    /// 报告用的一行描述
    pub(crate) fn describe(&self) -> String {
        match self {
            BalanceKind::UnexpectedClose(c) => format!("unexpected closing '{c}'"),
            BalanceKind::Mismatched { opened, closed } => {
                format!("mismatched brackets: '{opened}' and '{closed}'")
            }
            BalanceKind::Unclosed(c) => format!("unclosed '{c}'"),
        }
    }
}

/// 括号配平错误（仅检测；没有真实解析器时自动修复结构失衡不安全，一律不改写）
#[derive(Debug, Clone, Serialize)]
pub struct BalanceError {
    pub line_number: usize,
    /// 所在行文本（两端空白去除）
    pub line_text: String,
    pub kind: BalanceKind,
}

/// 单次修复的整体结果
/// 不变量：total_found 等于全部 Finding（含配平伪 Finding）的 count 之和；
/// fixable_count = total_found - balance_error_count
#[derive(Debug, Clone, Serialize)]
pub struct HealOutcome {
    pub total_found: usize,
    pub findings: Vec<Finding>,
    pub balance_error_count: usize,
    pub fixable_count: usize,
    /// 全部目录重写应用之后的文本
    pub fixed_text: String,
    /// 是否实际写回了磁盘（备份 + 覆盖）
    pub did_write: bool,
}

/// 用户输入类致命错误（CLI 统一映射为退出码 1）
#[derive(Debug, Error)]
pub enum HealError {
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("only .{expected} files are supported: {path}")]
    UnsupportedExtension { path: PathBuf, expected: String },
}
