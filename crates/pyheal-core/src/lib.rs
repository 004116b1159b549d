//! Python 语法自愈核心库
//!
//! 设计要点：
//! - 检测器目录为进程启动时静态构建的不可变有序列表，显式传入扫描引擎，不做全局可变状态。
//! - 扫描与重写在单一内存文本缓冲上顺序进行：后一个检测器看到前一个检测器的输出。
//! - 括号配平检查始终运行在全部重写之后的文本上，结果即调用方最终拿到的内容。
//! - 仅做行导向的模式匹配与单遍括号跟踪，不做分词或语法分析；修复后的文件不保证语法合法，
//!   只保证被命中的模式已按规则改写。

mod options;
mod types;
mod detectors;
mod scan;
mod balance;
mod report;
mod heal;

// 对外暴露的公共 API
pub use options::HealOptions;
pub use types::{BalanceError, BalanceKind, Finding, HealError, HealOutcome, Match};
pub use detectors::{Detector, DetectorSet};
pub use scan::scan_text;
pub use balance::check_balance;
pub use report::{build_outcome, render_report};
pub use heal::heal_file;
