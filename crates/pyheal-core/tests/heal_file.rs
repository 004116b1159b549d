//! heal_file 端到端：落盘、备份、只报不改三条路径
use pyheal_core::{heal_file, HealError, HealOptions};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn broken_file_is_fixed_with_backup() {
    let dir = TempDir::new().unwrap();
    let original = "print \"hello\"\nif x > 5\n    print x\nif x = 5:\n    y = [1 2 3]\n";
    let path = write_file(&dir, "broken.py", original);

    let mut out = Vec::new();
    let outcome = heal_file(&path, &mut out, &HealOptions::default()).unwrap();

    assert_eq!(outcome.total_found, 5);
    assert_eq!(outcome.fixable_count, 5);
    assert_eq!(outcome.balance_error_count, 0);
    assert!(outcome.did_write);

    let fixed = fs::read_to_string(&path).unwrap();
    assert_eq!(
        fixed,
        "print(\"hello\")\nif x > 5:\n    print(x)\nif x == 5:\n    y = [1, 2, 3]\n"
    );

    // 备份内容必须与原始输入逐字节一致
    let backup = fs::read(dir.path().join("broken.py.backup")).unwrap();
    assert_eq!(backup, original.as_bytes());

    let report = String::from_utf8(out).unwrap();
    assert!(report.contains("applying 5 fix(es)"));
    assert!(report.contains("backup created"));
}

#[test]
fn clean_file_is_left_untouched() {
    let dir = TempDir::new().unwrap();
    let src = "def main():\n    print(\"ok\")\n    return 0\n";
    let path = write_file(&dir, "clean.py", src);

    let mut out = Vec::new();
    let outcome = heal_file(&path, &mut out, &HealOptions::default()).unwrap();

    assert_eq!(outcome.total_found, 0);
    assert!(!outcome.did_write);
    // 零发现：磁盘文件逐字节不变，也不产生备份
    assert_eq!(fs::read_to_string(&path).unwrap(), src);
    assert!(!dir.path().join("clean.py.backup").exists());
    assert!(String::from_utf8(out).unwrap().contains("no syntax errors detected"));
}

#[test]
fn balance_errors_are_reported_but_never_written() {
    let dir = TempDir::new().unwrap();
    let src = "result = foo(bar]\n";
    let path = write_file(&dir, "unbalanced.py", src);

    let mut out = Vec::new();
    let outcome = heal_file(&path, &mut out, &HealOptions::default()).unwrap();

    assert_eq!(outcome.total_found, 1);
    assert_eq!(outcome.balance_error_count, 1);
    assert_eq!(outcome.fixable_count, 0);
    assert!(!outcome.did_write);
    // 仅配平错误：不写备份、不覆盖
    assert_eq!(fs::read_to_string(&path).unwrap(), src);
    assert!(!dir.path().join("unbalanced.py.backup").exists());

    let last = outcome.findings.last().unwrap();
    assert_eq!(last.detector, "bracket-balance");
    assert!(last.matches[0].kind.contains("mismatched"));

    let report = String::from_utf8(out).unwrap();
    assert!(report.contains("WARNING"));
    assert!(report.contains("manual correction"));
}

#[test]
fn fixes_written_even_when_balance_errors_remain() {
    let dir = TempDir::new().unwrap();
    let src = "print \"hi\"\nresult = foo(bar]\n";
    let path = write_file(&dir, "mixed.py", src);

    let mut out = Vec::new();
    let outcome = heal_file(&path, &mut out, &HealOptions::default()).unwrap();

    assert_eq!(outcome.total_found, 2);
    assert_eq!(outcome.fixable_count, 1);
    assert_eq!(outcome.balance_error_count, 1);
    assert!(outcome.did_write);

    let fixed = fs::read_to_string(&path).unwrap();
    assert_eq!(fixed, "print(\"hi\")\nresult = foo(bar]\n");
    let report = String::from_utf8(out).unwrap();
    assert!(report.contains("WARNING"));
}

#[test]
fn missing_file_is_a_typed_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.py");

    let mut out = Vec::new();
    let err = heal_file(&path, &mut out, &HealOptions::default()).unwrap_err();
    assert!(matches!(err.downcast_ref::<HealError>(), Some(HealError::FileNotFound(_))));
}

#[test]
fn wrong_extension_is_a_typed_error() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "notes.txt", "print \"hi\"\n");

    let mut out = Vec::new();
    let err = heal_file(&path, &mut out, &HealOptions::default()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<HealError>(),
        Some(HealError::UnsupportedExtension { .. })
    ));
    // 校验失败不触碰文件
    assert_eq!(fs::read_to_string(&path).unwrap(), "print \"hi\"\n");
}
