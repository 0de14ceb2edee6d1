mod common;
use common::*;

#[test]
fn test_if_true() {
    assert_eq!(run("if 1 = 1 :\nprint \"yes\"\nendif\n"), "yes\n");
}

#[test]
fn test_if_false_no_else() {
    let source = "if 1 = 2 :\nprint \"yes\"\nendif\nprint \"after\"\n";
    assert_eq!(run(source), "after\n");
}

#[test]
fn test_if_else_false_branch() {
    let source = "x := 3\nif x > 5 :\nprint \"big\"\nelse :\nprint \"small\"\nendif\n";
    assert_eq!(run(source), "small\n");
}

#[test]
fn test_if_true_skips_else() {
    let source = "if 2 > 1 :\nprint \"then\"\nelse :\nprint \"else\"\nendif\nprint \"after\"\n";
    assert_eq!(run(source), "then\nafter\n");
}

#[test]
fn test_nonzero_condition_is_true() {
    assert_eq!(run("if 5 :\nprint \"t\"\nendif\n"), "t\n");
    assert_eq!(run("if 0 :\nprint \"t\"\nendif\n"), "");
}

#[test]
fn test_nested_if_in_dead_branch() {
    let source = "\
if 1 = 2 :
if 1 = 1 :
print \"inner\"
endif
print \"outer\"
endif
print \"after\"
";
    assert_eq!(run(source), "after\n");
}

#[test]
fn test_nested_if_in_skipped_else() {
    let source = "\
if 1 = 1 :
print \"then\"
else :
if 1 = 1 :
print \"no\"
endif
endif
print \"after\"
";
    assert_eq!(run(source), "then\nafter\n");
}

#[test]
fn test_missing_colon_after_condition() {
    assert_eq!(
        run_err("if 1 = 1\nprint 1\nendif\n"),
        "SYNTAX ERROR; MISSING COLON AFTER CONDITION"
    );
}

#[test]
fn test_missing_endif() {
    assert_eq!(
        run_err("if 1 = 2 :\nprint 1\n"),
        "MISSING TERMINATOR; MISSING ENDIF"
    );
}
