mod common;
use common::*;

#[test]
fn test_declare_and_call() {
    let source = "\
sub greet :
print \"hi\"
return
endsub
call greet
";
    assert_eq!(run(source), "hi\n");
}

#[test]
fn test_declaration_alone_produces_no_output() {
    let source = "sub greet :\nprint \"hi\"\nreturn\nendsub\nprint \"after\"\n";
    assert_eq!(run(source), "after\n");
}

#[test]
fn test_call_twice() {
    let source = "sub twice :\nprint \"x\"\nreturn\nendsub\ncall twice\ncall twice\n";
    assert_eq!(run(source), "x\nx\n");
}

#[test]
fn test_execution_continues_after_call_site() {
    let source = "\
sub greet :
print \"hi\"
return
endsub
call greet
print \"after\"
";
    assert_eq!(run(source), "hi\nafter\n");
}

#[test]
fn test_resume_not_confused_by_name_reuse() {
    // a variable sharing the subroutine's name must not derail the return
    let source = "\
sub greet :
print \"hi\"
return
endsub
greet := 5
call greet
print greet
";
    assert_eq!(run(source), "hi\n5\n");
}

#[test]
fn test_body_without_return() {
    let source = "sub greet :\nprint \"hi\"\nendsub\ncall greet\nprint \"after\"\n";
    assert_eq!(run(source), "hi\nafter\n");
}

#[test]
fn test_call_before_declaration_fails() {
    let source = "call greet\nsub greet :\nprint \"hi\"\nreturn\nendsub\n";
    assert_eq!(run_err(source), "UNDEFINED SUBROUTINE; greet");
}

#[test]
fn test_call_unknown_fails() {
    assert_eq!(run_err("call nothing\n"), "UNDEFINED SUBROUTINE; nothing");
}

#[test]
fn test_missing_endsub() {
    assert_eq!(
        run_err("sub greet :\nprint \"hi\"\nend\n"),
        "MISSING TERMINATOR; MISSING ENDSUB"
    );
}

#[test]
fn test_stray_endsub() {
    assert_eq!(run_err("endsub\n"), "SYNTAX ERROR; UNEXPECTED endsub");
}
