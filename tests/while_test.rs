mod common;
use common::*;

#[test]
fn test_countdown() {
    let source = "n := 3\nwhile n > 0 :\nprint n\nn := n - 1\nendwhile\nprint \"done\"\n";
    assert_eq!(run(source), "3\n2\n1\ndone\n");
}

#[test]
fn test_false_from_start_runs_zero_times() {
    let source = "while 1 = 2 :\nprint \"never\"\nendwhile\nprint \"after\"\n";
    assert_eq!(run(source), "after\n");
}

#[test]
fn test_later_statements_observe_loop_writes() {
    let source = "x := 0\nwhile x < 3 :\nx := x + 1\nendwhile\nprint x\n";
    assert_eq!(run(source), "3\n");
}

#[test]
fn test_nested_while() {
    let source = "\
i := 1
while i <= 2 :
j := 1
while j <= 2 :
print i * 10 + j
j := j + 1
endwhile
i := i + 1
endwhile
";
    assert_eq!(run(source), "11\n12\n21\n22\n");
}

#[test]
fn test_nested_while_in_dead_body() {
    let source = "\
while 1 = 2 :
while 1 = 1 :
print \"no\"
endwhile
endwhile
print \"after\"
";
    assert_eq!(run(source), "after\n");
}

#[test]
fn test_missing_endwhile() {
    assert_eq!(
        run_err("n := 1\nwhile n > 0 :\nn := n - 1\nend\n"),
        "MISSING TERMINATOR; MISSING ENDWHILE"
    );
}
