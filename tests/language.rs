use probe::{
    RunStatus,
    error::{Diagnostics, SpanMode},
    interpreter::evaluator::{
        core::{DEFAULT_MAX_CALL_DEPTH, Interpreter},
        function::core::BUILTIN_FUNCTIONS,
    },
    run, run_with,
};

/// Runs `src` and returns everything it printed along with the faults it
/// reported.
fn execute(src: &str) -> (RunStatus, String, Diagnostics) {
    let mut out = Vec::new();
    let mut diagnostics = Diagnostics::new();
    let status = run(src, &mut out, &mut diagnostics);
    let output = String::from_utf8(out).expect("output is valid UTF-8");
    (status, output, diagnostics)
}

fn assert_success(src: &str) -> String {
    let (status, output, diagnostics) = execute(src);
    assert!(diagnostics.is_empty(),
            "Script failed: {:?}\n{src}",
            diagnostics.messages());
    assert_eq!(status, RunStatus::Completed);
    output
}

fn assert_failure(src: &str, expected: RunStatus) -> (String, Diagnostics) {
    let (status, output, diagnostics) = execute(src);
    assert_eq!(status, expected, "unexpected status for:\n{src}");
    assert!(!diagnostics.is_empty(), "no fault was reported for:\n{src}");
    (output, diagnostics)
}

fn runtime_fault(src: &str) -> (String, String) {
    let (output, diagnostics) = assert_failure(src, RunStatus::RuntimeError);
    assert_eq!(diagnostics.len(), 1, "exactly one runtime fault is reported");
    (output, diagnostics.messages()[0].to_owned())
}

#[test]
fn arithmetic_and_precedence() {
    assert_eq!(assert_success("print 1 + 2 * 3;"), "7\n");
    assert_eq!(assert_success("print (1 + 2) * 3;"), "9\n");
    assert_eq!(assert_success("print 10 - 4 - 3;"), "3\n");
    assert_eq!(assert_success("print 7 / 2;"), "3.5\n");
    assert_eq!(assert_success("print -(2 + 3);"), "-5\n");
}

#[test]
fn division_by_zero_follows_floating_point() {
    assert_eq!(assert_success("print 1 / 0;"), "inf\n");
    assert_eq!(assert_success("print -1 / 0;"), "-inf\n");
    assert_eq!(assert_success("print 0 / 0;"), "NaN\n");
}

#[test]
fn string_concatenation() {
    assert_eq!(assert_success("print \"foo\" + \"bar\";"), "foobar\n");

    let (output, message) = runtime_fault("print 1 + \"a\";");
    assert_eq!(output, "");
    assert_eq!(message,
               "Operands of '+' must be two numbers or two strings, found number and string.");
}

#[test]
fn comparison_requires_numbers() {
    assert_eq!(assert_success("print 1 < 2; print 2 <= 1; print 3 >= 3;"),
               "true\nfalse\ntrue\n");

    let (_, message) = runtime_fault("print \"a\" < \"b\";");
    assert_eq!(message, "Operands of '<' must be numbers, found string and string.");
}

#[test]
fn equality_never_coerces() {
    assert_eq!(assert_success("print 1 == 1; print 1 == \"1\"; print nil == false;"),
               "true\nfalse\nfalse\n");
    assert_eq!(assert_success("print nil == nil; print \"a\" != \"b\";"), "true\ntrue\n");
    assert_eq!(assert_success("print [1, [2]] == [1, [2]]; print [1] == [2];"),
               "true\nfalse\n");
}

#[test]
fn truthiness() {
    let src = r#"
        if (0) print "zero"; else print "no zero";
        if ("") print "empty"; else print "no empty";
        if (nil) print "nil"; else print "no nil";
        if (false) print "false"; else print "no false";
        print !nil;
        print !0;
        print !"";
    "#;
    assert_eq!(assert_success(src),
               "zero\nempty\nno nil\nno false\ntrue\nfalse\nfalse\n");
}

#[test]
fn logical_operators_short_circuit_to_booleans() {
    assert_eq!(assert_success("print nil or \"default\"; print 1 and 2; print false and x;"),
               "true\ntrue\nfalse\n");
    assert_eq!(assert_success("print 1 or undefined;"), "true\n");
    assert_eq!(assert_success("print nil and undefined(); print 0 or undefined[0];"),
               "false\ntrue\n");
    assert_eq!(assert_success("print false or nil; print true and 0;"), "false\ntrue\n");
}

#[test]
fn uninitialized_variables_are_nil() {
    assert_eq!(assert_success("var a; print a;"), "nil\n");
}

#[test]
fn redeclaration_shadows_in_the_same_scope() {
    assert_eq!(assert_success("var a = 1; var a = a + 1; print a;"), "2\n");
}

#[test]
fn blocks_introduce_scopes() {
    let src = "var a = \"outer\"; { var a = \"inner\"; print a; } print a;";
    assert_eq!(assert_success(src), "inner\nouter\n");

    let (output, message) = runtime_fault("{ var x = 1; } print x;");
    assert_eq!(output, "");
    assert_eq!(message, "Undefined variable 'x'.");
}

#[test]
fn assignment_updates_the_nearest_binding() {
    assert_eq!(assert_success("var a = 1; { a = 2; } print a;"), "2\n");
    assert_eq!(assert_success("var a; var b; a = b = 3; print a + b;"), "6\n");

    let (_, message) = runtime_fault("y = 1;");
    assert_eq!(message, "Undefined variable 'y'.");
}

#[test]
fn while_and_for_loops() {
    assert_eq!(assert_success("var i = 0; while (i < 3) { print i; i = i + 1; }"),
               "0\n1\n2\n");
    assert_eq!(assert_success("for (var i = 0; i < 3; i = i + 1) print i;"), "0\n1\n2\n");
    assert_eq!(assert_success("var n = 0; for (; n < 2;) n = n + 1; print n;"), "2\n");
}

#[test]
fn for_loop_variable_is_scoped_to_the_loop() {
    let (output, message) = runtime_fault("for (var i = 0; i < 1; i = i + 1) {} print i;");
    assert_eq!(output, "");
    assert_eq!(message, "Undefined variable 'i'.");
}

#[test]
fn break_exits_only_the_innermost_loop() {
    let src = r"
        for (var i = 0; i < 3; i = i + 1) {
            for (var j = 0; j < 3; j = j + 1) {
                if (j == 1) break;
                print i * 10 + j;
            }
        }
    ";
    assert_eq!(assert_success(src), "0\n10\n20\n");
    assert_eq!(assert_success("while (true) { print 1; break; print 2; } print 3;"),
               "1\n3\n");
}

#[test]
fn closures_capture_their_scope() {
    let src = r"
        fn makeCounter() {
            var i = 0;
            fn count() {
                i = i + 1;
                return i;
            }
            return count;
        }

        var counter = makeCounter();
        counter();
        print counter();
    ";
    assert_eq!(assert_success(src), "2\n");
}

#[test]
fn closures_see_later_assignments() {
    assert_eq!(assert_success("var x = 1; fn f() { print x; } x = 2; f();"), "2\n");
}

#[test]
fn closures_resolve_lexically() {
    let src = r#"
        var a = "global";
        fn show() { print a; }
        fn caller() { var a = "local"; show(); }
        caller();
    "#;
    assert_eq!(assert_success(src), "global\n");
}

#[test]
fn recursion() {
    let src = r"
        fn fib(n) {
            if (n < 2) return n;
            return fib(n - 1) + fib(n - 2);
        }
        print fib(10);
    ";
    assert_eq!(assert_success(src), "55\n");
}

#[test]
fn functions_without_return_yield_nil() {
    assert_eq!(assert_success("fn f() {} print f();"), "nil\n");
    assert_eq!(assert_success("fn f() { return; } print f();"), "nil\n");
}

#[test]
fn anonymous_functions_are_values() {
    assert_eq!(assert_success("var add = fn (a, b) { return a + b; }; print add(2, 3);"),
               "5\n");
    assert_eq!(assert_success("fn apply(f, x) { return f(x); } print apply(fn (n) { return n * 2; }, 4);"),
               "8\n");
}

#[test]
fn callables_render_by_name() {
    assert_eq!(assert_success("fn f() {} print f; print fn () {}; print len;"),
               "<fn f>\n<fn>\n<native fn len>\n");
}

#[test]
fn arity_mismatch_aborts_the_program() {
    let (output, message) = runtime_fault("fn f(a, b) {} print 1; f(1); print 2;");
    assert_eq!(output, "1\n");
    assert_eq!(message, "Expected 2 arguments but got 1.");

    let (_, message) = runtime_fault("print len(1, 2);");
    assert_eq!(message, "Expected 1 arguments but got 2.");
}

#[test]
fn only_functions_are_callable() {
    let (_, message) = runtime_fault("var a = 1; a();");
    assert_eq!(message, "Can only call functions, found number.");
}

#[test]
fn len_counts_elements_and_characters() {
    assert_eq!(assert_success("print len([1, 2, 3]); print len(\"héllo\"); print len([]);"),
               "3\n5\n0\n");

    let (_, message) = runtime_fault("print len(nil);");
    assert_eq!(message, "Expected string or array, found nil.");
}

#[test]
fn set_returns_a_copy() {
    let src = "var a = [1, 2]; print len(a); print set(a, 0, 5); print a;";
    assert_eq!(assert_success(src), "2\n[5, 2]\n[1, 2]\n");
    assert_eq!(assert_success("var b = [1, 2, 3]; print set(b, 1, 9); print b;"),
               "[1, 9, 3]\n[1, 2, 3]\n");
    assert_eq!(assert_success("print set(\"abc\", 10, 1);"), "abc\n");

    let (_, message) = runtime_fault("print set([1], 1, 0);");
    assert_eq!(message, "Index 1 is out of bounds for length 1.");
    let (_, message) = runtime_fault("print set(1, 0, 0);");
    assert_eq!(message, "Expected string or array, found number.");
}

#[test]
fn indexing_arrays_and_strings() {
    assert_eq!(assert_success("var a = [1, \"two\", [3]]; print a[1]; print a[2];"),
               "two\n[3]\n");
    assert_eq!(assert_success("print \"abc\"[1];"), "b\n");

    let (_, message) = runtime_fault("print [1, 2, 3][1.5];");
    assert_eq!(message, "Index must be an integer, found 1.5.");
    let (_, message) = runtime_fault("print [1, 2, 3][3];");
    assert_eq!(message, "Index 3 is out of bounds for length 3.");
    let (_, message) = runtime_fault("print [1][-1];");
    assert_eq!(message, "Index -1 is out of bounds for length 1.");
    let (_, message) = runtime_fault("print [1][\"0\"];");
    assert_eq!(message, "Index must be a number, found string.");
    let (_, message) = runtime_fault("print 5[0];");
    assert_eq!(message, "Only arrays and strings can be indexed, found number.");
}

#[test]
fn runtime_faults_point_at_the_offending_token() {
    let (_, diagnostics) = assert_failure("print 1;\nprint nope;", RunStatus::RuntimeError);
    let entry = &diagnostics.entries()[0];
    assert_eq!(entry.line, 2);
    assert_eq!(entry.column, 7);
    assert_eq!(entry.lexeme.as_deref(), Some("nope"));
    assert_eq!(entry.mode, Some(SpanMode::Cover));
}

#[test]
fn return_and_break_outside_their_context() {
    let (_, message) = runtime_fault("return 1;");
    assert_eq!(message, "Can't return from top-level code.");
    let (output, message) = runtime_fault("print 0; break; print 1;");
    assert_eq!(output, "0\n");
    assert_eq!(message, "Can't break outside of a loop.");
    let (_, message) = runtime_fault("fn f() { break; } while (true) { f(); }");
    assert_eq!(message, "Can't break outside of a loop.");
}

#[test]
fn unbounded_recursion_overflows() {
    let mut out = Vec::new();
    let mut diagnostics = Diagnostics::new();
    let mut interpreter = Interpreter::with_max_call_depth(&mut out, 32);

    let status = run_with(&mut interpreter, "fn f() { f(); } f();", &mut diagnostics);

    assert_eq!(status, RunStatus::RuntimeError);
    assert_eq!(diagnostics.messages(), vec!["Stack overflow: call depth exceeded 32."]);
}

#[test]
fn recursion_up_to_the_default_depth_limit() {
    let count = "fn count(n) { if (n == 0) return 0; return 1 + count(n - 1); }";
    assert_eq!(assert_success(&format!("{count} print count(150);")), "150\n");

    let (output, message) = runtime_fault(&format!("{count} print count(500); print 1;"));
    assert_eq!(output, "");
    assert_eq!(message,
               format!("Stack overflow: call depth exceeded {DEFAULT_MAX_CALL_DEPTH}."));
}

#[test]
fn deeply_nested_source_is_a_syntax_error() {
    let deep = format!("print {}1{};", "(".repeat(1000), ")".repeat(1000));
    let (output, diagnostics) = assert_failure(&deep, RunStatus::SyntaxErrors);
    assert_eq!(output, "");
    assert_eq!(diagnostics.messages(), vec!["Expression nested too deeply."]);

    let blocks = format!("{}print 1;{}", "{".repeat(1000), "}".repeat(1000));
    let (output, diagnostics) = assert_failure(&blocks, RunStatus::SyntaxErrors);
    assert_eq!(output, "");
    assert_eq!(diagnostics.messages()[0], "Statement nested too deeply.");

    let nested = format!("print {}1{};", "(".repeat(60), ")".repeat(60));
    assert_eq!(assert_success(&nested), "1\n");
}

#[test]
fn globals_persist_across_runs() {
    let mut out = Vec::new();
    let mut diagnostics = Diagnostics::new();
    {
        let mut interpreter = Interpreter::new(&mut out);
        assert_eq!(run_with(&mut interpreter, "var a = 40;", &mut diagnostics),
                   RunStatus::Completed);
        assert_eq!(run_with(&mut interpreter, "print a + 2;", &mut diagnostics),
                   RunStatus::Completed);
        assert!(interpreter.global("a").is_some());
    }
    assert_eq!(String::from_utf8(out).unwrap(), "42\n");
}

#[test]
fn builtins_are_bound_globally() {
    let mut out = Vec::new();
    let interpreter = Interpreter::new(&mut out);
    for name in BUILTIN_FUNCTIONS {
        assert!(interpreter.global(name).is_some(), "builtin '{name}' is not bound");
    }
}

#[test]
fn lexical_faults_prevent_execution() {
    let (output, diagnostics) =
        assert_failure("print \"ok\";\n@ print \"abc", RunStatus::LexicalErrors);
    assert_eq!(output, "");
    assert_eq!(diagnostics.messages(),
               vec!["Unexpected character '@'.", "Unterminated string."]);
    assert_eq!(diagnostics.entries()[0].line, 2);
    assert_eq!(diagnostics.entries()[0].column, 1);
}

#[test]
fn every_unterminated_string_is_reported() {
    let (output, diagnostics) =
        assert_failure("print \"one;\nprint 2;\nprint \"three;", RunStatus::LexicalErrors);
    assert_eq!(output, "");
    assert_eq!(diagnostics.messages(), vec!["Unterminated string.", "Unterminated string."]);
    assert_eq!(diagnostics.entries()[1].line, 3);
}

#[test]
fn syntax_faults_prevent_execution() {
    let (output, diagnostics) =
        assert_failure("print 1;\nvar = 2;\nprint (3;", RunStatus::SyntaxErrors);
    assert_eq!(output, "");
    assert_eq!(diagnostics.messages(),
               vec!["Expect variable name.", "Expect ')' after expression."]);
}

#[test]
fn comments_are_ignored() {
    assert_eq!(assert_success("// nothing\nprint 1; // trailing\n"), "1\n");
}

#[test]
fn status_maps_to_exit_codes() {
    assert_eq!(RunStatus::Completed.exit_code(), 0);
    assert_eq!(RunStatus::LexicalErrors.exit_code(), 65);
    assert_eq!(RunStatus::SyntaxErrors.exit_code(), 65);
    assert_eq!(RunStatus::RuntimeError.exit_code(), 70);
}
