use arc_runtime::RuntimeError;

mod common;
use common::{assert_dumps, prog, repeat, run, try_run};

#[test]
fn var_assign_is_init() {
    let res = run("x = object");
    assert!(res.output.is_empty());
    assert!(res.thread_failures.is_empty());
}

#[test]
fn field_assign_is_init() {
    run(&prog(&["x = object", "y = object", "y.field = object"]));
}

#[test]
fn uninit_var_is_err() {
    assert_eq!(
        try_run("x = y").unwrap_err(),
        RuntimeError::NoSuchVar("y".into())
    );
}

#[test]
fn uninit_field_is_err() {
    assert_eq!(
        try_run(&prog(&["x = object", "y = x.field"])).unwrap_err(),
        RuntimeError::NoSuchVar("field".into())
    );
}

#[test]
fn thread_can_access_global() {
    let res = run(&prog(&["x = object", "thread {", "y = x", "}"]));
    assert!(res.thread_failures.is_empty());
}

#[test]
fn thread_can_create_global() {
    let res = run(&prog(&["thread {", "x = object", "}", "sleep", "y = x", "dump y"]));
    assert_dumps(
        &res.output,
        &[r"dump y: strong\(\w+\), obj refCounter = 1, fields = \{\}"],
    );
}

#[test]
fn thread_can_access_foreign_global() {
    let res = run(&prog(&[
        "thread {", "x = object", "}", "sleep", "thread {", "y = x", "}", "sleep", "dump y",
    ]));
    assert!(res.thread_failures.is_empty(), "{:?}", res.thread_failures);
    assert_dumps(
        &res.output,
        &[r"dump y: strong\(\w+\), obj refCounter = 1, fields = \{\}"],
    );
}

#[test]
fn assignment_increments_counter() {
    let res = run(&prog(&[
        "x = object",
        "dump x",
        "y = x",
        "dump x",
        "dump y",
        "anchor ~= x",
    ]));
    assert_dumps(
        &res.output,
        &[
            r"dump x: strong\(\w+\), obj refCounter = 1, fields = \{\}",
            r"dump x: strong\(\w+\), obj refCounter = 2, fields = \{\}",
            r"dump y: strong\(\w+\), obj refCounter = 2, fields = \{\}",
        ],
    );
}

#[test]
fn weak_assignment_does_not_increment_counter() {
    let res = run(&prog(&[
        "x = object",
        "dump x",
        "y ~= x",
        "dump x",
        "dump y",
        "anchor ~= x",
    ]));
    assert_dumps(
        &res.output,
        &[
            r"dump x: strong\(\w+\), obj refCounter = 1, fields = \{\}",
            r"dump x: strong\(\w+\), obj refCounter = 1, fields = \{\}",
            r"dump y: weak\(\w+ -> \w+\), weak refCounter = 2, obj refCounter = 1, fields = \{\}",
        ],
    );
}

#[test]
fn global_dies_at_last_use() {
    let res = run(&prog(&["x = object", "dump x", "y = x", "dump x", "dump y"]));
    assert_dumps(
        &res.output,
        &[
            r"dump x: strong\(\w+\), obj refCounter = 1, fields = \{\}",
            r"dump x: strong\(\w+\), obj refCounter = 2, fields = \{\}",
            r"dump y: strong\(\w+\), obj refCounter = 1, fields = \{\}",
        ],
    );
}

#[test]
fn global_dies_with_last_thread() {
    let res = run(&prog(&[
        "x = object",
        "wx ~= x",
        "thread {",
        "sleep",
        "y ~= x",
        "}",
        "dump wx",
        "sleep",
        "sleep",
        "dump wx",
    ]));
    assert_dumps(
        &res.output,
        &[
            r"dump wx: weak\(\w+ -> \w+\), weak refCounter = 2, obj refCounter = 1, fields = \{\}",
            r"dump wx: weak\(\w+ -> 0\), weak refCounter = 1, obj collected",
        ],
    );
}

#[test]
fn weak_refs_are_freed() {
    let res = run(&prog(&[
        "x = object",
        "w0 ~= x",
        "w1 ~= x",
        "w2 ~= x",
        "w3 ~= x",
        "w4 ~= x",
        "w5 ~= x",
        "dump w0",
        "dump x",
        "dump w0",
        "dump w1",
        "dump w2",
        "dump w3",
        "dump w4",
        "dump w5",
    ]));
    assert_dumps(
        &res.output,
        &[
            r"dump w0: weak\(\w+ -> \w+\), weak refCounter = 7, obj refCounter = 1, fields = \{\}",
            r"dump x: strong\(\w+\), obj refCounter = 1, fields = \{\}",
            r"dump w0: weak\(\w+ -> 0\), weak refCounter = 6, obj collected",
            r"dump w1: weak\(\w+ -> 0\), weak refCounter = 5, obj collected",
            r"dump w2: weak\(\w+ -> 0\), weak refCounter = 4, obj collected",
            r"dump w3: weak\(\w+ -> 0\), weak refCounter = 3, obj collected",
            r"dump w4: weak\(\w+ -> 0\), weak refCounter = 2, obj collected",
            r"dump w5: weak\(\w+ -> 0\), weak refCounter = 1, obj collected",
        ],
    );
}

const CHAIN: &[&str] = &[
    "a = object",
    "b = object",
    "c = object",
    "d = object",
    "e = object",
    "f = object",
    "g = object",
    "h = object",
    "i = object",
    "j = object",
    "a.next = b",
    "b.next = c",
    "c.next = d",
    "d.next = e",
    "e.next = f",
    "f.next = g",
    "g.next = h",
    "h.next = i",
    "i.next = j",
];

#[test]
fn fields_die_with_an_object() {
    let mut src = CHAIN.to_vec();
    src.extend(["j.next ~= a", "wj ~= j", "dump wj", "dump a", "dump wj"]);
    let res = run(&prog(&src));
    assert_dumps(
        &res.output,
        &[
            r"dump wj: weak\(\w+ -> \w+\), weak refCounter = 2, obj refCounter = 1, fields = \{next: weak\(\w+ -> \w+\)\}",
            r"dump a: strong\(\w+\), obj refCounter = 1, fields = \{next: strong\(\w+\)\}",
            r"dump wj: weak\(\w+ -> 0\), weak refCounter = 1, obj collected",
        ],
    );
}

#[test]
fn the_circle_of_alive() {
    let mut src = CHAIN.to_vec();
    src.extend(["j.next = a", "dump a", "wa ~= a", "dump wa"]);
    let res = run(&prog(&src));
    assert_dumps(
        &res.output,
        &[
            r"dump a: strong\(\w+\), obj refCounter = 2, fields = \{next: strong\(\w+\)\}",
            r"dump wa: weak\(\w+ -> \w+\), weak refCounter = 2, obj refCounter = 1, fields = \{next: strong\(\w+\)\}",
        ],
    );
}

#[test]
fn named_objects_show_their_name() {
    let res = run(&prog(&[
        "x = object(head)",
        "x.tail = object(tail)",
        "w ~= x.tail",
        "dump w",
        "dump x",
    ]));
    assert_dumps(
        &res.output,
        &[
            r"dump w: weak\(0x[0-9a-f]+ -> tail@0x[0-9a-f]+\), weak refCounter = 2, obj refCounter = 1, fields = \{\}",
            r"dump x: strong\(head@0x[0-9a-f]+\), obj refCounter = 1, fields = \{tail: strong\(tail@0x[0-9a-f]+\)\}",
        ],
    );
}

#[test]
fn fields_dump_in_insertion_order() {
    let res = run(&prog(&[
        "x = object",
        "x.b = object",
        "x.a ~= x.b",
        "x.b = object",
        "dump x",
    ]));
    assert_dumps(
        &res.output,
        &[r"dump x: strong\(\w+\), obj refCounter = 1, fields = \{b: strong\(\w+\), a: weak\(\w+ -> 0\)\}"],
    );
}

#[test]
fn field_path_dump() {
    let res = run(&prog(&["x = object", "x.f = object", "x.f.g = object", "dump x.f.g"]));
    assert_dumps(
        &res.output,
        &[r"dump x\.f\.g: strong\(\w+\), obj refCounter = 1, fields = \{\}"],
    );
}

#[test]
fn strong_copy_of_dead_weak_is_invalid_access() {
    let err = try_run(&prog(&["x = object", "w ~= x", "dump w", "y = w"])).unwrap_err();
    assert_eq!(err, RuntimeError::InvalidAccess);
}

#[test]
fn field_through_dead_weak_is_invalid_access() {
    let err = try_run(&prog(&["w ~= object", "w.f = object"])).unwrap_err();
    assert_eq!(err, RuntimeError::InvalidAccess);
}

#[test]
fn weak_of_fresh_object_is_dead_immediately() {
    let res = run(&prog(&["w ~= object", "dump w"]));
    assert_dumps(
        &res.output,
        &[r"dump w: weak\(\w+ -> 0\), weak refCounter = 1, obj collected"],
    );
}

#[test]
fn thread_error_is_confined_to_the_thread() {
    let res = run(&prog(&["thread {", "y = missing", "}", "x = object", "dump x"]));
    assert_dumps(
        &res.output,
        &[r"dump x: strong\(\w+\), obj refCounter = 1, fields = \{\}"],
    );
    assert_eq!(res.thread_failures.len(), 1);
    let failure = &res.thread_failures[0];
    assert_eq!(failure.error, RuntimeError::NoSuchVar("missing".into()));
    assert!(failure.thread.starts_with("arc-thread-"));
}

#[test]
fn nested_threads_share_globals() {
    let res = run(&prog(&[
        "thread {",
        "thread {",
        "x = object",
        "}",
        "}",
        "sleep",
        "dump x",
    ]));
    assert!(res.thread_failures.is_empty(), "{:?}", res.thread_failures);
    assert_dumps(
        &res.output,
        &[r"dump x: strong\(\w+\), obj refCounter = 1, fields = \{\}"],
    );
}

#[test]
fn top_level_error_waits_for_threads_and_keeps_output() {
    let program = arc_driver::Driver::new()
        .build(
            "t.arc",
            &prog(&["x = object", "thread {", "sleep", "dump x", "}", "dump x", "y = z"]),
        )
        .unwrap();
    let mut rt = arc_runtime::Runtime::with_config(common::config());
    let err = rt.run(&program).unwrap_err();
    assert_eq!(err, RuntimeError::NoSuchVar("z".into()));
    // The thread finished its dump before `run` returned.
    let output = rt.take_output();
    assert_eq!(output.lines().count(), 2, "{output}");
}

#[test]
fn deep_field_paths_read_and_write() {
    let res = run(&prog(&[
        "x = object",
        "x.a = object",
        "x.a.b = object",
        "x.a.b.c = object(leaf)",
        "y = x.a.b.c",
        "dump y",
        "x.a.b.c.d ~= x.a",
        "dump x.a.b.c",
    ]));
    assert_dumps(
        &res.output,
        &[
            r"dump y: strong\(leaf@\w+\), obj refCounter = 2, fields = \{\}",
            r"dump x\.a\.b\.c: strong\(leaf@\w+\), obj refCounter = 1, fields = \{d: weak\(\w+ -> \w+\)\}",
        ],
    );

    let err = try_run(&prog(&["x = object", "x.a = object", "x.a.missing.c = object"]))
        .unwrap_err();
    assert_eq!(err, RuntimeError::NoSuchVar("missing".into()));
}

#[test]
fn long_chain_is_released_inside_a_thread() {
    let src = prog(&[
        "thread {",
        "head = object",
        &repeat(100_000, "i", &["tmp = object", "tmp.next = head", "head = tmp"]),
        "}",
        "done = object",
        "dump done",
    ]);
    let res = run(&src);
    assert!(res.thread_failures.is_empty(), "{:?}", res.thread_failures);
    assert_dumps(
        &res.output,
        &[r"dump done: strong\(\w+\), obj refCounter = 1, fields = \{\}"],
    );
}
