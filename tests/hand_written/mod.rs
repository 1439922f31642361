use crate::{test, test_error};

mod restore;
mod stash;

test!(
    show_missing_property,
    r#"
    show nothing
    "#,
    r#"
    {}
    "#,
    r#"
    null
    "#
);

test!(
    set_whole_property,
    r#"
    set options {"foo": [1, 2]}
    set count 3
    show options
    show count
    "#,
    r#"
    {"options": {}}
    "#,
    r#"
    {"foo": [1, 2]}
    3
    "#
);

test!(
    statements_on_one_line,
    r#"
    set options.foo "a;b"; show options; stash options; set options.foo 1; restore options; show options
    "#,
    r#"
    {"options": {}}
    "#,
    r#"
    {"foo": "a;b"}
    {"foo": "a;b"}
    "#
);

test_error!(
    set_key_on_non_object,
    "set count.foo 1",
    r#"{"count": 3}"#,
    "line 1: expected `app.count` to be an object, got number"
);

test_error!(
    unknown_command,
    "stash options; frobnicate options",
    r#"{"options": {}}"#,
    "line 1: Unknown command `frobnicate`"
);
